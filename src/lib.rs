pub mod catalog;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod database;
pub mod error;
pub mod history;
pub mod ranker;
pub mod recommender;
pub mod tokenizer;
pub mod vectorizer;
