use crate::corpus::HistoryPolicy;
use crate::recommender::RecommendOptions;
use log::warn;
use std::path::PathBuf;

pub const DEFAULT_TOP_N: usize = 10;
pub const DEFAULT_CATALOG_PATH: &str = "colleges.json";
pub const DEFAULT_DATABASE_PATH: &str = "colleges.db";

#[derive(Debug, Clone, PartialEq)]
pub struct RecommenderConfig {
    pub catalog_path: PathBuf,
    pub database_path: PathBuf,
    pub top_n: usize,
    pub policy: HistoryPolicy,
    pub history_limit: Option<usize>,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        RecommenderConfig {
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            top_n: DEFAULT_TOP_N,
            policy: HistoryPolicy::Distinct,
            history_limit: None,
        }
    }
}

impl RecommenderConfig {
    /// Defaults overridden by `RECOMMENDER_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup("RECOMMENDER_CATALOG").filter(|v| !v.trim().is_empty()) {
            config.catalog_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("RECOMMENDER_DATABASE").filter(|v| !v.trim().is_empty()) {
            config.database_path = PathBuf::from(path);
        }
        if let Some(top_n) = positive(&lookup, "RECOMMENDER_TOP_N") {
            config.top_n = top_n;
        }
        if let Some(limit) = positive(&lookup, "RECOMMENDER_HISTORY_LIMIT") {
            config.history_limit = Some(limit);
        }
        if let Some(raw) = lookup("RECOMMENDER_HISTORY_POLICY") {
            match raw.parse::<HistoryPolicy>() {
                Ok(policy) => config.policy = policy,
                Err(e) => warn!("Ignoring RECOMMENDER_HISTORY_POLICY: {}", e),
            }
        }

        config
    }

    pub fn options(&self) -> RecommendOptions {
        RecommendOptions {
            policy: self.policy,
            history_limit: self.history_limit,
        }
    }
}

fn positive(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<usize> {
    let raw = lookup(key)?;
    match raw.trim().parse::<usize>() {
        Ok(value) if value > 0 => Some(value),
        _ => {
            warn!("Ignoring {}={:?}: expected a positive integer", key, raw);
            None
        }
    }
}
