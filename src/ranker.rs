use crate::vectorizer::{SparseVector, TfidfVectorizer};
use log::debug;
use rayon::prelude::*;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredIndex {
    /// Position in the catalog document sequence.
    pub index: usize,
    pub score: f64,
}

pub struct Ranker {
    top_n: usize,
}

impl Ranker {
    pub fn new(top_n: usize) -> Self {
        Ranker { top_n }
    }

    /// Score every catalog document against the profile and keep the best
    /// `top_n`, highest first. Equal scores keep catalog order.
    pub fn rank<S: AsRef<str> + Sync>(&self, profile: &str, documents: &[S]) -> Vec<ScoredIndex> {
        let mut scored = self.score_all(profile, documents);
        sort_ranked(&mut scored);
        scored.truncate(self.top_n);
        scored
    }

    /// One score per catalog document, in catalog order.
    pub fn score_all<S: AsRef<str> + Sync>(&self, profile: &str, documents: &[S]) -> Vec<ScoredIndex> {
        if documents.is_empty() {
            return Vec::new();
        }

        let mut corpus: Vec<&str> = Vec::with_capacity(documents.len() + 1);
        corpus.push(profile);
        corpus.extend(documents.iter().map(AsRef::as_ref));

        let mut vectorizer = TfidfVectorizer::new();
        let rows = vectorizer.fit_transform(&corpus);
        let (profile_row, catalog_rows) = rows.split_at(1);
        let profile_vector = &profile_row[0];

        debug!(
            "Fitted term weights over {} documents, vocabulary of {} terms",
            corpus.len(),
            vectorizer.vocabulary_len()
        );

        catalog_rows
            .par_iter()
            .enumerate()
            .map(|(index, row)| ScoredIndex {
                index,
                score: cosine_similarity(profile_vector, row),
            })
            .collect()
    }
}

pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let mag_a = a.norm();
    let mag_b = b.norm();
    if mag_a == 0.0 || mag_b == 0.0 {
        return 0.0;
    }
    (a.dot(b) / (mag_a * mag_b)).clamp(0.0, 1.0)
}

fn sort_ranked(scored: &mut [ScoredIndex]) {
    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then(a.index.cmp(&b.index))
    });
}
