use crate::catalog::{CatalogEntry, CatalogRecord, CatalogSource};
use crate::corpus::{CorpusBuilder, EmptyInput, HistoryPolicy};
use crate::error::Result;
use crate::history::HistorySource;
use crate::ranker::Ranker;
use log::{debug, info, warn};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    #[serde(flatten)]
    pub entry: CatalogEntry,
    pub similarity_score: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct RecommendOptions {
    pub policy: HistoryPolicy,
    /// Only the most recent `history_limit` queries feed the profile.
    pub history_limit: Option<usize>,
}

impl Default for RecommendOptions {
    fn default() -> Self {
        RecommendOptions {
            policy: HistoryPolicy::Distinct,
            history_limit: None,
        }
    }
}

/// Stateless recommendation service. Every call refetches its inputs and
/// refits the term weights.
pub struct Recommender<C, H> {
    catalog: C,
    history: H,
    options: RecommendOptions,
}

impl<C: CatalogSource, H: HistorySource> Recommender<C, H> {
    pub fn new(catalog: C, history: H, options: RecommendOptions) -> Self {
        Recommender {
            catalog,
            history,
            options,
        }
    }

    /// Ranked catalog entries for `user_id`. Unavailable data degrades to an
    /// empty list.
    pub fn recommend(&self, user_id: i64, top_n: usize) -> Vec<CatalogEntry> {
        self.recommend_scored(user_id, top_n)
            .into_iter()
            .map(|r| r.entry)
            .collect()
    }

    pub fn recommend_scored(&self, user_id: i64, top_n: usize) -> Vec<Recommendation> {
        match self.try_recommend_scored(user_id, top_n) {
            Ok(results) => results,
            Err(e) => {
                warn!("Recommendation for user {} degraded to empty: {}", user_id, e);
                Vec::new()
            }
        }
    }

    /// Like [`recommend`](Self::recommend) but reports unreadable sources.
    pub fn try_recommend(&self, user_id: i64, top_n: usize) -> Result<Vec<CatalogEntry>> {
        Ok(self
            .try_recommend_scored(user_id, top_n)?
            .into_iter()
            .map(|r| r.entry)
            .collect())
    }

    pub fn try_recommend_scored(&self, user_id: i64, top_n: usize) -> Result<Vec<Recommendation>> {
        let history = self
            .history
            .fetch_history(user_id, self.options.history_limit)?;
        if history.is_empty() {
            info!("User {} has no search history; nothing to recommend", user_id);
            return Ok(Vec::new());
        }

        let records = self.catalog.fetch_catalog()?;
        Ok(recommend_from(&history, &records, top_n, self.options.policy))
    }
}

/// The pure engine: build documents, rank them, map back to entries.
pub fn recommend_from(
    history: &[String],
    records: &[CatalogRecord],
    top_n: usize,
    policy: HistoryPolicy,
) -> Vec<Recommendation> {
    let corpus = match CorpusBuilder::new(policy).build(history, records) {
        Ok(corpus) => corpus,
        Err(EmptyInput::NoHistory) => {
            info!("Search history is empty; returning no recommendations");
            return Vec::new();
        }
        Err(EmptyInput::NoCatalog { skipped }) => {
            info!(
                "Catalog has no usable entries ({} skipped); returning no recommendations",
                skipped
            );
            return Vec::new();
        }
    };

    assert_eq!(
        corpus.documents.len(),
        corpus.entries.len(),
        "catalog documents and entries must stay aligned"
    );

    let ranked = Ranker::new(top_n).rank(&corpus.profile, &corpus.documents);
    let mut entries: Vec<Option<CatalogEntry>> = corpus.entries.into_iter().map(Some).collect();

    let results: Vec<Recommendation> = ranked
        .into_iter()
        .map(|scored| {
            let entry = entries[scored.index]
                .take()
                .expect("ranked indices are unique and within the catalog");
            debug!("{:.4} {}", scored.score, entry.name);
            Recommendation {
                entry,
                similarity_score: scored.score,
            }
        })
        .collect();

    info!(
        "Ranked {} catalog entries, returning {}",
        entries.len(),
        results.len()
    );
    results
}
