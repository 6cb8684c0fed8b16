use crate::error::Result;
use std::collections::HashMap;

/// Supplies a user's past search queries, most recent first.
pub trait HistorySource {
    /// An unknown user yields an empty list rather than an error.
    fn fetch_history(&self, user_id: i64, limit: Option<usize>) -> Result<Vec<String>>;
}

impl HistorySource for HashMap<i64, Vec<String>> {
    fn fetch_history(&self, user_id: i64, limit: Option<usize>) -> Result<Vec<String>> {
        let history = self.get(&user_id).map(Vec::as_slice).unwrap_or_default();
        let take = limit.unwrap_or(history.len());
        Ok(history.iter().take(take).cloned().collect())
    }
}
