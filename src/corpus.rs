use crate::catalog::{CatalogEntry, CatalogRecord};
use crate::error::MalformedEntry;
use log::{debug, warn};
use std::collections::HashSet;
use std::str::FromStr;

/// How repeated history queries contribute to the profile document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryPolicy {
    /// Each distinct query counts once.
    #[default]
    Distinct,
    /// Every query counts, so repeats raise their terms' weight.
    Frequency,
}

impl FromStr for HistoryPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "distinct" | "set" => Ok(HistoryPolicy::Distinct),
            "frequency" | "bag" => Ok(HistoryPolicy::Frequency),
            other => Err(format!("unknown history policy '{}'", other)),
        }
    }
}

/// Documents for one recommendation call. `documents[i]` describes
/// `entries[i]`.
#[derive(Debug, Clone)]
pub struct Corpus {
    pub profile: String,
    pub documents: Vec<String>,
    pub entries: Vec<CatalogEntry>,
    pub skipped: Vec<MalformedEntry>,
}

/// Why no corpus could be built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyInput {
    NoHistory,
    NoCatalog { skipped: usize },
}

pub struct CorpusBuilder {
    policy: HistoryPolicy,
}

impl CorpusBuilder {
    pub fn new(policy: HistoryPolicy) -> Self {
        CorpusBuilder { policy }
    }

    pub fn build(
        &self,
        history: &[String],
        records: &[CatalogRecord],
    ) -> Result<Corpus, EmptyInput> {
        let profile = self
            .profile_document(history)
            .ok_or(EmptyInput::NoHistory)?;

        let mut entries = Vec::with_capacity(records.len());
        let mut skipped = Vec::new();
        for (index, record) in records.iter().enumerate() {
            match CatalogEntry::from_record(index, record) {
                Ok(entry) => entries.push(entry),
                Err(malformed) => {
                    warn!("{}", malformed);
                    skipped.push(malformed);
                }
            }
        }

        if entries.is_empty() {
            return Err(EmptyInput::NoCatalog {
                skipped: skipped.len(),
            });
        }

        let documents: Vec<String> = entries.iter().map(catalog_document).collect();
        debug!(
            "Built corpus: profile of {} chars, {} catalog documents, {} skipped",
            profile.len(),
            documents.len(),
            skipped.len()
        );

        Ok(Corpus {
            profile,
            documents,
            entries,
            skipped,
        })
    }

    /// Join lower-cased history queries into one document, or `None` when
    /// there is nothing to join.
    pub fn profile_document(&self, history: &[String]) -> Option<String> {
        let lowered = history
            .iter()
            .map(|query| query.trim().to_lowercase())
            .filter(|query| !query.is_empty());

        let parts: Vec<String> = match self.policy {
            HistoryPolicy::Frequency => lowered.collect(),
            HistoryPolicy::Distinct => {
                let mut seen = HashSet::new();
                lowered.filter(|query| seen.insert(query.clone())).collect()
            }
        };

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

impl Default for CorpusBuilder {
    fn default() -> Self {
        Self::new(HistoryPolicy::default())
    }
}

pub fn catalog_document(entry: &CatalogEntry) -> String {
    let mut parts = Vec::with_capacity(entry.courses.len() + 2);
    parts.push(entry.name.as_str());
    parts.push(entry.location.as_str());
    parts.extend(entry.courses.iter().map(String::as_str));
    parts.join(" ").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn history(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn distinct_policy_drops_repeats_case_insensitively() {
        let builder = CorpusBuilder::new(HistoryPolicy::Distinct);
        let profile = builder
            .profile_document(&history(&["Boston", "boston", "Art"]))
            .unwrap();
        assert_eq!(profile, "boston art");
    }

    #[test]
    fn frequency_policy_keeps_repeats() {
        let builder = CorpusBuilder::new(HistoryPolicy::Frequency);
        let profile = builder
            .profile_document(&history(&["Boston", "boston", "Art"]))
            .unwrap();
        assert_eq!(profile, "boston boston art");
    }

    #[test]
    fn blank_history_is_no_history() {
        let builder = CorpusBuilder::default();
        assert_eq!(builder.profile_document(&history(&["  ", ""])), None);
        let records = vec![json!({"name": "A", "location": "B", "courses": []})];
        assert_eq!(
            builder.build(&[], &records).unwrap_err(),
            EmptyInput::NoHistory
        );
    }

    #[test]
    fn catalog_document_flattens_fields() {
        let entry = CatalogEntry::new("Alpha Tech", "Boston", &["Computer Science", "Art"]);
        assert_eq!(
            catalog_document(&entry),
            "alpha tech boston computer science art"
        );
    }

    #[test]
    fn malformed_records_are_skipped_and_alignment_kept() {
        let records = vec![
            json!({"name": "Gamma", "location": "Boston"}),
            json!({"name": "Alpha Tech", "location": "Boston", "courses": ["CS"]}),
            json!(42),
            json!({"name": "Beta College", "location": "Reno", "courses": ["Art"]}),
        ];
        let corpus = CorpusBuilder::default()
            .build(&history(&["boston"]), &records)
            .unwrap();

        assert_eq!(corpus.entries.len(), 2);
        assert_eq!(corpus.documents.len(), 2);
        assert_eq!(corpus.entries[0].name, "Alpha Tech");
        assert_eq!(corpus.documents[1], "beta college reno art");
        let skipped: Vec<usize> = corpus.skipped.iter().map(|m| m.index).collect();
        assert_eq!(skipped, vec![0, 2]);
    }

    #[test]
    fn all_malformed_is_no_catalog() {
        let records = vec![json!({"name": "Gamma"}), json!(null)];
        let err = CorpusBuilder::default()
            .build(&history(&["boston"]), &records)
            .unwrap_err();
        assert_eq!(err, EmptyInput::NoCatalog { skipped: 2 });
    }

    #[test]
    fn policy_parses_from_config_strings() {
        assert_eq!("Distinct".parse::<HistoryPolicy>(), Ok(HistoryPolicy::Distinct));
        assert_eq!("bag".parse::<HistoryPolicy>(), Ok(HistoryPolicy::Frequency));
        assert!("sometimes".parse::<HistoryPolicy>().is_err());
    }
}
