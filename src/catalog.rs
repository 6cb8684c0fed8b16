use crate::error::{MalformedEntry, RecommendError, Result};
use log::info;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// One raw record of the catalog file, validated later by the corpus builder.
pub type CatalogRecord = Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
    pub name: String,
    pub location: String,
    pub courses: Vec<String>,
    /// Any other fields of the record, echoed back untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CatalogEntry {
    pub fn new(name: &str, location: &str, courses: &[&str]) -> Self {
        CatalogEntry {
            name: name.to_string(),
            location: location.to_string(),
            courses: courses.iter().map(|c| c.to_string()).collect(),
            extra: Map::new(),
        }
    }

    /// Validate a raw record at position `index` of the catalog.
    pub fn from_record(index: usize, record: &CatalogRecord) -> std::result::Result<Self, MalformedEntry> {
        let malformed = |problem: String| MalformedEntry { index, problem };

        let object = record
            .as_object()
            .ok_or_else(|| malformed("record is not a JSON object".to_string()))?;

        let name = string_field(object, "name").map_err(malformed)?;
        let location = string_field(object, "location").map_err(malformed)?;

        let courses = match object.get("courses") {
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect::<Option<Vec<String>>>()
                .ok_or_else(|| malformed("field 'courses' contains a non-string value".to_string()))?,
            Some(Value::Null) | None => {
                return Err(malformed("missing field 'courses'".to_string()));
            }
            Some(_) => {
                return Err(malformed("field 'courses' is not a list".to_string()));
            }
        };

        let extra = object
            .iter()
            .filter(|(key, _)| !matches!(key.as_str(), "name" | "location" | "courses"))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Ok(CatalogEntry {
            name,
            location,
            courses,
            extra,
        })
    }
}

fn string_field(object: &Map<String, Value>, field: &str) -> std::result::Result<String, String> {
    match object.get(field) {
        Some(Value::String(value)) => Ok(value.clone()),
        Some(Value::Null) | None => Err(format!("missing field '{}'", field)),
        Some(_) => Err(format!("field '{}' is not a string", field)),
    }
}

pub trait CatalogSource {
    fn fetch_catalog(&self) -> Result<Vec<CatalogRecord>>;
}

/// Catalog backed by a JSON file holding an array of college objects.
pub struct JsonCatalog {
    path: PathBuf,
}

impl JsonCatalog {
    pub fn new(path: impl AsRef<Path>) -> Self {
        JsonCatalog {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl CatalogSource for JsonCatalog {
    fn fetch_catalog(&self) -> Result<Vec<CatalogRecord>> {
        let source_name = self.path.display().to_string();
        let contents = fs::read_to_string(&self.path)
            .map_err(|e| RecommendError::data_unavailable(&source_name, format!("Failed to read catalog: {}", e)))?;

        let records: Vec<CatalogRecord> = serde_json::from_str(&contents).map_err(|e| {
            RecommendError::data_unavailable(&source_name, format!("Failed to parse catalog: {}", e))
        })?;

        info!("Loaded {} catalog records from {}", records.len(), source_name);
        Ok(records)
    }
}

/// In-memory catalog, mostly useful for embedding and tests.
impl CatalogSource for Vec<CatalogRecord> {
    fn fetch_catalog(&self) -> Result<Vec<CatalogRecord>> {
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn complete_record_keeps_extra_fields() {
        let record = json!({
            "name": "Alpha Tech",
            "location": "Boston",
            "courses": ["Computer Science", "Physics"],
            "website": "https://alpha.example"
        });
        let entry = CatalogEntry::from_record(0, &record).unwrap();
        assert_eq!(entry.name, "Alpha Tech");
        assert_eq!(entry.courses, vec!["Computer Science", "Physics"]);
        assert_eq!(entry.extra.get("website"), Some(&json!("https://alpha.example")));

        let round = serde_json::to_value(&entry).unwrap();
        assert_eq!(round, record);
    }

    #[test]
    fn missing_courses_is_malformed() {
        let record = json!({"name": "Gamma", "location": "Austin"});
        let err = CatalogEntry::from_record(3, &record).unwrap_err();
        assert_eq!(err.index, 3);
        assert_eq!(err.problem, "missing field 'courses'");
    }

    #[test]
    fn wrong_types_are_malformed() {
        let cases = [
            json!("just a string"),
            json!({"name": 7, "location": "Reno", "courses": []}),
            json!({"name": "Delta", "location": null, "courses": []}),
            json!({"name": "Delta", "location": "Reno", "courses": "Art"}),
            json!({"name": "Delta", "location": "Reno", "courses": ["Art", 5]}),
        ];
        for record in cases.iter() {
            assert!(CatalogEntry::from_record(0, record).is_err(), "{}", record);
        }
    }

    #[test]
    fn empty_course_list_is_allowed() {
        let record = json!({"name": "Epsilon", "location": "Provo", "courses": []});
        let entry = CatalogEntry::from_record(0, &record).unwrap();
        assert!(entry.courses.is_empty());
    }

    #[test]
    fn json_catalog_reads_array_file() {
        let mut file = NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"[{{"name": "Alpha Tech", "location": "Boston", "courses": ["CS"]}}, {{"name": "Broken"}}]"#
        )
        .unwrap();

        let catalog = JsonCatalog::new(file.path());
        let records = catalog.fetch_catalog().unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn unreadable_catalog_is_data_unavailable() {
        let dir = tempfile::tempdir().expect("tempdir");
        let catalog = JsonCatalog::new(dir.path().join("missing.json"));
        let err = catalog.fetch_catalog().unwrap_err();
        assert!(matches!(err, RecommendError::DataUnavailable { .. }));

        let mut file = NamedTempFile::new().expect("temp file");
        write!(file, "{{ not json").unwrap();
        let err = JsonCatalog::new(file.path()).fetch_catalog().unwrap_err();
        assert!(matches!(err, RecommendError::DataUnavailable { .. }));
    }
}
