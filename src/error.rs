use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecommendError {
    #[error("Invalid input: {0}")]
    ClientInput(String),

    #[error("Data unavailable from {source_name}: {reason}")]
    DataUnavailable { source_name: String, reason: String },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RecommendError>;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const INVALID_ARGUMENTS: i32 = 2;
    pub const DATA_UNAVAILABLE: i32 = 3;
    pub const DATABASE_ERROR: i32 = 4;
}

impl RecommendError {
    pub fn data_unavailable(source_name: impl Into<String>, reason: impl ToString) -> Self {
        RecommendError::DataUnavailable {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            RecommendError::ClientInput(_) => exit_code::INVALID_ARGUMENTS,
            RecommendError::DataUnavailable { .. } => exit_code::DATA_UNAVAILABLE,
            RecommendError::Database(_) => exit_code::DATABASE_ERROR,
            RecommendError::Serialization(_) => exit_code::GENERAL_ERROR,
        }
    }
}

/// A catalog record that was skipped because a required field is absent or
/// has the wrong type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("catalog entry #{index} skipped: {problem}")]
pub struct MalformedEntry {
    pub index: usize,
    pub problem: String,
}

/// Parse a user identifier as supplied at the boundary.
pub fn parse_user_id(raw: Option<&str>) -> Result<i64> {
    let raw = raw
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| RecommendError::ClientInput("User ID is required".to_string()))?;

    raw.parse::<i64>()
        .map_err(|_| RecommendError::ClientInput(format!("User ID must be an integer, got '{}'", raw)))
}
