//! Error types for catalog loading and selection storage.
//!
//! Parsing never fails (bad rows degrade to missing data), so these only
//! cover the boundary: fetching the catalog and reading/writing the store.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The spreadsheet endpoint answered but reported a failure.
    #[error("source rejected the request: {0}")]
    Rejected(String),

    #[error("source '{source_name}' returned no usable rows")]
    Empty { source_name: String },

    /// Every configured source failed; each cause is kept in priority order.
    #[error("no course data available ({} source(s) tried)", .attempts.len())]
    Exhausted { attempts: Vec<(String, CatalogError)> },
}

impl CatalogError {
    /// One line per failed source, for logs and API error bodies.
    pub fn describe(&self) -> String {
        match self {
            CatalogError::Exhausted { attempts } => attempts
                .iter()
                .map(|(name, e)| format!("{}: {}", name, e))
                .collect::<Vec<_>>()
                .join("; "),
            other => other.to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("invalid stored JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhausted_keeps_every_cause() {
        let err = CatalogError::Exhausted {
            attempts: vec![
                ("sheets".to_string(), CatalogError::Status(500)),
                ("csv:tin_chi.csv".to_string(), CatalogError::Empty { source_name: "csv:tin_chi.csv".into() }),
            ],
        };
        assert_eq!(err.to_string(), "no course data available (2 source(s) tried)");
        let d = err.describe();
        assert!(d.contains("sheets: unexpected HTTP status 500"));
        assert!(d.contains("returned no usable rows"));
    }
}
