//! Loading the hazard JSON feed
//!
//! The feed is a JSON array of hazard records. When the backend fails it
//! answers with `{"error": "..."}` instead, which is surfaced as
//! [`FeedError::Upstream`]. Array elements that are not record objects are
//! skipped with a warning; the rest of the feed is kept.

use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::core_types::HazardRecord;

/// Parse a feed document.
///
/// # Errors
/// Returns error if the document is not JSON, is an upstream error object, or
/// is not an array.
pub fn parse_hazard_feed(json: &str) -> Result<Vec<HazardRecord>, FeedError> {
    let document: Value =
        serde_json::from_str(json).map_err(|e| FeedError::ParseFailed(e.to_string()))?;

    if let Some(message) = document.get("error").and_then(Value::as_str) {
        return Err(FeedError::Upstream(message.to_string()));
    }

    let Value::Array(elements) = document else {
        return Err(FeedError::ParseFailed(
            "expected a JSON array of hazard records".to_string(),
        ));
    };

    let records = elements
        .into_iter()
        .enumerate()
        .filter_map(|(index, element)| {
            if !element.is_object() {
                warn!(index, "Skipping feed record that is not an object: {element}");
                return None;
            }
            match serde_json::from_value(element) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(index, "Skipping malformed feed record: {e}");
                    None
                }
            }
        })
        .collect();
    Ok(records)
}

/// Read and parse a feed file.
///
/// # Errors
/// Returns error if the file cannot be read or parsed
pub fn load_hazard_feed<P: AsRef<Path>>(path: P) -> Result<Vec<HazardRecord>, FeedError> {
    let path = path.as_ref();
    let contents =
        fs::read_to_string(path).map_err(|e| FeedError::LoadFailed(e.to_string()))?;

    let records = parse_hazard_feed(&contents)?;
    info!(path = %path.display(), records = records.len(), "Loaded hazard feed");
    Ok(records)
}

/// Errors that can occur while loading a feed
#[derive(Debug)]
pub enum FeedError {
    /// Failed to read the feed
    LoadFailed(String),
    /// Feed contents are not a valid record array
    ParseFailed(String),
    /// The backend reported an error instead of data
    Upstream(String),
}

impl std::fmt::Display for FeedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedError::LoadFailed(msg) => write!(f, "Failed to load feed: {msg}"),
            FeedError::ParseFailed(msg) => write!(f, "Failed to parse feed: {msg}"),
            FeedError::Upstream(msg) => write!(f, "Feed backend error: {msg}"),
        }
    }
}

impl std::error::Error for FeedError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_array() {
        let records = parse_hazard_feed(
            r#"[
                {"_id": "1", "location": [151.0, -33.0], "temperature": 38.0},
                {"_id": "2", "location": ["bad", 1]},
                {"_id": "3"}
            ]"#,
        )
        .unwrap();
        assert_eq!(records.len(), 3);
        assert!(records[0].coordinate().is_ok());
        assert!(records[1].coordinate().is_err());
        assert!(records[2].coordinate().is_err());
    }

    #[test]
    fn test_empty_array() {
        assert!(parse_hazard_feed("[]").unwrap().is_empty());
    }

    #[test]
    fn test_upstream_error() {
        let err = parse_hazard_feed(r#"{"error": "connection refused"}"#).unwrap_err();
        assert!(matches!(err, FeedError::Upstream(ref m) if m == "connection refused"));
        assert_eq!(err.to_string(), "Feed backend error: connection refused");
    }

    #[test]
    fn test_not_an_array() {
        assert!(matches!(
            parse_hazard_feed(r#"{"records": []}"#),
            Err(FeedError::ParseFailed(_))
        ));
        assert!(matches!(
            parse_hazard_feed("{"),
            Err(FeedError::ParseFailed(_))
        ));
    }

    #[test]
    fn test_malformed_records_are_skipped() {
        let records = parse_hazard_feed(
            r#"[
                {"_id": "a", "location": [1, 2]},
                null,
                42,
                "record",
                {"_id": {"$oid": "b"}, "location": [3, 4], "country": 5},
                [5, 6],
                {"_id": "c", "location": [7, 8]}
            ]"#,
        )
        .unwrap();

        let ids: Vec<_> = records.iter().filter_map(|r| r.id.as_deref()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(records[1].country, None);

        assert!(parse_hazard_feed("[1, 2]").unwrap().is_empty());
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_hazard_feed("/nonexistent/fire-risk/feed.json"),
            Err(FeedError::LoadFailed(_))
        ));
    }
}
