//! Normalizes heterogeneous backend responses into a uniform listing list.
//!
//! Three response shapes exist in the wild: a bare listing array, an
//! `{code, message}` error body, and an object wrapping the array under a
//! well-known key. Anything else degrades to an empty list so one malformed
//! source never blocks the whole search.

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::errors::SearchError;
use crate::models::listing::Listing;

/// Shown when the backend reports an error without a usable message.
pub const GENERIC_QUERY_ERROR: &str = "server returned an error while parsing your query";

/// Wrapper keys scanned in order; the first array-valued one wins.
const WRAPPER_KEYS: [&str; 5] = ["jobs", "yc_jobs", "internships", "results", "data"];

/// Structured error body reported by the backend.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn user_message(self) -> String {
        self.message.unwrap_or_else(|| GENERIC_QUERY_ERROR.to_string())
    }
}

/// Decode attempts in precedence order. Error detection must win over
/// wrapper unwrapping, so `Error` sits before `Object`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawResponse {
    Listings(Vec<Listing>),
    Error(ErrorBody),
    Object(Map<String, Value>),
    Other(Value),
}

/// Converts a decoded JSON response into an ordered listing collection.
///
/// Pure and idempotent. Returns `RemoteQueryError` only for a structured
/// `{code, ...}` body; every other unrecognized shape is logged and mapped
/// to an empty list.
pub fn normalize(value: Value) -> Result<Vec<Listing>, SearchError> {
    match serde_json::from_value::<RawResponse>(value) {
        Ok(RawResponse::Listings(rows)) => Ok(rows),
        Ok(RawResponse::Error(body)) => Err(SearchError::RemoteQuery(body.user_message())),
        Ok(RawResponse::Object(map)) => {
            let wrapped = WRAPPER_KEYS
                .iter()
                .find_map(|key| map.get(*key).filter(|v| v.is_array()));
            match wrapped {
                Some(array) => match serde_json::from_value::<Vec<Listing>>(array.clone()) {
                    Ok(rows) => Ok(rows),
                    Err(e) => {
                        warn!("wrapped listing array failed to decode, dropping source: {e}");
                        Ok(Vec::new())
                    }
                },
                None => {
                    warn!(
                        "response object carries no known listing wrapper (keys: {:?})",
                        map.keys().collect::<Vec<_>>()
                    );
                    Ok(Vec::new())
                }
            }
        }
        Ok(RawResponse::Other(other)) => {
            warn!("unrecognized response shape, dropping source: {other}");
            Ok(Vec::new())
        }
        // `Other` absorbs any value, so this arm is unreachable in practice.
        Err(e) => {
            warn!("response failed to decode, dropping source: {e}");
            Ok(Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn listing_array() -> Value {
        json!([
            {"id": "a1", "title": "Data Engineer"},
            {"id": "a2", "title": "ML Engineer"}
        ])
    }

    #[test]
    fn test_bare_array_passes_through() {
        let rows = normalize(listing_array()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, "a1");
        assert_eq!(rows[1].id, "a2");
    }

    #[test]
    fn test_wrapped_and_bare_arrays_normalize_identically() {
        let bare = normalize(listing_array()).unwrap();
        let wrapped = normalize(json!({"jobs": listing_array()})).unwrap();
        assert_eq!(bare, wrapped);
    }

    #[test]
    fn test_wrapper_keys_scanned_in_order() {
        // `jobs` precedes `results` in the scan order even though `results`
        // also holds an array.
        let value = json!({
            "results": [{"id": "r1"}],
            "jobs": [{"id": "j1"}]
        });
        let rows = normalize(value).unwrap();
        assert_eq!(rows[0].id, "j1");
    }

    #[test]
    fn test_non_array_wrapper_values_are_skipped() {
        let value = json!({
            "jobs": "not an array",
            "results": [{"id": "r1"}]
        });
        let rows = normalize(value).unwrap();
        assert_eq!(rows[0].id, "r1");
    }

    #[test]
    fn test_error_body_raises_remote_query() {
        let value = json!({"code": "BAD_QUERY", "message": "unbalanced parentheses"});
        let err = normalize(value).unwrap_err();
        match err {
            SearchError::RemoteQuery(msg) => assert_eq!(msg, "unbalanced parentheses"),
            other => panic!("expected RemoteQuery, got {other:?}"),
        }
    }

    #[test]
    fn test_error_without_message_uses_generic_text() {
        let err = normalize(json!({"code": "BAD_QUERY"})).unwrap_err();
        match err {
            SearchError::RemoteQuery(msg) => assert_eq!(msg, GENERIC_QUERY_ERROR),
            other => panic!("expected RemoteQuery, got {other:?}"),
        }
    }

    #[test]
    fn test_error_detection_wins_over_wrapper_unwrapping() {
        let value = json!({"code": "ERR", "jobs": [{"id": "j1"}, {"id": "j2"}]});
        assert!(matches!(
            normalize(value),
            Err(SearchError::RemoteQuery(_))
        ));
    }

    #[test]
    fn test_unrecognized_shapes_degrade_to_empty() {
        assert_eq!(normalize(json!("just a string")).unwrap(), vec![]);
        assert_eq!(normalize(json!(42)).unwrap(), vec![]);
        assert_eq!(normalize(json!({"unrelated": {"nested": true}})).unwrap(), vec![]);
        // Array elements that are not listings cannot be cast; same lenient path.
        assert_eq!(normalize(json!([1, 2])).unwrap(), vec![]);
    }

    #[test]
    fn test_normalize_is_idempotent_on_equal_input() {
        let value = json!({"internships": [{"id": "i1"}]});
        let first = normalize(value.clone()).unwrap();
        let second = normalize(value).unwrap();
        assert_eq!(first, second);
    }
}
