use thiserror::Error;

/// Engine-level error type.
///
/// Supersession is intentionally absent: a search that is cancelled by a
/// newer one resolves as `SearchOutcome::Superseded`, not as an error.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Unknown role type or a gap in the source table. Indicates a defect
    /// in the engine itself, never user input — callers should not catch it.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The backend reported a structured error (`{code, message}` body).
    /// The message is safe to surface to the user verbatim.
    #[error("{0}")]
    RemoteQuery(String),

    /// Network or HTTP-level failure.
    #[error("network error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for SearchError {
    fn from(e: reqwest::Error) -> Self {
        SearchError::Transport(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_query_displays_message_verbatim() {
        let err = SearchError::RemoteQuery("unbalanced parentheses in title query".into());
        assert_eq!(
            err.to_string(),
            "unbalanced parentheses in title query"
        );
    }
}
