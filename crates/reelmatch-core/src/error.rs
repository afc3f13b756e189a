//! Error types shared by data sources.

/// Failure of an asynchronous fetch.
///
/// "No matches" is not an error: sources return an empty list for it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// Request could not be sent or the connection failed
    #[error("transport error: {0}")]
    Transport(String),
    /// Response body could not be decoded
    #[error("invalid response: {0}")]
    Decode(String),
    /// The remote API reported an error condition
    #[error("upstream error: {0}")]
    Upstream(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_display() {
        assert_eq!(
            FetchError::Transport("connection refused".into()).to_string(),
            "transport error: connection refused"
        );
        assert_eq!(
            FetchError::Decode("expected value".into()).to_string(),
            "invalid response: expected value"
        );
        assert_eq!(
            FetchError::Upstream("Invalid API key!".into()).to_string(),
            "upstream error: Invalid API key!"
        );
    }
}
