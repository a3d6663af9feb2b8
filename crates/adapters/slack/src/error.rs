//! Slack-specific error type.

use awaybot_app::ports::ServiceError;

/// Errors from talking to the Slack Web API.
#[derive(Debug, thiserror::Error)]
pub enum SlackError {
    /// The request could not be sent or the body could not be read.
    #[error("{method}: request failed: {source}")]
    Http {
        method: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// Slack answered with `"ok": false`.
    #[error("{method}: {code}")]
    Api { method: &'static str, code: String },

    /// The response body was not the expected JSON.
    #[error("{method}: unexpected response: {source}")]
    Decode {
        method: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl From<SlackError> for ServiceError {
    fn from(err: SlackError) -> Self {
        Self(err.to_string())
    }
}
