use crate::channel::ResponseCode;
use crate::path::ResourcePath;

/// All error types that can occur when talking to a Trådfri gateway.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The secure channel failed while performing `action`.
    ///
    /// Transport errors are surfaced unchanged and never retried.
    #[error("transport {action} error: {err:?}")]
    Transport { action: String, err: std::io::Error },

    /// The credential exchange with the gateway did not yield a pre-shared key.
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Failed to serialize a request body.
    #[error("failed to encode payload: {0:?}")]
    Encode(serde_json::Error),

    /// A response or notification payload did not match the expected structure.
    #[error("failed to decode payload: {0:?}")]
    Decode(serde_json::Error),

    /// A client-side precondition failed; no request was sent.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Malformed input to a conversion function.
    #[error("invalid format: {0}")]
    Format(String),

    /// The gateway answered with a non-success status.
    #[error("gateway rejected request to {path} with status {code}")]
    Rejected {
        path: ResourcePath,
        code: ResponseCode,
    },

    /// The mood root index was empty, so no mood parent could be resolved.
    #[error("gateway returned no mood parent")]
    NoMoodParent,
}

impl Error {
    /// Create a new transport error
    pub fn transport(action: &str, err: std::io::Error) -> Self {
        Error::Transport {
            action: action.to_string(),
            err,
        }
    }

    /// Create a new rejected-request error
    pub fn rejected(path: &ResourcePath, code: ResponseCode) -> Self {
        Error::Rejected {
            path: path.clone(),
            code,
        }
    }
}

/// Hacky implementation of PartialEq for testing
#[cfg(test)]
impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}
