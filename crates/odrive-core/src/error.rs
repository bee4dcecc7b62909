use odrive_proto::ParseError;
use thiserror::Error;

/// Failures reported by the strict (`try_*`, `send*`) calls.
///
/// The lenient calls never return these; they log and fall back to zero or
/// an empty string.
#[derive(Debug, Error)]
pub enum OdriveError {
    #[error("transport error: {0}")]
    Io(#[from] std::io::Error),
    #[error("no complete reply before timeout (got {partial:?})")]
    Timeout { partial: String },
    #[error("malformed reply: {0}")]
    Parse(#[from] ParseError),
}
