use thiserror::Error;

#[derive(Error, Debug)]
pub enum TributaryError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP error: status {status}")]
    HttpStatus { status: u16, body: String },

    #[error("API parse error: {0}")]
    Parse(#[from] ApiParseError),

    #[error("Unsupported operation: {0}")]
    Unsupported(&'static str),

    #[error("Continuation issued for {issued_for} cannot be redeemed against {redeemed_against}")]
    ContinuationMismatch {
        issued_for: String,
        redeemed_against: String,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Feed not found: {0}")]
    FeedNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl TributaryError {
    /// The HTTP status code, if the server answered with a non-2xx status.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for 401 Unauthorized and 403 Forbidden responses.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}

/// A response that did not have the shape the reader API documents.
///
/// These are never retried or defaulted: either the local feed state is stale
/// beyond what a single re-sync can fix, or the server is misbehaving.
#[derive(Error, Debug)]
pub enum ApiParseError {
    #[error("malformed JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed {kind} id: {id}")]
    MalformedId { kind: &'static str, id: String },

    #[error("item references unknown category: {0}")]
    UnknownCategory(String),

    #[error("item references unknown subscription: {0}")]
    UnknownSubscription(String),

    #[error("invalid {field} timestamp: {value}")]
    InvalidTimestamp { field: &'static str, value: String },

    #[error("item {id} has no {field} link")]
    MissingLink { id: String, field: &'static str },

    #[error("content response is missing item {0}")]
    MissingItem(String),

    #[error("content response contains unrequested item {0}")]
    UnexpectedItem(String),

    #[error("invalid continuation: {0}")]
    InvalidContinuation(String),
}

pub type Result<T> = std::result::Result<T, TributaryError>;
