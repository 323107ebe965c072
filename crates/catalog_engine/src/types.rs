use std::fmt;

use thiserror::Error;

/// Prefix of every user-facing failure message published by the store.
pub const USER_MESSAGE_PREFIX: &str = "Failed to load data";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Text shown to the user when a cycle fails.
    pub fn user_message(&self) -> String {
        format!("{USER_MESSAGE_PREFIX}: {self}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    /// The body was not a JSON array of records.
    Decode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            FailureKind::Decode => write!(f, "malformed response"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Returned by a watcher once its store is gone and no further update can arrive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("store closed")]
pub struct StoreClosed;
