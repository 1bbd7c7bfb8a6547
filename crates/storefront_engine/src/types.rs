use std::fmt;

use storefront_core::{ErrorInfo, ErrorKind, Generation, OrderConfirmation, Page};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    PageFetched {
        generation: Generation,
        page_number: u32,
        result: Result<Page, ApiError>,
    },
    OrderCompleted {
        result: Result<OrderConfirmation, ApiError>,
    },
}

/// Failure of a call to the storefront API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// The user-facing classification used by the core.
    pub fn to_error_info(&self) -> ErrorInfo {
        let kind = match self.kind {
            FailureKind::Network | FailureKind::InvalidEndpoint => ErrorKind::Network,
            FailureKind::HttpStatus(_) | FailureKind::GraphQl | FailureKind::Decode => {
                ErrorKind::Server
            }
            FailureKind::Timeout => ErrorKind::Timeout,
        };
        ErrorInfo::new(kind, self.message.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    InvalidEndpoint,
    Network,
    HttpStatus(u16),
    /// The response carried a GraphQL `errors` list.
    GraphQl,
    Decode,
    Timeout,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::GraphQl => write!(f, "graphql error"),
            FailureKind::Decode => write!(f, "malformed response"),
            FailureKind::Timeout => write!(f, "timeout"),
        }
    }
}
