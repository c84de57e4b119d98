use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Rejected before any network call.
    #[error("invalid query: {reason}")]
    InvalidQuery { reason: String },
    #[error("{operation} request failed: {message}")]
    FetchFailed {
        operation: &'static str,
        message: String,
    },
    #[error("malformed {operation} response: {message}")]
    MalformedResponse {
        operation: &'static str,
        message: String,
    },
    /// A completion for a query (or detail request) that is no longer active.
    #[error("response belongs to a superseded request")]
    QuerySuperseded,
    #[error("no query has been issued yet")]
    NoActiveQuery,
}

impl CatalogError {
    pub fn invalid_query(reason: impl Into<String>) -> Self {
        Self::InvalidQuery {
            reason: reason.into(),
        }
    }

    pub fn fetch_failed(operation: &'static str, message: impl ToString) -> Self {
        Self::FetchFailed {
            operation,
            message: message.to_string(),
        }
    }

    pub fn malformed(operation: &'static str, message: impl ToString) -> Self {
        Self::MalformedResponse {
            operation,
            message: message.to_string(),
        }
    }

    /// Errors that are expected during normal use and never shown to the user.
    pub fn is_silent(&self) -> bool {
        matches!(self, Self::QuerySuperseded | Self::NoActiveQuery)
    }
}
