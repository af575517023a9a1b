//! CMS error definitions.

use thiserror::Error;

/// Errors that abort CMS request handling.
///
/// The variants only carry a message; translating them into a response is
/// left to the HTTP layer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CmsError {
    /// The environment is not able to serve CMS pages (no manager, no site).
    #[error("{0}")]
    Internal(String),

    /// The requested page does not exist for the current caller.
    #[error("{0}")]
    PageNotFound(String),
}

impl CmsError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::PageNotFound(message.into())
    }

    /// Short label used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Internal(_) => "internal",
            Self::PageNotFound(_) => "not_found",
        }
    }
}

/// Result type for CMS operations.
pub type CmsResult<T> = Result<T, CmsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CmsError::internal("No CMS Manager available");
        assert_eq!(err.to_string(), "No CMS Manager available");
        assert_eq!(err.kind(), "internal");

        let err = CmsError::not_found("The page is not enabled : id=3");
        assert!(err.to_string().contains("id=3"));
        assert_eq!(err.kind(), "not_found");
    }
}
