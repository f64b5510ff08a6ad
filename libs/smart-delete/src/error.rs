//! # Smart Delete Errors
//!
//! Error types for host operations and the delete engine.

use config::constants::BOUNDARY_REGION_MARKER;
use thiserror::Error;

/// Result type for smart delete operations.
pub type DeleteResult<T> = Result<T, DeleteError>;

/// Errors that can occur while deleting or dissolving mesh elements.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeleteError {
    /// The requested dissolve/delete cannot be applied to this boundary or
    /// selection shape
    #[error("{message}")]
    TopologyInvalid { message: String },

    /// The editing session is not in the state the operation expects
    #[error("Invalid context: {message}")]
    ContextInvalid { message: String },

    /// A recorded element index no longer exists
    #[error("Invalid vertex index {index} (mesh has {count} vertices)")]
    InvalidIndex { index: usize, count: usize },

    /// Any other failure reported by the host
    #[error("Host operation failed: {message}")]
    Host { message: String },
}

impl DeleteError {
    /// Creates a boundary region error with the host's stock wording.
    pub fn boundary_region() -> Self {
        Self::TopologyInvalid {
            message: format!("{BOUNDARY_REGION_MARKER} to join faces"),
        }
    }

    /// Creates a topology error.
    pub fn topology(message: impl Into<String>) -> Self {
        Self::TopologyInvalid {
            message: message.into(),
        }
    }

    /// Creates a context error.
    pub fn context(message: impl Into<String>) -> Self {
        Self::ContextInvalid {
            message: message.into(),
        }
    }

    /// Creates an unclassified host error.
    pub fn host(message: impl Into<String>) -> Self {
        Self::Host {
            message: message.into(),
        }
    }

    /// True for the recoverable boundary region failure.
    ///
    /// Hosts that only surface free-form messages are matched on the stock
    /// marker text as well.
    pub fn is_boundary_region(&self) -> bool {
        match self {
            Self::TopologyInvalid { .. } => true,
            Self::Host { message } => message.contains(BOUNDARY_REGION_MARKER),
            _ => false,
        }
    }

    /// True when the session left the expected state.
    pub fn is_context_invalid(&self) -> bool {
        matches!(self, Self::ContextInvalid { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_region_classification() {
        assert!(DeleteError::boundary_region().is_boundary_region());
        assert!(DeleteError::host("Invalid boundary region to join faces").is_boundary_region());
        assert!(!DeleteError::host("out of memory").is_boundary_region());
        assert!(!DeleteError::context("no mesh").is_boundary_region());
    }

    #[test]
    fn test_boundary_region_message() {
        assert_eq!(
            DeleteError::boundary_region().to_string(),
            "Invalid boundary region to join faces"
        );
    }

    #[test]
    fn test_invalid_index_message() {
        let err = DeleteError::InvalidIndex { index: 7, count: 4 };
        assert_eq!(err.to_string(), "Invalid vertex index 7 (mesh has 4 vertices)");
    }
}
