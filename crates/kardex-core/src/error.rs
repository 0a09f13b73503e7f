//! Store error handling
//!
//! Provides typed errors for store operations with enough detail
//! (field name, offending value) for the caller to correct input
//! and retry. None of these errors is fatal to the process.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::models::Item;

/// Errors that can occur during store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// A field failed validation
    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// An explicit id collided with an existing record
    #[error("Item ID {0} already exists")]
    DuplicateId(u64),

    /// The target of an update/delete/adjust was not found
    #[error("No item found matching '{0}'")]
    NotFound(String),

    /// A stock adjustment would drive the quantity below zero
    #[error("Cannot adjust item {id} by {delta}: only {current} in stock")]
    NegativeStock { id: u64, current: i64, delta: i64 },

    /// A name search matched more than one item
    #[error("'{term}' matches {} items; pick one by id", .candidates.len())]
    AmbiguousMatch { term: String, candidates: Vec<Item> },

    /// Reading or writing the inventory file failed
    #[error("Failed to access inventory file '{path}': {source}")]
    Persistence {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    /// Validation error for a named field
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        StoreError::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Persistence error with path context
    pub fn persistence(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Persistence {
            path: path.into(),
            source,
        }
    }

    /// True for errors the user can fix by re-entering input
    pub fn is_input_error(&self) -> bool {
        !matches!(self, StoreError::Persistence { .. })
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display() {
        let err = StoreError::validation("name", "must not be empty");
        assert_eq!(err.to_string(), "Invalid name: must not be empty");
        assert!(err.is_input_error());
    }

    #[test]
    fn test_negative_stock_display() {
        let err = StoreError::NegativeStock {
            id: 3,
            current: 2,
            delta: -5,
        };
        let msg = err.to_string();
        assert!(msg.contains("item 3"));
        assert!(msg.contains("-5"));
        assert!(msg.contains("2 in stock"));
    }

    #[test]
    fn test_ambiguous_match_carries_candidates() {
        let err = StoreError::AmbiguousMatch {
            term: "bolt".to_string(),
            candidates: vec![Item::new(1, "Bolt", 5, 0.10), Item::new(2, "Bolt Large", 2, 0.25)],
        };
        assert!(err.to_string().contains("matches 2 items"));
        if let StoreError::AmbiguousMatch { candidates, .. } = err {
            assert_eq!(candidates.len(), 2);
        } else {
            unreachable!();
        }
    }

    #[test]
    fn test_persistence_not_input_error() {
        let err = StoreError::persistence(
            "/data/inventory.txt",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(!err.is_input_error());
        assert!(err.to_string().contains("/data/inventory.txt"));
    }
}
