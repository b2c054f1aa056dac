//! Error types for keylist.

use thiserror::Error;

/// Errors surfaced by list operations.
///
/// Every variant describes a caller or element-contract mistake; none of
/// them is transient, so none is worth retrying.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListError {
    /// The member name does not exist on the element type.
    #[error("attribute '{attribute}' not found")]
    AttributeNotFound {
        /// The name that failed to resolve.
        attribute: String,
    },

    /// Sorting was disabled through [`ListOptions`](crate::ListOptions).
    #[error("sorting is not supported by this list")]
    SortingNotSupported,

    /// Searching was disabled through [`ListOptions`](crate::ListOptions).
    #[error("searching is not supported by this list")]
    SearchingNotSupported,

    /// An index was outside the list.
    #[error("index {index} out of range for list of length {len}")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// The list length at the time of the call.
        len: usize,
    },
}

impl ListError {
    /// Create an attribute-not-found error.
    pub fn attribute_not_found(attribute: impl Into<String>) -> Self {
        Self::AttributeNotFound {
            attribute: attribute.into(),
        }
    }

    /// Create an index error.
    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }
}

/// Result type for list operations.
pub type Result<T> = std::result::Result<T, ListError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            ListError::attribute_not_found("height").to_string(),
            "attribute 'height' not found"
        );
        assert_eq!(
            ListError::index_out_of_range(4, 3).to_string(),
            "index 4 out of range for list of length 3"
        );
    }
}
