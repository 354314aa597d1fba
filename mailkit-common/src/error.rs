//! Error types for the mailkit-common crate.
//!
//! Every fallible operation reports one of these synchronously at the call
//! that triggered it. None of them carry partial state: the value the call
//! was operating on is left exactly as it was before the call.

use core::fmt::{self, Display, Formatter};

use thiserror::Error;

/// A length-limited text field of a mailto URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Subject,
    Body,
}

impl Field {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Subject => "subject",
            Self::Body => "body",
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while building a mailto URI.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MailtoError {
    /// An address failed syntactic validation.
    #[error("Invalid email address: '{0}'")]
    InvalidAddress(String),

    /// Subject or body exceeded its pre-encoding character budget.
    #[error("The {field} must not be longer than {limit} characters (was {length})")]
    FieldTooLong {
        field: Field,
        limit: usize,
        length: usize,
    },

    /// The fully composed URI exceeded the total length limit.
    #[error("The mailto URI must not be longer than {limit} characters (was {length})")]
    UriTooLong { limit: usize, length: usize },
}

impl MailtoError {
    /// Returns the rejected address, if this is an address error.
    #[must_use]
    pub fn address(&self) -> Option<&str> {
        match self {
            Self::InvalidAddress(address) => Some(address),
            _ => None,
        }
    }
}

/// Errors that can occur when pasting tab-delimited text into a table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasteError {
    /// The text contained no lines.
    #[error("Cannot paste. Nothing to paste.")]
    Empty,

    /// The pasted block is wider than the columns left in the table.
    #[error("Cannot paste. Not enough columns in table (need {required}, have {available}).")]
    NotEnoughColumns { required: usize, available: usize },

    /// The pasted block is taller than the rows left in the table.
    #[error("Cannot paste. Not enough rows in table (need {required}, have {available}).")]
    NotEnoughRows { required: usize, available: usize },

    /// A target cell is read-only.
    #[error("Cannot paste. Cell at row {row}, column {column} is not editable.")]
    CellNotEditable { row: usize, column: usize },
}
