//! Error handling foundation for parley.
//!
//! Every crate defines its own domain error enums and returns them wrapped in
//! a rootcause [`Report`]. The only vocabulary shared across crates is
//! [`ErrorKind`], which classifies a failure for the boundary layer.

use rootcause::Report;
use std::fmt;

/// A Result type alias using rootcause's Report for error handling.
pub type Result<T, C = ()> = std::result::Result<T, Report<C>>;

/// Client-visible classification of a domain failure.
///
/// All kinds are recoverable: the boundary maps each one to a distinct
/// response instead of treating it as fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or missing identifiers, empty content, self-pairs.
    InvalidArgument,
    /// A referenced user or conversation does not exist.
    NotFound,
    /// The requester is not a participant of the target conversation.
    Forbidden,
}

impl ErrorKind {
    /// Returns the snake_case name of the kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidArgument => "invalid_argument",
            Self::NotFound => "not_found",
            Self::Forbidden => "forbidden",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
