//! Errors reported by the dictionary facade.

use core::fmt;

/// An error returned by [`RadixMap`](crate::RadixMap) and [`RadixSet`](crate::RadixSet).
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Error {
    /// A key or prefix argument was missing (`None`). Reported before the
    /// tree is touched, so a rejected call never mutates anything.
    InvalidArgument {
        /// Name of the offending parameter.
        name: &'static str,
    },
    /// [`RadixMap::get`](crate::RadixMap::get) found no entry for the key.
    NotFound {
        key: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument { name } => write!(f, "{name} cannot be null"),
            Error::NotFound { key } => write!(f, "no item with the key {key:?} has been found"),
        }
    }
}

impl std::error::Error for Error {}

/// Result type of the fallible dictionary operations.
pub type Result<T> = core::result::Result<T, Error>;
