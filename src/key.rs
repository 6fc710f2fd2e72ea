//! Key arguments that may be absent.

use std::borrow::Cow;
use crate::error::{Error, Result};

/// Something that can be passed where the dictionary expects a key or prefix.
///
/// Plain strings always provide a key. `Option` wraps any of them and stands
/// for a nullable argument, as found at dynamic boundaries (deserialized
/// requests, FFI, optional form fields): `None` is rejected with
/// [`Error::InvalidArgument`] instead of being silently treated as `""`.
pub trait KeyArg {
    /// Returns the key, or `None` if the argument is null.
    fn as_key(&self) -> Option<&str>;
}

impl<T: ?Sized + AsRef<str>> KeyArg for &T {
    fn as_key(&self) -> Option<&str> {
        Some((**self).as_ref())
    }
}

impl KeyArg for String {
    fn as_key(&self) -> Option<&str> {
        Some(self)
    }
}

impl KeyArg for Cow<'_, str> {
    fn as_key(&self) -> Option<&str> {
        Some(self)
    }
}

impl<K: KeyArg> KeyArg for Option<K> {
    fn as_key(&self) -> Option<&str> {
        self.as_ref().and_then(KeyArg::as_key)
    }
}

/// Unwraps a key argument, reporting `name` if it is null.
pub(crate) fn require<'k, K>(arg: &'k K, name: &'static str) -> Result<&'k str>
where
    K: ?Sized + KeyArg,
{
    arg.as_key().ok_or(Error::InvalidArgument { name })
}
