#![forbid(unsafe_code)]
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/", env!("CARGO_PKG_README")))]

pub mod case;
pub mod error;
pub mod key;
pub mod map;
pub mod set;
mod node;

pub use case::CaseSensitivity;
pub use error::{Error, Result};
pub use key::KeyArg;
pub use map::RadixMap;
pub use set::RadixSet;



#[cfg(test)]
mod proptests;
