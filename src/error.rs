use std::{error::Error, fmt};

/// The error returned by [`Map::at`](crate::Map::at) and
/// [`Map::at_mut`](crate::Map::at_mut) when the key is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyNotFound;

impl fmt::Display for KeyNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("key not found")
    }
}

impl Error for KeyNotFound {}
