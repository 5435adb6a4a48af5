//! Error types for navkit

use std::fmt;

/// Result type for navkit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in navkit operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A home reference point is required but none has been set
    HomeNotSet,

    /// An origin reference point is required but none has been set
    OriginNotSet,

    /// A terrain height is required but no terrain provider is installed
    NoTerrainProvider,

    /// The terrain provider reported no height for the queried location
    TerrainLookupFailed,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::HomeNotSet => write!(f, "home reference point is not set"),
            Error::OriginNotSet => write!(f, "origin reference point is not set"),
            Error::NoTerrainProvider => write!(f, "no terrain provider installed"),
            Error::TerrainLookupFailed => write!(f, "terrain provider returned no height"),
        }
    }
}

impl std::error::Error for Error {}
