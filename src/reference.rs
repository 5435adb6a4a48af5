//! Application-owned reference state for altitude frame conversions
//!
//! Holds the optional "home" and "origin" reference points and the
//! optional terrain height capability. An application constructs one
//! [`ReferenceFrames`] and passes it by reference into every conversion
//! that needs it; nothing here is process-global.
//!
//! No internal synchronization is provided. A concurrent application
//! should wrap the whole value in a `RwLock` (or swap immutable copies);
//! neither changes any method signature or success/failure contract.

use crate::error::{Error, Result};
use crate::location::Location;

/// Capability supplying ground elevation at a point.
///
/// Implementations return the terrain height AMSL in meters, or `None`
/// when no height is available for the queried location. Results are
/// never cached by this crate; the provider is queried on every
/// conversion that involves a terrain frame.
pub trait TerrainProvider {
    /// Returns terrain height AMSL (meters) at the given location
    fn height_amsl(&self, loc: &Location) -> Option<f32>;
}

impl<F> TerrainProvider for F
where
    F: Fn(&Location) -> Option<f32>,
{
    fn height_amsl(&self, loc: &Location) -> Option<f32> {
        self(loc)
    }
}

/// Optional home/origin reference points and terrain capability
#[derive(Default)]
pub struct ReferenceFrames {
    home: Option<Location>,
    origin: Option<Location>,
    terrain: Option<Box<dyn TerrainProvider>>,
}

impl ReferenceFrames {
    /// Creates an empty registry: no home, no origin, no terrain provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the home reference point (copied by value)
    pub fn set_home(&mut self, home: Location) {
        self.home = Some(home);
    }

    /// Clears the home reference point
    pub fn clear_home(&mut self) {
        self.home = None;
    }

    /// Returns true if a home reference point is set
    pub fn home_is_set(&self) -> bool {
        self.home.is_some()
    }

    /// Returns the home reference point, if set
    pub fn home(&self) -> Option<&Location> {
        self.home.as_ref()
    }

    /// Sets the origin reference point (copied by value)
    pub fn set_origin(&mut self, origin: Location) {
        self.origin = Some(origin);
    }

    /// Clears the origin reference point
    pub fn clear_origin(&mut self) {
        self.origin = None;
    }

    /// Returns true if an origin reference point is set
    pub fn origin_is_set(&self) -> bool {
        self.origin.is_some()
    }

    /// Returns the origin reference point, if set
    pub fn origin(&self) -> Option<&Location> {
        self.origin.as_ref()
    }

    /// Installs a terrain provider, replacing any previous one.
    ///
    /// Plain closures work: `refs.set_terrain_provider(|_loc: &Location| Some(42.0));`
    pub fn set_terrain_provider(&mut self, provider: impl TerrainProvider + 'static) {
        self.terrain = Some(Box::new(provider));
    }

    /// Queries the installed terrain provider at the given location.
    ///
    /// Fails with [`Error::NoTerrainProvider`] when none is installed and
    /// [`Error::TerrainLookupFailed`] when the provider has no height for
    /// the location.
    pub fn terrain_height_amsl(&self, loc: &Location) -> Result<f32> {
        let provider = self.terrain.as_ref().ok_or(Error::NoTerrainProvider)?;
        provider.height_amsl(loc).ok_or(Error::TerrainLookupFailed)
    }
}
