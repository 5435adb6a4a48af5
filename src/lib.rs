//! navkit - flat-earth navigation math for flight control
//!
//! navkit provides a fixed-point geographic [`Location`] type together with
//! altitude reference-frame conversion and the tangent-plane geometry used
//! by waypoint and navigation logic: distances, offsets, bearings, and
//! projection onto path segments.
//!
//! Positions store latitude and longitude in 1e-7 degree units and altitude
//! in centimeters, measured in one of four [`AltFrame`]s. The reference
//! state the frame conversions depend on (home, origin, terrain lookup)
//! lives in an application-owned [`ReferenceFrames`] that is passed by
//! reference into every conversion that needs it.
//!
//! All geometry is a local tangent-plane approximation, accurate over short
//! ranges (tens of kilometers). It is intentionally not great-circle or
//! ellipsoidal geodesy.
//!
//! # Examples
//!
//! ## Altitude frame conversion
//!
//! ```
//! use navkit::{AltFrame, Location, ReferenceFrames};
//!
//! let mut refs = ReferenceFrames::new();
//! refs.set_home(Location::new(-338570000, 1512150000, 10000, AltFrame::Absolute));
//!
//! // 20 m above a home at 100 m is 120 m absolute
//! let waypoint = Location::new(-338570000, 1512150000, 2000, AltFrame::AboveHome);
//! assert_eq!(waypoint.alt_cm(AltFrame::Absolute, &refs)?, 12000);
//! # Ok::<(), navkit::Error>(())
//! ```
//!
//! ## Distance and offset
//!
//! ```
//! use navkit::{AltFrame, Location};
//!
//! let opera_house = Location::new(-338570000, 1512150000, 0, AltFrame::Absolute);
//! let harbour_bridge = Location::new(-338520000, 1512100000, 0, AltFrame::Absolute);
//!
//! let d = opera_house.distance(&harbour_bridge);
//! assert!(d > 550.0 && d < 850.0);
//!
//! let mut loc = opera_house;
//! loc.offset_bearing(90.0, 100.0); // 100 m due east
//! assert!(loc.lng > opera_house.lng);
//! ```

pub mod altitude;
pub mod error;
pub mod geodesic;
pub mod location;
pub mod record;
pub mod reference;

pub use altitude::AltFrame;
pub use error::{Error, Result};
pub use location::{Location, LOCATION_ALT_MAX_M};
pub use record::LocationRecord;
pub use reference::{ReferenceFrames, TerrainProvider};
