//! Fixed-layout location record for external storage formats
//!
//! [`Location`] keeps its altitude frame as a tagged enum; storage
//! formats that interoperate with legacy mission records instead pack
//! the frame into overlapping flag bits next to the loiter bits. This
//! module is the only place that legacy encoding exists: records map
//! to and from [`Location`] here, and the rest of the crate never sees
//! the bits.

use serde::{Deserialize, Serialize};

use crate::altitude::AltFrame;
use crate::location::Location;

/// Altitude is relative to home
pub const FLAG_RELATIVE_ALT: u8 = 1 << 0;
/// Loiter counter-clockwise
pub const FLAG_LOITER_CCW: u8 = 1 << 1;
/// Altitude is above terrain
pub const FLAG_TERRAIN_ALT: u8 = 1 << 2;
/// Altitude is above the origin
pub const FLAG_ORIGIN_ALT: u8 = 1 << 3;
/// Loiter crosstrack mode
pub const FLAG_LOITER_XTRACK: u8 = 1 << 4;

/// Packed location with the legacy flag-bit frame encoding
///
/// Layout: one flags byte (bits 0..=4 as the `FLAG_*` constants),
/// then altitude (cm), latitude, and longitude (1e-7 deg) as signed
/// 32-bit values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRecord {
    /// Flag bits, see the `FLAG_*` constants
    pub flags: u8,
    /// Altitude in centimeters
    pub alt: i32,
    /// Latitude in 1e-7 degrees
    pub lat: i32,
    /// Longitude in 1e-7 degrees
    pub lng: i32,
}

impl LocationRecord {
    /// Size of the little-endian byte image
    pub const SIZE: usize = 13;

    /// Decodes the altitude frame from the flag bits.
    ///
    /// Priority order is terrain, then origin, then relative: legacy
    /// readers resolve flag combinations the encoder never produces
    /// this way, so the order must not change.
    pub fn alt_frame(&self) -> AltFrame {
        if self.flags & FLAG_TERRAIN_ALT != 0 {
            AltFrame::AboveTerrain
        } else if self.flags & FLAG_ORIGIN_ALT != 0 {
            AltFrame::AboveOrigin
        } else if self.flags & FLAG_RELATIVE_ALT != 0 {
            AltFrame::AboveHome
        } else {
            AltFrame::Absolute
        }
    }

    /// Unpacks into a [`Location`], preserving the loiter bits
    pub fn to_location(&self) -> Location {
        let mut loc = Location::new(self.lat, self.lng, self.alt, self.alt_frame());
        loc.loiter_ccw = self.flags & FLAG_LOITER_CCW != 0;
        loc.loiter_xtrack = self.flags & FLAG_LOITER_XTRACK != 0;
        loc
    }

    /// Serializes to the 13-byte little-endian image
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0] = self.flags;
        bytes[1..5].copy_from_slice(&self.alt.to_le_bytes());
        bytes[5..9].copy_from_slice(&self.lat.to_le_bytes());
        bytes[9..13].copy_from_slice(&self.lng.to_le_bytes());
        bytes
    }

    /// Deserializes from the 13-byte little-endian image
    pub fn from_bytes(bytes: &[u8; Self::SIZE]) -> Self {
        Self {
            flags: bytes[0],
            alt: i32::from_le_bytes([bytes[1], bytes[2], bytes[3], bytes[4]]),
            lat: i32::from_le_bytes([bytes[5], bytes[6], bytes[7], bytes[8]]),
            lng: i32::from_le_bytes([bytes[9], bytes[10], bytes[11], bytes[12]]),
        }
    }
}

impl From<&Location> for LocationRecord {
    fn from(loc: &Location) -> Self {
        let mut flags = match loc.alt_frame() {
            AltFrame::Absolute => 0,
            AltFrame::AboveHome => FLAG_RELATIVE_ALT,
            AltFrame::AboveOrigin => FLAG_ORIGIN_ALT,
            AltFrame::AboveTerrain => FLAG_RELATIVE_ALT | FLAG_TERRAIN_ALT,
        };
        if loc.loiter_ccw {
            flags |= FLAG_LOITER_CCW;
        }
        if loc.loiter_xtrack {
            flags |= FLAG_LOITER_XTRACK;
        }
        Self {
            flags,
            alt: loc.alt,
            lat: loc.lat,
            lng: loc.lng,
        }
    }
}

impl From<Location> for LocationRecord {
    fn from(loc: Location) -> Self {
        Self::from(&loc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_encoding() {
        let abs = LocationRecord::from(Location::new(1, 2, 3, AltFrame::Absolute));
        assert_eq!(abs.flags, 0);

        let home = LocationRecord::from(Location::new(1, 2, 3, AltFrame::AboveHome));
        assert_eq!(home.flags, FLAG_RELATIVE_ALT);

        let origin = LocationRecord::from(Location::new(1, 2, 3, AltFrame::AboveOrigin));
        assert_eq!(origin.flags, FLAG_ORIGIN_ALT);

        let terrain = LocationRecord::from(Location::new(1, 2, 3, AltFrame::AboveTerrain));
        assert_eq!(terrain.flags, FLAG_RELATIVE_ALT | FLAG_TERRAIN_ALT);
    }

    #[test]
    fn test_frame_round_trip() {
        for frame in [
            AltFrame::Absolute,
            AltFrame::AboveHome,
            AltFrame::AboveOrigin,
            AltFrame::AboveTerrain,
        ] {
            let loc = Location::new(-338_570_000, 1_512_150_000, 2_000, frame);
            let back = LocationRecord::from(&loc).to_location();
            assert_eq!(back, loc);
        }
    }

    #[test]
    fn test_decode_priority_terrain_first() {
        // combinations the encoder never produces still decode in the
        // fixed priority order
        let rec = LocationRecord {
            flags: FLAG_TERRAIN_ALT | FLAG_ORIGIN_ALT | FLAG_RELATIVE_ALT,
            ..Default::default()
        };
        assert_eq!(rec.alt_frame(), AltFrame::AboveTerrain);

        let rec = LocationRecord {
            flags: FLAG_TERRAIN_ALT,
            ..Default::default()
        };
        assert_eq!(rec.alt_frame(), AltFrame::AboveTerrain);

        let rec = LocationRecord {
            flags: FLAG_ORIGIN_ALT | FLAG_RELATIVE_ALT,
            ..Default::default()
        };
        assert_eq!(rec.alt_frame(), AltFrame::AboveOrigin);

        let rec = LocationRecord {
            flags: FLAG_RELATIVE_ALT,
            ..Default::default()
        };
        assert_eq!(rec.alt_frame(), AltFrame::AboveHome);

        let rec = LocationRecord::default();
        assert_eq!(rec.alt_frame(), AltFrame::Absolute);
    }

    #[test]
    fn test_loiter_bits_round_trip() {
        let mut loc = Location::new(1, 2, 3, AltFrame::AboveHome);
        loc.loiter_ccw = true;
        loc.loiter_xtrack = true;

        let rec = LocationRecord::from(&loc);
        assert_ne!(rec.flags & FLAG_LOITER_CCW, 0);
        assert_ne!(rec.flags & FLAG_LOITER_XTRACK, 0);

        let back = rec.to_location();
        assert!(back.loiter_ccw);
        assert!(back.loiter_xtrack);
        assert_eq!(back, loc);
    }

    #[test]
    fn test_byte_image_layout() {
        let rec = LocationRecord {
            flags: FLAG_RELATIVE_ALT | FLAG_LOITER_CCW,
            alt: 0x0403_0201,
            lat: 0x0807_0605,
            lng: 0x0C0B_0A09,
        };
        let bytes = rec.to_bytes();
        assert_eq!(bytes[0], 0b0000_0011);
        assert_eq!(&bytes[1..5], &[0x01, 0x02, 0x03, 0x04]);
        assert_eq!(&bytes[5..9], &[0x05, 0x06, 0x07, 0x08]);
        assert_eq!(&bytes[9..13], &[0x09, 0x0A, 0x0B, 0x0C]);
    }

    #[test]
    fn test_byte_image_round_trip() {
        let rec = LocationRecord {
            flags: FLAG_TERRAIN_ALT | FLAG_LOITER_XTRACK,
            alt: -12_345,
            lat: -338_570_000,
            lng: 1_512_150_000,
        };
        assert_eq!(LocationRecord::from_bytes(&rec.to_bytes()), rec);
    }

    #[test]
    fn test_zero_record_is_all_zero_bytes() {
        assert_eq!(LocationRecord::default().to_bytes(), [0u8; LocationRecord::SIZE]);
        assert!(LocationRecord::default().to_location().is_zero());
    }
}
