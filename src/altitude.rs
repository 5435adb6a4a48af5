//! Altitude reference frames and frame conversion
//!
//! An altitude in a [`Location`] is meaningful only together with the
//! frame it is measured in. Conversions between frames go through an
//! intermediate absolute value and consult the application's
//! [`ReferenceFrames`] for whatever references the two frames involve:
//! home, origin, or a terrain height query. A conversion that needs a
//! missing reference fails without touching the location.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::location::Location;
use crate::reference::ReferenceFrames;

/// Reference frame an altitude value is measured from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AltFrame {
    /// Height above mean sea level
    #[default]
    Absolute,
    /// Height above the home reference point
    AboveHome,
    /// Height above the origin reference point
    AboveOrigin,
    /// Height above the terrain under the location
    AboveTerrain,
}

impl Location {
    /// Sets the stored altitude (cm) and its frame
    pub fn set_alt_cm(&mut self, alt_cm: i32, frame: AltFrame) {
        self.alt = alt_cm;
        self.frame = frame;
    }

    /// Sets the stored altitude from meters, truncating to whole centimeters
    pub fn set_alt_m(&mut self, alt_m: f32, frame: AltFrame) {
        self.set_alt_cm((alt_m * 100.0) as i32, frame);
    }

    /// Returns the frame the stored altitude is measured in
    pub fn alt_frame(&self) -> AltFrame {
        self.frame
    }

    /// Returns the altitude (cm) converted into the desired frame.
    ///
    /// Converting into or out of [`AltFrame::AboveHome`],
    /// [`AltFrame::AboveOrigin`], or [`AltFrame::AboveTerrain`] requires
    /// the matching reference in `refs`; the terrain provider is queried
    /// at this location when a terrain frame is involved on either side.
    /// When the desired frame equals the current one the stored value is
    /// returned unchanged with no reference lookups.
    pub fn alt_cm(&self, desired_frame: AltFrame, refs: &ReferenceFrames) -> Result<i32> {
        let frame = self.alt_frame();
        if desired_frame == frame {
            return Ok(self.alt);
        }

        // terrain height (meters) only when a terrain frame is involved
        let terrain_m = if frame == AltFrame::AboveTerrain || desired_frame == AltFrame::AboveTerrain
        {
            refs.terrain_height_amsl(self)?
        } else {
            0.0
        };

        // stored frame to absolute; cm truncation must mirror the
        // desired-frame branch below exactly
        let alt_abs_cm = match frame {
            AltFrame::Absolute => self.alt,
            AltFrame::AboveHome => self.alt + refs.home().ok_or(Error::HomeNotSet)?.alt,
            AltFrame::AboveOrigin => self.alt + refs.origin().ok_or(Error::OriginNotSet)?.alt,
            AltFrame::AboveTerrain => self.alt + (terrain_m * 100.0) as i32,
        };

        // absolute to desired frame
        match desired_frame {
            AltFrame::Absolute => Ok(alt_abs_cm),
            AltFrame::AboveHome => Ok(alt_abs_cm - refs.home().ok_or(Error::HomeNotSet)?.alt),
            AltFrame::AboveOrigin => Ok(alt_abs_cm - refs.origin().ok_or(Error::OriginNotSet)?.alt),
            AltFrame::AboveTerrain => Ok(alt_abs_cm - (terrain_m * 100.0) as i32),
        }
    }

    /// Returns the altitude in meters converted into the desired frame
    pub fn alt_m(&self, desired_frame: AltFrame, refs: &ReferenceFrames) -> Result<f32> {
        Ok(self.alt_cm(desired_frame, refs)? as f32 * 0.01)
    }

    /// Converts the stored altitude into a new frame in place.
    ///
    /// On failure the location is left unmodified.
    pub fn change_alt_frame(&mut self, desired_frame: AltFrame, refs: &ReferenceFrames) -> Result<()> {
        let new_alt_cm = self.alt_cm(desired_frame, refs)?;
        self.set_alt_cm(new_alt_cm, desired_frame);
        Ok(())
    }

    /// Copies the altitude and its frame from another location
    pub fn copy_alt_from(&mut self, other: &Location) {
        self.alt = other.alt;
        self.frame = other.frame;
    }

    /// Raises the altitude by an offset in centimeters
    pub fn offset_up_cm(&mut self, alt_offset_cm: i32) {
        self.alt += alt_offset_cm;
    }

    /// Raises the altitude by an offset in meters
    pub fn offset_up_m(&mut self, alt_offset_m: f32) {
        self.alt += (alt_offset_m * 100.0) as i32;
    }

    /// Returns true if the stored altitude is exactly zero
    pub fn alt_is_zero(&self) -> bool {
        self.alt == 0
    }

    /// Returns true if the other location is at the same altitude.
    ///
    /// Matching frames compare the stored centimeters exactly; otherwise
    /// both altitudes are converted to absolute and compared with a
    /// sub-centimeter tolerance. If either conversion fails the altitudes
    /// are reported as not equal.
    pub fn same_alt_as(&self, other: &Location, refs: &ReferenceFrames) -> bool {
        if self.alt_frame() == other.alt_frame() {
            return self.alt == other.alt;
        }
        let (alt1, alt2) = match (
            self.alt_cm(AltFrame::Absolute, refs),
            other.alt_cm(AltFrame::Absolute, refs),
        ) {
            (Ok(a1), Ok(a2)) => (a1, a2),
            _ => return false,
        };
        let diff_m = (i64::from(alt1) - i64::from(alt2)) as f32 * 0.01;
        diff_m.abs() < f32::EPSILON
    }
}
