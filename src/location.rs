//! Fixed-point geographic position with flat-earth navigation math
//!
//! [`Location`] stores latitude/longitude in 1e-7 degree units and an
//! altitude in centimeters measured in one of four reference frames.
//! Geometry operations (distance, offset, bearing, path projection) use
//! the tangent-plane approximation from [`geodesic`](crate::geodesic);
//! altitude questions defer to the frame conversions in
//! [`altitude`](crate::altitude), which in turn consult the
//! application's [`ReferenceFrames`].

use glam::{DVec2, DVec3, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::altitude::AltFrame;
use crate::error::{Error, Result};
use crate::geodesic::{
    check_lat, check_lng, diff_longitude, longitude_scale, offset_latlng, LATLON_TO_CM,
    LATLON_TO_M,
};
use crate::reference::ReferenceFrames;

/// Maximum altitude (meters) that fits in i32 centimeters
pub const LOCATION_ALT_MAX_M: i32 = 83_000;

/// A geographic position with a framed altitude
///
/// The all-zero value (`Location::default()`) is the canonical "unset"
/// position; [`is_zero`](Location::is_zero) compares every field against
/// it. Two loiter bits ride along for compatibility with external
/// mission records and are opaque to all navigation math.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Latitude in 1e-7 degrees, valid over `[-900_000_000, 900_000_000]`
    pub lat: i32,
    /// Longitude in 1e-7 degrees, circular over `[-1_800_000_000, 1_800_000_000)`
    pub lng: i32,
    /// Altitude in centimeters, measured in the current altitude frame
    pub alt: i32,
    pub(crate) frame: AltFrame,
    /// Loiter counter-clockwise when set
    pub loiter_ccw: bool,
    /// Loiter crosstrack mode
    pub loiter_xtrack: bool,
}

impl Location {
    /// Creates a location from lat/lng (1e-7 deg) and altitude (cm) in the given frame
    pub fn new(lat: i32, lng: i32, alt_cm: i32, frame: AltFrame) -> Self {
        let mut loc = Self {
            lat,
            lng,
            ..Self::default()
        };
        loc.set_alt_cm(alt_cm, frame);
        loc
    }

    /// Creates a location from a north/east/up offset (cm) relative to the
    /// registry's origin.
    ///
    /// The up component becomes the altitude in the given frame. If no
    /// origin is set, latitude and longitude remain zero.
    pub fn from_neu_offset_cm(offset_neu_cm: Vec3, frame: AltFrame, refs: &ReferenceFrames) -> Self {
        Self::from_neu_offset_cm_f64(offset_neu_cm.as_dvec3(), frame, refs)
    }

    /// Double-precision variant of [`from_neu_offset_cm`](Location::from_neu_offset_cm)
    pub fn from_neu_offset_cm_f64(
        offset_neu_cm: DVec3,
        frame: AltFrame,
        refs: &ReferenceFrames,
    ) -> Self {
        let mut loc = Self::default();
        loc.set_alt_cm(offset_neu_cm.z as i32, frame);
        if let Some(origin) = refs.origin() {
            loc.lat = origin.lat;
            loc.lng = origin.lng;
            loc.offset(offset_neu_cm.x * 0.01, offset_neu_cm.y * 0.01);
        }
        loc
    }

    /// Resets every field to the canonical zero value
    pub fn zero(&mut self) {
        *self = Self::default();
    }

    /// Returns true if every field equals the canonical zero value
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    /// Returns true if any of lat, lng, alt is nonzero
    pub fn initialised(&self) -> bool {
        self.lat != 0 || self.lng != 0 || self.alt != 0
    }

    /// Returns true if latitude and longitude are within their valid domains
    pub fn check_latlng(&self) -> bool {
        check_lat(self.lat) && check_lng(self.lng)
    }

    /// Returns true if the other location has exactly the same lat/lng
    pub fn same_latlon_as(&self, other: &Location) -> bool {
        self.lat == other.lat && self.lng == other.lng
    }

    /// Returns true if the other location matches in both position and altitude
    pub fn same_loc_as(&self, other: &Location, refs: &ReferenceFrames) -> bool {
        self.same_latlon_as(other) && self.same_alt_as(other, refs)
    }

    /// Repairs invalid fields from a caller-provided default.
    ///
    /// Zero lat/lng, a zero altitude in a home/terrain-relative frame, or
    /// an out-of-range lat/lng are each replaced from `default_loc`.
    /// Returns true if anything changed.
    pub fn sanitize(&mut self, default_loc: &Location, refs: &ReferenceFrames) -> bool {
        let mut changed = false;

        if self.lat == 0 && self.lng == 0 {
            self.lat = default_loc.lat;
            self.lng = default_loc.lng;
            changed = true;
        }

        if self.alt == 0 && matches!(self.frame, AltFrame::AboveHome | AltFrame::AboveTerrain) {
            if let Ok(alt_cm) = default_loc.alt_cm(self.alt_frame(), refs) {
                self.alt = alt_cm;
                changed = true;
            }
        }

        if !self.check_latlng() {
            self.lat = default_loc.lat;
            self.lng = default_loc.lng;
            changed = true;
        }

        changed
    }

    /// Returns the horizontal distance (meters) to another location
    pub fn distance(&self, other: &Location) -> f64 {
        let dlat = (i64::from(other.lat) - i64::from(self.lat)) as f64;
        let dlng = f64::from(diff_longitude(other.lng, self.lng)) * self.scale_to(other);
        dlat.hypot(dlng) * LATLON_TO_M
    }

    /// Returns the north/east distance (meters) to another location
    pub fn distance_ne(&self, other: &Location) -> Vec2 {
        self.distance_ne_f64(other).as_vec2()
    }

    /// Double-precision variant of [`distance_ne`](Location::distance_ne)
    pub fn distance_ne_f64(&self, other: &Location) -> DVec2 {
        DVec2::new(
            (i64::from(other.lat) - i64::from(self.lat)) as f64 * LATLON_TO_M,
            f64::from(diff_longitude(other.lng, self.lng)) * LATLON_TO_M * self.scale_to(other),
        )
    }

    /// Returns the north/east/down distance (meters) to another location.
    ///
    /// The down component is the raw altitude difference; the altitude
    /// frames of the two locations are not reconciled.
    pub fn distance_ned(&self, other: &Location) -> Vec3 {
        self.distance_ned_f64(other).as_vec3()
    }

    /// Double-precision variant of [`distance_ned`](Location::distance_ned)
    pub fn distance_ned_f64(&self, other: &Location) -> DVec3 {
        let ne = self.distance_ne_f64(other);
        DVec3::new(
            ne.x,
            ne.y,
            (i64::from(self.alt) - i64::from(other.alt)) as f64 * 0.01,
        )
    }

    /// Returns the north/east/down distance (meters), reconciling the
    /// altitude frames of both locations.
    ///
    /// If either altitude cannot be converted to the absolute frame the
    /// vertical component is 0, not an error.
    pub fn distance_ned_alt_frame(&self, other: &Location, refs: &ReferenceFrames) -> Vec3 {
        let (alt1, alt2) = match (
            self.alt_cm(AltFrame::Absolute, refs),
            other.alt_cm(AltFrame::Absolute, refs),
        ) {
            (Ok(a1), Ok(a2)) => (a1, a2),
            _ => (0, 0),
        };
        let ne = self.distance_ne_f64(other);
        Vec3::new(
            ne.x as f32,
            ne.y as f32,
            ((i64::from(alt1) - i64::from(alt2)) as f64 * 0.01) as f32,
        )
    }

    /// Moves this location by the given north/east offset in meters
    pub fn offset(&mut self, north_m: f64, east_m: f64) {
        offset_latlng(&mut self.lat, &mut self.lng, north_m, east_m);
    }

    /// Moves this location by a north/east/down offset in meters.
    ///
    /// The down component is subtracted from the altitude (z positive
    /// down, altitude positive up).
    pub fn offset_ned(&mut self, offset_ned_m: DVec3) {
        offset_latlng(&mut self.lat, &mut self.lng, offset_ned_m.x, offset_ned_m.y);
        self.alt += (-offset_ned_m.z * 100.0) as i32;
    }

    /// Moves this location `distance_m` meters along the given bearing (degrees)
    pub fn offset_bearing(&mut self, bearing_deg: f64, distance_m: f64) {
        let north_m = bearing_deg.to_radians().cos() * distance_m;
        let east_m = bearing_deg.to_radians().sin() * distance_m;
        self.offset(north_m, east_m);
    }

    /// Moves this location `distance_m` meters along a bearing and pitch
    /// (degrees), raising or lowering the altitude by the vertical share.
    pub fn offset_bearing_and_pitch(&mut self, bearing_deg: f64, pitch_deg: f64, distance_m: f64) {
        let cos_pitch = pitch_deg.to_radians().cos();
        let north_m = cos_pitch * bearing_deg.to_radians().cos() * distance_m;
        let east_m = cos_pitch * bearing_deg.to_radians().sin() * distance_m;
        self.offset(north_m, east_m);
        self.alt += (pitch_deg.to_radians().sin() * distance_m * 100.0) as i32;
    }

    /// Returns the bearing (radians) to another location.
    ///
    /// 0 is North and the angle increases clockwise, in `[0, 2*PI)`.
    pub fn bearing(&self, other: &Location) -> f64 {
        let off_x = f64::from(diff_longitude(other.lng, self.lng));
        let off_y = (i64::from(other.lat) - i64::from(self.lat)) as f64 / self.scale_to(other);
        let mut bearing = std::f64::consts::FRAC_PI_2 + (-off_y).atan2(off_x);
        if bearing < 0.0 {
            bearing += 2.0 * std::f64::consts::PI;
        }
        bearing
    }

    /// Returns the bearing to another location in centidegrees
    pub fn bearing_to_cd(&self, other: &Location) -> i32 {
        (self.bearing(other).to_degrees() * 100.0 + 0.5) as i32
    }

    /// Returns the scalar projection of this location onto the segment
    /// `p1` to `p2` in the tangent plane.
    ///
    /// 0 maps to `p1`, 1 to `p2`; the value is unclamped and may be
    /// negative or greater than one. Near-coincident endpoints return 1.
    pub fn line_path_proportion(&self, p1: &Location, p2: &Location) -> f32 {
        let v12 = p1.distance_ne(p2);
        let v1s = p1.distance_ne(self);
        let dsq = v12.length_squared();
        if dsq < 0.001 {
            return 1.0;
        }
        v12.dot(v1s) / dsq
    }

    /// Returns true if this location has passed the finish line through
    /// `p2` perpendicular to the segment `p1` to `p2`
    pub fn past_interval_finish_line(&self, p1: &Location, p2: &Location) -> bool {
        self.line_path_proportion(p1, p2) >= 1.0
    }

    /// Sets this location's altitude by interpolating between `p1` and
    /// `p2` according to its projection onto the segment, adopting `p2`'s
    /// altitude frame.
    pub fn linearly_interpolate_alt(&mut self, p1: &Location, p2: &Location) {
        let t = self.line_path_proportion(p1, p2).clamp(0.0, 1.0);
        let dalt = (i64::from(p2.alt) - i64::from(p1.alt)) as f32;
        self.set_alt_cm(p1.alt + (dalt * t) as i32, p2.alt_frame());
    }

    /// Returns the north/east vector (cm) from the registry's origin to
    /// this location, failing if no origin is set
    pub fn vector_ne_from_origin_cm(&self, refs: &ReferenceFrames) -> Result<Vec2> {
        let origin = refs.origin().ok_or(Error::OriginNotSet)?;
        Ok(Vec2::new(
            ((i64::from(self.lat) - i64::from(origin.lat)) as f64 * LATLON_TO_CM) as f32,
            (f64::from(diff_longitude(self.lng, origin.lng))
                * LATLON_TO_CM
                * self.scale_to(origin)) as f32,
        ))
    }

    /// Returns the north/east/up vector (cm) from the registry's origin
    /// to this location.
    ///
    /// Requires an origin and a successful conversion of this altitude to
    /// the above-origin frame.
    pub fn vector_neu_from_origin_cm(&self, refs: &ReferenceFrames) -> Result<Vec3> {
        let alt_above_origin_cm = self.alt_cm(AltFrame::AboveOrigin, refs)?;
        let ne = self.vector_ne_from_origin_cm(refs)?;
        Ok(Vec3::new(ne.x, ne.y, alt_above_origin_cm as f32))
    }

    /// Meters variant of [`vector_ne_from_origin_cm`](Location::vector_ne_from_origin_cm)
    pub fn vector_ne_from_origin_m(&self, refs: &ReferenceFrames) -> Result<Vec2> {
        Ok(self.vector_ne_from_origin_cm(refs)? * 0.01)
    }

    /// Meters variant of [`vector_neu_from_origin_cm`](Location::vector_neu_from_origin_cm)
    pub fn vector_neu_from_origin_m(&self, refs: &ReferenceFrames) -> Result<Vec3> {
        Ok(self.vector_neu_from_origin_cm(refs)? * 0.01)
    }

    /// Longitude compression factor at the mean latitude of self and other
    fn scale_to(&self, other: &Location) -> f64 {
        longitude_scale((i64::from(self.lat) + i64::from(other.lat)) / 2)
    }
}
