//! Aircraft-centered map projection.
//!
//! `MapParameters` maintains the transform from geographic position to the
//! heading-stabilized, range-scaled display plane: recentered on the current
//! aircraft position and rotated so the reference heading points to the top
//! of the display. External symbol-placement collaborators (flight plan,
//! traffic) project through the current state and watch the `version`
//! counter; they must not recompute placements unless `version` changed.
//!
//! # Recompute debouncing
//!
//! Callers invoke [`MapParameters::compute`] on every refresh tick. To avoid
//! churning `version` (and with it every downstream placement cache) on
//! floating-point jitter, the inputs are quantized to a fixed precision
//! (6 decimal places for position and heading, exact for range) and compared
//! against the last committed tuple; an unchanged tuple leaves the transform
//! and `version` untouched. This is a debounce invariant, not a correctness
//! requirement.

use serde::Serialize;

use crate::angle::normalize_360;

/// Mean Earth radius in nautical miles.
const EARTH_RADIUS_NM: f64 = 3440.065;

/// A geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    /// Latitude in degrees, positive north.
    pub lat: f64,
    /// Longitude in degrees, positive east.
    pub long: f64,
}

impl Position {
    /// Create a position.
    pub fn new(lat: f64, long: f64) -> Self {
        Self { lat, long }
    }
}

/// Great-circle distance between two positions, in nautical miles.
pub fn great_circle_distance_nm(from: Position, to: Position) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let dlat = (to.lat - from.lat).to_radians();
    let dlong = (to.long - from.long).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlong / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_NM * c
}

/// Initial great-circle bearing from one position to another, in degrees
/// `[0, 360)` where 0 = north, 90 = east.
pub fn initial_bearing_deg(from: Position, to: Position) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let dlong = (to.long - from.long).to_radians();

    let y = dlong.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlong.cos();

    normalize_360(y.atan2(x).to_degrees())
}

/// Read-only projection state for external consumers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectionSnapshot {
    /// Aircraft position at the last committed recompute.
    pub origin: Position,
    /// Displayed range radius in nautical miles.
    pub range_nm: f64,
    /// Reference heading rotated to the top of the display, in degrees.
    pub rotation_deg: f64,
    /// Display scale in pixels per nautical mile.
    pub px_per_nm: f64,
    /// Invalidation counter; placements are stale iff this changed.
    pub version: u64,
}

/// Quantized input tuple committed by the last actual recompute.
///
/// Position and heading quantize to 6 decimal places; the remaining inputs
/// compare bit-exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CommittedInputs {
    lat_e6: i64,
    long_e6: i64,
    heading_e6: i64,
    range_bits: u64,
    vertical_offset_bits: u64,
    reference_dim_bits: u64,
}

impl CommittedInputs {
    fn quantize(
        position: Position,
        vertical_offset_px: f64,
        range_nm: f64,
        reference_dim_px: f64,
        heading_deg: f64,
    ) -> Self {
        Self {
            lat_e6: fixed_e6(position.lat),
            long_e6: fixed_e6(position.long),
            heading_e6: fixed_e6(heading_deg),
            range_bits: range_nm.to_bits(),
            vertical_offset_bits: vertical_offset_px.to_bits(),
            reference_dim_bits: reference_dim_px.to_bits(),
        }
    }
}

/// Quantize a value to 6 decimal places as a fixed-point integer.
fn fixed_e6(value: f64) -> i64 {
    (value * 1_000_000.0).round() as i64
}

/// Aircraft-centered, heading-rotated, range-scaled display transform.
///
/// Owned exclusively by the compositor; everyone else reads
/// [`MapParameters::snapshot`] and [`MapParameters::version`].
#[derive(Debug, Clone)]
pub struct MapParameters {
    origin: Position,
    range_nm: f64,
    rotation_deg: f64,
    px_per_nm: f64,
    vertical_offset_px: f64,
    version: u64,
    committed: Option<CommittedInputs>,
}

impl Default for MapParameters {
    fn default() -> Self {
        Self::new()
    }
}

impl MapParameters {
    /// Create an uncomputed transform.
    ///
    /// [`MapParameters::project`] is meaningful only after the first
    /// [`MapParameters::compute`].
    pub fn new() -> Self {
        Self {
            origin: Position::new(0.0, 0.0),
            range_nm: 0.0,
            rotation_deg: 0.0,
            px_per_nm: 0.0,
            vertical_offset_px: 0.0,
            version: 0,
            committed: None,
        }
    }

    /// Recompute origin, scale and rotation from the current aircraft state.
    ///
    /// * `position` - aircraft position (the new display center)
    /// * `vertical_offset_px` - downward shift of the display center
    /// * `range_nm` - radius of the display at `reference_dim_px`
    /// * `reference_dim_px` - pixel radius the range maps onto
    /// * `heading_deg` - reference heading rotated to display top
    ///
    /// Increments `version` once per committed recompute. Inputs identical
    /// to the last committed tuple (position/heading at 6-decimal
    /// precision, range exact) are skipped without touching `version`.
    pub fn compute(
        &mut self,
        position: Position,
        vertical_offset_px: f64,
        range_nm: f64,
        reference_dim_px: f64,
        heading_deg: f64,
    ) {
        let inputs = CommittedInputs::quantize(
            position,
            vertical_offset_px,
            range_nm,
            reference_dim_px,
            heading_deg,
        );
        if self.committed == Some(inputs) {
            tracing::trace!(version = self.version, "projection inputs unchanged, skipping");
            return;
        }

        if range_nm > 0.0 {
            self.px_per_nm = reference_dim_px / range_nm;
        } else {
            tracing::warn!(range_nm, "non-positive range, projection scale zeroed");
            self.px_per_nm = 0.0;
        }

        self.origin = position;
        self.range_nm = range_nm;
        self.rotation_deg = normalize_360(heading_deg);
        self.vertical_offset_px = vertical_offset_px;
        self.version += 1;
        self.committed = Some(inputs);

        tracing::trace!(
            lat = position.lat,
            long = position.long,
            rotation = self.rotation_deg,
            version = self.version,
            "projection recomputed"
        );
    }

    /// Project a geographic position into display pixels relative to the
    /// display center.
    ///
    /// Pure function of the committed state: x grows rightward, y grows
    /// downward, so a target dead ahead on the reference heading projects
    /// to negative y.
    pub fn project(&self, lat: f64, long: f64) -> (f64, f64) {
        let target = Position::new(lat, long);
        let bearing = initial_bearing_deg(self.origin, target);
        let distance_px = great_circle_distance_nm(self.origin, target) * self.px_per_nm;
        let relative = (bearing - self.rotation_deg).to_radians();

        (
            distance_px * relative.sin(),
            self.vertical_offset_px - distance_px * relative.cos(),
        )
    }

    /// Current invalidation counter. Monotonically non-decreasing for the
    /// lifetime of the instance.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Has a first compute committed?
    pub fn is_computed(&self) -> bool {
        self.committed.is_some()
    }

    /// Read-only state for external symbol placement.
    pub fn snapshot(&self) -> ProjectionSnapshot {
        ProjectionSnapshot {
            origin: self.origin,
            range_nm: self.range_nm,
            rotation_deg: self.rotation_deg,
            px_per_nm: self.px_per_nm,
            version: self.version,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HAMBURG: Position = Position {
        lat: 53.630389,
        long: 9.988228,
    };

    fn computed_params() -> MapParameters {
        let mut params = MapParameters::new();
        // 80 nm range setting: 40 nm radius over a 250 px ring
        params.compute(HAMBURG, 0.0, 40.0, 250.0, 0.0);
        params
    }

    mod geodesy {
        use super::*;

        #[test]
        fn test_bearing_cardinal_directions() {
            let origin = Position::new(0.0, 0.0);
            assert!((initial_bearing_deg(origin, Position::new(1.0, 0.0)) - 0.0).abs() < 0.1);
            assert!((initial_bearing_deg(origin, Position::new(0.0, 1.0)) - 90.0).abs() < 0.1);
            assert!((initial_bearing_deg(origin, Position::new(-1.0, 0.0)) - 180.0).abs() < 0.1);
            assert!((initial_bearing_deg(origin, Position::new(0.0, -1.0)) - 270.0).abs() < 0.1);
        }

        #[test]
        fn test_distance_one_degree_latitude() {
            // One degree of latitude is 60 nm on the great circle
            let from = Position::new(53.0, 10.0);
            let to = Position::new(54.0, 10.0);
            let distance = great_circle_distance_nm(from, to);
            assert!(
                (distance - 60.0).abs() < 0.1,
                "expected ~60 nm, got {}",
                distance
            );
        }

        #[test]
        fn test_distance_zero() {
            assert!(great_circle_distance_nm(HAMBURG, HAMBURG) < 1e-9);
        }
    }

    mod versioning {
        use super::*;

        #[test]
        fn test_first_compute_commits_version_one() {
            let params = computed_params();
            assert_eq!(params.version(), 1);
            assert!(params.is_computed());
        }

        #[test]
        fn test_identical_inputs_do_not_bump_version() {
            let mut params = computed_params();
            params.compute(HAMBURG, 0.0, 40.0, 250.0, 0.0);
            params.compute(HAMBURG, 0.0, 40.0, 250.0, 0.0);
            assert_eq!(params.version(), 1);
        }

        #[test]
        fn test_sub_precision_jitter_is_debounced() {
            let mut params = computed_params();
            // 1e-8 degrees is far below the 6-decimal commit precision
            let jittered = Position::new(HAMBURG.lat + 1e-8, HAMBURG.long - 1e-8);
            params.compute(jittered, 0.0, 40.0, 250.0, 1e-8);
            assert_eq!(params.version(), 1);
        }

        #[test]
        fn test_change_beyond_precision_bumps_once() {
            let mut params = computed_params();
            let moved = Position::new(HAMBURG.lat + 0.00001, HAMBURG.long);
            params.compute(moved, 0.0, 40.0, 250.0, 0.0);
            assert_eq!(params.version(), 2);

            // Unchanged again: stays at 2
            params.compute(moved, 0.0, 40.0, 250.0, 0.0);
            assert_eq!(params.version(), 2);
        }

        #[test]
        fn test_range_change_is_compared_exactly() {
            let mut params = computed_params();
            params.compute(HAMBURG, 0.0, 20.0, 250.0, 0.0);
            assert_eq!(params.version(), 2);
        }

        #[test]
        fn test_heading_change_bumps() {
            let mut params = computed_params();
            params.compute(HAMBURG, 0.0, 40.0, 250.0, 185.0);
            assert_eq!(params.version(), 2);
        }
    }

    mod projecting {
        use super::*;

        #[test]
        fn test_origin_projects_to_center() {
            let params = computed_params();
            let (x, y) = params.project(HAMBURG.lat, HAMBURG.long);
            assert!(x.abs() < 1e-6);
            assert!(y.abs() < 1e-6);
        }

        #[test]
        fn test_north_up_target_ahead_is_above_center() {
            let params = computed_params();
            // ~12 nm north of the origin with heading 0 at display top
            let (x, y) = params.project(HAMBURG.lat + 0.2, HAMBURG.long);
            assert!(x.abs() < 1.0, "northbound target stays on centerline, x={}", x);
            assert!(y < 0.0, "ahead of aircraft renders above center, y={}", y);

            // 12 nm at 250px/40nm = 75 px
            assert!((y + 75.0).abs() < 1.5, "expected y ~ -75, got {}", y);
        }

        #[test]
        fn test_rotation_moves_target_around_the_dial() {
            let mut params = MapParameters::new();
            params.compute(HAMBURG, 0.0, 40.0, 250.0, 90.0);

            // Target due east; with heading 090 at display top it is dead ahead
            let (x, y) = params.project(HAMBURG.lat, HAMBURG.long + 0.3);
            assert!(x.abs() < 1.0, "x={}", x);
            assert!(y < 0.0, "y={}", y);
        }

        #[test]
        fn test_vertical_offset_shifts_center() {
            let mut params = MapParameters::new();
            params.compute(HAMBURG, 100.0, 40.0, 250.0, 0.0);
            let (_, y) = params.project(HAMBURG.lat, HAMBURG.long);
            assert!((y - 100.0).abs() < 1e-6);
        }
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_version_monotonic(
                lats in proptest::collection::vec(-80.0..80.0_f64, 1..20),
                heading in 0.0..360.0_f64
            ) {
                let mut params = MapParameters::new();
                let mut last_version = params.version();

                for lat in lats {
                    params.compute(Position::new(lat, 10.0), 0.0, 40.0, 250.0, heading);
                    prop_assert!(params.version() >= last_version);
                    last_version = params.version();
                }
            }

            #[test]
            fn test_repeat_compute_never_bumps(
                lat in -80.0..80.0_f64,
                long in -179.0..179.0_f64,
                heading in 0.0..360.0_f64,
                range in 5.0..160.0_f64
            ) {
                let mut params = MapParameters::new();
                let position = Position::new(lat, long);
                params.compute(position, 0.0, range, 250.0, heading);
                let committed = params.version();
                params.compute(position, 0.0, range, 250.0, heading);
                prop_assert_eq!(params.version(), committed);
            }

            #[test]
            fn test_projection_distance_scales(
                lat in -60.0..60.0_f64,
                long in -170.0..170.0_f64,
                bearing_target_lat in -0.3..0.3_f64,
                bearing_target_long in -0.3..0.3_f64
            ) {
                prop_assume!(bearing_target_lat.abs() > 1e-4 || bearing_target_long.abs() > 1e-4);

                let origin = Position::new(lat, long);
                let mut params = MapParameters::new();
                params.compute(origin, 0.0, 40.0, 250.0, 0.0);

                let target = Position::new(lat + bearing_target_lat, long + bearing_target_long);
                let (x, y) = params.project(target.lat, target.long);

                let expected_px =
                    great_circle_distance_nm(origin, target) * 250.0 / 40.0;
                let actual_px = (x * x + y * y).sqrt();
                prop_assert!(
                    (actual_px - expected_px).abs() < expected_px * 1e-6 + 1e-6,
                    "projected radius {} differs from great-circle radius {}",
                    actual_px, expected_px
                );
            }
        }
    }
}
