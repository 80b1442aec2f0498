//! Course and glideslope deviation scaling.
//!
//! Maps raw deviation readings onto the fixed pixel geometry of the
//! deviation scale. Two lateral regimes exist:
//!
//! - **Angular (VOR)**: the input is a signed angular error in degrees.
//!   Within ±90° the aircraft flies toward the station and the error is
//!   displayed as-is; beyond ±90° it flies from the station, the displayed
//!   degrees are recomputed as `sign(err) * -(180 - |err|)` and the pointer
//!   glyph flips 180°. Without the flip the needle reads backwards once the
//!   aircraft passes abeam the station.
//! - **Linear (ILS)**: the input is already normalized against full-scale
//!   deflection; it clamps to ±2 dots with no to/from logic (a localizer
//!   course is directional).
//!
//! The glideslope shares the linear regime on the vertical axis with its own
//! scale span.
//!
//! Deviation must not be rendered at all when the owning radio signal is
//! unavailable; a numerically present reading can be stale or zeroed.

use serde::Serialize;

/// Spacing between adjacent deviation scale dots, in pixels.
pub const DOT_SPACING_PX: f64 = 74.0;

/// One VOR deviation dot represents 5° of angular error.
pub const VOR_DEG_PER_DOT: f64 = 5.0;

/// Displayed VOR deviation clamps to ±12°.
pub const VOR_MAX_DEG: f64 = 12.0;

/// Raw ILS deviation at full-scale deflection (the two-dot edge).
pub const ILS_FULL_SCALE: f64 = 0.8;

/// Displayed ILS deviation clamps to ±2 dots, the full-scale edge.
pub const ILS_MAX_DOTS: f64 = 2.0;

/// Raw glideslope deviation at the edge of the vertical scale.
pub const GS_FULL_SCALE: f64 = 0.8;

/// Vertical pixel offset at the glideslope scale edge.
pub const GS_SCALE_LIMIT_PX: f64 = 128.0;

/// A raw deviation reading from a radio receiver.
///
/// Recomputed every refresh tick; never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviationReading {
    /// Raw angular degrees (VOR) or normalized full-scale units (ILS/GS).
    pub raw: f64,
    /// Whether the owning receiver currently provides this reading.
    pub available: bool,
}

impl DeviationReading {
    /// An available reading.
    pub fn available(raw: f64) -> Self {
        Self {
            raw,
            available: true,
        }
    }

    /// An unavailable reading (value, if any, must not be rendered).
    pub fn unavailable() -> Self {
        Self {
            raw: 0.0,
            available: false,
        }
    }
}

/// Scaled VOR course deviation with its to/from sense.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VorDeviation {
    /// Displayed angular deviation after the to/from recompute, in degrees.
    pub displayed_deg: f64,
    /// True when flying toward the station; false flips the pointer glyph
    /// 180°.
    pub toward: bool,
    /// Lateral pixel offset of the deviation bar.
    pub px: f64,
}

impl VorDeviation {
    /// Scale a raw angular course error (degrees, effectively ±180).
    pub fn from_error(error_deg: f64) -> Self {
        let (displayed_deg, toward) = if error_deg.abs() <= 90.0 {
            (error_deg, true)
        } else {
            (error_deg.signum() * -(180.0 - error_deg.abs()), false)
        };

        let clamped = displayed_deg.clamp(-VOR_MAX_DEG, VOR_MAX_DEG);
        Self {
            displayed_deg,
            toward,
            px: clamped * DOT_SPACING_PX / VOR_DEG_PER_DOT,
        }
    }
}

/// Scaled ILS (localizer) deviation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IlsDeviation {
    /// Deviation in dots after clamping.
    pub dots: f64,
    /// Lateral pixel offset of the deviation bar.
    pub px: f64,
}

impl IlsDeviation {
    /// Scale a raw normalized localizer deviation.
    ///
    /// A raw reading of [`ILS_FULL_SCALE`] is full-scale deflection, which
    /// sits at the two-dot clamp boundary.
    pub fn from_raw(raw: f64) -> Self {
        let dots = (raw / ILS_FULL_SCALE * ILS_MAX_DOTS).clamp(-ILS_MAX_DOTS, ILS_MAX_DOTS);
        Self {
            dots,
            px: dots * DOT_SPACING_PX,
        }
    }
}

/// Scaled glideslope deviation for the vertical scale.
///
/// The index arrow splits in two at the scale limits: the upper half stays
/// visible until the deviation runs off the bottom of the scale and vice
/// versa, so an extreme deviation still shows a half-arrow pegged at the
/// edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GlideslopeDeviation {
    /// Unclamped vertical pixel offset (positive = fly down).
    pub px: f64,
    /// Pixel offset of the upper half-arrow, pegged at the top limit.
    pub upper_px: f64,
    /// Pixel offset of the lower half-arrow, pegged at the bottom limit.
    pub lower_px: f64,
    /// Upper half-arrow visible (deviation not past the bottom edge).
    pub show_upper: bool,
    /// Lower half-arrow visible (deviation not past the top edge).
    pub show_lower: bool,
}

impl GlideslopeDeviation {
    /// Scale a raw normalized glideslope deviation.
    pub fn from_raw(raw: f64) -> Self {
        let px = raw / GS_FULL_SCALE * GS_SCALE_LIMIT_PX;
        Self {
            px,
            upper_px: px.max(-GS_SCALE_LIMIT_PX),
            lower_px: px.min(GS_SCALE_LIMIT_PX),
            show_upper: px < GS_SCALE_LIMIT_PX,
            show_lower: px > -GS_SCALE_LIMIT_PX,
        }
    }
}

/// A VOR frequency reads valid when the receiver reports any tuned
/// frequency.
pub fn vor_frequency_valid(frequency_mhz: f64) -> bool {
    frequency_mhz > 0.0
}

/// An ILS frequency reads valid only inside the localizer band.
pub fn ils_frequency_valid(frequency_mhz: f64) -> bool {
    (108.0..=112.0).contains(&frequency_mhz)
}
