//! Output frame model.
//!
//! A frame is the complete numeric/state result of one render pass:
//! rotations in degrees, indicator offsets in pixels, and activation flags
//! for every sub-element. The external drawing layer consumes frames as
//! plain data and owns all geometry, color and typography beyond that.

use serde::Serialize;

use crate::deviation::{GlideslopeDeviation, IlsDeviation, VorDeviation};
use crate::projection::ProjectionSnapshot;
use crate::tuning::TuningMode;

use super::inputs::DisplayMode;

/// Radius of the TCAS proximity ticks at the 10 nm range setting, in
/// pixels.
pub const TCAS_TICK_RADIUS_RANGE_10_PX: f64 = 125.0;

/// Radius of the TCAS proximity ticks at the 20 nm range setting, in
/// pixels.
pub const TCAS_TICK_RADIUS_RANGE_20_PX: f64 = 62.0;

/// Result of one compositor tick.
#[derive(Debug, Clone, Serialize)]
pub enum RoseFrame {
    /// Inertial data unusable: failure ring and legend only, no live
    /// needles.
    Degraded(DegradedFrame),
    /// Full live render pass.
    Live(Box<LiveFrame>),
}

impl RoseFrame {
    /// Is this a live frame?
    pub fn is_live(&self) -> bool {
        matches!(self, RoseFrame::Live(_))
    }
}

/// Range legends painted beside the range rings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RangeLegend {
    /// Legend at the outer ring (half the range setting).
    pub outer_nm: f64,
    /// Legend at the middle ring (a quarter of the range setting).
    pub middle_nm: f64,
}

impl RangeLegend {
    /// Legends for a range setting.
    pub fn for_range(range_nm: u32) -> Self {
        Self {
            outer_nm: f64::from(range_nm) / 2.0,
            middle_nm: f64::from(range_nm) / 4.0,
        }
    }
}

/// Degraded overlay rendered while inertial data is unusable.
#[derive(Debug, Clone, Serialize)]
pub struct DegradedFrame {
    /// Display mode selected while degraded.
    pub mode: DisplayMode,
    /// Selected range setting.
    pub range_nm: u32,
    /// Range ring legends (still shown).
    pub range_legend: RangeLegend,
    /// Heading failure flag text.
    pub heading_flag: &'static str,
    /// Map failure legend text.
    pub map_flag: &'static str,
    /// Position source flag text.
    pub position_flag: &'static str,
}

impl DegradedFrame {
    /// Build the degraded overlay for the given mode and range.
    pub fn new(mode: DisplayMode, range_nm: u32) -> Self {
        Self {
            mode,
            range_nm,
            range_legend: RangeLegend::for_range(range_nm),
            heading_flag: "HDG",
            map_flag: "MAP NOT AVAIL",
            position_flag: "PPOS",
        }
    }
}

/// VOR course/deviation overlay state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VorOverlayState {
    /// Course pointer rotation relative to the lubber line, in degrees.
    pub rotation_deg: f64,
    /// Course pointer drawn (owning frequency valid).
    pub course_valid: bool,
    /// Pointer glyph sense. Held at its last known value while the
    /// deviation is unavailable so the glyph does not flicker through a
    /// momentary dropout.
    pub toward: bool,
    /// Scaled deviation; `None` suppresses the bar entirely.
    pub deviation: Option<VorDeviation>,
}

/// ILS course/deviation overlay state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IlsOverlayState {
    /// Course pointer rotation relative to the lubber line, in degrees.
    pub rotation_deg: f64,
    /// Course pointer drawn (owning frequency valid).
    pub course_valid: bool,
    /// Scaled deviation; `None` suppresses the bar entirely.
    pub deviation: Option<IlsDeviation>,
}

/// Which receiver an info block describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NavInfoKind {
    /// VOR receiver block.
    Vor,
    /// ILS receiver block.
    Ils,
}

/// Frequency/course/ident info block for the tuned receiver.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavInfoState {
    /// Receiver kind.
    pub kind: NavInfoKind,
    /// Receiver index (1-based).
    pub receiver_index: u8,
    /// Tuned frequency in MHz.
    pub frequency_mhz: f64,
    /// Frequency rendered as digits; dashes otherwise.
    pub frequency_valid: bool,
    /// Selected course in degrees.
    pub course_deg: f64,
    /// Course rendered as digits; dashes otherwise.
    pub course_valid: bool,
    /// Decoded station ident.
    pub ident: String,
    /// Ident rendered at all.
    pub ident_valid: bool,
    /// Resolved tuning mode; its annotation is rendered underlined.
    pub tuning: TuningMode,
}

/// Full live render pass.
#[derive(Debug, Clone, Serialize)]
pub struct LiveFrame {
    /// Display mode of this pass.
    pub mode: DisplayMode,
    /// Selected range setting.
    pub range_nm: u32,
    /// Range ring legends.
    pub range_legend: RangeLegend,
    /// Committed heading this pass keys off, in degrees.
    pub heading_deg: f64,
    /// Committed track, when the track signal is valid.
    pub track_deg: Option<f64>,
    /// Ground speed in meters per second, passed through to the track-line
    /// renderer.
    pub ground_speed_mps: f64,
    /// Compass card rotation, in degrees.
    pub ring_rotation_deg: f64,
    /// Track diamond rotation; `None` suppresses the diamond.
    pub track_bug_rotation_deg: Option<f64>,
    /// Selected-heading bug rotation; `None` when no selection.
    pub selected_heading_bug_rotation_deg: Option<f64>,
    /// Localizer-course bug rotation; `None` when suppressed.
    pub ls_course_bug_rotation_deg: Option<f64>,
    /// Track line drawn on the map.
    pub track_line_active: bool,
    /// Flight-plan symbols drawn on the map.
    pub flight_plan_active: bool,
    /// Cross-track error indicator active.
    pub cross_track_active: bool,
    /// Dashed middle range ring drawn.
    pub middle_ring_active: bool,
    /// TCAS proximity ticks replace/augment the middle ring at this
    /// radius.
    pub tcas_ticks_radius_px: Option<f64>,
    /// VOR overlay (RoseVor only).
    pub vor: Option<VorOverlayState>,
    /// ILS overlay (RoseIls only).
    pub ils: Option<IlsOverlayState>,
    /// Glideslope scale drawn (RoseIls only).
    pub glideslope_scale_active: bool,
    /// Scaled glideslope deviation; `None` suppresses the index arrows.
    pub glideslope: Option<GlideslopeDeviation>,
    /// Receiver info block (RoseVor/RoseIls).
    pub nav_info: Option<NavInfoState>,
    /// Traffic layer active.
    pub traffic_active: bool,
    /// Projection state for external symbol placement.
    pub projection: ProjectionSnapshot,
}
