//! The rose compositor state machine.
//!
//! One `RoseCompositor` instance drives one display. Each refresh tick it
//! takes the full input snapshot and produces either a live frame or the
//! degraded overlay. The compositor is stateless across ticks except for:
//!
//! - the owned [`MapParameters`] transform (versioned, debounced),
//! - the memoized to/from sense and tuning classification, kept only so a
//!   momentary signal dropout does not flicker the pointer glyph or the
//!   tuning annotation.
//!
//! Both memos are recomputed idempotently from current inputs whenever
//! those inputs are usable; they never override live data.

use crate::angle::{diff_angle, round_decimals};
use crate::deviation::{
    ils_frequency_valid, vor_frequency_valid, GlideslopeDeviation, IlsDeviation, VorDeviation,
};
use crate::projection::MapParameters;
use crate::tuning::{resolve_tuning, NavChannel, TuningMode};

use super::frame::{
    DegradedFrame, IlsOverlayState, LiveFrame, NavInfoKind, NavInfoState, RangeLegend, RoseFrame,
    VorOverlayState, TCAS_TICK_RADIUS_RANGE_10_PX, TCAS_TICK_RADIUS_RANGE_20_PX,
};
use super::inputs::{DisplayMode, RoseInputs};

/// Pixel radius of the heading ring that the range radius maps onto.
pub const MAP_REFERENCE_DIM_PX: f64 = 250.0;

/// Compositor for one rose-mode navigation display.
#[derive(Debug)]
pub struct RoseCompositor {
    map_params: MapParameters,
    toward_memo: bool,
    tuning_memo: Option<TuningMode>,
    aligned_memo: Option<bool>,
    mode_memo: Option<DisplayMode>,
}

impl Default for RoseCompositor {
    fn default() -> Self {
        Self::new()
    }
}

impl RoseCompositor {
    /// Create a compositor with no committed projection.
    pub fn new() -> Self {
        Self {
            map_params: MapParameters::new(),
            toward_memo: true,
            tuning_memo: None,
            aligned_memo: None,
            mode_memo: None,
        }
    }

    /// Read-only access to the owned projection.
    ///
    /// External flight-plan/traffic renderers project through this and
    /// watch [`MapParameters::version`] for invalidation. Only the
    /// compositor ever mutates it.
    pub fn projection(&self) -> &MapParameters {
        &self.map_params
    }

    /// Run one refresh tick over an input snapshot.
    pub fn tick(&mut self, inputs: &RoseInputs) -> RoseFrame {
        self.log_transitions(inputs);

        let (heading_raw, heading_valid) = inputs.heading_signal().read();
        if !inputs.adirs_aligned || !heading_valid {
            if inputs.adirs_aligned {
                tracing::trace!(status = %inputs.heading_signal().status, "heading unusable");
            }
            return RoseFrame::Degraded(DegradedFrame::new(inputs.mode, inputs.range_nm));
        }

        // Every needle this pass keys off one committed heading value
        let heading = round_decimals(heading_raw, 2);

        // Map rotation always uses true heading, independent of the
        // mag/true reference selection for the displayed values
        let (true_heading, true_heading_valid) = inputs.true_heading.read();
        if true_heading_valid {
            self.map_params.compute(
                inputs.position,
                0.0,
                f64::from(inputs.range_nm) / 2.0,
                MAP_REFERENCE_DIM_PX,
                true_heading,
            );
        }

        let track = {
            let (value, valid) = inputs.track_signal().read();
            valid.then(|| round_decimals(value, 2))
        };

        let is_nav = inputs.mode == DisplayMode::RoseNav;
        let track_line_active = is_nav
            && !inputs.map_hidden
            && track.is_some()
            && !inputs.lateral.suppresses_track_line();

        let ls_course_bug_rotation_deg = (is_nav
            && inputs.ls_button_active
            && inputs.ls_course_deg >= 0.0)
            .then(|| diff_angle(heading, inputs.ls_course_deg));

        let selected_heading_bug_rotation_deg = (inputs.selected_heading_deg >= 0.0)
            .then(|| diff_angle(heading, inputs.selected_heading_deg));

        let frame = LiveFrame {
            mode: inputs.mode,
            range_nm: inputs.range_nm,
            range_legend: RangeLegend::for_range(inputs.range_nm),
            heading_deg: heading,
            track_deg: track,
            ground_speed_mps: inputs.ground_speed_mps,
            ring_rotation_deg: diff_angle(heading, 0.0),
            track_bug_rotation_deg: track.map(|t| diff_angle(heading, t)),
            selected_heading_bug_rotation_deg,
            ls_course_bug_rotation_deg,
            track_line_active,
            flight_plan_active: is_nav && !inputs.map_hidden,
            cross_track_active: is_nav,
            middle_ring_active: inputs.tcas_mode == 0 || inputs.range_nm > 10,
            tcas_ticks_radius_px: tcas_ticks_radius(inputs.tcas_mode, inputs.range_nm),
            vor: self.vor_overlay(inputs, heading),
            ils: ils_overlay(inputs, heading),
            glideslope_scale_active: inputs.mode == DisplayMode::RoseIls,
            glideslope: glideslope_state(inputs),
            nav_info: self.nav_info(inputs),
            traffic_active: true,
            projection: self.map_params.snapshot(),
        };

        RoseFrame::Live(Box::new(frame))
    }

    /// VOR overlay for RoseVor, updating the memoized to/from sense.
    fn vor_overlay(&mut self, inputs: &RoseInputs, heading: f64) -> Option<VorOverlayState> {
        if inputs.mode != DisplayMode::RoseVor {
            return None;
        }

        // An untuned receiver can still carry a stale deviation number;
        // the bar only renders when the owning frequency reads valid
        let course_valid = vor_frequency_valid(inputs.vor.frequency_mhz);
        let deviation = (course_valid && inputs.vor.deviation.available)
            .then(|| VorDeviation::from_error(inputs.vor.deviation.raw));

        if let Some(dev) = deviation {
            if dev.toward != self.toward_memo {
                tracing::debug!(toward = dev.toward, "VOR to/from sense changed");
                self.toward_memo = dev.toward;
            }
        }

        Some(VorOverlayState {
            rotation_deg: diff_angle(heading, inputs.vor.course_deg),
            course_valid,
            toward: self.toward_memo,
            deviation,
        })
    }

    /// Receiver info block for RoseVor/RoseIls, updating the tuning memo.
    fn nav_info(&mut self, inputs: &RoseInputs) -> Option<NavInfoState> {
        let (kind, receiver, channel, frequency_valid) = match inputs.mode {
            DisplayMode::RoseVor => (
                NavInfoKind::Vor,
                &inputs.vor,
                NavChannel::Vor(inputs.side.vor_receiver()),
                vor_frequency_valid(inputs.vor.frequency_mhz),
            ),
            DisplayMode::RoseIls => (
                NavInfoKind::Ils,
                &inputs.ils,
                NavChannel::Ils(inputs.side.ils_receiver()),
                ils_frequency_valid(inputs.ils.frequency_mhz),
            ),
            DisplayMode::RoseNav => return None,
        };

        let tuning = resolve_tuning(&inputs.fm1, &inputs.fm2, channel);
        if self.tuning_memo != Some(tuning) {
            tracing::debug!(annotation = tuning.annotation(), "tuning mode changed");
            self.tuning_memo = Some(tuning);
        }

        // The receiver reports no separate course validity; the course is
        // as valid as the frequency that owns it
        Some(NavInfoState {
            kind,
            receiver_index: match channel {
                NavChannel::Vor(index) | NavChannel::Ils(index) => index,
            },
            frequency_mhz: receiver.frequency_mhz,
            frequency_valid,
            course_deg: receiver.course_deg,
            course_valid: frequency_valid,
            ident: receiver.ident.clone(),
            ident_valid: frequency_valid && !receiver.ident.is_empty(),
            tuning,
        })
    }

    fn log_transitions(&mut self, inputs: &RoseInputs) {
        if self.aligned_memo != Some(inputs.adirs_aligned) {
            if inputs.adirs_aligned {
                tracing::info!("inertial reference aligned, resuming live display");
            } else {
                tracing::warn!("inertial reference not aligned, degraded display");
            }
            self.aligned_memo = Some(inputs.adirs_aligned);
        }
        if self.mode_memo != Some(inputs.mode) {
            tracing::debug!(mode = ?inputs.mode, "display mode changed");
            self.mode_memo = Some(inputs.mode);
        }
    }
}

/// ILS overlay for RoseIls. No to/from logic: a localizer is directional.
fn ils_overlay(inputs: &RoseInputs, heading: f64) -> Option<IlsOverlayState> {
    if inputs.mode != DisplayMode::RoseIls {
        return None;
    }

    let course_valid = ils_frequency_valid(inputs.ils.frequency_mhz);
    let deviation = (course_valid && inputs.ils.deviation.available)
        .then(|| IlsDeviation::from_raw(inputs.ils.deviation.raw));

    Some(IlsOverlayState {
        rotation_deg: diff_angle(heading, inputs.ils.course_deg),
        course_valid,
        deviation,
    })
}

/// The glideslope belongs to the ILS receiver; an out-of-band frequency
/// suppresses the index arrows along with the localizer bar.
fn glideslope_state(inputs: &RoseInputs) -> Option<GlideslopeDeviation> {
    if inputs.mode != DisplayMode::RoseIls
        || !inputs.glideslope.available
        || !ils_frequency_valid(inputs.ils.frequency_mhz)
    {
        return None;
    }
    Some(GlideslopeDeviation::from_raw(inputs.glideslope.raw))
}

/// TCAS proximity tick radius, when ticks are shown for this mode/range.
fn tcas_ticks_radius(tcas_mode: u8, range_nm: u32) -> Option<f64> {
    if tcas_mode == 0 {
        return None;
    }
    match range_nm {
        10 => Some(TCAS_TICK_RADIUS_RANGE_10_PX),
        20 => Some(TCAS_TICK_RADIUS_RANGE_20_PX),
        _ => None,
    }
}
