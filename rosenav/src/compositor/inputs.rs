//! Per-tick input snapshot for the compositor.
//!
//! All signals a render pass consumes are read once, up front, into a
//! `RoseInputs` value. Later stages only ever see this snapshot, so a
//! deviation value can never tear apart from its validity flag mid-tick.

use serde::Serialize;

use crate::config::DisplaySide;
use crate::deviation::DeviationReading;
use crate::projection::Position;
use crate::signal::LabeledSignal;
use crate::tuning::NavComputer;

/// Rose display mode selected on the EFIS control panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DisplayMode {
    /// ILS course/deviation overlay with glideslope scale.
    RoseIls,
    /// VOR course/deviation overlay with to/from logic.
    RoseVor,
    /// Flight-plan map with track line and cross-track indicator.
    RoseNav,
}

/// Active lateral guidance mode of the autoflight system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LateralMode {
    /// No lateral guidance engaged.
    None,
    /// Flying the selected heading.
    HeadingSelect,
    /// Flying the selected track.
    TrackSelect,
    /// Managed navigation along the flight plan.
    NavManaged,
    /// Capturing the localizer.
    LocalizerCapture,
    /// Tracking the localizer.
    LocalizerTrack,
}

/// Lateral guidance state relevant to track-line suppression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LateralGuidance {
    /// Currently active lateral mode.
    pub active: LateralMode,
    /// Managed navigation is armed.
    pub nav_armed: bool,
}

impl LateralGuidance {
    /// No guidance engaged or armed.
    pub fn none() -> Self {
        Self {
            active: LateralMode::None,
            nav_armed: false,
        }
    }

    /// Should the track line be suppressed?
    ///
    /// Once guidance beyond plain heading/track selection is armed or
    /// active, the flight-plan cues carry the same information and the
    /// track line is redundant.
    pub fn suppresses_track_line(&self) -> bool {
        let manual_lateral = matches!(
            self.active,
            LateralMode::None | LateralMode::HeadingSelect | LateralMode::TrackSelect
        );
        !manual_lateral || self.nav_armed
    }
}

/// Raw state of one navigation radio receiver.
///
/// Which physical receiver feeds a display side is fixed by the side's
/// cross-wiring ([`DisplaySide::vor_receiver`], [`DisplaySide::ils_receiver`]);
/// the snapshot carries only the receiver's readings.
#[derive(Debug, Clone, PartialEq)]
pub struct RadioReceiver {
    /// Tuned frequency in MHz; zero when nothing is tuned.
    pub frequency_mhz: f64,
    /// Selected course in degrees.
    pub course_deg: f64,
    /// Decoded station ident, empty when unavailable.
    pub ident: String,
    /// Lateral deviation reading.
    pub deviation: DeviationReading,
}

impl RadioReceiver {
    /// A receiver with nothing tuned.
    pub fn untuned() -> Self {
        Self {
            frequency_mhz: 0.0,
            course_deg: 0.0,
            ident: String::new(),
            deviation: DeviationReading::unavailable(),
        }
    }
}

/// Immutable snapshot of every external input, read once per refresh tick.
#[derive(Debug, Clone, PartialEq)]
pub struct RoseInputs {
    /// Selected display mode.
    pub mode: DisplayMode,
    /// Which display this compositor drives.
    pub side: DisplaySide,
    /// Inertial reference alignment state.
    pub adirs_aligned: bool,
    /// True-reference selection: use true instead of magnetic heading/track.
    pub true_ref: bool,
    /// Magnetic heading from the inertial reference.
    pub mag_heading: LabeledSignal,
    /// True heading from the inertial reference.
    pub true_heading: LabeledSignal,
    /// Magnetic track from the inertial reference.
    pub mag_track: LabeledSignal,
    /// True track from the inertial reference.
    pub true_track: LabeledSignal,
    /// Pilot-selected heading in degrees; negative when no selection.
    pub selected_heading_deg: f64,
    /// Localizer course from the flight management system; negative when
    /// none.
    pub ls_course_deg: f64,
    /// LS pushbutton state for this display side.
    pub ls_button_active: bool,
    /// Lateral guidance state.
    pub lateral: LateralGuidance,
    /// Ground speed in meters per second.
    pub ground_speed_mps: f64,
    /// Present aircraft position.
    pub position: Position,
    /// Selected range setting in nautical miles.
    pub range_nm: u32,
    /// Traffic collision system mode selector (0 = standby).
    pub tcas_mode: u8,
    /// Map content suppressed by the crew.
    pub map_hidden: bool,
    /// First flight management computer.
    pub fm1: NavComputer,
    /// Second flight management computer.
    pub fm2: NavComputer,
    /// VOR receiver wired to this side.
    pub vor: RadioReceiver,
    /// ILS receiver wired to this side.
    pub ils: RadioReceiver,
    /// Glideslope deviation from the ILS receiver.
    pub glideslope: DeviationReading,
}

impl RoseInputs {
    /// Heading signal per the true-reference selection.
    pub fn heading_signal(&self) -> &LabeledSignal {
        if self.true_ref {
            &self.true_heading
        } else {
            &self.mag_heading
        }
    }

    /// Track signal per the true-reference selection.
    pub fn track_signal(&self) -> &LabeledSignal {
        if self.true_ref {
            &self.true_track
        } else {
            &self.mag_track
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_true_ref_selects_true_signals() {
        let inputs = RoseInputs {
            true_ref: true,
            mag_heading: LabeledSignal::normal(100.0),
            true_heading: LabeledSignal::normal(102.0),
            mag_track: LabeledSignal::normal(99.0),
            true_track: LabeledSignal::normal(101.0),
            ..test_inputs()
        };
        assert_eq!(inputs.heading_signal().value, 102.0);
        assert_eq!(inputs.track_signal().value, 101.0);

        let inputs = RoseInputs {
            true_ref: false,
            ..inputs
        };
        assert_eq!(inputs.heading_signal().value, 100.0);
        assert_eq!(inputs.track_signal().value, 99.0);
    }

    #[test]
    fn test_track_line_suppression() {
        let mut guidance = LateralGuidance::none();
        assert!(!guidance.suppresses_track_line());

        guidance.active = LateralMode::HeadingSelect;
        assert!(!guidance.suppresses_track_line());

        guidance.nav_armed = true;
        assert!(guidance.suppresses_track_line());

        guidance.nav_armed = false;
        guidance.active = LateralMode::NavManaged;
        assert!(guidance.suppresses_track_line());

        guidance.active = LateralMode::LocalizerCapture;
        assert!(guidance.suppresses_track_line());
    }

    fn test_inputs() -> RoseInputs {
        RoseInputs {
            mode: DisplayMode::RoseNav,
            side: DisplaySide::Left,
            adirs_aligned: true,
            true_ref: false,
            mag_heading: LabeledSignal::normal(0.0),
            true_heading: LabeledSignal::normal(0.0),
            mag_track: LabeledSignal::normal(0.0),
            true_track: LabeledSignal::normal(0.0),
            selected_heading_deg: -1.0,
            ls_course_deg: -1.0,
            ls_button_active: false,
            lateral: LateralGuidance::none(),
            ground_speed_mps: 0.0,
            position: Position::new(0.0, 0.0),
            range_nm: 80,
            tcas_mode: 0,
            map_hidden: false,
            fm1: NavComputer::failed(),
            fm2: NavComputer::failed(),
            vor: RadioReceiver::untuned(),
            ils: RadioReceiver::untuned(),
            glideslope: DeviationReading::unavailable(),
        }
    }
}
