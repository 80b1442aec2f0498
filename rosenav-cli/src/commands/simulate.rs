//! Simulate command - drive the compositor with a synthetic flight.
//!
//! Feeds the compositor a deterministic synthetic scenario at the
//! configured refresh cadence: the aircraft departs overhead Hamburg on a
//! slow right turn with all radios tuned, and the inertial reference
//! completes alignment after a configurable number of ticks. Each frame is
//! printed as a one-line summary, or as JSON for piping into a renderer.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, ValueEnum};

use rosenav::compositor::{
    DisplayMode, LateralGuidance, RadioReceiver, RoseCompositor, RoseFrame, RoseInputs,
};
use rosenav::config::ConfigFile;
use rosenav::deviation::DeviationReading;
use rosenav::projection::Position;
use rosenav::signal::LabeledSignal;
use rosenav::tuning::NavComputer;

use crate::error::CliError;

/// Arguments for the simulate command.
#[derive(Debug, Args)]
pub struct SimulateArgs {
    /// Display mode to simulate
    #[arg(long, value_enum, default_value = "rose-nav")]
    pub mode: ModeArg,

    /// Number of refresh ticks to run (0 = until interrupted)
    #[arg(long, default_value_t = 100)]
    pub ticks: u64,

    /// Tick at which inertial alignment completes
    #[arg(long, default_value_t = 10)]
    pub align_after: u64,

    /// Override the configured range setting (nautical miles)
    #[arg(long)]
    pub range: Option<u32>,

    /// Print each frame as JSON instead of a summary line
    #[arg(long)]
    pub json: bool,
}

/// Display mode selector on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Flight-plan map mode
    RoseNav,
    /// VOR course/deviation mode
    RoseVor,
    /// ILS course/deviation mode
    RoseIls,
}

impl From<ModeArg> for DisplayMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::RoseNav => DisplayMode::RoseNav,
            ModeArg::RoseVor => DisplayMode::RoseVor,
            ModeArg::RoseIls => DisplayMode::RoseIls,
        }
    }
}

/// Run the simulate command.
pub fn run(args: SimulateArgs) -> Result<(), CliError> {
    let config = ConfigFile::load()?;
    let range_nm = args.range.unwrap_or(config.display.range_nm);
    let period = Duration::from_secs_f64(1.0 / config.display.refresh_hz);

    let running = Arc::new(AtomicBool::new(true));
    let handler_flag = Arc::clone(&running);
    ctrlc::set_handler(move || handler_flag.store(false, Ordering::SeqCst))
        .map_err(|e| CliError::Signal(e.to_string()))?;

    tracing::info!(
        mode = ?args.mode,
        range_nm,
        side = %config.display.side,
        refresh_hz = config.display.refresh_hz,
        "starting synthetic flight"
    );

    let mut compositor = RoseCompositor::new();
    let mut tick = 0u64;

    while running.load(Ordering::SeqCst) && (args.ticks == 0 || tick < args.ticks) {
        let inputs = synthetic_inputs(&config, args.mode.into(), range_nm, tick, args.align_after);
        let frame = compositor.tick(&inputs);

        if args.json {
            println!("{}", serde_json::to_string(&frame)?);
        } else {
            println!("{}", summarize(tick, &frame));
        }

        std::thread::sleep(period);
        tick += 1;
    }

    tracing::info!(ticks = tick, "simulation finished");
    Ok(())
}

/// Synthetic scenario state for one tick. Deterministic in the tick index.
fn synthetic_inputs(
    config: &ConfigFile,
    mode: DisplayMode,
    range_nm: u32,
    tick: u64,
    align_after: u64,
) -> RoseInputs {
    let aligned = tick >= align_after;
    let t = tick as f64;

    // Slow right turn out of Hamburg, one degree of heading per tick
    let heading = (85.0 + t) % 360.0;
    let position = Position::new(53.630389 + t * 0.0004, 9.988228 + t * 0.0007);

    // Course error sweeps through the beam, exercising the to/from flip
    let vor_error = -30.0 + t * 1.5;

    let heading_signal = |value: f64| {
        if aligned {
            LabeledSignal::normal(value)
        } else {
            LabeledSignal::no_computed_data()
        }
    };

    RoseInputs {
        mode,
        side: config.display.side,
        adirs_aligned: aligned,
        true_ref: false,
        mag_heading: heading_signal(heading),
        true_heading: heading_signal((heading + 2.0) % 360.0),
        mag_track: heading_signal((heading - 3.0).rem_euclid(360.0)),
        true_track: heading_signal((heading - 1.0).rem_euclid(360.0)),
        selected_heading_deg: 120.0,
        ls_course_deg: 233.0,
        ls_button_active: mode == DisplayMode::RoseNav,
        lateral: LateralGuidance::none(),
        ground_speed_mps: 120.0,
        position,
        range_nm,
        tcas_mode: 1,
        map_hidden: false,
        fm1: NavComputer::new(true, LabeledSignal::normal(0.0)),
        fm2: NavComputer::new(true, LabeledSignal::normal(0.0)),
        vor: RadioReceiver {
            frequency_mhz: 113.9,
            course_deg: 135.0,
            ident: "HAM".to_string(),
            deviation: DeviationReading::available(vor_error),
        },
        ils: RadioReceiver {
            frequency_mhz: 110.3,
            course_deg: 233.0,
            ident: "IHHW".to_string(),
            deviation: DeviationReading::available((t * 0.05).sin() * 1.2),
        },
        glideslope: DeviationReading::available((t * 0.03).sin() * 0.6),
    }
}

/// One-line human summary of a frame.
fn summarize(tick: u64, frame: &RoseFrame) -> String {
    match frame {
        RoseFrame::Degraded(frame) => {
            format!("tick {:>4}  DEGRADED  {} / {}", tick, frame.heading_flag, frame.map_flag)
        }
        RoseFrame::Live(frame) => {
            let mut line = format!(
                "tick {:>4}  hdg {:6.2}  ring {:+7.2}  map v{}",
                tick, frame.heading_deg, frame.ring_rotation_deg, frame.projection.version
            );
            if let Some(vor) = &frame.vor {
                match &vor.deviation {
                    Some(dev) => line.push_str(&format!(
                        "  vor {:+6.1}px {}",
                        dev.px,
                        if dev.toward { "TO" } else { "FROM" }
                    )),
                    None => line.push_str("  vor ---"),
                }
            }
            if let Some(ils) = &frame.ils {
                match &ils.deviation {
                    Some(dev) => line.push_str(&format!("  loc {:+5.2} dots", dev.dots)),
                    None => line.push_str("  loc ---"),
                }
            }
            if let Some(info) = &frame.nav_info {
                line.push_str(&format!("  tune '{}'", info.tuning.annotation()));
            }
            line
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_aligns_after_configured_tick() {
        let config = ConfigFile::default();
        let before = synthetic_inputs(&config, DisplayMode::RoseNav, 80, 4, 5);
        assert!(!before.adirs_aligned);
        let after = synthetic_inputs(&config, DisplayMode::RoseNav, 80, 5, 5);
        assert!(after.adirs_aligned);
    }

    #[test]
    fn test_scenario_is_deterministic() {
        let config = ConfigFile::default();
        let a = synthetic_inputs(&config, DisplayMode::RoseVor, 80, 42, 5);
        let b = synthetic_inputs(&config, DisplayMode::RoseVor, 80, 42, 5);
        assert_eq!(a, b);
    }

    #[test]
    fn test_summary_marks_degraded_frames() {
        let mut compositor = RoseCompositor::new();
        let config = ConfigFile::default();
        let inputs = synthetic_inputs(&config, DisplayMode::RoseNav, 80, 0, 10);
        let frame = compositor.tick(&inputs);
        assert!(summarize(0, &frame).contains("DEGRADED"));
    }
}
