//! Dual-source radio tuning resolution.
//!
//! Two independent flight-management computers each publish a health
//! discrete and a nav discrete word. The tuning mode shown next to a radio's
//! ident is a vote over both sources:
//!
//! 1. Neither source healthy, or neither discrete word in normal operation:
//!    the tuning data comes from outside the aircraft's own tuning logic,
//!    **Remote**.
//! 2. Either source reports the channel's manual-tuning bit: **Manual**.
//! 3. Otherwise: **Auto** (no annotation).
//!
//! Source order is irrelevant, and a dual health loss always overrides bit
//! state. The vote is re-run every refresh cycle; nothing is cached across
//! health transitions.

use serde::Serialize;

use crate::signal::LabeledSignal;

/// Resolved tuning mode for one radio channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TuningMode {
    /// Automatically tuned by the flight management system. No annotation.
    Auto,
    /// Manually tuned by the crew.
    Manual,
    /// Tuning data sourced outside the aircraft's own tuning logic.
    Remote,
}

impl TuningMode {
    /// Annotation rendered next to the radio ident: `""`, `"M"` or `"R"`.
    pub fn annotation(&self) -> &'static str {
        match self {
            TuningMode::Auto => "",
            TuningMode::Manual => "M",
            TuningMode::Remote => "R",
        }
    }
}

/// One redundant navigation computer: health discrete plus nav discrete word.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavComputer {
    /// Health discrete for this computer.
    pub healthy: bool,
    /// Nav discrete word; per-channel tuning facts live in its bits.
    pub nav_discrete: LabeledSignal,
}

impl NavComputer {
    /// Create a computer state snapshot.
    pub fn new(healthy: bool, nav_discrete: LabeledSignal) -> Self {
        Self {
            healthy,
            nav_discrete,
        }
    }

    /// A failed computer: unhealthy with a failed discrete word.
    pub fn failed() -> Self {
        Self::new(false, LabeledSignal::failure_warning())
    }
}

/// A tunable radio channel, identified by receiver kind and index.
///
/// The nav discrete word lays the manual-tuning facts out per channel: VOR
/// receiver n at bit 10+n, ILS receiver n at bit 14+n.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavChannel {
    /// VOR receiver 1 or 2.
    Vor(u8),
    /// ILS receiver 1 or 2.
    Ils(u8),
}

impl NavChannel {
    /// Bit index (1-based) of this channel's manual-tuning fact.
    pub fn manual_tuning_bit(&self) -> u32 {
        match self {
            NavChannel::Vor(index) => 10 + u32::from(*index),
            NavChannel::Ils(index) => 14 + u32::from(*index),
        }
    }
}

/// Resolve the tuning mode for one channel from both computers.
pub fn resolve_tuning(fm1: &NavComputer, fm2: &NavComputer, channel: NavChannel) -> TuningMode {
    let neither_healthy = !fm1.healthy && !fm2.healthy;
    let neither_normal =
        !fm1.nav_discrete.is_normal_operation() && !fm2.nav_discrete.is_normal_operation();

    if neither_healthy || neither_normal {
        return TuningMode::Remote;
    }

    let bit = channel.manual_tuning_bit();
    if fm1.nav_discrete.bit_or(bit, false) || fm2.nav_discrete.bit_or(bit, false) {
        TuningMode::Manual
    } else {
        TuningMode::Auto
    }
}
