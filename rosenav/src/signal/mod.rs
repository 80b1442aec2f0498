//! Labeled avionics signals and validity resolution.
//!
//! Every raw input the compositor consumes arrives as a value paired with a
//! sign/status matrix label set by the producing sensor or computer. Validity
//! is data, not an error: reading an invalid signal returns the value together
//! with a `false` validity flag, and the caller substitutes its documented
//! display fallback (dashes, suppressed needle, degraded overlay). A stale
//! numeric is never silently reused.

use std::fmt;

/// Status label carried alongside a raw signal value.
///
/// Only [`SignalStatus::NormalOperation`] marks a usable value. The other
/// labels are distinct failure/test states that callers may want to
/// distinguish for annunciation, but all of them read as invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalStatus {
    /// Value is live and usable.
    NormalOperation,
    /// The source is healthy but has no value to report.
    NoComputedData,
    /// The source is in functional test; the value is synthetic.
    FunctionalTest,
    /// The source has failed.
    FailureWarning,
}

impl fmt::Display for SignalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SignalStatus::NormalOperation => "NO",
            SignalStatus::NoComputedData => "NCD",
            SignalStatus::FunctionalTest => "FT",
            SignalStatus::FailureWarning => "FW",
        };
        write!(f, "{}", label)
    }
}

/// A raw signal value with its status label, snapshotted once per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabeledSignal {
    /// Raw numeric value. Meaningless unless the status reads valid.
    pub value: f64,
    /// Status label set by the producing system.
    pub status: SignalStatus,
}

impl LabeledSignal {
    /// Create a signal with an explicit status.
    pub fn new(value: f64, status: SignalStatus) -> Self {
        Self { value, status }
    }

    /// Create a live, usable signal.
    pub fn normal(value: f64) -> Self {
        Self::new(value, SignalStatus::NormalOperation)
    }

    /// Create a signal whose source reports no computed data.
    pub fn no_computed_data() -> Self {
        Self::new(0.0, SignalStatus::NoComputedData)
    }

    /// Create a signal whose source has failed.
    pub fn failure_warning() -> Self {
        Self::new(0.0, SignalStatus::FailureWarning)
    }

    /// Is the value live and usable?
    pub fn is_normal_operation(&self) -> bool {
        self.status == SignalStatus::NormalOperation
    }

    /// Read the signal: value plus validity flag.
    ///
    /// The value is returned regardless of status so callers can log it, but
    /// it must only be displayed or fed into downstream math when the flag
    /// is true.
    pub fn read(&self) -> (f64, bool) {
        (self.value, self.is_normal_operation())
    }

    /// Read the value, substituting `fallback` when the signal is invalid.
    pub fn value_or(&self, fallback: f64) -> f64 {
        if self.is_normal_operation() {
            self.value
        } else {
            fallback
        }
    }

    /// Read one bit of a discrete word, 1-based from the least significant
    /// bit.
    ///
    /// Returns `None` when the signal is not in normal operation or the
    /// index falls outside the 32-bit word. Discrete words encode
    /// independent boolean facts per bit position (e.g. "this channel is
    /// manually tuned").
    pub fn bit(&self, index: u32) -> Option<bool> {
        if !self.is_normal_operation() || index == 0 || index > 32 {
            return None;
        }
        let word = self.value.trunc() as i64 as u32;
        Some((word >> (index - 1)) & 1 != 0)
    }

    /// Read one bit of a discrete word, with a default when unreadable.
    pub fn bit_or(&self, index: u32, default: bool) -> bool {
        self.bit(index).unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod validity {
        use super::*;

        #[test]
        fn test_read_normal_operation() {
            let signal = LabeledSignal::normal(183.25);
            let (value, valid) = signal.read();
            assert_eq!(value, 183.25);
            assert!(valid);
        }

        #[test]
        fn test_read_invalid_statuses() {
            for status in [
                SignalStatus::NoComputedData,
                SignalStatus::FunctionalTest,
                SignalStatus::FailureWarning,
            ] {
                let signal = LabeledSignal::new(99.0, status);
                let (value, valid) = signal.read();
                assert_eq!(value, 99.0, "raw value still readable for {}", status);
                assert!(!valid, "{} must not read as valid", status);
            }
        }

        #[test]
        fn test_value_or_fallback() {
            assert_eq!(LabeledSignal::normal(12.0).value_or(-1.0), 12.0);
            assert_eq!(LabeledSignal::failure_warning().value_or(-1.0), -1.0);
            assert_eq!(LabeledSignal::no_computed_data().value_or(-1.0), -1.0);
        }
    }

    mod discrete_bits {
        use super::*;

        #[test]
        fn test_bit_reads_word() {
            // Bits 1 and 12 set: 1 + 2^11 = 2049
            let signal = LabeledSignal::normal(2049.0);
            assert_eq!(signal.bit(1), Some(true));
            assert_eq!(signal.bit(2), Some(false));
            assert_eq!(signal.bit(12), Some(true));
            assert_eq!(signal.bit(13), Some(false));
        }

        #[test]
        fn test_bit_invalid_signal_is_none() {
            let signal = LabeledSignal::new(2049.0, SignalStatus::FailureWarning);
            assert_eq!(signal.bit(1), None);
            assert!(!signal.bit_or(1, false));
            assert!(signal.bit_or(1, true));
        }

        #[test]
        fn test_bit_index_out_of_range() {
            let signal = LabeledSignal::normal(1.0);
            assert_eq!(signal.bit(0), None);
            assert_eq!(signal.bit(33), None);
        }

        #[test]
        fn test_bit_truncates_fractional_word() {
            // Discrete words arrive as floats; the fraction carries no bits
            let signal = LabeledSignal::normal(5.75);
            assert_eq!(signal.bit(1), Some(true));
            assert_eq!(signal.bit(2), Some(false));
            assert_eq!(signal.bit(3), Some(true));
        }
    }
}
