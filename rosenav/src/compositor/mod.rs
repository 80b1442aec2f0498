//! Rose Compositor
//!
//! The top-level state machine of the display: given the per-tick input
//! snapshot (display mode, alignment state, signals, radios, position), it
//! decides which sub-elements are active and feeds them the computed
//! rotations and pixel offsets.
//!
//! # Design
//!
//! - **One snapshot per tick.** Signals are read into [`RoseInputs`] before
//!   any derivation; later stages never re-read, so a value and its
//!   validity flag cannot tear apart.
//! - **Frames are data.** A [`RoseFrame`] carries every number and flag a
//!   drawing layer needs and nothing it doesn't. The compositor knows no
//!   colors and no shapes.
//! - **Degradation is a state, not an error.** An unaligned inertial
//!   reference (or unusable heading) yields the degraded overlay frame;
//!   the next usable tick yields a full live frame with no residue.

mod frame;
mod inputs;
mod rose;

pub use frame::{
    DegradedFrame, IlsOverlayState, LiveFrame, NavInfoKind, NavInfoState, RangeLegend, RoseFrame,
    VorOverlayState, TCAS_TICK_RADIUS_RANGE_10_PX, TCAS_TICK_RADIUS_RANGE_20_PX,
};
pub use inputs::{DisplayMode, LateralGuidance, LateralMode, RadioReceiver, RoseInputs};
pub use rose::{RoseCompositor, MAP_REFERENCE_DIM_PX};
