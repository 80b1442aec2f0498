//! Rosenav - rose-mode navigation display core
//!
//! This library computes the numeric and state core of a rotating
//! "rose"-style cockpit navigation display: needle and bug rotations,
//! deviation pixel offsets, dual-source tuning resolution and the
//! aircraft-centered map projection, all derived from live avionics signals
//! once per display refresh tick. Painting the result is an external
//! collaborator's job; it consumes [`compositor::RoseFrame`] values as
//! plain data.

pub mod angle;
pub mod compositor;
pub mod config;
pub mod deviation;
pub mod logging;
pub mod projection;
pub mod signal;
pub mod tuning;
