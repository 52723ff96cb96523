//! Core gear types and the per-leg state machine.
//!
//! This module contains:
//! - `GearState`, `Direction` and `Sensors`, with the transition table
//! - `GearLeg`, the timer-driven leg state machine
//! - Immutable per-leg history on the simulated clock
//!
//! Nothing here performs I/O or logging; diagnostics belong to the
//! controller's event sink.

mod history;
mod leg;
mod state;

pub use history::{StateHistory, StateTransition};
pub use leg::GearLeg;
pub use state::{Direction, GearState, ParseError, Sensors};
