//! Multi-leg controller, its builder and its diagnostics.
//!
//! The controller is the imperative shell around the pure leg logic: it
//! owns the legs, the interlock policy, the simulated clock and the event
//! sink, and it is the only place where events are produced.
//!
//! # Key Concepts
//!
//! - **Commands**: dispatched to every leg, accepted or rejected per leg
//! - **Ticks**: advance the simulated clock and complete transitions
//! - **Sinks**: injected at construction; no global logger is involved

mod builder;
mod error;
mod event;
mod machine;

pub use builder::{GearControllerBuilder, DEFAULT_LEGS};
pub use error::BuildError;
pub use event::{EventSink, GearEvent, GearEventKind, NullSink, TracingSink};
pub use machine::{CommandReport, GearController, LegTransition};
