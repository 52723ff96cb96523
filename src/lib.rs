//! Landing gear: time-driven leg state machines gated by interlocks.
//!
//! Each landing-gear leg is an independent finite state machine that moves
//! between `UP_LOCKED` and `DOWN_LOCKED` through timed transitions. A
//! controller dispatches commands to every leg under a shared interlock
//! policy and advances all legs together on a simulated clock.
//!
//! # Core Concepts
//!
//! - **Legs**: `GearLeg` starts transitions on `command` and finishes them on `tick`
//! - **Interlocks**: allow-lists of state names, checked on top of the transition table
//! - **Controller**: `GearController` owns the legs, the clock and an injected event sink
//! - **Config**: lenient JSON loading with documented fallbacks
//!
//! Time never advances on its own: the caller's loop decides the step.
//!
//! # Example
//!
//! ```rust
//! use landing_gear::config::Timings;
//! use landing_gear::controller::{GearController, GearEvent};
//! use landing_gear::core::{Direction, GearState};
//! use landing_gear::interlock::InterlockPolicy;
//!
//! let mut controller = GearController::new(
//!     ["nose", "left", "right"],
//!     Timings { deploy_time_s: 1.0, retract_time_s: 1.0 },
//!     InterlockPolicy::default(),
//!     Vec::<GearEvent>::new(),
//! )
//! .unwrap();
//!
//! controller.command_all(Direction::Down);
//! // A second DOWN while moving is refused by every leg.
//! assert!(controller.command_all(Direction::Down).iter().all(|r| !r.accepted));
//!
//! controller.tick(0.5);
//! let changed = controller.tick(0.5);
//! assert_eq!(changed.len(), 3);
//! assert!(controller.all_in(GearState::DownLocked));
//! ```

pub mod cockpit;
pub mod config;
pub mod controller;
pub mod core;
pub mod interlock;

// Re-export commonly used types
pub use crate::config::{load_config, Config, Timings};
pub use crate::controller::{EventSink, GearController, GearEvent, TracingSink};
pub use crate::core::{Direction, GearLeg, GearState, Sensors};
pub use crate::interlock::{AllowList, InterlockPolicy, Rejected};
