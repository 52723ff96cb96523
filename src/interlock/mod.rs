//! Interlock policy and command evaluation.
//!
//! The interlock restricts which states permit which commands. It sits on
//! top of the leg transition table: a command must pass both.
//!
//! # Example
//!
//! ```rust
//! use landing_gear::core::{Direction, GearState};
//! use landing_gear::interlock::InterlockPolicy;
//!
//! let policy = InterlockPolicy::default();
//!
//! assert!(policy.evaluate(GearState::UpLocked, Direction::Down).is_ok());
//! assert!(policy.evaluate(GearState::UpLocked, Direction::Up).is_err());
//! ```

pub mod policy;
pub mod rejection;
pub mod rules;

pub use policy::{AllowList, InterlockPolicy};
pub use rejection::{Rejected, Rejection};
pub use rules::evaluate;
