//! Reasons a gear command can be refused.

use crate::core::{Direction, GearState};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single failed check on a gear command.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Rejection {
    #[error("interlock does not permit {direction} from {state}")]
    NotPermitted {
        direction: Direction,
        state: GearState,
    },

    #[error("no {direction} transition from {state}")]
    NoTransition {
        direction: Direction,
        state: GearState,
    },
}

/// A refused command and every reason it was refused.
///
/// Rejection is an expected outcome, not a fault: the leg is left exactly
/// as it was.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
#[error("{direction} command rejected in {state}")]
pub struct Rejected {
    pub direction: Direction,
    pub state: GearState,
    pub reasons: Vec<Rejection>,
}

impl Rejected {
    /// Whether the interlock policy was one of the reasons.
    pub fn is_interlocked(&self) -> bool {
        self.reasons
            .iter()
            .any(|r| matches!(r, Rejection::NotPermitted { .. }))
    }
}
