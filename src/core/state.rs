//! Gear states, command directions and the transition table.
//!
//! Everything in this module is pure: states are plain values, and the
//! transition table is a total function over `(GearState, Direction)`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Position of a single gear leg.
///
/// The set is closed: a leg is always in exactly one of these four states,
/// starting in [`GearState::UpLocked`].
///
/// # Example
///
/// ```rust
/// use landing_gear::core::{Direction, GearState};
///
/// let state = GearState::default();
/// assert_eq!(state, GearState::UpLocked);
/// assert_eq!(state.name(), "UP_LOCKED");
/// assert_eq!(
///     state.command_target(Direction::Down),
///     Some(GearState::TransitioningDown)
/// );
/// assert_eq!(state.command_target(Direction::Up), None);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GearState {
    /// Retracted and held by the uplock
    #[default]
    UpLocked,
    /// Extending, waiting for the deploy duration to elapse
    TransitioningDown,
    /// Extended and held by the downlock
    DownLocked,
    /// Retracting, waiting for the retract duration to elapse
    TransitioningUp,
}

impl GearState {
    /// All states, in declaration order.
    pub const ALL: [GearState; 4] = [
        GearState::UpLocked,
        GearState::TransitioningDown,
        GearState::DownLocked,
        GearState::TransitioningUp,
    ];

    /// Canonical name used by allow-lists, configuration and diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::UpLocked => "UP_LOCKED",
            Self::TransitioningDown => "TRANSITIONING_DOWN",
            Self::DownLocked => "DOWN_LOCKED",
            Self::TransitioningUp => "TRANSITIONING_UP",
        }
    }

    /// True for the two locked (resting) states.
    pub fn is_locked(&self) -> bool {
        matches!(self, Self::UpLocked | Self::DownLocked)
    }

    /// True while the leg is moving between locks.
    pub fn is_transitioning(&self) -> bool {
        !self.is_locked()
    }

    /// Transition table for commands.
    ///
    /// Only DOWN from `UpLocked` and UP from `DownLocked` have a target;
    /// every other pair yields `None`.
    pub fn command_target(&self, direction: Direction) -> Option<GearState> {
        match (self, direction) {
            (Self::UpLocked, Direction::Down) => Some(Self::TransitioningDown),
            (Self::DownLocked, Direction::Up) => Some(Self::TransitioningUp),
            _ => None,
        }
    }

    /// Locked state reached when the current transition completes.
    pub fn completion_target(&self) -> Option<GearState> {
        match self {
            Self::TransitioningDown => Some(Self::DownLocked),
            Self::TransitioningUp => Some(Self::UpLocked),
            Self::UpLocked | Self::DownLocked => None,
        }
    }

    /// Read-only lock and transit indicators for this state.
    pub fn sensors(&self) -> Sensors {
        Sensors {
            uplock: matches!(self, Self::UpLocked),
            downlock: matches!(self, Self::DownLocked),
            in_transit: self.is_transitioning(),
        }
    }
}

impl fmt::Display for GearState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string is not a known state or direction name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown gear state '{0}'")]
    UnknownState(String),

    #[error("unknown direction '{0}', expected DOWN or UP")]
    UnknownDirection(String),
}

impl FromStr for GearState {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GearState::ALL
            .into_iter()
            .find(|state| state.name() == s)
            .ok_or_else(|| ParseError::UnknownState(s.to_string()))
    }
}

/// Direction of a gear command.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Down,
    Up,
}

impl Direction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Down => "DOWN",
            Self::Up => "UP",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = ParseError;

    /// Accepts `DOWN`/`UP` in any case, plus the cockpit shorthands `d`/`u`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "down" | "d" => Ok(Self::Down),
            "up" | "u" => Ok(Self::Up),
            _ => Err(ParseError::UnknownDirection(s.to_string())),
        }
    }
}

/// Lock and transit indicators derived from a [`GearState`].
///
/// Exactly one field is true for any state.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Sensors {
    pub uplock: bool,
    pub downlock: bool,
    pub in_transit: bool,
}

impl Sensors {
    /// Check that exactly one indicator is set.
    pub fn is_consistent(&self) -> bool {
        [self.uplock, self.downlock, self.in_transit]
            .iter()
            .filter(|lit| **lit)
            .count()
            == 1
    }
}

impl From<GearState> for Sensors {
    fn from(state: GearState) -> Self {
        state.sensors()
    }
}

impl fmt::Display for Sensors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "uplock={}, downlock={}, transit={}",
            self.uplock, self.downlock, self.in_transit
        )
    }
}
