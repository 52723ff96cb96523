//! Per-leg transition history.
//!
//! Tracks every state change a leg goes through, keyed on the simulated
//! clock. Histories are immutable values: recording returns a new history.

use super::state::GearState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single state change.
///
/// `sim_time_s` is the simulated clock at which the change happened and is
/// the only time that matters to the gear logic. `recorded_at` is wall-clock
/// time kept for diagnostics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTransition {
    /// The state being left
    pub from: GearState,
    /// The state being entered
    pub to: GearState,
    /// Simulated seconds since the controller was created
    pub sim_time_s: f64,
    /// When the change was recorded
    pub recorded_at: DateTime<Utc>,
}

impl StateTransition {
    pub fn new(from: GearState, to: GearState, sim_time_s: f64) -> Self {
        Self {
            from,
            to,
            sim_time_s,
            recorded_at: Utc::now(),
        }
    }
}

/// Ordered history of state changes for one leg.
///
/// # Example
///
/// ```rust
/// use landing_gear::core::{GearState, StateHistory, StateTransition};
///
/// let history = StateHistory::new()
///     .record(StateTransition::new(
///         GearState::UpLocked,
///         GearState::TransitioningDown,
///         0.0,
///     ))
///     .record(StateTransition::new(
///         GearState::TransitioningDown,
///         GearState::DownLocked,
///         2.5,
///     ));
///
/// assert_eq!(
///     history.path(),
///     vec![
///         GearState::UpLocked,
///         GearState::TransitioningDown,
///         GearState::DownLocked,
///     ]
/// );
/// assert_eq!(history.span(), Some(std::time::Duration::from_secs_f64(2.5)));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateHistory {
    transitions: Vec<StateTransition>,
}

impl StateHistory {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    ///
    /// The existing history is left untouched.
    pub fn record(&self, transition: StateTransition) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// States traversed: the first `from`, then every `to` in order.
    pub fn path(&self) -> Vec<GearState> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.first() {
            path.push(first.from);
        }
        path.extend(self.transitions.iter().map(|t| t.to));
        path
    }

    /// Simulated time between the first and last recorded change.
    ///
    /// Returns `None` for an empty history.
    pub fn span(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.first()?, self.transitions.last()?);
        Duration::try_from_secs_f64(last.sim_time_s - first.sim_time_s).ok()
    }

    /// Most recent change, if any.
    pub fn last(&self) -> Option<&StateTransition> {
        self.transitions.last()
    }

    pub fn transitions(&self) -> &[StateTransition] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deploy_cycle() -> StateHistory {
        StateHistory::new()
            .record(StateTransition::new(
                GearState::UpLocked,
                GearState::TransitioningDown,
                1.0,
            ))
            .record(StateTransition::new(
                GearState::TransitioningDown,
                GearState::DownLocked,
                3.5,
            ))
    }

    #[test]
    fn new_history_is_empty() {
        let history = StateHistory::new();
        assert!(history.is_empty());
        assert!(history.path().is_empty());
        assert!(history.span().is_none());
        assert!(history.last().is_none());
    }

    #[test]
    fn record_is_immutable() {
        let history = StateHistory::new();
        let next = history.record(StateTransition::new(
            GearState::UpLocked,
            GearState::TransitioningDown,
            0.0,
        ));

        assert_eq!(history.len(), 0);
        assert_eq!(next.len(), 1);
    }

    #[test]
    fn path_returns_state_sequence() {
        assert_eq!(
            deploy_cycle().path(),
            vec![
                GearState::UpLocked,
                GearState::TransitioningDown,
                GearState::DownLocked
            ]
        );
    }

    #[test]
    fn span_uses_simulated_clock() {
        assert_eq!(
            deploy_cycle().span(),
            Some(Duration::from_secs_f64(2.5))
        );
    }

    #[test]
    fn single_transition_has_zero_span() {
        let history = StateHistory::new().record(StateTransition::new(
            GearState::DownLocked,
            GearState::TransitioningUp,
            4.0,
        ));
        assert_eq!(history.span(), Some(Duration::ZERO));
    }

    #[test]
    fn last_returns_latest_change() {
        let history = deploy_cycle();
        let last = history.last().unwrap();
        assert_eq!(last.to, GearState::DownLocked);
        assert_eq!(last.sim_time_s, 3.5);
    }

    #[test]
    fn history_serializes_correctly() {
        let history = deploy_cycle();
        let json = serde_json::to_string(&history).unwrap();
        let back: StateHistory = serde_json::from_str(&json).unwrap();
        assert_eq!(back.path(), history.path());
    }
}
