//! Command evaluation using Validation.
//!
//! Every check runs, and all failures are reported together, so a
//! rejection tells the caller both that the interlock refused the command
//! and that no transition exists, when both are true.

use crate::core::{Direction, GearState};
use crate::interlock::policy::{AllowList, InterlockPolicy};
use crate::interlock::rejection::{Rejected, Rejection};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<Rejection>>;

fn interlock_check(state: GearState, direction: Direction, allow_from: &AllowList) -> Check {
    if allow_from.permits(state) {
        Validation::success(())
    } else {
        Validation::fail(Rejection::NotPermitted { direction, state })
    }
}

fn table_check(state: GearState, direction: Direction) -> Check {
    match state.command_target(direction) {
        Some(_) => Validation::success(()),
        None => Validation::fail(Rejection::NoTransition { direction, state }),
    }
}

/// Decide whether a leg in `state` accepts a `direction` command.
///
/// The command is accepted only when the current state is in `allow_from`
/// AND the transition table has an entry for `(state, direction)`. On
/// success the transitioning state to enter is returned.
///
/// # Example
///
/// ```rust
/// use landing_gear::core::{Direction, GearState};
/// use landing_gear::interlock::{evaluate, AllowList, Rejection};
///
/// let allow = AllowList::from_states([GearState::UpLocked, GearState::DownLocked]);
///
/// assert_eq!(
///     evaluate(GearState::UpLocked, Direction::Down, &allow),
///     Ok(GearState::TransitioningDown)
/// );
///
/// // Allow-listed, but there is nowhere to go.
/// let rejected = evaluate(GearState::DownLocked, Direction::Down, &allow).unwrap_err();
/// assert_eq!(
///     rejected.reasons,
///     vec![Rejection::NoTransition {
///         direction: Direction::Down,
///         state: GearState::DownLocked,
///     }]
/// );
/// ```
pub fn evaluate(
    state: GearState,
    direction: Direction,
    allow_from: &AllowList,
) -> Result<GearState, Rejected> {
    let checks = vec![
        interlock_check(state, direction, allow_from),
        table_check(state, direction),
    ];

    let rejected = |reasons: Vec<Rejection>| Rejected {
        direction,
        state,
        reasons,
    };

    match (Validation::all_vec(checks), state.command_target(direction)) {
        (Validation::Success(_), Some(target)) => Ok(target),
        (Validation::Failure(reasons), _) => Err(rejected(reasons.iter().cloned().collect())),
        (Validation::Success(_), None) => Err(rejected(vec![Rejection::NoTransition {
            direction,
            state,
        }])),
    }
}

impl InterlockPolicy {
    /// Evaluate a command against this policy's allow-list for `direction`.
    pub fn evaluate(&self, state: GearState, direction: Direction) -> Result<GearState, Rejected> {
        evaluate(state, direction, self.allow_list(direction))
    }
}
