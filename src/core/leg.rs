//! Single landing-gear leg state machine.

use super::state::{Direction, GearState, Sensors};
use crate::interlock::{evaluate, AllowList, Rejected};

/// One landing-gear leg.
///
/// A leg only changes state through [`GearLeg::command`], which starts a
/// transition, and [`GearLeg::tick`], which completes it once enough
/// simulated time has elapsed.
///
/// # Example
///
/// ```rust
/// use landing_gear::core::{Direction, GearLeg, GearState};
/// use landing_gear::interlock::AllowList;
///
/// let mut leg = GearLeg::new("nose", 1.0, 1.0);
/// let allow = AllowList::from_states([GearState::UpLocked]);
///
/// assert_eq!(
///     leg.command(Direction::Down, &allow),
///     Ok(GearState::TransitioningDown)
/// );
/// assert_eq!(leg.tick(1.0), Some(GearState::DownLocked));
/// assert!(leg.downlock_sensor());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct GearLeg {
    name: String,
    state: GearState,
    timer_s: f64,
    deploy_duration_s: f64,
    retract_duration_s: f64,
}

impl GearLeg {
    /// Create a leg in `UpLocked`.
    ///
    /// Durations are expected to be positive and finite; validation happens
    /// where the values come from (see `GearControllerBuilder` and `Config`).
    pub fn new(name: impl Into<String>, deploy_duration_s: f64, retract_duration_s: f64) -> Self {
        Self {
            name: name.into(),
            state: GearState::UpLocked,
            timer_s: 0.0,
            deploy_duration_s,
            retract_duration_s,
        }
    }

    /// Start a transition if the allow-list and transition table permit it.
    ///
    /// On acceptance the leg enters the transitioning state, the timer is
    /// reset to zero and the new state is returned. On rejection nothing
    /// changes.
    pub fn command(
        &mut self,
        direction: Direction,
        allow_from: &AllowList,
    ) -> Result<GearState, Rejected> {
        let target = evaluate(self.state, direction, allow_from)?;
        self.state = target;
        self.timer_s = 0.0;
        Ok(target)
    }

    /// Advance the transition timer by `dt_s` seconds.
    ///
    /// Completes the transition in this call once the timer reaches the
    /// relevant duration and returns the locked state entered. Time past the
    /// duration is dropped. A locked leg ignores ticks.
    pub fn tick(&mut self, dt_s: f64) -> Option<GearState> {
        debug_assert!(dt_s >= 0.0, "tick with negative dt: {dt_s}");

        let duration = match self.state {
            GearState::TransitioningDown => self.deploy_duration_s,
            GearState::TransitioningUp => self.retract_duration_s,
            GearState::UpLocked | GearState::DownLocked => return None,
        };

        self.timer_s += dt_s;
        if self.timer_s < duration {
            return None;
        }

        let locked = self.state.completion_target()?;
        self.state = locked;
        self.timer_s = 0.0;
        Some(locked)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> GearState {
        self.state
    }

    /// Seconds since the current transition started.
    ///
    /// `None` while locked: the timer only has meaning mid-transition.
    pub fn timer_s(&self) -> Option<f64> {
        self.state.is_transitioning().then_some(self.timer_s)
    }

    pub fn deploy_duration_s(&self) -> f64 {
        self.deploy_duration_s
    }

    pub fn retract_duration_s(&self) -> f64 {
        self.retract_duration_s
    }

    pub fn uplock_sensor(&self) -> bool {
        self.state == GearState::UpLocked
    }

    pub fn downlock_sensor(&self) -> bool {
        self.state == GearState::DownLocked
    }

    pub fn in_transit_sensor(&self) -> bool {
        self.state.is_transitioning()
    }

    pub fn sensors(&self) -> Sensors {
        self.state.sensors()
    }
}
