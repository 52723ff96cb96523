//! Controller that drives every leg under one interlock policy.

use crate::config::{Config, Timings};
use crate::controller::builder::{GearControllerBuilder, DEFAULT_LEGS};
use crate::controller::error::BuildError;
use crate::controller::event::{EventSink, GearEvent, GearEventKind};
use crate::core::{Direction, GearLeg, GearState, Sensors, StateHistory, StateTransition};
use crate::interlock::{InterlockPolicy, Rejected};
use serde::Serialize;

/// Outcome of a command for one leg.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CommandReport {
    pub leg: String,
    pub accepted: bool,
    /// State after the command was applied (unchanged if rejected)
    pub state: GearState,
    pub sensors: Sensors,
    pub rejection: Option<Rejected>,
}

/// A state change caused by a tick.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LegTransition {
    pub leg: String,
    pub previous: GearState,
    pub current: GearState,
}

/// Coordinates a fixed, ordered set of legs.
///
/// Commands go to every leg, in construction order, each leg accepting or
/// rejecting on its own. Time only moves when [`GearController::tick`] is
/// called. Every outcome is also emitted to the owned [`EventSink`].
///
/// # Example
///
/// ```rust
/// use landing_gear::config::Config;
/// use landing_gear::controller::{GearController, GearEvent};
/// use landing_gear::core::{Direction, GearState};
///
/// let mut events: Vec<GearEvent> = Vec::new();
/// let mut controller = GearController::from_config(&Config::default(), &mut events).unwrap();
///
/// let reports = controller.command_all(Direction::Down);
/// assert!(reports.iter().all(|r| r.accepted));
///
/// let changed = controller.tick(2.5);
/// assert_eq!(changed.len(), 3);
/// assert!(controller.all_in(GearState::DownLocked));
///
/// drop(controller);
/// assert_eq!(events.len(), 6);
/// ```
pub struct GearController<K: EventSink> {
    legs: Vec<GearLeg>,
    histories: Vec<StateHistory>,
    interlocks: InterlockPolicy,
    sink: K,
    elapsed_s: f64,
}

impl<K: EventSink> GearController<K> {
    /// Create a controller with the given legs, timings and interlocks.
    pub fn new<I, N>(
        leg_names: I,
        timings: Timings,
        interlocks: InterlockPolicy,
        sink: K,
    ) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        GearControllerBuilder::new()
            .legs(leg_names)
            .timings(timings)
            .interlocks(interlocks)
            .build(sink)
    }

    /// Create the standard nose/left/right controller from configuration.
    pub fn from_config(config: &Config, sink: K) -> Result<Self, BuildError> {
        Self::new(
            DEFAULT_LEGS,
            config.timings,
            config.interlocks.clone(),
            sink,
        )
    }

    pub(crate) fn from_parts(legs: Vec<GearLeg>, interlocks: InterlockPolicy, sink: K) -> Self {
        let histories = vec![StateHistory::new(); legs.len()];
        Self {
            legs,
            histories,
            interlocks,
            sink,
            elapsed_s: 0.0,
        }
    }

    /// Send a command to every leg.
    ///
    /// The allow-list for `direction` is resolved once from the policy and
    /// applied to each leg independently; one leg's rejection never affects
    /// another. Reports come back in leg order.
    pub fn command_all(&mut self, direction: Direction) -> Vec<CommandReport> {
        let allow_from = self.interlocks.allow_list(direction);
        let mut reports = Vec::with_capacity(self.legs.len());

        for (leg, history) in self.legs.iter_mut().zip(self.histories.iter_mut()) {
            let before = leg.state();
            let outcome = leg.command(direction, allow_from);
            let state = leg.state();

            let kind = match &outcome {
                Ok(_) => {
                    *history = history.record(StateTransition::new(before, state, self.elapsed_s));
                    GearEventKind::CommandAccepted { direction }
                }
                Err(rejected) => GearEventKind::CommandRejected {
                    direction,
                    reasons: rejected.reasons.clone(),
                },
            };
            self.sink
                .emit(GearEvent::new(leg.name(), kind, state, self.elapsed_s));

            reports.push(CommandReport {
                leg: leg.name().to_string(),
                accepted: outcome.is_ok(),
                state,
                sensors: leg.sensors(),
                rejection: outcome.err(),
            });
        }

        reports
    }

    /// Advance simulated time by `dt_s` seconds on every leg.
    ///
    /// Returns the legs whose state changed, in leg order.
    pub fn tick(&mut self, dt_s: f64) -> Vec<LegTransition> {
        self.elapsed_s += dt_s;
        let mut changed = Vec::new();

        for (leg, history) in self.legs.iter_mut().zip(self.histories.iter_mut()) {
            let previous = leg.state();
            leg.tick(dt_s);
            let current = leg.state();
            if current == previous {
                continue;
            }

            *history = history.record(StateTransition::new(previous, current, self.elapsed_s));
            self.sink.emit(GearEvent::new(
                leg.name(),
                GearEventKind::TransitionComplete {
                    from: previous,
                    to: current,
                },
                current,
                self.elapsed_s,
            ));
            changed.push(LegTransition {
                leg: leg.name().to_string(),
                previous,
                current,
            });
        }

        changed
    }

    pub fn legs(&self) -> &[GearLeg] {
        &self.legs
    }

    pub fn leg(&self, name: &str) -> Option<&GearLeg> {
        self.legs.iter().find(|leg| leg.name() == name)
    }

    /// Transition history for one leg.
    pub fn history(&self, name: &str) -> Option<&StateHistory> {
        self.legs
            .iter()
            .position(|leg| leg.name() == name)
            .map(|i| &self.histories[i])
    }

    /// True when every leg is in `state`.
    pub fn all_in(&self, state: GearState) -> bool {
        self.legs.iter().all(|leg| leg.state() == state)
    }

    pub fn interlocks(&self) -> &InterlockPolicy {
        &self.interlocks
    }

    /// Simulated seconds ticked since construction.
    pub fn elapsed_s(&self) -> f64 {
        self.elapsed_s
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut K {
        &mut self.sink
    }

    pub fn into_sink(self) -> K {
        self.sink
    }
}
