//! Structured diagnostics emitted by the controller.

use crate::core::{Direction, GearState, Sensors};
use crate::interlock::Rejection;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What happened to a leg.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GearEventKind {
    CommandAccepted {
        direction: Direction,
    },
    CommandRejected {
        direction: Direction,
        reasons: Vec<Rejection>,
    },
    TransitionComplete {
        from: GearState,
        to: GearState,
    },
}

/// One diagnostic record about one leg.
///
/// `state` and `sensors` describe the leg after the event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GearEvent {
    pub leg: String,
    #[serde(flatten)]
    pub kind: GearEventKind,
    pub state: GearState,
    pub sensors: Sensors,
    pub sim_time_s: f64,
    pub timestamp: DateTime<Utc>,
}

impl GearEvent {
    pub fn new(leg: &str, kind: GearEventKind, state: GearState, sim_time_s: f64) -> Self {
        Self {
            leg: leg.to_string(),
            kind,
            state,
            sensors: state.sensors(),
            sim_time_s,
            timestamp: Utc::now(),
        }
    }

    /// Short human-readable description, e.g. `DOWN command accepted`.
    pub fn message(&self) -> String {
        match &self.kind {
            GearEventKind::CommandAccepted { direction } => {
                format!("{direction} command accepted")
            }
            GearEventKind::CommandRejected { direction, .. } => {
                format!("{direction} command rejected")
            }
            GearEventKind::TransitionComplete { from, to } => {
                format!("Transition complete: {from} -> {to}")
            }
        }
    }
}

impl fmt::Display for GearEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} | {} ({})",
            self.leg.to_uppercase(),
            self.message(),
            self.state,
            self.sensors
        )
    }
}

/// One-way destination for controller diagnostics.
///
/// The controller owns its sink; callers that want the events back can
/// pass `&mut Vec<GearEvent>` and keep the vector.
pub trait EventSink {
    fn emit(&mut self, event: GearEvent);
}

impl EventSink for Vec<GearEvent> {
    fn emit(&mut self, event: GearEvent) {
        self.push(event);
    }
}

impl<K: EventSink + ?Sized> EventSink for &mut K {
    fn emit(&mut self, event: GearEvent) {
        (**self).emit(event);
    }
}

impl<K: EventSink + ?Sized> EventSink for Box<K> {
    fn emit(&mut self, event: GearEvent) {
        (**self).emit(event);
    }
}

/// Sink that drops every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: GearEvent) {}
}

/// Sink that forwards events to `tracing` at info level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&mut self, event: GearEvent) {
        tracing::info!(
            leg = %event.leg,
            state = %event.state,
            uplock = event.sensors.uplock,
            downlock = event.sensors.downlock,
            transit = event.sensors.in_transit,
            sim_time_s = event.sim_time_s,
            "{event}"
        );
        if let GearEventKind::CommandRejected { reasons, .. } = &event.kind {
            for reason in reasons {
                tracing::debug!(leg = %event.leg, "{reason}");
            }
        }
    }
}
