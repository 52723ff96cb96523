//! Builder for constructing gear controllers.

use crate::config::Timings;
use crate::controller::error::BuildError;
use crate::controller::event::EventSink;
use crate::controller::machine::GearController;
use crate::core::GearLeg;
use crate::interlock::InterlockPolicy;
use std::collections::HashSet;

/// Leg names used when none are given explicitly.
pub const DEFAULT_LEGS: [&str; 3] = ["nose", "left", "right"];

/// Builder for constructing a [`GearController`] with a fluent API.
///
/// # Example
///
/// ```rust
/// use landing_gear::config::Timings;
/// use landing_gear::controller::{GearControllerBuilder, NullSink};
///
/// let controller = GearControllerBuilder::new()
///     .legs(["nose", "left", "right"])
///     .timings(Timings { deploy_time_s: 3.0, retract_time_s: 4.0 })
///     .build(NullSink)
///     .unwrap();
///
/// assert_eq!(controller.legs().len(), 3);
/// assert_eq!(controller.legs()[0].name(), "nose");
/// ```
#[derive(Clone, Debug, Default)]
pub struct GearControllerBuilder {
    legs: Vec<String>,
    timings: Timings,
    interlocks: InterlockPolicy,
}

impl GearControllerBuilder {
    /// Create a builder with no legs, default timings and default interlocks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a leg. Legs are commanded and ticked in the order added.
    pub fn leg(mut self, name: impl Into<String>) -> Self {
        self.legs.push(name.into());
        self
    }

    /// Add several legs at once.
    pub fn legs<I, N>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        self.legs.extend(names.into_iter().map(Into::into));
        self
    }

    /// Set the deploy/retract durations shared by every leg.
    pub fn timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }

    /// Set the interlock policy.
    pub fn interlocks(mut self, interlocks: InterlockPolicy) -> Self {
        self.interlocks = interlocks;
        self
    }

    /// Build the controller around `sink`.
    /// Returns an error if the leg set or timings are invalid.
    pub fn build<K: EventSink>(self, sink: K) -> Result<GearController<K>, BuildError> {
        if self.legs.is_empty() {
            return Err(BuildError::NoLegs);
        }

        let mut seen = HashSet::new();
        for name in &self.legs {
            if name.is_empty() {
                return Err(BuildError::EmptyLegName);
            }
            if !seen.insert(name.as_str()) {
                return Err(BuildError::DuplicateLeg { name: name.clone() });
            }
        }

        let Timings {
            deploy_time_s,
            retract_time_s,
        } = self.timings;
        check_duration("deploy_time_s", deploy_time_s)?;
        check_duration("retract_time_s", retract_time_s)?;

        let legs = self
            .legs
            .into_iter()
            .map(|name| GearLeg::new(name, deploy_time_s, retract_time_s))
            .collect();

        Ok(GearController::from_parts(legs, self.interlocks, sink))
    }
}

fn check_duration(field: &'static str, value: f64) -> Result<(), BuildError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(BuildError::InvalidDuration { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::event::NullSink;

    #[test]
    fn builder_requires_legs() {
        let result = GearControllerBuilder::new().build(NullSink);
        assert!(matches!(result, Err(BuildError::NoLegs)));
    }

    #[test]
    fn builder_rejects_duplicate_legs() {
        let result = GearControllerBuilder::new()
            .legs(["nose", "left", "nose"])
            .build(NullSink);

        assert!(matches!(
            result,
            Err(BuildError::DuplicateLeg { name }) if name == "nose"
        ));
    }

    #[test]
    fn builder_rejects_empty_names() {
        let result = GearControllerBuilder::new().leg("").build(NullSink);
        assert!(matches!(result, Err(BuildError::EmptyLegName)));
    }

    #[test]
    fn builder_validates_durations() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = GearControllerBuilder::new()
                .leg("nose")
                .timings(Timings {
                    deploy_time_s: 1.0,
                    retract_time_s: bad,
                })
                .build(NullSink);

            assert!(matches!(
                result,
                Err(BuildError::InvalidDuration {
                    field: "retract_time_s",
                    ..
                })
            ));
        }
    }

    #[test]
    fn fluent_api_preserves_leg_order_and_timings() {
        let controller = GearControllerBuilder::new()
            .leg("right")
            .legs(["left", "nose"])
            .timings(Timings {
                deploy_time_s: 1.0,
                retract_time_s: 2.0,
            })
            .build(NullSink)
            .unwrap();

        let names: Vec<_> = controller.legs().iter().map(|l| l.name()).collect();
        assert_eq!(names, vec!["right", "left", "nose"]);
        assert!(controller
            .legs()
            .iter()
            .all(|l| l.deploy_duration_s() == 1.0 && l.retract_duration_s() == 2.0));
    }
}
