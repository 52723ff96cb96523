//! Property-based tests for gear legs and the controller.
//!
//! These tests use proptest to drive legs and controllers through random
//! command/tick sequences and check that the invariants hold after every
//! step.

use landing_gear::config::Timings;
use landing_gear::controller::{GearController, GearEvent};
use landing_gear::core::{Direction, GearLeg, GearState};
use landing_gear::interlock::{AllowList, InterlockPolicy};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Step {
    Command(Direction),
    Tick(f64),
}

prop_compose! {
    fn arbitrary_direction()(down in any::<bool>()) -> Direction {
        if down { Direction::Down } else { Direction::Up }
    }
}

prop_compose! {
    fn arbitrary_state()(variant in 0..4usize) -> GearState {
        GearState::ALL[variant]
    }
}

prop_compose! {
    fn arbitrary_allow_list()(states in prop::collection::vec(arbitrary_state(), 0..4)) -> AllowList {
        AllowList::from_states(states)
    }
}

fn arbitrary_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        arbitrary_direction().prop_map(Step::Command),
        (0.0..3.0f64).prop_map(Step::Tick),
        Just(Step::Tick(0.0)),
    ]
}

fn timings() -> impl Strategy<Value = Timings> {
    (0.1..5.0f64, 0.1..5.0f64).prop_map(|(deploy_time_s, retract_time_s)| Timings {
        deploy_time_s,
        retract_time_s,
    })
}

fn is_legal(from: GearState, to: GearState) -> bool {
    from == to
        || [Direction::Down, Direction::Up]
            .into_iter()
            .any(|d| from.command_target(d) == Some(to))
        || from.completion_target() == Some(to)
}

proptest! {
    #[test]
    fn exactly_one_sensor_is_active(
        timings in timings(),
        policy in (arbitrary_allow_list(), arbitrary_allow_list()),
        steps in prop::collection::vec(arbitrary_step(), 0..40),
    ) {
        let mut leg = GearLeg::new("nose", timings.deploy_time_s, timings.retract_time_s);
        let policy = InterlockPolicy::new(policy.0, policy.1);

        for step in steps {
            match step {
                Step::Command(d) => { let _ = leg.command(d, policy.allow_list(d)); }
                Step::Tick(dt) => { leg.tick(dt); }
            }
            let active = [leg.uplock_sensor(), leg.downlock_sensor(), leg.in_transit_sensor()]
                .iter()
                .filter(|s| **s)
                .count();
            prop_assert_eq!(active, 1);
            prop_assert!(leg.sensors().is_consistent());
        }
    }

    #[test]
    fn every_state_change_is_in_the_table(
        timings in timings(),
        steps in prop::collection::vec(arbitrary_step(), 0..40),
    ) {
        let mut leg = GearLeg::new("left", timings.deploy_time_s, timings.retract_time_s);
        let policy = InterlockPolicy::default();

        for step in steps {
            let before = leg.state();
            match step {
                Step::Command(d) => { let _ = leg.command(d, policy.allow_list(d)); }
                Step::Tick(dt) => { leg.tick(dt); }
            }
            prop_assert!(is_legal(before, leg.state()), "{} -> {}", before, leg.state());
        }
    }

    #[test]
    fn timer_is_non_negative_and_only_seen_in_transit(
        timings in timings(),
        steps in prop::collection::vec(arbitrary_step(), 0..40),
    ) {
        let mut leg = GearLeg::new("right", timings.deploy_time_s, timings.retract_time_s);
        let policy = InterlockPolicy::default();

        for step in steps {
            match step {
                Step::Command(d) => { let _ = leg.command(d, policy.allow_list(d)); }
                Step::Tick(dt) => { leg.tick(dt); }
            }
            match leg.timer_s() {
                Some(timer) => {
                    prop_assert!(leg.in_transit_sensor());
                    prop_assert!(timer >= 0.0);
                }
                None => prop_assert!(leg.state().is_locked()),
            }
        }
    }

    #[test]
    fn zero_tick_is_idempotent(
        timings in timings(),
        steps in prop::collection::vec(arbitrary_step(), 0..20),
    ) {
        let mut leg = GearLeg::new("nose", timings.deploy_time_s, timings.retract_time_s);
        let policy = InterlockPolicy::default();
        for step in steps {
            match step {
                Step::Command(d) => { let _ = leg.command(d, policy.allow_list(d)); }
                Step::Tick(dt) => { leg.tick(dt); }
            }
        }

        let before = leg.clone();
        prop_assert_eq!(leg.tick(0.0), None);
        prop_assert_eq!(leg, before);
    }

    #[test]
    fn rejected_commands_leave_leg_untouched(
        timings in timings(),
        allow in arbitrary_allow_list(),
        direction in arbitrary_direction(),
        steps in prop::collection::vec(arbitrary_step(), 0..20),
    ) {
        let mut leg = GearLeg::new("nose", timings.deploy_time_s, timings.retract_time_s);
        let policy = InterlockPolicy::default();
        for step in steps {
            match step {
                Step::Command(d) => { let _ = leg.command(d, policy.allow_list(d)); }
                Step::Tick(dt) => { leg.tick(dt); }
            }
        }

        let before = leg.clone();
        match leg.command(direction, &allow) {
            Ok(target) => {
                prop_assert!(allow.permits(before.state()));
                prop_assert_eq!(before.state().command_target(direction), Some(target));
                prop_assert_eq!(leg.timer_s(), Some(0.0));
            }
            Err(rejected) => {
                prop_assert!(!rejected.reasons.is_empty());
                prop_assert_eq!(leg, before);
            }
        }
    }

    #[test]
    fn transition_completes_once_duration_elapses(
        timings in timings(),
        slices in prop::collection::vec(0.01..1.0f64, 1..50),
    ) {
        let mut leg = GearLeg::new("nose", timings.deploy_time_s, timings.retract_time_s);
        leg.command(Direction::Down, &AllowList::from_states([GearState::UpLocked])).unwrap();

        let mut elapsed = 0.0;
        for dt in slices {
            elapsed += dt;
            let completed = leg.tick(dt);
            if elapsed >= timings.deploy_time_s {
                prop_assert_eq!(completed, Some(GearState::DownLocked));
                break;
            }
            prop_assert_eq!(completed, None);
            prop_assert_eq!(leg.state(), GearState::TransitioningDown);
        }
    }

    #[test]
    fn controller_legs_in_lockstep_stay_in_lockstep(
        timings in timings(),
        steps in prop::collection::vec(arbitrary_step(), 0..40),
    ) {
        let mut controller = GearController::new(
            ["nose", "left", "right"],
            timings,
            InterlockPolicy::default(),
            Vec::<GearEvent>::new(),
        )
        .unwrap();

        for step in steps {
            match step {
                Step::Command(d) => {
                    let reports = controller.command_all(d);
                    prop_assert_eq!(reports.len(), 3);
                    prop_assert!(reports.iter().all(|r| r.accepted == reports[0].accepted));
                }
                Step::Tick(dt) => {
                    let changed = controller.tick(dt);
                    prop_assert!(changed.is_empty() || changed.len() == 3);
                }
            }
            let first = controller.legs()[0].state();
            prop_assert!(controller.all_in(first));
        }
    }
}
