//! Interactive cockpit loop.
//!
//! Reads one command per line, applies it, then advances simulated time by
//! a fixed step. `d` commands the gear down, `u` up, `q` quits; any other
//! line (including an empty one) only advances time.

use crate::controller::{EventSink, GearController};
use crate::core::{Direction, GearLeg, GearState};
use std::io::{self, BufRead, Write};

/// Default simulated seconds per input line.
pub const DEFAULT_STEP_S: f64 = 0.5;

/// Why the cockpit loop stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Exit {
    /// The pilot typed `q`
    Quit,
    /// Input ran out or was interrupted
    EndOfInput,
}

/// What one input line asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    Command(Direction),
    Quit,
    Advance,
}

impl Input {
    pub fn parse(line: &str) -> Self {
        match line.trim().to_ascii_lowercase().as_str() {
            "q" => Self::Quit,
            other => other
                .parse::<Direction>()
                .map(Self::Command)
                .unwrap_or(Self::Advance),
        }
    }
}

fn indicator(leg: &GearLeg) -> &'static str {
    match leg.state() {
        GearState::DownLocked => "[G]",
        GearState::UpLocked => "[ ]",
        GearState::TransitioningDown | GearState::TransitioningUp => "[!]",
    }
}

/// One-line summary of every leg, e.g. `NOSE: [G] DOWN_LOCKED | LEFT: ...`.
pub fn status_line<K: EventSink>(controller: &GearController<K>) -> String {
    controller
        .legs()
        .iter()
        .map(|leg| {
            format!(
                "{}: {} {}",
                leg.name().to_uppercase(),
                indicator(leg),
                leg.state()
            )
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Run the cockpit until `q` or end of input.
pub fn run<K, R, W>(
    controller: &mut GearController<K>,
    input: R,
    mut output: W,
    step_s: f64,
) -> io::Result<Exit>
where
    K: EventSink,
    R: BufRead,
    W: Write,
{
    writeln!(output, "\n--- LANDING GEAR COCKPIT ---")?;
    writeln!(output, "Commands: [d]own, [u]p, [q]uit")?;
    writeln!(output, "Press [Enter] to advance time ({step_s}s step)\n")?;

    let mut lines = input.lines();
    loop {
        writeln!(output, "{}", status_line(controller))?;
        write!(output, "CMD > ")?;
        output.flush()?;

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(err)) if err.kind() == io::ErrorKind::Interrupted => {
                writeln!(output)?;
                return Ok(Exit::EndOfInput);
            }
            Some(Err(err)) => return Err(err),
            None => {
                writeln!(output)?;
                return Ok(Exit::EndOfInput);
            }
        };

        match Input::parse(&line) {
            Input::Quit => {
                writeln!(output, "Exiting cockpit.")?;
                return Ok(Exit::Quit);
            }
            Input::Command(direction) => {
                writeln!(output, ">> COMMAND: GEAR {direction}")?;
                let rejected = controller
                    .command_all(direction)
                    .into_iter()
                    .filter(|report| !report.accepted)
                    .count();
                if rejected > 0 {
                    tracing::debug!(%direction, rejected, "command not accepted by every leg");
                }
            }
            Input::Advance => {}
        }

        controller.tick(step_s);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Timings};
    use crate::controller::{GearEvent, NullSink};
    use crate::interlock::InterlockPolicy;
    use std::io::Cursor;

    fn one_second() -> GearController<Vec<GearEvent>> {
        GearController::new(
            ["nose", "left", "right"],
            Timings {
                deploy_time_s: 1.0,
                retract_time_s: 1.0,
            },
            InterlockPolicy::default(),
            Vec::new(),
        )
        .unwrap()
    }

    fn script(controller: &mut GearController<Vec<GearEvent>>, text: &str) -> (Exit, String) {
        let mut out = Vec::new();
        let exit = run(controller, Cursor::new(text), &mut out, DEFAULT_STEP_S).unwrap();
        (exit, String::from_utf8(out).unwrap())
    }

    #[test]
    fn input_parses_commands() {
        assert_eq!(Input::parse("d"), Input::Command(Direction::Down));
        assert_eq!(Input::parse(" U "), Input::Command(Direction::Up));
        assert_eq!(Input::parse("Q"), Input::Quit);
        assert_eq!(Input::parse(""), Input::Advance);
        assert_eq!(Input::parse("x"), Input::Advance);
    }

    #[test]
    fn status_line_shows_indicators() {
        let mut controller =
            GearController::from_config(&Config::default(), NullSink).unwrap();
        assert_eq!(
            status_line(&controller),
            "NOSE: [ ] UP_LOCKED | LEFT: [ ] UP_LOCKED | RIGHT: [ ] UP_LOCKED"
        );

        controller.command_all(Direction::Down);
        assert!(status_line(&controller).starts_with("NOSE: [!] TRANSITIONING_DOWN"));

        controller.tick(2.5);
        assert!(status_line(&controller).ends_with("RIGHT: [G] DOWN_LOCKED"));
    }

    #[test]
    fn scripted_deploy_and_quit() {
        let mut controller = one_second();

        let (exit, out) = script(&mut controller, "d\n\nq\n");

        assert_eq!(exit, Exit::Quit);
        assert!(controller.all_in(GearState::DownLocked));
        assert_eq!(controller.elapsed_s(), 1.0);
        assert!(out.contains(">> COMMAND: GEAR DOWN"));
        assert!(out.contains("NOSE: [!] TRANSITIONING_DOWN"));
        assert!(out.contains("NOSE: [G] DOWN_LOCKED"));
        assert!(out.ends_with("Exiting cockpit.\n"));
    }

    #[test]
    fn end_of_input_stops_the_loop() {
        let mut controller = one_second();

        let (exit, _) = script(&mut controller, "d\nu\n");

        assert_eq!(exit, Exit::EndOfInput);
        // UP arrived mid-transition and was rejected; the deploy still finished.
        assert!(controller.all_in(GearState::DownLocked));
        let events = controller.into_sink();
        assert_eq!(events.len(), 9);
    }

    #[test]
    fn full_cycle_returns_up() {
        let mut controller = one_second();

        script(&mut controller, "d\n\nu\n\nq\n");

        assert!(controller.all_in(GearState::UpLocked));
        assert_eq!(controller.history("nose").unwrap().len(), 4);
    }
}
