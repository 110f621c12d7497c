use crate::command::{CommandFactory, ExitCode};
use crate::lot::{Lot, LotConfig};
use crate::parser::{self, ParsedLine};
use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::Write;

/// Factory allows creating instances of ExecutableCommand.
///
/// Only supports commands defined in this crate — the builtins and `leave`.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

/// A minimal line-oriented interpreter over a fixed-capacity parking lot.
///
/// The interpreter owns a [`Lot`] and a list of [`CommandFactory`] objects
/// that are queried to create commands by name. Command names nobody
/// recognizes are silent no-ops; blank lines are skipped.
///
/// Example
/// ```
/// use parking_commands::Interpreter;
/// use parking_commands::lot::LotConfig;
/// let mut interp = Interpreter::new(LotConfig::default()).unwrap();
/// let code = interp.run("park", &["AA1111", "red"]).unwrap();
/// assert_eq!(code, 0);
/// ```
pub struct Interpreter {
    lot: Lot,
    commands: Vec<Box<dyn CommandFactory>>,
}

impl Interpreter {
    /// Create an interpreter with the default commands: `park`, `leave`, `exit`.
    pub fn new(config: LotConfig) -> Result<Self> {
        use crate::builtin::{Exit, Leave, Park};
        Self::with_commands(
            config,
            vec![
                Box::new(Factory::<Park>::default()),
                Box::new(Factory::<Leave>::default()),
                Box::new(Factory::<Exit>::default()),
            ],
        )
    }

    /// Create an interpreter with a custom set of command factories.
    pub fn with_commands(
        config: LotConfig,
        commands: Vec<Box<dyn CommandFactory>>,
    ) -> Result<Self> {
        Ok(Self {
            lot: Lot::new(config)?,
            commands,
        })
    }

    /// Read access to the lot, mostly for inspecting state after a script.
    pub fn lot(&self) -> &Lot {
        &self.lot
    }

    /// Run a single command invocation by name with arguments.
    ///
    /// Messages go to the process stdout. Returns the command's exit code.
    pub fn run(&mut self, name: &str, args: &[&str]) -> Result<ExitCode> {
        self.run_to(name, args, &mut std::io::stdout())
    }

    /// Like [`Interpreter::run`], but writing messages to the given stream.
    pub fn run_to(
        &mut self,
        name: &str,
        args: &[&str],
        stdout: &mut dyn Write,
    ) -> Result<ExitCode> {
        for factory in &self.commands {
            if let Some(cmd) = factory.try_create(name, args) {
                return cmd.execute(stdout, &mut self.lot);
            }
        }
        // Unrecognized command names are not an error in this protocol.
        Ok(0)
    }

    /// Parse one raw input line and dispatch it.
    pub fn eval_line(&mut self, line: &str, stdout: &mut dyn Write) -> Result<ExitCode> {
        match parser::split_line(line) {
            ParsedLine::Empty => Ok(0),
            ParsedLine::Invocation { name, args } => self.run_to(name, &args, stdout),
        }
    }

    /// Read-Eval-Print Loop: one command per line until `exit` or end of input.
    pub fn repl(&mut self) -> Result<()> {
        let mut rl = DefaultEditor::new()?;

        loop {
            match rl.readline("") {
                Ok(line) => {
                    rl.add_history_entry(line.as_str())?;
                    self.eval_line(&line, &mut std::io::stdout())?;
                    if self.lot.should_exit {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(err) => return Err(err.into()),
            }
        }

        Ok(())
    }

    /// Read exactly one line and dispatch it.
    ///
    /// Fails when the input stream ends before a line is available.
    pub fn run_once(&mut self) -> Result<()> {
        let mut rl = DefaultEditor::new()?;
        match rl.readline("") {
            Ok(line) => {
                self.eval_line(&line, &mut std::io::stdout())?;
                Ok(())
            }
            Err(ReadlineError::Eof) => Err(anyhow::anyhow!(
                "no command line available on standard input"
            )),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod script_tests {
    use super::*;
    use crate::lot::{Car, Messages};

    fn eval(interp: &mut Interpreter, line: &str) -> String {
        let mut out = Vec::new();
        interp.eval_line(line, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_park_leave_leave_round() {
        let mut interp = Interpreter::new(LotConfig::default()).unwrap();

        assert_eq!(eval(&mut interp, "park AA1111 red"), "red car parked in spot 1.\n");
        assert_eq!(eval(&mut interp, "leave 1"), "Spot 1 is free.\n");
        assert_eq!(eval(&mut interp, "leave 1"), "There is no car in spot 1.\n");
    }

    #[test]
    fn test_fills_every_spot_in_ascending_order() {
        let mut interp = Interpreter::new(LotConfig {
            capacity: 3,
            ..LotConfig::default()
        })
        .unwrap();

        for spot in 1..=3 {
            let line = format!("park N{} grey", spot);
            assert_eq!(
                eval(&mut interp, &line),
                format!("grey car parked in spot {}.\n", spot)
            );
        }
        assert_eq!(
            eval(&mut interp, "park N4 grey"),
            "Sorry, the parking lot is full.\n"
        );
    }

    #[test]
    fn test_seeded_two_spot_lot_with_custom_full_message() {
        let mut interp = Interpreter::new(LotConfig {
            capacity: 2,
            seed: vec![Car::new("1", "1")],
            messages: Messages {
                lot_full: "No empty places".to_string(),
            },
        })
        .unwrap();

        assert_eq!(
            eval(&mut interp, "park BB2222 blue"),
            "blue car parked in spot 2.\n"
        );
        assert_eq!(eval(&mut interp, "park CC3333 green"), "No empty places\n");
    }

    #[test]
    fn test_unknown_commands_and_blank_lines_are_silent() {
        let mut interp = Interpreter::new(LotConfig::default()).unwrap();

        assert_eq!(eval(&mut interp, ""), "");
        assert_eq!(eval(&mut interp, "   "), "");
        assert_eq!(eval(&mut interp, "status"), "");
        assert_eq!(eval(&mut interp, "PARK AA1111 red"), "");
    }

    #[test]
    fn test_exit_line_requests_loop_termination_silently() {
        let mut interp = Interpreter::new(LotConfig::default()).unwrap();

        assert_eq!(eval(&mut interp, "exit"), "");
        assert!(interp.lot().should_exit);
    }

    #[test]
    fn test_malformed_leave_reports_and_the_session_continues() {
        let mut interp = Interpreter::new(LotConfig::default()).unwrap();
        eval(&mut interp, "park AA1111 red");

        let mut out = Vec::new();
        let code = interp.eval_line("leave first", &mut out).unwrap();
        assert_eq!(code, 1);
        assert!(String::from_utf8(out).unwrap().starts_with("leave:"));

        // The lot survived the bad line.
        assert_eq!(eval(&mut interp, "leave 1"), "Spot 1 is free.\n");
    }

    #[test]
    fn test_leave_out_of_range_prints_nothing() {
        let mut interp = Interpreter::new(LotConfig {
            capacity: 2,
            ..LotConfig::default()
        })
        .unwrap();
        eval(&mut interp, "park AA1111 red");

        assert_eq!(eval(&mut interp, "leave 0"), "");
        assert_eq!(eval(&mut interp, "leave 3"), "");
        assert_eq!(eval(&mut interp, "leave -1"), "");
        assert_eq!(interp.lot().car_at(0).unwrap().number, "AA1111");
    }
}
