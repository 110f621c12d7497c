use crate::command::{CommandFactory, ExecutableCommand, ExitCode};
use crate::interpreter::Factory;
use crate::lot::{Car, LeaveOutcome, Lot};
use anyhow::Result;
use argh::{EarlyExit, FromArgs};
use std::io::Write;

/// Built-in commands known to the interpreter at compile time.
///
/// Builtins are parsed using the [`argh`] crate (`FromArgs`) and executed
/// directly in-process against the lot state.
pub(crate) trait BuiltinCommand: Sized + FromArgs {
    /// Canonical name of the command, e.g. "park" or "exit".
    fn name() -> &'static str;

    /// Executes the command using the provided output stream and lot state.
    ///
    /// Return value should follow shell conventions: 0 for success, non-zero for error.
    fn execute(self, stdout: &mut dyn Write, lot: &mut Lot) -> Result<ExitCode>;
}

impl<T: BuiltinCommand> ExecutableCommand for T {
    fn execute(self: Box<Self>, stdout: &mut dyn Write, lot: &mut Lot) -> Result<ExitCode> {
        match T::execute(*self, stdout, lot) {
            Ok(x) => Ok(x),
            Err(e) => {
                writeln!(stdout, "{}", e)?;
                Ok(1)
            }
        }
    }
}

/// Replays an argument-parsing diagnostic instead of touching the lot.
struct InvalidArgs {
    output: String,
    is_error: bool,
}

impl ExecutableCommand for InvalidArgs {
    fn execute(self: Box<Self>, stdout: &mut dyn Write, _lot: &mut Lot) -> Result<ExitCode> {
        stdout.write_all(self.output.as_bytes())?;
        // Diagnostics take part in the line-oriented protocol too.
        if !self.output.ends_with('\n') {
            stdout.write_all(b"\n")?;
        }
        Ok(if self.is_error { 1 } else { 0 })
    }
}

impl<T: BuiltinCommand + 'static> CommandFactory for Factory<T> {
    fn try_create(&self, name: &str, args: &[&str]) -> Option<Box<dyn ExecutableCommand>> {
        if name == T::name() {
            Some(match T::from_args(&[name], args) {
                Ok(cmd) => Box::new(cmd),
                Err(EarlyExit { output, status }) => Box::new(InvalidArgs {
                    output,
                    is_error: status.is_err(),
                }),
            })
        } else {
            None
        }
    }
}

#[derive(FromArgs)]
/// Park a car in the lowest-numbered free spot.
pub struct Park {
    #[argh(positional)]
    /// registration number of the car.
    pub number: String,

    #[argh(positional)]
    /// color label of the car.
    pub color: String,
}

impl BuiltinCommand for Park {
    fn name() -> &'static str {
        "park"
    }

    fn execute(self, stdout: &mut dyn Write, lot: &mut Lot) -> Result<ExitCode> {
        let Park { number, color } = self;
        match lot.park(Car::new(number, color.clone())) {
            Some(index) => writeln!(stdout, "{} car parked in spot {}.", color, index + 1)?,
            None => writeln!(stdout, "{}", lot.messages.lot_full)?,
        }
        Ok(0)
    }
}

/// Free the spot addressed by its 1-based number.
///
/// Arguments are parsed by hand rather than through `argh`: a negative spot
/// number must reach the range check and stay a silent no-op, not die in
/// option parsing as an unknown `-N` flag.
pub struct Leave {
    spot: i64,
}

impl CommandFactory for Factory<Leave> {
    fn try_create(&self, name: &str, args: &[&str]) -> Option<Box<dyn ExecutableCommand>> {
        if name != "leave" {
            return None;
        }
        Some(match parse_spot(args) {
            Ok(spot) => Box::new(Leave { spot }),
            Err(output) => Box::new(InvalidArgs {
                output,
                is_error: true,
            }),
        })
    }
}

fn parse_spot(args: &[&str]) -> Result<i64, String> {
    let token = args
        .first()
        .ok_or_else(|| "leave: expected a spot number".to_string())?;
    token
        .parse()
        .map_err(|_| format!("leave: invalid spot number: {}", token))
}

impl ExecutableCommand for Leave {
    fn execute(self: Box<Self>, stdout: &mut dyn Write, lot: &mut Lot) -> Result<ExitCode> {
        match lot.free_spot(self.spot) {
            LeaveOutcome::Freed => writeln!(stdout, "Spot {} is free.", self.spot)?,
            LeaveOutcome::AlreadyFree => {
                writeln!(stdout, "There is no car in spot {}.", self.spot)?
            }
            LeaveOutcome::OutOfRange => {}
        }
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Stop reading commands.
pub struct Exit {}

impl BuiltinCommand for Exit {
    fn name() -> &'static str {
        "exit"
    }

    fn execute(self, _stdout: &mut dyn Write, lot: &mut Lot) -> Result<ExitCode> {
        lot.should_exit = true;
        Ok(0)
    }
}
