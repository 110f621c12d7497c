use crate::lot::Lot;
use anyhow::Result;
use std::io::Write;

/// Conventional exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
/// This mirrors the convention used by POSIX shells and many command-line tools.
pub type ExitCode = i32;

/// Object-safe trait for any command that can be executed by the interpreter.
///
/// This is implemented by built-ins via a blanket impl and by commands with
/// hand-rolled argument handling.
pub trait ExecutableCommand {
    /// Executes the command against the lot, writing its messages to `stdout`.
    fn execute(self: Box<Self>, stdout: &mut dyn Write, lot: &mut Lot) -> Result<ExitCode>;
}

/// Factory that tries to create a command from a name and its arguments.
///
/// Returns `None` when the factory doesn't recognize the `name`. Argument
/// validation happens here: a factory that recognizes the name but not the
/// arguments still returns a command — one that reports the problem when run.
pub trait CommandFactory {
    /// Attempt to create a command instance for the provided name and arguments.
    fn try_create(&self, name: &str, args: &[&str]) -> Option<Box<dyn ExecutableCommand>>;
}
