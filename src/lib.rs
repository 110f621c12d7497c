//! A tiny, embeddable parking lot command interpreter.
//!
//! This crate provides a minimal set of building blocks for a line-oriented
//! interpreter over a fixed-capacity parking lot: split an input line into an
//! invocation, route it to the command that recognizes it, mutate the lot,
//! print the result. It is intentionally small and easy to read.
//!
//! The main entry point is [`Interpreter`], which executes commands by name
//! against an explicitly constructed [`lot::Lot`]. The public modules
//! [`command`] and [`lot`] expose traits and types for implementing your own
//! commands and for configuring the lot state.

mod builtin;
pub mod command;
mod interpreter;
pub mod lot;
mod parser;

/// Just a convenient re-export of the interactive command runner.
///
/// See [`Interpreter`] for the high-level API and examples.
pub use interpreter::Interpreter;
