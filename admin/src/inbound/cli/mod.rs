//! Console adapter: parses arguments, drives the form and grid, and renders
//! plain-text output.

mod args;
mod commands;
pub mod render;

pub use args::{Cli, Command, DEFAULT_DEMO_COUNT, DEFAULT_DEMO_SEED, UserFieldArgs};
pub use commands::{CommandStatus, ConsoleContext, ConsoleError};

#[cfg(test)]
mod tests;
