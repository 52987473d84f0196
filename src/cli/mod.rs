//! Command line interface

pub mod args;
pub mod commands;

pub use args::{normalize_args, BuildArgs, Cli, Commands, DetectArgs};
