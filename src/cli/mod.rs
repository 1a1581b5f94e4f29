//! Command-line interface for Berth.

pub mod args;

pub use args::Cli;
