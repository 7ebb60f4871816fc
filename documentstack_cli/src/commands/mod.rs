//! CLI subcommand implementations.

pub mod generate;
