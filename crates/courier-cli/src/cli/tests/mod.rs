//! CLI parse tests.

use clap::Parser;

use super::{Cli, CliCommand};


/// Parses an argv slice, panicking on parse failure.
fn parse(args: &[&str]) -> CliCommand {
    Cli::try_parse_from(args).expect("argv should parse").command
}
