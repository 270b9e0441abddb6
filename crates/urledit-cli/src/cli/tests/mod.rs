//! CLI tests: flag parsing in one file, driver behavior in another.

use super::{run, Cli};
use clap::Parser;
use urledit_core::error::Error;

pub(super) fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

/// Run the driver for `args`, capturing stdout.
pub(super) fn run_to_string(args: &[&str]) -> Result<String, Error> {
    let cli = parse(args);
    let mut buf: Vec<u8> = Vec::new();
    run(cli, &mut buf)?;
    Ok(String::from_utf8(buf).expect("output is UTF-8"))
}

mod flags;
