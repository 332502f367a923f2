// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Teamspeak log aggregator (`ts-log-aggregator`)
//!
//! Ingests a directory of per-server-run log files, reconstructs
//! connected-time totals per client across overlapping connections and
//! across server restarts, and prints a ranked report.
//!
//! Pipeline: [`fileenum::scan_dir`] orders the files by their embedded
//! creation time, [`driver::run`] walks them in order feeding
//! [`line::parse_line`] output into a [`client::ClientTable`], and
//! [`report::render`] sorts and formats the result.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod client;
mod driver;
mod error;
mod fileenum;
mod line;
mod report;
mod timeparse;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use crate::error::AggregatorError;

/// Reconstruct per-client connected time from a directory of Teamspeak
/// server logs and print a ranked report.
///
/// `-h` is reserved for `--highest`, so `--help` is the only spelling of
/// the help flag.
#[derive(Parser, Debug)]
#[command(name = "ts-log-aggregator", disable_help_flag = true)]
struct Cli {
    /// Only consider events on or after this date.
    #[arg(short = 'd', value_name = "MM-DD-YYYY")]
    date_floor: Option<String>,

    /// Print totals as raw seconds instead of `<D>d <H>h <M>m <S>s`.
    #[arg(short = 's')]
    seconds: bool,

    /// Print only the N lowest totals.
    #[arg(short = 't', value_name = "N", conflicts_with = "highest")]
    lowest: Option<usize>,

    /// Print only the N highest totals, highest first.
    #[arg(short = 'h', value_name = "N", conflicts_with = "lowest")]
    highest: Option<usize>,

    #[arg(long = "help", action = clap::ArgAction::Help)]
    help: Option<bool>,

    /// Directory containing `ts3server_*_1.log` files.
    directory: PathBuf,
}

fn main() -> ExitCode {
    common::init_stderr();
    let cli = Cli::parse();

    match run(cli) {
        Ok(report) => {
            print!("{report}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<String, AggregatorError> {
    if !cli.directory.is_dir() {
        return Err(AggregatorError::MissingDirectory(cli.directory));
    }

    let floor = cli
        .date_floor
        .as_deref()
        .map(|raw| {
            timeparse::parse_date_floor(raw).ok_or_else(|| AggregatorError::BadDateConstraint(raw.to_string()))
        })
        .transpose()?;

    let files = fileenum::scan_dir(&cli.directory)
        .map_err(|source| AggregatorError::ReadDir { path: cli.directory.clone(), source })?;

    let table = driver::run(&files, floor)?;

    let mode = match (cli.lowest, cli.highest) {
        (Some(n), _) => report::Mode::Lowest(n),
        (_, Some(n)) => report::Mode::Highest(n),
        (None, None) => report::Mode::All,
    };

    Ok(report::render(table.into_clients(), mode, cli.seconds))
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
