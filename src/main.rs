mod checksum_cmd;
mod cli;
mod compare_cmd;
mod config;
mod convert;
mod decode_cmd;
mod logging;
mod merge_cmd;
mod ptemp_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};
use crate::config::WoaConfig;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = WoaConfig::load(cli.config.as_deref())?;
    match cli.command {
        Command::Decode(args) => decode_cmd::run(args, &config),
        Command::Merge(args) => merge_cmd::run(args, &config),
        Command::Compare(args) => compare_cmd::run(args),
        Command::Ptemp(args) => ptemp_cmd::run(args, &config),
        Command::Checksum(args) => checksum_cmd::run(args),
    }
}
