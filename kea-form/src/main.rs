use anyhow::Result;
use clap::Parser;
use kea_form::config::{default_settings, load_settings};
use tracing_subscriber::EnvFilter;

mod cli;
mod defaults_cmd;
mod input;
mod load_cmd;
mod roundtrip_cmd;
mod submit_cmd;
mod validate_cmd;

use cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = match &cli.config {
        Some(path) => load_settings(path)?,
        None => default_settings(),
    };

    match cli.command {
        Command::Load(args) => load_cmd::run_load(args, &settings),
        Command::Submit(args) => submit_cmd::run_submit(args, &settings),
        Command::Validate(args) => validate_cmd::run_validate(args),
        Command::Defaults(args) => defaults_cmd::run_defaults(args, &settings),
        Command::Roundtrip(args) => roundtrip_cmd::run_roundtrip(args, &settings),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
