use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use kea_form_core::AddressFamily;

#[derive(Parser, Debug)]
#[command(name = "kea-form")]
#[command(about = "Load, validate and submit Kea subnets served by several daemons")]
pub struct Cli {
    /// Optional settings TOML file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Raise log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Build an editable form from a subnet JSON file.
    Load(LoadArgs),
    /// Turn an edited form back into a subnet.
    Submit(SubmitArgs),
    /// Report invalid values in an edited form.
    Validate(ValidateArgs),
    /// Print an empty form for a new subnet or pool.
    Defaults(DefaultsArgs),
    /// Check that a subnet survives load and submit without changes.
    Roundtrip(RoundtripArgs),
}

#[derive(Parser, Debug)]
pub struct LoadArgs {
    /// Subnet JSON file with one local subnet per daemon.
    pub file: PathBuf,
    /// Address family; inferred from the subnet prefix when omitted.
    #[arg(long, value_enum)]
    pub family: Option<FamilyArg>,
    /// Emit single-line JSON.
    #[arg(long)]
    pub compact: bool,
}

#[derive(Parser, Debug)]
pub struct SubmitArgs {
    /// Edited form JSON file.
    pub file: PathBuf,
    /// Original subnet JSON; prints the changes instead of the subnet.
    #[arg(long)]
    pub against: Option<PathBuf>,
    /// Refuse forms with validation issues.
    #[arg(long)]
    pub strict: bool,
    /// Write the subnet JSON to this file instead of stdout.
    #[arg(long, conflicts_with = "against")]
    pub output: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Emit single-line JSON.
    #[arg(long)]
    pub compact: bool,
}

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Edited form JSON file.
    pub file: PathBuf,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct DefaultsArgs {
    #[arg(long, value_enum)]
    pub family: Option<FamilyArg>,
    /// Print a default pool entry instead of the subnet parameters.
    #[arg(long, value_enum)]
    pub pool: Option<PoolKind>,
    /// Emit single-line JSON.
    #[arg(long)]
    pub compact: bool,
}

#[derive(Parser, Debug)]
pub struct RoundtripArgs {
    /// Subnet JSON file with one local subnet per daemon.
    pub file: PathBuf,
    #[arg(long, value_enum)]
    pub family: Option<FamilyArg>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum FamilyArg {
    Ipv4,
    Ipv6,
}

impl From<FamilyArg> for AddressFamily {
    fn from(arg: FamilyArg) -> Self {
        match arg {
            FamilyArg::Ipv4 => AddressFamily::Ipv4,
            FamilyArg::Ipv6 => AddressFamily::Ipv6,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum PoolKind {
    Address,
    Prefix,
}
