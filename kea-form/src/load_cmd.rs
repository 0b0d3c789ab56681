use anyhow::Result;
use kea_form::config::Settings;
use kea_form_core::{convert_subnet_to_form, Subnet};

use crate::cli::LoadArgs;
use crate::input::{read_json, resolve_family, to_json};

pub fn run_load(args: LoadArgs, settings: &Settings) -> Result<()> {
    let subnet: Subnet = read_json(&args.file)?;
    let family = resolve_family(args.family, settings, &subnet);
    let entry = convert_subnet_to_form(family, &subnet);
    println!("{}", to_json(&entry, settings.pretty && !args.compact)?);
    Ok(())
}
