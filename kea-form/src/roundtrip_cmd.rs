use anyhow::{bail, Context, Result};
use kea_form::config::Settings;
use kea_form::report::render_roundtrip;
use kea_form_core::{convert_form_to_subnet, convert_subnet_to_form, diff_subnets, Subnet};
use serde_json::json;

use crate::cli::{OutputFormat, RoundtripArgs};
use crate::input::{read_json, resolve_family};

pub fn run_roundtrip(args: RoundtripArgs, settings: &Settings) -> Result<()> {
    let subnet: Subnet = read_json(&args.file)?;
    let family = resolve_family(args.family, settings, &subnet);

    let entry = convert_subnet_to_form(family, &subnet);
    let back = convert_form_to_subnet(&entry)
        .with_context(|| format!("failed to rebuild subnet from {}", args.file.display()))?;
    let entries = diff_subnets(&subnet, &back, &settings.diff_options());
    let changes = entries.iter().filter(|entry| entry.is_change()).count();

    match args.format {
        OutputFormat::Text => println!("{}", render_roundtrip(&subnet.subnet, &entries)),
        OutputFormat::Json => {
            let report = json!({
                "subnet": subnet.subnet,
                "lossless": changes == 0,
                "entries": entries,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    if changes > 0 {
        bail!("round trip is not lossless: {changes} differences");
    }
    Ok(())
}
