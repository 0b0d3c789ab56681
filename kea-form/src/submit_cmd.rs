use std::fs;

use anyhow::{bail, Context, Result};
use kea_form::config::Settings;
use kea_form::report::{render_issues, render_summary, render_text};
use kea_form_core::{
    convert_form_to_subnet, diff_subnets, format_json, validate_subnet_form, Subnet, SubnetEntry,
};
use tracing::warn;

use crate::cli::{OutputFormat, SubmitArgs};
use crate::input::{read_json, to_json};

pub fn run_submit(args: SubmitArgs, settings: &Settings) -> Result<()> {
    let entry: SubnetEntry = read_json(&args.file)?;

    let issues = validate_subnet_form(&entry);
    if !issues.is_empty() {
        if args.strict || settings.strict {
            eprintln!("{}", render_issues(&issues));
            bail!(
                "submit refused in strict mode: {} validation issues",
                issues.len()
            );
        }
        warn!(
            issues = issues.len(),
            "submitting form with validation issues"
        );
    }

    let subnet = convert_form_to_subnet(&entry)
        .with_context(|| format!("failed to convert form {}", args.file.display()))?;

    if let Some(original_path) = &args.against {
        let original: Subnet = read_json(original_path)?;
        let entries = diff_subnets(&original, &subnet, &settings.diff_options());
        match args.format {
            OutputFormat::Text => {
                if !entries.is_empty() {
                    println!("{}", render_text(&entries));
                }
                println!("{}", render_summary(&entries));
            }
            OutputFormat::Json => println!("{}", format_json(&entries)?),
        }
        return Ok(());
    }

    let out = to_json(&subnet, settings.pretty && !args.compact)?;
    match &args.output {
        Some(path) => fs::write(path, out)
            .with_context(|| format!("failed to write subnet file {}", path.display()))?,
        None => println!("{out}"),
    }
    Ok(())
}
