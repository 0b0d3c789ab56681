use anyhow::{bail, Result};
use kea_form::report::render_issues;
use kea_form_core::{validate_subnet_form, SubnetEntry};

use crate::cli::{OutputFormat, ValidateArgs};
use crate::input::read_json;

pub fn run_validate(args: ValidateArgs) -> Result<()> {
    let entry: SubnetEntry = read_json(&args.file)?;
    let issues = validate_subnet_form(&entry);

    match args.format {
        OutputFormat::Text => println!("{}", render_issues(&issues)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&issues)?),
    }

    if !issues.is_empty() {
        bail!("validation failed: {} issues", issues.len());
    }
    Ok(())
}
