use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use kea_form_core::{AddressFamily, Subnet};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::cli::FamilyArg;
use kea_form::config::Settings;

/// Read and parse a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

/// Serialize for stdout or an output file.
pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(out)
}

/// Family from the flag, then the settings file, then the subnet prefix.
pub fn resolve_family(
    arg: Option<FamilyArg>,
    settings: &Settings,
    subnet: &Subnet,
) -> AddressFamily {
    if let Some(arg) = arg {
        return arg.into();
    }
    if let Some(family) = settings.family {
        return family;
    }
    let family = if subnet.subnet.contains(':') {
        AddressFamily::Ipv6
    } else {
        AddressFamily::Ipv4
    };
    debug!(subnet = %subnet.subnet, ?family, "inferred address family");
    family
}
