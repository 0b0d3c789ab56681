//! Whole-form validation report.
//!
//! Checks never fail the conversion. They collect every invalid slot so a
//! caller can show them next to the offending fields or refuse to submit.
//! Slots are checked against the registry, never against the spec a form
//! happens to carry.

use serde::{Deserialize, Serialize};

use crate::pools::{AddressRange, PoolParametersForm, PrefixFields};
use crate::registry::{pool_spec_for, spec_for, AddressFamily, ParameterSpec};
use crate::shared::SharedParameter;
use crate::subnet::SubnetEntry;
use crate::syntax::{is_address_of_family, is_ipv6_prefix};

/// One invalid value in a subnet form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Location within the form, e.g. `pools[0].parameters.poolID`.
    pub path: String,
    /// Daemon slot of a shared parameter; `None` for single-valued fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot: Option<usize>,
    pub message: String,
}

fn unit_issues(
    path: String,
    unit: &SharedParameter,
    spec: ParameterSpec,
    out: &mut Vec<ValidationIssue>,
) {
    let unit = unit.with_spec(spec);
    for slot in unit.invalid_slots() {
        out.push(ValidationIssue {
            path: path.clone(),
            slot: Some(slot),
            message: unit.invalid_message(slot),
        });
    }
}

fn pool_parameter_issues(prefix: &str, form: &PoolParametersForm, out: &mut Vec<ValidationIssue>) {
    for (name, unit) in form.units() {
        if let Some(spec) = pool_spec_for(name) {
            unit_issues(format!("{prefix}.parameters.{name}"), unit, spec, out);
        }
    }
}

fn field_issue(path: String, message: &str) -> ValidationIssue {
    ValidationIssue {
        path,
        slot: None,
        message: message.to_string(),
    }
}

fn range_issues(
    prefix: &str,
    range: &AddressRange,
    family: AddressFamily,
    out: &mut Vec<ValidationIssue>,
) {
    let message = match family {
        AddressFamily::Ipv4 => "Please specify a valid IPv4 address.",
        AddressFamily::Ipv6 => "Please specify a valid IPv6 address.",
    };
    for (field, value) in [("start", &range.start), ("end", &range.end)] {
        if !is_address_of_family(value, family.is_ipv6()) {
            out.push(field_issue(format!("{prefix}.range.{field}"), message));
        }
    }
}

fn prefix_issues(prefix: &str, fields: &PrefixFields, out: &mut Vec<ValidationIssue>) {
    if !is_ipv6_prefix(&fields.prefix) {
        out.push(field_issue(
            format!("{prefix}.prefixes.prefix"),
            "Please specify a valid IPv6 prefix.",
        ));
    }
    match fields.delegated_length {
        None => out.push(field_issue(
            format!("{prefix}.prefixes.delegatedLength"),
            "Please specify a delegated prefix length.",
        )),
        Some(length) if !(1..=128).contains(&length) => out.push(field_issue(
            format!("{prefix}.prefixes.delegatedLength"),
            "Delegated prefix length must be between 1 and 128.",
        )),
        Some(_) => {}
    }
    if !fields.excluded_prefix.is_empty() && !is_ipv6_prefix(&fields.excluded_prefix) {
        out.push(field_issue(
            format!("{prefix}.prefixes.excludedPrefix"),
            "Please specify a valid IPv6 prefix.",
        ));
    }
}

/// Collect every invalid value of the form.
pub fn validate_subnet_form(entry: &SubnetEntry) -> Vec<ValidationIssue> {
    let mut out = Vec::new();
    for (name, unit) in &entry.parameters {
        let path = format!("parameters.{name}");
        match spec_for(name, entry.family) {
            Some(spec) => unit_issues(path, unit, spec, &mut out),
            None => out.push(field_issue(
                path,
                &format!("Parameter does not apply to {} subnets.", entry.family),
            )),
        }
    }
    for (index, pool) in entry.pools.iter().enumerate() {
        let prefix = format!("pools[{index}]");
        range_issues(&prefix, &pool.range, entry.family, &mut out);
        pool_parameter_issues(&prefix, &pool.parameters, &mut out);
    }
    for (index, pool) in entry.prefix_pools.iter().enumerate() {
        let prefix = format!("prefixPools[{index}]");
        prefix_issues(&prefix, &pool.prefixes, &mut out);
        pool_parameter_issues(&prefix, &pool.parameters, &mut out);
    }
    out
}
