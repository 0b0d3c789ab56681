//! Subnet-level conversion between the per-daemon domain view and the form.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::FormError;
use crate::model::{DaemonId, KeaConfigSubnetParameters, LocalSubnet, Subnet, SubnetParameters};
use crate::options::OptionsSet;
use crate::pools::{
    address_pools_from_views, convert_form_to_address_pools, convert_form_to_prefix_pools,
    prefix_pools_from_views, PoolEntry, PrefixPoolEntry,
};
use crate::registry::{spec_for, subnet_parameter_specs, AddressFamily};
use crate::shared::SharedParameter;
use crate::value::ParameterBlock;

/// Subnet-level parameter units keyed by wire name.
pub type SubnetParametersForm = BTreeMap<String, SharedParameter>;

/// Editable state of a subnet across the daemons that serve it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubnetEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub subnet: String,
    pub family: AddressFamily,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_network_id: Option<i64>,
    #[serde(default)]
    pub pools: Vec<PoolEntry>,
    /// Always empty for IPv4 subnets.
    #[serde(default)]
    pub prefix_pools: Vec<PrefixPoolEntry>,
    pub parameters: SubnetParametersForm,
    pub options: OptionsSet,
    /// Daemons receiving the subnet; slot `i` of every subnet-level unit
    /// belongs to `selected_daemons[i]`.
    pub selected_daemons: Vec<DaemonId>,
}

/// Local subnets with one view per daemon, keeping the first one seen.
fn distinct_views(subnet: &Subnet) -> Vec<&LocalSubnet> {
    let mut views: Vec<&LocalSubnet> = Vec::with_capacity(subnet.local_subnets.len());
    for view in &subnet.local_subnets {
        if views.iter().any(|seen| seen.daemon_id == view.daemon_id) {
            warn!(
                subnet = %subnet.subnet,
                daemon = view.daemon_id,
                "ignoring repeated local subnet for daemon"
            );
            continue;
        }
        views.push(view);
    }
    views
}

fn in_selection(scope: &[DaemonId], selected: &[DaemonId]) -> bool {
    scope.iter().all(|daemon| selected.contains(daemon))
}

/// Build the editable form of a subnet.
pub fn convert_subnet_to_form(family: AddressFamily, subnet: &Subnet) -> SubnetEntry {
    let views = distinct_views(subnet);
    let selected_daemons: Vec<DaemonId> = views.iter().map(|view| view.daemon_id).collect();
    let blocks: Vec<Option<&SubnetParameters>> = views
        .iter()
        .map(|view| view.subnet_level_parameters())
        .collect();

    let parameters = convert_kea_subnet_parameters_to_form(family, &blocks);
    let options = OptionsSet::from_per_daemon_options(
        blocks
            .iter()
            .map(|block| block.map(|b| b.options.clone()).unwrap_or_default())
            .collect(),
        &blocks
            .iter()
            .map(|block| block.and_then(|b| b.options_hash.clone()))
            .collect::<Vec<_>>(),
    );

    let mut pools = address_pools_from_views(views.iter().copied());
    pools.retain(|entry| {
        let keep = in_selection(&entry.daemons_in_scope, &selected_daemons);
        if !keep {
            warn!(
                pool = %entry.range.to_pool_string(),
                "dropping pool served by unselected daemon"
            );
        }
        keep
    });
    let mut prefix_pools = if family.is_ipv6() {
        prefix_pools_from_views(views.iter().copied())
    } else {
        Vec::new()
    };
    prefix_pools.retain(|entry| {
        let keep = in_selection(&entry.daemons_in_scope, &selected_daemons);
        if !keep {
            warn!(
                prefix = %entry.prefixes.prefix,
                "dropping prefix pool served by unselected daemon"
            );
        }
        keep
    });

    debug!(
        subnet = %subnet.subnet,
        daemons = selected_daemons.len(),
        pools = pools.len(),
        prefix_pools = prefix_pools.len(),
        "converted subnet to form"
    );

    SubnetEntry {
        id: subnet.id,
        subnet: subnet.subnet.clone(),
        family,
        shared_network_id: subnet.shared_network_id,
        pools,
        prefix_pools,
        parameters,
        options,
        selected_daemons,
    }
}

/// Subnet-level units from per-daemon parameter blocks; a missing block
/// contributes default values.
pub fn convert_kea_subnet_parameters_to_form(
    family: AddressFamily,
    blocks: &[Option<&SubnetParameters>],
) -> SubnetParametersForm {
    subnet_parameter_specs(family)
        .into_iter()
        .map(|(name, spec)| {
            let values = blocks
                .iter()
                .map(|block| block.and_then(|b| b.parameter(name)));
            (
                name.to_string(),
                SharedParameter::from_per_daemon_values(spec, values),
            )
        })
        .collect()
}

/// Per-daemon parameter blocks from subnet-level units.
///
/// One block is produced per slot of the widest unit. A unit with fewer
/// slots leaves the parameter unset in the remaining blocks.
pub fn convert_form_to_kea_subnet_parameters(
    units: &SubnetParametersForm,
) -> Result<Vec<SubnetParameters>, FormError> {
    let count = units
        .values()
        .map(|unit| unit.values.len())
        .max()
        .unwrap_or(0);
    let mut blocks = vec![SubnetParameters::default(); count];
    for (name, unit) in units {
        for (block, value) in blocks.iter_mut().zip(unit.to_per_daemon_values()) {
            block.set_parameter(name, value)?;
        }
    }
    Ok(blocks)
}

fn subnet_block(entry: &SubnetEntry, index: usize) -> Result<SubnetParameters, FormError> {
    let mut block = SubnetParameters::default();
    for (name, unit) in &entry.parameters {
        block.set_parameter(name, unit.value_for(index))?;
    }
    block.options = entry.options.options_for(index);
    Ok(block)
}

fn warn_on_unselected(entry: &SubnetEntry) {
    let scopes = entry
        .pools
        .iter()
        .map(|pool| &pool.daemons_in_scope)
        .chain(entry.prefix_pools.iter().map(|pool| &pool.daemons_in_scope));
    for scope in scopes {
        for daemon in scope {
            if !entry.selected_daemons.contains(daemon) {
                warn!(
                    daemon,
                    subnet = %entry.subnet,
                    "pool references a daemon that is not selected"
                );
            }
        }
    }
}

/// Reject subnet-level names the registry does not list for the family.
fn check_applicable(entry: &SubnetEntry) -> Result<(), FormError> {
    for name in entry.parameters.keys() {
        if spec_for(name, entry.family).is_some() {
            continue;
        }
        if spec_for(name, entry.family.other()).is_some() {
            return Err(FormError::NotApplicable {
                parameter: name.clone(),
                family: entry.family,
            });
        }
        return Err(FormError::UnknownParameter(name.clone()));
    }
    Ok(())
}

/// Rebuild the subnet with one local subnet per selected daemon.
pub fn convert_form_to_subnet(entry: &SubnetEntry) -> Result<Subnet, FormError> {
    check_applicable(entry)?;
    warn_on_unselected(entry);
    let mut local_subnets = Vec::with_capacity(entry.selected_daemons.len());
    for (index, daemon_id) in entry.selected_daemons.iter().copied().enumerate() {
        let mut local = LocalSubnet {
            daemon_id,
            ..LocalSubnet::default()
        };
        local.pools = convert_form_to_address_pools(&local, &entry.pools)?;
        if entry.family.is_ipv6() {
            local.prefix_delegation_pools =
                convert_form_to_prefix_pools(&local, &entry.prefix_pools)?;
        }
        local.kea_config_subnet_parameters = Some(KeaConfigSubnetParameters {
            subnet_level_parameters: Some(subnet_block(entry, index)?),
        });
        local_subnets.push(local);
    }
    debug!(
        subnet = %entry.subnet,
        daemons = local_subnets.len(),
        "converted form to subnet"
    );
    Ok(Subnet {
        id: entry.id,
        subnet: entry.subnet.clone(),
        shared_network_id: entry.shared_network_id,
        local_subnets,
    })
}

/// Subnet-level units for a subnet that is being created.
pub fn create_default_kea_subnet_parameters_form(family: AddressFamily) -> SubnetParametersForm {
    subnet_parameter_specs(family)
        .into_iter()
        .map(|(name, spec)| (name.to_string(), SharedParameter::create_default(spec, 1)))
        .collect()
}
