//! Address and delegated-prefix pool conversion.
//!
//! Pools are matched across daemons by their identity (the range string for
//! address pools, the prefix triple for prefix pools). Each resulting entry
//! records the daemons that carry the pool, and every slot lookup goes
//! through the daemon's position in that scope.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::FormError;
use crate::model::{DaemonId, DelegatedPrefixPool, LocalSubnet, Pool, PoolParameters, Subnet};
use crate::options::OptionsSet;
use crate::registry::{pool_parameter_specs, ParameterSpec, POOL_PARAMETER_NAMES};
use crate::shared::SharedParameter;
use crate::syntax::split_range;
use crate::value::ParameterBlock;

/// Bounds of an address pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRange {
    pub start: String,
    pub end: String,
}

impl AddressRange {
    pub fn parse(range: &str) -> Self {
        let (start, end) = split_range(range);
        Self { start, end }
    }

    /// The `start-end` string used on the wire.
    ///
    /// Bounds are joined by a bare `-`, so whitespace around the dash of the
    /// parsed input is not kept: `192.0.2.20 - 192.0.2.30` comes back as
    /// `192.0.2.20-192.0.2.30`.
    pub fn to_pool_string(&self) -> String {
        format!("{}-{}", self.start, self.end)
    }
}

/// Identity fields of a delegated-prefix pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrefixFields {
    pub prefix: String,
    pub delegated_length: Option<u8>,
    /// Empty when no prefix is excluded.
    #[serde(default)]
    pub excluded_prefix: String,
}

/// Editable pool-level parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolParametersForm {
    pub client_class: SharedParameter,
    pub require_client_classes: SharedParameter,
    #[serde(rename = "poolID")]
    pub pool_id: SharedParameter,
}

impl PoolParametersForm {
    fn build(mut unit: impl FnMut(&'static str, ParameterSpec) -> SharedParameter) -> Self {
        let [client_class, require_client_classes, pool_id] =
            pool_parameter_specs().map(|(name, spec)| unit(name, spec));
        Self {
            client_class,
            require_client_classes,
            pool_id,
        }
    }

    /// Units keyed by their wire name.
    pub fn units(&self) -> [(&'static str, &SharedParameter); 3] {
        let [client_class, require_client_classes, pool_id] = POOL_PARAMETER_NAMES;
        [
            (client_class, &self.client_class),
            (require_client_classes, &self.require_client_classes),
            (pool_id, &self.pool_id),
        ]
    }
}

/// One address pool shared by the daemons in `daemons_in_scope`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolEntry {
    pub range: AddressRange,
    pub parameters: PoolParametersForm,
    pub options: OptionsSet,
    pub daemons_in_scope: Vec<DaemonId>,
}

/// One delegated-prefix pool shared by the daemons in `daemons_in_scope`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrefixPoolEntry {
    pub prefixes: PrefixFields,
    pub parameters: PoolParametersForm,
    pub options: OptionsSet,
    pub daemons_in_scope: Vec<DaemonId>,
}

/// Pools of one identity collected across daemons, in first-seen order.
struct PoolGroup<'a, K> {
    key: K,
    daemons: Vec<DaemonId>,
    blocks: Vec<Option<&'a PoolParameters>>,
}

fn group_pools<'a, K, P, I>(
    views: I,
    pools_of: impl Fn(&'a LocalSubnet) -> &'a [P],
    identity: impl Fn(&P) -> K,
    parameters_of: impl Fn(&'a P) -> Option<&'a PoolParameters>,
) -> Vec<PoolGroup<'a, K>>
where
    K: PartialEq,
    P: 'a,
    I: IntoIterator<Item = &'a LocalSubnet>,
{
    let mut groups: Vec<PoolGroup<'a, K>> = Vec::new();
    for view in views {
        for pool in pools_of(view) {
            let key = identity(pool);
            let index = match groups.iter().position(|group| group.key == key) {
                Some(index) => index,
                None => {
                    groups.push(PoolGroup {
                        key,
                        daemons: Vec::new(),
                        blocks: Vec::new(),
                    });
                    groups.len() - 1
                }
            };
            let group = &mut groups[index];
            if group.daemons.contains(&view.daemon_id) {
                debug!(daemon = view.daemon_id, "skipping repeated pool on daemon");
                continue;
            }
            group.daemons.push(view.daemon_id);
            group.blocks.push(parameters_of(pool));
        }
    }
    groups
}

fn options_from_blocks(blocks: &[Option<&PoolParameters>]) -> OptionsSet {
    let lists = blocks
        .iter()
        .map(|block| block.map(|b| b.options.clone()).unwrap_or_default())
        .collect();
    let hashes: Vec<Option<String>> = blocks
        .iter()
        .map(|block| block.and_then(|b| b.options_hash.clone()))
        .collect();
    OptionsSet::from_per_daemon_options(lists, &hashes)
}

pub(crate) fn address_pools_from_views<'a, I>(views: I) -> Vec<PoolEntry>
where
    I: IntoIterator<Item = &'a LocalSubnet>,
{
    let groups = group_pools(
        views,
        |view| view.pools.as_slice(),
        |pool: &Pool| pool.pool.clone(),
        Pool::parameters,
    );
    groups
        .into_iter()
        .map(|group| PoolEntry {
            range: AddressRange::parse(&group.key),
            parameters: convert_pool_parameters_to_form(&group.blocks),
            options: options_from_blocks(&group.blocks),
            daemons_in_scope: group.daemons,
        })
        .collect()
}

pub(crate) fn prefix_pools_from_views<'a, I>(views: I) -> Vec<PrefixPoolEntry>
where
    I: IntoIterator<Item = &'a LocalSubnet>,
{
    let groups = group_pools(
        views,
        |view| view.prefix_delegation_pools.as_slice(),
        prefix_fields,
        DelegatedPrefixPool::parameters,
    );
    groups
        .into_iter()
        .map(|group| PrefixPoolEntry {
            prefixes: group.key,
            parameters: convert_pool_parameters_to_form(&group.blocks),
            options: options_from_blocks(&group.blocks),
            daemons_in_scope: group.daemons,
        })
        .collect()
}

fn prefix_fields(pool: &DelegatedPrefixPool) -> PrefixFields {
    PrefixFields {
        prefix: pool.prefix.clone(),
        delegated_length: pool.delegated_length,
        excluded_prefix: pool.excluded_prefix.clone().unwrap_or_default(),
    }
}

/// Collect the address pools of every local subnet into form entries.
pub fn convert_address_pools_to_form(subnet: &Subnet) -> Vec<PoolEntry> {
    address_pools_from_views(&subnet.local_subnets)
}

/// Collect the delegated-prefix pools of every local subnet into form entries.
pub fn convert_prefix_pools_to_form(subnet: &Subnet) -> Vec<PrefixPoolEntry> {
    prefix_pools_from_views(&subnet.local_subnets)
}

/// Pool parameter units from per-daemon blocks; a missing block contributes
/// default values.
pub fn convert_pool_parameters_to_form(blocks: &[Option<&PoolParameters>]) -> PoolParametersForm {
    PoolParametersForm::build(|name, spec| {
        SharedParameter::from_per_daemon_values(
            spec,
            blocks
                .iter()
                .map(|block| block.and_then(|b| b.parameter(name))),
        )
    })
}

/// Pool parameter block for the daemon at `index` of the pool's scope.
pub fn convert_form_to_pool_parameters(
    form: &PoolParametersForm,
    index: usize,
) -> Result<PoolParameters, FormError> {
    let mut block = PoolParameters::default();
    for (name, unit) in form.units() {
        block.set_parameter(name, unit.value_for(index))?;
    }
    Ok(block)
}

fn pool_block(
    parameters: &PoolParametersForm,
    options: &OptionsSet,
    index: usize,
) -> Result<PoolParameters, FormError> {
    let mut block = convert_form_to_pool_parameters(parameters, index)?;
    block.options = options.options_for(index);
    Ok(block)
}

fn scope_index(scope: &[DaemonId], daemon_id: DaemonId) -> Option<usize> {
    scope.iter().position(|id| *id == daemon_id)
}

/// Address pools of one daemon from the form entries that include it.
pub fn convert_form_to_address_pools(
    local_subnet: &LocalSubnet,
    entries: &[PoolEntry],
) -> Result<Vec<Pool>, FormError> {
    let mut pools = Vec::new();
    for entry in entries {
        let Some(index) = scope_index(&entry.daemons_in_scope, local_subnet.daemon_id) else {
            continue;
        };
        pools.push(Pool {
            pool: entry.range.to_pool_string(),
            kea_config_pool_parameters: Some(pool_block(&entry.parameters, &entry.options, index)?),
        });
    }
    Ok(pools)
}

/// Delegated-prefix pools of one daemon from the form entries that include it.
pub fn convert_form_to_prefix_pools(
    local_subnet: &LocalSubnet,
    entries: &[PrefixPoolEntry],
) -> Result<Vec<DelegatedPrefixPool>, FormError> {
    let mut pools = Vec::new();
    for entry in entries {
        let Some(index) = scope_index(&entry.daemons_in_scope, local_subnet.daemon_id) else {
            continue;
        };
        let excluded = &entry.prefixes.excluded_prefix;
        pools.push(DelegatedPrefixPool {
            prefix: entry.prefixes.prefix.clone(),
            delegated_length: entry.prefixes.delegated_length,
            excluded_prefix: (!excluded.is_empty()).then(|| excluded.clone()),
            kea_config_pool_parameters: Some(pool_block(&entry.parameters, &entry.options, index)?),
        });
    }
    Ok(pools)
}

/// Pool parameters for a pool that is being added.
pub fn create_default_pool_parameters_form() -> PoolParametersForm {
    PoolParametersForm::build(|_, spec| SharedParameter::create_default(spec, 1))
}

fn default_options() -> OptionsSet {
    OptionsSet {
        locked: false,
        per_daemon: Vec::new(),
    }
}

/// Empty address pool entry with no daemons in scope.
pub fn create_default_address_pool_form() -> PoolEntry {
    PoolEntry {
        range: AddressRange::default(),
        parameters: create_default_pool_parameters_form(),
        options: default_options(),
        daemons_in_scope: Vec::new(),
    }
}

/// Empty prefix pool entry with no daemons in scope.
pub fn create_default_prefix_pool_form() -> PrefixPoolEntry {
    PrefixPoolEntry {
        prefixes: PrefixFields::default(),
        parameters: create_default_pool_parameters_form(),
        options: default_options(),
        daemons_in_scope: Vec::new(),
    }
}
