//! Domain objects exchanged with the data-access layer.
//!
//! These mirror the JSON documents the management backend serves for a
//! subnet: one [`Subnet`] with a [`LocalSubnet`] view per daemon. Keys that
//! carry no value are omitted on output so that unset parameters keep being
//! inherited from the higher configuration levels.

use serde::{Deserialize, Serialize};

/// Identifier of a DHCP server daemon.
pub type DaemonId = i64;

/// A subnet together with every daemon's local copy of its configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subnet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Subnet prefix, e.g. `192.0.2.0/24`.
    pub subnet: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_network_id: Option<i64>,
    #[serde(default)]
    pub local_subnets: Vec<LocalSubnet>,
}

/// One daemon's view of a subnet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalSubnet {
    pub daemon_id: DaemonId,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pools: Vec<Pool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prefix_delegation_pools: Vec<DelegatedPrefixPool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kea_config_subnet_parameters: Option<KeaConfigSubnetParameters>,
}

impl Subnet {
    /// Copy of the subnet with every missing parameter block replaced by an
    /// empty one and empty excluded prefixes removed.
    ///
    /// A missing block and an empty block configure the same thing, and
    /// converting a form back always emits the blocks.
    pub fn with_parameter_blocks(&self) -> Subnet {
        let mut subnet = self.clone();
        for local in &mut subnet.local_subnets {
            local.fill_parameter_blocks();
        }
        subnet
    }
}

impl LocalSubnet {
    /// Subnet-level parameter block, if the daemon reported one.
    pub fn subnet_level_parameters(&self) -> Option<&SubnetParameters> {
        self.kea_config_subnet_parameters
            .as_ref()
            .and_then(|p| p.subnet_level_parameters.as_ref())
    }

    fn fill_parameter_blocks(&mut self) {
        let wrapper = self
            .kea_config_subnet_parameters
            .get_or_insert_with(KeaConfigSubnetParameters::default);
        if wrapper.subnet_level_parameters.is_none() {
            wrapper.subnet_level_parameters = Some(SubnetParameters::default());
        }
        for pool in &mut self.pools {
            if pool.kea_config_pool_parameters.is_none() {
                pool.kea_config_pool_parameters = Some(PoolParameters::default());
            }
        }
        for pool in &mut self.prefix_delegation_pools {
            if pool.kea_config_pool_parameters.is_none() {
                pool.kea_config_pool_parameters = Some(PoolParameters::default());
            }
            if pool.excluded_prefix.as_deref() == Some("") {
                pool.excluded_prefix = None;
            }
        }
    }
}

/// Wrapper around the parameters configured directly at the subnet level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeaConfigSubnetParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnet_level_parameters: Option<SubnetParameters>,
}

/// An address pool, identified by its `start-end` range string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pool {
    pub pool: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kea_config_pool_parameters: Option<PoolParameters>,
}

impl Pool {
    pub fn parameters(&self) -> Option<&PoolParameters> {
        self.kea_config_pool_parameters.as_ref()
    }
}

/// A DHCPv6 delegated-prefix pool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelegatedPrefixPool {
    pub prefix: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delegated_length: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excluded_prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kea_config_pool_parameters: Option<PoolParameters>,
}

impl DelegatedPrefixPool {
    pub fn parameters(&self) -> Option<&PoolParameters> {
        self.kea_config_pool_parameters.as_ref()
    }
}

/// Parameters configurable per address or prefix pool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_client_classes: Option<Vec<String>>,
    #[serde(rename = "poolID", default, skip_serializing_if = "Option::is_none")]
    pub pool_id: Option<u32>,
    #[serde(default)]
    pub options: Vec<DhcpOption>,
    /// Digest of `options` computed by the data-access layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options_hash: Option<String>,
}

/// Relay agent addresses configured for a subnet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relay {
    #[serde(default)]
    pub ip_addresses: Vec<String>,
}

/// Parameters configured at the subnet level of one daemon.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubnetParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_max_age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_client_classes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ddns_generated_prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ddns_override_client_update: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ddns_override_no_update: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ddns_qualifying_suffix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ddns_replace_client_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ddns_send_updates: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ddns_update_on_renew: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ddns_use_conflict_resolution: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub four_over_six_interface: Option<String>,
    #[serde(rename = "fourOverSixInterfaceID")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub four_over_six_interface_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub four_over_six_subnet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname_char_set: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname_char_replacement: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_lifetime: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_preferred_lifetime: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_preferred_lifetime: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reservations_global: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reservations_in_subnet: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reservations_out_of_pool: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renew_timer: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rebind_timer: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t1_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t2_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calculate_tee_times: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_lifetime: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_valid_lifetime: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_valid_lifetime: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allocator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authoritative: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boot_file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface: Option<String>,
    #[serde(rename = "interfaceID")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface_id: Option<String>,
    #[serde(rename = "matchClientID")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_client_id: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_server: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pd_allocator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rapid_commit: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_hostname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_extended_info: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relay: Option<Relay>,
    #[serde(default)]
    pub options: Vec<DhcpOption>,
    /// Digest of `options` computed by the data-access layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options_hash: Option<String>,
}

/// A DHCP option instance with its typed fields and encapsulated sub-options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DhcpOption {
    #[serde(default)]
    pub always_send: bool,
    pub code: u16,
    #[serde(default)]
    pub encapsulate: String,
    #[serde(default)]
    pub fields: Vec<DhcpOptionField>,
    #[serde(default)]
    pub options: Vec<DhcpOption>,
    /// Option space universe: 4 or 6.
    pub universe: u8,
}

/// One typed field of a DHCP option.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DhcpOptionField {
    pub field_type: String,
    #[serde(default)]
    pub values: Vec<String>,
}
