//! Reconciliation of Kea subnet and pool parameters across DHCP daemons.
//!
//! A subnet served by several daemons carries one parameter block per
//! daemon. This crate folds those blocks into an editable form where each
//! parameter is either locked (one value for every daemon) or unlocked (a
//! value per daemon), and maps an edited form back onto per-daemon blocks.
//! It performs no I/O.

pub mod diff;
pub mod error;
pub mod format;
pub mod model;
pub mod options;
pub mod pools;
pub mod registry;
pub mod shared;
pub mod subnet;
pub mod syntax;
pub mod validate;
pub mod value;

pub use diff::{diff_subnets, diff_values, DiffEntry, DiffOptions};
pub use error::FormError;
pub use format::{format_issues, format_json, format_summary, format_text};
pub use model::{
    DaemonId, DelegatedPrefixPool, DhcpOption, DhcpOptionField, KeaConfigSubnetParameters,
    LocalSubnet, Pool, PoolParameters, Relay, Subnet, SubnetParameters,
};
pub use options::OptionsSet;
pub use pools::{
    convert_address_pools_to_form, convert_form_to_address_pools, convert_form_to_pool_parameters,
    convert_form_to_prefix_pools, convert_pool_parameters_to_form, convert_prefix_pools_to_form,
    create_default_address_pool_form, create_default_pool_parameters_form,
    create_default_prefix_pool_form, AddressRange, PoolEntry, PoolParametersForm, PrefixFields,
    PrefixPoolEntry,
};
pub use registry::{
    default_value, pool_spec_for, spec_for, subnet_parameter_names, AddressFamily, ParameterKind,
    ParameterSpec,
};
pub use shared::SharedParameter;
pub use subnet::{
    convert_form_to_kea_subnet_parameters, convert_form_to_subnet,
    convert_kea_subnet_parameters_to_form, convert_subnet_to_form,
    create_default_kea_subnet_parameters_form, SubnetEntry, SubnetParametersForm,
};
pub use syntax::SyntaxRule;
pub use validate::{validate_subnet_form, ValidationIssue};
pub use value::{ParameterBlock, ParameterValue};
