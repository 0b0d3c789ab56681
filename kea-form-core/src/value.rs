//! Slot values and name-keyed access to the domain parameter blocks.
//!
//! The forms address parameters by their wire name (`poolID`,
//! `ddnsSendUpdates`, ...). [`ParameterBlock`] maps those names onto the
//! typed fields of [`PoolParameters`] and [`SubnetParameters`], so the
//! converters never inspect struct fields dynamically.

use serde::{Deserialize, Serialize};

use crate::error::FormError;
use crate::model::{PoolParameters, Relay, SubnetParameters};
use crate::registry::RELAY_ADDRESSES;

/// Value held in one per-daemon slot of a form parameter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    /// Nothing configured; serialized as `null`.
    #[default]
    Unset,
    Flag(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl ParameterValue {
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// Short type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Unset => "null",
            Self::Flag(_) => "a boolean",
            Self::Number(_) => "a number",
            Self::Text(_) => "a string",
            Self::List(_) => "a list",
        }
    }
}

/// Conversion between a typed domain field and a slot value.
///
/// `from_value` maps the kind's default (empty string, `false`, empty list,
/// unset number) to `None` so the key is omitted on output.
trait FieldValue: Sized {
    fn to_value(&self) -> ParameterValue;
    fn from_value(parameter: &str, value: ParameterValue) -> Result<Option<Self>, FormError>;
}

fn mismatch(parameter: &str, expected: &'static str, found: &ParameterValue) -> FormError {
    FormError::TypeMismatch {
        parameter: parameter.to_string(),
        expected,
        found: found.type_name().to_string(),
    }
}

impl FieldValue for String {
    fn to_value(&self) -> ParameterValue {
        ParameterValue::Text(self.clone())
    }

    fn from_value(parameter: &str, value: ParameterValue) -> Result<Option<Self>, FormError> {
        match value {
            ParameterValue::Unset => Ok(None),
            ParameterValue::Text(text) => Ok((!text.is_empty()).then_some(text)),
            other => Err(mismatch(parameter, "a string", &other)),
        }
    }
}

impl FieldValue for bool {
    fn to_value(&self) -> ParameterValue {
        ParameterValue::Flag(*self)
    }

    fn from_value(parameter: &str, value: ParameterValue) -> Result<Option<Self>, FormError> {
        match value {
            ParameterValue::Unset | ParameterValue::Flag(false) => Ok(None),
            ParameterValue::Flag(true) => Ok(Some(true)),
            other => Err(mismatch(parameter, "a boolean", &other)),
        }
    }
}

impl FieldValue for f64 {
    fn to_value(&self) -> ParameterValue {
        ParameterValue::Number(*self)
    }

    fn from_value(parameter: &str, value: ParameterValue) -> Result<Option<Self>, FormError> {
        match value {
            ParameterValue::Unset => Ok(None),
            ParameterValue::Number(number) => Ok(Some(number)),
            other => Err(mismatch(parameter, "a number", &other)),
        }
    }
}

impl FieldValue for u32 {
    fn to_value(&self) -> ParameterValue {
        ParameterValue::Number(f64::from(*self))
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn from_value(parameter: &str, value: ParameterValue) -> Result<Option<Self>, FormError> {
        match value {
            ParameterValue::Unset => Ok(None),
            ParameterValue::Number(number)
                if number.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&number) =>
            {
                Ok(Some(number as u32))
            }
            ParameterValue::Number(number) => Err(FormError::NotAnInteger {
                parameter: parameter.to_string(),
                value: number,
            }),
            other => Err(mismatch(parameter, "a number", &other)),
        }
    }
}

impl FieldValue for Vec<String> {
    fn to_value(&self) -> ParameterValue {
        ParameterValue::List(self.clone())
    }

    fn from_value(parameter: &str, value: ParameterValue) -> Result<Option<Self>, FormError> {
        match value {
            ParameterValue::Unset => Ok(None),
            ParameterValue::List(items) => Ok((!items.is_empty()).then_some(items)),
            other => Err(mismatch(parameter, "a list", &other)),
        }
    }
}

/// Name-keyed access to a domain parameter block.
pub trait ParameterBlock {
    /// Current value of the named parameter, `None` when it is not set or the
    /// block has no such parameter.
    fn parameter(&self, name: &str) -> Option<ParameterValue>;

    /// Store a slot value; default values clear the field.
    fn set_parameter(&mut self, name: &str, value: ParameterValue) -> Result<(), FormError>;
}

macro_rules! parameter_fields {
    ($block:ty { $($name:literal => $field:ident),+ $(,)? }) => {
        impl $block {
            fn field(&self, name: &str) -> Option<ParameterValue> {
                match name {
                    $($name => self.$field.as_ref().map(FieldValue::to_value),)+
                    _ => None,
                }
            }

            fn set_field(&mut self, name: &str, value: ParameterValue) -> Result<(), FormError> {
                match name {
                    $($name => self.$field = FieldValue::from_value(name, value)?,)+
                    _ => return Err(FormError::UnknownParameter(name.to_string())),
                }
                Ok(())
            }
        }
    };
}

parameter_fields!(PoolParameters {
    "clientClass" => client_class,
    "requireClientClasses" => require_client_classes,
    "poolID" => pool_id,
});

parameter_fields!(SubnetParameters {
    "cacheThreshold" => cache_threshold,
    "cacheMaxAge" => cache_max_age,
    "clientClass" => client_class,
    "requireClientClasses" => require_client_classes,
    "ddnsGeneratedPrefix" => ddns_generated_prefix,
    "ddnsOverrideClientUpdate" => ddns_override_client_update,
    "ddnsOverrideNoUpdate" => ddns_override_no_update,
    "ddnsQualifyingSuffix" => ddns_qualifying_suffix,
    "ddnsReplaceClientName" => ddns_replace_client_name,
    "ddnsSendUpdates" => ddns_send_updates,
    "ddnsUpdateOnRenew" => ddns_update_on_renew,
    "ddnsUseConflictResolution" => ddns_use_conflict_resolution,
    "fourOverSixInterface" => four_over_six_interface,
    "fourOverSixInterfaceID" => four_over_six_interface_id,
    "fourOverSixSubnet" => four_over_six_subnet,
    "hostnameCharSet" => hostname_char_set,
    "hostnameCharReplacement" => hostname_char_replacement,
    "preferredLifetime" => preferred_lifetime,
    "minPreferredLifetime" => min_preferred_lifetime,
    "maxPreferredLifetime" => max_preferred_lifetime,
    "reservationsGlobal" => reservations_global,
    "reservationsInSubnet" => reservations_in_subnet,
    "reservationsOutOfPool" => reservations_out_of_pool,
    "renewTimer" => renew_timer,
    "rebindTimer" => rebind_timer,
    "t1Percent" => t1_percent,
    "t2Percent" => t2_percent,
    "calculateTeeTimes" => calculate_tee_times,
    "validLifetime" => valid_lifetime,
    "minValidLifetime" => min_valid_lifetime,
    "maxValidLifetime" => max_valid_lifetime,
    "allocator" => allocator,
    "authoritative" => authoritative,
    "bootFileName" => boot_file_name,
    "interface" => interface,
    "interfaceID" => interface_id,
    "matchClientID" => match_client_id,
    "nextServer" => next_server,
    "pdAllocator" => pd_allocator,
    "rapidCommit" => rapid_commit,
    "serverHostname" => server_hostname,
    "storeExtendedInfo" => store_extended_info,
});

impl ParameterBlock for PoolParameters {
    fn parameter(&self, name: &str) -> Option<ParameterValue> {
        self.field(name)
    }

    fn set_parameter(&mut self, name: &str, value: ParameterValue) -> Result<(), FormError> {
        self.set_field(name, value)
    }
}

impl ParameterBlock for SubnetParameters {
    fn parameter(&self, name: &str) -> Option<ParameterValue> {
        if name == RELAY_ADDRESSES {
            return self
                .relay
                .as_ref()
                .map(|relay| ParameterValue::List(relay.ip_addresses.clone()));
        }
        self.field(name)
    }

    fn set_parameter(&mut self, name: &str, value: ParameterValue) -> Result<(), FormError> {
        if name == RELAY_ADDRESSES {
            self.relay = <Vec<String>>::from_value(name, value)?
                .map(|ip_addresses| Relay { ip_addresses });
            return Ok(());
        }
        self.set_field(name, value)
    }
}
