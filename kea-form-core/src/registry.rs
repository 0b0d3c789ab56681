//! Static table of every parameter the forms know how to edit.
//!
//! Subnet-level parameters differ between the address families: a name
//! missing for a family is not applicable there and never appears in a form
//! generated for it. Pool-level parameters are the same for both families.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::syntax::SyntaxRule;
use crate::value::ParameterValue;

/// IP address family of a subnet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressFamily {
    Ipv4,
    Ipv6,
}

impl AddressFamily {
    pub fn is_ipv6(self) -> bool {
        self == Self::Ipv6
    }

    pub fn other(self) -> Self {
        match self {
            Self::Ipv4 => Self::Ipv6,
            Self::Ipv6 => Self::Ipv4,
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ipv4 => write!(f, "IPv4"),
            Self::Ipv6 => write!(f, "IPv6"),
        }
    }
}

/// Semantic type of a parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParameterKind {
    String,
    Number,
    Boolean,
    /// A string restricted to [`ParameterSpec::allowed_values`].
    Enumerated,
    StringList,
    #[serde(rename = "client-classes")]
    ClientClassList,
}

/// Describes how a single parameter is edited and validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterSpec {
    pub kind: ParameterKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fraction_digits: Option<u8>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_values: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invalid_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub syntax: Option<SyntaxRule>,
}

impl ParameterSpec {
    /// Spec of the given kind with no bounds, choices or syntax rule.
    pub fn of_kind(kind: ParameterKind) -> Self {
        Self {
            kind,
            min: None,
            max: None,
            fraction_digits: None,
            allowed_values: Vec::new(),
            invalid_text: None,
            syntax: None,
        }
    }

    /// Value used for a slot that has nothing configured.
    ///
    /// Every call allocates a new value so no two slots share a container.
    pub fn default_value(&self) -> ParameterValue {
        match self.kind {
            ParameterKind::String | ParameterKind::Enumerated => {
                ParameterValue::Text(String::new())
            }
            ParameterKind::Number => ParameterValue::Unset,
            ParameterKind::Boolean => ParameterValue::Flag(false),
            ParameterKind::StringList | ParameterKind::ClientClassList => {
                ParameterValue::List(Vec::new())
            }
        }
    }

    /// Replace an unset slot with the default of this spec.
    pub fn normalize(&self, value: Option<ParameterValue>) -> ParameterValue {
        match value {
            None | Some(ParameterValue::Unset) => self.default_value(),
            Some(value) => value,
        }
    }

    /// Whether a value equals the default and should be omitted on output.
    pub fn is_default(&self, value: &ParameterValue) -> bool {
        value.is_unset() || *value == self.default_value()
    }

    /// Check one slot value against type, bounds, choices and syntax.
    pub fn accepts(&self, value: &ParameterValue) -> bool {
        match (self.kind, value) {
            (_, ParameterValue::Unset) => true,
            (ParameterKind::String, ParameterValue::Text(text)) => {
                text.is_empty() || self.syntax.map_or(true, |rule| rule.accepts(text))
            }
            (ParameterKind::Enumerated, ParameterValue::Text(text)) => {
                text.is_empty() || self.allowed_values.iter().any(|v| v == text)
            }
            (ParameterKind::Number, ParameterValue::Number(number)) => self.accepts_number(*number),
            (ParameterKind::Boolean, ParameterValue::Flag(_)) => true,
            (
                ParameterKind::StringList | ParameterKind::ClientClassList,
                ParameterValue::List(items),
            ) => items.iter().all(|item| !item.trim().is_empty()),
            _ => false,
        }
    }

    fn accepts_number(&self, number: f64) -> bool {
        if !number.is_finite() {
            return false;
        }
        if self.min.is_some_and(|min| number < min) || self.max.is_some_and(|max| number > max) {
            return false;
        }
        // Parameters without fraction digits are 32-bit unsigned integers.
        self.fraction_digits.is_some()
            || (number.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&number))
    }

    /// Round a number to the displayed precision.
    pub fn round_for_display(&self, number: f64) -> f64 {
        match self.fraction_digits {
            Some(digits) => {
                let scale = 10f64.powi(i32::from(digits));
                (number * scale).round() / scale
            }
            None => number,
        }
    }
}

/// Which subnet families a parameter applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Applies {
    Both,
    Ipv4Only,
    Ipv6Only,
}

impl Applies {
    fn includes(self, family: AddressFamily) -> bool {
        match self {
            Self::Both => true,
            Self::Ipv4Only => family == AddressFamily::Ipv4,
            Self::Ipv6Only => family == AddressFamily::Ipv6,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct ParameterDef {
    name: &'static str,
    kind: ParameterKind,
    applies: Applies,
    bounds: Option<(f64, f64, u8)>,
    allowed: &'static [&'static str],
    syntax: Option<(SyntaxRule, &'static str)>,
}

impl ParameterDef {
    const fn new(name: &'static str, kind: ParameterKind, applies: Applies) -> Self {
        Self {
            name,
            kind,
            applies,
            bounds: None,
            allowed: &[],
            syntax: None,
        }
    }

    const fn fraction(self) -> Self {
        Self {
            bounds: Some((0.0, 1.0, 2)),
            ..self
        }
    }

    const fn choices(self, allowed: &'static [&'static str]) -> Self {
        Self { allowed, ..self }
    }

    const fn syntax(self, rule: SyntaxRule, invalid_text: &'static str) -> Self {
        Self {
            syntax: Some((rule, invalid_text)),
            ..self
        }
    }

    fn spec(&self) -> ParameterSpec {
        let mut spec = ParameterSpec::of_kind(self.kind);
        if let Some((min, max, digits)) = self.bounds {
            spec.min = Some(min);
            spec.max = Some(max);
            spec.fraction_digits = Some(digits);
        }
        spec.allowed_values = self.allowed.iter().map(ToString::to_string).collect();
        if let Some((rule, text)) = self.syntax {
            spec.syntax = Some(rule);
            spec.invalid_text = Some(text.to_string());
        }
        spec
    }
}

const ALLOCATORS: &[&str] = &["iterative", "random", "flq"];
const REPLACE_CLIENT_NAME: &[&str] = &["never", "always", "when-not-present"];

/// Form name of the relay address list (`relay.ipAddresses` on the wire).
pub const RELAY_ADDRESSES: &str = "relayAddresses";

use Applies::{Both, Ipv4Only, Ipv6Only};
use ParameterKind::{Boolean, ClientClassList, Enumerated, Number, StringList};

const SUBNET_PARAMETERS: &[ParameterDef] = &[
    ParameterDef::new("cacheThreshold", Number, Both).fraction(),
    ParameterDef::new("cacheMaxAge", Number, Both),
    ParameterDef::new("clientClass", ParameterKind::String, Both),
    ParameterDef::new("requireClientClasses", ClientClassList, Both),
    ParameterDef::new("ddnsGeneratedPrefix", ParameterKind::String, Both)
        .syntax(SyntaxRule::HostnamePrefix, "Please specify a valid prefix."),
    ParameterDef::new("ddnsOverrideClientUpdate", Boolean, Both),
    ParameterDef::new("ddnsOverrideNoUpdate", Boolean, Both),
    ParameterDef::new("ddnsQualifyingSuffix", ParameterKind::String, Both)
        .syntax(SyntaxRule::DnsSuffix, "Please specify a valid suffix."),
    ParameterDef::new("ddnsReplaceClientName", Enumerated, Both).choices(REPLACE_CLIENT_NAME),
    ParameterDef::new("ddnsSendUpdates", Boolean, Both),
    ParameterDef::new("ddnsUpdateOnRenew", Boolean, Both),
    ParameterDef::new("ddnsUseConflictResolution", Boolean, Both),
    ParameterDef::new("fourOverSixInterface", ParameterKind::String, Ipv4Only),
    ParameterDef::new("fourOverSixInterfaceID", ParameterKind::String, Ipv4Only),
    ParameterDef::new("fourOverSixSubnet", ParameterKind::String, Ipv4Only)
        .syntax(SyntaxRule::Ipv6Prefix, "Please specify an IPv6 prefix."),
    ParameterDef::new("hostnameCharSet", ParameterKind::String, Both),
    ParameterDef::new("hostnameCharReplacement", ParameterKind::String, Both),
    ParameterDef::new("preferredLifetime", Number, Ipv6Only),
    ParameterDef::new("minPreferredLifetime", Number, Ipv6Only),
    ParameterDef::new("maxPreferredLifetime", Number, Ipv6Only),
    ParameterDef::new("reservationsGlobal", Boolean, Both),
    ParameterDef::new("reservationsInSubnet", Boolean, Both),
    ParameterDef::new("reservationsOutOfPool", Boolean, Both),
    ParameterDef::new("renewTimer", Number, Both),
    ParameterDef::new("rebindTimer", Number, Both),
    ParameterDef::new("t1Percent", Number, Both).fraction(),
    ParameterDef::new("t2Percent", Number, Both).fraction(),
    ParameterDef::new("calculateTeeTimes", Boolean, Both),
    ParameterDef::new("validLifetime", Number, Both),
    ParameterDef::new("minValidLifetime", Number, Both),
    ParameterDef::new("maxValidLifetime", Number, Both),
    ParameterDef::new("allocator", Enumerated, Both).choices(ALLOCATORS),
    ParameterDef::new("authoritative", Boolean, Both),
    ParameterDef::new("bootFileName", ParameterKind::String, Ipv4Only),
    ParameterDef::new("interface", ParameterKind::String, Both),
    ParameterDef::new("interfaceID", ParameterKind::String, Both),
    ParameterDef::new("matchClientID", Boolean, Ipv4Only),
    ParameterDef::new("nextServer", ParameterKind::String, Ipv4Only)
        .syntax(SyntaxRule::Ipv4Address, "Please specify an IPv4 address."),
    ParameterDef::new("pdAllocator", Enumerated, Ipv6Only).choices(ALLOCATORS),
    ParameterDef::new("rapidCommit", Boolean, Ipv6Only),
    ParameterDef::new("serverHostname", ParameterKind::String, Ipv4Only)
        .syntax(SyntaxRule::Fqdn, "Please specify a valid hostname."),
    ParameterDef::new("storeExtendedInfo", Boolean, Both),
    ParameterDef::new(RELAY_ADDRESSES, StringList, Both),
];

/// Names of the parameters editable per address or prefix pool.
pub const POOL_PARAMETER_NAMES: [&str; 3] = ["clientClass", "requireClientClasses", "poolID"];

const POOL_PARAMETERS: [ParameterDef; 3] = [
    ParameterDef::new("clientClass", ParameterKind::String, Both),
    ParameterDef::new("requireClientClasses", ClientClassList, Both),
    ParameterDef::new("poolID", Number, Both),
];

/// Spec of a subnet-level parameter, or `None` when it does not apply to
/// the family.
pub fn spec_for(name: &str, family: AddressFamily) -> Option<ParameterSpec> {
    SUBNET_PARAMETERS
        .iter()
        .find(|def| def.name == name && def.applies.includes(family))
        .map(ParameterDef::spec)
}

/// Subnet-level parameter names applicable to the family, in table order.
pub fn subnet_parameter_names(family: AddressFamily) -> Vec<&'static str> {
    SUBNET_PARAMETERS
        .iter()
        .filter(|def| def.applies.includes(family))
        .map(|def| def.name)
        .collect()
}

/// Subnet-level names and specs applicable to the family, in table order.
pub fn subnet_parameter_specs(family: AddressFamily) -> Vec<(&'static str, ParameterSpec)> {
    SUBNET_PARAMETERS
        .iter()
        .filter(|def| def.applies.includes(family))
        .map(|def| (def.name, def.spec()))
        .collect()
}

/// Spec of a pool-level parameter.
pub fn pool_spec_for(name: &str) -> Option<ParameterSpec> {
    POOL_PARAMETERS
        .iter()
        .find(|def| def.name == name)
        .map(ParameterDef::spec)
}

/// Pool-level parameter names and specs in [`POOL_PARAMETER_NAMES`] order.
pub fn pool_parameter_specs() -> [(&'static str, ParameterSpec); 3] {
    POOL_PARAMETERS.map(|def| (def.name, def.spec()))
}

/// Default slot value for the spec.
pub fn default_value(spec: &ParameterSpec) -> ParameterValue {
    spec.default_value()
}

#[cfg(test)]
mod tests {
    use super::{
        pool_spec_for, spec_for, subnet_parameter_names, AddressFamily, ParameterKind,
        POOL_PARAMETER_NAMES,
    };
    use crate::value::ParameterValue;

    #[test]
    fn family_parameter_counts() {
        assert_eq!(subnet_parameter_names(AddressFamily::Ipv4).len(), 38);
        assert_eq!(subnet_parameter_names(AddressFamily::Ipv6).len(), 36);
    }

    #[test]
    fn family_specific_names_are_absent_elsewhere() {
        for name in ["fourOverSixSubnet", "bootFileName", "matchClientID", "nextServer"] {
            assert!(spec_for(name, AddressFamily::Ipv4).is_some(), "{name}");
            assert!(spec_for(name, AddressFamily::Ipv6).is_none(), "{name}");
        }
        for name in ["preferredLifetime", "pdAllocator", "rapidCommit"] {
            assert!(spec_for(name, AddressFamily::Ipv4).is_none(), "{name}");
            assert!(spec_for(name, AddressFamily::Ipv6).is_some(), "{name}");
        }
    }

    #[test]
    fn fraction_specs_carry_bounds() {
        let spec = spec_for("cacheThreshold", AddressFamily::Ipv4).expect("spec");
        assert_eq!(spec.kind, ParameterKind::Number);
        assert_eq!(spec.min, Some(0.0));
        assert_eq!(spec.max, Some(1.0));
        assert_eq!(spec.fraction_digits, Some(2));
        assert!(spec.accepts(&ParameterValue::Number(0.25)));
        assert!(!spec.accepts(&ParameterValue::Number(1.5)));
        assert_eq!(spec.round_for_display(0.256), 0.26);

        let max_age = spec_for("cacheMaxAge", AddressFamily::Ipv4).expect("spec");
        assert_eq!(max_age.min, None);
        assert!(max_age.accepts(&ParameterValue::Number(1000.0)));
        assert!(!max_age.accepts(&ParameterValue::Number(10.5)));
        assert!(!max_age.accepts(&ParameterValue::Number(-1.0)));
    }

    #[test]
    fn enumerations_list_choices() {
        let spec = spec_for("ddnsReplaceClientName", AddressFamily::Ipv6).expect("spec");
        assert_eq!(
            spec.allowed_values,
            vec!["never", "always", "when-not-present"]
        );
        assert!(spec.accepts(&ParameterValue::Text("always".to_string())));
        assert!(spec.accepts(&ParameterValue::Text(String::new())));
        assert!(!spec.accepts(&ParameterValue::Text("sometimes".to_string())));
    }

    #[test]
    fn syntax_specs_carry_invalid_text() {
        let spec = spec_for("ddnsGeneratedPrefix", AddressFamily::Ipv4).expect("spec");
        assert_eq!(
            spec.invalid_text.as_deref(),
            Some("Please specify a valid prefix.")
        );
        let spec = spec_for("clientClass", AddressFamily::Ipv4).expect("spec");
        assert!(spec.invalid_text.is_none());
    }

    #[test]
    fn defaults_per_kind() {
        let text = spec_for("allocator", AddressFamily::Ipv4).expect("spec");
        assert_eq!(text.default_value(), ParameterValue::Text(String::new()));
        let flag = spec_for("authoritative", AddressFamily::Ipv4).expect("spec");
        assert_eq!(flag.default_value(), ParameterValue::Flag(false));
        let list = spec_for("requireClientClasses", AddressFamily::Ipv4).expect("spec");
        assert_eq!(list.default_value(), ParameterValue::List(Vec::new()));
        let pool_id = pool_spec_for("poolID").expect("spec");
        assert_eq!(pool_id.default_value(), ParameterValue::Unset);
    }

    #[test]
    fn pool_parameters_are_known() {
        for name in POOL_PARAMETER_NAMES {
            assert!(pool_spec_for(name).is_some(), "{name}");
        }
        assert!(pool_spec_for("allocator").is_none());
        let names = super::pool_parameter_specs().map(|(name, _)| name);
        assert_eq!(names, POOL_PARAMETER_NAMES);
    }

    #[test]
    fn type_mismatch_is_rejected() {
        let spec = spec_for("renewTimer", AddressFamily::Ipv4).expect("spec");
        assert!(!spec.accepts(&ParameterValue::Text("100".to_string())));
        assert!(spec.accepts(&ParameterValue::Unset));
    }
}
