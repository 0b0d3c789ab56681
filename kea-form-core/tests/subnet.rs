use std::path::PathBuf;

use kea_form_core::{
    convert_form_to_kea_subnet_parameters, convert_form_to_subnet,
    convert_kea_subnet_parameters_to_form, convert_subnet_to_form,
    create_default_kea_subnet_parameters_form, spec_for, AddressFamily, FormError, ParameterKind,
    ParameterValue, SharedParameter, Subnet, SubnetParameters,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

fn load_subnet(path: &str) -> Subnet {
    let raw = std::fs::read_to_string(fixture(path)).expect("read fixture");
    serde_json::from_str(&raw).expect("parse fixture")
}

fn text(value: &str) -> ParameterValue {
    ParameterValue::Text(value.to_string())
}

fn ipv4_blocks() -> Vec<SubnetParameters> {
    serde_json::from_value(json!([
        {
            "cacheThreshold": 0.25,
            "cacheMaxAge": 1000,
            "clientClass": "foo",
            "requireClientClasses": ["foo", "bar"],
            "ddnsGeneratedPrefix": "prefix1",
            "ddnsOverrideClientUpdate": true,
            "ddnsQualifyingSuffix": "suffix1",
            "ddnsReplaceClientName": "always",
            "fourOverSixInterface": "eth0",
            "fourOverSixInterfaceID": "foo",
            "fourOverSixSubnet": "2001:db8:1::/64",
            "preferredLifetime": 1000,
            "t1Percent": 0.45,
            "validLifetime": 1001,
            "allocator": "flq",
            "authoritative": true,
            "interface": "eth0",
            "matchClientID": true,
            "nextServer": "192.0.2.1",
            "serverHostname": "foo.example.org.",
            "relay": {"ipAddresses": ["192.0.2.1", "192.0.2.2", "192.0.2.3"]}
        },
        {
            "cacheThreshold": 0.5,
            "cacheMaxAge": 2000,
            "clientClass": "bar",
            "requireClientClasses": ["foo", "bar"],
            "ddnsGeneratedPrefix": "prefix2",
            "ddnsOverrideClientUpdate": false,
            "ddnsQualifyingSuffix": "suffix2",
            "ddnsReplaceClientName": "never",
            "fourOverSixInterface": "eth1",
            "fourOverSixInterfaceID": "bar",
            "fourOverSixSubnet": "2001:db8:2::/64",
            "preferredLifetime": 2000,
            "t1Percent": 0.55,
            "validLifetime": 2001,
            "allocator": "random",
            "authoritative": false,
            "interface": "eth1",
            "matchClientID": false,
            "nextServer": "192.0.2.2",
            "serverHostname": "bar.example.org.",
            "relay": {"ipAddresses": ["192.0.2.1", "192.0.2.2", "192.0.2.3"]}
        }
    ]))
    .expect("ipv4 blocks")
}

#[test]
fn ipv4_parameters_reflect_divergence() {
    let blocks = ipv4_blocks();
    let refs: Vec<Option<&SubnetParameters>> = blocks.iter().map(Some).collect();
    let form = convert_kea_subnet_parameters_to_form(AddressFamily::Ipv4, &refs);
    assert_eq!(form.len(), 38);

    let cache = &form["cacheThreshold"];
    assert_eq!(cache.spec.kind, ParameterKind::Number);
    assert!(cache.spec.invalid_text.is_none());
    assert!(!cache.locked);
    assert_eq!(
        cache.values,
        vec![ParameterValue::Number(0.25), ParameterValue::Number(0.5)]
    );

    let authoritative = &form["authoritative"];
    assert!(!authoritative.locked);
    assert_eq!(
        authoritative.values,
        vec![ParameterValue::Flag(true), ParameterValue::Flag(false)]
    );

    assert!(form["requireClientClasses"].locked);
    assert!(form["relayAddresses"].locked);
    assert_eq!(form["interface"].values, vec![text("eth0"), text("eth1")]);
    assert_eq!(
        form["fourOverSixInterfaceID"].values,
        vec![text("foo"), text("bar")]
    );
    assert!(!form.contains_key("preferredLifetime"));
    // Never configured on either daemon.
    assert!(form["storeExtendedInfo"].locked);
    assert_eq!(
        form["storeExtendedInfo"].values,
        vec![ParameterValue::Flag(false); 2]
    );
}

#[test]
fn ipv6_parameters_skip_ipv4_names() {
    let block: SubnetParameters = serde_json::from_value(json!({
        "fourOverSixInterface": "eth0",
        "fourOverSixSubnet": "2001:db8:1::/64",
        "preferredLifetime": 1000,
        "minPreferredLifetime": 1000,
        "maxPreferredLifetime": 1000,
        "bootFileName": "file1",
        "matchClientID": true,
        "nextServer": "192.0.2.1",
        "pdAllocator": "flq",
        "rapidCommit": true,
        "serverHostname": "foo.example.org."
    }))
    .expect("ipv6 block");
    let form = convert_kea_subnet_parameters_to_form(AddressFamily::Ipv6, &[Some(&block)]);
    assert_eq!(form.len(), 36);
    for name in [
        "fourOverSixInterface",
        "fourOverSixInterfaceID",
        "fourOverSixSubnet",
        "bootFileName",
        "matchClientID",
        "nextServer",
        "serverHostname",
    ] {
        assert!(!form.contains_key(name), "{name}");
    }

    let preferred = &form["preferredLifetime"];
    assert_eq!(preferred.spec.kind, ParameterKind::Number);
    assert_eq!(preferred.spec.min, None);
    assert_eq!(preferred.spec.fraction_digits, None);
    assert!(preferred.locked);
    assert_eq!(preferred.values, vec![ParameterValue::Number(1000.0)]);

    let pd_allocator = &form["pdAllocator"];
    assert_eq!(pd_allocator.spec.allowed_values.len(), 3);
    assert_eq!(pd_allocator.values, vec![text("flq")]);
    assert_eq!(form["rapidCommit"].values, vec![ParameterValue::Flag(true)]);
}

#[test]
fn syntax_validators_reject_malformed_values() {
    let cases = [
        ("ddnsGeneratedPrefix", json!({"ddnsGeneratedPrefix": "-invalid.prefix"})),
        ("ddnsQualifyingSuffix", json!({"ddnsQualifyingSuffix": "123"})),
        ("fourOverSixSubnet", json!({"fourOverSixSubnet": "2001:db8:1::"})),
        ("nextServer", json!({"nextServer": "1.1.2."})),
        ("serverHostname", json!({"serverHostname": "abc..foo"})),
    ];
    for (name, raw) in cases {
        let block: SubnetParameters = serde_json::from_value(raw).expect("block");
        let form = convert_kea_subnet_parameters_to_form(AddressFamily::Ipv4, &[Some(&block)]);
        assert!(!form[name].is_valid(), "{name}");
    }
}

#[test]
fn default_subnet_forms() {
    let v4 = create_default_kea_subnet_parameters_form(AddressFamily::Ipv4);
    assert_eq!(v4.len(), 38);
    let v6 = create_default_kea_subnet_parameters_form(AddressFamily::Ipv6);
    assert_eq!(v6.len(), 36);
    for unit in v4.values().chain(v6.values()) {
        assert!(!unit.locked);
        assert_eq!(unit.values.len(), 1);
    }
}

#[test]
fn ipv4_subnet_to_form() {
    let subnet: Subnet = serde_json::from_value(json!({
        "subnet": "192.0.2.0/24",
        "sharedNetworkId": 1,
        "localSubnets": [{
            "daemonId": 1,
            "pools": [
                {"pool": "192.0.2.1-192.0.2.10", "keaConfigPoolParameters": {
                    "clientClass": "foo",
                    "requireClientClasses": ["foo", "bar"]
                }},
                {"pool": "192.0.2.20-192.0.2.30"}
            ],
            "keaConfigSubnetParameters": {"subnetLevelParameters": {
                "allocator": "random",
                "options": [{
                    "alwaysSend": true,
                    "code": 5,
                    "encapsulate": "",
                    "fields": [{"fieldType": "ipv4-address", "values": ["192.0.2.1"]}],
                    "options": [],
                    "universe": 4
                }],
                "optionsHash": "123"
            }}
        }]
    }))
    .expect("subnet");

    let entry = convert_subnet_to_form(AddressFamily::Ipv4, &subnet);
    assert_eq!(entry.subnet, "192.0.2.0/24");
    assert_eq!(entry.shared_network_id, Some(1));
    assert_eq!(entry.selected_daemons, vec![1]);
    assert_eq!(entry.pools.len(), 2);
    assert!(entry.prefix_pools.is_empty());
    assert_eq!(entry.pools[1].range.start, "192.0.2.20");
    assert_eq!(
        entry.pools[1].parameters.client_class.values,
        vec![text("")]
    );
    assert_eq!(
        entry.pools[1].parameters.require_client_classes.values,
        vec![ParameterValue::List(Vec::new())]
    );
    assert_eq!(entry.options.per_daemon.len(), 1);
    assert_eq!(
        entry.options.per_daemon[0][0].fields[0].values,
        vec!["192.0.2.1"]
    );
    assert!(entry.parameters["allocator"].locked);
    assert_eq!(entry.parameters["allocator"].values, vec![text("random")]);
}

#[test]
fn ipv6_subnet_to_form_includes_prefix_pools() {
    let subnet = load_subnet("fixtures/subnet6.json");
    let entry = convert_subnet_to_form(AddressFamily::Ipv6, &subnet);
    assert_eq!(entry.selected_daemons, vec![3, 4]);
    assert_eq!(entry.pools.len(), 1);
    assert_eq!(entry.prefix_pools.len(), 2);
    assert_eq!(entry.prefix_pools[0].daemons_in_scope, vec![3, 4]);
    assert!(entry.prefix_pools[0].options.locked);
    assert!(!entry.prefix_pools[0].parameters.pool_id.locked);
    assert_eq!(entry.prefix_pools[1].daemons_in_scope, vec![4]);
    assert!(!entry.parameters["pdAllocator"].locked);
    assert!(entry.parameters["rapidCommit"].locked);
    // Neither daemon supplied a digest and both lists are empty.
    assert!(entry.options.locked);

    let as_ipv4 = convert_subnet_to_form(AddressFamily::Ipv4, &subnet);
    assert!(as_ipv4.prefix_pools.is_empty());
}

#[test]
fn subnet_without_local_subnets() {
    let subnet = Subnet {
        subnet: "192.0.2.0/24".to_string(),
        ..Subnet::default()
    };
    let entry = convert_subnet_to_form(AddressFamily::Ipv4, &subnet);
    assert_eq!(entry.subnet, "192.0.2.0/24");
    assert!(entry.options.per_daemon.is_empty());
    assert!(entry.selected_daemons.is_empty());
    let allocator = &entry.parameters["allocator"];
    assert!(allocator.locked);
    assert!(allocator.values.is_empty());

    let back = convert_form_to_subnet(&entry).expect("subnet");
    assert!(back.local_subnets.is_empty());
}

#[test]
fn repeated_daemon_views_keep_the_first() {
    let subnet: Subnet = serde_json::from_value(json!({
        "subnet": "192.0.2.0/24",
        "localSubnets": [
            {"daemonId": 1, "keaConfigSubnetParameters": {
                "subnetLevelParameters": {"allocator": "flq"}
            }},
            {"daemonId": 1, "keaConfigSubnetParameters": {
                "subnetLevelParameters": {"allocator": "random"}
            }}
        ]
    }))
    .expect("subnet");
    let entry = convert_subnet_to_form(AddressFamily::Ipv4, &subnet);
    assert_eq!(entry.selected_daemons, vec![1]);
    assert_eq!(entry.parameters["allocator"].values, vec![text("flq")]);
}

#[test]
fn form_to_kea_parameters_follows_widest_unit() {
    let family = AddressFamily::Ipv4;
    let unit = |name: &str, locked: bool, values: Vec<ParameterValue>| SharedParameter {
        spec: spec_for(name, family).expect("spec"),
        locked,
        values,
    };
    let form = [
        (
            "cacheThreshold",
            unit(
                "cacheThreshold",
                true,
                vec![ParameterValue::Number(0.5), ParameterValue::Number(0.5)],
            ),
        ),
        ("allocator", unit("allocator", false, vec![text("flq"), text("random")])),
        (
            "authoritative",
            unit(
                "authoritative",
                false,
                vec![
                    ParameterValue::Flag(true),
                    ParameterValue::Flag(false),
                    ParameterValue::Flag(false),
                ],
            ),
        ),
        (
            "relayAddresses",
            unit(
                "relayAddresses",
                false,
                vec![
                    ParameterValue::List(vec!["192.0.2.1".to_string(), "192.0.2.2".to_string()]),
                    ParameterValue::List(vec!["192.0.2.2".to_string()]),
                ],
            ),
        ),
    ]
    .into_iter()
    .map(|(name, unit)| (name.to_string(), unit))
    .collect();

    let blocks = convert_form_to_kea_subnet_parameters(&form).expect("blocks");
    assert_eq!(blocks.len(), 3);
    assert_eq!(blocks[0].cache_threshold, Some(0.5));
    assert_eq!(blocks[0].allocator.as_deref(), Some("flq"));
    assert_eq!(blocks[0].authoritative, Some(true));
    assert_eq!(
        blocks[0].relay.as_ref().map(|r| r.ip_addresses.clone()),
        Some(vec!["192.0.2.1".to_string(), "192.0.2.2".to_string()])
    );
    assert_eq!(blocks[1].cache_threshold, Some(0.5));
    assert_eq!(blocks[1].allocator.as_deref(), Some("random"));
    assert_eq!(blocks[1].authoritative, None);
    assert_eq!(
        blocks[1].relay.as_ref().map(|r| r.ip_addresses.clone()),
        Some(vec!["192.0.2.2".to_string()])
    );
    assert_eq!(blocks[2].cache_threshold, None);
    assert_eq!(blocks[2].allocator, None);
    assert_eq!(blocks[2].authoritative, None);
    assert!(blocks[2].relay.is_none());
}

#[test]
fn form_to_subnet_restores_each_daemon() {
    let subnet: Subnet = serde_json::from_value(json!({
        "subnet": "192.0.2.0/24",
        "sharedNetworkId": 1,
        "localSubnets": [
            {"daemonId": 1, "keaConfigSubnetParameters": {"subnetLevelParameters": {
                "options": [{
                    "alwaysSend": true,
                    "code": 5,
                    "encapsulate": "",
                    "fields": [{"fieldType": "ipv4-address", "values": ["192.0.2.1"]}],
                    "options": [],
                    "universe": 4
                }],
                "optionsHash": "123"
            }}},
            {"daemonId": 2, "keaConfigSubnetParameters": {
                "subnetLevelParameters": {"allocator": "random"}
            }}
        ]
    }))
    .expect("subnet");

    let entry = convert_subnet_to_form(AddressFamily::Ipv4, &subnet);
    let back = convert_form_to_subnet(&entry).expect("subnet");
    assert_eq!(back.subnet, "192.0.2.0/24");
    assert_eq!(back.shared_network_id, Some(1));
    assert_eq!(back.local_subnets.len(), 2);

    let first = back.local_subnets[0].subnet_level_parameters().expect("params");
    assert_eq!(first.options.len(), 1);
    let option = &first.options[0];
    assert!(option.always_send);
    assert_eq!(option.code, 5);
    assert_eq!(option.universe, 4);
    assert_eq!(option.fields[0].field_type, "ipv4-address");
    assert_eq!(option.fields[0].values, vec!["192.0.2.1"]);
    assert_eq!(first.allocator, None);

    let second = back.local_subnets[1].subnet_level_parameters().expect("params");
    assert_eq!(second.allocator.as_deref(), Some("random"));
    assert!(second.options.is_empty());
}

fn locked_options_subnet() -> Subnet {
    let option = json!({
        "alwaysSend": true,
        "code": 5,
        "encapsulate": "",
        "fields": [{"fieldType": "ipv4-address", "values": ["192.0.2.1"]}],
        "options": [],
        "universe": 4
    });
    serde_json::from_value(json!({
        "subnet": "192.0.2.0/24",
        "localSubnets": [
            {
                "daemonId": 1,
                "keaConfigSubnetParameters": {
                    "subnetLevelParameters": {"options": [option.clone()], "optionsHash": "123"}
                }
            },
            {
                "daemonId": 2,
                "keaConfigSubnetParameters": {
                    "subnetLevelParameters": {
                        "allocator": "random",
                        "options": [option],
                        "optionsHash": "123"
                    }
                }
            }
        ]
    }))
    .expect("subnet")
}

#[test]
fn locked_options_ignore_edits_to_other_daemons() {
    let mut entry = convert_subnet_to_form(AddressFamily::Ipv4, &locked_options_subnet());
    assert!(entry.options.locked);
    entry.options.per_daemon[1][0].fields[0].values[0] = "10.1.1.1".to_string();

    let back = convert_form_to_subnet(&entry).expect("subnet");
    let second = back.local_subnets[1].subnet_level_parameters().expect("params");
    assert_eq!(second.options.len(), 1);
    assert_eq!(second.options[0].fields[0].values, vec!["192.0.2.1"]);
}

#[test]
fn locked_edits_reach_every_daemon() {
    let mut entry = convert_subnet_to_form(AddressFamily::Ipv4, &locked_options_subnet());
    assert!(entry.options.locked);
    entry.options.per_daemon[0][0].fields[0].values[0] = "10.1.1.1".to_string();
    let allocator = entry.parameters.get_mut("allocator").expect("unit");
    assert!(!allocator.locked);
    allocator.locked = true;
    allocator.values[0] = text("flq");

    let back = convert_form_to_subnet(&entry).expect("subnet");
    assert_eq!(back.local_subnets.len(), 2);
    for local in &back.local_subnets {
        let params = local.subnet_level_parameters().expect("params");
        assert_eq!(params.options[0].fields[0].values, vec!["10.1.1.1"]);
        assert_eq!(params.allocator.as_deref(), Some("flq"));
    }
}

#[test]
fn locked_units_reach_newly_selected_daemons() {
    let subnet = load_subnet("fixtures/subnet4.json");
    let mut entry = convert_subnet_to_form(AddressFamily::Ipv4, &subnet);
    assert!(entry.parameters["allocator"].locked);
    entry.selected_daemons.push(9);

    let back = convert_form_to_subnet(&entry).expect("subnet");
    assert_eq!(back.local_subnets.len(), 3);
    let added = &back.local_subnets[2];
    assert_eq!(added.daemon_id, 9);
    assert!(added.pools.is_empty());
    let params = added.subnet_level_parameters().expect("params");
    assert_eq!(params.allocator.as_deref(), Some("random"));
    // Unlocked units have no slot for the new daemon.
    assert_eq!(params.valid_lifetime, None);
    assert_eq!(params.options.len(), 1);
}

#[test]
fn malformed_form_is_rejected() {
    let subnet = load_subnet("fixtures/subnet4.json");
    let mut entry = convert_subnet_to_form(AddressFamily::Ipv4, &subnet);
    let lifetime = entry.parameters.get_mut("validLifetime").expect("unit");
    lifetime.values[0] = text("forever");

    let err = convert_form_to_subnet(&entry).expect_err("type mismatch");
    assert!(
        matches!(err, FormError::TypeMismatch { ref parameter, .. } if parameter == "validLifetime")
    );

    let mut entry = convert_subnet_to_form(AddressFamily::Ipv4, &subnet);
    let unit = entry.parameters["allocator"].clone();
    entry.parameters.insert("bogusKnob".to_string(), unit);
    let err = convert_form_to_subnet(&entry).expect_err("unknown parameter");
    assert_eq!(err, FormError::UnknownParameter("bogusKnob".to_string()));
}

#[test]
fn parameters_of_the_other_family_are_rejected() {
    let subnet = load_subnet("fixtures/subnet6.json");
    let mut entry = convert_subnet_to_form(AddressFamily::Ipv6, &subnet);
    let unit = entry.parameters["interface"].clone();
    entry.parameters.insert("nextServer".to_string(), unit);

    let err = convert_form_to_subnet(&entry).expect_err("not applicable");
    assert_eq!(
        err,
        FormError::NotApplicable {
            parameter: "nextServer".to_string(),
            family: AddressFamily::Ipv6,
        }
    );
    assert_eq!(
        err.to_string(),
        "parameter 'nextServer' does not apply to IPv6 subnets"
    );
}
