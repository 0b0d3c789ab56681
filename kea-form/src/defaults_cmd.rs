use anyhow::Result;
use kea_form::config::Settings;
use kea_form_core::{
    create_default_address_pool_form, create_default_kea_subnet_parameters_form,
    create_default_prefix_pool_form, AddressFamily,
};

use crate::cli::{DefaultsArgs, PoolKind};
use crate::input::to_json;

pub fn run_defaults(args: DefaultsArgs, settings: &Settings) -> Result<()> {
    let pretty = settings.pretty && !args.compact;
    let out = match args.pool {
        Some(PoolKind::Address) => to_json(&create_default_address_pool_form(), pretty)?,
        Some(PoolKind::Prefix) => to_json(&create_default_prefix_pool_form(), pretty)?,
        None => {
            let family = args
                .family
                .map(AddressFamily::from)
                .or(settings.family)
                .unwrap_or(AddressFamily::Ipv4);
            to_json(&create_default_kea_subnet_parameters_form(family), pretty)?
        }
    };
    println!("{out}");
    Ok(())
}
