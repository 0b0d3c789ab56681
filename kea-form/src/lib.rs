//! Command-line front end for multi-daemon Kea subnet forms.
//!
//! The binary reads subnets and edited forms as JSON files and hands them to
//! `kea-form-core`. This library holds the parts worth testing on their own:
//!
//! - [`config`]: optional TOML settings file
//! - [`report`]: colored terminal rendering of diffs and validation issues

pub mod config;
pub mod report;
