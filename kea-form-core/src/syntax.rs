//! Textual syntax checks used by parameter specifications.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use serde::{Deserialize, Serialize};

/// Semantic syntax a string parameter must follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SyntaxRule {
    /// Hostname prefix such as the DDNS generated prefix (`myhost`, `a.b`).
    HostnamePrefix,
    /// DNS suffix appended to partial names (`example.org`, `example.org.`).
    DnsSuffix,
    /// IPv6 prefix with an explicit length (`2001:db8::/64`).
    Ipv6Prefix,
    /// IPv4 address literal.
    Ipv4Address,
    /// Fully qualified domain name with at least two labels.
    Fqdn,
}

impl SyntaxRule {
    /// Check a non-empty string against the rule.
    pub fn accepts(self, value: &str) -> bool {
        match self {
            Self::HostnamePrefix => is_hostname_prefix(value),
            Self::DnsSuffix => is_dns_suffix(value),
            Self::Ipv6Prefix => is_ipv6_prefix(value),
            Self::Ipv4Address => is_ipv4_address(value),
            Self::Fqdn => is_fqdn(value),
        }
    }
}

/// A DNS label: 1..=63 letters, digits or hyphens, no leading/trailing hyphen.
pub fn is_dns_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= 63
        && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        && !label.starts_with('-')
        && !label.ends_with('-')
}

fn labels(value: &str) -> Option<Vec<&str>> {
    let trimmed = value.strip_suffix('.').unwrap_or(value);
    if trimmed.is_empty() || trimmed.len() > 253 {
        return None;
    }
    let labels: Vec<&str> = trimmed.split('.').collect();
    labels.iter().all(|l| is_dns_label(l)).then_some(labels)
}

fn top_level_is_alphabetic(labels: &[&str]) -> bool {
    labels
        .last()
        .is_some_and(|tld| !tld.chars().all(|c| c.is_ascii_digit()))
}

/// Valid hostname prefix: dot separated labels, no trailing dot.
pub fn is_hostname_prefix(value: &str) -> bool {
    !value.ends_with('.') && labels(value).is_some()
}

/// Valid DNS suffix: dot separated labels with a non-numeric last label.
pub fn is_dns_suffix(value: &str) -> bool {
    labels(value).is_some_and(|l| top_level_is_alphabetic(&l))
}

/// Valid fully qualified domain name.
pub fn is_fqdn(value: &str) -> bool {
    labels(value).is_some_and(|l| l.len() >= 2 && top_level_is_alphabetic(&l))
}

/// Valid IPv4 address literal.
pub fn is_ipv4_address(value: &str) -> bool {
    value.parse::<Ipv4Addr>().is_ok()
}

/// Valid IPv6 prefix in `address/length` notation.
pub fn is_ipv6_prefix(value: &str) -> bool {
    let Some((addr, len)) = value.split_once('/') else {
        return false;
    };
    addr.parse::<Ipv6Addr>().is_ok() && len.parse::<u8>().is_ok_and(|l| l <= 128)
}

/// Parse a `start-end` pool range string into its bounds.
///
/// A string without a separator yields the whole string as start and an
/// empty end.
pub fn split_range(range: &str) -> (String, String) {
    match range.split_once('-') {
        Some((start, end)) => (start.trim().to_string(), end.trim().to_string()),
        None => (range.trim().to_string(), String::new()),
    }
}

/// Valid address literal of the requested family.
pub fn is_address_of_family(value: &str, ipv6: bool) -> bool {
    match value.parse::<IpAddr>() {
        Ok(IpAddr::V4(_)) => !ipv6,
        Ok(IpAddr::V6(_)) => ipv6,
        Err(_) => false,
    }
}
