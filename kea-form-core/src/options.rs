//! DHCP option lists shared by several daemons.

use serde::{Deserialize, Serialize};

use crate::model::DhcpOption;

/// Option lists of the daemons in scope with a lock covering the whole set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsSet {
    pub locked: bool,
    pub per_daemon: Vec<Vec<DhcpOption>>,
}

impl OptionsSet {
    /// Build the set from per-daemon option lists and their digests.
    ///
    /// `hashes` lines up with `lists`. Digests are compared when every daemon
    /// supplied one; otherwise the lists themselves are compared.
    pub fn from_per_daemon_options(lists: Vec<Vec<DhcpOption>>, hashes: &[Option<String>]) -> Self {
        let locked = if lists.len() <= 1 {
            true
        } else if hashes.len() == lists.len() && hashes.iter().all(Option::is_some) {
            hashes.windows(2).all(|pair| pair[0] == pair[1])
        } else {
            lists.windows(2).all(|pair| pair[0] == pair[1])
        };
        Self {
            locked,
            per_daemon: lists,
        }
    }

    /// Option lists for `count` daemons.
    ///
    /// A locked set gives every daemon a copy of the first list. An unlocked
    /// set is trimmed or padded with empty lists.
    pub fn to_per_daemon_options(&self, count: usize) -> Vec<Vec<DhcpOption>> {
        (0..count).map(|index| self.options_for(index)).collect()
    }

    /// Options destined for the daemon at `index` of the set's scope.
    pub fn options_for(&self, index: usize) -> Vec<DhcpOption> {
        let slot = if self.locked { 0 } else { index };
        self.per_daemon.get(slot).cloned().unwrap_or_default()
    }
}
