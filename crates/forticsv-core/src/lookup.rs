// Name-to-display-value lookup table
//
// Built once per run (only when translation is requested) from three
// collections in priority order: address objects, then IP pools, then
// virtual IPs. Insertion order is the precedence rule -- a later source
// overwrites an earlier entry with the same name.

use std::collections::HashMap;

use crate::model::{AddressObject, IpPool, Vip};

/// Maps object names to the human-readable address they stand for.
#[derive(Debug, Default)]
pub struct Lookup {
    entries: HashMap<String, String>,
}

impl Lookup {
    /// Build the full table from the three source collections, applying
    /// the address < pool < VIP precedence.
    pub fn build(addresses: &[AddressObject], pools: &[IpPool], vips: &[Vip]) -> Self {
        let mut table = Self::default();
        table.add_addresses(addresses);
        table.add_pools(pools);
        table.add_vips(vips);
        table
    }

    /// Insert one entry. Last write wins.
    pub fn insert(&mut self, name: String, value: String) {
        self.entries.insert(name, value);
    }

    /// Resolve an object name to its display value.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add address objects: `ipmask` as `ip/prefixlen`, `iprange` as
    /// `start-end`. Other types contribute nothing.
    pub fn add_addresses(&mut self, addresses: &[AddressObject]) {
        for address in addresses {
            if let Some(value) = address.display_value() {
                self.insert(address.name.clone(), value);
            }
        }
    }

    /// Add IP pools, overwriting address entries with the same name.
    pub fn add_pools(&mut self, pools: &[IpPool]) {
        for pool in pools {
            self.insert(pool.name.clone(), pool.display_value());
        }
    }

    /// Add virtual IPs by external address, overwriting earlier entries
    /// with the same name.
    pub fn add_vips(&mut self, vips: &[Vip]) {
        for vip in vips {
            self.insert(vip.name.clone(), vip.extip.clone());
        }
    }
}
