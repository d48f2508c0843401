// Typed views of the three lookup source collections.
//
// Only the fields the lookup table reads are modelled; everything else in
// the raw records stays untyped. Records that don't deserialize are
// dropped individually -- the lookup table is best-effort by contract.

use std::net::Ipv4Addr;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// A firewall address object. Only `ipmask` and `iprange` types produce
/// a lookup display value; every other type is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct AddressObject {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Space-separated `"ip dotted-mask"` pair for `ipmask` objects.
    #[serde(default)]
    pub subnet: String,
    #[serde(rename = "start-ip", default)]
    pub start_ip: String,
    #[serde(rename = "end-ip", default)]
    pub end_ip: String,
}

impl AddressObject {
    /// The human-readable value this object contributes to the lookup
    /// table, or `None` when its type carries no address to display.
    pub fn display_value(&self) -> Option<String> {
        match self.kind.as_str() {
            "ipmask" => {
                let (ip, mask) = self.subnet.split_once(' ')?;
                let prefix = netmask_prefix_len(mask)?;
                Some(format!("{ip}/{prefix}"))
            }
            "iprange" => Some(format!("{}-{}", self.start_ip, self.end_ip)),
            _ => None,
        }
    }
}

/// A translation IP pool.
#[derive(Debug, Clone, Deserialize)]
pub struct IpPool {
    pub name: String,
    #[serde(default)]
    pub startip: String,
    #[serde(default)]
    pub endip: String,
}

impl IpPool {
    /// Single-address pools display as the one address, ranges as
    /// `start-end`.
    pub fn display_value(&self) -> String {
        if self.startip == self.endip {
            self.startip.clone()
        } else {
            format!("{}-{}", self.startip, self.endip)
        }
    }
}

/// A virtual IP (DNAT target). Displays as its external address.
#[derive(Debug, Clone, Deserialize)]
pub struct Vip {
    pub name: String,
    #[serde(default)]
    pub extip: String,
}

/// Convert a dotted-decimal netmask into its prefix length.
///
/// Non-contiguous masks (set bits after a clear bit) are rejected --
/// they have no prefix-length form.
pub fn netmask_prefix_len(mask: &str) -> Option<u32> {
    let addr: Ipv4Addr = mask.parse().ok()?;
    let bits = u32::from(addr);
    (bits.count_ones() == bits.leading_ones()).then_some(bits.count_ones())
}

/// Deserialize each raw record into `T`, dropping the ones that don't
/// fit. Malformed lookup sources lose entries, never the whole run.
pub fn from_results<T: DeserializeOwned>(results: &[Value]) -> Vec<T> {
    results
        .iter()
        .filter_map(|record| match serde_json::from_value(record.clone()) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                debug!("skipping malformed record: {err}");
                None
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::{AddressObject, IpPool, from_results, netmask_prefix_len};

    #[test]
    fn netmask_conversion() {
        assert_eq!(netmask_prefix_len("255.255.255.0"), Some(24));
        assert_eq!(netmask_prefix_len("255.255.255.255"), Some(32));
        assert_eq!(netmask_prefix_len("0.0.0.0"), Some(0));
        assert_eq!(netmask_prefix_len("255.255.240.0"), Some(20));
    }

    #[test]
    fn non_contiguous_or_garbage_masks_are_rejected() {
        assert_eq!(netmask_prefix_len("255.0.255.0"), None);
        assert_eq!(netmask_prefix_len("not-a-mask"), None);
    }

    #[test]
    fn ipmask_address_displays_as_cidr() {
        let addr: AddressObject = serde_json::from_value(json!({
            "name": "LanA",
            "type": "ipmask",
            "subnet": "192.168.1.0 255.255.255.0",
        }))
        .unwrap();
        assert_eq!(addr.display_value().unwrap(), "192.168.1.0/24");
    }

    #[test]
    fn iprange_address_displays_as_range() {
        let addr: AddressObject = serde_json::from_value(json!({
            "name": "Dhcp",
            "type": "iprange",
            "start-ip": "10.0.0.100",
            "end-ip": "10.0.0.199",
        }))
        .unwrap();
        assert_eq!(addr.display_value().unwrap(), "10.0.0.100-10.0.0.199");
    }

    #[test]
    fn other_address_types_contribute_nothing() {
        let addr: AddressObject = serde_json::from_value(json!({
            "name": "web",
            "type": "fqdn",
        }))
        .unwrap();
        assert_eq!(addr.display_value(), None);
    }

    #[test]
    fn pool_display_collapses_single_address() {
        let single: IpPool = serde_json::from_value(json!({
            "name": "nat-one",
            "startip": "10.0.0.5",
            "endip": "10.0.0.5",
        }))
        .unwrap();
        assert_eq!(single.display_value(), "10.0.0.5");

        let range: IpPool = serde_json::from_value(json!({
            "name": "nat-range",
            "startip": "10.0.0.1",
            "endip": "10.0.0.10",
        }))
        .unwrap();
        assert_eq!(range.display_value(), "10.0.0.1-10.0.0.10");
    }

    #[test]
    fn malformed_records_are_dropped_individually() {
        let raw = json!([
            { "name": "good", "type": "ipmask", "subnet": "10.0.0.0 255.0.0.0" },
            { "type": "ipmask" },
            42,
        ]);
        let parsed: Vec<AddressObject> = from_results(raw.as_array().unwrap());
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].name, "good");
    }
}
