// Item-type catalog
//
// One static table from item type to (endpoint path, column schema).
// The schema doubles as the CSV column order, so adding an item type is
// one new entry here and nothing anywhere else.

use std::str::FromStr;

use strum::{Display, EnumString, VariantArray};

/// One exportable collection on the firewall.
///
/// Declaration order is the export order when all items are requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, VariantArray)]
#[strum(serialize_all = "lowercase")]
pub enum ItemType {
    Interface,
    Policy,
    Snat,
    Address,
    Service,
    Dnat,
    Pool,
    Addrgrp,
}

/// Endpoint path and CSV column schema for one item type.
#[derive(Debug, Clone, Copy)]
pub struct ItemSpec {
    /// Path relative to the firewall base URL; vdom scoping is appended
    /// by the session layer.
    pub endpoint: &'static str,
    /// Fixed field list -- defines both which record fields are extracted
    /// and the CSV column order.
    pub columns: &'static [&'static str],
}

static INTERFACE_SPEC: ItemSpec = ItemSpec {
    endpoint: "api/v2/monitor/system/available-interfaces",
    columns: &[
        "name",
        "alias",
        "description",
        "type",
        "is_vdom_link",
        "is_system_interface",
        "is_vlan",
        "status",
        "role",
        "ipv4_addresses",
        "vlan_interface",
        "vlan_id",
        "mac_address",
        "visibility",
        "comments",
    ],
};

static POLICY_SPEC: ItemSpec = ItemSpec {
    endpoint: "api/v2/cmdb/firewall/policy",
    columns: &[
        "policyid",
        "name",
        "srcintf",
        "dstintf",
        "srcaddr",
        "dstaddr",
        "internet-service-id",
        "internet-service-src-id",
        "service",
        "action",
        "status",
        "schedule",
        "visibility",
        "profile-group",
        "nat",
        "comments",
    ],
};

static SNAT_SPEC: ItemSpec = ItemSpec {
    endpoint: "api/v2/cmdb/firewall/central-snat-map/",
    columns: &[
        "policyid",
        "status",
        "orig-addr",
        "dst-addr",
        "srcintf",
        "dstintf",
        "nat",
        "nat-ippool",
        "comments",
    ],
};

static ADDRESS_SPEC: ItemSpec = ItemSpec {
    endpoint: "api/v2/cmdb/firewall/address/",
    columns: &[
        "name",
        "type",
        "subnet",
        "fqdn",
        "associated-interface",
        "visibility",
        "allow-routing",
        "comment",
    ],
};

static SERVICE_SPEC: ItemSpec = ItemSpec {
    endpoint: "api/v2/cmdb/firewall.service/custom",
    columns: &[
        "name",
        "category",
        "protocol",
        "tcp-portrange",
        "udp-portrange",
        "visibility",
        "comments",
    ],
};

static DNAT_SPEC: ItemSpec = ItemSpec {
    endpoint: "api/v2/cmdb/firewall/vip/",
    columns: &[
        "name",
        "extip",
        "mappedip",
        "extintf",
        "arp-reply",
        "nat-source-vip",
        "portforward",
        "srcintf-filter",
        "comments",
    ],
};

static POOL_SPEC: ItemSpec = ItemSpec {
    endpoint: "api/v2/cmdb/firewall/ippool/",
    columns: &[
        "name",
        "type",
        "startip",
        "endip",
        "source-startip",
        "source-endip",
        "block-size",
        "permit-any-host",
        "arp-reply",
        "comments",
    ],
};

static ADDRGRP_SPEC: ItemSpec = ItemSpec {
    endpoint: "api/v2/cmdb/firewall/addrgrp/",
    columns: &["name", "member", "comment", "visibility", "allow-routing"],
};

impl ItemType {
    /// All item types, in export order.
    pub fn all() -> &'static [Self] {
        <Self as VariantArray>::VARIANTS
    }

    /// The endpoint/schema pair for this item type.
    pub fn spec(self) -> &'static ItemSpec {
        match self {
            Self::Interface => &INTERFACE_SPEC,
            Self::Policy => &POLICY_SPEC,
            Self::Snat => &SNAT_SPEC,
            Self::Address => &ADDRESS_SPEC,
            Self::Service => &SERVICE_SPEC,
            Self::Dnat => &DNAT_SPEC,
            Self::Pool => &POOL_SPEC,
            Self::Addrgrp => &ADDRGRP_SPEC,
        }
    }
}

/// What the user asked to export: one collection, or every one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemSelection {
    All,
    One(ItemType),
}

impl ItemSelection {
    /// The item types this selection expands to, in export order.
    pub fn items(self) -> Vec<ItemType> {
        match self {
            Self::All => ItemType::all().to_vec(),
            Self::One(item) => vec![item],
        }
    }

    /// The accepted `--item` values, for error messages.
    pub fn valid_values() -> String {
        let mut names: Vec<String> = ItemType::all().iter().map(ToString::to_string).collect();
        names.push("all".into());
        names.join(", ")
    }
}

impl FromStr for ItemSelection {
    type Err = strum::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(Self::All)
        } else {
            ItemType::from_str(s).map(Self::One)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{ItemSelection, ItemType};

    #[test]
    fn every_item_has_nonempty_schema() {
        for item in ItemType::all() {
            let spec = item.spec();
            assert!(!spec.endpoint.is_empty(), "{item} endpoint");
            assert!(!spec.columns.is_empty(), "{item} columns");
        }
    }

    #[test]
    fn export_order_matches_output_file_order() {
        let order: Vec<String> = ItemType::all().iter().map(ToString::to_string).collect();
        assert_eq!(
            order,
            [
                "interface", "policy", "snat", "address", "service", "dnat", "pool", "addrgrp"
            ]
        );
    }

    #[test]
    fn selection_parses_item_names_and_all() {
        assert_eq!(
            ItemSelection::from_str("policy"),
            Ok(ItemSelection::One(ItemType::Policy))
        );
        assert_eq!(ItemSelection::from_str("all"), Ok(ItemSelection::All));
        assert!(ItemSelection::from_str("bogus").is_err());
    }

    #[test]
    fn all_selection_expands_to_eight_items() {
        assert_eq!(ItemSelection::All.items().len(), 8);
        assert_eq!(
            ItemSelection::One(ItemType::Snat).items(),
            vec![ItemType::Snat]
        );
    }

    #[test]
    fn valid_values_lists_items_and_all() {
        let values = ItemSelection::valid_values();
        assert!(values.starts_with("interface"));
        assert!(values.ends_with("all"));
    }
}
