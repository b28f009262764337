// ── Device directory ──
//
// Joins the realm's inventory and live status into the flat list the
// operator picks from. Every entry is one addressable appliance: shadow
// nodes and excluded product families never make it in. Entries are
// ordered by (organization, site display name), case-insensitively.

use std::collections::{HashMap, HashSet};

use indexmap::IndexSet;
use serde::Serialize;
use tracing::{debug, trace};

use crate::model::{
    ActiveTunnel, HaState, ModelLookup, Node, NodeStatus, Organization, Site, UplinkStatus,
};

/// Product family that shows up in the inventory but cannot be reached
/// over SSH.
const EXCLUDED_FAMILY: &str = "Xirrus";

/// One selectable appliance, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryEntry {
    /// Organization short name; empty when the node's organization is unknown.
    pub organization: String,
    /// Site name, plus an HA annotation for nodes in an HA pair.
    pub site: String,
    pub node_id: String,
    pub site_id: String,
    /// Product name (resolved from the model code).
    pub model: String,
    pub serial: String,
    /// Reachable addresses, internal before external, without duplicates.
    pub uplinks: Vec<String>,
    /// The controller currently holds a tunnel open to this node.
    pub active_tunnel: bool,
}

/// Raw collections the directory is joined from.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryInput<'a> {
    pub organizations: &'a [Organization],
    pub sites: &'a [Site],
    pub nodes: &'a [Node],
    pub uplinks: &'a [UplinkStatus],
    pub node_status: &'a [NodeStatus],
    pub tunnels: &'a [ActiveTunnel],
}

/// Ordered list of addressable appliances.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Directory {
    entries: Vec<DirectoryEntry>,
}

impl Directory {
    /// Join and sort. Never fails: unmatched references degrade to empty
    /// organization names or empty uplink lists.
    pub fn build(input: &DirectoryInput<'_>, models: &impl ModelLookup) -> Self {
        let org_names = index_organizations(input.organizations);
        let uplinks = index_uplinks(input.uplinks);
        let ha_states = index_ha_states(input.node_status);
        let tunnels: HashSet<&str> = input.tunnels.iter().map(|t| t.node_id.as_str()).collect();

        let mut nodes_by_site: HashMap<&str, Vec<&Node>> = HashMap::new();
        for node in input.nodes {
            if let Some(site_id) = node.site_id.as_deref() {
                nodes_by_site.entry(site_id).or_default().push(node);
            }
        }

        let mut entries = Vec::new();
        for site in input.sites {
            let Some(site_nodes) = nodes_by_site.get(site.id.as_str()) else {
                continue;
            };

            for node in site_nodes {
                let model = models.model_name(node.model.as_deref().unwrap_or_default());

                if node.is_shadow() || model.contains(EXCLUDED_FAMILY) {
                    trace!(node_id = %node.id, %model, "skipping non-addressable node");
                    continue;
                }

                let organization = node
                    .organization_id
                    .as_deref()
                    .or(site.organization_id.as_deref())
                    .and_then(|id| org_names.get(id))
                    .map(|name| (*name).to_owned())
                    .unwrap_or_default();

                let mut site_name = site.name.clone();
                let ha_state = ha_states.get(node.id.as_str()).copied().unwrap_or_default();
                if let Some(annotation) = ha_state.site_annotation() {
                    site_name.push_str(&annotation);
                }

                entries.push(DirectoryEntry {
                    organization,
                    site: site_name,
                    node_id: node.id.clone(),
                    site_id: site.id.clone(),
                    model: model.into_owned(),
                    serial: node.serial.clone().unwrap_or_default(),
                    uplinks: uplinks
                        .get(node.id.as_str())
                        .map(|set| set.iter().map(|ip| (*ip).to_owned()).collect())
                        .unwrap_or_default(),
                    active_tunnel: tunnels.contains(node.id.as_str()),
                });
            }
        }

        entries.sort_by_cached_key(|e| (e.organization.to_lowercase(), e.site.to_lowercase()));

        debug!(
            entries = entries.len(),
            nodes = input.nodes.len(),
            "built device directory"
        );
        Self { entries }
    }

    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DirectoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by its 1-based menu id.
    pub fn select(&self, id: usize) -> Option<&DirectoryEntry> {
        id.checked_sub(1).and_then(|idx| self.entries.get(idx))
    }
}

impl<'a> IntoIterator for &'a Directory {
    type Item = &'a DirectoryEntry;
    type IntoIter = std::slice::Iter<'a, DirectoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// ── Join indexes ─────────────────────────────────────────────────────

/// Organization name by id; the first record with a given id wins.
fn index_organizations(orgs: &[Organization]) -> HashMap<&str, &str> {
    let mut names = HashMap::with_capacity(orgs.len());
    for org in orgs {
        names.entry(org.id.as_str()).or_insert(org.name.as_str());
    }
    names
}

/// Reachable addresses per node, deduplicated in first-seen order.
fn index_uplinks(uplinks: &[UplinkStatus]) -> HashMap<&str, IndexSet<&str>> {
    let mut by_node: HashMap<&str, IndexSet<&str>> = HashMap::new();
    for uplink in uplinks {
        let mut addresses = uplink.reachable_addresses().peekable();
        if addresses.peek().is_none() {
            continue;
        }
        by_node
            .entry(uplink.node_id.as_str())
            .or_default()
            .extend(addresses);
    }
    by_node
}

/// HA role per node; the first status record for a node wins.
fn index_ha_states(statuses: &[NodeStatus]) -> HashMap<&str, HaState> {
    let mut roles = HashMap::with_capacity(statuses.len());
    for status in statuses {
        roles.entry(status.node_id.as_str()).or_insert(status.ha_state);
    }
    roles
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::ModelCatalog;

    // ── Fixtures ────────────────────────────────────────────────────

    fn org(id: &str, name: &str) -> Organization {
        Organization {
            id: id.into(),
            name: name.into(),
            longname: None,
        }
    }

    fn site(id: &str, name: &str, org: &str) -> Site {
        Site {
            id: id.into(),
            name: name.into(),
            organization_id: Some(org.into()),
        }
    }

    fn node(id: &str, site: &str, org: &str, model: &str, serial: Option<&str>) -> Node {
        Node {
            id: id.into(),
            site_id: Some(site.into()),
            organization_id: Some(org.into()),
            model: Some(model.into()),
            serial: serial.map(String::from),
        }
    }

    fn uplink(node: &str, internal: &str, external: Option<&str>) -> UplinkStatus {
        UplinkStatus {
            node_id: node.into(),
            internal_ip: Some(internal.into()),
            external_ip: external.map(String::from),
        }
    }

    fn status(node: &str, raw: &str) -> NodeStatus {
        NodeStatus {
            node_id: node.into(),
            ha_state: HaState::from_report(Some(raw)),
        }
    }

    fn no_lookup(_: &str) -> Option<&'static str> {
        None
    }

    // ── End to end ──────────────────────────────────────────────────

    #[test]
    fn single_node_joins_all_sources() {
        let orgs = [org("1", "ACME")];
        let sites = [site("10", "HQ", "1")];
        let nodes = [node("100", "10", "1", "SDI-130", Some("ABC123"))];
        let uplinks = [uplink("100", "10.1.1.1", Some("203.0.113.5"))];
        let statuses = [status("100", "none")];

        let dir = Directory::build(
            &DirectoryInput {
                organizations: &orgs,
                sites: &sites,
                nodes: &nodes,
                uplinks: &uplinks,
                node_status: &statuses,
                tunnels: &[],
            },
            &no_lookup,
        );

        assert_eq!(
            dir.entries(),
            [DirectoryEntry {
                organization: "ACME".into(),
                site: "HQ".into(),
                node_id: "100".into(),
                site_id: "10".into(),
                model: "SDI-130".into(),
                serial: "ABC123".into(),
                uplinks: vec!["10.1.1.1".into(), "203.0.113.5".into()],
                active_tunnel: false,
            }]
        );
    }

    // ── Uplinks ─────────────────────────────────────────────────────

    #[test]
    fn identical_internal_and_external_collapse() {
        let sites = [site("s", "HQ", "o")];
        let nodes = [node("n", "s", "o", "panda", Some("X1"))];
        let uplinks = [uplink("n", "10.0.0.1", Some("10.0.0.1"))];

        let dir = Directory::build(
            &DirectoryInput {
                sites: &sites,
                nodes: &nodes,
                uplinks: &uplinks,
                ..DirectoryInput::default()
            },
            &ModelCatalog,
        );

        assert_eq!(dir.entries()[0].uplinks, ["10.0.0.1"]);
    }

    #[test]
    fn uplinks_keep_first_seen_order_across_interfaces() {
        let sites = [site("s", "HQ", "o")];
        let nodes = [node("n", "s", "o", "panda", Some("X1"))];
        let uplinks = [
            uplink("n", "10.0.0.1", Some("198.51.100.7")),
            uplink("n", "10.0.1.1", None),
            uplink("n", "198.51.100.7", Some("198.51.100.7")),
            uplink("n", "10.0.2.1", Some("192.0.2.44")),
            uplink("other", "10.9.9.9", Some("192.0.2.99")),
        ];

        let dir = Directory::build(
            &DirectoryInput {
                sites: &sites,
                nodes: &nodes,
                uplinks: &uplinks,
                ..DirectoryInput::default()
            },
            &ModelCatalog,
        );

        assert_eq!(
            dir.entries()[0].uplinks,
            ["10.0.0.1", "198.51.100.7", "10.0.2.1", "192.0.2.44"]
        );
    }

    #[test]
    fn node_without_uplinks_is_still_listed() {
        let sites = [site("s", "Branch", "o")];
        let nodes = [node("n", "s", "o", "panda", Some("X1"))];
        let uplinks = [uplink("n", "10.0.0.1", None)];

        let dir = Directory::build(
            &DirectoryInput {
                sites: &sites,
                nodes: &nodes,
                uplinks: &uplinks,
                ..DirectoryInput::default()
            },
            &ModelCatalog,
        );

        assert_eq!(dir.len(), 1);
        assert!(dir.entries()[0].uplinks.is_empty());
    }

    // ── Exclusion ───────────────────────────────────────────────────

    #[test]
    fn shadow_and_excluded_family_nodes_are_dropped() {
        let sites = [site("s", "HQ", "o")];
        let nodes = [
            node("empty", "s", "o", "panda", Some("")),
            node("sentinel", "s", "o", "panda", Some("shadow")),
            node("null", "s", "o", "panda", None),
            node("wifi", "s", "o", "xr620", Some("XR0001")),
            node("keep", "s", "o", "panda", Some("XN0001")),
        ];

        let dir = Directory::build(
            &DirectoryInput {
                sites: &sites,
                nodes: &nodes,
                ..DirectoryInput::default()
            },
            &ModelCatalog,
        );

        let ids: Vec<_> = dir.iter().map(|e| e.node_id.as_str()).collect();
        assert_eq!(ids, ["keep"]);
        assert_eq!(dir.entries()[0].model, "SDI-130");
    }

    #[test]
    fn nodes_without_a_known_site_are_not_listed() {
        let sites = [site("s", "HQ", "o")];
        let nodes = [
            node("orphan", "gone", "o", "panda", Some("X1")),
            Node {
                site_id: None,
                ..node("homeless", "s", "o", "panda", Some("X2"))
            },
        ];

        let dir = Directory::build(
            &DirectoryInput {
                sites: &sites,
                nodes: &nodes,
                ..DirectoryInput::default()
            },
            &ModelCatalog,
        );

        assert!(dir.is_empty());
    }

    // ── Organization resolution ─────────────────────────────────────

    #[test]
    fn unknown_organization_is_empty() {
        let orgs = [org("o1", "ACME")];
        let sites = [site("s", "HQ", "o2")];
        let nodes = [node("n", "s", "o2", "panda", Some("X1"))];

        let dir = Directory::build(
            &DirectoryInput {
                organizations: &orgs,
                sites: &sites,
                nodes: &nodes,
                ..DirectoryInput::default()
            },
            &ModelCatalog,
        );

        assert_eq!(dir.entries()[0].organization, "");
    }

    #[test]
    fn first_matching_organization_wins() {
        let orgs = [org("o", "First"), org("o", "Second")];
        let sites = [site("s", "HQ", "o")];
        let nodes = [node("n", "s", "o", "panda", Some("X1"))];

        let dir = Directory::build(
            &DirectoryInput {
                organizations: &orgs,
                sites: &sites,
                nodes: &nodes,
                ..DirectoryInput::default()
            },
            &ModelCatalog,
        );

        assert_eq!(dir.entries()[0].organization, "First");
    }

    #[test]
    fn node_without_org_falls_back_to_its_site() {
        let orgs = [org("o", "ACME")];
        let sites = [site("s", "HQ", "o")];
        let nodes = [Node {
            organization_id: None,
            ..node("n", "s", "o", "panda", Some("X1"))
        }];

        let dir = Directory::build(
            &DirectoryInput {
                organizations: &orgs,
                sites: &sites,
                nodes: &nodes,
                ..DirectoryInput::default()
            },
            &ModelCatalog,
        );

        assert_eq!(dir.entries()[0].organization, "ACME");
    }

    // ── HA annotation ───────────────────────────────────────────────

    #[test]
    fn ha_pair_annotates_each_node_separately() {
        let orgs = [org("o", "ACME")];
        let sites = [site("s", "HQ", "o")];
        let nodes = [
            node("a", "s", "o", "panda", Some("X1")),
            node("b", "s", "o", "panda", Some("X2")),
            node("c", "s", "o", "panda", Some("X3")),
        ];
        let statuses = [
            status("a", "master"),
            status("b", "backup"),
            status("c", "none"),
        ];

        let dir = Directory::build(
            &DirectoryInput {
                organizations: &orgs,
                sites: &sites,
                nodes: &nodes,
                node_status: &statuses,
                ..DirectoryInput::default()
            },
            &ModelCatalog,
        );

        let labels: Vec<_> = dir
            .iter()
            .map(|e| (e.node_id.as_str(), e.site.as_str()))
            .collect();
        assert_eq!(
            labels,
            [("c", "HQ"), ("b", "HQ [HA Backup]"), ("a", "HQ [HA Master]")]
        );
        assert_eq!(sites[0].name, "HQ");
    }

    // ── Ordering ────────────────────────────────────────────────────

    #[test]
    fn organizations_differing_only_in_case_interleave() {
        let orgs = [org("o1", "acme"), org("o2", "Acme")];
        let sites = [
            site("s1", "delta", "o1"),
            site("s2", "Bravo", "o2"),
            site("s3", "alpha", "o1"),
            site("s4", "Charlie", "o2"),
        ];
        let nodes = [
            node("n1", "s1", "o1", "panda", Some("X1")),
            node("n2", "s2", "o2", "panda", Some("X2")),
            node("n3", "s3", "o1", "panda", Some("X3")),
            node("n4", "s4", "o2", "panda", Some("X4")),
        ];

        let dir = Directory::build(
            &DirectoryInput {
                organizations: &orgs,
                sites: &sites,
                nodes: &nodes,
                ..DirectoryInput::default()
            },
            &ModelCatalog,
        );

        let order: Vec<_> = dir
            .iter()
            .map(|e| (e.organization.as_str(), e.site.as_str()))
            .collect();
        assert_eq!(
            order,
            [
                ("acme", "alpha"),
                ("Acme", "Bravo"),
                ("Acme", "Charlie"),
                ("acme", "delta"),
            ]
        );
    }

    #[test]
    fn empty_organization_sorts_first() {
        let orgs = [org("o", "Zeta")];
        let sites = [site("s1", "HQ", "o"), site("s2", "Lab", "missing")];
        let nodes = [
            node("n1", "s1", "o", "panda", Some("X1")),
            node("n2", "s2", "missing", "panda", Some("X2")),
        ];

        let dir = Directory::build(
            &DirectoryInput {
                organizations: &orgs,
                sites: &sites,
                nodes: &nodes,
                ..DirectoryInput::default()
            },
            &ModelCatalog,
        );

        assert_eq!(dir.entries()[0].node_id, "n2");
        assert_eq!(dir.entries()[1].organization, "Zeta");
    }

    // ── Tunnels & selection ─────────────────────────────────────────

    #[test]
    fn active_tunnels_are_flagged_without_reordering() {
        let sites = [site("s1", "Alpha", "o"), site("s2", "Beta", "o")];
        let nodes = [
            node("n1", "s1", "o", "panda", Some("X1")),
            node("n2", "s2", "o", "panda", Some("X2")),
        ];
        let tunnels = [ActiveTunnel {
            node_id: "n2".into(),
        }];

        let dir = Directory::build(
            &DirectoryInput {
                sites: &sites,
                nodes: &nodes,
                tunnels: &tunnels,
                ..DirectoryInput::default()
            },
            &ModelCatalog,
        );

        let flags: Vec<_> = dir
            .iter()
            .map(|e| (e.node_id.as_str(), e.active_tunnel))
            .collect();
        assert_eq!(flags, [("n1", false), ("n2", true)]);
    }

    #[test]
    fn select_is_one_based() {
        let sites = [site("s", "HQ", "o")];
        let nodes = [node("n", "s", "o", "panda", Some("X1"))];

        let dir = Directory::build(
            &DirectoryInput {
                sites: &sites,
                nodes: &nodes,
                ..DirectoryInput::default()
            },
            &ModelCatalog,
        );

        assert!(dir.select(0).is_none());
        assert_eq!(dir.select(1).map(|e| e.node_id.as_str()), Some("n"));
        assert!(dir.select(2).is_none());
    }

    // ── Referential integrity ───────────────────────────────────────

    #[test]
    fn every_entry_maps_to_exactly_one_node_and_site() {
        let orgs = [org("o", "ACME")];
        let sites = [
            site("s1", "HQ", "o"),
            site("s2", "Lab", "o"),
            site("s3", "Empty", "o"),
        ];
        let nodes = [
            node("n1", "s1", "o", "panda", Some("X1")),
            node("n2", "s1", "o", "yogi", Some("X2")),
            node("n3", "s2", "o", "raccoon", Some("X3")),
            node("n4", "s2", "o", "panda", None),
        ];

        let dir = Directory::build(
            &DirectoryInput {
                organizations: &orgs,
                sites: &sites,
                nodes: &nodes,
                ..DirectoryInput::default()
            },
            &ModelCatalog,
        );

        assert_eq!(dir.len(), 3);
        for entry in &dir {
            let matching_nodes: Vec<_> = nodes.iter().filter(|n| n.id == entry.node_id).collect();
            assert_eq!(matching_nodes.len(), 1);
            assert_eq!(
                sites.iter().filter(|s| s.id == entry.site_id).count(),
                1
            );
            assert_eq!(
                matching_nodes[0].site_id.as_deref(),
                Some(entry.site_id.as_str())
            );
        }
    }
}
