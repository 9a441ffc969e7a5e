use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::model::group_version::GroupVersion;
use crate::model::resource_descriptor::ResourceDescriptor;

/// A row of the catalog. Field names follow the `api_resources` record schema.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub api_group: String,
    pub api_group_version: String,
    pub name: String,
    pub fully_qualified_name: String,
    pub shortnames: BTreeSet<String>,
    pub namespaced: bool,
    pub kind: String,
    pub verbs: BTreeSet<String>,
}

impl CatalogEntry {
    /// Projects a descriptor under its parsed group-version. The fully qualified name is left
    /// empty until [`CatalogEntry::qualify`] runs.
    pub fn project(gv: &GroupVersion, descriptor: ResourceDescriptor) -> Self {
        Self {
            api_group: gv.group.clone(),
            api_group_version: gv.to_string(),
            name: descriptor.name,
            fully_qualified_name: String::new(),
            shortnames: descriptor.short_names,
            namespaced: descriptor.namespaced,
            kind: descriptor.kind,
            verbs: descriptor.verbs,
        }
    }

    pub fn qualify(&mut self) {
        self.fully_qualified_name = fully_qualified_name(&self.name, &self.api_group);
    }
}

pub fn fully_qualified_name(name: &str, group: &str) -> String {
    if group.is_empty() {
        name.to_string()
    } else {
        format!("{name}.{group}")
    }
}

/// The sorted table plus its content fingerprint.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub id: String,
    pub entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn fully_qualified_names(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .map(|entry| entry.fully_qualified_name.as_str())
    }

    pub fn fingerprint_matches(&self, other_id: &str) -> bool {
        self.id == other_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fully_qualified_name() {
        assert_eq!(fully_qualified_name("pods", ""), "pods");
        assert_eq!(
            fully_qualified_name("deployments", "apps"),
            "deployments.apps"
        );
    }

    #[test]
    fn test_project_then_qualify() {
        let descriptor = ResourceDescriptor {
            group: "ignored".to_string(),
            group_version: "networking.k8s.io/v1".to_string(),
            name: "ingresses".to_string(),
            kind: "Ingress".to_string(),
            short_names: BTreeSet::from(["ing".to_string()]),
            namespaced: true,
            verbs: BTreeSet::from(["get".to_string()]),
        };
        let gv = GroupVersion::parse("networking.k8s.io/v1").unwrap();

        let mut entry = CatalogEntry::project(&gv, descriptor);
        assert!(entry.fully_qualified_name.is_empty());

        entry.qualify();
        assert_eq!(entry.api_group, "networking.k8s.io");
        assert_eq!(entry.api_group_version, "networking.k8s.io/v1");
        assert_eq!(entry.fully_qualified_name, "ingresses.networking.k8s.io");
    }
}
