use std::collections::BTreeSet;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::{APIResource, APIResourceList};

/// One API resource type as advertised by a group-version in discovery.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ResourceDescriptor {
    pub group: String,
    pub group_version: String,
    pub name: String,
    pub kind: String,
    pub short_names: BTreeSet<String>,
    pub namespaced: bool,
    pub verbs: BTreeSet<String>,
}

impl ResourceDescriptor {
    pub fn is_actionable(&self) -> bool {
        !self.verbs.is_empty()
    }

    pub fn is_subresource(&self) -> bool {
        self.name.contains('/')
    }
}

/// Resources served by a single group-version.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ResourceList {
    pub group_version: String,
    pub resources: Vec<ResourceDescriptor>,
}

impl ResourceList {
    pub fn new(group_version: &str, resources: Vec<ResourceDescriptor>) -> Self {
        Self {
            group_version: group_version.to_string(),
            resources,
        }
    }
}

impl From<(&str, APIResource)> for ResourceDescriptor {
    fn from((group_version, resource): (&str, APIResource)) -> Self {
        Self {
            group: resource.group.unwrap_or_default(),
            group_version: group_version.to_string(),
            name: resource.name,
            kind: resource.kind,
            short_names: resource.short_names.unwrap_or_default().into_iter().collect(),
            namespaced: resource.namespaced,
            verbs: resource.verbs.into_iter().collect(),
        }
    }
}

impl From<APIResourceList> for ResourceList {
    fn from(list: APIResourceList) -> Self {
        let resources = list
            .resources
            .into_iter()
            .map(|resource| ResourceDescriptor::from((list.group_version.as_str(), resource)))
            .collect();

        Self {
            group_version: list.group_version,
            resources,
        }
    }
}
