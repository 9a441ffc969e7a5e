use std::path::{Path, PathBuf};

use k8s_openapi::apimachinery::pkg::apis::meta::v1::APIResource;
use serde::Deserialize;

use crate::discovery::DiscoverySource;
use crate::model::resource_descriptor::{ResourceDescriptor, ResourceList};
use crate::util::error::CatalogError;

/// Same shape as a discovery `APIResourceList` document, minus `apiVersion`/`kind`.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
struct FixtureList {
    group_version: String,
    #[serde(default)]
    resources: Vec<APIResource>,
}

impl From<FixtureList> for ResourceList {
    fn from(list: FixtureList) -> Self {
        let resources = list
            .resources
            .into_iter()
            .map(|resource| ResourceDescriptor::from((list.group_version.as_str(), resource)))
            .collect();
        ResourceList::new(&list.group_version, resources)
    }
}

/// Discovery answered from a YAML file, for offline runs.
#[derive(Debug)]
pub struct FixtureDiscovery {
    path: PathBuf,
}

impl FixtureDiscovery {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    pub fn parse(content: &str) -> Result<Vec<ResourceList>, CatalogError> {
        let lists: Vec<FixtureList> = serde_yaml::from_str(content)?;
        Ok(lists.into_iter().map(ResourceList::from).collect())
    }
}

impl DiscoverySource for FixtureDiscovery {
    async fn server_preferred_resources(&self) -> Result<Vec<ResourceList>, CatalogError> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        Self::parse(&content)
    }
}
