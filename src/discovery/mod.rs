use crate::model::resource_descriptor::ResourceList;
use crate::util::error::CatalogError;

pub mod fixture_discovery;
pub mod kube_discovery;

/// Input side of a read: the preferred resources of every API group, one list per
/// group-version.
#[allow(async_fn_in_trait)]
pub trait DiscoverySource {
    async fn server_preferred_resources(&self) -> Result<Vec<ResourceList>, CatalogError>;
}
