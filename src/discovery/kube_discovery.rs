use std::collections::BTreeMap;

use futures::future::try_join_all;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{APIResource, APIResourceList};
use kube::Client;
use log::{debug, info};

use crate::discovery::DiscoverySource;
use crate::model::resource_descriptor::{ResourceDescriptor, ResourceList};
use crate::util::error::CatalogError;

/// Group-versions of a single API group, with the one the server prefers.
#[derive(Debug, Clone, Eq, PartialEq)]
struct GroupPlan {
    core: bool,
    preferred: String,
    versions: Vec<String>,
}

#[derive(Debug, Clone)]
struct FetchedGroup {
    preferred: String,
    lists: Vec<APIResourceList>,
}

pub struct KubeDiscovery {
    client: Client,
}

impl KubeDiscovery {
    pub fn new(client: &Client) -> Self {
        Self {
            client: client.clone(),
        }
    }

    async fn plan(&self) -> Result<Vec<GroupPlan>, CatalogError> {
        let mut plans = vec![];

        let core = self.client.list_core_api_versions().await?;
        if let Some(preferred) = core.versions.first() {
            plans.push(GroupPlan {
                core: true,
                preferred: preferred.clone(),
                versions: core.versions.clone(),
            });
        }

        let groups = self.client.list_api_groups().await?;
        for group in groups.groups {
            let versions = group
                .versions
                .iter()
                .map(|v| v.group_version.clone())
                .collect::<Vec<_>>();
            let preferred = group
                .preferred_version
                .map(|v| v.group_version)
                .or_else(|| versions.first().cloned());

            match preferred {
                Some(preferred) => plans.push(GroupPlan {
                    core: false,
                    preferred,
                    versions,
                }),
                None => debug!("API group {} advertises no versions", group.name),
            }
        }

        Ok(plans)
    }

    async fn fetch(&self, plan: GroupPlan) -> Result<FetchedGroup, CatalogError> {
        let client = &self.client;
        let core = plan.core;
        let requests = plan.versions.iter().map(|gv| async move {
            if core {
                client.list_core_api_resources(gv).await
            } else {
                client.list_api_group_resources(gv).await
            }
        });
        let lists = try_join_all(requests).await?;

        Ok(FetchedGroup {
            preferred: plan.preferred,
            lists,
        })
    }
}

impl DiscoverySource for KubeDiscovery {
    async fn server_preferred_resources(&self) -> Result<Vec<ResourceList>, CatalogError> {
        let plans = self.plan().await?;
        info!("Discovering resources of {} API groups", plans.len());

        let groups = try_join_all(plans.into_iter().map(|plan| self.fetch(plan))).await?;
        Ok(preferred_resources(groups))
    }
}

/// Keeps one copy of every top-level resource per group, taken from the preferred version
/// when it serves it and from the first version that does otherwise.
fn preferred_resources(groups: Vec<FetchedGroup>) -> Vec<ResourceList> {
    let mut by_group_version: BTreeMap<String, Vec<ResourceDescriptor>> = BTreeMap::new();

    for group in groups {
        let mut selected: BTreeMap<String, (String, APIResource)> = BTreeMap::new();

        for list in group.lists {
            let is_preferred = list.group_version == group.preferred;
            for resource in list.resources {
                if resource.name.contains('/') {
                    continue;
                }
                if is_preferred || !selected.contains_key(&resource.name) {
                    selected.insert(
                        resource.name.clone(),
                        (list.group_version.clone(), resource),
                    );
                }
            }
        }

        for (_, (group_version, resource)) in selected {
            by_group_version
                .entry(group_version.clone())
                .or_default()
                .push(ResourceDescriptor::from((group_version.as_str(), resource)));
        }
    }

    by_group_version
        .into_iter()
        .map(|(group_version, resources)| ResourceList {
            group_version,
            resources,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource(name: &str, kind: &str) -> APIResource {
        APIResource {
            name: name.to_string(),
            kind: kind.to_string(),
            verbs: vec!["get".to_string()],
            ..Default::default()
        }
    }

    fn list(group_version: &str, resources: Vec<APIResource>) -> APIResourceList {
        APIResourceList {
            group_version: group_version.to_string(),
            resources,
        }
    }

    #[test]
    fn test_subresources_are_skipped() {
        let groups = vec![FetchedGroup {
            preferred: "v1".to_string(),
            lists: vec![list(
                "v1",
                vec![resource("pods", "Pod"), resource("pods/log", "Pod")],
            )],
        }];

        let lists = preferred_resources(groups);
        assert_eq!(lists.len(), 1);
        assert_eq!(lists[0].group_version, "v1");
        let names = lists[0]
            .resources
            .iter()
            .map(|r| r.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["pods"]);
    }

    #[test]
    fn test_preferred_version_wins() {
        let groups = vec![FetchedGroup {
            preferred: "autoscaling/v2".to_string(),
            lists: vec![
                list(
                    "autoscaling/v1",
                    vec![
                        resource("horizontalpodautoscalers", "HorizontalPodAutoscaler"),
                        resource("legacyscalers", "LegacyScaler"),
                    ],
                ),
                list(
                    "autoscaling/v2",
                    vec![resource("horizontalpodautoscalers", "HorizontalPodAutoscaler")],
                ),
            ],
        }];

        let lists = preferred_resources(groups);
        let by_gv = lists
            .iter()
            .map(|l| {
                (
                    l.group_version.as_str(),
                    l.resources.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(),
                )
            })
            .collect::<Vec<_>>();

        assert_eq!(
            by_gv,
            vec![
                ("autoscaling/v1", vec!["legacyscalers"]),
                ("autoscaling/v2", vec!["horizontalpodautoscalers"]),
            ]
        );
    }

    #[test]
    fn test_first_version_wins_without_preferred_copy() {
        let groups = vec![FetchedGroup {
            preferred: "example.io/v2".to_string(),
            lists: vec![
                list("example.io/v1beta1", vec![resource("widgets", "Widget")]),
                list("example.io/v1", vec![resource("widgets", "Widget")]),
                list("example.io/v2", vec![]),
            ],
        }];

        let lists = preferred_resources(groups);
        assert_eq!(lists.len(), 1);
        assert_eq!(lists[0].group_version, "example.io/v1beta1");
        assert_eq!(lists[0].resources[0].group_version, "example.io/v1beta1");
    }

    #[test]
    fn test_groups_are_independent() {
        let groups = vec![
            FetchedGroup {
                preferred: "v1".to_string(),
                lists: vec![list("v1", vec![resource("events", "Event")])],
            },
            FetchedGroup {
                preferred: "events.k8s.io/v1".to_string(),
                lists: vec![list("events.k8s.io/v1", vec![resource("events", "Event")])],
            },
        ];

        let lists = preferred_resources(groups);
        assert_eq!(lists.len(), 2);
    }
}
