use std::sync::atomic::AtomicUsize;
use std::time::Duration;

use anyhow::Context;
use kube::Client;
use log::info;
use tokio::runtime::Runtime;

use crate::catalog::CatalogBuild;
use crate::discovery::kube_discovery::KubeDiscovery;
use crate::discovery::DiscoverySource;
use crate::read::{log_build, read_api_resources, watch_api_resources};
use crate::store::RecordSink;
use crate::traits::ext::kube_config::KubeConfigExt;
use crate::util::error::CatalogError;

/// Owns the tokio runtime every read is driven on and, unless offline, the cluster client.
pub struct K8sBackend {
    runtime: Runtime,
    client: Option<Client>,
    cluster_name: String,
}

impl K8sBackend {
    pub fn connect(num_backend_threads: usize, accept_invalid_certs: bool) -> anyhow::Result<Self> {
        let runtime = Self::spawn_runtime(num_backend_threads)?;

        let config =
            runtime.block_on(async { Self::get_default_config(accept_invalid_certs).await })?;
        info!("Initialized k8s configuration");

        let cluster_name = config.get_cluster_name();

        let client = runtime.block_on(async move { Client::try_from(config) })?;
        info!("Initialized client for {cluster_name}");

        Ok(Self {
            runtime,
            client: Some(client),
            cluster_name,
        })
    }

    /// A backend without a cluster connection, for fixture reads.
    pub fn offline(num_backend_threads: usize, name: &str) -> anyhow::Result<Self> {
        Ok(Self {
            runtime: Self::spawn_runtime(num_backend_threads)?,
            client: None,
            cluster_name: name.to_string(),
        })
    }

    async fn get_default_config(accept_invalid_certs: bool) -> Result<kube::Config, kube::Error> {
        kube::Config::infer()
            .await
            .map(|mut config| {
                config.accept_invalid_certs = accept_invalid_certs;
                config
            })
            .map_err(kube::Error::InferConfig)
    }

    fn spawn_runtime(worker_thread: usize) -> std::io::Result<Runtime> {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(worker_thread.max(1))
            .thread_name_fn(|| {
                static ATOMIC_ID: AtomicUsize = AtomicUsize::new(0);
                let id = ATOMIC_ID.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                format!("k8s-{}", id)
            })
            .enable_all()
            .build()
    }

    pub fn cluster_name(&self) -> &str {
        &self.cluster_name
    }

    pub fn discovery(&self) -> anyhow::Result<KubeDiscovery> {
        let client = self.client.as_ref().context("Backend is offline")?;
        Ok(KubeDiscovery::new(client))
    }

    pub fn read(
        &self,
        source: &impl DiscoverySource,
        sink: &mut impl RecordSink,
    ) -> Result<CatalogBuild, CatalogError> {
        info!("Listing API resources");
        let build = self.runtime.block_on(read_api_resources(source, sink))?;
        log_build(&build);
        Ok(build)
    }

    pub fn watch(
        &self,
        source: &impl DiscoverySource,
        sink: &mut impl RecordSink,
        interval: Duration,
        iterations: Option<usize>,
    ) -> usize {
        info!(
            "Watching API resources every {}s",
            interval.as_secs_f64()
        );
        self.runtime
            .block_on(watch_api_resources(source, sink, interval, iterations))
    }
}
