use std::time::Duration;

use log::{debug, error, info};

use crate::catalog::diagnostic::Diagnostic;
use crate::catalog::{build_catalog, CatalogBuild};
use crate::discovery::DiscoverySource;
use crate::store::{RecordSink, API_RESOURCES_FIELD};
use crate::util::error::CatalogError;

/// Fetches discovery data once, builds the catalog and stores it into `sink`: the table
/// first, then the id. The sink is left untouched when the fetch fails.
pub async fn read_api_resources(
    source: &impl DiscoverySource,
    sink: &mut impl RecordSink,
) -> Result<CatalogBuild, CatalogError> {
    let lists = source.server_preferred_resources().await?;
    let build = build_catalog(lists);
    store(sink, &build)?;

    Ok(build)
}

/// Re-reads every `interval` and stores the catalog only when its id differs from the last
/// stored one. Failed reads are logged and retried on the next tick. Stops after
/// `iterations` reads when given. Returns the number of stored catalogs.
pub async fn watch_api_resources(
    source: &impl DiscoverySource,
    sink: &mut impl RecordSink,
    interval: Duration,
    iterations: Option<usize>,
) -> usize {
    let mut last_id: Option<String> = None;
    let mut stored = 0;
    let mut iteration = 0;

    loop {
        if iterations.is_some_and(|limit| iteration >= limit) {
            break;
        }
        if iteration > 0 {
            tokio::time::sleep(interval).await;
        }

        iteration += 1;
        debug!("Entered API resource watch iteration {iteration}");

        match source.server_preferred_resources().await {
            Ok(lists) => {
                let build = build_catalog(lists);
                log_build(&build);

                if last_id
                    .as_deref()
                    .is_some_and(|id| build.catalog.fingerprint_matches(id))
                {
                    debug!("API resources unchanged");
                } else {
                    match store(sink, &build) {
                        Ok(()) => {
                            info!("Stored API resources with id {}", build.catalog.id);
                            last_id = Some(build.catalog.id);
                            stored += 1;
                        }
                        Err(err) => error!("Failed to store API resources: {err}"),
                    }
                }
            }
            Err(err) => error!("Failed to list API resources: {err}"),
        }
    }

    stored
}

fn store(sink: &mut impl RecordSink, build: &CatalogBuild) -> Result<(), CatalogError> {
    sink.set_field(API_RESOURCES_FIELD, &build.catalog.entries)?;
    sink.set_id(&build.catalog.id)
}

pub fn log_build(build: &CatalogBuild) {
    for diagnostic in build.diagnostics.iter() {
        match diagnostic {
            Diagnostic::Found { .. } => debug!("{diagnostic}"),
            _ => info!("{diagnostic}"),
        }
    }
    info!(
        "Received number of API resources: {}",
        build.catalog.len()
    );
    debug!("Resource ID {}", build.catalog.id);
}
