use anyhow::Result;
use clap::Parser;
use log::{info, warn};

use kac::backend::k8s_backend::K8sBackend;
use kac::config::args::Args;
use kac::config::kac_configuration::{KacConfiguration, Mode};
use kac::discovery::fixture_discovery::FixtureDiscovery;
use kac::discovery::DiscoverySource;
use kac::store::fs_record_store::FsRecordStore;
use kac::store::writer_record::WriterRecord;
use kac::store::RecordSink;
use kac::util::logging::setup_logger;

fn build_sinks(configuration: &KacConfiguration, backend: &K8sBackend) -> Vec<Box<dyn RecordSink>> {
    let mut sinks: Vec<Box<dyn RecordSink>> = vec![Box::new(WriterRecord::new(
        std::io::stdout(),
        configuration.output,
    ))];

    if configuration.save_record {
        match &configuration.records_dir {
            Some(records_dir) => {
                sinks.push(Box::new(FsRecordStore::new(
                    Some(records_dir.clone()),
                    backend.cluster_name(),
                )));
            }
            None => warn!("Records dir is not available, the record will not be saved"),
        }
    }

    sinks
}

fn run(
    configuration: &KacConfiguration,
    backend: &K8sBackend,
    source: &impl DiscoverySource,
) -> Result<()> {
    let mut sinks = build_sinks(configuration, backend);

    match configuration.mode {
        Mode::Read => {
            let build = backend.read(source, &mut sinks)?;
            info!(
                "Read {} API resources, skipped {} entries",
                build.catalog.len(),
                build.skipped().count()
            );
        }
        Mode::Watch {
            interval,
            iterations,
        } => {
            let stored = backend.watch(source, &mut sinks, interval, iterations);
            info!("Stored {stored} records");
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let mut configuration = KacConfiguration::try_from(Args::parse())?;
    let _logger = setup_logger(configuration.logs_dir.clone())?;
    configuration.ensure_dirs();
    info!("{:?}", configuration);
    info!("Printing records as {}", configuration.output);

    match &configuration.fixture {
        Some(fixture) => {
            let backend = K8sBackend::offline(configuration.num_backend_threads, "fixture")?;
            run(&configuration, &backend, &FixtureDiscovery::new(fixture))
        }
        None => {
            let backend = K8sBackend::connect(
                configuration.num_backend_threads,
                configuration.accept_invalid_certs,
            )?;
            let discovery = backend.discovery()?;
            run(&configuration, &backend, &discovery)
        }
    }
}
