use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use log::{error, info};

use crate::config::kac_configuration::{KacConfiguration, Mode};
use crate::config::output_format::OutputFormat;
use crate::util::error::CatalogError;
use crate::util::paths::KAC_HOME_DIR;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = r###"kac lists every API resource type a cluster serves, sorted by fully qualified
name, together with a content id that changes only when that set of names changes.
"###
)]
pub struct Args {
    /// A directory where kac keeps its logs and records.
    #[arg(long, default_value_os_t = KAC_HOME_DIR.clone())]
    home_dir: PathBuf,

    /// A directory where kac logs will be stored. If not specified, it will be set to
    /// [<kac-home-dir>/logs]. If the directory can't be created, logs go to stderr only.
    #[arg(long)]
    logs_dir: Option<PathBuf>,

    /// A directory where records are saved as <cluster-name>.yaml. If not specified, it will
    /// be set to [<kac-home-dir>/records].
    #[arg(long)]
    records_dir: Option<PathBuf>,

    /// Read discovery data from a YAML file of APIResourceList documents instead of a cluster.
    #[arg(long)]
    fixture: Option<PathBuf>,

    /// Output format of the record printed to stdout.
    #[arg(long, default_value_t = OutputFormat::Yaml)]
    output: OutputFormat,

    /// Also save the record into the records dir.
    #[arg(long, default_value_t = false)]
    save: bool,

    /// Number of tokio worker threads used to communicate with k8s cluster.
    #[arg(long, default_value_t = 2)]
    num_backend_threads: usize,

    /// Skip TLS verification of the cluster API server.
    #[arg(long, default_value_t = false)]
    accept_invalid_certs: bool,

    #[command(subcommand)]
    action: Option<Action>,
}

#[derive(clap::Subcommand, Debug)]
enum Action {
    /// Read the API resources once (default)
    Read {},
    /// Re-read the API resources periodically and emit a record whenever the id changes
    Watch {
        /// Seconds between two reads
        #[arg(long, default_value_t = 100)]
        interval: u64,

        /// Stop after this many reads
        #[arg(long)]
        iterations: Option<usize>,
    },
}

pub fn get_logs_dir(kac_home_dir: &Path) -> PathBuf {
    kac_home_dir.join("logs")
}

pub fn get_records_dir(kac_home_dir: &Path) -> PathBuf {
    kac_home_dir.join("records")
}

impl TryFrom<Args> for KacConfiguration {
    type Error = CatalogError;

    fn try_from(value: Args) -> Result<Self, Self::Error> {
        let home_dir = value.home_dir;
        let logs_dir = value.logs_dir.unwrap_or_else(|| get_logs_dir(&home_dir));
        let records_dir = value
            .records_dir
            .unwrap_or_else(|| get_records_dir(&home_dir));

        if value.num_backend_threads == 0 {
            return Err("num-backend-threads must be at least 1".into());
        }

        let mode = match value.action {
            None | Some(Action::Read {}) => Mode::Read,
            Some(Action::Watch {
                interval,
                iterations,
            }) => {
                if interval == 0 {
                    return Err("watch interval must be at least 1 second".into());
                }
                if iterations == Some(0) {
                    return Err("watch iterations must be at least 1".into());
                }
                Mode::Watch {
                    interval: Duration::from_secs(interval),
                    iterations,
                }
            }
        };

        Ok(Self {
            home_dir: Some(home_dir),
            logs_dir: Some(logs_dir),
            records_dir: Some(records_dir),
            fixture: value.fixture,
            output: value.output,
            save_record: value.save,
            num_backend_threads: value.num_backend_threads,
            accept_invalid_certs: value.accept_invalid_certs,
            mode,
        })
    }
}

impl KacConfiguration {
    /// Creates the home dir, and the records dir when saving. A dir that can't be created is
    /// logged and unset. The logger must already be running; the logs dir is left to it.
    pub fn ensure_dirs(&mut self) {
        self.home_dir = self.home_dir.take().and_then(|dir| wrap_opt(dir, "home dir"));
        if self.save_record {
            self.records_dir = self
                .records_dir
                .take()
                .and_then(|dir| wrap_opt(dir, "records dir"));
        }
    }
}

fn wrap_opt(dir: PathBuf, name: &str) -> Option<PathBuf> {
    if create_dir(&dir, name) {
        Some(dir)
    } else {
        None
    }
}

fn create_dir(dir: &Path, name: &str) -> bool {
    match std::fs::create_dir_all(dir) {
        Ok(_) => {
            info!("Ensured existence of {name} {}", dir.display());
            true
        }
        Err(err) => {
            error!("Failed to create {name} {}: {err}", dir.display(),);
            false
        }
    }
}
