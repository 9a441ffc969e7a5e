use std::path::PathBuf;
use std::time::Duration;

use crate::config::output_format::OutputFormat;

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Mode {
    Read,
    Watch {
        interval: Duration,
        iterations: Option<usize>,
    },
}

#[derive(Debug)]
pub struct KacConfiguration {
    pub home_dir: Option<PathBuf>,
    pub logs_dir: Option<PathBuf>,
    pub records_dir: Option<PathBuf>,
    pub fixture: Option<PathBuf>,
    pub output: OutputFormat,
    pub save_record: bool,
    pub num_backend_threads: usize,
    pub accept_invalid_certs: bool,
    pub mode: Mode,
}
