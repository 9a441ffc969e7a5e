use std::path::PathBuf;

use flexi_logger::{Duplicate, FileSpec, Logger, LoggerHandle};
use log::{info, warn};

/// Creates the logs dir. On failure the dir is dropped and the reason is returned so it can
/// be logged once the logger runs.
fn prepare_logs_dir(logs_dir: Option<PathBuf>) -> (Option<PathBuf>, Option<String>) {
    match logs_dir {
        Some(dir) => match std::fs::create_dir_all(&dir) {
            Ok(_) => (Some(dir), None),
            Err(err) => {
                let reason = format!(
                    "Failed to create logs dir {}: {err}; logging to stderr only",
                    dir.display()
                );
                (None, Some(reason))
            }
        },
        None => (None, None),
    }
}

/// Starts the global logger. With a usable logs dir the output goes to `<logs_dir>/kac.log`
/// and is duplicated to stderr, otherwise it goes to stderr only. The returned handle must be
/// kept alive for the lifetime of the program.
pub fn setup_logger(logs_dir: Option<PathBuf>) -> anyhow::Result<LoggerHandle> {
    let (logs_dir, failure) = prepare_logs_dir(logs_dir);
    let logger = Logger::try_with_env_or_str("info")?;

    let logger = match &logs_dir {
        Some(logs_dir) => logger
            .log_to_file(
                FileSpec::default()
                    .directory(logs_dir)
                    .basename("kac")
                    .suppress_timestamp(),
            )
            .duplicate_to_stderr(Duplicate::All)
            .format_for_files(flexi_logger::detailed_format)
            .format_for_stderr(flexi_logger::colored_with_thread),
        None => logger
            .log_to_stderr()
            .format(flexi_logger::colored_with_thread),
    };

    let handle = logger.start()?;

    match (logs_dir, failure) {
        (Some(logs_dir), _) => info!("Ensured existence of logs dir {}", logs_dir.display()),
        (None, Some(failure)) => warn!("{failure}"),
        (None, None) => {}
    }

    Ok(handle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_creates_dir() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("nested").join("logs");

        let (prepared, failure) = prepare_logs_dir(Some(logs.clone()));
        assert_eq!(prepared, Some(logs.clone()));
        assert!(failure.is_none());
        assert!(logs.is_dir());
    }

    #[test]
    fn test_prepare_reports_unusable_dir() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        let (prepared, failure) = prepare_logs_dir(Some(blocker.join("logs")));
        assert!(prepared.is_none());
        assert!(failure.unwrap().contains("logging to stderr only"));
    }

    #[test]
    fn test_prepare_without_dir() {
        assert_eq!(prepare_logs_dir(None), (None, None));
    }
}
