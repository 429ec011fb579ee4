//! Log setup.
//!
//! The interactive session owns the terminal in raw mode, so records go to a
//! file rather than stderr.

use anyhow::{Context, Result};
use log::LevelFilter;
use log4rs::{
    append::file::FileAppender,
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Handle,
};

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} {l} {t} {m}{n}";

/// Build a log4rs config writing records at `level` and above to `path`
pub fn file_config(path: &str, level: LevelFilter) -> Result<Config> {
    let logfile = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build(path)
        .with_context(|| format!("open log file {}", path))?;

    Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(level)))
                .build("logfile", Box::new(logfile)),
        )
        .build(Root::builder().appender("logfile").build(level))
        .context("build log config")
}

/// Install the global file logger.
///
/// Keep the returned handle alive for the life of the process.
pub fn init_file_logger(path: &str, level: LevelFilter) -> Result<Handle> {
    let config = file_config(path, level)?;
    log4rs::init_config(config).context("install logger")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_config_builds() {
        let path = std::env::temp_dir().join(format!("fold-tetris-{}.log", std::process::id()));
        let path = path.to_string_lossy().to_string();
        assert!(file_config(&path, LevelFilter::Debug).is_ok());
        let _ = std::fs::remove_file(&path);
    }
}
