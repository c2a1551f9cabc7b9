//! Logging for askbot.
use anyhow::Context;
use askbot_core::get_data_dir;
use std::io::LineWriter;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::fmt::time::OffsetTime;

const LOG_FILTER: &str = "askbot=debug,askbot_core=debug,rustyline=info";
const MAX_LOG_BYTES: u64 = 100 * 1024;

/// Moves `askbot.log` aside to `askbot.log.old` once it grows past the size
/// limit. Any previous backup is replaced.
fn rotate_log(data_dir: &Path) -> std::io::Result<()> {
    let log_path = data_dir.join("askbot.log");
    if !log_path.exists() || std::fs::metadata(&log_path)?.len() <= MAX_LOG_BYTES {
        return Ok(());
    }

    let backup_path = data_dir.join("askbot.log.old");
    if backup_path.exists() {
        std::fs::remove_file(&backup_path)?;
    }
    std::fs::rename(&log_path, backup_path)
}

/// Sends tracing output to `<data_dir>/askbot.log`.
///
/// # Errors
///
/// Fails when the data directory or log file cannot be prepared, or when a
/// global subscriber is already installed.
pub fn setup_logging() -> anyhow::Result<()> {
    let data_dir = get_data_dir().context("Failed to get data directory")?;
    rotate_log(&data_dir).context("Failed to rotate log file")?;

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(data_dir.join("askbot.log"))?;

    // Flush after every line
    let writer = Mutex::new(LineWriter::new(log_file));

    tracing_subscriber::fmt()
        .with_env_filter(LOG_FILTER)
        .with_writer(writer)
        .with_ansi(false)
        .with_timer(OffsetTime::local_rfc_3339()?)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {e}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_rotate_log_skips_small_file() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("askbot.log"), "small").unwrap();

        rotate_log(dir.path()).unwrap();

        assert!(dir.path().join("askbot.log").exists());
        assert!(!dir.path().join("askbot.log.old").exists());
    }

    #[test]
    fn test_rotate_log_moves_large_file() {
        let dir = tempdir().unwrap();
        let large = vec![b'x'; (MAX_LOG_BYTES + 1) as usize];
        std::fs::write(dir.path().join("askbot.log"), &large).unwrap();
        std::fs::write(dir.path().join("askbot.log.old"), "stale").unwrap();

        rotate_log(dir.path()).unwrap();

        assert!(!dir.path().join("askbot.log").exists());
        let backup = std::fs::read(dir.path().join("askbot.log.old")).unwrap();
        assert_eq!(backup.len(), large.len());
    }

    #[test]
    fn test_rotate_log_without_file() {
        let dir = tempdir().unwrap();
        assert!(rotate_log(dir.path()).is_ok());
    }
}
