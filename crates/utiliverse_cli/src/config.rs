//! Filesystem locations used by the binary.
//!
//! # Invariants
//! - Every returned path is absolute; relative flags resolve against the
//!   working directory.
//! - The log directory defaults to `<data dir>/logs`.

use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "utiliverse";
const STORE_FILE_NAME: &str = "utiliverse.sqlite3";
const LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
    pub store: PathBuf,
}

impl Paths {
    /// Resolves paths from the optional `--data-dir` / `--log-dir` flags.
    pub fn resolve(data_dir: Option<&Path>, log_dir: Option<&Path>) -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to read working directory")?;
        let data_dir = match data_dir {
            Some(dir) => absolutize(&cwd, dir),
            None => default_data_dir()?,
        };
        let log_dir = match log_dir {
            Some(dir) => absolutize(&cwd, dir),
            None => data_dir.join(LOG_DIR_NAME),
        };
        Ok(Self {
            store: data_dir.join(STORE_FILE_NAME),
            data_dir,
            log_dir,
        })
    }
}

fn default_data_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or_else(|| anyhow!("could not determine a data directory; pass --data-dir"))
}

fn absolutize(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::Paths;
    use std::path::Path;

    #[test]
    fn store_and_logs_live_under_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let paths = Paths::resolve(Some(dir.path()), None).unwrap();
        assert_eq!(paths.store, dir.path().join("utiliverse.sqlite3"));
        assert_eq!(paths.log_dir, dir.path().join("logs"));
    }

    #[test]
    fn relative_flags_become_absolute() {
        let paths = Paths::resolve(Some(Path::new("data")), Some(Path::new("logs"))).unwrap();
        assert!(paths.data_dir.is_absolute());
        assert!(paths.log_dir.is_absolute());
        assert!(paths.data_dir.ends_with("data"));
    }
}
