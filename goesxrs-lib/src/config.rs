use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Remote directory holding the SolarSoft GOES reference tables.
pub const DEFAULT_REMOTE_URL: &str = "https://hesperia.gsfc.nasa.gov/ssw/gen/idl/synoptic/goes/";

/// Where reference tables live and how to obtain them.
///
/// Passed explicitly to [`crate::DirectorySource`]; nothing here is global.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChiantiConfig {
    /// Base URL the table files are fetched from.
    pub remote_url: String,
    /// Local directory the table files are read from.
    pub data_dir: PathBuf,
    /// Fetch the tables again even when a local copy exists.
    pub download: bool,
}

impl Default for ChiantiConfig {
    fn default() -> Self {
        Self {
            remote_url: DEFAULT_REMOTE_URL.to_string(),
            data_dir: default_data_dir(),
            download: false,
        }
    }
}

impl ChiantiConfig {
    /// Defaults overridden by `GOESXRS_REMOTE_URL`, `GOESXRS_DATA_DIR` and
    /// `GOESXRS_DOWNLOAD` (`1`/`true`).
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = env::var("GOESXRS_REMOTE_URL") {
            config.remote_url = url;
        }
        if let Ok(flag) = env::var("GOESXRS_DOWNLOAD") {
            config.download = matches!(flag.trim().to_lowercase().as_str(), "1" | "true" | "yes");
        }
        config
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }
}

/// `$GOESXRS_DATA_DIR`, else `$HOME/.cache/goesxrs`.
pub fn default_data_dir() -> PathBuf {
    if let Ok(dir) = env::var("GOESXRS_DATA_DIR") {
        return PathBuf::from(dir);
    }
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".cache").join("goesxrs")
}
