use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Data-file configuration.
///
/// `GYM_DATA_FILE` overrides whatever path the caller would otherwise
/// use; `gym.json` in the working directory is the usual default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Path to the durable roster file.
    pub data_file: PathBuf,
}

impl StoreConfig {
    /// The default data file used when nothing else is configured.
    pub const DEFAULT_PATH: &str = "gym.json";

    /// Environment variable that overrides the data file location.
    pub const ENV_VAR: &str = "GYM_DATA_FILE";

    /// Build a config from the environment.
    ///
    /// Priority: `GYM_DATA_FILE` env var, then `fallback`.
    pub fn from_env_or(fallback: impl Into<PathBuf>) -> Self {
        let data_file = env::var_os(Self::ENV_VAR)
            .filter(|v| !v.is_empty())
            .map_or_else(|| fallback.into(), PathBuf::from);
        Self { data_file }
    }

    /// Build a config from an explicit path (useful for tests and CLI flags).
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
        }
    }

    /// Sibling file that receives a verbatim copy of an unreadable data file.
    pub fn backup_path(&self) -> PathBuf {
        backup_path(&self.data_file)
    }

    /// Sibling file used transiently while saving.
    pub fn temp_path(&self) -> PathBuf {
        temp_path(&self.data_file)
    }
}

/// `<file>.bak` next to `path`.
pub fn backup_path(path: &Path) -> PathBuf {
    with_suffix(path, ".bak")
}

/// `<file>.tmp` next to `path`.
pub fn temp_path(path: &Path) -> PathBuf {
    with_suffix(path, ".tmp")
}

// Appends to the full file name, so `gym.json` becomes `gym.json.bak`
// rather than `gym.bak`.
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}
