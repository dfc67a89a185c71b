use anyhow::{Result, bail};
use dirs::home_dir;
use std::path::{Path, PathBuf};

/// Name of the per-user table directory under the home directory.
pub const USER_DIR_NAME: &str = ".lookup";

/// System-wide table directory, searched after the per-user one.
pub const SYSTEM_DIR: &str = "/usr/local/share/lookup";

/// Environment variable holding extra directories to search first.
pub const PATH_ENV: &str = "LOOKUP_PATH";

/// Ordered list of directories to scan for tables, highest priority first.
///
/// Every directory is searched; earlier entries only come first in the
/// output, they never hide tables found later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPath {
    dirs: Vec<PathBuf>,
}

impl SearchPath {
    pub fn new(dirs: Vec<PathBuf>) -> Result<Self> {
        if dirs.is_empty() {
            bail!("Search path must contain at least one directory");
        }
        Ok(Self { dirs })
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }
}

pub fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(stripped) = path.strip_prefix("~") {
        if let Some(home) = home_dir() {
            return home.join(stripped);
        }
    }
    path.to_path_buf()
}

pub fn system_dir() -> PathBuf {
    PathBuf::from(SYSTEM_DIR)
}

/// The two fixed locations: `~/.lookup` followed by the system directory.
pub fn default_search_path() -> Result<SearchPath> {
    resolve_search_path(&[])
}

/// Builds the search path for one run.
///
/// `extra` directories (from `--path` or `LOOKUP_PATH`) are prepended in the
/// order given. Fails only when the home directory cannot be determined.
pub fn resolve_search_path(extra: &[PathBuf]) -> Result<SearchPath> {
    let Some(home) = home_dir() else {
        bail!("Cannot determine the current user's home directory");
    };

    let mut dirs: Vec<PathBuf> = extra
        .iter()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| expand_tilde(dir))
        .collect();
    dirs.push(home.join(USER_DIR_NAME));
    dirs.push(system_dir());

    tracing::debug!(?dirs, "resolved search path");
    SearchPath::new(dirs)
}
