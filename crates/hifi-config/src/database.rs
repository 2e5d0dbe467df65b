//! Local database location.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_path() -> String {
    ".hifinder/hifinder.db".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Path of the libSQL database file. Relative paths resolve against the
    /// project root, `:memory:` keeps everything in memory.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

impl DatabaseConfig {
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.path == ":memory:"
    }

    /// Resolve the database path against `root` unless it is absolute or in-memory.
    #[must_use]
    pub fn resolve(&self, root: &Path) -> PathBuf {
        let path = Path::new(&self.path);
        if self.is_in_memory() || path.is_absolute() {
            path.to_path_buf()
        } else {
            root.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_path_joins_root() {
        let config = DatabaseConfig::default();
        assert_eq!(
            config.resolve(Path::new("/work")),
            PathBuf::from("/work/.hifinder/hifinder.db")
        );
    }

    #[test]
    fn memory_path_is_untouched() {
        let config = DatabaseConfig {
            path: ":memory:".into(),
        };
        assert!(config.is_in_memory());
        assert_eq!(config.resolve(Path::new("/work")), PathBuf::from(":memory:"));
    }
}
