//! Where tgbot keeps its files, and how it names itself on the wire.

use std::path::PathBuf;

use crate::constants;
use crate::error::{TgError, TgResult};

/// Per-user directory roots, each namespaced under `tgbot`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppDir {
    /// Holds `config.toml`.
    Config,
    /// Holds rotated log files.
    Data,
    /// Holds staged uploads.
    Cache,
}

impl AppDir {
    /// Resolve the directory, failing when the platform has no such root.
    pub fn path(self) -> TgResult<PathBuf> {
        let base = match self {
            AppDir::Config => dirs::config_dir(),
            AppDir::Data => dirs::data_dir(),
            AppDir::Cache => dirs::cache_dir(),
        };
        base.map(|root| root.join(constants::APP_NAME))
            .ok_or_else(|| TgError::Config(format!("could not determine {} directory", self.label())))
    }

    fn label(self) -> &'static str {
        match self {
            AppDir::Config => "config",
            AppDir::Data => "data",
            AppDir::Cache => "cache",
        }
    }
}

/// A configured directory, or `<root>/<child>` when the setting is empty.
pub fn dir_or_default(configured: &str, root: AppDir, child: &str) -> TgResult<PathBuf> {
    if configured.trim().is_empty() {
        Ok(root.path()?.join(child))
    } else {
        Ok(PathBuf::from(configured))
    }
}

/// User-Agent sent with every request, e.g. `tgbot/0.1.0 (linux)`.
pub fn user_agent() -> String {
    format!(
        "{}/{} ({})",
        constants::APP_NAME,
        constants::APP_VERSION,
        std::env::consts::OS
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_dir_wins() {
        let dir = dir_or_default("/srv/tgbot/uploads", AppDir::Cache, "uploads").unwrap();
        assert_eq!(dir, PathBuf::from("/srv/tgbot/uploads"));
    }

    #[test]
    fn test_empty_setting_falls_back_to_root() {
        // Roots can be missing in sandboxed environments.
        if let Ok(root) = AppDir::Cache.path() {
            assert!(root.ends_with(constants::APP_NAME));
            let dir = dir_or_default("  ", AppDir::Cache, "uploads").unwrap();
            assert_eq!(dir, root.join("uploads"));
        }
    }

    #[test]
    fn test_user_agent_names_app() {
        let agent = user_agent();
        assert!(agent.starts_with("tgbot/"));
        assert!(agent.ends_with(&format!("({})", std::env::consts::OS)));
    }
}
