//! CLI configuration
//!
//! Defaults mirror the fixed values the command grammar promises (port 8080,
//! deploy branch "master", import file "latest.sql"); a JSON config file can
//! relocate the projects root or change the local site host.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Directory that holds one subdirectory per project.
    pub projects_root: PathBuf,
    /// Port used when "create project" does not specify one.
    pub default_port: u16,
    /// Branch pushed by "deploy to production".
    pub deploy_branch: String,
    /// Dump file used when "import database" does not specify one.
    pub import_file: String,
    /// Host the local sites are served on, for link/SEO testing.
    pub site_host: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        let home = std::env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            projects_root: home.join("wp-projects"),
            default_port: 8080,
            deploy_branch: "master".to_string(),
            import_file: "latest.sql".to_string(),
            site_host: "localhost".to_string(),
        }
    }
}

impl CliConfig {
    /// Load config from a JSON file; a missing path yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if path.exists() => {
                let content = std::fs::read_to_string(path)
                    .context(format!("failed to read config: {:?}", path))?;
                serde_json::from_str(&content)
                    .context(format!("failed to parse config: {:?}", path))
            }
            _ => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_grammar_contract() {
        let config = CliConfig::default();
        assert_eq!(config.default_port, 8080);
        assert_eq!(config.deploy_branch, "master");
        assert_eq!(config.import_file, "latest.sql");
    }

    #[test]
    fn test_missing_path_yields_defaults() {
        let config = CliConfig::load(None).unwrap();
        assert_eq!(config.default_port, 8080);
    }

    #[test]
    fn test_partial_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wpcc.json");
        std::fs::write(&path, r#"{"default_port": 9000, "site_host": "dev.local"}"#).unwrap();

        let config = CliConfig::load(Some(&path)).unwrap();
        assert_eq!(config.default_port, 9000);
        assert_eq!(config.site_host, "dev.local");
        assert_eq!(config.deploy_branch, "master");
    }
}
