//! Theme and plugin installation through wp-cli in the wordpress container

use super::{run_tool, scope_suffix, work_dir};
use crate::capabilities::WordPressOps;
use crate::outcome::CapabilityPayload;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;

pub struct WordPressManager {
    root: PathBuf,
}

impl WordPressManager {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    async fn wp(&self, project: Option<&str>, args: &[&str]) -> Result<()> {
        let dir = work_dir(&self.root, project);
        if !dir.exists() {
            bail!("no such project directory: {}", dir.display());
        }
        let mut full = vec!["compose", "exec", "-T", "wordpress", "wp"];
        full.extend_from_slice(args);
        run_tool("docker", &full, Some(&dir))
            .await
            .context("wp-cli call failed")?;
        Ok(())
    }
}

#[async_trait]
impl WordPressOps for WordPressManager {
    async fn initialize(&self) -> Result<()> {
        // wp-cli lives inside the container; nothing to check locally.
        Ok(())
    }

    async fn install_theme(&self, project: Option<&str>, theme: &str) -> Result<CapabilityPayload> {
        self.wp(project, &["theme", "install", theme, "--activate"])
            .await?;
        Ok(CapabilityPayload::Text(format!(
            "Theme {} installed and activated{}",
            theme,
            scope_suffix(project)
        )))
    }

    async fn install_plugin(
        &self,
        project: Option<&str>,
        plugin: &str,
    ) -> Result<CapabilityPayload> {
        self.wp(project, &["plugin", "install", plugin, "--activate"])
            .await?;
        Ok(CapabilityPayload::Text(format!(
            "Plugin {} installed and activated{}",
            plugin,
            scope_suffix(project)
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_install_requires_project_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mgr = WordPressManager::new(dir.path().to_path_buf());
        let err = mgr.install_theme(Some("ghost"), "astra").await.unwrap_err();
        assert!(err.to_string().contains("no such project directory"));
    }
}
