//! Container lifecycle through docker compose
//!
//! Commands run in the named project's directory (or the projects root when
//! no project was given, driving every compose file reachable from there).

use super::{run_tool, scope_suffix, work_dir};
use crate::capabilities::ContainerOps;
use crate::outcome::CapabilityPayload;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::sync::OnceCell;

pub struct DockerManager {
    root: PathBuf,
    checked: OnceCell<()>,
}

impl DockerManager {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            checked: OnceCell::new(),
        }
    }

    async fn compose(&self, project: Option<&str>, args: &[&str]) -> Result<String> {
        let dir = work_dir(&self.root, project);
        if !dir.exists() {
            bail!("no such project directory: {}", dir.display());
        }
        let mut full = vec!["compose"];
        full.extend_from_slice(args);
        let out = run_tool("docker", &full, Some(&dir)).await?;
        Ok(out.stdout)
    }
}

#[async_trait]
impl ContainerOps for DockerManager {
    /// Verify the docker binary once per process; later calls are free.
    async fn initialize(&self) -> Result<()> {
        self.checked
            .get_or_try_init(|| async {
                run_tool("docker", &["--version"], None)
                    .await
                    .context("docker is not available")?;
                Ok::<(), anyhow::Error>(())
            })
            .await?;
        Ok(())
    }

    async fn start_containers(&self, project: Option<&str>) -> Result<CapabilityPayload> {
        self.compose(project, &["up", "-d"]).await?;
        Ok(CapabilityPayload::Text(format!(
            "Containers started{}",
            scope_suffix(project)
        )))
    }

    async fn stop_containers(&self, project: Option<&str>) -> Result<CapabilityPayload> {
        self.compose(project, &["stop"]).await?;
        Ok(CapabilityPayload::Text(format!(
            "Containers stopped{}",
            scope_suffix(project)
        )))
    }

    async fn restart_containers(&self, project: Option<&str>) -> Result<CapabilityPayload> {
        self.compose(project, &["restart"]).await?;
        Ok(CapabilityPayload::Text(format!(
            "Containers restarted{}",
            scope_suffix(project)
        )))
    }

    async fn show_logs(&self, project: Option<&str>) -> Result<CapabilityPayload> {
        let logs = self
            .compose(project, &["logs", "--no-color", "--tail", "50"])
            .await?;
        if logs.trim().is_empty() {
            return Ok(CapabilityPayload::Text(format!(
                "No log output{}",
                scope_suffix(project)
            )));
        }
        Ok(CapabilityPayload::Text(logs))
    }
}
