//! Production deployment
//!
//! Deploys by pushing the configured branch to the project's "production"
//! git remote, then flushing the site cache through wp-cli when requested.
//! The cache flush is best-effort; a failed flush does not undo the push.

use super::{run_tool, work_dir};
use crate::capabilities::{DeployOps, DeployRequest};
use crate::outcome::CapabilityPayload;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::warn;

const PRODUCTION_REMOTE: &str = "production";

pub struct DeployManager {
    root: PathBuf,
}

impl DeployManager {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

#[async_trait]
impl DeployOps for DeployManager {
    async fn initialize(&self) -> Result<()> {
        Ok(())
    }

    async fn deploy(
        &self,
        project: Option<&str>,
        request: DeployRequest,
    ) -> Result<CapabilityPayload> {
        let dir = work_dir(&self.root, project);
        if !dir.exists() {
            bail!("no such project directory: {}", dir.display());
        }

        run_tool(
            "git",
            &["push", PRODUCTION_REMOTE, &request.branch],
            Some(&dir),
        )
        .await
        .context("push to production remote failed")?;

        let mut note = String::new();
        if request.clear_cache {
            let flush = run_tool(
                "docker",
                &["compose", "exec", "-T", "wordpress", "wp", "cache", "flush"],
                Some(&dir),
            )
            .await;
            if let Err(err) = flush {
                warn!(error = %err, "cache flush failed after deploy");
                note = " (cache flush failed)".to_string();
            }
        }

        let target = project.unwrap_or("site");
        Ok(CapabilityPayload::Text(format!(
            "Deployed {} to production from branch {}{}: {}",
            target, request.branch, note, request.message
        )))
    }
}
