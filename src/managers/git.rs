//! Version control operations in the project's working tree

use super::{run_tool, scope_suffix, work_dir};
use crate::capabilities::GitOps;
use crate::outcome::CapabilityPayload;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::sync::OnceCell;

pub struct GitManager {
    root: PathBuf,
    checked: OnceCell<()>,
}

impl GitManager {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            checked: OnceCell::new(),
        }
    }

    fn dir(&self, project: Option<&str>) -> Result<PathBuf> {
        let dir = work_dir(&self.root, project);
        if !dir.exists() {
            bail!("no such project directory: {}", dir.display());
        }
        Ok(dir)
    }
}

#[async_trait]
impl GitOps for GitManager {
    async fn initialize(&self) -> Result<()> {
        self.checked
            .get_or_try_init(|| async {
                run_tool("git", &["--version"], None)
                    .await
                    .context("git is not available")?;
                Ok::<(), anyhow::Error>(())
            })
            .await?;
        Ok(())
    }

    async fn status(&self, project: Option<&str>) -> Result<CapabilityPayload> {
        let dir = self.dir(project)?;
        let out = run_tool("git", &["status", "--porcelain=v1"], Some(&dir))
            .await
            .context("git status failed")?;
        if out.stdout.trim().is_empty() {
            return Ok(CapabilityPayload::Text(format!(
                "Working tree clean{}",
                scope_suffix(project)
            )));
        }
        Ok(CapabilityPayload::Text(out.stdout))
    }

    async fn commit(&self, project: Option<&str>, message: &str) -> Result<CapabilityPayload> {
        let dir = self.dir(project)?;
        run_tool("git", &["add", "-A"], Some(&dir))
            .await
            .context("git add failed")?;
        let out = run_tool("git", &["commit", "-m", message], Some(&dir))
            .await
            .context("git commit failed")?;
        let summary = out.stdout.lines().next().unwrap_or("").trim().to_string();
        Ok(CapabilityPayload::Text(if summary.is_empty() {
            format!("Committed: {}", message)
        } else {
            summary
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_status_requires_project_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mgr = GitManager::new(dir.path().to_path_buf());
        let err = mgr.status(Some("ghost")).await.unwrap_err();
        assert!(err.to_string().contains("no such project directory"));
    }

    #[tokio::test]
    async fn test_status_and_commit_in_fresh_repo() {
        let dir = tempfile::tempdir().unwrap();
        let repo = dir.path().join("demo");
        std::fs::create_dir_all(&repo).unwrap();
        run_tool("git", &["init", "-q"], Some(&repo)).await.unwrap();
        run_tool("git", &["config", "user.email", "t@t.t"], Some(&repo))
            .await
            .unwrap();
        run_tool("git", &["config", "user.name", "t"], Some(&repo))
            .await
            .unwrap();
        std::fs::write(repo.join("readme.md"), "hello").unwrap();

        let mgr = GitManager::new(dir.path().to_path_buf());
        mgr.initialize().await.unwrap();

        match mgr.status(Some("demo")).await.unwrap() {
            CapabilityPayload::Text(text) => assert!(text.contains("readme.md")),
            other => panic!("expected text, got {:?}", other),
        }

        mgr.commit(Some("demo"), "first commit").await.unwrap();

        match mgr.status(Some("demo")).await.unwrap() {
            CapabilityPayload::Text(text) => assert!(text.contains("clean")),
            other => panic!("expected text, got {:?}", other),
        }
    }
}
