//! Live delegate managers behind the capability traits
//!
//! Each manager wraps one external tool surface (docker compose, git,
//! wp-cli, curl) or the projects directory itself. They all funnel through
//! `run_tool`, which runs a command with a timeout and turns a non-zero
//! exit into an error carrying stderr.

pub mod database;
pub mod deploy;
pub mod docker;
pub mod git;
pub mod project;
pub mod research;
pub mod testing;
pub mod wordpress;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tokio::time::{timeout, Duration};

pub(crate) const TOOL_TIMEOUT_MS: u64 = 120_000;

#[derive(Debug)]
pub(crate) struct ToolOutput {
    pub stdout: String,
    #[allow(dead_code)]
    pub stderr: String,
}

/// Run an external tool to completion, capturing output.
///
/// Non-zero exit becomes an error with trimmed stderr as the message tail;
/// exceeding the timeout kills the wait and errors out.
pub(crate) async fn run_tool(
    program: &str,
    args: &[&str],
    cwd: Option<&Path>,
) -> Result<ToolOutput> {
    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    let child = cmd
        .spawn()
        .context(format!("failed to launch {}", program))?;

    let output = timeout(Duration::from_millis(TOOL_TIMEOUT_MS), async {
        child.wait_with_output().await
    })
    .await
    .context(format!("{} timed out", program))?
    .context(format!("{} did not complete", program))?;

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    if !output.status.success() {
        let code = output
            .status
            .code()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "signal".to_string());
        let tail = stderr.trim();
        if tail.is_empty() {
            bail!("{} exited with status {}", program, code);
        }
        bail!("{} exited with status {}: {}", program, code, tail);
    }

    Ok(ToolOutput { stdout, stderr })
}

/// Metadata scaffolded into each project directory at create time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProjectMeta {
    pub name: String,
    pub port: u16,
    pub kind: String,
}

pub(crate) fn meta_path(root: &Path, name: &str) -> PathBuf {
    root.join(name).join("project.json")
}

pub(crate) async fn read_project_meta(root: &Path, name: &str) -> Option<ProjectMeta> {
    let content = tokio::fs::read_to_string(meta_path(root, name)).await.ok()?;
    serde_json::from_str(&content).ok()
}

/// Working directory for a tool invocation: the project's directory when a
/// project was named, otherwise the projects root itself.
pub(crate) fn work_dir(root: &Path, project: Option<&str>) -> PathBuf {
    match project {
        Some(name) => root.join(name),
        None => root.to_path_buf(),
    }
}

/// "for <name>" suffix used in status strings.
pub(crate) fn scope_suffix(project: Option<&str>) -> String {
    match project {
        Some(name) => format!(" for {}", name),
        None => String::new(),
    }
}
