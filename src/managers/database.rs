//! Database dump and import through the project's db container
//!
//! Dumps land in the project's `dumps/` directory; imports read from the
//! same place. Both stream through `docker compose exec` so no local mysql
//! client is required.

use super::{run_tool, scope_suffix, work_dir};
use crate::capabilities::DatabaseOps;
use crate::outcome::CapabilityPayload;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;

pub struct DatabaseManager {
    root: PathBuf,
}

impl DatabaseManager {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

#[async_trait]
impl DatabaseOps for DatabaseManager {
    async fn initialize(&self) -> Result<()> {
        // Nothing to set up; the compose exec calls carry their own checks.
        Ok(())
    }

    async fn dump_database(&self, project: Option<&str>, label: &str) -> Result<CapabilityPayload> {
        let dir = work_dir(&self.root, project);
        if !dir.exists() {
            bail!("no such project directory: {}", dir.display());
        }
        tokio::fs::create_dir_all(dir.join("dumps"))
            .await
            .context("failed to create dumps directory")?;

        let script = concat!(
            "docker compose exec -T db sh -c ",
            "'exec mysqldump -uroot -p\"$MYSQL_ROOT_PASSWORD\" \"$MYSQL_DATABASE\"' ",
            "> dumps/latest.sql"
        );
        run_tool("sh", &["-c", script], Some(&dir))
            .await
            .context("database dump failed")?;

        Ok(CapabilityPayload::Text(format!(
            "{}: database dumped to dumps/latest.sql{}",
            label,
            scope_suffix(project)
        )))
    }

    async fn import_database(&self, project: Option<&str>, file: &str) -> Result<CapabilityPayload> {
        let dir = work_dir(&self.root, project);
        let dump = dir.join("dumps").join(file);
        if !dump.exists() {
            bail!("dump file not found: {}", dump.display());
        }

        let script = format!(
            "docker compose exec -T db sh -c \
             'exec mysql -uroot -p\"$MYSQL_ROOT_PASSWORD\" \"$MYSQL_DATABASE\"' \
             < dumps/{}",
            file
        );
        run_tool("sh", &["-c", &script], Some(&dir))
            .await
            .context("database import failed")?;

        Ok(CapabilityPayload::Text(format!(
            "Database imported from dumps/{}{}",
            file,
            scope_suffix(project)
        )))
    }
}
