//! Project directory management
//!
//! A project is a subdirectory of the projects root holding a
//! docker-compose.yml, a project.json metadata file, and the content dirs
//! the other managers write into.

use super::{meta_path, read_project_meta, ProjectMeta};
use crate::capabilities::{NewProject, ProjectOps};
use crate::outcome::{CapabilityPayload, Row};
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;

pub struct ProjectManager {
    root: PathBuf,
}

impl ProjectManager {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn compose_file(spec: &NewProject) -> String {
        format!(
            r#"services:
  wordpress:
    image: wordpress:latest
    ports:
      - "{port}:80"
    environment:
      WORDPRESS_DB_HOST: db
      WORDPRESS_DB_USER: wordpress
      WORDPRESS_DB_PASSWORD: wordpress
      WORDPRESS_DB_NAME: {name}
    volumes:
      - ./wp-content:/var/www/html/wp-content
  db:
    image: mariadb:latest
    environment:
      MYSQL_DATABASE: {name}
      MYSQL_USER: wordpress
      MYSQL_PASSWORD: wordpress
      MYSQL_ROOT_PASSWORD: wordpress
"#,
            port = spec.port,
            name = spec.name,
        )
    }
}

#[async_trait]
impl ProjectOps for ProjectManager {
    /// Ensure the projects root exists. Safe to repeat.
    async fn initialize(&self) -> Result<()> {
        fs::create_dir_all(&self.root)
            .await
            .context("failed to create projects root")?;
        Ok(())
    }

    async fn create_project(&self, spec: NewProject) -> Result<CapabilityPayload> {
        let dir = self.root.join(&spec.name);
        if dir.exists() {
            bail!("project {} already exists", spec.name);
        }

        fs::create_dir_all(dir.join("wp-content"))
            .await
            .context("failed to create project directory")?;
        fs::create_dir_all(dir.join("content")).await?;
        fs::write(dir.join("docker-compose.yml"), Self::compose_file(&spec))
            .await
            .context("failed to write docker-compose.yml")?;

        let meta = ProjectMeta {
            name: spec.name.clone(),
            port: spec.port,
            kind: spec.kind.clone(),
        };
        fs::write(
            meta_path(&self.root, &spec.name),
            serde_json::to_string_pretty(&meta)?,
        )
        .await
        .context("failed to write project metadata")?;

        Ok(CapabilityPayload::Text(format!(
            "Project {} created on port {}",
            spec.name, spec.port
        )))
    }

    async fn list_projects(&self) -> Result<CapabilityPayload> {
        let mut rows: Vec<Row> = Vec::new();
        let mut entries = fs::read_dir(&self.root)
            .await
            .context("failed to read projects root")?;

        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            let meta = read_project_meta(&self.root, &name).await;
            // Same column set for every row, metadata or not.
            rows.push(vec![
                ("name".to_string(), name.clone()),
                (
                    "port".to_string(),
                    meta.as_ref()
                        .map(|m| m.port.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                ),
                (
                    "kind".to_string(),
                    meta.map(|m| m.kind).unwrap_or_else(|| "-".to_string()),
                ),
            ]);
        }
        rows.sort_by(|a, b| a[0].1.cmp(&b[0].1));

        let message = match rows.len() {
            0 => "No projects yet".to_string(),
            1 => "1 project".to_string(),
            n => format!("{} projects", n),
        };
        Ok(CapabilityPayload::Report { message, rows })
    }

    async fn delete_project(&self, name: &str) -> Result<CapabilityPayload> {
        let dir = self.root.join(name);
        if !dir.exists() {
            bail!("project {} does not exist", name);
        }
        fs::remove_dir_all(&dir)
            .await
            .context(format!("failed to delete project {}", name))?;
        Ok(CapabilityPayload::Text(format!("Project {} deleted", name)))
    }
}
