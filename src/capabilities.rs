//! Capability seams between the command core and the delegate managers
//!
//! One trait per manager category. Every trait carries an `initialize` step
//! that adapters call immediately before the domain operation; repeated
//! initialization must be a no-op or cheap, since handles live for the whole
//! process and every command execution re-triggers it.
//!
//! The core only ever sees these traits, so tests drive the dispatcher with
//! stub implementations and never touch docker, git, or the filesystem.

use crate::config::CliConfig;
use crate::managers;
use crate::outcome::CapabilityPayload;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Parameters for creating a new project.
#[derive(Clone, Debug, PartialEq)]
pub struct NewProject {
    pub name: String,
    pub port: u16,
    pub kind: String,
}

/// Parameters for a production deployment.
#[derive(Clone, Debug, PartialEq)]
pub struct DeployRequest {
    pub branch: String,
    pub clear_cache: bool,
    pub message: String,
}

#[async_trait]
pub trait ProjectOps: Send + Sync {
    async fn initialize(&self) -> Result<()>;
    async fn create_project(&self, spec: NewProject) -> Result<CapabilityPayload>;
    async fn list_projects(&self) -> Result<CapabilityPayload>;
    async fn delete_project(&self, name: &str) -> Result<CapabilityPayload>;
}

#[async_trait]
pub trait ContainerOps: Send + Sync {
    async fn initialize(&self) -> Result<()>;
    async fn start_containers(&self, project: Option<&str>) -> Result<CapabilityPayload>;
    async fn stop_containers(&self, project: Option<&str>) -> Result<CapabilityPayload>;
    async fn restart_containers(&self, project: Option<&str>) -> Result<CapabilityPayload>;
    async fn show_logs(&self, project: Option<&str>) -> Result<CapabilityPayload>;
}

#[async_trait]
pub trait ResearchOps: Send + Sync {
    async fn initialize(&self) -> Result<()>;
    async fn research_topic(&self, project: Option<&str>, topic: &str)
        -> Result<CapabilityPayload>;
    async fn generate_content(&self, project: &str, kind: &str) -> Result<CapabilityPayload>;
}

#[async_trait]
pub trait TestingOps: Send + Sync {
    async fn initialize(&self) -> Result<()>;
    async fn test_links(&self, project: Option<&str>) -> Result<CapabilityPayload>;
    async fn test_seo(&self, project: Option<&str>) -> Result<CapabilityPayload>;
    async fn run_comprehensive(&self, project: Option<&str>) -> Result<CapabilityPayload>;
}

#[async_trait]
pub trait DatabaseOps: Send + Sync {
    async fn initialize(&self) -> Result<()>;
    async fn dump_database(&self, project: Option<&str>, label: &str)
        -> Result<CapabilityPayload>;
    async fn import_database(&self, project: Option<&str>, file: &str)
        -> Result<CapabilityPayload>;
}

#[async_trait]
pub trait GitOps: Send + Sync {
    async fn initialize(&self) -> Result<()>;
    async fn status(&self, project: Option<&str>) -> Result<CapabilityPayload>;
    async fn commit(&self, project: Option<&str>, message: &str) -> Result<CapabilityPayload>;
}

#[async_trait]
pub trait DeployOps: Send + Sync {
    async fn initialize(&self) -> Result<()>;
    async fn deploy(&self, project: Option<&str>, request: DeployRequest)
        -> Result<CapabilityPayload>;
}

#[async_trait]
pub trait WordPressOps: Send + Sync {
    async fn initialize(&self) -> Result<()>;
    async fn install_theme(&self, project: Option<&str>, theme: &str)
        -> Result<CapabilityPayload>;
    async fn install_plugin(&self, project: Option<&str>, plugin: &str)
        -> Result<CapabilityPayload>;
}

/// The bundle of capability handles (plus config defaults) every handler
/// adapter resolves against. Created once at process start.
#[derive(Clone)]
pub struct Capabilities {
    pub config: CliConfig,
    pub projects: Arc<dyn ProjectOps>,
    pub containers: Arc<dyn ContainerOps>,
    pub research: Arc<dyn ResearchOps>,
    pub testing: Arc<dyn TestingOps>,
    pub database: Arc<dyn DatabaseOps>,
    pub git: Arc<dyn GitOps>,
    pub deploy: Arc<dyn DeployOps>,
    pub wordpress: Arc<dyn WordPressOps>,
}

impl Capabilities {
    /// Wire up the live managers. Constructors do no I/O; each manager's
    /// `initialize` does its own lazy setup on first use.
    pub fn live(config: CliConfig) -> Self {
        let root = config.projects_root.clone();
        Self {
            projects: Arc::new(managers::project::ProjectManager::new(root.clone())),
            containers: Arc::new(managers::docker::DockerManager::new(root.clone())),
            research: Arc::new(managers::research::ResearchManager::new(root.clone())),
            testing: Arc::new(managers::testing::TestingManager::new(
                root.clone(),
                config.site_host.clone(),
                config.default_port,
            )),
            database: Arc::new(managers::database::DatabaseManager::new(root.clone())),
            git: Arc::new(managers::git::GitManager::new(root.clone())),
            deploy: Arc::new(managers::deploy::DeployManager::new(root.clone())),
            wordpress: Arc::new(managers::wordpress::WordPressManager::new(root)),
            config,
        }
    }
}
