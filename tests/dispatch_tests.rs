// wpcc_core/tests/dispatch_tests.rs
// End-to-end dispatch against a stub capability layer: routing, parameter
// extraction, default substitution, and the error boundary.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use wpcc_core::capabilities::{
    Capabilities, ContainerOps, DatabaseOps, DeployOps, DeployRequest, GitOps, NewProject,
    ProjectOps, ResearchOps, TestingOps, WordPressOps,
};
use wpcc_core::outcome::{CapabilityPayload, CommandResult, Outcome};
use wpcc_core::{CliConfig, Dispatcher};

/// Records every capability call; optionally fails git operations.
#[derive(Default)]
struct Recorder {
    calls: Mutex<Vec<String>>,
    fail_git: bool,
}

impl Recorder {
    fn log(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn ok(&self) -> Result<CapabilityPayload> {
        Ok(CapabilityPayload::Text("ok".into()))
    }
}

fn opt(project: Option<&str>) -> &str {
    project.unwrap_or("-")
}

#[async_trait]
impl ProjectOps for Recorder {
    async fn initialize(&self) -> Result<()> {
        self.log("projects.init");
        Ok(())
    }
    async fn create_project(&self, spec: NewProject) -> Result<CapabilityPayload> {
        self.log(format!(
            "projects.create({},{},{})",
            spec.name, spec.port, spec.kind
        ));
        self.ok()
    }
    async fn list_projects(&self) -> Result<CapabilityPayload> {
        self.log("projects.list");
        self.ok()
    }
    async fn delete_project(&self, name: &str) -> Result<CapabilityPayload> {
        self.log(format!("projects.delete({})", name));
        self.ok()
    }
}

#[async_trait]
impl ContainerOps for Recorder {
    async fn initialize(&self) -> Result<()> {
        self.log("containers.init");
        Ok(())
    }
    async fn start_containers(&self, project: Option<&str>) -> Result<CapabilityPayload> {
        self.log(format!("containers.start({})", opt(project)));
        self.ok()
    }
    async fn stop_containers(&self, project: Option<&str>) -> Result<CapabilityPayload> {
        self.log(format!("containers.stop({})", opt(project)));
        self.ok()
    }
    async fn restart_containers(&self, project: Option<&str>) -> Result<CapabilityPayload> {
        self.log(format!("containers.restart({})", opt(project)));
        self.ok()
    }
    async fn show_logs(&self, project: Option<&str>) -> Result<CapabilityPayload> {
        self.log(format!("containers.logs({})", opt(project)));
        self.ok()
    }
}

#[async_trait]
impl ResearchOps for Recorder {
    async fn initialize(&self) -> Result<()> {
        self.log("research.init");
        Ok(())
    }
    async fn research_topic(
        &self,
        project: Option<&str>,
        topic: &str,
    ) -> Result<CapabilityPayload> {
        self.log(format!("research.topic({},{})", opt(project), topic));
        self.ok()
    }
    async fn generate_content(&self, project: &str, kind: &str) -> Result<CapabilityPayload> {
        self.log(format!("research.generate({},{})", project, kind));
        self.ok()
    }
}

#[async_trait]
impl TestingOps for Recorder {
    async fn initialize(&self) -> Result<()> {
        self.log("testing.init");
        Ok(())
    }
    async fn test_links(&self, project: Option<&str>) -> Result<CapabilityPayload> {
        self.log(format!("testing.links({})", opt(project)));
        self.ok()
    }
    async fn test_seo(&self, project: Option<&str>) -> Result<CapabilityPayload> {
        self.log(format!("testing.seo({})", opt(project)));
        self.ok()
    }
    async fn run_comprehensive(&self, project: Option<&str>) -> Result<CapabilityPayload> {
        self.log(format!("testing.comprehensive({})", opt(project)));
        self.ok()
    }
}

#[async_trait]
impl DatabaseOps for Recorder {
    async fn initialize(&self) -> Result<()> {
        self.log("database.init");
        Ok(())
    }
    async fn dump_database(&self, project: Option<&str>, label: &str) -> Result<CapabilityPayload> {
        self.log(format!("database.dump({},{})", opt(project), label));
        self.ok()
    }
    async fn import_database(
        &self,
        project: Option<&str>,
        file: &str,
    ) -> Result<CapabilityPayload> {
        self.log(format!("database.import({},{})", opt(project), file));
        self.ok()
    }
}

#[async_trait]
impl GitOps for Recorder {
    async fn initialize(&self) -> Result<()> {
        self.log("git.init");
        Ok(())
    }
    async fn status(&self, project: Option<&str>) -> Result<CapabilityPayload> {
        self.log(format!("git.status({})", opt(project)));
        if self.fail_git {
            anyhow::bail!("git is offline");
        }
        self.ok()
    }
    async fn commit(&self, project: Option<&str>, message: &str) -> Result<CapabilityPayload> {
        self.log(format!("git.commit({},{})", opt(project), message));
        self.ok()
    }
}

#[async_trait]
impl DeployOps for Recorder {
    async fn initialize(&self) -> Result<()> {
        self.log("deploy.init");
        Ok(())
    }
    async fn deploy(
        &self,
        project: Option<&str>,
        request: DeployRequest,
    ) -> Result<CapabilityPayload> {
        self.log(format!(
            "deploy.deploy({},{},{})",
            opt(project),
            request.branch,
            request.clear_cache
        ));
        self.ok()
    }
}

#[async_trait]
impl WordPressOps for Recorder {
    async fn initialize(&self) -> Result<()> {
        self.log("wordpress.init");
        Ok(())
    }
    async fn install_theme(&self, project: Option<&str>, theme: &str) -> Result<CapabilityPayload> {
        self.log(format!("wordpress.theme({},{})", opt(project), theme));
        self.ok()
    }
    async fn install_plugin(
        &self,
        project: Option<&str>,
        plugin: &str,
    ) -> Result<CapabilityPayload> {
        self.log(format!("wordpress.plugin({},{})", opt(project), plugin));
        self.ok()
    }
}

fn dispatcher_with(recorder: Arc<Recorder>) -> Dispatcher {
    let caps = Capabilities {
        config: CliConfig::default(),
        projects: recorder.clone(),
        containers: recorder.clone(),
        research: recorder.clone(),
        testing: recorder.clone(),
        database: recorder.clone(),
        git: recorder.clone(),
        deploy: recorder.clone(),
        wordpress: recorder,
    };
    Dispatcher::new(caps)
}

fn stubbed() -> (Dispatcher, Arc<Recorder>) {
    let recorder = Arc::new(Recorder::default());
    (dispatcher_with(recorder.clone()), recorder)
}

#[tokio::test]
async fn test_unrecognized_input_invokes_no_handler() {
    let (dispatcher, recorder) = stubbed();
    let outcome = dispatcher.dispatch("frobnicate the widgets").await;
    assert_eq!(outcome, Outcome::Unrecognized);
    assert!(recorder.calls().is_empty());
}

#[tokio::test]
async fn test_empty_and_whitespace_input_never_match() {
    let (dispatcher, recorder) = stubbed();
    assert_eq!(dispatcher.dispatch("").await, Outcome::Unrecognized);
    assert_eq!(dispatcher.dispatch("   \t ").await, Outcome::Unrecognized);
    assert!(recorder.calls().is_empty());
}

#[tokio::test]
async fn test_first_match_wins_for_container_commands() {
    let (dispatcher, recorder) = stubbed();
    let outcome = dispatcher.dispatch("start containers for my-blog").await;
    match outcome {
        Outcome::Completed { name, .. } => assert_eq!(name, "start containers"),
        other => panic!("expected completion, got {:?}", other),
    }
    // Only the container capability ran, and init preceded the operation.
    assert_eq!(
        recorder.calls(),
        vec!["containers.init", "containers.start(my-blog)"]
    );
}

#[tokio::test]
async fn test_start_project_delegates_to_containers() {
    let (dispatcher, recorder) = stubbed();
    dispatcher.dispatch("start my-blog").await;
    assert_eq!(
        recorder.calls(),
        vec!["containers.init", "containers.start(my-blog)"]
    );
}

#[tokio::test]
async fn test_create_project_default_port() {
    let (dispatcher, recorder) = stubbed();
    dispatcher.dispatch("create project called demo").await;
    assert_eq!(
        recorder.calls(),
        vec!["projects.init", "projects.create(demo,8080,wordpress)"]
    );
}

#[tokio::test]
async fn test_create_project_explicit_port() {
    let (dispatcher, recorder) = stubbed();
    dispatcher
        .dispatch("create project called demo on port 9090")
        .await;
    assert_eq!(
        recorder.calls(),
        vec!["projects.init", "projects.create(demo,9090,wordpress)"]
    );
}

#[tokio::test]
async fn test_deploy_always_uses_master_and_clears_cache() {
    let (dispatcher, recorder) = stubbed();
    dispatcher.dispatch("deploy demo to production").await;
    assert_eq!(
        recorder.calls(),
        vec!["deploy.init", "deploy.deploy(demo,master,true)"]
    );
}

#[tokio::test]
async fn test_research_resolves_project_from_contextual_scan() {
    let (dispatcher, recorder) = stubbed();
    dispatcher
        .dispatch("research topic \"widgets\" for myblog")
        .await;
    assert_eq!(
        recorder.calls(),
        vec!["research.init", "research.topic(myblog,widgets)"]
    );
}

#[tokio::test]
async fn test_research_without_qualifier_has_no_project() {
    let (dispatcher, recorder) = stubbed();
    dispatcher.dispatch("research topic \"widgets\"").await;
    assert_eq!(
        recorder.calls(),
        vec!["research.init", "research.topic(-,widgets)"]
    );
}

#[tokio::test]
async fn test_git_commit_uses_own_capture_group() {
    let (dispatcher, recorder) = stubbed();
    dispatcher
        .dispatch("git commit \"fix header\" for myblog")
        .await;
    assert_eq!(
        recorder.calls(),
        vec!["git.init", "git.commit(myblog,fix header)"]
    );
}

#[tokio::test]
async fn test_import_database_default_file() {
    let (dispatcher, recorder) = stubbed();
    dispatcher.dispatch("import database for demo").await;
    assert_eq!(
        recorder.calls(),
        vec!["database.init", "database.import(demo,latest.sql)"]
    );
}

#[tokio::test]
async fn test_dump_database_label() {
    let (dispatcher, recorder) = stubbed();
    dispatcher.dispatch("dump database").await;
    assert_eq!(
        recorder.calls(),
        vec!["database.init", "database.dump(-,CLI database dump)"]
    );
}

#[tokio::test]
async fn test_install_plugin_routes_to_plugin_not_theme() {
    let (dispatcher, recorder) = stubbed();
    dispatcher.dispatch("install plugin wp-seo for demo").await;
    assert_eq!(
        recorder.calls(),
        vec!["wordpress.init", "wordpress.plugin(demo,wp-seo)"]
    );

    let (dispatcher, recorder) = stubbed();
    dispatcher.dispatch("install theme astra").await;
    assert_eq!(
        recorder.calls(),
        vec!["wordpress.init", "wordpress.theme(-,astra)"]
    );
}

#[tokio::test]
async fn test_generate_content_uses_fixed_kind() {
    let (dispatcher, recorder) = stubbed();
    dispatcher.dispatch("generate content for myblog").await;
    assert_eq!(
        recorder.calls(),
        vec!["research.init", "research.generate(myblog,directory_listing)"]
    );
}

#[tokio::test]
async fn test_capability_error_surfaces_as_failure() {
    let recorder = Arc::new(Recorder {
        fail_git: true,
        ..Recorder::default()
    });
    let dispatcher = dispatcher_with(recorder);
    let outcome = dispatcher.dispatch("git status for demo").await;
    match outcome {
        Outcome::Completed { name, result } => {
            assert_eq!(name, "git status");
            match result {
                CommandResult::Failure { message, .. } => {
                    assert_eq!(message, "git is offline")
                }
                other => panic!("expected failure, got {:?}", other),
            }
        }
        other => panic!("expected completion, got {:?}", other),
    }
}

#[tokio::test]
async fn test_dispatch_is_deterministic_with_stubbed_capabilities() {
    let (dispatcher, _) = stubbed();
    let first = dispatcher.dispatch("test seo for demo").await;
    let second = dispatcher.dispatch("test seo for demo").await;
    assert_eq!(first, second);
    match first {
        Outcome::Completed { name, .. } => assert_eq!(name, "test seo"),
        other => panic!("expected completion, got {:?}", other),
    }
}

#[tokio::test]
async fn test_comprehensive_tests_route_to_testing() {
    let (dispatcher, recorder) = stubbed();
    dispatcher.dispatch("run comprehensive tests for demo").await;
    assert_eq!(
        recorder.calls(),
        vec!["testing.init", "testing.comprehensive(demo)"]
    );
}

#[tokio::test]
async fn test_show_logs_without_project() {
    let (dispatcher, recorder) = stubbed();
    dispatcher.dispatch("show logs").await;
    assert_eq!(recorder.calls(), vec!["containers.init", "containers.logs(-)"]);
}
