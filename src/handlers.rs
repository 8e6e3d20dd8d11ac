//! Handler adapters
//!
//! One function per command, bridging positional captures to a capability
//! call: substitute defaults for absent optional groups, initialize the
//! manager, invoke exactly one domain operation, and normalize its payload
//! into a `CommandResult`. Errors from the capability propagate untouched;
//! the dispatcher turns them into `Failure` at its boundary.
//!
//! Adapters are plain functions returning boxed futures so the pattern table
//! can hold them as an explicit (recognizer, handler) sequence.

use crate::capabilities::{Capabilities, DeployRequest, NewProject};
use crate::patterns::{ExtractedParams, HandlerFuture};
use anyhow::Context;
use regex::Regex;
use std::sync::OnceLock;

/// Positional capture lookup; `None` for absent optional groups.
fn param(params: &ExtractedParams, idx: usize) -> Option<&str> {
    params.get(idx).and_then(|p| p.as_deref())
}

/// Contextual project lookup: rescan the whole input for a trailing
/// "for/in <name>" qualifier. Used where the primary recognizer has no
/// fixed parameter position for the project (research).
pub fn extract_project_name(input: &str) -> Option<String> {
    static SCAN: OnceLock<Regex> = OnceLock::new();
    let re = SCAN.get_or_init(|| {
        Regex::new(r#"(?i)(?:for|in)\s+(?:the\s+)?(?:project\s+)?["']?([^"'\s]+)["']?"#)
            .expect("static project scan pattern must compile")
    });
    re.captures(input)
        .map(|caps| caps[1].to_string())
}

pub fn create_project<'a>(
    caps: &'a Capabilities,
    params: ExtractedParams,
    _raw: &'a str,
) -> HandlerFuture<'a> {
    Box::pin(async move {
        let name = param(&params, 0)
            .context("recognizer captured no project name")?
            .to_string();
        let port = match param(&params, 1) {
            Some(raw) => raw.parse().context("invalid port number")?,
            None => caps.config.default_port,
        };
        caps.projects.initialize().await?;
        let payload = caps
            .projects
            .create_project(NewProject {
                name,
                port,
                kind: "wordpress".to_string(),
            })
            .await?;
        Ok(payload.into_result())
    })
}

pub fn list_projects<'a>(
    caps: &'a Capabilities,
    _params: ExtractedParams,
    _raw: &'a str,
) -> HandlerFuture<'a> {
    Box::pin(async move {
        caps.projects.initialize().await?;
        let payload = caps.projects.list_projects().await?;
        Ok(payload.into_result())
    })
}

pub fn delete_project<'a>(
    caps: &'a Capabilities,
    params: ExtractedParams,
    _raw: &'a str,
) -> HandlerFuture<'a> {
    Box::pin(async move {
        let name = param(&params, 0).context("recognizer captured no project name")?;
        caps.projects.initialize().await?;
        let payload = caps.projects.delete_project(name).await?;
        Ok(payload.into_result())
    })
}

// start/stop project delegate straight to the container lifecycle, same as
// the explicit container commands; only the grammar differs.

pub fn start_project<'a>(
    caps: &'a Capabilities,
    params: ExtractedParams,
    _raw: &'a str,
) -> HandlerFuture<'a> {
    Box::pin(async move {
        let name = param(&params, 0).map(str::to_string);
        caps.containers.initialize().await?;
        let payload = caps.containers.start_containers(name.as_deref()).await?;
        Ok(payload.into_result())
    })
}

pub fn stop_project<'a>(
    caps: &'a Capabilities,
    params: ExtractedParams,
    _raw: &'a str,
) -> HandlerFuture<'a> {
    Box::pin(async move {
        let name = param(&params, 0).map(str::to_string);
        caps.containers.initialize().await?;
        let payload = caps.containers.stop_containers(name.as_deref()).await?;
        Ok(payload.into_result())
    })
}

pub fn start_containers<'a>(
    caps: &'a Capabilities,
    params: ExtractedParams,
    _raw: &'a str,
) -> HandlerFuture<'a> {
    Box::pin(async move {
        let project = param(&params, 0).map(str::to_string);
        caps.containers.initialize().await?;
        let payload = caps.containers.start_containers(project.as_deref()).await?;
        Ok(payload.into_result())
    })
}

pub fn stop_containers<'a>(
    caps: &'a Capabilities,
    params: ExtractedParams,
    _raw: &'a str,
) -> HandlerFuture<'a> {
    Box::pin(async move {
        let project = param(&params, 0).map(str::to_string);
        caps.containers.initialize().await?;
        let payload = caps.containers.stop_containers(project.as_deref()).await?;
        Ok(payload.into_result())
    })
}

pub fn restart_containers<'a>(
    caps: &'a Capabilities,
    params: ExtractedParams,
    _raw: &'a str,
) -> HandlerFuture<'a> {
    Box::pin(async move {
        let project = param(&params, 0).map(str::to_string);
        caps.containers.initialize().await?;
        let payload = caps
            .containers
            .restart_containers(project.as_deref())
            .await?;
        Ok(payload.into_result())
    })
}

pub fn show_logs<'a>(
    caps: &'a Capabilities,
    params: ExtractedParams,
    _raw: &'a str,
) -> HandlerFuture<'a> {
    Box::pin(async move {
        let project = param(&params, 0).map(str::to_string);
        caps.containers.initialize().await?;
        let payload = caps.containers.show_logs(project.as_deref()).await?;
        Ok(payload.into_result())
    })
}

pub fn research_topic<'a>(
    caps: &'a Capabilities,
    params: ExtractedParams,
    raw: &'a str,
) -> HandlerFuture<'a> {
    Box::pin(async move {
        let topic = param(&params, 0)
            .context("recognizer captured no topic")?
            .to_string();
        // The primary recognizer only captures the quoted topic; the project
        // comes from the contextual for/in scan over the whole input.
        let project = extract_project_name(raw);
        caps.research.initialize().await?;
        let payload = caps
            .research
            .research_topic(project.as_deref(), &topic)
            .await?;
        Ok(payload.into_result())
    })
}

pub fn generate_content<'a>(
    caps: &'a Capabilities,
    params: ExtractedParams,
    _raw: &'a str,
) -> HandlerFuture<'a> {
    Box::pin(async move {
        let project = param(&params, 0).context("recognizer captured no project name")?;
        caps.research.initialize().await?;
        let payload = caps
            .research
            .generate_content(project, "directory_listing")
            .await?;
        Ok(payload.into_result())
    })
}

pub fn test_links<'a>(
    caps: &'a Capabilities,
    params: ExtractedParams,
    _raw: &'a str,
) -> HandlerFuture<'a> {
    Box::pin(async move {
        let project = param(&params, 0).map(str::to_string);
        caps.testing.initialize().await?;
        let payload = caps.testing.test_links(project.as_deref()).await?;
        Ok(payload.into_result())
    })
}

pub fn test_seo<'a>(
    caps: &'a Capabilities,
    params: ExtractedParams,
    _raw: &'a str,
) -> HandlerFuture<'a> {
    Box::pin(async move {
        let project = param(&params, 0).map(str::to_string);
        caps.testing.initialize().await?;
        let payload = caps.testing.test_seo(project.as_deref()).await?;
        Ok(payload.into_result())
    })
}

pub fn test_comprehensive<'a>(
    caps: &'a Capabilities,
    params: ExtractedParams,
    _raw: &'a str,
) -> HandlerFuture<'a> {
    Box::pin(async move {
        let project = param(&params, 0).map(str::to_string);
        caps.testing.initialize().await?;
        let payload = caps.testing.run_comprehensive(project.as_deref()).await?;
        Ok(payload.into_result())
    })
}

pub fn dump_database<'a>(
    caps: &'a Capabilities,
    params: ExtractedParams,
    _raw: &'a str,
) -> HandlerFuture<'a> {
    Box::pin(async move {
        let project = param(&params, 0).map(str::to_string);
        caps.database.initialize().await?;
        let payload = caps
            .database
            .dump_database(project.as_deref(), "CLI database dump")
            .await?;
        Ok(payload.into_result())
    })
}

pub fn import_database<'a>(
    caps: &'a Capabilities,
    params: ExtractedParams,
    _raw: &'a str,
) -> HandlerFuture<'a> {
    Box::pin(async move {
        let project = param(&params, 0).map(str::to_string);
        let file = caps.config.import_file.clone();
        caps.database.initialize().await?;
        let payload = caps
            .database
            .import_database(project.as_deref(), &file)
            .await?;
        Ok(payload.into_result())
    })
}

pub fn git_status<'a>(
    caps: &'a Capabilities,
    params: ExtractedParams,
    _raw: &'a str,
) -> HandlerFuture<'a> {
    Box::pin(async move {
        let project = param(&params, 0).map(str::to_string);
        caps.git.initialize().await?;
        let payload = caps.git.status(project.as_deref()).await?;
        Ok(payload.into_result())
    })
}

pub fn git_commit<'a>(
    caps: &'a Capabilities,
    params: ExtractedParams,
    _raw: &'a str,
) -> HandlerFuture<'a> {
    Box::pin(async move {
        let message = param(&params, 0)
            .context("recognizer captured no commit message")?
            .to_string();
        // Project comes from this command's own capture group, not from the
        // contextual scan.
        let project = param(&params, 1).map(str::to_string);
        caps.git.initialize().await?;
        let payload = caps.git.commit(project.as_deref(), &message).await?;
        Ok(payload.into_result())
    })
}

pub fn deploy_production<'a>(
    caps: &'a Capabilities,
    params: ExtractedParams,
    _raw: &'a str,
) -> HandlerFuture<'a> {
    Box::pin(async move {
        let project = param(&params, 0).map(str::to_string);
        caps.deploy.initialize().await?;
        let payload = caps
            .deploy
            .deploy(
                project.as_deref(),
                DeployRequest {
                    branch: caps.config.deploy_branch.clone(),
                    clear_cache: true,
                    message: "Production deployment via CLI".to_string(),
                },
            )
            .await?;
        Ok(payload.into_result())
    })
}

pub fn install_theme<'a>(
    caps: &'a Capabilities,
    params: ExtractedParams,
    _raw: &'a str,
) -> HandlerFuture<'a> {
    Box::pin(async move {
        let theme = param(&params, 0).context("recognizer captured no theme name")?;
        let project = param(&params, 1).map(str::to_string);
        caps.wordpress.initialize().await?;
        let payload = caps
            .wordpress
            .install_theme(project.as_deref(), theme)
            .await?;
        Ok(payload.into_result())
    })
}

pub fn install_plugin<'a>(
    caps: &'a Capabilities,
    params: ExtractedParams,
    _raw: &'a str,
) -> HandlerFuture<'a> {
    Box::pin(async move {
        let plugin = param(&params, 0).context("recognizer captured no plugin name")?;
        let project = param(&params, 1).map(str::to_string);
        caps.wordpress.initialize().await?;
        let payload = caps
            .wordpress
            .install_plugin(project.as_deref(), plugin)
            .await?;
        Ok(payload.into_result())
    })
}
