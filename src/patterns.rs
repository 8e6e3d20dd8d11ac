//! The ordered command pattern table
//!
//! An explicit sequence of (recognizer, handler) entries scanned first-match
//! wins. Insertion order is the priority order and a documented invariant:
//! narrower recognizers sit before broader ones that accept the same prefix
//! (container commands before the bare project start/stop, "install plugin"
//! before the generic install-theme entry). The usage strings are the stable
//! external grammar shown by the help summary.

use crate::capabilities::Capabilities;
use crate::handlers;
use crate::outcome::CommandResult;
use anyhow::Result;
use regex::Regex;
use std::future::Future;
use std::pin::Pin;

/// Positional captures from a successful match. Absent optional groups stay
/// `None` and mean "use the caller default", never an error.
pub type ExtractedParams = Vec<Option<String>>;

/// Boxed future returned by a handler adapter.
pub type HandlerFuture<'a> = Pin<Box<dyn Future<Output = Result<CommandResult>> + Send + 'a>>;

/// A handler adapter bound into the table.
pub type Handler = for<'a> fn(&'a Capabilities, ExtractedParams, &'a str) -> HandlerFuture<'a>;

/// One immutable entry in the pattern table.
pub struct CommandSpec {
    /// Unique, stable key (also used in progress logging).
    pub name: &'static str,
    /// Invocation shape shown in the usage summary.
    pub usage: &'static str,
    regex: Regex,
    pub handler: Handler,
}

impl CommandSpec {
    fn new(name: &'static str, usage: &'static str, pattern: &str, handler: Handler) -> Self {
        Self {
            name,
            usage,
            regex: Regex::new(pattern).expect("static command pattern must compile"),
            handler,
        }
    }

    /// Apply the recognizer; on success yield the positional captures.
    /// Deterministic and side-effect free.
    pub fn match_params(&self, input: &str) -> Option<ExtractedParams> {
        self.regex.captures(input).map(|caps| {
            (1..caps.len())
                .map(|i| caps.get(i).map(|m| m.as_str().to_string()))
                .collect()
        })
    }
}

/// The static, ordered command table. Built once at startup, never mutated.
pub struct PatternTable {
    specs: Vec<CommandSpec>,
}

impl PatternTable {
    /// The standard command set. Order encodes priority.
    pub fn standard() -> Self {
        let specs = vec![
            // Project management
            CommandSpec::new(
                "create project",
                "create project <name> [on port <port>]",
                r#"(?i)create\s+(?:a\s+)?(?:new\s+)?project\s+(?:called\s+)?["']?([^"'\s]+)["']?(?:\s+on\s+port\s+(\d+))?"#,
                handlers::create_project,
            ),
            CommandSpec::new(
                "list projects",
                "list projects",
                r"(?i)list\s+(?:all\s+)?projects?",
                handlers::list_projects,
            ),
            // Container lifecycle. These require the literal word "containers"
            // and must precede the bare start/stop project entries, which
            // would otherwise capture "containers" as a project name.
            CommandSpec::new(
                "start containers",
                "start containers [for <project>]",
                r#"(?i)start\s+(?:the\s+)?(?:docker\s+)?containers?(?:\s+for\s+["']?([^"'\s]+)["']?)?"#,
                handlers::start_containers,
            ),
            CommandSpec::new(
                "stop containers",
                "stop containers [for <project>]",
                r#"(?i)stop\s+(?:the\s+)?(?:docker\s+)?containers?(?:\s+for\s+["']?([^"'\s]+)["']?)?"#,
                handlers::stop_containers,
            ),
            CommandSpec::new(
                "restart containers",
                "restart containers [for <project>]",
                r#"(?i)restart\s+(?:the\s+)?(?:docker\s+)?containers?(?:\s+for\s+["']?([^"'\s]+)["']?)?"#,
                handlers::restart_containers,
            ),
            CommandSpec::new(
                "show logs",
                "show logs [for <project>]",
                r#"(?i)show\s+(?:the\s+)?logs?(?:\s+for\s+["']?([^"'\s]+)["']?)?"#,
                handlers::show_logs,
            ),
            CommandSpec::new(
                "start project",
                "start project <name>",
                r#"(?i)start\s+(?:the\s+)?(?:project\s+)?["']?([^"'\s]+)["']?"#,
                handlers::start_project,
            ),
            CommandSpec::new(
                "stop project",
                "stop project <name>",
                r#"(?i)stop\s+(?:the\s+)?(?:project\s+)?["']?([^"'\s]+)["']?"#,
                handlers::stop_project,
            ),
            CommandSpec::new(
                "delete project",
                "delete project <name>",
                r#"(?i)delete\s+(?:the\s+)?(?:project\s+)?["']?([^"'\s]+)["']?"#,
                handlers::delete_project,
            ),
            // Research
            CommandSpec::new(
                "research topic",
                "research topic \"<topic>\" [for <project>]",
                r#"(?i)research\s+(?:topic\s+)?["']([^"']+)["']"#,
                handlers::research_topic,
            ),
            CommandSpec::new(
                "generate content",
                "generate content [for] <project>",
                r#"(?i)generate\s+(?:content|posts?)\s+(?:from\s+research\s+)?(?:for\s+)?["']?([^"'\s]+)["']?"#,
                handlers::generate_content,
            ),
            // Testing
            CommandSpec::new(
                "test links",
                "test links [for <project>]",
                r#"(?i)test\s+(?:all\s+)?(?:the\s+)?links?(?:\s+for\s+["']?([^"'\s]+)["']?)?"#,
                handlers::test_links,
            ),
            CommandSpec::new(
                "test seo",
                "test seo [for <project>]",
                r#"(?i)test\s+(?:the\s+)?seo?(?:\s+for\s+["']?([^"'\s]+)["']?)?"#,
                handlers::test_seo,
            ),
            CommandSpec::new(
                "test comprehensive",
                "run comprehensive tests [for <project>]",
                r#"(?i)(?:run\s+)?(?:comprehensive|complete|full)\s+tests?(?:\s+for\s+["']?([^"'\s]+)["']?)?"#,
                handlers::test_comprehensive,
            ),
            // Database
            CommandSpec::new(
                "dump database",
                "dump database [for <project>]",
                r#"(?i)dump\s+(?:the\s+)?database?(?:\s+for\s+["']?([^"'\s]+)["']?)?"#,
                handlers::dump_database,
            ),
            CommandSpec::new(
                "import database",
                "import database [for <project>]",
                r#"(?i)import\s+(?:the\s+)?database?(?:\s+for\s+["']?([^"'\s]+)["']?)?"#,
                handlers::import_database,
            ),
            // Version control
            CommandSpec::new(
                "git status",
                "git status [for <project>]",
                r#"(?i)git\s+status(?:\s+for\s+["']?([^"'\s]+)["']?)?"#,
                handlers::git_status,
            ),
            CommandSpec::new(
                "git commit",
                "git commit \"<message>\" [for <project>]",
                r#"(?i)git\s+commit\s+["']([^"']+)["'](?:\s+for\s+["']?([^"'\s]+)["']?)?"#,
                handlers::git_commit,
            ),
            // Deployment
            CommandSpec::new(
                "deploy to production",
                "deploy <project> to production",
                r#"(?i)deploy\s+(?:["']?([^"'\s]+)["']?\s+)?to\s+(?:siteground\s+)?production"#,
                handlers::deploy_production,
            ),
            // WordPress assets. "install plugin" requires the literal word
            // and must precede the generic install entry below, whose
            // "theme" word is optional.
            CommandSpec::new(
                "install plugin",
                "install plugin <name> [for <project>]",
                r#"(?i)install\s+(?:the\s+)?plugin\s+["']?([^"'\s]+)["']?(?:\s+for\s+["']?([^"'\s]+)["']?)?"#,
                handlers::install_plugin,
            ),
            CommandSpec::new(
                "install theme",
                "install theme <name> [for <project>]",
                r#"(?i)install\s+(?:the\s+)?(?:theme\s+)?["']?([^"'\s]+)["']?(?:\s+for\s+["']?([^"'\s]+)["']?)?"#,
                handlers::install_theme,
            ),
        ];
        Self { specs }
    }

    pub fn specs(&self) -> &[CommandSpec] {
        &self.specs
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.specs.iter().map(|s| s.name).collect()
    }

    /// First table entry whose recognizer accepts the input, with its
    /// extracted parameters. Later entries are never tried.
    pub fn first_match(&self, input: &str) -> Option<(&CommandSpec, ExtractedParams)> {
        self.specs
            .iter()
            .find_map(|spec| spec.match_params(input).map(|params| (spec, params)))
    }
}
