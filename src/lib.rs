//! wpcc_core - natural-language command router for WordPress dev environments
//!
//! Free-text command strings ("create project called demo on port 9090")
//! are routed through an ordered pattern table, first match wins, to one of
//! a fixed set of operations backed by external capability managers.
//!
//! Modules:
//! - patterns: the ordered command table (recognizers, usage grammar)
//! - dispatch: first-match-wins routing and the error boundary
//! - handlers: per-command adapters bridging captures to capability calls
//! - outcome: the tagged result union and dispatch outcomes
//! - render: usage summary, error banners, and table layout
//! - capabilities: trait seams for the delegate managers
//! - config: defaults (port, deploy branch) and the projects root
//! - managers: live delegates (docker, git, wp-cli, curl, filesystem)

pub mod capabilities;
pub mod config;
pub mod dispatch;
pub mod handlers;
pub mod managers;
pub mod outcome;
pub mod patterns;
pub mod render;

// Re-export key types for convenience
pub use capabilities::{Capabilities, DeployRequest, NewProject};
pub use config::CliConfig;
pub use dispatch::Dispatcher;
pub use outcome::{CapabilityPayload, CommandResult, Outcome, Row};
pub use patterns::{CommandSpec, ExtractedParams, PatternTable};
pub use render::{format_rows, render, usage_summary};
