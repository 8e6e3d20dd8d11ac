//! Link and SEO checks against the locally served site
//!
//! Fetches pages through curl, so the checks work against whatever the
//! containers are serving without pulling an HTTP stack into this crate.
//! All checks report rows with the same (check, subject, status) columns so
//! the comprehensive run can merge them.

use super::{read_project_meta, run_tool};
use crate::capabilities::TestingOps;
use crate::outcome::{CapabilityPayload, Row};
use anyhow::{Context, Result};
use async_trait::async_trait;
use regex::Regex;
use std::path::PathBuf;
use tokio::sync::OnceCell;

pub struct TestingManager {
    root: PathBuf,
    host: String,
    default_port: u16,
    checked: OnceCell<()>,
}

impl TestingManager {
    pub fn new(root: PathBuf, host: String, default_port: u16) -> Self {
        Self {
            root,
            host,
            default_port,
            checked: OnceCell::new(),
        }
    }

    async fn base_url(&self, project: Option<&str>) -> String {
        let port = match project {
            Some(name) => read_project_meta(&self.root, name)
                .await
                .map(|m| m.port)
                .unwrap_or(self.default_port),
            None => self.default_port,
        };
        format!("http://{}:{}", self.host, port)
    }

    async fn fetch_status(&self, url: &str) -> Result<u16> {
        let out = run_tool(
            "curl",
            &["-s", "-o", "/dev/null", "-w", "%{http_code}", "--max-time", "15", url],
            None,
        )
        .await
        .context(format!("failed to reach {}", url))?;
        out.stdout
            .trim()
            .parse()
            .context("curl returned a non-numeric status code")
    }

    async fn fetch_body(&self, url: &str) -> Result<String> {
        let out = run_tool("curl", &["-s", "--max-time", "15", url], None)
            .await
            .context(format!("failed to fetch {}", url))?;
        Ok(out.stdout)
    }

    fn extract_links(base: &str, html: &str) -> Vec<String> {
        let href = Regex::new(r#"href=["']([^"']+)["']"#)
            .expect("static link pattern must compile");
        let mut links = Vec::new();
        for caps in href.captures_iter(html) {
            let target = &caps[1];
            let absolute = if target.starts_with("http://") || target.starts_with("https://") {
                target.to_string()
            } else if target.starts_with('/') {
                format!("{}{}", base, target)
            } else {
                continue; // anchors, mailto, relative fragments
            };
            if !links.contains(&absolute) {
                links.push(absolute);
            }
        }
        links
    }

    fn check_row(check: &str, subject: &str, ok: bool) -> Row {
        vec![
            ("check".to_string(), check.to_string()),
            ("subject".to_string(), subject.to_string()),
            (
                "status".to_string(),
                if ok { "pass" } else { "fail" }.to_string(),
            ),
        ]
    }

    async fn link_rows(&self, project: Option<&str>) -> Result<Vec<Row>> {
        let base = self.base_url(project).await;
        let html = self.fetch_body(&base).await?;
        let mut rows = Vec::new();
        for url in Self::extract_links(&base, &html) {
            let status = self.fetch_status(&url).await.unwrap_or(0);
            rows.push(Self::check_row("link", &url, (200..400).contains(&status)));
        }
        Ok(rows)
    }

    async fn seo_rows(&self, project: Option<&str>) -> Result<Vec<Row>> {
        let base = self.base_url(project).await;
        let html = self.fetch_body(&base).await?;
        let lower = html.to_lowercase();
        Ok(vec![
            Self::check_row("seo", "title tag", lower.contains("<title>")),
            Self::check_row(
                "seo",
                "meta description",
                lower.contains("name=\"description\"") || lower.contains("name='description'"),
            ),
            Self::check_row("seo", "h1 heading", lower.contains("<h1")),
            Self::check_row("seo", "canonical link", lower.contains("rel=\"canonical\"")),
        ])
    }

    fn summarize(rows: &[Row], what: &str) -> String {
        let failed = rows
            .iter()
            .filter(|r| r.iter().any(|(c, v)| c == "status" && v == "fail"))
            .count();
        if rows.is_empty() {
            format!("No {} checks ran", what)
        } else if failed == 0 {
            format!("All {} {} checks passed", rows.len(), what)
        } else {
            format!("{} of {} {} checks failed", failed, rows.len(), what)
        }
    }
}

#[async_trait]
impl TestingOps for TestingManager {
    /// Verify curl once per process.
    async fn initialize(&self) -> Result<()> {
        self.checked
            .get_or_try_init(|| async {
                run_tool("curl", &["--version"], None)
                    .await
                    .context("curl is not available")?;
                Ok::<(), anyhow::Error>(())
            })
            .await?;
        Ok(())
    }

    async fn test_links(&self, project: Option<&str>) -> Result<CapabilityPayload> {
        let rows = self.link_rows(project).await?;
        Ok(CapabilityPayload::Report {
            message: Self::summarize(&rows, "link"),
            rows,
        })
    }

    async fn test_seo(&self, project: Option<&str>) -> Result<CapabilityPayload> {
        let rows = self.seo_rows(project).await?;
        Ok(CapabilityPayload::Report {
            message: Self::summarize(&rows, "SEO"),
            rows,
        })
    }

    async fn run_comprehensive(&self, project: Option<&str>) -> Result<CapabilityPayload> {
        let mut rows = self.link_rows(project).await?;
        rows.extend(self.seo_rows(project).await?);
        Ok(CapabilityPayload::Report {
            message: Self::summarize(&rows, "site"),
            rows,
        })
    }
}
