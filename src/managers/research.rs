//! Topic research and content generation
//!
//! Research briefs are markdown files under the project's `content/research`
//! directory; content generation turns each brief into a post draft under
//! `content/drafts`. No network access is involved; the briefs are outlines
//! a writer fills in.

use super::work_dir;
use crate::capabilities::ResearchOps;
use crate::outcome::{CapabilityPayload, Row};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

const BRIEF_SECTIONS: &[(&str, &str)] = &[
    ("Overview", "What the topic covers and why it matters locally"),
    ("Audience", "Who searches for this and what they want"),
    ("Competitors", "Existing pages ranking for the topic"),
    ("Keywords", "Primary and secondary phrases to target"),
    ("Outline", "Proposed post structure"),
];

pub struct ResearchManager {
    root: PathBuf,
}

impl ResearchManager {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn slugify(topic: &str) -> String {
        topic
            .to_lowercase()
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '-' })
            .collect::<String>()
            .split('-')
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("-")
    }

    fn research_dir(&self, project: Option<&str>) -> PathBuf {
        work_dir(&self.root, project).join("content").join("research")
    }

    fn brief_body(topic: &str) -> String {
        let mut body = format!("# Research brief: {}\n\n", topic);
        for (section, focus) in BRIEF_SECTIONS {
            body.push_str(&format!("## {}\n\n_{}_\n\n", section, focus));
        }
        body
    }

    async fn brief_slugs(dir: &Path) -> Result<Vec<String>> {
        let mut slugs = Vec::new();
        let mut entries = match fs::read_dir(dir).await {
            Ok(entries) => entries,
            Err(_) => return Ok(slugs),
        };
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().to_string();
            if let Some(slug) = name.strip_suffix(".md") {
                slugs.push(slug.to_string());
            }
        }
        slugs.sort();
        Ok(slugs)
    }
}

#[async_trait]
impl ResearchOps for ResearchManager {
    async fn initialize(&self) -> Result<()> {
        Ok(())
    }

    async fn research_topic(
        &self,
        project: Option<&str>,
        topic: &str,
    ) -> Result<CapabilityPayload> {
        let dir = self.research_dir(project);
        fs::create_dir_all(&dir)
            .await
            .context("failed to create research directory")?;

        let slug = Self::slugify(topic);
        let path = dir.join(format!("{}.md", slug));
        fs::write(&path, Self::brief_body(topic))
            .await
            .context("failed to write research brief")?;

        let rows: Vec<Row> = BRIEF_SECTIONS
            .iter()
            .map(|(section, focus)| {
                vec![
                    ("section".to_string(), section.to_string()),
                    ("focus".to_string(), focus.to_string()),
                ]
            })
            .collect();

        Ok(CapabilityPayload::Report {
            message: format!("Research brief for \"{}\" saved to {}", topic, path.display()),
            rows,
        })
    }

    async fn generate_content(&self, project: &str, kind: &str) -> Result<CapabilityPayload> {
        let research = self.research_dir(Some(project));
        let slugs = Self::brief_slugs(&research).await?;
        if slugs.is_empty() {
            return Ok(CapabilityPayload::Text(format!(
                "No research briefs found for {}; run research first",
                project
            )));
        }

        let drafts = work_dir(&self.root, Some(project))
            .join("content")
            .join("drafts");
        fs::create_dir_all(&drafts)
            .await
            .context("failed to create drafts directory")?;

        let mut rows: Vec<Row> = Vec::new();
        for slug in &slugs {
            let path = drafts.join(format!("{}.md", slug));
            let body = format!(
                "---\nstatus: draft\nlayout: {}\nsource: research/{}.md\n---\n\n# {}\n\nDraft body pending.\n",
                kind, slug, slug.replace('-', " ")
            );
            fs::write(&path, body)
                .await
                .context("failed to write draft")?;
            rows.push(vec![
                ("draft".to_string(), format!("{}.md", slug)),
                ("layout".to_string(), kind.to_string()),
            ]);
        }

        Ok(CapabilityPayload::Report {
            message: format!("Generated {} draft(s) for {}", rows.len(), project),
            rows,
        })
    }
}
