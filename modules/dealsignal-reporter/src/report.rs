use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use dealsignal_common::types::{CandidateItem, EngagementOpportunity};

use crate::drafter::{CommentDrafter, DEFAULT_COMMENT};

pub const REPORT_TXT: &str = "engagement_report.txt";
pub const REPORT_JSON: &str = "engagement_report.json";

pub struct Reporter {
    out_dir: PathBuf,
}

impl Reporter {
    pub fn new(out_dir: &Path) -> Self {
        Self {
            out_dir: out_dir.to_path_buf(),
        }
    }

    /// Draft a reply per item. Drafting failures fall back to the canned
    /// default and never abort the batch.
    pub async fn build_opportunities(
        &self,
        drafter: &dyn CommentDrafter,
        items: Vec<CandidateItem>,
    ) -> Vec<EngagementOpportunity> {
        let mut opportunities = Vec::with_capacity(items.len());

        for item in items {
            let suggested_comment = match drafter.draft(&item).await {
                Ok(comment) => comment,
                Err(e) => {
                    warn!(link = %item.link, error = %e, "Draft failed, using default comment");
                    DEFAULT_COMMENT.to_string()
                }
            };
            opportunities.push(EngagementOpportunity {
                item,
                suggested_comment: Some(suggested_comment),
            });
        }

        opportunities
    }

    /// Write both report artifacts, truncating whatever a previous run left
    /// behind. A failed write is logged and skipped, not fatal.
    pub fn write_reports(&self, opportunities: &[EngagementOpportunity]) {
        let txt_path = self.out_dir.join(REPORT_TXT);
        match std::fs::write(&txt_path, render_text_report(opportunities)) {
            Ok(()) => info!(path = %txt_path.display(), "Wrote text report"),
            Err(e) => error!(path = %txt_path.display(), error = %e, "Could not write text report"),
        }

        let json_path = self.out_dir.join(REPORT_JSON);
        match serde_json::to_string_pretty(opportunities) {
            Ok(json) => match std::fs::write(&json_path, json) {
                Ok(()) => info!(path = %json_path.display(), "Wrote JSON report"),
                Err(e) => {
                    error!(path = %json_path.display(), error = %e, "Could not write JSON report")
                }
            },
            Err(e) => error!(error = %e, "Could not serialize JSON report"),
        }
    }
}

/// Line-delimited human-readable report body.
pub fn render_text_report(opportunities: &[EngagementOpportunity]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "DealSignal engagement report — {} opportunities\n\n",
        opportunities.len()
    ));

    for opp in opportunities {
        out.push_str(&format!("[{}] {}\n", opp.item.source_tag, opp.item.title));
        out.push_str(&format!("  link: {}\n", opp.item.link));
        out.push_str(&format!(
            "  discovered: {}\n",
            opp.item.discovered_at.to_rfc3339()
        ));
        if let Some(comment) = &opp.suggested_comment {
            out.push_str(&format!("  suggested reply: {comment}\n"));
        }
        out.push('\n');
    }

    out
}
