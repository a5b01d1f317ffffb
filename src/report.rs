//! Run report: plain-text rendering for the terminal and a JSON artifact for
//! anything downstream. Report generation only consumes runner records; it
//! never participates in assertions.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use uuid::Uuid;
use verso_kernel::scenario::Group;
use verso_kernel::{RunSummary, ScenarioRecord, ScenarioStatus};

const REPORT_PREFIX: &str = "verso-run-";

#[derive(Debug, Serialize)]
pub struct RunReport {
    pub run_id: String,
    pub started_at: String,
    pub duration_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<Group>,
    pub summary: RunSummary,
    pub records: Vec<ScenarioRecord>,
}

impl RunReport {
    pub fn new(group: Option<Group>, records: Vec<ScenarioRecord>, duration: Duration) -> Self {
        let summary = RunSummary::tally(&records);
        let started_at = (OffsetDateTime::now_utc() - duration)
            .format(&Rfc3339)
            .unwrap_or_default();
        Self {
            run_id: Uuid::new_v4().to_string(),
            started_at,
            duration_ms: duration.as_millis() as u64,
            group,
            summary,
            records,
        }
    }

    /// One-line verdict plus a line per failure.
    pub fn render_text(&self) -> String {
        let group = self.group.map(|g| g.as_str()).unwrap_or("all");
        let mut out = format!(
            "verso run {} (group: {group}) — {} scenarios: {} passed, {} failed, {} infra — {:.1}s\n",
            &self.run_id[..8.min(self.run_id.len())],
            self.summary.total,
            self.summary.passed,
            self.summary.failed,
            self.summary.infra,
            self.duration_ms as f64 / 1000.0,
        );
        for record in &self.records {
            let tag = match record.status {
                ScenarioStatus::Passed => continue,
                ScenarioStatus::Failed => "FAIL ",
                ScenarioStatus::Infra => "INFRA",
            };
            let detail = record.detail.as_deref().unwrap_or("");
            out.push_str(&format!("  {tag} {}  {detail}\n", record.name));
        }
        out
    }

    /// Write the JSON artifact into `dir`, returning its path.
    pub fn write_json(&self, dir: &Path) -> anyhow::Result<PathBuf> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create report directory {}", dir.display()))?;
        let path = dir.join(format!("{REPORT_PREFIX}{}.json", self.run_id));
        let body = serde_json::to_string_pretty(self)
            .with_context(|| "failed to serialize the run report")?;
        std::fs::write(&path, body)
            .with_context(|| format!("failed to write report {}", path.display()))?;
        tracing::info!(target: "verso_report", path = %path.display(), "report written");
        Ok(path)
    }
}

/// Delete previous report artifacts. Missing directory is not an error.
pub fn clean(dir: &Path) -> anyhow::Result<usize> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(0),
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read report directory {}", dir.display()))
        }
    };

    let mut removed = 0;
    for entry in entries {
        let path = entry
            .with_context(|| format!("failed to list report directory {}", dir.display()))?
            .path();
        let is_report = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with(REPORT_PREFIX) && n.ends_with(".json"));
        if is_report {
            std::fs::remove_file(&path)
                .with_context(|| format!("failed to remove {}", path.display()))?;
            removed += 1;
        }
    }
    tracing::info!(target: "verso_report", removed, "previous reports cleaned");
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use verso_kernel::ScenarioError;

    fn sample_report() -> RunReport {
        let records = vec![
            ScenarioRecord::from_result("books/list_all", &[Group::Smoke], &Ok(()), 120),
            ScenarioRecord::from_result(
                "books/create_invalid",
                &[Group::Regression],
                &Err(ScenarioError::assertion("expected status 400 but got 200")),
                80,
            ),
        ];
        RunReport::new(Some(Group::Regression), records, Duration::from_millis(1500))
    }

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("verso-report-test-{}", Uuid::new_v4()))
    }

    #[test]
    fn text_rendering_lists_only_failures() {
        let text = sample_report().render_text();
        assert!(text.contains("2 scenarios: 1 passed, 1 failed, 0 infra"));
        assert!(text.contains("FAIL  books/create_invalid"));
        assert!(!text.contains("books/list_all"));
    }

    #[test]
    fn json_artifact_round_trips() {
        let dir = scratch_dir();
        let report = sample_report();
        let path = report.write_json(&dir).unwrap();

        let body = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["summary"]["total"], 2);
        assert_eq!(value["group"], "regression");
        assert_eq!(value["records"][1]["status"], "failed");

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn clean_removes_only_report_files() {
        let dir = scratch_dir();
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("verso-run-abc.json"), "{}").unwrap();
        std::fs::write(dir.join("notes.txt"), "keep me").unwrap();

        assert_eq!(clean(&dir).unwrap(), 1);
        assert!(dir.join("notes.txt").exists());
        assert!(!dir.join("verso-run-abc.json").exists());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn clean_tolerates_a_missing_directory() {
        assert_eq!(clean(&scratch_dir()).unwrap(), 0);
    }
}
