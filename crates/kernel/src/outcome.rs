//! Per-scenario outcome records and the run summary.

use serde::Serialize;

use crate::error::ScenarioError;
use crate::scenario::Group;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioStatus {
    Passed,
    /// An assertion or decode expectation failed.
    Failed,
    /// Transport failure: the scenario could not capture a response.
    Infra,
}

/// Recorded outcome of one attempted scenario.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioRecord {
    pub name: String,
    pub groups: Vec<Group>,
    pub status: ScenarioStatus,
    pub elapsed_ms: u64,
    /// Failure message when status is not `Passed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ScenarioRecord {
    pub fn from_result(
        name: &str,
        groups: &[Group],
        result: &Result<(), ScenarioError>,
        elapsed_ms: u64,
    ) -> Self {
        let (status, detail) = match result {
            Ok(()) => (ScenarioStatus::Passed, None),
            Err(err) if err.is_infrastructure() => {
                (ScenarioStatus::Infra, Some(err.to_string()))
            }
            Err(err) => (ScenarioStatus::Failed, Some(err.to_string())),
        };
        Self {
            name: name.to_string(),
            groups: groups.to_vec(),
            status,
            elapsed_ms,
            detail,
        }
    }
}

/// Aggregate counts over all attempted scenarios.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub infra: usize,
}

impl RunSummary {
    pub fn tally(records: &[ScenarioRecord]) -> Self {
        let mut summary = Self::default();
        for record in records {
            summary.total += 1;
            match record.status {
                ScenarioStatus::Passed => summary.passed += 1,
                ScenarioStatus::Failed => summary.failed += 1,
                ScenarioStatus::Infra => summary.infra += 1,
            }
        }
        summary
    }

    /// True iff every attempted scenario passed.
    pub fn success(&self) -> bool {
        self.failed == 0 && self.infra == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, result: Result<(), ScenarioError>) -> ScenarioRecord {
        ScenarioRecord::from_result(name, &[Group::Regression], &result, 5)
    }

    #[test]
    fn passed_record_has_no_detail() {
        let rec = record("ok", Ok(()));
        assert_eq!(rec.status, ScenarioStatus::Passed);
        assert!(rec.detail.is_none());
    }

    #[test]
    fn transport_errors_become_infra_records() {
        let rec = record("down", Err(ScenarioError::transport("dns")));
        assert_eq!(rec.status, ScenarioStatus::Infra);

        let rec = record("bad", Err(ScenarioError::assertion("expected 200, got 500")));
        assert_eq!(rec.status, ScenarioStatus::Failed);
        assert!(rec.detail.unwrap().contains("expected 200"));
    }

    #[test]
    fn summary_counts_each_status() {
        let records = vec![
            record("a", Ok(())),
            record("b", Err(ScenarioError::assertion("boom"))),
            record("c", Err(ScenarioError::transport("refused"))),
            record("d", Ok(())),
        ];
        let summary = RunSummary::tally(&records);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.passed, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.infra, 1);
        assert!(!summary.success());
        assert!(RunSummary::tally(&records[..1]).success());
    }
}
