//! Immutable comparison snapshots.
//!
//! A snapshot records the client's geography, the current plan and the
//! recommendations exactly as they were ranked. It is written once; a fresh
//! comparison produces a new snapshot rather than editing an old one.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use medintake_core::{ClientProfile, ScoredComparisonResult};

use crate::StoreError;
use crate::archive::{TIMESTAMP_FORMAT, write_new};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSnapshot {
    pub taken_at: DateTime<Utc>,
    pub client: ClientProfile,
    pub result: ScoredComparisonResult,
}

impl ComparisonSnapshot {
    pub fn new(client: ClientProfile, result: ScoredComparisonResult) -> Self {
        Self::at(Utc::now(), client, result)
    }

    pub fn at(taken_at: DateTime<Utc>, client: ClientProfile, result: ScoredComparisonResult) -> Self {
        Self {
            taken_at,
            client,
            result,
        }
    }

    /// `comparison_plan-<id>_<timestamp>.json`
    pub fn file_name(&self) -> String {
        format!(
            "comparison_plan-{}_{}.json",
            self.result.current_plan.id,
            self.taken_at.format(TIMESTAMP_FORMAT)
        )
    }

    /// Write the snapshot into `dir`; fails if that snapshot already exists.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, StoreError> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(self.file_name());
        write_new(&path, &serde_json::to_vec_pretty(self)?)?;
        info!(
            path = %path.display(),
            recommendations = self.result.recommendations.len(),
            "wrote comparison snapshot"
        );
        Ok(path)
    }

    pub fn read(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            return Err(StoreError::NotFound(path.to_path_buf()));
        }
        Ok(serde_json::from_slice(&std::fs::read(path)?)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use medintake_core::{ComparisonCandidate, Plan};

    fn snapshot() -> ComparisonSnapshot {
        let current = Plan {
            id: 7,
            carrier_id: 1,
            name: "Current".into(),
            monthly_premium: Some(120.0),
            ..Default::default()
        };
        let alternative = Plan {
            id: 8,
            carrier_id: 1,
            name: "Alternative".into(),
            monthly_premium: Some(60.0),
            ..Default::default()
        };
        let result = ScoredComparisonResult {
            current_plan: current,
            recommendations: vec![ComparisonCandidate {
                plan: alternative,
                score: 140,
                reasons: vec!["Saves $60/month on premium".into()],
            }],
            candidates_considered: 1,
        };
        let client = ClientProfile {
            state: "WA".into(),
            county: "King".into(),
            uses_restricted_network: true,
        };
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        ComparisonSnapshot::at(at, client, result)
    }

    #[test]
    fn written_once_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let snap = snapshot();

        let path = snap.write_to(dir.path()).unwrap();
        assert!(path.ends_with("comparison_plan-7_20250301T120000Z.json"));
        assert_eq!(ComparisonSnapshot::read(&path).unwrap(), snap);

        let err = snap.write_to(dir.path()).unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists(_)));
    }

    #[test]
    fn restricted_network_flag_is_kept() {
        let json = serde_json::to_value(snapshot()).unwrap();
        assert_eq!(json["client"]["uses_restricted_network"], true);
        assert_eq!(json["result"]["recommendations"][0]["score"], 140);
    }
}
