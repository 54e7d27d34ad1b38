//! The merged, atomically-published dashboard snapshot.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use launchtrack_core::{Store, StoreId};

use crate::insight::{RiskInsight, RiskLevel};
use crate::prediction::Prediction;

/// One store's merged analytics view.
///
/// Insight and prediction are best-effort: either may be absent when its
/// source call failed or the collaborator had nothing to report. Presenters
/// render absent fields as "unknown", they never hide the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreAnalytics {
    pub store: Store,
    pub insight: Option<RiskInsight>,
    pub prediction: Option<Prediction>,
}

/// Tally of stores per risk level (the dashboard risk pills).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskSummary {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    /// Stores with no insight attached.
    pub unknown: usize,
}

/// The merge of stores × insights × predictions, keyed by store id.
///
/// A snapshot is immutable once assembled and is replaced wholesale on each
/// refresh; readers always observe a complete, consistent value. Every
/// store carries at most one insight and at most one prediction; entries are
/// in registry order.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    entries: Vec<StoreAnalytics>,
    #[serde(skip)]
    by_store: HashMap<StoreId, usize>,
    generated_at: DateTime<Utc>,
}

impl DashboardSnapshot {
    /// An empty snapshot, used before the first successful refresh.
    pub fn empty() -> Self {
        Self::from_entries(Vec::new())
    }

    /// Assemble a snapshot from per-store entries.
    ///
    /// Callers are expected to pass at most one entry per store; a duplicate
    /// keeps the first entry for lookup purposes.
    pub fn from_entries(entries: Vec<StoreAnalytics>) -> Self {
        let mut by_store = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            by_store.entry(entry.store.store_id()).or_insert(i);
        }
        Self {
            entries,
            by_store,
            generated_at: Utc::now(),
        }
    }

    pub fn entries(&self) -> &[StoreAnalytics] {
        &self.entries
    }

    pub fn get(&self, id: StoreId) -> Option<&StoreAnalytics> {
        self.by_store.get(&id).map(|&i| &self.entries[i])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    pub fn risk_summary(&self) -> RiskSummary {
        let mut summary = RiskSummary::default();
        for entry in &self.entries {
            match entry.insight.as_ref().map(|i| i.risk_level) {
                Some(RiskLevel::High) => summary.high += 1,
                Some(RiskLevel::Medium) => summary.medium += 1,
                Some(RiskLevel::Low) => summary.low += 1,
                None => summary.unknown += 1,
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insight::InsightMetrics;

    fn test_store(name: &str) -> Store {
        Store::new(StoreId::new(), name, "Riyadh")
    }

    fn test_insight(store_id: StoreId, level: RiskLevel) -> RiskInsight {
        RiskInsight {
            store_id,
            risk_level: level,
            risk_factors: vec!["3 overdue tasks".to_string()],
            recommendations: vec!["Prioritize 3 overdue tasks immediately".to_string()],
            metrics: InsightMetrics {
                completion_rate: 60.0,
                overdue_tasks: 3,
                days_until_opening: Some(12),
            },
        }
    }

    fn entry(store: Store, level: Option<RiskLevel>) -> StoreAnalytics {
        let insight = level.map(|l| test_insight(store.store_id(), l));
        StoreAnalytics {
            store,
            insight,
            prediction: None,
        }
    }

    #[test]
    fn lookup_by_store_id() {
        let store = test_store("Mall Branch");
        let id = store.store_id();
        let snapshot =
            DashboardSnapshot::from_entries(vec![entry(store, Some(RiskLevel::High))]);

        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.get(id).is_some());
        assert!(snapshot.get(StoreId::new()).is_none());
    }

    #[test]
    fn risk_summary_counts_absent_insights_as_unknown() {
        let snapshot = DashboardSnapshot::from_entries(vec![
            entry(test_store("A"), Some(RiskLevel::High)),
            entry(test_store("B"), Some(RiskLevel::Low)),
            entry(test_store("C"), None),
            entry(test_store("D"), Some(RiskLevel::High)),
        ]);

        let summary = snapshot.risk_summary();
        assert_eq!(summary.high, 2);
        assert_eq!(summary.medium, 0);
        assert_eq!(summary.low, 1);
        assert_eq!(summary.unknown, 1);
    }

    #[test]
    fn empty_snapshot_has_no_entries() {
        let snapshot = DashboardSnapshot::empty();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.risk_summary(), RiskSummary::default());
    }
}
