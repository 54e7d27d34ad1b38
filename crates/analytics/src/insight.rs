//! Risk insight: the analytics backend's assessment of one store.

use serde::{Deserialize, Serialize};

use launchtrack_core::StoreId;

/// Coarse classification of a store's on-time-opening risk.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

/// Progress metrics backing an insight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightMetrics {
    /// Checklist completion in percent (0..=100).
    pub completion_rate: f64,
    pub overdue_tasks: u32,
    /// Absent when the store has no opening date set.
    pub days_until_opening: Option<i64>,
}

/// Risk assessment for one store, as computed by the analytics collaborator.
///
/// This is an insight, not a domain event: it is displayed and replaced, it
/// never mutates domain state. Factor and recommendation ordering is the
/// collaborator's and is preserved as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskInsight {
    pub store_id: StoreId,
    pub risk_level: RiskLevel,
    pub risk_factors: Vec<String>,
    pub recommendations: Vec<String>,
    pub metrics: InsightMetrics,
}
