//! `launchtrack-analytics`
//!
//! **Responsibility:** Risk aggregation and task prioritization.
//!
//! This crate merges per-store analytics (risk insight, completion
//! prediction) from failure-prone collaborators into one consistent
//! snapshot, and fetches AI-ranked task lists for a selected store. It does
//! **not** compute risk, predictions or rankings itself; those are opaque
//! results from the analytics backend.

pub mod fetcher;
pub mod insight;
pub mod prediction;
pub mod prioritization;
pub mod provider;
pub mod snapshot;

pub use fetcher::{RefreshError, RefreshReport, SnapshotFetcher};
pub use insight::{InsightMetrics, RiskInsight, RiskLevel};
pub use prediction::{Prediction, PredictionMetrics};
pub use prioritization::{
    PrioritizationError, PrioritizationSelector, Selection, SelectionOutcome,
};
pub use provider::{AnalyticsProvider, PrioritizationProvider, StoreDirectory};
pub use snapshot::{DashboardSnapshot, RiskSummary, StoreAnalytics};
