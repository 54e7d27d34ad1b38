//! Completion prediction: projected finish date for one store's checklist.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use launchtrack_core::StoreId;

/// Throughput metrics backing a prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionMetrics {
    pub remaining_tasks: u32,
    pub average_tasks_per_day: f64,
    /// Tasks completed in the collaborator's trailing window.
    pub recently_completed: u32,
}

/// Completion forecast for one store, as computed by the analytics
/// collaborator.
///
/// `predicted_completion` is absent when the store has shown no recent
/// throughput (nothing to extrapolate from); `days_difference` is absent
/// when either the prediction or the opening date is missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub store_id: StoreId,
    pub predicted_completion: Option<DateTime<Utc>>,
    pub on_track: bool,
    pub days_difference: Option<i64>,
    pub metrics: PredictionMetrics,
}
