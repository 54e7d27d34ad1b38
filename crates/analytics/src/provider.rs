//! Collaborator seams for the aggregation and prioritization flows.
//!
//! Implementations live in `launchtrack-infra` (HTTP) and in test modules
//! (in-memory fakes). All calls are suspension points; none are retried
//! here. Retry is always an explicit, user-triggered action upstream.

use launchtrack_core::{CollaboratorError, RankedTask, Store, StoreId};

use crate::insight::RiskInsight;
use crate::prediction::Prediction;

/// Source of the current store set (the entity-management backend).
#[async_trait::async_trait]
pub trait StoreDirectory: Send + Sync {
    /// List all stores tracked for the session's tenant, in backend order.
    async fn list_stores(&self) -> Result<Vec<Store>, CollaboratorError>;
}

/// Source of per-store analytics (the analytics/AI backend).
#[async_trait::async_trait]
pub trait AnalyticsProvider: Send + Sync {
    /// Bulk risk insights for all active stores.
    ///
    /// Stores missing from the result simply have no insight; that is not a
    /// failure of the call.
    async fn risk_insights(&self) -> Result<Vec<RiskInsight>, CollaboratorError>;

    /// Completion prediction for one store.
    async fn completion_prediction(
        &self,
        store_id: StoreId,
    ) -> Result<Prediction, CollaboratorError>;
}

/// Source of ranked task lists for one store (the analytics/AI backend).
#[async_trait::async_trait]
pub trait PrioritizationProvider: Send + Sync {
    /// Pending tasks for the store, already ordered most-urgent-first by the
    /// collaborator.
    async fn prioritized_tasks(
        &self,
        store_id: StoreId,
    ) -> Result<Vec<RankedTask>, CollaboratorError>;
}

// One client often backs several seams; allow sharing it via `Arc`.

#[async_trait::async_trait]
impl<T: StoreDirectory + ?Sized> StoreDirectory for std::sync::Arc<T> {
    async fn list_stores(&self) -> Result<Vec<Store>, CollaboratorError> {
        (**self).list_stores().await
    }
}

#[async_trait::async_trait]
impl<T: AnalyticsProvider + ?Sized> AnalyticsProvider for std::sync::Arc<T> {
    async fn risk_insights(&self) -> Result<Vec<RiskInsight>, CollaboratorError> {
        (**self).risk_insights().await
    }

    async fn completion_prediction(
        &self,
        store_id: StoreId,
    ) -> Result<Prediction, CollaboratorError> {
        (**self).completion_prediction(store_id).await
    }
}

#[async_trait::async_trait]
impl<T: PrioritizationProvider + ?Sized> PrioritizationProvider for std::sync::Arc<T> {
    async fn prioritized_tasks(
        &self,
        store_id: StoreId,
    ) -> Result<Vec<RankedTask>, CollaboratorError> {
        (**self).prioritized_tasks(store_id).await
    }
}
