//! Snapshot refresh: registry reload + analytics fan-out/fan-in.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use futures::future::join_all;
use thiserror::Error;
use tracing::{debug, warn};

use launchtrack_core::{CollaboratorError, Store, StoreId, StoreRegistry};

use crate::prediction::Prediction;
use crate::provider::{AnalyticsProvider, StoreDirectory};
use crate::snapshot::{DashboardSnapshot, StoreAnalytics};

/// Fatal refresh failure. The previous snapshot stays published.
#[derive(Debug, Error)]
pub enum RefreshError {
    /// The store registry could not be fetched; nothing was replaced.
    #[error("store registry fetch failed: {0}")]
    Registry(CollaboratorError),
}

/// Informational outcome of one successful refresh.
///
/// Sub-fetch failures are non-fatal: the affected field is simply absent in
/// the snapshot. The counts let the caller surface "N of M analytics calls
/// failed" without treating the refresh as failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshReport {
    pub store_count: usize,
    pub insight_failures: usize,
    pub prediction_failures: usize,
}

/// Fetches and owns the dashboard snapshot.
///
/// Single-writer: all mutation goes through `refresh()`, which is serialized
/// internally (one refresh in flight at a time). Readers get the current
/// snapshot as a cheap `Arc` clone and never see a partially merged value.
pub struct SnapshotFetcher<D, A> {
    directory: D,
    analytics: A,
    /// Also serves as the refresh gate: held for the whole refresh.
    registry: tokio::sync::Mutex<StoreRegistry>,
    current: RwLock<Arc<DashboardSnapshot>>,
}

impl<D, A> SnapshotFetcher<D, A>
where
    D: StoreDirectory,
    A: AnalyticsProvider,
{
    pub fn new(directory: D, analytics: A) -> Self {
        Self {
            directory,
            analytics,
            registry: tokio::sync::Mutex::new(StoreRegistry::new()),
            current: RwLock::new(Arc::new(DashboardSnapshot::empty())),
        }
    }

    /// The currently published snapshot.
    pub fn snapshot(&self) -> Arc<DashboardSnapshot> {
        self.current.read().unwrap().clone()
    }

    /// Reload the store registry and rebuild the snapshot.
    ///
    /// Steps:
    /// 1. Fetch the store list. Failure here is fatal for this refresh; the
    ///    prior snapshot is retained (stale-but-valid, never a blank UI).
    /// 2. Fan out the bulk insight call and one prediction call per store,
    ///    concurrently. Each failure is isolated: logged, counted, and the
    ///    field left absent. Siblings are unaffected.
    /// 3. Assemble and publish the snapshot only after every call settled.
    pub async fn refresh(&self) -> Result<RefreshReport, RefreshError> {
        let mut registry = self.registry.lock().await;

        let stores = self
            .directory
            .list_stores()
            .await
            .map_err(RefreshError::Registry)?;
        registry.replace_all(stores);

        let stores: Vec<Store> = registry.iter().cloned().collect();

        // Fan-out: bulk insights alongside per-store predictions. The
        // fan-in barrier bounds refresh latency to the slowest single call.
        let prediction_futures = stores.iter().map(|store| {
            let store_id = store.store_id();
            async move {
                (
                    store_id,
                    self.analytics.completion_prediction(store_id).await,
                )
            }
        });
        let (insights, predictions) = tokio::join!(
            self.analytics.risk_insights(),
            join_all(prediction_futures)
        );

        let mut insight_failures = 0usize;
        let mut insight_map = HashMap::new();
        match insights {
            Ok(list) => {
                for insight in list {
                    if !registry.contains(insight.store_id) {
                        warn!(store = %insight.store_id, "insight for unknown store, dropping");
                        continue;
                    }
                    if insight_map.contains_key(&insight.store_id) {
                        warn!(store = %insight.store_id, "duplicate insight for store, keeping first");
                        continue;
                    }
                    insight_map.insert(insight.store_id, insight);
                }
            }
            Err(e) => {
                warn!(error = %e, "bulk insight fetch failed, all insights absent");
                insight_failures = stores.len();
            }
        }

        let mut prediction_failures = 0usize;
        let mut prediction_map: HashMap<StoreId, Prediction> = HashMap::new();
        for (store_id, result) in predictions {
            match result {
                Ok(prediction) => {
                    // Keyed by the requested id, not the echoed one.
                    prediction_map.insert(store_id, prediction);
                }
                Err(e) => {
                    warn!(store = %store_id, error = %e, "prediction fetch failed");
                    prediction_failures += 1;
                }
            }
        }

        let entries = stores
            .into_iter()
            .map(|store| {
                let id = store.store_id();
                StoreAnalytics {
                    insight: insight_map.remove(&id),
                    prediction: prediction_map.remove(&id),
                    store,
                }
            })
            .collect::<Vec<_>>();

        let report = RefreshReport {
            store_count: entries.len(),
            insight_failures,
            prediction_failures,
        };

        let snapshot = Arc::new(DashboardSnapshot::from_entries(entries));
        *self.current.write().unwrap() = snapshot;

        debug!(
            stores = report.store_count,
            insight_failures = report.insight_failures,
            prediction_failures = report.prediction_failures,
            "snapshot refreshed"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use crate::insight::{InsightMetrics, RiskInsight, RiskLevel};
    use crate::prediction::PredictionMetrics;

    fn test_store(name: &str) -> Store {
        Store::new(StoreId::new(), name, "Riyadh")
    }

    fn test_insight(store_id: StoreId) -> RiskInsight {
        RiskInsight {
            store_id,
            risk_level: RiskLevel::Medium,
            risk_factors: vec!["2 overdue tasks".to_string()],
            recommendations: Vec::new(),
            metrics: InsightMetrics {
                completion_rate: 70.0,
                overdue_tasks: 2,
                days_until_opening: Some(20),
            },
        }
    }

    fn test_prediction(store_id: StoreId) -> Prediction {
        Prediction {
            store_id,
            predicted_completion: None,
            on_track: true,
            days_difference: Some(3),
            metrics: PredictionMetrics {
                remaining_tasks: 5,
                average_tasks_per_day: 1.5,
                recently_completed: 21,
            },
        }
    }

    /// Directory fake: a queue of per-call results.
    struct FakeDirectory {
        responses: Mutex<Vec<Result<Vec<Store>, CollaboratorError>>>,
    }

    impl FakeDirectory {
        fn new(responses: Vec<Result<Vec<Store>, CollaboratorError>>) -> Self {
            Self {
                responses: Mutex::new(responses),
            }
        }
    }

    #[async_trait::async_trait]
    impl StoreDirectory for FakeDirectory {
        async fn list_stores(&self) -> Result<Vec<Store>, CollaboratorError> {
            self.responses
                .lock()
                .unwrap()
                .remove(0)
        }
    }

    /// Analytics fake: fixed bulk insight result + per-store predictions.
    struct FakeAnalytics {
        insights: Result<Vec<RiskInsight>, CollaboratorError>,
        predictions: HashMap<StoreId, Result<Prediction, CollaboratorError>>,
    }

    impl FakeAnalytics {
        fn new(insights: Result<Vec<RiskInsight>, CollaboratorError>) -> Self {
            Self {
                insights,
                predictions: HashMap::new(),
            }
        }

        fn with_prediction(mut self, id: StoreId, result: Result<Prediction, CollaboratorError>) -> Self {
            self.predictions.insert(id, result);
            self
        }
    }

    #[async_trait::async_trait]
    impl AnalyticsProvider for FakeAnalytics {
        async fn risk_insights(&self) -> Result<Vec<RiskInsight>, CollaboratorError> {
            self.insights.clone()
        }

        async fn completion_prediction(
            &self,
            store_id: StoreId,
        ) -> Result<Prediction, CollaboratorError> {
            self.predictions
                .get(&store_id)
                .cloned()
                .unwrap_or_else(|| Ok(test_prediction(store_id)))
        }
    }

    fn transport_err() -> CollaboratorError {
        CollaboratorError::transport("connection refused")
    }

    #[tokio::test]
    async fn snapshot_entity_set_matches_fetched_registry() {
        let stores = vec![test_store("A"), test_store("B"), test_store("C")];
        let ids: Vec<StoreId> = stores.iter().map(|s| s.store_id()).collect();

        // Insight present for stores 1 and 3 only.
        let analytics = FakeAnalytics::new(Ok(vec![test_insight(ids[0]), test_insight(ids[2])]));
        let fetcher =
            SnapshotFetcher::new(FakeDirectory::new(vec![Ok(stores)]), analytics);

        let report = fetcher.refresh().await.unwrap();
        assert_eq!(report.store_count, 3);

        let snapshot = fetcher.snapshot();
        assert_eq!(snapshot.len(), 3);
        assert!(snapshot.get(ids[0]).unwrap().insight.is_some());
        assert!(snapshot.get(ids[1]).unwrap().insight.is_none());
        assert!(snapshot.get(ids[2]).unwrap().insight.is_some());
    }

    #[tokio::test]
    async fn registry_failure_retains_prior_snapshot() {
        let store = test_store("A");
        let id = store.store_id();
        let directory =
            FakeDirectory::new(vec![Ok(vec![store]), Err(transport_err())]);
        let fetcher = SnapshotFetcher::new(directory, FakeAnalytics::new(Ok(Vec::new())));

        fetcher.refresh().await.unwrap();
        assert_eq!(fetcher.snapshot().len(), 1);

        let err = fetcher.refresh().await.unwrap_err();
        assert!(matches!(err, RefreshError::Registry(_)));

        // Stale-but-valid: the first snapshot is still published.
        let snapshot = fetcher.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.get(id).is_some());
    }

    #[tokio::test]
    async fn prediction_failure_is_isolated_and_counted() {
        let stores = vec![test_store("A"), test_store("B")];
        let ids: Vec<StoreId> = stores.iter().map(|s| s.store_id()).collect();

        let analytics = FakeAnalytics::new(Ok(Vec::new()))
            .with_prediction(ids[0], Err(transport_err()))
            .with_prediction(ids[1], Ok(test_prediction(ids[1])));
        let fetcher =
            SnapshotFetcher::new(FakeDirectory::new(vec![Ok(stores)]), analytics);

        let report = fetcher.refresh().await.unwrap();
        assert_eq!(report.prediction_failures, 1);

        let snapshot = fetcher.snapshot();
        assert!(snapshot.get(ids[0]).unwrap().prediction.is_none());
        assert!(snapshot.get(ids[1]).unwrap().prediction.is_some());
    }

    #[tokio::test]
    async fn bulk_insight_failure_leaves_all_insights_absent() {
        let stores = vec![test_store("A"), test_store("B"), test_store("C")];
        let fetcher = SnapshotFetcher::new(
            FakeDirectory::new(vec![Ok(stores)]),
            FakeAnalytics::new(Err(transport_err())),
        );

        let report = fetcher.refresh().await.unwrap();
        assert_eq!(report.insight_failures, 3);
        assert_eq!(report.prediction_failures, 0);

        let snapshot = fetcher.snapshot();
        assert_eq!(snapshot.len(), 3);
        assert!(snapshot.entries().iter().all(|e| e.insight.is_none()));
        // Predictions are an independent fan-out and still landed.
        assert!(snapshot.entries().iter().all(|e| e.prediction.is_some()));
    }

    #[tokio::test]
    async fn unknown_store_insight_is_dropped() {
        let store = test_store("A");
        let id = store.store_id();
        let analytics =
            FakeAnalytics::new(Ok(vec![test_insight(id), test_insight(StoreId::new())]));
        let fetcher =
            SnapshotFetcher::new(FakeDirectory::new(vec![Ok(vec![store])]), analytics);

        fetcher.refresh().await.unwrap();

        let snapshot = fetcher.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.get(id).unwrap().insight.is_some());
    }

    #[tokio::test]
    async fn duplicate_insight_keeps_first() {
        let store = test_store("A");
        let id = store.store_id();

        let mut first = test_insight(id);
        first.risk_level = RiskLevel::High;
        let mut second = test_insight(id);
        second.risk_level = RiskLevel::Low;

        let fetcher = SnapshotFetcher::new(
            FakeDirectory::new(vec![Ok(vec![store])]),
            FakeAnalytics::new(Ok(vec![first, second])),
        );

        fetcher.refresh().await.unwrap();

        let snapshot = fetcher.snapshot();
        let insight = snapshot.get(id).unwrap().insight.as_ref().unwrap();
        assert_eq!(insight.risk_level, RiskLevel::High);
    }

    #[tokio::test]
    async fn refresh_replaces_snapshot_wholesale() {
        let gone = test_store("Gone");
        let gone_id = gone.store_id();
        let kept = test_store("Kept");
        let kept_id = kept.store_id();

        let directory = FakeDirectory::new(vec![Ok(vec![gone]), Ok(vec![kept])]);
        let fetcher = SnapshotFetcher::new(directory, FakeAnalytics::new(Ok(Vec::new())));

        fetcher.refresh().await.unwrap();
        let before = fetcher.snapshot();
        assert!(before.get(gone_id).is_some());

        fetcher.refresh().await.unwrap();
        let after = fetcher.snapshot();
        assert!(after.get(gone_id).is_none());
        assert!(after.get(kept_id).is_some());

        // The previously handed-out snapshot is untouched.
        assert!(before.get(gone_id).is_some());
    }
}
