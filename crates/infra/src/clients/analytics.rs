//! Client for the analytics/AI backend (insights, predictions, generation).

use launchtrack_analytics::{AnalyticsProvider, Prediction, RiskInsight};
use launchtrack_core::{Assignee, CollaboratorError, RankedTask, StoreId};
use launchtrack_followup::MessageComposer;

use crate::dto::{FollowUpDto, InsightEnvelopeDto, PredictionDto};
use crate::http::ApiClient;

/// REST client for the analytics/AI backend.
///
/// Also implements message generation: the same backend that ranks tasks
/// writes the candidate follow-up text.
#[derive(Debug, Clone)]
pub struct HttpAnalyticsClient {
    api: ApiClient,
}

impl HttpAnalyticsClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait::async_trait]
impl AnalyticsProvider for HttpAnalyticsClient {
    async fn risk_insights(&self) -> Result<Vec<RiskInsight>, CollaboratorError> {
        let envelope: InsightEnvelopeDto = self.api.get_json("/ai/insights/dashboard").await?;
        Ok(envelope.insights.into_iter().map(Into::into).collect())
    }

    async fn completion_prediction(
        &self,
        store_id: StoreId,
    ) -> Result<Prediction, CollaboratorError> {
        let dto: PredictionDto = self
            .api
            .get_json(&format!("/ai/predict/completion-date/{store_id}"))
            .await?;
        Ok(dto.into())
    }
}

#[async_trait::async_trait]
impl MessageComposer for HttpAnalyticsClient {
    async fn compose(
        &self,
        task: &RankedTask,
        _assignee: &Assignee,
    ) -> Result<String, CollaboratorError> {
        // The backend resolves task, assignee and store context from the
        // task id; the request body is empty.
        let dto: FollowUpDto = self
            .api
            .post_json(
                &format!("/ai/task/{}/generate-followup", task.id),
                &serde_json::json!({}),
            )
            .await?;
        Ok(dto.message)
    }
}
