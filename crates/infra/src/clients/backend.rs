//! Client for the entity-management backend (stores, prioritized tasks).

use launchtrack_analytics::{PrioritizationProvider, StoreDirectory};
use launchtrack_core::{CollaboratorError, RankedTask, Store, StoreId};

use crate::dto::{PrioritizationDto, StoreDto};
use crate::http::ApiClient;

/// REST client for the entity-management backend.
#[derive(Debug, Clone)]
pub struct HttpBackendClient {
    api: ApiClient,
}

impl HttpBackendClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait::async_trait]
impl StoreDirectory for HttpBackendClient {
    async fn list_stores(&self) -> Result<Vec<Store>, CollaboratorError> {
        let stores: Vec<StoreDto> = self.api.get_json("/stores").await?;
        Ok(stores.into_iter().map(Into::into).collect())
    }
}

#[async_trait::async_trait]
impl PrioritizationProvider for HttpBackendClient {
    async fn prioritized_tasks(
        &self,
        store_id: StoreId,
    ) -> Result<Vec<RankedTask>, CollaboratorError> {
        let dto: PrioritizationDto = self
            .api
            .get_json(&format!("/ai/store/{store_id}/task-prioritization"))
            .await?;
        Ok(dto.tasks.into_iter().map(Into::into).collect())
    }
}
