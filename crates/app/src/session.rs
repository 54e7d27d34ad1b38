//! One dashboard session: fetcher + selector + controller.

use std::sync::Arc;

use thiserror::Error;

use launchtrack_analytics::{
    AnalyticsProvider, DashboardSnapshot, PrioritizationError, PrioritizationProvider,
    PrioritizationSelector, RefreshError, RefreshReport, Selection, SelectionOutcome,
    SnapshotFetcher, StoreDirectory,
};
use launchtrack_core::{StoreId, TaskId};
use launchtrack_followup::{
    FollowUpController, MessageComposer, MessageDispatcher, WorkflowError, WorkflowState,
};

/// Session-level failures. The component errors pass through unchanged; the
/// session only adds lookup failures of its own.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Refresh(#[from] RefreshError),

    #[error(transparent)]
    Prioritization(#[from] PrioritizationError),

    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// A follow-up was requested while no store selection is current.
    #[error("no store selected")]
    NoSelection,

    /// The requested task is not part of the current selection.
    #[error("task {0} is not in the current selection")]
    UnknownTask(TaskId),
}

/// The orchestrator for one login session.
///
/// Owns exactly one snapshot fetcher, one prioritization selector and one
/// follow-up controller. All session state is reconstructed from the
/// collaborators on each load; nothing is persisted locally.
pub struct DashboardSession<D, A, P, C, M>
where
    D: StoreDirectory,
    A: AnalyticsProvider,
    P: PrioritizationProvider,
    C: MessageComposer,
    M: MessageDispatcher,
{
    fetcher: SnapshotFetcher<D, A>,
    selector: PrioritizationSelector<P>,
    controller: FollowUpController<C, M>,
}

impl<D, A, P, C, M> DashboardSession<D, A, P, C, M>
where
    D: StoreDirectory,
    A: AnalyticsProvider,
    P: PrioritizationProvider,
    C: MessageComposer,
    M: MessageDispatcher,
{
    pub fn new(directory: D, analytics: A, ranker: P, composer: C, dispatcher: M) -> Self {
        Self {
            fetcher: SnapshotFetcher::new(directory, analytics),
            selector: PrioritizationSelector::new(ranker),
            controller: FollowUpController::new(composer, dispatcher),
        }
    }

    /// Rebuild the aggregate snapshot. On a registry failure the previous
    /// snapshot stays published.
    pub async fn refresh(&self) -> Result<RefreshReport, SessionError> {
        Ok(self.fetcher.refresh().await?)
    }

    pub fn snapshot(&self) -> Arc<DashboardSnapshot> {
        self.fetcher.snapshot()
    }

    pub async fn select_store(
        &self,
        store_id: StoreId,
    ) -> Result<SelectionOutcome, SessionError> {
        Ok(self.selector.select_store(store_id).await?)
    }

    pub async fn selection(&self) -> Option<Selection> {
        self.selector.current().await
    }

    pub async fn clear_selection(&self) {
        self.selector.clear().await
    }

    /// Start the follow-up workflow for a task from the current selection.
    pub async fn begin_follow_up(&self, task_id: TaskId) -> Result<WorkflowState, SessionError> {
        let selection = self.selection().await.ok_or(SessionError::NoSelection)?;
        let task = selection
            .tasks
            .iter()
            .find(|t| t.id == task_id)
            .cloned()
            .ok_or(SessionError::UnknownTask(task_id))?;
        Ok(self.controller.begin_follow_up(task).await?)
    }

    pub async fn edit_draft(&self, text: impl Into<String>) -> Result<WorkflowState, SessionError> {
        Ok(self.controller.edit_draft(text).await?)
    }

    pub async fn dispatch(&self) -> Result<WorkflowState, SessionError> {
        Ok(self.controller.dispatch().await?)
    }

    pub async fn cancel_follow_up(&self) -> WorkflowState {
        self.controller.cancel().await
    }

    pub async fn workflow_state(&self) -> WorkflowState {
        self.controller.state().await
    }
}
