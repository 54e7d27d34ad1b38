//! The follow-up workflow state machine.

use thiserror::Error;
use tracing::{debug, warn};

use launchtrack_core::{Assignee, CollaboratorError, RankedTask};

use crate::draft::{DeliveryReceipt, DraftOrigin, MessageDraft};

/// Generation collaborator: produces candidate follow-up text for a task.
#[async_trait::async_trait]
pub trait MessageComposer: Send + Sync {
    async fn compose(
        &self,
        task: &RankedTask,
        assignee: &Assignee,
    ) -> Result<String, CollaboratorError>;
}

/// Dispatch collaborator: hands a finalized message to the delivery channel.
#[async_trait::async_trait]
pub trait MessageDispatcher: Send + Sync {
    async fn dispatch(&self, draft: &MessageDraft) -> Result<DeliveryReceipt, CollaboratorError>;
}

#[async_trait::async_trait]
impl<T: MessageComposer + ?Sized> MessageComposer for std::sync::Arc<T> {
    async fn compose(
        &self,
        task: &RankedTask,
        assignee: &Assignee,
    ) -> Result<String, CollaboratorError> {
        (**self).compose(task, assignee).await
    }
}

#[async_trait::async_trait]
impl<T: MessageDispatcher + ?Sized> MessageDispatcher for std::sync::Arc<T> {
    async fn dispatch(&self, draft: &MessageDraft) -> Result<DeliveryReceipt, CollaboratorError> {
        (**self).dispatch(draft).await
    }
}

/// Workflow lifecycle. At most one instance is active per session.
///
/// Every state carries exactly the payload that is meaningful in it, so an
/// illegal combination (a draft without a generation, a send without a
/// review) cannot be represented.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowState {
    Idle,
    Generating {
        task: RankedTask,
    },
    Ready {
        draft: MessageDraft,
    },
    GenerationFailed {
        task: RankedTask,
        reason: String,
        /// Shown in place of the draft so the reviewer never faces a blank
        /// field. Not a draft: it cannot be edited or dispatched, only
        /// regenerated.
        fallback_text: String,
    },
    Sending {
        draft: MessageDraft,
    },
    Sent {
        draft: MessageDraft,
        receipt: DeliveryReceipt,
    },
    SendFailed {
        draft: MessageDraft,
        reason: String,
    },
}

impl WorkflowState {
    pub fn name(&self) -> &'static str {
        match self {
            WorkflowState::Idle => "idle",
            WorkflowState::Generating { .. } => "generating",
            WorkflowState::Ready { .. } => "ready",
            WorkflowState::GenerationFailed { .. } => "generation_failed",
            WorkflowState::Sending { .. } => "sending",
            WorkflowState::Sent { .. } => "sent",
            WorkflowState::SendFailed { .. } => "send_failed",
        }
    }
}

/// Rejected workflow operations. Transition rejections fail closed: the
/// state is left exactly as it was.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    /// The task has no assignee to address a message to.
    #[error("task has no assignee")]
    NoAssignee,

    /// The requested operation is not legal from the current state.
    #[error("invalid workflow transition: {action} not allowed from {from}")]
    InvalidTransition {
        from: &'static str,
        action: &'static str,
    },
}

struct Inner {
    state: WorkflowState,
    /// Bumped whenever a new operation starts or the workflow is cancelled.
    /// A completion whose token no longer matches is dropped silently.
    epoch: u64,
}

/// Owns the workflow state and enforces its legal transitions.
///
/// All mutation is routed through this controller's serialized sections; the
/// lock is never held across a collaborator await, so `cancel()` can
/// interleave with an in-flight generation or send, and the late completion
/// is discarded by epoch comparison instead of being applied to `Idle`.
///
/// Nothing here retries automatically. Retrying a send could deliver the
/// message twice; retry is always a fresh, explicit caller action.
pub struct FollowUpController<C, D> {
    composer: C,
    dispatcher: D,
    inner: tokio::sync::Mutex<Inner>,
}

impl<C, D> FollowUpController<C, D>
where
    C: MessageComposer,
    D: MessageDispatcher,
{
    pub fn new(composer: C, dispatcher: D) -> Self {
        Self {
            composer,
            dispatcher,
            inner: tokio::sync::Mutex::new(Inner {
                state: WorkflowState::Idle,
                epoch: 0,
            }),
        }
    }

    /// Read-only view of the current state.
    pub async fn state(&self) -> WorkflowState {
        self.inner.lock().await.state.clone()
    }

    /// Start (or retry) the workflow for a task.
    ///
    /// Legal from `Idle` and `GenerationFailed`. A task without an assignee
    /// is rejected before any state changes. On generation failure the state
    /// carries a deterministic fallback text.
    pub async fn begin_follow_up(&self, task: RankedTask) -> Result<WorkflowState, WorkflowError> {
        let (token, assignee) = {
            let mut inner = self.inner.lock().await;
            match inner.state {
                WorkflowState::Idle | WorkflowState::GenerationFailed { .. } => {}
                ref s => {
                    return Err(WorkflowError::InvalidTransition {
                        from: s.name(),
                        action: "begin_follow_up",
                    });
                }
            }
            let assignee = task.assignee.clone().ok_or(WorkflowError::NoAssignee)?;

            inner.epoch += 1;
            inner.state = WorkflowState::Generating { task: task.clone() };
            (inner.epoch, assignee)
        };

        let composed = self.composer.compose(&task, &assignee).await;

        let mut inner = self.inner.lock().await;
        if inner.epoch != token {
            debug!(task = %task.id, "dropping generation result for superseded workflow");
            return Ok(inner.state.clone());
        }

        inner.state = match composed {
            Ok(text) => WorkflowState::Ready {
                draft: MessageDraft {
                    task_id: task.id,
                    text,
                    origin: DraftOrigin::Generated,
                    recipient_name: assignee.name,
                    recipient_phone: assignee.phone,
                },
            },
            Err(e) => {
                warn!(task = %task.id, error = %e, "follow-up generation failed");
                WorkflowState::GenerationFailed {
                    fallback_text: fallback_text(&task, &assignee),
                    reason: e.to_string(),
                    task,
                }
            }
        };
        Ok(inner.state.clone())
    }

    /// Replace the draft text. Legal only in `Ready`; the state tag does not
    /// change, only the draft content and its origin.
    pub async fn edit_draft(
        &self,
        text: impl Into<String>,
    ) -> Result<WorkflowState, WorkflowError> {
        let mut inner = self.inner.lock().await;
        match inner.state {
            WorkflowState::Ready { ref mut draft } => {
                draft.text = text.into();
                draft.origin = DraftOrigin::Edited;
                Ok(WorkflowState::Ready {
                    draft: draft.clone(),
                })
            }
            ref s => Err(WorkflowError::InvalidTransition {
                from: s.name(),
                action: "edit_draft",
            }),
        }
    }

    /// Hand the reviewed draft to the delivery channel.
    ///
    /// Legal from `Ready` and `SendFailed` (explicit retry). The transition
    /// into `Sending` happens before the suspension point, so a second call
    /// while the first is in flight (or after `Sent`) fails closed: a draft
    /// is delivered at most once per `begin_follow_up`.
    pub async fn dispatch(&self) -> Result<WorkflowState, WorkflowError> {
        let (token, draft) = {
            let mut inner = self.inner.lock().await;
            let draft = match inner.state {
                WorkflowState::Ready { ref draft } | WorkflowState::SendFailed { ref draft, .. } => {
                    draft.clone()
                }
                ref s => {
                    return Err(WorkflowError::InvalidTransition {
                        from: s.name(),
                        action: "dispatch",
                    });
                }
            };
            inner.epoch += 1;
            inner.state = WorkflowState::Sending {
                draft: draft.clone(),
            };
            (inner.epoch, draft)
        };

        let sent = self.dispatcher.dispatch(&draft).await;

        let mut inner = self.inner.lock().await;
        if inner.epoch != token {
            debug!(task = %draft.task_id, "dropping dispatch result for superseded workflow");
            return Ok(inner.state.clone());
        }

        inner.state = match sent {
            Ok(receipt) => WorkflowState::Sent { draft, receipt },
            Err(e) => {
                warn!(task = %draft.task_id, error = %e, "follow-up dispatch failed");
                // Draft text and recipient survive for retry.
                WorkflowState::SendFailed {
                    reason: e.to_string(),
                    draft,
                }
            }
        };
        Ok(inner.state.clone())
    }

    /// Abandon the workflow from any state, discarding the in-flight task
    /// and draft. An operation completing after this is dropped.
    pub async fn cancel(&self) -> WorkflowState {
        let mut inner = self.inner.lock().await;
        inner.epoch += 1;
        if !matches!(inner.state, WorkflowState::Idle) {
            debug!(from = inner.state.name(), "workflow cancelled");
        }
        inner.state = WorkflowState::Idle;
        inner.state.clone()
    }
}

/// Deterministic reminder text used when generation fails, so the reviewer
/// still sees something addressable instead of an empty field.
fn fallback_text(task: &RankedTask, assignee: &Assignee) -> String {
    format!(
        "Hello {name},\n\n\
         This is a reminder about the following task:\n\n\
         Task: {title}\n\
         Priority rank: {rank}\n\n\
         Please provide an update on the progress of this task. \
         If you need any assistance, let us know.\n\n\
         Thank you!",
        name = assignee.name,
        title = task.title,
        rank = task.rank,
    )
}
