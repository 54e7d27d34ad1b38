//! `launchtrack-followup`
//!
//! **Responsibility:** The follow-up message workflow.
//!
//! One controller owns the generate → review/edit → dispatch lifecycle for a
//! single ranked task at a time. Legal transitions are enforced by an
//! explicit state machine (not per-concern flags), which is what rules out
//! the classic failure modes here: sending an unreviewed draft, and
//! double-sending on a double-click. Message text comes from a generation
//! collaborator and delivery goes through a dispatch collaborator; this
//! crate produces neither itself.

pub mod draft;
pub mod workflow;

pub use draft::{DeliveryReceipt, DraftOrigin, MessageDraft};
pub use workflow::{
    FollowUpController, MessageComposer, MessageDispatcher, WorkflowError, WorkflowState,
};
