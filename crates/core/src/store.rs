//! Store, assignee and ranked-task records.
//!
//! These are the shapes shared between the aggregation side (snapshots are
//! keyed by store) and the follow-up side (a workflow governs one ranked
//! task at a time). They carry no behavior beyond identity.

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::id::{MemberId, StoreId, TaskId};

/// A store opening project. Identity is `id`; the attribute set is static
/// for the lifetime of a registry load and refreshed wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    id: StoreId,
    name: String,
    location: String,
}

impl Store {
    pub fn new(id: StoreId, name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            location: location.into(),
        }
    }

    pub fn store_id(&self) -> StoreId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}

impl Entity for Store {
    type Id = StoreId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// A team member a task is assigned to. `phone` is the contact address used
/// by the dispatch channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignee {
    pub member_id: MemberId,
    pub name: String,
    pub phone: String,
}

/// One work item from a prioritization result.
///
/// `rank` is 1-based and dense within a result: rank 1 is the most urgent
/// item, and a result of n items carries exactly the ranks 1..=n.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedTask {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub rank: u32,
    pub assignee: Option<Assignee>,
}

impl Entity for RankedTask {
    type Id = TaskId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
