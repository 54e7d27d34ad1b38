//! Store selection and ranked-task fetching.

use thiserror::Error;
use tracing::{debug, warn};

use launchtrack_core::{CollaboratorError, RankedTask, StoreId};

use crate::provider::PrioritizationProvider;

/// Failure of a prioritization fetch for the current selection.
#[derive(Debug, Error)]
pub enum PrioritizationError {
    /// The collaborator could not produce a ranking.
    #[error("prioritization unavailable: {0}")]
    Unavailable(CollaboratorError),

    /// The collaborator violated the dense-rank contract. Defensive check;
    /// the result is rejected, never silently repaired.
    #[error("prioritization malformed: {0}")]
    Malformed(String),
}

/// Outcome of a `select_store` call.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionOutcome {
    /// The fetched list is now the current selection.
    Current(Vec<RankedTask>),
    /// A newer selection (or a clear) happened while this fetch was in
    /// flight; the result was discarded and the current list is untouched.
    Superseded,
}

/// The currently valid selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub store_id: StoreId,
    pub tasks: Vec<RankedTask>,
}

struct SelectorInner {
    generation: u64,
    current: Option<Selection>,
}

/// Fetches the ranked task list for one explicitly selected store.
///
/// Only one "current selection" exists at a time. Selecting a store bumps a
/// generation counter; a result arriving for an older generation is dropped
/// so an out-of-order response can never overwrite a newer selection.
/// Re-selecting the same store re-fetches: rankings are time-sensitive and
/// are never served from a cache.
pub struct PrioritizationSelector<P> {
    provider: P,
    inner: tokio::sync::Mutex<SelectorInner>,
}

impl<P> PrioritizationSelector<P>
where
    P: PrioritizationProvider,
{
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            inner: tokio::sync::Mutex::new(SelectorInner {
                generation: 0,
                current: None,
            }),
        }
    }

    /// Select a store and fetch its ranked tasks.
    ///
    /// On success the list becomes the current selection. On failure for a
    /// still-current request the previous selection is invalidated (the
    /// caller sees the store as "failed to load", not as the old list).
    pub async fn select_store(
        &self,
        store_id: StoreId,
    ) -> Result<SelectionOutcome, PrioritizationError> {
        let token = {
            let mut inner = self.inner.lock().await;
            inner.generation += 1;
            // The previous list no longer matches the new selection.
            inner.current = None;
            inner.generation
        };

        let fetched = self.provider.prioritized_tasks(store_id).await;

        let mut inner = self.inner.lock().await;
        if inner.generation != token {
            debug!(store = %store_id, "discarding prioritization result for superseded selection");
            return Ok(SelectionOutcome::Superseded);
        }

        let tasks = match fetched {
            Ok(tasks) => tasks,
            Err(e) => {
                warn!(store = %store_id, error = %e, "prioritization fetch failed");
                return Err(PrioritizationError::Unavailable(e));
            }
        };

        validate_dense_ranks(&tasks).map_err(PrioritizationError::Malformed)?;

        inner.current = Some(Selection {
            store_id,
            tasks: tasks.clone(),
        });
        Ok(SelectionOutcome::Current(tasks))
    }

    /// The currently valid selection, if any.
    pub async fn current(&self) -> Option<Selection> {
        self.inner.lock().await.current.clone()
    }

    /// Drop the current selection; any in-flight fetch result is discarded.
    pub async fn clear(&self) {
        let mut inner = self.inner.lock().await;
        inner.generation += 1;
        inner.current = None;
    }
}

/// Ranks must be exactly `1..=n`, in order. The source ranks; we only check.
fn validate_dense_ranks(tasks: &[RankedTask]) -> Result<(), String> {
    for (i, task) in tasks.iter().enumerate() {
        let expected = (i + 1) as u32;
        if task.rank != expected {
            return Err(format!(
                "expected rank {expected} at position {i}, got {}",
                task.rank
            ));
        }
    }
    Ok(())
}
