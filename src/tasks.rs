use crate::errors::ApiError;
use std::future::Future;
use tokio::task::JoinSet;
use tracing::error;

/// Runs a batch of fallible tasks in parallel.
///
/// [`TaskGroup::join`] yields results in spawn order and stops at the first
/// failure. Tasks still running when the group is dropped are aborted.
pub struct TaskGroup<T> {
    tasks: JoinSet<(usize, Result<T, ApiError>)>,
    spawned: usize,
}

impl<T: Send + 'static> TaskGroup<T> {
    pub fn new() -> Self {
        Self {
            tasks: JoinSet::new(),
            spawned: 0,
        }
    }

    pub fn spawn<F>(&mut self, task: F)
    where
        F: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let index = self.spawned;
        self.spawned += 1;

        self.tasks.spawn(async move { (index, task.await) });
    }

    pub async fn join(mut self) -> Result<Vec<T>, ApiError> {
        let mut slots: Vec<Option<T>> = (0..self.spawned).map(|_| None).collect();

        while let Some(joined) = self.tasks.join_next().await {
            let (index, result) = joined.map_err(|e| {
                error!("Task failed to complete: {e}");
                ApiError::transform(format!("Task failed to complete: {e}"))
            })?;

            slots[index] = Some(result?);
        }

        // every slot is filled once the set is drained without error
        Ok(slots.into_iter().flatten().collect())
    }
}

impl<T: Send + 'static> Default for TaskGroup<T> {
    fn default() -> Self {
        Self::new()
    }
}
