//! Batch Use Cases
//!
//! Batches are independent per-item calls: no atomicity and no rollback.
//! At most `batch_concurrency` calls are in flight, and every item's
//! outcome is reported in input order.

use std::future::Future;
use std::sync::Arc;

use futures_util::stream::{self, StreamExt};
use serde::Serialize;
use tracing::info;

use crate::application::config::DataConfig;
use crate::application::contract::{CreateManyParams, DeleteManyParams, UpdateManyParams};
use crate::domain::entity::record::Record;
use crate::domain::repository::DocumentStore;
use crate::domain::value_object::resource::Resource;
use crate::error::{DataError, DataResult};

/// One item that failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchFailure {
    /// Position in the request
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchOutcome<T> {
    pub succeeded: Vec<T>,
    pub failed: Vec<BatchFailure>,
}

impl<T> Default for BatchOutcome<T> {
    fn default() -> Self {
        Self {
            succeeded: Vec::new(),
            failed: Vec::new(),
        }
    }
}

impl<T> BatchOutcome<T> {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Run `tasks` with bounded concurrency and collect their outcomes
    pub async fn collect<Fut>(tasks: Vec<(Option<String>, Fut)>, concurrency: usize) -> Self
    where
        Fut: Future<Output = DataResult<T>>,
    {
        let results: Vec<(Option<String>, DataResult<T>)> = stream::iter(
            tasks
                .into_iter()
                .map(|(id, task)| async move { (id, task.await) }),
        )
        .buffered(concurrency.max(1))
        .collect()
        .await;

        let mut outcome = Self::default();
        for (index, (id, result)) in results.into_iter().enumerate() {
            match result {
                Ok(value) => outcome.succeeded.push(value),
                Err(e) => {
                    e.log();
                    outcome.failed.push(BatchFailure {
                        index,
                        id,
                        message: e.to_string(),
                    });
                }
            }
        }
        outcome
    }
}

pub struct CreateManyUseCase<S>
where
    S: DocumentStore,
{
    store: Arc<S>,
    config: Arc<DataConfig>,
}

impl<S> CreateManyUseCase<S>
where
    S: DocumentStore,
{
    pub fn new(store: Arc<S>, config: Arc<DataConfig>) -> Self {
        Self { store, config }
    }

    pub async fn execute(&self, params: CreateManyParams) -> DataResult<BatchOutcome<Record>> {
        let resource = Resource::new(&params.resource)?;
        let tasks = params
            .variables
            .into_iter()
            .map(|fields| (None, self.store.insert(&resource, fields)))
            .collect();

        let outcome = BatchOutcome::collect(tasks, self.config.batch_concurrency).await;
        info!(
            resource = %resource,
            succeeded = outcome.succeeded.len(),
            failed = outcome.failed.len(),
            "Batch create finished"
        );
        Ok(outcome)
    }
}

pub struct UpdateManyUseCase<S>
where
    S: DocumentStore,
{
    store: Arc<S>,
    config: Arc<DataConfig>,
}

impl<S> UpdateManyUseCase<S>
where
    S: DocumentStore,
{
    pub fn new(store: Arc<S>, config: Arc<DataConfig>) -> Self {
        Self { store, config }
    }

    pub async fn execute(&self, params: UpdateManyParams) -> DataResult<BatchOutcome<Record>> {
        let resource = Resource::new(&params.resource)?;
        let tasks = params
            .ids
            .iter()
            .map(|id| {
                let task = self.store.update(&resource, id, params.variables.clone());
                (Some(id.clone()), task)
            })
            .collect();

        let outcome = BatchOutcome::collect(tasks, self.config.batch_concurrency).await;
        info!(
            resource = %resource,
            succeeded = outcome.succeeded.len(),
            failed = outcome.failed.len(),
            "Batch update finished"
        );
        Ok(outcome)
    }
}

pub struct DeleteManyUseCase<S>
where
    S: DocumentStore,
{
    store: Arc<S>,
    config: Arc<DataConfig>,
}

impl<S> DeleteManyUseCase<S>
where
    S: DocumentStore,
{
    pub fn new(store: Arc<S>, config: Arc<DataConfig>) -> Self {
        Self { store, config }
    }

    pub async fn execute(&self, params: DeleteManyParams) -> DataResult<BatchOutcome<String>> {
        let resource = Resource::new(&params.resource)?;
        let resource_ref = &resource;
        let tasks = params
            .ids
            .iter()
            .map(|id| {
                let task = async move {
                    self.store.delete(resource_ref, id).await?;
                    Ok::<_, DataError>(id.clone())
                };
                (Some(id.clone()), task)
            })
            .collect();

        let outcome = BatchOutcome::collect(tasks, self.config.batch_concurrency).await;
        info!(
            resource = %resource,
            succeeded = outcome.succeeded.len(),
            failed = outcome.failed.len(),
            "Batch delete finished"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_outcomes_keep_input_order() {
        let tasks: Vec<(Option<String>, _)> = (0..5)
            .map(|i| {
                let task = async move {
                    // later items finish first
                    tokio::time::sleep(std::time::Duration::from_millis(20 - i * 4)).await;
                    if i == 3 {
                        Err(DataError::not_found("todos", "d"))
                    } else {
                        Ok(i)
                    }
                };
                (Some(format!("id-{i}")), task)
            })
            .collect();

        let outcome = BatchOutcome::collect(tasks, 2).await;
        assert_eq!(outcome.succeeded, vec![0, 1, 2, 4]);
        assert_eq!(
            outcome.failed,
            vec![BatchFailure {
                index: 3,
                id: Some("id-3".to_string()),
                message: "Document todos/d not found".to_string(),
            }]
        );
        assert!(!outcome.is_complete());
    }
}
