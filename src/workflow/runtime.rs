// Copyright (c) The StackClass Authors. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::{collections::HashMap, future::Future, sync::Arc, time::Duration};

use serde_json::Value;
use thiserror::Error;
use tokio::sync::{Mutex, oneshot};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::{database::Database, model::WorkflowRun, repository::WorkflowRepository};

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Duplicate workflow id: {0}")]
    DuplicateId(String),

    #[error("Workflow not found: {0}")]
    NotFound(String),

    #[error("Workflow was cancelled")]
    Cancelled,

    #[error("Workflow timed out")]
    TimedOut,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub initial_backoff: Duration,
    pub backoff_multiplier: f64,
    pub max_backoff: Duration,
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            initial_backoff: Duration::from_secs(1),
            backoff_multiplier: 2.0,
            max_backoff: Duration::from_secs(100),
            max_attempts: 3,
        }
    }
}

struct Handle {
    cancellation: CancellationToken,
    done: Mutex<Option<oneshot::Receiver<Result<Value, String>>>>,
}

/// In-process workflow runtime adapter. Each run is a `tokio::task::spawn`ed
/// future; the `workflow_runs` table is the durable record of status/result,
/// and an in-memory registry tracks the `CancellationToken` and completion
/// channel for runs still live in this process.
#[derive(Clone)]
pub struct WorkflowRuntime {
    namespace: String,
    handles: Arc<Mutex<HashMap<String, Arc<Handle>>>>,
}

impl WorkflowRuntime {
    pub fn new(namespace: String) -> Self {
        WorkflowRuntime { namespace, handles: Arc::new(Mutex::new(HashMap::new())) }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Submits `name` for execution, generating id `<name>-<uuid>`. `run`
    /// is the workflow body; it receives its own generated id (for stamping
    /// `workflow_id` onto rows it touches) and a `CancellationToken` it must
    /// observe at every `.await` point, and is responsible for reconciling
    /// any in-flight deployment rows on cancellation or panic. There is no
    /// queue to prioritize against: every submitted run is spawned onto the
    /// Tokio executor immediately.
    pub async fn submit<F, Fut>(&self, database: &Database, name: &str, parameters: Value, run: F) -> Result<String, WorkflowError>
    where
        F: FnOnce(String, CancellationToken) -> Fut + Send + 'static,
        Fut: Future<Output = Result<Value, String>> + Send + 'static,
    {
        let id = format!("{name}-{}", Uuid::new_v4());

        let record = WorkflowRun::new(id.clone(), name, parameters);
        WorkflowRepository::insert(database, &record).await?;

        let cancellation = CancellationToken::new();
        let (tx, rx) = oneshot::channel();
        let handle = Arc::new(Handle { cancellation: cancellation.clone(), done: Mutex::new(Some(rx)) });
        self.handles.lock().await.insert(id.clone(), handle);

        let database = database.clone();
        let run_id = id.clone();
        tokio::spawn(async move {
            WorkflowRepository::mark_started(&database, &run_id).await.ok();
            let outcome = run(run_id.clone(), cancellation).await;
            match &outcome {
                Ok(result) => {
                    WorkflowRepository::mark_finished(&database, &run_id, result.clone()).await.ok();
                }
                Err(message) => {
                    WorkflowRepository::mark_failed(&database, &run_id, message).await.ok();
                }
            }
            let _ = tx.send(outcome);
        });

        Ok(id)
    }

    pub async fn status(&self, database: &Database, id: &str) -> Result<WorkflowRun, WorkflowError> {
        WorkflowRepository::find(database, id).await?.ok_or_else(|| WorkflowError::NotFound(id.to_string()))
    }

    /// Requests cooperative cancellation. Has no effect if the run already
    /// completed or is unknown to this process (e.g. after a restart).
    pub async fn cancel(&self, database: &Database, id: &str) -> Result<(), WorkflowError> {
        if let Some(handle) = self.handles.lock().await.get(id) {
            handle.cancellation.cancel();
        }
        WorkflowRepository::mark_cancelled(database, id).await?;
        Ok(())
    }

    pub async fn await_result(&self, id: &str) -> Result<Value, WorkflowError> {
        let handle = self.handles.lock().await.get(id).cloned().ok_or_else(|| WorkflowError::NotFound(id.to_string()))?;
        let mut slot = handle.done.lock().await;
        let Some(rx) = slot.take() else { return Err(WorkflowError::NotFound(id.to_string())) };
        drop(slot);
        match rx.await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(_)) => Err(WorkflowError::TimedOut),
            Err(_) => Err(WorkflowError::Cancelled),
        }
    }
}
