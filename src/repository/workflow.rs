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

use serde_json::Value;

use crate::{database::Database, model::WorkflowRun};

pub struct WorkflowRepository;

impl WorkflowRepository {
    pub async fn insert(db: &Database, run: &WorkflowRun) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO workflow_runs (id, name, status, parameters, result, error, created_at, started_at, finished_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(&run.id)
        .bind(&run.name)
        .bind(&run.status)
        .bind(&run.parameters)
        .bind(&run.result)
        .bind(&run.error)
        .bind(run.created_at)
        .bind(run.started_at)
        .bind(run.finished_at)
        .execute(db.pool())
        .await?;
        Ok(())
    }

    pub async fn find(db: &Database, id: &str) -> Result<Option<WorkflowRun>, sqlx::Error> {
        sqlx::query_as::<_, WorkflowRun>("SELECT * FROM workflow_runs WHERE id = $1")
            .bind(id)
            .fetch_optional(db.pool())
            .await
    }

    pub async fn mark_started(db: &Database, id: &str) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE workflow_runs SET status = 'started', started_at = now() WHERE id = $1")
            .bind(id)
            .execute(db.pool())
            .await?;
        Ok(())
    }

    pub async fn mark_finished(db: &Database, id: &str, result: Value) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE workflow_runs SET status = 'finished', result = $2, finished_at = now() WHERE id = $1")
            .bind(id)
            .bind(result)
            .execute(db.pool())
            .await?;
        Ok(())
    }

    pub async fn mark_failed(db: &Database, id: &str, error: &str) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE workflow_runs SET status = 'failed', error = $2, finished_at = now() WHERE id = $1")
            .bind(id)
            .bind(error)
            .execute(db.pool())
            .await?;
        Ok(())
    }

    pub async fn mark_cancelled(db: &Database, id: &str) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE workflow_runs SET status = 'cancelled', finished_at = now() WHERE id = $1")
            .bind(id)
            .execute(db.pool())
            .await?;
        Ok(())
    }
}
