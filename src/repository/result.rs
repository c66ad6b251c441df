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
use uuid::Uuid;

use crate::{database::Database, model::ResultModel};

pub struct ResultRepository;

impl ResultRepository {
    pub async fn insert(db: &Database, result: &ResultModel) -> Result<ResultModel, sqlx::Error> {
        sqlx::query_as::<_, ResultModel>(
            "INSERT INTO results
                (id, course_member_id, course_content_id, course_submission_group_id, execution_backend_id,
                 test_system_id, submit, version_identifier, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING *",
        )
        .bind(result.id)
        .bind(result.course_member_id)
        .bind(result.course_content_id)
        .bind(result.course_submission_group_id)
        .bind(result.execution_backend_id)
        .bind(&result.test_system_id)
        .bind(result.submit)
        .bind(&result.version_identifier)
        .bind(&result.status)
        .fetch_one(db.pool())
        .await
    }

    pub async fn find_by_id(db: &Database, id: Uuid) -> Result<Option<ResultModel>, sqlx::Error> {
        sqlx::query_as::<_, ResultModel>("SELECT * FROM results WHERE id = $1").bind(id).fetch_optional(db.pool()).await
    }

    pub async fn find_by_content(db: &Database, course_content_id: Uuid, course_member_id: Uuid) -> Result<Vec<ResultModel>, sqlx::Error> {
        sqlx::query_as::<_, ResultModel>(
            "SELECT * FROM results WHERE course_content_id = $1 AND course_member_id = $2 ORDER BY created_at DESC",
        )
        .bind(course_content_id)
        .bind(course_member_id)
        .fetch_all(db.pool())
        .await
    }

    /// Records the outcome reported by the test execution workflow.
    pub async fn record_outcome(db: &Database, id: Uuid, status: &str, result: Option<f64>, result_json: Value) -> Result<Option<ResultModel>, sqlx::Error> {
        sqlx::query_as::<_, ResultModel>(
            "UPDATE results SET status = $2, result = $3, result_json = $4, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .bind(result)
        .bind(result_json)
        .fetch_optional(db.pool())
        .await
    }
}
