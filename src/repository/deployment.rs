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

use uuid::Uuid;

use crate::{
    database::{Database, Transaction},
    model::{CourseContentDeployment, DeploymentHistory},
};

pub struct DeploymentRepository;

impl DeploymentRepository {
    pub async fn find_by_content(db: &Database, course_content_id: Uuid) -> Result<Option<CourseContentDeployment>, sqlx::Error> {
        sqlx::query_as::<_, CourseContentDeployment>("SELECT * FROM course_content_deployments WHERE course_content_id = $1")
            .bind(course_content_id)
            .fetch_optional(db.pool())
            .await
    }

    pub async fn find_by_course(db: &Database, course_id: Uuid) -> Result<Vec<CourseContentDeployment>, sqlx::Error> {
        sqlx::query_as::<_, CourseContentDeployment>(
            "SELECT d.* FROM course_content_deployments d
             JOIN course_contents c ON c.id = d.course_content_id
             WHERE c.course_id = $1",
        )
        .bind(course_id)
        .fetch_all(db.pool())
        .await
    }

    pub async fn find_by_statuses(db: &Database, course_id: Uuid, statuses: &[String]) -> Result<Vec<CourseContentDeployment>, sqlx::Error> {
        sqlx::query_as::<_, CourseContentDeployment>(
            "SELECT d.* FROM course_content_deployments d
             JOIN course_contents c ON c.id = d.course_content_id
             WHERE c.course_id = $1 AND d.deployment_status = ANY($2)",
        )
        .bind(course_id)
        .bind(statuses)
        .fetch_all(db.pool())
        .await
    }

    /// Inserts a new deployment row, or returns the existing one for this
    /// content (`UNIQUE(course_content_id)` backs the uniqueness invariant).
    pub async fn find_or_create(tx: &mut Transaction<'_>, deployment: &CourseContentDeployment) -> Result<CourseContentDeployment, sqlx::Error> {
        sqlx::query_as::<_, CourseContentDeployment>(
            "WITH inserted AS (
                INSERT INTO course_content_deployments (id, course_content_id, deployment_status, assigned_at)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (course_content_id) DO NOTHING
                RETURNING *
            )
            SELECT * FROM inserted
            UNION ALL
            SELECT * FROM course_content_deployments WHERE course_content_id = $2 AND NOT EXISTS (SELECT 1 FROM inserted)",
        )
        .bind(deployment.id)
        .bind(deployment.course_content_id)
        .bind(&deployment.deployment_status)
        .bind(deployment.assigned_at)
        .fetch_one(&mut **tx)
        .await
    }

    /// Transactional, optimistic-concurrency status transition keyed by
    /// `course_content_id`, which is what serializes concurrent workflow
    /// writers to the same row.
    #[allow(clippy::too_many_arguments)]
    pub async fn transition(
        tx: &mut Transaction<'_>,
        course_content_id: Uuid,
        status: &str,
        example_version_id: Option<Uuid>,
        example_identifier: Option<&str>,
        version_tag: Option<&str>,
        version_identifier: Option<&str>,
        deployment_path: Option<&str>,
        deployment_message: Option<&str>,
        workflow_id: Option<&str>,
    ) -> Result<Option<CourseContentDeployment>, sqlx::Error> {
        let deployed_at_clause = if status == "deployed" { "now()" } else { "deployed_at" };
        let query = format!(
            "UPDATE course_content_deployments SET
                deployment_status = $2,
                example_version_id = COALESCE($3, example_version_id),
                example_identifier = COALESCE($4::ltree, example_identifier),
                version_tag = COALESCE($5, version_tag),
                version_identifier = COALESCE($6, version_identifier),
                deployment_path = COALESCE($7, deployment_path),
                deployment_message = $8,
                workflow_id = COALESCE($9, workflow_id),
                last_attempt_at = now(),
                deployed_at = {deployed_at_clause},
                version = version + 1
             WHERE course_content_id = $1
             RETURNING *"
        );
        sqlx::query_as::<_, CourseContentDeployment>(&query)
            .bind(course_content_id)
            .bind(status)
            .bind(example_version_id)
            .bind(example_identifier)
            .bind(version_tag)
            .bind(version_identifier)
            .bind(deployment_path)
            .bind(deployment_message.map(|m| m.chars().take(500).collect::<String>()))
            .bind(workflow_id)
            .fetch_optional(&mut **tx)
            .await
    }

    pub async fn append_history(tx: &mut Transaction<'_>, history: &DeploymentHistory) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO deployment_history
                (id, deployment_id, action, action_details, example_version_id, previous_example_version_id,
                 example_identifier, version_tag, workflow_id, meta, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7::ltree, $8, $9, $10, $11)",
        )
        .bind(history.id)
        .bind(history.deployment_id)
        .bind(&history.action)
        .bind(&history.action_details)
        .bind(history.example_version_id)
        .bind(history.previous_example_version_id)
        .bind(&history.example_identifier)
        .bind(&history.version_tag)
        .bind(&history.workflow_id)
        .bind(&history.meta)
        .bind(history.created_at)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    pub async fn history_for(db: &Database, deployment_id: Uuid) -> Result<Vec<DeploymentHistory>, sqlx::Error> {
        sqlx::query_as::<_, DeploymentHistory>("SELECT * FROM deployment_history WHERE deployment_id = $1 ORDER BY created_at")
            .bind(deployment_id)
            .fetch_all(db.pool())
            .await
    }
}
