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

//! Assigning examples to course content and reading back the resulting
//! deployment state. Builds on the transactional primitives in
//! `service::deployment`; this module resolves the example/version and
//! enforces the submittable-content invariant around them.

use std::collections::BTreeMap;

use uuid::Uuid;

use crate::{
    errors::{ApiError, Result},
    model::{CourseContentDeployment, DeploymentStatus},
    repository::{CourseContentRepository, CourseContentTypeRepository, DeploymentRepository, ExampleRepositoryQueries, ExampleVersionRepository},
    service,
};

pub struct AssignmentOutcome {
    pub course_content_id: Uuid,
    pub deployment: CourseContentDeployment,
}

pub struct AssignmentFailure {
    pub course_content_id: Uuid,
    pub error: ApiError,
}

/// One pending-change entry for `pending_changes`.
pub struct PendingChange {
    pub change_type: &'static str,
    pub course_content_id: Uuid,
    pub path: String,
    pub title: Option<String>,
    pub example_identifier: Option<String>,
    pub to_version: Option<String>,
    pub from_version: Option<String>,
}

async fn ensure_submittable(db: &crate::database::Database, course_content_id: Uuid) -> Result<crate::model::CourseContent> {
    let content = CourseContentRepository::find_by_id(db, course_content_id).await?.ok_or(ApiError::NotFound)?;
    let Some(type_id) = content.course_content_type_id else {
        return Err(ApiError::NotSubmittable);
    };
    let content_type = CourseContentTypeRepository::find_by_id(db, type_id).await?.ok_or(ApiError::NotFound)?;
    if !content_type.is_submittable() {
        return Err(ApiError::NotSubmittable);
    }
    Ok(content)
}

async fn resolve_version(
    db: &crate::database::Database,
    example_id: Uuid,
    example_version: &str,
) -> Result<(crate::model::Example, crate::model::ExampleVersion)> {
    let example = ExampleRepositoryQueries::find_by_id(db, example_id).await?.ok_or(ApiError::NotFound)?;
    let version = if example_version.eq_ignore_ascii_case("latest") {
        ExampleVersionRepository::find_latest(db, example_id).await?
    } else {
        ExampleVersionRepository::find_by_tag(db, example_id, example_version).await?
    }
    .ok_or(ApiError::NotFound)?;
    Ok((example, version))
}

/// Assigns a single example (by id and version tag, or `"latest"`) to a
/// content. The content must already carry a submittable content type.
pub async fn assign_example(
    ctx: &crate::context::Context,
    course_content_id: Uuid,
    example_id: Uuid,
    example_version: &str,
) -> Result<CourseContentDeployment> {
    ensure_submittable(&ctx.database, course_content_id).await?;
    let (example, version) = resolve_version(&ctx.database, example_id, example_version).await?;

    let mut tx = ctx.database.pool().begin().await?;
    let deployment = service::deployment::assign(&mut tx, course_content_id, version.id, &example.identifier, &version.version_tag).await?;
    tx.commit().await?;
    Ok(deployment)
}

/// Assigns many examples in one call. Each assignment is its own
/// transaction; one failing does not roll back the others.
pub async fn bulk_assign_examples(
    ctx: &crate::context::Context,
    assignments: Vec<(Uuid, Uuid, String)>,
) -> (Vec<AssignmentOutcome>, Vec<AssignmentFailure>) {
    let mut outcomes = Vec::new();
    let mut failures = Vec::new();
    for (course_content_id, example_id, example_version) in assignments {
        match assign_example(ctx, course_content_id, example_id, &example_version).await {
            Ok(deployment) => outcomes.push(AssignmentOutcome { course_content_id, deployment }),
            Err(error) => failures.push(AssignmentFailure { course_content_id, error }),
        }
    }
    (outcomes, failures)
}

/// Unassigns the example from a content, moving its deployment to
/// `unassigned`.
pub async fn remove_example(ctx: &crate::context::Context, course_content_id: Uuid) -> Result<CourseContentDeployment> {
    ensure_submittable(&ctx.database, course_content_id).await?;
    let mut tx = ctx.database.pool().begin().await?;
    let deployment = service::deployment::unassign(&mut tx, course_content_id).await?;
    tx.commit().await?;
    Ok(deployment)
}

/// Per-content deployment status plus whether a newer example version is
/// available than the one currently assigned.
pub struct ContentDeploymentStatus {
    pub course_content_id: Uuid,
    pub path: String,
    pub title: String,
    pub status: Option<DeploymentStatus>,
    pub example_identifier: Option<String>,
    pub version_tag: Option<String>,
    pub update_available: bool,
}

pub async fn deployment_status(ctx: &crate::context::Context, course_id: Uuid) -> Result<Vec<ContentDeploymentStatus>> {
    let contents = CourseContentRepository::find_by_course(&ctx.database, course_id).await?;
    let deployments = DeploymentRepository::find_by_course(&ctx.database, course_id).await?;
    let by_content: BTreeMap<Uuid, &CourseContentDeployment> = deployments.iter().map(|d| (d.course_content_id, d)).collect();

    let mut result = Vec::with_capacity(contents.len());
    for content in &contents {
        let deployment = by_content.get(&content.id).copied();
        let update_available = match deployment.and_then(|d| d.example_version_id) {
            Some(assigned_version_id) => {
                let version = ExampleVersionRepository::find_by_id(&ctx.database, assigned_version_id).await?;
                match version {
                    Some(version) => {
                        let latest = ExampleVersionRepository::find_latest(&ctx.database, version.example_id).await?;
                        latest.map(|l| l.id != version.id).unwrap_or(false)
                    }
                    None => false,
                }
            }
            None => false,
        };

        result.push(ContentDeploymentStatus {
            course_content_id: content.id,
            path: content.path.clone(),
            title: content.title.clone().unwrap_or_else(|| content.path_leaf().to_string()),
            status: deployment.map(|d| d.status()),
            example_identifier: deployment.and_then(|d| d.example_identifier.clone()),
            version_tag: deployment.and_then(|d| d.version_tag.clone()),
            update_available,
        });
    }
    Ok(result)
}

/// Everything a `generate-student-template` run would (re)deploy: new
/// assignments, updated examples, and removed assignments, compared against
/// the current deployment rows.
pub async fn pending_changes(ctx: &crate::context::Context, course_id: Uuid) -> Result<Vec<PendingChange>> {
    let statuses = deployment_status(ctx, course_id).await?;
    let mut changes = Vec::new();

    for entry in statuses {
        match entry.status {
            None => continue,
            Some(DeploymentStatus::Unassigned) => changes.push(PendingChange {
                change_type: "remove",
                course_content_id: entry.course_content_id,
                path: entry.path,
                title: Some(entry.title.clone()),
                example_identifier: entry.example_identifier,
                to_version: None,
                from_version: entry.version_tag,
            }),
            Some(DeploymentStatus::Pending) => changes.push(PendingChange {
                change_type: "new",
                course_content_id: entry.course_content_id,
                path: entry.path,
                title: Some(entry.title.clone()),
                example_identifier: entry.example_identifier,
                to_version: entry.version_tag,
                from_version: None,
            }),
            Some(DeploymentStatus::Failed) => changes.push(PendingChange {
                change_type: "update",
                course_content_id: entry.course_content_id,
                path: entry.path,
                title: Some(entry.title.clone()),
                example_identifier: entry.example_identifier,
                to_version: entry.version_tag,
                from_version: None,
            }),
            Some(DeploymentStatus::Deployed) if entry.update_available => changes.push(PendingChange {
                change_type: "update",
                course_content_id: entry.course_content_id,
                path: entry.path,
                title: Some(entry.title.clone()),
                example_identifier: entry.example_identifier,
                to_version: None,
                from_version: entry.version_tag,
            }),
            Some(DeploymentStatus::Deployed) | Some(DeploymentStatus::Deploying) => {}
        }
    }
    Ok(changes)
}
