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

//! The per-content deployment record lifecycle (C6):
//!
//! ```text
//! (no record) --assign-->    pending
//! pending      --begin-->    deploying
//! deploying    --ok-->       deployed
//! deploying    --error-->    failed
//! failed       --retry-->    deploying
//! deployed     --force-->    deploying    (force_redeploy)
//! deployed     --unassign--> unassigned
//! *            --reassign--> pending      (new example_version assigned)
//! ```
//!
//! Every transition appends a `DeploymentHistory` row; callers never update
//! `course_content_deployments` directly.

use uuid::Uuid;

use crate::{
    database::Transaction,
    errors::{ApiError, Result},
    model::{CourseContentDeployment, DeploymentAction, DeploymentHistory},
    repository::DeploymentRepository,
    utils::path,
};

/// Assigns (or reassigns) an example version to a content. Creates the
/// deployment row if none exists yet.
pub async fn assign(
    tx: &mut Transaction<'_>,
    course_content_id: Uuid,
    example_version_id: Uuid,
    example_identifier: &str,
    version_tag: &str,
) -> Result<CourseContentDeployment> {
    path::validate_ltree_identifier(example_identifier).map_err(ApiError::BadRequest)?;

    let seed = CourseContentDeployment::new(course_content_id);
    let existing = DeploymentRepository::find_or_create(tx, &seed).await?;
    let action = if existing.example_version_id.is_some() { DeploymentAction::Reassigned } else { DeploymentAction::Assigned };

    let updated = DeploymentRepository::transition(
        tx,
        course_content_id,
        "pending",
        Some(example_version_id),
        Some(example_identifier),
        Some(version_tag),
        None,
        None,
        None,
        None,
    )
    .await?
    .ok_or(ApiError::NotFound)?;

    let history = DeploymentHistory::new(updated.id, action)
        .with_versions(Some(example_version_id), existing.example_version_id);
    DeploymentRepository::append_history(tx, &history).await?;

    Ok(updated)
}

/// Removes the assigned example, transitioning to `unassigned`. The row
/// itself is kept (append-only history, `course_content_id` stays unique).
pub async fn unassign(tx: &mut Transaction<'_>, course_content_id: Uuid) -> Result<CourseContentDeployment> {
    let updated = DeploymentRepository::transition(tx, course_content_id, "unassigned", None, None, None, None, None, None, None)
        .await?
        .ok_or(ApiError::NotFound)?;
    let history = DeploymentHistory::new(updated.id, DeploymentAction::Unassigned);
    DeploymentRepository::append_history(tx, &history).await?;
    Ok(updated)
}

/// `pending|failed --begin--> deploying`, or `deployed --force--> deploying`
/// when `force_redeploy` is set. Rejects any other starting state.
pub async fn begin_deploying(
    tx: &mut Transaction<'_>,
    deployment: &CourseContentDeployment,
    workflow_id: &str,
    force_redeploy: bool,
) -> Result<CourseContentDeployment> {
    let allowed = match deployment.status() {
        crate::model::DeploymentStatus::Pending | crate::model::DeploymentStatus::Failed => true,
        crate::model::DeploymentStatus::Deployed => force_redeploy,
        _ => false,
    };
    if !allowed {
        return Err(ApiError::InvalidDeploymentTransition);
    }

    let updated = DeploymentRepository::transition(
        tx,
        deployment.course_content_id,
        "deploying",
        None,
        None,
        None,
        None,
        None,
        None,
        Some(workflow_id),
    )
    .await?
    .ok_or(ApiError::NotFound)?;

    let mut history = DeploymentHistory::new(updated.id, DeploymentAction::Deploying).with_workflow(workflow_id);
    if force_redeploy {
        history = history.with_details("force_redeploy");
    }
    DeploymentRepository::append_history(tx, &history).await?;
    Ok(updated)
}

/// `deploying --ok--> deployed`, recording the resulting commit sha as
/// `version_identifier` and the rendered `deployment_path`.
pub async fn mark_deployed(
    tx: &mut Transaction<'_>,
    course_content_id: Uuid,
    deployment_path: &str,
    commit_sha: &str,
    workflow_id: &str,
) -> Result<CourseContentDeployment> {
    path::validate_deployment_path(deployment_path).map_err(ApiError::BadRequest)?;

    let updated = DeploymentRepository::transition(
        tx,
        course_content_id,
        "deployed",
        None,
        None,
        None,
        Some(commit_sha),
        Some(deployment_path),
        None,
        Some(workflow_id),
    )
    .await?
    .ok_or(ApiError::NotFound)?;

    let history = DeploymentHistory::new(updated.id, DeploymentAction::Deployed).with_workflow(workflow_id);
    DeploymentRepository::append_history(tx, &history).await?;
    Ok(updated)
}

/// `deploying --error--> failed`, truncating `message` to 500 chars.
pub async fn mark_failed(
    tx: &mut Transaction<'_>,
    course_content_id: Uuid,
    message: &str,
    workflow_id: &str,
) -> Result<CourseContentDeployment> {
    let updated = DeploymentRepository::transition(
        tx,
        course_content_id,
        "failed",
        None,
        None,
        None,
        None,
        None,
        Some(message),
        Some(workflow_id),
    )
    .await?
    .ok_or(ApiError::NotFound)?;

    let history = DeploymentHistory::new(updated.id, DeploymentAction::Failed).with_details(message).with_workflow(workflow_id);
    DeploymentRepository::append_history(tx, &history).await?;
    Ok(updated)
}
