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

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{
    auth::{Principal, can_perform},
    context::Context,
    errors::{ApiError, Result},
    repository::CourseContentRepository,
    request::{
        AssignExampleRequest, BulkAssignExamplesRequest, GenerateAssignmentsRepositoryRequest, GenerateStudentTemplateRequest,
        ReleaseSelector,
    },
    response::{BulkAssignExamplesResponse, BulkAssignFailure, DeploymentResponse, DeploymentStatusSummaryResponse, GenerateWorkflowResponse, PendingChangesResponse},
    service::{course_content, student_template},
    workflow::student_template::{CommitOverride, Selection},
};

fn selection_from(selector: Option<ReleaseSelector>) -> Selection {
    match selector {
        None => Selection::Default,
        Some(selector) if selector.all => Selection::All,
        Some(ReleaseSelector { content_ids: Some(ids), .. }) => Selection::ContentIds(ids),
        Some(ReleaseSelector { parent_id: Some(parent_id), include_descendants, .. }) => {
            Selection::Parent { parent_id, include_descendants }
        }
        Some(_) => Selection::Default,
    }
}

async fn course_id_of(ctx: &Context, course_content_id: Uuid) -> Result<Uuid> {
    let content = CourseContentRepository::find_by_id(&ctx.database, course_content_id).await?.ok_or(ApiError::NotFound)?;
    Ok(content.course_id)
}

fn require(ctx: &Context, principal: &Principal, action: &str, course_id: Uuid) -> Result<()> {
    if can_perform(&ctx.permissions, principal, "course_content", action, None, Some(&course_id.to_string())) {
        Ok(())
    } else {
        Err(ApiError::Unauthorized(format!("not permitted to {action} course_content in course {course_id}")))
    }
}

/// Assign an example (at a version) to a piece of course content.
#[utoipa::path(
    operation_id = "assign-example",
    post, path = "/v1/course-contents/{id}/assign-example",
    params(
        ("id" = Uuid, description = "The id of the course content"),
    ),
    request_body(content = AssignExampleRequest, description = "Example and version to assign", content_type = "application/json"),
    responses(
        (status = 200, description = "Example assigned", body = DeploymentResponse),
        (status = 400, description = "Course content is not submittable"),
        (status = 404, description = "Course content or example not found"),
    ),
    tag = "CourseContent"
)]
pub async fn assign_example(
    State(ctx): State<Arc<Context>>,
    Path(id): Path<Uuid>,
    principal: Principal,
    Json(req): Json<AssignExampleRequest>,
) -> Result<impl IntoResponse> {
    let course_id = course_id_of(&ctx, id).await?;
    require(&ctx, &principal, "assign_example", course_id)?;
    let deployment = course_content::assign_example(&ctx, id, req.example_id, &req.example_version).await?;
    Ok((StatusCode::OK, Json(DeploymentResponse::from(deployment))))
}

/// Assign examples to several pieces of course content at once.
#[utoipa::path(
    operation_id = "bulk-assign-examples",
    post, path = "/v1/courses/{course_id}/assign-examples",
    params(
        ("course_id" = Uuid, description = "The id of the course"),
    ),
    request_body(content = BulkAssignExamplesRequest, description = "Entries to assign", content_type = "application/json"),
    responses(
        (status = 200, description = "Assignments processed, per-entry outcome reported", body = BulkAssignExamplesResponse),
    ),
    tag = "CourseContent"
)]
pub async fn bulk_assign_examples(
    State(ctx): State<Arc<Context>>,
    Path(course_id): Path<Uuid>,
    principal: Principal,
    Json(req): Json<BulkAssignExamplesRequest>,
) -> Result<impl IntoResponse> {
    require(&ctx, &principal, "assign_example", course_id)?;
    let assignments = req.assignments.into_iter().map(|entry| (entry.course_content_id, entry.example_id, entry.example_version)).collect();
    let (outcomes, failures) = course_content::bulk_assign_examples(&ctx, assignments).await;
    let response = BulkAssignExamplesResponse {
        assigned: outcomes.into_iter().map(|o| DeploymentResponse::from(o.deployment)).collect(),
        failed: failures.into_iter().map(|f| BulkAssignFailure { course_content_id: f.course_content_id, error: f.error.to_string() }).collect(),
    };
    Ok((StatusCode::OK, Json(response)))
}

/// Remove the example assigned to a piece of course content.
#[utoipa::path(
    operation_id = "remove-example",
    delete, path = "/v1/course-contents/{id}/example",
    params(
        ("id" = Uuid, description = "The id of the course content"),
    ),
    responses(
        (status = 200, description = "Example unassigned", body = DeploymentResponse),
        (status = 400, description = "Course content is not submittable"),
        (status = 404, description = "Course content not found"),
    ),
    tag = "CourseContent"
)]
pub async fn remove_example(State(ctx): State<Arc<Context>>, Path(id): Path<Uuid>, principal: Principal) -> Result<impl IntoResponse> {
    let course_id = course_id_of(&ctx, id).await?;
    require(&ctx, &principal, "assign_example", course_id)?;
    let deployment = course_content::remove_example(&ctx, id).await?;
    Ok((StatusCode::OK, Json(DeploymentResponse::from(deployment))))
}

/// List the changes a student-template generation run would apply.
#[utoipa::path(
    operation_id = "pending-changes",
    get, path = "/v1/courses/{course_id}/pending-changes",
    params(
        ("course_id" = Uuid, description = "The id of the course"),
    ),
    responses(
        (status = 200, description = "Pending changes listed", body = PendingChangesResponse),
    ),
    tag = "CourseContent"
)]
pub async fn pending_changes(State(ctx): State<Arc<Context>>, Path(course_id): Path<Uuid>, principal: Principal) -> Result<impl IntoResponse> {
    require(&ctx, &principal, "get", course_id)?;
    let changes = course_content::pending_changes(&ctx, course_id).await?;
    Ok((StatusCode::OK, Json(PendingChangesResponse::from(changes))))
}

/// Current deployment status of every piece of submittable content in a course.
#[utoipa::path(
    operation_id = "deployment-status",
    get, path = "/v1/courses/{course_id}/examples/deployment-status",
    params(
        ("course_id" = Uuid, description = "The id of the course"),
    ),
    responses(
        (status = 200, description = "Deployment status summary", body = DeploymentStatusSummaryResponse),
    ),
    tag = "CourseContent"
)]
pub async fn deployment_status(State(ctx): State<Arc<Context>>, Path(course_id): Path<Uuid>, principal: Principal) -> Result<impl IntoResponse> {
    require(&ctx, &principal, "get", course_id)?;
    let statuses = course_content::deployment_status(&ctx, course_id).await?;
    Ok((StatusCode::OK, Json(DeploymentStatusSummaryResponse::from(statuses))))
}

/// Kick off a background run that renders assigned examples into the
/// course's `student-template` repository.
#[utoipa::path(
    operation_id = "generate-student-template",
    post, path = "/v1/courses/{course_id}/generate-student-template",
    params(
        ("course_id" = Uuid, description = "The id of the course"),
    ),
    request_body(content = GenerateStudentTemplateRequest, description = "Release selection", content_type = "application/json"),
    responses(
        (status = 202, description = "Generation started", body = GenerateWorkflowResponse),
    ),
    tag = "CourseContent"
)]
pub async fn generate_student_template(
    State(ctx): State<Arc<Context>>,
    Path(course_id): Path<Uuid>,
    principal: Principal,
    Json(req): Json<GenerateStudentTemplateRequest>,
) -> Result<impl IntoResponse> {
    require(&ctx, &principal, "assign_example", course_id)?;
    let changes = course_content::pending_changes(&ctx, course_id).await?;
    let selection = selection_from(req.release);
    let contents_to_process = changes.len();
    let request = student_template::GenerateRequest {
        course_id,
        force_redeploy: req.force_redeploy,
        selection,
        global_commit: None,
        overrides: Vec::<CommitOverride>::new(),
        commit_message: req.commit_message,
    };
    let workflow_id = student_template::generate(ctx, request).await?;
    let response = GenerateWorkflowResponse { workflow_id, status: "started".to_string(), contents_to_process };
    Ok((StatusCode::ACCEPTED, Json(response)))
}

/// Kick off a background run that regenerates the course's assignments
/// repository from every example currently deployed in the course.
#[utoipa::path(
    operation_id = "generate-assignments-repository",
    post, path = "/v1/courses/{course_id}/generate-assignments-repository",
    params(
        ("course_id" = Uuid, description = "The id of the course"),
    ),
    request_body(content = GenerateAssignmentsRepositoryRequest, description = "Commit message override", content_type = "application/json"),
    responses(
        (status = 202, description = "Generation started", body = GenerateWorkflowResponse),
    ),
    tag = "CourseContent"
)]
pub async fn generate_assignments_repository(
    State(ctx): State<Arc<Context>>,
    Path(course_id): Path<Uuid>,
    principal: Principal,
    Json(req): Json<GenerateAssignmentsRepositoryRequest>,
) -> Result<impl IntoResponse> {
    require(&ctx, &principal, "assign_example", course_id)?;
    let workflow_id = student_template::generate_assignments_repository(ctx, course_id, req.commit_message).await?;
    let response = GenerateWorkflowResponse { workflow_id, status: "started".to_string(), contents_to_process: 0 };
    Ok((StatusCode::ACCEPTED, Json(response)))
}
