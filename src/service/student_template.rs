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

//! Thin submission layer over the student-template workflow (C8): resolves
//! a course's `student-template`/`assignments` repository URLs, builds the
//! [`workflow::student_template::StudentTemplateRequest`], and submits it to
//! the workflow runtime.

use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;

use crate::{
    context::Context,
    errors::{ApiError, Result},
    repository::{CourseFamilyRepository, CourseRepository, OrganizationRepository},
    workflow::{
        self,
        hierarchy::course_project_clone_url,
        student_template::{CommitOverride, Selection, StudentTemplateRequest},
    },
};

pub struct GenerateRequest {
    pub course_id: Uuid,
    pub force_redeploy: bool,
    pub selection: Selection,
    pub global_commit: Option<String>,
    pub overrides: Vec<CommitOverride>,
    pub commit_message: Option<String>,
}

async fn repository_urls(ctx: &Context, course_id: Uuid) -> Result<(String, String)> {
    let course = CourseRepository::find_by_id(&ctx.database, course_id).await?.ok_or(ApiError::NotFound)?;
    let family = CourseFamilyRepository::find_by_id(&ctx.database, course.course_family_id).await?.ok_or(ApiError::NotFound)?;
    let organization = OrganizationRepository::find_by_id(&ctx.database, course.organization_id).await?.ok_or(ApiError::NotFound)?;

    let student_template_url = course_project_clone_url(ctx, &organization.path, &family.path, &course.path, "student-template");
    let assignments_url = course_project_clone_url(ctx, &organization.path, &family.path, &course.path, "assignments");
    Ok((student_template_url, assignments_url))
}

/// Submits a student-template generation run and returns its workflow id.
pub async fn generate(ctx: Arc<Context>, request: GenerateRequest) -> Result<String> {
    let (student_template_url, assignments_url) = repository_urls(&ctx, request.course_id).await?;

    let workflow_request = StudentTemplateRequest {
        course_id: request.course_id,
        student_template_url,
        assignments_url,
        force_redeploy: request.force_redeploy,
        selection: request.selection,
        global_commit: request.global_commit,
        overrides: request.overrides,
        commit_message: request.commit_message,
    };

    let parameters = json!({"course_id": request.course_id, "force_redeploy": workflow_request.force_redeploy});
    let run_ctx = ctx.clone();
    let workflow_id = ctx
        .workflow
        .submit(&ctx.database, "generate-student-template", parameters, move |run_id, cancellation| {
            workflow::student_template::run(run_ctx, run_id, cancellation, workflow_request)
        })
        .await?;
    Ok(workflow_id)
}

/// Submits an assignments-repository regeneration run, populating the
/// course's assignments repository with the full content of every example
/// currently assigned in the course. Never invoked from the release path.
pub async fn generate_assignments_repository(ctx: Arc<Context>, course_id: Uuid, commit_message: Option<String>) -> Result<String> {
    let (_, assignments_url) = repository_urls(&ctx, course_id).await?;

    let request = workflow::assignments_repository::AssignmentsRepositoryRequest { course_id, assignments_url, commit_message };
    let parameters = json!({"course_id": course_id});
    let run_ctx = ctx.clone();
    let workflow_id = ctx
        .workflow
        .submit(&ctx.database, "generate-assignments-repository", parameters, move |_run_id, cancellation| {
            workflow::assignments_repository::run(run_ctx, cancellation, request)
        })
        .await?;
    Ok(workflow_id)
}
