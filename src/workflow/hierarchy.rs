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

//! Hierarchy workflow (C7): reconciles Organization -> CourseFamily -> Course
//! from a [`crate::schema::DeploymentConfig`]. Every activity is idempotent,
//! looking the entity up by its natural key first; the Git-hosting calls
//! follow the fetch-or-create-on-404 idiom used throughout this module.

use std::sync::Arc;

use git_hosting_client::{ClientError, types::CreateOrganizationRequest};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::{
    context::Context,
    model::{Course, CourseContentType, CourseFamily, CourseMember, ExecutionBackend, Organization},
    repository::{
        CourseContentTypeRepository, CourseFamilyRepository, CourseGroupRepository, CourseMemberRepository,
        CourseRepository, ExecutionBackendRepository, OrganizationRepository, UserRepository,
    },
    schema::{CourseMemberDeployment, DeploymentConfig, UserAccountDeployment},
};

/// Per-course repositories created under the course's Gitea organization.
/// Gitea has no GitLab-style nested subgroups, so each is a flat repo named
/// `<family_path>-<course_path>-<project>` inside the organization's org.
const COURSE_PROJECTS: [&str; 6] = ["tests", "student-template", "reference", "examples", "documents", "assignments"];

/// The flat repository name for one of a course's `COURSE_PROJECTS`.
pub fn course_project_repo_name(family_path: &str, course_path: &str, project: &str) -> String {
    format!("{family_path}-{course_path}-{project}")
}

/// A clone URL for a course project repository with the system Git
/// credentials embedded, using the same `url`-crate-backed authentication
/// helper the Git proxy uses for outgoing requests.
pub fn course_project_clone_url(ctx: &Context, organization_path: &str, family_path: &str, course_path: &str, project: &str) -> String {
    let repo_name = course_project_repo_name(family_path, course_path, project);
    let endpoint = ctx.config.git_server_endpoint.trim_end_matches('/');
    let plain = format!("{endpoint}/{organization_path}/{repo_name}.git");
    crate::utils::url::authenticate(&plain, &ctx.config.git_server_username, &ctx.config.git_server_password)
        .unwrap_or(plain)
}

pub struct HierarchyResult {
    pub organizations: usize,
    pub course_families: usize,
    pub courses: usize,
    pub users: usize,
    pub course_members: usize,
    pub failures: Vec<String>,
}

/// Runs the hierarchy reconciliation. Cheap enough that, unlike the other
/// three workflows, no activity currently checks `cancellation` mid-loop;
/// the token is threaded through so a future long-running activity (e.g.
/// project creation against a slow host) can observe it.
pub async fn run(ctx: Arc<Context>, _cancellation: CancellationToken, config: DeploymentConfig) -> Result<Value, String> {
    let mut result = HierarchyResult { organizations: 0, course_families: 0, courses: 0, users: 0, course_members: 0, failures: Vec::new() };

    for backend in &config.execution_backends {
        if let Err(e) = ExecutionBackendRepository::find_or_create(&ctx.database, &backend.slug, &backend.kind).await {
            result.failures.push(format!("execution_backend {}: {e}", backend.slug));
        }
    }

    for org_config in &config.organizations {
        let organization = match ensure_organization(&ctx, &org_config.path, &org_config.name).await {
            Ok(org) => org,
            Err(e) => {
                result.failures.push(format!("organization {}: {e}", org_config.path));
                continue;
            }
        };
        result.organizations += 1;

        for family_config in &org_config.course_families {
            let family = match ensure_course_family(&ctx, &organization, &family_config.path, &family_config.name).await {
                Ok(f) => f,
                Err(e) => {
                    result.failures.push(format!("course_family {}: {e}", family_config.path));
                    continue;
                }
            };
            result.course_families += 1;

            for course_config in &family_config.courses {
                match ensure_course(&ctx, &organization, &family, &course_config.path, &course_config.name).await {
                    Ok(course) => {
                        result.courses += 1;
                        for content_type in &course_config.content_types {
                            if let Err(e) =
                                ensure_content_type(&ctx, course.id, &content_type.slug, &content_type.kind).await
                            {
                                result.failures.push(format!("content_type {}: {e}", content_type.slug));
                            }
                        }
                    }
                    Err(e) => result.failures.push(format!("course {}: {e}", course_config.path)),
                }
            }
        }
    }

    for user_config in &config.users {
        match ensure_user(&ctx, user_config).await {
            Ok((_, member_count)) => {
                result.users += 1;
                result.course_members += member_count;
            }
            Err(e) => result.failures.push(format!("user {}: {e}", user_config.user.email)),
        }
    }

    serde_json::to_value(&json!({
        "organizations": result.organizations,
        "course_families": result.course_families,
        "courses": result.courses,
        "users": result.users,
        "course_members": result.course_members,
        "failures": result.failures,
    }))
    .map_err(|e| e.to_string())
}

async fn ensure_organization(ctx: &Context, path: &str, name: &str) -> Result<Organization, String> {
    match ctx.git.get_organization(path).await {
        Ok(_) => {}
        Err(ClientError::NotFound) => {
            ctx.git
                .create_organization(CreateOrganizationRequest { name: path.to_string(), full_name: Some(name.to_string()), ..Default::default() })
                .await
                .map_err(|e| e.to_string())?;
        }
        Err(e) => return Err(e.to_string()),
    }

    let mut organization = OrganizationRepository::find_or_create(&ctx.database, path, "course").await.map_err(|e| e.to_string())?;
    organization.properties = json!({ "gitlab": { "full_path": path } });
    Ok(organization)
}

async fn ensure_course_family(ctx: &Context, organization: &Organization, path: &str, _name: &str) -> Result<CourseFamily, String> {
    CourseFamilyRepository::find_or_create(&ctx.database, organization.id, path).await.map_err(|e| e.to_string())
}

async fn ensure_course(ctx: &Context, organization: &Organization, family: &CourseFamily, path: &str, _name: &str) -> Result<Course, String> {
    let course = CourseRepository::find_or_create(&ctx.database, family.id, organization.id, path).await.map_err(|e| e.to_string())?;

    for project in COURSE_PROJECTS {
        let repo_name = course_project_repo_name(&family.path, &course.path, project);
        ensure_repository(ctx, &organization.path, &repo_name).await?;
    }

    Ok(course)
}

async fn ensure_repository(ctx: &Context, owner: &str, name: &str) -> Result<(), String> {
    match ctx.git.get_repository(owner, name).await {
        Ok(_) => Ok(()),
        Err(ClientError::NotFound) => {
            let request = git_hosting_client::types::CreateRepositoryRequest {
                name: name.to_string(),
                auto_init: Some(true),
                default_branch: Some("main".to_string()),
                description: None,
                gitignores: None,
                issue_labels: None,
                license: None,
                object_format_name: None,
                private: Some(true),
                readme: None,
                template: Some(false),
                trust_model: None,
            };
            ctx.git.create_org_repository(owner, request).await.map_err(|e| e.to_string())?;
            Ok(())
        }
        Err(e) => Err(e.to_string()),
    }
}

async fn ensure_content_type(ctx: &Context, course_id: Uuid, slug: &str, kind: &str) -> Result<CourseContentType, String> {
    CourseContentTypeRepository::find_or_create(&ctx.database, course_id, slug, kind).await.map_err(|e| e.to_string())
}

/// Finds or creates the `ExecutionBackend` referenced by `slug`, a helper
/// shared with the student-template workflow's `meta.yaml` linkage step.
pub async fn resolve_execution_backend(ctx: &Context, slug: &str) -> Result<Option<ExecutionBackend>, sqlx::Error> {
    ExecutionBackendRepository::find_by_slug(&ctx.database, slug).await
}

async fn ensure_user(ctx: &Context, user_config: &UserAccountDeployment) -> Result<(String, usize), String> {
    let user = &user_config.user;
    let id = user.username.clone().unwrap_or_else(|| user.email.clone());
    UserRepository::find_or_create(&ctx.database, &id, &user.display_name(), &user.email).await.map_err(|e| e.to_string())?;

    let mut member_count = 0;
    for membership in &user_config.course_members {
        if ensure_course_member(ctx, &id, membership).await?.is_some() {
            member_count += 1;
        }
    }
    Ok((id, member_count))
}

async fn ensure_course_member(ctx: &Context, user_id: &str, membership: &CourseMemberDeployment) -> Result<Option<CourseMember>, String> {
    let course_id = if let Some(raw) = &membership.id {
        Uuid::parse_str(raw).map_err(|e| e.to_string())?
    } else if let Some((org_path, family_path, course_path)) = membership.path() {
        let organization = OrganizationRepository::find_or_create(&ctx.database, org_path, "course").await.map_err(|e| e.to_string())?;
        let family = CourseFamilyRepository::find_or_create(&ctx.database, organization.id, family_path).await.map_err(|e| e.to_string())?;
        let course = CourseRepository::find_or_create(&ctx.database, family.id, organization.id, course_path).await.map_err(|e| e.to_string())?;
        course.id
    } else {
        return Err("course member deployment has neither id nor organization/course_family/course path".to_string());
    };

    let mut member = CourseMember::new(user_id, course_id, &membership.role);
    if membership.role == "_student" {
        let group_title = membership.group.as_deref().ok_or("student membership requires a group")?;
        let group = CourseGroupRepository::find_or_create(&ctx.database, course_id, group_title).await.map_err(|e| e.to_string())?;
        member = member.with_group(group.id);
    }

    CourseMemberRepository::find_or_create(&ctx.database, &member).await.map(Some).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn course_projects_cover_every_per_course_repository() {
        assert_eq!(COURSE_PROJECTS.len(), 6);
        assert!(COURSE_PROJECTS.contains(&"student-template"));
        assert!(COURSE_PROJECTS.contains(&"assignments"));
    }

    #[test]
    fn repo_name_joins_family_course_and_project() {
        assert_eq!(course_project_repo_name("prog", "prog1", "student-template"), "prog-prog1-student-template");
    }
}
