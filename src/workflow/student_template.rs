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

//! Student-template workflow (C8): renders the assignments a course has
//! selected for release into the course's `student-template` repository,
//! stripping reference solutions and test files along the way.
//!
//! Status transitions for the content involved go through
//! [`crate::service::deployment`] so every attempt is captured in
//! `deployment_history`, even when this workflow fails partway through.

use std::{
    collections::{BTreeMap, HashSet},
    path::Path,
    sync::Arc,
};

use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::{
    context::Context,
    model::{CourseContent, CourseContentDeployment, DeploymentStatus},
    repository::{CourseContentRepository, DeploymentRepository},
    schema::ExampleMeta,
    service::deployment,
    utils::git,
    workflow::{hierarchy, tree},
};

/// Which already-assigned content this run should (re-)render.
pub enum Selection {
    ContentIds(Vec<Uuid>),
    Parent { parent_id: Uuid, include_descendants: bool },
    All,
    Default,
}

pub struct CommitOverride {
    pub course_content_id: Uuid,
    pub commit: String,
}

pub struct StudentTemplateRequest {
    pub course_id: Uuid,
    pub student_template_url: String,
    pub assignments_url: String,
    pub force_redeploy: bool,
    pub selection: Selection,
    pub global_commit: Option<String>,
    pub overrides: Vec<CommitOverride>,
    pub commit_message: Option<String>,
}

struct Rendered {
    deployment: CourseContentDeployment,
    deployment_path: String,
    title: String,
    version_tag: Option<String>,
    /// The assignments-repo commit this content was rendered from — the
    /// value persisted as `version_identifier`, not the student-template
    /// repo's own HEAD.
    resolved_commit: String,
}

pub async fn run(ctx: Arc<Context>, workflow_id: String, cancellation: CancellationToken, request: StudentTemplateRequest) -> Result<Value, String> {
    let contents = CourseContentRepository::find_by_course(&ctx.database, request.course_id).await.map_err(|e| e.to_string())?;
    let contents_by_id: BTreeMap<Uuid, &CourseContent> = contents.iter().map(|c| (c.id, c)).collect();
    let titles: BTreeMap<String, String> =
        contents.iter().map(|c| (c.path.clone(), c.title.clone().unwrap_or_else(|| c.path_leaf().to_string()))).collect();

    let all_deployments = DeploymentRepository::find_by_course(&ctx.database, request.course_id).await.map_err(|e| e.to_string())?;
    let selected = select_deployments(&all_deployments, &contents_by_id, &request.selection, request.force_redeploy);

    let mut failures = Vec::new();
    let mut deploying = Vec::new();
    for candidate in selected {
        let mut tx = ctx.database.pool().begin().await.map_err(|e| e.to_string())?;
        match deployment::begin_deploying(&mut tx, &candidate, &workflow_id, request.force_redeploy).await {
            Ok(updated) => {
                tx.commit().await.map_err(|e| e.to_string())?;
                deploying.push(updated);
            }
            Err(e) => {
                tx.rollback().await.ok();
                failures.push(format!("{}: {e}", candidate.course_content_id));
            }
        }
    }

    if deploying.is_empty() {
        return serde_json::to_value(json!({"deployed": 0, "failed": failures.len(), "failures": failures})).map_err(|e| e.to_string());
    }

    let workspace = tempfile::tempdir().map_err(|e| e.to_string())?;
    let student_dir = workspace.path().join("student-template");
    let assignments_dir = workspace.path().join("assignments");

    if let Err(e) =
        clone_or_init_template(&student_dir, &request.student_template_url, &ctx.config.system_git_email, &ctx.config.system_git_name).await
    {
        return fail_all(&ctx, &deploying, &workflow_id, &format!("student-template clone failed: {e}")).await;
    }

    if let Err(e) = git::clone(&assignments_dir, &request.assignments_url).await {
        return fail_all(&ctx, &deploying, &workflow_id, &format!("assignments clone failed: {e}")).await;
    }

    let mut processed = Vec::new();
    for candidate in &deploying {
        if cancellation.is_cancelled() {
            failures.push(format!("{}: cancelled", candidate.course_content_id));
            continue;
        }
        let Some(content) = contents_by_id.get(&candidate.course_content_id) else {
            failures.push(format!("{}: course content not found", candidate.course_content_id));
            continue;
        };

        let commit = request
            .overrides
            .iter()
            .find(|o| o.course_content_id == candidate.course_content_id)
            .map(|o| o.commit.clone())
            .or_else(|| request.global_commit.clone())
            .or_else(|| candidate.version_identifier.clone());
        let Some(commit) = commit else {
            failures.push(format!("{}: no commit to deploy", content.path));
            continue;
        };

        if let Err(e) = git::checkout(&assignments_dir, &commit).await {
            failures.push(format!("{}: checkout {commit} failed: {e}", content.path));
            continue;
        }

        let deployment_path = candidate.deployment_path.clone().unwrap_or_else(|| content.path.replace('.', "/"));
        if let Err(e) = crate::utils::path::validate_deployment_path(&deployment_path) {
            failures.push(format!("{}: {e}", content.path));
            continue;
        }

        let example_tree = match tree::load_tree(&assignments_dir.join(&deployment_path)) {
            Ok(t) if !t.is_empty() => t,
            Ok(_) => {
                failures.push(format!("{}: no files at {deployment_path}", content.path));
                continue;
            }
            Err(e) => {
                failures.push(format!("{}: failed to read example tree: {e}", content.path));
                continue;
            }
        };

        let meta = example_tree.get("meta.yaml").and_then(|bytes| std::str::from_utf8(bytes).ok()).and_then(|s| s.parse::<ExampleMeta>().ok());

        if content.execution_backend_id.is_none() {
            if let Some(backend_ref) = meta.as_ref().and_then(|m| m.properties.execution_backend.as_ref()) {
                match hierarchy::resolve_execution_backend(&ctx, &backend_ref.slug).await {
                    Ok(Some(backend)) => {
                        CourseContentRepository::set_execution_backend(&ctx.database, content.id, backend.id).await.ok();
                    }
                    Ok(None) => failures.push(format!("{}: unknown execution backend {}", content.path, backend_ref.slug)),
                    Err(e) => failures.push(format!("{}: execution backend lookup failed: {e}", content.path)),
                }
            }
        }

        let filtered = tree::filter_for_students(&example_tree, meta.as_ref());
        if let Err(e) = tree::write_tree(&student_dir.join(&deployment_path), &filtered) {
            failures.push(format!("{}: failed to write student files: {e}", content.path));
            continue;
        }

        processed.push(Rendered {
            deployment: (*candidate).clone(),
            deployment_path,
            title: content.title.clone().unwrap_or_else(|| content.path_leaf().to_string()),
            version_tag: candidate.version_tag.clone().or_else(|| Some(commit.clone())),
            resolved_commit: commit,
        });
    }

    if processed.is_empty() {
        return fail_all(&ctx, &deploying, &workflow_id, "no content could be rendered").await;
    }

    if let Err(e) = write_readme(&student_dir, &processed, &contents_by_id, &titles) {
        return fail_all(&ctx, &deploying, &workflow_id, &format!("failed to write README: {e}")).await;
    }

    git::stage(&student_dir).await.map_err(|e| e.to_string())?;
    let commit_sha = if git::has_changes(&student_dir).await.map_err(|e| e.to_string())? {
        let message = request.commit_message.as_deref().unwrap_or("Deploy student templates");
        if let Err(e) = git::commit(&student_dir, message).await {
            return fail_all(&ctx, &deploying, &workflow_id, &format!("commit failed: {e}")).await;
        }
        if let Err(e) = git::push(&student_dir, "origin", "main", false).await {
            return fail_all(&ctx, &deploying, &workflow_id, &format!("push failed: {e}")).await;
        }
        git::head_commit(&student_dir).await.map_err(|e| e.to_string())?
    } else {
        git::head_commit(&student_dir).await.map_err(|e| e.to_string())?
    };

    for rendered in &processed {
        let mut tx = ctx.database.pool().begin().await.map_err(|e| e.to_string())?;
        match deployment::mark_deployed(&mut tx, rendered.deployment.course_content_id, &rendered.deployment_path, &rendered.resolved_commit, &workflow_id).await {
            Ok(_) => tx.commit().await.map_err(|e| e.to_string())?,
            Err(e) => {
                tx.rollback().await.ok();
                failures.push(format!("{}: {e}", rendered.deployment.course_content_id));
            }
        }
    }

    let processed_ids: HashSet<Uuid> = processed.iter().map(|r| r.deployment.course_content_id).collect();
    for candidate in &deploying {
        if processed_ids.contains(&candidate.course_content_id) {
            continue;
        }
        let mut tx = ctx.database.pool().begin().await.map_err(|e| e.to_string())?;
        deployment::mark_failed(&mut tx, candidate.course_content_id, "content was not rendered", &workflow_id).await.ok();
        tx.commit().await.ok();
    }

    serde_json::to_value(json!({
        "deployed": processed.len(),
        "failed": failures.len(),
        "failures": failures,
        "commit": commit_sha,
    }))
    .map_err(|e| e.to_string())
}

fn select_deployments(
    all: &[CourseContentDeployment],
    contents_by_id: &BTreeMap<Uuid, &CourseContent>,
    selection: &Selection,
    force_redeploy: bool,
) -> Vec<CourseContentDeployment> {
    match selection {
        Selection::ContentIds(ids) => all.iter().filter(|d| ids.contains(&d.course_content_id)).cloned().collect(),
        Selection::Parent { parent_id, include_descendants } => {
            let Some(parent) = contents_by_id.get(parent_id) else { return Vec::new() };
            all.iter()
                .filter(|d| match contents_by_id.get(&d.course_content_id) {
                    Some(content) => content.id == *parent_id || (*include_descendants && content.path.starts_with(&format!("{}.", parent.path))),
                    None => false,
                })
                .cloned()
                .collect()
        }
        Selection::All => all.iter().filter(|d| d.example_version_id.is_some()).cloned().collect(),
        Selection::Default => all
            .iter()
            .filter(|d| match d.status() {
                DeploymentStatus::Pending | DeploymentStatus::Failed => true,
                DeploymentStatus::Deployed => force_redeploy,
                _ => false,
            })
            .cloned()
            .collect(),
    }
}

/// Clones the student-template repository; an empty or unreachable remote is
/// not an error here, it just means the repository hasn't been seeded yet.
async fn clone_or_init_template(dir: &Path, url: &str, git_email: &str, git_name: &str) -> Result<(), String> {
    if git::clone(dir, url).await.is_err() {
        tokio::fs::create_dir_all(dir).await.map_err(|e| e.to_string())?;
        git::init_with_branch(dir, "main").await.map_err(|e| e.to_string())?;
        git::add_remote(dir, "origin", url).await.map_err(|e| e.to_string())?;
    }
    git::set_config(dir, "user.email", git_email).await.map_err(|e| e.to_string())?;
    git::set_config(dir, "user.name", git_name).await.map_err(|e| e.to_string())?;
    Ok(())
}

fn write_readme(
    student_dir: &Path,
    processed: &[Rendered],
    contents_by_id: &BTreeMap<Uuid, &CourseContent>,
    titles: &BTreeMap<String, String>,
) -> std::io::Result<()> {
    let mut body = String::from("# Assignments\n\n| Path | Title | Version |\n| --- | --- | --- |\n");
    for rendered in processed {
        let path = contents_by_id.get(&rendered.deployment.course_content_id).map(|c| c.path.as_str()).unwrap_or("");
        let segments: Vec<String> = path.split('.').map(str::to_string).collect();
        let breadcrumb = tree::title_path(&segments, titles);
        body.push_str(&format!("| {breadcrumb} | {} | {} |\n", rendered.title, rendered.version_tag.as_deref().unwrap_or("")));
    }
    std::fs::write(student_dir.join("README.md"), body)
}

/// Reconciles every `deploying` row back to `failed` when the workflow
/// cannot proceed past a whole-course step (template/assignments clone,
/// README, push).
async fn fail_all(ctx: &Context, deploying: &[CourseContentDeployment], workflow_id: &str, message: &str) -> Result<Value, String> {
    for candidate in deploying {
        let mut tx = ctx.database.pool().begin().await.map_err(|e| e.to_string())?;
        deployment::mark_failed(&mut tx, candidate.course_content_id, message, workflow_id).await.ok();
        tx.commit().await.ok();
    }
    Err(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(id: Uuid, path: &str) -> CourseContent {
        let mut content = CourseContent::new(Uuid::new_v4(), path);
        content.id = id;
        content
    }

    fn deployment_for(course_content_id: Uuid, status: &str) -> CourseContentDeployment {
        let mut d = CourseContentDeployment::new(course_content_id);
        d.deployment_status = status.to_string();
        d
    }

    #[test]
    fn default_selection_skips_deployed_unless_forced() {
        let week1 = Uuid::new_v4();
        let week2 = Uuid::new_v4();
        let contents = vec![content(week1, "week1"), content(week2, "week2")];
        let contents_by_id: BTreeMap<_, _> = contents.iter().map(|c| (c.id, c)).collect();
        let all = vec![deployment_for(week1, "pending"), deployment_for(week2, "deployed")];

        let without_force = select_deployments(&all, &contents_by_id, &Selection::Default, false);
        assert_eq!(without_force.len(), 1);
        assert_eq!(without_force[0].course_content_id, week1);

        let with_force = select_deployments(&all, &contents_by_id, &Selection::Default, true);
        assert_eq!(with_force.len(), 2);
    }

    #[test]
    fn parent_selection_includes_descendants_by_path_prefix() {
        let parent_id = Uuid::new_v4();
        let child_id = Uuid::new_v4();
        let unrelated_id = Uuid::new_v4();
        let contents = vec![content(parent_id, "week1"), content(child_id, "week1.loops"), content(unrelated_id, "week2")];
        let contents_by_id: BTreeMap<_, _> = contents.iter().map(|c| (c.id, c)).collect();
        let all = vec![deployment_for(parent_id, "deployed"), deployment_for(child_id, "deployed"), deployment_for(unrelated_id, "deployed")];

        let selected = select_deployments(&all, &contents_by_id, &Selection::Parent { parent_id, include_descendants: true }, true);
        let ids: HashSet<_> = selected.iter().map(|d| d.course_content_id).collect();
        assert!(ids.contains(&parent_id));
        assert!(ids.contains(&child_id));
        assert!(!ids.contains(&unrelated_id));
    }
}
