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

//! Assignments-repository generation (supplemental to C8, §4.8): populates a
//! course's assignments repository with the full, unmodified content of
//! every example currently assigned in the course, one directory per
//! example identifier. This is never invoked from the release path — the
//! release path only reads this repository.

use std::{collections::BTreeMap, path::Path, sync::Arc};

use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::{
    context::Context,
    repository::{DeploymentRepository, ExampleRepositoryQueries, ExampleVersionRepository},
    utils::git,
};

pub struct AssignmentsRepositoryRequest {
    pub course_id: Uuid,
    pub assignments_url: String,
    pub commit_message: Option<String>,
}

pub async fn run(ctx: Arc<Context>, _cancellation: CancellationToken, request: AssignmentsRepositoryRequest) -> Result<Value, String> {
    let deployments = DeploymentRepository::find_by_course(&ctx.database, request.course_id).await.map_err(|e| e.to_string())?;

    let mut seen = BTreeMap::new();
    for deployment in &deployments {
        if let Some(version_id) = deployment.example_version_id {
            seen.entry(version_id).or_insert(());
        }
    }

    if seen.is_empty() {
        return serde_json::to_value(json!({"examples": 0, "failures": Vec::<String>::new()})).map_err(|e| e.to_string());
    }

    let workspace = tempfile::tempdir().map_err(|e| e.to_string())?;
    let repo_dir = workspace.path().join("assignments");
    clone_or_init(&repo_dir, &request.assignments_url, &ctx.config.system_git_email, &ctx.config.system_git_name).await?;

    let mut written = 0;
    let mut failures = Vec::new();
    for version_id in seen.keys() {
        match materialize_example(&ctx, &repo_dir, *version_id).await {
            Ok(identifier) => {
                written += 1;
                tracing::debug!("materialized example {identifier} for assignments repository");
            }
            Err(e) => failures.push(format!("{version_id}: {e}")),
        }
    }

    git::stage(&repo_dir).await.map_err(|e| e.to_string())?;
    if git::has_changes(&repo_dir).await.map_err(|e| e.to_string())? {
        let message = request.commit_message.as_deref().unwrap_or("Regenerate assignments repository");
        git::commit(&repo_dir, message).await.map_err(|e| e.to_string())?;
        git::push(&repo_dir, "origin", "main", true).await.map_err(|e| e.to_string())?;
    }
    let commit = git::head_commit(&repo_dir).await.map_err(|e| e.to_string())?;

    serde_json::to_value(json!({"examples": written, "failures": failures, "commit": commit})).map_err(|e| e.to_string())
}

async fn clone_or_init(dir: &Path, url: &str, git_email: &str, git_name: &str) -> Result<(), String> {
    if git::clone(dir, url).await.is_err() {
        tokio::fs::create_dir_all(dir).await.map_err(|e| e.to_string())?;
        git::init_with_branch(dir, "main").await.map_err(|e| e.to_string())?;
        git::add_remote(dir, "origin", url).await.map_err(|e| e.to_string())?;
    }
    git::set_config(dir, "user.email", git_email).await.map_err(|e| e.to_string())?;
    git::set_config(dir, "user.name", git_name).await.map_err(|e| e.to_string())?;
    Ok(())
}

/// Downloads every object under the version's `storage_path` prefix and
/// writes it, unmodified, under `<repo>/<example identifier>/`.
async fn materialize_example(ctx: &Context, repo_dir: &Path, version_id: Uuid) -> Result<String, String> {
    let version = ExampleVersionRepository::find_by_id(&ctx.database, version_id).await.map_err(|e| e.to_string())?.ok_or("example version not found")?;
    let example = ExampleRepositoryQueries::find_by_id(&ctx.database, version.example_id).await.map_err(|e| e.to_string())?.ok_or("example not found")?;

    let prefix = version.storage_path.trim_end_matches('/');
    let objects = ctx.object_store.list_objects(&format!("{prefix}/"), None).await.map_err(|e| e.to_string())?;
    if objects.is_empty() {
        return Err("no objects at storage_path".to_string());
    }

    let target_dir = repo_dir.join(example.identifier.replace('.', "/"));
    for object in &objects {
        let relative = object.key.strip_prefix(&format!("{prefix}/")).unwrap_or(&object.key);
        if relative.is_empty() {
            continue;
        }
        let bytes = ctx.object_store.download_file(&object.key, None).await.map_err(|e| e.to_string())?;
        let dest = target_dir.join(relative);
        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| e.to_string())?;
        }
        tokio::fs::write(&dest, bytes).await.map_err(|e| e.to_string())?;
    }

    Ok(example.identifier)
}
