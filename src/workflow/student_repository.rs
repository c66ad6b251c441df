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

//! Student repository workflow (C9): forks a course's `student-template`
//! project into the student's (or team's) namespace.

use std::{sync::Arc, time::Duration};

use git_hosting_client::{
    ClientError,
    types::{AddCollaboratorRequest, BranchProtectionRequest, ForkRepositoryRequest},
};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

use crate::context::Context;

const INITIAL_POLL_DELAY: Duration = Duration::from_secs(2);
const POLL_INTERVAL: Duration = Duration::from_secs(5);
const MAX_POLL_ATTEMPTS: u32 = 12;

pub struct ForkRequest {
    pub template_owner: String,
    pub template_repo: String,
    pub students_namespace: String,
    pub member_username: String,
    pub member_email: String,
}

pub struct ForkResult {
    pub full_path: String,
    pub web_url: String,
    pub owner_id: u64,
}

pub async fn run(ctx: Arc<Context>, cancellation: CancellationToken, request: ForkRequest) -> Result<Value, String> {
    let result = fork_for_member(&ctx, &cancellation, &request).await.map_err(|e| e.to_string())?;
    serde_json::to_value(json!({
        "full_path": result.full_path,
        "web_url": result.web_url,
        "owner_id": result.owner_id,
    }))
    .map_err(|e| e.to_string())
}

async fn fork_for_member(ctx: &Context, cancellation: &CancellationToken, request: &ForkRequest) -> Result<ForkResult, ClientError> {
    let repo_name = request.member_username.to_lowercase().replace(['_', ' '], "-");

    // Idempotency check: reuse an existing fork by its deterministic path.
    if let Ok(existing) = ctx.git.get_repository(&request.students_namespace, &repo_name).await {
        return Ok(ForkResult { full_path: existing.full_name.clone(), web_url: existing.html_url.clone(), owner_id: existing.owner.id });
    }

    let forked = ctx
        .git
        .fork_repository(
            &request.template_owner,
            &request.template_repo,
            ForkRepositoryRequest { organization: Some(request.students_namespace.clone()), name: Some(repo_name.clone()) },
        )
        .await?;

    let repository = poll_until_readable(ctx, cancellation, &request.students_namespace, &repo_name, forked.empty).await?;

    for branch in ["main", "master"] {
        let _ = ctx.git.delete_branch_protection(&request.students_namespace, &repo_name, branch).await;
    }

    ctx.git
        .add_collaborator(
            &request.students_namespace,
            &repo_name,
            &request.member_username,
            AddCollaboratorRequest { permission: "admin".to_string() },
        )
        .await?;

    Ok(ForkResult { full_path: repository.full_name, web_url: repository.html_url, owner_id: repository.owner.id })
}

/// Gitea forks asynchronously; poll `get_repository` until `empty` flips to
/// `false`, per the client's documented fork-then-poll contract.
async fn poll_until_readable(
    ctx: &Context,
    cancellation: &CancellationToken,
    owner: &str,
    repo: &str,
    initially_empty: bool,
) -> Result<git_hosting_client::types::Repository, ClientError> {
    if !initially_empty {
        return ctx.git.get_repository(owner, repo).await;
    }

    tokio::select! {
        _ = cancellation.cancelled() => return Err(ClientError::BadRequest("cancelled".to_string())),
        _ = tokio::time::sleep(INITIAL_POLL_DELAY) => {}
    }

    for _ in 0..MAX_POLL_ATTEMPTS {
        let repository = ctx.git.get_repository(owner, repo).await?;
        if !repository.empty {
            return Ok(repository);
        }
        tokio::select! {
            _ = cancellation.cancelled() => return Err(ClientError::BadRequest("cancelled".to_string())),
            _ = tokio::time::sleep(POLL_INTERVAL) => {}
        }
    }

    Err(ClientError::UnexpectedStatusCode(reqwest::StatusCode::REQUEST_TIMEOUT))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_name_is_lowercase_hyphenated() {
        let request = ForkRequest {
            template_owner: "kit".to_string(),
            template_repo: "prog1-student-template".to_string(),
            students_namespace: "kit-prog1-students".to_string(),
            member_username: "Jane Doe".to_string(),
            member_email: "jane@example.com".to_string(),
        };
        let repo_name = request.member_username.to_lowercase().replace(['_', ' '], "-");
        assert_eq!(repo_name, "jane-doe");
    }
}
