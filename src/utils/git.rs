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

use std::path::Path;
use thiserror::Error;
use tokio::process::Command;

#[derive(Debug, Error)]
pub enum GitError {
    #[error("Failed to initialize Git repository: {0}")]
    InitRepo(String),

    #[error("Failed to clone repository: {0}")]
    CloneRepo(String),

    #[error("Failed to check out ref: {0}")]
    Checkout(String),

    #[error("Failed to set config: {0}")]
    SetConfig(String),

    #[error("Failed to stage files: {0}")]
    StageFiles(String),

    #[error("Failed to commit changes: {0}")]
    CommitChanges(String),

    #[error("Failed to add remote: {0}")]
    AddRemote(String),

    #[error("Failed to push changes: {0}")]
    PushChanges(String),
}

/// Initializes a new Git repository in the specified directory.
#[inline]
pub async fn init(dir: &Path) -> Result<(), GitError> {
    git(dir, &["init"]).await.map_err(GitError::InitRepo)
}

/// Initializes a new Git repository with `branch` as its initial branch.
#[inline]
pub async fn init_with_branch(dir: &Path, branch: &str) -> Result<(), GitError> {
    git(dir, &["init", "-b", branch]).await.map_err(GitError::InitRepo)
}

/// Clones `url` into `dir`, which must not already exist.
#[inline]
pub async fn clone(dir: &Path, url: &str) -> Result<(), GitError> {
    let parent = dir.parent().unwrap_or(dir);
    let name = dir.file_name().and_then(|n| n.to_str()).unwrap_or(".");
    git(parent, &["clone", url, name]).await.map_err(GitError::CloneRepo)
}

/// Checks out the given ref (branch, tag, or commit) in `dir`.
#[inline]
pub async fn checkout(dir: &Path, git_ref: &str) -> Result<(), GitError> {
    git(dir, &["checkout", git_ref]).await.map_err(GitError::Checkout)
}

/// Sets a local repository config value, e.g. `user.email`.
#[inline]
pub async fn set_config(dir: &Path, key: &str, value: &str) -> Result<(), GitError> {
    git(dir, &["config", key, value]).await.map_err(GitError::SetConfig)
}

/// Stages all files in the working directory.
#[inline]
pub async fn stage(dir: &Path) -> Result<(), GitError> {
    git(dir, &["add", "."]).await.map_err(GitError::StageFiles)
}

/// Commits staged files with the given message.
#[inline]
pub async fn commit(dir: &Path, message: &str) -> Result<(), GitError> {
    git(dir, &["commit", "-m", message]).await.map_err(GitError::CommitChanges)
}

/// Adds a remote repository.
#[inline]
pub async fn add_remote(dir: &Path, remote_name: &str, remote_url: &str) -> Result<(), GitError> {
    git(dir, &["remote", "add", remote_name, remote_url]).await.map_err(GitError::AddRemote)
}

/// Pushes changes to a remote repository. Non-force by default; `force` is
/// only set for deployment refreshes that intentionally overwrite history.
#[inline]
pub async fn push(dir: &Path, remote_name: &str, branch: &str, force: bool) -> Result<(), GitError> {
    let mut args = vec!["push"];
    if force {
        args.push("--force");
    }
    args.push(remote_name);
    args.push(branch);
    git(dir, &args).await.map_err(GitError::PushChanges)
}

/// Whether the working directory has uncommitted changes.
#[inline]
pub async fn has_changes(dir: &Path) -> Result<bool, GitError> {
    let output = git_output(dir, &["status", "--porcelain"]).await.map_err(GitError::StageFiles)?;
    Ok(!output.trim().is_empty())
}

/// The commit sha that `HEAD` currently points to.
#[inline]
pub async fn head_commit(dir: &Path) -> Result<String, GitError> {
    git_output(dir, &["rev-parse", "HEAD"]).await.map(|s| s.trim().to_string()).map_err(GitError::CommitChanges)
}

/// Executes a Git command and returns a raw error message if failed.
async fn git(dir: &Path, args: &[&str]) -> Result<(), String> {
    git_output(dir, args).await.map(|_| ())
}

/// Executes a Git command, returning stdout on success and stderr on failure.
async fn git_output(dir: &Path, args: &[&str]) -> Result<String, String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .await
        .map_err(|e| e.to_string())?;

    if !output.status.success() {
        return Err(String::from_utf8_lossy(&output.stderr).to_string());
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}
