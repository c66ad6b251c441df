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

//! Test execution workflow (C10): clones a student submission and a
//! reference solution to a pinned commit each, dispatches to a backend
//! executor, and commits the outcome to the `results` table.

use std::sync::Arc;

use serde_json::Value;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::{context::Context, repository::ResultRepository, utils::git};

#[derive(Debug, Clone)]
pub struct RepoRef {
    pub url: String,
    pub commit: String,
}

pub struct TestJob {
    pub result_id: Uuid,
    pub student: RepoRef,
    pub reference: RepoRef,
    pub backend: String,
    pub test_file: String,
    pub spec_file: Option<String>,
    pub backend_properties: Value,
}

pub struct ExecutionOutcome {
    pub passed: u32,
    pub failed: u32,
    pub total: u32,
    pub details: Value,
}

/// Backend-specific executor contract. Implementations dispatch to whatever
/// the backend's `kind` (`python`, `matlab`, ...) actually runs; this spec
/// only fixes the contract, not every executor's internals.
pub trait Executor: Send + Sync {
    fn run(
        &self,
        student_path: &std::path::Path,
        reference_path: &std::path::Path,
        test_file: &str,
        spec_file: Option<&str>,
        backend_properties: &Value,
    ) -> Result<ExecutionOutcome, String>;
}

pub async fn run(ctx: Arc<Context>, cancellation: CancellationToken, job: TestJob, executor: &dyn Executor) -> Result<Value, String> {
    let workspace = tempfile::tempdir().map_err(|e| e.to_string())?;
    let student_path = workspace.path().join("student");
    let reference_path = workspace.path().join("reference");

    if cancellation.is_cancelled() {
        return finalize(&ctx, job.result_id, "failed", None, serde_json::json!({"error": "cancelled"})).await;
    }

    if let Err(e) = clone_pinned(&job.student, &student_path).await {
        return finalize(&ctx, job.result_id, "failed", None, serde_json::json!({"error": e})).await;
    }
    if let Err(e) = clone_pinned(&job.reference, &reference_path).await {
        return finalize(&ctx, job.result_id, "failed", None, serde_json::json!({"error": e})).await;
    }

    let outcome = executor.run(&student_path, &reference_path, &job.test_file, job.spec_file.as_deref(), &job.backend_properties);

    match outcome {
        Ok(outcome) => {
            let score = if outcome.total == 0 { 0.0 } else { outcome.passed as f64 / outcome.total as f64 };
            let result_json = serde_json::json!({
                "passed": outcome.passed,
                "failed": outcome.failed,
                "total": outcome.total,
                "details": outcome.details,
            });
            finalize(&ctx, job.result_id, "finished", Some(score), result_json).await
        }
        Err(e) => finalize(&ctx, job.result_id, "failed", None, serde_json::json!({"error": e})).await,
    }
}

async fn clone_pinned(repo: &RepoRef, dir: &std::path::Path) -> Result<(), String> {
    if dir.exists() {
        tokio::fs::remove_dir_all(dir).await.map_err(|e| e.to_string())?;
    }
    git::clone(dir, &repo.url).await.map_err(|e| e.to_string())?;
    git::checkout(dir, &repo.commit).await.map_err(|e| e.to_string())?;
    Ok(())
}

async fn finalize(ctx: &Context, result_id: Uuid, status: &str, score: Option<f64>, result_json: Value) -> Result<Value, String> {
    ResultRepository::record_outcome(&ctx.database, result_id, status, score, result_json.clone())
        .await
        .map_err(|e| e.to_string())?;
    Ok(result_json)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeExecutor {
        outcome: Result<(u32, u32), String>,
    }

    impl Executor for FakeExecutor {
        fn run(&self, _s: &std::path::Path, _r: &std::path::Path, _t: &str, _spec: Option<&str>, _p: &Value) -> Result<ExecutionOutcome, String> {
            match &self.outcome {
                Ok((passed, total)) => Ok(ExecutionOutcome { passed: *passed, failed: total - passed, total: *total, details: Value::Null }),
                Err(e) => Err(e.clone()),
            }
        }
    }

    #[test]
    fn score_is_passed_over_total() {
        let executor = FakeExecutor { outcome: Ok((3, 4)) };
        let outcome = executor.run(std::path::Path::new("."), std::path::Path::new("."), "t", None, &Value::Null).unwrap();
        let score = outcome.passed as f64 / outcome.total as f64;
        assert_eq!(score, 0.75);
    }
}
