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

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowStatus {
    Queued,
    Started,
    Finished,
    Failed,
    Deferred,
    Cancelled,
}

impl WorkflowStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowStatus::Queued => "queued",
            WorkflowStatus::Started => "started",
            WorkflowStatus::Finished => "finished",
            WorkflowStatus::Failed => "failed",
            WorkflowStatus::Deferred => "deferred",
            WorkflowStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            WorkflowStatus::Finished | WorkflowStatus::Failed | WorkflowStatus::Cancelled
        )
    }
}

impl std::str::FromStr for WorkflowStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "queued" => Ok(WorkflowStatus::Queued),
            "started" => Ok(WorkflowStatus::Started),
            "finished" => Ok(WorkflowStatus::Finished),
            "failed" => Ok(WorkflowStatus::Failed),
            "deferred" => Ok(WorkflowStatus::Deferred),
            "cancelled" => Ok(WorkflowStatus::Cancelled),
            other => Err(format!("unknown workflow status: {other}")),
        }
    }
}

/// A row in the in-process workflow runtime adapter. `id` is the task-queue
/// assigned run identifier, not a database-generated uuid, so callers can
/// reference it before the row is ever written.
#[derive(Debug, Clone, FromRow)]
pub struct WorkflowRun {
    pub id: String,
    pub name: String,
    pub status: String,
    pub parameters: Value,
    pub result: Option<Value>,
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl WorkflowRun {
    pub fn new(id: impl Into<String>, name: impl Into<String>, parameters: Value) -> Self {
        WorkflowRun {
            id: id.into(),
            name: name.into(),
            status: WorkflowStatus::Queued.as_str().to_string(),
            parameters,
            result: None,
            error: None,
            created_at: Utc::now(),
            started_at: None,
            finished_at: None,
        }
    }

    pub fn status(&self) -> WorkflowStatus {
        self.status.parse().unwrap_or(WorkflowStatus::Failed)
    }
}
