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
use uuid::Uuid;

/// Lifecycle of an example assigned to a submittable `CourseContent`. See
/// `service::deployment` for the transition table this type's rows obey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentStatus {
    Pending,
    Deploying,
    Deployed,
    Failed,
    Unassigned,
}

impl DeploymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentStatus::Pending => "pending",
            DeploymentStatus::Deploying => "deploying",
            DeploymentStatus::Deployed => "deployed",
            DeploymentStatus::Failed => "failed",
            DeploymentStatus::Unassigned => "unassigned",
        }
    }
}

impl std::str::FromStr for DeploymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(DeploymentStatus::Pending),
            "deploying" => Ok(DeploymentStatus::Deploying),
            "deployed" => Ok(DeploymentStatus::Deployed),
            "failed" => Ok(DeploymentStatus::Failed),
            "unassigned" => Ok(DeploymentStatus::Unassigned),
            other => Err(format!("unknown deployment status: {other}")),
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct CourseContentDeployment {
    pub id: Uuid,
    pub course_content_id: Uuid,
    pub example_version_id: Option<Uuid>,
    pub example_identifier: Option<String>,
    pub version_tag: Option<String>,
    pub version_identifier: Option<String>,
    pub deployment_status: String,
    pub deployment_path: Option<String>,
    pub deployment_message: Option<String>,
    pub assigned_at: DateTime<Utc>,
    pub deployed_at: Option<DateTime<Utc>>,
    pub last_attempt_at: Option<DateTime<Utc>>,
    pub workflow_id: Option<String>,
    pub deployment_metadata: Value,
    pub version: i32,
}

impl CourseContentDeployment {
    pub fn new(course_content_id: Uuid) -> Self {
        CourseContentDeployment {
            id: Uuid::new_v4(),
            course_content_id,
            example_version_id: None,
            example_identifier: None,
            version_tag: None,
            version_identifier: None,
            deployment_status: DeploymentStatus::Pending.as_str().to_string(),
            deployment_path: None,
            deployment_message: None,
            assigned_at: Utc::now(),
            deployed_at: None,
            last_attempt_at: None,
            workflow_id: None,
            deployment_metadata: Value::Object(Default::default()),
            version: 1,
        }
    }

    pub fn status(&self) -> DeploymentStatus {
        self.deployment_status.parse().unwrap_or(DeploymentStatus::Failed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeploymentAction {
    Assigned,
    Reassigned,
    Deploying,
    Deployed,
    Failed,
    Unassigned,
    Updated,
}

impl DeploymentAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentAction::Assigned => "assigned",
            DeploymentAction::Reassigned => "reassigned",
            DeploymentAction::Deploying => "deploying",
            DeploymentAction::Deployed => "deployed",
            DeploymentAction::Failed => "failed",
            DeploymentAction::Unassigned => "unassigned",
            DeploymentAction::Updated => "updated",
        }
    }
}

#[derive(Debug, FromRow)]
pub struct DeploymentHistory {
    pub id: Uuid,
    pub deployment_id: Uuid,
    pub action: String,
    pub action_details: Option<String>,
    pub example_version_id: Option<Uuid>,
    pub previous_example_version_id: Option<Uuid>,
    pub example_identifier: Option<String>,
    pub version_tag: Option<String>,
    pub workflow_id: Option<String>,
    pub meta: Value,
    pub created_at: DateTime<Utc>,
}

impl DeploymentHistory {
    pub fn new(deployment_id: Uuid, action: DeploymentAction) -> Self {
        DeploymentHistory {
            id: Uuid::new_v4(),
            deployment_id,
            action: action.as_str().to_string(),
            action_details: None,
            example_version_id: None,
            previous_example_version_id: None,
            example_identifier: None,
            version_tag: None,
            workflow_id: None,
            meta: Value::Object(Default::default()),
            created_at: Utc::now(),
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        let mut details = details.into();
        details.truncate(500);
        self.action_details = Some(details);
        self
    }

    pub fn with_workflow(mut self, workflow_id: impl Into<String>) -> Self {
        self.workflow_id = Some(workflow_id.into());
        self
    }

    pub fn with_versions(mut self, example_version_id: Option<Uuid>, previous: Option<Uuid>) -> Self {
        self.example_version_id = example_version_id;
        self.previous_example_version_id = previous;
        self
    }
}
