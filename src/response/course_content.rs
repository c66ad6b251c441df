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

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    model::CourseContentDeployment,
    service::course_content::{ContentDeploymentStatus, PendingChange},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeploymentResponse {
    pub course_content_id: Uuid,
    pub status: String,
    pub example_identifier: Option<String>,
    pub version_tag: Option<String>,
    pub version_identifier: Option<String>,
    pub deployment_path: Option<String>,
    pub deployment_message: Option<String>,
}

impl From<CourseContentDeployment> for DeploymentResponse {
    fn from(deployment: CourseContentDeployment) -> Self {
        DeploymentResponse {
            course_content_id: deployment.course_content_id,
            status: deployment.status().as_str().to_string(),
            example_identifier: deployment.example_identifier,
            version_tag: deployment.version_tag,
            version_identifier: deployment.version_identifier,
            deployment_path: deployment.deployment_path,
            deployment_message: deployment.deployment_message,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BulkAssignFailure {
    pub course_content_id: Uuid,
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BulkAssignExamplesResponse {
    pub assigned: Vec<DeploymentResponse>,
    pub failed: Vec<BulkAssignFailure>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PendingChangeResponse {
    #[serde(rename = "type")]
    pub change_type: String,
    pub content_id: Uuid,
    pub path: String,
    pub title: Option<String>,
    pub example_name: Option<String>,
    pub to_version: Option<String>,
    pub from_version: Option<String>,
}

impl From<PendingChange> for PendingChangeResponse {
    fn from(change: PendingChange) -> Self {
        PendingChangeResponse {
            change_type: change.change_type.to_string(),
            content_id: change.course_content_id,
            path: change.path,
            title: change.title,
            example_name: change.example_identifier,
            to_version: change.to_version,
            from_version: change.from_version,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PendingChangesResponse {
    pub total_changes: usize,
    pub changes: Vec<PendingChangeResponse>,
}

impl From<Vec<PendingChange>> for PendingChangesResponse {
    fn from(changes: Vec<PendingChange>) -> Self {
        PendingChangesResponse { total_changes: changes.len(), changes: changes.into_iter().map(PendingChangeResponse::from).collect() }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GenerateWorkflowResponse {
    pub workflow_id: String,
    pub status: String,
    pub contents_to_process: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ContentDeploymentStatusResponse {
    pub course_content_id: Uuid,
    pub path: String,
    pub title: String,
    pub status: Option<String>,
    pub example_identifier: Option<String>,
    pub version_tag: Option<String>,
    pub update_available: bool,
}

impl From<ContentDeploymentStatus> for ContentDeploymentStatusResponse {
    fn from(status: ContentDeploymentStatus) -> Self {
        ContentDeploymentStatusResponse {
            course_content_id: status.course_content_id,
            path: status.path,
            title: status.title,
            status: status.status.map(|s| s.as_str().to_string()),
            example_identifier: status.example_identifier,
            version_tag: status.version_tag,
            update_available: status.update_available,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeploymentStatusSummaryResponse {
    pub total: usize,
    pub deployed: usize,
    pub pending: usize,
    pub deploying: usize,
    pub failed: usize,
    pub unassigned: usize,
    pub unassigned_content: usize,
    pub contents: Vec<ContentDeploymentStatusResponse>,
}

impl From<Vec<ContentDeploymentStatus>> for DeploymentStatusSummaryResponse {
    fn from(statuses: Vec<ContentDeploymentStatus>) -> Self {
        let mut summary = DeploymentStatusSummaryResponse {
            total: statuses.len(),
            deployed: 0,
            pending: 0,
            deploying: 0,
            failed: 0,
            unassigned: 0,
            unassigned_content: 0,
            contents: Vec::with_capacity(statuses.len()),
        };
        for status in statuses {
            use crate::model::DeploymentStatus;
            match status.status {
                Some(DeploymentStatus::Deployed) => summary.deployed += 1,
                Some(DeploymentStatus::Pending) => summary.pending += 1,
                Some(DeploymentStatus::Deploying) => summary.deploying += 1,
                Some(DeploymentStatus::Failed) => summary.failed += 1,
                Some(DeploymentStatus::Unassigned) => summary.unassigned += 1,
                None => summary.unassigned_content += 1,
            }
            summary.contents.push(ContentDeploymentStatusResponse::from(status));
        }
        summary
    }
}
