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

fn default_latest() -> String {
    "latest".to_string()
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AssignExampleRequest {
    pub example_id: Uuid,

    /// `"latest"` or a specific version tag.
    #[serde(default = "default_latest")]
    pub example_version: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BulkAssignExampleEntry {
    pub course_content_id: Uuid,
    pub example_id: Uuid,
    #[serde(default = "default_latest")]
    pub example_version: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BulkAssignExamplesRequest {
    pub assignments: Vec<BulkAssignExampleEntry>,
}

/// Which already-assigned content a template generation run should cover.
/// At most one of `content_ids`/`parent_id`/`all` should be set; none set
/// falls back to every content whose deployment is pending or failed.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct ReleaseSelector {
    pub content_ids: Option<Vec<Uuid>>,
    pub parent_id: Option<Uuid>,
    #[serde(default)]
    pub include_descendants: bool,
    #[serde(default)]
    pub all: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GenerateStudentTemplateRequest {
    pub commit_message: Option<String>,
    #[serde(default)]
    pub force_redeploy: bool,
    pub release: Option<ReleaseSelector>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GenerateAssignmentsRepositoryRequest {
    pub commit_message: Option<String>,
}
