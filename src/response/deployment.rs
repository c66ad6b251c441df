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

/// Returned by both `/deploy/from-config` and `/deploy/from-yaml`: the
/// hierarchy reconciliation runs in the background, identified by this id.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeployWorkflowResponse {
    pub workflow_id: String,
    pub status: String,
}

impl DeployWorkflowResponse {
    pub fn started(workflow_id: String) -> Self {
        DeployWorkflowResponse { workflow_id, status: "started".to_string() }
    }
}
