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

/// Documents the `multipart/form-data` body accepted by
/// `/deploy/from-yaml`: a single `file` part holding the deployment-config
/// YAML. Handled through `axum::extract::Multipart` directly; this type
/// exists only to describe the shape in the OpenAPI document.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeployFromYamlRequest {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}
