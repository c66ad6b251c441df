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

#[derive(Debug, Clone, FromRow)]
pub struct ResultModel {
    pub id: Uuid,
    pub course_member_id: Uuid,
    pub course_content_id: Uuid,
    pub course_submission_group_id: Option<Uuid>,
    pub execution_backend_id: Uuid,
    pub test_system_id: String,
    pub submit: bool,
    pub result: Option<f64>,
    pub result_json: Value,
    pub version_identifier: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ResultModel {
    pub fn new(
        course_member_id: Uuid,
        course_content_id: Uuid,
        execution_backend_id: Uuid,
        test_system_id: &str,
        version_identifier: &str,
    ) -> Self {
        ResultModel {
            id: Uuid::new_v4(),
            course_member_id,
            course_content_id,
            course_submission_group_id: None,
            execution_backend_id,
            test_system_id: test_system_id.to_string(),
            submit: false,
            result: None,
            result_json: Value::Object(Default::default()),
            version_identifier: version_identifier.to_string(),
            status: "pending".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    pub fn with_group(mut self, group_id: Uuid) -> Self {
        self.course_submission_group_id = Some(group_id);
        self
    }

    pub fn with_submit(mut self, submit: bool) -> Self {
        self.submit = submit;
        self
    }
}
