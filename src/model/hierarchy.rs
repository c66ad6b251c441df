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

/// A root of the hierarchy. `path` is a dotted ltree label, stored and read
/// back as text (the `ltree` operators used by repository queries are
/// applied in SQL; the Rust side only ever sees the rendered label).
#[derive(Debug, FromRow)]
pub struct Organization {
    pub id: Uuid,
    pub path: String,
    pub organization_type: String,
    pub title: Option<String>,
    pub properties: Value,
    pub version: i32,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Organization {
    pub fn new(path: &str, organization_type: &str) -> Self {
        Organization {
            id: Uuid::new_v4(),
            path: path.to_string(),
            organization_type: organization_type.to_string(),
            title: None,
            properties: Value::Object(Default::default()),
            version: 1,
            created_by: None,
            updated_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}

#[derive(Debug, FromRow)]
pub struct CourseFamily {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub path: String,
    pub title: Option<String>,
    pub properties: Value,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CourseFamily {
    pub fn new(organization_id: Uuid, path: &str) -> Self {
        CourseFamily {
            id: Uuid::new_v4(),
            organization_id,
            path: path.to_string(),
            title: None,
            properties: Value::Object(Default::default()),
            version: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}

/// Per-course Git repository identifiers, parsed from `properties.gitlab` at
/// the boundary rather than kept as a dynamic JSON bag throughout the code.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, Default)]
pub struct GitRepoInfo {
    pub full_path: Option<String>,
    pub web_url: Option<String>,
    pub group_id: Option<i64>,
    pub namespace_id: Option<i64>,
}

#[derive(Debug, FromRow)]
pub struct Course {
    pub id: Uuid,
    pub course_family_id: Uuid,
    pub organization_id: Uuid,
    pub path: String,
    pub title: Option<String>,
    pub properties: Value,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Course {
    pub fn new(course_family_id: Uuid, organization_id: Uuid, path: &str) -> Self {
        Course {
            id: Uuid::new_v4(),
            course_family_id,
            organization_id,
            path: path.to_string(),
            title: None,
            properties: Value::Object(Default::default()),
            version: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    pub fn git_info(&self) -> GitRepoInfo {
        self.properties.get("gitlab").and_then(|v| serde_json::from_value(v.clone()).ok()).unwrap_or_default()
    }
}

#[derive(Debug, FromRow)]
pub struct CourseGroup {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub properties: Value,
}

#[derive(Debug, FromRow)]
pub struct CourseMember {
    pub id: Uuid,
    pub user_id: String,
    pub course_id: Uuid,
    pub course_group_id: Option<Uuid>,
    pub course_role_id: String,
    pub properties: Value,
    pub version: i32,
}

impl CourseMember {
    pub fn new(user_id: &str, course_id: Uuid, course_role_id: &str) -> Self {
        CourseMember {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            course_id,
            course_group_id: None,
            course_role_id: course_role_id.to_string(),
            properties: Value::Object(Default::default()),
            version: 1,
        }
    }

    pub fn with_group(mut self, group_id: Uuid) -> Self {
        self.course_group_id = Some(group_id);
        self
    }
}

#[derive(Debug, FromRow)]
pub struct CourseContentType {
    pub id: Uuid,
    pub course_id: Uuid,
    pub slug: String,
    pub kind: String,
    pub title: Option<String>,
    pub properties: Value,
}

impl CourseContentType {
    /// Whether content of this type may carry a deployment.
    pub fn is_submittable(&self) -> bool {
        self.kind == "assignment"
    }
}

#[derive(Debug, FromRow)]
pub struct ExecutionBackend {
    pub id: Uuid,
    pub slug: String,
    pub kind: String,
}

#[derive(Debug, FromRow)]
pub struct CourseContent {
    pub id: Uuid,
    pub course_id: Uuid,
    pub path: String,
    pub title: Option<String>,
    pub course_content_type_id: Option<Uuid>,
    pub position: i32,
    pub max_group_size: Option<i32>,
    pub max_submissions: Option<i32>,
    pub max_test_runs: Option<i32>,
    pub execution_backend_id: Option<Uuid>,
    pub archived_at: Option<DateTime<Utc>>,
    pub properties: Value,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CourseContent {
    pub fn new(course_id: Uuid, path: &str) -> Self {
        CourseContent {
            id: Uuid::new_v4(),
            course_id,
            path: path.to_string(),
            title: None,
            course_content_type_id: None,
            position: 0,
            max_group_size: None,
            max_submissions: None,
            max_test_runs: None,
            execution_backend_id: None,
            archived_at: None,
            properties: Value::Object(Default::default()),
            version: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    /// The last path segment, used as a fallback title when none is set.
    pub fn path_leaf(&self) -> &str {
        self.path.rsplit('.').next().unwrap_or(&self.path)
    }
}
