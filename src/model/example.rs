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
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, FromRow)]
pub struct ExampleRepository {
    pub id: Uuid,
    pub source_type: String,
    pub source_url: String,
    pub access_credentials: Option<String>,
    pub organization_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct Example {
    pub id: Uuid,
    pub repository_id: Uuid,
    pub directory: String,
    pub identifier: String,
    pub title: String,
    pub subject: Option<String>,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct ExampleVersion {
    pub id: Uuid,
    pub example_id: Uuid,
    pub version_tag: String,
    pub version_number: i32,
    pub storage_path: String,
    pub meta_yaml: String,
    pub test_yaml: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
pub struct ExampleDependency {
    pub example_id: Uuid,
    pub depends_id: Uuid,
    pub version_constraint: Option<String>,
}
