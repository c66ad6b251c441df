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

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::meta::ParseError;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExecutionBackendConfig {
    pub slug: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub properties: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExecutionBackendReference {
    pub slug: String,
    #[serde(default)]
    pub properties: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CourseContentTypeConfig {
    pub slug: String,
    pub title: Option<String>,
    pub kind: String,
    #[serde(default)]
    pub properties: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CourseConfig {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub execution_backends: Vec<ExecutionBackendReference>,
    #[serde(default)]
    pub content_types: Vec<CourseContentTypeConfig>,
    #[serde(default)]
    pub settings: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CourseFamilyConfig {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub courses: Vec<CourseConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrganizationConfig {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub course_families: Vec<CourseFamilyConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserDeployment {
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub email: String,
    pub username: Option<String>,
    #[serde(default = "default_user_type")]
    pub user_type: String,
    #[serde(default)]
    pub properties: Value,
}

fn default_user_type() -> String {
    "user".to_string()
}

impl UserDeployment {
    pub fn display_name(&self) -> String {
        let full = [&self.given_name, &self.family_name].into_iter().flatten().cloned().collect::<Vec<_>>().join(" ");
        if full.is_empty() { self.username.clone().unwrap_or_else(|| self.email.clone()) } else { full }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AccountDeployment {
    pub provider: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub provider_account_id: String,
}

/// Identifies the target course either by id or by the `organization /
/// course_family / course` path triple.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CourseMemberDeployment {
    pub id: Option<String>,
    pub organization: Option<String>,
    pub course_family: Option<String>,
    pub course: Option<String>,
    #[serde(default = "default_role")]
    pub role: String,
    pub group: Option<String>,
}

fn default_role() -> String {
    "_student".to_string()
}

impl CourseMemberDeployment {
    pub fn path(&self) -> Option<(&str, &str, &str)> {
        Some((self.organization.as_deref()?, self.course_family.as_deref()?, self.course.as_deref()?))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserAccountDeployment {
    pub user: UserDeployment,
    #[serde(default)]
    pub accounts: Vec<AccountDeployment>,
    #[serde(default)]
    pub course_members: Vec<CourseMemberDeployment>,
}

/// Top-level shape accepted by `/deploy/from-config` and `/deploy/from-yaml`:
/// a hierarchy of organizations, course families, and courses to ensure
/// exist, plus execution backends and users to register up front.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeploymentConfig {
    #[serde(default)]
    pub execution_backends: Vec<ExecutionBackendConfig>,
    pub organizations: Vec<OrganizationConfig>,
    #[serde(default)]
    pub users: Vec<UserAccountDeployment>,
}

impl DeploymentConfig {
    pub fn course_count(&self) -> usize {
        self.organizations.iter().flat_map(|o| &o.course_families).map(|f| f.courses.len()).sum()
    }
}

impl FromStr for DeploymentConfig {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(serde_yml::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_hierarchy() {
        let yaml = r#"
organizations:
  - name: KIT
    path: kit
    course_families:
      - name: Programming
        path: prog
        courses:
          - name: Programming 1
            path: prog1
            content_types:
              - slug: assignment
                kind: assignment
"#;
        let config: DeploymentConfig = yaml.parse().unwrap();
        assert_eq!(config.organizations.len(), 1);
        assert_eq!(config.course_count(), 1);
        assert_eq!(config.organizations[0].course_families[0].courses[0].content_types[0].slug, "assignment");
    }
}
