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
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yml::Error),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutionBackendRef {
    pub slug: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Properties {
    #[serde(default)]
    pub student_templates: Vec<String>,
    #[serde(default)]
    pub student_submission_files: Vec<String>,
    #[serde(default)]
    pub additional_files: Vec<String>,
    #[serde(default)]
    pub test_files: Vec<String>,
    #[serde(default)]
    pub execution_backend: Option<ExecutionBackendRef>,
}

/// A `testDependencies` entry: either a bare slug or `{slug, version}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TestDependency {
    Bare(String),
    Constrained { slug: String, version: String },
}

impl TestDependency {
    pub fn slug(&self) -> &str {
        match self {
            TestDependency::Bare(s) => s,
            TestDependency::Constrained { slug, .. } => slug,
        }
    }

    pub fn version_constraint(&self) -> Option<&str> {
        match self {
            TestDependency::Bare(_) => None,
            TestDependency::Constrained { version, .. } => Some(version),
        }
    }
}

/// Parsed `meta.yaml` describing an example's kind, identity, and the file
/// groups that the student-template and test-deployment algorithms consume.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExampleMeta {
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub properties: Properties,
    #[serde(default, rename = "testDependencies")]
    pub test_dependencies: Vec<TestDependency>,
}

impl FromStr for ExampleMeta {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(serde_yml::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_meta() {
        let meta: ExampleMeta = "kind: assignment\nslug: hello-world\nname: Hello World\n".parse().unwrap();
        assert_eq!(meta.kind, "assignment");
        assert_eq!(meta.slug, "hello-world");
        assert!(meta.properties.student_templates.is_empty());
    }

    #[test]
    fn parses_file_groups_and_execution_backend() {
        let yaml = r#"
kind: assignment
slug: loops
name: Loops
properties:
  studentTemplates:
    - studentTemplate/main.py
  studentSubmissionFiles:
    - main.py
  additionalFiles:
    - README.md
  testFiles:
    - test_main.py
  executionBackend:
    slug: python-pytest
testDependencies:
  - helper-lib
  - slug: shared-fixtures
    version: "^1.2"
"#;
        let meta: ExampleMeta = yaml.parse().unwrap();
        assert_eq!(meta.properties.student_templates, vec!["studentTemplate/main.py"]);
        assert_eq!(meta.properties.student_submission_files, vec!["main.py"]);
        assert_eq!(meta.properties.additional_files, vec!["README.md"]);
        assert_eq!(meta.properties.test_files, vec!["test_main.py"]);
        assert_eq!(meta.properties.execution_backend.unwrap().slug, "python-pytest");
        assert_eq!(meta.test_dependencies.len(), 2);
        assert_eq!(meta.test_dependencies[0].slug(), "helper-lib");
        assert_eq!(meta.test_dependencies[0].version_constraint(), None);
        assert_eq!(meta.test_dependencies[1].slug(), "shared-fixtures");
        assert_eq!(meta.test_dependencies[1].version_constraint(), Some("^1.2"));
    }

    #[test]
    fn rejects_invalid_yaml() {
        let result: Result<ExampleMeta, _> = "kind: [unterminated".parse();
        assert!(result.is_err());
    }
}
