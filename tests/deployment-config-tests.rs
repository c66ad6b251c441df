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

use coursectl::schema::DeploymentConfig;

#[test]
fn parses_full_deployment_config() {
    let yaml = r#"
execution_backends:
  - slug: python-pytest
    type: kubernetes
    properties:
      image: python:3.12

organizations:
  - name: KIT
    path: kit
    course_families:
      - name: Programming
        path: prog
        courses:
          - name: Programming 1
            path: prog1
            execution_backends:
              - slug: python-pytest
            content_types:
              - slug: assignment
                title: Assignment
                kind: assignment

users:
  - user:
      email: alice@example.com
      given_name: Alice
      family_name: Example
    accounts:
      - provider: gitea
        type: oauth
        provider_account_id: "42"
    course_members:
      - organization: kit
        course_family: prog
        course: prog1
        role: _student
"#;

    let config: DeploymentConfig = yaml.parse().unwrap();

    assert_eq!(config.execution_backends.len(), 1);
    assert_eq!(config.execution_backends[0].slug, "python-pytest");

    assert_eq!(config.course_count(), 1);
    let course = &config.organizations[0].course_families[0].courses[0];
    assert_eq!(course.path, "prog1");
    assert_eq!(course.execution_backends[0].slug, "python-pytest");

    assert_eq!(config.users.len(), 1);
    let user = &config.users[0];
    assert_eq!(user.user.display_name(), "Alice Example");
    assert_eq!(user.course_members[0].path(), Some(("kit", "prog", "prog1")));
}

#[test]
fn rejects_malformed_yaml() {
    let result: Result<DeploymentConfig, _> = "organizations: [".parse();
    assert!(result.is_err());
}
