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

use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::{
    context::Context,
    handler::{course_content, deployment},
};

pub fn build() -> Router<Arc<Context>> {
    Router::new()
        // Example assignment
        .route("/v1/course-contents/{id}/assign-example", post(course_content::assign_example))
        .route("/v1/course-contents/{id}/example", delete(course_content::remove_example))
        .route("/v1/courses/{course_id}/assign-examples", post(course_content::bulk_assign_examples))
        .route("/v1/courses/{course_id}/pending-changes", get(course_content::pending_changes))
        .route("/v1/courses/{course_id}/examples/deployment-status", get(course_content::deployment_status))
        // Student-template / assignments-repository generation
        .route("/v1/courses/{course_id}/generate-student-template", post(course_content::generate_student_template))
        .route(
            "/v1/courses/{course_id}/generate-assignments-repository",
            post(course_content::generate_assignments_repository),
        )
        // Hierarchy deployment
        .route("/v1/deploy/from-config", post(deployment::deploy_from_config))
        .route("/v1/deploy/from-yaml", post(deployment::deploy_from_yaml))
}
