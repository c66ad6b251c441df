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

use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{handler, request, response, schema};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Course Control Plane API Reference"
    ),
    paths(
        handler::course_content::assign_example,
        handler::course_content::bulk_assign_examples,
        handler::course_content::remove_example,
        handler::course_content::pending_changes,
        handler::course_content::deployment_status,
        handler::course_content::generate_student_template,
        handler::course_content::generate_assignments_repository,

        handler::deployment::deploy_from_config,
        handler::deployment::deploy_from_yaml,
    ),
    components(
        schemas(
            request::AssignExampleRequest,
            request::BulkAssignExampleEntry,
            request::BulkAssignExamplesRequest,
            request::ReleaseSelector,
            request::GenerateStudentTemplateRequest,
            request::GenerateAssignmentsRepositoryRequest,
            request::DeployFromYamlRequest,

            response::DeploymentResponse,
            response::BulkAssignFailure,
            response::BulkAssignExamplesResponse,
            response::PendingChangeResponse,
            response::PendingChangesResponse,
            response::ContentDeploymentStatusResponse,
            response::DeploymentStatusSummaryResponse,
            response::GenerateWorkflowResponse,
            response::DeployWorkflowResponse,

            schema::ExecutionBackendConfig,
            schema::ExecutionBackendReference,
            schema::CourseContentTypeConfig,
            schema::CourseConfig,
            schema::CourseFamilyConfig,
            schema::OrganizationConfig,
            schema::UserDeployment,
            schema::AccountDeployment,
            schema::CourseMemberDeployment,
            schema::UserAccountDeployment,
            schema::DeploymentConfig,
        )
    ),
    tags(
        (name = "CourseContent", description = "Example assignment and student-template generation"),
        (name = "Deployment", description = "Hierarchy deployment from a deployment-config document"),
    ),
    modifiers(&SecurityAddon),
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "JWTBearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build(),
                ),
            );

            components.add_security_scheme(
                "AdminBasicAuth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Basic).build()),
            )
        }
    }
}

pub fn build() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/openapi.json", ApiDoc::openapi())
}
