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

use axum::{Json, extract::{Multipart, State}, http::StatusCode, response::IntoResponse};

use crate::{
    auth::AdminBasic,
    context::Context,
    errors::{ApiError, Result},
    response::DeployWorkflowResponse,
    schema::DeploymentConfig,
    service::hierarchy,
};

/// Reconcile organizations, course families, courses and their fixed
/// per-course repositories from a [`DeploymentConfig`] document. Runs in the
/// background; the returned id tracks the reconciliation run.
#[utoipa::path(
    operation_id = "deploy-from-config",
    post, path = "/v1/deploy/from-config",
    request_body(content = DeploymentConfig, description = "Hierarchy to reconcile", content_type = "application/json"),
    responses(
        (status = 202, description = "Reconciliation started", body = DeployWorkflowResponse),
    ),
    security(("AdminBasicAuth" = [])),
    tag = "Deployment"
)]
pub async fn deploy_from_config(
    State(ctx): State<Arc<Context>>,
    _admin: AdminBasic,
    Json(config): Json<DeploymentConfig>,
) -> Result<impl IntoResponse> {
    let workflow_id = hierarchy::deploy_from_config(ctx, config).await?;
    Ok((StatusCode::ACCEPTED, Json(DeployWorkflowResponse::started(workflow_id))))
}

/// Same reconciliation as [`deploy_from_config`], taking the deployment-config
/// document as an uploaded YAML file instead of a JSON body.
#[utoipa::path(
    operation_id = "deploy-from-yaml",
    post, path = "/v1/deploy/from-yaml",
    request_body(content = crate::request::DeployFromYamlRequest, description = "Deployment-config YAML file", content_type = "multipart/form-data"),
    responses(
        (status = 202, description = "Reconciliation started", body = DeployWorkflowResponse),
        (status = 400, description = "Missing or unreadable file part"),
    ),
    security(("AdminBasicAuth" = [])),
    tag = "Deployment"
)]
pub async fn deploy_from_yaml(State(ctx): State<Arc<Context>>, _admin: AdminBasic, mut multipart: Multipart) -> Result<impl IntoResponse> {
    let mut yaml = None;
    while let Some(field) = multipart.next_field().await.map_err(|e| ApiError::BadRequest(e.to_string()))? {
        if field.name() == Some("file") {
            let bytes = field.bytes().await.map_err(|e| ApiError::BadRequest(e.to_string()))?;
            yaml = Some(String::from_utf8(bytes.to_vec()).map_err(|e| ApiError::BadRequest(e.to_string()))?);
        }
    }
    let yaml = yaml.ok_or_else(|| ApiError::BadRequest("missing `file` part".to_string()))?;
    let workflow_id = hierarchy::deploy_from_yaml(ctx, &yaml).await?;
    Ok((StatusCode::ACCEPTED, Json(DeployWorkflowResponse::started(workflow_id))))
}
