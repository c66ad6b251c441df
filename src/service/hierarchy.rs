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

//! Thin submission layer over the hierarchy-deployment workflow (C7):
//! resolves a `DeploymentConfig`, then hands it to the workflow runtime and
//! returns the run id. The reconciliation itself lives in
//! `workflow::hierarchy`.

use std::{str::FromStr, sync::Arc};

use crate::{
    context::Context,
    errors::{ApiError, Result},
    schema::DeploymentConfig,
    workflow,
};

pub async fn deploy_from_config(ctx: Arc<Context>, config: DeploymentConfig) -> Result<String> {
    let parameters = serde_json::to_value(&config).map_err(ApiError::SerializationError)?;
    let run_ctx = ctx.clone();
    let workflow_id = ctx
        .workflow
        .submit(&ctx.database, "deploy-hierarchy", parameters, move |_run_id, cancellation| {
            workflow::hierarchy::run(run_ctx, cancellation, config)
        })
        .await?;
    Ok(workflow_id)
}

pub async fn deploy_from_yaml(ctx: Arc<Context>, yaml: &str) -> Result<String> {
    let config = DeploymentConfig::from_str(yaml)?;
    deploy_from_config(ctx, config).await
}
