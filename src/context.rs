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

use git_hosting_client::GiteaClient;
use object_store_client::ObjectStoreClient;

use crate::{auth::permissions, config::Config, database::Database, errors::Result, workflow::WorkflowRuntime};

/// The core type through which handler functions can access common API state.
pub struct Context {
    /// Application configuration settings
    pub config: Config,

    /// Database connection pool and operations
    pub database: Database,

    /// Client for interacting with the Git hosting API
    pub git: GiteaClient,

    /// Client for interacting with the S3-compatible object store
    pub object_store: ObjectStoreClient,

    /// In-process workflow runtime adapter (C5)
    pub workflow: WorkflowRuntime,

    /// Permission-handler registry (C2), built once and shared read-only
    pub permissions: permissions::Registry,
}

impl Context {
    pub async fn new(config: Config) -> Result<Context> {
        let database = Database::new(&config.database_url).await?;
        let git = GiteaClient::new(
            config.git_server_endpoint.clone(),
            config.git_server_username.clone(),
            config.git_server_password.clone(),
        );
        let object_store = ObjectStoreClient::new(
            config.object_store_endpoint.clone(),
            config.object_store_region.clone(),
            config.object_store_access_key.clone(),
            config.object_store_secret_key.clone(),
            config.object_store_default_bucket.clone(),
        );
        let workflow = WorkflowRuntime::new(config.workflow_task_queue_namespace.clone());
        let permissions = permissions::registry();

        Ok(Context { config, database, git, object_store, workflow, permissions })
    }
}
