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

// The configuration parameters for the application.
// These can either be passed on the command line, or pulled from environment variables.
// The latter is preferred as environment variables are one of the recommended ways to
// get configuration from Kubernetes Secrets in deployment.
//
// For development convenience, these can also be read from a `.env` file in the working
// directory where the application is started.
//
// See `.env.example` in the repository root for details.

#[derive(Clone, clap::Parser)]
pub struct Config {
    /// The Server port.
    #[clap(long, env, default_value = "8080")]
    pub port: u16,

    /// Database connection URL.
    #[clap(long, env)]
    pub database_url: String,

    /// Allowed CORS origin.
    #[clap(long, env, value_delimiter = ',')]
    pub allowed_origin: Option<Vec<String>>,

    /// Git hosting API endpoint (Gitea-compatible).
    #[clap(long, env)]
    pub git_server_endpoint: String,

    /// Git hosting API username.
    #[clap(long, env)]
    pub git_server_username: String,

    /// Git hosting API password or token.
    #[clap(long, env)]
    pub git_server_password: String,

    /// S3-compatible object store endpoint.
    #[clap(long, env)]
    pub object_store_endpoint: String,

    /// Object store region.
    #[clap(long, env, default_value = "us-east-1")]
    pub object_store_region: String,

    /// Object store access key.
    #[clap(long, env)]
    pub object_store_access_key: String,

    /// Object store secret key.
    #[clap(long, env)]
    pub object_store_secret_key: String,

    /// Default bucket for example storage.
    #[clap(long, env)]
    pub object_store_default_bucket: String,

    /// Task-queue namespace used when submitting workflows.
    #[clap(long, env, default_value = "default")]
    pub workflow_task_queue_namespace: String,

    /// HMAC secret for admin Basic auth and webhook signature verification.
    #[clap(long, env)]
    pub auth_secret: String,

    /// Commit author email used for system-generated commits.
    #[clap(long, env, default_value = "system@coursectl.local")]
    pub system_git_email: String,

    /// Commit author name used for system-generated commits.
    #[clap(long, env, default_value = "coursectl")]
    pub system_git_name: String,
}
