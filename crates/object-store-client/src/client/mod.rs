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

pub mod bucket;
pub mod object;
mod sigv4;

use reqwest::Client;

/// A client for an S3-compatible object store (tested against MinIO).
///
/// Every request is signed with AWS Signature Version 4 so the same client
/// works unmodified against MinIO, real S3, or any other S3-compatible
/// endpoint the deployment points it at.
pub struct ObjectStoreClient {
    pub(crate) client: Client,
    pub(crate) endpoint: String,
    pub(crate) region: String,
    pub(crate) access_key: String,
    pub(crate) secret_key: String,
    pub(crate) default_bucket: String,
}

impl ObjectStoreClient {
    /// Creates a new `ObjectStoreClient`.
    ///
    /// `endpoint` must include the scheme, e.g. `https://minio.internal:9000`.
    pub fn new(
        endpoint: String,
        region: String,
        access_key: String,
        secret_key: String,
        default_bucket: String,
    ) -> Self {
        Self { client: Client::new(), endpoint, region, access_key, secret_key, default_bucket }
    }

    pub(crate) fn bucket_or_default<'a>(&'a self, bucket: Option<&'a str>) -> &'a str {
        bucket.unwrap_or(&self.default_bucket)
    }
}
