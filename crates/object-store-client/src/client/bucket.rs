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

use chrono::Utc;
use reqwest::StatusCode;

use crate::{
    client::{ObjectStoreClient, sigv4},
    error::ClientError,
};

impl ObjectStoreClient {
    /// Creates a bucket if it does not already exist.
    pub async fn ensure_bucket_exists(&self, bucket: Option<&str>) -> Result<(), ClientError> {
        let bucket = self.bucket_or_default(bucket).to_string();
        match self.head_bucket(&bucket).await {
            Ok(()) => Ok(()),
            Err(ClientError::NotFound) => self.create_bucket(&bucket).await,
            Err(e) => Err(e),
        }
    }

    async fn head_bucket(&self, bucket: &str) -> Result<(), ClientError> {
        let host = self.endpoint.split_once("://").map(|(_, r)| r.to_string()).unwrap_or_default();
        let headers = sigv4::sign(
            &self.access_key,
            &self.secret_key,
            &self.region,
            "HEAD",
            &host,
            &format!("/{bucket}/"),
            "",
            &[],
            None,
            Utc::now(),
        )
        .headers;
        let url = format!("{}/{bucket}", self.endpoint.trim_end_matches('/'));
        let response = self.client.head(url).headers(headers).send().await?;

        match response.status() {
            StatusCode::OK => Ok(()),
            StatusCode::NOT_FOUND => Err(ClientError::NotFound),
            _ => Err(ClientError::from_xml_response(response).await),
        }
    }

    /// Creates a bucket.
    pub async fn create_bucket(&self, bucket: &str) -> Result<(), ClientError> {
        let host = self.endpoint.split_once("://").map(|(_, r)| r.to_string()).unwrap_or_default();
        let headers = sigv4::sign(
            &self.access_key,
            &self.secret_key,
            &self.region,
            "PUT",
            &host,
            &format!("/{bucket}/"),
            "",
            &[],
            None,
            Utc::now(),
        )
        .headers;
        let url = format!("{}/{bucket}", self.endpoint.trim_end_matches('/'));
        let response = self.client.put(url).headers(headers).send().await?;

        match response.status() {
            StatusCode::OK => Ok(()),
            _ => Err(ClientError::from_xml_response(response).await),
        }
    }

    /// Deletes a bucket. Fails if the bucket is not empty; this client never
    /// force-empties a bucket before deleting it.
    pub async fn delete_bucket(&self, bucket: &str) -> Result<(), ClientError> {
        let host = self.endpoint.split_once("://").map(|(_, r)| r.to_string()).unwrap_or_default();
        let headers = sigv4::sign(
            &self.access_key,
            &self.secret_key,
            &self.region,
            "DELETE",
            &host,
            &format!("/{bucket}/"),
            "",
            &[],
            None,
            Utc::now(),
        )
        .headers;
        let url = format!("{}/{bucket}", self.endpoint.trim_end_matches('/'));
        let response = self.client.delete(url).headers(headers).send().await?;

        match response.status() {
            StatusCode::NO_CONTENT => Ok(()),
            _ => Err(ClientError::from_xml_response(response).await),
        }
    }
}
