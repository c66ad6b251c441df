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
    types::{ObjectMetadata, ObjectSummary},
};

impl ObjectStoreClient {
    fn host(&self) -> String {
        self.endpoint
            .split_once("://")
            .map(|(_, rest)| rest.to_string())
            .unwrap_or_else(|| self.endpoint.clone())
    }

    fn url(&self, bucket: &str, key: &str) -> String {
        format!("{}/{bucket}/{key}", self.endpoint.trim_end_matches('/'))
    }

    fn signed_headers(
        &self,
        method: &str,
        bucket: &str,
        key: &str,
        query: &str,
        payload_hash: Option<&str>,
    ) -> reqwest::header::HeaderMap {
        let uri = format!("/{bucket}/{key}");
        sigv4::sign(
            &self.access_key,
            &self.secret_key,
            &self.region,
            method,
            &self.host(),
            &uri,
            query,
            &[],
            payload_hash,
            Utc::now(),
        )
        .headers
    }

    /// Uploads an object, overwriting any existing object at the same key.
    pub async fn put_object(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: Option<&str>,
        bucket: Option<&str>,
    ) -> Result<ObjectMetadata, ClientError> {
        let bucket = self.bucket_or_default(bucket).to_string();
        let headers = self.signed_headers("PUT", &bucket, key, "", None);
        let mut request = self.client.put(self.url(&bucket, key)).headers(headers).body(data);
        if let Some(content_type) = content_type {
            request = request.header(reqwest::header::CONTENT_TYPE, content_type);
        }
        let response = request.send().await?;

        match response.status() {
            StatusCode::OK => self.get_object_info(key, Some(&bucket)).await,
            _ => Err(ClientError::from_xml_response(response).await),
        }
    }

    /// Downloads the full contents of an object.
    pub async fn download_file(&self, key: &str, bucket: Option<&str>) -> Result<Vec<u8>, ClientError> {
        let bucket = self.bucket_or_default(bucket).to_string();
        let headers = self.signed_headers("GET", &bucket, key, "", None);
        let response = self.client.get(self.url(&bucket, key)).headers(headers).send().await?;

        match response.status() {
            StatusCode::OK => Ok(response.bytes().await?.to_vec()),
            StatusCode::NOT_FOUND => Err(ClientError::NotFound),
            _ => Err(ClientError::from_xml_response(response).await),
        }
    }

    /// Deletes an object. Deleting a missing key is not an error.
    pub async fn delete_file(&self, key: &str, bucket: Option<&str>) -> Result<(), ClientError> {
        let bucket = self.bucket_or_default(bucket).to_string();
        let headers = self.signed_headers("DELETE", &bucket, key, "", None);
        let response = self.client.delete(self.url(&bucket, key)).headers(headers).send().await?;

        match response.status() {
            StatusCode::NO_CONTENT | StatusCode::NOT_FOUND => Ok(()),
            _ => Err(ClientError::from_xml_response(response).await),
        }
    }

    /// Returns metadata for a single object via a HEAD request.
    pub async fn get_object_info(
        &self,
        key: &str,
        bucket: Option<&str>,
    ) -> Result<ObjectMetadata, ClientError> {
        let bucket = self.bucket_or_default(bucket).to_string();
        let headers = self.signed_headers("HEAD", &bucket, key, "", None);
        let response = self.client.head(self.url(&bucket, key)).headers(headers).send().await?;

        match response.status() {
            StatusCode::OK => {
                let size = response
                    .headers()
                    .get(reqwest::header::CONTENT_LENGTH)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(0);
                let etag = response
                    .headers()
                    .get(reqwest::header::ETAG)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .trim_matches('"')
                    .to_string();
                let content_type = response
                    .headers()
                    .get(reqwest::header::CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);
                Ok(ObjectMetadata { size, etag, content_type, last_modified: Utc::now() })
            }
            StatusCode::NOT_FOUND => Err(ClientError::NotFound),
            _ => Err(ClientError::from_xml_response(response).await),
        }
    }

    /// Lists every object under `prefix` (non-recursive pagination is handled
    /// internally; callers always get the full listing).
    pub async fn list_objects(
        &self,
        prefix: &str,
        bucket: Option<&str>,
    ) -> Result<Vec<ObjectSummary>, ClientError> {
        let bucket = self.bucket_or_default(bucket).to_string();
        let mut results = Vec::new();
        let mut continuation_token: Option<String> = None;

        loop {
            let mut query_pairs = vec![
                ("list-type".to_string(), "2".to_string()),
                ("prefix".to_string(), prefix.to_string()),
            ];
            if let Some(token) = &continuation_token {
                query_pairs.push(("continuation-token".to_string(), token.clone()));
            }
            query_pairs.sort();
            let canonical_query = query_pairs
                .iter()
                .map(|(k, v)| format!("{}={}", urlencode(k), urlencode(v)))
                .collect::<Vec<_>>()
                .join("&");

            let headers = self.signed_headers("GET", &bucket, "", &canonical_query, None);
            let url = format!(
                "{}/{bucket}?list-type=2&prefix={}{}",
                self.endpoint.trim_end_matches('/'),
                urlencode(prefix),
                continuation_token
                    .as_ref()
                    .map(|t| format!("&continuation-token={}", urlencode(t)))
                    .unwrap_or_default()
            );
            let response = self.client.get(url).headers(headers).send().await?;

            if response.status() != StatusCode::OK {
                return Err(ClientError::from_xml_response(response).await);
            }

            let body = response.text().await?;
            results.extend(parse_list_objects(&body));

            continuation_token = extract_tag(&body, "NextContinuationToken");
            if continuation_token.is_none() {
                break;
            }
        }

        Ok(results)
    }

    /// Server-side copies an object within (or across) buckets.
    pub async fn copy_object(
        &self,
        source_key: &str,
        dest_key: &str,
        source_bucket: Option<&str>,
        dest_bucket: Option<&str>,
    ) -> Result<(), ClientError> {
        let source_bucket = self.bucket_or_default(source_bucket).to_string();
        let dest_bucket = self.bucket_or_default(dest_bucket).to_string();
        let copy_source = format!("/{source_bucket}/{source_key}");

        let uri = format!("/{dest_bucket}/{dest_key}");
        let extra = [("x-amz-copy-source", copy_source.clone())];
        let headers = sigv4::sign(
            &self.access_key,
            &self.secret_key,
            &self.region,
            "PUT",
            &self.host(),
            &uri,
            "",
            &extra,
            None,
            Utc::now(),
        )
        .headers;

        let response = self
            .client
            .put(self.url(&dest_bucket, dest_key))
            .headers(headers)
            .header("x-amz-copy-source", copy_source)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(()),
            _ => Err(ClientError::from_xml_response(response).await),
        }
    }

    /// Builds a presigned URL for a GET or PUT, valid for `expiry_seconds`.
    ///
    /// Uses SigV4 query-string signing (`X-Amz-Signature` as a query
    /// parameter) rather than a header, since the URL is handed to a
    /// third party that makes the request itself.
    pub fn generate_presigned_url(
        &self,
        key: &str,
        method: &str,
        expiry_seconds: u64,
        bucket: Option<&str>,
    ) -> Result<String, ClientError> {
        if method != "GET" && method != "PUT" {
            return Err(ClientError::BadRequest(format!("unsupported presign method: {method}")));
        }
        let bucket = self.bucket_or_default(bucket).to_string();
        let now = Utc::now();
        let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();
        let date_stamp = now.format("%Y%m%d").to_string();
        let credential = format!("{}/{date_stamp}/{}/s3/aws4_request", self.access_key, self.region);

        let mut query = vec![
            ("X-Amz-Algorithm".to_string(), "AWS4-HMAC-SHA256".to_string()),
            ("X-Amz-Credential".to_string(), credential),
            ("X-Amz-Date".to_string(), amz_date),
            ("X-Amz-Expires".to_string(), expiry_seconds.to_string()),
            ("X-Amz-SignedHeaders".to_string(), "host".to_string()),
        ];
        query.sort();
        let canonical_query =
            query.iter().map(|(k, v)| format!("{}={}", urlencode(k), urlencode(v))).collect::<Vec<_>>().join("&");

        let signed = sigv4::sign(
            &self.access_key,
            &self.secret_key,
            &self.region,
            method,
            &self.host(),
            &format!("/{bucket}/{key}"),
            &canonical_query,
            &[],
            Some("UNSIGNED-PAYLOAD"),
            now,
        );
        let signature = signed
            .headers
            .get(reqwest::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.rsplit("Signature=").next())
            .unwrap_or_default();

        Ok(format!(
            "{}/{bucket}/{key}?{canonical_query}&X-Amz-Signature={signature}",
            self.endpoint.trim_end_matches('/')
        ))
    }
}

fn urlencode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

fn extract_tag(body: &str, tag: &str) -> Option<String> {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");
    let start = body.find(&open)? + open.len();
    let end = body[start..].find(&close)? + start;
    Some(body[start..end].to_string())
}

fn parse_list_objects(body: &str) -> Vec<ObjectSummary> {
    body.split("<Contents>")
        .skip(1)
        .filter_map(|chunk| {
            let chunk = chunk.split("</Contents>").next()?;
            let key = extract_tag(chunk, "Key")?;
            let size = extract_tag(chunk, "Size")?.parse().unwrap_or(0);
            let etag = extract_tag(chunk, "ETag").unwrap_or_default().trim_matches('"').to_string();
            let last_modified = extract_tag(chunk, "LastModified")
                .and_then(|v| chrono::DateTime::parse_from_rfc3339(&v).ok())
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(Utc::now);
            Some(ObjectSummary { key, size, etag, last_modified })
        })
        .collect()
}
