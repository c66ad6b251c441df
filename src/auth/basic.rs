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
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
    RequestPartsExt,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Basic},
};
use thiserror::Error;

use crate::{context::Context, errors::AutoIntoResponse, utils::crypto};

/// Verifies the admin/service-account credential used by `/deploy/*` and
/// webhook-originated requests that carry HTTP Basic auth instead of a JWT.
pub struct AdminBasic;

impl FromRequestParts<Arc<Context>> for AdminBasic {
    type Rejection = BasicAuthError;

    async fn from_request_parts(parts: &mut Parts, ctx: &Arc<Context>) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(basic)) =
            parts.extract::<TypedHeader<Authorization<Basic>>>().await.map_err(|_| BasicAuthError::MissingHeader)?;

        if basic.username() != "admin" {
            return Err(BasicAuthError::InvalidCredentials);
        }

        let valid = crypto::hmac_sha256_verify("admin", &ctx.config.auth_secret, basic.password())
            .map_err(|_| BasicAuthError::InvalidCredentials)?;
        if !valid {
            return Err(BasicAuthError::InvalidCredentials);
        }

        Ok(AdminBasic)
    }
}

#[derive(Debug, Error)]
pub enum BasicAuthError {
    #[error("Missing Basic authentication header")]
    MissingHeader,
    #[error("Invalid credentials")]
    InvalidCredentials,
}

impl From<&BasicAuthError> for StatusCode {
    fn from(val: &BasicAuthError) -> Self {
        match val {
            BasicAuthError::MissingHeader | BasicAuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for BasicAuthError {
    fn into_response(self) -> Response {
        AutoIntoResponse::into(&self)
    }
}
