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

use std::{cell::RefCell, collections::HashMap, sync::Arc};

use axum::{
    RequestPartsExt,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use jsonwebtoken::{
    Algorithm, DecodingKey, Validation, decode,
    jwk::{AlgorithmParameters, Jwk},
};
use thiserror::Error;
use tokio::sync::{OnceCell, RwLock};
use tracing::{debug, error};

use crate::{auth::claims::Claims, context::Context, errors::AutoIntoResponse, repository::UserRepository};

/// Global cached JWK decoding keys, refreshed on `kid` cache miss.
static KEYS: OnceCell<Arc<RwLock<HashMap<String, DecodingKey>>>> = OnceCell::const_new();

async fn load_keys(ctx: &Context) -> Result<HashMap<String, DecodingKey>, ClaimsError> {
    let keys = UserRepository::find_all_json_web_keys(&ctx.database).await.map_err(|e| {
        error!("Failed to load JSON web keys: {}", e);
        ClaimsError::KeyLoadFailure
    })?;

    let mut map = HashMap::new();
    for key in keys {
        let jwk: Jwk = serde_json::from_str(&key.public_key).map_err(|_| ClaimsError::InvalidKeyFormat)?;
        if let AlgorithmParameters::RSA(rsa) = jwk.algorithm {
            let decoded =
                DecodingKey::from_rsa_components(&rsa.n, &rsa.e).map_err(|_| ClaimsError::InvalidKeyFormat)?;
            map.insert(key.id, decoded);
        }
    }
    Ok(map)
}

async fn get_keys() -> &'static Arc<RwLock<HashMap<String, DecodingKey>>> {
    KEYS.get_or_init(|| async { Arc::new(RwLock::new(HashMap::new())) }).await
}

pub async fn refresh_keys(ctx: Arc<Context>) -> Result<(), ClaimsError> {
    let keys = load_keys(&ctx).await?;
    *get_keys().await.write().await = keys;
    Ok(())
}

/// JWT payload shape issued by the identity provider.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct TokenClaims {
    sub: String,
    #[serde(default)]
    roles: Vec<String>,
    #[serde(default)]
    permissions: Vec<String>,
}

/// An authenticated caller: roles, claims, and admin status derived from a
/// verified JWT. Permission checks are memoized for the lifetime of this
/// value (one request), not across requests — there is no cross-request
/// principal cache in this deployment shape.
#[derive(Debug)]
pub struct Principal {
    pub user_id: String,
    pub is_admin: bool,
    pub roles: Vec<String>,
    pub claims: Claims,
    memo: RefCell<HashMap<(String, String, Option<String>), bool>>,
}

impl Principal {
    fn new(user_id: String, roles: Vec<String>, claims: Claims) -> Self {
        let is_admin = roles.iter().any(|r| r.ends_with("_admin"));
        Principal { user_id, is_admin, roles, claims, memo: RefCell::new(HashMap::new()) }
    }

    #[cfg(test)]
    pub(crate) fn new_for_test(user_id: &str, roles: Vec<String>, claims: Claims) -> Self {
        Principal::new(user_id.to_string(), roles, claims)
    }

    /// Evaluates (and memoizes) whether this principal may perform `action`
    /// on `resource`, optionally scoped to `resource_id`.
    pub fn can(&self, resource: &str, action: &str, resource_id: Option<&str>) -> bool {
        if self.is_admin {
            return true;
        }
        let key = (resource.to_string(), action.to_string(), resource_id.map(str::to_string));
        if let Some(&cached) = self.memo.borrow().get(&key) {
            return cached;
        }
        let allowed = self.claims.has_general_permission(resource, action)
            || resource_id.is_some_and(|id| self.claims.has_dependent_permission(resource, id, action));
        self.memo.borrow_mut().insert(key, allowed);
        allowed
    }
}

impl FromRequestParts<Arc<Context>> for Principal {
    type Rejection = ClaimsError;

    async fn from_request_parts(parts: &mut Parts, ctx: &Arc<Context>) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            parts.extract::<TypedHeader<Authorization<Bearer>>>().await.map_err(|_| ClaimsError::TokenNotFound)?;

        let header = jsonwebtoken::decode_header(bearer.token()).map_err(|_| ClaimsError::TokenParseError)?;
        let kid = header.kid.ok_or(ClaimsError::MissingKeyId)?;

        let keys = get_keys().await;
        let token = if let Some(decoding_key) = keys.read().await.get(&kid) {
            validate_token(bearer.token(), decoding_key)?
        } else {
            refresh_keys(ctx.clone()).await.map_err(|_| ClaimsError::KeyRefreshFailed)?;
            let decoding_key = keys.read().await.get(&kid).cloned().ok_or_else(|| ClaimsError::KeyNotFound(kid))?;
            validate_token(bearer.token(), &decoding_key)?
        };

        build_principal(ctx, token).await
    }
}

fn validate_token(token: &str, decoding_key: &DecodingKey) -> Result<TokenClaims, ClaimsError> {
    let mut validation = Validation::new(Algorithm::RS256);
    validation.set_issuer(&["coursectl"]);
    validation.set_audience(&["coursectl"]);

    let token_data = decode::<TokenClaims>(token, decoding_key, &validation).map_err(|e| {
        debug!("Failed to decode token: {}", e);
        ClaimsError::InvalidToken
    })?;
    Ok(token_data.claims)
}

/// Joins `UserRole -> Role -> RoleClaim` plus per-course `CourseMember` rows
/// into a `Principal`. Default read-only claims for course content kinds and
/// course roles are granted unconditionally; principals holding
/// `_maintainer`/`_owner`/`_lecturer` in any course additionally receive
/// implicit general claims for authoring assignments and example transfer.
async fn build_principal(ctx: &Arc<Context>, token: TokenClaims) -> Result<Principal, ClaimsError> {
    let mut claims = Claims::parse(token.permissions.iter().map(String::as_str));
    claims.add_general("course_content_kind", "get");
    claims.add_general("course_content_kind", "list");
    claims.add_general("course_role", "get");
    claims.add_general("course_role", "list");

    let memberships = UserRepository::find_course_memberships(&ctx.database, &token.sub)
        .await
        .map_err(|_| ClaimsError::KeyLoadFailure)?;

    for membership in &memberships {
        claims.add(&format!("course:{}:{}", membership.course_role_id, membership.course_id));
        if matches!(membership.course_role_id.as_str(), "_maintainer" | "_owner" | "_lecturer") {
            claims.add_general("example", "create");
            claims.add_general("example", "upload");
            claims.add_general("example", "download");
            claims.add_general("course_content", "assign_example");
        }
    }

    Ok(Principal::new(token.sub, token.roles, claims))
}

#[derive(Debug, Error)]
pub enum ClaimsError {
    #[error("Token not found")]
    TokenNotFound,
    #[error("Failed to parse token")]
    TokenParseError,
    #[error("Token missing key ID")]
    MissingKeyId,
    #[error("Key not found for ID: {0}")]
    KeyNotFound(String),
    #[error("Invalid token")]
    InvalidToken,
    #[error("Invalid key format")]
    InvalidKeyFormat,
    #[error("Failed to load keys")]
    KeyLoadFailure,
    #[error("Failed to refresh keys")]
    KeyRefreshFailed,
}

impl From<&ClaimsError> for StatusCode {
    fn from(val: &ClaimsError) -> Self {
        match val {
            ClaimsError::TokenNotFound
            | ClaimsError::TokenParseError
            | ClaimsError::MissingKeyId
            | ClaimsError::KeyNotFound(_)
            | ClaimsError::InvalidToken
            | ClaimsError::InvalidKeyFormat => StatusCode::UNAUTHORIZED,
            ClaimsError::KeyLoadFailure | ClaimsError::KeyRefreshFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ClaimsError {
    fn into_response(self) -> Response {
        AutoIntoResponse::into(&self)
    }
}
