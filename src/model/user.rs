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

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: String,
    pub user_type: String,
    pub token_expiration: Option<DateTime<Utc>>,
    pub name: String,
    pub email: String,
    pub email_verified: bool,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
pub struct Account {
    pub id: Uuid,
    pub user_id: String,
    pub provider: String,
    pub account_type: String,
    pub provider_account_id: String,
    pub created_at: DateTime<Utc>,
}

/// A public/private keypair for signing and verifying JWTs, stored as the
/// serialized JWK the identity provider publishes under this `id` (`kid`).
#[derive(Debug, Clone, FromRow)]
pub struct JsonWebKey {
    pub id: String,
    pub public_key: String,
    pub private_key: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
pub struct Role {
    pub id: String,
    pub builtin: bool,
}

#[derive(Debug, FromRow)]
pub struct RoleClaim {
    pub id: Uuid,
    pub role_id: String,
    pub claim_type: String,
    pub claim_value: String,
}
