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

use crate::{
    database::Database,
    model::{CourseMember, JsonWebKey, UserModel},
};

pub struct UserRepository;

impl UserRepository {
    pub async fn find_all_json_web_keys(db: &Database) -> Result<Vec<JsonWebKey>, sqlx::Error> {
        sqlx::query_as::<_, JsonWebKey>("SELECT * FROM json_web_keys ORDER BY created_at DESC")
            .fetch_all(db.pool())
            .await
    }

    pub async fn find_by_id(db: &Database, user_id: &str) -> Result<Option<UserModel>, sqlx::Error> {
        sqlx::query_as::<_, UserModel>("SELECT * FROM users WHERE id = $1").bind(user_id).fetch_optional(db.pool()).await
    }

    pub async fn find_by_email(db: &Database, email: &str) -> Result<Option<UserModel>, sqlx::Error> {
        sqlx::query_as::<_, UserModel>("SELECT * FROM users WHERE email = $1").bind(email).fetch_optional(db.pool()).await
    }

    /// Fetch-or-create by email, the idiom used throughout activities that
    /// reconcile against an external natural key.
    pub async fn find_or_create(db: &Database, id: &str, name: &str, email: &str) -> Result<UserModel, sqlx::Error> {
        sqlx::query_as::<_, UserModel>(
            "WITH inserted AS (
                INSERT INTO users (id, name, email)
                VALUES ($1, $2, $3)
                ON CONFLICT (email) DO NOTHING
                RETURNING *
            )
            SELECT * FROM inserted
            UNION ALL
            SELECT * FROM users WHERE email = $3 AND NOT EXISTS (SELECT 1 FROM inserted)",
        )
        .bind(id)
        .bind(name)
        .bind(email)
        .fetch_one(db.pool())
        .await
    }

    /// All `CourseMember` rows for a user, used to derive implicit
    /// course-scoped claims when a `Principal` is constructed.
    pub async fn find_course_memberships(db: &Database, user_id: &str) -> Result<Vec<CourseMember>, sqlx::Error> {
        sqlx::query_as::<_, CourseMember>("SELECT * FROM course_members WHERE user_id = $1")
            .bind(user_id)
            .fetch_all(db.pool())
            .await
    }
}
