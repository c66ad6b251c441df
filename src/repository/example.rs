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

use uuid::Uuid;

use crate::{
    database::Database,
    model::{Example, ExampleDependency, ExampleRepository as ExampleRepositoryModel, ExampleVersion},
};

pub struct ExampleRepositoryRepository;

impl ExampleRepositoryRepository {
    pub async fn find_by_id(db: &Database, id: Uuid) -> Result<Option<ExampleRepositoryModel>, sqlx::Error> {
        sqlx::query_as::<_, ExampleRepositoryModel>("SELECT * FROM example_repositories WHERE id = $1")
            .bind(id)
            .fetch_optional(db.pool())
            .await
    }

    pub async fn find_or_create(db: &Database, source_type: &str, source_url: &str) -> Result<ExampleRepositoryModel, sqlx::Error> {
        let existing =
            sqlx::query_as::<_, ExampleRepositoryModel>("SELECT * FROM example_repositories WHERE source_url = $1")
                .bind(source_url)
                .fetch_optional(db.pool())
                .await?;
        if let Some(found) = existing {
            return Ok(found);
        }
        sqlx::query_as::<_, ExampleRepositoryModel>(
            "INSERT INTO example_repositories (source_type, source_url) VALUES ($1, $2) RETURNING *",
        )
        .bind(source_type)
        .bind(source_url)
        .fetch_one(db.pool())
        .await
    }
}

pub struct ExampleRepositoryQueries;

impl ExampleRepositoryQueries {
    pub async fn find_by_id(db: &Database, id: Uuid) -> Result<Option<Example>, sqlx::Error> {
        sqlx::query_as::<_, Example>("SELECT * FROM examples WHERE id = $1").bind(id).fetch_optional(db.pool()).await
    }

    pub async fn find_by_identifier(db: &Database, repository_id: Uuid, identifier: &str) -> Result<Option<Example>, sqlx::Error> {
        sqlx::query_as::<_, Example>("SELECT * FROM examples WHERE repository_id = $1 AND identifier = $2")
            .bind(repository_id)
            .bind(identifier)
            .fetch_optional(db.pool())
            .await
    }

    pub async fn search(db: &Database, subject: Option<&str>, category: Option<&str>) -> Result<Vec<Example>, sqlx::Error> {
        sqlx::query_as::<_, Example>(
            "SELECT * FROM examples
             WHERE ($1::text IS NULL OR subject = $1) AND ($2::text IS NULL OR category = $2)
             ORDER BY title",
        )
        .bind(subject)
        .bind(category)
        .fetch_all(db.pool())
        .await
    }
}

pub struct ExampleVersionRepository;

impl ExampleVersionRepository {
    pub async fn find_by_id(db: &Database, id: Uuid) -> Result<Option<ExampleVersion>, sqlx::Error> {
        sqlx::query_as::<_, ExampleVersion>("SELECT * FROM example_versions WHERE id = $1").bind(id).fetch_optional(db.pool()).await
    }

    pub async fn find_latest(db: &Database, example_id: Uuid) -> Result<Option<ExampleVersion>, sqlx::Error> {
        sqlx::query_as::<_, ExampleVersion>(
            "SELECT * FROM example_versions WHERE example_id = $1 ORDER BY version_number DESC LIMIT 1",
        )
        .bind(example_id)
        .fetch_optional(db.pool())
        .await
    }

    pub async fn find_by_tag(db: &Database, example_id: Uuid, tag: &str) -> Result<Option<ExampleVersion>, sqlx::Error> {
        sqlx::query_as::<_, ExampleVersion>("SELECT * FROM example_versions WHERE example_id = $1 AND version_tag = $2")
            .bind(example_id)
            .bind(tag)
            .fetch_optional(db.pool())
            .await
    }

    pub async fn list(db: &Database, example_id: Uuid) -> Result<Vec<ExampleVersion>, sqlx::Error> {
        sqlx::query_as::<_, ExampleVersion>("SELECT * FROM example_versions WHERE example_id = $1 ORDER BY version_number")
            .bind(example_id)
            .fetch_all(db.pool())
            .await
    }
}

pub struct ExampleDependencyRepository;

impl ExampleDependencyRepository {
    pub async fn list_for(db: &Database, example_id: Uuid) -> Result<Vec<ExampleDependency>, sqlx::Error> {
        sqlx::query_as::<_, ExampleDependency>("SELECT * FROM example_dependencies WHERE example_id = $1")
            .bind(example_id)
            .fetch_all(db.pool())
            .await
    }
}
