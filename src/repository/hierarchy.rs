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

use serde_json::Value;
use uuid::Uuid;

use crate::{
    database::Database,
    model::{Course, CourseContent, CourseContentType, CourseFamily, CourseGroup, CourseMember, ExecutionBackend, Organization},
};

pub struct OrganizationRepository;

impl OrganizationRepository {
    /// Idempotent create keyed by `path`, the fetch-or-create idiom every
    /// hierarchy-workflow activity uses.
    pub async fn find_or_create(db: &Database, path: &str, organization_type: &str) -> Result<Organization, sqlx::Error> {
        sqlx::query_as::<_, Organization>(
            "WITH inserted AS (
                INSERT INTO organizations (path, organization_type)
                VALUES ($1, $2)
                ON CONFLICT (path) DO NOTHING
                RETURNING *
            )
            SELECT * FROM inserted
            UNION ALL
            SELECT * FROM organizations WHERE path = $1 AND NOT EXISTS (SELECT 1 FROM inserted)",
        )
        .bind(path)
        .bind(organization_type)
        .fetch_one(db.pool())
        .await
    }

    pub async fn find_by_id(db: &Database, id: Uuid) -> Result<Option<Organization>, sqlx::Error> {
        sqlx::query_as::<_, Organization>("SELECT * FROM organizations WHERE id = $1").bind(id).fetch_optional(db.pool()).await
    }

    pub async fn update_properties(db: &Database, id: Uuid, version: i32, properties: Value) -> Result<Option<Organization>, sqlx::Error> {
        sqlx::query_as::<_, Organization>(
            "UPDATE organizations SET properties = $3, version = version + 1, updated_at = now()
             WHERE id = $1 AND version = $2 RETURNING *",
        )
        .bind(id)
        .bind(version)
        .bind(properties)
        .fetch_optional(db.pool())
        .await
    }
}

pub struct CourseFamilyRepository;

impl CourseFamilyRepository {
    pub async fn find_or_create(db: &Database, organization_id: Uuid, path: &str) -> Result<CourseFamily, sqlx::Error> {
        sqlx::query_as::<_, CourseFamily>(
            "WITH inserted AS (
                INSERT INTO course_families (organization_id, path)
                VALUES ($1, $2)
                ON CONFLICT (organization_id, path) DO NOTHING
                RETURNING *
            )
            SELECT * FROM inserted
            UNION ALL
            SELECT * FROM course_families WHERE organization_id = $1 AND path = $2 AND NOT EXISTS (SELECT 1 FROM inserted)",
        )
        .bind(organization_id)
        .bind(path)
        .fetch_one(db.pool())
        .await
    }

    pub async fn find_by_id(db: &Database, id: Uuid) -> Result<Option<CourseFamily>, sqlx::Error> {
        sqlx::query_as::<_, CourseFamily>("SELECT * FROM course_families WHERE id = $1").bind(id).fetch_optional(db.pool()).await
    }
}

pub struct CourseRepository;

impl CourseRepository {
    pub async fn find_or_create(
        db: &Database,
        course_family_id: Uuid,
        organization_id: Uuid,
        path: &str,
    ) -> Result<Course, sqlx::Error> {
        sqlx::query_as::<_, Course>(
            "WITH inserted AS (
                INSERT INTO courses (course_family_id, organization_id, path)
                VALUES ($1, $2, $3)
                ON CONFLICT (course_family_id, path) DO NOTHING
                RETURNING *
            )
            SELECT * FROM inserted
            UNION ALL
            SELECT * FROM courses WHERE course_family_id = $1 AND path = $3 AND NOT EXISTS (SELECT 1 FROM inserted)",
        )
        .bind(course_family_id)
        .bind(organization_id)
        .bind(path)
        .fetch_one(db.pool())
        .await
    }

    pub async fn find_by_id(db: &Database, id: Uuid) -> Result<Option<Course>, sqlx::Error> {
        sqlx::query_as::<_, Course>("SELECT * FROM courses WHERE id = $1").bind(id).fetch_optional(db.pool()).await
    }

    pub async fn update_properties(db: &Database, id: Uuid, version: i32, properties: Value) -> Result<Option<Course>, sqlx::Error> {
        sqlx::query_as::<_, Course>(
            "UPDATE courses SET properties = $3, version = version + 1, updated_at = now()
             WHERE id = $1 AND version = $2 RETURNING *",
        )
        .bind(id)
        .bind(version)
        .bind(properties)
        .fetch_optional(db.pool())
        .await
    }
}

pub struct CourseGroupRepository;

impl CourseGroupRepository {
    pub async fn find_or_create(db: &Database, course_id: Uuid, title: &str) -> Result<CourseGroup, sqlx::Error> {
        let existing = sqlx::query_as::<_, CourseGroup>("SELECT * FROM course_groups WHERE course_id = $1 AND title = $2")
            .bind(course_id)
            .bind(title)
            .fetch_optional(db.pool())
            .await?;
        if let Some(group) = existing {
            return Ok(group);
        }
        sqlx::query_as::<_, CourseGroup>("INSERT INTO course_groups (course_id, title) VALUES ($1, $2) RETURNING *")
            .bind(course_id)
            .bind(title)
            .fetch_one(db.pool())
            .await
    }
}

pub struct CourseMemberRepository;

impl CourseMemberRepository {
    pub async fn find_or_create(db: &Database, member: &CourseMember) -> Result<CourseMember, sqlx::Error> {
        let existing =
            sqlx::query_as::<_, CourseMember>("SELECT * FROM course_members WHERE user_id = $1 AND course_id = $2")
                .bind(&member.user_id)
                .bind(member.course_id)
                .fetch_optional(db.pool())
                .await?;
        if let Some(found) = existing {
            return Ok(found);
        }
        sqlx::query_as::<_, CourseMember>(
            "INSERT INTO course_members (id, user_id, course_id, course_group_id, course_role_id, properties)
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(member.id)
        .bind(&member.user_id)
        .bind(member.course_id)
        .bind(member.course_group_id)
        .bind(&member.course_role_id)
        .bind(&member.properties)
        .fetch_one(db.pool())
        .await
    }

    pub async fn find_by_course(db: &Database, course_id: Uuid) -> Result<Vec<CourseMember>, sqlx::Error> {
        sqlx::query_as::<_, CourseMember>("SELECT * FROM course_members WHERE course_id = $1")
            .bind(course_id)
            .fetch_all(db.pool())
            .await
    }
}

pub struct CourseContentTypeRepository;

impl CourseContentTypeRepository {
    pub async fn find_or_create(
        db: &Database,
        course_id: Uuid,
        slug: &str,
        kind: &str,
    ) -> Result<CourseContentType, sqlx::Error> {
        sqlx::query_as::<_, CourseContentType>(
            "WITH inserted AS (
                INSERT INTO course_content_types (course_id, slug, kind)
                VALUES ($1, $2, $3)
                ON CONFLICT (course_id, slug) DO NOTHING
                RETURNING *
            )
            SELECT * FROM inserted
            UNION ALL
            SELECT * FROM course_content_types WHERE course_id = $1 AND slug = $2 AND NOT EXISTS (SELECT 1 FROM inserted)",
        )
        .bind(course_id)
        .bind(slug)
        .bind(kind)
        .fetch_one(db.pool())
        .await
    }

    pub async fn find_by_id(db: &Database, id: Uuid) -> Result<Option<CourseContentType>, sqlx::Error> {
        sqlx::query_as::<_, CourseContentType>("SELECT * FROM course_content_types WHERE id = $1").bind(id).fetch_optional(db.pool()).await
    }
}

pub struct ExecutionBackendRepository;

impl ExecutionBackendRepository {
    pub async fn find_or_create(db: &Database, slug: &str, kind: &str) -> Result<ExecutionBackend, sqlx::Error> {
        sqlx::query_as::<_, ExecutionBackend>(
            "WITH inserted AS (
                INSERT INTO execution_backends (slug, kind)
                VALUES ($1, $2)
                ON CONFLICT (slug) DO NOTHING
                RETURNING *
            )
            SELECT * FROM inserted
            UNION ALL
            SELECT * FROM execution_backends WHERE slug = $1 AND NOT EXISTS (SELECT 1 FROM inserted)",
        )
        .bind(slug)
        .bind(kind)
        .fetch_one(db.pool())
        .await
    }

    pub async fn find_by_slug(db: &Database, slug: &str) -> Result<Option<ExecutionBackend>, sqlx::Error> {
        sqlx::query_as::<_, ExecutionBackend>("SELECT * FROM execution_backends WHERE slug = $1")
            .bind(slug)
            .fetch_optional(db.pool())
            .await
    }
}

pub struct CourseContentRepository;

impl CourseContentRepository {
    pub async fn find_by_id(db: &Database, id: Uuid) -> Result<Option<CourseContent>, sqlx::Error> {
        sqlx::query_as::<_, CourseContent>("SELECT * FROM course_contents WHERE id = $1").bind(id).fetch_optional(db.pool()).await
    }

    pub async fn find_by_course(db: &Database, course_id: Uuid) -> Result<Vec<CourseContent>, sqlx::Error> {
        sqlx::query_as::<_, CourseContent>("SELECT * FROM course_contents WHERE course_id = $1 ORDER BY path")
            .bind(course_id)
            .fetch_all(db.pool())
            .await
    }

    pub async fn set_execution_backend(
        db: &Database,
        id: Uuid,
        execution_backend_id: Uuid,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE course_contents SET execution_backend_id = $2, updated_at = now() WHERE id = $1")
            .bind(id)
            .bind(execution_backend_id)
            .execute(db.pool())
            .await?;
        Ok(())
    }
}
