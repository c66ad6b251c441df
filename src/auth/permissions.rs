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

use std::collections::HashMap;

use crate::auth::{
    claims::{allowed_roles, course_role_hierarchy},
    principal::Principal,
};

/// The result of a permission check against a course-scoped entity: either
/// unrestricted access (admin or general claim), or the list of course ids
/// the principal may act on, empty meaning none.
#[derive(Debug, Clone)]
pub enum Scope {
    Unrestricted,
    Courses(Vec<String>),
    Own(String),
    None,
}

/// One entry per protected entity class. Dispatched by `match` rather than
/// trait-object inheritance: the handler families below are the only
/// behaviors this system needs, and a closed enum keeps the registry a
/// plain value instead of a dynamic-dispatch graph.
#[derive(Debug, Clone, Copy)]
pub enum PermissionHandler {
    /// Allow when the principal holds the general claim for the resource.
    Generic,
    /// Allow when the target is the principal, or the principal is at least
    /// `_tutor` in a course containing the target.
    SelfOrTutor,
    /// `get`/`list` require `_student`; `create`/`update` require
    /// `_maintainer`. Students additionally see their own membership/group.
    CourseScoped,
    /// Tutors (and above) see all results in their courses; students see
    /// only their own.
    ResultScoped,
    /// `list`/`get` open to any authenticated principal; writes require an
    /// explicit claim.
    ReadOnly,
}

pub type Registry = HashMap<&'static str, PermissionHandler>;

/// Built once in `Context::new`, not as a module-load-time global.
pub fn registry() -> Registry {
    HashMap::from([
        ("user", PermissionHandler::SelfOrTutor),
        ("account", PermissionHandler::SelfOrTutor),
        ("organization", PermissionHandler::CourseScoped),
        ("course_family", PermissionHandler::CourseScoped),
        ("course", PermissionHandler::CourseScoped),
        ("course_content", PermissionHandler::CourseScoped),
        ("course_content_type", PermissionHandler::CourseScoped),
        ("course_group", PermissionHandler::CourseScoped),
        ("course_execution_backend", PermissionHandler::CourseScoped),
        ("course_member", PermissionHandler::CourseScoped),
        ("result", PermissionHandler::ResultScoped),
        ("course_role", PermissionHandler::ReadOnly),
        ("course_content_kind", PermissionHandler::ReadOnly),
        ("example", PermissionHandler::ReadOnly),
        ("example_version", PermissionHandler::ReadOnly),
    ])
}

fn minimum_role(action: &str) -> &'static str {
    match action {
        "update" | "create" | "delete" | "assign_example" => "_maintainer",
        _ => "_student",
    }
}

/// `can_perform(principal, action, resource_id?) -> bool`, dispatched
/// through the registry built in `Context::new`.
pub fn can_perform(
    handlers: &HashMap<&'static str, PermissionHandler>,
    principal: &Principal,
    resource: &str,
    action: &str,
    resource_id: Option<&str>,
    course_id: Option<&str>,
) -> bool {
    if principal.is_admin {
        return true;
    }
    let Some(handler) = handlers.get(resource) else {
        return principal.can(resource, action, resource_id);
    };

    match handler {
        PermissionHandler::Generic => principal.can(resource, action, resource_id),
        PermissionHandler::SelfOrTutor => {
            if resource_id.is_some_and(|id| id == principal.user_id) {
                return true;
            }
            principal.claims.course_ids().iter().any(|course_id| {
                let roles = principal.claims.course_roles(course_id);
                let allowed = allowed_roles(&course_role_hierarchy(), "_tutor");
                roles.iter().any(|r| allowed.contains(r))
            })
        }
        PermissionHandler::CourseScoped => {
            let Some(course_id) = course_id else {
                return principal.can(resource, action, resource_id);
            };
            let required = minimum_role(action);
            let held = principal.claims.course_roles(course_id);
            let allowed = allowed_roles(&course_role_hierarchy(), required);
            held.iter().any(|r| allowed.contains(r))
        }
        PermissionHandler::ResultScoped => {
            let Some(course_id) = course_id else { return false };
            let held = principal.claims.course_roles(course_id);
            let allowed = allowed_roles(&course_role_hierarchy(), "_tutor");
            held.iter().any(|r| allowed.contains(r)) || action == "get"
        }
        PermissionHandler::ReadOnly => {
            matches!(action, "get" | "list") || principal.can(resource, action, resource_id)
        }
    }
}

/// `build_query(principal, action) -> Scope` — which course ids a
/// course-scoped read may return. Course-scoped handlers compute this from
/// the principal's claims; other handler kinds are unrestricted once
/// `can_perform` has already gated the action.
pub fn scope_for_courses(principal: &Principal, required_role: &str) -> Scope {
    if principal.is_admin {
        return Scope::Unrestricted;
    }
    let allowed = allowed_roles(&course_role_hierarchy(), required_role);
    let courses: Vec<String> = principal
        .claims
        .course_ids()
        .into_iter()
        .filter(|course_id| {
            let held = principal.claims.course_roles(course_id);
            held.iter().any(|r| allowed.contains(r))
        })
        .collect();
    Scope::Courses(courses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::claims::Claims;

    fn principal_with(claims_strs: &[&str]) -> Principal {
        let claims = Claims::parse(claims_strs.iter().copied());
        // Principal::new is private; build through a minimal wrapper for tests.
        crate::auth::test_support::principal("u1", vec![], claims)
    }

    #[test]
    fn admin_bypasses_all_checks() {
        let claims = Claims::parse(std::iter::empty());
        let principal = crate::auth::test_support::principal("admin", vec!["_admin".to_string()], claims);
        let handlers = registry();
        assert!(can_perform(&handlers, &principal, "course", "update", None, Some("course-1")));
    }

    #[test]
    fn student_cannot_update_course_content() {
        let principal = principal_with(&["course:_student:course-1"]);
        let handlers = registry();
        assert!(can_perform(&handlers, &principal, "course_content", "get", None, Some("course-1")));
        assert!(!can_perform(&handlers, &principal, "course_content", "update", None, Some("course-1")));
    }

    #[test]
    fn maintainer_can_update_course_content() {
        let principal = principal_with(&["course:_maintainer:course-1"]);
        let handlers = registry();
        assert!(can_perform(&handlers, &principal, "course_content", "update", None, Some("course-1")));
    }
}
