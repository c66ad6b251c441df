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

use std::collections::{HashMap, HashSet};

/// Permissions independent of, and scoped to, a specific resource instance.
///
/// Parsed from `(claim_type, claim_value)` rows where `claim_type ==
/// "permissions"`. A claim value of `resource:action` is general; a value of
/// `resource:action:resource_id` is dependent on that instance. The special
/// form `course:<course_role_id>:<course_id>` is indexed under
/// `dependent["course"][course_id]` and encodes course-role membership rather
/// than a resource/action pair.
#[derive(Debug, Clone, Default)]
pub struct Claims {
    general: HashMap<String, HashSet<String>>,
    dependent: HashMap<String, HashMap<String, HashSet<String>>>,
}

impl Claims {
    pub fn parse<'a>(values: impl IntoIterator<Item = &'a str>) -> Claims {
        let mut claims = Claims::default();
        for value in values {
            claims.add(value);
        }
        claims
    }

    pub fn add(&mut self, value: &str) {
        let mut parts = value.splitn(3, ':');
        let (Some(resource), Some(action)) = (parts.next(), parts.next()) else {
            return;
        };
        match parts.next() {
            Some(resource_id) => {
                self.dependent
                    .entry(resource.to_string())
                    .or_default()
                    .entry(resource_id.to_string())
                    .or_default()
                    .insert(action.to_string());
            }
            None => {
                self.general.entry(resource.to_string()).or_default().insert(action.to_string());
            }
        }
    }

    pub fn add_general(&mut self, resource: &str, action: &str) {
        self.general.entry(resource.to_string()).or_default().insert(action.to_string());
    }

    pub fn has_general_permission(&self, resource: &str, action: &str) -> bool {
        self.general.get(resource).is_some_and(|actions| actions.contains(action))
    }

    pub fn has_dependent_permission(&self, resource: &str, resource_id: &str, action: &str) -> bool {
        self.dependent
            .get(resource)
            .and_then(|by_id| by_id.get(resource_id))
            .is_some_and(|actions| actions.contains(action))
    }

    /// Returns every resource_id for which any of `actions` is granted,
    /// either generally or as a dependent claim. `None` means unrestricted
    /// (the caller holds the general permission for every instance).
    pub fn permitted_resource_ids(&self, resource: &str, actions: &[&str]) -> Option<Vec<String>> {
        if actions.iter().any(|a| self.has_general_permission(resource, a)) {
            return None;
        }
        let ids = self
            .dependent
            .get(resource)
            .map(|by_id| {
                by_id
                    .iter()
                    .filter(|(_, granted)| actions.iter().any(|a| granted.contains(*a)))
                    .map(|(id, _)| id.clone())
                    .collect()
            })
            .unwrap_or_default();
        Some(ids)
    }

    /// Course role ids the principal holds for `course_id`, derived from
    /// `dependent["course"][course_id]`.
    pub fn course_roles(&self, course_id: &str) -> HashSet<String> {
        self.dependent.get("course").and_then(|by_course| by_course.get(course_id)).cloned().unwrap_or_default()
    }

    /// Every course_id the principal holds at least one role in.
    pub fn course_ids(&self) -> Vec<String> {
        self.dependent.get("course").map(|by_course| by_course.keys().cloned().collect()).unwrap_or_default()
    }
}

/// `role ⊇ {...}`: holding any role in the mapped set satisfies a
/// requirement for the key role. Built once and held by value (not a
/// lazily-initialized global), so callers own their copy and the table can
/// be swapped per-deployment without touching process-wide state.
pub fn course_role_hierarchy() -> HashMap<&'static str, &'static [&'static str]> {
    HashMap::from([
        ("_owner", ["_owner"].as_slice()),
        ("_maintainer", ["_maintainer", "_owner"].as_slice()),
        ("_lecturer", ["_lecturer", "_maintainer", "_owner"].as_slice()),
        ("_tutor", ["_tutor", "_lecturer", "_maintainer", "_owner"].as_slice()),
        ("_student", ["_student", "_tutor", "_lecturer", "_maintainer", "_owner"].as_slice()),
    ])
}

/// The set of roles that satisfy a requirement for `role`, per
/// [`course_role_hierarchy`]. Unknown roles satisfy only themselves.
pub fn allowed_roles(hierarchy: &HashMap<&'static str, &'static [&'static str]>, role: &str) -> Vec<String> {
    hierarchy.get(role).map(|roles| roles.iter().map(|r| r.to_string()).collect()).unwrap_or_else(|| vec![role.to_string()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_general_and_dependent_claims() {
        let claims = Claims::parse(["course_content:get", "course_content:update:abc-123"]);
        assert!(claims.has_general_permission("course_content", "get"));
        assert!(!claims.has_general_permission("course_content", "update"));
        assert!(claims.has_dependent_permission("course_content", "abc-123", "update"));
        assert!(!claims.has_dependent_permission("course_content", "other", "update"));
    }

    #[test]
    fn indexes_course_roles_under_dependent_course() {
        let claims = Claims::parse(["course:_tutor:course-1", "course:_student:course-2"]);
        assert_eq!(claims.course_roles("course-1"), HashSet::from(["_tutor".to_string()]));
        assert_eq!(claims.course_roles("course-2"), HashSet::from(["_student".to_string()]));
        assert!(claims.course_roles("course-3").is_empty());
    }

    #[test]
    fn hierarchy_is_reflexive_and_transitive() {
        let hierarchy = course_role_hierarchy();
        for role in ["_owner", "_maintainer", "_lecturer", "_tutor", "_student"] {
            assert!(allowed_roles(&hierarchy, role).contains(&role.to_string()));
        }
        // _student satisfies a _tutor requirement's allowed set only if _tutor's
        // set contains _student; the hierarchy instead says anyone *holding*
        // _tutor-or-above satisfies a _tutor requirement.
        assert!(allowed_roles(&hierarchy, "_tutor").contains(&"_owner".to_string()));
    }

    #[test]
    fn permitted_resource_ids_none_means_unrestricted() {
        let claims = Claims::parse(["example:list"]);
        assert_eq!(claims.permitted_resource_ids("example", &["list"]), None);

        let claims = Claims::parse(["example:list:ex-1", "example:list:ex-2"]);
        let mut ids = claims.permitted_resource_ids("example", &["list"]).unwrap();
        ids.sort();
        assert_eq!(ids, vec!["ex-1".to_string(), "ex-2".to_string()]);
    }
}
