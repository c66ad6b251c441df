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

//! Validation for dotted, `ltree`-backed identifiers: `course_content_deployments
//! .example_identifier` and the filesystem `deployment_path` derived from it.
//! Postgres' `ltree` type itself only rejects a handful of characters;
//! lowercase-only segments are a product invariant, not a column constraint,
//! so it is enforced here instead.

/// Returns `Ok(())` if every dot-separated segment of `value` is non-empty
/// and made up only of `[a-z0-9_]`. Used for `ltree` identifiers
/// (`example_identifier`) and for `deployment_path`, which is the same
/// identifier with dots replaced by `/`.
pub fn validate_segments(value: &str, separator: char) -> Result<(), String> {
    if value.is_empty() {
        return Err("identifier must not be empty".to_string());
    }
    for segment in value.split(separator) {
        if segment.is_empty() {
            return Err(format!("identifier {value:?} has an empty segment"));
        }
        if !segment.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_') {
            return Err(format!("identifier {value:?} contains characters outside [a-z0-9_] in segment {segment:?}"));
        }
    }
    Ok(())
}

/// `example_identifier` / ltree path validation: dot-separated `[a-z0-9_]+` segments.
pub fn validate_ltree_identifier(value: &str) -> Result<(), String> {
    validate_segments(value, '.')
}

/// `deployment_path` validation: `/`-separated `[a-z0-9_]+` segments.
pub fn validate_deployment_path(value: &str) -> Result<(), String> {
    validate_segments(value, '/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_lowercase_dotted_identifier() {
        assert!(validate_ltree_identifier("prog.loops.hello_world").is_ok());
    }

    #[test]
    fn rejects_uppercase() {
        assert!(validate_ltree_identifier("prog.Loops").is_err());
    }

    #[test]
    fn rejects_empty_segment() {
        assert!(validate_ltree_identifier("prog..loops").is_err());
        assert!(validate_ltree_identifier("").is_err());
    }

    #[test]
    fn rejects_dash() {
        assert!(validate_ltree_identifier("prog.hello-world").is_err());
    }

    #[test]
    fn accepts_lowercase_deployment_path() {
        assert!(validate_deployment_path("prog/loops/hello_world").is_ok());
    }

    #[test]
    fn rejects_uppercase_deployment_path() {
        assert!(validate_deployment_path("prog/Loops").is_err());
    }
}
