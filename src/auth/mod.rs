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

pub mod basic;
pub mod claims;
pub mod permissions;
pub mod principal;

pub use basic::AdminBasic;
pub use claims::Claims;
pub use permissions::{PermissionHandler, Registry, Scope, can_perform, scope_for_courses};
pub use principal::{ClaimsError, Principal, refresh_keys};

#[cfg(test)]
pub(crate) mod test_support {
    use super::{claims::Claims, principal::Principal};

    pub fn principal(user_id: &str, roles: Vec<String>, claims: Claims) -> Principal {
        Principal::new_for_test(user_id, roles, claims)
    }
}
