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

mod commit;
mod event;
mod hook;
mod organization;
mod repository;
mod team;
mod user;

pub use commit::PartialCommit;
pub use event::Event;
pub use hook::{CreateHookRequest, Hook, HookType, matching};
pub use organization::{CreateOrganizationRequest, Organization};
pub use repository::{
    AddCollaboratorRequest, BranchProtectionRequest, CreateRepositoryRequest, ExternalTracker,
    ExternalWiki, ForkRepositoryRequest, GenerateRepositoryRequest, InternalTracker, Permissions,
    RepoTransfer, Repository,
};
pub use team::Team;
pub use user::{CreateUserRequest, PartialUser, User};
