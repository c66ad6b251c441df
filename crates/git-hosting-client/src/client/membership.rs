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

use reqwest::StatusCode;

use crate::{
    client::GiteaClient,
    error::ClientError,
    types::{AddCollaboratorRequest, BranchProtectionRequest, ForkRepositoryRequest, Organization, Repository},
};

impl GiteaClient {
    /// Gets an organization by name.
    ///
    /// # Possible Responses
    /// - 200: Organization found (returns `Organization`).
    /// - 404: Organization not found.
    ///
    /// https://docs.gitea.com/api/1.24/#tag/organization/operation/orgGet
    pub async fn get_organization(&self, org: &str) -> Result<Organization, ClientError> {
        let response = self.get(&format!("orgs/{org}")).await?;

        match response.status() {
            StatusCode::OK => Ok(response.json::<Organization>().await?),
            _ => Err(ClientError::from_response(response).await),
        }
    }

    /// Forks a repository into the caller's namespace or the given organization.
    ///
    /// Gitea performs the fork asynchronously; the returned repository may
    /// still be `empty: true` until the background copy completes, so callers
    /// must poll [`GiteaClient::get_repository`] until it is ready.
    ///
    /// # Possible Responses
    /// - 202: Fork accepted (returns `Repository`).
    /// - 403: Forbidden.
    /// - 404: Source repository not found.
    /// - 409: Fork already exists.
    ///
    /// https://docs.gitea.com/api/1.24/#tag/repository/operation/createFork
    pub async fn fork_repository(
        &self,
        owner: &str,
        repo: &str,
        request: ForkRepositoryRequest,
    ) -> Result<Repository, ClientError> {
        let endpoint = format!("repos/{owner}/{repo}/forks");
        let response = self.post(&endpoint, &request).await?;

        match response.status() {
            StatusCode::ACCEPTED | StatusCode::CREATED => Ok(response.json::<Repository>().await?),
            _ => Err(ClientError::from_response(response).await),
        }
    }

    /// Adds a collaborator to a repository, or updates their permission level.
    ///
    /// # Possible Responses
    /// - 204: Collaborator added/updated.
    /// - 403: Forbidden.
    /// - 404: Repository or user not found.
    ///
    /// https://docs.gitea.com/api/1.24/#tag/repository/operation/repoAddCollaborator
    pub async fn add_collaborator(
        &self,
        owner: &str,
        repo: &str,
        username: &str,
        request: AddCollaboratorRequest,
    ) -> Result<(), ClientError> {
        let endpoint = format!("repos/{owner}/{repo}/collaborators/{username}");
        let response = self.put(&endpoint, &request).await?;

        match response.status() {
            StatusCode::NO_CONTENT | StatusCode::CREATED => Ok(()),
            _ => Err(ClientError::from_response(response).await),
        }
    }

    /// Creates (or replaces) branch protection for a repository, allowing the
    /// protected branch to be unprotected for force/direct pushes when the
    /// workflow needs students to push directly.
    ///
    /// # Possible Responses
    /// - 201: Branch protection created (returns nothing meaningful to us).
    /// - 403: Forbidden.
    /// - 404: Repository not found.
    /// - 422: Validation error.
    ///
    /// https://docs.gitea.com/api/1.24/#tag/repository/operation/repoCreateBranchProtection
    pub async fn create_branch_protection(
        &self,
        owner: &str,
        repo: &str,
        request: BranchProtectionRequest,
    ) -> Result<(), ClientError> {
        let endpoint = format!("repos/{owner}/{repo}/branch_protections");
        let response = self.post(&endpoint, &request).await?;

        match response.status() {
            StatusCode::CREATED => Ok(()),
            _ => Err(ClientError::from_response(response).await),
        }
    }

    /// Removes branch protection, leaving the branch writable by collaborators.
    ///
    /// # Possible Responses
    /// - 204: Branch protection removed.
    /// - 404: No such protection rule.
    ///
    /// https://docs.gitea.com/api/1.24/#tag/repository/operation/repoDeleteBranchProtection
    pub async fn delete_branch_protection(
        &self,
        owner: &str,
        repo: &str,
        rule_name: &str,
    ) -> Result<(), ClientError> {
        let endpoint = format!("repos/{owner}/{repo}/branch_protections/{rule_name}");
        let response = self.delete(&endpoint).await?;

        match response.status() {
            StatusCode::NO_CONTENT | StatusCode::NOT_FOUND => Ok(()),
            _ => Err(ClientError::from_response(response).await),
        }
    }
}
