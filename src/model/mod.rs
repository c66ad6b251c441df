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

mod deployment;
mod example;
mod hierarchy;
mod result;
mod user;
mod workflow;

pub use deployment::{CourseContentDeployment, DeploymentAction, DeploymentHistory, DeploymentStatus};
pub use example::{Example, ExampleDependency, ExampleRepository, ExampleVersion};
pub use hierarchy::{
    Course, CourseContent, CourseContentType, CourseFamily, CourseGroup, CourseMember, ExecutionBackend,
    Organization,
};
pub use result::ResultModel;
pub use user::{Account, JsonWebKey, Role, RoleClaim, UserModel};
pub use workflow::WorkflowRun;
