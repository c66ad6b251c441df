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

//! In-process workflow runtime adapter (C5). Backed by a `tokio::task::spawn`
//! per run plus the `workflow_runs` table for durable status/result, since
//! the host has no existing durable-workflow crate beyond its fire-and-forget
//! Tekton pipeline trigger. Modeled as a small internal task registry keyed by
//! workflow id rather than a module-load-time singleton.

pub mod assignments_repository;
pub mod hierarchy;
pub mod runtime;
pub mod student_repository;
pub mod student_template;
pub mod test_execution;

pub use runtime::{RetryPolicy, WorkflowError, WorkflowRuntime};
