// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! The two mapping engines and their orchestration.
//!
//! Both mappers dispatch on the structural [`crate::reflect::Kind`] of
//! the typed side and thread an explicit state (config + error stack)
//! through the recursion. Failures accumulate as
//! [`crate::error::ErrorStack`] frames; the mappers themselves never
//! return `Err`; callers inspect the stack.

pub mod object_to_tree;
pub mod remapper;
pub mod tree_to_object;

pub use object_to_tree::{ObjectToTreeConfig, ObjectToTreeMapper, ObjectToTreeState};
pub use remapper::ObjectRemapper;
pub use tree_to_object::{TreeToObjectConfig, TreeToObjectMapper, TreeToObjectState};
