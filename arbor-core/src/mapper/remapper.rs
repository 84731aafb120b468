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

//! Direct object-to-object remapping through the tree pivot, without a
//! serialized byte form in between.

use std::sync::Arc;

use crate::error::Error;
use crate::mapper::object_to_tree::{ObjectToTreeConfig, ObjectToTreeMapper, ObjectToTreeState};
use crate::mapper::tree_to_object::{TreeToObjectConfig, TreeToObjectMapper, TreeToObjectState};
use crate::reflect::{Type, Value};
use crate::tree::Node;

/// Orchestration of the two mappers: object → tree → object.
#[derive(Default)]
pub struct ObjectRemapper {
    pub object_to_tree_config: ObjectToTreeConfig,
    pub tree_to_object_config: TreeToObjectConfig,
}

impl ObjectRemapper {
    pub fn new(
        object_to_tree_config: ObjectToTreeConfig,
        tree_to_object_config: TreeToObjectConfig,
    ) -> Self {
        ObjectRemapper {
            object_to_tree_config,
            tree_to_object_config,
        }
    }

    /// Remaps `value` into a value of `target`, pivoting through a tree.
    /// A non-empty error stack from either direction aggregates into one
    /// error.
    pub fn remap(&self, value: &Value, target: &Arc<Type>) -> Result<Value, Error> {
        let mut state = ObjectToTreeState::new(&self.object_to_tree_config);
        let tree = ObjectToTreeMapper::map(&mut state, value);
        if !state.errors.is_empty() {
            return Err(state.errors.into_error());
        }
        self.remap_tree(&tree, target)
    }

    /// Maps an already-built tree into a value of `target`.
    pub fn remap_tree(&self, node: &Node, target: &Arc<Type>) -> Result<Value, Error> {
        let mut state = TreeToObjectState::new(&self.tree_to_object_config);
        let value = TreeToObjectMapper::map(&mut state, node, target);
        if !state.errors.is_empty() {
            return Err(state.errors.into_error());
        }
        Ok(value)
    }
}
