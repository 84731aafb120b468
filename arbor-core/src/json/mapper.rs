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

//! The JSON object-mapper facade: typed value ⇄ tree ⇄ JSON text in one
//! call, with a non-empty error stack converted to a single error at
//! this boundary.

use std::sync::Arc;

use crate::buffer::Caret;
use crate::error::Error;
use crate::json::deserializer::{Deserializer, DeserializerConfig, DeserializerState};
use crate::json::{self, SerializerConfig};
use crate::mapper::{
    ObjectToTreeConfig, ObjectToTreeMapper, ObjectToTreeState, TreeToObjectConfig,
    TreeToObjectMapper, TreeToObjectState,
};
use crate::reflect::{Type, Value};
use crate::tree::Node;

/// Combines the two mappers and the JSON codec behind one configured
/// entry object.
///
/// ```
/// use arbor_core::json::ObjectMapper;
///
/// let mapper = ObjectMapper::default()
///     .include_null_fields(false)
///     .beautifier(true);
/// ```
#[derive(Default)]
pub struct ObjectMapper {
    object_to_tree_config: ObjectToTreeConfig,
    tree_to_object_config: TreeToObjectConfig,
    serializer_config: SerializerConfig,
    deserializer_config: DeserializerConfig,
}

impl ObjectMapper {
    pub fn new() -> Self {
        ObjectMapper::default()
    }

    /// Emit null-valued fields instead of omitting them.
    pub fn include_null_fields(mut self, value: bool) -> Self {
        self.object_to_tree_config.include_null_fields = value;
        self
    }

    /// Emit required-but-null fields as explicit nulls instead of
    /// failing.
    pub fn always_include_required(mut self, value: bool) -> Self {
        self.object_to_tree_config.always_include_required = value;
        self
    }

    /// Emit null collection elements even when null fields are omitted.
    pub fn always_include_null_collection_elements(mut self, value: bool) -> Self {
        self.object_to_tree_config
            .always_include_null_collection_elements = value;
        self
    }

    /// Ignore unknown fields on read instead of failing.
    pub fn allow_unknown_fields(mut self, value: bool) -> Self {
        self.tree_to_object_config.allow_unknown_fields = value;
        self
    }

    /// Parse string nodes into numeric targets and vice versa on read.
    pub fn allow_lexical_casting(mut self, value: bool) -> Self {
        self.tree_to_object_config.allow_lexical_casting = value;
        self
    }

    /// Use bare field names instead of wire-qualified ones, in both
    /// directions.
    pub fn use_unqualified_field_names(mut self, value: bool) -> Self {
        self.object_to_tree_config.use_unqualified_field_names = value;
        self.tree_to_object_config.use_unqualified_field_names = value;
        self
    }

    /// Use bare enum entry names instead of qualified ones, in both
    /// directions.
    pub fn use_unqualified_enum_names(mut self, value: bool) -> Self {
        self.object_to_tree_config.use_unqualified_enum_names = value;
        self.tree_to_object_config.use_unqualified_enum_names = value;
        self
    }

    /// Interpretation adapters considered for extension types, in order,
    /// in both directions.
    pub fn enabled_interpretations(mut self, names: Vec<String>) -> Self {
        self.object_to_tree_config.enabled_interpretations = names.clone();
        self.tree_to_object_config.enabled_interpretations = names;
        self
    }

    /// Emit null vector elements instead of skipping them.
    pub fn include_null_elements(mut self, value: bool) -> Self {
        self.serializer_config.include_null_elements = value;
        self
    }

    /// Pretty-print the output.
    pub fn beautifier(mut self, value: bool) -> Self {
        self.serializer_config.use_beautifier = value;
        self
    }

    /// String escaping flags, see [`crate::json::utils`].
    pub fn escape_flags(mut self, flags: u32) -> Self {
        self.serializer_config.escape_flags = flags;
        self
    }

    /// Maximum accepted nesting depth on read.
    pub fn max_depth(mut self, value: u32) -> Self {
        self.deserializer_config.max_depth = value;
        self
    }

    pub fn object_to_tree_config(&self) -> &ObjectToTreeConfig {
        &self.object_to_tree_config
    }

    pub fn tree_to_object_config(&self) -> &TreeToObjectConfig {
        &self.tree_to_object_config
    }

    pub fn serializer_config(&self) -> &SerializerConfig {
        &self.serializer_config
    }

    pub fn deserializer_config(&self) -> &DeserializerConfig {
        &self.deserializer_config
    }

    /// Typed value → JSON string.
    pub fn write_to_string(&self, value: &Value) -> Result<String, Error> {
        let mut state = ObjectToTreeState::new(&self.object_to_tree_config);
        let tree = ObjectToTreeMapper::map(&mut state, value);
        if !state.errors.is_empty() {
            return Err(state.errors.into_error());
        }
        self.write_tree_to_string(&tree)
    }

    /// Tree → JSON string.
    pub fn write_tree_to_string(&self, node: &Node) -> Result<String, Error> {
        json::to_string(node, &self.serializer_config)
    }

    /// JSON string → typed value of `ty`.
    pub fn read_from_str(&self, input: &str, ty: &Arc<Type>) -> Result<Value, Error> {
        let tree = self.read_tree_from_str(input)?;
        self.map_tree(&tree, ty)
    }

    /// JSON string → tree.
    pub fn read_tree_from_str(&self, input: &str) -> Result<Node, Error> {
        json::from_str(input, &self.deserializer_config)
    }

    /// Parses one value at the caret into a typed value of `ty`, leaving
    /// the caret after the value.
    pub fn read_from_caret(&self, caret: &mut Caret, ty: &Arc<Type>) -> Result<Value, Error> {
        let tree = self.read_tree_from_caret(caret)?;
        self.map_tree(&tree, ty)
    }

    /// Parses one value at the caret into a tree, leaving the caret
    /// after the value.
    pub fn read_tree_from_caret(&self, caret: &mut Caret) -> Result<Node, Error> {
        let mut state = DeserializerState::new(&self.deserializer_config);
        let node = Deserializer::deserialize(&mut state, caret);
        if !state.errors.is_empty() {
            return Err(state.errors.into_error());
        }
        Ok(node)
    }

    fn map_tree(&self, node: &Node, ty: &Arc<Type>) -> Result<Value, Error> {
        let mut state = TreeToObjectState::new(&self.tree_to_object_config);
        let value = TreeToObjectMapper::map(&mut state, node, ty);
        if !state.errors.is_empty() {
            return Err(state.errors.into_error());
        }
        Ok(value)
    }
}
