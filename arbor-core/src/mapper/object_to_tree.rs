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

//! Typed value → tree.

use crate::error::{Error, ErrorStack};
use crate::reflect::{AnyBox, Kind, Value};
use crate::tree::{Node, TreeMap};

/// Field-level policy of the object-to-tree direction.
#[derive(Clone, Debug)]
pub struct ObjectToTreeConfig {
    /// Emit null-valued fields instead of omitting them.
    pub include_null_fields: bool,
    /// Emit required-but-null fields as explicit nulls instead of
    /// failing, for diagnostic visibility.
    pub always_include_required: bool,
    /// Emit null collection elements even when null fields are omitted.
    pub always_include_null_collection_elements: bool,
    /// Emit bare field names instead of the declared wire-qualified ones.
    pub use_unqualified_field_names: bool,
    /// Emit bare enum entry names instead of the qualified ones.
    pub use_unqualified_enum_names: bool,
    /// Interpretation adapters considered for extension types, in order.
    pub enabled_interpretations: Vec<String>,
}

impl Default for ObjectToTreeConfig {
    fn default() -> Self {
        ObjectToTreeConfig {
            include_null_fields: true,
            always_include_required: false,
            always_include_null_collection_elements: false,
            use_unqualified_field_names: false,
            use_unqualified_enum_names: false,
            enabled_interpretations: Vec::new(),
        }
    }
}

/// Per-call mapping state, owned exclusively by one `map` invocation
/// chain.
pub struct ObjectToTreeState<'c> {
    pub config: &'c ObjectToTreeConfig,
    pub errors: ErrorStack,
}

impl<'c> ObjectToTreeState<'c> {
    pub fn new(config: &'c ObjectToTreeConfig) -> Self {
        ObjectToTreeState {
            config,
            errors: ErrorStack::new(),
        }
    }
}

/// Converts a reflection-described typed value into a [`Node`] tree.
pub struct ObjectToTreeMapper;

impl ObjectToTreeMapper {
    /// Maps `value` into a tree. On failure the returned node is
    /// `Undefined` and `state.errors` holds the leaf-first frame trace;
    /// check the stack before trusting the result.
    pub fn map(state: &mut ObjectToTreeState, value: &Value) -> Node {
        match value.ty().kind() {
            Kind::Bool
            | Kind::Int8
            | Kind::UInt8
            | Kind::Int16
            | Kind::UInt16
            | Kind::Int32
            | Kind::UInt32
            | Kind::Int64
            | Kind::UInt64
            | Kind::Float32
            | Kind::Float64 => Self::map_primitive(state, value),
            Kind::String => Self::map_string(state, value),
            Kind::Any => Self::map_any(state, value),
            Kind::Tree => Self::map_tree(state, value),
            Kind::Enum => Self::map_enum(state, value),
            Kind::Object => Self::map_object(state, value),
            Kind::Collection => Self::map_collection(state, value),
            Kind::Map => Self::map_map(state, value),
            Kind::Extension => Self::map_interpretation(state, value),
        }
    }

    fn map_primitive(state: &mut ObjectToTreeState, value: &Value) -> Node {
        if value.is_null() {
            return Node::null();
        }
        match primitive_to_node(value) {
            Ok(node) => node,
            Err(e) => {
                state.errors.push(e.to_string());
                Node::new()
            }
        }
    }

    fn map_string(state: &mut ObjectToTreeState, value: &Value) -> Node {
        if value.is_null() {
            return Node::null();
        }
        match value.downcast_ref::<String>() {
            Some(text) => {
                let mut node = Node::new();
                node.set_string(text.clone());
                node
            }
            None => {
                state.errors.push(format!(
                    "payload of value typed '{}' is not a String",
                    value.ty().name()
                ));
                Node::new()
            }
        }
    }

    fn map_any(state: &mut ObjectToTreeState, value: &Value) -> Node {
        if value.is_null() {
            return Node::null();
        }
        match value.downcast_ref::<AnyBox>() {
            Some(boxed) => match boxed.value() {
                Some(inner) => Self::map(state, inner),
                None => Node::null(),
            },
            None => {
                state.errors.push(format!(
                    "payload of value typed '{}' is not an AnyBox",
                    value.ty().name()
                ));
                Node::new()
            }
        }
    }

    fn map_tree(state: &mut ObjectToTreeState, value: &Value) -> Node {
        if value.is_null() {
            return Node::null();
        }
        match value.downcast_ref::<Node>() {
            Some(node) => node.clone(),
            None => {
                state.errors.push(format!(
                    "payload of value typed '{}' is not a tree Node",
                    value.ty().name()
                ));
                Node::new()
            }
        }
    }

    fn map_enum(state: &mut ObjectToTreeState, value: &Value) -> Node {
        let type_name = value.ty().name().to_string();
        let Some(dispatcher) = value.ty().enum_dispatcher() else {
            state
                .errors
                .push(format!("type '{}' carries no Enum dispatcher", type_name));
            return Node::new();
        };
        match dispatcher.to_interpretation(value, state.config.use_unqualified_enum_names) {
            Ok(interpretation) => Self::map(state, &interpretation),
            Err(code) => {
                state
                    .errors
                    .push(enum_error_message("serialize", &type_name, code));
                Node::new()
            }
        }
    }

    fn map_object(state: &mut ObjectToTreeState, value: &Value) -> Node {
        if value.is_null() {
            return Node::null();
        }
        let ty = value.ty();
        let Some(dispatcher) = ty.object_dispatcher() else {
            state
                .errors
                .push(format!("type '{}' carries no Object dispatcher", ty.name()));
            return Node::new();
        };
        let Some(data) = value.data() else {
            return Node::null();
        };
        let mut map = TreeMap::with_capacity(dispatcher.properties().len());
        for property in dispatcher.properties() {
            let field_value = property.get(data.as_ref());
            let wire_name = property.wire_name(state.config.use_unqualified_field_names);
            if field_value.is_null() {
                if property.is_required() {
                    if state.config.always_include_required {
                        map.insert(wire_name, Node::null());
                    } else {
                        state
                            .errors
                            .push(format!("{}::{} is required", ty.name(), property.name()));
                        return Node::new();
                    }
                } else if state.config.include_null_fields {
                    map.insert(wire_name, Node::null());
                }
                continue;
            }
            let before = state.errors.len();
            let child = Self::map(state, &field_value);
            if state.errors.len() > before {
                state.errors.push(format!("field='{}'", property.name()));
                return Node::new();
            }
            map.insert(wire_name, child);
        }
        let mut node = Node::new();
        node.set_map(map);
        node
    }

    fn map_collection(state: &mut ObjectToTreeState, value: &Value) -> Node {
        if value.is_null() {
            return Node::null();
        }
        let ty = value.ty();
        let Some(dispatcher) = ty.collection_dispatcher() else {
            state.errors.push(format!(
                "type '{}' carries no Collection dispatcher",
                ty.name()
            ));
            return Node::new();
        };
        let Some(data) = value.data() else {
            return Node::null();
        };
        let items = dispatcher.items(data.as_ref());
        let mut vector = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            if item.is_null() {
                if state.config.include_null_fields
                    || state.config.always_include_null_collection_elements
                {
                    vector.push(Node::null());
                }
                continue;
            }
            let before = state.errors.len();
            let child = Self::map(state, item);
            if state.errors.len() > before {
                state.errors.push(format!("index={}", index));
                return Node::new();
            }
            vector.push(child);
        }
        let mut node = Node::new();
        node.set_vector(vector);
        node
    }

    fn map_map(state: &mut ObjectToTreeState, value: &Value) -> Node {
        if value.is_null() {
            return Node::null();
        }
        let ty = value.ty();
        let Some(dispatcher) = ty.map_dispatcher() else {
            state
                .errors
                .push(format!("type '{}' carries no Map dispatcher", ty.name()));
            return Node::new();
        };
        if dispatcher.key_type().kind() != Kind::String {
            state.errors.push(format!(
                "can't serialize Map '{}': invalid key type '{}', string keys required",
                ty.name(),
                dispatcher.key_type().name()
            ));
            return Node::new();
        }
        let Some(data) = value.data() else {
            return Node::null();
        };
        let mut map = TreeMap::new();
        for (key_value, entry_value) in dispatcher.entries(data.as_ref()) {
            let Some(key) = key_value.downcast_ref::<String>() else {
                state
                    .errors
                    .push(format!("map key of '{}' is not a String", ty.name()));
                return Node::new();
            };
            if entry_value.is_null() {
                if state.config.include_null_fields {
                    map.insert(key.clone(), Node::null());
                }
                continue;
            }
            let before = state.errors.len();
            let child = Self::map(state, &entry_value);
            if state.errors.len() > before {
                state.errors.push(format!("key='{}'", key));
                return Node::new();
            }
            map.insert(key.clone(), child);
        }
        let mut node = Node::new();
        node.set_map(map);
        node
    }

    fn map_interpretation(state: &mut ObjectToTreeState, value: &Value) -> Node {
        if value.is_null() {
            return Node::null();
        }
        for name in &state.config.enabled_interpretations {
            if let Some(interpretation) = value.ty().interpretation(name) {
                let interpretation_value = interpretation.to_interpretation(value);
                return Self::map(state, &interpretation_value);
            }
        }
        state.errors.push(format!(
            "no serialize method for type '{}'",
            value.ty().name()
        ));
        Node::new()
    }
}

pub(crate) fn enum_error_message(
    direction: &str,
    type_name: &str,
    code: crate::reflect::EnumInterpreterError,
) -> String {
    use crate::reflect::EnumInterpreterError;
    match code {
        EnumInterpreterError::ConstraintNotNull => format!(
            "can't {} Enum '{}': value == null, but constraint is NotNull",
            direction, type_name
        ),
        other => format!("can't {} Enum '{}': {}", direction, type_name, other),
    }
}

fn primitive_to_node(value: &Value) -> Result<Node, Error> {
    let mut node = Node::new();

    macro_rules! set_from {
        ($rust:ty) => {{
            let v = value.downcast_ref::<$rust>().ok_or_else(|| {
                Error::type_error(format!(
                    "payload of value typed '{}' is not a {}",
                    value.ty().name(),
                    stringify!($rust)
                ))
            })?;
            node.set_primitive(*v);
        }};
    }

    match value.ty().kind() {
        Kind::Bool => set_from!(bool),
        Kind::Int8 => set_from!(i8),
        Kind::UInt8 => set_from!(u8),
        Kind::Int16 => set_from!(i16),
        Kind::UInt16 => set_from!(u16),
        Kind::Int32 => set_from!(i32),
        Kind::UInt32 => set_from!(u32),
        Kind::Int64 => set_from!(i64),
        Kind::UInt64 => set_from!(u64),
        Kind::Float32 => set_from!(f32),
        Kind::Float64 => set_from!(f64),
        other => {
            return Err(Error::type_error(format!(
                "kind '{}' is not a primitive",
                other.name()
            )))
        }
    }
    Ok(node)
}
