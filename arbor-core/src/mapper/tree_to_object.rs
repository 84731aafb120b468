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

//! Tree → typed value.

use std::sync::Arc;

use crate::error::{Error, ErrorStack};
use crate::mapper::object_to_tree::enum_error_message;
use crate::reflect::any::{any_fields_type, any_vector_type};
use crate::reflect::primitives::{
    bool_type, float32_type, float64_type, int16_type, int32_type, int64_type, int8_type,
    string_type, uint16_type, uint32_type, uint64_type, uint8_type,
};
use crate::reflect::{AnyBox, AnyData, Kind, Type, Value};
use crate::tree::Node;
use crate::types::NodeType;

/// Policy of the tree-to-object direction.
#[derive(Clone, Debug)]
pub struct TreeToObjectConfig {
    /// Ignore tree entries with no declared counterpart instead of
    /// failing.
    pub allow_unknown_fields: bool,
    /// Parse string nodes into numeric targets and render numeric nodes
    /// into string targets.
    pub allow_lexical_casting: bool,
    /// Match bare field names instead of the declared wire-qualified
    /// ones.
    pub use_unqualified_field_names: bool,
    /// Match bare enum entry names instead of the qualified ones.
    pub use_unqualified_enum_names: bool,
    /// Interpretation adapters considered for extension types, in order.
    pub enabled_interpretations: Vec<String>,
}

impl Default for TreeToObjectConfig {
    fn default() -> Self {
        TreeToObjectConfig {
            allow_unknown_fields: true,
            allow_lexical_casting: false,
            use_unqualified_field_names: false,
            use_unqualified_enum_names: false,
            enabled_interpretations: Vec::new(),
        }
    }
}

/// Per-call mapping state, owned exclusively by one `map` invocation
/// chain.
pub struct TreeToObjectState<'c> {
    pub config: &'c TreeToObjectConfig,
    pub errors: ErrorStack,
}

impl<'c> TreeToObjectState<'c> {
    pub fn new(config: &'c TreeToObjectConfig) -> Self {
        TreeToObjectState {
            config,
            errors: ErrorStack::new(),
        }
    }
}

/// Converts a [`Node`] tree into a typed value guided by a target
/// [`Type`] descriptor.
pub struct TreeToObjectMapper;

impl TreeToObjectMapper {
    /// Maps `node` into a value of `ty`. On failure the returned value
    /// is null and `state.errors` holds the leaf-first frame trace;
    /// check the stack before trusting the result.
    pub fn map(state: &mut TreeToObjectState, node: &Node, ty: &Arc<Type>) -> Value {
        if node.is_undefined() && ty.kind() != Kind::Tree {
            state.errors.push(format!(
                "can't map an Undefined node to '{}'",
                ty.name()
            ));
            return Value::null(ty);
        }
        match ty.kind() {
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
            | Kind::Float64 => Self::map_primitive(state, node, ty),
            Kind::String => Self::map_string(state, node, ty),
            Kind::Any => Self::map_any(state, node, ty),
            Kind::Tree => Value::new(ty, node.clone()),
            Kind::Enum => Self::map_enum(state, node, ty),
            Kind::Object => Self::map_object(state, node, ty),
            Kind::Collection => Self::map_collection(state, node, ty),
            Kind::Map => Self::map_map(state, node, ty),
            Kind::Extension => Self::map_interpretation(state, node, ty),
        }
    }

    fn map_primitive(state: &mut TreeToObjectState, node: &Node, ty: &Arc<Type>) -> Value {
        if node.is_null() {
            return Value::null(ty);
        }
        match primitive_payload(node, ty.kind(), state.config.allow_lexical_casting) {
            Ok(payload) => Value::from_parts(ty, Some(payload)),
            Err(e) => {
                state
                    .errors
                    .push(format!("can't map node to '{}': {}", ty.name(), e));
                Value::null(ty)
            }
        }
    }

    fn map_string(state: &mut TreeToObjectState, node: &Node, ty: &Arc<Type>) -> Value {
        if node.is_null() {
            return Value::null(ty);
        }
        match node.node_type() {
            NodeType::String => match node.get_string() {
                Ok(text) => Value::new(ty, text.to_string()),
                Err(e) => {
                    state.errors.push(e.to_string());
                    Value::null(ty)
                }
            },
            other if state.config.allow_lexical_casting && node.is_primitive() => {
                match render_primitive(node) {
                    Ok(text) => Value::new(ty, text),
                    Err(e) => {
                        state.errors.push(format!(
                            "can't cast {} node to '{}': {}",
                            other.name(),
                            ty.name(),
                            e
                        ));
                        Value::null(ty)
                    }
                }
            }
            other => {
                state.errors.push(format!(
                    "can't map node to '{}': node is not a String, found {}",
                    ty.name(),
                    other.name()
                ));
                Value::null(ty)
            }
        }
    }

    fn map_any(state: &mut TreeToObjectState, node: &Node, ty: &Arc<Type>) -> Value {
        if node.is_null() {
            return Value::null(ty);
        }
        let concrete_ty = match node.node_type() {
            NodeType::String => string_type(),
            NodeType::Bool => bool_type(),
            NodeType::Integer | NodeType::Int64 => int64_type(),
            NodeType::Float | NodeType::Float64 => float64_type(),
            NodeType::Int8 => int8_type(),
            NodeType::UInt8 => uint8_type(),
            NodeType::Int16 => int16_type(),
            NodeType::UInt16 => uint16_type(),
            NodeType::Int32 => int32_type(),
            NodeType::UInt32 => uint32_type(),
            NodeType::UInt64 => uint64_type(),
            NodeType::Float32 => float32_type(),
            NodeType::Vector => any_vector_type(),
            NodeType::Map | NodeType::Pairs => any_fields_type(),
            NodeType::Undefined | NodeType::Null => unreachable!("handled above"),
        };
        let before = state.errors.len();
        let inner = Self::map(state, node, &concrete_ty);
        if state.errors.len() > before {
            return Value::null(ty);
        }
        Value::new(ty, AnyBox::new(inner))
    }

    fn map_enum(state: &mut TreeToObjectState, node: &Node, ty: &Arc<Type>) -> Value {
        let Some(dispatcher) = ty.enum_dispatcher() else {
            state
                .errors
                .push(format!("type '{}' carries no Enum dispatcher", ty.name()));
            return Value::null(ty);
        };
        let before = state.errors.len();
        let interpretation = Self::map(state, node, dispatcher.interpretation_type());
        if state.errors.len() > before {
            return Value::null(ty);
        }
        match dispatcher.from_interpretation(&interpretation, state.config.use_unqualified_enum_names)
        {
            Ok(payload) => Value::from_parts(ty, payload),
            Err(code) => {
                state
                    .errors
                    .push(enum_error_message("deserialize", ty.name(), code));
                Value::null(ty)
            }
        }
    }

    fn map_object(state: &mut TreeToObjectState, node: &Node, ty: &Arc<Type>) -> Value {
        if node.is_null() {
            return Value::null(ty);
        }
        let Some(dispatcher) = ty.object_dispatcher() else {
            state
                .errors
                .push(format!("type '{}' carries no Object dispatcher", ty.name()));
            return Value::null(ty);
        };
        let map = match node.get_map() {
            Ok(map) => map,
            Err(_) => {
                state.errors.push(format!(
                    "can't map node to Object '{}': node is not a Map, found {}",
                    ty.name(),
                    node.node_type().name()
                ));
                return Value::null(ty);
            }
        };
        let use_unqualified = state.config.use_unqualified_field_names;
        let mut object = dispatcher.instantiate();
        let mut populated = vec![false; dispatcher.properties().len()];
        let mut deferred: Vec<(usize, &Node)> = Vec::new();

        // pass one: ordinary fields, in tree order
        for (key, child) in map.iter() {
            let Some((index, property)) = dispatcher.property_by_wire_name(key, use_unqualified)
            else {
                if state.config.allow_unknown_fields {
                    continue;
                }
                state
                    .errors
                    .push(format!("unknown field '{}' for Object '{}'", key, ty.name()));
                return Value::null(ty);
            };
            if property.type_selector().is_some() {
                deferred.push((index, child));
                continue;
            }
            if child.is_null() {
                if let Err(e) = property.set(&mut *object, Value::null(property.ty())) {
                    state.errors.push(e.to_string());
                    state.errors.push(format!("field='{}'", property.name()));
                    return Value::null(ty);
                }
                continue;
            }
            let before = state.errors.len();
            let field_value = Self::map(state, child, property.ty());
            if state.errors.len() > before {
                state.errors.push(format!("field='{}'", property.name()));
                return Value::null(ty);
            }
            let was_null = field_value.is_null();
            if let Err(e) = property.set(&mut *object, field_value) {
                state.errors.push(e.to_string());
                state.errors.push(format!("field='{}'", property.name()));
                return Value::null(ty);
            }
            if !was_null {
                populated[index] = true;
            }
        }

        // pass two: type-selector fields, resolved against the partially
        // built object
        for (index, child) in deferred {
            let property = &dispatcher.properties()[index];
            let selector = property
                .type_selector()
                .expect("deferred property lost its selector");
            let Some(concrete_ty) = (selector.as_ref())(&*object) else {
                continue;
            };
            if child.is_null() {
                if let Err(e) = property.set(&mut *object, Value::null(property.ty())) {
                    state.errors.push(e.to_string());
                    state.errors.push(format!("field='{}'", property.name()));
                    return Value::null(ty);
                }
                continue;
            }
            let before = state.errors.len();
            let inner = Self::map(state, child, &concrete_ty);
            if state.errors.len() > before {
                state.errors.push(format!("field='{}'", property.name()));
                return Value::null(ty);
            }
            let field_value = Value::new(property.ty(), AnyBox::new(inner));
            if let Err(e) = property.set(&mut *object, field_value) {
                state.errors.push(e.to_string());
                state.errors.push(format!("field='{}'", property.name()));
                return Value::null(ty);
            }
            populated[index] = true;
        }

        for (index, property) in dispatcher.properties().iter().enumerate() {
            if property.is_required() && !populated[index] {
                state
                    .errors
                    .push(format!("{}::{} is required", ty.name(), property.name()));
                return Value::null(ty);
            }
        }

        Value::from_parts(ty, Some(Arc::from(object)))
    }

    fn map_collection(state: &mut TreeToObjectState, node: &Node, ty: &Arc<Type>) -> Value {
        if node.is_null() {
            return Value::null(ty);
        }
        let Some(dispatcher) = ty.collection_dispatcher() else {
            state.errors.push(format!(
                "type '{}' carries no Collection dispatcher",
                ty.name()
            ));
            return Value::null(ty);
        };
        let items = match node.get_vector() {
            Ok(items) => items,
            Err(_) => {
                state.errors.push(format!(
                    "can't map node to Collection '{}': node is not a Vector, found {}",
                    ty.name(),
                    node.node_type().name()
                ));
                return Value::null(ty);
            }
        };
        let mut object = dispatcher.create();
        for (index, item_node) in items.iter().enumerate() {
            let before = state.errors.len();
            let item = Self::map(state, item_node, dispatcher.item_type());
            if state.errors.len() > before {
                state.errors.push(format!("index={}", index));
                return Value::null(ty);
            }
            if let Err(e) = dispatcher.add_item(&mut *object, item) {
                state.errors.push(e.to_string());
                state.errors.push(format!("index={}", index));
                return Value::null(ty);
            }
        }
        Value::from_parts(ty, Some(Arc::from(object)))
    }

    fn map_map(state: &mut TreeToObjectState, node: &Node, ty: &Arc<Type>) -> Value {
        if node.is_null() {
            return Value::null(ty);
        }
        let Some(dispatcher) = ty.map_dispatcher() else {
            state
                .errors
                .push(format!("type '{}' carries no Map dispatcher", ty.name()));
            return Value::null(ty);
        };
        if dispatcher.key_type().kind() != Kind::String {
            state.errors.push(format!(
                "can't deserialize Map '{}': invalid key type '{}', string keys required",
                ty.name(),
                dispatcher.key_type().name()
            ));
            return Value::null(ty);
        }
        // Map and Pairs nodes both carry string-keyed children; either
        // shape feeds a map target.
        let entries: Vec<(&str, &Node)> = match node.node_type() {
            NodeType::Map => match node.get_map() {
                Ok(map) => map.iter().collect(),
                Err(_) => Vec::new(),
            },
            NodeType::Pairs => match node.get_pairs() {
                Ok(pairs) => pairs.iter().map(|(k, v)| (k.as_str(), v)).collect(),
                Err(_) => Vec::new(),
            },
            other => {
                state.errors.push(format!(
                    "can't map node to Map '{}': node is not a Map, found {}",
                    ty.name(),
                    other.name()
                ));
                return Value::null(ty);
            }
        };
        let mut object = dispatcher.create();
        for (key, value_node) in entries {
            let before = state.errors.len();
            let entry_value = Self::map(state, value_node, dispatcher.value_type());
            if state.errors.len() > before {
                state.errors.push(format!("key='{}'", key));
                return Value::null(ty);
            }
            let key_value = Value::new(dispatcher.key_type(), key.to_string());
            if let Err(e) = dispatcher.put(&mut *object, key_value, entry_value) {
                state.errors.push(e.to_string());
                state.errors.push(format!("key='{}'", key));
                return Value::null(ty);
            }
        }
        Value::from_parts(ty, Some(Arc::from(object)))
    }

    fn map_interpretation(state: &mut TreeToObjectState, node: &Node, ty: &Arc<Type>) -> Value {
        if node.is_null() {
            return Value::null(ty);
        }
        for name in &state.config.enabled_interpretations {
            if let Some(interpretation) = ty.interpretation(name) {
                let before = state.errors.len();
                let interpretation_value =
                    Self::map(state, node, interpretation.interpretation_type());
                if state.errors.len() > before {
                    return Value::null(ty);
                }
                return match interpretation.from_interpretation(&interpretation_value) {
                    Ok(payload) => Value::from_parts(ty, payload),
                    Err(e) => {
                        state.errors.push(e.to_string());
                        state
                            .errors
                            .push(format!("can't deserialize type '{}'", ty.name()));
                        Value::null(ty)
                    }
                };
            }
        }
        state.errors.push(format!(
            "no deserialize method for type '{}'",
            ty.name()
        ));
        Value::null(ty)
    }
}

fn primitive_payload(node: &Node, kind: Kind, lexical: bool) -> Result<Arc<AnyData>, Error> {
    if !node.is_primitive() {
        if lexical && node.node_type() == NodeType::String {
            return lexical_payload(node.get_string()?, kind);
        }
        return Err(Error::type_error(format!(
            "node is not a primitive, found {}",
            node.node_type().name()
        )));
    }
    let payload: Arc<AnyData> = match kind {
        Kind::Bool => Arc::new(node.get_primitive::<bool>()?),
        Kind::Int8 => Arc::new(narrow_int::<i8>(node.int_value()?, "Int8")?),
        Kind::Int16 => Arc::new(narrow_int::<i16>(node.int_value()?, "Int16")?),
        Kind::Int32 => Arc::new(narrow_int::<i32>(node.int_value()?, "Int32")?),
        Kind::Int64 => Arc::new(node.int_value()?),
        Kind::UInt8 => Arc::new(narrow_uint::<u8>(node.uint_value()?, "UInt8")?),
        Kind::UInt16 => Arc::new(narrow_uint::<u16>(node.uint_value()?, "UInt16")?),
        Kind::UInt32 => Arc::new(narrow_uint::<u32>(node.uint_value()?, "UInt32")?),
        Kind::UInt64 => Arc::new(node.uint_value()?),
        Kind::Float32 => Arc::new(node.float_value()? as f32),
        Kind::Float64 => Arc::new(node.float_value()?),
        other => {
            return Err(Error::type_error(format!(
                "kind '{}' is not a primitive",
                other.name()
            )))
        }
    };
    Ok(payload)
}

fn narrow_int<T: TryFrom<i64>>(value: i64, target: &str) -> Result<T, Error> {
    T::try_from(value)
        .map_err(|_| Error::invalid_data(format!("value {} out of range for {}", value, target)))
}

fn narrow_uint<T: TryFrom<u64>>(value: u64, target: &str) -> Result<T, Error> {
    T::try_from(value)
        .map_err(|_| Error::invalid_data(format!("value {} out of range for {}", value, target)))
}

fn lexical_payload(text: &str, kind: Kind) -> Result<Arc<AnyData>, Error> {
    macro_rules! parse_as {
        ($rust:ty, $target:literal) => {
            Arc::new(text.parse::<$rust>().map_err(|_| {
                Error::invalid_data(format!("can't parse '{}' as {}", text, $target))
            })?) as Arc<AnyData>
        };
    }

    let payload = match kind {
        Kind::Bool => parse_as!(bool, "Bool"),
        Kind::Int8 => parse_as!(i8, "Int8"),
        Kind::UInt8 => parse_as!(u8, "UInt8"),
        Kind::Int16 => parse_as!(i16, "Int16"),
        Kind::UInt16 => parse_as!(u16, "UInt16"),
        Kind::Int32 => parse_as!(i32, "Int32"),
        Kind::UInt32 => parse_as!(u32, "UInt32"),
        Kind::Int64 => parse_as!(i64, "Int64"),
        Kind::UInt64 => parse_as!(u64, "UInt64"),
        Kind::Float32 => parse_as!(f32, "Float32"),
        Kind::Float64 => parse_as!(f64, "Float64"),
        other => {
            return Err(Error::type_error(format!(
                "kind '{}' is not a primitive",
                other.name()
            )))
        }
    };
    Ok(payload)
}

fn render_primitive(node: &Node) -> Result<String, Error> {
    match node.node_type() {
        NodeType::Bool => Ok(node.get_primitive::<bool>()?.to_string()),
        NodeType::UInt64 => Ok(node.uint_value()?.to_string()),
        node_type if crate::types::is_int_node_type(node_type) => {
            Ok(node.int_value()?.to_string())
        }
        node_type if crate::types::is_float_node_type(node_type) => {
            Ok(node.float_value()?.to_string())
        }
        other => Err(Error::type_error(format!(
            "node of type {} has no textual form",
            other.name()
        ))),
    }
}
