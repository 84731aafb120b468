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

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Discriminant of a [`crate::tree::Node`].
///
/// `Integer`/`Float` are the arbitrary-width kinds produced by the JSON
/// deserializer; the fixed-width kinds are produced by typed mapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum NodeType {
    Undefined = 0,
    Null = 1,
    Integer = 2,
    Float = 3,
    Bool = 4,
    Int8 = 5,
    UInt8 = 6,
    Int16 = 7,
    UInt16 = 8,
    Int32 = 9,
    UInt32 = 10,
    Int64 = 11,
    UInt64 = 12,
    Float32 = 13,
    Float64 = 14,
    String = 15,
    Vector = 16,
    Map = 17,
    Pairs = 18,
}

impl NodeType {
    /// Human-readable kind name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            NodeType::Undefined => "Undefined",
            NodeType::Null => "Null",
            NodeType::Integer => "Integer",
            NodeType::Float => "Float",
            NodeType::Bool => "Bool",
            NodeType::Int8 => "Int8",
            NodeType::UInt8 => "UInt8",
            NodeType::Int16 => "Int16",
            NodeType::UInt16 => "UInt16",
            NodeType::Int32 => "Int32",
            NodeType::UInt32 => "UInt32",
            NodeType::Int64 => "Int64",
            NodeType::UInt64 => "UInt64",
            NodeType::Float32 => "Float32",
            NodeType::Float64 => "Float64",
            NodeType::String => "String",
            NodeType::Vector => "Vector",
            NodeType::Map => "Map",
            NodeType::Pairs => "Pairs",
        }
    }
}

pub static PRIMITIVE_NODE_TYPES: [NodeType; 13] = [
    NodeType::Integer,
    NodeType::Float,
    NodeType::Bool,
    NodeType::Int8,
    NodeType::UInt8,
    NodeType::Int16,
    NodeType::UInt16,
    NodeType::Int32,
    NodeType::UInt32,
    NodeType::Int64,
    NodeType::UInt64,
    NodeType::Float32,
    NodeType::Float64,
];

#[inline(always)]
pub fn is_primitive_node_type(node_type: NodeType) -> bool {
    matches!(
        node_type,
        NodeType::Integer
            | NodeType::Float
            | NodeType::Bool
            | NodeType::Int8
            | NodeType::UInt8
            | NodeType::Int16
            | NodeType::UInt16
            | NodeType::Int32
            | NodeType::UInt32
            | NodeType::Int64
            | NodeType::UInt64
            | NodeType::Float32
            | NodeType::Float64
    )
}

#[inline(always)]
pub fn is_int_node_type(node_type: NodeType) -> bool {
    matches!(
        node_type,
        NodeType::Integer
            | NodeType::Int8
            | NodeType::UInt8
            | NodeType::Int16
            | NodeType::UInt16
            | NodeType::Int32
            | NodeType::UInt32
            | NodeType::Int64
            | NodeType::UInt64
    )
}

#[inline(always)]
pub fn is_float_node_type(node_type: NodeType) -> bool {
    matches!(
        node_type,
        NodeType::Float | NodeType::Float32 | NodeType::Float64
    )
}

/// Storage width in bytes of a primitive kind, `None` for non-primitives.
pub fn primitive_data_size(node_type: NodeType) -> Option<usize> {
    match node_type {
        NodeType::Bool | NodeType::Int8 | NodeType::UInt8 => Some(1),
        NodeType::Int16 | NodeType::UInt16 => Some(2),
        NodeType::Int32 | NodeType::UInt32 | NodeType::Float32 => Some(4),
        NodeType::Integer
        | NodeType::Float
        | NodeType::Int64
        | NodeType::UInt64
        | NodeType::Float64 => Some(8),
        _ => None,
    }
}
