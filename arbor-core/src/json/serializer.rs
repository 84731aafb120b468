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

//! Streaming tree → JSON text.

use std::borrow::Cow;

use crate::buffer::OutputStream;
use crate::error::ErrorStack;
use crate::json::beautifier::Beautifier;
use crate::json::utils::escape_string;
use crate::tree::{Node, Repr};

#[derive(Clone, Debug)]
pub struct SerializerConfig {
    /// Emit null vector elements instead of skipping them.
    pub include_null_elements: bool,
    /// Wrap the output stream in the indentation decorator.
    pub use_beautifier: bool,
    /// Indentation unit of the beautifier.
    pub beautifier_indent: Cow<'static, str>,
    /// String escaping flags, see [`crate::json::utils`].
    pub escape_flags: u32,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        SerializerConfig {
            include_null_elements: true,
            use_beautifier: false,
            beautifier_indent: Cow::Borrowed("  "),
            escape_flags: 0,
        }
    }
}

pub struct SerializerState<'c> {
    pub config: &'c SerializerConfig,
    pub errors: ErrorStack,
}

impl<'c> SerializerState<'c> {
    pub fn new(config: &'c SerializerConfig) -> Self {
        SerializerState {
            config,
            errors: ErrorStack::new(),
        }
    }
}

/// Recursive-descent writer dispatching purely on the node discriminant.
pub struct Serializer;

impl Serializer {
    /// Serializes `node` into `stream`. Failures (an `Undefined` node, a
    /// non-finite float) accumulate in `state.errors` with positional
    /// frames; the stream may then hold a partial document.
    pub fn serialize<W: OutputStream>(state: &mut SerializerState, stream: &mut W, node: &Node) {
        if state.config.use_beautifier {
            let indent = state.config.beautifier_indent.clone();
            let mut beautifier = Beautifier::new(stream, indent.as_ref());
            Self::serialize_node(state, &mut beautifier, node);
        } else {
            Self::serialize_node(state, stream, node);
        }
    }

    fn serialize_node<W: OutputStream>(state: &mut SerializerState, stream: &mut W, node: &Node) {
        match &node.repr {
            Repr::Undefined => {
                state.errors.push("Undefined node is not serializable");
            }
            Repr::Null => stream.write_str("null"),
            Repr::Bool(v) => stream.write_str(if *v { "true" } else { "false" }),
            Repr::Integer(v) | Repr::Int64(v) => stream.write_as_string(v),
            Repr::Int8(v) => stream.write_as_string(v),
            Repr::UInt8(v) => stream.write_as_string(v),
            Repr::Int16(v) => stream.write_as_string(v),
            Repr::UInt16(v) => stream.write_as_string(v),
            Repr::Int32(v) => stream.write_as_string(v),
            Repr::UInt32(v) => stream.write_as_string(v),
            Repr::UInt64(v) => stream.write_as_string(v),
            Repr::Float(v) | Repr::Float64(v) => write_float(state, stream, *v),
            Repr::Float32(v) => write_float32(state, stream, *v),
            Repr::String(text) => write_string(state, stream, text),
            Repr::Vector(items) => Self::serialize_vector(state, stream, items),
            Repr::Map(map) => {
                let entries = map.iter();
                Self::serialize_entries(state, stream, entries);
            }
            Repr::Pairs(pairs) => {
                let entries = pairs.iter().map(|(k, v)| (k.as_str(), v));
                Self::serialize_entries(state, stream, entries);
            }
        }
    }

    fn serialize_vector<W: OutputStream>(
        state: &mut SerializerState,
        stream: &mut W,
        items: &[Node],
    ) {
        stream.write_char(b'[');
        let mut first = true;
        for (index, item) in items.iter().enumerate() {
            if item.is_null() && !state.config.include_null_elements {
                continue;
            }
            if !first {
                stream.write_char(b',');
            }
            first = false;
            let before = state.errors.len();
            Self::serialize_node(state, stream, item);
            if state.errors.len() > before {
                state.errors.push(format!("index={}", index));
                return;
            }
        }
        stream.write_char(b']');
    }

    fn serialize_entries<'n, W: OutputStream, I>(
        state: &mut SerializerState,
        stream: &mut W,
        entries: I,
    ) where
        I: Iterator<Item = (&'n str, &'n Node)>,
    {
        stream.write_char(b'{');
        let mut first = true;
        for (key, node) in entries {
            if !first {
                stream.write_char(b',');
            }
            first = false;
            write_string(state, stream, key);
            stream.write_char(b':');
            let before = state.errors.len();
            Self::serialize_node(state, stream, node);
            if state.errors.len() > before {
                state.errors.push(format!("key='{}'", key));
                return;
            }
        }
        stream.write_char(b'}');
    }
}

fn write_string<W: OutputStream>(state: &mut SerializerState, stream: &mut W, text: &str) {
    stream.write_char(b'"');
    stream.write_str(&escape_string(text, state.config.escape_flags));
    stream.write_char(b'"');
}

/// Canonical float form: shortest round-trip rendering, with `.0`
/// appended when it carries no decimal point or exponent, so a float
/// re-reads as a float under the decimal-point lookahead.
fn write_float<W: OutputStream>(state: &mut SerializerState, stream: &mut W, value: f64) {
    if !value.is_finite() {
        state
            .errors
            .push(format!("non-finite float {} is not serializable", value));
        return;
    }
    let text = value.to_string();
    let has_separator = text.contains('.') || text.contains('e') || text.contains('E');
    stream.write_str(&text);
    if !has_separator {
        stream.write_str(".0");
    }
}

fn write_float32<W: OutputStream>(state: &mut SerializerState, stream: &mut W, value: f32) {
    if !value.is_finite() {
        state
            .errors
            .push(format!("non-finite float {} is not serializable", value));
        return;
    }
    let text = value.to_string();
    let has_separator = text.contains('.') || text.contains('e') || text.contains('E');
    stream.write_str(&text);
    if !has_separator {
        stream.write_str(".0");
    }
}
