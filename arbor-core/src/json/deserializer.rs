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

//! Streaming JSON text → tree.
//!
//! Recursive descent dispatching on one byte of lookahead. Numeric
//! tokens pick `Integer` vs `Float` by scanning the token for a decimal
//! separator or exponent. Grammar failures accumulate in the error stack
//! with `index=N` / `key='..'` frames, mirroring the mappers.

use crate::buffer::Caret;
use crate::error::{Error, ErrorStack};
use crate::tree::{Node, TreeMap};

#[derive(Clone, Debug)]
pub struct DeserializerConfig {
    /// Maximum nesting depth accepted before failing, a guard against
    /// adversarial input.
    pub max_depth: u32,
}

impl Default for DeserializerConfig {
    fn default() -> Self {
        DeserializerConfig { max_depth: 32 }
    }
}

pub struct DeserializerState<'c> {
    pub config: &'c DeserializerConfig,
    pub errors: ErrorStack,
    depth: u32,
}

impl<'c> DeserializerState<'c> {
    pub fn new(config: &'c DeserializerConfig) -> Self {
        DeserializerState {
            config,
            errors: ErrorStack::new(),
            depth: 0,
        }
    }
}

pub struct Deserializer;

impl Deserializer {
    /// Parses one JSON value at the caret. On failure the returned node
    /// is `Undefined` and `state.errors` holds the frame trace; the
    /// caret stays where parsing stopped.
    pub fn deserialize(state: &mut DeserializerState, caret: &mut Caret) -> Node {
        if state.depth >= state.config.max_depth {
            state.errors.push(
                Error::depth_exceed(format!(
                    "max nesting depth {} exceeded at position {}",
                    state.config.max_depth,
                    caret.position()
                ))
                .to_string(),
            );
            return Node::new();
        }
        state.depth += 1;
        let node = Self::deserialize_value(state, caret);
        state.depth -= 1;
        node
    }

    fn deserialize_value(state: &mut DeserializerState, caret: &mut Caret) -> Node {
        caret.skip_blank_chars();
        match caret.peek() {
            None => {
                state.errors.push(
                    Error::parse_error("unexpected end of input", caret.position()).to_string(),
                );
                Node::new()
            }
            Some(b'n') => Self::deserialize_null(state, caret),
            Some(b't') | Some(b'f') => Self::deserialize_bool(state, caret),
            Some(b'"') => Self::deserialize_string(state, caret),
            Some(b'{') => Self::deserialize_map(state, caret),
            Some(b'[') => Self::deserialize_vector(state, caret),
            Some(c) if c == b'-' || c.is_ascii_digit() => Self::deserialize_number(state, caret),
            Some(c) => {
                state.errors.push(
                    Error::parse_error(
                        format!("unexpected character '{}'", c as char),
                        caret.position(),
                    )
                    .to_string(),
                );
                Node::new()
            }
        }
    }

    fn deserialize_null(state: &mut DeserializerState, caret: &mut Caret) -> Node {
        if caret.skip_text("null") {
            Node::null()
        } else {
            state.errors.push(
                Error::parse_error("invalid literal, expected 'null'", caret.position())
                    .to_string(),
            );
            Node::new()
        }
    }

    fn deserialize_bool(state: &mut DeserializerState, caret: &mut Caret) -> Node {
        let mut node = Node::new();
        if caret.skip_text("true") {
            node.set_primitive(true);
        } else if caret.skip_text("false") {
            node.set_primitive(false);
        } else {
            state.errors.push(
                Error::parse_error(
                    "invalid literal, expected 'true' or 'false'",
                    caret.position(),
                )
                .to_string(),
            );
        }
        node
    }

    fn deserialize_number(state: &mut DeserializerState, caret: &mut Caret) -> Node {
        let mut node = Node::new();
        if caret.number_is_float() {
            match caret.parse_float() {
                Ok(value) => node.set_float(value),
                Err(e) => state.errors.push(e.to_string()),
            }
        } else {
            match caret.parse_integer() {
                Ok(value) => node.set_integer(value),
                Err(e) => state.errors.push(e.to_string()),
            }
        }
        node
    }

    fn deserialize_string(state: &mut DeserializerState, caret: &mut Caret) -> Node {
        match read_string_literal(caret) {
            Ok(text) => {
                let mut node = Node::new();
                node.set_string(text);
                node
            }
            Err(e) => {
                state.errors.push(e.to_string());
                Node::new()
            }
        }
    }

    fn deserialize_vector(state: &mut DeserializerState, caret: &mut Caret) -> Node {
        caret.advance(); // '['
        let mut items: Vec<Node> = Vec::new();
        caret.skip_blank_chars();
        if caret.consume_char(b']') {
            let mut node = Node::new();
            node.set_vector(items);
            return node;
        }
        loop {
            let index = items.len();
            let before = state.errors.len();
            let item = Self::deserialize(state, caret);
            if state.errors.len() > before {
                state.errors.push(format!("index={}", index));
                return Node::new();
            }
            items.push(item);
            caret.skip_blank_chars();
            if caret.consume_char(b',') {
                continue;
            }
            if caret.consume_char(b']') {
                break;
            }
            state.errors.push(
                Error::parse_error("expected ',' or ']'", caret.position()).to_string(),
            );
            return Node::new();
        }
        let mut node = Node::new();
        node.set_vector(items);
        node
    }

    fn deserialize_map(state: &mut DeserializerState, caret: &mut Caret) -> Node {
        caret.advance(); // '{'
        let mut map = TreeMap::new();
        caret.skip_blank_chars();
        if caret.consume_char(b'}') {
            let mut node = Node::new();
            node.set_map(map);
            return node;
        }
        loop {
            caret.skip_blank_chars();
            let key = match read_string_literal(caret) {
                Ok(key) => key,
                Err(e) => {
                    state.errors.push(e.to_string());
                    return Node::new();
                }
            };
            caret.skip_blank_chars();
            if !caret.consume_char(b':') {
                state
                    .errors
                    .push(Error::parse_error("expected ':'", caret.position()).to_string());
                return Node::new();
            }
            let before = state.errors.len();
            let value = Self::deserialize(state, caret);
            if state.errors.len() > before {
                state.errors.push(format!("key='{}'", key));
                return Node::new();
            }
            // duplicate keys: last write wins
            map.insert(key, value);
            caret.skip_blank_chars();
            if caret.consume_char(b',') {
                continue;
            }
            if caret.consume_char(b'}') {
                break;
            }
            state.errors.push(
                Error::parse_error("expected ',' or '}'", caret.position()).to_string(),
            );
            return Node::new();
        }
        let mut node = Node::new();
        node.set_map(map);
        node
    }
}

/// Reads a quoted string literal at the caret, unescaping the payload.
fn read_string_literal(caret: &mut Caret) -> Result<String, Error> {
    if !caret.consume_char(b'"') {
        return Err(Error::quote_expected(caret.position()));
    }
    let start = caret.position();
    let tail = caret.tail();
    let mut i = 0usize;
    let mut escaped = false;
    loop {
        let Some(&b) = tail.get(i) else {
            return Err(Error::quote_expected(start + i));
        };
        if escaped {
            escaped = false;
        } else if b == b'\\' {
            escaped = true;
        } else if b == b'"' {
            break;
        }
        i += 1;
    }
    // the payload ends right before an ASCII quote, so the slice stays
    // valid UTF-8
    let raw = std::str::from_utf8(&tail[..i])
        .map_err(|_| Error::parse_error("invalid UTF-8 in string literal", start))?;
    let text = crate::json::utils::unescape_string(raw)?;
    caret.set_position(start + i + 1);
    Ok(text)
}
