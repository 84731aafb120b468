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

//! JSON codec over the tree, plus the [`ObjectMapper`] facade.

pub mod beautifier;
pub mod deserializer;
pub mod mapper;
pub mod serializer;
pub mod utils;

pub use beautifier::Beautifier;
pub use deserializer::{Deserializer, DeserializerConfig, DeserializerState};
pub use mapper::ObjectMapper;
pub use serializer::{Serializer, SerializerConfig, SerializerState};

use crate::buffer::{BufferStream, Caret};
use crate::error::Error;
use crate::tree::Node;

/// Serializes a tree to a JSON string, aggregating any error stack into
/// one error.
pub fn to_string(node: &Node, config: &SerializerConfig) -> Result<String, Error> {
    let mut stream = BufferStream::new();
    let mut state = SerializerState::new(config);
    Serializer::serialize(&mut state, &mut stream, node);
    if !state.errors.is_empty() {
        return Err(state.errors.into_error());
    }
    stream.into_string()
}

/// Parses a complete JSON document into a tree; trailing non-blank input
/// is an error.
pub fn from_str(input: &str, config: &DeserializerConfig) -> Result<Node, Error> {
    let mut caret = Caret::new(input);
    let mut state = DeserializerState::new(config);
    let node = Deserializer::deserialize(&mut state, &mut caret);
    if !state.errors.is_empty() {
        return Err(state.errors.into_error());
    }
    caret.skip_blank_chars();
    if !caret.is_at_end() {
        return Err(Error::parse_error(
            "unexpected trailing characters",
            caret.position(),
        ));
    }
    Ok(node)
}
