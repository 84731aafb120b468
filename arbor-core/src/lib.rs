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

//! # Arbor Core
//!
//! This is the core implementation of the Arbor object mapping
//! framework: a bidirectional conversion engine between
//! reflection-described typed values and a dynamically-typed tree, plus
//! a streaming JSON codec over that tree.
//!
//! ## Architecture
//!
//! - **`tree`**: the dynamic [`tree::Node`] value model (tagged union,
//!   insertion-ordered map, duplicate-key pairs, attributes side-channel)
//! - **`reflect`**: the consumed reflection boundary (type descriptors,
//!   per-kind dispatchers, typed values)
//! - **`mapper`**: the two dispatch engines (object ⇄ tree) and their
//!   orchestration
//! - **`json`**: streaming serializer/deserializer over trees and the
//!   [`json::ObjectMapper`] facade
//! - **`buffer`**: the stream boundary (output sink, parsing caret)
//! - **`error`**: error types and the recursive [`error::ErrorStack`]
//! - **`types`**: the node discriminant and classification helpers
//!
//! ## Data flow
//!
//! Writing: typed value to tree (`ObjectToTreeMapper`), tree to bytes
//! (`json::Serializer`). Reading: bytes to tree (`json::Deserializer`),
//! tree to typed value (`TreeToObjectMapper`). `ObjectRemapper` pivots
//! object to object through the tree with no byte form in between.
//!
//! ## Error model
//!
//! Recoverable mapping and grammar failures accumulate as contextual
//! frames in an [`error::ErrorStack`] threaded through the recursion, so
//! partial results stay inspectable, and only facade entry points
//! convert a non-empty stack into one [`error::Error`].
//!
//! ```
//! use arbor_core::json::ObjectMapper;
//!
//! let mapper = ObjectMapper::default();
//! let tree = mapper.read_tree_from_str(r#"{"a":1,"b":[1,2,3]}"#).unwrap();
//! assert_eq!(tree["a"].get_integer().unwrap(), 1);
//! assert_eq!(mapper.write_tree_to_string(&tree).unwrap(), r#"{"a":1,"b":[1,2,3]}"#);
//! ```

pub mod buffer;
pub mod error;
pub mod json;
pub mod mapper;
pub mod reflect;
pub mod tree;
pub mod types;
