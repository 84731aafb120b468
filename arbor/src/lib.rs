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

//! # Arbor
//!
//! Arbor is a tree-based object mapping framework. Typed values,
//! described by runtime type descriptors rather than compile-time traits,
//! are converted to and from a dynamically-typed tree, and the tree
//! streams to and from JSON text.
//!
//! ## Usage
//!
//! Trees can be built and serialized directly:
//!
//! ```
//! use arbor::json::ObjectMapper;
//! use arbor::tree::Node;
//!
//! let mut tree = Node::new();
//! tree["name"].set_string("arbor");
//! tree["version"].set_integer(1);
//!
//! let mapper = ObjectMapper::default();
//! let text = mapper.write_tree_to_string(&tree).unwrap();
//! assert_eq!(text, r#"{"name":"arbor","version":1}"#);
//! ```
//!
//! Typed mapping goes through descriptors from [`reflect`]:
//!
//! ```
//! use arbor::json::ObjectMapper;
//! use arbor::reflect::primitives::int64_type;
//!
//! let mapper = ObjectMapper::default();
//! let value = mapper.read_from_str("42", &int64_type()).unwrap();
//! assert_eq!(value.downcast_ref::<i64>(), Some(&42));
//! ```

pub use arbor_core::buffer;
pub use arbor_core::error;
pub use arbor_core::json;
pub use arbor_core::mapper;
pub use arbor_core::reflect;
pub use arbor_core::tree;
pub use arbor_core::types;

pub use arbor_core::error::{Error, ErrorStack};
pub use arbor_core::json::ObjectMapper;
pub use arbor_core::mapper::{ObjectRemapper, ObjectToTreeMapper, TreeToObjectMapper};
pub use arbor_core::tree::Node;
pub use arbor_core::types::NodeType;
