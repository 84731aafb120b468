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

//! The `Any` kind: a type-erased box around a concretely typed value,
//! plus the canonical container types the tree-to-object mapper guesses
//! into when the target is `Any`.

use std::fmt;
use std::sync::{Arc, LazyLock};

use crate::reflect::collection::{CollectionDispatcher, MapDispatcher};
use crate::reflect::primitives::any_type;
use crate::reflect::{Type, Value};

/// Payload of a [`crate::reflect::Kind::Any`] value: the held concrete
/// value, or nothing.
#[derive(Clone, Default)]
pub struct AnyBox {
    value: Option<Value>,
}

impl AnyBox {
    pub fn new(value: Value) -> AnyBox {
        AnyBox { value: Some(value) }
    }

    pub fn empty() -> AnyBox {
        AnyBox { value: None }
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }
}

impl fmt::Debug for AnyBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "AnyBox({:?})", value),
            None => f.write_str("AnyBox(empty)"),
        }
    }
}

static ANY_VECTOR_TYPE: LazyLock<Arc<Type>> = LazyLock::new(|| {
    Arc::new(Type::collection(
        "Vector<Any>",
        CollectionDispatcher::of_nullable_vec::<AnyBox>(any_type()),
    ))
});

/// Canonical `Vector<Any>`, the shape-guess target for `Vector` nodes.
pub fn any_vector_type() -> Arc<Type> {
    ANY_VECTOR_TYPE.clone()
}

static ANY_FIELDS_TYPE: LazyLock<Arc<Type>> = LazyLock::new(|| {
    Arc::new(Type::map(
        "Fields<Any>",
        MapDispatcher::of_entries::<AnyBox>(any_type()),
    ))
});

/// Canonical `Fields<Any>`, the shape-guess target for `Map` nodes.
pub fn any_fields_type() -> Arc<Type> {
    ANY_FIELDS_TYPE.clone()
}
