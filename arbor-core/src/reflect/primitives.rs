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

//! Canonical descriptors for the dispatcherless kinds. Each accessor
//! hands out a clone of one shared `Arc<Type>`, so type identity is
//! stable across the process.

use std::sync::{Arc, LazyLock};

use crate::reflect::{Kind, Type};

macro_rules! simple_type {
    ($static_name:ident, $fn_name:ident, $kind:ident, $name:literal) => {
        static $static_name: LazyLock<Arc<Type>> =
            LazyLock::new(|| Arc::new(Type::new(Kind::$kind, $name)));

        pub fn $fn_name() -> Arc<Type> {
            $static_name.clone()
        }
    };
}

simple_type!(BOOL_TYPE, bool_type, Bool, "Bool");
simple_type!(INT8_TYPE, int8_type, Int8, "Int8");
simple_type!(UINT8_TYPE, uint8_type, UInt8, "UInt8");
simple_type!(INT16_TYPE, int16_type, Int16, "Int16");
simple_type!(UINT16_TYPE, uint16_type, UInt16, "UInt16");
simple_type!(INT32_TYPE, int32_type, Int32, "Int32");
simple_type!(UINT32_TYPE, uint32_type, UInt32, "UInt32");
simple_type!(INT64_TYPE, int64_type, Int64, "Int64");
simple_type!(UINT64_TYPE, uint64_type, UInt64, "UInt64");
simple_type!(FLOAT32_TYPE, float32_type, Float32, "Float32");
simple_type!(FLOAT64_TYPE, float64_type, Float64, "Float64");
simple_type!(STRING_TYPE, string_type, String, "String");
simple_type!(ANY_TYPE, any_type, Any, "Any");
simple_type!(TREE_TYPE, tree_type, Tree, "Tree");
