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

use arbor::json::ObjectMapper;
use arbor::mapper::{TreeToObjectConfig, TreeToObjectMapper, TreeToObjectState};
use arbor::reflect::any::{any_fields_type, any_vector_type};
use arbor::reflect::primitives::any_type;
use arbor::reflect::{AnyBox, Value};
use arbor::tree::Node;
use test_helpers::string_type;

fn map_any(node: &Node) -> Value {
    let config = TreeToObjectConfig::default();
    let mut state = TreeToObjectState::new(&config);
    let value = TreeToObjectMapper::map(&mut state, node, &any_type());
    assert!(state.errors.is_empty(), "{}", state.errors.to_message());
    value
}

// Shape-guessing: the concrete type comes from the node discriminant.
#[test]
fn test_any_guesses_scalars() {
    let value = map_any(&Node::from("text"));
    let inner = value.downcast_ref::<AnyBox>().unwrap().value().unwrap();
    assert_eq!(inner.downcast_ref::<String>().map(String::as_str), Some("text"));

    let value = map_any(&Node::from(41i64));
    let inner = value.downcast_ref::<AnyBox>().unwrap().value().unwrap();
    assert_eq!(inner.downcast_ref::<i64>(), Some(&41));

    let value = map_any(&Node::from(true));
    let inner = value.downcast_ref::<AnyBox>().unwrap().value().unwrap();
    assert_eq!(inner.downcast_ref::<bool>(), Some(&true));

    let value = map_any(&Node::from(2.5f64));
    let inner = value.downcast_ref::<AnyBox>().unwrap().value().unwrap();
    assert_eq!(inner.downcast_ref::<f64>(), Some(&2.5));

    let mut node = Node::new();
    node.set_primitive(9u16);
    let value = map_any(&node);
    let inner = value.downcast_ref::<AnyBox>().unwrap().value().unwrap();
    assert_eq!(inner.downcast_ref::<u16>(), Some(&9));
}

#[test]
fn test_any_guesses_containers() {
    let mut node = Node::new();
    node.get_vector_mut()
        .unwrap()
        .extend([Node::from(1i64), Node::from("two")]);
    let value = map_any(&node);
    assert_eq!(value.ty().name(), any_vector_type().name());
    let items = value.downcast_ref::<Vec<Option<AnyBox>>>().unwrap();
    assert_eq!(items.len(), 2);
    let first = items[0].as_ref().unwrap().value().unwrap();
    assert_eq!(first.downcast_ref::<i64>(), Some(&1));

    let mut node = Node::new();
    node["k"].set_string("v");
    let value = map_any(&node);
    assert_eq!(value.ty().name(), any_fields_type().name());
    let entries = value.downcast_ref::<Vec<(String, Option<AnyBox>)>>().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].0, "k");
}

#[test]
fn test_any_null() {
    let value = map_any(&Node::null());
    assert!(value.is_null());
}

// Any values serialize through the held concrete value.
#[test]
fn test_any_writes_held_value() {
    let mapper = ObjectMapper::default();
    let inner = Value::new(&string_type(), "held".to_string());
    let value = Value::new(&any_type(), AnyBox::new(inner));
    assert_eq!(mapper.write_to_string(&value).unwrap(), "\"held\"");

    let empty = Value::new(&any_type(), AnyBox::empty());
    assert_eq!(mapper.write_to_string(&empty).unwrap(), "null");
}

// A nested mixed document survives any-typed read + write.
#[test]
fn test_any_json_round_trip() {
    let mapper = ObjectMapper::default();
    let input = r#"{"a":1,"b":[true,"x",2.5],"c":{"d":null}}"#;
    let value = mapper.read_from_str(input, &any_type()).unwrap();
    let output = mapper.write_to_string(&value).unwrap();
    assert_eq!(output, input);
}
