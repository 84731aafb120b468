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

use arbor::tree::{Node, TreeMap};
use arbor::types::NodeType;

// Round-trip of every fixed-width primitive at its extremes, bit-for-bit.
#[test]
fn test_primitive_round_trips() {
    let mut node = Node::new();

    macro_rules! check {
        ($ty:ty, $($value:expr),+) => {
            $(
                let v: $ty = $value;
                node.set_primitive(v);
                assert_eq!(node.get_primitive::<$ty>().unwrap(), v);
            )+
        };
    }

    check!(bool, false, true);
    check!(i8, i8::MIN, i8::MAX, 17);
    check!(u8, u8::MIN, u8::MAX, 17);
    check!(i16, i16::MIN, i16::MAX, -2000);
    check!(u16, u16::MIN, u16::MAX, 2000);
    check!(i32, i32::MIN, i32::MAX, -123456);
    check!(u32, u32::MIN, u32::MAX, 123456);
    check!(i64, i64::MIN, i64::MAX, -1);
    check!(u64, u64::MIN, u64::MAX, 1);
    check!(f32, f32::MIN, f32::MAX, 0.25);
    check!(f64, f64::MIN, f64::MAX, -0.125);
}

#[test]
fn test_generic_integer_and_float() {
    let mut node = Node::new();
    node.set_integer(-42);
    assert_eq!(node.node_type(), NodeType::Integer);
    assert_eq!(node.get_integer().unwrap(), -42);
    node.set_float(2.5);
    assert_eq!(node.node_type(), NodeType::Float);
    assert_eq!(node.get_float().unwrap(), 2.5);
    // generic accessors are exact, not width-adapting
    node.set_primitive(1i32);
    assert!(node.get_integer().is_err());
}

#[test]
fn test_copy_independence() {
    let mut original = Node::new();
    original["list"].get_vector_mut().unwrap().push(Node::from(1i64));
    original["map"]["x"].set_string("y");

    let mut copy = original.clone();
    copy["list"].get_vector_mut().unwrap().push(Node::from(2i64));
    copy["map"]["x"].set_string("z");

    assert_eq!(original["list"].get_vector().unwrap().len(), 1);
    assert_eq!(original["map"]["x"].get_string().unwrap(), "y");
    assert_eq!(copy["list"].get_vector().unwrap().len(), 2);
    assert_eq!(copy["map"]["x"].get_string().unwrap(), "z");
}

#[test]
fn test_take_leaves_source_usable() {
    let mut node = Node::new();
    node["a"].set_integer(1);
    let taken = node.take();
    assert!(node.is_undefined());
    assert_eq!(taken["a"].get_integer().unwrap(), 1);
    // the source accepts a fresh assignment without complaint
    node.set_string("again");
    assert_eq!(node.get_string().unwrap(), "again");
}

#[test]
fn test_tree_map_insertion_order_and_lookup() {
    let mut map = TreeMap::new();
    for i in 0..10 {
        map.insert(format!("node_{}", i), Node::from(i as i64));
    }
    for i in 0..10 {
        let (key, node) = map.get_index(i).unwrap();
        assert_eq!(key, format!("node_{}", i));
        assert_eq!(node.get_integer().unwrap(), i as i64);
    }
    assert_eq!(map.get("node_5").unwrap().get_integer().unwrap(), 5);
}

#[test]
fn test_auto_vivification_chain() {
    let mut tree = Node::new();
    tree["a"]["b"]["c"].set_integer(1);
    assert_eq!(tree["a"]["b"]["c"].get_integer().unwrap(), 1);
    assert_eq!(tree["a"].node_type(), NodeType::Map);

    // vector access never grows by index
    let mut vec_node = Node::new();
    vec_node.get_vector_mut().unwrap().push(Node::from(0i64));
    assert_eq!(vec_node[0].get_integer().unwrap(), 0);
}

#[test]
#[should_panic(expected = "out of bounds")]
fn test_vector_index_out_of_bounds_panics() {
    let mut node = Node::new();
    node.get_vector_mut().unwrap().push(Node::from(0i64));
    let _ = &node[3];
}

#[test]
fn test_classification() {
    let mut node = Node::new();
    node.set_primitive(1u16);
    assert!(node.is_primitive());
    assert!(node.is_int_primitive());
    assert!(!node.is_float_primitive());
    assert_eq!(node.primitive_data_size(), Some(2));

    node.set_float(0.0);
    assert!(node.is_float_primitive());
    assert_eq!(node.primitive_data_size(), Some(8));

    node.set_string("s");
    assert!(!node.is_primitive());
    assert_eq!(node.primitive_data_size(), None);
}

#[test]
fn test_attributes_follow_the_node() {
    let mut node = Node::from("payload");
    node.set_attribute("charset", "utf-8");

    let copy = node.clone();
    assert_eq!(copy.attributes().unwrap().get("charset"), Some("utf-8"));

    // attributes survive representation changes
    node.set_integer(1);
    assert_eq!(node.attributes().unwrap().get("charset"), Some("utf-8"));
}

#[test]
fn test_pairs_allow_duplicate_keys() {
    let mut node = Node::new();
    let pairs = node.get_pairs_mut().unwrap();
    pairs.push(("k".to_string(), Node::from(1i64)));
    pairs.push(("k".to_string(), Node::from(2i64)));
    assert_eq!(node.get_pairs().unwrap().len(), 2);

    let mut map_node = Node::new();
    map_node.get_map_mut().unwrap().insert("k", Node::from(1i64));
    map_node.get_map_mut().unwrap().insert("k", Node::from(2i64));
    assert_eq!(map_node.get_map().unwrap().len(), 1);
    assert_eq!(map_node["k"].get_integer().unwrap(), 2);
}

#[test]
fn test_debug_print_stable() {
    let mut tree = Node::new();
    tree["a"].set_integer(1);
    tree["b"].get_vector_mut().unwrap().push(Node::from("x"));
    let first = tree.debug_print(0, 2, false);
    let second = tree.clone().debug_print(0, 2, false);
    assert_eq!(first, second);
    assert!(first.contains("'a': integer: 1"));
}
