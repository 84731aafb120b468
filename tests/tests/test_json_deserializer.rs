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

use arbor::json::{self, DeserializerConfig, SerializerConfig};
use arbor::types::NodeType;

fn from_str(input: &str) -> arbor::tree::Node {
    json::from_str(input, &DeserializerConfig::default()).unwrap()
}

// The concrete scenario: parse, inspect, re-serialize byte-identical.
#[test]
fn test_concrete_scenario() {
    let input = r#"{"a":1,"b":[1,2,3],"c":{"x":"y"}}"#;
    let tree = from_str(input);

    assert_eq!(tree["a"].node_type(), NodeType::Integer);
    assert_eq!(tree["a"].get_integer().unwrap(), 1);
    assert_eq!(tree["b"].get_vector().unwrap().len(), 3);
    assert_eq!(tree["c"]["x"].get_string().unwrap(), "y");

    let round = json::to_string(&tree, &SerializerConfig::default()).unwrap();
    assert_eq!(round, input);
}

// The decimal-point lookahead, not a format flag, decides the kind.
#[test]
fn test_integer_vs_float_disambiguation() {
    let tree = from_str(r#"{"int":42,"float":42.0,"exp":1e3,"neg":-7}"#);
    assert_eq!(tree["int"].node_type(), NodeType::Integer);
    assert_eq!(tree["int"].get_integer().unwrap(), 42);
    assert_eq!(tree["float"].node_type(), NodeType::Float);
    assert_eq!(tree["float"].get_float().unwrap(), 42.0);
    assert_eq!(tree["exp"].node_type(), NodeType::Float);
    assert_eq!(tree["exp"].get_float().unwrap(), 1000.0);
    assert_eq!(tree["neg"].get_integer().unwrap(), -7);
}

#[test]
fn test_literals_and_whitespace() {
    let tree = from_str(" { \"a\" : null , \"b\" : true , \"c\" : false } ");
    assert!(tree["a"].is_null());
    assert!(tree["b"].get_bool().unwrap());
    assert!(!tree["c"].get_bool().unwrap());
}

#[test]
fn test_string_unescaping() {
    let tree = from_str(r#"{"s":"line\nquote\" slash\/ wide😀"}"#);
    assert_eq!(
        tree["s"].get_string().unwrap(),
        "line\nquote\" slash/ wide\u{1f600}"
    );
}

#[test]
fn test_duplicate_keys_last_write_wins() {
    let tree = from_str(r#"{"k":1,"k":2}"#);
    assert_eq!(tree.get_map().unwrap().len(), 1);
    assert_eq!(tree["k"].get_integer().unwrap(), 2);
}

#[test]
fn test_syntax_errors_carry_position_and_frames() {
    let err = json::from_str("{\"a\":[1,oops]}", &DeserializerConfig::default()).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("unexpected character 'o'"));
    assert!(message.contains("position 8"));
    assert!(message.contains("index=1"));
    assert!(message.contains("key='a'"));
}

#[test]
fn test_unterminated_string() {
    let err = json::from_str("\"abc", &DeserializerConfig::default()).unwrap_err();
    assert!(err.to_string().contains("Expected '\"'"));
}

#[test]
fn test_invalid_escape_rejected() {
    assert!(json::from_str(r#""bad\q""#, &DeserializerConfig::default()).is_err());
    assert!(json::from_str(r#""lonely\ud800""#, &DeserializerConfig::default()).is_err());
}

#[test]
fn test_trailing_garbage_rejected() {
    assert!(json::from_str("1 2", &DeserializerConfig::default()).is_err());
    assert!(json::from_str("{} extra", &DeserializerConfig::default()).is_err());
    assert!(json::from_str("[1] ", &DeserializerConfig::default()).is_ok());
}

#[test]
fn test_depth_limit() {
    let deep = format!("{}1{}", "[".repeat(40), "]".repeat(40));
    let config = DeserializerConfig { max_depth: 32 };
    let err = json::from_str(&deep, &config).unwrap_err();
    assert!(err.to_string().contains("max nesting depth 32 exceeded"));

    let shallow = format!("{}1{}", "[".repeat(10), "]".repeat(10));
    assert!(json::from_str(&shallow, &config).is_ok());
}

// Serialize → deserialize reproduces the tree, modulo the documented
// generic-width boundary: every kind comes back as Integer/Float.
#[test]
fn test_json_round_trip_all_kinds() {
    let mut tree = arbor::tree::Node::new();
    tree["null"].set_null();
    tree["bool"].set_primitive(true);
    tree["int"].set_integer(-5);
    tree["i32"].set_primitive(123i32);
    tree["u64"].set_primitive(17u64);
    tree["float"].set_float(2.5);
    tree["f32"].set_primitive(1.25f32);
    tree["str"].set_string("text");
    tree["vec"].get_vector_mut().unwrap().push(arbor::tree::Node::from(1i64));
    tree["map"]["k"].set_string("v");

    let text = json::to_string(&tree, &SerializerConfig::default()).unwrap();
    let parsed = from_str(&text);

    assert!(parsed["null"].is_null());
    assert!(parsed["bool"].get_bool().unwrap());
    assert_eq!(parsed["int"].get_integer().unwrap(), -5);
    assert_eq!(parsed["i32"].get_integer().unwrap(), 123);
    assert_eq!(parsed["u64"].get_integer().unwrap(), 17);
    assert_eq!(parsed["float"].get_float().unwrap(), 2.5);
    assert_eq!(parsed["f32"].get_float().unwrap(), 1.25);
    assert_eq!(parsed["str"].get_string().unwrap(), "text");
    assert_eq!(parsed["vec"].get_vector().unwrap().len(), 1);
    assert_eq!(parsed["map"]["k"].get_string().unwrap(), "v");

    // a second round-trip is byte-stable
    let text2 = json::to_string(&parsed, &SerializerConfig::default()).unwrap();
    let parsed2 = from_str(&text2);
    assert_eq!(
        parsed.debug_print(0, 2, false),
        parsed2.debug_print(0, 2, false)
    );
}
