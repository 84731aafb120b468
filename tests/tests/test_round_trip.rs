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
use arbor::mapper::{
    ObjectToTreeConfig, ObjectToTreeMapper, ObjectToTreeState, TreeToObjectConfig,
    TreeToObjectMapper, TreeToObjectState,
};
use test_helpers::{person_type, person_value_of, sample_person, Person};

// Object → tree → object reproduces every field, and stays stable under
// repeated round-trips.
#[test]
fn test_object_round_trip_through_tree() {
    let original = sample_person();
    let o2t = ObjectToTreeConfig::default();
    let t2o = TreeToObjectConfig::default();

    let mut current = original.clone();
    for _ in 0..3 {
        let mut write_state = ObjectToTreeState::new(&o2t);
        let tree = ObjectToTreeMapper::map(&mut write_state, &person_value_of(current.clone()));
        assert!(write_state.errors.is_empty(), "{}", write_state.errors.to_message());

        let mut read_state = TreeToObjectState::new(&t2o);
        let value = TreeToObjectMapper::map(&mut read_state, &tree, &person_type());
        assert!(read_state.errors.is_empty(), "{}", read_state.errors.to_message());

        current = value.downcast_ref::<Person>().unwrap().clone();
        assert_eq!(current, original);
    }
}

#[test]
fn test_object_round_trip_through_json() {
    let mapper = ObjectMapper::default();
    let original = sample_person();

    let text = mapper.write_to_string(&person_value_of(original.clone())).unwrap();
    let value = mapper.read_from_str(&text, &person_type()).unwrap();
    let person = value.downcast_ref::<Person>().unwrap();
    assert_eq!(*person, original);

    // a second pass produces the identical document
    let text2 = mapper
        .write_to_string(&person_value_of(person.clone()))
        .unwrap();
    assert_eq!(text, text2);
}

#[test]
fn test_write_with_omitted_nulls_round_trips() {
    let mapper = ObjectMapper::default().include_null_fields(false);
    let original = Person {
        name: Some("Bo".to_string()),
        age: Some(7),
        ..Person::default()
    };
    let text = mapper.write_to_string(&person_value_of(original.clone())).unwrap();
    assert_eq!(text, r#"{"name":"Bo","age":7}"#);

    let value = mapper.read_from_str(&text, &person_type()).unwrap();
    assert_eq!(*value.downcast_ref::<Person>().unwrap(), original);
}

#[test]
fn test_read_from_caret_leaves_position() {
    let mapper = ObjectMapper::default();
    let input = r#"{"name":"Bo"} trailing"#;
    let mut caret = arbor::buffer::Caret::new(input);
    let value = mapper.read_from_caret(&mut caret, &person_type()).unwrap();
    assert_eq!(
        value
            .downcast_ref::<Person>()
            .unwrap()
            .name
            .as_deref(),
        Some("Bo")
    );
    caret.skip_blank_chars();
    assert!(caret.is_at_text("trailing"));
}
