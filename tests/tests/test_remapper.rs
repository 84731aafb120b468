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

use std::sync::{Arc, LazyLock};

use arbor::mapper::ObjectRemapper;
use arbor::reflect::{ObjectDispatcher, Property, Type, Value};
use arbor::tree::Node;
use test_helpers::{opt_value, person_value_of, sample_person, string_type};

// A reduced view of Person: remapping drops the fields the target does
// not declare.
#[derive(Clone, Debug, Default, PartialEq)]
struct Contact {
    name: Option<String>,
}

static CONTACT_TYPE: LazyLock<Arc<Type>> = LazyLock::new(|| {
    let dispatcher = ObjectDispatcher::of::<Contact>().with_property(Property::of::<Contact, _, _, _>(
        "name",
        string_type(),
        |c| opt_value(&string_type(), &c.name),
        |c, v| {
            c.name = v.to_option::<String>()?;
            Ok(())
        },
    ));
    Arc::new(Type::object("Contact", dispatcher))
});

fn contact_type() -> Arc<Type> {
    CONTACT_TYPE.clone()
}

#[test]
fn test_remap_object_to_narrower_type() {
    let remapper = ObjectRemapper::default();
    let value = remapper
        .remap(&person_value_of(sample_person()), &contact_type())
        .unwrap();
    let contact = value.downcast_ref::<Contact>().unwrap();
    assert_eq!(contact.name.as_deref(), Some("Ada"));
}

#[test]
fn test_remap_tree_directly() {
    let mut tree = Node::new();
    tree["name"].set_string("Grace");
    tree["age"].set_integer(46);

    let remapper = ObjectRemapper::default();
    let value = remapper.remap_tree(&tree, &contact_type()).unwrap();
    assert_eq!(
        value.downcast_ref::<Contact>().unwrap().name.as_deref(),
        Some("Grace")
    );
}

#[test]
fn test_remap_aggregates_errors() {
    let remapper = ObjectRemapper::default();
    // required name is null: the write direction fails and the stack
    // surfaces as one error
    let err = remapper
        .remap(&person_value_of(Default::default()), &contact_type())
        .unwrap_err();
    assert!(err.to_string().contains("Person::name is required"));
}

#[test]
fn test_remap_rejects_unknown_fields_when_strict() {
    let mut remapper = ObjectRemapper::default();
    remapper.tree_to_object_config.allow_unknown_fields = false;
    let err = remapper
        .remap(&person_value_of(sample_person()), &contact_type())
        .unwrap_err();
    assert!(err.to_string().contains("unknown field"));
}
