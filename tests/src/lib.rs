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

//! Shared type descriptors for the integration tests: the hand-built
//! counterpart of what a DTO generator would emit.

use std::any::Any;
use std::sync::{Arc, LazyLock};

use arbor_core::error::Error;

pub use arbor_core::reflect::primitives::{
    bool_type, float64_type, int32_type, int64_type, string_type,
};
use arbor_core::reflect::{
    AnyBox, AnyData, CollectionDispatcher, EnumDispatcher, MapDispatcher, ObjectDispatcher,
    Property, Type, TypeInterpretation, Value,
};

/// Wraps an optional field value, null when absent.
pub fn opt_value<T: Any + Send + Sync + Clone>(ty: &Arc<Type>, value: &Option<T>) -> Value {
    match value {
        Some(v) => Value::new(ty, v.clone()),
        None => Value::null(ty),
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Address {
    pub city: Option<String>,
    pub zip: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Person {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub tags: Option<Vec<String>>,
    pub address: Option<Address>,
    pub scores: Option<Vec<(String, Option<i64>)>>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Company {
    pub name: Option<String>,
    pub ceo: Option<Person>,
}

static STRING_VECTOR_TYPE: LazyLock<Arc<Type>> = LazyLock::new(|| {
    Arc::new(Type::collection(
        "Vector<String>",
        CollectionDispatcher::of_vec::<String>(string_type()),
    ))
});

pub fn string_vector_type() -> Arc<Type> {
    STRING_VECTOR_TYPE.clone()
}

static NULLABLE_STRING_VECTOR_TYPE: LazyLock<Arc<Type>> = LazyLock::new(|| {
    Arc::new(Type::collection(
        "Vector<String?>",
        CollectionDispatcher::of_nullable_vec::<String>(string_type()),
    ))
});

/// Collection whose items may be null (`Vec<Option<String>>` payload).
pub fn nullable_string_vector_type() -> Arc<Type> {
    NULLABLE_STRING_VECTOR_TYPE.clone()
}

static SCORES_TYPE: LazyLock<Arc<Type>> = LazyLock::new(|| {
    Arc::new(Type::map(
        "Fields<Int64>",
        MapDispatcher::of_entries::<i64>(int64_type()),
    ))
});

pub fn scores_type() -> Arc<Type> {
    SCORES_TYPE.clone()
}

static ADDRESS_TYPE: LazyLock<Arc<Type>> = LazyLock::new(|| {
    let dispatcher = ObjectDispatcher::of::<Address>()
        .with_property(
            Property::of::<Address, _, _, _>(
                "city",
                string_type(),
                |a| opt_value(&string_type(), &a.city),
                |a, v| {
                    a.city = v.to_option::<String>()?;
                    Ok(())
                },
            )
            .required(),
        )
        .with_property(Property::of::<Address, _, _, _>(
            "zip",
            string_type(),
            |a| opt_value(&string_type(), &a.zip),
            |a, v| {
                a.zip = v.to_option::<String>()?;
                Ok(())
            },
        ));
    Arc::new(Type::object("Address", dispatcher))
});

pub fn address_type() -> Arc<Type> {
    ADDRESS_TYPE.clone()
}

static PERSON_TYPE: LazyLock<Arc<Type>> = LazyLock::new(|| {
    let dispatcher = ObjectDispatcher::of::<Person>()
        .with_property(
            Property::of::<Person, _, _, _>(
                "name",
                string_type(),
                |p| opt_value(&string_type(), &p.name),
                |p, v| {
                    p.name = v.to_option::<String>()?;
                    Ok(())
                },
            )
            .required(),
        )
        .with_property(Property::of::<Person, _, _, _>(
            "age",
            int32_type(),
            |p| opt_value(&int32_type(), &p.age),
            |p, v| {
                p.age = v.to_option::<i32>()?;
                Ok(())
            },
        ))
        .with_property(Property::of::<Person, _, _, _>(
            "tags",
            string_vector_type(),
            |p| opt_value(&string_vector_type(), &p.tags),
            |p, v| {
                p.tags = v.to_option::<Vec<String>>()?;
                Ok(())
            },
        ))
        .with_property(Property::of::<Person, _, _, _>(
            "address",
            address_type(),
            |p| opt_value(&address_type(), &p.address),
            |p, v| {
                p.address = v.to_option::<Address>()?;
                Ok(())
            },
        ))
        .with_property(Property::of::<Person, _, _, _>(
            "scores",
            scores_type(),
            |p| opt_value(&scores_type(), &p.scores),
            |p, v| {
                p.scores = v.to_option::<Vec<(String, Option<i64>)>>()?;
                Ok(())
            },
        ));
    Arc::new(Type::object("Person", dispatcher))
});

pub fn person_type() -> Arc<Type> {
    PERSON_TYPE.clone()
}

static COMPANY_TYPE: LazyLock<Arc<Type>> = LazyLock::new(|| {
    let dispatcher = ObjectDispatcher::of::<Company>()
        .with_property(Property::of::<Company, _, _, _>(
            "name",
            string_type(),
            |c| opt_value(&string_type(), &c.name),
            |c, v| {
                c.name = v.to_option::<String>()?;
                Ok(())
            },
        ))
        .with_property(Property::of::<Company, _, _, _>(
            "ceo",
            person_type(),
            |c| opt_value(&person_type(), &c.ceo),
            |c, v| {
                c.ceo = v.to_option::<Person>()?;
                Ok(())
            },
        ));
    Arc::new(Type::object("Company", dispatcher))
});

pub fn company_type() -> Arc<Type> {
    COMPANY_TYPE.clone()
}

pub fn person_value_of(person: Person) -> Value {
    Value::new(&person_type(), person)
}

pub fn sample_person() -> Person {
    Person {
        name: Some("Ada".to_string()),
        age: Some(36),
        tags: Some(vec!["math".to_string(), "engines".to_string()]),
        address: Some(Address {
            city: Some("London".to_string()),
            zip: Some("N1".to_string()),
        }),
        scores: Some(vec![
            ("analysis".to_string(), Some(10)),
            ("poetry".to_string(), None),
        ]),
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Color {
    #[default]
    Red,
    Green,
    Blue,
}

fn color_entries() -> Vec<(Color, String, String)> {
    vec![
        (Color::Red, "Color::Red".to_string(), "Red".to_string()),
        (Color::Green, "Color::Green".to_string(), "Green".to_string()),
        (Color::Blue, "Color::Blue".to_string(), "Blue".to_string()),
    ]
}

static COLOR_TYPE: LazyLock<Arc<Type>> = LazyLock::new(|| {
    Arc::new(Type::enum_(
        "Color",
        EnumDispatcher::with_named_entries(string_type(), color_entries(), false),
    ))
});

/// String-interpreted enum, nullable.
pub fn color_type() -> Arc<Type> {
    COLOR_TYPE.clone()
}

static STRICT_COLOR_TYPE: LazyLock<Arc<Type>> = LazyLock::new(|| {
    Arc::new(Type::enum_(
        "StrictColor",
        EnumDispatcher::with_named_entries(string_type(), color_entries(), true),
    ))
});

/// String-interpreted enum with the not-null constraint.
pub fn strict_color_type() -> Arc<Type> {
    STRICT_COLOR_TYPE.clone()
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Priority {
    #[default]
    Low,
    High,
}

static PRIORITY_TYPE: LazyLock<Arc<Type>> = LazyLock::new(|| {
    Arc::new(Type::enum_(
        "Priority",
        EnumDispatcher::with_entries(
            int32_type(),
            vec![(Priority::Low, 1i32), (Priority::High, 2i32)],
            false,
        ),
    ))
});

/// Integer-interpreted enum.
pub fn priority_type() -> Arc<Type> {
    PRIORITY_TYPE.clone()
}

/// Carrier of a selector-driven polymorphic payload: `kind` decides the
/// concrete type of `payload`.
#[derive(Clone, Default)]
pub struct Envelope {
    pub kind: Option<String>,
    pub payload: Option<AnyBox>,
}

static ENVELOPE_TYPE: LazyLock<Arc<Type>> = LazyLock::new(|| {
    let any_ty = arbor_core::reflect::primitives::any_type();
    let dispatcher = ObjectDispatcher::of::<Envelope>()
        .with_property(Property::of::<Envelope, _, _, _>(
            "kind",
            string_type(),
            |e| opt_value(&string_type(), &e.kind),
            |e, v| {
                e.kind = v.to_option::<String>()?;
                Ok(())
            },
        ))
        .with_property(
            Property::of::<Envelope, _, _, _>(
                "payload",
                any_ty.clone(),
                move |e| opt_value(&any_ty, &e.payload),
                |e, v| {
                    e.payload = v.to_option::<AnyBox>()?;
                    Ok(())
                },
            )
            .with_type_selector(Arc::new(|obj: &AnyData| {
                let envelope = obj.downcast_ref::<Envelope>()?;
                match envelope.kind.as_deref() {
                    Some("text") => Some(string_type()),
                    Some("number") => Some(int64_type()),
                    _ => None,
                }
            })),
        );
    Arc::new(Type::object("Envelope", dispatcher))
});

pub fn envelope_type() -> Arc<Type> {
    ENVELOPE_TYPE.clone()
}

/// Extension-kind type with no direct mapping method; maps only through
/// its registered string interpretation `"point::string"`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

static POINT_TYPE: LazyLock<Arc<Type>> = LazyLock::new(|| {
    let to_string_type = string_type();
    let interpretation = TypeInterpretation::new(
        string_type(),
        Arc::new(move |value: &Value| match value.downcast_ref::<Point>() {
            Some(point) => Value::new(&to_string_type, format!("{},{}", point.x, point.y)),
            None => Value::null(&to_string_type),
        }),
        Arc::new(|value: &Value| -> Result<Option<Arc<AnyData>>, Error> {
            let Some(text) = value.downcast_ref::<String>() else {
                return Ok(None);
            };
            let (x, y) = text
                .split_once(',')
                .ok_or_else(|| Error::invalid_data(format!("invalid point '{}'", text)))?;
            let point = Point {
                x: x.trim()
                    .parse()
                    .map_err(|_| Error::invalid_data(format!("invalid point '{}'", text)))?,
                y: y.trim()
                    .parse()
                    .map_err(|_| Error::invalid_data(format!("invalid point '{}'", text)))?,
            };
            Ok(Some(Arc::new(point) as Arc<AnyData>))
        }),
    );
    Arc::new(Type::extension("Point").with_interpretation("point::string", interpretation))
});

pub fn point_type() -> Arc<Type> {
    POINT_TYPE.clone()
}
