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

//! The consumed reflection boundary.
//!
//! The mappers never inspect concrete Rust types; they dispatch on a
//! [`Type`] descriptor: a closed structural [`Kind`] plus a per-kind
//! dispatcher bundling accessor closures, the way generated reflection
//! code would supply them. A [`Value`] is a type handle plus an optional
//! shared payload; `None` is null. Descriptors are immutable once built
//! and `Send + Sync`, so independent mapping states may share them across
//! threads.

use std::any::Any;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

pub mod any;
pub mod collection;
pub mod enum_;
pub mod object;
pub mod primitives;

pub use any::AnyBox;
pub use collection::{CollectionDispatcher, MapDispatcher};
pub use enum_::{EnumDispatcher, EnumInterpreterError};
pub use object::{ObjectDispatcher, Property};

use crate::error::Error;

/// Type-erased payload of a [`Value`].
pub type AnyData = dyn Any + Send + Sync;

/// Structural kind of a [`Type`], the dispatch key of both mappers.
///
/// The set of kinds is closed; the set of user types sharing each kind is
/// open. Types outside the closed set use [`Kind::Extension`] and must
/// carry an interpretation adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Bool,
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float32,
    Float64,
    String,
    Any,
    Tree,
    Enum,
    Object,
    Collection,
    Map,
    Extension,
}

impl Kind {
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Bool => "Bool",
            Kind::Int8 => "Int8",
            Kind::UInt8 => "UInt8",
            Kind::Int16 => "Int16",
            Kind::UInt16 => "UInt16",
            Kind::Int32 => "Int32",
            Kind::UInt32 => "UInt32",
            Kind::Int64 => "Int64",
            Kind::UInt64 => "UInt64",
            Kind::Float32 => "Float32",
            Kind::Float64 => "Float64",
            Kind::String => "String",
            Kind::Any => "Any",
            Kind::Tree => "Tree",
            Kind::Enum => "Enum",
            Kind::Object => "Object",
            Kind::Collection => "Collection",
            Kind::Map => "Map",
            Kind::Extension => "Extension",
        }
    }

    /// True for the fixed-width numeric and bool kinds.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            Kind::Bool
                | Kind::Int8
                | Kind::UInt8
                | Kind::Int16
                | Kind::UInt16
                | Kind::Int32
                | Kind::UInt32
                | Kind::Int64
                | Kind::UInt64
                | Kind::Float32
                | Kind::Float64
        )
    }
}

/// Per-kind accessor bundle of a [`Type`].
pub enum Dispatcher {
    /// Primitives, `String`, `Any`, `Tree`, `Extension`: no accessors.
    None,
    Object(ObjectDispatcher),
    Collection(CollectionDispatcher),
    Map(MapDispatcher),
    Enum(EnumDispatcher),
}

/// Runtime type descriptor: structural kind, qualified name, per-kind
/// dispatcher and named interpretation adapters.
pub struct Type {
    kind: Kind,
    name: Cow<'static, str>,
    dispatcher: Dispatcher,
    interpretations: HashMap<String, Arc<TypeInterpretation>>,
}

impl Type {
    /// Descriptor without accessors (primitives, `String`, `Any`,
    /// `Tree`, `Extension`).
    pub fn new<N: Into<Cow<'static, str>>>(kind: Kind, name: N) -> Type {
        Type {
            kind,
            name: name.into(),
            dispatcher: Dispatcher::None,
            interpretations: HashMap::new(),
        }
    }

    pub fn object<N: Into<Cow<'static, str>>>(name: N, dispatcher: ObjectDispatcher) -> Type {
        Type {
            kind: Kind::Object,
            name: name.into(),
            dispatcher: Dispatcher::Object(dispatcher),
            interpretations: HashMap::new(),
        }
    }

    pub fn collection<N: Into<Cow<'static, str>>>(
        name: N,
        dispatcher: CollectionDispatcher,
    ) -> Type {
        Type {
            kind: Kind::Collection,
            name: name.into(),
            dispatcher: Dispatcher::Collection(dispatcher),
            interpretations: HashMap::new(),
        }
    }

    pub fn map<N: Into<Cow<'static, str>>>(name: N, dispatcher: MapDispatcher) -> Type {
        Type {
            kind: Kind::Map,
            name: name.into(),
            dispatcher: Dispatcher::Map(dispatcher),
            interpretations: HashMap::new(),
        }
    }

    pub fn enum_<N: Into<Cow<'static, str>>>(name: N, dispatcher: EnumDispatcher) -> Type {
        Type {
            kind: Kind::Enum,
            name: name.into(),
            dispatcher: Dispatcher::Enum(dispatcher),
            interpretations: HashMap::new(),
        }
    }

    /// Extension kind: no direct mapping method; the mappers fall back to
    /// the enabled interpretations.
    pub fn extension<N: Into<Cow<'static, str>>>(name: N) -> Type {
        Type::new(Kind::Extension, name)
    }

    /// Registers a named interpretation adapter.
    pub fn add_interpretation<N: Into<String>>(
        &mut self,
        name: N,
        interpretation: TypeInterpretation,
    ) {
        self.interpretations
            .insert(name.into(), Arc::new(interpretation));
    }

    /// Chainable form of [`Type::add_interpretation`].
    pub fn with_interpretation<N: Into<String>>(
        mut self,
        name: N,
        interpretation: TypeInterpretation,
    ) -> Type {
        self.add_interpretation(name, interpretation);
        self
    }

    #[inline(always)]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    #[inline(always)]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn object_dispatcher(&self) -> Option<&ObjectDispatcher> {
        match &self.dispatcher {
            Dispatcher::Object(d) => Some(d),
            _ => None,
        }
    }

    pub fn collection_dispatcher(&self) -> Option<&CollectionDispatcher> {
        match &self.dispatcher {
            Dispatcher::Collection(d) => Some(d),
            _ => None,
        }
    }

    pub fn map_dispatcher(&self) -> Option<&MapDispatcher> {
        match &self.dispatcher {
            Dispatcher::Map(d) => Some(d),
            _ => None,
        }
    }

    pub fn enum_dispatcher(&self) -> Option<&EnumDispatcher> {
        match &self.dispatcher {
            Dispatcher::Enum(d) => Some(d),
            _ => None,
        }
    }

    pub fn interpretation(&self, name: &str) -> Option<&Arc<TypeInterpretation>> {
        self.interpretations.get(name)
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Type")
            .field("kind", &self.kind)
            .field("name", &self.name)
            .finish()
    }
}

/// A typed value: a [`Type`] handle plus an optional shared payload.
/// A missing payload is null.
#[derive(Clone)]
pub struct Value {
    ty: Arc<Type>,
    data: Option<Arc<AnyData>>,
}

impl Value {
    pub fn new<T: Any + Send + Sync>(ty: &Arc<Type>, data: T) -> Value {
        Value {
            ty: ty.clone(),
            data: Some(Arc::new(data)),
        }
    }

    pub fn null(ty: &Arc<Type>) -> Value {
        Value {
            ty: ty.clone(),
            data: None,
        }
    }

    pub fn from_parts(ty: &Arc<Type>, data: Option<Arc<AnyData>>) -> Value {
        Value {
            ty: ty.clone(),
            data,
        }
    }

    #[inline(always)]
    pub fn ty(&self) -> &Arc<Type> {
        &self.ty
    }

    #[inline(always)]
    pub fn is_null(&self) -> bool {
        self.data.is_none()
    }

    pub fn data(&self) -> Option<&Arc<AnyData>> {
        self.data.as_ref()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.data.as_ref()?.downcast_ref::<T>()
    }

    /// Extracts the payload as `Option<T>` (null becomes `None`); errs if
    /// a non-null payload is of a different concrete type.
    pub fn to_option<T: Any + Clone>(&self) -> Result<Option<T>, Error> {
        match &self.data {
            None => Ok(None),
            Some(data) => data.downcast_ref::<T>().cloned().map(Some).ok_or_else(|| {
                Error::type_error(format!(
                    "payload of value typed '{}' is not a {}",
                    self.ty.name(),
                    std::any::type_name::<T>()
                ))
            }),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "Value({}, null)", self.ty.name())
        } else {
            write!(f, "Value({})", self.ty.name())
        }
    }
}

/// Conversion closure of an interpretation adapter, typed side to
/// interpretation side.
pub type InterpretationToFn = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

/// Conversion closure of an interpretation adapter, interpretation side
/// back to the payload of the interpreted type (`None` is null).
pub type InterpretationFromFn =
    Arc<dyn Fn(&Value) -> Result<Option<Arc<AnyData>>, Error> + Send + Sync>;

/// Named type-level adapter converting a type with no direct mapping
/// method to and from another type that has one.
pub struct TypeInterpretation {
    interpretation_type: Arc<Type>,
    to_interpretation: InterpretationToFn,
    from_interpretation: InterpretationFromFn,
}

impl TypeInterpretation {
    pub fn new(
        interpretation_type: Arc<Type>,
        to_interpretation: InterpretationToFn,
        from_interpretation: InterpretationFromFn,
    ) -> TypeInterpretation {
        TypeInterpretation {
            interpretation_type,
            to_interpretation,
            from_interpretation,
        }
    }

    pub fn interpretation_type(&self) -> &Arc<Type> {
        &self.interpretation_type
    }

    pub fn to_interpretation(&self, value: &Value) -> Value {
        (self.to_interpretation)(value)
    }

    pub fn from_interpretation(&self, value: &Value) -> Result<Option<Arc<AnyData>>, Error> {
        (self.from_interpretation)(value)
    }
}
