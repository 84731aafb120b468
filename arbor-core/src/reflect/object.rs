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

//! Object kind: instantiation plus an ordered declared-property list.

use std::any::Any;
use std::borrow::Cow;
use std::sync::Arc;

use crate::error::Error;
use crate::reflect::{AnyData, Type, Value};

pub type InstantiateFn = Arc<dyn Fn() -> Box<AnyData> + Send + Sync>;
pub type GetterFn = Arc<dyn Fn(&AnyData) -> Value + Send + Sync>;
pub type SetterFn = Arc<dyn Fn(&mut AnyData, Value) -> Result<(), Error> + Send + Sync>;

/// Runtime type-selector callback of a polymorphic `Any` property: picks
/// the concrete type from the already-populated sibling fields, or `None`
/// when no selection applies.
pub type TypeSelectorFn = Arc<dyn Fn(&AnyData) -> Option<Arc<Type>> + Send + Sync>;

/// One declared property of an object type.
pub struct Property {
    name: Cow<'static, str>,
    qualified_name: Cow<'static, str>,
    required: bool,
    ty: Arc<Type>,
    getter: GetterFn,
    setter: SetterFn,
    type_selector: Option<TypeSelectorFn>,
}

impl Property {
    pub fn new<N: Into<Cow<'static, str>>>(
        name: N,
        ty: Arc<Type>,
        getter: GetterFn,
        setter: SetterFn,
    ) -> Property {
        let name = name.into();
        Property {
            qualified_name: name.clone(),
            name,
            required: false,
            ty,
            getter,
            setter,
            type_selector: None,
        }
    }

    /// Builds a property over a concrete holder type `S`, wrapping the
    /// typed accessors with the payload downcast. This stands in for the
    /// code a DTO generator would emit.
    pub fn of<S, N, G, P>(name: N, ty: Arc<Type>, get: G, set: P) -> Property
    where
        S: Any + Send + Sync,
        N: Into<Cow<'static, str>>,
        G: Fn(&S) -> Value + Send + Sync + 'static,
        P: Fn(&mut S, Value) -> Result<(), Error> + Send + Sync + 'static,
    {
        let getter: GetterFn = Arc::new(move |obj: &AnyData| {
            let holder = obj
                .downcast_ref::<S>()
                .unwrap_or_else(|| panic!("property getter applied to a foreign object"));
            get(holder)
        });
        let setter: SetterFn = Arc::new(move |obj: &mut AnyData, value: Value| {
            let holder = obj.downcast_mut::<S>().ok_or_else(|| {
                Error::type_error("property setter applied to a foreign object")
            })?;
            set(holder, value)
        });
        Property::new(name, ty, getter, setter)
    }

    /// Sets the wire-qualified name emitted (and matched) by default.
    pub fn qualified<N: Into<Cow<'static, str>>>(mut self, qualified_name: N) -> Property {
        self.qualified_name = qualified_name.into();
        self
    }

    pub fn required(mut self) -> Property {
        self.required = true;
        self
    }

    pub fn with_type_selector(mut self, selector: TypeSelectorFn) -> Property {
        self.type_selector = Some(selector);
        self
    }

    #[inline(always)]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline(always)]
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// Name used on the wire under the given qualification policy.
    #[inline(always)]
    pub fn wire_name(&self, use_unqualified: bool) -> &str {
        if use_unqualified {
            &self.name
        } else {
            &self.qualified_name
        }
    }

    #[inline(always)]
    pub fn is_required(&self) -> bool {
        self.required
    }

    #[inline(always)]
    pub fn ty(&self) -> &Arc<Type> {
        &self.ty
    }

    pub fn get(&self, object: &AnyData) -> Value {
        (self.getter)(object)
    }

    pub fn set(&self, object: &mut AnyData, value: Value) -> Result<(), Error> {
        (self.setter)(object, value)
    }

    pub fn type_selector(&self) -> Option<&TypeSelectorFn> {
        self.type_selector.as_ref()
    }
}

/// Object-kind dispatcher: how to instantiate the object and its ordered
/// property list.
pub struct ObjectDispatcher {
    instantiate: InstantiateFn,
    properties: Vec<Property>,
}

impl ObjectDispatcher {
    pub fn new(instantiate: InstantiateFn) -> ObjectDispatcher {
        ObjectDispatcher {
            instantiate,
            properties: Vec::new(),
        }
    }

    /// Dispatcher for a `Default`-constructible holder type.
    pub fn of<S: Any + Send + Sync + Default>() -> ObjectDispatcher {
        ObjectDispatcher::new(Arc::new(|| Box::new(S::default()) as Box<AnyData>))
    }

    pub fn with_property(mut self, property: Property) -> ObjectDispatcher {
        self.properties.push(property);
        self
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Looks up a declared property by its wire name under the given
    /// qualification policy.
    pub fn property_by_wire_name(
        &self,
        wire_name: &str,
        use_unqualified: bool,
    ) -> Option<(usize, &Property)> {
        self.properties
            .iter()
            .enumerate()
            .find(|(_, p)| p.wire_name(use_unqualified) == wire_name)
    }

    pub fn instantiate(&self) -> Box<AnyData> {
        (self.instantiate)()
    }
}
