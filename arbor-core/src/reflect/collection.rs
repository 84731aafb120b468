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

//! Collection and map kinds: item/entry iteration and accumulation.

use std::any::Any;
use std::sync::Arc;

use crate::error::Error;
use crate::reflect::primitives::string_type;
use crate::reflect::{AnyData, Type, Value};

pub type CreateFn = Arc<dyn Fn() -> Box<AnyData> + Send + Sync>;
pub type AddItemFn = Arc<dyn Fn(&mut AnyData, Value) -> Result<(), Error> + Send + Sync>;
pub type ItemsFn = Arc<dyn Fn(&AnyData) -> Vec<Value> + Send + Sync>;
pub type PutFn = Arc<dyn Fn(&mut AnyData, Value, Value) -> Result<(), Error> + Send + Sync>;
pub type EntriesFn = Arc<dyn Fn(&AnyData) -> Vec<(Value, Value)> + Send + Sync>;

/// Collection-kind dispatcher: item type, creation, accumulation and
/// iteration.
pub struct CollectionDispatcher {
    item_type: Arc<Type>,
    create: CreateFn,
    add_item: AddItemFn,
    items: ItemsFn,
}

impl CollectionDispatcher {
    pub fn new(
        item_type: Arc<Type>,
        create: CreateFn,
        add_item: AddItemFn,
        items: ItemsFn,
    ) -> CollectionDispatcher {
        CollectionDispatcher {
            item_type,
            create,
            add_item,
            items,
        }
    }

    /// Dispatcher over a `Vec<T>` payload; items cannot be null.
    pub fn of_vec<T: Any + Send + Sync + Clone>(item_type: Arc<Type>) -> CollectionDispatcher {
        let get_item_type = item_type.clone();
        let create: CreateFn = Arc::new(|| Box::new(Vec::<T>::new()) as Box<AnyData>);
        let add_item: AddItemFn = Arc::new(move |obj: &mut AnyData, value: Value| {
            let vec = obj
                .downcast_mut::<Vec<T>>()
                .ok_or_else(|| Error::type_error("collection accessor applied to a foreign object"))?;
            let item = value.to_option::<T>()?.ok_or_else(|| {
                Error::type_error("null item for a collection of non-nullable items")
            })?;
            vec.push(item);
            Ok(())
        });
        let items: ItemsFn = Arc::new(move |obj: &AnyData| match obj.downcast_ref::<Vec<T>>() {
            Some(vec) => vec
                .iter()
                .map(|item| Value::new(&get_item_type, item.clone()))
                .collect(),
            None => Vec::new(),
        });
        CollectionDispatcher::new(item_type, create, add_item, items)
    }

    /// Dispatcher over a `Vec<Option<T>>` payload; `None` items map to
    /// null.
    pub fn of_nullable_vec<T: Any + Send + Sync + Clone>(
        item_type: Arc<Type>,
    ) -> CollectionDispatcher {
        let get_item_type = item_type.clone();
        let create: CreateFn = Arc::new(|| Box::new(Vec::<Option<T>>::new()) as Box<AnyData>);
        let add_item: AddItemFn = Arc::new(move |obj: &mut AnyData, value: Value| {
            let vec = obj
                .downcast_mut::<Vec<Option<T>>>()
                .ok_or_else(|| Error::type_error("collection accessor applied to a foreign object"))?;
            vec.push(value.to_option::<T>()?);
            Ok(())
        });
        let items: ItemsFn =
            Arc::new(
                move |obj: &AnyData| match obj.downcast_ref::<Vec<Option<T>>>() {
                    Some(vec) => vec
                        .iter()
                        .map(|item| match item {
                            Some(v) => Value::new(&get_item_type, v.clone()),
                            None => Value::null(&get_item_type),
                        })
                        .collect(),
                    None => Vec::new(),
                },
            );
        CollectionDispatcher::new(item_type, create, add_item, items)
    }

    #[inline(always)]
    pub fn item_type(&self) -> &Arc<Type> {
        &self.item_type
    }

    pub fn create(&self) -> Box<AnyData> {
        (self.create)()
    }

    pub fn add_item(&self, object: &mut AnyData, item: Value) -> Result<(), Error> {
        (self.add_item)(object, item)
    }

    pub fn items(&self, object: &AnyData) -> Vec<Value> {
        (self.items)(object)
    }
}

/// Map-kind dispatcher: key/value types, creation, accumulation and
/// entry iteration.
pub struct MapDispatcher {
    key_type: Arc<Type>,
    value_type: Arc<Type>,
    create: CreateFn,
    put: PutFn,
    entries: EntriesFn,
}

impl MapDispatcher {
    pub fn new(
        key_type: Arc<Type>,
        value_type: Arc<Type>,
        create: CreateFn,
        put: PutFn,
        entries: EntriesFn,
    ) -> MapDispatcher {
        MapDispatcher {
            key_type,
            value_type,
            create,
            put,
            entries,
        }
    }

    /// Dispatcher over a `Vec<(String, Option<T>)>` payload: an ordered
    /// string-keyed entry list, the usual fields shape of a wire object.
    pub fn of_entries<T: Any + Send + Sync + Clone>(value_type: Arc<Type>) -> MapDispatcher {
        let get_value_type = value_type.clone();
        let create: CreateFn =
            Arc::new(|| Box::new(Vec::<(String, Option<T>)>::new()) as Box<AnyData>);
        let put: PutFn = Arc::new(move |obj: &mut AnyData, key: Value, value: Value| {
            let entries = obj
                .downcast_mut::<Vec<(String, Option<T>)>>()
                .ok_or_else(|| Error::type_error("map accessor applied to a foreign object"))?;
            let key = key
                .to_option::<String>()?
                .ok_or_else(|| Error::type_error("null map key"))?;
            entries.push((key, value.to_option::<T>()?));
            Ok(())
        });
        let string_ty = string_type();
        let entries: EntriesFn = Arc::new(move |obj: &AnyData| {
            match obj.downcast_ref::<Vec<(String, Option<T>)>>() {
                Some(entries) => entries
                    .iter()
                    .map(|(key, value)| {
                        let key_value = Value::new(&string_ty, key.clone());
                        let value_value = match value {
                            Some(v) => Value::new(&get_value_type, v.clone()),
                            None => Value::null(&get_value_type),
                        };
                        (key_value, value_value)
                    })
                    .collect(),
                None => Vec::new(),
            }
        });
        MapDispatcher::new(string_type(), value_type, create, put, entries)
    }

    #[inline(always)]
    pub fn key_type(&self) -> &Arc<Type> {
        &self.key_type
    }

    #[inline(always)]
    pub fn value_type(&self) -> &Arc<Type> {
        &self.value_type
    }

    pub fn create(&self) -> Box<AnyData> {
        (self.create)()
    }

    pub fn put(&self, object: &mut AnyData, key: Value, value: Value) -> Result<(), Error> {
        (self.put)(object, key, value)
    }

    pub fn entries(&self, object: &AnyData) -> Vec<(Value, Value)> {
        (self.entries)(object)
    }
}
