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

//! Enum kind: conversion to and from the enum's declared interpretation
//! type (its backing integer or string form).

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::reflect::{AnyData, Type, Value};

/// Interpreter outcome codes of an enum conversion. `Ok` is the `Result`
/// Ok arm; these are the failure codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnumInterpreterError {
    /// Value is null but the enum carries a not-null constraint.
    ConstraintNotNull,
    /// Enum-side payload is of the wrong concrete type.
    TypeMismatchEnum,
    /// Interpretation-side payload is of the wrong concrete type.
    TypeMismatchEnumValue,
    /// No declared entry matches the given value.
    EntryNotFound,
}

impl fmt::Display for EnumInterpreterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            EnumInterpreterError::ConstraintNotNull => "CONSTRAINT_NOT_NULL",
            EnumInterpreterError::TypeMismatchEnum => "TYPE_MISMATCH_ENUM",
            EnumInterpreterError::TypeMismatchEnumValue => "TYPE_MISMATCH_ENUM_VALUE",
            EnumInterpreterError::EntryNotFound => "ENTRY_NOT_FOUND",
        };
        f.write_str(text)
    }
}

/// Enum side → interpretation side. The flag selects unqualified entry
/// names where the enum declares both forms.
pub type EnumToFn =
    Arc<dyn Fn(&Value, bool) -> Result<Value, EnumInterpreterError> + Send + Sync>;

/// Interpretation side → enum payload (`None` is null).
pub type EnumFromFn =
    Arc<dyn Fn(&Value, bool) -> Result<Option<Arc<AnyData>>, EnumInterpreterError> + Send + Sync>;

/// Enum-kind dispatcher.
pub struct EnumDispatcher {
    interpretation_type: Arc<Type>,
    not_null: bool,
    to_interpretation: EnumToFn,
    from_interpretation: EnumFromFn,
}

impl EnumDispatcher {
    pub fn new(
        interpretation_type: Arc<Type>,
        not_null: bool,
        to_interpretation: EnumToFn,
        from_interpretation: EnumFromFn,
    ) -> EnumDispatcher {
        EnumDispatcher {
            interpretation_type,
            not_null,
            to_interpretation,
            from_interpretation,
        }
    }

    /// Dispatcher from a declared entry table `(enum value, interpretation
    /// value)`. Name qualification does not apply; the table is used as
    /// given for both directions.
    pub fn with_entries<E, I>(
        interpretation_type: Arc<Type>,
        entries: Vec<(E, I)>,
        not_null: bool,
    ) -> EnumDispatcher
    where
        E: Any + Send + Sync + Clone + PartialEq,
        I: Any + Send + Sync + Clone + PartialEq,
    {
        let entries = Arc::new(entries);
        let to_entries = entries.clone();
        let to_type = interpretation_type.clone();
        let to_interpretation: EnumToFn = Arc::new(move |value: &Value, _unqualified: bool| {
            match value.data() {
                None => {
                    if not_null {
                        Err(EnumInterpreterError::ConstraintNotNull)
                    } else {
                        Ok(Value::null(&to_type))
                    }
                }
                Some(data) => {
                    let entry = data
                        .downcast_ref::<E>()
                        .ok_or(EnumInterpreterError::TypeMismatchEnum)?;
                    to_entries
                        .iter()
                        .find(|(e, _)| e == entry)
                        .map(|(_, i)| Value::new(&to_type, i.clone()))
                        .ok_or(EnumInterpreterError::EntryNotFound)
                }
            }
        });
        let from_entries = entries.clone();
        let from_interpretation: EnumFromFn =
            Arc::new(move |value: &Value, _unqualified: bool| match value.data() {
                None => {
                    if not_null {
                        Err(EnumInterpreterError::ConstraintNotNull)
                    } else {
                        Ok(None)
                    }
                }
                Some(data) => {
                    let interp = data
                        .downcast_ref::<I>()
                        .ok_or(EnumInterpreterError::TypeMismatchEnumValue)?;
                    from_entries
                        .iter()
                        .find(|(_, i)| i == interp)
                        .map(|(e, _)| Some(Arc::new(e.clone()) as Arc<AnyData>))
                        .ok_or(EnumInterpreterError::EntryNotFound)
                }
            });
        EnumDispatcher::new(interpretation_type, not_null, to_interpretation, from_interpretation)
    }

    /// Dispatcher for a string-interpreted enum declaring both qualified
    /// and unqualified entry names; the qualification flag picks the form
    /// emitted and matched.
    pub fn with_named_entries<E>(
        interpretation_type: Arc<Type>,
        entries: Vec<(E, String, String)>,
        not_null: bool,
    ) -> EnumDispatcher
    where
        E: Any + Send + Sync + Clone + PartialEq,
    {
        let entries = Arc::new(entries);
        let to_entries = entries.clone();
        let to_type = interpretation_type.clone();
        let to_interpretation: EnumToFn = Arc::new(move |value: &Value, unqualified: bool| {
            match value.data() {
                None => {
                    if not_null {
                        Err(EnumInterpreterError::ConstraintNotNull)
                    } else {
                        Ok(Value::null(&to_type))
                    }
                }
                Some(data) => {
                    let entry = data
                        .downcast_ref::<E>()
                        .ok_or(EnumInterpreterError::TypeMismatchEnum)?;
                    to_entries
                        .iter()
                        .find(|(e, _, _)| e == entry)
                        .map(|(_, qualified, bare)| {
                            let name = if unqualified { bare } else { qualified };
                            Value::new(&to_type, name.clone())
                        })
                        .ok_or(EnumInterpreterError::EntryNotFound)
                }
            }
        });
        let from_entries = entries.clone();
        let from_interpretation: EnumFromFn =
            Arc::new(move |value: &Value, unqualified: bool| match value.data() {
                None => {
                    if not_null {
                        Err(EnumInterpreterError::ConstraintNotNull)
                    } else {
                        Ok(None)
                    }
                }
                Some(data) => {
                    let name = data
                        .downcast_ref::<String>()
                        .ok_or(EnumInterpreterError::TypeMismatchEnumValue)?;
                    from_entries
                        .iter()
                        .find(|(_, qualified, bare)| {
                            if unqualified {
                                bare == name
                            } else {
                                qualified == name
                            }
                        })
                        .map(|(e, _, _)| Some(Arc::new(e.clone()) as Arc<AnyData>))
                        .ok_or(EnumInterpreterError::EntryNotFound)
                }
            });
        EnumDispatcher::new(interpretation_type, not_null, to_interpretation, from_interpretation)
    }

    #[inline(always)]
    pub fn interpretation_type(&self) -> &Arc<Type> {
        &self.interpretation_type
    }

    #[inline(always)]
    pub fn is_not_null(&self) -> bool {
        self.not_null
    }

    pub fn to_interpretation(
        &self,
        value: &Value,
        use_unqualified_names: bool,
    ) -> Result<Value, EnumInterpreterError> {
        (self.to_interpretation)(value, use_unqualified_names)
    }

    pub fn from_interpretation(
        &self,
        value: &Value,
        use_unqualified_names: bool,
    ) -> Result<Option<Arc<AnyData>>, EnumInterpreterError> {
        (self.from_interpretation)(value, use_unqualified_names)
    }
}
