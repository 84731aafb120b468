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

use indexmap::IndexMap;

use crate::tree::Node;

/// Insertion-ordered string-keyed association of child nodes.
///
/// Lookup by key is hashed; iteration and positional access
/// ([`TreeMap::get_index`]) follow insertion order. Re-inserting an
/// existing key replaces the value and keeps the original position
/// (last write wins).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TreeMap {
    entries: IndexMap<String, Node>,
}

impl TreeMap {
    pub fn new() -> Self {
        TreeMap {
            entries: IndexMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        TreeMap {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts `node` under `key`, returning the replaced node if any.
    pub fn insert<K: Into<String>>(&mut self, key: K, node: Node) -> Option<Node> {
        self.entries.insert(key.into(), node)
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.entries.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Entry at insertion position `index`.
    pub fn get_index(&self, index: usize) -> Option<(&str, &Node)> {
        self.entries.get_index(index).map(|(k, v)| (k.as_str(), v))
    }

    pub fn get_index_mut(&mut self, index: usize) -> Option<(&str, &mut Node)> {
        self.entries
            .get_index_mut(index)
            .map(|(k, v)| (k.as_str(), v))
    }

    /// Child node under `key`, inserted as `Undefined` if absent.
    /// This is the auto-vivification hook behind `node["key"] = ...`.
    pub fn node_mut<K: Into<String>>(&mut self, key: K) -> &mut Node {
        self.entries.entry(key.into()).or_default()
    }

    /// Removes `key`, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Node> {
        self.entries.shift_remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Node)> {
        self.entries.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }
}

impl<K: Into<String>> FromIterator<(K, Node)> for TreeMap {
    fn from_iter<I: IntoIterator<Item = (K, Node)>>(iter: I) -> Self {
        TreeMap {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Ordered string→string side-map attached to a node, carrying
/// out-of-band wire metadata not representable as a child value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Attributes {
    entries: IndexMap<String, String>,
}

impl Attributes {
    pub fn new() -> Self {
        Attributes {
            entries: IndexMap::new(),
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn set<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|v| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.shift_remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
