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

//! Pretty-printing as a stream decorator.
//!
//! The serializer stays agnostic to indentation: wrapping its output
//! stream in a [`Beautifier`] inserts newlines and indentation around the
//! structural characters it sees. Characters inside string literals pass
//! through untouched (escape-aware), so keys and values are never
//! reformatted.

use crate::buffer::OutputStream;

enum Pending {
    /// A container just opened; indent before its first entry, or close
    /// it inline if empty.
    Open,
    /// An entry separator was written; indent before the next entry.
    Separator,
}

pub struct Beautifier<'a, W: OutputStream> {
    inner: &'a mut W,
    indent: &'a str,
    level: usize,
    in_string: bool,
    escaped: bool,
    pending: Option<Pending>,
}

impl<'a, W: OutputStream> Beautifier<'a, W> {
    pub fn new(inner: &'a mut W, indent: &'a str) -> Self {
        Beautifier {
            inner,
            indent,
            level: 0,
            in_string: false,
            escaped: false,
            pending: None,
        }
    }

    fn newline_indent(&mut self) {
        self.inner.write_char(b'\n');
        for _ in 0..self.level {
            self.inner.write_str(self.indent);
        }
    }

    fn flush_pending(&mut self) {
        match self.pending.take() {
            Some(Pending::Open) => {
                self.level += 1;
                self.newline_indent();
            }
            Some(Pending::Separator) => self.newline_indent(),
            None => {}
        }
    }

    fn write_byte(&mut self, byte: u8) {
        if self.in_string {
            self.inner.write_char(byte);
            if self.escaped {
                self.escaped = false;
            } else if byte == b'\\' {
                self.escaped = true;
            } else if byte == b'"' {
                self.in_string = false;
            }
            return;
        }
        match byte {
            b'{' | b'[' => {
                self.flush_pending();
                self.inner.write_char(byte);
                self.pending = Some(Pending::Open);
            }
            b'}' | b']' => match self.pending.take() {
                // the container stayed empty: close it inline
                Some(Pending::Open) => self.inner.write_char(byte),
                _ => {
                    self.level = self.level.saturating_sub(1);
                    self.newline_indent();
                    self.inner.write_char(byte);
                }
            },
            b',' => {
                self.inner.write_char(byte);
                self.pending = Some(Pending::Separator);
            }
            b':' => {
                self.inner.write_str(": ");
            }
            b'"' => {
                self.flush_pending();
                self.in_string = true;
                self.inner.write_char(byte);
            }
            _ => {
                self.flush_pending();
                self.inner.write_char(byte);
            }
        }
    }
}

impl<W: OutputStream> OutputStream for Beautifier<'_, W> {
    fn write_bytes(&mut self, data: &[u8]) {
        for &byte in data {
            self.write_byte(byte);
        }
    }

    fn write_char(&mut self, c: u8) {
        self.write_byte(c);
    }
}
