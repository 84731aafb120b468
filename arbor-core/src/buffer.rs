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

//! Stream boundary for the JSON codec: an all-bytes-written output
//! abstraction and a positional parsing caret over an in-memory buffer.

use std::fmt::Display;

use crate::error::Error;

/// Byte sink with all-requested-bytes-written semantics. Failure to
/// accept bytes is fatal to the sink, not an input condition, so the
/// write methods do not return errors.
pub trait OutputStream {
    fn write_bytes(&mut self, data: &[u8]);

    #[inline(always)]
    fn write_char(&mut self, c: u8) {
        self.write_bytes(&[c]);
    }

    #[inline(always)]
    fn write_str(&mut self, data: &str) {
        self.write_bytes(data.as_bytes());
    }

    /// Writes the textual rendering of a value, the counterpart of the
    /// numeric write path in the wire format.
    fn write_as_string<T: Display>(&mut self, value: T)
    where
        Self: Sized,
    {
        self.write_str(&value.to_string());
    }
}

/// Growable in-memory [`OutputStream`].
#[derive(Default)]
pub struct BufferStream {
    data: Vec<u8>,
}

impl BufferStream {
    pub fn new() -> Self {
        BufferStream::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        BufferStream {
            data: Vec::with_capacity(capacity),
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    pub fn into_string(self) -> Result<String, Error> {
        String::from_utf8(self.data)
            .map_err(|e| Error::encoding_error(format!("stream holds invalid UTF-8: {}", e)))
    }
}

impl OutputStream for BufferStream {
    #[inline(always)]
    fn write_bytes(&mut self, data: &[u8]) {
        self.data.extend_from_slice(data);
    }

    #[inline(always)]
    fn write_char(&mut self, c: u8) {
        self.data.push(c);
    }
}

const NUMBER_CHARS: &[u8] = b"+-0123456789.eE";

/// Positional lookahead/consumption over an in-memory text buffer.
///
/// The caret never consumes past the end; parse helpers report failures
/// as [`Error::ParseError`] carrying the byte position.
pub struct Caret<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Caret<'a> {
    pub fn new(data: &'a str) -> Self {
        Caret {
            data: data.as_bytes(),
            pos: 0,
        }
    }

    #[inline(always)]
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos.min(self.data.len());
    }

    #[inline(always)]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Byte under the caret without consuming it.
    #[inline(always)]
    pub fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    #[inline(always)]
    pub fn is_at_char(&self, c: u8) -> bool {
        self.peek() == Some(c)
    }

    /// Consumes one byte unconditionally (caller has peeked).
    #[inline(always)]
    pub fn advance(&mut self) {
        if self.pos < self.data.len() {
            self.pos += 1;
        }
    }

    /// Consumes the byte if it matches, reporting whether it did.
    pub fn consume_char(&mut self, c: u8) -> bool {
        if self.is_at_char(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    pub fn is_at_text(&self, text: &str) -> bool {
        self.data[self.pos..].starts_with(text.as_bytes())
    }

    /// Consumes `text` if the caret is exactly at it.
    pub fn skip_text(&mut self, text: &str) -> bool {
        if self.is_at_text(text) {
            self.pos += text.len();
            true
        } else {
            false
        }
    }

    /// Skips spaces, tabs and line breaks.
    pub fn skip_blank_chars(&mut self) {
        while let Some(c) = self.peek() {
            if c == b' ' || c == b'\t' || c == b'\r' || c == b'\n' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    /// The numeric token starting at the caret, without consuming it.
    fn number_token(&self) -> &'a [u8] {
        let start = self.pos;
        let mut end = start;
        while end < self.data.len() && NUMBER_CHARS.contains(&self.data[end]) {
            end += 1;
        }
        &self.data[start..end]
    }

    /// True if the numeric token under the caret carries a decimal
    /// separator or exponent. This lookahead, not a format flag, decides
    /// integer vs float parsing.
    pub fn number_is_float(&self) -> bool {
        self.number_token()
            .iter()
            .any(|c| matches!(c, b'.' | b'e' | b'E'))
    }

    /// Parses a signed decimal integer token and consumes it.
    pub fn parse_integer(&mut self) -> Result<i64, Error> {
        let token = self.number_token();
        if token.is_empty() {
            return Err(Error::parse_error("expected an integer", self.pos));
        }
        // number_token only matches ASCII
        let text = std::str::from_utf8(token)
            .map_err(|_| Error::parse_error("expected an integer", self.pos))?;
        let value = text.parse::<i64>().map_err(|e| {
            Error::parse_error(format!("invalid integer literal '{}': {}", text, e), self.pos)
        })?;
        self.pos += token.len();
        Ok(value)
    }

    /// Parses a decimal float token (optional fraction/exponent) and
    /// consumes it.
    pub fn parse_float(&mut self) -> Result<f64, Error> {
        let token = self.number_token();
        if token.is_empty() {
            return Err(Error::parse_error("expected a number", self.pos));
        }
        let text = std::str::from_utf8(token)
            .map_err(|_| Error::parse_error("expected a number", self.pos))?;
        let value = text.parse::<f64>().map_err(|e| {
            Error::parse_error(format!("invalid number literal '{}': {}", text, e), self.pos)
        })?;
        self.pos += token.len();
        Ok(value)
    }

    /// Remaining unparsed input.
    pub fn tail(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }
}
