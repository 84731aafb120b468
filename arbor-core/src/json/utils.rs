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

//! JSON string escaping and unescaping.
//!
//! Both directions compute the exact output size first so a single
//! correctly-sized buffer can be allocated, then fill it. Unescape
//! failures carry the byte offset of the offending escape within the
//! string payload.

use std::fmt::Write as _;

use crate::error::Error;

/// Escape `/` as `\/`.
pub const FLAG_ESCAPE_SOLIDUS: u32 = 1;
/// Escape non-ASCII characters as `\uxxxx` (or a surrogate pair for
/// code points beyond the BMP).
pub const FLAG_ESCAPE_UTF8CHAR: u32 = 2;
pub const FLAG_ESCAPE_ALL: u32 = FLAG_ESCAPE_SOLIDUS | FLAG_ESCAPE_UTF8CHAR;

fn escaped_char_size(c: char, flags: u32) -> usize {
    match c {
        '"' | '\\' => 2,
        '/' => {
            if flags & FLAG_ESCAPE_SOLIDUS != 0 {
                2
            } else {
                1
            }
        }
        '\u{08}' | '\u{0c}' | '\n' | '\r' | '\t' => 2,
        c if (c as u32) < 0x20 => 6,
        c if (c as u32) < 0x80 => 1,
        c if flags & FLAG_ESCAPE_UTF8CHAR != 0 => {
            if (c as u32) < 0x10000 {
                6
            } else {
                // surrogate pair
                12
            }
        }
        c => c.len_utf8(),
    }
}

/// Exact byte length of [`escape_string`]'s output for `text`.
pub fn calc_escaped_string_size(text: &str, flags: u32) -> usize {
    text.chars().map(|c| escaped_char_size(c, flags)).sum()
}

/// Escapes `text` as a JSON string payload (no surrounding quotes).
pub fn escape_string(text: &str, flags: u32) -> String {
    let mut out = String::with_capacity(calc_escaped_string_size(text, flags));
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '/' => {
                if flags & FLAG_ESCAPE_SOLIDUS != 0 {
                    out.push_str("\\/");
                } else {
                    out.push('/');
                }
            }
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c if (c as u32) < 0x80 => out.push(c),
            c if flags & FLAG_ESCAPE_UTF8CHAR != 0 => {
                let code = c as u32;
                if code < 0x10000 {
                    let _ = write!(out, "\\u{:04x}", code);
                } else {
                    let v = code - 0x10000;
                    let high = 0xd800 + (v >> 10);
                    let low = 0xdc00 + (v & 0x3ff);
                    let _ = write!(out, "\\u{:04x}\\u{:04x}", high, low);
                }
            }
            c => out.push(c),
        }
    }
    out
}

#[inline(always)]
fn hex_digit(b: u8) -> Option<u32> {
    match b {
        b'0'..=b'9' => Some((b - b'0') as u32),
        b'a'..=b'f' => Some((b - b'a' + 10) as u32),
        b'A'..=b'F' => Some((b - b'A' + 10) as u32),
        _ => None,
    }
}

fn parse_hex(bytes: &[u8], at: usize, count: usize) -> Option<u32> {
    if at + count > bytes.len() {
        return None;
    }
    let mut value = 0u32;
    for &b in &bytes[at..at + count] {
        value = (value << 4) | hex_digit(b)?;
    }
    Some(value)
}

/// Single scan shared by size calculation and unescaping. `out` is
/// `None` for the sizing pass.
fn unescape_scan(text: &str, mut out: Option<&mut String>) -> Result<usize, Error> {
    let bytes = text.as_bytes();
    let mut size = 0usize;
    let mut i = 0usize;
    let mut run_start = 0usize;
    while i < bytes.len() {
        if bytes[i] != b'\\' {
            i += 1;
            continue;
        }
        // a backslash byte is always a char boundary in valid UTF-8
        size += i - run_start;
        if let Some(out) = out.as_deref_mut() {
            out.push_str(&text[run_start..i]);
        }
        let escape_pos = i;
        i += 1;
        let Some(&code) = bytes.get(i) else {
            return Err(Error::invalid_escaped_char(escape_pos));
        };
        let simple = match code {
            b'"' => Some('"'),
            b'\\' => Some('\\'),
            b'/' => Some('/'),
            b'b' => Some('\u{08}'),
            b'f' => Some('\u{0c}'),
            b'n' => Some('\n'),
            b'r' => Some('\r'),
            b't' => Some('\t'),
            b'u' => None,
            _ => return Err(Error::invalid_escaped_char(escape_pos)),
        };
        if let Some(c) = simple {
            size += 1;
            if let Some(out) = out.as_deref_mut() {
                out.push(c);
            }
            i += 1;
            run_start = i;
            continue;
        }
        // \u forms
        i += 1;
        let c = if bytes.get(i) == Some(&b'+') {
            // non-standard \u+XXXXXXXX form for code points beyond the
            // surrogate range
            let code_point =
                parse_hex(bytes, i + 1, 8).ok_or_else(|| Error::invalid_escaped_char(escape_pos))?;
            i += 9;
            char::from_u32(code_point).ok_or_else(|| Error::invalid_escaped_char(escape_pos))?
        } else {
            let unit =
                parse_hex(bytes, i, 4).ok_or_else(|| Error::invalid_escaped_char(escape_pos))?;
            if (0xd800..=0xdbff).contains(&unit) {
                if bytes.get(i + 4) != Some(&b'\\') || bytes.get(i + 5) != Some(&b'u') {
                    return Err(Error::invalid_surrogate_pair(escape_pos));
                }
                let low = parse_hex(bytes, i + 6, 4)
                    .ok_or_else(|| Error::invalid_surrogate_pair(escape_pos))?;
                if !(0xdc00..=0xdfff).contains(&low) {
                    return Err(Error::invalid_surrogate_pair(escape_pos));
                }
                let code_point = (((unit - 0xd800) << 10) | (low - 0xdc00)) + 0x10000;
                i += 10;
                char::from_u32(code_point)
                    .ok_or_else(|| Error::invalid_surrogate_pair(escape_pos))?
            } else if (0xdc00..=0xdfff).contains(&unit) {
                // low surrogate with no preceding high surrogate
                return Err(Error::invalid_surrogate_pair(escape_pos));
            } else {
                i += 4;
                char::from_u32(unit).ok_or_else(|| Error::invalid_escaped_char(escape_pos))?
            }
        };
        size += c.len_utf8();
        if let Some(out) = out.as_deref_mut() {
            out.push(c);
        }
        run_start = i;
    }
    size += bytes.len() - run_start;
    if let Some(out) = out {
        out.push_str(&text[run_start..]);
    }
    Ok(size)
}

/// Exact byte length of [`unescape_string`]'s output for `text`, or the
/// first escape error.
pub fn calc_unescaped_string_size(text: &str) -> Result<usize, Error> {
    unescape_scan(text, None)
}

/// Unescapes a JSON string payload (no surrounding quotes).
pub fn unescape_string(text: &str) -> Result<String, Error> {
    let size = calc_unescaped_string_size(text)?;
    let mut out = String::with_capacity(size);
    unescape_scan(text, Some(&mut out))?;
    Ok(out)
}
