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

//! Error handling for the Arbor mapping engine.
//!
//! Two channels coexist:
//!
//! - [`enum@Error`]: fatal and boundary errors, returned through `Result`.
//! - [`ErrorStack`]: the recoverable channel used inside recursive mapping
//!   and parsing. Each failing frame pushes one contextual line
//!   (`field='x'`, `index=3`, `key='y'`), so the finished stack reads as a
//!   pseudo stack trace from the failure site back to the entry point.
//!   Facades convert a non-empty stack into a single [`enum@Error`]; the
//!   recursion itself never unwinds through `Result`, so partial results
//!   stay inspectable.

use std::borrow::Cow;

use thiserror::Error;

/// Global flag to check if ARBOR_PANIC_ON_ERROR environment variable is set at compile time.
/// Set ARBOR_PANIC_ON_ERROR=1 at compile time to enable panic on error.
pub const PANIC_ON_ERROR: bool = option_env!("ARBOR_PANIC_ON_ERROR").is_some();

/// Error type for Arbor mapping and JSON codec operations.
///
/// Do not construct variants directly; use the static constructor
/// functions (`Error::type_error(..)`, `Error::invalid_data(..)`, ...).
/// They accept anything `Into<Cow<'static, str>>` and honor the
/// `ARBOR_PANIC_ON_ERROR` debug switch, which panics at the construction
/// site so the failure origin shows up in a backtrace:
///
/// ```bash
/// RUST_BACKTRACE=1 ARBOR_PANIC_ON_ERROR=1 cargo test
/// ```
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Wrong accessor for the node's current discriminant, or a typed
    /// value whose payload does not match its declared kind.
    #[error("{0}")]
    TypeError(Cow<'static, str>),

    /// Invalid or out-of-range input data.
    #[error("{0}")]
    InvalidData(Cow<'static, str>),

    /// Vector index out of bounds.
    #[error("Index {0} out of bounds, size = {1}")]
    IndexOutOfBounds(usize, usize),

    /// JSON grammar violation at a byte position.
    #[error("Parse error at position {1}: {0}")]
    ParseError(Cow<'static, str>, usize),

    /// Malformed escape sequence at a byte position.
    #[error("Invalid escaped character at position {0}")]
    InvalidEscapedChar(usize),

    /// Unpaired or invalid UTF-16 surrogate at a byte position.
    #[error("Invalid surrogate pair at position {0}")]
    InvalidSurrogatePair(usize),

    /// A string literal was expected but no opening/closing quote found.
    #[error("Expected '\"' at position {0}")]
    QuoteExpected(usize),

    /// Maximum nesting depth exceeded.
    #[error("{0}")]
    DepthExceed(Cow<'static, str>),

    /// Unsupported operation or value kind.
    #[error("{0}")]
    Unsupported(Cow<'static, str>),

    /// Aggregation of a non-empty [`ErrorStack`] at a facade boundary.
    #[error("{0}")]
    MappingFailed(Cow<'static, str>),

    /// Error in encoding or textual conversion.
    #[error("{0}")]
    EncodingError(Cow<'static, str>),

    /// Generic unknown error.
    #[error("{0}")]
    Unknown(Cow<'static, str>),
}

macro_rules! error_ctor {
    ($(#[$doc:meta])* $name:ident, $variant:ident) => {
        $(#[$doc])*
        #[inline(always)]
        #[cold]
        #[track_caller]
        pub fn $name<S: Into<Cow<'static, str>>>(s: S) -> Self {
            let err = Error::$variant(s.into());
            if PANIC_ON_ERROR {
                panic!("ARBOR_PANIC_ON_ERROR: {}", err);
            }
            err
        }
    };
}

impl Error {
    error_ctor!(
        /// Creates a new [`Error::TypeError`].
        ///
        /// # Example
        /// ```
        /// use arbor_core::error::Error;
        ///
        /// let err = Error::type_error("node is not a Map");
        /// ```
        type_error,
        TypeError
    );

    error_ctor!(
        /// Creates a new [`Error::InvalidData`].
        invalid_data,
        InvalidData
    );

    error_ctor!(
        /// Creates a new [`Error::DepthExceed`].
        depth_exceed,
        DepthExceed
    );

    error_ctor!(
        /// Creates a new [`Error::Unsupported`].
        unsupported,
        Unsupported
    );

    error_ctor!(
        /// Creates a new [`Error::MappingFailed`].
        mapping_failed,
        MappingFailed
    );

    error_ctor!(
        /// Creates a new [`Error::EncodingError`].
        encoding_error,
        EncodingError
    );

    error_ctor!(
        /// Creates a new [`Error::Unknown`].
        unknown,
        Unknown
    );

    /// Creates a new [`Error::IndexOutOfBounds`].
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn index_out_of_bounds(index: usize, size: usize) -> Self {
        let err = Error::IndexOutOfBounds(index, size);
        if PANIC_ON_ERROR {
            panic!("ARBOR_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::ParseError`] with the byte position of the failure.
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn parse_error<S: Into<Cow<'static, str>>>(s: S, position: usize) -> Self {
        let err = Error::ParseError(s.into(), position);
        if PANIC_ON_ERROR {
            panic!("ARBOR_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::InvalidEscapedChar`].
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn invalid_escaped_char(position: usize) -> Self {
        let err = Error::InvalidEscapedChar(position);
        if PANIC_ON_ERROR {
            panic!("ARBOR_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::InvalidSurrogatePair`].
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn invalid_surrogate_pair(position: usize) -> Self {
        let err = Error::InvalidSurrogatePair(position);
        if PANIC_ON_ERROR {
            panic!("ARBOR_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::QuoteExpected`].
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn quote_expected(position: usize) -> Self {
        let err = Error::QuoteExpected(position);
        if PANIC_ON_ERROR {
            panic!("ARBOR_PANIC_ON_ERROR: {}", err);
        }
        err
    }
}

/// Ordered list of contextual error frames accumulated during recursive
/// mapping, leaf-first. An empty stack means success.
///
/// ```
/// use arbor_core::error::ErrorStack;
///
/// let mut stack = ErrorStack::new();
/// stack.push("value is null");
/// stack.push("field='name'");
/// assert_eq!(stack.to_message(), "value is null\nfield='name'");
/// ```
#[derive(Debug, Default, Clone)]
pub struct ErrorStack {
    frames: Vec<Cow<'static, str>>,
}

impl ErrorStack {
    /// Creates an empty stack.
    pub fn new() -> Self {
        ErrorStack { frames: Vec::new() }
    }

    /// True if no error has been recorded.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Number of recorded frames.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Pushes one contextual frame.
    pub fn push<S: Into<Cow<'static, str>>>(&mut self, frame: S) {
        self.frames.push(frame.into());
    }

    /// Appends all frames of `other`, consuming it.
    pub fn splice(&mut self, other: ErrorStack) {
        self.frames.extend(other.frames);
    }

    /// Recorded frames, leaf-first.
    pub fn frames(&self) -> &[Cow<'static, str>] {
        &self.frames
    }

    /// Drops all frames.
    pub fn clear(&mut self) {
        self.frames.clear();
    }

    /// Joins the frames into one newline-separated message.
    pub fn to_message(&self) -> String {
        self.frames.join("\n")
    }

    /// Converts the stack into a single [`Error::MappingFailed`].
    ///
    /// Meant for facade boundaries only; inside the recursion the stack
    /// itself is the error channel.
    pub fn into_error(self) -> Error {
        Error::mapping_failed(self.to_message())
    }
}

/// Ensures a condition is true; otherwise returns an [`enum@Error`].
///
/// # Examples
/// ```
/// use arbor_core::ensure;
/// use arbor_core::error::Error;
///
/// fn check_value(n: i32) -> Result<(), Error> {
///     ensure!(n > 0, "value must be positive");
///     ensure!(n < 10, "value {} too large", n);
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $msg:literal) => {
        if !$cond {
            return Err($crate::error::Error::unknown($msg));
        }
    };
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err);
        }
    };
    ($cond:expr, $fmt:expr, $($arg:tt)*) => {
        if !$cond {
            return Err($crate::error::Error::unknown(format!($fmt, $($arg)*)));
        }
    };
}

/// Returns early with an [`enum@Error`].
///
/// # Examples
/// ```
/// use arbor_core::bail;
/// use arbor_core::error::Error;
///
/// fn fail_fast() -> Result<(), Error> {
///     bail!("something went wrong");
/// }
/// ```
#[macro_export]
macro_rules! bail {
    ($err:expr) => {
        return Err($crate::error::Error::unknown($err))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::error::Error::unknown(format!($fmt, $($arg)*)))
    };
}
