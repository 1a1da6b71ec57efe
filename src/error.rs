// Copyright 2020 Xavier Gillard
//
// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! This module groups every error kind that the restart engine can raise.
//! There is a single error type threaded through every fallible constructor
//! and operation in the crate; inner-search failures that are *swallowed* by
//! the parallel fan-out (see `multistart::parallel`) are wrapped here too, so
//! that a caller who does see one (through the sequential multistarter) gets
//! a consistent type.

use std::fmt;

/// The one error type raised anywhere in this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A constructor was called with an argument that violates one of its
    /// preconditions (e.g. a non-positive run length, a fleet size of zero,
    /// mismatched list lengths).
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Human readable explanation of which precondition was violated.
        message: String,
    },

    /// An operation was attempted on a component that has already been
    /// irreversibly shut down (a closed worker pool, a closed multistarter).
    #[error("invalid state: {message}")]
    InvalidState {
        /// Human readable explanation of which lifecycle rule was broken.
        message: String,
    },

    /// The inner search panicked while executing a restart. Only the
    /// single-threaded multistarter propagates this; the parallel variants
    /// swallow it at the worker boundary and contribute no result instead.
    #[error("inner search failed: {0}")]
    Inner(String),
}

impl Error {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument { message: message.into() }
    }

    pub(crate) fn invalid_state(message: impl Into<String>) -> Self {
        Error::InvalidState { message: message.into() }
    }

    /// Builds an `Error::Inner` from a caught panic payload, best-effort
    /// extracting a message out of the usual `&str` / `String` payloads.
    pub(crate) fn from_panic_payload(payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "inner search panicked with a non-string payload".to_string()
        };
        Error::Inner(message)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::InvalidArgument => write!(f, "invalid-argument"),
            Kind::InvalidState => write!(f, "invalid-state"),
            Kind::Inner => write!(f, "inner-failure"),
        }
    }
}

/// The coarse-grained kind of an [`Error`], useful for tests and logging that
/// want to match on the category without formatting the whole message.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Kind {
    InvalidArgument,
    InvalidState,
    Inner,
}

impl Error {
    /// Returns the coarse-grained [`Kind`] of this error.
    pub fn kind(&self) -> Kind {
        match self {
            Error::InvalidArgument { .. } => Kind::InvalidArgument,
            Error::InvalidState { .. } => Kind::InvalidState,
            Error::Inner(_) => Kind::Inner,
        }
    }
}

/// Convenience alias used throughout the crate's fallible APIs.
pub type Result<T> = std::result::Result<T, Error>;
