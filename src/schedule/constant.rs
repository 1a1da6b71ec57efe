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

use super::RestartSchedule;
use crate::error::{Error, Result};

/// An infinite stream of one fixed run length `ℓ₀`.
#[derive(Debug, Copy, Clone)]
pub struct Constant {
    length: u32,
}

impl Constant {
    /// Builds a schedule that always emits `length`. Fails with
    /// `Error::InvalidArgument` if `length < 1`.
    pub fn new(length: u32) -> Result<Self> {
        if length < 1 {
            return Err(Error::invalid_argument(format!(
                "Constant run length must be >= 1, got {}",
                length
            )));
        }
        log::debug!("constructing Constant schedule (length={})", length);
        Ok(Constant { length })
    }
}

impl RestartSchedule for Constant {
    fn next(&mut self) -> u32 {
        self.length
    }

    fn reset(&mut self) {
        // no mutable state besides the construction parameter itself
    }

    fn split(&self) -> Box<dyn RestartSchedule> {
        Box::new(*self)
    }
}
