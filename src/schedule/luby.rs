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

/// The Luby restart sequence, scaled by a constant factor `a`:
/// `1,1,2,1,1,2,4,1,1,2,1,1,2,4,8,…` times `a`.
///
/// `next()` emits `a * v`, then applies the classical doubling test that
/// identifies positions where the sequence resets: starting from `(u, v) =
/// (1, 1)`, if `(-u) & u == v` then `u += 1, v = 1`, otherwise `v *= 2`.
#[derive(Debug, Copy, Clone)]
pub struct Luby {
    a: u32,
    u: u32,
    v: u32,
    u0: u32,
    v0: u32,
}

impl Luby {
    /// Builds a Luby schedule scaled by `a`. Fails with
    /// `Error::InvalidArgument` if `a < 1`.
    pub fn new(a: u32) -> Result<Self> {
        if a < 1 {
            return Err(Error::invalid_argument(format!("Luby scale must be >= 1, got {}", a)));
        }
        log::debug!("constructing Luby schedule (a={})", a);
        Ok(Luby { a, u: 1, v: 1, u0: 1, v0: 1 })
    }
}

impl RestartSchedule for Luby {
    fn next(&mut self) -> u32 {
        let value = self.a * self.v;
        if (self.u.wrapping_neg() & self.u) == self.v {
            self.u += 1;
            self.v = 1;
        } else {
            self.v *= 2;
        }
        value
    }

    fn reset(&mut self) {
        self.u = self.u0;
        self.v = self.v0;
    }

    fn split(&self) -> Box<dyn RestartSchedule> {
        Box::new(*self)
    }
}
