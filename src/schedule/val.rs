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

use super::{RestartSchedule, MAX_RUN_LENGTH};
use crate::error::{Error, Result};

/// The default `r_base` used by [`parallel_val`] to derive each fleet
/// member's initial run length (spec §4.1).
const DEFAULT_R_BASE: u32 = 1000;

/// Variable Annealing Length: a run length that doubles on every call,
/// saturating at `i32::MAX` so it never overflows a signed 32-bit range.
#[derive(Debug, Copy, Clone)]
pub struct VariableAnnealingLength {
    r: u32,
    r0: u32,
}

impl VariableAnnealingLength {
    /// Builds a schedule starting at `r0`. Fails with
    /// `Error::InvalidArgument` if `r0 < 1`.
    pub fn new(r0: u32) -> Result<Self> {
        if r0 < 1 {
            return Err(Error::invalid_argument(format!(
                "VariableAnnealingLength initial run length must be >= 1, got {}",
                r0
            )));
        }
        log::debug!("constructing VariableAnnealingLength schedule (r0={})", r0);
        Ok(VariableAnnealingLength { r: r0, r0 })
    }
}

impl RestartSchedule for VariableAnnealingLength {
    fn next(&mut self) -> u32 {
        let value = self.r;
        self.r = if self.r < (1 << 30) { self.r * 2 } else { MAX_RUN_LENGTH };
        value
    }

    fn reset(&mut self) {
        self.r = self.r0;
    }

    fn split(&self) -> Box<dyn RestartSchedule> {
        Box::new(*self)
    }
}

/// Builds `t` independent [`VariableAnnealingLength`] schedules whose
/// initial run lengths are staggered as `r_base * 2^i` for `i` in `0..t`, so
/// that across the whole fleet, run `j` on worker `i` has length `r_base *
/// 2^(i+j)` (spec §4.1's "ParallelVAL factory"). Uses the default `r_base =
/// 1000`; fails with `Error::InvalidArgument` if `t < 1`.
pub fn parallel_val(t: usize) -> Result<Vec<VariableAnnealingLength>> {
    parallel_val_with_base(t, DEFAULT_R_BASE)
}

/// As [`parallel_val`], but with an explicit `r_base` instead of the
/// default `1000`.
pub fn parallel_val_with_base(t: usize, r_base: u32) -> Result<Vec<VariableAnnealingLength>> {
    if t < 1 {
        return Err(Error::invalid_argument(format!("ParallelVAL fleet size must be >= 1, got {}", t)));
    }
    log::debug!("constructing ParallelVAL fleet (t={}, r_base={})", t, r_base);
    (0..t)
        .map(|i| {
            // Use u64 arithmetic so that staggering a large fleet saturates
            // cleanly at MAX_RUN_LENGTH instead of silently wrapping.
            let shifted = (r_base as u64).checked_shl(i as u32).unwrap_or(u64::MAX);
            let r0 = shifted.min(MAX_RUN_LENGTH as u64) as u32;
            VariableAnnealingLength::new(r0)
        })
        .collect()
}
