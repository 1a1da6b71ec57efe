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

//! Restart schedules (spec §4.1): stateful, generally-infinite generators of
//! positive run lengths. A schedule is consumed by exactly one engine;
//! `split()` produces the independent per-worker copies the parallel
//! multistarter hands out.

mod constant;
mod luby;
mod val;

pub use constant::Constant;
pub use luby::Luby;
pub use val::{parallel_val, VariableAnnealingLength};

/// The largest run length a [`VariableAnnealingLength`] schedule can emit;
/// `i32::MAX`, matching the source's 32-bit saturation behaviour.
pub const MAX_RUN_LENGTH: u32 = i32::MAX as u32;

/// A stateful generator of positive run lengths.
///
/// Implementations must uphold three invariants (spec §4.1):
/// - `next()` never returns `0`;
/// - `reset()` returns the generator to its construction state;
/// - `split()` returns an instance that would produce the same sequence from
///   a fresh state, but shares no mutable state with `self`.
///
/// `reset()`-ing a schedule that a worker thread is concurrently consuming
/// is a precondition violation (spec §9, open question 3): this trait does
/// not guard against it, and no engine in this crate ever calls `reset()` on
/// a schedule it has handed off to a worker.
pub trait RestartSchedule: Send {
    /// Returns the next run length. Always `>= 1`.
    fn next(&mut self) -> u32;

    /// Resets the generator back to its construction state.
    fn reset(&mut self);

    /// Returns an independent copy that would produce the same sequence as
    /// `self` from a fresh state, sharing no mutable state with `self`.
    fn split(&self) -> Box<dyn RestartSchedule>;
}
