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

//! The `Problem` trait is an external collaborator (spec §6): the concrete
//! cost functions and solution representations it describes are explicitly
//! out of scope for this crate (spec §1). The core only needs the narrow
//! surface below, used to confirm that every adapter fed into a parallel
//! multistarter shares the same problem identity (spec §4.6) and, should a
//! caller want it, to seed a tracker's notion of the problem's best
//! achievable cost.

use crate::cost::SearchCost;
use crate::solution::Copyable;

/// The read-only, thread-safe problem instance that an inner search (and,
/// transitively, its adapter) optimizes against. Implementations are
/// expected to be cheap to share behind an `Arc` and safe to call `cost`
/// concurrently from many worker threads.
pub trait Problem<S, C>: Send + Sync
where
    S: Copyable,
    C: SearchCost,
{
    /// Evaluates the cost of `solution`.
    fn cost(&self, solution: &S) -> C;

    /// The best (lowest) cost this problem could possibly admit, if known.
    /// Returns `None` when no useful bound is available.
    fn min_cost(&self) -> Option<C>;

    /// Whether `cost` equals [`Problem::min_cost`], i.e. is provably optimal.
    /// Default implementation compares against `min_cost()`; problems that
    /// can recognize optimality more cheaply may override this.
    fn is_min_cost(&self, cost: C) -> bool {
        self.min_cost().map(|m| m == cost).unwrap_or(false)
    }
}
