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

//! A progress tracker's cost type is either integer- or double-valued, but
//! fixed for the tracker's whole lifetime (spec §3/§4.2). Rather than carry a
//! runtime `containsIntCost` flag and branch on it, this crate fixes the cost
//! type at the type level: `ProgressTracker<S, C>` is generic over `C:
//! SearchCost`, and `SearchCost::IS_INTEGER` answers `containsIntCost()`
//! without an `if`.

use ordered_float::OrderedFloat;
use std::fmt::Debug;

/// The capability a cost type must offer to back a [`crate::tracker::ProgressTracker`].
///
/// Implemented for `i64` (integer-valued problems) and `f64` (double-valued
/// problems, via `ordered_float` for a total order).
pub trait SearchCost: Copy + Clone + PartialOrd + Ord + Debug + Send + Sync + 'static {
    /// `true` iff this cost type represents integer-valued costs. Answers the
    /// spec's `containsIntCost()` accessor at the type level.
    const IS_INTEGER: bool;
}

impl SearchCost for i64 {
    const IS_INTEGER: bool = true;
}

/// Double-valued cost, ordered via [`OrderedFloat`] so that it can serve as a
/// `SearchCost` (NaN is treated as greater than everything, matching
/// `OrderedFloat`'s total order).
impl SearchCost for OrderedFloat<f64> {
    const IS_INTEGER: bool = false;
}
