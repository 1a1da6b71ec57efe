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

//! The inner-search adapter interface (spec §4.3): the narrow contract the
//! engine calls into to execute one restart of a wrapped optimizer. The
//! optimizer itself — simulated annealing, hill climbing, a genetic
//! algorithm, whatever — is out of scope (spec §1); only this interface is.
//!
//! `split()` returns a boxed trait object rather than `Self`, keeping the
//! trait object-safe, which is what lets the engine hold a fleet of
//! heterogeneous adapters behind one `Box<dyn Metaheuristic<..>>` per
//! worker (spec §9, "Dynamic dispatch over adapters" — the same approach
//! the teacher takes with `DD: MDD<T, C> + From<C>` dispatched through a
//! generic solver).

use std::sync::Arc;

use crate::cost::SearchCost;
use crate::solution::{Copyable, SolutionCostPair};
use crate::tracker::ProgressTracker;

/// One wrapped inner search, bound to a solution type `S`, a cost type `C`
/// and a problem type `P`.
///
/// Implementations are expected to be cheap to `split()` into independent
/// siblings (own PRNG via [`crate::rng::SplittableRng::split`], same problem
/// and tracker identity) and safe to move to a worker thread (`Send`).
pub trait Metaheuristic<S, C, P>: Send
where
    S: Copyable,
    C: SearchCost,
{
    /// Runs one restart of length `run_length`, returning the resulting
    /// `(solution, cost, contains_optimum)` pair, or `None` if the adapter
    /// declined to run (e.g. the tracker was already stopped).
    ///
    /// May panic to signal an *inner-failure*; the single-threaded
    /// multistarter propagates that panic to its own caller, while the
    /// parallel variants catch and swallow it, contributing `None` instead.
    fn optimize(&mut self, run_length: u32) -> Option<SolutionCostPair<S, C>>;

    /// The progress tracker this adapter reports into.
    fn progress_tracker(&self) -> Arc<ProgressTracker<S, C>>;

    /// Replaces this adapter's progress tracker.
    fn set_progress_tracker(&mut self, tracker: Arc<ProgressTracker<S, C>>);

    /// The problem this adapter optimizes against.
    fn problem(&self) -> &Arc<P>;

    /// The total amount of run length (iterations, evaluations, ...)
    /// consumed by this adapter so far. Monotonically increasing.
    fn total_run_length(&self) -> i64;

    /// Returns an independent clone of this adapter: same problem and
    /// tracker identity, but its own mutable search state and its own
    /// (split-derived) random stream.
    fn split(&self) -> Box<dyn Metaheuristic<S, C, P>>;
}

/// An adapter that can *continue* a previous run rather than always
/// restarting from scratch (spec §4.3).
pub trait ReoptimizableMetaheuristic<S, C, P>: Metaheuristic<S, C, P>
where
    S: Copyable,
    C: SearchCost,
{
    /// Continues the previous run for `run_length` more units of work,
    /// returning the resulting pair, or `None` under the same conditions as
    /// [`Metaheuristic::optimize`].
    fn reoptimize(&mut self, run_length: u32) -> Option<SolutionCostPair<S, C>>;
}
