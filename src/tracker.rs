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

//! This module provides the [`ProgressTracker`]: the single cross-worker
//! shared-state object carrying the best solution found so far, plus the
//! `stopped` and `foundOptimum` flags that let workers terminate early.
//!
//! Just like the teacher's `Shared`/`Critical` pair in
//! `implementation/solver/parallel.rs`, all of the mutable state lives
//! behind one `parking_lot::Mutex` rather than behind a handful of atomics:
//! `update` needs to compare-and-replace `(cost, solution)` as one unit, and
//! a solution is an arbitrary caller type that may not fit in a lock-free
//! word.

use parking_lot::Mutex;
use std::sync::Arc;

use crate::cost::SearchCost;
use crate::solution::{Copyable, SolutionCostPair};

struct Critical<S, C>
where
    S: Copyable,
    C: SearchCost,
{
    best: Option<SolutionCostPair<S, C>>,
    stopped: bool,
    found_optimum: bool,
}

/// Cross-thread best-solution and stop/found-optimum flags, shared by every
/// worker of a parallel engine and by the engine itself (spec §3/§4.2).
///
/// The cost type `C` is fixed at construction by the generic parameter and
/// never changes for the tracker's lifetime; `containsIntCost()` is
/// answered by `C::IS_INTEGER` rather than by an inspectable runtime flag.
pub struct ProgressTracker<S, C>
where
    S: Copyable,
    C: SearchCost,
{
    critical: Mutex<Critical<S, C>>,
}

impl<S, C> ProgressTracker<S, C>
where
    S: Copyable,
    C: SearchCost,
{
    /// Creates a fresh tracker with no best solution yet, not stopped, and
    /// the optimum not yet found.
    pub fn new() -> Arc<Self> {
        log::debug!("creating progress tracker (int_cost={})", C::IS_INTEGER);
        Arc::new(ProgressTracker {
            critical: Mutex::new(Critical { best: None, stopped: false, found_optimum: false }),
        })
    }

    /// Offers a candidate result to the tracker. If `cost` is strictly lower
    /// than the current best (or there is no current best yet), the best is
    /// atomically replaced with a clone of `(solution, cost)` and `true` is
    /// returned. If `contains_optimum` is `true`, the found-optimum flag is
    /// set irreversibly regardless of whether this candidate improved best.
    pub fn update(&self, solution: &S, cost: C, contains_optimum: bool) -> bool {
        let mut critical = self.critical.lock();
        let improved = match &critical.best {
            None => true,
            Some(best) => cost < best.cost(),
        };
        if improved {
            critical.best = Some(SolutionCostPair::new(solution.clone(), cost, contains_optimum));
        }
        if contains_optimum {
            critical.found_optimum = true;
        }
        log::trace!("tracker update: cost={:?} improved={} found_optimum={}", cost, improved, contains_optimum);
        improved
    }

    /// Signals every future `is_stopped()` caller to stop. Irreversible.
    pub fn stop(&self) {
        let mut critical = self.critical.lock();
        critical.stopped = true;
    }

    /// `true` once `stop()` has been called at least once.
    pub fn is_stopped(&self) -> bool {
        self.critical.lock().stopped
    }

    /// `true` once some `update` call was made with `contains_optimum = true`.
    pub fn did_find_best(&self) -> bool {
        self.critical.lock().found_optimum
    }

    /// The current best cost, if any candidate has been offered yet.
    pub fn cost(&self) -> Option<C> {
        self.critical.lock().best.as_ref().map(|p| p.cost())
    }

    /// A clone of the current best solution, if any candidate has been
    /// offered yet.
    pub fn solution(&self) -> Option<S> {
        self.critical.lock().best.as_ref().map(|p| p.solution().clone())
    }

    /// A clone of the current best `(solution, cost, contains_optimum)`
    /// triple, if any candidate has been offered yet.
    pub fn best_pair(&self) -> Option<SolutionCostPair<S, C>> {
        self.critical.lock().best.clone()
    }

    /// Whether this tracker's cost type is integer-valued. Answered at the
    /// type level (spec §4.2's "fixed for its lifetime" is a compile-time
    /// guarantee here, not a runtime one).
    pub fn contains_int_cost(&self) -> bool {
        C::IS_INTEGER
    }
}
