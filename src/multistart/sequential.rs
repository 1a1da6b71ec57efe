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

//! This module provides the implementation of a single-threaded
//! multistarter: a multistarter that sequences the restarts of one inner
//! search on the calling thread (spec §4.4). It is the sequential twin of
//! `ParallelMultistarter`, just like the teacher's `SequentialSolver` is the
//! one-thread twin of its `ParallelSolver`.

use std::sync::Arc;

use crate::cost::SearchCost;
use crate::metaheuristic::Metaheuristic;
use crate::schedule::RestartSchedule;
use crate::solution::{merge_best, Copyable, SolutionCostPair};
use crate::tracker::ProgressTracker;

/// Sequences restarts of a single inner search against a single restart
/// schedule, all on the calling thread.
///
/// An exception (panic) from the wrapped adapter's `optimize` is **not**
/// caught here: it propagates straight to the caller of
/// [`SequentialMultistarter::optimize`], per spec §4.4/§7. Only the
/// parallel variants swallow inner-search panics.
pub struct SequentialMultistarter<S, C, P>
where
    S: Copyable,
    C: SearchCost,
{
    adapter: Box<dyn Metaheuristic<S, C, P>>,
    schedule: Box<dyn RestartSchedule>,
}

impl<S, C, P> SequentialMultistarter<S, C, P>
where
    S: Copyable,
    C: SearchCost,
{
    /// Builds a multistarter from one adapter and one schedule.
    pub fn new(adapter: Box<dyn Metaheuristic<S, C, P>>, schedule: Box<dyn RestartSchedule>) -> Self {
        SequentialMultistarter { adapter, schedule }
    }

    /// Runs up to `num_restarts` restarts, stopping early if the progress
    /// tracker reports `is_stopped()` or `did_find_best()`. The schedule is
    /// **not** reset between calls: a second call to `optimize` resumes the
    /// sequence where the first left off (spec §4.4).
    ///
    /// Returns the best `(solution, cost)` pair seen among the restarts
    /// that actually ran and returned non-`None`, or `None` if none did.
    pub fn optimize(&mut self, num_restarts: u32) -> Option<SolutionCostPair<S, C>> {
        let tracker = self.adapter.progress_tracker();
        let mut best = None;
        for _ in 0..num_restarts {
            if tracker.is_stopped() || tracker.did_find_best() {
                break;
            }
            let length = self.schedule.next();
            log::trace!("sequential multistarter: restart length={}", length);
            let result = self.adapter.optimize(length);
            best = merge_best(best, result);
        }
        best
    }

    /// Like [`SequentialMultistarter::optimize`], but with no fixed restart
    /// count: it keeps restarting until the tracker signals
    /// `is_stopped()`/`did_find_best()`, or `interrupt` is set. Used by the
    /// timed parallel multistarter's long-running per-worker task (spec
    /// §4.7's "optimize with a very large effective numRestarts").
    pub fn optimize_until_interrupted(&mut self, interrupt: &std::sync::atomic::AtomicBool) -> Option<SolutionCostPair<S, C>> {
        let tracker = self.adapter.progress_tracker();
        let mut best = None;
        loop {
            if tracker.is_stopped() || tracker.did_find_best() || interrupt.load(std::sync::atomic::Ordering::Acquire) {
                break;
            }
            let length = self.schedule.next();
            log::trace!("timed multistarter worker: restart length={}", length);
            let result = self.adapter.optimize(length);
            best = merge_best(best, result);
        }
        best
    }

    /// The total run length consumed by the wrapped adapter so far.
    pub fn total_run_length(&self) -> i64 {
        self.adapter.total_run_length()
    }

    /// The progress tracker the wrapped adapter reports into.
    pub fn progress_tracker(&self) -> Arc<ProgressTracker<S, C>> {
        self.adapter.progress_tracker()
    }

    /// Returns a new multistarter wrapping independent `split()`s of this
    /// one's adapter and schedule.
    pub fn split(&self) -> Self {
        SequentialMultistarter { adapter: self.adapter.split(), schedule: self.schedule.split() }
    }

    /// Consumes this multistarter, handing back its adapter and schedule.
    /// Used by [`crate::multistart::parallel::ParallelMultistarter`]'s
    /// "from already-built single-threaded multistarters" constructor
    /// (spec §4.6).
    pub fn into_parts(self) -> (Box<dyn Metaheuristic<S, C, P>>, Box<dyn RestartSchedule>) {
        (self.adapter, self.schedule)
    }
}
