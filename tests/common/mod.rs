// Shared fixtures for restarto's integration tests: a trivial problem and a
// hand-scripted adapter, playing the same role as `test_support` does for
// the crate's own unit tests, but usable from outside the crate.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use restarto::prelude::*;

/// Installs `env_logger` once per test binary, so the crate's `debug`/`trace`
/// diagnostics (spec §4.9) can be inspected with `RUST_LOG=restarto=trace`.
/// Safe to call from every test: `try_init` no-ops on the second and later
/// calls instead of panicking.
pub fn init_logging() {
    let _ = env_logger::try_init();
}

#[derive(Debug, Default)]
pub struct DummyProblem;

impl Problem<i32, i64> for DummyProblem {
    fn cost(&self, solution: &i32) -> i64 {
        *solution as i64
    }

    fn min_cost(&self) -> Option<i64> {
        Some(1)
    }
}

#[derive(Clone)]
pub enum Behavior {
    AlwaysSucceeds,
    StopsTrackerAt(i64),
    FindsOptimumAt(i64),
    AlwaysPanics,
    AlwaysReturnsNone,
}

pub struct CountingAdapter {
    problem: Arc<DummyProblem>,
    tracker: Arc<ProgressTracker<i32, i64>>,
    total_run_length: i64,
    optimize_calls: Arc<AtomicU32>,
    behavior: Behavior,
}

impl CountingAdapter {
    pub fn new(tracker: Arc<ProgressTracker<i32, i64>>, behavior: Behavior) -> Self {
        CountingAdapter {
            problem: Arc::new(DummyProblem),
            tracker,
            total_run_length: 0,
            optimize_calls: Arc::new(AtomicU32::new(0)),
            behavior,
        }
    }

    /// A handle to this adapter's `optimize` call counter, clonable before
    /// the adapter is boxed and handed off to a multistarter, so a test can
    /// still read it afterwards.
    pub fn call_counter(&self) -> Arc<AtomicU32> {
        Arc::clone(&self.optimize_calls)
    }

    /// The number of times `optimize` has been called so far.
    pub fn optimize_calls(&self) -> u32 {
        self.optimize_calls.load(Ordering::Acquire)
    }
}

impl Metaheuristic<i32, i64, DummyProblem> for CountingAdapter {
    fn optimize(&mut self, run_length: u32) -> Option<SolutionCostPair<i32, i64>> {
        self.optimize_calls.fetch_add(1, Ordering::AcqRel);
        match self.behavior {
            Behavior::AlwaysPanics => panic!("CountingAdapter: scripted inner failure"),
            Behavior::AlwaysReturnsNone => {
                self.total_run_length += run_length as i64;
                None
            }
            Behavior::AlwaysSucceeds => {
                self.total_run_length += run_length as i64;
                let cost = -self.total_run_length;
                let solution = self.total_run_length as i32;
                self.tracker.update(&solution, cost, false);
                Some(SolutionCostPair::new(solution, cost, false))
            }
            Behavior::StopsTrackerAt(e) => {
                let start = self.total_run_length;
                if start >= e {
                    return None;
                }
                let end = start + run_length as i64;
                if end >= e {
                    self.total_run_length = e;
                    self.tracker.stop();
                    Some(SolutionCostPair::new(e as i32, 999, false))
                } else {
                    self.total_run_length = end;
                    Some(SolutionCostPair::new(end as i32, 999, false))
                }
            }
            Behavior::FindsOptimumAt(e) => {
                let start = self.total_run_length;
                if start >= e {
                    return None;
                }
                let end = start + run_length as i64;
                if end >= e {
                    self.total_run_length = e;
                    self.tracker.update(&(e as i32), 1, true);
                    Some(SolutionCostPair::new(e as i32, 1, true))
                } else {
                    self.total_run_length = end;
                    Some(SolutionCostPair::new(end as i32, 999, false))
                }
            }
        }
    }

    fn progress_tracker(&self) -> Arc<ProgressTracker<i32, i64>> {
        Arc::clone(&self.tracker)
    }

    fn set_progress_tracker(&mut self, tracker: Arc<ProgressTracker<i32, i64>>) {
        self.tracker = tracker;
    }

    fn problem(&self) -> &Arc<DummyProblem> {
        &self.problem
    }

    fn total_run_length(&self) -> i64 {
        self.total_run_length
    }

    fn split(&self) -> Box<dyn Metaheuristic<i32, i64, DummyProblem>> {
        Box::new(CountingAdapter {
            problem: Arc::clone(&self.problem),
            tracker: Arc::clone(&self.tracker),
            total_run_length: 0,
            optimize_calls: Arc::new(AtomicU32::new(0)),
            behavior: self.behavior.clone(),
        })
    }
}
