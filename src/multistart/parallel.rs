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

//! Fans `N` configured (adapter, schedule) pairs onto a [`WorkerPool`] and
//! merges their per-worker bests (spec §4.6).

use std::sync::Arc;

use crate::cost::SearchCost;
use crate::error::{Error, Result};
use crate::metaheuristic::Metaheuristic;
use crate::schedule::{Constant, RestartSchedule};
use crate::solution::{merge_best, Copyable, SolutionCostPair};
use crate::tracker::ProgressTracker;

use super::pool::WorkerPool;
use super::sequential::SequentialMultistarter;

/// Checks that every adapter in `fleet` shares the same problem and
/// progress-tracker identity (spec §4.6), returning the shared handles on
/// success. Shared with [`super::timed::TimedParallelMultistarter`], which
/// enforces the same precondition over its own fleet.
pub(crate) fn validate_fleet<S, C, P>(
    fleet: &[(Box<dyn Metaheuristic<S, C, P>>, Box<dyn RestartSchedule>)],
) -> Result<(Arc<P>, Arc<ProgressTracker<S, C>>)>
where
    S: Copyable + 'static,
    C: SearchCost,
    P: Send + Sync + 'static,
{
    if fleet.is_empty() {
        return Err(Error::invalid_argument("fleet must be non-empty"));
    }
    let problem = Arc::clone(fleet[0].0.problem());
    let tracker = fleet[0].0.progress_tracker();
    for (adapter, _) in fleet {
        if !Arc::ptr_eq(adapter.problem(), &problem) {
            return Err(Error::invalid_argument("all adapters in a fleet must share the same problem"));
        }
        if !Arc::ptr_eq(&adapter.progress_tracker(), &tracker) {
            return Err(Error::invalid_argument("all adapters in a fleet must share the same progress tracker"));
        }
    }
    Ok((problem, tracker))
}

/// Runs `N` independent inner searches concurrently, one per worker thread,
/// merging their results into a single best.
///
/// All `N` adapters must share the exact same problem and progress-tracker
/// identity (checked with `Arc::ptr_eq` at construction) — this is what
/// lets the engine treat the fleet's bests as comparable and lets every
/// worker observe the same stop/found-optimum signal.
pub struct ParallelMultistarter<S, C, P>
where
    S: Copyable + 'static,
    C: SearchCost,
    P: Send + Sync + 'static,
{
    pool: WorkerPool,
    fleet: Vec<Option<SequentialMultistarter<S, C, P>>>,
    problem: Arc<P>,
    tracker: Arc<ProgressTracker<S, C>>,
}

impl<S, C, P> ParallelMultistarter<S, C, P>
where
    S: Copyable + 'static,
    C: SearchCost,
    P: Send + Sync + 'static,
{
    /// Builds a multistarter from an explicit fleet of `(adapter,
    /// schedule)` pairs. Fails with `Error::InvalidArgument` if the fleet is
    /// empty or its adapters disagree on problem or tracker identity.
    pub fn from_fleet(fleet: Vec<(Box<dyn Metaheuristic<S, C, P>>, Box<dyn RestartSchedule>)>) -> Result<Self> {
        let (problem, tracker) = validate_fleet(&fleet)?;
        let size = fleet.len();
        let pool = WorkerPool::new(size)?;
        let members = fleet.into_iter().map(|(a, s)| Some(SequentialMultistarter::new(a, s))).collect();
        log::debug!("parallel multistarter built with {} workers", size);
        Ok(ParallelMultistarter { pool, fleet: members, problem, tracker })
    }

    /// `N` independent `split()`s of `adapter`, each paired with its own
    /// `Constant(length)` schedule.
    pub fn from_adapter_constant(adapter: Box<dyn Metaheuristic<S, C, P>>, length: u32, n: usize) -> Result<Self> {
        if n < 1 {
            return Err(Error::invalid_argument(format!("parallel multistarter fleet size must be >= 1, got {}", n)));
        }
        let fleet = (0..n)
            .map(|_| {
                let schedule: Box<dyn RestartSchedule> = Box::new(Constant::new(length)?);
                Ok((adapter.split(), schedule))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_fleet(fleet)
    }

    /// `N` independent `split()`s of both `adapter` and `schedule`.
    pub fn from_adapter_schedule(
        adapter: Box<dyn Metaheuristic<S, C, P>>,
        schedule: Box<dyn RestartSchedule>,
        n: usize,
    ) -> Result<Self> {
        if n < 1 {
            return Err(Error::invalid_argument(format!("parallel multistarter fleet size must be >= 1, got {}", n)));
        }
        let fleet = (0..n).map(|_| (adapter.split(), schedule.split())).collect();
        Self::from_fleet(fleet)
    }

    /// `N` independent `split()`s of `adapter`, one per schedule in
    /// `schedules`.
    pub fn from_adapter_schedules(
        adapter: Box<dyn Metaheuristic<S, C, P>>,
        schedules: Vec<Box<dyn RestartSchedule>>,
    ) -> Result<Self> {
        if schedules.is_empty() {
            return Err(Error::invalid_argument("parallel multistarter schedule list must be non-empty"));
        }
        let fleet = schedules.into_iter().map(|s| (adapter.split(), s)).collect();
        Self::from_fleet(fleet)
    }

    /// Each of `adapters`, paired with its own `Constant(length)` schedule.
    pub fn from_adapters_constant(adapters: Vec<Box<dyn Metaheuristic<S, C, P>>>, length: u32) -> Result<Self> {
        if adapters.is_empty() {
            return Err(Error::invalid_argument("parallel multistarter adapter list must be non-empty"));
        }
        let fleet = adapters
            .into_iter()
            .map(|a| Ok((a, Box::new(Constant::new(length)?) as Box<dyn RestartSchedule>)))
            .collect::<Result<Vec<_>>>()?;
        Self::from_fleet(fleet)
    }

    /// Zips `adapters` with `schedules` positionally. Fails with
    /// `Error::InvalidArgument` if the two lists' lengths differ.
    pub fn from_adapters_schedules(
        adapters: Vec<Box<dyn Metaheuristic<S, C, P>>>,
        schedules: Vec<Box<dyn RestartSchedule>>,
    ) -> Result<Self> {
        if adapters.len() != schedules.len() {
            return Err(Error::invalid_argument(format!(
                "adapter list length ({}) must match schedule list length ({})",
                adapters.len(),
                schedules.len()
            )));
        }
        if adapters.is_empty() {
            return Err(Error::invalid_argument("parallel multistarter adapter/schedule lists must be non-empty"));
        }
        let fleet = adapters.into_iter().zip(schedules).collect();
        Self::from_fleet(fleet)
    }

    /// Unwraps a list of already-built single-threaded multistarters into
    /// their `(adapter, schedule)` pairs.
    pub fn from_multistarters(multistarters: Vec<SequentialMultistarter<S, C, P>>) -> Result<Self> {
        if multistarters.is_empty() {
            return Err(Error::invalid_argument("parallel multistarter list must be non-empty"));
        }
        let fleet = multistarters.into_iter().map(|m| m.into_parts()).collect();
        Self::from_fleet(fleet)
    }

    /// The problem every worker in this fleet shares.
    pub fn problem(&self) -> &Arc<P> {
        &self.problem
    }

    /// The progress tracker every worker in this fleet shares.
    pub fn progress_tracker(&self) -> Arc<ProgressTracker<S, C>> {
        Arc::clone(&self.tracker)
    }

    /// Sums `total_run_length` across every adapter currently held by this
    /// fleet (spec §4.6).
    pub fn total_run_length(&self) -> i64 {
        self.fleet.iter().map(|slot| slot.as_ref().map(|m| m.total_run_length()).unwrap_or(0)).sum()
    }

    /// `true` once [`ParallelMultistarter::close`] has run.
    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }

    /// Shuts the underlying worker pool down. Idempotent.
    pub fn close(&self) {
        self.pool.close();
    }

    /// Submits one "run `num_restarts` restarts" task per worker, awaits
    /// every worker, and returns the minimum-cost local best across workers
    /// (or `None` if none contributed). Fails with `Error::InvalidState` if
    /// the pool is closed (spec §4.6).
    ///
    /// A worker whose inner search panics never aborts the fan-out: the
    /// panic is caught at the worker boundary and that worker contributes
    /// `None` instead (spec §4.6/§4.3).
    pub fn optimize(&mut self, num_restarts: u32) -> Result<Option<SolutionCostPair<S, C>>> {
        if self.pool.is_closed() {
            return Err(Error::invalid_state("parallel multistarter is closed"));
        }

        let members: Vec<(usize, SequentialMultistarter<S, C, P>)> = self
            .fleet
            .iter_mut()
            .enumerate()
            .map(|(idx, slot)| (idx, slot.take().expect("parallel multistarter: fleet slot empty mid-round")))
            .collect();

        type WorkerOutcome<S, C, P> = (usize, SequentialMultistarter<S, C, P>, Option<SolutionCostPair<S, C>>);

        let tasks: Vec<Box<dyn FnOnce() -> WorkerOutcome<S, C, P> + Send>> = members
            .into_iter()
            .map(|(idx, mut m)| -> Box<dyn FnOnce() -> WorkerOutcome<S, C, P> + Send> {
                Box::new(move || match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| m.optimize(num_restarts))) {
                    Ok(best) => (idx, m, best),
                    Err(payload) => {
                        log::warn!("worker {} inner search failed: {}", idx, Error::from_panic_payload(payload));
                        (idx, m, None)
                    }
                })
            })
            .collect();

        let receivers = self.pool.submit_all(tasks)?;
        let results = WorkerPool::await_all(receivers);

        let mut best = None;
        for outcome in results {
            match outcome {
                Some((idx, m, candidate)) => {
                    self.fleet[idx] = Some(m);
                    best = merge_best(best, candidate);
                }
                None => panic!("worker pool: a worker thread died while executing a restart round"),
            }
        }
        Ok(best)
    }

    /// Returns a new parallel multistarter whose adapters and schedules are
    /// fresh `split()`s of this one's, owning its own worker pool.
    pub fn split(&self) -> Result<Self> {
        let fleet = self
            .fleet
            .iter()
            .map(|slot| {
                let m = slot.as_ref().expect("parallel multistarter: fleet slot empty");
                m.split().into_parts()
            })
            .collect();
        Self::from_fleet(fleet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::Constant;
    use crate::test_support::CountingMetaheuristic;

    #[test]
    fn mismatched_trackers_are_rejected_at_construction() {
        let tracker_a = ProgressTracker::<i32, i64>::new();
        let tracker_b = ProgressTracker::<i32, i64>::new();
        let a = CountingMetaheuristic::always_succeeds(tracker_a);
        let b = CountingMetaheuristic::always_succeeds(tracker_b);
        let fleet: Vec<(Box<dyn Metaheuristic<i32, i64, _>>, Box<dyn RestartSchedule>)> =
            vec![(Box::new(a), Box::new(Constant::new(10).unwrap())), (Box::new(b), Box::new(Constant::new(10).unwrap()))];
        assert!(ParallelMultistarter::from_fleet(fleet).is_err());
    }

    #[test]
    fn exception_in_one_worker_does_not_abort_the_fan_out() {
        let tracker = ProgressTracker::<i32, i64>::new();
        let normal = CountingMetaheuristic::always_succeeds(Arc::clone(&tracker));
        let throws = CountingMetaheuristic::always_panics(Arc::clone(&tracker));
        let empty = CountingMetaheuristic::always_returns_none(Arc::clone(&tracker));

        let fleet: Vec<(Box<dyn Metaheuristic<i32, i64, _>>, Box<dyn RestartSchedule>)> = vec![
            (Box::new(normal), Box::new(Constant::new(5).unwrap())),
            (Box::new(throws), Box::new(Constant::new(5).unwrap())),
            (Box::new(empty), Box::new(Constant::new(5).unwrap())),
        ];
        let mut m = ParallelMultistarter::from_fleet(fleet).unwrap();
        let best = m.optimize(1).unwrap();
        assert_eq!(best.unwrap().cost(), -5);
    }

    #[test]
    fn optimize_fails_on_a_closed_pool() {
        let tracker = ProgressTracker::<i32, i64>::new();
        let a = CountingMetaheuristic::always_succeeds(Arc::clone(&tracker));
        let fleet: Vec<(Box<dyn Metaheuristic<i32, i64, _>>, Box<dyn RestartSchedule>)> =
            vec![(Box::new(a), Box::new(Constant::new(5).unwrap()))];
        let mut m = ParallelMultistarter::from_fleet(fleet).unwrap();
        m.close();
        assert!(m.optimize(1).is_err());
    }

    #[test]
    fn split_gives_the_sibling_an_independent_fleet_and_pool() {
        let tracker = ProgressTracker::<i32, i64>::new();
        let a = CountingMetaheuristic::always_succeeds(Arc::clone(&tracker));
        let b = CountingMetaheuristic::always_succeeds(Arc::clone(&tracker));
        let fleet: Vec<(Box<dyn Metaheuristic<i32, i64, _>>, Box<dyn RestartSchedule>)> = vec![
            (Box::new(a), Box::new(Constant::new(5).unwrap())),
            (Box::new(b), Box::new(Constant::new(5).unwrap())),
        ];
        let mut original = ParallelMultistarter::from_fleet(fleet).unwrap();
        let mut sibling = original.split().unwrap();

        original.optimize(2).unwrap();
        assert_eq!(original.total_run_length(), 20);
        assert_eq!(sibling.total_run_length(), 0);

        sibling.optimize(1).unwrap();
        assert_eq!(sibling.total_run_length(), 10);
        assert_eq!(original.total_run_length(), 20);
    }

    #[test]
    fn total_run_length_sums_across_the_fleet() {
        let tracker = ProgressTracker::<i32, i64>::new();
        let a = CountingMetaheuristic::always_succeeds(Arc::clone(&tracker));
        let b = CountingMetaheuristic::always_succeeds(Arc::clone(&tracker));
        let fleet: Vec<(Box<dyn Metaheuristic<i32, i64, _>>, Box<dyn RestartSchedule>)> = vec![
            (Box::new(a), Box::new(Constant::new(10).unwrap())),
            (Box::new(b), Box::new(Constant::new(10).unwrap())),
        ];
        let mut m = ParallelMultistarter::from_fleet(fleet).unwrap();
        m.optimize(3).unwrap();
        assert_eq!(m.total_run_length(), 60);
    }
}
