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

//! Runs a [`super::parallel::ParallelMultistarter`]-shaped fleet
//! continuously for a wall-clock budget, sampling the shared tracker on a
//! fixed cadence (spec §4.7). Composes the same worker pool primitive as
//! the plain parallel multistarter with a time-controller loop on the
//! calling thread, per the "timed variants compose the base engine with a
//! time-controller" design note.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::cost::SearchCost;
use crate::error::{Error, Result};
use crate::metaheuristic::Metaheuristic;
use crate::schedule::{Constant, RestartSchedule};
use crate::solution::{Copyable, SolutionCostPair};
use crate::tracker::ProgressTracker;

use super::parallel::validate_fleet;
use super::pool::WorkerPool;
use super::sequential::SequentialMultistarter;

/// The default time-unit (spec §4.7): one second.
pub const DEFAULT_TIME_UNIT_MS: u64 = 1000;

/// A parallel multistarter that runs its fleet continuously and halts after
/// a wall-clock budget of `k` time units, recording one tracker snapshot
/// per completed time unit.
pub struct TimedParallelMultistarter<S, C, P>
where
    S: Copyable + 'static,
    C: SearchCost,
    P: Send + Sync + 'static,
{
    pool: WorkerPool,
    fleet: Vec<Option<SequentialMultistarter<S, C, P>>>,
    problem: Arc<P>,
    tracker: Arc<ProgressTracker<S, C>>,
    time_unit: Duration,
    history: Vec<Option<SolutionCostPair<S, C>>>,
}

impl<S, C, P> TimedParallelMultistarter<S, C, P>
where
    S: Copyable + 'static,
    C: SearchCost,
    P: Send + Sync + 'static,
{
    /// Builds a multistarter from an explicit fleet of `(adapter,
    /// schedule)` pairs, at the default one-second time unit. Fails with
    /// `Error::InvalidArgument` under the same conditions as
    /// [`super::parallel::ParallelMultistarter::from_fleet`].
    pub fn from_fleet(fleet: Vec<(Box<dyn Metaheuristic<S, C, P>>, Box<dyn RestartSchedule>)>) -> Result<Self> {
        let (problem, tracker) = validate_fleet(&fleet)?;
        let size = fleet.len();
        let pool = WorkerPool::new(size)?;
        let members = fleet.into_iter().map(|(a, s)| Some(SequentialMultistarter::new(a, s))).collect();
        log::debug!("timed parallel multistarter built with {} workers", size);
        Ok(TimedParallelMultistarter {
            pool,
            fleet: members,
            problem,
            tracker,
            time_unit: Duration::from_millis(DEFAULT_TIME_UNIT_MS),
            history: Vec::new(),
        })
    }

    /// `N` independent `split()`s of `adapter`, each paired with its own
    /// `Constant(length)` schedule.
    pub fn from_adapter_constant(adapter: Box<dyn Metaheuristic<S, C, P>>, length: u32, n: usize) -> Result<Self> {
        if n < 1 {
            return Err(Error::invalid_argument(format!("timed multistarter fleet size must be >= 1, got {}", n)));
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
            return Err(Error::invalid_argument(format!("timed multistarter fleet size must be >= 1, got {}", n)));
        }
        let fleet = (0..n).map(|_| (adapter.split(), schedule.split())).collect();
        Self::from_fleet(fleet)
    }

    /// Overrides the time unit (default one second, per spec §4.7).
    /// Fails with `Error::InvalidArgument` if `time_unit_ms == 0`.
    pub fn with_time_unit_millis(mut self, time_unit_ms: u64) -> Result<Self> {
        if time_unit_ms == 0 {
            return Err(Error::invalid_argument("time unit must be > 0 milliseconds"));
        }
        self.time_unit = Duration::from_millis(time_unit_ms);
        Ok(self)
    }

    /// The problem every worker in this fleet shares.
    pub fn problem(&self) -> &Arc<P> {
        &self.problem
    }

    /// The progress tracker every worker in this fleet shares.
    pub fn progress_tracker(&self) -> Arc<ProgressTracker<S, C>> {
        Arc::clone(&self.tracker)
    }

    /// The tracker snapshots recorded by the most recent `optimize` call,
    /// one per completed time unit, in order. Cleared at the start of every
    /// `optimize` call.
    pub fn history(&self) -> &[Option<SolutionCostPair<S, C>>] {
        &self.history
    }

    /// Sums `total_run_length` across every adapter currently held by this
    /// fleet.
    pub fn total_run_length(&self) -> i64 {
        self.fleet.iter().map(|slot| slot.as_ref().map(|m| m.total_run_length()).unwrap_or(0)).sum()
    }

    /// `true` once [`TimedParallelMultistarter::close`] has run.
    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }

    /// Shuts the underlying worker pool down. Idempotent.
    pub fn close(&self) {
        self.pool.close();
    }

    /// Runs the fleet for up to `k` time units, sampling the tracker once
    /// per completed unit, then interrupts every worker and returns the
    /// tracker's final best (spec §4.7). Fails with `Error::InvalidState`
    /// if the pool is closed.
    pub fn optimize(&mut self, k: u32) -> Result<Option<SolutionCostPair<S, C>>> {
        if self.pool.is_closed() {
            return Err(Error::invalid_state("timed parallel multistarter is closed"));
        }
        self.history.clear();
        self.pool.reset_interrupt();
        let interrupt = self.pool.interrupt_flag();

        let members: Vec<(usize, SequentialMultistarter<S, C, P>)> = self
            .fleet
            .iter_mut()
            .enumerate()
            .map(|(idx, slot)| (idx, slot.take().expect("timed parallel multistarter: fleet slot empty mid-round")))
            .collect();

        type WorkerOutcome<S, C, P> = (usize, SequentialMultistarter<S, C, P>);

        let tasks: Vec<Box<dyn FnOnce() -> WorkerOutcome<S, C, P> + Send>> = members
            .into_iter()
            .map(|(idx, mut m)| -> Box<dyn FnOnce() -> WorkerOutcome<S, C, P> + Send> {
                let interrupt = Arc::clone(&interrupt);
                Box::new(move || {
                    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                        m.optimize_until_interrupted(&interrupt)
                    }));
                    if let Err(payload) = outcome {
                        log::warn!("worker {} inner search failed: {}", idx, Error::from_panic_payload(payload));
                    }
                    (idx, m)
                })
            })
            .collect();

        let receivers = self.pool.submit_all(tasks)?;

        for _ in 0..k {
            thread::sleep(self.time_unit);
            let snapshot = self.tracker.best_pair();
            log::trace!("timed multistarter snapshot: cost={:?}", snapshot.as_ref().map(|p| p.cost()));
            self.history.push(snapshot);
            if self.tracker.is_stopped() || self.tracker.did_find_best() {
                break;
            }
        }

        self.pool.interrupt_all();
        let results = WorkerPool::await_all(receivers);
        for outcome in results {
            match outcome {
                Some((idx, m)) => self.fleet[idx] = Some(m),
                None => panic!("worker pool: a worker thread died while executing a timed round"),
            }
        }

        // Workers only poll `interrupt` at the top of each restart, so one can
        // still call `tracker.update` with a strictly better cost between the
        // last in-loop sample above and `await_all` actually returning. Now
        // that every worker is guaranteed quiesced, replace the last sample
        // with a fresh one so `history`'s last entry matches the returned best.
        let best = self.tracker.best_pair();
        if let Some(last) = self.history.last_mut() {
            *last = best.clone();
        }

        Ok(best)
    }
}
