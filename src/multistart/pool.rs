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

//! A one-shot worker pool (spec §4.5): `N` long-lived OS threads draining a
//! shared task channel, a cooperative interrupt flag every submitted task
//! may poll, and a `close()` that joins every thread exactly once.
//!
//! Unlike the teacher's `crossbeam::thread::scope`-based parallel solver,
//! this pool outlives any single round of work — [`ParallelMultistarter`]
//! submits to it across many `optimize(k)` calls before closing it — so
//! tasks are boxed `'static` closures routed through a
//! `crossbeam::channel` rather than borrowed scope closures.
//!
//! [`ParallelMultistarter`]: super::parallel::ParallelMultistarter

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam::channel::{self, Receiver, Sender};
use parking_lot::Mutex;

use crate::error::{Error, Result};

type Job = Box<dyn FnOnce() + Send + 'static>;

/// `N` persistent worker threads sharing one task queue.
///
/// `submit_all` hands out exactly one task per worker; `await_all` collects
/// their results, turning a panicking or disconnected worker into `None`
/// rather than propagating (spec §4.5's "propagates nothing"). Panics from
/// the *inner search itself* are expected to already be caught inside the
/// submitted task (see `multistart::parallel` / `multistart::timed`); a
/// task that panics despite that indicates a bug in this crate, not in a
/// caller's inner search, so it is treated as fatal here.
pub struct WorkerPool {
    size: usize,
    sender: Mutex<Option<Sender<Job>>>,
    handles: Mutex<Vec<JoinHandle<()>>>,
    interrupt: Arc<AtomicBool>,
}

impl WorkerPool {
    /// Starts `size` worker threads. Fails with `Error::InvalidArgument` if
    /// `size < 1`.
    pub fn new(size: usize) -> Result<Self> {
        if size < 1 {
            return Err(Error::invalid_argument(format!("worker pool size must be >= 1, got {}", size)));
        }
        let (tx, rx) = channel::unbounded::<Job>();
        let mut handles = Vec::with_capacity(size);
        for i in 0..size {
            let rx = rx.clone();
            let handle = thread::Builder::new()
                .name(format!("restarto-worker-{}", i))
                .spawn(move || {
                    while let Ok(job) = rx.recv() {
                        job();
                    }
                })
                .expect("failed to spawn worker thread");
            handles.push(handle);
        }
        log::debug!("worker pool started with {} threads", size);
        Ok(WorkerPool { size, sender: Mutex::new(Some(tx)), handles: Mutex::new(handles), interrupt: Arc::new(AtomicBool::new(false)) })
    }

    /// Starts one worker thread per available CPU (`num_cpus::get()`),
    /// mirroring the teacher solver's own `new()`/`customized()` split.
    pub fn new_default() -> Result<Self> {
        Self::new(num_cpus::get())
    }

    /// The number of worker threads this pool owns.
    pub fn size(&self) -> usize {
        self.size
    }

    /// `true` once [`WorkerPool::close`] has run.
    pub fn is_closed(&self) -> bool {
        self.sender.lock().is_none()
    }

    /// A handle to this pool's cooperative interrupt flag. Submitted tasks
    /// are expected to poll it (directly, or via whatever their wrapped
    /// inner search exposes) and wind down at their next suspension point.
    pub fn interrupt_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.interrupt)
    }

    /// Sets the interrupt flag. Does not itself block; callers still need
    /// to `await_all` to observe the workers actually finishing (spec
    /// §4.5's "the pool then joins" happens at `close`, not here).
    pub fn interrupt_all(&self) {
        self.interrupt.store(true, Ordering::Release);
    }

    /// Clears the interrupt flag, so the pool can be reused for a fresh
    /// round after a prior one was interrupted.
    pub fn reset_interrupt(&self) {
        self.interrupt.store(false, Ordering::Release);
    }

    /// Schedules exactly one task per worker. Fails with
    /// `Error::InvalidState` if the pool is closed, or
    /// `Error::InvalidArgument` if `tasks.len() != self.size()`.
    pub fn submit_all<F, R>(&self, tasks: Vec<F>) -> Result<Vec<Receiver<R>>>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        let guard = self.sender.lock();
        let sender = guard.as_ref().ok_or_else(|| Error::invalid_state("worker pool is closed"))?;
        if tasks.len() != self.size {
            return Err(Error::invalid_argument(format!(
                "expected exactly {} tasks (one per worker), got {}",
                self.size,
                tasks.len()
            )));
        }
        let mut receivers = Vec::with_capacity(tasks.len());
        for task in tasks {
            let (tx, rx) = channel::bounded(1);
            let job: Job = Box::new(move || {
                let _ = tx.send(task());
            });
            sender.send(job).expect("worker pool: a worker thread died unexpectedly");
            receivers.push(rx);
        }
        Ok(receivers)
    }

    /// Blocks until every receiver from a prior `submit_all` either yields
    /// its result or its sender is dropped without sending (turned into
    /// `None`).
    pub fn await_all<R: Send + 'static>(receivers: Vec<Receiver<R>>) -> Vec<Option<R>> {
        receivers.into_iter().map(|rx| rx.recv().ok()).collect()
    }

    /// Shuts the pool down: no further `submit_all` will succeed, and every
    /// worker thread is joined. Idempotent.
    pub fn close(&self) {
        let sender = self.sender.lock().take();
        if sender.is_none() {
            return;
        }
        drop(sender);
        let mut handles = self.handles.lock();
        for handle in handles.drain(..) {
            let _ = handle.join();
        }
        log::debug!("worker pool with {} threads closed", self.size);
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.close();
    }
}
