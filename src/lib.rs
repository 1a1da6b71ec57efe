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

//! # restarto
//! `restarto` is a generic framework for parallel multistart metaheuristic
//! optimization. Its goal is to let you wrap a local-search or annealing
//! procedure (the *inner search*, see [`Metaheuristic`]) and run many
//! independent restarts — sequentially, in parallel, or on a wall-clock
//! budget — governed by a pluggable [`RestartSchedule`], with a shared
//! [`ProgressTracker`] coordinating early termination across workers.
//!
//! ## Side benefit
//! As with most things built on top of `crossbeam`, scaling from one
//! worker to `num_cpus::get()` of them is a constructor argument, not a
//! rewrite.

pub mod cost;
pub mod error;
pub mod metaheuristic;
pub mod multistart;
pub mod problem;
pub mod rng;
pub mod schedule;
pub mod solution;
pub mod tracker;

#[cfg(test)]
pub mod test_support;

pub mod prelude;
