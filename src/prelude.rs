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

//! The prelude module is only present to ease your life while wiring up a
//! new multistart engine from scratch. That way you don't have to care
//! about manually importing every trait and struct by hand.
//!
//! # Example
//! ```
//! // At the beginning of any file driving restarto you will be willing to
//! // either import all types from the prelude or re-export them.
//!
//! use restarto::prelude::*;
//! ```

pub use crate::cost::SearchCost;
pub use crate::error::{Error, Kind, Result};
pub use crate::metaheuristic::{Metaheuristic, ReoptimizableMetaheuristic};
pub use crate::multistart::{ParallelMultistarter, SequentialMultistarter, TimedParallelMultistarter, WorkerPool};
pub use crate::problem::Problem;
pub use crate::rng::SplittableRng;
pub use crate::schedule::{parallel_val, Constant, Luby, RestartSchedule, VariableAnnealingLength, MAX_RUN_LENGTH};
pub use crate::solution::{merge_best, Copyable, SolutionCostPair};
pub use crate::tracker::ProgressTracker;

// And because that's convenient to import while writing tests too
#[cfg(test)]
pub use crate::test_support::*;
