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

//! This module defines the basic data types produced by one restart of an
//! inner search and consumed by the rest of this library: `SolutionCostPair`
//! and the `Copyable` capability it requires of a solution type.

use crate::cost::SearchCost;
use std::cmp::Ordering;

/// The capability a solution type must expose so that the progress tracker
/// can store a deep copy that is independent of the search's own mutable
/// state. For ordinary Rust value types `Clone` already gives exactly that
/// guarantee, so `Copyable` is a blanket marker over `Clone` rather than a
/// separate trait clients must implement by hand.
pub trait Copyable: Clone + Send + Sync {}
impl<T: Clone + Send + Sync> Copyable for T {}

/// An immutable `(solution, cost, containsOptimum)` triple produced by one
/// restart of an inner search. Pairs are totally ordered by `cost` alone
/// (lower is better); ties between distinct solutions of equal cost break
/// arbitrarily, consistently with `Ord`'s requirements.
#[derive(Debug, Clone)]
pub struct SolutionCostPair<S, C>
where
    S: Copyable,
    C: SearchCost,
{
    solution: S,
    cost: C,
    contains_optimum: bool,
}

impl<S, C> SolutionCostPair<S, C>
where
    S: Copyable,
    C: SearchCost,
{
    /// Builds a new pair. `contains_optimum` should be `true` only when the
    /// inner search can prove `cost` is the problem's optimum; the tracker
    /// never infers this from the numeric value of `cost` itself.
    pub fn new(solution: S, cost: C, contains_optimum: bool) -> Self {
        SolutionCostPair { solution, cost, contains_optimum }
    }

    /// Borrows the solution.
    pub fn solution(&self) -> &S {
        &self.solution
    }

    /// Consumes the pair, returning the owned solution.
    pub fn into_solution(self) -> S {
        self.solution
    }

    /// The cost of `solution`, lower is better.
    pub fn cost(&self) -> C {
        self.cost
    }

    /// Whether the inner search flagged `cost` as a provable optimum.
    pub fn contains_optimum(&self) -> bool {
        self.contains_optimum
    }
}

impl<S, C> PartialEq for SolutionCostPair<S, C>
where
    S: Copyable,
    C: SearchCost,
{
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost
    }
}
impl<S, C> Eq for SolutionCostPair<S, C>
where
    S: Copyable,
    C: SearchCost,
{
}

impl<S, C> PartialOrd for SolutionCostPair<S, C>
where
    S: Copyable,
    C: SearchCost,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<S, C> Ord for SolutionCostPair<S, C>
where
    S: Copyable,
    C: SearchCost,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost.cmp(&other.cost)
    }
}

/// Merges two optional candidates, keeping whichever has the lower cost;
/// `None` never wins over a `Some`. Used by every multistarter variant to
/// fold a stream of per-restart results into a running best.
pub fn merge_best<S, C>(
    a: Option<SolutionCostPair<S, C>>,
    b: Option<SolutionCostPair<S, C>>,
) -> Option<SolutionCostPair<S, C>>
where
    S: Copyable,
    C: SearchCost,
{
    match (a, b) {
        (None, None) => None,
        (Some(x), None) => Some(x),
        (None, Some(y)) => Some(y),
        (Some(x), Some(y)) => Some(if y.cost() < x.cost() { y } else { x }),
    }
}
