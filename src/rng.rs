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

//! Each worker-bound inner search owns its own PRNG (spec §4.8/§9). This
//! module provides the `split()` discipline the engine relies on: a fixed
//! parent seed must deterministically determine every descendant's stream,
//! while sibling streams must be statistically independent of one another.
//!
//! We back this with `rand_xoshiro`'s `Xoshiro256PlusPlus`, whose `jump()`
//! and `long_jump()` advance a generator's state by a large fixed power of
//! two steps — the standard technique for carving non-overlapping
//! sub-streams out of one xoshiro instance (the same generator family used
//! elsewhere in this pack, e.g. `SH11235-rshogi`).

use rand::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// A PRNG that can be deterministically split into an independent sibling
/// stream. Adapters own one of these; the engine never reads or writes it
/// directly, but every `split()` on an adapter is expected to call this
/// `split()` too (spec §9, "Random streams").
#[derive(Clone)]
pub struct SplittableRng {
    inner: Xoshiro256PlusPlus,
}

impl SplittableRng {
    /// Seeds a fresh stream from a 64-bit seed.
    pub fn from_seed(seed: u64) -> Self {
        SplittableRng { inner: Xoshiro256PlusPlus::seed_from_u64(seed) }
    }

    /// Resets this stream to exactly the state `from_seed(seed)` would have
    /// produced, discarding whatever state (including prior splits) it had
    /// accumulated. Intended for deterministic single-threaded replay of a
    /// previously-parallel run.
    pub fn reseed(&mut self, seed: u64) {
        self.inner = Xoshiro256PlusPlus::seed_from_u64(seed);
    }

    /// Derives an independent sibling stream. The sibling starts where
    /// `self` currently is; `self` is then jumped ahead by a large fixed
    /// offset so that the two streams never produce overlapping
    /// sub-sequences for any practically reachable run length.
    pub fn split(&mut self) -> Self {
        let child = self.inner.clone();
        self.inner.long_jump();
        SplittableRng { inner: child }
    }
}

impl RngCore for SplittableRng {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }
    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.inner.fill_bytes(dest)
    }
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.inner.try_fill_bytes(dest)
    }
}
