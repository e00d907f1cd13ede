// ─────────────────────────────────────────────────────────────────────
// Sandy's Law Engine — Evenly Spaced Sampling
// ─────────────────────────────────────────────────────────────────────
//! Evenly spaced samples over a closed interval.
//!
//! Sample `i` is `start + i·step` with `step = (stop - start) / (n - 1)`;
//! the last sample is pinned to `stop` so the endpoint is exact. A single
//! sample yields `start`.

/// Iterator over `n` evenly spaced values in `[start, stop]`.
#[derive(Debug, Clone)]
pub struct Linspace {
    start: f64,
    stop: f64,
    step: f64,
    num: usize,
    next: usize,
}

impl Linspace {
    pub fn new(start: f64, stop: f64, num: usize) -> Self {
        let step = if num > 1 {
            (stop - start) / (num - 1) as f64
        } else {
            0.0
        };
        Self {
            start,
            stop,
            step,
            num,
            next: 0,
        }
    }

    /// Value of sample `i` without iterating.
    pub fn at(&self, i: usize) -> f64 {
        if self.num > 1 && i == self.num - 1 {
            self.stop
        } else {
            i as f64 * self.step + self.start
        }
    }
}

impl Iterator for Linspace {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.next >= self.num {
            return None;
        }
        let value = self.at(self.next);
        self.next += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.num - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Linspace {}
