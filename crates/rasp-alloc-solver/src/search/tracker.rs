// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

/// Time-ordered (elapsed_seconds, best_total) samples of one driver run.
/// Owned by the run and returned to the caller; concurrent runs each get
/// their own tracker.
#[derive(Debug, Clone, Default)]
pub struct ScoreTracker {
    samples: Vec<(f64, i32)>,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn record(&mut self, elapsed_secs: f64, best_total: i32) {
        self.samples.push((elapsed_secs, best_total));
    }

    #[inline]
    pub fn samples(&self) -> &[(f64, i32)] {
        &self.samples
    }

    #[inline]
    pub fn last_best(&self) -> Option<i32> {
        self.samples.last().map(|&(_, best)| best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_keep_insertion_order() {
        let mut tracker = ScoreTracker::new();
        assert!(tracker.is_empty());
        tracker.record(0.0, -300);
        tracker.record(1.5, -120);
        tracker.record(2.25, 0);
        assert_eq!(tracker.samples(), &[(0.0, -300), (1.5, -120), (2.25, 0)]);
        assert_eq!(tracker.last_best(), Some(0));
    }
}
