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

use rasp_alloc_core::prelude::TermDate;

/// The expanded occurrences of one placed rasp: first and last occurrence
/// plus the full ordered date list. Empty while the rasp is unplaced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecurrenceSpan {
    first: Option<TermDate>,
    last: Option<TermDate>,
    dates: Vec<TermDate>,
}

impl RecurrenceSpan {
    /// Installs the expanded occurrence list. `dates` must be non-empty
    /// and ordered; the span's bounds are taken from its ends.
    pub fn set(&mut self, dates: Vec<TermDate>) {
        self.first = dates.first().copied();
        self.last = dates.last().copied();
        self.dates = dates;
    }

    /// Empties the span, returning the occurrence list it held.
    pub fn clear(&mut self) -> Vec<TermDate> {
        self.first = None;
        self.last = None;
        std::mem::take(&mut self.dates)
    }

    pub fn reset(&mut self) {
        self.first = None;
        self.last = None;
        self.dates.clear();
    }

    #[inline]
    pub fn dates(&self) -> &[TermDate] {
        &self.dates
    }

    #[inline]
    pub fn first(&self) -> Option<TermDate> {
        self.first
    }

    #[inline]
    pub fn last(&self) -> Option<TermDate> {
        self.last
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        !self.dates.is_empty()
    }
}
