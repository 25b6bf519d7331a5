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

use chrono::NaiveDate;
use rasp_alloc_core::prelude::TermDate;

/// The discretized shape of an academic term: how many teaching weeks it
/// has, how many days each week and hour-slots each day, plus the calendar
/// bounds the indices map onto.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermPlan {
    num_weeks: usize,
    num_days: usize,
    num_hours: usize,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl TermPlan {
    pub fn new(
        num_weeks: usize,
        num_days: usize,
        num_hours: usize,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            num_weeks,
            num_days,
            num_hours,
            start_date,
            end_date,
        }
    }

    #[inline]
    pub fn num_weeks(&self) -> usize {
        self.num_weeks
    }

    #[inline]
    pub fn num_days(&self) -> usize {
        self.num_days
    }

    #[inline]
    pub fn num_hours(&self) -> usize {
        self.num_hours
    }

    #[inline]
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    #[inline]
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    #[inline]
    pub fn contains(&self, date: TermDate) -> bool {
        date.week < self.num_weeks && date.day < self.num_days && date.hour < self.num_hours
    }

    /// Whether an activity of `duration` hour-slots may start at `hour`.
    #[inline]
    pub fn fits_hours(&self, hour: usize, duration: usize) -> bool {
        hour + duration <= self.num_hours
    }

    /// Latest legal start hour for an activity of `duration` hour-slots.
    /// The caller must ensure `duration <= num_hours`.
    #[inline]
    pub fn last_start_hour(&self, duration: usize) -> usize {
        self.num_hours - duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan() -> TermPlan {
        TermPlan::new(
            15,
            5,
            16,
            NaiveDate::from_ymd_opt(2025, 10, 6).unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 25).unwrap(),
        )
    }

    #[test]
    fn test_contains_is_exclusive_at_extents() {
        let t = plan();
        assert!(t.contains(TermDate::new(14, 4, 15)));
        assert!(!t.contains(TermDate::new(15, 0, 0)));
        assert!(!t.contains(TermDate::new(0, 5, 0)));
        assert!(!t.contains(TermDate::new(0, 0, 16)));
    }

    #[test]
    fn test_fits_hours_allows_last_start() {
        let t = plan();
        assert!(t.fits_hours(14, 2));
        assert!(!t.fits_hours(15, 2));
        assert_eq!(t.last_start_hour(2), 14);
    }
}
