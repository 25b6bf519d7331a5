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

use crate::date::TermDate;

/// Dense (week, day, hour) occupancy counter for a single resource.
///
/// Backed by one owned buffer so that cloning a grid is a structural copy
/// and two clones never alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid3 {
    weeks: usize,
    days: usize,
    hours: usize,
    cells: Vec<u32>,
}

impl Grid3 {
    pub fn new(weeks: usize, days: usize, hours: usize) -> Self {
        Self {
            weeks,
            days,
            hours,
            cells: vec![0; weeks * days * hours],
        }
    }

    #[inline]
    pub fn extents(&self) -> (usize, usize, usize) {
        (self.weeks, self.days, self.hours)
    }

    #[inline]
    fn index(&self, date: TermDate) -> usize {
        debug_assert!(date.week < self.weeks && date.day < self.days && date.hour < self.hours);
        (date.week * self.days + date.day) * self.hours + date.hour
    }

    #[inline]
    pub fn in_bounds(&self, date: TermDate) -> bool {
        date.week < self.weeks && date.day < self.days && date.hour < self.hours
    }

    #[inline]
    pub fn get(&self, date: TermDate) -> u32 {
        self.cells[self.index(date)]
    }

    #[inline]
    pub fn set(&mut self, date: TermDate, value: u32) {
        let i = self.index(date);
        self.cells[i] = value;
    }

    #[inline]
    pub fn increment(&mut self, date: TermDate) {
        let i = self.index(date);
        self.cells[i] += 1;
    }

    #[inline]
    pub fn decrement(&mut self, date: TermDate) {
        let i = self.index(date);
        debug_assert!(self.cells[i] > 0, "decrement of empty cell at {date}");
        self.cells[i] -= 1;
    }

    /// Overwrites every cell with the values of `other`. Both grids must
    /// have identical extents.
    pub fn copy_from(&mut self, other: &Grid3) {
        assert_eq!(self.extents(), other.extents());
        self.cells.copy_from_slice(&other.cells);
    }

    pub fn is_zero(&self) -> bool {
        self.cells.iter().all(|&c| c == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[inline]
    fn td(w: usize, d: usize, h: usize) -> TermDate {
        TermDate::new(w, d, h)
    }

    #[test]
    fn test_new_grid_is_zeroed() {
        let g = Grid3::new(2, 5, 12);
        assert_eq!(g.extents(), (2, 5, 12));
        assert!(g.is_zero());
        assert_eq!(g.get(td(1, 4, 11)), 0);
    }

    #[test]
    fn test_increment_decrement_roundtrip() {
        let mut g = Grid3::new(2, 5, 12);
        g.increment(td(0, 2, 3));
        g.increment(td(0, 2, 3));
        assert_eq!(g.get(td(0, 2, 3)), 2);
        // Neighboring cells stay untouched.
        assert_eq!(g.get(td(0, 2, 2)), 0);
        assert_eq!(g.get(td(0, 2, 4)), 0);
        g.decrement(td(0, 2, 3));
        g.decrement(td(0, 2, 3));
        assert!(g.is_zero());
    }

    #[test]
    fn test_clone_does_not_alias() {
        let mut a = Grid3::new(1, 1, 4);
        a.increment(td(0, 0, 1));
        let b = a.clone();
        a.increment(td(0, 0, 1));
        assert_eq!(a.get(td(0, 0, 1)), 2);
        assert_eq!(b.get(td(0, 0, 1)), 1);
    }

    #[test]
    fn test_copy_from_restores_exactly() {
        let mut a = Grid3::new(1, 2, 3);
        a.set(td(0, 1, 2), 7);
        let mut b = Grid3::new(1, 2, 3);
        b.increment(td(0, 0, 0));
        b.copy_from(&a);
        assert_eq!(b, a);
    }
}
