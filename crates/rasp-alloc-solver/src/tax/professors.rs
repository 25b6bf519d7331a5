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

use crate::tax::PUNISH;
use rasp_alloc_core::prelude::{Grid3, TermDate};
use rasp_alloc_model::prelude::Grade;

/// Same multiplicity cost model as room taxation, applied to the
/// professor's personal grid.
pub(crate) fn tax(grid: &mut Grid3, dates: &[TermDate], grade: &mut Grade) {
    let mut cnt: i32 = 0;
    for &date in dates {
        grid.increment(date);
        let collisions = grid.get(date) as i32;
        if collisions > 1 {
            cnt += collisions;
        }
    }
    if cnt != 0 {
        let punish = cnt * PUNISH;
        grade.professors += punish;
        grade.total += punish;
    }
}

pub(crate) fn untax(grid: &mut Grid3, dates: &[TermDate], grade: &mut Grade) {
    let mut cnt: i32 = 0;
    for &date in dates {
        let collisions = grid.get(date) as i32;
        if collisions > 1 {
            cnt += collisions;
        }
        grid.decrement(date);
    }
    if cnt != 0 {
        let punish = cnt * PUNISH;
        grade.professors -= punish;
        grade.total -= punish;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_booking_costs_full_multiplicity() {
        let mut grid = Grid3::new(1, 1, 4);
        let mut grade = Grade::zero();
        let first = vec![TermDate::new(0, 0, 1), TermDate::new(0, 0, 2)];
        let second = first.clone();

        tax(&mut grid, &first, &mut grade);
        assert_eq!(grade, Grade::zero());

        // Both cells reach multiplicity 2, so the punishment is 2 + 2
        // times the base weight.
        tax(&mut grid, &second, &mut grade);
        assert_eq!(grade.professors, 4 * PUNISH);
        assert_eq!(grade.total, 4 * PUNISH);

        untax(&mut grid, &second, &mut grade);
        untax(&mut grid, &first, &mut grade);
        assert_eq!(grade, Grade::zero());
        assert!(grid.is_zero());
    }
}
