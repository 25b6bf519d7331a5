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

/// Books every occurrence into the room grid. Each cell that ends up with
/// more than one booking contributes its full multiplicity to the
/// punishment, so the cost reflects the current total crowding, not just
/// the newcomer.
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
        grade.rooms += punish;
        grade.total += punish;
    }
}

/// Exact reverse of [`tax`]: reads the multiplicity before decrementing.
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
        grade.rooms -= punish;
        grade.total -= punish;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates() -> Vec<TermDate> {
        vec![TermDate::new(0, 0, 0), TermDate::new(1, 0, 0)]
    }

    #[test]
    fn test_tax_untax_is_identity() {
        let mut grid = Grid3::new(2, 1, 2);
        let mut grade = Grade::zero();
        // Pre-existing booking on one of the dates.
        grid.increment(TermDate::new(0, 0, 0));

        tax(&mut grid, &dates(), &mut grade);
        assert_eq!(grade.rooms, 2 * PUNISH);
        assert_eq!(grade.total, grade.rooms);

        untax(&mut grid, &dates(), &mut grade);
        assert_eq!(grade, Grade::zero());
        assert_eq!(grid.get(TermDate::new(0, 0, 0)), 1);
        assert_eq!(grid.get(TermDate::new(1, 0, 0)), 0);
    }

    #[test]
    fn test_no_punishment_without_crowding() {
        let mut grid = Grid3::new(2, 1, 2);
        let mut grade = Grade::zero();
        tax(&mut grid, &dates(), &mut grade);
        assert_eq!(grade, Grade::zero());
    }
}
