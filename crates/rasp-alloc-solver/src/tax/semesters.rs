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

//! Semester taxation distinguishes *occupancy* (how many activities a
//! semester's students attend at a date) from *collisions* (how many
//! distinct claims compete for the date). Sibling rasps of one group never
//! collide with each other, and elective groups may co-occupy a date for
//! free unless a different elective group already claims it.

use crate::tax::PUNISH;
use rasp_alloc_core::prelude::{Grid3, TermDate};
use rasp_alloc_model::prelude::Grade;
use std::collections::HashSet;

/// Cost of one cell state: free while at most one distinct claim exists,
/// otherwise the full occupancy weighs in.
#[inline]
fn cell_cost(occupancy: i32, collisions: i32) -> i32 {
    if collisions <= 1 {
        0
    } else {
        occupancy * PUNISH
    }
}

/// Punishment for one occurrence transitioning between two cell states.
/// Non-positive by construction; the tax/untax direction decides the sign
/// applied to the grade.
#[inline]
pub(crate) fn transition_punish(
    old_occupancy: i32,
    old_collisions: i32,
    new_occupancy: i32,
    new_collisions: i32,
) -> i32 {
    -(cell_cost(old_occupancy, old_collisions) - cell_cost(new_occupancy, new_collisions)).abs()
}

pub(crate) fn tax_mandatory(
    occupied: &mut Grid3,
    collisions: &mut Grid3,
    dates: &[TermDate],
    own_group_dates: &HashSet<TermDate>,
    grade: &mut Grade,
) {
    let mut punish = 0;
    for &date in dates {
        let old_occ = occupied.get(date) as i32;
        let old_colls = collisions.get(date) as i32;
        if !own_group_dates.contains(&date) {
            collisions.increment(date);
        }
        let new_colls = collisions.get(date) as i32;
        punish += transition_punish(old_occ, old_colls, old_occ + 1, new_colls);
        occupied.increment(date);
    }
    if punish != 0 {
        grade.semesters += punish;
        grade.total += punish;
    }
}

pub(crate) fn untax_mandatory(
    occupied: &mut Grid3,
    collisions: &mut Grid3,
    dates: &[TermDate],
    own_group_dates: &HashSet<TermDate>,
    grade: &mut Grade,
) {
    let mut punish = 0;
    for &date in dates {
        let old_occ = occupied.get(date) as i32;
        let old_colls = collisions.get(date) as i32;
        if !own_group_dates.contains(&date) {
            collisions.decrement(date);
        }
        let new_colls = collisions.get(date) as i32;
        punish += transition_punish(old_occ, old_colls, old_occ - 1, new_colls);
        occupied.decrement(date);
    }
    if punish != 0 {
        grade.semesters -= punish;
        grade.total -= punish;
    }
}

/// An elective claim collides only when the date is neither covered by the
/// rasp's own group nor elective-free, unless a *different* elective group
/// already claims it.
pub(crate) fn tax_optional(
    occupied: &mut Grid3,
    optionals: &mut Grid3,
    collisions: &mut Grid3,
    dates: &[TermDate],
    own_group_dates: &HashSet<TermDate>,
    other_group_dates: &HashSet<TermDate>,
    grade: &mut Grade,
) {
    let mut punish = 0;
    for &date in dates {
        let old_occ = occupied.get(date) as i32;
        let old_colls = collisions.get(date) as i32;
        if !own_group_dates.contains(&date)
            && (optionals.get(date) == 0 || other_group_dates.contains(&date))
        {
            collisions.increment(date);
        }
        let new_colls = collisions.get(date) as i32;
        punish += transition_punish(old_occ, old_colls, old_occ + 1, new_colls);
        occupied.increment(date);
        optionals.increment(date);
    }
    if punish != 0 {
        grade.semesters += punish;
        grade.total += punish;
    }
}

pub(crate) fn untax_optional(
    occupied: &mut Grid3,
    optionals: &mut Grid3,
    collisions: &mut Grid3,
    dates: &[TermDate],
    own_group_dates: &HashSet<TermDate>,
    other_group_dates: &HashSet<TermDate>,
    grade: &mut Grade,
) {
    let mut punish = 0;
    for &date in dates {
        let old_occ = occupied.get(date) as i32;
        let old_colls = collisions.get(date) as i32;
        if !own_group_dates.contains(&date)
            && (optionals.get(date) == 1 || other_group_dates.contains(&date))
        {
            collisions.decrement(date);
        }
        let new_colls = collisions.get(date) as i32;
        punish += transition_punish(old_occ, old_colls, old_occ - 1, new_colls);
        occupied.decrement(date);
        optionals.decrement(date);
    }
    if punish != 0 {
        grade.semesters -= punish;
        grade.total -= punish;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_punish_model() {
        // One distinct claim stays free.
        assert_eq!(transition_punish(0, 0, 1, 1), 0);
        // Second distinct claim punishes the full occupancy.
        assert_eq!(transition_punish(1, 1, 2, 2), 2 * PUNISH);
        // Removing it refunds the same magnitude (sign handled by caller).
        assert_eq!(transition_punish(2, 2, 1, 1), 2 * PUNISH);
    }

    #[test]
    fn test_mandatory_tax_untax_roundtrip() {
        let mut occupied = Grid3::new(1, 1, 2);
        let mut collisions = Grid3::new(1, 1, 2);
        let mut grade = Grade::zero();
        let own = HashSet::new();
        let dates = vec![TermDate::new(0, 0, 0), TermDate::new(0, 0, 1)];

        tax_mandatory(&mut occupied, &mut collisions, &dates, &own, &mut grade);
        tax_mandatory(&mut occupied, &mut collisions, &dates, &own, &mut grade);
        assert_eq!(grade.semesters, 2 * 2 * PUNISH);

        untax_mandatory(&mut occupied, &mut collisions, &dates, &own, &mut grade);
        untax_mandatory(&mut occupied, &mut collisions, &dates, &own, &mut grade);
        assert_eq!(grade, Grade::zero());
        assert!(occupied.is_zero());
        assert!(collisions.is_zero());
    }

    #[test]
    fn test_own_group_dates_are_exempt() {
        let mut occupied = Grid3::new(1, 1, 1);
        let mut collisions = Grid3::new(1, 1, 1);
        let mut grade = Grade::zero();
        let date = TermDate::new(0, 0, 0);
        let dates = vec![date];

        // A sibling of the same group already holds the date.
        tax_mandatory(
            &mut occupied,
            &mut collisions,
            &dates,
            &HashSet::new(),
            &mut grade,
        );
        let own: HashSet<_> = [date].into_iter().collect();
        tax_mandatory(&mut occupied, &mut collisions, &dates, &own, &mut grade);

        assert_eq!(collisions.get(date), 1);
        assert_eq!(grade.semesters, 0);
    }

    #[test]
    fn test_sibling_electives_share_a_date_for_free() {
        let mut occupied = Grid3::new(1, 1, 1);
        let mut optionals = Grid3::new(1, 1, 1);
        let mut collisions = Grid3::new(1, 1, 1);
        let mut grade = Grade::zero();
        let date = TermDate::new(0, 0, 0);
        let dates = vec![date];
        let none = HashSet::new();

        // First elective group claims the date.
        tax_optional(
            &mut occupied,
            &mut optionals,
            &mut collisions,
            &dates,
            &none,
            &none,
            &mut grade,
        );
        // A second rasp of the *same* group: the date is covered by its
        // own group, no new collision.
        let own: HashSet<_> = [date].into_iter().collect();
        tax_optional(
            &mut occupied,
            &mut optionals,
            &mut collisions,
            &dates,
            &own,
            &none,
            &mut grade,
        );
        assert_eq!(collisions.get(date), 1);
        assert_eq!(grade.semesters, 0);

        // A rasp of a *different* elective group collides.
        let other: HashSet<_> = [date].into_iter().collect();
        tax_optional(
            &mut occupied,
            &mut optionals,
            &mut collisions,
            &dates,
            &none,
            &other,
            &mut grade,
        );
        assert_eq!(collisions.get(date), 2);
        assert_eq!(grade.semesters, 3 * PUNISH);
    }
}
