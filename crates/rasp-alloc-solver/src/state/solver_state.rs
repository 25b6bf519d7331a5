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

//! The mutable search state and its taxation engine. `place` and
//! `unplace` are the only operations that touch the grade or the grids,
//! so the invariant "grids ≡ baseline + every placed occurrence set, and
//! the grade matches" holds by construction.

use crate::{err::ExpansionError, slots::expand, state::recurrence::RecurrenceSpan, tax};
use rasp_alloc_core::prelude::TermDate;
use rasp_alloc_model::prelude::{
    Grade, OccupancySet, Problem, RaspIdentifier, Slot, Timetable,
};
use std::collections::HashSet;

/// The occurrence dates claimed by a rasp's sibling variants (`own`) and
/// by the other groups of its subject (`other`). Both depend only on the
/// placements of *other* rasps, so a candidate scan may compute them once
/// per rasp.
#[derive(Debug, Clone, Default)]
pub struct GroupDates {
    pub own: HashSet<TermDate>,
    pub other: HashSet<TermDate>,
}

/// Result of removing a rasp: the slot it occupied and the marginal grade
/// that slot alone contributed, obtained by differencing the grade before
/// and after the reversal.
#[derive(Debug, Clone, Copy)]
pub struct RemovedSlot {
    pub slot: Slot,
    pub marginal: Grade,
}

/// Live solver state over a borrowed problem. Cloning yields a deep
/// snapshot: the grids are owned buffers, so a retained best state never
/// aliases the state the search keeps mutating.
#[derive(Debug, Clone)]
pub struct SolverState<'p> {
    problem: &'p Problem,
    grids: OccupancySet,
    timetable: Timetable,
    grade: Grade,
    spans: Vec<RecurrenceSpan>,
}

impl<'p> SolverState<'p> {
    pub fn new(problem: &'p Problem) -> Self {
        Self {
            problem,
            grids: problem.baseline().clone(),
            timetable: Timetable::new(),
            grade: Grade::zero(),
            spans: vec![RecurrenceSpan::default(); problem.rasp_count()],
        }
    }

    /// Builds a state by replaying prior assignments through the taxation
    /// engine, so grade and grids are consistent with the timetable no
    /// matter what the source file claimed.
    pub fn with_assignments(
        problem: &'p Problem,
        assignments: &[(RaspIdentifier, Slot)],
    ) -> Result<Self, ExpansionError> {
        let mut state = Self::new(problem);
        for &(rasp, slot) in assignments {
            state.place(rasp, slot)?;
        }
        Ok(state)
    }

    #[inline]
    pub fn problem(&self) -> &'p Problem {
        self.problem
    }

    #[inline]
    pub fn grade(&self) -> Grade {
        self.grade
    }

    #[inline]
    pub fn grids(&self) -> &OccupancySet {
        &self.grids
    }

    #[inline]
    pub fn timetable(&self) -> &Timetable {
        &self.timetable
    }

    #[inline]
    pub fn slot_of(&self, rasp: RaspIdentifier) -> Option<Slot> {
        self.timetable.get(&rasp).copied()
    }

    #[inline]
    pub fn is_placed(&self, rasp: RaspIdentifier) -> bool {
        self.timetable.contains_key(&rasp)
    }

    #[inline]
    pub fn span(&self, rasp: RaspIdentifier) -> &RecurrenceSpan {
        &self.spans[rasp.index()]
    }

    /// Ids of every currently placed rasp, in arbitrary order.
    pub fn placed_rasps(&self) -> Vec<RaspIdentifier> {
        self.timetable.keys().copied().collect()
    }

    /// Occurrence dates of the rasp's sibling variants (same group,
    /// excluding itself).
    pub fn own_group_dates(&self, rasp: RaspIdentifier) -> HashSet<TermDate> {
        let r = self.problem.rasp(rasp);
        let mut dates = HashSet::new();
        for &member in self.problem.group_members(r.group()) {
            if member != rasp {
                dates.extend(self.spans[member.index()].dates().iter().copied());
            }
        }
        dates
    }

    /// Occurrence dates of every other group of the rasp's subject.
    pub fn other_group_dates(&self, rasp: RaspIdentifier) -> HashSet<TermDate> {
        let r = self.problem.rasp(rasp);
        let mut dates = HashSet::new();
        for &group in self.problem.groups_of_subject(r.subject()) {
            if group == r.group() {
                continue;
            }
            for &member in self.problem.group_members(group) {
                dates.extend(self.spans[member.index()].dates().iter().copied());
            }
        }
        dates
    }

    pub fn group_dates(&self, rasp: RaspIdentifier) -> GroupDates {
        GroupDates {
            own: self.own_group_dates(rasp),
            other: self.other_group_dates(rasp),
        }
    }

    /// Expands the slot, taxes every constraint family and records the
    /// placement. The rasp must not already be placed.
    pub fn place(&mut self, rasp: RaspIdentifier, slot: Slot) -> Result<(), ExpansionError> {
        debug_assert!(!self.is_placed(rasp), "placing an already placed rasp");
        let problem = self.problem;
        let r = problem.rasp(rasp);
        let dates = expand::occurrences(problem, r, &slot)?;
        let groups = self.group_dates(rasp);

        let grids = &mut self.grids;
        let grade = &mut self.grade;
        tax::rooms::tax(grids.room_mut(slot.room), &dates, grade);
        tax::professors::tax(grids.professor_mut(r.professor()), &dates, grade);
        for &sem in r.mandatory_semesters() {
            let (occupied, collisions) = grids.mandatory_mut(sem);
            tax::semesters::tax_mandatory(occupied, collisions, &dates, &groups.own, grade);
        }
        for &sem in r.optional_semesters() {
            let (occupied, optionals, collisions) = grids.elective_mut(sem);
            tax::semesters::tax_optional(
                occupied,
                optionals,
                collisions,
                &dates,
                &groups.own,
                &groups.other,
                grade,
            );
        }
        tax::capacity::tax(problem, rasp, slot.room, grade);
        tax::computers::tax(problem.room(slot.room), r.needs_computers(), grade);

        self.spans[rasp.index()].set(dates);
        self.timetable.insert(rasp, slot);
        Ok(())
    }

    /// Reverses every increment of `place` in the same structural shape
    /// and returns the marginal grade the slot contributed. `None` when
    /// the rasp is not placed.
    pub fn unplace(&mut self, rasp: RaspIdentifier) -> Option<RemovedSlot> {
        let slot = self.timetable.remove(&rasp)?;
        let problem = self.problem;
        let r = problem.rasp(rasp);
        let before = self.grade;
        let groups = self.group_dates(rasp);
        let dates = self.spans[rasp.index()].clear();

        let grids = &mut self.grids;
        let grade = &mut self.grade;
        tax::rooms::untax(grids.room_mut(slot.room), &dates, grade);
        tax::professors::untax(grids.professor_mut(r.professor()), &dates, grade);
        for &sem in r.mandatory_semesters() {
            let (occupied, collisions) = grids.mandatory_mut(sem);
            tax::semesters::untax_mandatory(occupied, collisions, &dates, &groups.own, grade);
        }
        for &sem in r.optional_semesters() {
            let (occupied, optionals, collisions) = grids.elective_mut(sem);
            tax::semesters::untax_optional(
                occupied,
                optionals,
                collisions,
                &dates,
                &groups.own,
                &groups.other,
                grade,
            );
        }
        tax::capacity::untax(problem, rasp, slot.room, grade);
        tax::computers::untax(problem.room(slot.room), r.needs_computers(), grade);

        let marginal = before - self.grade;
        Some(RemovedSlot { slot, marginal })
    }

    /// Clears the timetable and restores every counter to the baseline.
    pub fn reset(&mut self) {
        self.timetable.clear();
        self.grade = Grade::zero();
        for span in &mut self.spans {
            span.reset();
        }
        self.grids.reset_to(self.problem.baseline());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{self, rid, room};

    #[test]
    fn test_tax_untax_inverse_law() {
        let problem = fixtures::problem();
        let mut state = SolverState::new(&problem);
        // Two placements sharing a professor and a semester date.
        state.place(rid(0), Slot::new(room(0), 0, 0, 0)).unwrap();
        state.place(rid(2), Slot::new(room(1), 0, 0, 0)).unwrap();

        let grade_before = state.grade();
        let grids_before = state.grids().clone();
        let timetable_before = state.timetable().clone();

        let removed = state.unplace(rid(2)).unwrap();
        assert_ne!(state.grade(), grade_before);
        state.place(rid(2), removed.slot).unwrap();

        assert_eq!(state.grade(), grade_before);
        assert_eq!(state.grids(), &grids_before);
        assert_eq!(state.timetable(), &timetable_before);
    }

    #[test]
    fn test_grade_total_invariant_along_a_run() {
        let problem = fixtures::problem();
        let mut state = SolverState::new(&problem);
        for (i, slot) in [
            Slot::new(room(0), 0, 0, 0),
            Slot::new(room(1), 0, 0, 0),
            Slot::new(room(2), 0, 0, 1),
            Slot::new(room(0), 0, 1, 0),
        ]
        .into_iter()
        .enumerate()
        {
            state.place(rid(i as u32), slot).unwrap();
            assert!(state.grade().is_consistent());
        }
        state.unplace(rid(1)).unwrap();
        assert!(state.grade().is_consistent());
    }

    #[test]
    fn test_marginal_isolation_for_a_lone_rasp() {
        let problem = fixtures::problem();
        let mut state = SolverState::new(&problem);
        // Rasp 3 needs computers and overflows small rooms; alone it
        // shares no resource with anyone.
        state.place(rid(3), Slot::new(room(2), 0, 2, 0)).unwrap();
        let placed_grade = state.grade();

        let removed = state.unplace(rid(3)).unwrap();
        assert_eq!(removed.marginal, placed_grade);
        assert_eq!(state.grade(), Grade::zero());
        assert!(!state.span(rid(3)).is_active());
    }

    #[test]
    fn test_capacity_scenario() {
        let problem = fixtures::problem();
        let mut state = SolverState::new(&problem);
        // 35 students into the 10-seat room; nothing else is violated.
        state.place(rid(2), Slot::new(room(2), 0, 0, 0)).unwrap();
        let g = state.grade();
        assert_eq!(g.capacity, -30);
        assert_eq!(g.rooms, 0);
        assert_eq!(g.professors, 0);
        assert_eq!(g.computers, 0);
        assert_eq!(g.semesters, 0);
        assert_eq!(g.total, -30);
    }

    #[test]
    fn test_computer_scenario() {
        let problem = fixtures::problem();
        let mut state = SolverState::new(&problem);
        // Rasp 3 needs computers; room 1 is large but unequipped.
        state.place(rid(3), Slot::new(room(1), 0, 3, 0)).unwrap();
        let g = state.grade();
        assert_eq!(g.computers, -30);
        assert_eq!(g.capacity, 0);
        assert_eq!(g.total, -30);
    }

    #[test]
    fn test_professor_collision_scenario() {
        let problem = fixtures::problem();
        let mut state = SolverState::new(&problem);
        // Rasps 0 and 2 share professor 0; same hours, different rooms.
        state.place(rid(0), Slot::new(room(0), 0, 0, 0)).unwrap();
        state.place(rid(2), Slot::new(room(1), 0, 0, 0)).unwrap();
        let g = state.grade();
        assert!(g.professors <= -60, "professors = {}", g.professors);
        assert_eq!(g.rooms, 0);
        assert!(g.is_consistent());
    }

    #[test]
    fn test_optional_group_exemption() {
        let problem = fixtures::problem();
        let mut state = SolverState::new(&problem);
        // Rasps 0 and 1 are sibling variants of one elective group; the
        // shared dates are free and counted once in the collision grid.
        state.place(rid(0), Slot::new(room(0), 0, 0, 0)).unwrap();
        state.place(rid(1), Slot::new(room(1), 0, 0, 0)).unwrap();
        let g = state.grade();
        assert_eq!(g.semesters, 0);
        let sem = problem.rasps()[0].optional_semesters()[0];
        for &date in state.span(rid(0)).dates() {
            assert_eq!(state.grids().collisions(sem).get(date), 1);
        }
    }

    #[test]
    fn test_reset_restores_baseline() {
        let problem = fixtures::problem();
        let mut state = SolverState::new(&problem);
        state.place(rid(0), Slot::new(room(0), 0, 0, 0)).unwrap();
        state.place(rid(3), Slot::new(room(2), 0, 1, 2)).unwrap();
        state.reset();
        assert_eq!(state.grade(), Grade::zero());
        assert!(state.timetable().is_empty());
        assert_eq!(state.grids(), problem.baseline());
    }

    #[test]
    fn test_snapshot_does_not_alias_live_state() {
        let problem = fixtures::problem();
        let mut state = SolverState::new(&problem);
        state.place(rid(0), Slot::new(room(0), 0, 0, 0)).unwrap();
        let snapshot = state.clone();
        state.place(rid(2), Slot::new(room(1), 0, 0, 0)).unwrap();

        assert_eq!(snapshot.timetable().len(), 1);
        assert_ne!(snapshot.grade(), state.grade());
        assert_ne!(snapshot.grids(), state.grids());
    }
}
