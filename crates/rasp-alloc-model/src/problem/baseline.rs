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

use crate::problem::{
    professor::ProfessorIdentifier, room::RoomIdentifier, semester::SemesterIdentifier,
};
use rasp_alloc_core::prelude::Grid3;

/// One full set of occupancy counters: a grid per room, per professor and,
/// per semester, the total-bookings grid plus the elective-bookings grid
/// (`optionals`) and the distinct-collision grid (`collisions`).
///
/// Used both for the exogenous baseline (external fixed bookings) and for
/// the live counters the taxation engine mutates. Cloning is a deep copy
/// of every grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancySet {
    rooms: Vec<Grid3>,
    professors: Vec<Grid3>,
    semesters: Vec<Grid3>,
    optionals: Vec<Grid3>,
    collisions: Vec<Grid3>,
}

impl OccupancySet {
    pub fn zeroed(
        room_count: usize,
        professor_count: usize,
        semester_count: usize,
        weeks: usize,
        days: usize,
        hours: usize,
    ) -> Self {
        let grid = || Grid3::new(weeks, days, hours);
        Self {
            rooms: (0..room_count).map(|_| grid()).collect(),
            professors: (0..professor_count).map(|_| grid()).collect(),
            semesters: (0..semester_count).map(|_| grid()).collect(),
            optionals: (0..semester_count).map(|_| grid()).collect(),
            collisions: (0..semester_count).map(|_| grid()).collect(),
        }
    }

    pub fn from_parts(
        rooms: Vec<Grid3>,
        professors: Vec<Grid3>,
        semesters: Vec<Grid3>,
        optionals: Vec<Grid3>,
        collisions: Vec<Grid3>,
    ) -> Self {
        assert_eq!(semesters.len(), optionals.len());
        assert_eq!(semesters.len(), collisions.len());
        Self {
            rooms,
            professors,
            semesters,
            optionals,
            collisions,
        }
    }

    #[inline]
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    #[inline]
    pub fn professor_count(&self) -> usize {
        self.professors.len()
    }

    #[inline]
    pub fn semester_count(&self) -> usize {
        self.semesters.len()
    }

    #[inline]
    pub fn room(&self, id: RoomIdentifier) -> &Grid3 {
        &self.rooms[id.index()]
    }

    #[inline]
    pub fn room_mut(&mut self, id: RoomIdentifier) -> &mut Grid3 {
        &mut self.rooms[id.index()]
    }

    #[inline]
    pub fn professor(&self, id: ProfessorIdentifier) -> &Grid3 {
        &self.professors[id.index()]
    }

    #[inline]
    pub fn professor_mut(&mut self, id: ProfessorIdentifier) -> &mut Grid3 {
        &mut self.professors[id.index()]
    }

    #[inline]
    pub fn semester(&self, id: SemesterIdentifier) -> &Grid3 {
        &self.semesters[id.index()]
    }

    #[inline]
    pub fn optionals(&self, id: SemesterIdentifier) -> &Grid3 {
        &self.optionals[id.index()]
    }

    #[inline]
    pub fn collisions(&self, id: SemesterIdentifier) -> &Grid3 {
        &self.collisions[id.index()]
    }

    /// The (total-bookings, collisions) pair of one semester, mutably.
    #[inline]
    pub fn mandatory_mut(&mut self, id: SemesterIdentifier) -> (&mut Grid3, &mut Grid3) {
        let i = id.index();
        (&mut self.semesters[i], &mut self.collisions[i])
    }

    /// The (total-bookings, elective-bookings, collisions) triple of one
    /// semester, mutably.
    #[inline]
    pub fn elective_mut(
        &mut self,
        id: SemesterIdentifier,
    ) -> (&mut Grid3, &mut Grid3, &mut Grid3) {
        let i = id.index();
        (
            &mut self.semesters[i],
            &mut self.optionals[i],
            &mut self.collisions[i],
        )
    }

    /// The shared (weeks, days, hours) extents of every grid, or `None`
    /// when the set is empty or the grids disagree.
    pub fn uniform_extents(&self) -> Option<(usize, usize, usize)> {
        let mut all = self
            .rooms
            .iter()
            .chain(&self.professors)
            .chain(&self.semesters)
            .chain(&self.optionals)
            .chain(&self.collisions);
        let first = all.next()?.extents();
        all.all(|g| g.extents() == first).then_some(first)
    }

    /// Overwrites every counter with the values of `other`.
    pub fn reset_to(&mut self, other: &OccupancySet) {
        let copy_all = |dst: &mut Vec<Grid3>, src: &Vec<Grid3>| {
            assert_eq!(dst.len(), src.len());
            for (d, s) in dst.iter_mut().zip(src) {
                d.copy_from(s);
            }
        };
        copy_all(&mut self.rooms, &other.rooms);
        copy_all(&mut self.professors, &other.professors);
        copy_all(&mut self.semesters, &other.semesters);
        copy_all(&mut self.optionals, &other.optionals);
        copy_all(&mut self.collisions, &other.collisions);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rasp_alloc_core::prelude::TermDate;

    #[test]
    fn test_reset_to_restores_baseline() {
        let baseline = {
            let mut s = OccupancySet::zeroed(1, 1, 1, 1, 2, 3);
            s.room_mut(RoomIdentifier::new(0))
                .set(TermDate::new(0, 1, 2), 3);
            s
        };
        let mut live = baseline.clone();
        live.room_mut(RoomIdentifier::new(0))
            .increment(TermDate::new(0, 0, 0));
        let (occ, coll) = live.mandatory_mut(SemesterIdentifier::new(0));
        occ.increment(TermDate::new(0, 0, 1));
        coll.increment(TermDate::new(0, 0, 1));
        live.reset_to(&baseline);
        assert_eq!(live, baseline);
    }
}
