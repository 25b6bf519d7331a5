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
    baseline::OccupancySet,
    err::ProblemError,
    professor::{Professor, ProfessorIdentifier},
    rasp::{GroupIdentifier, Rasp, RaspIdentifier, SubjectIdentifier},
    recurrence::RecurrenceTable,
    room::{Room, RoomIdentifier},
    semester::{Semester, SemesterIdentifier},
    term::TermPlan,
};

/// The immutable input of a solve: term structure, entities, recurrence
/// data, per-rasp student counts, group indices and the baseline occupancy
/// of external fixed bookings.
///
/// Constructed once (usually by the loader) and validated so that the hot
/// search paths can index without re-checking: every rasp has at least one
/// anchor day, every anchor day has an expansion, and every expansion stays
/// inside the term.
#[derive(Debug, Clone)]
pub struct Problem {
    term: TermPlan,
    rooms: Vec<Room>,
    professors: Vec<Professor>,
    semesters: Vec<Semester>,
    rasps: Vec<Rasp>,
    students: Vec<i32>,
    groups: Vec<Vec<RaspIdentifier>>,
    subject_groups: Vec<Vec<GroupIdentifier>>,
    baseline: OccupancySet,
    recurrence_table: RecurrenceTable,
}

impl Problem {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        term: TermPlan,
        rooms: Vec<Room>,
        professors: Vec<Professor>,
        semesters: Vec<Semester>,
        rasps: Vec<Rasp>,
        students: Vec<i32>,
        groups: Vec<Vec<RaspIdentifier>>,
        subject_groups: Vec<Vec<GroupIdentifier>>,
        baseline: OccupancySet,
        recurrence_table: RecurrenceTable,
    ) -> Result<Self, ProblemError> {
        if students.len() != rasps.len() {
            return Err(ProblemError::CountMismatch {
                family: "students_per_rasp",
                expected: rasps.len(),
                actual: students.len(),
            });
        }
        if baseline.room_count() != rooms.len() {
            return Err(ProblemError::CountMismatch {
                family: "room grids",
                expected: rooms.len(),
                actual: baseline.room_count(),
            });
        }
        if baseline.professor_count() != professors.len() {
            return Err(ProblemError::CountMismatch {
                family: "professor grids",
                expected: professors.len(),
                actual: baseline.professor_count(),
            });
        }
        if baseline.semester_count() != semesters.len() {
            return Err(ProblemError::CountMismatch {
                family: "semester grids",
                expected: semesters.len(),
                actual: baseline.semester_count(),
            });
        }
        let extents = (term.num_weeks(), term.num_days(), term.num_hours());
        if baseline.uniform_extents() != Some(extents)
            && !(rooms.is_empty() && professors.is_empty() && semesters.is_empty())
        {
            return Err(ProblemError::GridExtentMismatch { expected: extents });
        }

        for rasp in &rasps {
            let code = rasp.code().to_owned();
            if rasp.duration() == 0 {
                return Err(ProblemError::ZeroDuration { rasp: code });
            }
            if rasp.duration() > term.num_hours() {
                return Err(ProblemError::DurationExceedsDay {
                    rasp: code,
                    duration: rasp.duration(),
                    num_hours: term.num_hours(),
                });
            }
            if let Some(hour) = rasp.fixed_hour() {
                if !term.fits_hours(hour, rasp.duration()) {
                    return Err(ProblemError::FixedHourOutOfRange {
                        rasp: code,
                        hour,
                        duration: rasp.duration(),
                        num_hours: term.num_hours(),
                    });
                }
            }
            if rasp.anchor_days().is_empty() {
                return Err(ProblemError::NoAnchorDays { rasp: code });
            }
            if rasp.recurrence_class() >= recurrence_table.class_count() {
                return Err(ProblemError::RecurrenceClassOutOfRange {
                    rasp: code,
                    class: rasp.recurrence_class(),
                    classes: recurrence_table.class_count(),
                });
            }
            for &anchor in rasp.anchor_days() {
                let Some(days) = recurrence_table.expansion(rasp.recurrence_class(), anchor)
                else {
                    return Err(ProblemError::MissingExpansion { rasp: code, anchor });
                };
                for &day in days {
                    if day.week >= term.num_weeks() || day.day >= term.num_days() {
                        return Err(ProblemError::ExpansionOutsideTerm {
                            rasp: code,
                            anchor,
                            day,
                        });
                    }
                }
            }
        }

        Ok(Self {
            term,
            rooms,
            professors,
            semesters,
            rasps,
            students,
            groups,
            subject_groups,
            baseline,
            recurrence_table,
        })
    }

    #[inline]
    pub fn term(&self) -> &TermPlan {
        &self.term
    }

    #[inline]
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    #[inline]
    pub fn room(&self, id: RoomIdentifier) -> &Room {
        &self.rooms[id.index()]
    }

    #[inline]
    pub fn professors(&self) -> &[Professor] {
        &self.professors
    }

    #[inline]
    pub fn professor(&self, id: ProfessorIdentifier) -> &Professor {
        &self.professors[id.index()]
    }

    #[inline]
    pub fn semesters(&self) -> &[Semester] {
        &self.semesters
    }

    #[inline]
    pub fn semester(&self, id: SemesterIdentifier) -> &Semester {
        &self.semesters[id.index()]
    }

    #[inline]
    pub fn rasps(&self) -> &[Rasp] {
        &self.rasps
    }

    #[inline]
    pub fn rasp(&self, id: RaspIdentifier) -> &Rasp {
        &self.rasps[id.index()]
    }

    #[inline]
    pub fn rasp_count(&self) -> usize {
        self.rasps.len()
    }

    #[inline]
    pub fn students_for(&self, id: RaspIdentifier) -> i32 {
        self.students[id.index()]
    }

    /// Sibling rasps of one subject × type group.
    #[inline]
    pub fn group_members(&self, id: GroupIdentifier) -> &[RaspIdentifier] {
        &self.groups[id.index()]
    }

    /// Every group of one subject.
    #[inline]
    pub fn groups_of_subject(&self, id: SubjectIdentifier) -> &[GroupIdentifier] {
        &self.subject_groups[id.index()]
    }

    #[inline]
    pub fn baseline(&self) -> &OccupancySet {
        &self.baseline
    }

    #[inline]
    pub fn recurrence_table(&self) -> &RecurrenceTable {
        &self.recurrence_table
    }
}
