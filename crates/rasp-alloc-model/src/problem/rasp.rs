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

use crate::{
    common::{Identifier, IdentifierMarkerName},
    problem::{professor::ProfessorIdentifier, room::RoomIdentifier, semester::SemesterIdentifier},
};
use rasp_alloc_core::prelude::AnchorDay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RaspIdentifierMarker;

impl IdentifierMarkerName for RaspIdentifierMarker {
    const NAME: &'static str = "RaspId";
}

pub type RaspIdentifier = Identifier<u32, RaspIdentifierMarker>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubjectIdentifierMarker;

impl IdentifierMarkerName for SubjectIdentifierMarker {
    const NAME: &'static str = "SubjectId";
}

pub type SubjectIdentifier = Identifier<u32, SubjectIdentifierMarker>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupIdentifierMarker;

impl IdentifierMarkerName for GroupIdentifierMarker {
    const NAME: &'static str = "GroupId";
}

/// One subject × activity-type group. Sibling rasps of the same group are
/// interchangeable variants of the same teaching unit and never collide
/// with each other for semester scoring.
pub type GroupIdentifier = Identifier<u32, GroupIdentifierMarker>;

/// One schedulable teaching unit: a lecture, lab or exercise occupying
/// `duration` consecutive hour-slots on every day of its recurrence.
///
/// Immutable after load; the solver tracks the expanded occurrence list
/// separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rasp {
    id: RaspIdentifier,
    code: String,
    subject: SubjectIdentifier,
    professor: ProfessorIdentifier,
    group: GroupIdentifier,
    duration: usize,
    mandatory_semesters: Vec<SemesterIdentifier>,
    optional_semesters: Vec<SemesterIdentifier>,
    needs_computers: bool,
    fixed_room: Option<RoomIdentifier>,
    fixed_hour: Option<usize>,
    recurrence_class: usize,
    anchor_days: Vec<AnchorDay>,
}

impl Rasp {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: RaspIdentifier,
        code: impl Into<String>,
        subject: SubjectIdentifier,
        professor: ProfessorIdentifier,
        group: GroupIdentifier,
        duration: usize,
        mandatory_semesters: Vec<SemesterIdentifier>,
        optional_semesters: Vec<SemesterIdentifier>,
        needs_computers: bool,
        fixed_room: Option<RoomIdentifier>,
        fixed_hour: Option<usize>,
        recurrence_class: usize,
        anchor_days: Vec<AnchorDay>,
    ) -> Self {
        Self {
            id,
            code: code.into(),
            subject,
            professor,
            group,
            duration,
            mandatory_semesters,
            optional_semesters,
            needs_computers,
            fixed_room,
            fixed_hour,
            recurrence_class,
            anchor_days,
        }
    }

    #[inline]
    pub fn id(&self) -> RaspIdentifier {
        self.id
    }

    #[inline]
    pub fn code(&self) -> &str {
        &self.code
    }

    #[inline]
    pub fn subject(&self) -> SubjectIdentifier {
        self.subject
    }

    #[inline]
    pub fn professor(&self) -> ProfessorIdentifier {
        self.professor
    }

    #[inline]
    pub fn group(&self) -> GroupIdentifier {
        self.group
    }

    #[inline]
    pub fn duration(&self) -> usize {
        self.duration
    }

    #[inline]
    pub fn mandatory_semesters(&self) -> &[SemesterIdentifier] {
        &self.mandatory_semesters
    }

    #[inline]
    pub fn optional_semesters(&self) -> &[SemesterIdentifier] {
        &self.optional_semesters
    }

    #[inline]
    pub fn needs_computers(&self) -> bool {
        self.needs_computers
    }

    #[inline]
    pub fn fixed_room(&self) -> Option<RoomIdentifier> {
        self.fixed_room
    }

    #[inline]
    pub fn fixed_hour(&self) -> Option<usize> {
        self.fixed_hour
    }

    /// Index into the shared recurrence expansion table.
    #[inline]
    pub fn recurrence_class(&self) -> usize {
        self.recurrence_class
    }

    /// Legal anchor (week, day) pairs this rasp may start on. Exogenous;
    /// every entry has a matching expansion in the recurrence table.
    #[inline]
    pub fn anchor_days(&self) -> &[AnchorDay] {
        &self.anchor_days
    }
}

impl std::fmt::Display for Rasp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rasp {} (duration {})", self.code, self.duration)
    }
}
