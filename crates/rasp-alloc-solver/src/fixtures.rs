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

//! Shared test problems: a two-week term with five days of eight
//! hour-slots, three rooms, two professors and four rasps covering the
//! mandatory/optional and equipment corner cases.

use chrono::NaiveDate;
use rasp_alloc_core::prelude::AnchorDay;
use rasp_alloc_model::prelude::{
    GroupIdentifier, OccupancySet, Problem, Professor, ProfessorIdentifier, Rasp, RaspIdentifier,
    RecurrenceTable, Room, RoomIdentifier, Semester, SemesterIdentifier, SubjectIdentifier,
    TermPlan,
};
use std::collections::HashMap;

pub(crate) fn rid(n: u32) -> RaspIdentifier {
    RaspIdentifier::new(n)
}

pub(crate) fn room(n: u32) -> RoomIdentifier {
    RoomIdentifier::new(n)
}

pub(crate) fn sem(n: u32) -> SemesterIdentifier {
    SemesterIdentifier::new(n)
}

pub(crate) fn pid(n: u32) -> ProfessorIdentifier {
    ProfessorIdentifier::new(n)
}

pub(crate) fn subj(n: u32) -> SubjectIdentifier {
    SubjectIdentifier::new(n)
}

pub(crate) fn gid(n: u32) -> GroupIdentifier {
    GroupIdentifier::new(n)
}

fn term() -> TermPlan {
    TermPlan::new(
        2,
        5,
        8,
        NaiveDate::from_ymd_opt(2025, 10, 6).unwrap(),
        NaiveDate::from_ymd_opt(2025, 10, 17).unwrap(),
    )
}

/// One frequency class: week-0 anchors recur in both weeks, week-1
/// anchors only in week 1.
fn weekly_table() -> RecurrenceTable {
    let mut class = HashMap::new();
    for day in 0..5 {
        class.insert(
            AnchorDay::new(0, day),
            vec![AnchorDay::new(0, day), AnchorDay::new(1, day)],
        );
        class.insert(AnchorDay::new(1, day), vec![AnchorDay::new(1, day)]);
    }
    RecurrenceTable::new(vec![class])
}

fn week0_anchors() -> Vec<AnchorDay> {
    (0..5).map(|day| AnchorDay::new(0, day)).collect()
}

fn rooms() -> Vec<Room> {
    vec![
        Room::new(room(0), "R0", "Lab", 30, true),
        Room::new(room(1), "R1", "Hall", 100, false),
        Room::new(room(2), "R2", "Cabinet", 10, false),
    ]
}

/// Four rasps:
/// - 0 and 1 are sibling variants of one elective group (subject bio),
///   taught by different professors;
/// - 2 is the bio lecture, mandatory for S0, sharing professor 0 with 0;
/// - 3 is the chem lecture, mandatory for S1, needs computers, and fits
///   only the equipped room without violations.
pub(crate) fn problem() -> Problem {
    let rasps = vec![
        Rasp::new(
            rid(0),
            "bio_lab_a",
            subj(0),
            pid(0),
            gid(0),
            2,
            vec![],
            vec![sem(0)],
            false,
            None,
            None,
            0,
            week0_anchors(),
        ),
        Rasp::new(
            rid(1),
            "bio_lab_b",
            subj(0),
            pid(1),
            gid(0),
            2,
            vec![],
            vec![sem(0)],
            false,
            None,
            None,
            0,
            week0_anchors(),
        ),
        Rasp::new(
            rid(2),
            "bio_lec",
            subj(0),
            pid(0),
            gid(1),
            2,
            vec![sem(0)],
            vec![],
            false,
            None,
            None,
            0,
            week0_anchors(),
        ),
        Rasp::new(
            rid(3),
            "chem_lec",
            subj(1),
            pid(1),
            gid(2),
            1,
            vec![sem(1)],
            vec![],
            true,
            None,
            None,
            0,
            week0_anchors(),
        ),
    ];
    Problem::new(
        term(),
        rooms(),
        vec![Professor::new(pid(0), "P0"), Professor::new(pid(1), "P1")],
        vec![
            Semester::new(sem(0), "S0", "winter", 1, 60, "PROG"),
            Semester::new(sem(1), "S1", "winter", 3, 45, "PROG"),
        ],
        rasps,
        vec![20, 20, 35, 25],
        vec![vec![rid(0), rid(1)], vec![rid(2)], vec![rid(3)]],
        vec![vec![gid(0), gid(1)], vec![gid(2)]],
        OccupancySet::zeroed(3, 2, 2, 2, 5, 8),
        weekly_table(),
    )
    .unwrap()
}

/// A single rasp pinned to room R1 at hour 3.
pub(crate) fn fixed_problem() -> Problem {
    let rasps = vec![Rasp::new(
        rid(0),
        "seminar",
        subj(0),
        pid(0),
        gid(0),
        2,
        vec![sem(0)],
        vec![],
        false,
        Some(room(1)),
        Some(3),
        0,
        week0_anchors(),
    )];
    Problem::new(
        term(),
        rooms(),
        vec![Professor::new(pid(0), "P0")],
        vec![Semester::new(sem(0), "S0", "winter", 1, 60, "PROG")],
        rasps,
        vec![25],
        vec![vec![rid(0)]],
        vec![vec![gid(0)]],
        OccupancySet::zeroed(3, 1, 1, 2, 5, 8),
        weekly_table(),
    )
    .unwrap()
}
