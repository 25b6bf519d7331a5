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
    problem::{prob::Problem, rasp::RaspIdentifier, room::RoomIdentifier},
    solution::grade::Grade,
};
use rasp_alloc_core::prelude::{AnchorDay, TermDate};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// The anchor assignment of one rasp: a room plus the (week, day, hour) of
/// its first occurrence. Two slots are equal iff all four fields match;
/// slots carry no ordering semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot {
    pub room: RoomIdentifier,
    pub week: usize,
    pub day: usize,
    pub hour: usize,
}

impl Slot {
    #[inline]
    pub fn new(room: RoomIdentifier, week: usize, day: usize, hour: usize) -> Self {
        Self {
            room,
            week,
            day,
            hour,
        }
    }

    #[inline]
    pub fn anchor(&self) -> AnchorDay {
        AnchorDay::new(self.week, self.day)
    }

    #[inline]
    pub fn start_date(&self) -> TermDate {
        TermDate::new(self.week, self.day, self.hour)
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} w{} d{} h{}",
            self.room, self.week, self.day, self.hour
        )
    }
}

/// Current assignment of rasps to slots. A rasp absent from the map is
/// unplaced.
pub type Timetable = HashMap<RaspIdentifier, Slot>;

#[derive(Debug, Clone, Serialize)]
pub struct PlacedSlot {
    pub room_id: String,
    pub week: usize,
    pub day: usize,
    pub hour: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrackerPoint {
    pub elapsed_secs: f64,
    pub best_total: i32,
}

/// Serializable handoff of a solved timetable: the grade, the assignment
/// keyed by external rasp codes, and the driver's best-score-over-time
/// samples.
#[derive(Debug, Clone, Serialize)]
pub struct Solution {
    pub grade: Grade,
    pub timetable: BTreeMap<String, PlacedSlot>,
    pub tracker: Vec<TrackerPoint>,
}

impl Solution {
    pub fn new(
        problem: &Problem,
        timetable: &Timetable,
        grade: Grade,
        tracker: &[(f64, i32)],
    ) -> Self {
        let timetable = timetable
            .iter()
            .map(|(&rasp, slot)| {
                (
                    problem.rasp(rasp).code().to_owned(),
                    PlacedSlot {
                        room_id: problem.room(slot.room).code().to_owned(),
                        week: slot.week,
                        day: slot.day,
                        hour: slot.hour,
                    },
                )
            })
            .collect();
        let tracker = tracker
            .iter()
            .map(|&(elapsed_secs, best_total)| TrackerPoint {
                elapsed_secs,
                best_total,
            })
            .collect();
        Self {
            grade,
            timetable,
            tracker,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
