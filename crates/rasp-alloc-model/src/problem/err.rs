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

use rasp_alloc_core::prelude::AnchorDay;

/// Structural defects of an assembled problem. These indicate corrupt or
/// inconsistent upstream data, never a search outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProblemError {
    ZeroDuration {
        rasp: String,
    },
    DurationExceedsDay {
        rasp: String,
        duration: usize,
        num_hours: usize,
    },
    FixedHourOutOfRange {
        rasp: String,
        hour: usize,
        duration: usize,
        num_hours: usize,
    },
    NoAnchorDays {
        rasp: String,
    },
    RecurrenceClassOutOfRange {
        rasp: String,
        class: usize,
        classes: usize,
    },
    MissingExpansion {
        rasp: String,
        anchor: AnchorDay,
    },
    ExpansionOutsideTerm {
        rasp: String,
        anchor: AnchorDay,
        day: AnchorDay,
    },
    CountMismatch {
        family: &'static str,
        expected: usize,
        actual: usize,
    },
    GridExtentMismatch {
        expected: (usize, usize, usize),
    },
}

impl std::fmt::Display for ProblemError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use ProblemError::*;
        match self {
            ZeroDuration { rasp } => write!(f, "rasp {rasp} has zero duration"),
            DurationExceedsDay {
                rasp,
                duration,
                num_hours,
            } => write!(
                f,
                "rasp {rasp} lasts {duration} hour-slots but a day has only {num_hours}"
            ),
            FixedHourOutOfRange {
                rasp,
                hour,
                duration,
                num_hours,
            } => write!(
                f,
                "rasp {rasp} is fixed at hour {hour} with duration {duration}, exceeding {num_hours} hours"
            ),
            NoAnchorDays { rasp } => write!(f, "rasp {rasp} has no legal anchor days"),
            RecurrenceClassOutOfRange {
                rasp,
                class,
                classes,
            } => write!(
                f,
                "rasp {rasp} references recurrence class {class} but the table has {classes}"
            ),
            MissingExpansion { rasp, anchor } => write!(
                f,
                "recurrence table has no expansion for rasp {rasp} anchored at {anchor}"
            ),
            ExpansionOutsideTerm { rasp, anchor, day } => write!(
                f,
                "expansion of rasp {rasp} anchored at {anchor} recurs on {day}, outside the term"
            ),
            CountMismatch {
                family,
                expected,
                actual,
            } => write!(f, "{family}: expected {expected} entries, found {actual}"),
            GridExtentMismatch { expected } => write!(
                f,
                "occupancy grids do not match the term extents {expected:?}"
            ),
        }
    }
}

impl std::error::Error for ProblemError {}

/// Failures while reading a persisted state file into a `Problem`.
#[derive(Debug)]
pub enum StateLoadError {
    Io(std::io::Error),
    Json(serde_json::Error),
    UnknownRoom { rasp: String, room: String },
    UnknownSemester { rasp: String, semester: String },
    UnknownConstraintKey { family: &'static str, key: String },
    BadGridShape { family: &'static str, key: String },
    UnknownTimetableRasp { rasp: String },
    UnknownTimetableRoom { rasp: String, room: String },
    TimetableSlotOutOfTerm { rasp: String },
    Problem(ProblemError),
}

impl From<std::io::Error> for StateLoadError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for StateLoadError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<ProblemError> for StateLoadError {
    fn from(e: ProblemError) -> Self {
        Self::Problem(e)
    }
}

impl std::fmt::Display for StateLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use StateLoadError::*;
        match self {
            Io(e) => write!(f, "I/O error: {e}"),
            Json(e) => write!(f, "JSON error: {e}"),
            UnknownRoom { rasp, room } => {
                write!(f, "rasp {rasp} references unknown room {room}")
            }
            UnknownSemester { rasp, semester } => {
                write!(f, "rasp {rasp} references unknown semester {semester}")
            }
            UnknownConstraintKey { family, key } => {
                write!(f, "initial constraints of {family} reference unknown {key}")
            }
            BadGridShape { family, key } => {
                write!(f, "grid for {key} in {family} does not match the term shape")
            }
            UnknownTimetableRasp { rasp } => {
                write!(f, "timetable references unknown rasp {rasp}")
            }
            UnknownTimetableRoom { rasp, room } => {
                write!(f, "timetable places rasp {rasp} in unknown room {room}")
            }
            TimetableSlotOutOfTerm { rasp } => {
                write!(f, "timetable slot of rasp {rasp} lies outside the term")
            }
            Problem(e) => write!(f, "problem error: {e}"),
        }
    }
}

impl std::error::Error for StateLoadError {}
