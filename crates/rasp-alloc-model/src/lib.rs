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

pub mod common;
pub mod problem;
pub mod solution;

pub mod prelude {
    pub use crate::common::{Identifier, IdentifierMarkerName};
    pub use crate::problem::baseline::OccupancySet;
    pub use crate::problem::err::{ProblemError, StateLoadError};
    pub use crate::problem::loader::{LoadedState, StateLoader};
    pub use crate::problem::prob::Problem;
    pub use crate::problem::professor::{Professor, ProfessorIdentifier};
    pub use crate::problem::rasp::{GroupIdentifier, Rasp, RaspIdentifier, SubjectIdentifier};
    pub use crate::problem::recurrence::RecurrenceTable;
    pub use crate::problem::room::{Room, RoomIdentifier};
    pub use crate::problem::semester::{Semester, SemesterIdentifier};
    pub use crate::problem::term::TermPlan;
    pub use crate::solution::grade::Grade;
    pub use crate::solution::sol::{Slot, Solution, Timetable};
}
