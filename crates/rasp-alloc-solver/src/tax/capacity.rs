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
use rasp_alloc_model::prelude::{Grade, Problem, RaspIdentifier, RoomIdentifier};

/// Flat punishment when the rasp's student count exceeds the room's
/// capacity. Independent of the occurrence set.
pub(crate) fn tax(
    problem: &Problem,
    rasp: RaspIdentifier,
    room: RoomIdentifier,
    grade: &mut Grade,
) {
    if problem.students_for(rasp) > problem.room(room).capacity() {
        grade.capacity += PUNISH;
        grade.total += PUNISH;
    }
}

pub(crate) fn untax(
    problem: &Problem,
    rasp: RaspIdentifier,
    room: RoomIdentifier,
    grade: &mut Grade,
) {
    if problem.students_for(rasp) > problem.room(room).capacity() {
        grade.capacity -= PUNISH;
        grade.total -= PUNISH;
    }
}
