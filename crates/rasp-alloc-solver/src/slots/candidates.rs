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

use rand::seq::SliceRandom;
use rasp_alloc_model::prelude::{Problem, Rasp, Room, RoomIdentifier, Slot};

/// Enumerates every feasible anchor slot of a rasp: each legal anchor day
/// crossed with the room pool (a single fixed room, or all rooms) and the
/// hour pool (the fixed hour, or every start hour the duration fits).
///
/// `shuffle` randomizes the order so first-improvement scans are unbiased.
pub fn candidate_slots<R: rand::Rng>(
    problem: &Problem,
    rasp: &Rasp,
    shuffle: bool,
    rng: &mut R,
) -> Vec<Slot> {
    let term = problem.term();
    let rooms: Vec<RoomIdentifier> = match rasp.fixed_room() {
        Some(room) => vec![room],
        None => problem.rooms().iter().map(Room::id).collect(),
    };

    let mut pool = Vec::new();
    for &anchor in rasp.anchor_days() {
        match rasp.fixed_hour() {
            Some(hour) => {
                for &room in &rooms {
                    pool.push(Slot::new(room, anchor.week, anchor.day, hour));
                }
            }
            None => {
                for &room in &rooms {
                    for hour in 0..=term.last_start_hour(rasp.duration()) {
                        pool.push(Slot::new(room, anchor.week, anchor.day, hour));
                    }
                }
            }
        }
    }
    if shuffle {
        pool.shuffle(rng);
    }
    pool
}

/// Draws one feasible slot uniformly: the anchor day uniformly from the
/// legal list, room and hour honoring fixed overrides and uniform
/// otherwise.
pub fn random_slot<R: rand::Rng>(problem: &Problem, rasp: &Rasp, rng: &mut R) -> Slot {
    let anchors = rasp.anchor_days();
    let anchor = anchors[rng.random_range(0..anchors.len())];
    let hour = match rasp.fixed_hour() {
        Some(hour) => hour,
        None => rng.random_range(0..=problem.term().last_start_hour(rasp.duration())),
    };
    let room = match rasp.fixed_room() {
        Some(room) => room,
        None => problem.rooms()[rng.random_range(0..problem.rooms().len())].id(),
    };
    Slot::new(room, anchor.week, anchor.day, hour)
}
