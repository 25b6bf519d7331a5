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

//! Violation probes and the speculative candidate evaluation. Everything
//! here reads the grids without mutating them: a candidate's would-be
//! marginal grade is computed by simulating the increments.

use crate::{
    err::ExpansionError,
    state::solver_state::{GroupDates, SolverState},
    tax::{semesters::transition_punish, PUNISH},
};
use rand::seq::SliceRandom;
use rasp_alloc_core::prelude::{Grid3, TermDate};
use rasp_alloc_model::prelude::{Grade, Problem, Rasp, RaspIdentifier, Room, Slot};
use std::collections::{HashMap, HashSet};

pub fn capacity_problematic(problem: &Problem, rasp: RaspIdentifier, room: &Room) -> bool {
    problem.students_for(rasp) > room.capacity()
}

pub fn strong_computer_problematic(room: &Room, needs_computers: bool) -> bool {
    !room.has_computers() && needs_computers
}

/// An equipped room wasted on an activity that does not need it. Probed
/// but deliberately excluded from scoring and from the problematic check.
pub fn weak_computer_problematic(room: &Room, needs_computers: bool) -> bool {
    room.has_computers() && !needs_computers
}

fn computer_problematic(room: &Room, needs_computers: bool) -> bool {
    strong_computer_problematic(room, needs_computers)
}

fn grid_conflict(grid: &Grid3, dates: &[TermDate]) -> bool {
    dates.iter().any(|&date| grid.get(date) > 1)
}

fn semester_conflict(state: &SolverState, rasp: &Rasp, dates: &[TermDate]) -> bool {
    rasp.mandatory_semesters()
        .iter()
        .chain(rasp.optional_semesters())
        .any(|&sem| grid_conflict(state.grids().collisions(sem), dates))
}

/// Whether the placed rasp's current slot violates any hard constraint:
/// room or professor double-booking, a semester collision, a capacity
/// overflow or a missing computer room.
pub fn is_problematic(state: &SolverState, rasp: RaspIdentifier) -> bool {
    let Some(slot) = state.slot_of(rasp) else {
        return false;
    };
    let problem = state.problem();
    let r = problem.rasp(rasp);
    let room = problem.room(slot.room);
    if computer_problematic(room, r.needs_computers())
        || capacity_problematic(problem, rasp, room)
    {
        return true;
    }
    let dates = state.span(rasp).dates();
    grid_conflict(state.grids().room(slot.room), dates)
        || grid_conflict(state.grids().professor(r.professor()), dates)
        || semester_conflict(state, r, dates)
}

/// Collision count of an occurrence set against one grid, simulating the
/// rasp's own bookings on top of the current counters.
fn count_in_grid(grid: &Grid3, dates: &[TermDate]) -> i32 {
    let mut cnt = 0;
    for &date in dates {
        let would_be = grid.get(date) as i32 + 1;
        if would_be > 1 {
            cnt += would_be;
        }
    }
    cnt * PUNISH
}

fn candidate_semester_score(
    state: &SolverState,
    rasp: &Rasp,
    dates: &[TermDate],
    groups: &GroupDates,
) -> i32 {
    let grids = state.grids();
    let mut punish = 0;
    for &sem in rasp.mandatory_semesters() {
        let occupied = grids.semester(sem);
        let collisions = grids.collisions(sem);
        for &date in dates {
            let old_occ = occupied.get(date) as i32;
            let old_colls = collisions.get(date) as i32;
            let mut new_colls = old_colls;
            if !groups.own.contains(&date) {
                new_colls += 1;
            }
            punish += transition_punish(old_occ, old_colls, old_occ + 1, new_colls);
        }
    }
    for &sem in rasp.optional_semesters() {
        let occupied = grids.semester(sem);
        let optionals = grids.optionals(sem);
        let collisions = grids.collisions(sem);
        for &date in dates {
            let old_occ = occupied.get(date) as i32;
            let old_colls = collisions.get(date) as i32;
            let mut new_colls = old_colls;
            if !groups.own.contains(&date)
                && (optionals.get(date) == 0 || groups.other.contains(&date))
            {
                new_colls += 1;
            }
            punish += transition_punish(old_occ, old_colls, old_occ + 1, new_colls);
        }
    }
    punish
}

/// The marginal grade `slot` would contribute if the (currently unplaced)
/// rasp were taxed there, without touching any counter. This is the basis
/// for "remove old slot, is new slot strictly better".
pub fn candidate_grade(
    state: &SolverState,
    rasp: RaspIdentifier,
    slot: &Slot,
    dates: &[TermDate],
    groups: &GroupDates,
) -> Grade {
    let problem = state.problem();
    let r = problem.rasp(rasp);
    let room = problem.room(slot.room);

    let rooms = count_in_grid(state.grids().room(slot.room), dates);
    let professors = count_in_grid(state.grids().professor(r.professor()), dates);
    let semesters = candidate_semester_score(state, r, dates, groups);
    let capacity = if capacity_problematic(problem, rasp, room) {
        PUNISH
    } else {
        0
    };
    let computers = if strong_computer_problematic(room, r.needs_computers()) {
        PUNISH
    } else {
        0
    };
    Grade {
        total: rooms + professors + semesters + capacity + computers,
        rooms,
        professors,
        capacity,
        computers,
        semesters,
    }
}

/// First problematic placed rasp in shuffled order, skipping tabu ids and
/// anything outside `restrict` when given.
pub fn random_problematic_rasp<R: rand::Rng>(
    state: &SolverState,
    tabu: &HashSet<RaspIdentifier>,
    restrict: Option<&HashSet<RaspIdentifier>>,
    rng: &mut R,
) -> Option<RaspIdentifier> {
    let mut placed = state.placed_rasps();
    if let Some(allowed) = restrict {
        placed.retain(|rasp| allowed.contains(rasp));
    }
    placed.shuffle(rng);
    placed
        .into_iter()
        .find(|&rasp| !tabu.contains(&rasp) && is_problematic(state, rasp))
}

/// Two rasps are swap-compatible iff each one's expansion table accepts
/// the other's anchor, neither duration overruns the day at the other's
/// hour, and their fixed-hour and fixed-room constraints agree.
pub fn can_swap(problem: &Problem, a: &Rasp, b: &Rasp, a_slot: &Slot, b_slot: &Slot) -> bool {
    let table = problem.recurrence_table();
    let num_hours = problem.term().num_hours();
    table.has_expansion(a.recurrence_class(), b_slot.anchor())
        && table.has_expansion(b.recurrence_class(), a_slot.anchor())
        && a.duration() + b_slot.hour <= num_hours
        && b.duration() + a_slot.hour <= num_hours
        && a.fixed_hour() == b.fixed_hour()
        && a.fixed_room() == b.fixed_room()
}

/// Finds one problematic rasp (subject to `tabu_first`), then a swap-
/// compatible partner not yet black-listed for it. Returns what it found:
/// `(None, None)` when no problematic rasp remains, `(Some(a), None)`
/// when `a` has no partner left.
pub fn problematic_pair<R: rand::Rng>(
    state: &SolverState,
    tabu_first: &HashSet<RaspIdentifier>,
    tabu_pairs: &HashMap<RaspIdentifier, HashSet<RaspIdentifier>>,
    rng: &mut R,
) -> (Option<RaspIdentifier>, Option<RaspIdentifier>) {
    let mut placed = state.placed_rasps();
    placed.shuffle(rng);

    let Some(first) = placed
        .iter()
        .copied()
        .find(|&rasp| !tabu_first.contains(&rasp) && is_problematic(state, rasp))
    else {
        return (None, None);
    };

    let problem = state.problem();
    let first_slot = match state.slot_of(first) {
        Some(slot) => slot,
        None => return (None, None),
    };
    let banned_partners = tabu_pairs.get(&first);
    let partner = placed.into_iter().find(|&candidate| {
        candidate != first
            && !banned_partners.is_some_and(|set| set.contains(&candidate))
            && state.slot_of(candidate).is_some_and(|candidate_slot| {
                can_swap(
                    problem,
                    problem.rasp(first),
                    problem.rasp(candidate),
                    &first_slot,
                    &candidate_slot,
                )
            })
    });
    (Some(first), partner)
}

/// Ranks every problematic placed rasp by its marginal grade (worst
/// first) and returns the worst `ceil(n * fraction)`.
pub fn most_problematic(
    state: &mut SolverState,
    fraction: f64,
) -> Result<Vec<RaspIdentifier>, ExpansionError> {
    let mut ranked = Vec::new();
    for rasp in state.placed_rasps() {
        if !is_problematic(state, rasp) {
            continue;
        }
        let Some(removed) = state.unplace(rasp) else {
            continue;
        };
        state.place(rasp, removed.slot)?;
        ranked.push((rasp, removed.marginal.total));
    }
    ranked.sort_by_key(|&(_, total)| total);
    let keep = (ranked.len() as f64 * fraction).ceil() as usize;
    ranked.truncate(keep);
    Ok(ranked.into_iter().map(|(rasp, _)| rasp).collect())
}
