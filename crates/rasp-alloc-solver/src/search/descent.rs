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

//! Single-move descent: scan a shuffled candidate pool for a slot whose
//! speculative marginal grade strictly beats the one the rasp just gave
//! up, pruning candidates through the banned-slots memo.

use crate::{
    diagnose,
    err::ExpansionError,
    search::{budget::TimeBudget, tracker::ScoreTracker},
    slots::{banned::BannedSlots, candidates, expand},
    state::solver_state::SolverState,
};
use rasp_alloc_model::prelude::{Grade, RaspIdentifier, Slot};
use std::collections::HashSet;

/// First slot in shuffled order that strictly improves on `baseline`.
pub fn first_better_slot<R: rand::Rng>(
    state: &SolverState,
    rasp: RaspIdentifier,
    baseline: &Grade,
    rng: &mut R,
) -> Result<Option<Slot>, ExpansionError> {
    let problem = state.problem();
    let r = problem.rasp(rasp);
    let pool = candidates::candidate_slots(problem, r, true, rng);
    let groups = state.group_dates(rasp);
    let mut banned = BannedSlots::default();

    for slot in pool {
        if banned.skips(&slot) {
            continue;
        }
        let dates = expand::occurrences(problem, r, &slot)?;
        let candidate = diagnose::candidate_grade(state, rasp, &slot, &dates, &groups);
        if candidate.total > baseline.total {
            return Ok(Some(slot));
        }
        banned.attribute_failure(&slot, &candidate, baseline);
    }
    Ok(None)
}

/// Best improving slot over the whole pool, or `None` when nothing beats
/// `baseline`.
pub fn steepest_better_slot<R: rand::Rng>(
    state: &SolverState,
    rasp: RaspIdentifier,
    baseline: &Grade,
    rng: &mut R,
) -> Result<Option<Slot>, ExpansionError> {
    let problem = state.problem();
    let r = problem.rasp(rasp);
    let pool = candidates::candidate_slots(problem, r, true, rng);
    let groups = state.group_dates(rasp);
    let mut banned = BannedSlots::default();

    let mut best: Option<Slot> = None;
    let mut best_grade = *baseline;
    for slot in pool {
        if banned.skips(&slot) {
            continue;
        }
        let dates = expand::occurrences(problem, r, &slot)?;
        let candidate = diagnose::candidate_grade(state, rasp, &slot, &dates, &groups);
        if candidate.total > best_grade.total {
            best = Some(slot);
            best_grade = candidate;
        } else {
            banned.attribute_failure(&slot, &candidate, baseline);
        }
    }
    Ok(best)
}

/// Failed moves tabu the rasp; a committed improvement clears the list so
/// the whole neighborhood reopens.
pub(crate) fn update_tabu(
    tabu: &mut HashSet<RaspIdentifier>,
    rasp: RaspIdentifier,
    improved: bool,
) {
    if improved {
        tabu.clear();
    } else {
        tabu.insert(rasp);
    }
}

/// One committed improving move, if any exists: pick a problematic rasp,
/// try to re-place it strictly better, tabu it on failure and retry until
/// the neighborhood is exhausted.
pub fn find_better_neighbor<R: rand::Rng>(
    state: &mut SolverState,
    best_total: &mut Option<i32>,
    budget: &TimeBudget,
    tracker: &mut ScoreTracker,
    rng: &mut R,
    restrict: Option<&HashSet<RaspIdentifier>>,
) -> Result<bool, ExpansionError> {
    let mut tabu: HashSet<RaspIdentifier> = HashSet::new();
    let mut improvement = false;

    loop {
        if budget.expired() {
            break;
        }
        let Some(rasp) = diagnose::random_problematic_rasp(state, &tabu, restrict, rng) else {
            improvement = false;
            break;
        };
        let Some(removed) = state.unplace(rasp) else {
            break;
        };
        let better = first_better_slot(state, rasp, &removed.marginal, rng)?;
        improvement = better.is_some();
        update_tabu(&mut tabu, rasp, improvement);
        let slot = better.unwrap_or(removed.slot);
        state.place(rasp, slot)?;

        if improvement {
            let total = state.grade().total;
            if let Some(best) = best_total {
                if total > *best {
                    *best = total;
                    tracker.record(budget.elapsed_secs(), total);
                    tracing::info!(
                        elapsed = budget.elapsed_secs(),
                        grade = %state.grade(),
                        "local move improved best"
                    );
                }
            }
            break;
        }
    }
    Ok(improvement)
}
