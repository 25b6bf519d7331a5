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

//! Greedy randomized adaptive construction: every rasp, in random order,
//! is committed to a uniformly drawn member of its restricted candidate
//! list. An exhausted time budget collapses both construction widths to
//! one, degrading to a plain greedy pass instead of aborting.

use crate::{
    diagnose,
    err::ExpansionError,
    search::{budget::TimeBudget, local_search::local_search, tracker::ScoreTracker, SearchOutcome},
    slots::{candidates, expand},
    state::solver_state::SolverState,
};
use rand::seq::{IndexedRandom, SliceRandom};
use rasp_alloc_model::prelude::{RaspIdentifier, Slot};
use std::time::Duration;

/// Scores up to `width` sampled slots for one rasp. The width is clamped
/// to the pool and at least one candidate is always evaluated, even on an
/// expired budget.
fn build_candidate_list<R: rand::Rng>(
    state: &SolverState,
    rasp: RaspIdentifier,
    width: usize,
    budget: &TimeBudget,
    rng: &mut R,
) -> Result<Vec<(Slot, i32)>, ExpansionError> {
    let problem = state.problem();
    let r = problem.rasp(rasp);
    let mut pool = candidates::candidate_slots(problem, r, true, rng);
    if pool.is_empty() {
        return Ok(Vec::new());
    }
    let keep = width.clamp(1, pool.len());
    pool.truncate(keep);
    let groups = state.group_dates(rasp);

    let mut scored = Vec::with_capacity(pool.len());
    for slot in pool {
        let dates = expand::occurrences(problem, r, &slot)?;
        let grade = diagnose::candidate_grade(state, rasp, &slot, &dates, &groups);
        scored.push((slot, grade.total));
        if budget.expired() {
            break;
        }
    }
    Ok(scored)
}

/// Restricted candidate list: the `num_restrict` best of the sampled
/// slots, ordered best first. Both widths are clamped in place so a
/// mid-construction collapse to greedy persists for the remaining rasps.
fn restricted_candidates<R: rand::Rng>(
    state: &SolverState,
    rasp: RaspIdentifier,
    num_candidates: &mut usize,
    num_restrict: &mut usize,
    budget: &TimeBudget,
    rng: &mut R,
) -> Result<Vec<(Slot, i32)>, ExpansionError> {
    let mut rcl = build_candidate_list(state, rasp, *num_candidates, budget, rng)?;
    rcl.sort_by(|a, b| b.1.cmp(&a.1));
    *num_restrict = (*num_restrict).clamp(1, rcl.len().max(1));
    rcl.truncate(*num_restrict);
    Ok(rcl)
}

fn construct_solution<R: rand::Rng>(
    state: &mut SolverState,
    mut num_candidates: usize,
    mut num_restrict: usize,
    budget: &TimeBudget,
    rng: &mut R,
) -> Result<(), ExpansionError> {
    state.reset();
    tracing::debug!(elapsed = budget.elapsed_secs(), "constructing solution");

    let mut order: Vec<RaspIdentifier> = (0..state.problem().rasp_count())
        .map(|i| RaspIdentifier::new(i as u32))
        .collect();
    order.shuffle(rng);

    for rasp in order {
        if budget.expired() {
            num_candidates = 1;
            num_restrict = 1;
        }
        let rcl = restricted_candidates(
            state,
            rasp,
            &mut num_candidates,
            &mut num_restrict,
            budget,
            rng,
        )?;
        if let Some(&(slot, _)) = rcl.choose(rng) {
            state.place(rasp, slot)?;
        }
    }
    Ok(())
}

/// GRASP: randomized greedy construction followed by local search, over
/// restarts until the budget ends or a perfect timetable appears.
#[derive(Debug, Clone)]
pub struct Grasp {
    time_limit: Duration,
    num_candidates: usize,
    num_restrict: usize,
}

impl Grasp {
    pub fn new(time_limit: Duration) -> Self {
        Self {
            time_limit,
            num_candidates: 10,
            num_restrict: 5,
        }
    }

    /// How many sampled slots each rasp's construction step scores.
    pub fn with_num_candidates(mut self, num_candidates: usize) -> Self {
        self.num_candidates = num_candidates.max(1);
        self
    }

    /// How many of the best sampled slots stay eligible for the random
    /// pick.
    pub fn with_num_restrict(mut self, num_restrict: usize) -> Self {
        self.num_restrict = num_restrict.max(1);
        self
    }

    #[tracing::instrument(level = "info", name = "GRASP", skip(self, state, rng))]
    pub fn run<'p, R: rand::Rng>(
        &self,
        mut state: SolverState<'p>,
        rng: &mut R,
    ) -> Result<SearchOutcome<'p>, ExpansionError> {
        let budget = TimeBudget::start(self.time_limit);
        let mut tracker = ScoreTracker::new();
        let mut best_total: Option<i32> = None;
        let mut best_state = state.clone();

        loop {
            if budget.expired() {
                tracing::info!("time limit reached, stopping");
                break;
            }
            construct_solution(
                &mut state,
                self.num_candidates,
                self.num_restrict,
                &budget,
                rng,
            )?;
            if best_total.is_none() {
                best_total = Some(state.grade().total);
            }
            local_search(&mut state, best_total, &budget, &mut tracker, rng, None)?;

            if best_total.is_none_or(|best| state.grade().total > best) {
                best_total = Some(state.grade().total);
                best_state = state.clone();
            }
            if best_total == Some(0) {
                break;
            }
        }
        Ok(SearchOutcome {
            best: best_state,
            tracker,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_construction_places_every_rasp() {
        let problem = fixtures::problem();
        let mut state = SolverState::new(&problem);
        let budget = TimeBudget::start(Duration::from_secs(30));
        let mut rng = ChaCha8Rng::seed_from_u64(17);

        construct_solution(&mut state, 10, 5, &budget, &mut rng).unwrap();
        assert_eq!(state.timetable().len(), problem.rasp_count());
        assert!(state.grade().is_consistent());
    }

    #[test]
    fn test_expired_budget_collapses_to_greedy_but_still_places() {
        let problem = fixtures::problem();
        let mut state = SolverState::new(&problem);
        let budget = TimeBudget::start(Duration::ZERO);
        let mut rng = ChaCha8Rng::seed_from_u64(17);

        construct_solution(&mut state, 10, 5, &budget, &mut rng).unwrap();
        assert_eq!(state.timetable().len(), problem.rasp_count());
    }

    #[test]
    fn test_grasp_with_zero_budget_returns_input() {
        let problem = fixtures::problem();
        let state = SolverState::new(&problem);
        let mut rng = ChaCha8Rng::seed_from_u64(19);
        let outcome = Grasp::new(Duration::ZERO).run(state, &mut rng).unwrap();
        assert!(outcome.best.timetable().is_empty());
    }

    #[test]
    fn test_grasp_solves_the_small_instance() {
        let problem = fixtures::problem();
        let state = SolverState::new(&problem);
        let mut rng = ChaCha8Rng::seed_from_u64(23);
        let outcome = Grasp::new(Duration::from_secs(20))
            .run(state, &mut rng)
            .unwrap();
        assert_eq!(outcome.best.grade().total, 0);
        assert_eq!(outcome.tracker.last_best(), Some(0));
    }
}
