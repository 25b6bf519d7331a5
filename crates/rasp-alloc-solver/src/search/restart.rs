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

//! Timetable (re)construction for the restart-based drivers: fully
//! random seeding, and the iterated perturbation that re-randomizes only
//! the worst placements while keeping the rest of the incumbent.

use crate::{
    diagnose,
    err::ExpansionError,
    search::{budget::TimeBudget, local_search::local_search, tracker::ScoreTracker, SearchOutcome},
    slots::candidates,
    state::solver_state::SolverState,
};
use rasp_alloc_model::prelude::RaspIdentifier;
use std::collections::HashSet;
use std::time::Duration;

/// Fraction of the timetable the iterated perturbation re-randomizes.
const PERTURB_FRACTION: f64 = 0.2;

/// Bound on the local-search pass that tidies a perturbed subset.
const PERTURB_PASS: Duration = Duration::from_secs(5);

/// Clears everything and places every rasp at a uniformly random
/// feasible slot.
pub(crate) fn random_timetable<R: rand::Rng>(
    state: &mut SolverState,
    rng: &mut R,
) -> Result<(), ExpansionError> {
    tracing::debug!("generating random timetable");
    state.reset();
    let problem = state.problem();
    for i in 0..problem.rasp_count() {
        let rasp = RaspIdentifier::new(i as u32);
        let slot = candidates::random_slot(problem, problem.rasp(rasp), rng);
        state.place(rasp, slot)?;
    }
    Ok(())
}

/// Re-randomizes only the worst `fraction` of placements (by marginal
/// grade), runs a short bounded local-search pass restricted to that
/// subset, and keeps every other placement. Seeds a fully random
/// timetable when nothing is placed yet.
pub(crate) fn perturb_worst<R: rand::Rng>(
    state: &mut SolverState,
    fraction: f64,
    budget: &TimeBudget,
    rng: &mut R,
) -> Result<(), ExpansionError> {
    if state.timetable().is_empty() {
        return random_timetable(state, rng);
    }
    tracing::debug!(fraction, "perturbing worst placements");

    let worst = diagnose::most_problematic(state, fraction)?;
    if worst.is_empty() {
        return Ok(());
    }
    for &rasp in &worst {
        state.unplace(rasp);
    }
    for &rasp in &worst {
        let slot = candidates::random_slot(state.problem(), state.problem().rasp(rasp), rng);
        state.place(rasp, slot)?;
    }

    let subset: HashSet<RaspIdentifier> = worst.into_iter().collect();
    let pass = TimeBudget::start(PERTURB_PASS.min(budget.remaining()));
    let mut scratch = ScoreTracker::new();
    local_search(state, None, &pass, &mut scratch, rng, Some(&subset))
}

/// Repeated local search: full random restarts, each polished by local
/// search, best snapshot retained.
#[derive(Debug, Clone)]
pub struct RepeatedLocalSearch {
    time_limit: Duration,
}

impl RepeatedLocalSearch {
    pub fn new(time_limit: Duration) -> Self {
        Self { time_limit }
    }

    #[tracing::instrument(level = "info", name = "RLS", skip(self, state, rng))]
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
            random_timetable(&mut state, rng)?;
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

/// Iterated local search: keeps the incumbent and only re-randomizes its
/// worst placements between local-search passes.
#[derive(Debug, Clone)]
pub struct IteratedLocalSearch {
    time_limit: Duration,
    perturb_fraction: f64,
}

impl IteratedLocalSearch {
    pub fn new(time_limit: Duration) -> Self {
        Self {
            time_limit,
            perturb_fraction: PERTURB_FRACTION,
        }
    }

    pub fn with_perturb_fraction(mut self, fraction: f64) -> Self {
        self.perturb_fraction = fraction.clamp(0.0, 1.0);
        self
    }

    #[tracing::instrument(level = "info", name = "ILS", skip(self, state, rng))]
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
            perturb_worst(&mut state, self.perturb_fraction, &budget, rng)?;
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
    use crate::fixtures::{self, rid, room};
    use rasp_alloc_model::prelude::Slot;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_random_timetable_places_everything() {
        let problem = fixtures::problem();
        let mut state = SolverState::new(&problem);
        let mut rng = ChaCha8Rng::seed_from_u64(31);
        random_timetable(&mut state, &mut rng).unwrap();
        assert_eq!(state.timetable().len(), problem.rasp_count());
        assert!(state.grade().is_consistent());
    }

    #[test]
    fn test_perturbation_keeps_clean_placements() {
        let problem = fixtures::problem();
        let mut state = SolverState::new(&problem);
        // Rasp 3 is cleanly placed; rasps 0 and 2 collide on professor 0.
        state.place(rid(0), Slot::new(room(0), 0, 0, 0)).unwrap();
        state.place(rid(2), Slot::new(room(1), 0, 0, 0)).unwrap();
        state.place(rid(3), Slot::new(room(0), 0, 2, 3)).unwrap();
        let clean_slot = state.slot_of(rid(3)).unwrap();

        let budget = TimeBudget::start(Duration::from_secs(30));
        let mut rng = ChaCha8Rng::seed_from_u64(37);
        perturb_worst(&mut state, 0.5, &budget, &mut rng).unwrap();

        // The worst half is drawn from the colliding pair only.
        assert_eq!(state.slot_of(rid(3)), Some(clean_slot));
        assert_eq!(state.timetable().len(), 3);
        assert!(state.grade().is_consistent());
    }

    #[test]
    fn test_rls_with_zero_budget_returns_input() {
        let problem = fixtures::problem();
        let state = SolverState::new(&problem);
        let mut rng = ChaCha8Rng::seed_from_u64(41);
        let outcome = RepeatedLocalSearch::new(Duration::ZERO)
            .run(state, &mut rng)
            .unwrap();
        assert!(outcome.best.timetable().is_empty());
        assert!(outcome.tracker.is_empty());
    }

    #[test]
    fn test_ils_with_zero_budget_returns_input() {
        let problem = fixtures::problem();
        let state = SolverState::new(&problem);
        let mut rng = ChaCha8Rng::seed_from_u64(43);
        let outcome = IteratedLocalSearch::new(Duration::ZERO)
            .run(state, &mut rng)
            .unwrap();
        assert!(outcome.best.timetable().is_empty());
        assert!(outcome.tracker.is_empty());
    }

    #[test]
    fn test_rls_solves_the_small_instance() {
        let problem = fixtures::problem();
        let state = SolverState::new(&problem);
        let mut rng = ChaCha8Rng::seed_from_u64(47);
        let outcome = RepeatedLocalSearch::new(Duration::from_secs(20))
            .run(state, &mut rng)
            .unwrap();
        assert_eq!(outcome.best.grade().total, 0);
    }

    #[test]
    fn test_ils_solves_the_small_instance() {
        let problem = fixtures::problem();
        let state = SolverState::new(&problem);
        let mut rng = ChaCha8Rng::seed_from_u64(53);
        let outcome = IteratedLocalSearch::new(Duration::from_secs(20))
            .run(state, &mut rng)
            .unwrap();
        assert_eq!(outcome.best.grade().total, 0);
    }
}
