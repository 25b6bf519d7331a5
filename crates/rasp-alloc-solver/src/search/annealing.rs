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
    diagnose,
    err::ExpansionError,
    search::{budget::TimeBudget, descent, restart, tracker::ScoreTracker, SearchOutcome},
    slots::{banned::BannedSlots, candidates, expand},
    state::solver_state::SolverState,
};
use rasp_alloc_model::prelude::{Grade, RaspIdentifier, Slot};
use std::collections::HashSet;
use std::time::Duration;

const COOLING: f64 = 0.99;
const MIN_TEMPERATURE: f64 = 0.001;

/// Metropolis-style acceptance over punishment magnitudes: certain for a
/// strict improvement, otherwise falling exponentially with how much
/// worse the candidate is relative to the temperature.
fn acceptance_probability(old_total: i32, new_total: i32, temperature: f64) -> f64 {
    let old = old_total.abs();
    let new = new_total.abs();
    if new < old {
        1.0
    } else if temperature <= 0.0 {
        0.0
    } else {
        (f64::from(old - new) / temperature).exp()
    }
}

/// First candidate slot whose acceptance probability beats a uniform
/// draw, with the usual banned-slot pruning.
fn annealing_descent<R: rand::Rng>(
    state: &SolverState,
    rasp: RaspIdentifier,
    baseline: &Grade,
    temperature: f64,
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
        let draw: f64 = rng.random();
        if acceptance_probability(baseline.total, candidate.total, temperature) >= draw {
            return Ok(Some(slot));
        }
        banned.attribute_failure(&slot, &candidate, baseline);
    }
    Ok(None)
}

/// One annealing step: re-place a problematic rasp through the
/// probabilistic descent, cooling after every non-improving move.
/// Reports whether the walk hit a local optimum (no problematic rasp
/// left to move).
fn next_neighbor<R: rand::Rng>(
    state: &mut SolverState,
    temperature: &mut f64,
    current_best: &mut Option<i32>,
    budget: &TimeBudget,
    tracker: &mut ScoreTracker,
    rng: &mut R,
) -> Result<bool, ExpansionError> {
    let mut tabu: HashSet<RaspIdentifier> = HashSet::new();
    let mut local_optimum = false;
    let old_total = state.grade().total;

    loop {
        if budget.expired() {
            break;
        }
        let Some(rasp) = diagnose::random_problematic_rasp(state, &tabu, None, rng) else {
            local_optimum = true;
            break;
        };
        let Some(removed) = state.unplace(rasp) else {
            break;
        };
        let chosen = annealing_descent(state, rasp, &removed.marginal, *temperature, rng)?;
        descent::update_tabu(&mut tabu, rasp, chosen.is_some());
        state.place(rasp, chosen.unwrap_or(removed.slot))?;

        if state.grade().total > old_total {
            let total = state.grade().total;
            if current_best.is_none_or(|best| total > best) {
                *current_best = Some(total);
                tracker.record(budget.elapsed_secs(), total);
                tracing::info!(
                    elapsed = budget.elapsed_secs(),
                    temperature = *temperature,
                    grade = %state.grade(),
                    "annealing improved best"
                );
            }
            break;
        }
        *temperature *= COOLING;
        if *temperature < MIN_TEMPERATURE {
            *temperature = 0.0;
        }
    }
    Ok(local_optimum)
}

fn run_annealing<R: rand::Rng>(
    state: &mut SolverState,
    initial_temperature: f64,
    current_best: Option<i32>,
    budget: &TimeBudget,
    tracker: &mut ScoreTracker,
    rng: &mut R,
) -> Result<(), ExpansionError> {
    let mut current_best = current_best;
    if tracker.is_empty() {
        if let Some(best) = current_best {
            tracker.record(0.0, best);
        }
    }
    tracing::debug!(elapsed = budget.elapsed_secs(), "started annealing walk");
    let mut temperature = initial_temperature;
    loop {
        if budget.expired() {
            break;
        }
        let local_optimum = next_neighbor(
            state,
            &mut temperature,
            &mut current_best,
            budget,
            tracker,
            rng,
        )?;
        if state.grade().total == 0 || local_optimum {
            break;
        }
    }
    Ok(())
}

/// Simulated annealing over fully random restarts. Each restart walks
/// with a fresh geometric temperature schedule until it freezes into a
/// local optimum or the timetable is perfect.
#[derive(Debug, Clone)]
pub struct SimulatedAnnealing {
    time_limit: Duration,
    initial_temperature: f64,
}

impl SimulatedAnnealing {
    pub fn new(time_limit: Duration) -> Self {
        Self {
            time_limit,
            initial_temperature: 100_000.0,
        }
    }

    pub fn with_initial_temperature(mut self, temperature: f64) -> Self {
        self.initial_temperature = temperature.max(0.0);
        self
    }

    #[tracing::instrument(level = "info", name = "SA", skip(self, state, rng))]
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
            restart::random_timetable(&mut state, rng)?;
            if best_total.is_none() {
                best_total = Some(state.grade().total);
            }
            run_annealing(
                &mut state,
                self.initial_temperature,
                best_total,
                &budget,
                &mut tracker,
                rng,
            )?;

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
    fn test_acceptance_probability_model() {
        // Strict improvement is always accepted.
        assert_eq!(acceptance_probability(-90, -30, 5.0), 1.0);
        // Equal magnitudes at positive temperature are accepted too.
        assert_eq!(acceptance_probability(-30, -30, 5.0), 1.0);
        // Worsening moves decay with temperature.
        let warm = acceptance_probability(-30, -90, 100.0);
        let cold = acceptance_probability(-30, -90, 1.0);
        assert!(warm > cold);
        assert!(cold < 1e-6);
        // A frozen schedule rejects every worsening move.
        assert_eq!(acceptance_probability(-30, -90, 0.0), 0.0);
    }

    #[test]
    fn test_sa_with_zero_budget_returns_input() {
        let problem = fixtures::problem();
        let state = SolverState::new(&problem);
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let outcome = SimulatedAnnealing::new(Duration::ZERO)
            .run(state, &mut rng)
            .unwrap();
        assert!(outcome.best.timetable().is_empty());
        assert!(outcome.tracker.is_empty());
    }

    #[test]
    fn test_sa_solves_the_small_instance() {
        let problem = fixtures::problem();
        let state = SolverState::new(&problem);
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let outcome = SimulatedAnnealing::new(Duration::from_secs(20))
            .run(state, &mut rng)
            .unwrap();
        assert_eq!(outcome.best.grade().total, 0);
        assert_eq!(outcome.best.timetable().len(), problem.rasp_count());
    }
}
