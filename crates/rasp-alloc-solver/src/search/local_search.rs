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
    err::ExpansionError,
    search::{budget::TimeBudget, descent, tracker::ScoreTracker},
    state::solver_state::SolverState,
};
use rasp_alloc_model::prelude::RaspIdentifier;
use std::collections::HashSet;

/// First-improvement local search: commit improving single moves until
/// the timetable is perfect, no improving move exists, or time runs out.
///
/// `best_total` seeds the tracker threshold; `None` runs the descent
/// silently (used by perturbation passes). `restrict` limits the moves to
/// a subset of rasps.
pub fn local_search<R: rand::Rng>(
    state: &mut SolverState,
    best_total: Option<i32>,
    budget: &TimeBudget,
    tracker: &mut ScoreTracker,
    rng: &mut R,
    restrict: Option<&HashSet<RaspIdentifier>>,
) -> Result<(), ExpansionError> {
    let mut best_total = best_total;
    if tracker.is_empty() {
        if let Some(best) = best_total {
            tracker.record(0.0, best);
        }
    }
    tracing::debug!(elapsed = budget.elapsed_secs(), "starting local search");

    loop {
        if budget.expired() {
            break;
        }
        let improved =
            descent::find_better_neighbor(state, &mut best_total, budget, tracker, rng, restrict)?;
        if state.grade().total == 0 || !improved {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{self, rid, room};
    use rasp_alloc_model::prelude::Slot;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::time::Duration;

    #[test]
    fn test_local_search_reaches_a_perfect_timetable() {
        let problem = fixtures::problem();
        let mut state = SolverState::new(&problem);
        // Start from a deliberately colliding arrangement.
        state.place(rid(0), Slot::new(room(0), 0, 0, 0)).unwrap();
        state.place(rid(1), Slot::new(room(0), 0, 0, 0)).unwrap();
        state.place(rid(2), Slot::new(room(0), 0, 0, 0)).unwrap();
        state.place(rid(3), Slot::new(room(2), 0, 0, 0)).unwrap();
        assert!(state.grade().total < 0);

        let budget = TimeBudget::start(Duration::from_secs(30));
        let mut tracker = ScoreTracker::new();
        let start = state.grade().total;
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        local_search(&mut state, Some(start), &budget, &mut tracker, &mut rng, None).unwrap();

        // This tiny instance always relaxes to a conflict-free timetable.
        assert_eq!(state.grade().total, 0);
        assert!(state.grade().is_consistent());
        assert_eq!(tracker.last_best(), Some(0));
    }

    #[test]
    fn test_restricted_search_only_moves_the_subset() {
        let problem = fixtures::problem();
        let mut state = SolverState::new(&problem);
        state.place(rid(0), Slot::new(room(0), 0, 0, 0)).unwrap();
        state.place(rid(2), Slot::new(room(1), 0, 0, 0)).unwrap();
        let frozen_slot = state.slot_of(rid(0)).unwrap();

        let subset: HashSet<_> = [rid(2)].into_iter().collect();
        let budget = TimeBudget::start(Duration::from_secs(30));
        let mut tracker = ScoreTracker::new();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        local_search(&mut state, None, &budget, &mut tracker, &mut rng, Some(&subset)).unwrap();

        assert_eq!(state.slot_of(rid(0)), Some(frozen_slot));
        assert!(tracker.is_empty());
    }
}
