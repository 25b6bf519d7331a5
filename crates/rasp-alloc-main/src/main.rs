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

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rasp_alloc_model::prelude::{Solution, StateLoader};
use rasp_alloc_solver::prelude::{
    Grasp, IteratedLocalSearch, RepeatedLocalSearch, SimulatedAnnealing, SolverState,
    VariableNeighborhoodSearch,
};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

const ALGORITHMS: &[&str] = &["vns", "sa", "rls", "ils", "grasp"];
const DEFAULT_STATE_PATH: &str = "database/state.json";
const DEFAULT_SOLUTION_PATH: &str = "database/solution.json";
const DEFAULT_SEED: u64 = 0xC0FF_EE00_D15E_A5ED;

struct Args {
    algorithm: String,
    time_limit: Duration,
    state_path: String,
    solution_path: String,
    seed: u64,
}

fn usage() -> String {
    format!(
        "usage: rasp-alloc <{}> <seconds> [state.json] [solution.json] [seed]",
        ALGORITHMS.join("|")
    )
}

fn parse_args() -> Result<Args, String> {
    let mut args = std::env::args().skip(1);
    let algorithm = args.next().ok_or_else(usage)?;
    if !ALGORITHMS.contains(&algorithm.as_str()) {
        return Err(format!(
            "first argument must be one of {:?}, got '{algorithm}'",
            ALGORITHMS
        ));
    }
    let seconds: f64 = args
        .next()
        .ok_or_else(usage)?
        .parse()
        .map_err(|e| format!("second argument must be a number of seconds: {e}"))?;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err("second argument must be a non-negative number of seconds".to_owned());
    }
    let state_path = args.next().unwrap_or_else(|| DEFAULT_STATE_PATH.to_owned());
    let solution_path = args
        .next()
        .unwrap_or_else(|| DEFAULT_SOLUTION_PATH.to_owned());
    let seed = match args.next() {
        Some(raw) => raw
            .parse()
            .map_err(|e| format!("seed must be an unsigned integer: {e}"))?,
        None => DEFAULT_SEED,
    };
    Ok(Args {
        algorithm,
        time_limit: Duration::from_secs_f64(seconds),
        state_path,
        solution_path,
        seed,
    })
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = parse_args()?;

    let loaded = StateLoader.from_path(&args.state_path)?;
    tracing::info!(
        rasps = loaded.problem.rasp_count(),
        rooms = loaded.problem.rooms().len(),
        assignments = loaded.assignments.len(),
        "loaded state"
    );
    let state = SolverState::with_assignments(&loaded.problem, &loaded.assignments)?;

    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let started = Instant::now();
    let outcome = match args.algorithm.as_str() {
        "vns" => VariableNeighborhoodSearch::new(args.time_limit).run(state, &mut rng)?,
        "sa" => SimulatedAnnealing::new(args.time_limit).run(state, &mut rng)?,
        "rls" => RepeatedLocalSearch::new(args.time_limit).run(state, &mut rng)?,
        "ils" => IteratedLocalSearch::new(args.time_limit).run(state, &mut rng)?,
        _ => Grasp::new(args.time_limit).run(state, &mut rng)?,
    };

    tracing::info!(
        grade = %outcome.best.grade(),
        elapsed_secs = started.elapsed().as_secs_f64(),
        "search finished"
    );

    let solution = Solution::new(
        &loaded.problem,
        outcome.best.timetable(),
        outcome.best.grade(),
        outcome.tracker.samples(),
    );
    std::fs::write(&args.solution_path, solution.to_json()?)?;
    tracing::info!(path = %args.solution_path, "saved timetable");
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
