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

use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rasp_alloc_core::prelude::AnchorDay;
use rasp_alloc_model::prelude::{
    GroupIdentifier, OccupancySet, Problem, Professor, ProfessorIdentifier, Rasp, RaspIdentifier,
    RecurrenceTable, Room, RoomIdentifier, Semester, SemesterIdentifier, Slot, SubjectIdentifier,
    TermPlan,
};
use rasp_alloc_solver::diagnose;
use rasp_alloc_solver::prelude::SolverState;
use rasp_alloc_solver::slots::{candidates, expand};
use std::collections::HashMap;
use std::hint::black_box;

const WEEKS: usize = 15;
const DAYS: usize = 5;
const HOURS: usize = 16;
const ROOMS: usize = 8;
const PROFESSORS: usize = 10;
const SEMESTERS: usize = 4;
const RASPS: usize = 40;

fn term_problem() -> Problem {
    let term = TermPlan::new(
        WEEKS,
        DAYS,
        HOURS,
        NaiveDate::from_ymd_opt(2025, 10, 6).unwrap(),
        NaiveDate::from_ymd_opt(2026, 1, 25).unwrap(),
    );

    let mut class = HashMap::new();
    for day in 0..DAYS {
        for week in 0..WEEKS {
            let anchor = AnchorDay::new(week, day);
            let dates = (week..WEEKS).map(|w| AnchorDay::new(w, day)).collect();
            class.insert(anchor, dates);
        }
    }
    let table = RecurrenceTable::new(vec![class]);
    let anchors: Vec<AnchorDay> = (0..DAYS).map(|day| AnchorDay::new(0, day)).collect();

    let rooms = (0..ROOMS)
        .map(|i| {
            Room::new(
                RoomIdentifier::new(i as u32),
                format!("R{i}"),
                format!("Room {i}"),
                if i % 3 == 0 { 30 } else { 120 },
                i % 2 == 0,
            )
        })
        .collect();
    let professors = (0..PROFESSORS)
        .map(|i| Professor::new(ProfessorIdentifier::new(i as u32), format!("P{i}")))
        .collect();
    let semesters = (0..SEMESTERS)
        .map(|i| {
            Semester::new(
                SemesterIdentifier::new(i as u32),
                format!("S{i}"),
                "winter",
                i as i32 + 1,
                50,
                "PROG",
            )
        })
        .collect();

    let mut rasps = Vec::with_capacity(RASPS);
    let mut groups: Vec<Vec<RaspIdentifier>> = vec![Vec::new(); RASPS];
    for i in 0..RASPS {
        let id = RaspIdentifier::new(i as u32);
        groups[i].push(id);
        rasps.push(Rasp::new(
            id,
            format!("rasp_{i}"),
            SubjectIdentifier::new((i % 12) as u32),
            ProfessorIdentifier::new((i % PROFESSORS) as u32),
            GroupIdentifier::new(i as u32),
            1 + i % 3,
            vec![SemesterIdentifier::new((i % SEMESTERS) as u32)],
            vec![],
            i % 4 == 0,
            None,
            None,
            0,
            anchors.clone(),
        ));
    }
    let mut subject_groups: Vec<Vec<GroupIdentifier>> = vec![Vec::new(); 12];
    for i in 0..RASPS {
        subject_groups[i % 12].push(GroupIdentifier::new(i as u32));
    }

    Problem::new(
        term,
        rooms,
        professors,
        semesters,
        rasps,
        vec![40; RASPS],
        groups,
        subject_groups,
        OccupancySet::zeroed(ROOMS, PROFESSORS, SEMESTERS, WEEKS, DAYS, HOURS),
        table,
    )
    .unwrap()
}

fn bench_place_unplace(c: &mut Criterion) {
    let problem = term_problem();
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let mut state = SolverState::new(&problem);
    for i in 0..RASPS {
        let rasp = RaspIdentifier::new(i as u32);
        let slot = candidates::random_slot(&problem, problem.rasp(rasp), &mut rng);
        state.place(rasp, slot).unwrap();
    }

    let rasp = RaspIdentifier::new(7);
    c.bench_function("unplace_then_place", |b| {
        b.iter(|| {
            let removed = state.unplace(black_box(rasp)).unwrap();
            state.place(rasp, removed.slot).unwrap();
            black_box(removed.marginal)
        })
    });
}

fn bench_candidate_grade(c: &mut Criterion) {
    let problem = term_problem();
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let mut state = SolverState::new(&problem);
    for i in 0..RASPS {
        let rasp = RaspIdentifier::new(i as u32);
        let slot = candidates::random_slot(&problem, problem.rasp(rasp), &mut rng);
        state.place(rasp, slot).unwrap();
    }

    let rasp = RaspIdentifier::new(11);
    let removed = state.unplace(rasp).unwrap();
    let groups = state.group_dates(rasp);
    let slot = Slot::new(RoomIdentifier::new(3), 0, 2, 4);
    let dates = expand::occurrences(&problem, problem.rasp(rasp), &slot).unwrap();

    c.bench_function("candidate_grade", |b| {
        b.iter(|| diagnose::candidate_grade(&state, black_box(rasp), &slot, &dates, &groups))
    });

    state.place(rasp, removed.slot).unwrap();
}

criterion_group!(benches, bench_place_unplace, bench_candidate_grade);
criterion_main!(benches);
