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

//! Reads a persisted state file into a validated [`Problem`] plus any
//! prior assignments. External string codes are interned into dense typed
//! identifiers; the reverse mapping is kept on the entities themselves.

use crate::problem::{
    baseline::OccupancySet,
    err::StateLoadError,
    prob::Problem,
    professor::{Professor, ProfessorIdentifier},
    rasp::{GroupIdentifier, Rasp, RaspIdentifier, SubjectIdentifier},
    recurrence::RecurrenceTable,
    room::{Room, RoomIdentifier},
    semester::{Semester, SemesterIdentifier},
    term::TermPlan,
};
use crate::solution::sol::Slot;
use chrono::NaiveDate;
use rasp_alloc_core::prelude::{AnchorDay, Grid3, TermDate};
use serde::Deserialize;
use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    fs::File,
    io::BufReader,
    path::Path,
};

type NestedGrid = Vec<Vec<Vec<u32>>>;

#[derive(Debug, Deserialize)]
struct StateFile {
    time_structure: TimeStructureFile,
    rooms: BTreeMap<String, RoomFile>,
    semesters: BTreeMap<String, SemesterFile>,
    rasps: Vec<RaspFile>,
    #[serde(default)]
    students_per_rasp: BTreeMap<String, i32>,
    #[serde(default)]
    initial_constraints: ConstraintsFile,
    rrule_table: Vec<Vec<ExpansionFile>>,
    #[serde(default)]
    timetable: BTreeMap<String, SlotFile>,
}

#[derive(Debug, Deserialize)]
struct TimeStructureFile {
    num_weeks: usize,
    num_days: usize,
    num_hours: usize,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
struct RoomFile {
    #[serde(default)]
    name: String,
    capacity: i32,
    has_computers: bool,
}

#[derive(Debug, Deserialize)]
struct SemesterFile {
    #[serde(default)]
    season: String,
    #[serde(default)]
    num_semester: i32,
    #[serde(default)]
    num_students: i32,
    #[serde(default)]
    study_programme_id: String,
}

#[derive(Debug, Deserialize)]
struct RaspFile {
    id: String,
    subject_id: String,
    professor_id: String,
    #[serde(rename = "type")]
    kind: String,
    duration: usize,
    #[serde(default)]
    mandatory_in_semester_ids: Vec<String>,
    #[serde(default)]
    optional_in_semester_ids: Vec<String>,
    #[serde(default)]
    needs_computers: bool,
    #[serde(default)]
    fix_at_room_id: Option<String>,
    #[serde(default)]
    fixed_hour: Option<usize>,
    rrule_table_index: usize,
    dtstart_weekdays: Vec<(usize, usize)>,
}

#[derive(Debug, Default, Deserialize)]
struct ConstraintsFile {
    #[serde(default)]
    rooms_occupied: BTreeMap<String, NestedGrid>,
    #[serde(default)]
    profs_occupied: BTreeMap<String, NestedGrid>,
    #[serde(default)]
    sems_occupied: BTreeMap<String, NestedGrid>,
    #[serde(default)]
    optionals_occupied: BTreeMap<String, NestedGrid>,
    #[serde(default)]
    sems_collisions: BTreeMap<String, NestedGrid>,
}

#[derive(Debug, Deserialize)]
struct ExpansionFile {
    anchor: (usize, usize),
    dates: Vec<(usize, usize)>,
}

#[derive(Debug, Deserialize)]
struct SlotFile {
    room_id: String,
    week: usize,
    day: usize,
    hour: usize,
}

/// A loaded problem plus the assignments the file already carried. The
/// assignments are meant to be replayed through the taxation engine so the
/// grade/grid invariants hold by construction.
#[derive(Debug, Clone)]
pub struct LoadedState {
    pub problem: Problem,
    pub assignments: Vec<(RaspIdentifier, Slot)>,
}

#[derive(Debug, Clone, Default)]
pub struct StateLoader;

impl StateLoader {
    pub fn from_path(&self, path: impl AsRef<Path>) -> Result<LoadedState, StateLoadError> {
        let file = File::open(path)?;
        self.from_reader(BufReader::new(file))
    }

    pub fn from_reader(&self, reader: impl std::io::Read) -> Result<LoadedState, StateLoadError> {
        let state: StateFile = serde_json::from_reader(reader)?;
        build(state)
    }

    pub fn from_json_str(&self, json: &str) -> Result<LoadedState, StateLoadError> {
        let state: StateFile = serde_json::from_str(json)?;
        build(state)
    }
}

fn build(state: StateFile) -> Result<LoadedState, StateLoadError> {
    let term = TermPlan::new(
        state.time_structure.num_weeks,
        state.time_structure.num_days,
        state.time_structure.num_hours,
        state.time_structure.start_date,
        state.time_structure.end_date,
    );

    // Rooms and semesters intern in sorted code order.
    let mut room_ids: HashMap<String, RoomIdentifier> = HashMap::new();
    let mut rooms = Vec::with_capacity(state.rooms.len());
    for (code, room) in &state.rooms {
        let id = RoomIdentifier::new(rooms.len() as u32);
        room_ids.insert(code.clone(), id);
        rooms.push(Room::new(
            id,
            code.clone(),
            room.name.clone(),
            room.capacity,
            room.has_computers,
        ));
    }

    let mut semester_ids: HashMap<String, SemesterIdentifier> = HashMap::new();
    let mut semesters = Vec::with_capacity(state.semesters.len());
    for (code, sem) in &state.semesters {
        let id = SemesterIdentifier::new(semesters.len() as u32);
        semester_ids.insert(code.clone(), id);
        semesters.push(Semester::new(
            id,
            code.clone(),
            sem.season.clone(),
            sem.num_semester,
            sem.num_students,
            sem.study_programme_id.clone(),
        ));
    }

    // Professors are derived: whoever teaches a rasp or appears in the
    // baseline bookings.
    let professor_codes: BTreeSet<&str> = state
        .rasps
        .iter()
        .map(|r| r.professor_id.as_str())
        .chain(
            state
                .initial_constraints
                .profs_occupied
                .keys()
                .map(String::as_str),
        )
        .collect();
    let mut professor_ids: HashMap<String, ProfessorIdentifier> = HashMap::new();
    let mut professors = Vec::with_capacity(professor_codes.len());
    for code in professor_codes {
        let id = ProfessorIdentifier::new(professors.len() as u32);
        professor_ids.insert(code.to_owned(), id);
        professors.push(Professor::new(id, code));
    }

    let subject_codes: BTreeSet<&str> = state.rasps.iter().map(|r| r.subject_id.as_str()).collect();
    let mut subject_ids: HashMap<String, SubjectIdentifier> = HashMap::new();
    for code in subject_codes {
        let id = SubjectIdentifier::new(subject_ids.len() as u32);
        subject_ids.insert(code.to_owned(), id);
    }

    // A group is one subject × activity-type; its members are every
    // parallel variant of that teaching unit.
    let group_keys: BTreeSet<(&str, &str)> = state
        .rasps
        .iter()
        .map(|r| (r.subject_id.as_str(), r.kind.as_str()))
        .collect();
    let mut group_ids: HashMap<(String, String), GroupIdentifier> = HashMap::new();
    for (subject, kind) in group_keys {
        let id = GroupIdentifier::new(group_ids.len() as u32);
        group_ids.insert((subject.to_owned(), kind.to_owned()), id);
    }

    let mut rasps = Vec::with_capacity(state.rasps.len());
    let mut rasp_ids: HashMap<String, RaspIdentifier> = HashMap::new();
    let mut students = Vec::with_capacity(state.rasps.len());
    let mut groups: Vec<Vec<RaspIdentifier>> = vec![Vec::new(); group_ids.len()];
    let mut subject_group_sets: Vec<BTreeSet<GroupIdentifier>> =
        vec![BTreeSet::new(); subject_ids.len()];

    for file_rasp in &state.rasps {
        let id = RaspIdentifier::new(rasps.len() as u32);
        rasp_ids.insert(file_rasp.id.clone(), id);

        let subject = subject_ids[file_rasp.subject_id.as_str()];
        let professor = professor_ids[file_rasp.professor_id.as_str()];
        let group = group_ids[&(file_rasp.subject_id.clone(), file_rasp.kind.clone())];

        let fixed_room = match &file_rasp.fix_at_room_id {
            Some(code) => Some(*room_ids.get(code).ok_or_else(|| {
                StateLoadError::UnknownRoom {
                    rasp: file_rasp.id.clone(),
                    room: code.clone(),
                }
            })?),
            None => None,
        };
        let resolve_semesters = |codes: &[String]| -> Result<Vec<SemesterIdentifier>, StateLoadError> {
            codes
                .iter()
                .map(|code| {
                    semester_ids
                        .get(code)
                        .copied()
                        .ok_or_else(|| StateLoadError::UnknownSemester {
                            rasp: file_rasp.id.clone(),
                            semester: code.clone(),
                        })
                })
                .collect()
        };
        let mandatory = resolve_semesters(&file_rasp.mandatory_in_semester_ids)?;
        let optional = resolve_semesters(&file_rasp.optional_in_semester_ids)?;
        let anchor_days = file_rasp
            .dtstart_weekdays
            .iter()
            .map(|&(week, day)| AnchorDay::new(week, day))
            .collect();

        groups[group.index()].push(id);
        subject_group_sets[subject.index()].insert(group);
        students.push(
            state
                .students_per_rasp
                .get(&file_rasp.id)
                .copied()
                .unwrap_or(0),
        );
        rasps.push(Rasp::new(
            id,
            file_rasp.id.clone(),
            subject,
            professor,
            group,
            file_rasp.duration,
            mandatory,
            optional,
            file_rasp.needs_computers,
            fixed_room,
            file_rasp.fixed_hour,
            file_rasp.rrule_table_index,
            anchor_days,
        ));
    }
    let subject_groups: Vec<Vec<GroupIdentifier>> = subject_group_sets
        .into_iter()
        .map(|s| s.into_iter().collect())
        .collect();

    let recurrence_table = RecurrenceTable::new(
        state
            .rrule_table
            .iter()
            .map(|class| {
                class
                    .iter()
                    .map(|e| {
                        (
                            AnchorDay::new(e.anchor.0, e.anchor.1),
                            e.dates
                                .iter()
                                .map(|&(week, day)| AnchorDay::new(week, day))
                                .collect(),
                        )
                    })
                    .collect()
            })
            .collect(),
    );

    let mut baseline = OccupancySet::zeroed(
        rooms.len(),
        professors.len(),
        semesters.len(),
        term.num_weeks(),
        term.num_days(),
        term.num_hours(),
    );
    let missing = |family: &'static str, key: &String| StateLoadError::UnknownConstraintKey {
        family,
        key: key.clone(),
    };
    for (key, nested) in &state.initial_constraints.rooms_occupied {
        let id = *room_ids
            .get(key)
            .ok_or_else(|| missing("rooms_occupied", key))?;
        fill_grid("rooms_occupied", key, baseline.room_mut(id), nested, &term)?;
    }
    for (key, nested) in &state.initial_constraints.profs_occupied {
        let id = *professor_ids
            .get(key)
            .ok_or_else(|| missing("profs_occupied", key))?;
        fill_grid("profs_occupied", key, baseline.professor_mut(id), nested, &term)?;
    }
    for (key, nested) in &state.initial_constraints.sems_occupied {
        let id = *semester_ids
            .get(key)
            .ok_or_else(|| missing("sems_occupied", key))?;
        fill_grid("sems_occupied", key, baseline.mandatory_mut(id).0, nested, &term)?;
    }
    for (key, nested) in &state.initial_constraints.optionals_occupied {
        let id = *semester_ids
            .get(key)
            .ok_or_else(|| missing("optionals_occupied", key))?;
        fill_grid("optionals_occupied", key, baseline.elective_mut(id).1, nested, &term)?;
    }
    for (key, nested) in &state.initial_constraints.sems_collisions {
        let id = *semester_ids
            .get(key)
            .ok_or_else(|| missing("sems_collisions", key))?;
        fill_grid("sems_collisions", key, baseline.mandatory_mut(id).1, nested, &term)?;
    }

    let mut assignments = Vec::with_capacity(state.timetable.len());
    for (rasp_code, slot) in &state.timetable {
        let rasp = *rasp_ids
            .get(rasp_code)
            .ok_or_else(|| StateLoadError::UnknownTimetableRasp {
                rasp: rasp_code.clone(),
            })?;
        let room =
            *room_ids
                .get(&slot.room_id)
                .ok_or_else(|| StateLoadError::UnknownTimetableRoom {
                    rasp: rasp_code.clone(),
                    room: slot.room_id.clone(),
                })?;
        let duration = rasps[rasp.index()].duration();
        if slot.week >= term.num_weeks()
            || slot.day >= term.num_days()
            || !term.fits_hours(slot.hour, duration)
        {
            return Err(StateLoadError::TimetableSlotOutOfTerm {
                rasp: rasp_code.clone(),
            });
        }
        assignments.push((rasp, Slot::new(room, slot.week, slot.day, slot.hour)));
    }

    let problem = Problem::new(
        term,
        rooms,
        professors,
        semesters,
        rasps,
        students,
        groups,
        subject_groups,
        baseline,
        recurrence_table,
    )?;
    Ok(LoadedState {
        problem,
        assignments,
    })
}

fn fill_grid(
    family: &'static str,
    key: &str,
    grid: &mut Grid3,
    nested: &NestedGrid,
    term: &TermPlan,
) -> Result<(), StateLoadError> {
    let bad = || StateLoadError::BadGridShape {
        family,
        key: key.to_owned(),
    };
    if nested.len() != term.num_weeks() {
        return Err(bad());
    }
    for (week, days) in nested.iter().enumerate() {
        if days.len() != term.num_days() {
            return Err(bad());
        }
        for (day, hours) in days.iter().enumerate() {
            if hours.len() != term.num_hours() {
                return Err(bad());
            }
            for (hour, &count) in hours.iter().enumerate() {
                grid.set(TermDate::new(week, day, hour), count);
            }
        }
    }
    Ok(())
}
