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

use rasp_alloc_core::prelude::TermDate;
use rasp_alloc_model::prelude::{Grade, RoomIdentifier, Slot};
use std::collections::HashSet;

/// Per-scan memo of slots known to be disqualifying, keyed by the two
/// independent failure dimensions: the date triple (room-independent
/// causes: professor and semester conflicts) and the room (date-
/// independent causes: capacity and equipment).
///
/// Candidates matching either dimension are skipped without a full grid
/// evaluation.
#[derive(Debug, Clone, Default)]
pub struct BannedSlots {
    dates: HashSet<TermDate>,
    rooms: HashSet<RoomIdentifier>,
}

impl BannedSlots {
    #[inline]
    pub fn skips(&self, slot: &Slot) -> bool {
        self.rooms.contains(&slot.room) || self.dates.contains(&slot.start_date())
    }

    /// Attributes a failed candidate to its cause. When professor plus
    /// semester score alone cannot beat the baseline, the date is hopeless
    /// in every room; when capacity plus equipment alone cannot, the room
    /// is hopeless at every date.
    pub fn attribute_failure(&mut self, slot: &Slot, candidate: &Grade, baseline: &Grade) {
        if candidate.professors + candidate.semesters <= baseline.total {
            self.dates.insert(slot.start_date());
        }
        if candidate.capacity + candidate.computers <= baseline.total {
            self.rooms.insert(slot.room);
        }
    }

    #[inline]
    pub fn banned_date_count(&self) -> usize {
        self.dates.len()
    }

    #[inline]
    pub fn banned_room_count(&self) -> usize {
        self.rooms.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(room: u32, week: usize, day: usize, hour: usize) -> Slot {
        Slot::new(RoomIdentifier::new(room), week, day, hour)
    }

    fn grade(
        total: i32,
        professors: i32,
        semesters: i32,
        capacity: i32,
        computers: i32,
    ) -> Grade {
        Grade {
            total,
            rooms: total - professors - semesters - capacity - computers,
            professors,
            capacity,
            computers,
            semesters,
        }
    }

    #[test]
    fn test_date_ban_applies_to_other_rooms() {
        let mut banned = BannedSlots::default();
        let baseline = grade(-60, 0, 0, 0, 0);
        // Professor conflicts alone already as bad as the baseline: the
        // date is the cause.
        let candidate = grade(-90, -60, 0, 0, 0);
        banned.attribute_failure(&slot(0, 0, 1, 2), &candidate, &baseline);

        assert_eq!(banned.banned_date_count(), 1);
        assert_eq!(banned.banned_room_count(), 0);
        assert!(banned.skips(&slot(5, 0, 1, 2)));
        assert!(!banned.skips(&slot(0, 0, 1, 3)));
    }

    #[test]
    fn test_room_ban_applies_to_other_dates() {
        let mut banned = BannedSlots::default();
        let baseline = grade(-30, 0, 0, 0, 0);
        // Capacity alone is disqualifying: the room is the cause.
        let candidate = grade(-30, 0, 0, -30, 0);
        banned.attribute_failure(&slot(2, 0, 0, 0), &candidate, &baseline);

        assert_eq!(banned.banned_room_count(), 1);
        assert!(banned.skips(&slot(2, 1, 4, 7)));
        assert!(!banned.skips(&slot(1, 0, 0, 0)));
    }

    #[test]
    fn test_better_candidate_is_not_banned() {
        let mut banned = BannedSlots::default();
        let baseline = grade(-90, 0, 0, 0, 0);
        let candidate = grade(-30, -30, 0, 0, 0);
        banned.attribute_failure(&slot(0, 0, 0, 0), &candidate, &baseline);
        assert_eq!(banned.banned_date_count(), 0);
        assert_eq!(banned.banned_room_count(), 0);
    }
}
