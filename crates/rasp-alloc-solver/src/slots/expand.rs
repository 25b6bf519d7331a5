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

use crate::err::ExpansionError;
use rasp_alloc_core::prelude::TermDate;
use rasp_alloc_model::prelude::{Problem, Rasp, Slot};

/// Expands a chosen anchor slot into the full ordered occurrence set of
/// the rasp: for every recurrence day of the anchor, `duration`
/// consecutive hours starting at the slot's hour.
///
/// Fails when the expansion table has no entry for the anchor; callers
/// must draw anchors from the rasp's legal anchor list.
pub fn occurrences(problem: &Problem, rasp: &Rasp, slot: &Slot) -> Result<Vec<TermDate>, ExpansionError> {
    let days = problem
        .recurrence_table()
        .expansion(rasp.recurrence_class(), slot.anchor())
        .ok_or_else(|| ExpansionError::new(rasp.id(), slot.anchor()))?;

    let mut dates = Vec::with_capacity(days.len() * rasp.duration());
    for day in days {
        for hour in slot.hour..slot.hour + rasp.duration() {
            dates.push(day.at_hour(hour));
        }
    }
    Ok(dates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use rasp_alloc_model::prelude::RoomIdentifier;

    #[test]
    fn test_expansion_covers_every_recurrence_day() {
        let problem = fixtures::problem();
        let rasp = &problem.rasps()[0];
        let slot = Slot::new(RoomIdentifier::new(0), 0, 1, 3);

        // Week-0 anchors recur in both weeks; duration 2 doubles the hours.
        let dates = occurrences(&problem, rasp, &slot).unwrap();
        assert_eq!(
            dates,
            vec![
                TermDate::new(0, 1, 3),
                TermDate::new(0, 1, 4),
                TermDate::new(1, 1, 3),
                TermDate::new(1, 1, 4),
            ]
        );
    }

    #[test]
    fn test_unknown_anchor_fails_fast() {
        let problem = fixtures::problem();
        let rasp = &problem.rasps()[0];
        let slot = Slot::new(RoomIdentifier::new(0), 1, 9, 0);
        let err = occurrences(&problem, rasp, &slot).unwrap_err();
        assert_eq!(err.rasp(), rasp.id());
        assert_eq!(err.anchor(), slot.anchor());
    }
}
