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

use rasp_alloc_core::prelude::AnchorDay;
use std::collections::HashMap;

/// Precomputed recurrence expansions, shared by every rasp of the same
/// frequency class. For an anchor day the entry lists, in order, every
/// (week, day) the activity recurs on.
///
/// Exogenous, read-only input; deriving it from calendar rule strings is
/// an upstream concern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecurrenceTable {
    classes: Vec<HashMap<AnchorDay, Vec<AnchorDay>>>,
}

impl RecurrenceTable {
    pub fn new(classes: Vec<HashMap<AnchorDay, Vec<AnchorDay>>>) -> Self {
        Self { classes }
    }

    #[inline]
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// The recurrence days of `class` anchored at `anchor`, or `None` when
    /// the table has no entry for that anchor.
    #[inline]
    pub fn expansion(&self, class: usize, anchor: AnchorDay) -> Option<&[AnchorDay]> {
        self.classes
            .get(class)
            .and_then(|c| c.get(&anchor))
            .map(Vec::as_slice)
    }

    #[inline]
    pub fn has_expansion(&self, class: usize, anchor: AnchorDay) -> bool {
        self.expansion(class, anchor).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[inline]
    fn ad(w: usize, d: usize) -> AnchorDay {
        AnchorDay::new(w, d)
    }

    fn weekly_two_weeks() -> RecurrenceTable {
        let mut class = HashMap::new();
        for day in 0..5 {
            class.insert(ad(0, day), vec![ad(0, day), ad(1, day)]);
            class.insert(ad(1, day), vec![ad(1, day)]);
        }
        RecurrenceTable::new(vec![class])
    }

    #[test]
    fn test_expansion_lookup() {
        let table = weekly_two_weeks();
        assert_eq!(table.class_count(), 1);
        assert_eq!(table.expansion(0, ad(0, 2)), Some(&[ad(0, 2), ad(1, 2)][..]));
        assert_eq!(table.expansion(0, ad(1, 2)), Some(&[ad(1, 2)][..]));
    }

    #[test]
    fn test_missing_anchor_and_class() {
        let table = weekly_two_weeks();
        assert!(!table.has_expansion(0, ad(2, 0)));
        assert!(!table.has_expansion(1, ad(0, 0)));
    }
}
