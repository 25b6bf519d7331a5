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

/// One hour-granular occurrence inside a term, addressed as
/// (week, day-of-week, hour-of-day) indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TermDate {
    pub week: usize,
    pub day: usize,
    pub hour: usize,
}

impl TermDate {
    #[inline]
    pub fn new(week: usize, day: usize, hour: usize) -> Self {
        Self { week, day, hour }
    }

    #[inline]
    pub fn anchor(&self) -> AnchorDay {
        AnchorDay::new(self.week, self.day)
    }
}

impl std::fmt::Display for TermDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(w{} d{} h{})", self.week, self.day, self.hour)
    }
}

/// A (week, day-of-week) pair without an hour, used as the anchor key of a
/// recurrence expansion and as the legal start day of an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnchorDay {
    pub week: usize,
    pub day: usize,
}

impl AnchorDay {
    #[inline]
    pub fn new(week: usize, day: usize) -> Self {
        Self { week, day }
    }

    #[inline]
    pub fn at_hour(&self, hour: usize) -> TermDate {
        TermDate::new(self.week, self.day, hour)
    }
}

impl std::fmt::Display for AnchorDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(w{} d{})", self.week, self.day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_projection() {
        let d = TermDate::new(3, 1, 7);
        assert_eq!(d.anchor(), AnchorDay::new(3, 1));
        assert_eq!(d.anchor().at_hour(7), d);
    }

    #[test]
    fn test_equality_is_field_wise() {
        assert_eq!(TermDate::new(0, 0, 0), TermDate::new(0, 0, 0));
        assert_ne!(TermDate::new(0, 0, 0), TermDate::new(0, 0, 1));
        assert_ne!(AnchorDay::new(1, 2), AnchorDay::new(2, 1));
    }
}
