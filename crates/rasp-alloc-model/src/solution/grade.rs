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

use serde::Serialize;

/// Decomposed timetable score. Every component is a punishment (≤ 0) and
/// `total` is always the sum of the five components; a perfect timetable
/// scores 0. Component-wise subtraction isolates the contribution of a
/// single placement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Grade {
    pub total: i32,
    pub rooms: i32,
    pub professors: i32,
    pub capacity: i32,
    pub computers: i32,
    pub semesters: i32,
}

impl Grade {
    #[inline]
    pub fn zero() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_perfect(&self) -> bool {
        self.total == 0
    }

    /// Whether `total` matches the component sum.
    #[inline]
    pub fn is_consistent(&self) -> bool {
        self.total
            == self.rooms + self.professors + self.capacity + self.computers + self.semesters
    }
}

impl std::ops::Sub for Grade {
    type Output = Grade;

    fn sub(self, rhs: Grade) -> Grade {
        Grade {
            total: self.total - rhs.total,
            rooms: self.rooms - rhs.rooms,
            professors: self.professors - rhs.professors,
            capacity: self.capacity - rhs.capacity,
            computers: self.computers - rhs.computers,
            semesters: self.semesters - rhs.semesters,
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "total: {} rooms: {} professors: {} capacity: {} computers: {} semesters: {}",
            self.total, self.rooms, self.professors, self.capacity, self.computers, self.semesters
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_perfect_and_consistent() {
        let g = Grade::zero();
        assert!(g.is_perfect());
        assert!(g.is_consistent());
    }

    #[test]
    fn test_subtraction_is_component_wise() {
        let a = Grade {
            total: -90,
            rooms: -30,
            professors: -60,
            capacity: 0,
            computers: 0,
            semesters: 0,
        };
        let b = Grade {
            total: -30,
            rooms: -30,
            professors: 0,
            capacity: 0,
            computers: 0,
            semesters: 0,
        };
        let d = a - b;
        assert_eq!(d.total, -60);
        assert_eq!(d.rooms, 0);
        assert_eq!(d.professors, -60);
        assert!(d.is_consistent());
    }
}
