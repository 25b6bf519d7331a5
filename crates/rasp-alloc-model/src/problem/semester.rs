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

use crate::common::{Identifier, IdentifierMarkerName};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SemesterIdentifierMarker;

impl IdentifierMarkerName for SemesterIdentifierMarker {
    const NAME: &'static str = "SemesterId";
}

pub type SemesterIdentifier = Identifier<u32, SemesterIdentifierMarker>;

/// One semester of one study programme; activities are mandatory or
/// optional for a set of semesters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Semester {
    id: SemesterIdentifier,
    code: String,
    season: String,
    num_semester: i32,
    num_students: i32,
    study_programme: String,
}

impl Semester {
    pub fn new(
        id: SemesterIdentifier,
        code: impl Into<String>,
        season: impl Into<String>,
        num_semester: i32,
        num_students: i32,
        study_programme: impl Into<String>,
    ) -> Self {
        Self {
            id,
            code: code.into(),
            season: season.into(),
            num_semester,
            num_students,
            study_programme: study_programme.into(),
        }
    }

    #[inline]
    pub fn id(&self) -> SemesterIdentifier {
        self.id
    }

    #[inline]
    pub fn code(&self) -> &str {
        &self.code
    }

    #[inline]
    pub fn season(&self) -> &str {
        &self.season
    }

    #[inline]
    pub fn num_semester(&self) -> i32 {
        self.num_semester
    }

    #[inline]
    pub fn num_students(&self) -> i32 {
        self.num_students
    }

    #[inline]
    pub fn study_programme(&self) -> &str {
        &self.study_programme
    }
}
