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
pub struct RoomIdentifierMarker;

impl IdentifierMarkerName for RoomIdentifierMarker {
    const NAME: &'static str = "RoomId";
}

pub type RoomIdentifier = Identifier<u32, RoomIdentifierMarker>;

/// A bookable room. `code` is the external identifier from the input data;
/// `id` is the dense internal index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    id: RoomIdentifier,
    code: String,
    name: String,
    capacity: i32,
    has_computers: bool,
}

impl Room {
    pub fn new(
        id: RoomIdentifier,
        code: impl Into<String>,
        name: impl Into<String>,
        capacity: i32,
        has_computers: bool,
    ) -> Self {
        Self {
            id,
            code: code.into(),
            name: name.into(),
            capacity,
            has_computers,
        }
    }

    #[inline]
    pub fn id(&self) -> RoomIdentifier {
        self.id
    }

    #[inline]
    pub fn code(&self) -> &str {
        &self.code
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    #[inline]
    pub fn has_computers(&self) -> bool {
        self.has_computers
    }
}

impl std::fmt::Display for Room {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Room {} ({}, capacity {}, computers: {})",
            self.code, self.name, self.capacity, self.has_computers
        )
    }
}
