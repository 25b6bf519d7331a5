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
use rasp_alloc_model::prelude::RaspIdentifier;

/// The recurrence table had no expansion for an anchor a rasp was placed
/// on. Anchors are supposed to come from the rasp's legal anchor list, so
/// this indicates corrupt or inconsistent upstream data, not a search
/// outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExpansionError {
    rasp: RaspIdentifier,
    anchor: AnchorDay,
}

impl ExpansionError {
    pub fn new(rasp: RaspIdentifier, anchor: AnchorDay) -> Self {
        Self { rasp, anchor }
    }

    pub fn rasp(&self) -> RaspIdentifier {
        self.rasp
    }

    pub fn anchor(&self) -> AnchorDay {
        self.anchor
    }
}

impl std::fmt::Display for ExpansionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "no recurrence expansion for {} anchored at {}",
            self.rasp, self.anchor
        )
    }
}

impl std::error::Error for ExpansionError {}
