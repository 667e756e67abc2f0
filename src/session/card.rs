// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

/// Which side of the current card is visible.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Side {
    /// The headword and pronunciation.
    Question,
    /// The definitions and examples.
    Answer,
}

/// Reveal state of the card being studied.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct CardState {
    revealed: bool,
}

impl CardState {
    pub fn reveal(&mut self) {
        self.revealed = true;
    }

    pub fn reset(&mut self) {
        self.revealed = false;
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn side(&self) -> Side {
        if self.revealed {
            Side::Answer
        } else {
            Side::Question
        }
    }
}
