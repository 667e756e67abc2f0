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

use crate::session::card::CardState;

/// The lifecycle of a study session.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    /// The deck is being fetched. No card is shown.
    Loading,
    /// A card is being studied.
    Active { index: usize },
    /// Every card has been answered.
    Complete,
    /// The deck had no words.
    Empty,
}

/// Moves the cursor through the deck and owns the current card's reveal
/// state.
#[derive(Debug)]
pub struct Progression {
    phase: Phase,
    total: usize,
    card: CardState,
}

impl Progression {
    pub fn new() -> Self {
        Self {
            phase: Phase::Loading,
            total: 0,
            card: CardState::default(),
        }
    }

    /// Leaves `Loading` once the deck is known: `Active` on the first card,
    /// or `Empty` if there are none.
    pub fn start(&mut self, total: usize) -> Phase {
        if self.phase != Phase::Loading {
            log::warn!("Starting a session that is not loading ({:?}).", self.phase);
        }
        self.total = total;
        self.card.reset();
        self.phase = if total == 0 {
            Phase::Empty
        } else {
            Phase::Active { index: 0 }
        };
        self.phase
    }

    /// Moves past the current card. The caller must have classified the
    /// response for it first.
    pub fn advance(&mut self) -> Phase {
        match self.phase {
            Phase::Active { index } => {
                if index + 1 >= self.total {
                    self.phase = Phase::Complete;
                } else {
                    self.phase = Phase::Active { index: index + 1 };
                }
                self.card.reset();
            }
            phase => {
                log::warn!("Advancing a session with no active card ({phase:?}).");
            }
        }
        self.phase
    }

    /// Returns to `Loading`, forgetting the previous deck.
    pub fn reset(&mut self) {
        self.phase = Phase::Loading;
        self.total = 0;
        self.card.reset();
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn index(&self) -> Option<usize> {
        match self.phase {
            Phase::Active { index } => Some(index),
            _ => None,
        }
    }

    pub fn card(&self) -> &CardState {
        &self.card
    }

    pub fn card_mut(&mut self) -> &mut CardState {
        &mut self.card
    }
}

impl Default for Progression {
    fn default() -> Self {
        Self::new()
    }
}
