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

use crate::backend::ProgressTracker;
use crate::backend::WordSource;
use crate::error::Fallible;
use crate::error::fail;
use crate::session::card::Side;
use crate::session::classify::Outcome;
use crate::session::classify::classify;
use crate::session::controller::Phase;
use crate::session::controller::Progression;
use crate::session::deck::FallbackPolicy;
use crate::session::deck::StudyDeck;
use crate::session::deck::load_deck;
use crate::session::stats::SessionStats;
use crate::session::summary::ReviewRecord;
use crate::session::summary::SessionSummary;
use crate::types::rating::DifficultyRating;
use crate::types::timestamp::Timestamp;
use crate::types::word::Word;

/// Proof that a deck load was started. Only the most recent ticket can
/// deliver a deck; results for older tickets are dropped.
#[must_use]
#[derive(Debug)]
pub struct LoadTicket {
    generation: u64,
}

/// Position of the current card, for progress display.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Progress {
    /// 1-based.
    pub position: usize,
    pub total: usize,
    pub percent: f64,
}

/// A study session: the deck, the cursor over it, and the running
/// statistics.
pub struct StudySession<B> {
    backend: B,
    policy: FallbackPolicy,
    deck: StudyDeck,
    progression: Progression,
    stats: SessionStats,
    reviews: Vec<ReviewRecord>,
    generation: u64,
    started_at: Option<Timestamp>,
    finished_at: Option<Timestamp>,
}

impl<B> StudySession<B> {
    pub fn new(backend: B, policy: FallbackPolicy) -> Self {
        Self {
            backend,
            policy,
            deck: StudyDeck::empty(),
            progression: Progression::new(),
            stats: SessionStats::default(),
            reviews: Vec::new(),
            generation: 0,
            started_at: None,
            finished_at: None,
        }
    }

    #[cfg(test)]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Discards the current session and enters `Loading`. Any load started
    /// before this one is superseded.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.progression.reset();
        self.deck = StudyDeck::empty();
        self.stats = SessionStats::default();
        self.reviews.clear();
        self.started_at = None;
        self.finished_at = None;
        LoadTicket {
            generation: self.generation,
        }
    }

    /// Installs the deck for `ticket`. Returns false, leaving the session
    /// untouched, if a newer load has been started since.
    pub fn finish_load(&mut self, ticket: LoadTicket, deck: StudyDeck) -> bool {
        if ticket.generation != self.generation {
            log::debug!(
                "Ignoring deck from superseded load {} (current is {}).",
                ticket.generation,
                self.generation
            );
            return false;
        }
        self.stats = SessionStats::new(deck.len());
        self.deck = deck;
        self.started_at = Some(Timestamp::now());
        self.progression.start(self.deck.len());
        if self.deck.is_empty() {
            log::debug!("No words due for review.");
        }
        true
    }

    pub fn phase(&self) -> Phase {
        self.progression.phase()
    }

    pub fn deck(&self) -> &StudyDeck {
        &self.deck
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    #[cfg(test)]
    pub fn reviews(&self) -> &[ReviewRecord] {
        &self.reviews
    }

    /// The word on the current card, if a card is active.
    pub fn current_word(&self) -> Option<&Word> {
        self.progression
            .index()
            .and_then(|index| self.deck.get(index))
    }

    /// The visible side of the current card, if a card is active.
    pub fn side(&self) -> Option<Side> {
        self.progression
            .index()
            .map(|_| self.progression.card().side())
    }

    pub fn progress(&self) -> Option<Progress> {
        let index = self.progression.index()?;
        let total = self.progression.total();
        Some(Progress {
            position: index + 1,
            total,
            percent: (index + 1) as f64 * 100.0 / total as f64,
        })
    }

    /// Shows the answer side of the current card.
    pub fn reveal(&mut self) {
        match self.progression.index() {
            Some(_) => self.progression.card_mut().reveal(),
            None => log::warn!("Revealing with no active card ({:?}).", self.phase()),
        }
    }

    /// Flips the current card back to the question side.
    pub fn hide(&mut self) {
        if self.progression.index().is_some() {
            self.progression.card_mut().reset();
        }
    }

    /// The report for a finished or empty session.
    pub fn summary(&self) -> Option<SessionSummary> {
        match self.phase() {
            Phase::Complete | Phase::Empty => Some(SessionSummary::new(
                &self.stats,
                self.started_at,
                self.finished_at,
                self.reviews.clone(),
            )),
            Phase::Loading | Phase::Active { .. } => None,
        }
    }
}

impl<B: WordSource> StudySession<B> {
    /// Fetches a deck and starts studying it.
    pub async fn load(&mut self) -> Phase {
        let ticket = self.begin_load();
        let deck = load_deck(&self.backend, self.policy).await;
        self.finish_load(ticket, deck);
        self.phase()
    }

    /// Throws away the current session, counters included, and loads a new
    /// deck.
    pub async fn start_new_session(&mut self) -> Phase {
        log::debug!("Starting a new session.");
        self.load().await
    }
}

impl<B: ProgressTracker> StudySession<B> {
    /// Answers the current card: classifies the rating, records it, reports
    /// it to the backend, and moves on. A failed report is logged and does not
    /// stop the session.
    pub async fn respond(&mut self, rating: DifficultyRating) -> Fallible<Outcome> {
        let Some(index) = self.progression.index() else {
            return fail("there is no card to answer.");
        };
        if !self.progression.card().is_revealed() {
            return fail("the card must be revealed before it is rated.");
        }
        let Some(word) = self.deck.get(index) else {
            return fail("the session cursor is past the end of the deck.");
        };
        let word_id = word.id.clone();
        let headword = word.word.clone();

        let outcome = classify(rating);
        self.stats.record(outcome.is_correct)?;
        log::debug!(
            "{headword} {} correct={} ({}/{})",
            rating.as_str(),
            outcome.is_correct,
            self.stats.answered(),
            self.stats.total()
        );

        if let Err(e) = self.backend.update_word_progress(&word_id, rating).await {
            log::warn!("Failed to update progress for word {word_id}: {e}");
        }

        self.reviews.push(ReviewRecord {
            word_id,
            word: headword,
            rating,
            correct: outcome.is_correct,
            reviewed_at: Timestamp::now(),
        });

        if self.progression.advance() == Phase::Complete {
            log::debug!(
                "Session completed: {}% ({})",
                self.stats.accuracy_percent(),
                self.stats.performance_tier().as_str()
            );
            self.finished_at = Some(Timestamp::now());
        }
        Ok(outcome)
    }
}
