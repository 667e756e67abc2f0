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

use std::time::Instant;

use crate::backend::WordSource;
use crate::types::word::Definition;
use crate::types::word::DifficultyTier;
use crate::types::word::MasteryLevel;
use crate::types::word::Word;
use crate::types::word::WordId;

/// Where a deck's words came from.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DeckOrigin {
    Backend,
    Fallback,
}

/// What to do when the backend fails or has nothing due.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FallbackPolicy {
    /// Study the built-in sample deck instead.
    Enabled,
    /// Study nothing: the session ends up empty.
    Disabled,
}

/// The words of one session, in study order. Fixed once built.
#[derive(Clone, Debug)]
pub struct StudyDeck {
    origin: DeckOrigin,
    words: Vec<Word>,
}

impl StudyDeck {
    pub fn new(words: Vec<Word>) -> Self {
        Self {
            origin: DeckOrigin::Backend,
            words,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// The sample deck studied when the backend is unavailable.
    pub fn fallback() -> Self {
        Self {
            origin: DeckOrigin::Fallback,
            words: fallback_words(),
        }
    }

    pub fn origin(&self) -> DeckOrigin {
        self.origin
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn get(&self, index: usize) -> Option<&Word> {
        self.words.get(index)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Fetches the due words once. A failed fetch, or one with no usable words,
/// is absorbed according to `policy`; it is never reported to the caller.
pub async fn load_deck<S: WordSource>(source: &S, policy: FallbackPolicy) -> StudyDeck {
    log::debug!("Loading deck...");
    let start = Instant::now();
    let words = match source.fetch_due_words().await {
        Ok(due) => {
            let fetched = due.words.len();
            let words: Vec<Word> = due.words.into_iter().filter(Word::is_usable).collect();
            if words.len() < fetched {
                log::warn!(
                    "Dropped {} words with no headword or no definitions.",
                    fetched - words.len()
                );
            }
            words
        }
        Err(e) => {
            log::warn!("Failed to fetch due words: {e}");
            Vec::new()
        }
    };
    let deck = if !words.is_empty() {
        StudyDeck::new(words)
    } else {
        match policy {
            FallbackPolicy::Enabled => {
                log::debug!("No words from the backend, using the sample deck.");
                StudyDeck::fallback()
            }
            FallbackPolicy::Disabled => StudyDeck::empty(),
        }
    };
    let duration = start.elapsed().as_millis();
    log::debug!("Deck of {} words loaded in {duration}ms.", deck.len());
    deck
}

fn sample_word(
    id: u64,
    word: &str,
    definition: &str,
    example: &str,
    difficulty: DifficultyTier,
    mastery_level: u8,
    pronunciation: &str,
) -> Word {
    Word {
        id: WordId::new(id.to_string()),
        word: word.to_string(),
        definitions: vec![Definition {
            definition: definition.to_string(),
            example: Some(example.to_string()),
            part_of_speech: None,
        }],
        pronunciation: Some(pronunciation.to_string()),
        difficulty: Some(difficulty),
        mastery_level: MasteryLevel::try_from(mastery_level).unwrap_or_default(),
        next_review_date: None,
    }
}

fn fallback_words() -> Vec<Word> {
    vec![
        sample_word(
            1,
            "serendipity",
            "The occurrence of events by chance in a happy way",
            "It was pure serendipity that led me to find my dream job while browsing social media.",
            DifficultyTier::Intermediate,
            2,
            "/ˌserənˈdipədē/",
        ),
        sample_word(
            2,
            "ephemeral",
            "Lasting for a very short time",
            "The beauty of cherry blossoms is ephemeral, lasting only a few weeks each spring.",
            DifficultyTier::Advanced,
            1,
            "/əˈfem(ə)rəl/",
        ),
        sample_word(
            3,
            "ubiquitous",
            "Present, appearing, or found everywhere",
            "Smartphones have become ubiquitous in modern society.",
            DifficultyTier::Advanced,
            3,
            "/yo͞oˈbikwədəs/",
        ),
        sample_word(
            4,
            "mellifluous",
            "Sweet or musical; pleasant to hear",
            "The singer's mellifluous voice captivated the entire audience.",
            DifficultyTier::Advanced,
            1,
            "/məˈliflo͞oəs/",
        ),
        sample_word(
            5,
            "perspicacious",
            "Having keen insight; mentally sharp",
            "Her perspicacious analysis of the market trends impressed the board of directors.",
            DifficultyTier::Advanced,
            2,
            "/ˌpərspəˈkāSHəs/",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::WordSource;
    use crate::error::Fallible;
    use crate::error::fail;
    use crate::types::word::DueWords;

    enum StubSource {
        Words(Vec<Word>),
        Json(&'static str),
        Failing,
    }

    impl WordSource for StubSource {
        async fn fetch_due_words(&self) -> Fallible<DueWords> {
            match self {
                StubSource::Words(words) => Ok(DueWords {
                    words: words.clone(),
                }),
                StubSource::Json(json) => Ok(serde_json::from_str(json)?),
                StubSource::Failing => fail("connection refused"),
            }
        }
    }

    fn word(id: u64, headword: &str) -> Word {
        sample_word(id, headword, "a definition", "", DifficultyTier::Beginner, 0, "")
    }

    #[test]
    fn test_fallback_deck() {
        let deck = StudyDeck::fallback();
        assert_eq!(deck.len(), 5);
        assert_eq!(deck.origin(), DeckOrigin::Fallback);
        let headwords: Vec<&str> = deck.words().iter().map(|w| w.word.as_str()).collect();
        assert_eq!(
            headwords,
            vec![
                "serendipity",
                "ephemeral",
                "ubiquitous",
                "mellifluous",
                "perspicacious"
            ]
        );
        assert!(deck.words().iter().all(Word::is_usable));
        assert_eq!(deck.words()[2].mastery_level.value(), 3);
    }

    #[tokio::test]
    async fn test_backend_words_are_kept_in_order() {
        let source = StubSource::Words(vec![word(7, "laconic"), word(8, "terse")]);
        let deck = load_deck(&source, FallbackPolicy::Enabled).await;
        assert_eq!(deck.origin(), DeckOrigin::Backend);
        assert_eq!(deck.len(), 2);
        assert_eq!(deck.get(0).unwrap().word, "laconic");
        assert_eq!(deck.get(1).unwrap().word, "terse");
    }

    #[tokio::test]
    async fn test_failure_uses_fallback() {
        let deck = load_deck(&StubSource::Failing, FallbackPolicy::Enabled).await;
        assert_eq!(deck.origin(), DeckOrigin::Fallback);
        assert_eq!(deck.len(), 5);
    }

    #[tokio::test]
    async fn test_empty_response_uses_fallback() {
        let deck = load_deck(&StubSource::Words(Vec::new()), FallbackPolicy::Enabled).await;
        assert_eq!(deck.origin(), DeckOrigin::Fallback);
        assert_eq!(deck.len(), 5);
    }

    #[tokio::test]
    async fn test_without_fallback() {
        let deck = load_deck(&StubSource::Words(Vec::new()), FallbackPolicy::Disabled).await;
        assert!(deck.is_empty());
        let deck = load_deck(&StubSource::Failing, FallbackPolicy::Disabled).await;
        assert!(deck.is_empty());
        assert_eq!(deck.origin(), DeckOrigin::Backend);
    }

    #[tokio::test]
    async fn test_unusable_words_are_dropped() {
        let mut no_definitions = word(2, "bare");
        no_definitions.definitions.clear();
        let source = StubSource::Words(vec![word(1, "laconic"), no_definitions]);
        let deck = load_deck(&source, FallbackPolicy::Enabled).await;
        assert_eq!(deck.len(), 1);
        assert_eq!(deck.get(0).unwrap().word, "laconic");

        let source = StubSource::Words(vec![word(3, "   ")]);
        let deck = load_deck(&source, FallbackPolicy::Enabled).await;
        assert_eq!(deck.origin(), DeckOrigin::Fallback);
    }

    #[tokio::test]
    async fn test_malformed_word_keeps_backend_deck() {
        let source = StubSource::Json(
            r#"{"words": [
                {"id": 1, "word": "laconic", "definitions": [{"definition": "Using few words"}], "mastery_level": 2},
                {"id": 2, "word": "terse", "definitions": [{"definition": "Brief"}], "mastery_level": 7}
            ]}"#,
        );
        let deck = load_deck(&source, FallbackPolicy::Enabled).await;
        assert_eq!(deck.origin(), DeckOrigin::Backend);
        assert_eq!(deck.len(), 1);
        assert_eq!(deck.get(0).unwrap().word, "laconic");
    }
}
