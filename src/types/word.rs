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

use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde_json::Value;

use crate::error::ErrorReport;
use crate::error::fail;
use crate::types::timestamp::Timestamp;

/// The highest mastery level the backend assigns.
pub const MAX_MASTERY_LEVEL: u8 = 5;

/// Identifies a word in the backend. Ids arrive either as JSON numbers or as
/// strings, and are always serialized as strings.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(from = "RawWordId", into = "String")]
pub struct WordId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawWordId {
    Number(u64),
    Text(String),
}

impl From<RawWordId> for WordId {
    fn from(value: RawWordId) -> Self {
        match value {
            RawWordId::Number(n) => WordId(n.to_string()),
            RawWordId::Text(s) => WordId(s),
        }
    }
}

impl From<WordId> for String {
    fn from(value: WordId) -> Self {
        value.0
    }
}

impl WordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl Display for WordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How hard a word is considered to be. Purely descriptive: tiers are not
/// ordered and do not affect the session.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyTier {
    Beginner,
    Intermediate,
    Advanced,
}

impl DifficultyTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyTier::Beginner => "beginner",
            DifficultyTier::Intermediate => "intermediate",
            DifficultyTier::Advanced => "advanced",
        }
    }
}

/// The backend's 0–5 retention score for a word. Read-only to the session.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct MasteryLevel(u8);

impl MasteryLevel {
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for MasteryLevel {
    type Error = ErrorReport;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value > MAX_MASTERY_LEVEL {
            return fail(format!(
                "mastery level {value} is out of range (0-{MAX_MASTERY_LEVEL})."
            ));
        }
        Ok(MasteryLevel(value))
    }
}

impl From<MasteryLevel> for u8 {
    fn from(value: MasteryLevel) -> Self {
        value.0
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Definition {
    pub definition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(
        default,
        rename = "partOfSpeech",
        skip_serializing_if = "Option::is_none"
    )]
    pub part_of_speech: Option<String>,
}

impl Definition {
    /// The usage example, if there is a non-blank one. The backend stores a
    /// missing example as the empty string.
    pub fn example(&self) -> Option<&str> {
        self.example
            .as_deref()
            .map(str::trim)
            .filter(|example| !example.is_empty())
    }
}

/// A snapshot of a vocabulary word as delivered by the backend.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Word {
    pub id: WordId,
    /// The headword.
    pub word: String,
    #[serde(default)]
    pub definitions: Vec<Definition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<String>,
    #[serde(default, alias = "difficulty_level", alias = "difficultyLevel")]
    pub difficulty: Option<DifficultyTier>,
    #[serde(default, deserialize_with = "deserialize_mastery")]
    pub mastery_level: MasteryLevel,
    #[serde(
        default,
        alias = "nextReviewDate",
        skip_serializing_if = "Option::is_none"
    )]
    pub next_review_date: Option<Timestamp>,
}

impl Word {
    /// Whether the word can be shown as a card: it needs a headword and at
    /// least one definition.
    pub fn is_usable(&self) -> bool {
        !self.word.trim().is_empty() && !self.definitions.is_empty()
    }
}

/// A missing or null mastery level means the word has not been reviewed yet.
fn deserialize_mastery<'de, D>(deserializer: D) -> Result<MasteryLevel, D::Error>
where
    D: Deserializer<'de>,
{
    let level: Option<MasteryLevel> = Option::deserialize(deserializer)?;
    Ok(level.unwrap_or_default())
}

/// The body of the backend's due-words response.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DueWords {
    #[serde(default, deserialize_with = "deserialize_words")]
    pub words: Vec<Word>,
}

/// Parses each word on its own. A word that does not parse is dropped with a
/// warning and the rest of the list is kept.
fn deserialize_words<'de, D>(deserializer: D) -> Result<Vec<Word>, D::Error>
where
    D: Deserializer<'de>,
{
    let values: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    let mut words = Vec::new();
    for value in values.unwrap_or_default() {
        match serde_json::from_value::<Word>(value) {
            Ok(word) => words.push(word),
            Err(e) => log::warn!("Dropping malformed word: {e}"),
        }
    }
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;

    #[test]
    fn test_deserialize_backend_word() -> Fallible<()> {
        let json = r#"{
            "id": "x7Gq2",
            "word": "laconic",
            "definitions": [
                {"partOfSpeech": "adjective", "definition": "Using few words", "example": ""}
            ],
            "difficulty": null,
            "mastery_level": 4,
            "nextReviewDate": "2025-06-01T08:00:00Z"
        }"#;
        let word: Word = serde_json::from_str(json)?;
        assert_eq!(word.id, WordId::new("x7Gq2"));
        assert_eq!(word.word, "laconic");
        assert_eq!(word.definitions[0].example(), None);
        assert_eq!(
            word.definitions[0].part_of_speech.as_deref(),
            Some("adjective")
        );
        assert_eq!(word.difficulty, None);
        assert_eq!(word.mastery_level.value(), 4);
        assert!(word.next_review_date.is_some());
        assert!(word.is_usable());
        Ok(())
    }

    #[test]
    fn test_numeric_id_serializes_as_string() -> Fallible<()> {
        let word: Word = serde_json::from_str(
            r#"{"id": 3, "word": "ubiquitous", "definitions": [], "difficulty": "advanced"}"#,
        )?;
        assert_eq!(word.id.to_string(), "3");
        assert_eq!(word.difficulty, Some(DifficultyTier::Advanced));
        assert_eq!(word.mastery_level, MasteryLevel::default());
        let value = serde_json::to_value(&word)?;
        assert_eq!(value["id"], "3");
        Ok(())
    }

    #[test]
    fn test_mastery_level_out_of_range() {
        let result: Result<Word, _> =
            serde_json::from_str(r#"{"id": 1, "word": "x", "mastery_level": 6}"#);
        assert!(result.is_err());
        assert!(MasteryLevel::try_from(5).is_ok());
        assert!(MasteryLevel::try_from(6).is_err());
    }

    #[test]
    fn test_unusable_words() -> Fallible<()> {
        let no_definitions: Word = serde_json::from_str(r#"{"id": 1, "word": "x"}"#)?;
        assert!(!no_definitions.is_usable());
        let blank: Word = serde_json::from_str(
            r#"{"id": 2, "word": "  ", "definitions": [{"definition": "d"}]}"#,
        )?;
        assert!(!blank.is_usable());
        Ok(())
    }

    #[test]
    fn test_due_words_missing_list() -> Fallible<()> {
        let due: DueWords = serde_json::from_str("{}")?;
        assert!(due.words.is_empty());
        let due: DueWords = serde_json::from_str(r#"{"words": null}"#)?;
        assert!(due.words.is_empty());
        Ok(())
    }

    #[test]
    fn test_malformed_words_are_dropped_individually() -> Fallible<()> {
        let json = r#"{"words": [
            {"id": 1, "word": "laconic", "definitions": [{"definition": "terse"}], "mastery_level": 2},
            {"id": 2, "word": "terse", "definitions": [{"definition": "brief"}], "mastery_level": 7},
            {"id": 3, "word": "pithy", "definitions": [{"definition": "concise"}], "difficulty": "legendary"},
            {"word": "no id"},
            "not an object",
            {"id": 5, "word": "curt", "definitions": [{"definition": "rudely brief"}]}
        ]}"#;
        let due: DueWords = serde_json::from_str(json)?;
        let headwords: Vec<&str> = due.words.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(headwords, vec!["laconic", "curt"]);
        Ok(())
    }

    #[test]
    fn test_backend_word_response_shape() -> Fallible<()> {
        let json = r#"{
            "id": "w1",
            "user_id": "u1",
            "word": "laconic",
            "added_at": "2025-05-01T10:00:00",
            "source": "manual",
            "source_url": null,
            "definitions": [{"partOfSpeech": "adjective", "definition": "Using few words", "example": ""}],
            "phonetics": [{"text": "/ləˈkɒnɪk/", "audio": ""}],
            "synonyms": [],
            "antonyms": [],
            "user_notes": null,
            "is_favorite": false,
            "difficulty_level": "advanced",
            "mastery_level": null
        }"#;
        let word: Word = serde_json::from_str(json)?;
        assert_eq!(word.difficulty, Some(DifficultyTier::Advanced));
        assert_eq!(word.mastery_level.value(), 0);
        assert!(word.is_usable());

        let word: Word = serde_json::from_str(
            r#"{"id": "w2", "word": "terse", "definitions": [{"definition": "brief"}], "difficulty_level": null}"#,
        )?;
        assert_eq!(word.difficulty, None);
        assert_eq!(word.mastery_level, MasteryLevel::default());
        Ok(())
    }
}
