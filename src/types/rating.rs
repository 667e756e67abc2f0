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

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::fail;

/// The user's self-assessment after revealing a card.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyRating {
    Hard,
    Medium,
    Easy,
}

impl DifficultyRating {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyRating::Hard => "hard",
            DifficultyRating::Medium => "medium",
            DifficultyRating::Easy => "easy",
        }
    }
}

/// Parses terminal input: either the key shown in the prompt or the name.
impl TryFrom<&str> for DifficultyRating {
    type Error = ErrorReport;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "1" | "hard" => Ok(DifficultyRating::Hard),
            "2" | "medium" => Ok(DifficultyRating::Medium),
            "3" | "easy" => Ok(DifficultyRating::Easy),
            other => fail(format!("invalid rating: {other}")),
        }
    }
}
