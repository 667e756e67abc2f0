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

use serde::Serialize;

use crate::session::stats::PerformanceTier;
use crate::session::stats::SessionStats;
use crate::types::rating::DifficultyRating;
use crate::types::timestamp::Timestamp;
use crate::types::word::WordId;

/// One answered card.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRecord {
    pub word_id: WordId,
    pub word: String,
    pub rating: DifficultyRating,
    pub correct: bool,
    pub reviewed_at: Timestamp,
}

/// The end-of-session report.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub total: usize,
    pub correct: usize,
    pub incorrect: usize,
    pub accuracy_percent: u32,
    pub performance: PerformanceTier,
    pub headline: &'static str,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<Timestamp>,
    pub reviews: Vec<ReviewRecord>,
}

impl SessionSummary {
    pub fn new(
        stats: &SessionStats,
        started_at: Option<Timestamp>,
        finished_at: Option<Timestamp>,
        reviews: Vec<ReviewRecord>,
    ) -> Self {
        let performance = stats.performance_tier();
        Self {
            total: stats.total(),
            correct: stats.correct(),
            incorrect: stats.incorrect(),
            accuracy_percent: stats.accuracy_percent(),
            performance,
            headline: performance.headline(),
            message: performance.message(),
            started_at,
            finished_at,
            reviews,
        }
    }

    /// Plain-text rendering for the terminal.
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        text.push_str(self.headline);
        text.push('\n');
        text.push_str(&format!("Words studied: {}\n", self.total));
        text.push_str(&format!("Correct: {}\n", self.correct));
        text.push_str(&format!("Needs review: {}\n", self.incorrect));
        text.push_str(&format!("Accuracy: {}%\n", self.accuracy_percent));
        text.push_str(self.message);
        text.push('\n');
        text
    }
}
