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

//! The remote collaborators a study session depends on. Choosing which words
//! are due, and updating mastery after a review, both happen on the backend.

pub mod http;
pub mod offline;

use crate::error::Fallible;
use crate::types::rating::DifficultyRating;
use crate::types::word::DueWords;
use crate::types::word::WordId;

/// Supplies the words due for review.
pub trait WordSource {
    async fn fetch_due_words(&self) -> Fallible<DueWords>;
}

/// Receives the user's rating for a reviewed word.
pub trait ProgressTracker {
    async fn update_word_progress(
        &self,
        word_id: &WordId,
        rating: DifficultyRating,
    ) -> Fallible<()>;
}
