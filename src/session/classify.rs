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

use crate::types::rating::DifficultyRating;

/// Whether a review counts as correct in the session statistics.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Outcome {
    pub is_correct: bool,
}

/// Maps a rating to a binary outcome.
///
/// `Easy` and `Medium` are correct; `Hard` is incorrect. The finer 0–5
/// mastery scale is the backend's business and is not reflected here.
pub fn classify(rating: DifficultyRating) -> Outcome {
    let is_correct = match rating {
        DifficultyRating::Easy => true,
        DifficultyRating::Medium => true,
        DifficultyRating::Hard => false,
    };
    Outcome { is_correct }
}
