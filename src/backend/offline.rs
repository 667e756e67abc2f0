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
use crate::types::rating::DifficultyRating;
use crate::types::word::DueWords;
use crate::types::word::WordId;

/// A backend that never touches the network. It reports no due words, so
/// sessions run on the fallback deck, and it discards progress updates.
#[derive(Clone, Copy, Default)]
pub struct OfflineBackend;

impl WordSource for OfflineBackend {
    async fn fetch_due_words(&self) -> Fallible<DueWords> {
        Ok(DueWords::default())
    }
}

impl ProgressTracker for OfflineBackend {
    async fn update_word_progress(
        &self,
        word_id: &WordId,
        rating: DifficultyRating,
    ) -> Fallible<()> {
        log::debug!("offline: not sending {} for word {word_id}", rating.as_str());
        Ok(())
    }
}
