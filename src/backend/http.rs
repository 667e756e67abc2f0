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

use std::time::Duration;

use reqwest::Client;
use reqwest::RequestBuilder;
use serde::Serialize;

use crate::backend::ProgressTracker;
use crate::backend::WordSource;
use crate::config::ApiConfig;
use crate::error::Fallible;
use crate::types::rating::DifficultyRating;
use crate::types::word::DueWords;
use crate::types::word::WordId;

/// Talks to the vocabulary backend over JSON/HTTP.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
    token: Option<String>,
    words_path: String,
    progress_path: String,
}

#[derive(Serialize)]
struct ProgressUpdate<'a> {
    word_id: &'a WordId,
    difficulty: DifficultyRating,
}

impl HttpBackend {
    pub fn new(config: &ApiConfig) -> Fallible<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            words_path: config.words_path.clone(),
            progress_path: config.progress_path.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

impl WordSource for HttpBackend {
    async fn fetch_due_words(&self) -> Fallible<DueWords> {
        let url = self.url(&self.words_path);
        log::debug!("GET {url}");
        let response = self
            .authorize(self.client.get(&url))
            .send()
            .await?
            .error_for_status()?;
        let due: DueWords = response.json().await?;
        log::debug!("Backend returned {} words.", due.words.len());
        Ok(due)
    }
}

impl ProgressTracker for HttpBackend {
    async fn update_word_progress(
        &self,
        word_id: &WordId,
        rating: DifficultyRating,
    ) -> Fallible<()> {
        let url = self.url(&self.progress_path);
        log::debug!("POST {url} word={word_id} difficulty={}", rating.as_str());
        let body = ProgressUpdate {
            word_id,
            difficulty: rating,
        };
        self.authorize(self.client.post(&url))
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
