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

use std::io::Write;

use serde::Serialize;

use crate::backend::WordSource;
use crate::error::Fallible;
use crate::session::deck::DeckOrigin;
use crate::session::deck::FallbackPolicy;
use crate::session::deck::load_deck;
use crate::types::word::Word;

#[derive(Serialize)]
struct DueReport<'a> {
    /// Whether these are the sample words rather than the backend's.
    fallback: bool,
    count: usize,
    words: &'a [Word],
}

/// Prints the deck a session would study, as JSON.
pub async fn print_due<S: WordSource, W: Write>(
    source: &S,
    policy: FallbackPolicy,
    mut output: W,
) -> Fallible<()> {
    let deck = load_deck(source, policy).await;
    let report = DueReport {
        fallback: deck.origin() == DeckOrigin::Fallback,
        count: deck.len(),
        words: deck.words(),
    };
    let json = serde_json::to_string_pretty(&report)?;
    writeln!(output, "{json}")?;
    Ok(())
}
