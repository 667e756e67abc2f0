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
use std::io::BufRead;
use std::io::Write;

use clap::ValueEnum;

use crate::backend::ProgressTracker;
use crate::backend::WordSource;
use crate::error::Fallible;
use crate::error::fail;
use crate::session::card::Side;
use crate::session::controller::Phase;
use crate::session::deck::DeckOrigin;
use crate::session::study::StudySession;
use crate::types::rating::DifficultyRating;
use crate::types::word::MAX_MASTERY_LEVEL;
use crate::types::word::Word;

#[derive(ValueEnum, Clone, Copy)]
pub enum SummaryFormat {
    /// Plain text.
    Text,
    /// JSON output.
    Json,
}

impl Display for SummaryFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SummaryFormat::Text => write!(f, "text"),
            SummaryFormat::Json => write!(f, "json"),
        }
    }
}

/// Runs study sessions on a line-oriented terminal until the user stops or
/// the input ends.
pub async fn run_drill<B, R, W>(
    session: &mut StudySession<B>,
    mut input: R,
    mut output: W,
    format: SummaryFormat,
) -> Fallible<()>
where
    B: WordSource + ProgressTracker,
    R: BufRead,
    W: Write,
{
    writeln!(output, "Loading your study session...")?;
    session.load().await;
    loop {
        match session.phase() {
            Phase::Loading => {
                session.load().await;
            }
            Phase::Empty => {
                writeln!(output, "No words to study.")?;
                writeln!(
                    output,
                    "Add some words to your library or check back later!"
                )?;
                return Ok(());
            }
            Phase::Active { index } => {
                if index == 0 && session.deck().origin() == DeckOrigin::Fallback {
                    writeln!(output, "Studying the sample deck.")?;
                }
                if !study_card(session, &mut input, &mut output).await? {
                    writeln!(output, "Session ended.")?;
                    return Ok(());
                }
            }
            Phase::Complete => {
                print_summary(session, &mut output, format)?;
                writeln!(output, "Study more? [y/N]")?;
                match read_line(&mut input)? {
                    Some(answer) if answer.trim().eq_ignore_ascii_case("y") => {
                        writeln!(output, "Loading your study session...")?;
                        session.start_new_session().await;
                    }
                    _ => return Ok(()),
                }
            }
        }
    }
}

/// Shows the current card, waits for the reveal and a rating. Returns false
/// if the input ended.
async fn study_card<B, R, W>(
    session: &mut StudySession<B>,
    input: &mut R,
    output: &mut W,
) -> Fallible<bool>
where
    B: WordSource + ProgressTracker,
    R: BufRead,
    W: Write,
{
    let Some(word) = session.current_word().cloned() else {
        return fail("no card is active.");
    };
    let stats = *session.stats();
    if let Some(progress) = session.progress() {
        writeln!(
            output,
            "[{} of {}, {:.0}%] correct: {}, incorrect: {}, remaining: {}",
            progress.position,
            progress.total,
            progress.percent,
            stats.correct(),
            stats.incorrect(),
            stats.remaining()
        )?;
    }
    let mut shown = None;
    loop {
        let Some(side) = session.side() else {
            return fail("no card is active.");
        };
        if shown != Some(side) {
            match side {
                Side::Question => {
                    write_question(output, &word)?;
                    writeln!(output, "[press enter to reveal]")?;
                }
                Side::Answer => write_answer(output, &word)?,
            }
            shown = Some(side);
        }
        match side {
            Side::Question => {
                if read_line(input)?.is_none() {
                    return Ok(false);
                }
                session.reveal();
            }
            Side::Answer => {
                writeln!(output, "Rating: (1 = Hard, 2 = Medium, 3 = Easy, h = hide)")?;
                let Some(line) = read_line(input)? else {
                    return Ok(false);
                };
                if line.trim().eq_ignore_ascii_case("h") {
                    session.hide();
                    continue;
                }
                match DifficultyRating::try_from(line.as_str()) {
                    Ok(rating) => {
                        let outcome = session.respond(rating).await?;
                        if outcome.is_correct {
                            writeln!(output, "Correct.")?;
                        } else {
                            writeln!(output, "Needs review.")?;
                        }
                        writeln!(output)?;
                        return Ok(true);
                    }
                    Err(_) => {
                        writeln!(output, "Invalid input. Please enter 1, 2 or 3, or h to hide.")?;
                    }
                }
            }
        }
    }
}

fn write_question<W: Write>(output: &mut W, word: &Word) -> Fallible<()> {
    writeln!(output, "Q: {}", word.word)?;
    if let Some(pronunciation) = &word.pronunciation {
        if !pronunciation.is_empty() {
            writeln!(output, "   {pronunciation}")?;
        }
    }
    let mastery = format!("mastery {}/{MAX_MASTERY_LEVEL}", word.mastery_level.value());
    match word.difficulty {
        Some(tier) => writeln!(output, "   ({}, {mastery})", tier.as_str())?,
        None => writeln!(output, "   ({mastery})")?,
    }
    Ok(())
}

fn write_answer<W: Write>(output: &mut W, word: &Word) -> Fallible<()> {
    for (i, definition) in word.definitions.iter().enumerate() {
        match &definition.part_of_speech {
            Some(pos) => writeln!(output, "A{}: ({pos}) {}", i + 1, definition.definition)?,
            None => writeln!(output, "A{}: {}", i + 1, definition.definition)?,
        }
        if let Some(example) = definition.example() {
            writeln!(output, "    \"{example}\"")?;
        }
    }
    Ok(())
}

fn print_summary<B, W: Write>(
    session: &StudySession<B>,
    output: &mut W,
    format: SummaryFormat,
) -> Fallible<()> {
    let Some(summary) = session.summary() else {
        return fail("the session is not finished.");
    };
    match format {
        SummaryFormat::Text => write!(output, "{}", summary.to_text())?,
        SummaryFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            writeln!(output, "{json}")?;
        }
    }
    Ok(())
}

/// Reads one line, or `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> Fallible<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}
