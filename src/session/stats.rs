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

use crate::error::Fallible;
use crate::error::fail;

/// Accuracy at or above which a session is excellent.
const EXCELLENT_THRESHOLD: u32 = 80;

/// Accuracy at or above which a session is good.
const GOOD_THRESHOLD: u32 = 60;

/// Outcome counters for one session.
///
/// Invariant: `correct + incorrect <= total`, with equality exactly when
/// every card has been answered.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct SessionStats {
    total: usize,
    correct: usize,
    incorrect: usize,
}

impl SessionStats {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            correct: 0,
            incorrect: 0,
        }
    }

    /// Counts one answered card.
    pub fn record(&mut self, is_correct: bool) -> Fallible<()> {
        if self.answered() >= self.total {
            return fail("every card in the session has already been answered.");
        }
        if is_correct {
            self.correct += 1;
        } else {
            self.incorrect += 1;
        }
        Ok(())
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn correct(&self) -> usize {
        self.correct
    }

    pub fn incorrect(&self) -> usize {
        self.incorrect
    }

    pub fn answered(&self) -> usize {
        self.correct + self.incorrect
    }

    pub fn remaining(&self) -> usize {
        self.total - self.answered()
    }

    /// `round(100 * correct / total)`, or zero for an empty session.
    pub fn accuracy_percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        // Integer round-half-up, so 1/8 gives 13 like `Math.round(12.5)`.
        let correct = self.correct as u64;
        let total = self.total as u64;
        ((200 * correct + total) / (2 * total)) as u32
    }

    pub fn performance_tier(&self) -> PerformanceTier {
        PerformanceTier::from_accuracy(self.accuracy_percent())
    }
}

/// Qualitative label for a finished session.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PerformanceTier {
    Excellent,
    Good,
    NeedsImprovement,
}

impl PerformanceTier {
    /// Thresholds are inclusive: 80 is excellent, 60 is good.
    pub fn from_accuracy(percent: u32) -> Self {
        if percent >= EXCELLENT_THRESHOLD {
            PerformanceTier::Excellent
        } else if percent >= GOOD_THRESHOLD {
            PerformanceTier::Good
        } else {
            PerformanceTier::NeedsImprovement
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PerformanceTier::Excellent => "excellent",
            PerformanceTier::Good => "good",
            PerformanceTier::NeedsImprovement => "needs-improvement",
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            PerformanceTier::Excellent => "Excellent Work!",
            PerformanceTier::Good => "Good Job!",
            PerformanceTier::NeedsImprovement => "Keep Practicing!",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            PerformanceTier::Excellent => {
                "Outstanding! You're mastering these words quickly. Keep up the great work!"
            }
            PerformanceTier::Good => {
                "Good progress! A few more reviews and you'll have these words mastered."
            }
            PerformanceTier::NeedsImprovement => {
                "Don't worry, learning takes time. Try reviewing these words again soon."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats_with(total: usize, correct: usize, incorrect: usize) -> SessionStats {
        let mut stats = SessionStats::new(total);
        for _ in 0..correct {
            stats.record(true).unwrap();
        }
        for _ in 0..incorrect {
            stats.record(false).unwrap();
        }
        stats
    }

    #[test]
    fn test_empty_session_accuracy_is_zero() {
        let mut stats = SessionStats::new(0);
        assert_eq!(stats.accuracy_percent(), 0);
        assert_eq!(stats.performance_tier(), PerformanceTier::NeedsImprovement);
        assert!(stats.record(true).is_err());
    }

    #[test]
    fn test_all_correct_is_one_hundred() {
        let stats = stats_with(4, 4, 0);
        assert_eq!(stats.accuracy_percent(), 100);
        assert_eq!(stats.performance_tier(), PerformanceTier::Excellent);
    }

    #[test]
    fn test_accuracy_rounds() {
        assert_eq!(stats_with(5, 3, 2).accuracy_percent(), 60);
        assert_eq!(stats_with(3, 1, 2).accuracy_percent(), 33);
        assert_eq!(stats_with(3, 2, 1).accuracy_percent(), 67);
        assert_eq!(stats_with(8, 1, 7).accuracy_percent(), 13);
        // Accuracy is over the total, not over the answered cards.
        assert_eq!(stats_with(4, 1, 0).accuracy_percent(), 25);
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(PerformanceTier::from_accuracy(59), PerformanceTier::NeedsImprovement);
        assert_eq!(PerformanceTier::from_accuracy(60), PerformanceTier::Good);
        assert_eq!(PerformanceTier::from_accuracy(79), PerformanceTier::Good);
        assert_eq!(PerformanceTier::from_accuracy(80), PerformanceTier::Excellent);
        assert_eq!(PerformanceTier::from_accuracy(0), PerformanceTier::NeedsImprovement);
        assert_eq!(PerformanceTier::from_accuracy(100), PerformanceTier::Excellent);
    }

    #[test]
    fn test_counts_never_exceed_total() {
        let mut stats = stats_with(2, 1, 1);
        assert_eq!(stats.remaining(), 0);
        let err = stats.record(true).err().unwrap();
        assert_eq!(
            err.to_string(),
            "error: every card in the session has already been answered."
        );
        assert_eq!(stats.answered(), 2);
    }

    #[test]
    fn test_remaining() {
        let stats = stats_with(5, 1, 1);
        assert_eq!(stats.remaining(), 3);
        assert_eq!(stats.correct(), 1);
        assert_eq!(stats.incorrect(), 1);
        assert_eq!(stats.total(), 5);
    }

    #[test]
    fn test_tier_serializes_kebab_case() {
        let json = serde_json::to_string(&PerformanceTier::NeedsImprovement).unwrap();
        assert_eq!(json, "\"needs-improvement\"");
    }
}
