//! Multiple-choice recognition quiz
//!
//! Lifecycle: `Setup -> Presenting -> Answered -> Presenting ... -> Completed`.
//! One round per tier emotion, each offering the correct name and three
//! distractors drawn from the whole catalog.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::{OPTIONS_PER_ROUND, SessionClock};
use crate::catalog::EmotionCatalog;
use crate::domain::{EmotionId, Tier};
use crate::stats::PerformanceRecord;

/// One quiz question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub target_emotion_id: EmotionId,
    /// The correct answer
    pub target_name: String,
    pub image_path: String,
    /// Distinct names, exactly one of them correct; order fixed once generated
    pub options: Vec<String>,
}

impl Round {
    pub fn is_correct(&self, answer: &str) -> bool {
        answer == self.target_name
    }
}

/// Current phase of a quiz session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    Setup,
    /// Current round shown, waiting for an answer
    Presenting,
    /// Current round answered, waiting for the caller to advance
    Answered { correct: bool },
    Completed,
}

/// Result of submitting an answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// Not presenting a round (already answered, finished or not started)
    Ignored,
    Correct,
    Incorrect { expected: String },
}

/// Result of moving past an answered round
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvanceOutcome {
    Ignored,
    NextRound,
    /// Last round done; emitted exactly once per session
    Completed(PerformanceRecord),
}

/// State machine for one recognition session
#[derive(Debug, Clone)]
pub struct RecognitionEngine {
    tier: Tier,
    phase: QuizPhase,
    rounds: Vec<Round>,
    current_round: usize,
    score: u32,
    streak: u32,
    max_streak: u32,
    selected_answer: Option<String>,
    clock: Option<SessionClock>,
    completion: Option<PerformanceRecord>,
}

impl RecognitionEngine {
    /// Create an engine in `Setup`
    pub fn new(tier: Tier) -> Self {
        Self {
            tier,
            phase: QuizPhase::Setup,
            rounds: Vec::new(),
            current_round: 0,
            score: 0,
            streak: 0,
            max_streak: 0,
            selected_answer: None,
            clock: None,
            completion: None,
        }
    }

    /// Create an engine and generate its rounds right away
    pub fn start<R: Rng + ?Sized>(tier: Tier, catalog: &EmotionCatalog, rng: &mut R) -> Self {
        let mut engine = Self::new(tier);
        engine.initialize(catalog, rng);
        engine
    }

    /// Generate one shuffled round per tier emotion
    ///
    /// Only valid in `Setup`; returns `false` when ignored.
    pub fn initialize<R: Rng + ?Sized>(&mut self, catalog: &EmotionCatalog, rng: &mut R) -> bool {
        if self.phase != QuizPhase::Setup {
            tracing::debug!("Quiz already generated, ignoring initialize");
            return false;
        }

        let mut rounds: Vec<Round> = catalog
            .emotions_for_tier(self.tier)
            .into_iter()
            .map(|emotion| {
                let mut options: Vec<String> = Vec::with_capacity(OPTIONS_PER_ROUND);
                options.push(emotion.name.clone());
                options.extend(
                    catalog
                        .sample_distractors(&emotion.id, OPTIONS_PER_ROUND - 1, rng)
                        .into_iter()
                        .map(|d| d.name.clone()),
                );
                options.shuffle(rng);

                Round {
                    target_emotion_id: emotion.id.clone(),
                    target_name: emotion.name.clone(),
                    image_path: emotion.image_path.clone(),
                    options,
                }
            })
            .collect();

        if rounds.is_empty() {
            tracing::warn!("No emotions for tier {}, quiz not started", self.tier);
            return false;
        }
        rounds.shuffle(rng);

        self.rounds = rounds;
        self.current_round = 0;
        self.score = 0;
        self.streak = 0;
        self.max_streak = 0;
        self.selected_answer = None;
        self.clock = Some(SessionClock::start());
        self.phase = QuizPhase::Presenting;

        tracing::debug!(
            "Generated quiz: tier={}, rounds={}",
            self.tier,
            self.rounds.len()
        );
        true
    }

    /// Answer the current round
    pub fn submit_answer(&mut self, answer: &str) -> AnswerOutcome {
        if self.phase != QuizPhase::Presenting {
            tracing::debug!("Answer ignored in phase {:?}", self.phase);
            return AnswerOutcome::Ignored;
        }
        let Some(round) = self.rounds.get(self.current_round) else {
            return AnswerOutcome::Ignored;
        };

        let correct = round.is_correct(answer);
        let outcome = if correct {
            self.score += 1;
            self.streak += 1;
            self.max_streak = self.max_streak.max(self.streak);
            AnswerOutcome::Correct
        } else {
            self.streak = 0;
            AnswerOutcome::Incorrect {
                expected: round.target_name.clone(),
            }
        };

        self.selected_answer = Some(answer.to_string());
        self.phase = QuizPhase::Answered { correct };
        outcome
    }

    /// Move past the answered round
    pub fn advance(&mut self) -> AdvanceOutcome {
        if !matches!(self.phase, QuizPhase::Answered { .. }) {
            return AdvanceOutcome::Ignored;
        }

        self.current_round += 1;
        self.selected_answer = None;

        if self.current_round < self.rounds.len() {
            self.phase = QuizPhase::Presenting;
            return AdvanceOutcome::NextRound;
        }

        let elapsed = self.clock.map(|c| c.elapsed_secs()).unwrap_or(0);
        let record = PerformanceRecord::recognition(
            self.tier,
            self.score,
            self.total_rounds(),
            self.max_streak,
            elapsed,
        );
        tracing::info!(
            "Recognition session completed: tier={}, score={}/{}, max_streak={}, {}s",
            self.tier,
            self.score,
            self.total_rounds(),
            self.max_streak,
            elapsed
        );
        self.phase = QuizPhase::Completed;
        self.completion = Some(record.clone());
        AdvanceOutcome::Completed(record)
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    /// The round being shown or just answered
    pub fn current_round(&self) -> Option<&Round> {
        match self.phase {
            QuizPhase::Presenting | QuizPhase::Answered { .. } => self.rounds.get(self.current_round),
            _ => None,
        }
    }

    /// Zero-based index of the current round
    pub fn current_round_index(&self) -> usize {
        self.current_round
    }

    pub fn total_rounds(&self) -> u32 {
        self.rounds.len() as u32
    }

    /// Answer given for the current round, while in `Answered`
    pub fn selected_answer(&self) -> Option<&str> {
        self.selected_answer.as_deref()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn max_streak(&self) -> u32 {
        self.max_streak
    }

    pub fn is_completed(&self) -> bool {
        self.phase == QuizPhase::Completed
    }

    pub fn completion(&self) -> Option<&PerformanceRecord> {
        self.completion.as_ref()
    }
}
