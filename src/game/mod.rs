//! Game session engines
//!
//! Both mini-games are synchronous state machines driven by one user action
//! at a time. Cosmetic delays (showing a mismatched pair, showing answer
//! feedback) belong to the caller: the engines only move on when the caller
//! invokes [`MatchingEngine::resolve_pending`] or [`RecognitionEngine::advance`].
//!
//! Actions that do not fit the current state are ignored and reported as
//! such, never treated as errors.

mod clock;
mod matching;
mod recognition;

pub use clock::SessionClock;
pub use matching::{Card, CardId, FlipOutcome, MatchingEngine, MatchingPhase, ResolveOutcome};
pub use recognition::{AdvanceOutcome, AnswerOutcome, QuizPhase, RecognitionEngine, Round};

pub(crate) const OPTIONS_PER_ROUND: usize = 4;
