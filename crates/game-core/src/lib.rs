#![deny(warnings)]

//! Core domain models and invariants for Patrimoine.
//!
//! This crate defines the serializable content and state types shared by the
//! engine and the persistence layer, with validation helpers that let a front
//! end refuse to start a run on malformed catalogs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Starting level of every gauge at the beginning of a run.
pub const STARTING_LEVEL: i64 = 50;

/// One of the three tracked resources.
///
/// Gauge keys are a closed set: an effects mapping that names anything else
/// fails to deserialize. There is no aliasing between keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gauge {
    Budget,
    Happiness,
    Savings,
}

impl Gauge {
    /// All gauges in display order.
    pub const ALL: [Gauge; 3] = [Gauge::Budget, Gauge::Happiness, Gauge::Savings];
}

impl fmt::Display for Gauge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Gauge::Budget => "Budget",
            Gauge::Happiness => "Happiness",
            Gauge::Savings => "Savings",
        };
        write!(f, "{}", name)
    }
}

/// Current levels of the three gauges.
///
/// Values are unclamped: deltas may drive a gauge negative or arbitrarily
/// high. Failure is a predicate evaluated after each choice, not a clamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gauges {
    pub budget: i64,
    pub happiness: i64,
    pub savings: i64,
}

impl Gauges {
    /// Gauges as they stand at the start of every run.
    pub fn starting() -> Self {
        Self {
            budget: STARTING_LEVEL,
            happiness: STARTING_LEVEL,
            savings: STARTING_LEVEL,
        }
    }

    /// Add each present delta to its gauge; gauges not mentioned are unchanged.
    pub fn apply(&mut self, effects: &BTreeMap<Gauge, i64>) {
        for (gauge, delta) in effects {
            match gauge {
                Gauge::Budget => self.budget += delta,
                Gauge::Happiness => self.happiness += delta,
                Gauge::Savings => self.savings += delta,
            }
        }
    }

    /// Current level of a single gauge.
    pub fn level(&self, gauge: Gauge) -> i64 {
        match gauge {
            Gauge::Budget => self.budget,
            Gauge::Happiness => self.happiness,
            Gauge::Savings => self.savings,
        }
    }

    /// True iff at least one gauge has dropped to zero or below.
    pub fn is_failing(&self) -> bool {
        self.budget <= 0 || self.happiness <= 0 || self.savings <= 0
    }

    /// Set all three gauges back to the starting level.
    pub fn reset(&mut self) {
        *self = Self::starting();
    }

    /// Immutable copy of the current levels.
    pub fn snapshot(&self) -> Gauges {
        *self
    }

    /// Overwrite the current levels from a prior snapshot.
    pub fn restore(&mut self, snapshot: &Gauges) {
        *self = *snapshot;
    }
}

/// One of the two options printed on a scenario card.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CardOption {
    /// Button label shown to the player.
    pub text: String,
    /// Pedagogical explanation recorded with the decision.
    pub explanation: String,
    /// Gauge deltas applied when this option is chosen. May be empty.
    pub effects: BTreeMap<Gauge, i64>,
}

/// A scenario presented to the player with two mutually exclusive options.
///
/// Immutable after load; the engine only ever reads cards.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioCard {
    /// The situation text.
    pub question: String,
    /// Advisor hint available on demand.
    pub hint: String,
    pub option_a: CardOption,
    pub option_b: CardOption,
}

impl ScenarioCard {
    /// The option selected by a choice.
    pub fn option(&self, choice: Choice) -> &CardOption {
        match choice {
            Choice::A => &self.option_a,
            Choice::B => &self.option_b,
        }
    }
}

/// The two mutually exclusive answers to a scenario card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Choice {
    A,
    B,
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::A => write!(f, "A"),
            Choice::B => write!(f, "B"),
        }
    }
}

impl FromStr for Choice {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "a" | "A" => Ok(Choice::A),
            "b" | "B" => Ok(Choice::B),
            _ => Err(()),
        }
    }
}

/// Letter key of a quiz option.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AnswerKey {
    A,
    B,
    C,
    D,
}

impl AnswerKey {
    pub const ALL: [AnswerKey; 4] = [AnswerKey::A, AnswerKey::B, AnswerKey::C, AnswerKey::D];
}

impl fmt::Display for AnswerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            AnswerKey::A => "A",
            AnswerKey::B => "B",
            AnswerKey::C => "C",
            AnswerKey::D => "D",
        };
        write!(f, "{}", letter)
    }
}

impl FromStr for AnswerKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "a" | "A" => Ok(AnswerKey::A),
            "b" | "B" => Ok(AnswerKey::B),
            "c" | "C" => Ok(AnswerKey::C),
            "d" | "D" => Ok(AnswerKey::D),
            _ => Err(()),
        }
    }
}

/// A multiple-choice question used by the recovery quiz.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuizQuestion {
    /// The question text.
    pub question: String,
    /// Lettered answer texts.
    pub options: BTreeMap<AnswerKey, String>,
    /// The letter of the correct option.
    pub answer: AnswerKey,
    /// Shown in the corrections display after a failed quiz.
    pub explanation: String,
}

/// One entry of the decision log; the log's length at end of run is the score.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// The card question the player faced.
    pub situation: String,
    /// Label of the option the player picked.
    pub choice: String,
    /// Explanation attached to that option.
    pub explanation: String,
}

/// A persisted end-of-run score entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Player-supplied name.
    pub name: String,
    /// Number of decisions recorded in the run.
    pub score: u32,
    /// RFC 3339 timestamp taken when the run ended.
    pub timestamp: String,
}

/// Run configuration parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of questions sampled into a recovery quiz, capped by the
    /// catalog size (default: 10).
    pub quiz_length: usize,
    /// Seed for deterministic RNG.
    pub rng_seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            quiz_length: 10,
            rng_seed: 0,
        }
    }
}

/// Validation errors for content catalogs.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A run cannot start without at least one scenario card.
    #[error("scenario card catalog is empty")]
    EmptyCardCatalog,
    /// A run cannot start without at least one quiz question.
    #[error("quiz question catalog is empty")]
    EmptyQuizCatalog,
    /// Card text must be non-blank.
    #[error("card {0}: blank question text")]
    BlankCardQuestion(usize),
    /// Option labels must be non-blank.
    #[error("card {0}: blank option text")]
    BlankOptionText(usize),
    /// Quiz question text must be non-blank.
    #[error("quiz question {0}: blank question text")]
    BlankQuizQuestion(usize),
    /// A quiz question needs at least two options to be a choice at all.
    #[error("quiz question {0}: fewer than two options")]
    TooFewOptions(usize),
    /// The recorded answer must name one of the question's options.
    #[error("quiz question {0}: answer {1} has no matching option")]
    AnswerWithoutOption(usize, AnswerKey),
}

/// Validate a single scenario card.
pub fn validate_card(index: usize, card: &ScenarioCard) -> Result<(), ValidationError> {
    if card.question.trim().is_empty() {
        return Err(ValidationError::BlankCardQuestion(index));
    }
    if card.option_a.text.trim().is_empty() || card.option_b.text.trim().is_empty() {
        return Err(ValidationError::BlankOptionText(index));
    }
    Ok(())
}

/// Validate a single quiz question.
pub fn validate_question(index: usize, question: &QuizQuestion) -> Result<(), ValidationError> {
    if question.question.trim().is_empty() {
        return Err(ValidationError::BlankQuizQuestion(index));
    }
    if question.options.len() < 2 {
        return Err(ValidationError::TooFewOptions(index));
    }
    if !question.options.contains_key(&question.answer) {
        return Err(ValidationError::AnswerWithoutOption(index, question.answer));
    }
    Ok(())
}

/// Validate the scenario-card catalog as a whole.
pub fn validate_cards(cards: &[ScenarioCard]) -> Result<(), ValidationError> {
    if cards.is_empty() {
        return Err(ValidationError::EmptyCardCatalog);
    }
    for (i, card) in cards.iter().enumerate() {
        validate_card(i, card)?;
    }
    Ok(())
}

/// Validate the quiz-question catalog as a whole.
pub fn validate_questions(questions: &[QuizQuestion]) -> Result<(), ValidationError> {
    if questions.is_empty() {
        return Err(ValidationError::EmptyQuizCatalog);
    }
    for (i, question) in questions.iter().enumerate() {
        validate_question(i, question)?;
    }
    Ok(())
}

/// Validate both catalogs, as required before any run may start.
pub fn validate_catalogs(
    cards: &[ScenarioCard],
    questions: &[QuizQuestion],
) -> Result<(), ValidationError> {
    validate_cards(cards)?;
    validate_questions(questions)
}
