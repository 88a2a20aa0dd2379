#![deny(warnings)]

//! Turn engine for Patrimoine.
//!
//! The engine is a synchronous state machine: it advances only in response to
//! a discrete caller action and emits typed outcomes for a front end to
//! render. It owns card sequencing, gauge mutation, failure detection, the
//! single checkpoint used to rewind after a passed recovery quiz, and score
//! computation.

pub mod quiz;

use chrono::{SecondsFormat, Utc};
use game_core::{
    validate_catalogs, AnswerKey, Choice, Decision, GameConfig, Gauges, QuizQuestion,
    ScenarioCard, ScoreRecord,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, info};

pub use crate::quiz::{QuizMistake, QuizReport, QuizSession};

/// Errors produced by the engine.
///
/// Every error leaves the engine's state exactly as it was: protocol errors
/// are recoverable (the caller re-prompts), and the quiz-lifecycle errors
/// mark caller bugs that tests must observe.
#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    /// The content catalogs failed validation; no run may start.
    #[error(transparent)]
    InvalidContent(#[from] game_core::ValidationError),
    /// `start_run` is only legal from the menu.
    #[error("a run is already in progress")]
    RunInProgress,
    /// No card is awaiting a choice in the current phase.
    #[error("no choice is pending")]
    NoChoicePending,
    /// Advancing is only legal once the current card's choice was applied.
    #[error("no resolved card to advance from")]
    NoCardResolved,
    /// No recovery quiz is in progress.
    #[error("no quiz is active")]
    NoQuizActive,
    /// The quiz has already collected an answer for every question.
    #[error("quiz is already complete")]
    QuizAlreadyComplete,
    /// Grading requires an answer for every question.
    #[error("quiz is not complete")]
    QuizNotComplete,
}

/// Discrete engine phases.
///
/// The playing state is split in two so that advancing to the next card is
/// only legal after the pending choice has been applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Phase {
    /// No run in progress.
    Menu,
    /// A card is on screen, awaiting a choice.
    AwaitingChoice,
    /// The choice was applied without depletion; the caller may advance.
    CardResolved,
    /// A gauge depleted and the recovery quiz is collecting answers.
    Quiz,
    /// The run is over; the score is final.
    Ended,
}

/// Snapshot of the run taken immediately before each new card is exposed.
///
/// Exactly one checkpoint exists at a time; a passed quiz rewinds to it,
/// which lands the player *before* the failing card was shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Checkpoint {
    pub gauges: Gauges,
    pub log_len: usize,
}

/// Card payload handed to the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct CardView {
    pub question: String,
    pub hint: String,
    pub option_a: String,
    pub option_b: String,
    pub gauges: Gauges,
}

/// Quiz question payload handed to the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct QuizView {
    /// One-based position within the session, for "Question i/k" banners.
    pub number: usize,
    pub total: usize,
    pub question: String,
    pub options: BTreeMap<AnswerKey, String>,
}

/// Result of applying a choice.
#[derive(Debug, Clone, Serialize)]
pub enum ChoiceOutcome {
    /// No gauge depleted; the caller may advance to the next card.
    Continue { gauges: Gauges },
    /// First depletion of the run: the one-shot recovery quiz has started.
    QuizStarted {
        gauges: Gauges,
        first_question: QuizView,
    },
    /// Depletion with the quiz already spent: the run is over.
    Defeat { gauges: Gauges, score: u32 },
}

/// Result of submitting a quiz answer.
#[derive(Debug, Clone, Serialize)]
pub enum QuizOutcome {
    /// More questions remain.
    NextQuestion(QuizView),
    /// Every answer was correct: the run resumed from the checkpoint.
    Passed { resumed: CardView },
    /// At least one answer was wrong: the run is over.
    Failed { report: QuizReport, score: u32 },
}

/// The game-state engine.
///
/// One instance per process; all run-scoped state lives here and is reset by
/// `start_run` / `return_to_menu`, never ambient.
#[derive(Debug)]
pub struct GameEngine<R: Rng> {
    cards: Vec<ScenarioCard>,
    questions: Vec<QuizQuestion>,
    config: GameConfig,
    rng: R,
    phase: Phase,
    gauges: Gauges,
    log: Vec<Decision>,
    checkpoint: Checkpoint,
    current_card: Option<usize>,
    quiz: Option<QuizSession>,
    quiz_used: bool,
}

impl GameEngine<ChaCha8Rng> {
    /// Construct with the deterministic RNG seeded from the configuration.
    pub fn from_seed(
        cards: Vec<ScenarioCard>,
        questions: Vec<QuizQuestion>,
        config: GameConfig,
    ) -> Result<Self, EngineError> {
        let rng = ChaCha8Rng::seed_from_u64(config.rng_seed);
        Self::new(cards, questions, config, rng)
    }
}

impl<R: Rng> GameEngine<R> {
    /// Construct an engine over validated catalogs.
    ///
    /// Fails fast on empty or malformed content; no run may start afterwards.
    pub fn new(
        cards: Vec<ScenarioCard>,
        questions: Vec<QuizQuestion>,
        config: GameConfig,
        rng: R,
    ) -> Result<Self, EngineError> {
        validate_catalogs(&cards, &questions)?;
        Ok(Self {
            cards,
            questions,
            config,
            rng,
            phase: Phase::Menu,
            gauges: Gauges::starting(),
            log: Vec::new(),
            checkpoint: Checkpoint {
                gauges: Gauges::starting(),
                log_len: 0,
            },
            current_card: None,
            quiz: None,
            quiz_used: false,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn gauges(&self) -> Gauges {
        self.gauges
    }

    /// Decisions recorded so far in the current run.
    pub fn decisions(&self) -> &[Decision] {
        &self.log
    }

    /// The card currently on screen, if any.
    pub fn current_card(&self) -> Option<&ScenarioCard> {
        self.current_card.map(|index| &self.cards[index])
    }

    /// The quiz question awaiting an answer, for re-display after a bad input.
    pub fn current_quiz_question(&self) -> Result<QuizView, EngineError> {
        self.quiz_view()
    }

    /// Number of decisions recorded; the player's score once the run ends.
    pub fn score(&self) -> u32 {
        self.log.len() as u32
    }

    /// Build the persistable record for a finished run.
    ///
    /// Returns `None` unless the run has ended with a positive score, the
    /// only situation in which saving is offered.
    pub fn score_record(&self, name: &str) -> Option<ScoreRecord> {
        if self.phase != Phase::Ended || self.log.is_empty() {
            return None;
        }
        Some(ScoreRecord {
            name: name.to_string(),
            score: self.score(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        })
    }

    /// Start a run: reset run-scoped state and draw the first card.
    pub fn start_run(&mut self) -> Result<CardView, EngineError> {
        if self.phase != Phase::Menu {
            return Err(EngineError::RunInProgress);
        }
        self.gauges.reset();
        self.log.clear();
        self.quiz = None;
        self.quiz_used = false;
        info!(seed = self.config.rng_seed, "run started");
        Ok(self.draw_card())
    }

    /// Apply the chosen option of the card on screen.
    pub fn apply_choice(&mut self, choice: Choice) -> Result<ChoiceOutcome, EngineError> {
        if self.phase != Phase::AwaitingChoice {
            return Err(EngineError::NoChoicePending);
        }
        let index = self.current_card.ok_or(EngineError::NoChoicePending)?;
        let card = &self.cards[index];
        let option = card.option(choice);
        let decision = Decision {
            situation: card.question.clone(),
            choice: option.text.clone(),
            explanation: option.explanation.clone(),
        };
        self.gauges.apply(&option.effects);
        self.log.push(decision);
        debug!(%choice, gauges = ?self.gauges, "choice applied");

        if !self.gauges.is_failing() {
            self.phase = Phase::CardResolved;
            return Ok(ChoiceOutcome::Continue {
                gauges: self.gauges,
            });
        }
        if self.quiz_used {
            self.phase = Phase::Ended;
            info!(score = self.score(), "gauge depleted with quiz spent; run over");
            return Ok(ChoiceOutcome::Defeat {
                gauges: self.gauges,
                score: self.score(),
            });
        }
        self.quiz_used = true;
        self.quiz = Some(QuizSession::sample(
            &self.questions,
            self.config.quiz_length,
            &mut self.rng,
        ));
        self.phase = Phase::Quiz;
        info!("gauge depleted; recovery quiz started");
        Ok(ChoiceOutcome::QuizStarted {
            gauges: self.gauges,
            first_question: self.quiz_view()?,
        })
    }

    /// Draw the next card once the current one is resolved.
    pub fn advance_to_next_card(&mut self) -> Result<CardView, EngineError> {
        if self.phase != Phase::CardResolved {
            return Err(EngineError::NoCardResolved);
        }
        Ok(self.draw_card())
    }

    /// Record a quiz answer; on the final answer, grade and either rewind the
    /// run to the checkpoint or end it.
    pub fn submit_quiz_answer(&mut self, answer: AnswerKey) -> Result<QuizOutcome, EngineError> {
        if self.phase != Phase::Quiz {
            return Err(EngineError::NoQuizActive);
        }
        let session = self.quiz.as_mut().ok_or(EngineError::NoQuizActive)?;
        session.submit(answer)?;
        if !session.is_complete() {
            return Ok(QuizOutcome::NextQuestion(self.quiz_view()?));
        }
        let report = session.grade()?;
        self.quiz = None;
        if report.passed {
            self.gauges.restore(&self.checkpoint.gauges);
            self.log.truncate(self.checkpoint.log_len);
            info!(gauges = ?self.gauges, "quiz passed; rewound to checkpoint");
            Ok(QuizOutcome::Passed {
                resumed: self.draw_card(),
            })
        } else {
            self.phase = Phase::Ended;
            info!(
                score = self.score(),
                mistakes = report.mistakes.len(),
                "quiz failed; run over"
            );
            Ok(QuizOutcome::Failed {
                report,
                score: self.score(),
            })
        }
    }

    /// Abandon whatever is in progress and return to the menu.
    ///
    /// Clears the one-shot quiz flag along with all other run-scoped state;
    /// there is no partial-session resume.
    pub fn return_to_menu(&mut self) {
        self.phase = Phase::Menu;
        self.gauges.reset();
        self.log.clear();
        self.current_card = None;
        self.quiz = None;
        self.quiz_used = false;
        info!("returned to menu");
    }

    /// Checkpoint, then select the next card uniformly at random.
    ///
    /// Selection is independent each draw, so consecutive repeats are
    /// permitted. The checkpoint always captures the state the player had
    /// before the card now going on screen.
    fn draw_card(&mut self) -> CardView {
        self.checkpoint = Checkpoint {
            gauges: self.gauges.snapshot(),
            log_len: self.log.len(),
        };
        let index = self.rng.gen_range(0..self.cards.len());
        self.current_card = Some(index);
        self.phase = Phase::AwaitingChoice;
        debug!(index, "card drawn");
        let card = &self.cards[index];
        CardView {
            question: card.question.clone(),
            hint: card.hint.clone(),
            option_a: card.option_a.text.clone(),
            option_b: card.option_b.text.clone(),
            gauges: self.gauges,
        }
    }

    fn quiz_view(&self) -> Result<QuizView, EngineError> {
        let session = self.quiz.as_ref().ok_or(EngineError::NoQuizActive)?;
        let question = session.current_question()?;
        Ok(QuizView {
            number: session.current_index() + 1,
            total: session.len(),
            question: question.question.clone(),
            options: question.options.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{CardOption, Gauge, ValidationError, STARTING_LEVEL};
    use proptest::prelude::*;

    fn option(text: &str, effects: &[(Gauge, i64)]) -> CardOption {
        CardOption {
            text: text.to_string(),
            explanation: format!("why {}", text),
            effects: effects.iter().copied().collect(),
        }
    }

    /// One card whose option A is survivable and whose option B drains the
    /// budget below zero from the starting level.
    fn test_card() -> ScenarioCard {
        ScenarioCard {
            question: "An unexpected bill arrives.".to_string(),
            hint: "Check your buffer first.".to_string(),
            option_a: option("Pay in installments", &[(Gauge::Budget, -10)]),
            option_b: option("Pay everything at once", &[(Gauge::Budget, -60)]),
        }
    }

    fn quiz_pool(n: usize) -> Vec<QuizQuestion> {
        (0..n)
            .map(|i| QuizQuestion {
                question: format!("quiz question {}", i),
                options: BTreeMap::from([
                    (AnswerKey::A, "right".to_string()),
                    (AnswerKey::B, "wrong".to_string()),
                ]),
                answer: AnswerKey::A,
                explanation: "because".to_string(),
            })
            .collect()
    }

    fn engine() -> GameEngine<ChaCha8Rng> {
        engine_with(vec![test_card()], quiz_pool(3))
    }

    fn engine_with(
        cards: Vec<ScenarioCard>,
        questions: Vec<QuizQuestion>,
    ) -> GameEngine<ChaCha8Rng> {
        GameEngine::from_seed(
            cards,
            questions,
            GameConfig {
                quiz_length: 10,
                rng_seed: 42,
            },
        )
        .unwrap()
    }

    /// Answer every question of the active quiz correctly.
    fn pass_quiz(engine: &mut GameEngine<ChaCha8Rng>) -> QuizOutcome {
        loop {
            match engine.submit_quiz_answer(AnswerKey::A).unwrap() {
                QuizOutcome::NextQuestion(_) => continue,
                done => return done,
            }
        }
    }

    #[test]
    fn construction_rejects_invalid_catalogs() {
        let err = GameEngine::from_seed(vec![], quiz_pool(1), GameConfig::default()).unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidContent(ValidationError::EmptyCardCatalog)
        );
        let err =
            GameEngine::from_seed(vec![test_card()], vec![], GameConfig::default()).unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidContent(ValidationError::EmptyQuizCatalog)
        );
    }

    #[test]
    fn start_run_resets_state_and_presents_a_card() {
        let mut engine = engine();
        let view = engine.start_run().unwrap();
        assert_eq!(engine.phase(), Phase::AwaitingChoice);
        assert_eq!(engine.gauges(), Gauges::starting());
        assert_eq!(view.gauges, Gauges::starting());
        assert!(engine.decisions().is_empty());
        assert_eq!(view.question, "An unexpected bill arrives.");
    }

    #[test]
    fn start_run_twice_is_rejected() {
        let mut engine = engine();
        engine.start_run().unwrap();
        assert_eq!(engine.start_run().unwrap_err(), EngineError::RunInProgress);
        assert_eq!(engine.phase(), Phase::AwaitingChoice);
    }

    #[test]
    fn apply_choice_mutates_gauges_and_appends_decision() {
        let mut engine = engine();
        engine.start_run().unwrap();
        let outcome = engine.apply_choice(Choice::A).unwrap();
        match outcome {
            ChoiceOutcome::Continue { gauges } => {
                assert_eq!(gauges.budget, STARTING_LEVEL - 10)
            }
            other => panic!("expected Continue, got {:?}", other),
        }
        assert_eq!(engine.decisions().len(), 1);
        assert_eq!(engine.decisions()[0].choice, "Pay in installments");
        assert_eq!(engine.phase(), Phase::CardResolved);
    }

    #[test]
    fn protocol_violations_are_rejected_without_state_change() {
        let mut engine = engine();
        assert_eq!(
            engine.apply_choice(Choice::A).unwrap_err(),
            EngineError::NoChoicePending
        );
        assert_eq!(
            engine.advance_to_next_card().unwrap_err(),
            EngineError::NoCardResolved
        );
        assert_eq!(
            engine.submit_quiz_answer(AnswerKey::A).unwrap_err(),
            EngineError::NoQuizActive
        );
        assert_eq!(engine.phase(), Phase::Menu);
        assert!(engine.decisions().is_empty());

        engine.start_run().unwrap();
        // A second choice before advancing is also a protocol violation.
        engine.apply_choice(Choice::A).unwrap();
        assert_eq!(
            engine.apply_choice(Choice::A).unwrap_err(),
            EngineError::NoChoicePending
        );
        assert_eq!(engine.decisions().len(), 1);
    }

    #[test]
    fn depletion_starts_the_quiz_once() {
        let mut engine = engine();
        engine.start_run().unwrap();
        let outcome = engine.apply_choice(Choice::B).unwrap();
        match outcome {
            ChoiceOutcome::QuizStarted {
                gauges,
                first_question,
            } => {
                assert_eq!(gauges.budget, STARTING_LEVEL - 60);
                assert_eq!(first_question.number, 1);
                assert_eq!(first_question.total, 3);
            }
            other => panic!("expected QuizStarted, got {:?}", other),
        }
        assert_eq!(engine.phase(), Phase::Quiz);
    }

    #[test]
    fn passed_quiz_rewinds_to_before_the_failing_card() {
        let mut engine = engine();
        engine.start_run().unwrap();
        // Survive one card first so the checkpoint is not the starting state.
        engine.apply_choice(Choice::A).unwrap();
        engine.advance_to_next_card().unwrap();
        let before_failing = engine.gauges();
        assert_eq!(before_failing.budget, STARTING_LEVEL - 10);

        engine.apply_choice(Choice::B).unwrap();
        assert!(engine.gauges().is_failing());
        assert_eq!(engine.decisions().len(), 2);

        match pass_quiz(&mut engine) {
            QuizOutcome::Passed { resumed } => {
                assert_eq!(resumed.gauges, before_failing);
            }
            other => panic!("expected Passed, got {:?}", other),
        }
        assert_eq!(engine.gauges(), before_failing);
        assert_eq!(engine.decisions().len(), 1);
        assert_eq!(engine.phase(), Phase::AwaitingChoice);
    }

    #[test]
    fn quiz_is_one_shot_per_run() {
        let mut engine = engine();
        engine.start_run().unwrap();
        engine.apply_choice(Choice::B).unwrap();
        assert!(matches!(
            pass_quiz(&mut engine),
            QuizOutcome::Passed { .. }
        ));
        // Deplete again: no second quiz, the run ends.
        let outcome = engine.apply_choice(Choice::B).unwrap();
        match outcome {
            ChoiceOutcome::Defeat { score, .. } => assert_eq!(score, 1),
            other => panic!("expected Defeat, got {:?}", other),
        }
        assert_eq!(engine.phase(), Phase::Ended);
    }

    #[test]
    fn failed_quiz_ends_the_run_with_the_failing_decision_counted() {
        // The worked example: one card, option B drops budget to -10,
        // the quiz is failed, and the final score is 1.
        let mut engine = engine_with(vec![test_card()], quiz_pool(1));
        engine.start_run().unwrap();
        engine.apply_choice(Choice::B).unwrap();
        let outcome = engine.submit_quiz_answer(AnswerKey::B).unwrap();
        match outcome {
            QuizOutcome::Failed { report, score } => {
                assert_eq!(score, 1);
                assert!(!report.passed);
                assert_eq!(report.mistakes.len(), 1);
                assert_eq!(report.mistakes[0].index, 0);
                assert_eq!(report.mistakes[0].correct, AnswerKey::A);
            }
            other => panic!("expected Failed, got {:?}", other),
        }
        assert_eq!(engine.phase(), Phase::Ended);
        assert_eq!(engine.score(), 1);
    }

    #[test]
    fn quiz_samples_at_most_the_catalog() {
        let mut engine = engine_with(vec![test_card()], quiz_pool(4));
        engine.start_run().unwrap();
        match engine.apply_choice(Choice::B).unwrap() {
            ChoiceOutcome::QuizStarted { first_question, .. } => {
                assert_eq!(first_question.total, 4);
            }
            other => panic!("expected QuizStarted, got {:?}", other),
        }
    }

    #[test]
    fn score_record_only_for_ended_positive_runs() {
        let mut engine = engine_with(vec![test_card()], quiz_pool(1));
        assert!(engine.score_record("Ada").is_none());
        engine.start_run().unwrap();
        assert!(engine.score_record("Ada").is_none());
        engine.apply_choice(Choice::B).unwrap();
        engine.submit_quiz_answer(AnswerKey::B).unwrap();
        let record = engine.score_record("Ada").unwrap();
        assert_eq!(record.name, "Ada");
        assert_eq!(record.score, 1);
        assert!(!record.timestamp.is_empty());
    }

    #[test]
    fn return_to_menu_discards_the_run_and_rearms_the_quiz() {
        let mut engine = engine();
        engine.start_run().unwrap();
        engine.apply_choice(Choice::B).unwrap();
        assert_eq!(engine.phase(), Phase::Quiz);

        engine.return_to_menu();
        assert_eq!(engine.phase(), Phase::Menu);
        assert!(engine.decisions().is_empty());
        assert!(engine.current_card().is_none());

        // A fresh run gets its quiz back.
        engine.start_run().unwrap();
        engine.apply_choice(Choice::B).unwrap();
        assert_eq!(engine.phase(), Phase::Quiz);
    }

    #[test]
    fn same_seed_draws_the_same_cards() {
        let cards: Vec<ScenarioCard> = (0..8)
            .map(|i| ScenarioCard {
                question: format!("situation {}", i),
                hint: "hint".to_string(),
                option_a: option("keep going", &[(Gauge::Happiness, 1)]),
                option_b: option("stop", &[(Gauge::Happiness, -1)]),
            })
            .collect();
        let mut a = engine_with(cards.clone(), quiz_pool(3));
        let mut b = engine_with(cards, quiz_pool(3));
        let mut drawn_a = vec![a.start_run().unwrap().question];
        let mut drawn_b = vec![b.start_run().unwrap().question];
        for _ in 0..5 {
            a.apply_choice(Choice::A).unwrap();
            b.apply_choice(Choice::A).unwrap();
            drawn_a.push(a.advance_to_next_card().unwrap().question);
            drawn_b.push(b.advance_to_next_card().unwrap().question);
        }
        assert_eq!(drawn_a, drawn_b);
    }

    proptest! {
        #[test]
        fn gauges_track_an_arbitrary_survivable_sequence(choices in proptest::collection::vec(any::<bool>(), 0..40)) {
            let card = ScenarioCard {
                question: "steady as she goes".to_string(),
                hint: "hint".to_string(),
                option_a: option("up", &[(Gauge::Happiness, 1)]),
                option_b: option("down", &[(Gauge::Savings, -1)]),
            };
            let mut engine = engine_with(vec![card], quiz_pool(2));
            engine.start_run().unwrap();
            let mut ups = 0i64;
            let mut downs = 0i64;
            for &up in &choices {
                let choice = if up { ups += 1; Choice::A } else { downs += 1; Choice::B };
                match engine.apply_choice(choice).unwrap() {
                    ChoiceOutcome::Continue { .. } => { engine.advance_to_next_card().unwrap(); }
                    // 40 downward steps cannot deplete a gauge from 50.
                    other => prop_assert!(false, "unexpected outcome {:?}", other),
                }
            }
            prop_assert_eq!(engine.decisions().len(), choices.len());
            prop_assert_eq!(engine.gauges().happiness, STARTING_LEVEL + ups);
            prop_assert_eq!(engine.gauges().savings, STARTING_LEVEL - downs);
            prop_assert_eq!(engine.gauges().budget, STARTING_LEVEL);
        }

        #[test]
        fn checkpoint_roundtrip_over_arbitrary_prefixes(survivable in 0usize..12) {
            // Any number of survivable decisions, then a depleting one; a
            // passed quiz must land exactly on the pre-card state.
            let card = ScenarioCard {
                question: "spend or save".to_string(),
                hint: "hint".to_string(),
                option_a: option("small spend", &[(Gauge::Budget, -2)]),
                option_b: option("blowout", &[(Gauge::Budget, -100)]),
            };
            let mut engine = engine_with(vec![card], quiz_pool(3));
            engine.start_run().unwrap();
            for _ in 0..survivable {
                engine.apply_choice(Choice::A).unwrap();
                engine.advance_to_next_card().unwrap();
            }
            let before = engine.gauges();
            let log_len = engine.decisions().len();
            engine.apply_choice(Choice::B).unwrap();
            match pass_quiz(&mut engine) {
                QuizOutcome::Passed { .. } => {}
                other => prop_assert!(false, "expected Passed, got {:?}", other),
            }
            prop_assert_eq!(engine.gauges(), before);
            prop_assert_eq!(engine.decisions().len(), log_len);
        }
    }
}
