//! The recovery quiz: a one-shot sequence of sampled questions.
//!
//! A session is created when a gauge first depletes, collects one answer per
//! question, and is graded exactly once when complete.

use game_core::{AnswerKey, QuizQuestion};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::EngineError;

/// An in-progress recovery quiz.
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<QuizQuestion>,
    answers: Vec<AnswerKey>,
}

/// Outcome of grading a completed session.
#[derive(Debug, Clone, Serialize)]
pub struct QuizReport {
    /// True iff every answer matched its question's recorded answer.
    pub passed: bool,
    /// The incorrect answers, in question order.
    pub mistakes: Vec<QuizMistake>,
}

/// One incorrect answer, with enough data for a corrections display.
#[derive(Debug, Clone, Serialize)]
pub struct QuizMistake {
    /// Zero-based position of the question within the session.
    pub index: usize,
    pub question: String,
    pub given: AnswerKey,
    pub correct: AnswerKey,
    pub explanation: String,
}

impl QuizSession {
    /// Sample `min(quiz_length, catalog size)` distinct questions without
    /// replacement.
    pub fn sample<R: Rng>(catalog: &[QuizQuestion], quiz_length: usize, rng: &mut R) -> Self {
        let k = quiz_length.min(catalog.len());
        let questions = catalog.choose_multiple(rng, k).cloned().collect();
        Self {
            questions,
            answers: Vec::new(),
        }
    }

    /// Number of questions in this session.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Sessions are never empty: the quiz catalog is validated non-empty
    /// before a run can start.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Zero-based index of the question awaiting an answer.
    pub fn current_index(&self) -> usize {
        self.answers.len()
    }

    /// The question awaiting an answer.
    pub fn current_question(&self) -> Result<&QuizQuestion, EngineError> {
        self.questions
            .get(self.current_index())
            .ok_or(EngineError::QuizAlreadyComplete)
    }

    /// Record an answer for the current question and advance.
    pub fn submit(&mut self, answer: AnswerKey) -> Result<(), EngineError> {
        if self.is_complete() {
            return Err(EngineError::QuizAlreadyComplete);
        }
        self.answers.push(answer);
        Ok(())
    }

    /// True once every question has an answer.
    pub fn is_complete(&self) -> bool {
        self.answers.len() == self.questions.len()
    }

    /// Grade a completed session.
    pub fn grade(&self) -> Result<QuizReport, EngineError> {
        if !self.is_complete() {
            return Err(EngineError::QuizNotComplete);
        }
        let mistakes: Vec<QuizMistake> = self
            .questions
            .iter()
            .zip(self.answers.iter())
            .enumerate()
            .filter(|(_, (question, given))| question.answer != **given)
            .map(|(index, (question, given))| QuizMistake {
                index,
                question: question.question.clone(),
                given: *given,
                correct: question.answer,
                explanation: question.explanation.clone(),
            })
            .collect();
        Ok(QuizReport {
            passed: mistakes.is_empty(),
            mistakes,
        })
    }
}
