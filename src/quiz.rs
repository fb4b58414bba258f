//! Quiz session state machine.
//!
//! `QuizSession` never touches a clock. Every transition returns the timer
//! [`Effect`]s the caller must apply, and timer callbacks come back in as
//! [`QuizSession::tick`] / [`QuizSession::reveal_elapsed`] tagged with the
//! question they were scheduled for. Events for any other question are dropped.

use crate::logger;
use crate::models::{CountryRecord, Question, QuestionId, Settings};
use crate::question::generate_question;
use rand::Rng;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuizError {
    #[error("No countries loaded, the quiz cannot start")]
    EmptyDataset,
    #[error("A quiz is already running")]
    NotIdle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    StartCountdown(QuestionId),
    ScheduleReveal(QuestionId),
    CancelTimers,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Idle,
    Asking {
        question: Question,
        remaining: u32,
    },
    /// Wrong answer or timeout; `selected` is `None` when the timer ran out.
    Revealing {
        question: Question,
        selected: Option<String>,
    },
    Finished,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub question_number: u32,
    pub attempts: u32,
    pub correct: u32,
    pub incorrect: u32,
    /// Score in quarter points, so that -0.25 steps stay exact.
    pub score_quarters: i64,
}

impl Stats {
    pub fn score(&self) -> f64 {
        self.score_quarters as f64 / 4.0
    }
}

#[derive(Debug, Clone)]
pub struct QuizSession {
    pub settings: Settings,
    pub stats: Stats,
    pub phase: Phase,
    next_id: u64,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl QuizSession {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            stats: Stats::default(),
            phase: Phase::Idle,
            next_id: 0,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, Phase::Idle)
    }

    pub fn is_active(&self) -> bool {
        matches!(self.phase, Phase::Asking { .. } | Phase::Revealing { .. })
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished)
    }

    pub fn current_question(&self) -> Option<&Question> {
        match &self.phase {
            Phase::Asking { question, .. } | Phase::Revealing { question, .. } => Some(question),
            Phase::Idle | Phase::Finished => None,
        }
    }

    pub fn remaining(&self) -> Option<u32> {
        match &self.phase {
            Phase::Asking { remaining, .. } => Some(*remaining),
            _ => None,
        }
    }

    pub fn showing_correct_answer(&self) -> bool {
        matches!(self.phase, Phase::Revealing { .. })
    }

    /// Idle -> Active. Counters are zeroed and the first question is drawn.
    pub fn start<R: Rng + ?Sized>(
        &mut self,
        dataset: &[CountryRecord],
        rng: &mut R,
    ) -> Result<Vec<Effect>, QuizError> {
        if !self.is_idle() {
            return Err(QuizError::NotIdle);
        }
        if dataset.is_empty() {
            return Err(QuizError::EmptyDataset);
        }

        self.settings.set_total_questions(self.settings.total_questions);
        self.settings.set_time_limit(self.settings.time_limit);
        self.stats = Stats::default();
        logger::log(&format!(
            "Quiz started: {} questions, {}s per question",
            self.settings.total_questions, self.settings.time_limit
        ));
        self.advance(dataset, rng)
    }

    pub fn answer<R: Rng + ?Sized>(
        &mut self,
        choice: &str,
        dataset: &[CountryRecord],
        rng: &mut R,
    ) -> Vec<Effect> {
        let Phase::Asking { question, .. } = &self.phase else {
            return Vec::new();
        };

        if question.options.is_correct(choice) {
            self.stats.correct += 1;
            self.stats.score_quarters += 4;
            logger::log(&format!("{} answered correctly", question.id));
            // Only fails on an empty dataset, which start() already rejected.
            self.advance(dataset, rng).unwrap_or_default()
        } else {
            self.mark_incorrect(Some(choice.to_string()))
        }
    }

    pub fn answer_index<R: Rng + ?Sized>(
        &mut self,
        index: usize,
        dataset: &[CountryRecord],
        rng: &mut R,
    ) -> Vec<Effect> {
        let choice = match &self.phase {
            Phase::Asking { question, .. } => question.options.choices.get(index).cloned(),
            _ => None,
        };
        match choice {
            Some(choice) => self.answer(&choice, dataset, rng),
            None => Vec::new(),
        }
    }

    /// One second elapsed for question `id`.
    pub fn tick(&mut self, id: QuestionId) -> Vec<Effect> {
        let Phase::Asking {
            question,
            remaining,
        } = &mut self.phase
        else {
            return Vec::new();
        };
        if question.id != id {
            logger::log(&format!("Dropped stale tick for {}", id));
            return Vec::new();
        }

        *remaining = remaining.saturating_sub(1);
        if *remaining == 0 {
            logger::log(&format!("{} timed out", id));
            self.mark_incorrect(None)
        } else {
            Vec::new()
        }
    }

    pub fn reveal_elapsed<R: Rng + ?Sized>(
        &mut self,
        id: QuestionId,
        dataset: &[CountryRecord],
        rng: &mut R,
    ) -> Vec<Effect> {
        match &self.phase {
            Phase::Revealing { question, .. } if question.id == id => {
                self.advance(dataset, rng).unwrap_or_default()
            }
            _ => Vec::new(),
        }
    }

    /// Any phase -> Idle with every counter zeroed.
    pub fn restart(&mut self) -> Vec<Effect> {
        self.stats = Stats::default();
        self.phase = Phase::Idle;
        vec![Effect::CancelTimers]
    }

    fn mark_incorrect(&mut self, selected: Option<String>) -> Vec<Effect> {
        let phase = std::mem::replace(&mut self.phase, Phase::Idle);
        let Phase::Asking { question, .. } = phase else {
            self.phase = phase;
            return Vec::new();
        };

        self.stats.incorrect += 1;
        self.stats.score_quarters -= 1;
        logger::log(&format!(
            "{} answered incorrectly ({:?}), correct was {:?}",
            question.id, selected, question.options.correct_answer
        ));

        let id = question.id;
        self.phase = Phase::Revealing { question, selected };
        vec![Effect::CancelTimers, Effect::ScheduleReveal(id)]
    }

    fn advance<R: Rng + ?Sized>(
        &mut self,
        dataset: &[CountryRecord],
        rng: &mut R,
    ) -> Result<Vec<Effect>, QuizError> {
        if self.stats.question_number >= self.settings.total_questions {
            self.phase = Phase::Finished;
            logger::log(&format!(
                "Quiz finished: {} correct, {} incorrect, score {:.2}",
                self.stats.correct,
                self.stats.incorrect,
                self.stats.score()
            ));
            return Ok(vec![Effect::CancelTimers]);
        }

        self.next_id += 1;
        let question = generate_question(dataset, QuestionId(self.next_id), rng)?;
        let id = question.id;

        self.stats.question_number += 1;
        self.stats.attempts += 1;
        self.phase = Phase::Asking {
            question,
            remaining: self.settings.time_limit,
        };
        Ok(vec![Effect::CancelTimers, Effect::StartCountdown(id)])
    }
}
