//! Quiz session state machine.
//!
//! `QuizSession` owns sequencing and scoring and nothing else. Every accepted
//! transition appends a [`SessionEvent`] to an outbox which the screen drains
//! and hands to the feedback orchestrator; animations never live in here.

use crate::error::{QuizError, TransitionError};
use crate::models::{CompletionRecord, Question, Quiz, ReplyStatus};
use crate::quiz_source::QuestionSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Active,
    Completed,
    Exited,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    AlternativeSelected { index: usize },
    AnswerConfirmed { status: ReplyStatus, score: usize },
    /// Confirm was pressed with nothing selected; the user must pick or skip.
    SkipConfirmationRequested,
    QuestionChanged { index: usize, total: usize },
    Completed(CompletionRecord),
    Exited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    Correct,
    Incorrect,
    NeedsSelection,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    Next { index: usize },
    Completed(CompletionRecord),
}

#[derive(Debug)]
pub struct QuizSession {
    quiz_id: String,
    title: String,
    level: u8,
    questions: Vec<Question>,
    current_index: usize,
    score: usize,
    selected_alternative: Option<usize>,
    reply_status: ReplyStatus,
    phase: SessionPhase,
    events: Vec<SessionEvent>,
}

impl QuizSession {
    /// Loads `quiz_id` from `source` and starts on the first question.
    /// No session exists if loading fails.
    pub fn initialize(source: &dyn QuestionSource, quiz_id: &str) -> Result<Self, QuizError> {
        let quiz = source.load_quiz(quiz_id)?;
        Self::from_quiz(quiz)
    }

    pub fn from_quiz(quiz: Quiz) -> Result<Self, QuizError> {
        if quiz.questions.is_empty() {
            return Err(QuizError::InvalidQuiz {
                quiz_id: quiz.id,
                reason: "no questions".to_string(),
            });
        }

        for (i, question) in quiz.questions.iter().enumerate() {
            let reason = if question.alternatives.is_empty() {
                format!("question {} has no alternatives", i + 1)
            } else if question.correct >= question.alternatives.len() {
                format!(
                    "question {}: correct index {} out of range",
                    i + 1,
                    question.correct
                )
            } else {
                continue;
            };
            return Err(QuizError::InvalidQuiz {
                quiz_id: quiz.id,
                reason,
            });
        }

        Ok(Self {
            quiz_id: quiz.id,
            title: quiz.title,
            level: quiz.level,
            questions: quiz.questions,
            current_index: 0,
            score: 0,
            selected_alternative: None,
            reply_status: ReplyStatus::None,
            phase: SessionPhase::Active,
            events: Vec::new(),
        })
    }

    pub fn quiz_id(&self) -> &str {
        &self.quiz_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current_index]
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn selected_alternative(&self) -> Option<usize> {
        self.selected_alternative
    }

    pub fn reply_status(&self) -> ReplyStatus {
        self.reply_status
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 == self.questions.len()
    }

    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn select_alternative(&mut self, index: usize) -> Result<(), TransitionError> {
        self.ensure_active()?;
        if self.reply_status != ReplyStatus::None {
            return Err(TransitionError::AlreadyAnswered);
        }
        let len = self.current_question().alternatives.len();
        if index >= len {
            return Err(TransitionError::AlternativeOutOfRange { index, len });
        }

        if self.selected_alternative != Some(index) {
            self.selected_alternative = Some(index);
            self.events.push(SessionEvent::AlternativeSelected { index });
        }
        Ok(())
    }

    pub fn confirm_answer(&mut self) -> Result<ConfirmOutcome, TransitionError> {
        self.ensure_active()?;

        let Some(selected) = self.selected_alternative.take() else {
            self.events.push(SessionEvent::SkipConfirmationRequested);
            return Ok(ConfirmOutcome::NeedsSelection);
        };

        let outcome = if selected == self.current_question().correct {
            self.score += 1;
            self.reply_status = ReplyStatus::Correct;
            ConfirmOutcome::Correct
        } else {
            self.reply_status = ReplyStatus::Incorrect;
            ConfirmOutcome::Incorrect
        };

        self.events.push(SessionEvent::AnswerConfirmed {
            status: self.reply_status,
            score: self.score,
        });
        Ok(outcome)
    }

    /// Moves on after a reply has been recorded for the current question.
    pub fn advance(&mut self) -> Result<Progress, TransitionError> {
        self.ensure_active()?;
        if self.reply_status == ReplyStatus::None {
            return Err(TransitionError::NoReplyRecorded);
        }
        Ok(self.move_next())
    }

    /// Moves on without scoring the current question.
    pub fn skip(&mut self) -> Result<Progress, TransitionError> {
        self.ensure_active()?;
        Ok(self.move_next())
    }

    pub fn abort(&mut self) -> Result<(), TransitionError> {
        self.ensure_active()?;
        self.phase = SessionPhase::Exited;
        self.selected_alternative = None;
        self.events.push(SessionEvent::Exited);
        Ok(())
    }

    fn move_next(&mut self) -> Progress {
        self.selected_alternative = None;

        if self.is_last_question() {
            self.phase = SessionPhase::Completed;
            let record = self.completion_record();
            self.events.push(SessionEvent::Completed(record.clone()));
            return Progress::Completed(record);
        }

        self.current_index += 1;
        self.reply_status = ReplyStatus::None;
        self.events.push(SessionEvent::QuestionChanged {
            index: self.current_index,
            total: self.questions.len(),
        });
        Progress::Next {
            index: self.current_index,
        }
    }

    fn completion_record(&self) -> CompletionRecord {
        CompletionRecord {
            session_id: chrono::Utc::now().timestamp_millis().to_string(),
            title: self.title.clone(),
            level: self.level,
            score: self.score,
            total_questions: self.questions.len(),
        }
    }

    fn ensure_active(&self) -> Result<(), TransitionError> {
        if self.phase == SessionPhase::Active {
            Ok(())
        } else {
            Err(TransitionError::NotActive { phase: self.phase })
        }
    }
}
