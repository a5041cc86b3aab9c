//! Quiz screen controller.
//!
//! Routes terminal input to the session, gesture recognizer and prompts, and
//! pumps session events through the feedback orchestrator every frame. All
//! session mutation happens here, on the main loop's thread.

use crate::completion::{CompletionHandoff, HandoffStatus, Navigator};
use crate::config::QuizConfig;
use crate::error::{QuizError, TransitionError};
use crate::feedback::{card_style, CardStyle, FeedbackCommand, FeedbackOrchestrator, HeaderStyles};
use crate::gesture::{GestureEvent, GestureRecognizer};
use crate::logger;
use crate::models::ReplyStatus;
use crate::progress::ProgressIndicator;
use crate::quiz_source::QuestionSource;
use crate::session::{QuizSession, SessionEvent, SessionPhase};
use crossbeam_channel::{unbounded, Receiver};
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use rand::seq::SliceRandom;
use ratatui::layout::{Position, Rect};
use std::time::{Duration, Instant};

/// Logical pixels per terminal column when mapping mouse drags.
pub const PX_PER_COLUMN: f32 = 8.0;
/// Logical pixels per terminal row when mapping scroll.
pub const PX_PER_ROW: f32 = 20.0;
const SCROLL_STEP_ROWS: f32 = 3.0;
const MAX_SCROLL: f32 = 400.0;

/// Load a quiz and start a session on it, shuffling question order when
/// configured to.
pub fn load_session(
    source: &dyn QuestionSource,
    quiz_id: &str,
    config: &QuizConfig,
) -> Result<QuizSession, QuizError> {
    if !config.shuffle_questions {
        return QuizSession::initialize(source, quiz_id);
    }

    let mut quiz = source.load_quiz(quiz_id)?;
    quiz.questions.shuffle(&mut rand::thread_rng());
    QuizSession::from_quiz(quiz)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    /// "Skip this question?"
    Skip,
    /// "Stop now?"
    Stop,
}

#[derive(Debug)]
pub struct QuizScreen {
    session: QuizSession,
    gesture: GestureRecognizer,
    gesture_events: Receiver<GestureEvent>,
    feedback: FeedbackOrchestrator,
    progress: ProgressIndicator,
    prompt: Option<Prompt>,
    config: QuizConfig,
    drag_column: Option<u16>,
    pub card_area: Option<Rect>,
    pub history_status: Option<HandoffStatus>,
}

impl QuizScreen {
    pub fn new(session: QuizSession, config: QuizConfig) -> Self {
        let (tx, rx) = unbounded();
        let progress = ProgressIndicator::new(
            session.total(),
            session.current_index() + 1,
            config.timing_duration(),
        );

        Self {
            gesture: GestureRecognizer::new(&config, tx),
            gesture_events: rx,
            feedback: FeedbackOrchestrator::new(&config),
            progress,
            session,
            prompt: None,
            config,
            drag_column: None,
            card_area: None,
            history_status: None,
        }
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn prompt(&self) -> Option<Prompt> {
        self.prompt
    }

    pub fn progress(&self) -> &ProgressIndicator {
        &self.progress
    }

    pub fn header_styles(&self) -> HeaderStyles {
        self.feedback.header_styles()
    }

    pub fn scroll_y(&self) -> f32 {
        self.feedback.scroll_y()
    }

    pub fn card_style(&self) -> CardStyle {
        card_style(
            self.gesture.offset(),
            self.feedback.shake_translate_x(),
            &self.config,
        )
    }

    pub fn overlay(&self) -> Option<(ReplyStatus, f32)> {
        self.feedback.overlay()
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_pressed()
    }

    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        handoff: &CompletionHandoff,
        navigator: &mut dyn Navigator,
    ) {
        if let Some(prompt) = self.prompt {
            self.answer_prompt(prompt, key.code);
        } else {
            let result = match key.code {
                KeyCode::Char(c) if c.is_ascii_digit() && c != '0' => {
                    let index = c as usize - '1' as usize;
                    self.session.select_alternative(index)
                }
                KeyCode::Up => self.move_selection(-1),
                KeyCode::Down => self.move_selection(1),
                KeyCode::Enter => self.confirm_or_continue(),
                KeyCode::Char('s') => {
                    self.prompt = Some(Prompt::Skip);
                    Ok(())
                }
                KeyCode::Esc => {
                    self.prompt = Some(Prompt::Stop);
                    Ok(())
                }
                KeyCode::PageDown => {
                    self.scroll_by(SCROLL_STEP_ROWS * 2.0);
                    Ok(())
                }
                KeyCode::PageUp => {
                    self.scroll_by(-SCROLL_STEP_ROWS * 2.0);
                    Ok(())
                }
                _ => Ok(()),
            };
            log_rejected(result);
        }

        self.pump(handoff, navigator);
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        if self.prompt.is_some() {
            return;
        }

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let on_card = self
                    .card_area
                    .is_some_and(|area| area.contains(Position::new(mouse.column, mouse.row)));
                if on_card {
                    self.gesture.press(now);
                    self.drag_column = Some(mouse.column);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(last) = self.drag_column {
                    let delta = (mouse.column as f32 - last as f32) * PX_PER_COLUMN;
                    self.drag_column = Some(mouse.column);
                    self.gesture.drag(delta, now);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if self.drag_column.take().is_some() {
                    self.gesture.release();
                }
            }
            MouseEventKind::ScrollDown => self.scroll_by(SCROLL_STEP_ROWS),
            MouseEventKind::ScrollUp => self.scroll_by(-SCROLL_STEP_ROWS),
            _ => {}
        }
    }

    /// One frame: advance animations, act on gesture events and feedback
    /// commands, and forward session events.
    pub fn tick(&mut self, dt: Duration, handoff: &CompletionHandoff, navigator: &mut dyn Navigator) {
        self.gesture.tick(dt);
        self.progress.tick(dt);

        while let Ok(event) = self.gesture_events.try_recv() {
            match event {
                GestureEvent::SkipRequested => {
                    if self.session.phase() == SessionPhase::Active {
                        self.prompt = Some(Prompt::Skip);
                    }
                }
            }
        }

        for command in self.feedback.tick(dt) {
            self.run_command(command);
        }

        self.pump(handoff, navigator);
    }

    pub fn unmount(&mut self) {
        self.gesture.unmount();
        self.feedback.unmount();
        self.drag_column = None;
    }

    fn answer_prompt(&mut self, prompt: Prompt, code: KeyCode) {
        let accepted = match code {
            KeyCode::Char('y') | KeyCode::Char('Y') => true,
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => false,
            _ => return,
        };
        self.prompt = None;

        match (prompt, accepted) {
            (Prompt::Skip, true) => log_rejected(self.session.skip().map(|_| ())),
            (Prompt::Skip, false) => {}
            (Prompt::Stop, true) => log_rejected(self.session.abort()),
            (Prompt::Stop, false) => self.gesture.spring_back(),
        }
    }

    fn confirm_or_continue(&mut self) -> Result<(), TransitionError> {
        if self.session.reply_status() == ReplyStatus::None {
            self.session.confirm_answer().map(|_| ())
        } else {
            self.session.advance().map(|_| ())
        }
    }

    fn move_selection(&mut self, step: isize) -> Result<(), TransitionError> {
        let len = self.session.current_question().alternatives.len() as isize;
        let next = match self.session.selected_alternative() {
            Some(current) => (current as isize + step).clamp(0, len - 1),
            None if step > 0 => 0,
            None => len - 1,
        };
        self.session.select_alternative(next as usize)
    }

    fn scroll_by(&mut self, rows: f32) {
        let next = (self.feedback.scroll_y() + rows * PX_PER_ROW).clamp(0.0, MAX_SCROLL);
        self.feedback.on_scroll(next);
    }

    fn run_command(&mut self, command: FeedbackCommand) {
        match command {
            FeedbackCommand::Advance => log_rejected(self.session.advance().map(|_| ())),
        }
    }

    fn pump(&mut self, handoff: &CompletionHandoff, navigator: &mut dyn Navigator) {
        loop {
            let events = self.session.take_events();
            if events.is_empty() {
                break;
            }

            for event in events {
                for command in self.feedback.handle_event(&event) {
                    self.run_command(command);
                }

                match event {
                    SessionEvent::SkipConfirmationRequested => self.prompt = Some(Prompt::Skip),
                    SessionEvent::QuestionChanged { index, total } => {
                        self.prompt = None;
                        self.progress.update(total, index + 1);
                        self.gesture.cancel();
                    }
                    SessionEvent::Completed(record) => {
                        self.prompt = None;
                        self.history_status = Some(handoff.hand_off(record, navigator));
                        self.unmount();
                    }
                    SessionEvent::Exited => {
                        self.prompt = None;
                        handoff.exit(navigator);
                        self.unmount();
                    }
                    SessionEvent::AlternativeSelected { .. }
                    | SessionEvent::AnswerConfirmed { .. } => {}
                }
            }
        }
    }
}

fn log_rejected(result: Result<(), TransitionError>) {
    if let Err(e) = result {
        logger::log(&format!("Ignored quiz action: {}", e));
    }
}
