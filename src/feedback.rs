//! Feedback orchestration.
//!
//! Reacts to session events with animations (shake on a wrong answer, an
//! overlay flash on every reply) and issues commands back to the session:
//! a correct answer schedules the automatic advance, a wrong one waits for
//! the user. Also derives the scroll- and drag-driven presentation styles.

use crate::animation::{interpolate, AnimationValue, Easing, Extrapolation, TransitionSpec};
use crate::config::QuizConfig;
use crate::models::ReplyStatus;
use crate::session::SessionEvent;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackCommand {
    Advance,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderStyles {
    pub fixed_opacity: f32,
    pub fixed_translate_y: f32,
    pub inline_opacity: f32,
}

impl HeaderStyles {
    pub fn for_scroll(scroll_y: f32) -> Self {
        Self {
            fixed_opacity: interpolate(scroll_y, &[50.0, 90.0], &[0.0, 1.0], Extrapolation::Clamp),
            fixed_translate_y: interpolate(
                scroll_y,
                &[50.0, 100.0],
                &[-40.0, 1.0],
                Extrapolation::Clamp,
            ),
            inline_opacity: interpolate(scroll_y, &[60.0, 90.0], &[1.0, 0.0], Extrapolation::Clamp),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardStyle {
    pub translate_x: f32,
    pub rotate_deg: f32,
    pub opacity: f32,
}

/// Card transform from the drag offset plus the shake displacement.
pub fn card_style(drag_offset: f32, shake_x: f32, config: &QuizConfig) -> CardStyle {
    CardStyle {
        translate_x: drag_offset + shake_x,
        rotate_deg: drag_offset / config.card_inclination,
        opacity: interpolate(
            drag_offset,
            &[0.0, config.card_fade_distance],
            &[1.0, 0.0],
            Extrapolation::Extend,
        ),
    }
}

#[derive(Debug)]
pub struct FeedbackOrchestrator {
    shake: AnimationValue,
    overlay: AnimationValue,
    scroll_y: AnimationValue,
    overlay_status: ReplyStatus,
    pending_advance: Option<Duration>,
    review_delay: Duration,
    timing: Duration,
    overlay_duration: Duration,
    shake_amplitude: f32,
}

impl FeedbackOrchestrator {
    pub fn new(config: &QuizConfig) -> Self {
        Self {
            shake: AnimationValue::new("shake", 0.0),
            overlay: AnimationValue::new("overlay", 0.0),
            scroll_y: AnimationValue::new("scroll_y", 0.0),
            overlay_status: ReplyStatus::None,
            pending_advance: None,
            review_delay: config.review_delay(),
            timing: config.timing_duration(),
            overlay_duration: config.overlay_duration(),
            shake_amplitude: config.shake_amplitude,
        }
    }

    pub fn handle_event(&mut self, event: &SessionEvent) -> Vec<FeedbackCommand> {
        match event {
            SessionEvent::AnswerConfirmed { status, .. } => {
                self.flash(*status);
                match status {
                    ReplyStatus::Correct => {
                        if self.review_delay.is_zero() {
                            return vec![FeedbackCommand::Advance];
                        }
                        self.pending_advance = Some(self.review_delay);
                    }
                    ReplyStatus::Incorrect => self.start_shake(),
                    ReplyStatus::None => {}
                }
                Vec::new()
            }
            SessionEvent::QuestionChanged { .. } => {
                self.pending_advance = None;
                Vec::new()
            }
            SessionEvent::Completed(_) | SessionEvent::Exited => {
                self.pending_advance = None;
                self.shake.set(0.0);
                Vec::new()
            }
            SessionEvent::AlternativeSelected { .. } | SessionEvent::SkipConfirmationRequested => {
                Vec::new()
            }
        }
    }

    pub fn tick(&mut self, dt: Duration) -> Vec<FeedbackCommand> {
        self.shake.tick(dt);
        if !self.overlay.tick(dt) && self.overlay.value() <= 0.0 {
            self.overlay_status = ReplyStatus::None;
        }

        match self.pending_advance {
            Some(remaining) if remaining <= dt => {
                self.pending_advance = None;
                vec![FeedbackCommand::Advance]
            }
            Some(remaining) => {
                self.pending_advance = Some(remaining - dt);
                Vec::new()
            }
            None => Vec::new(),
        }
    }

    pub fn on_scroll(&mut self, scroll_y: f32) {
        self.scroll_y.set(scroll_y.max(0.0));
    }

    pub fn scroll_y(&self) -> f32 {
        self.scroll_y.value()
    }

    pub fn header_styles(&self) -> HeaderStyles {
        HeaderStyles::for_scroll(self.scroll_y.value())
    }

    pub fn shake_translate_x(&self) -> f32 {
        interpolate(
            self.shake.value(),
            &[0.0, 1.5, 3.0],
            &[0.0, -self.shake_amplitude, self.shake_amplitude],
            Extrapolation::Extend,
        )
    }

    /// The reply being flashed and its current intensity, if any.
    pub fn overlay(&self) -> Option<(ReplyStatus, f32)> {
        if self.overlay_status == ReplyStatus::None {
            return None;
        }
        Some((self.overlay_status, self.overlay.value()))
    }

    pub fn is_advance_pending(&self) -> bool {
        self.pending_advance.is_some()
    }

    pub fn is_animating(&self) -> bool {
        self.shake.is_animating() || self.overlay.is_animating()
    }

    pub fn unmount(&mut self) {
        self.pending_advance = None;
        self.shake.stop();
        self.overlay.stop();
    }

    fn start_shake(&mut self) {
        self.shake.sequence(vec![
            (3.0, TransitionSpec::timing_with(self.timing, Easing::Bounce)),
            (0.0, TransitionSpec::timing(self.timing)),
        ]);
    }

    fn flash(&mut self, status: ReplyStatus) {
        self.overlay_status = status;
        self.overlay.sequence(vec![
            (1.0, TransitionSpec::timing_with(self.overlay_duration, Easing::Linear)),
            (0.0, TransitionSpec::timing_with(self.overlay_duration, Easing::Linear)),
        ]);
    }
}
