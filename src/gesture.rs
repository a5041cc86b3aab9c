//! Swipe-to-skip gesture on the question card.
//!
//! A press must be held for the long-press delay before horizontal motion
//! moves the card, so plain clicks and scrolling never drag it. Only leftward
//! deltas accumulate. Releasing past the skip threshold sends
//! [`GestureEvent::SkipRequested`] over a channel for the main loop to act on;
//! either way the card springs back to rest.

use crate::animation::{AnimationValue, TransitionSpec};
use crate::config::QuizConfig;
use crate::logger;
use crossbeam_channel::Sender;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureEvent {
    SkipRequested,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    Dragging,
}

#[derive(Debug)]
pub struct GestureRecognizer {
    offset: AnimationValue,
    phase: GesturePhase,
    pressed_at: Option<Instant>,
    long_press_delay: Duration,
    skip_threshold: f32,
    spring: TransitionSpec,
    events: Sender<GestureEvent>,
}

impl GestureRecognizer {
    pub fn new(config: &QuizConfig, events: Sender<GestureEvent>) -> Self {
        Self {
            offset: AnimationValue::new("card_offset", 0.0),
            phase: GesturePhase::Idle,
            pressed_at: None,
            long_press_delay: config.long_press_delay(),
            skip_threshold: config.skip_threshold,
            spring: TransitionSpec::Spring(config.spring),
            events,
        }
    }

    pub fn offset(&self) -> f32 {
        self.offset.value()
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed_at.is_some()
    }

    pub fn press(&mut self, now: Instant) {
        self.pressed_at = Some(now);
    }

    /// Feed one horizontal delta sample. Motion before the long-press delay
    /// has elapsed fails the press; after activation only leftward motion
    /// moves the card.
    pub fn drag(&mut self, delta_x: f32, now: Instant) {
        let Some(pressed_at) = self.pressed_at else {
            return;
        };

        if self.phase == GesturePhase::Idle {
            if now.duration_since(pressed_at) < self.long_press_delay {
                if delta_x != 0.0 {
                    self.pressed_at = None;
                }
                return;
            }
            self.phase = GesturePhase::Dragging;
            self.offset.set(0.0);
        }

        if delta_x < 0.0 {
            let offset = self.offset.value() + delta_x;
            self.offset.set(offset);
        }
    }

    /// End the interaction. Returns whether a skip was requested.
    pub fn release(&mut self) -> bool {
        self.pressed_at = None;
        if self.phase != GesturePhase::Dragging {
            return false;
        }

        let crossed = self.offset.value() < self.skip_threshold;
        if crossed {
            logger::log(&format!(
                "Card released at {:.0}, requesting skip",
                self.offset.value()
            ));
            if self.events.send(GestureEvent::SkipRequested).is_err() {
                logger::log("Gesture event channel closed, skip request dropped");
            }
        }

        self.phase = GesturePhase::Idle;
        self.spring_back();
        crossed
    }

    /// Abandon the interaction without requesting a skip.
    pub fn cancel(&mut self) {
        self.pressed_at = None;
        self.phase = GesturePhase::Idle;
        self.spring_back();
    }

    pub fn spring_back(&mut self) {
        self.offset.animate_to(0.0, self.spring);
    }

    /// Screen teardown: stop updating wherever the card is.
    pub fn unmount(&mut self) {
        self.pressed_at = None;
        self.phase = GesturePhase::Idle;
        self.offset.stop();
    }

    pub fn tick(&mut self, dt: Duration) -> bool {
        self.offset.tick(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::{unbounded, Receiver};

    const FRAME: Duration = Duration::from_millis(16);

    fn recognizer() -> (GestureRecognizer, Receiver<GestureEvent>) {
        let (tx, rx) = unbounded();
        (GestureRecognizer::new(&QuizConfig::default(), tx), rx)
    }

    fn held(g: &mut GestureRecognizer) -> Instant {
        let start = Instant::now();
        g.press(start);
        start + Duration::from_millis(250)
    }

    fn settle(g: &mut GestureRecognizer) {
        for _ in 0..2000 {
            if !g.tick(FRAME) {
                return;
            }
        }
        panic!("card never settled");
    }

    #[test]
    fn test_drag_before_long_press_is_ignored() {
        let (mut g, _rx) = recognizer();
        let start = Instant::now();
        g.press(start);
        g.drag(-50.0, start + Duration::from_millis(100));
        assert_eq!(g.offset(), 0.0);
        assert_eq!(g.phase(), GesturePhase::Idle);
    }

    #[test]
    fn test_motion_during_hold_fails_the_press() {
        let (mut g, rx) = recognizer();
        let start = Instant::now();
        g.press(start);
        g.drag(-8.0, start + Duration::from_millis(50));
        assert!(!g.is_pressed());

        g.drag(-300.0, start + Duration::from_millis(400));
        assert_eq!(g.phase(), GesturePhase::Idle);
        assert_eq!(g.offset(), 0.0);
        assert!(!g.release());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_still_hold_then_drag_activates() {
        let (mut g, _rx) = recognizer();
        let start = Instant::now();
        g.press(start);
        g.drag(0.0, start + Duration::from_millis(50));
        assert!(g.is_pressed());

        g.drag(-40.0, start + Duration::from_millis(250));
        assert_eq!(g.phase(), GesturePhase::Dragging);
        assert_eq!(g.offset(), -40.0);
    }

    #[test]
    fn test_drag_without_press_is_ignored() {
        let (mut g, _rx) = recognizer();
        g.drag(-50.0, Instant::now());
        assert_eq!(g.offset(), 0.0);
    }

    #[test]
    fn test_leftward_motion_accumulates_and_never_increases() {
        let (mut g, _rx) = recognizer();
        let now = held(&mut g);

        let mut last = g.offset();
        for delta in [-10.0, -25.0, -5.0, -40.0] {
            g.drag(delta, now);
            assert_eq!(g.phase(), GesturePhase::Dragging);
            assert!(g.offset() <= last);
            last = g.offset();
        }
        assert_eq!(g.offset(), -80.0);
    }

    #[test]
    fn test_rightward_sample_is_ignored() {
        let (mut g, _rx) = recognizer();
        let now = held(&mut g);
        g.drag(-60.0, now);
        g.drag(30.0, now);
        assert_eq!(g.offset(), -60.0);
    }

    #[test]
    fn test_release_past_threshold_requests_one_skip() {
        let (mut g, rx) = recognizer();
        let now = held(&mut g);
        g.drag(-250.0, now);

        assert!(g.release());
        assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec![GestureEvent::SkipRequested]);
        assert_eq!(g.phase(), GesturePhase::Idle);

        settle(&mut g);
        assert_eq!(g.offset(), 0.0);
    }

    #[test]
    fn test_release_short_of_threshold_springs_back_silently() {
        let (mut g, rx) = recognizer();
        let now = held(&mut g);
        g.drag(-150.0, now);

        assert!(!g.release());
        assert!(rx.try_recv().is_err());

        settle(&mut g);
        assert_eq!(g.offset(), 0.0);
    }

    #[test]
    fn test_release_exactly_at_threshold_does_not_skip() {
        let (mut g, rx) = recognizer();
        let now = held(&mut g);
        g.drag(-200.0, now);
        assert!(!g.release());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_new_drag_starts_from_rest() {
        let (mut g, _rx) = recognizer();
        let now = held(&mut g);
        g.drag(-120.0, now);
        g.release();
        g.tick(FRAME);

        let now = held(&mut g);
        g.drag(-10.0, now);
        assert_eq!(g.offset(), -10.0);
    }

    #[test]
    fn test_cancel_never_requests_skip() {
        let (mut g, rx) = recognizer();
        let now = held(&mut g);
        g.drag(-400.0, now);
        g.cancel();
        assert!(rx.try_recv().is_err());
        settle(&mut g);
        assert_eq!(g.offset(), 0.0);
    }

    #[test]
    fn test_release_with_closed_channel_does_not_panic() {
        let (mut g, rx) = recognizer();
        drop(rx);
        let now = held(&mut g);
        g.drag(-300.0, now);
        assert!(g.release());
    }

    #[test]
    fn test_unmount_freezes_offset() {
        let (mut g, _rx) = recognizer();
        let now = held(&mut g);
        g.drag(-300.0, now);
        g.release();
        g.tick(FRAME);
        let frozen = g.offset();
        g.unmount();
        assert!(!g.tick(FRAME));
        assert_eq!(g.offset(), frozen);
    }
}
