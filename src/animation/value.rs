use super::Easing;
use crate::config::SpringConfig;
use std::collections::VecDeque;
use std::time::Duration;

const SPRING_STEP: f32 = 1.0 / 240.0;
const REST_DISPLACEMENT: f32 = 0.01;
const REST_SPEED: f32 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransitionSpec {
    Timing { duration: Duration, easing: Easing },
    Spring(SpringConfig),
}

impl TransitionSpec {
    pub fn timing(duration: Duration) -> Self {
        Self::Timing {
            duration,
            easing: Easing::default(),
        }
    }

    pub fn timing_with(duration: Duration, easing: Easing) -> Self {
        Self::Timing { duration, easing }
    }
}

#[derive(Clone, Copy, Debug)]
struct Running {
    from: f32,
    to: f32,
    spec: TransitionSpec,
    elapsed: Duration,
}

/// A named scalar driven towards targets by timing or spring transitions.
#[derive(Clone, Debug)]
pub struct AnimationValue {
    name: &'static str,
    value: f32,
    velocity: f32,
    running: Option<Running>,
    queued: VecDeque<(f32, TransitionSpec)>,
}

impl AnimationValue {
    pub fn new(name: &'static str, value: f32) -> Self {
        Self {
            name,
            value,
            velocity: 0.0,
            running: None,
            queued: VecDeque::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn is_animating(&self) -> bool {
        self.running.is_some()
    }

    /// Jump to `value`, cancelling anything in flight.
    pub fn set(&mut self, value: f32) {
        self.stop();
        self.value = value;
        self.velocity = 0.0;
    }

    pub fn animate_to(&mut self, target: f32, spec: TransitionSpec) {
        self.sequence(vec![(target, spec)]);
    }

    /// Run the transitions one after another, replacing anything in flight.
    pub fn sequence(&mut self, steps: Vec<(f32, TransitionSpec)>) {
        self.queued = steps.into();
        self.running = None;
        self.start_next();
    }

    /// Freeze at the current value. In-flight transitions are dropped.
    pub fn stop(&mut self) {
        self.running = None;
        self.queued.clear();
    }

    /// Advance by `dt`. Returns whether the value is still animating.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let Some(mut running) = self.running else {
            return false;
        };
        running.elapsed += dt;

        let finished = match running.spec {
            TransitionSpec::Timing { duration, easing } => {
                let progress = if duration.is_zero() {
                    1.0
                } else {
                    running.elapsed.as_secs_f32() / duration.as_secs_f32()
                };
                if progress >= 1.0 {
                    self.value = running.to;
                    true
                } else {
                    self.value = running.from + (running.to - running.from) * easing.apply(progress);
                    false
                }
            }
            TransitionSpec::Spring(spring) => self.step_spring(spring, running.to, dt),
        };

        if finished {
            self.velocity = 0.0;
            self.start_next();
        } else {
            self.running = Some(running);
        }
        self.running.is_some()
    }

    fn step_spring(&mut self, spring: SpringConfig, target: f32, dt: Duration) -> bool {
        let mass = spring.mass.max(f32::EPSILON);
        let mut remaining = dt.as_secs_f32();

        while remaining > 0.0 {
            let step = remaining.min(SPRING_STEP);
            let force = -spring.stiffness * (self.value - target) - spring.damping * self.velocity;
            self.velocity += force / mass * step;
            self.value += self.velocity * step;
            remaining -= step;
        }

        if (self.value - target).abs() < REST_DISPLACEMENT && self.velocity.abs() < REST_SPEED {
            self.value = target;
            return true;
        }
        false
    }

    fn start_next(&mut self) {
        self.running = self.queued.pop_front().map(|(to, spec)| Running {
            from: self.value,
            to,
            spec,
            elapsed: Duration::ZERO,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn run_until_rest(value: &mut AnimationValue, max_frames: usize) -> usize {
        for frame in 0..max_frames {
            if !value.tick(FRAME) {
                return frame;
            }
        }
        panic!("{} still animating after {} frames", value.name(), max_frames);
    }

    #[test]
    fn test_timing_reaches_target() {
        let mut v = AnimationValue::new("progress", 0.0);
        v.animate_to(100.0, TransitionSpec::timing(Duration::from_millis(300)));
        assert!(v.is_animating());

        v.tick(Duration::from_millis(150));
        assert!((v.value() - 50.0).abs() < 1e-3);

        v.tick(Duration::from_millis(150));
        assert_eq!(v.value(), 100.0);
        assert!(!v.is_animating());
    }

    #[test]
    fn test_zero_duration_jumps() {
        let mut v = AnimationValue::new("x", 3.0);
        v.animate_to(7.0, TransitionSpec::timing(Duration::ZERO));
        assert!(!v.tick(FRAME));
        assert_eq!(v.value(), 7.0);
    }

    #[test]
    fn test_sequence_runs_in_order() {
        let mut v = AnimationValue::new("shake", 0.0);
        v.sequence(vec![
            (3.0, TransitionSpec::timing_with(Duration::from_millis(100), Easing::Bounce)),
            (0.0, TransitionSpec::timing(Duration::from_millis(100))),
        ]);

        v.tick(Duration::from_millis(100));
        assert_eq!(v.value(), 3.0);
        assert!(v.is_animating());

        v.tick(Duration::from_millis(100));
        assert_eq!(v.value(), 0.0);
        assert!(!v.is_animating());
    }

    #[test]
    fn test_spring_settles_on_target() {
        let mut v = AnimationValue::new("card", -250.0);
        v.animate_to(0.0, TransitionSpec::Spring(SpringConfig::default()));
        run_until_rest(&mut v, 1000);
        assert_eq!(v.value(), 0.0);
    }

    #[test]
    fn test_underdamped_spring_overshoots() {
        let mut v = AnimationValue::new("card", -250.0);
        v.animate_to(0.0, TransitionSpec::Spring(SpringConfig::default()));
        let mut max = f32::MIN;
        while v.tick(FRAME) {
            max = max.max(v.value());
        }
        assert!(max > 0.0);
    }

    #[test]
    fn test_set_cancels_animation() {
        let mut v = AnimationValue::new("x", 0.0);
        v.animate_to(10.0, TransitionSpec::timing(Duration::from_millis(300)));
        v.set(2.0);
        assert!(!v.is_animating());
        assert!(!v.tick(FRAME));
        assert_eq!(v.value(), 2.0);
    }

    #[test]
    fn test_stop_freezes_value() {
        let mut v = AnimationValue::new("x", 0.0);
        v.animate_to(10.0, TransitionSpec::timing_with(Duration::from_millis(100), Easing::Linear));
        v.tick(Duration::from_millis(50));
        v.stop();
        assert!((v.value() - 5.0).abs() < 1e-3);
        assert!(!v.tick(FRAME));
        assert!((v.value() - 5.0).abs() < 1e-3);
    }
}
