use crate::animation::{AnimationValue, TransitionSpec};
use std::time::Duration;

/// Progress bar model: `round(current / total * 100)` percent, eased towards
/// on every change of `current`.
#[derive(Debug)]
pub struct ProgressIndicator {
    total: usize,
    current: usize,
    width: AnimationValue,
    timing: Duration,
}

impl ProgressIndicator {
    pub fn new(total: usize, current: usize, timing: Duration) -> Self {
        let mut progress = Self {
            total,
            current: 0,
            width: AnimationValue::new("progress_width", 0.0),
            timing,
        };
        progress.update(total, current);
        progress
    }

    pub fn update(&mut self, total: usize, current: usize) {
        if total == self.total && current == self.current {
            return;
        }
        self.total = total;
        self.current = current;
        self.width
            .animate_to(self.percentage() as f32, TransitionSpec::timing(self.timing));
    }

    pub fn percentage(&self) -> u16 {
        percentage(self.current, self.total)
    }

    /// Animated width in percent.
    pub fn width(&self) -> f32 {
        self.width.value()
    }

    pub fn tick(&mut self, dt: Duration) -> bool {
        self.width.tick(dt)
    }
}

pub fn percentage(current: usize, total: usize) -> u16 {
    if total == 0 {
        return 0;
    }
    ((current as f64 / total as f64) * 100.0).round() as u16
}
