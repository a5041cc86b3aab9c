use crate::error::QuizError;
use crate::logger;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 100.0,
            damping: 10.0,
            mass: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    /// Hold time before a press on the card turns into a drag.
    pub long_press_delay_ms: u64,
    /// Drag offset past which releasing the card asks to skip.
    pub skip_threshold: f32,
    /// Card rotation in degrees is `offset / card_inclination`.
    pub card_inclination: f32,
    /// Offset at which the dragged card is fully transparent.
    pub card_fade_distance: f32,
    pub spring: SpringConfig,
    pub timing_duration_ms: u64,
    pub shake_amplitude: f32,
    /// Pause between a correct answer and the automatic advance.
    pub review_delay_ms: u64,
    pub overlay_duration_ms: u64,
    pub history_retries: u32,
    pub quizzes_dir: PathBuf,
    /// Shuffles question order only. Alternatives keep their authored order.
    pub shuffle_questions: bool,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            long_press_delay_ms: 200,
            skip_threshold: -200.0,
            card_inclination: 5.0,
            card_fade_distance: -300.0,
            spring: SpringConfig::default(),
            timing_duration_ms: 300,
            shake_amplitude: 15.0,
            review_delay_ms: 0,
            overlay_duration_ms: 400,
            history_retries: 2,
            quizzes_dir: PathBuf::from("quizzes"),
            shuffle_questions: false,
        }
    }
}

impl QuizConfig {
    /// Defaults, overlaid with `<data_dir>/config.json` and then environment variables.
    pub fn load() -> Self {
        let path = crate::db::get_data_dir().join(CONFIG_FILE);
        let mut config = match Self::from_file(&path) {
            Ok(Some(config)) => config,
            Ok(None) => Self::default(),
            Err(e) => {
                logger::log(&format!(
                    "Ignoring config file {}: {}",
                    path.display(),
                    e
                ));
                Self::default()
            }
        };
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    pub fn from_file(path: &Path) -> Result<Option<Self>, QuizError> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("QUIZ_DIR") {
            self.quizzes_dir = PathBuf::from(dir);
        }
        if let Some(ms) = lookup("QUIZ_REVIEW_DELAY_MS").and_then(|v| v.parse().ok()) {
            self.review_delay_ms = ms;
        }
        if let Some(ms) = lookup("QUIZ_LONG_PRESS_MS").and_then(|v| v.parse().ok()) {
            self.long_press_delay_ms = ms;
        }
    }

    pub fn long_press_delay(&self) -> Duration {
        Duration::from_millis(self.long_press_delay_ms)
    }

    pub fn timing_duration(&self) -> Duration {
        Duration::from_millis(self.timing_duration_ms)
    }

    pub fn review_delay(&self) -> Duration {
        Duration::from_millis(self.review_delay_ms)
    }

    pub fn overlay_duration(&self) -> Duration {
        Duration::from_millis(self.overlay_duration_ms)
    }
}
