use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub title: String,
    pub alternatives: Vec<String>,
    /// Position of the correct entry in `alternatives`. Correctness is decided
    /// by position, so reordering alternatives changes which one is right.
    pub correct: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    pub level: u8,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSummary {
    pub id: String,
    pub title: String,
    pub level: u8,
    pub questions: usize,
}

impl From<&Quiz> for QuizSummary {
    fn from(quiz: &Quiz) -> Self {
        Self {
            id: quiz.id.clone(),
            title: quiz.title.clone(),
            level: quiz.level,
            questions: quiz.questions.len(),
        }
    }
}

/// Classification of the last confirmed answer on the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplyStatus {
    #[default]
    None,
    Correct,
    Incorrect,
}

/// Summary of a finished session, handed to history storage exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub session_id: String,
    pub title: String,
    pub level: u8,
    pub score: usize,
    pub total_questions: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Finish,
}

impl Route {
    pub fn name(self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::Finish => "finish",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppState {
    Menu,
    Loading(String),
    LoadFailed(String),
    Quiz,
    Finish { score: usize, total: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_status_defaults_to_none() {
        assert_eq!(ReplyStatus::default(), ReplyStatus::None);
    }

    #[test]
    fn test_route_names() {
        assert_eq!(Route::Home.name(), "home");
        assert_eq!(Route::Finish.name(), "finish");
    }

    #[test]
    fn test_completion_record_serializes_with_field_names() {
        let record = CompletionRecord {
            session_id: "1700000000000".to_string(),
            title: "Rust".to_string(),
            level: 2,
            score: 2,
            total_questions: 3,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"total_questions\":3"));
        let back: CompletionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
