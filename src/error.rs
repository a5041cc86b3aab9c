use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuizError {
    #[error("quiz '{quiz_id}' not found")]
    NotFound { quiz_id: String },

    #[error("quiz '{quiz_id}' is invalid: {reason}")]
    InvalidQuiz { quiz_id: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("channel closed")]
    ChannelClosed,
}

/// A state-machine call made from a state where it is not allowed.
/// The session is left untouched whenever one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("session is not active (phase: {phase:?})")]
    NotActive { phase: crate::session::SessionPhase },

    #[error("current question already has a reply")]
    AlreadyAnswered,

    #[error("no reply recorded for the current question")]
    NoReplyRecorded,

    #[error("alternative {index} out of range (question has {len})")]
    AlternativeOutOfRange { index: usize, len: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_quiz() {
        let err = QuizError::NotFound {
            quiz_id: "42".to_string(),
        };
        assert_eq!(err.to_string(), "quiz '42' not found");
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
        let err: QuizError = io.into();
        assert!(matches!(err, QuizError::Io(_)));
    }
}
