pub mod animation;
pub mod completion;
pub mod config;
pub mod db;
pub mod error;
pub mod feedback;
pub mod gesture;
pub mod history_worker;
pub mod logger;
pub mod models;
pub mod progress;
pub mod quiz_source;
pub mod screen;
pub mod session;
pub mod ui;
pub mod utils;


// Re-exports for convenience
pub use completion::{CompletionHandoff, HandoffStatus, HistoryWriter, Navigator};
pub use config::QuizConfig;
pub use error::{QuizError, TransitionError};
pub use history_worker::{spawn_history_worker, HistoryRequest, HistoryResponse};
pub use models::{AppState, CompletionRecord, Question, Quiz, QuizSummary, ReplyStatus, Route};
pub use quiz_source::{CsvQuizSource, QuestionSource, StaticQuizSource};
pub use screen::{load_session, Prompt, QuizScreen};
pub use session::{QuizSession, SessionEvent, SessionPhase};
