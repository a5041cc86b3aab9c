//! Completion handoff: queue the finished session for history storage and
//! move the user on. Storage is best effort; navigation never waits on it.

use crate::error::QuizError;
use crate::history_worker::HistoryRequest;
use crate::logger;
use crate::models::{AppState, CompletionRecord, Route};
use crossbeam_channel::Sender;
use std::collections::HashMap;

pub trait HistoryWriter: Send {
    fn append_history(&mut self, record: &CompletionRecord) -> Result<(), QuizError>;
}

pub trait Navigator {
    fn navigate_to(&mut self, route: Route, params: HashMap<String, String>);
}

impl Navigator for AppState {
    fn navigate_to(&mut self, route: Route, params: HashMap<String, String>) {
        *self = match route {
            Route::Home => AppState::Menu,
            Route::Finish => {
                let read = |key: &str| {
                    params
                        .get(key)
                        .and_then(|v| v.parse::<usize>().ok())
                        .unwrap_or(0)
                };
                AppState::Finish {
                    score: read("score"),
                    total: read("total"),
                }
            }
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandoffStatus {
    Queued,
    NotQueued,
}

#[derive(Debug, Clone, Default)]
pub struct CompletionHandoff {
    history: Option<Sender<HistoryRequest>>,
}

impl CompletionHandoff {
    pub fn new(history: Sender<HistoryRequest>) -> Self {
        Self {
            history: Some(history),
        }
    }

    /// No history storage; completions only navigate.
    pub fn without_history() -> Self {
        Self { history: None }
    }

    pub fn hand_off(
        &self,
        record: CompletionRecord,
        navigator: &mut dyn Navigator,
    ) -> HandoffStatus {
        logger::log(&format!(
            "Quiz '{}' finished: {}/{}",
            record.title, record.score, record.total_questions
        ));

        let params = finish_params(&record);
        let status = match &self.history {
            Some(history) => match history.send(HistoryRequest::Append(record)) {
                Ok(()) => HandoffStatus::Queued,
                Err(_) => {
                    logger::log("History worker unavailable, completion not saved");
                    HandoffStatus::NotQueued
                }
            },
            None => HandoffStatus::NotQueued,
        };

        navigator.navigate_to(Route::Finish, params);
        status
    }

    pub fn exit(&self, navigator: &mut dyn Navigator) {
        navigator.navigate_to(Route::Home, HashMap::new());
    }
}

pub fn finish_params(record: &CompletionRecord) -> HashMap<String, String> {
    HashMap::from([
        ("score".to_string(), record.score.to_string()),
        ("total".to_string(), record.total_questions.to_string()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    #[derive(Default)]
    struct RecordingNavigator {
        visits: Vec<(Route, HashMap<String, String>)>,
    }

    impl Navigator for RecordingNavigator {
        fn navigate_to(&mut self, route: Route, params: HashMap<String, String>) {
            self.visits.push((route, params));
        }
    }

    fn record() -> CompletionRecord {
        CompletionRecord {
            session_id: "1".to_string(),
            title: "Quiz".to_string(),
            level: 1,
            score: 2,
            total_questions: 3,
        }
    }

    #[test]
    fn test_hand_off_queues_and_navigates_to_finish() {
        let (tx, rx) = unbounded();
        let handoff = CompletionHandoff::new(tx);
        let mut nav = RecordingNavigator::default();

        assert_eq!(handoff.hand_off(record(), &mut nav), HandoffStatus::Queued);

        assert!(matches!(rx.try_recv(), Ok(HistoryRequest::Append(r)) if r == record()));
        assert_eq!(nav.visits.len(), 1);
        let (route, params) = &nav.visits[0];
        assert_eq!(*route, Route::Finish);
        assert_eq!(params["score"], "2");
        assert_eq!(params["total"], "3");
    }

    #[test]
    fn test_hand_off_navigates_even_when_worker_is_gone() {
        let (tx, rx) = unbounded();
        drop(rx);
        let handoff = CompletionHandoff::new(tx);
        let mut nav = RecordingNavigator::default();

        assert_eq!(handoff.hand_off(record(), &mut nav), HandoffStatus::NotQueued);
        assert_eq!(nav.visits.len(), 1);
        assert_eq!(nav.visits[0].0, Route::Finish);
    }

    #[test]
    fn test_exit_navigates_home() {
        let handoff = CompletionHandoff::without_history();
        let mut nav = RecordingNavigator::default();
        handoff.exit(&mut nav);
        assert_eq!(nav.visits, vec![(Route::Home, HashMap::new())]);
    }

    #[test]
    fn test_app_state_navigator() {
        let mut state = AppState::Quiz;
        state.navigate_to(Route::Finish, finish_params(&record()));
        assert_eq!(state, AppState::Finish { score: 2, total: 3 });

        state.navigate_to(Route::Home, HashMap::new());
        assert_eq!(state, AppState::Menu);
    }
}
