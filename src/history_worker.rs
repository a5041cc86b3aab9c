use crate::completion::HistoryWriter;
use crate::logger;
use crate::models::CompletionRecord;
use crossbeam_channel::{Receiver, Sender};
use std::io;
use std::thread;
use std::time::Duration;

const RETRY_BACKOFF: Duration = Duration::from_millis(50);

#[derive(Debug)]
pub enum HistoryRequest {
    Append(CompletionRecord),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryResponse {
    Saved { session_id: String },
    Failed { session_id: String, error: String },
}

pub fn spawn_history_worker(
    mut writer: Box<dyn HistoryWriter>,
    retries: u32,
    history_tx: Sender<HistoryResponse>,
    history_rx: Receiver<HistoryRequest>,
) -> io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("interactive-quiz::history_worker".to_string())
        .spawn(move || {
            let rt = match tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()
            {
                Ok(rt) => rt,
                Err(e) => {
                    logger::log(&format!("History worker could not start runtime: {}", e));
                    return;
                }
            };

            while let Ok(HistoryRequest::Append(record)) = history_rx.recv() {
                let response = rt.block_on(append_with_retry(writer.as_mut(), &record, retries));
                if history_tx.send(response).is_err() {
                    logger::log("History response channel closed");
                }
            }

            logger::log("History worker channel disconnected, exiting");
        })
}

pub async fn append_with_retry(
    writer: &mut dyn HistoryWriter,
    record: &CompletionRecord,
    retries: u32,
) -> HistoryResponse {
    let mut attempt = 0;
    loop {
        match writer.append_history(record) {
            Ok(()) => {
                logger::log(&format!("Saved history record {}", record.session_id));
                return HistoryResponse::Saved {
                    session_id: record.session_id.clone(),
                };
            }
            Err(e) if attempt < retries => {
                attempt += 1;
                logger::log(&format!(
                    "History write failed ({}), retry {}/{}",
                    e, attempt, retries
                ));
                tokio::time::sleep(RETRY_BACKOFF * attempt).await;
            }
            Err(e) => {
                logger::log(&format!("History write failed, giving up: {}", e));
                return HistoryResponse::Failed {
                    session_id: record.session_id.clone(),
                    error: e.to_string(),
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuizError;
    use crossbeam_channel::unbounded;
    use std::sync::{Arc, Mutex};

    /// Fails the first `failures` writes, then records the rest.
    struct FlakyWriter {
        failures: u32,
        saved: Arc<Mutex<Vec<CompletionRecord>>>,
    }

    impl HistoryWriter for FlakyWriter {
        fn append_history(&mut self, record: &CompletionRecord) -> Result<(), QuizError> {
            if self.failures > 0 {
                self.failures -= 1;
                return Err(QuizError::ChannelClosed);
            }
            self.saved.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    fn record(id: &str) -> CompletionRecord {
        CompletionRecord {
            session_id: id.to_string(),
            title: "Quiz".to_string(),
            level: 1,
            score: 1,
            total_questions: 2,
        }
    }

    fn flaky(failures: u32) -> (FlakyWriter, Arc<Mutex<Vec<CompletionRecord>>>) {
        let saved = Arc::new(Mutex::new(Vec::new()));
        (
            FlakyWriter {
                failures,
                saved: saved.clone(),
            },
            saved,
        )
    }

    #[tokio::test]
    async fn test_retry_recovers_from_transient_failure() {
        let (mut writer, saved) = flaky(1);
        let response = append_with_retry(&mut writer, &record("a"), 2).await;
        assert_eq!(
            response,
            HistoryResponse::Saved {
                session_id: "a".to_string()
            }
        );
        assert_eq!(saved.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_gives_up_after_retries() {
        let (mut writer, saved) = flaky(10);
        let response = append_with_retry(&mut writer, &record("b"), 2).await;
        assert!(matches!(response, HistoryResponse::Failed { ref session_id, .. } if session_id == "b"));
        assert!(saved.lock().unwrap().is_empty());
    }

    #[test]
    fn test_worker_round_trip() {
        let (writer, saved) = flaky(0);
        let (req_tx, req_rx) = unbounded();
        let (resp_tx, resp_rx) = unbounded();
        let handle = spawn_history_worker(Box::new(writer), 0, resp_tx, req_rx).unwrap();

        req_tx.send(HistoryRequest::Append(record("c"))).unwrap();
        let response = resp_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(
            response,
            HistoryResponse::Saved {
                session_id: "c".to_string()
            }
        );

        drop(req_tx);
        handle.join().unwrap();
        assert_eq!(saved.lock().unwrap()[0].session_id, "c");
    }
}
