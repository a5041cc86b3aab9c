use crossbeam_channel::{unbounded, Receiver};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use interactive_quiz::db::{self, HistoryEntry, SqliteHistory};
use interactive_quiz::ui::{draw_finish, draw_load_failed, draw_menu, draw_prompt, draw_quiz, MenuPanel};
use interactive_quiz::{
    load_session, logger, spawn_history_worker, AppState, CompletionHandoff, CsvQuizSource,
    HistoryRequest, HistoryResponse, QuestionSource, QuizConfig, QuizScreen, QuizSummary,
    StaticQuizSource,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use rusqlite::Connection;
use std::io;
use std::time::{Duration, Instant};

const FRAME: Duration = Duration::from_millis(16);
const HISTORY_LIMIT: usize = 50;

struct HistoryChannels {
    handoff: CompletionHandoff,
    responses: Option<Receiver<HistoryResponse>>,
}

fn open_source(config: &QuizConfig) -> Box<dyn QuestionSource> {
    if std::env::args().any(|arg| arg == "--demo") {
        logger::log("Using built-in demo quizzes (--demo)");
        return Box::new(StaticQuizSource::demo());
    }

    let source = CsvQuizSource::new(config.quizzes_dir.clone());
    if source.list_quizzes().is_empty() {
        logger::log(&format!(
            "No quizzes found in {}, using built-in demo quizzes",
            config.quizzes_dir.display()
        ));
        return Box::new(StaticQuizSource::demo());
    }
    Box::new(source)
}

fn start_history_worker(config: &QuizConfig) -> HistoryChannels {
    let disabled = HistoryChannels {
        handoff: CompletionHandoff::without_history(),
        responses: None,
    };

    let conn = match db::init_db() {
        Ok(conn) => conn,
        Err(e) => {
            logger::log(&format!("History disabled, database unavailable: {}", e));
            return disabled;
        }
    };

    let (request_tx, request_rx) = unbounded::<HistoryRequest>();
    let (response_tx, response_rx) = unbounded::<HistoryResponse>();
    match spawn_history_worker(
        Box::new(SqliteHistory::new(conn)),
        config.history_retries,
        response_tx,
        request_rx,
    ) {
        Ok(_) => HistoryChannels {
            handoff: CompletionHandoff::new(request_tx),
            responses: Some(response_rx),
        },
        Err(e) => {
            logger::log(&format!("History disabled, worker failed to start: {}", e));
            disabled
        }
    }
}

fn read_history(conn: Option<&Connection>) -> Vec<HistoryEntry> {
    let Some(conn) = conn else {
        return Vec::new();
    };
    match db::load_history(conn, HISTORY_LIMIT) {
        Ok(entries) => entries,
        Err(e) => {
            logger::log(&format!("Failed to load history: {}", e));
            Vec::new()
        }
    }
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

fn main() -> io::Result<()> {
    logger::init();
    let config = QuizConfig::load();
    logger::log(&format!("Starting with config: {:?}", config));

    let source = open_source(&config);
    let history = start_history_worker(&config);
    let history_reader = if history.responses.is_some() {
        db::init_db()
            .map_err(|e| logger::log(&format!("History list unavailable: {}", e)))
            .ok()
    } else {
        None
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(
        &mut terminal,
        source.as_ref(),
        &config,
        &history,
        history_reader.as_ref(),
    );

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        logger::log(&format!("Exited with error: {}", e));
    }
    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    source: &dyn QuestionSource,
    config: &QuizConfig,
    history: &HistoryChannels,
    history_reader: Option<&Connection>,
) -> io::Result<()> {
    let mut app_state = AppState::Menu;
    let mut quizzes: Vec<QuizSummary> = source.list_quizzes();
    let mut entries = read_history(history_reader);
    let mut selected_quiz: usize = 0;
    let mut selected_history: usize = 0;
    let mut focused = MenuPanel::Quizzes;
    let mut screen: Option<QuizScreen> = None;
    let mut last_response: Option<HistoryResponse> = None;
    let mut last_frame = Instant::now();

    loop {
        if let Some(responses) = &history.responses {
            while let Ok(response) = responses.try_recv() {
                logger::log(&format!("History worker replied: {:?}", response));
                last_response = Some(response);
                entries = read_history(history_reader);
            }
        }

        if let AppState::Loading(quiz_id) = &app_state {
            let quiz_id = quiz_id.clone();
            app_state = match load_session(source, &quiz_id, config) {
                Ok(session) => {
                    logger::log(&format!(
                        "Started quiz '{}' with {} questions",
                        session.title(),
                        session.total()
                    ));
                    screen = Some(QuizScreen::new(session, config.clone()));
                    last_response = None;
                    AppState::Quiz
                }
                Err(e) => {
                    logger::log(&format!("Failed to load quiz {}: {}", quiz_id, e));
                    AppState::LoadFailed(e.to_string())
                }
            };
        }

        terminal.draw(|f| match &app_state {
            AppState::Menu | AppState::Loading(_) => draw_menu(
                f,
                &quizzes,
                selected_quiz,
                &entries,
                selected_history,
                focused,
                history_reader.is_some(),
            ),
            AppState::LoadFailed(message) => draw_load_failed(f, message),
            AppState::Quiz => {
                if let Some(screen) = screen.as_mut() {
                    draw_quiz(f, screen);
                    if let Some(prompt) = screen.prompt() {
                        draw_prompt(f, prompt);
                    }
                }
            }
            AppState::Finish { score, total } => draw_finish(
                f,
                *score,
                *total,
                screen.as_ref().and_then(|s| s.history_status),
                last_response.as_ref(),
            ),
        })?;

        if event::poll(FRAME)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if is_ctrl_c(&key) {
                        break;
                    }

                    match app_state {
                        AppState::Menu => match key.code {
                            KeyCode::Tab => focused = focused.toggle(),
                            KeyCode::Up => match focused {
                                MenuPanel::Quizzes => {
                                    selected_quiz = selected_quiz.saturating_sub(1)
                                }
                                MenuPanel::History => {
                                    selected_history = selected_history.saturating_sub(1)
                                }
                            },
                            KeyCode::Down => match focused {
                                MenuPanel::Quizzes => {
                                    if selected_quiz + 1 < quizzes.len() {
                                        selected_quiz += 1;
                                    }
                                }
                                MenuPanel::History => {
                                    if selected_history + 1 < entries.len() {
                                        selected_history += 1;
                                    }
                                }
                            },
                            KeyCode::Enter => {
                                if focused == MenuPanel::Quizzes {
                                    if let Some(quiz) = quizzes.get(selected_quiz) {
                                        app_state = AppState::Loading(quiz.id.clone());
                                    }
                                }
                            }
                            KeyCode::Char('q') | KeyCode::Esc => break,
                            _ => {}
                        },
                        AppState::Loading(_) => {}
                        AppState::LoadFailed(_) => {
                            app_state = AppState::Menu;
                        }
                        AppState::Quiz => {
                            if let Some(screen) = screen.as_mut() {
                                screen.handle_key(key, &history.handoff, &mut app_state);
                            }
                        }
                        AppState::Finish { .. } => match key.code {
                            KeyCode::Enter | KeyCode::Char('m') => {
                                app_state = AppState::Menu;
                            }
                            KeyCode::Char('q') => break,
                            _ => {}
                        },
                    }
                }
                Event::Mouse(mouse) => {
                    if app_state == AppState::Quiz {
                        if let Some(screen) = screen.as_mut() {
                            screen.handle_mouse(mouse, Instant::now());
                        }
                    }
                }
                _ => {}
            }
        }

        let now = Instant::now();
        let dt = now.duration_since(last_frame);
        last_frame = now;

        if app_state == AppState::Quiz {
            if let Some(screen) = screen.as_mut() {
                screen.tick(dt, &history.handoff, &mut app_state);
            }
        }

        match app_state {
            AppState::Quiz | AppState::Finish { .. } => {}
            _ => {
                if let Some(mut finished) = screen.take() {
                    finished.unmount();
                    quizzes = source.list_quizzes();
                    entries = read_history(history_reader);
                    selected_quiz = selected_quiz.min(quizzes.len().saturating_sub(1));
                    selected_history = 0;
                }
            }
        }
    }

    if let Some(screen) = screen.as_mut() {
        screen.unmount();
    }
    Ok(())
}
