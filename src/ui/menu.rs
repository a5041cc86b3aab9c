use super::key_span;
use crate::db::HistoryEntry;
use crate::models::QuizSummary;
use crate::utils::{format_history_date, truncate_string};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuPanel {
    Quizzes,
    History,
}

impl MenuPanel {
    pub fn toggle(self) -> Self {
        match self {
            MenuPanel::Quizzes => MenuPanel::History,
            MenuPanel::History => MenuPanel::Quizzes,
        }
    }
}

fn level_label(level: u8) -> &'static str {
    match level {
        1 => "easy",
        2 => "medium",
        _ => "hard",
    }
}

fn format_quiz_item(quiz: &QuizSummary) -> String {
    format!(
        "{} ({}, {} questions)",
        truncate_string(&quiz.title, 40),
        level_label(quiz.level),
        quiz.questions
    )
}

fn format_history_item(entry: &HistoryEntry) -> String {
    format!(
        "{} - {} ({}/{})",
        format_history_date(entry.created_at),
        truncate_string(&entry.title, 40),
        entry.score,
        entry.total_questions
    )
}

fn draw_panel_header(area: Rect, title: &str, focused: bool, f: &mut Frame) {
    let style = if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let header = Paragraph::new(title)
        .style(style)
        .alignment(Alignment::Left)
        .block(Block::default());

    f.render_widget(header, area);
}

fn draw_list(
    f: &mut Frame,
    area: Rect,
    items: Vec<String>,
    empty: &str,
    selected: usize,
    focused: bool,
) {
    let items: Vec<ListItem> = if items.is_empty() {
        vec![ListItem::new(empty.to_string()).style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )]
    } else {
        items
            .into_iter()
            .enumerate()
            .map(|(i, text)| {
                let style = if i == selected && focused {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(text).style(style)
            })
            .collect()
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(if focused {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            }),
    );
    f.render_widget(list, area);
}

pub fn draw_menu(
    f: &mut Frame,
    quizzes: &[QuizSummary],
    selected_quiz: usize,
    history: &[HistoryEntry],
    selected_history: usize,
    focused: MenuPanel,
    history_enabled: bool,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new("Interactive Quiz v0.1.0")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let quiz_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(chunks[1]);
    let history_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(chunks[2]);

    draw_panel_header(
        quiz_chunks[0],
        "[1] Quizzes",
        focused == MenuPanel::Quizzes,
        f,
    );
    draw_list(
        f,
        quiz_chunks[1],
        quizzes.iter().map(format_quiz_item).collect(),
        "No quizzes found",
        selected_quiz,
        focused == MenuPanel::Quizzes,
    );

    draw_panel_header(
        history_chunks[0],
        "[2] History",
        focused == MenuPanel::History,
        f,
    );
    draw_list(
        f,
        history_chunks[1],
        history.iter().map(format_history_item).collect(),
        if history_enabled {
            "No finished quizzes yet"
        } else {
            "History unavailable"
        },
        selected_history,
        focused == MenuPanel::History,
    );

    let help_text = vec![Line::from(vec![
        key_span("Tab"),
        Span::from(" Switch Panel  "),
        key_span("↑/↓"),
        Span::from(" Navigate  "),
        key_span("Enter"),
        Span::from(" Start Quiz  "),
        key_span("q/Esc"),
        Span::from(" Quit"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[3]);
}

pub fn draw_load_failed(f: &mut Frame, message: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(5)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new("Could not load quiz")
        .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let body = Paragraph::new(message.to_string())
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(body, chunks[1]);

    let help = Paragraph::new(Line::from(vec![
        key_span("any key"),
        Span::from(" Back to Menu"),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}
