use super::key_span;
use crate::completion::HandoffStatus;
use crate::history_worker::HistoryResponse;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

pub fn history_notice(
    status: Option<HandoffStatus>,
    response: Option<&HistoryResponse>,
) -> (&'static str, Color) {
    match (status, response) {
        (_, Some(HistoryResponse::Saved { .. })) => ("Saved to history.", Color::Green),
        (_, Some(HistoryResponse::Failed { .. })) => {
            ("Could not save this result to history.", Color::Yellow)
        }
        (Some(HandoffStatus::Queued), None) => ("Saving to history...", Color::DarkGray),
        _ => ("History is unavailable; result not saved.", Color::Yellow),
    }
}

pub fn draw_finish(
    f: &mut Frame,
    score: usize,
    total: usize,
    status: Option<HandoffStatus>,
    response: Option<&HistoryResponse>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new("Finished!")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let (notice, notice_color) = history_notice(status, response);
    let mut text = Text::default();
    text.push_line(Line::from(""));
    text.push_line(Line::from(Span::styled(
        format!("You got {} out of {} questions right", score, total),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    text.push_line(Line::from(""));
    text.push_line(Line::from(Span::styled(
        notice,
        Style::default().fg(notice_color),
    )));

    let body = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(body, chunks[1]);

    let ratio = if total == 0 {
        0.0
    } else {
        score as f64 / total as f64
    };
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Score"))
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(ratio.clamp(0.0, 1.0));
    f.render_widget(gauge, chunks[2]);

    let help_text = vec![Line::from(vec![
        key_span("Enter/m"),
        Span::from(" Main Menu  "),
        key_span("q"),
        Span::from(" Quit"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[3]);
}
