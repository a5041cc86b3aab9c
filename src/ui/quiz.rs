use super::layout::{calculate_quiz_chunks, shift_horizontally, slide_vertically};
use super::{fade, key_span};
use crate::models::ReplyStatus;
use crate::screen::{QuizScreen, PX_PER_COLUMN, PX_PER_ROW};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap},
    Frame,
};

const TEXT: (u8, u8, u8) = (230, 230, 230);
const ACCENT: (u8, u8, u8) = (0, 200, 200);
const CORRECT: (u8, u8, u8) = (0, 200, 90);
const INCORRECT: (u8, u8, u8) = (230, 60, 60);

fn draw_header(f: &mut Frame, area: Rect, screen: &QuizScreen, opacity: f32) {
    if area.height == 0 || opacity <= 0.0 {
        return;
    }
    let session = screen.session();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(fade(ACCENT, opacity)));
    let inner = block.inner(area);
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            session.title(),
            Style::default()
                .fg(fade(ACCENT, opacity))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(
                "  Question {}/{}",
                session.current_index() + 1,
                session.total()
            ),
            Style::default().fg(fade(TEXT, opacity)),
        ),
    ]));
    f.render_widget(title, rows[0]);

    let width = screen.progress().width().clamp(0.0, 100.0);
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(fade(CORRECT, opacity)))
        .ratio(f64::from(width) / 100.0)
        .label(format!("{}%", screen.progress().percentage()));
    if rows.len() > 1 {
        f.render_widget(gauge, rows[1]);
    }
}

fn card_text(screen: &QuizScreen, opacity: f32) -> Text<'static> {
    let session = screen.session();
    let question = session.current_question();
    let text_style = Style::default().fg(fade(TEXT, opacity));

    let mut text = Text::default();
    text.push_line(Line::from(Span::styled(
        question.title.clone(),
        text_style.add_modifier(Modifier::BOLD),
    )));
    text.push_line(Line::from(""));

    for (i, alternative) in question.alternatives.iter().enumerate() {
        let selected = session.selected_alternative() == Some(i);
        let marker = if selected { "(•)" } else { "( )" };
        let style = if selected {
            Style::default()
                .fg(fade((230, 200, 0), opacity))
                .add_modifier(Modifier::BOLD)
        } else {
            text_style
        };
        text.push_line(Line::from(Span::styled(
            format!("{} {}. {}", marker, i + 1, alternative),
            style,
        )));
    }

    match session.reply_status() {
        ReplyStatus::Correct => {
            text.push_line(Line::from(""));
            text.push_line(Line::from(Span::styled(
                "Correct!",
                Style::default().fg(fade(CORRECT, opacity)),
            )));
        }
        ReplyStatus::Incorrect => {
            text.push_line(Line::from(""));
            text.push_line(Line::from(Span::styled(
                "Not quite. Press Enter to continue.",
                Style::default().fg(fade(INCORRECT, opacity)),
            )));
        }
        ReplyStatus::None => {}
    }

    text
}

fn draw_card(f: &mut Frame, area: Rect, screen: &mut QuizScreen) {
    screen.card_area = Some(area);

    let style = screen.card_style();
    let opacity = style.opacity.clamp(0.0, 1.0);
    let columns = (style.translate_x / PX_PER_COLUMN).round() as i32;
    let card_area = shift_horizontally(area, columns);
    if card_area.width < 2 {
        return;
    }

    let mut title = format!(
        "Question {} / {}",
        screen.session().current_index() + 1,
        screen.session().total()
    );
    if style.rotate_deg.abs() >= 1.0 {
        title.push_str(&format!("  tilt {:.0}°", style.rotate_deg));
    }

    let border = if screen.is_dragging() {
        fade((230, 200, 0), opacity)
    } else {
        fade(TEXT, opacity)
    };

    let scroll_rows = (screen.scroll_y() / PX_PER_ROW).round() as u16;
    let card = Paragraph::new(card_text(screen, opacity))
        .wrap(Wrap { trim: true })
        .scroll((scroll_rows, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(title),
        );
    f.render_widget(card, card_area);
}

fn draw_footer(f: &mut Frame, area: Rect, screen: &QuizScreen) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let stop = Paragraph::new("Stop (Esc)")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(stop, chunks[0]);

    let confirm_label = if screen.session().reply_status() == ReplyStatus::None {
        "Confirm (Enter)"
    } else {
        "Continue (Enter)"
    };
    let confirm = Paragraph::new(confirm_label)
        .style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(confirm, chunks[1]);
}

fn draw_help(f: &mut Frame, area: Rect) {
    let help_text = vec![Line::from(vec![
        key_span("1-9/↑↓"),
        Span::from(" Select  "),
        key_span("Enter"),
        Span::from(" Confirm  "),
        key_span("s"),
        Span::from(" Skip  "),
        key_span("Hold+drag ←"),
        Span::from(" Discard card  "),
        key_span("PgUp/PgDn"),
        Span::from(" Scroll  "),
        key_span("Ctrl+C"),
        Span::from(" Exit App"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, area);
}

fn draw_overlay(f: &mut Frame, area: Rect, status: ReplyStatus, intensity: f32) {
    let rgb = match status {
        ReplyStatus::Correct => CORRECT,
        ReplyStatus::Incorrect => INCORRECT,
        ReplyStatus::None => return,
    };
    if intensity <= 0.05 {
        return;
    }
    let overlay = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(fade(rgb, intensity)).add_modifier(Modifier::BOLD));
    f.render_widget(overlay, area);
}

pub fn draw_quiz(f: &mut Frame, screen: &mut QuizScreen) {
    let layout = calculate_quiz_chunks(f.area());
    let styles = screen.header_styles();

    draw_header(f, layout.header_area, screen, styles.inline_opacity);
    draw_card(f, layout.card_area, screen);
    draw_footer(f, layout.footer_area, screen);
    draw_help(f, layout.help_area);

    let fixed_rows = (styles.fixed_translate_y / PX_PER_ROW).round() as i32;
    draw_header(
        f,
        slide_vertically(layout.header_area, fixed_rows),
        screen,
        styles.fixed_opacity,
    );

    if let Some((status, intensity)) = screen.overlay() {
        draw_overlay(f, f.area(), status, intensity);
    }
}
