use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct QuizLayout {
    pub header_area: Rect,
    pub card_area: Rect,
    pub footer_area: Rect,
    pub help_area: Rect,
}

pub fn calculate_quiz_chunks(area: Rect) -> QuizLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(6),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(area);

    QuizLayout {
        header_area: chunks[0],
        card_area: chunks[1],
        footer_area: chunks[2],
        help_area: chunks[3],
    }
}

/// Move `area` horizontally by `columns`, clipping whatever leaves `area`.
pub fn shift_horizontally(area: Rect, columns: i32) -> Rect {
    let offset = columns.unsigned_abs().min(area.width as u32) as u16;
    if columns >= 0 {
        Rect {
            x: area.x + offset,
            width: area.width - offset,
            ..area
        }
    } else {
        Rect {
            width: area.width - offset,
            ..area
        }
    }
}

/// Slide `area` vertically by `rows` (negative is up), clipping at its top edge.
pub fn slide_vertically(area: Rect, rows: i32) -> Rect {
    if rows >= 0 {
        return area;
    }
    let hidden = rows.unsigned_abs().min(area.height as u32) as u16;
    Rect {
        height: area.height - hidden,
        ..area
    }
}

pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
