use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
};

use crate::constants::SEARCH_MATCH_STYLE;

/// Backend text may carry escape sequences or line breaks; neither belongs in a cell.
pub fn sanitize(text: &str) -> String {
    strip_ansi_escapes::strip_str(text)
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

/// Rect of `width` x `height` centered in `area`, shrunk to fit.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

pub fn centered_percent(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(middle);

    center
}

/// Full-height panel glued to the right edge of `area`.
pub fn right_drawer(area: Rect, width: u16) -> Rect {
    let [_, drawer] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(width)]).areas(area);
    drawer
}

/// `text` with every occurrence of `query` highlighted, ignoring case.
pub fn highlight_matches(text: &str, query: &str) -> Line<'static> {
    let needle: Vec<char> = query.trim().chars().collect();
    let chars: Vec<char> = text.chars().collect();
    if needle.is_empty() || needle.len() > chars.len() {
        return Line::from(text.to_string());
    }

    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut i = 0;
    while i < chars.len() {
        let window = &chars[i..chars.len().min(i + needle.len())];
        let hit = window.len() == needle.len()
            && window.iter().zip(&needle).all(|(a, b)| same_letter(*a, *b));
        if hit {
            if !plain.is_empty() {
                spans.push(styled_run(std::mem::take(&mut plain), false));
            }
            spans.push(styled_run(window.iter().collect(), true));
            i += needle.len();
        } else {
            plain.push(chars[i]);
            i += 1;
        }
    }
    if !plain.is_empty() {
        spans.push(styled_run(plain, false));
    }

    Line::from(spans)
}

fn same_letter(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

fn styled_run(run: String, matched: bool) -> Span<'static> {
    if matched {
        Span::styled(run, SEARCH_MATCH_STYLE)
    } else {
        Span::raw(run)
    }
}
