use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
    Frame,
};

use crate::{
    constants::{ACTIVE_PANE_COLOR, HINT_COLOR, ROW_HOVER_COLOR},
    movie::{format_decimal, Column, Movie, COLUMNS},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    Text,
    Integer,
    Decimal,
}

impl FieldKind {
    fn of(column: Column) -> Self {
        match column {
            Column::Popularity | Column::VoteAverage => FieldKind::Decimal,
            Column::Budget | Column::Revenue | Column::VoteCount => FieldKind::Integer,
            _ => FieldKind::Text,
        }
    }

    fn accepts(self, c: char) -> bool {
        match self {
            FieldKind::Text => true,
            FieldKind::Integer => c.is_ascii_digit() || c == '-',
            FieldKind::Decimal => c.is_ascii_digit() || c == '-' || c == '.',
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Field {
    column: Column,
    kind: FieldKind,
    value: String,
}

impl Field {
    fn integer(&self) -> i64 {
        self.value.trim().parse().unwrap_or(0)
    }

    fn decimal(&self) -> f64 {
        self.value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .unwrap_or(0.0)
    }
}

/// Controlled form over every editable movie field.
///
/// Focus stops are the ten fields followed by the Submit button. The form
/// never talks to the backend; submitting hands the assembled record back to
/// whoever owns the form.
#[derive(Debug, Clone)]
pub struct RecordForm {
    id: i64,
    fields: Vec<Field>,
    focus: usize,
}

impl RecordForm {
    pub fn new(defaults: Option<&Movie>) -> Self {
        let fields = COLUMNS
            .iter()
            .map(|column| {
                let kind = FieldKind::of(*column);
                let value = match (defaults, kind) {
                    (Some(movie), FieldKind::Decimal) => {
                        let value = match column {
                            Column::Popularity => movie.popularity,
                            _ => movie.vote_average,
                        };
                        format_decimal(value)
                    }
                    (Some(movie), FieldKind::Integer) => match column {
                        Column::Budget => movie.budget,
                        Column::Revenue => movie.revenue,
                        _ => movie.vote_count,
                    }
                    .to_string(),
                    (Some(movie), FieldKind::Text) => column.cell(movie),
                    (None, FieldKind::Text) => String::new(),
                    (None, _) => "0".to_string(),
                };
                Field {
                    column: *column,
                    kind,
                    value,
                }
            })
            .collect();

        Self {
            id: defaults.map_or(0, |movie| movie.id),
            fields,
            focus: 0,
        }
    }

    /// The record as currently entered. Numbers that do not parse become zero.
    pub fn record(&self) -> Movie {
        let mut movie = Movie {
            id: self.id,
            ..Movie::default()
        };
        for field in &self.fields {
            match field.column {
                Column::Title => movie.title = field.value.clone(),
                Column::Popularity => movie.popularity = field.decimal(),
                Column::VoteAverage => movie.vote_average = field.decimal(),
                Column::ReleaseDate => movie.release_date = field.value.clone(),
                Column::Genres => movie.genres = field.value.clone(),
                Column::Keywords => movie.keywords = field.value.clone(),
                Column::Budget => movie.budget = field.integer(),
                Column::Revenue => movie.revenue = field.integer(),
                Column::VoteCount => movie.vote_count = field.integer(),
                Column::Overview => movie.overview = field.value.clone(),
            }
        }
        movie
    }

    /// Applies a key press; yields the record when the form is submitted.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Movie> {
        match key.code {
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Some(self.record());
            }
            KeyCode::Enter if self.on_submit() => return Some(self.record()),
            KeyCode::Enter | KeyCode::Tab | KeyCode::Down => self.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.focus_prev(),
            KeyCode::Backspace => {
                if let Some(field) = self.fields.get_mut(self.focus) {
                    field.value.pop();
                }
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.insert(c);
            }
            _ => {}
        }
        None
    }

    pub fn paste(&mut self, text: &str) {
        for c in text.chars().filter(|c| !c.is_control()) {
            self.insert(c);
        }
    }

    fn insert(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            if field.kind.accepts(c) {
                field.value.push(c);
            }
        }
    }

    fn on_submit(&self) -> bool {
        self.focus == self.fields.len()
    }

    fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % (self.fields.len() + 1);
    }

    fn focus_prev(&mut self) {
        self.focus = self
            .focus
            .checked_sub(1)
            .unwrap_or(self.fields.len());
    }

    fn lines(&self) -> (Vec<Line<'static>>, usize) {
        let mut lines = Vec::new();
        let mut focused_line = 0;

        for (index, field) in self.fields.iter().enumerate() {
            let focused = index == self.focus;
            if focused {
                focused_line = lines.len();
            }
            let label_style = if focused {
                Style::new().fg(ACTIVE_PANE_COLOR).add_modifier(Modifier::BOLD)
            } else {
                Style::new().fg(HINT_COLOR)
            };
            lines.push(Line::from(Span::styled(field.column.header(), label_style)));

            let mut value = vec![Span::raw(if focused { "> " } else { "  " })];
            value.push(Span::raw(field.value.clone()));
            if focused {
                value.push(Span::styled("▏", Style::new().fg(ACTIVE_PANE_COLOR)));
            }
            lines.push(Line::from(value));
        }

        lines.push(Line::default());
        if self.on_submit() {
            focused_line = lines.len();
        }
        let button_style = if self.on_submit() {
            Style::new().bg(ROW_HOVER_COLOR).add_modifier(Modifier::BOLD)
        } else {
            Style::new().add_modifier(Modifier::BOLD)
        };
        lines.push(Line::from(Span::styled("[ Submit ]", button_style)).centered());
        lines.push(Line::from(Span::styled(
            "Tab next · Shift-Tab back · Ctrl-S submit · Esc close",
            Style::new().fg(HINT_COLOR),
        )));

        (lines, focused_line)
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        let (lines, focused_line) = self.lines();
        let visible = area.height as usize;
        let scroll = (focused_line + 3).saturating_sub(visible);

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((scroll as u16, 0))
            .render(area, frame.buffer_mut());
    }
}
