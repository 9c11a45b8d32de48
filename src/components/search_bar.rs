use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::{
    action::Action,
    app::Mode,
    constants::{ACTIVE_PANE_COLOR, HINT_COLOR, INACTIVE_PANE_COLOR},
    state::Deck,
    util::sanitize,
};

use super::{Component, Regions};

const PLACEHOLDER: &str = "Some super special movie...";

/// Text box in the nav bar. Typing only reaches it in search mode.
#[derive(Default)]
pub struct SearchBar {
    input: String,
}

impl SearchBar {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component for SearchBar {
    fn handle_key_event(&mut self, key: KeyEvent, deck: &Deck) -> Result<Option<Action>> {
        if deck.mode() != Mode::Search {
            return Ok(None);
        }
        let action = match key.code {
            KeyCode::Enter => Some(Action::SubmitSearch(self.input.clone())),
            KeyCode::Esc => Some(Action::CancelSearch),
            KeyCode::Backspace => {
                self.input.pop();
                None
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.input.push(c);
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn handle_paste(&mut self, text: &str, deck: &Deck) -> Result<Option<Action>> {
        if deck.mode() == Mode::Search {
            self.input.extend(text.chars().filter(|c| !c.is_control()));
        }
        Ok(None)
    }

    fn update(&mut self, action: Action, deck: &Deck) -> Result<Option<Action>> {
        match action {
            Action::ClearSearch => self.input.clear(),
            Action::CancelSearch => self.input = deck.search().to_string(),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, deck: &Deck) -> Result<()> {
        let [_, area, _] = Regions::new(area).nav_columns();
        let active = deck.mode() == Mode::Search;

        let block = Block::new()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title("Search")
            .border_style(Style::default().fg(if active {
                ACTIVE_PANE_COLOR
            } else {
                INACTIVE_PANE_COLOR
            }));

        let line = if self.input.is_empty() && !active {
            Line::from(Span::styled(PLACEHOLDER, Style::new().fg(HINT_COLOR).italic()))
        } else if active {
            Line::from(vec![
                Span::raw(sanitize(&self.input)),
                Span::styled("▏", Style::new().fg(ACTIVE_PANE_COLOR)),
            ])
        } else {
            Line::from(sanitize(&self.input))
        };

        frame.render_widget(Paragraph::new(line).block(block), area);
        Ok(())
    }
}
