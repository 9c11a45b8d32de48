use color_eyre::Result;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::{
    action::Action,
    app::Mode,
    config::Config,
    constants::HINT_COLOR,
    state::Deck,
};

use super::{Component, Regions};

/// Entry count and the actions available on the current view.
#[derive(Default)]
pub struct Toolbar {
    config: Config,
}

impl Toolbar {
    pub fn new() -> Self {
        Self::default()
    }

    fn hint(&self, action: &Action, label: &str) -> Vec<Span<'static>> {
        let Some(keys) = self.config.keybindings.hint(Mode::Table, action) else {
            return Vec::new();
        };
        vec![
            Span::styled(format!("[{keys}]"), Style::new().fg(HINT_COLOR)),
            Span::raw(format!(" {label}  ")),
        ]
    }

    fn line(&self, deck: &Deck) -> Line<'static> {
        let mut spans = vec![
            Span::raw("Show "),
            Span::styled(
                deck.entries().to_string(),
                Style::new().add_modifier(Modifier::BOLD),
            ),
            Span::raw(" entries "),
        ];
        spans.extend(self.hint(&Action::CycleEntries, "more"));
        spans.push(Span::raw("  "));

        if deck.is_search_mode() {
            spans.extend(self.hint(&Action::ClearSearch, "Home"));
        }
        spans.extend(self.hint(&Action::FocusSearch, "Search"));
        spans.extend(self.hint(&Action::OpenAddForm, "Add"));
        if deck.selected().is_some() {
            spans.extend(self.hint(&Action::OpenEditForm, "Edit"));
            spans.extend(self.hint(&Action::OpenDeleteDialog, "Delete"));
        }
        spans.extend(self.hint(&Action::ViewDetail, "Details"));
        spans.extend(self.hint(&Action::Quit, "Quit"));

        Line::from(spans)
    }
}

impl Component for Toolbar {
    fn register_config_handler(&mut self, config: Config) -> Result<()> {
        self.config = config;
        Ok(())
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, deck: &Deck) -> Result<()> {
        let area = Regions::new(area).toolbar;
        frame.render_widget(Paragraph::new(self.line(deck)), area);
        Ok(())
    }
}
