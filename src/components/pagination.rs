use color_eyre::Result;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Padding, Paragraph},
    Frame,
};

use crate::{
    action::Action,
    app::Mode,
    config::Config,
    constants::{HINT_COLOR, INACTIVE_PANE_COLOR},
    state::Deck,
};

use super::{Component, Regions};

/// Page controls under the table. Hidden while a search is active.
#[derive(Default)]
pub struct Pagination {
    config: Config,
}

impl Pagination {
    pub fn new() -> Self {
        Self::default()
    }

    fn control(&self, action: &Action, label: &str, enabled: bool) -> Span<'static> {
        let keys = self
            .config
            .keybindings
            .hint(Mode::Table, action)
            .map(|keys| format!(" [{keys}]"))
            .unwrap_or_default();
        let style = if enabled {
            Style::new().fg(HINT_COLOR)
        } else {
            Style::new()
                .fg(INACTIVE_PANE_COLOR)
                .add_modifier(Modifier::DIM)
        };
        Span::styled(format!("{label}{keys}"), style)
    }

    fn line(&self, deck: &Deck) -> Line<'static> {
        Line::from(vec![
            self.control(&Action::PrevPage, "Prev", deck.page() > 0),
            Span::raw("  "),
            Span::styled(
                format!("Page {}", deck.page() + 1),
                Style::new().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            self.control(&Action::NextPage, "Next", true),
        ])
    }
}

impl Component for Pagination {
    fn register_config_handler(&mut self, config: Config) -> Result<()> {
        self.config = config;
        Ok(())
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, deck: &Deck) -> Result<()> {
        if deck.is_search_mode() {
            return Ok(());
        }
        let area = Regions::new(area).footer;
        frame.render_widget(
            Paragraph::new(self.line(deck))
                .right_aligned()
                .block(Block::default().padding(Padding::horizontal(2))),
            area,
        );
        Ok(())
    }
}
