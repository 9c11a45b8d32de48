use color_eyre::Result;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::{
    constants::{ACTIVE_PANE_COLOR, ALERT_COLOR, HINT_COLOR, INACTIVE_PANE_COLOR},
    state::{Deck, Health},
};

use super::{Component, Regions};

const BRAND: &str = "CinemaDB";

/// Brand on the left, backend address and reachability on the right.
pub struct NavBar {
    base_url: String,
}

impl NavBar {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
        }
    }

    fn status(health: Health) -> Span<'static> {
        match health {
            Health::Unknown => Span::styled("●", Style::new().fg(HINT_COLOR)),
            Health::Online => Span::styled("●", Style::new().fg(ACTIVE_PANE_COLOR)),
            Health::Offline => Span::styled("●", Style::new().fg(ALERT_COLOR)),
        }
    }
}

impl Component for NavBar {
    fn draw(&mut self, frame: &mut Frame, area: Rect, deck: &Deck) -> Result<()> {
        let [brand, _, backend] = Regions::new(area).nav_columns();

        let rounded = Block::new()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(INACTIVE_PANE_COLOR));

        frame.render_widget(
            Paragraph::new(BRAND)
                .style(
                    Style::new()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )
                .alignment(Alignment::Center)
                .block(rounded.clone()),
            brand,
        );

        let line = Line::from(vec![
            Self::status(deck.health()),
            Span::raw(" "),
            Span::raw(self.base_url.clone()),
        ]);
        frame.render_widget(
            Paragraph::new(line)
                .alignment(Alignment::Center)
                .block(rounded.title("Backend")),
            backend,
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{action::Action, api::FetchResponse, components::testing::render};

    #[test]
    fn shows_brand_and_backend() {
        let mut deck = Deck::new(20);
        deck.start();
        deck.apply(&Action::Fetched(FetchResponse::Health(Ok(()))));
        let mut nav = NavBar::new("http://localhost:8000");

        let screen = render(&mut nav, &deck, 100, 5);

        assert!(screen.contains(BRAND));
        assert!(screen.contains("● http://localhost:8000"));
    }
}
