use color_eyre::Result;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::{
    constants::{ALERT_COLOR, HINT_COLOR, POPUP_BACKGROUND},
    state::Deck,
    util::centered,
};

use super::Component;

/// Blocking message after a failed add, update or delete.
#[derive(Default)]
pub struct AlertBox;

impl AlertBox {
    pub fn new() -> Self {
        Self
    }
}

impl Component for AlertBox {
    fn draw(&mut self, frame: &mut Frame, area: Rect, deck: &Deck) -> Result<()> {
        let Some(message) = deck.alert() else {
            return Ok(());
        };

        let popup = centered(area, 48, 7);
        let block = Block::new()
            .borders(Borders::ALL)
            .border_type(BorderType::Thick)
            .border_style(Style::default().fg(ALERT_COLOR))
            .style(Style::new().bg(POPUP_BACKGROUND))
            .title(Span::styled(
                "Error",
                Style::new().fg(ALERT_COLOR).add_modifier(Modifier::BOLD),
            ));

        let lines = vec![
            Line::from(message),
            Line::default(),
            Line::from(Span::styled("[Enter] OK", Style::new().fg(HINT_COLOR))),
        ];

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(lines)
                .centered()
                .wrap(Wrap { trim: true })
                .block(block),
            popup,
        );
        Ok(())
    }
}
