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
    util::{centered, sanitize},
};

use super::Component;

/// Confirmation before the selected movie is removed.
#[derive(Default)]
pub struct DeleteDialog;

impl DeleteDialog {
    pub fn new() -> Self {
        Self
    }
}

impl Component for DeleteDialog {
    fn draw(&mut self, frame: &mut Frame, area: Rect, deck: &Deck) -> Result<()> {
        if !deck.overlays().delete {
            return Ok(());
        }
        let title = deck
            .selected()
            .map(|movie| sanitize(&movie.title))
            .unwrap_or_default();

        let popup = centered(area, 56, 8);
        let lines = vec![
            Line::from("Are you sure you want to delete"),
            Line::from(Span::styled(
                format!("\"{title}\"?"),
                Style::new().add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(vec![
                Span::styled("[y] ", Style::new().fg(ALERT_COLOR)),
                Span::raw("Delete   "),
                Span::styled("[n] ", Style::new().fg(HINT_COLOR)),
                Span::raw("Cancel"),
            ]),
        ];

        let block = Block::new()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(ALERT_COLOR))
            .style(Style::new().bg(POPUP_BACKGROUND))
            .title("Delete Movie");

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
