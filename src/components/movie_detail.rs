use color_eyre::Result;
use ratatui::{
    layout::{Margin, Rect},
    style::{Modifier, Style},
    symbols::scrollbar,
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation,
        ScrollbarState, Wrap,
    },
    Frame,
};

use crate::{
    action::Action,
    constants::{ACTIVE_PANE_COLOR, HINT_COLOR, POPUP_BACKGROUND},
    movie::{Column, Movie, COLUMNS},
    state::Deck,
    util::{centered_percent, sanitize},
};

use super::Component;

/// Popup listing every field of one movie.
#[derive(Default)]
pub struct MovieDetail {
    vertical_scroll: usize,
    vertical_scroll_state: ScrollbarState,
}

impl MovieDetail {
    pub fn new() -> Self {
        Self::default()
    }

    fn lines(movie: &Movie) -> Vec<Line<'static>> {
        let label = Style::new().fg(HINT_COLOR).add_modifier(Modifier::BOLD);
        let mut lines = vec![
            Line::from(Span::styled(
                sanitize(&movie.title),
                Style::new().fg(ACTIVE_PANE_COLOR).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(format!("#{}", movie.id), Style::new().fg(HINT_COLOR))),
            Line::default(),
        ];

        for column in COLUMNS.iter().filter(|c| !matches!(c, Column::Title | Column::Overview)) {
            lines.push(Line::from(vec![
                Span::styled(format!("{:<14}", column.header()), label),
                Span::raw(sanitize(&column.cell(movie))),
            ]));
        }

        lines.push(Line::default());
        lines.push(Line::from(Span::styled(Column::Overview.header(), label)));
        lines.push(Line::from(sanitize(&movie.overview)));
        lines
    }
}

impl Component for MovieDetail {
    fn update(&mut self, action: Action, _deck: &Deck) -> Result<Option<Action>> {
        match action {
            Action::ShowDetail(_) | Action::CloseDetail => self.vertical_scroll = 0,
            Action::DetailScrollDown => self.vertical_scroll = self.vertical_scroll.saturating_add(1),
            Action::DetailScrollUp => self.vertical_scroll = self.vertical_scroll.saturating_sub(1),
            _ => {}
        }
        self.vertical_scroll_state = self.vertical_scroll_state.position(self.vertical_scroll);
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, deck: &Deck) -> Result<()> {
        let Some(movie) = deck.detail() else {
            return Ok(());
        };

        let popup = centered_percent(area, 70, 70);
        let block = Block::new()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(ACTIVE_PANE_COLOR))
            .style(Style::new().bg(POPUP_BACKGROUND))
            .title("Movie")
            .title_bottom(Line::from(" [Esc] close  [j/k] scroll ").right_aligned());

        let lines = Self::lines(movie);
        let total_lines = lines.len();
        self.vertical_scroll = self.vertical_scroll.min(total_lines.saturating_sub(1));

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((self.vertical_scroll as u16, 0));

        frame.render_widget(Clear, popup);
        frame.render_widget(paragraph, popup);

        self.vertical_scroll_state = self
            .vertical_scroll_state
            .content_length(total_lines)
            .position(self.vertical_scroll);

        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .symbols(scrollbar::VERTICAL)
                .begin_symbol(None)
                .track_symbol(None)
                .end_symbol(None),
            popup.inner(Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut self.vertical_scroll_state,
        );

        Ok(())
    }
}
