use color_eyre::Result;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    Frame,
};
use throbber_widgets_tui::{Throbber, ThrobberState, WhichUse, ASCII};

use crate::{action::Action, state::Deck};

use super::{Component, Regions};

/// Spinner in the footer while any backend call is in flight.
#[derive(Default)]
pub struct LoadingBox {
    loading_state: ThrobberState,
}

impl LoadingBox {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component for LoadingBox {
    fn update(&mut self, action: Action, deck: &Deck) -> Result<Option<Action>> {
        if action == Action::Tick && deck.pending() > 0 {
            self.loading_state.calc_next();
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, deck: &Deck) -> Result<()> {
        if deck.pending() == 0 {
            return Ok(());
        }

        let [left, _] = Layout::horizontal([Constraint::Percentage(50), Constraint::Min(0)])
            .areas(Regions::new(area).footer);

        let throbber = Throbber::default()
            .label(deck.loading_message())
            .style(Style::default().fg(Color::Cyan))
            .throbber_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .throbber_set(ASCII)
            .use_type(WhichUse::Spin);

        frame.render_stateful_widget(throbber, left, &mut self.loading_state);
        Ok(())
    }
}
