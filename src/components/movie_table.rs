use color_eyre::Result;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Style},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};
use tokio::sync::mpsc::UnboundedSender;

use crate::{
    action::Action,
    app::Mode,
    constants::{
        ACTIVE_PANE_COLOR, INACTIVE_PANE_COLOR, TABLE_HEADER_STYLE, TABLE_ROW_HOVER_STYLE,
    },
    movie::{Column, Movie, COLUMNS},
    state::Deck,
    util::{highlight_matches, sanitize},
};

use super::{Component, Regions};

const SCROLL_STEP: usize = 5;

/// The catalogue page, or the search results while a search term is set.
pub struct MovieTable {
    command_tx: Option<UnboundedSender<Action>>,
    table_state: TableState,
}

impl MovieTable {
    pub fn new() -> Self {
        Self {
            command_tx: None,
            table_state: TableState::default().with_selected(Some(0)),
        }
    }

    fn cursor(&self) -> Option<usize> {
        self.table_state.selected()
    }

    fn move_cursor(&mut self, len: usize, to: impl FnOnce(usize) -> usize) {
        if len == 0 {
            self.table_state.select(None);
            return;
        }
        let next = to(self.cursor().unwrap_or(0));
        self.table_state.select(Some(next.min(len - 1)));
    }

    fn clamp(&mut self, len: usize) {
        self.move_cursor(len, |i| i);
    }

    fn reset(&mut self, len: usize) {
        *self.table_state.offset_mut() = 0;
        self.move_cursor(len, |_| 0);
    }

    fn hovered<'a>(&self, deck: &'a Deck) -> Option<&'a Movie> {
        self.cursor().and_then(|i| deck.rows().get(i))
    }

    fn send(&self, action: Action) -> Result<()> {
        if let Some(tx) = &self.command_tx {
            tx.send(action)?;
        }
        Ok(())
    }

    fn row(&self, movie: &Movie, deck: &Deck) -> Row<'static> {
        let checkbox = if deck.is_selected(movie) { "[x]" } else { "[ ]" };
        let mut cells = vec![Cell::from(checkbox)];
        cells.extend(COLUMNS.iter().map(|column| {
            let text = sanitize(&column.cell(movie));
            match column {
                Column::Title if deck.is_search_mode() => {
                    Cell::from(highlight_matches(&text, deck.search()))
                }
                _ => Cell::from(text),
            }
        }));
        Row::new(cells)
    }
}

impl Component for MovieTable {
    fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> Result<()> {
        self.command_tx = Some(tx);
        Ok(())
    }

    fn update(&mut self, action: Action, deck: &Deck) -> Result<Option<Action>> {
        let len = deck.rows().len();
        match action {
            Action::RowNext => self.move_cursor(len, |i| i + 1),
            Action::RowPrev => self.move_cursor(len, |i| i.saturating_sub(1)),
            Action::RowFirst => self.move_cursor(len, |_| 0),
            Action::RowLast => self.move_cursor(len, |_| usize::MAX),
            Action::RowScrollDown => self.move_cursor(len, |i| i + SCROLL_STEP),
            Action::RowScrollUp => self.move_cursor(len, |i| i.saturating_sub(SCROLL_STEP)),
            Action::ToggleSelection => {
                if let Some(movie) = self.hovered(deck) {
                    self.send(Action::ToggleMovie(movie.clone()))?;
                }
            }
            Action::ViewDetail => {
                if let Some(movie) = self.hovered(deck) {
                    self.send(Action::ShowDetail(movie.clone()))?;
                }
            }
            Action::NextPage
            | Action::PrevPage
            | Action::SubmitSearch(_)
            | Action::ClearSearch => self.reset(len),
            Action::Fetched(_) => self.clamp(len),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, deck: &Deck) -> Result<()> {
        let area = Regions::new(area).table;
        let active = deck.mode() == Mode::Table;

        let title = if deck.is_search_mode() {
            format!("Results for \"{}\"", sanitize(deck.search()))
        } else {
            "Movies".to_string()
        };
        let block = Block::new()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(if active {
                ACTIVE_PANE_COLOR
            } else {
                INACTIVE_PANE_COLOR
            }))
            .title(title);

        if deck.rows().is_empty() {
            let message = if deck.is_search_mode() {
                "No entries found."
            } else {
                ""
            };
            frame.render_widget(Paragraph::new(message).centered().block(block), area);
            return Ok(());
        }

        let header = Row::new(
            std::iter::once("").chain(COLUMNS.iter().map(|column| column.header())),
        )
        .style(TABLE_HEADER_STYLE);

        let rows: Vec<Row> = deck.rows().iter().map(|movie| self.row(movie, deck)).collect();

        let widths = [
            Constraint::Length(3),
            Constraint::Min(20),
            Constraint::Length(10),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(18),
            Constraint::Length(18),
            Constraint::Length(13),
            Constraint::Length(13),
            Constraint::Length(10),
            Constraint::Fill(1),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .style(Style::default().fg(Color::White))
            .row_highlight_style(TABLE_ROW_HOVER_STYLE);

        frame.render_stateful_widget(table, area, &mut self.table_state);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tokio::sync::mpsc;

    use super::*;
    use crate::{api::FetchResponse, components::testing::render};

    fn movie(id: i64, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            ..Movie::default()
        }
    }

    fn deck(movies: Vec<Movie>) -> Deck {
        let mut deck = Deck::new(20);
        deck.start();
        deck.apply(&Action::Fetched(FetchResponse::Range(Ok(movies))));
        deck
    }

    #[test]
    fn cursor_stays_inside_the_rows() -> Result<()> {
        let deck = deck(vec![movie(1, "Heat"), movie(2, "Alien"), movie(3, "Ran")]);
        let mut table = MovieTable::new();

        table.update(Action::RowLast, &deck)?;
        assert_eq!(table.cursor(), Some(2));

        table.update(Action::RowNext, &deck)?;
        assert_eq!(table.cursor(), Some(2));

        table.update(Action::RowScrollUp, &deck)?;
        assert_eq!(table.cursor(), Some(0));
        Ok(())
    }

    #[test]
    fn toggling_sends_the_hovered_movie() -> Result<()> {
        let deck = deck(vec![movie(1, "Heat"), movie(2, "Alien")]);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut table = MovieTable::new();
        table.register_action_handler(tx)?;

        table.update(Action::RowNext, &deck)?;
        table.update(Action::ToggleSelection, &deck)?;
        table.update(Action::ViewDetail, &deck)?;

        assert_eq!(rx.try_recv()?, Action::ToggleMovie(movie(2, "Alien")));
        assert_eq!(rx.try_recv()?, Action::ShowDetail(movie(2, "Alien")));
        Ok(())
    }

    #[test]
    fn empty_table_has_no_cursor() -> Result<()> {
        let deck = deck(Vec::new());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut table = MovieTable::new();
        table.register_action_handler(tx)?;

        table.update(Action::RowNext, &deck)?;
        table.update(Action::ToggleSelection, &deck)?;

        assert_eq!(table.cursor(), None);
        assert!(rx.try_recv().is_err());
        Ok(())
    }

    #[test]
    fn selected_rows_are_checked() -> Result<()> {
        let mut deck = deck(vec![movie(1, "Heat"), movie(2, "Alien")]);
        deck.apply(&Action::ToggleMovie(movie(2, "Alien")));
        let mut table = MovieTable::new();

        let screen = render(&mut table, &deck, 220, 20);

        assert!(screen.contains("[ ] Heat"));
        assert!(screen.contains("[x] Alien"));
        assert!(screen.contains("Vote Average"));
        Ok(())
    }

    #[test]
    fn empty_search_says_so() -> Result<()> {
        let mut deck = deck(vec![movie(1, "Heat")]);
        deck.apply(&Action::SubmitSearch("zzz".into()));
        deck.apply(&Action::Fetched(FetchResponse::Search(Ok(Vec::new()))));
        let mut table = MovieTable::new();

        let screen = render(&mut table, &deck, 220, 20);

        assert!(screen.contains("No entries found."));
        assert!(screen.contains("Results for \"zzz\""));
        Ok(())
    }
}
