use color_eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::{
    layout::{Constraint, Layout, Rect, Size},
    Frame,
};
use tokio::sync::mpsc::UnboundedSender;

use crate::{action::Action, config::Config, state::Deck, tui::Event};

pub mod alert;
pub mod delete_dialog;
pub mod form_drawer;
pub mod loading;
pub mod movie_detail;
pub mod movie_table;
pub mod nav_bar;
pub mod pagination;
pub mod record_form;
pub mod search_bar;
pub mod toolbar;

/// `Component` is a trait that represents a visual and interactive element of the user interface.
///
/// Implementors of this trait can be registered with the main application loop and will be able to
/// receive events, update state, and be rendered on the screen. They read the shared [`Deck`] and
/// never mutate it; changes go back to the app as actions.
pub trait Component {
    /// Register an action handler that can send actions for processing if necessary.
    fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> Result<()> {
        let _ = tx; // to appease clippy
        Ok(())
    }

    /// Register a configuration handler that provides configuration settings if necessary.
    fn register_config_handler(&mut self, config: Config) -> Result<()> {
        let _ = config; // to appease clippy
        Ok(())
    }

    /// Initialize the component with a specified area if necessary.
    fn init(&mut self, area: Size) -> Result<()> {
        let _ = area; // to appease clippy
        Ok(())
    }

    /// Handle incoming events and produce actions if necessary.
    fn handle_events(&mut self, event: Option<Event>, deck: &Deck) -> Result<Option<Action>> {
        let action = match event {
            Some(Event::Key(key_event)) => self.handle_key_event(key_event, deck)?,
            Some(Event::Paste(text)) => self.handle_paste(&text, deck)?,
            _ => None,
        };
        Ok(action)
    }

    /// Handle key events. Only the component owning the current mode should react.
    fn handle_key_event(&mut self, key: KeyEvent, deck: &Deck) -> Result<Option<Action>> {
        let _ = (key, deck); // to appease clippy
        Ok(None)
    }

    /// Handle bracketed paste.
    fn handle_paste(&mut self, text: &str, deck: &Deck) -> Result<Option<Action>> {
        let _ = (text, deck); // to appease clippy
        Ok(None)
    }

    /// Update the state of the component after `deck` has applied `action`.
    fn update(&mut self, action: Action, deck: &Deck) -> Result<Option<Action>> {
        let _ = (action, deck); // to appease clippy
        Ok(None)
    }

    /// Render the component on the screen.
    fn draw(&mut self, frame: &mut Frame, area: Rect, deck: &Deck) -> Result<()>;
}

/// Fixed regions of the main view.
pub struct Regions {
    pub nav: Rect,
    pub toolbar: Rect,
    pub table: Rect,
    pub footer: Rect,
}

impl Regions {
    pub fn new(area: Rect) -> Self {
        let [nav, toolbar, table, footer] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);

        Self {
            nav,
            toolbar,
            table,
            footer,
        }
    }

    /// Brand, search box and backend box, left to right.
    pub fn nav_columns(&self) -> [Rect; 3] {
        Layout::horizontal([
            Constraint::Length(14),
            Constraint::Min(20),
            Constraint::Length(36),
        ])
        .areas(self.nav)
    }
}
