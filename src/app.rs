use color_eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::prelude::Rect;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info};

use crate::{
    action::Action,
    api::{FetchRequest, MovieApi},
    cli::Cli,
    components::{
        alert::AlertBox, delete_dialog::DeleteDialog, form_drawer::FormDrawer, loading::LoadingBox,
        movie_detail::MovieDetail, movie_table::MovieTable, nav_bar::NavBar,
        pagination::Pagination, search_bar::SearchBar, toolbar::Toolbar, Component,
    },
    config::Config,
    state::Deck,
    tui::{Event, Tui},
};

pub struct App {
    config: Config,
    tick_rate: f64,
    frame_rate: f64,
    components: Vec<Box<dyn Component>>,
    should_quit: bool,
    should_suspend: bool,
    last_tick_key_events: Vec<KeyEvent>,
    action_tx: UnboundedSender<Action>,
    action_rx: UnboundedReceiver<Action>,
    deck: Deck,
    api: MovieApi,
}

/// Which surface receives keyboard input. Keybindings are looked up per mode.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    Table,
    Search,
    Detail,
    EditForm,
    AddForm,
    DeleteDialog,
    Alert,
}

impl App {
    pub fn new(args: &Cli) -> Result<Self> {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let config = Config::new()?;
        let base_url = args
            .api_url
            .clone()
            .unwrap_or_else(|| config.api.base_url.clone());
        let entries = args.entries.unwrap_or(config.api.entries);
        let api = MovieApi::new(&base_url);
        info!(base_url = api.base_url(), entries, "starting");

        Ok(Self {
            tick_rate: args.tick_rate,
            frame_rate: args.frame_rate,
            components: vec![
                Box::new(NavBar::new(api.base_url())),
                Box::new(SearchBar::new()),
                Box::new(Toolbar::new()),
                Box::new(MovieTable::new()),
                Box::new(Pagination::new()),
                Box::new(LoadingBox::new()),
                Box::new(MovieDetail::new()),
                Box::new(FormDrawer::edit()),
                Box::new(FormDrawer::add()),
                Box::new(DeleteDialog::new()),
                Box::new(AlertBox::new()),
            ],
            should_quit: false,
            should_suspend: false,
            config,
            last_tick_key_events: Vec::new(),
            action_tx,
            action_rx,
            deck: Deck::new(entries),
            api,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?
            .tick_rate(self.tick_rate)
            .frame_rate(self.frame_rate)
            .paste(true);
        tui.enter()?;

        for component in self.components.iter_mut() {
            component.register_action_handler(self.action_tx.clone())?;
        }
        for component in self.components.iter_mut() {
            component.register_config_handler(self.config.clone())?;
        }
        for component in self.components.iter_mut() {
            component.init(tui.size()?)?;
        }

        let requests = self.deck.start();
        self.dispatch(requests);

        let action_tx = self.action_tx.clone();
        loop {
            self.handle_events(&mut tui).await?;
            self.handle_actions(&mut tui)?;
            if self.should_suspend {
                tui.suspend()?;
                action_tx.send(Action::Resume)?;
                action_tx.send(Action::ClearScreen)?;
                tui.resume()?;
            } else if self.should_quit {
                tui.stop()?;
                break;
            }
        }
        tui.exit()?;
        Ok(())
    }

    async fn handle_events(&mut self, tui: &mut Tui) -> Result<()> {
        let Some(event) = tui.next_event().await else {
            return Ok(());
        };
        let action_tx = self.action_tx.clone();
        match event {
            Event::Tick => action_tx.send(Action::Tick)?,
            Event::Render => action_tx.send(Action::Render)?,
            Event::Resize(x, y) => action_tx.send(Action::Resize(x, y))?,
            Event::Key(key) => self.handle_key_event(key)?,
            _ => {}
        }
        for component in self.components.iter_mut() {
            if let Some(action) = component.handle_events(Some(event.clone()), &self.deck)? {
                action_tx.send(action)?;
            }
        }
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        let action_tx = self.action_tx.clone();
        let Some(keymap) = self.config.keybindings.get(&self.deck.mode()) else {
            return Ok(());
        };
        match keymap.get(&vec![key]) {
            Some(action) => {
                info!("Got action: {action:?}");
                action_tx.send(action.clone())?;
            }
            _ => {
                // If the key was not handled as a single key action,
                // then consider it for multi-key combinations.
                self.last_tick_key_events.push(key);

                if let Some(action) = keymap.get(&self.last_tick_key_events) {
                    info!("Got action: {action:?}");
                    action_tx.send(action.clone())?;
                }
            }
        }
        Ok(())
    }

    fn handle_actions(&mut self, tui: &mut Tui) -> Result<()> {
        while let Ok(action) = self.action_rx.try_recv() {
            if action != Action::Tick && action != Action::Render {
                debug!("{action:?}");
            }
            match action {
                Action::Tick => {
                    self.last_tick_key_events.drain(..);
                }
                Action::Quit => self.should_quit = true,
                Action::Suspend => self.should_suspend = true,
                Action::Resume => self.should_suspend = false,
                Action::ClearScreen => tui.terminal.clear()?,
                Action::Resize(w, h) => self.handle_resize(tui, w, h)?,
                Action::Render => self.render(tui)?,
                Action::Error(ref msg) => error!("{msg}"),
                _ => {}
            }

            let requests = self.deck.apply(&action);
            self.dispatch(requests);

            for component in self.components.iter_mut() {
                if let Some(action) = component.update(action.clone(), &self.deck)? {
                    self.action_tx.send(action)?
                };
            }
        }
        Ok(())
    }

    /// Runs each request on its own task; the answer comes back as an action.
    fn dispatch(&self, requests: Vec<FetchRequest>) {
        for request in requests {
            if request.is_mutation() {
                info!(method = %request.method(), route = %request.route(), "dispatching");
            } else {
                debug!(method = %request.method(), route = %request.route(), "dispatching");
            }
            let api = self.api.clone();
            let action_tx = self.action_tx.clone();
            tokio::spawn(async move {
                let response = api.execute(request).await;
                if action_tx.send(Action::Fetched(response)).is_err() {
                    debug!("app closed before the response arrived");
                }
            });
        }
    }

    fn handle_resize(&mut self, tui: &mut Tui, w: u16, h: u16) -> Result<()> {
        tui.resize(Rect::new(0, 0, w, h))?;
        self.render(tui)?;
        Ok(())
    }

    fn render(&mut self, tui: &mut Tui) -> Result<()> {
        let deck = &self.deck;
        let components = &mut self.components;
        let action_tx = self.action_tx.clone();
        tui.draw(|frame| {
            let area = frame.area();
            for component in components.iter_mut() {
                if let Err(err) = component.draw(frame, area, deck) {
                    let _ = action_tx.send(Action::Error(format!("Failed to draw: {:?}", err)));
                }
            }
        })?;
        Ok(())
    }
}
