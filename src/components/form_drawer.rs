use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Margin, Rect},
    style::Style,
    widgets::{Block, BorderType, Borders, Clear},
    Frame,
};

use crate::{
    action::Action,
    app::Mode,
    constants::{ACTIVE_PANE_COLOR, INACTIVE_PANE_COLOR, POPUP_BACKGROUND},
    movie::Movie,
    state::Deck,
    util::right_drawer,
};

use super::{record_form::RecordForm, Component};

const DRAWER_WIDTH: u16 = 48;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormKind {
    Add,
    Edit,
}

impl FormKind {
    fn title(self) -> &'static str {
        match self {
            FormKind::Add => "Add Movie",
            FormKind::Edit => "Edit Movie",
        }
    }

    fn mode(self) -> Mode {
        match self {
            FormKind::Add => Mode::AddForm,
            FormKind::Edit => Mode::EditForm,
        }
    }

    fn close(self) -> Action {
        match self {
            FormKind::Add => Action::CloseAddForm,
            FormKind::Edit => Action::CloseEditForm,
        }
    }

    fn submit(self, movie: Movie) -> Action {
        match self {
            FormKind::Add => Action::SubmitAdd(movie),
            FormKind::Edit => Action::SubmitEdit(movie),
        }
    }

    fn is_open(self, deck: &Deck) -> bool {
        match self {
            FormKind::Add => deck.overlays().add,
            FormKind::Edit => deck.overlays().edit,
        }
    }
}

/// Side drawer hosting a [`RecordForm`], once for adding and once for editing.
pub struct FormDrawer {
    kind: FormKind,
    form: RecordForm,
}

impl FormDrawer {
    pub fn add() -> Self {
        Self::with_kind(FormKind::Add)
    }

    pub fn edit() -> Self {
        Self::with_kind(FormKind::Edit)
    }

    fn with_kind(kind: FormKind) -> Self {
        Self {
            kind,
            form: RecordForm::new(None),
        }
    }
}

impl Component for FormDrawer {
    fn handle_key_event(&mut self, key: KeyEvent, deck: &Deck) -> Result<Option<Action>> {
        if deck.mode() != self.kind.mode() {
            return Ok(None);
        }
        if key.code == KeyCode::Esc {
            return Ok(Some(self.kind.close()));
        }
        Ok(self.form.handle_key(key).map(|movie| self.kind.submit(movie)))
    }

    fn handle_paste(&mut self, text: &str, deck: &Deck) -> Result<Option<Action>> {
        if deck.mode() == self.kind.mode() {
            self.form.paste(text);
        }
        Ok(None)
    }

    fn update(&mut self, action: Action, deck: &Deck) -> Result<Option<Action>> {
        match (self.kind, action) {
            (FormKind::Add, Action::OpenAddForm) => self.form = RecordForm::new(None),
            (FormKind::Edit, Action::OpenEditForm) => {
                self.form = RecordForm::new(deck.selected());
            }
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, deck: &Deck) -> Result<()> {
        if !self.kind.is_open(deck) {
            return Ok(());
        }

        let drawer = right_drawer(area, DRAWER_WIDTH);
        let focused = deck.mode() == self.kind.mode();
        let block = Block::new()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(if focused {
                ACTIVE_PANE_COLOR
            } else {
                INACTIVE_PANE_COLOR
            }))
            .style(Style::new().bg(POPUP_BACKGROUND))
            .title(self.kind.title());

        frame.render_widget(Clear, drawer);
        frame.render_widget(block, drawer);
        self.form.draw(
            frame,
            drawer.inner(Margin {
                vertical: 1,
                horizontal: 2,
            }),
        );

        Ok(())
    }
}
