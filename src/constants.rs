use ratatui::style::{
    palette::tailwind::{EMERALD, INDIGO, RED, SLATE, VIOLET},
    Color, Modifier, Style,
};

pub const ACTIVE_PANE_COLOR: Color = EMERALD.c300;

pub const INACTIVE_PANE_COLOR: Color = Color::Gray;

pub const ROW_HOVER_COLOR: Color = VIOLET.c600;

pub const HINT_COLOR: Color = INDIGO.c300;

pub const ALERT_COLOR: Color = RED.c500;

pub const POPUP_BACKGROUND: Color = SLATE.c900;

pub const TABLE_ROW_HOVER_STYLE: Style = Style::new()
    .bg(ROW_HOVER_COLOR)
    .add_modifier(Modifier::BOLD);

pub const TABLE_HEADER_STYLE: Style = Style::new()
    .fg(Color::White)
    .bg(SLATE.c700)
    .add_modifier(Modifier::BOLD);

pub const SEARCH_MATCH_STYLE: Style = Style::new()
    .fg(EMERALD.c300)
    .add_modifier(Modifier::BOLD);
