use std::{collections::HashMap, env, path::PathBuf};

use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use derive_deref::{Deref, DerefMut};
use directories::ProjectDirs;
use lazy_static::lazy_static;
use serde::{de::Deserializer, Deserialize};
use tracing::error;

use crate::{action::Action, api::DEFAULT_BASE_URL, app::Mode, state::DEFAULT_ENTRIES};

pub(crate) const CONFIG: &str = include_str!("../.config/config.json5");

#[derive(Clone, Debug, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_entries")]
    pub entries: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            entries: default_entries(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_entries() -> usize {
    DEFAULT_ENTRIES
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub keybindings: KeyBindings,
}

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase().to_string();
    pub static ref DATA_FOLDER: Option<PathBuf> =
        env::var(format!("{}_DATA", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
    pub static ref CONFIG_FOLDER: Option<PathBuf> =
        env::var(format!("{}_CONFIG", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
}

impl Config {
    pub fn new() -> Result<Self, config::ConfigError> {
        let default_config: Config = json5::from_str(CONFIG)
            .map_err(|err| config::ConfigError::Message(err.to_string()))?;
        let config_dir = get_config_dir();
        let mut builder = config::Config::builder();

        let config_files = [
            ("config.json5", config::FileFormat::Json5),
            ("config.json", config::FileFormat::Json),
            ("config.yaml", config::FileFormat::Yaml),
            ("config.toml", config::FileFormat::Toml),
            ("config.ini", config::FileFormat::Ini),
        ];
        let mut found_config = false;
        for (file, format) in &config_files {
            let source = config::File::from(config_dir.join(file))
                .format(*format)
                .required(false);
            builder = builder.add_source(source);
            if config_dir.join(file).exists() {
                found_config = true
            }
        }
        if !found_config {
            error!("No configuration file found. Falling back to the built-in defaults");
        }

        let mut cfg: Self = builder.build()?.try_deserialize()?;
        cfg.merge_default_keybindings(&default_config.keybindings);

        Ok(cfg)
    }

    /// Fills in every default binding the user left out.
    fn merge_default_keybindings(&mut self, defaults: &KeyBindings) {
        for (mode, default_bindings) in defaults.iter() {
            let user_bindings = self.keybindings.entry(*mode).or_default();
            for (key, action) in default_bindings.iter() {
                user_bindings
                    .entry(key.clone())
                    .or_insert_with(|| action.clone());
            }
        }
    }
}

pub fn get_data_dir() -> PathBuf {
    if let Some(s) = DATA_FOLDER.clone() {
        s
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".data")
    }
}

pub fn get_config_dir() -> PathBuf {
    if let Some(s) = CONFIG_FOLDER.clone() {
        s
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.config_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".config")
    }
}

fn project_directory() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "thechessdev", env!("CARGO_PKG_NAME"))
}

#[derive(Clone, Debug, Default, Deref, DerefMut)]
pub struct KeyBindings(pub HashMap<Mode, HashMap<Vec<KeyEvent>, Action>>);

impl KeyBindings {
    /// Shortest key sequence bound to `action` in `mode`, formatted for display.
    pub fn hint(&self, mode: Mode, action: &Action) -> Option<String> {
        self.get(&mode)?
            .iter()
            .filter(|(_, bound)| *bound == action)
            .map(|(keys, _)| {
                keys.iter()
                    .map(key_event_to_string)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .min_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)))
    }
}

impl<'de> Deserialize<'de> for KeyBindings {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let parsed_map = HashMap::<Mode, HashMap<String, Action>>::deserialize(deserializer)?;

        let mut keybindings = HashMap::new();
        for (mode, inner_map) in parsed_map {
            let mut converted = HashMap::new();
            for (key_str, action) in inner_map {
                let keys = parse_key_sequence(&key_str).map_err(serde::de::Error::custom)?;
                converted.insert(keys, action);
            }
            keybindings.insert(mode, converted);
        }

        Ok(KeyBindings(keybindings))
    }
}

fn parse_key_event(raw: &str) -> Result<KeyEvent, String> {
    let raw_lower = raw.to_ascii_lowercase();
    let (remaining, modifiers) = extract_modifiers(&raw_lower);
    parse_key_code_with_modifiers(remaining, modifiers)
}

fn extract_modifiers(raw: &str) -> (&str, KeyModifiers) {
    let mut modifiers = KeyModifiers::empty();
    let mut current = raw;

    loop {
        match current {
            rest if rest.starts_with("ctrl-") => {
                modifiers.insert(KeyModifiers::CONTROL);
                current = &rest[5..];
            }
            rest if rest.starts_with("alt-") => {
                modifiers.insert(KeyModifiers::ALT);
                current = &rest[4..];
            }
            rest if rest.starts_with("shift-") => {
                modifiers.insert(KeyModifiers::SHIFT);
                current = &rest[6..];
            }
            _ => break, // break out of the loop if no known prefix is detected
        };
    }

    (current, modifiers)
}

fn parse_key_code_with_modifiers(
    raw: &str,
    mut modifiers: KeyModifiers,
) -> Result<KeyEvent, String> {
    let c = match raw {
        "esc" => KeyCode::Esc,
        "enter" => KeyCode::Enter,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "backtab" => {
            modifiers.insert(KeyModifiers::SHIFT);
            KeyCode::BackTab
        }
        "backspace" => KeyCode::Backspace,
        "delete" => KeyCode::Delete,
        "insert" => KeyCode::Insert,
        "f1" => KeyCode::F(1),
        "f2" => KeyCode::F(2),
        "f3" => KeyCode::F(3),
        "f4" => KeyCode::F(4),
        "f5" => KeyCode::F(5),
        "f6" => KeyCode::F(6),
        "f7" => KeyCode::F(7),
        "f8" => KeyCode::F(8),
        "f9" => KeyCode::F(9),
        "f10" => KeyCode::F(10),
        "f11" => KeyCode::F(11),
        "f12" => KeyCode::F(12),
        "space" => KeyCode::Char(' '),
        "hyphen" => KeyCode::Char('-'),
        "minus" => KeyCode::Char('-'),
        "tab" => KeyCode::Tab,
        c if c.chars().count() == 1 => {
            let mut c = c.chars().next().unwrap_or_default();
            if modifiers.contains(KeyModifiers::SHIFT) {
                c = c.to_ascii_uppercase();
            }
            KeyCode::Char(c)
        }
        _ => return Err(format!("Unable to parse {raw}")),
    };
    Ok(KeyEvent::new(c, modifiers))
}

pub fn key_event_to_string(key_event: &KeyEvent) -> String {
    let char;
    let key_code = match key_event.code {
        KeyCode::Backspace => "backspace",
        KeyCode::Enter => "enter",
        KeyCode::Left => "left",
        KeyCode::Right => "right",
        KeyCode::Up => "up",
        KeyCode::Down => "down",
        KeyCode::Home => "home",
        KeyCode::End => "end",
        KeyCode::PageUp => "pageup",
        KeyCode::PageDown => "pagedown",
        KeyCode::Tab => "tab",
        KeyCode::BackTab => "backtab",
        KeyCode::Delete => "delete",
        KeyCode::Insert => "insert",
        KeyCode::F(c) => {
            char = format!("f({c})");
            &char
        }
        KeyCode::Char(' ') => "space",
        KeyCode::Char(c) => {
            char = c.to_string();
            &char
        }
        KeyCode::Esc => "esc",
        _ => "",
    };

    let mut modifiers = Vec::with_capacity(3);

    if key_event.modifiers.intersects(KeyModifiers::CONTROL) {
        modifiers.push("ctrl");
    }

    // Uppercase letters already carry the shift.
    if key_event.modifiers.intersects(KeyModifiers::SHIFT)
        && !matches!(key_event.code, KeyCode::Char(_) | KeyCode::BackTab)
    {
        modifiers.push("shift");
    }

    if key_event.modifiers.intersects(KeyModifiers::ALT) {
        modifiers.push("alt");
    }

    let mut key = modifiers.join("-");

    if !key.is_empty() {
        key.push('-');
    }
    key.push_str(key_code);

    key
}

pub fn parse_key_sequence(raw: &str) -> Result<Vec<KeyEvent>, String> {
    if raw.chars().filter(|c| *c == '>').count() != raw.chars().filter(|c| *c == '<').count() {
        return Err(format!("Unable to parse `{}`", raw));
    }
    let raw = if !raw.contains("><") {
        let raw = raw.strip_prefix('<').unwrap_or(raw);
        raw.strip_suffix('>').unwrap_or(raw)
    } else {
        raw
    };
    let sequences = raw
        .split("><")
        .map(|seq| {
            if let Some(s) = seq.strip_prefix('<') {
                s
            } else if let Some(s) = seq.strip_suffix('>') {
                s
            } else {
                seq
            }
        })
        .collect::<Vec<_>>();

    sequences.into_iter().map(parse_key_event).collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_simple_keys() {
        assert_eq!(
            parse_key_event("a").unwrap(),
            KeyEvent::new(KeyCode::Char('a'), KeyModifiers::empty())
        );

        assert_eq!(
            parse_key_event("enter").unwrap(),
            KeyEvent::new(KeyCode::Enter, KeyModifiers::empty())
        );

        assert_eq!(
            parse_key_event("esc").unwrap(),
            KeyEvent::new(KeyCode::Esc, KeyModifiers::empty())
        );
    }

    #[test]
    fn test_with_modifiers() {
        assert_eq!(
            parse_key_event("ctrl-a").unwrap(),
            KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL)
        );

        assert_eq!(
            parse_key_event("alt-enter").unwrap(),
            KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT)
        );

        assert_eq!(
            parse_key_event("shift-g").unwrap(),
            KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT)
        );
    }

    #[test]
    fn test_invalid_keys() {
        assert!(parse_key_event("invalid-key").is_err());
        assert!(parse_key_event("ctrl-invalid-key").is_err());
    }

    #[test]
    fn test_key_sequences() {
        assert_eq!(
            parse_key_sequence("<g><g>").unwrap(),
            vec![
                KeyEvent::new(KeyCode::Char('g'), KeyModifiers::empty()),
                KeyEvent::new(KeyCode::Char('g'), KeyModifiers::empty()),
            ]
        );
        assert_eq!(
            parse_key_sequence("</>").unwrap(),
            vec![KeyEvent::new(KeyCode::Char('/'), KeyModifiers::empty())]
        );
        assert!(parse_key_sequence("<g").is_err());
    }

    #[test]
    fn test_key_event_to_string() {
        assert_eq!(
            key_event_to_string(&KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL)),
            "ctrl-a".to_string()
        );
        assert_eq!(
            key_event_to_string(&KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT)),
            "G".to_string()
        );
    }

    #[test]
    fn default_config_binds_the_table() -> Result<()> {
        let c: Config = json5::from_str(CONFIG)?;

        assert_eq!(c.api.base_url, "http://localhost:8000");
        assert_eq!(c.api.entries, 20);
        assert_eq!(
            c.keybindings
                .get(&Mode::Table)
                .unwrap()
                .get(&parse_key_sequence("<q>").unwrap_or_default())
                .unwrap(),
            &Action::Quit
        );
        assert_eq!(
            c.keybindings
                .get(&Mode::DeleteDialog)
                .unwrap()
                .get(&parse_key_sequence("<Enter>").unwrap_or_default())
                .unwrap(),
            &Action::ConfirmDelete
        );
        Ok(())
    }

    #[test]
    fn user_file_only_needs_the_keys_it_changes() -> Result<()> {
        let c: Config = json5::from_str(r#"{ "api": { "entries": 30 } }"#)?;

        assert_eq!(c.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(c.api.entries, 30);
        assert!(c.keybindings.is_empty());
        Ok(())
    }

    #[test]
    fn hints_pick_the_shortest_binding() -> Result<()> {
        let c: Config = json5::from_str(CONFIG)?;

        assert_eq!(
            c.keybindings.hint(Mode::Table, &Action::NextPage),
            Some("n".to_string())
        );
        assert_eq!(
            c.keybindings.hint(Mode::Table, &Action::OpenEditForm),
            Some("e".to_string())
        );
        assert_eq!(c.keybindings.hint(Mode::Alert, &Action::NextPage), None);
        Ok(())
    }

    #[test]
    fn user_bindings_win_over_defaults() {
        let defaults: Config = json5::from_str(CONFIG).unwrap();
        let mut cfg: Config = json5::from_str(
            r#"{ "keybindings": { "Table": { "<x>": "Quit", "<q>": "NextPage" } } }"#,
        )
        .unwrap();

        cfg.merge_default_keybindings(&defaults.keybindings);

        let table = cfg.keybindings.get(&Mode::Table).unwrap();
        assert_eq!(
            table.get(&parse_key_sequence("<q>").unwrap()),
            Some(&Action::NextPage)
        );
        assert_eq!(
            table.get(&parse_key_sequence("<x>").unwrap()),
            Some(&Action::Quit)
        );
        assert_eq!(
            table.get(&parse_key_sequence("<j>").unwrap()),
            Some(&Action::RowNext)
        );
        assert!(cfg.keybindings.contains_key(&Mode::Alert));
    }
}
