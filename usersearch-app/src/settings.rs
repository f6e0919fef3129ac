use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    Gray,
    DarkGray,
    LightRed,
    LightGreen,
    LightYellow,
    LightBlue,
    LightMagenta,
    LightCyan,
    White,
    /// The terminal's own colour.
    Reset,
}

#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<toml::de::Error> for SettingsError {
    fn from(e: toml::de::Error) -> Self {
        SettingsError::Parse(e)
    }
}

impl From<toml::ser::Error> for SettingsError {
    fn from(e: toml::ser::Error) -> Self {
        SettingsError::Serialize(e)
    }
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "could not access settings: {}", e),
            SettingsError::Parse(e) => write!(f, "invalid settings: {}", e),
            SettingsError::Serialize(e) => write!(f, "could not serialize settings: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {}

/// Provides terminal UI settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub interface_style: InterfaceStyle,
    pub popup_settings: PopupSettings,
    pub data_settings: DataSettings,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterfaceStyle {
    pub tag_fg: Color,
    pub tag_bg: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    pub cancel_fg: Color,
    pub popup_fg: Color,
    pub popup_bg: Color,
    pub cursor_fg: Color,
    pub cursor_bg: Color,
    pub input_fg: Color,
    pub input_bg: Color,
    pub placeholder_fg: Color,
}

impl Default for InterfaceStyle {
    fn default() -> Self {
        InterfaceStyle {
            tag_fg: Color::White,
            tag_bg: Color::Blue,
            highlight_fg: Color::Black,
            highlight_bg: Color::LightRed,
            cancel_fg: Color::LightRed,
            popup_fg: Color::White,
            popup_bg: Color::Black,
            cursor_fg: Color::Black,
            cursor_bg: Color::White,
            input_fg: Color::Reset,
            input_bg: Color::Reset,
            placeholder_fg: Color::DarkGray,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopupSettings {
    /// Rows of suggestions shown at once.
    pub max_rows: usize,
    /// Keep the popup closed while nothing matches the input.
    pub hide_when_empty: bool,
}

impl Default for PopupSettings {
    fn default() -> Self {
        PopupSettings {
            max_rows: 8,
            hide_when_empty: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataSettings {
    /// A user list to read instead of the bundled one.
    pub file: Option<PathBuf>,
}

impl Settings {
    /// The default settings location, `<config dir>/usersearch/settings.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push("usersearch/settings.toml");
            path
        })
    }

    /// Opens the settings at the provided location, and fills in missing settings from default
    /// values.
    ///
    /// # Arguments
    ///
    /// * ` file ` - The path to the settings.
    ///
    /// # Error
    /// Errors if reading the file or parsing the settings fails.
    pub fn open<P: AsRef<Path>>(file: P) -> Result<Self, SettingsError> {
        let f = std::fs::read_to_string(file.as_ref())?;
        Self::from_toml(&f)
    }

    pub fn from_toml(s: &str) -> Result<Self, SettingsError> {
        let value: TomlSettings = toml::from_str(s)?;
        Ok(Settings {
            interface_style: value.colors.unwrap_or_default().into(),
            popup_settings: value.popup.unwrap_or_default().into(),
            data_settings: value.data.unwrap_or_default().into(),
        })
    }

    pub fn to_toml(&self) -> Result<String, SettingsError> {
        let value = TomlSettings {
            colors: Some(self.interface_style.into()),
            popup: Some(self.popup_settings.into()),
            data: Some(self.data_settings.clone().into()),
        };
        Ok(toml::to_string(&value)?)
    }

    pub fn write<P: AsRef<Path>>(&self, file: P) -> Result<(), SettingsError> {
        Ok(std::fs::write(file, self.to_toml()?.as_bytes())?)
    }
}

fn str_to_color_or<S: AsRef<str>>(s: S, default: Color) -> Color {
    match s.as_ref().to_ascii_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" => Color::Gray,
        "darkgray" => Color::DarkGray,
        "lightred" => Color::LightRed,
        "lightgreen" => Color::LightGreen,
        "lightyellow" => Color::LightYellow,
        "lightblue" => Color::LightBlue,
        "lightmagenta" => Color::LightMagenta,
        "lightcyan" => Color::LightCyan,
        "white" => Color::White,
        "reset" => Color::Reset,
        other => {
            tracing::warn!("Unknown color {:?}, using {:?}", other, default);
            default
        }
    }
}

fn color_to_string(c: Color) -> String {
    match c {
        Color::Black => "Black",
        Color::Red => "Red",
        Color::Green => "Green",
        Color::Yellow => "Yellow",
        Color::Blue => "Blue",
        Color::Magenta => "Magenta",
        Color::Cyan => "Cyan",
        Color::Gray => "Gray",
        Color::DarkGray => "DarkGray",
        Color::LightRed => "LightRed",
        Color::LightGreen => "LightGreen",
        Color::LightYellow => "LightYellow",
        Color::LightBlue => "LightBlue",
        Color::LightMagenta => "LightMagenta",
        Color::LightCyan => "LightCyan",
        Color::White => "White",
        Color::Reset => "Reset",
    }
    .to_string()
}

fn color_or(color: &Option<String>, default: Color) -> Color {
    match color {
        Some(color) => str_to_color_or(color, default),
        None => default,
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct TomlSettings {
    colors: Option<TomlColors>,
    popup: Option<TomlPopup>,
    data: Option<TomlData>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct TomlColors {
    tag_fg: Option<String>,
    tag_bg: Option<String>,
    highlight_fg: Option<String>,
    highlight_bg: Option<String>,
    cancel_fg: Option<String>,
    popup_fg: Option<String>,
    popup_bg: Option<String>,
    cursor_fg: Option<String>,
    cursor_bg: Option<String>,
    input_fg: Option<String>,
    input_bg: Option<String>,
    placeholder_fg: Option<String>,
}

impl From<TomlColors> for InterfaceStyle {
    fn from(t: TomlColors) -> Self {
        let d = InterfaceStyle::default();
        InterfaceStyle {
            tag_fg: color_or(&t.tag_fg, d.tag_fg),
            tag_bg: color_or(&t.tag_bg, d.tag_bg),
            highlight_fg: color_or(&t.highlight_fg, d.highlight_fg),
            highlight_bg: color_or(&t.highlight_bg, d.highlight_bg),
            cancel_fg: color_or(&t.cancel_fg, d.cancel_fg),
            popup_fg: color_or(&t.popup_fg, d.popup_fg),
            popup_bg: color_or(&t.popup_bg, d.popup_bg),
            cursor_fg: color_or(&t.cursor_fg, d.cursor_fg),
            cursor_bg: color_or(&t.cursor_bg, d.cursor_bg),
            input_fg: color_or(&t.input_fg, d.input_fg),
            input_bg: color_or(&t.input_bg, d.input_bg),
            placeholder_fg: color_or(&t.placeholder_fg, d.placeholder_fg),
        }
    }
}

impl From<InterfaceStyle> for TomlColors {
    fn from(is: InterfaceStyle) -> Self {
        TomlColors {
            tag_fg: Some(color_to_string(is.tag_fg)),
            tag_bg: Some(color_to_string(is.tag_bg)),
            highlight_fg: Some(color_to_string(is.highlight_fg)),
            highlight_bg: Some(color_to_string(is.highlight_bg)),
            cancel_fg: Some(color_to_string(is.cancel_fg)),
            popup_fg: Some(color_to_string(is.popup_fg)),
            popup_bg: Some(color_to_string(is.popup_bg)),
            cursor_fg: Some(color_to_string(is.cursor_fg)),
            cursor_bg: Some(color_to_string(is.cursor_bg)),
            input_fg: Some(color_to_string(is.input_fg)),
            input_bg: Some(color_to_string(is.input_bg)),
            placeholder_fg: Some(color_to_string(is.placeholder_fg)),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct TomlPopup {
    max_rows: Option<usize>,
    hide_when_empty: Option<bool>,
}

impl From<TomlPopup> for PopupSettings {
    fn from(t: TomlPopup) -> Self {
        let d = PopupSettings::default();
        PopupSettings {
            // A popup without rows can not be navigated.
            max_rows: t.max_rows.filter(|&rows| rows > 0).unwrap_or(d.max_rows),
            hide_when_empty: t.hide_when_empty.unwrap_or(d.hide_when_empty),
        }
    }
}

impl From<PopupSettings> for TomlPopup {
    fn from(p: PopupSettings) -> Self {
        TomlPopup {
            max_rows: Some(p.max_rows),
            hide_when_empty: Some(p.hide_when_empty),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct TomlData {
    file: Option<PathBuf>,
}

impl From<TomlData> for DataSettings {
    fn from(t: TomlData) -> Self {
        DataSettings { file: t.file }
    }
}

impl From<DataSettings> for TomlData {
    fn from(d: DataSettings) -> Self {
        TomlData { file: d.file }
    }
}
