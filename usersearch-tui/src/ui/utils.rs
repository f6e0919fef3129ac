#[cfg(feature = "copypaste")]
use clipboard::{ClipboardContext, ClipboardProvider};
use tui::style::{Color as TColor, Modifier, Style};
use tui::text::{Span, Spans};
use unicode_truncate::UnicodeTruncateStr;
use unicode_width::UnicodeWidthStr;

use usersearch_app::settings::{Color, InterfaceStyle};
use usersearch_input::CharChunks;

pub trait TuiStyle {
    fn tag_style(&self) -> Style;

    fn highlight_style(&self) -> Style;

    fn cancel_style(&self) -> Style;

    fn popup_style(&self) -> Style;

    fn suggestion_cursor_style(&self) -> Style;

    fn cursor_style(&self) -> Style;

    fn input_style(&self) -> Style;

    fn placeholder_style(&self) -> Style;
}

impl TuiStyle for InterfaceStyle {
    fn tag_style(&self) -> Style {
        Style::default()
            .fg(to_tui(self.tag_fg))
            .bg(to_tui(self.tag_bg))
    }

    fn highlight_style(&self) -> Style {
        Style::default()
            .fg(to_tui(self.highlight_fg))
            .bg(to_tui(self.highlight_bg))
            .add_modifier(Modifier::BOLD)
    }

    fn cancel_style(&self) -> Style {
        Style::default()
            .fg(to_tui(self.cancel_fg))
            .bg(to_tui(self.tag_bg))
            .add_modifier(Modifier::BOLD)
    }

    fn popup_style(&self) -> Style {
        Style::default()
            .fg(to_tui(self.popup_fg))
            .bg(to_tui(self.popup_bg))
    }

    // The popup colours, swapped.
    fn suggestion_cursor_style(&self) -> Style {
        Style::default()
            .fg(to_tui(self.popup_bg))
            .bg(to_tui(self.popup_fg))
    }

    fn cursor_style(&self) -> Style {
        Style::default()
            .fg(to_tui(self.cursor_fg))
            .bg(to_tui(self.cursor_bg))
            .add_modifier(Modifier::SLOW_BLINK)
    }

    fn input_style(&self) -> Style {
        Style::default()
            .fg(to_tui(self.input_fg))
            .bg(to_tui(self.input_bg))
    }

    fn placeholder_style(&self) -> Style {
        self.input_style()
            .fg(to_tui(self.placeholder_fg))
            .add_modifier(Modifier::ITALIC)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ApplicationTask {
    DoNothing,
    UpdateUI,
}

pub fn to_tui(c: Color) -> TColor {
    match c {
        Color::Black => TColor::Black,
        Color::Red => TColor::Red,
        Color::Green => TColor::Green,
        Color::Yellow => TColor::Yellow,
        Color::Blue => TColor::Blue,
        Color::Magenta => TColor::Magenta,
        Color::Cyan => TColor::Cyan,
        Color::Gray => TColor::Gray,
        Color::DarkGray => TColor::DarkGray,
        Color::LightRed => TColor::LightRed,
        Color::LightGreen => TColor::LightGreen,
        Color::LightYellow => TColor::LightYellow,
        Color::LightBlue => TColor::LightBlue,
        Color::LightMagenta => TColor::LightMagenta,
        Color::LightCyan => TColor::LightCyan,
        Color::White => TColor::White,
        Color::Reset => TColor::Reset,
    }
}

#[cfg(feature = "copypaste")]
pub fn copy_from_clipboard() -> Option<String> {
    let mut ctx: ClipboardContext = ClipboardProvider::new().ok()?;
    ctx.get_contents().ok()
}

#[cfg(not(feature = "copypaste"))]
pub fn copy_from_clipboard() -> Option<String> {
    None
}

/// Takes `word`, and cuts excess letters to ensure that it fits within
/// `max_width` visible characters. If `word` is too long, it will be truncated
/// and have '...' appended to indicate that it has been truncated (if `max_width`
/// is at least 3, otherwise, letters will simply be cut).
///
/// # Arguments
/// * ` word ` - A string reference.
/// * ` max_width ` - The maximum width of word in visible characters.
pub fn cut_word_to_fit(word: &str, max_width: usize) -> String {
    if word.width() > max_width {
        if max_width >= 3 {
            let possible_word = word.unicode_truncate(max_width - 3);
            possible_word.0.to_owned() + "..."
        } else {
            word.unicode_truncate(max_width).0.to_owned()
        }
    } else {
        word.to_owned()
    }
}

/// Styles the text around the cursor with `default`, and the cursor itself with
/// `cursor`. A cursor past the end of the text is drawn as a blank cell.
pub fn char_chunks_to_styled_text(c: CharChunks, default: Style, cursor: Style) -> Spans<'static> {
    let under_cursor = c.cursor.map_or_else(|| " ".to_string(), String::from);
    Spans::from(vec![
        Span::styled(c.before.iter().collect::<String>(), default),
        Span::styled(under_cursor, cursor),
        Span::styled(c.after.iter().collect::<String>(), default),
    ])
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_input_colors_are_configurable() {
        let style = InterfaceStyle {
            input_fg: Color::Green,
            input_bg: Color::Black,
            placeholder_fg: Color::Gray,
            ..InterfaceStyle::default()
        };
        assert_eq!(style.input_style().fg, Some(TColor::Green));
        assert_eq!(style.input_style().bg, Some(TColor::Black));
        assert_eq!(style.placeholder_style().fg, Some(TColor::Gray));
        assert_eq!(style.placeholder_style().bg, Some(TColor::Black));
        assert_eq!(
            InterfaceStyle::default().placeholder_style().fg,
            Some(TColor::DarkGray)
        );
    }

    #[test]
    fn test_cut_word_to_fit() {
        assert_eq!(cut_word_to_fit("Alice", 10), "Alice");
        assert_eq!(cut_word_to_fit("Alice Johnson", 8), "Alice...");
        assert_eq!(cut_word_to_fit("Alice", 2), "Al");
    }

    #[test]
    fn test_cursor_past_end_is_blank() {
        let line = usersearch_input::LineInput::from("ab");
        let spans =
            char_chunks_to_styled_text(line.char_chunks(), Style::default(), Style::default());
        assert_eq!(spans.0[0].content, "ab");
        assert_eq!(spans.0[1].content, " ");
        assert_eq!(spans.0[2].content, "");
    }
}
