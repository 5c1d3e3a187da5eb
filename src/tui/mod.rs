//! Terminal rendering for the palette.
//!
//! The widgets here are thin: they borrow the controller and the theme and
//! draw from them, holding no state of their own beyond the list scroll
//! offset. The controller stays fully usable without this module.

use std::num::ParseIntError;
use std::sync::Arc;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use thiserror::Error;
use unicode_width::UnicodeWidthStr;

pub use input::InputLine;
pub use list::ResultList;

use crate::command::Command;
use crate::options::CommandOptions;
use crate::theme::ColorTheme;

mod input;
mod list;

/// Represents a size value, either as a percentage or fixed value
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Size {
    /// Size as a percentage (0-100)
    Percent(u16),
    /// Fixed size in terminal cells
    Fixed(u16),
}

impl Size {
    /// Resolves the size against the containing height
    pub fn resolve(&self, total: u16) -> u16 {
        match self {
            Size::Percent(p) => (total as u32 * *p as u32 / 100) as u16,
            Size::Fixed(n) => (*n).min(total),
        }
    }
}

/// Error type for parsing size values
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SizeParseError {
    /// Error parsing the size string
    #[error("Error parsing {0}: {1:?}")]
    ParseError(String, ParseIntError),
    /// Percentage value exceeds 100
    #[error("Invalid percentage {0}")]
    InvalidPercent(u16),
}

impl TryFrom<&str> for Size {
    type Error = SizeParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if value.ends_with("%") {
            let percent = value
                .strip_suffix("%")
                .unwrap_or_default()
                .parse::<u16>()
                .map_err(|e| SizeParseError::ParseError(value.to_string(), e))?;
            if percent > 100 {
                return Err(SizeParseError::InvalidPercent(percent));
            }
            Ok(Self::Percent(percent))
        } else {
            Ok(Self::Fixed(
                value
                    .parse::<u16>()
                    .map_err(|e| SizeParseError::ParseError(value.to_string(), e))?,
            ))
        }
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::Percent(100)
    }
}

//------------------------------------------------------------------------------

/// Draws the whole palette: the input line on top, the result list below
pub struct CommandView {
    theme: Arc<ColorTheme>,
    max_height: Size,
    list: ResultList,
}

impl CommandView {
    /// Builds the view from options, parsing the theme and max height
    pub fn from_options(options: &CommandOptions) -> Result<Self, SizeParseError> {
        let theme = Arc::new(ColorTheme::init_from_options(options));
        let max_height = Size::try_from(options.max_height.as_str())?;
        Ok(Self {
            theme: Arc::clone(&theme),
            max_height,
            list: ResultList::new(theme),
        })
    }

    /// The area the palette occupies within `total`, clamped to max height
    pub fn layout(&self, total: Rect) -> Rect {
        let height = self.max_height.resolve(total.height).max(1);
        Rect { height, ..total }
    }

    /// Renders the palette into the frame and places the terminal cursor
    /// inside the query. Nothing is drawn while the palette is closed.
    pub fn draw(&mut self, frame: &mut Frame, command: &Command) {
        if !command.is_open() {
            return;
        }
        let area = self.layout(frame.area());
        let [input_area, list_area] = Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);

        frame.render_widget(InputLine::new(command, &self.theme), input_area);
        self.list.draw(frame, command, list_area);

        let cursor_x = input_area.x
            + (command.prompt().width() + command.cursor_width()).min(input_area.width.saturating_sub(1) as usize)
                as u16;
        frame.set_cursor_position(Position::new(cursor_x, input_area.y));
    }
}

#[cfg(test)]
mod view_test {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use crate::item::CommandItem;
    use crate::options::CommandOptionsBuilder;

    #[test]
    fn cursor_follows_display_width_not_byte_length() {
        // "→ " is 4 bytes but 2 columns wide
        let opts = CommandOptionsBuilder::default()
            .items(vec![Arc::new(CommandItem::new("a", "Alpha"))])
            .prompt("→ ")
            .query("ab")
            .build()
            .unwrap();
        let cmd = Command::from_options(&opts);
        let mut view = CommandView::from_options(&opts).unwrap();

        let mut terminal = Terminal::new(TestBackend::new(20, 5)).unwrap();
        terminal.draw(|frame| view.draw(frame, &cmd)).unwrap();

        let pos = terminal.get_cursor_position().unwrap();
        assert_eq!(pos.x, 4);
        assert_eq!(pos.y, 0);
    }
}

#[cfg(test)]
mod size_test {
    use super::*;
    use std::num::IntErrorKind;

    #[test]
    fn fixed_success() {
        assert_eq!(Size::try_from("10"), Ok(Size::Fixed(10u16)));
    }
    #[test]
    fn percent_success() {
        assert_eq!(Size::try_from("10%"), Ok(Size::Percent(10u16)));
    }
    #[test]
    fn fixed_failure() {
        assert_eq!(
            Size::try_from("10.0").map_err(|e| match e {
                SizeParseError::ParseError(s, err) => (s, err.kind().clone()),
                _ => panic!(),
            }),
            Err((String::from("10.0"), IntErrorKind::InvalidDigit))
        );
    }
    #[test]
    fn percent_failure() {
        assert_eq!(Size::try_from("101%"), Err(SizeParseError::InvalidPercent(101)));
    }
    #[test]
    fn resolve_clamps() {
        assert_eq!(Size::Percent(50).resolve(40), 20);
        assert_eq!(Size::Fixed(10).resolve(5), 5);
        assert_eq!(Size::default().resolve(24), 24);
    }
}
