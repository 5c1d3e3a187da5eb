use std::sync::LazyLock;
use std::time::Instant;

use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Widget};
use unicode_width::UnicodeWidthStr;

use crate::command::Command;
use crate::theme::ColorTheme;

const SPINNER_DURATION: u32 = 200;
const SPINNERS_UNICODE: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

static SPINNER_START: LazyLock<Instant> = LazyLock::new(Instant::now);

fn spinner_frame() -> char {
    let elapsed_ms = SPINNER_START.elapsed().as_millis();
    let index = ((elapsed_ms / (SPINNER_DURATION as u128)) % (SPINNERS_UNICODE.len() as u128)) as usize;
    SPINNERS_UNICODE[index]
}

/// The query line: prompt, query text or placeholder, and a right-aligned
/// matched/total count with a spinner while loading
pub struct InputLine<'a> {
    command: &'a Command,
    theme: &'a ColorTheme,
}

impl<'a> InputLine<'a> {
    /// Borrows the controller and theme for one render pass
    pub fn new(command: &'a Command, theme: &'a ColorTheme) -> Self {
        Self { command, theme }
    }

    fn status(&self) -> String {
        let mut parts = String::new();
        if self.command.is_loading() {
            parts.push(spinner_frame());
            parts.push(' ');
        }
        parts.push_str(&format!(
            "{}/{}",
            self.command.filtered().len(),
            self.command.pool_len()
        ));
        parts
    }
}

impl Widget for InputLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let prompt_span = Span::styled(self.command.prompt(), self.theme.prompt);
        let value_span = if self.command.query().is_empty() {
            Span::styled(self.command.placeholder(), self.theme.placeholder)
        } else {
            Span::styled(self.command.query(), self.theme.query)
        };

        let status = self.status();
        let used = prompt_span.content.width() + value_span.content.width() + status.width();
        let padding = (area.width as usize).saturating_sub(used + 1);

        let line = Line::from(vec![
            prompt_span,
            value_span,
            Span::raw(" ".repeat(padding)),
            Span::styled(status, self.theme.info),
        ]);
        Paragraph::new(line).style(self.theme.normal).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::CommandItem;
    use crate::options::CommandOptionsBuilder;
    use std::sync::Arc;

    fn render_to_string(command: &Command, width: u16) -> String {
        let theme = ColorTheme::default();
        let area = Rect::new(0, 0, width, 1);
        let mut buf = Buffer::empty(area);
        InputLine::new(command, &theme).render(area, &mut buf);
        (0..width).map(|x| buf[(x, 0)].symbol().to_string()).collect()
    }

    fn palette(query: Option<&str>) -> Command {
        let mut builder = CommandOptionsBuilder::default();
        builder.items(vec![
            Arc::new(CommandItem::new("open", "Open")),
            Arc::new(CommandItem::new("close", "Close")),
        ]);
        if let Some(q) = query {
            builder.query(q);
        }
        Command::from_options(&builder.build().unwrap())
    }

    #[test]
    fn placeholder_shown_when_query_empty() {
        let cmd = palette(None);
        let rendered = render_to_string(&cmd, 40);
        assert!(rendered.contains("Search..."));
        assert!(rendered.contains("2/2"));
    }

    #[test]
    fn query_replaces_placeholder() {
        let cmd = palette(Some("clo"));
        let rendered = render_to_string(&cmd, 40);
        assert!(rendered.contains("> clo"));
        assert!(!rendered.contains("Search..."));
        assert!(rendered.contains("1/2"));
    }
}
