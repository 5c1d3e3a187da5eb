use std::sync::Arc;

use ratatui::Frame;
use ratatui::prelude::*;
use ratatui::widgets::{List, ListItem};

use crate::DisplayContext;
use crate::command::Command;
use crate::theme::ColorTheme;

const CURSOR_ICON: &str = "> ";

// One display row: a group heading or an index into the filtered list.
enum Row {
    Heading(usize),
    Item(usize),
}

/// The filtered rows below the input, with group headings interleaved
pub struct ResultList {
    theme: Arc<ColorTheme>,
    offset: usize,
}

impl ResultList {
    /// Creates a list renderer with the given theme
    pub fn new(theme: Arc<ColorTheme>) -> Self {
        Self { theme, offset: 0 }
    }

    // Group headings appear before the first row of each group; rows keep
    // the filtered order, so items of one group stay contiguous only when
    // the pool was built that way.
    fn rows(command: &Command) -> Vec<Row> {
        let mut rows = Vec::new();
        let mut last_group = None;
        for (idx, fi) in command.filtered().iter().enumerate() {
            if fi.group.is_some() && fi.group != last_group {
                rows.push(Row::Heading(fi.group.unwrap_or_default()));
            }
            last_group = fi.group;
            rows.push(Row::Item(idx));
        }
        rows
    }

    fn scroll_to(&mut self, highlighted_row: usize, height: usize) {
        if height == 0 {
            return;
        }
        if highlighted_row < self.offset {
            self.offset = highlighted_row;
        } else if highlighted_row >= self.offset + height {
            self.offset = highlighted_row + 1 - height;
        }
    }

    /// Renders the rows. While loading the list is suppressed and only a
    /// loading line is shown; an empty filter result shows the configured
    /// empty message instead.
    pub fn draw(&mut self, frame: &mut Frame, command: &Command, area: Rect) {
        let theme = Arc::clone(&self.theme);

        if command.is_loading() {
            let line = Line::styled("loading...", theme.info);
            frame.render_widget(line, area);
            return;
        }
        if command.filtered().is_empty() {
            let line = Line::styled(command.empty_message(), theme.empty);
            frame.render_widget(line, area);
            return;
        }

        let rows = Self::rows(command);
        let highlighted_row = rows
            .iter()
            .position(|row| matches!(row, Row::Item(idx) if *idx == command.highlighted_index()))
            .unwrap_or_default();
        self.scroll_to(highlighted_row, area.height as usize);

        let items: Vec<ListItem> = rows
            .iter()
            .skip(self.offset)
            .take(area.height as usize)
            .map(|row| match row {
                Row::Heading(group) => {
                    let label = command.group_label(*group).unwrap_or_default();
                    ListItem::new(Line::styled(format!("  {label}"), theme.group_label))
                }
                Row::Item(idx) => {
                    let fi = &command.filtered()[*idx];
                    let is_current = *idx == command.highlighted_index();

                    let display_line = DisplayContext {
                        matches: fi.matched_range.clone(),
                        base_style: if is_current { theme.current } else { theme.normal },
                        matched_style: if is_current { theme.current_match } else { theme.matched },
                    }
                    .to_line(&fi.item.label);

                    let mut spans: Vec<Span> = Vec::with_capacity(3 + display_line.spans.len());
                    spans.push(Span::styled(
                        if is_current {
                            CURSOR_ICON.to_owned()
                        } else {
                            str::repeat(" ", CURSOR_ICON.chars().count())
                        },
                        theme.cursor,
                    ));
                    spans.extend(display_line.spans);
                    if let Some(description) = &fi.item.description {
                        spans.push(Span::styled(format!("  {description}"), theme.info));
                    }
                    ListItem::new(Line::from(spans))
                }
            })
            .collect();

        frame.render_widget(List::new(items).style(theme.normal), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{CommandGroup, CommandItem};
    use crate::options::CommandOptionsBuilder;

    fn items(labels: &[&str]) -> Vec<Arc<CommandItem>> {
        labels
            .iter()
            .map(|l| Arc::new(CommandItem::new(l.to_lowercase(), *l)))
            .collect()
    }

    #[test]
    fn rows_interleave_group_headings() {
        let opts = CommandOptionsBuilder::default()
            .items(items(&["Top"]))
            .groups(vec![
                CommandGroup::new("files", "Files", items(&["Open", "Close"])),
                CommandGroup::new("edit", "Edit", items(&["Undo"])),
            ])
            .build()
            .unwrap();
        let cmd = Command::from_options(&opts);

        let rows = ResultList::rows(&cmd);
        let shape: Vec<String> = rows
            .iter()
            .map(|r| match r {
                Row::Heading(g) => format!("heading {g}"),
                Row::Item(i) => format!("item {i}"),
            })
            .collect();
        assert_eq!(
            shape,
            vec!["item 0", "heading 0", "item 1", "item 2", "heading 1", "item 3"]
        );
    }

    #[test]
    fn headings_vanish_when_group_filtered_out() {
        let opts = CommandOptionsBuilder::default()
            .groups(vec![
                CommandGroup::new("files", "Files", items(&["Open"])),
                CommandGroup::new("edit", "Edit", items(&["Undo"])),
            ])
            .build()
            .unwrap();
        let mut cmd = Command::from_options(&opts);
        cmd.set_query("undo");

        let rows = ResultList::rows(&cmd);
        assert_eq!(rows.len(), 2);
        assert!(matches!(rows[0], Row::Heading(1)));
    }

    fn render_lines(cmd: &Command, width: u16, height: u16) -> Vec<String> {
        use ratatui::Terminal;
        use ratatui::backend::TestBackend;

        let mut list = ResultList::new(Arc::new(ColorTheme::default()));
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| list.draw(frame, cmd, frame.area())).unwrap();
        let buffer = terminal.backend().buffer().clone();
        (0..height)
            .map(|y| (0..width).map(|x| buffer[(x, y)].symbol().to_string()).collect())
            .collect()
    }

    #[test]
    fn empty_filter_shows_the_empty_message() {
        let opts = CommandOptionsBuilder::default().items(items(&["Open"])).build().unwrap();
        let mut cmd = Command::from_options(&opts);
        cmd.set_query("zzz");

        let lines = render_lines(&cmd, 30, 3);
        assert!(lines[0].contains("No results found."));
        assert!(!lines.iter().any(|l| l.contains("Open")));
    }

    #[test]
    fn loading_suppresses_the_list() {
        let opts = CommandOptionsBuilder::default()
            .items(items(&["Open", "Close"]))
            .build()
            .unwrap();
        let mut cmd = Command::from_options(&opts);
        assert_eq!(cmd.filtered().len(), 2);
        cmd.set_loading(true);

        let lines = render_lines(&cmd, 30, 3);
        assert!(lines[0].contains("loading..."));
        assert!(!lines.iter().any(|l| l.contains("Open") || l.contains("Close")));

        cmd.set_loading(false);
        let lines = render_lines(&cmd, 30, 3);
        assert!(lines[0].contains("Open"));
        assert!(lines[1].contains("Close"));
    }

    #[test]
    fn scroll_keeps_highlight_visible() {
        let theme = Arc::new(ColorTheme::default());
        let mut list = ResultList::new(theme);

        list.scroll_to(0, 5);
        assert_eq!(list.offset, 0);
        list.scroll_to(7, 5);
        assert_eq!(list.offset, 3);
        list.scroll_to(1, 5);
        assert_eq!(list.offset, 1);
    }
}
