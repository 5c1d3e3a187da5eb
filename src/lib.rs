//! Cmdk is a command-palette library for Rust.
//!
//! It provides the state machine behind a searchable list: the search query,
//! the derived filtered item list, a single highlighted candidate, and the
//! open/closed flag, together with a ratatui rendering layer. It can be used
//! as a library or as a small command-line picker.
//!
//! # Examples
//!
//! ```
//! use cmdk::prelude::*;
//!
//! let items = vec![
//!     Arc::new(CommandItem::new("open", "Open File")),
//!     Arc::new(CommandItem::new("save", "Save File")),
//!     Arc::new(CommandItem::new("quit", "Quit")),
//! ];
//!
//! let options = CommandOptionsBuilder::default()
//!     .items(items)
//!     .placeholder("Search commands...")
//!     .build()
//!     .unwrap();
//!
//! let mut command = Command::from_options(&options);
//! command.set_query("file");
//! assert_eq!(command.filtered().len(), 2);
//! ```

#![warn(missing_docs)]

#[macro_use]
extern crate log;

use std::fmt::Display;

use ratatui::style::Style;
use ratatui::text::{Line, Span};

pub use crate::command::Command;
pub use crate::item::{CommandGroup, CommandItem};
pub use crate::options::CommandOptions;

pub mod binds;
pub mod command;
pub mod engine;
pub mod event;
pub mod item;
pub mod options;
pub mod prelude;
pub mod query;
pub mod theme;
pub mod tui;

//------------------------------------------------------------------------------
// Display context

/// Represents where a query matched inside an item's label
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatchRange {
    /// Matches in a byte range (start, end). Offsets should fall on char
    /// boundaries of the label; rendering snaps stray offsets outward.
    ByteRange(usize, usize),
}

/// Context information for rendering a single item line
#[derive(Default)]
pub struct DisplayContext {
    /// Where the query matched in the label, if anywhere
    pub matches: Option<MatchRange>,
    /// The base style to apply to non-matched portions
    pub base_style: Style,
    /// The style to apply to matched portions
    pub matched_style: Style,
}

impl DisplayContext {
    /// Converts the context and label text into a styled `Line` with the
    /// matched range highlighted.
    ///
    /// Offsets that are out of range or fall inside a multi-byte character
    /// are snapped outward to the nearest char boundary, so an imprecise
    /// engine widens the highlight instead of panicking.
    pub fn to_line(self, text: &str) -> Line<'static> {
        match self.matches {
            Some(MatchRange::ByteRange(start, end)) => {
                let mut start = start.min(text.len());
                while !text.is_char_boundary(start) {
                    start -= 1;
                }
                let mut end = end.clamp(start, text.len());
                while !text.is_char_boundary(end) {
                    end += 1;
                }
                let mut res = Line::default();
                res.push_span(Span::styled(text[..start].to_string(), self.base_style));
                res.push_span(Span::styled(
                    text[start..end].to_string(),
                    self.base_style.patch(self.matched_style),
                ));
                res.push_span(Span::styled(text[end..].to_string(), self.base_style));
                res
            }
            None => Line::from(vec![Span::styled(text.to_string(), self.base_style)]),
        }
    }
}

//==============================================================================
// A match engine executes the filtering predicate for one query

/// Case sensitivity mode for matching
#[derive(Eq, PartialEq, Debug, Copy, Clone, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[cfg_attr(feature = "cli", clap(rename_all = "snake_case"))]
pub enum CaseMatching {
    /// Case-sensitive matching
    Respect,
    /// Case-insensitive matching
    #[default]
    Ignore,
    /// Smart case: case-insensitive unless the query contains uppercase
    Smart,
}

/// Result of matching a query against an item
#[derive(Clone, Debug)]
pub struct MatchResult {
    /// The rank of this match, lower sorts earlier; engines that do not
    /// reorder return the same rank for every item
    pub rank: i32,
    /// The range where the match occurred within the label, if it did
    pub matched_range: Option<MatchRange>,
}

/// A matching engine that can match a fixed query against items.
///
/// An engine is created per query by a [`MatchEngineFactory`] and must be
/// deterministic: the same item always yields the same result. A panicking
/// engine propagates to the host; the controller does not catch it.
pub trait MatchEngine: Display {
    /// Matches an item against the query, returning a result if it matched
    fn match_item(&self, item: &CommandItem) -> Option<MatchResult>;
}

/// Factory for creating match engines.
///
/// This is the injection point for custom filtering/ranking: supply your own
/// factory through [`CommandOptions`] to replace the default substring match.
pub trait MatchEngineFactory {
    /// Creates a match engine with explicit case sensitivity
    fn create_engine_with_case(&self, query: &str, case: CaseMatching) -> Box<dyn MatchEngine>;
    /// Creates a match engine with default case sensitivity
    fn create_engine(&self, query: &str) -> Box<dyn MatchEngine> {
        self.create_engine_with_case(query, CaseMatching::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans_of(line: &Line) -> Vec<String> {
        line.spans.iter().map(|s| s.content.to_string()).collect()
    }

    #[test]
    fn to_line_splits_on_the_matched_range() {
        let line = DisplayContext {
            matches: Some(MatchRange::ByteRange(5, 10)),
            ..Default::default()
        }
        .to_line("Copy Selection");
        assert_eq!(spans_of(&line), vec!["Copy ", "Selec", "tion"]);
    }

    #[test]
    fn to_line_clamps_out_of_range_offsets() {
        let line = DisplayContext {
            matches: Some(MatchRange::ByteRange(2, 100)),
            ..Default::default()
        }
        .to_line("abc");
        assert_eq!(spans_of(&line), vec!["ab", "c", ""]);
    }

    #[test]
    fn to_line_snaps_offsets_inside_multibyte_chars() {
        // "é" spans bytes 1..3; offsets inside it widen to its boundaries
        let line = DisplayContext {
            matches: Some(MatchRange::ByteRange(2, 4)),
            ..Default::default()
        }
        .to_line("héllo");
        assert_eq!(spans_of(&line), vec!["h", "él", "lo"]);
    }
}
