//! Convenience re-exports of commonly used types.
//!
//! This module provides a convenient way to import all the commonly used
//! cmdk types and traits with a single `use cmdk::prelude::*;` statement.

pub use crate::binds::KeyMap;
pub use crate::command::{Command, KeyOutcome, OpenChangeCallback, SelectCallback, ValueChangeCallback};
pub use crate::engine::{ExactFirstEngineFactory, SubstringEngineFactory};
pub use crate::event::Action;
pub use crate::item::{CommandGroup, CommandItem, FilteredItem, ItemCallback};
pub use crate::options::{CommandOptions, CommandOptionsBuilder};
pub use crate::theme::ColorTheme;
pub use crate::tui::CommandView;
pub use crate::*;
pub use std::rc::Rc;
pub use std::sync::Arc;
