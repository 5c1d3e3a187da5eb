//! Configuration for the palette, using the builder pattern.

use std::rc::Rc;
use std::sync::Arc;

use derive_builder::Builder;

use crate::command::{OpenChangeCallback, SelectCallback, ValueChangeCallback};
use crate::item::{CommandGroup, CommandItem};
use crate::{CaseMatching, MatchEngineFactory};

/// Options for the command palette controller and its terminal frontend.
///
/// Fields annotated for `clap` are exposed as command line flags by the
/// `cmdk` binary; the remaining fields (items, groups, callbacks, custom
/// filter) are only reachable through the builder.
#[derive(Builder)]
#[builder(build_fn(name = "final_build"))]
#[builder(default)]
#[cfg_attr(feature = "cli", derive(clap::Parser))]
#[cfg_attr(feature = "cli", command(name = "cmdk", version, about = "A command palette for the terminal"))]
pub struct CommandOptions {
    //  --- Query ---
    /// Initial query to populate the input with
    #[cfg_attr(feature = "cli", arg(long, short = 'q'))]
    #[builder(setter(into, strip_option))]
    pub query: Option<String>,

    /// Placeholder text shown while the query is empty
    #[cfg_attr(feature = "cli", arg(long, default_value = "Search..."))]
    #[builder(setter(into))]
    pub placeholder: String,

    /// Prompt string printed before the query
    #[cfg_attr(feature = "cli", arg(long, default_value = "> "))]
    #[builder(setter(into))]
    pub prompt: String,

    //  --- Filtering ---
    /// Case sensitivity of the default filter
    #[cfg_attr(feature = "cli", arg(long, default_value = "ignore", value_enum))]
    pub case: CaseMatching,

    /// Do not sort results by rank, keep pool order
    #[cfg_attr(feature = "cli", arg(long))]
    pub no_sort: bool,

    /// Rank exact and prefix label matches above plain substring hits
    #[cfg_attr(feature = "cli", arg(long))]
    pub exact_first: bool,

    //  --- State ---
    /// Whether the palette starts open
    #[cfg_attr(feature = "cli", arg(long, default_value_t = true, action = clap::ArgAction::Set))]
    pub open: bool,

    /// Start in the loading state
    #[cfg_attr(feature = "cli", arg(long))]
    pub loading: bool,

    //  --- Display ---
    /// Message shown when the filter yields no results
    #[cfg_attr(feature = "cli", arg(long, default_value = "No results found."))]
    #[builder(setter(into))]
    pub empty_message: String,

    /// Maximum height of the rendered palette, in rows or a percentage
    #[cfg_attr(feature = "cli", arg(long, default_value = "100%"))]
    #[builder(setter(into))]
    pub max_height: String,

    /// Color scheme to use: [default|dark|light|16|bw|none]
    #[cfg_attr(feature = "cli", arg(long, default_value = "dark"))]
    #[builder(setter(into))]
    pub color: String,

    //  --- Key bindings ---
    /// Comma-separated custom bindings, e.g. `ctrl-j:down:1,ctrl-t:toggle-open`
    #[cfg_attr(feature = "cli", arg(long, value_delimiter = ','))]
    pub bind: Vec<String>,

    //  --- Programmatic only ---
    /// Ungrouped items to seed the pool with
    #[cfg_attr(feature = "cli", clap(skip))]
    #[builder(setter(into))]
    pub items: Vec<Arc<CommandItem>>,

    /// Grouped items, rendered under their group heading
    #[cfg_attr(feature = "cli", clap(skip))]
    #[builder(setter(into))]
    pub groups: Vec<CommandGroup>,

    /// Custom filter; when unset a substring engine is used
    #[cfg_attr(feature = "cli", clap(skip))]
    #[builder(setter(strip_option))]
    pub filter: Option<Rc<dyn MatchEngineFactory>>,

    /// Invoked on every query edit; supplying this makes the query controlled
    #[cfg_attr(feature = "cli", clap(skip))]
    #[builder(setter(strip_option))]
    pub on_value_change: Option<ValueChangeCallback>,

    /// Invoked with the committed item
    #[cfg_attr(feature = "cli", clap(skip))]
    #[builder(setter(strip_option))]
    pub on_select: Option<SelectCallback>,

    /// Invoked whenever the open flag actually changes
    #[cfg_attr(feature = "cli", clap(skip))]
    #[builder(setter(strip_option))]
    pub on_open_change: Option<OpenChangeCallback>,
}

impl Default for CommandOptions {
    fn default() -> Self {
        Self {
            query: None,
            placeholder: String::from("Search..."),
            prompt: String::from("> "),
            case: CaseMatching::default(),
            no_sort: false,
            exact_first: false,
            open: true,
            loading: false,
            empty_message: String::from("No results found."),
            max_height: String::from("100%"),
            color: String::from("dark"),
            bind: Vec::new(),
            items: Vec::new(),
            groups: Vec::new(),
            filter: None,
            on_value_change: None,
            on_select: None,
            on_open_change: None,
        }
    }
}

impl CommandOptionsBuilder {
    /// Builds the options, falling back to defaults for unset fields
    pub fn build(&mut self) -> Result<CommandOptions, CommandOptionsBuilderError> {
        self.final_build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let opts = CommandOptionsBuilder::default().build().unwrap();
        assert!(opts.open);
        assert!(!opts.loading);
        assert_eq!(opts.placeholder, "Search...");
        assert_eq!(opts.query, None);
        assert!(opts.items.is_empty());
    }

    #[test]
    fn builder_overrides() {
        let opts = CommandOptionsBuilder::default()
            .query("init")
            .open(false)
            .no_sort(true)
            .build()
            .unwrap();
        assert_eq!(opts.query.as_deref(), Some("init"));
        assert!(!opts.open);
        assert!(opts.no_sort);
    }
}
