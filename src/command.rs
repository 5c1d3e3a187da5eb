//! The palette controller.
//!
//! `Command` owns the item pool, the query input, the highlight position
//! and the open/loading flags, and exposes the operations the frontends
//! drive: query edits, highlight movement, commit and dismiss. It holds
//! no terminal state, so it can be driven headless from tests or embedded
//! under any event loop.

use std::fmt::{Debug, Error, Formatter};
use std::rc::Rc;
use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::binds::KeyMap;
use crate::engine::{ExactFirstEngineFactory, SubstringEngineFactory};
use crate::event::Action;
use crate::item::{CommandItem, FilteredItem, ItemPool};
use crate::options::CommandOptions;
use crate::query::QueryInput;
use crate::{CaseMatching, MatchEngineFactory};

/// Callback fired on every query edit made through the input
#[derive(Clone)]
pub struct ValueChangeCallback(Arc<dyn Fn(&str) + Send + Sync>);

impl ValueChangeCallback {
    /// Wraps a closure into a callback
    pub fn new(f: impl Fn(&str) + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }
    pub(crate) fn call(&self, query: &str) {
        (self.0)(query)
    }
}

impl Debug for ValueChangeCallback {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "ValueChangeCallback")
    }
}

/// Callback fired with the committed item
#[derive(Clone)]
pub struct SelectCallback(Arc<dyn Fn(&CommandItem) + Send + Sync>);

impl SelectCallback {
    /// Wraps a closure into a callback
    pub fn new(f: impl Fn(&CommandItem) + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }
    pub(crate) fn call(&self, item: &CommandItem) {
        (self.0)(item)
    }
}

impl Debug for SelectCallback {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "SelectCallback")
    }
}

/// Callback fired when the open flag transitions
#[derive(Clone)]
pub struct OpenChangeCallback(Arc<dyn Fn(bool) + Send + Sync>);

impl OpenChangeCallback {
    /// Wraps a closure into a callback
    pub fn new(f: impl Fn(bool) + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }
    pub(crate) fn call(&self, open: bool) {
        (self.0)(open)
    }
}

impl Debug for OpenChangeCallback {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "OpenChangeCallback")
    }
}

//------------------------------------------------------------------------------

/// The command palette controller
pub struct Command {
    pool: ItemPool,
    factory: Rc<dyn MatchEngineFactory>,
    case: CaseMatching,
    no_sort: bool,

    input: QueryInput,
    filtered: Vec<FilteredItem>,
    highlighted: usize,
    open: bool,
    loading: bool,

    keymap: KeyMap,
    controlled: bool,
    on_value_change: Option<ValueChangeCallback>,
    on_select: Option<SelectCallback>,
    on_open_change: Option<OpenChangeCallback>,

    placeholder: String,
    prompt: String,
    empty_message: String,
}

impl Command {
    /// Builds a controller from options, seeding the pool and running the
    /// initial filter pass
    pub fn from_options(options: &CommandOptions) -> Self {
        let factory: Rc<dyn MatchEngineFactory> = match &options.filter {
            Some(factory) => Rc::clone(factory),
            None if options.exact_first => Rc::new(ExactFirstEngineFactory::default()),
            None => Rc::new(SubstringEngineFactory::default()),
        };

        let mut keymap = KeyMap::default();
        keymap.add_keymaps(options.bind.iter().map(String::as_str));

        let input = QueryInput::new(options.query.clone().unwrap_or_default());

        let mut ret = Self {
            pool: ItemPool::build(&options.items, &options.groups),
            factory,
            case: options.case,
            no_sort: options.no_sort,
            input,
            filtered: Vec::new(),
            highlighted: 0,
            open: options.open,
            loading: options.loading,
            keymap,
            controlled: options.on_value_change.is_some(),
            on_value_change: options.on_value_change.clone(),
            on_select: options.on_select.clone(),
            on_open_change: options.on_open_change.clone(),
            placeholder: options.placeholder.clone(),
            prompt: options.prompt.clone(),
            empty_message: options.empty_message.clone(),
        };
        ret.refilter();
        ret
    }

    //  --- Query ---

    /// The current query text
    pub fn query(&self) -> &str {
        &self.input
    }

    /// Byte offset of the input cursor within the query
    pub fn cursor(&self) -> usize {
        self.input.cursor()
    }

    /// Display width of the query up to the cursor
    pub fn cursor_width(&self) -> usize {
        self.input.prefix_width()
    }

    /// Replaces the query from the host side. Does not fire
    /// `on_value_change`; that callback reports edits made through the
    /// input, not values pushed into it.
    pub fn set_query(&mut self, query: &str) {
        if self.input.as_str() == query {
            return;
        }
        self.input.set(query);
        self.refilter();
    }

    // Runs after every edit made through the input.
    fn query_edited(&mut self) {
        if self.controlled
            && let Some(cb) = &self.on_value_change
        {
            cb.call(&self.input);
        }
        self.refilter();
    }

    //  --- Filtering ---

    /// Re-runs the filter over the pool and resets the highlight
    pub fn refilter(&mut self) {
        let engine = self.factory.create_engine_with_case(self.input.trim(), self.case);
        trace!("refilter with engine {engine}");

        self.filtered = self
            .pool
            .entries()
            .iter()
            .filter_map(|entry| {
                engine.match_item(&entry.item).map(|res| FilteredItem {
                    item: Arc::clone(&entry.item),
                    rank: res.rank,
                    matched_range: res.matched_range,
                    group: entry.group,
                })
            })
            .filter(|fi| !fi.item.disabled)
            .collect();
        if !self.no_sort {
            self.filtered.sort_by_key(|fi| fi.rank);
        }
        self.highlighted = 0;
        debug!("filtered {} of {} items", self.filtered.len(), self.pool.len());
    }

    /// The items that passed the filter, in display order
    pub fn filtered(&self) -> &[FilteredItem] {
        &self.filtered
    }

    /// Total number of items in the pool
    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }

    /// Label of the group at the given pool index
    pub fn group_label(&self, group: usize) -> Option<&str> {
        self.pool.group_label(group)
    }

    /// Replaces the item pool, rerunning the filter over the new items
    pub fn set_items(&mut self, items: &[Arc<CommandItem>], groups: &[crate::item::CommandGroup]) {
        self.pool = ItemPool::build(items, groups);
        self.refilter();
    }

    //  --- Highlight ---

    /// Index of the highlighted row within the filtered list
    pub fn highlighted_index(&self) -> usize {
        self.highlighted
    }

    /// The highlighted item, if any item passed the filter
    pub fn highlighted_item(&self) -> Option<&Arc<CommandItem>> {
        self.filtered.get(self.highlighted).map(|fi| &fi.item)
    }

    /// Moves the highlight by the given offset, clamped to the list
    pub fn scroll_by(&mut self, offset: i32) {
        if self.filtered.is_empty() {
            return;
        }
        let total = self.filtered.len() as i32;
        let new = (self.highlighted as i32 + offset).min(total - 1).max(0);
        self.highlighted = new as usize;
        trace!("highlight moved to {}", self.highlighted);
    }

    /// Moves the highlight down one row
    pub fn highlight_next(&mut self) {
        self.scroll_by(1);
    }

    /// Moves the highlight up one row
    pub fn highlight_previous(&mut self) {
        self.scroll_by(-1);
    }

    /// Jumps the highlight to the first row
    pub fn highlight_first(&mut self) {
        self.highlighted = 0;
    }

    /// Jumps the highlight to the last row
    pub fn highlight_last(&mut self) {
        self.highlighted = self.filtered.len().saturating_sub(1);
    }

    /// Moves the highlight under the pointer
    pub fn hover(&mut self, index: usize) {
        if index < self.filtered.len() {
            self.highlighted = index;
        }
    }

    /// Commits the row under the pointer
    pub fn click(&mut self, index: usize) -> Option<Arc<CommandItem>> {
        self.commit(Some(index))
    }

    //  --- Commit / dismiss ---

    /// Commits the item at `index`, or the highlighted item when `None`.
    ///
    /// Fires the item's own callback first, then the global `on_select`,
    /// then closes the palette. Returns `None` without side effects when
    /// the filtered list is empty or the index is out of range.
    pub fn commit(&mut self, index: Option<usize>) -> Option<Arc<CommandItem>> {
        let index = index.unwrap_or(self.highlighted);
        let item = Arc::clone(&self.filtered.get(index)?.item);
        debug!("committing item {}", item.id);

        if let Some(cb) = &item.on_select {
            cb.call();
        }
        if let Some(cb) = &self.on_select {
            cb.call(&item);
        }
        self.set_open(false);
        Some(item)
    }

    /// Closes the palette without committing anything
    pub fn dismiss(&mut self) {
        self.set_open(false);
    }

    //  --- Open / loading ---

    /// Whether the palette is open
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Sets the open flag, notifying `on_open_change` only on an actual
    /// transition
    pub fn set_open(&mut self, open: bool) {
        if self.open == open {
            return;
        }
        self.open = open;
        if let Some(cb) = &self.on_open_change {
            cb.call(open);
        }
    }

    /// Flips the open flag
    pub fn toggle_open(&mut self) {
        self.set_open(!self.open);
    }

    /// Whether the palette is in the loading state
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Sets the loading flag. Filtering and highlight state stay live
    /// while loading; only the rendered list is suppressed.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    //  --- Display accessors ---

    /// Placeholder shown while the query is empty
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Prompt string printed before the query
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Message shown when no items pass the filter
    pub fn empty_message(&self) -> &str {
        &self.empty_message
    }

    //  --- Event handling ---

    /// Handles a terminal key event. Returns the committed item when the
    /// event resulted in one, wrapped in whether the event was consumed.
    pub fn handle_key(&mut self, key: &KeyEvent) -> KeyOutcome {
        if let Some(actions) = self.keymap.get(key).cloned() {
            let mut outcome = KeyOutcome::Consumed;
            for action in actions {
                if let KeyOutcome::Committed(item) = self.handle_action(action) {
                    outcome = KeyOutcome::Committed(item);
                }
            }
            return outcome;
        }

        // unbound printable chars feed the query
        if let KeyCode::Char(ch) = key.code
            && (key.modifiers == KeyModifiers::NONE || key.modifiers == KeyModifiers::SHIFT)
        {
            return self.handle_action(Action::AddChar(ch));
        }

        KeyOutcome::Ignored
    }

    /// Applies a single action to the controller
    pub fn handle_action(&mut self, action: Action) -> KeyOutcome {
        use Action::*;
        match action {
            AddChar(ch) => {
                self.input.insert(ch);
                self.query_edited();
            }
            BackwardDeleteChar => {
                if self.input.delete_backward().is_some() {
                    self.query_edited();
                }
            }
            DeleteChar => {
                if self.input.delete_forward().is_some() {
                    self.query_edited();
                }
            }
            UnixLineDiscard => {
                if !self.input.delete_to_beginning().is_empty() {
                    self.query_edited();
                }
            }
            BackwardChar => self.input.move_left(),
            ForwardChar => self.input.move_right(),
            BeginningOfLine => self.input.move_to_start(),
            EndOfLine => self.input.move_to_end(),

            // list actions only apply while open
            Down(n) if self.open => self.scroll_by(n as i32),
            Up(n) if self.open => self.scroll_by(-(n as i32)),
            First if self.open => self.highlight_first(),
            Last if self.open => self.highlight_last(),
            Accept if self.open => {
                return match self.commit(None) {
                    Some(item) => KeyOutcome::Committed(item),
                    None => KeyOutcome::Consumed,
                };
            }
            Dismiss if self.open => self.dismiss(),
            ToggleOpen => self.toggle_open(),

            Ignore => return KeyOutcome::Ignored,
            Down(_) | Up(_) | First | Last | Accept | Dismiss => return KeyOutcome::Ignored,
        }
        KeyOutcome::Consumed
    }
}

/// Result of feeding a key event to the controller
#[derive(Clone, Debug)]
pub enum KeyOutcome {
    /// The event mapped to no action
    Ignored,
    /// The event was handled
    Consumed,
    /// The event committed an item
    Committed(Arc<CommandItem>),
}

impl KeyOutcome {
    /// The committed item, if this outcome carries one
    pub fn committed(self) -> Option<Arc<CommandItem>> {
        match self {
            KeyOutcome::Committed(item) => Some(item),
            _ => None,
        }
    }
}
