//! Item and group representation.
//!
//! This module provides the entry types a palette selects between, the named
//! groups used for display sectioning, and the pool that merges both into a
//! single filterable sequence.

use std::fmt::Debug;
use std::sync::Arc;

use crate::MatchRange;

//------------------------------------------------------------------------------

/// A callback attached to a single item, invoked when that item is committed.
#[derive(Clone)]
pub struct ItemCallback(Arc<dyn Fn() + Send + Sync>);

impl ItemCallback {
    /// Create a new item callback from a closure
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub(crate) fn call(&self) {
        (self.0)()
    }
}

impl Debug for ItemCallback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemCallback").finish()
    }
}

//------------------------------------------------------------------------------

/// An entry a user can select.
///
/// The `id` must stay unique within the combined item set for the lifetime of
/// one controller instance; duplicates are not a crash condition but leave the
/// display order of the duplicated entries undefined.
#[derive(Clone, Debug)]
pub struct CommandItem {
    /// Unique, stable string identifier
    pub id: String,
    /// Primary display text, matched by the filter
    pub label: String,
    /// Optional alternate match string
    pub value: Option<String>,
    /// Optional secondary text, also matched by the filter
    pub description: Option<String>,
    /// Extra match strings
    pub keywords: Vec<String>,
    /// Disabled items are never selectable and never shown in the filtered list
    pub disabled: bool,
    /// Invoked on commit, before the controller-level selection callback
    pub on_select: Option<ItemCallback>,
}

impl CommandItem {
    /// Creates an item with the given id and label
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            value: None,
            description: None,
            keywords: Vec::new(),
            disabled: false,
            on_select: None,
        }
    }

    /// Sets the alternate match string
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Sets the secondary text
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the extra match strings
    pub fn keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Marks the item as disabled
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Attaches a per-item selection callback
    pub fn on_select<F>(mut self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_select = Some(ItemCallback::new(f));
        self
    }
}

/// A named partition of items, used only for display sectioning.
///
/// Groups never affect filtering or selection semantics; which group a
/// filtered item belongs to is reconciled by `Arc` pointer identity.
#[derive(Clone, Debug)]
pub struct CommandGroup {
    /// Unique group identifier
    pub id: String,
    /// Heading shown above the group's items
    pub label: String,
    /// The group's items, in display order
    pub items: Vec<Arc<CommandItem>>,
}

impl CommandGroup {
    /// Creates a group with the given id, heading and items
    pub fn new(id: impl Into<String>, label: impl Into<String>, items: Vec<Arc<CommandItem>>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            items,
        }
    }
}

//------------------------------------------------------------------------------

/// One entry of the combined pool: an item plus the index of its owning group
#[derive(Clone, Debug)]
pub struct PoolEntry {
    /// The pooled item
    pub item: Arc<CommandItem>,
    /// Index into [`ItemPool::group_labels`], `None` for flat items
    pub group: Option<usize>,
}

/// The combined candidate pool: flat items first, then group items in group
/// order.
///
/// An item object reachable through both the flat list and a group (or
/// through two groups) is pooled once; the first occurrence wins.
#[derive(Default, Debug)]
pub struct ItemPool {
    entries: Vec<PoolEntry>,
    group_labels: Vec<String>,
}

impl ItemPool {
    /// Merges flat items and groups into one pool
    pub fn build(items: &[Arc<CommandItem>], groups: &[CommandGroup]) -> Self {
        let mut pool = Self {
            entries: Vec::with_capacity(items.len()),
            group_labels: groups.iter().map(|g| g.label.clone()).collect(),
        };
        for item in items {
            pool.push(item.clone(), None);
        }
        for (group_idx, group) in groups.iter().enumerate() {
            for item in &group.items {
                pool.push(item.clone(), Some(group_idx));
            }
        }
        trace!("built pool with {} entries", pool.entries.len());
        pool
    }

    fn push(&mut self, item: Arc<CommandItem>, group: Option<usize>) {
        if self.entries.iter().any(|e| Arc::ptr_eq(&e.item, &item)) {
            debug!("dropping duplicate pool occurrence of item {}", item.id);
            return;
        }
        self.entries.push(PoolEntry { item, group });
    }

    /// The pooled entries, flat items first
    pub fn entries(&self) -> &[PoolEntry] {
        &self.entries
    }

    /// Number of pooled items
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the pool holds no items
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The heading for a group index recorded in a [`PoolEntry`]
    pub fn group_label(&self, group: usize) -> Option<&str> {
        self.group_labels.get(group).map(String::as_str)
    }
}

//------------------------------------------------------------------------------

/// An item that survived the filter, ready for display and selection
#[derive(Clone)]
pub struct FilteredItem {
    /// The underlying item
    pub item: Arc<CommandItem>,
    /// Engine-assigned rank, lower sorts earlier
    pub rank: i32,
    /// Range of the label that matched the query
    pub matched_range: Option<MatchRange>,
    /// Owning group index, carried over from the pool entry
    pub group: Option<usize>,
}

impl Debug for FilteredItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilteredItem")
            .field("item", &self.item.label)
            .field("rank", &self.rank)
            .field("matched_range", &self.matched_range)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> Arc<CommandItem> {
        Arc::new(CommandItem::new(id, id.to_uppercase()))
    }

    #[test]
    fn pool_orders_flat_items_before_group_items() {
        let flat = vec![item("a"), item("b")];
        let groups = vec![
            CommandGroup::new("g1", "First", vec![item("c")]),
            CommandGroup::new("g2", "Second", vec![item("d"), item("e")]),
        ];
        let pool = ItemPool::build(&flat, &groups);
        let ids: Vec<_> = pool.entries().iter().map(|e| e.item.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d", "e"]);
        assert_eq!(pool.entries()[0].group, None);
        assert_eq!(pool.entries()[2].group, Some(0));
        assert_eq!(pool.entries()[4].group, Some(1));
        assert_eq!(pool.group_label(1), Some("Second"));
    }

    #[test]
    fn pool_keeps_first_occurrence_of_shared_item() {
        let shared = item("shared");
        let flat = vec![shared.clone()];
        let groups = vec![
            CommandGroup::new("g1", "First", vec![shared.clone(), item("x")]),
            CommandGroup::new("g2", "Second", vec![shared.clone()]),
        ];
        let pool = ItemPool::build(&flat, &groups);
        assert_eq!(pool.len(), 2);
        // The shared item stays a flat entry; the group copies are dropped.
        assert_eq!(pool.entries()[0].group, None);
        assert!(Arc::ptr_eq(&pool.entries()[0].item, &shared));
    }

    #[test]
    fn equal_but_distinct_items_are_not_deduplicated() {
        let flat = vec![item("a"), item("a")];
        let pool = ItemPool::build(&flat, &[]);
        assert_eq!(pool.len(), 2);
    }
}
