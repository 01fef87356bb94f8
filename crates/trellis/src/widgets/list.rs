//! Abstract selectable list.
//!
//! [`SelectableList`] owns item storage, a single selection and the
//! selection-changed event; a concrete list widget embeds it and maps
//! clicks and key presses onto the selection operations. Items are
//! addressed by index or by an application-chosen ID.

use std::marker::PhantomData;

use crate::event::Slot;

/// Implemented by items held in a [`SelectableList`].
pub trait ListItem<ID> {
    /// The item's application-chosen identity, used for selection by ID.
    fn id(&self) -> ID;
}

/// Ordered items with at most one selected.
///
/// The selection is stored as a vector of indices to leave room for
/// multi-select; today it holds zero or one entries.
pub struct SelectableList<ID, T>
where
    ID: PartialEq,
    T: ListItem<ID>,
{
    /// The items, in display order.
    items: Vec<T>,
    /// Indices of selected items; zero or one entries.
    selected: Vec<usize>,
    /// Fires with the item index when the selection changes or is forced.
    pub on_item_selected: Slot<usize>,
    /// Ties the ID parameter to the item type.
    _id: PhantomData<ID>,
}

impl<ID, T> SelectableList<ID, T>
where
    ID: PartialEq,
    T: ListItem<ID>,
{
    /// An empty list with nothing selected.
    pub fn new() -> Self {
        SelectableList {
            items: Vec::new(),
            selected: Vec::new(),
            on_item_selected: Slot::new(),
            _id: PhantomData,
        }
    }

    /// Replace the contents, keeping the backing allocation. The selection
    /// is not touched.
    pub fn set_items(&mut self, items: impl IntoIterator<Item = T>) {
        self.items.clear();
        self.items.extend(items);
    }

    /// The items, in display order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the list holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The item at `index`, if in range.
    pub fn item(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Select the item at `index`. An out-of-range index clears the
    /// selection without firing. An unchanged selection is a no-op unless
    /// `force` is set; on change or force, `on_item_selected` fires with the
    /// index. Returns true iff the stored selection changed.
    pub fn select_item_by_index(&mut self, index: usize, force: bool) -> bool {
        if index >= self.items.len() {
            let changed = !self.selected.is_empty();
            self.selected.clear();
            return changed;
        }
        let changed = self.selected != [index];
        if !changed && !force {
            return false;
        }
        self.selected.clear();
        self.selected.push(index);
        self.on_item_selected.emit(index);
        changed
    }

    /// Select the item whose ID equals `id`, by linear search. An unknown ID
    /// clears the selection. Returns true iff the stored selection changed.
    pub fn select_item_by_id(&mut self, id: &ID, force: bool) -> bool {
        let index = self
            .items
            .iter()
            .position(|item| item.id() == *id)
            .unwrap_or(usize::MAX);
        self.select_item_by_index(index, force)
    }

    /// The selected item, if any.
    pub fn selected_item(&self) -> Option<&T> {
        self.selected.first().and_then(|&index| self.items.get(index))
    }

    /// Index of the selected item, if any.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected.first().copied()
    }
}

impl<ID, T> Default for SelectableList<ID, T>
where
    ID: PartialEq,
    T: ListItem<ID>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<ID, T> std::fmt::Debug for SelectableList<ID, T>
where
    ID: PartialEq,
    T: ListItem<ID>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectableList")
            .field("len", &self.items.len())
            .field("selected", &self.selected)
            .finish()
    }
}
