//! Widget identifiers: the pool key and its typed wrapper.

use std::marker::PhantomData;

use slotmap::new_key_type;

new_key_type! {
    /// Opaque identifier for a widget stored in the pool.
    ///
    /// Identity is handle equality: bindings, size overrides, layout caches
    /// and focus all key on `WidgetId`, never on widget values.
    pub struct WidgetId;
}

/// Type-safe wrapper around a widget identifier tied to a widget type.
///
/// Containers hold `TypedId<W>` fields for their sub-widgets so typed access
/// does not need turbofish downcasts at every call site.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct TypedId<W> {
    /// Untyped widget identifier.
    id: WidgetId,
    /// Marker for the widget type.
    _marker: PhantomData<fn() -> W>,
}

impl<W> TypedId<W> {
    /// Wrap an untyped widget identifier.
    pub fn new(id: WidgetId) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }

    /// The untyped identifier.
    pub fn untyped(self) -> WidgetId {
        self.id
    }
}

impl<W> Clone for TypedId<W> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<W> Copy for TypedId<W> {}

impl<W> From<TypedId<W>> for WidgetId {
    fn from(value: TypedId<W>) -> Self {
        value.id
    }
}
