//! Reusable widget building blocks.
//!
//! [`SelectableList`] and [`NumberInput`] are abstract state helpers: they
//! own the selection or value logic and the event slots, while a concrete
//! widget embeds them and supplies appearance and input mapping. [`WithSize`]
//! is a complete widget that pins an inner widget to a fixed size.

/// Item storage and single selection.
mod list;
/// Bounded arbitrary-precision numeric value.
mod number_input;
/// Fixed-size wrapper widget.
mod with_size;

pub use list::{ListItem, SelectableList};
pub use number_input::NumberInput;
pub use with_size::WithSize;
