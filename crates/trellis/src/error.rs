//! Error types for trellis operations.

use std::result::Result as StdResult;

use thiserror::Error;

use crate::id::WidgetId;

/// Result type for trellis operations.
pub type Result<T> = StdResult<T, Error>;

/// Errors that can arise while driving the widget tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The widget id does not refer to an entry in the pool.
    #[error("unknown widget: {0:?}")]
    UnknownWidget(WidgetId),

    /// A widget's slot was entered again while one of its callbacks was
    /// already running.
    #[error("widget is busy: {0:?}")]
    WidgetBusy(WidgetId),

    /// The same widget was appended more than once during one build.
    #[error("widget appended twice in one build: {0:?}")]
    DuplicateChild(WidgetId),

    /// The root widget was appended as a child.
    #[error("the root widget cannot be appended as a child")]
    RootAppend,

    /// A layout computation failed.
    #[error("layout: {0}")]
    Layout(String),

    /// A resource load (image, font) failed.
    #[error("resource: {0}")]
    Resource(String),

    /// An application widget reported an error from build or tick.
    #[error("widget: {0}")]
    Widget(String),

    /// An internal inconsistency.
    #[error("internal: {0}")]
    Internal(String),
}
