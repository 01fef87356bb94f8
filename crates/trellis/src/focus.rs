//! Focus management for [`App`].
//!
//! Focus is a single optional widget id on the tree. `None` means the root
//! holds focus, so button input always has somewhere to go. Only widgets
//! that are in the tree, visible, and enabled can take focus; hiding or
//! disabling a subtree hands focus back to the root.

use crate::app::{App, Phase};
use crate::id::WidgetId;

/// Trait for reading and moving focus.
pub trait FocusManager {
    /// The focused widget. Falls back to the root when nothing holds an
    /// explicit focus.
    fn focused(&self) -> WidgetId;

    /// Does the widget hold terminal focus?
    fn is_focused(&self, id: WidgetId) -> bool;

    /// Is the widget the focused widget or one of its ancestors?
    ///
    /// # Panics
    ///
    /// Panics when called during build, where the answer would depend on
    /// how much of the tree has been rebuilt so far.
    fn is_focused_or_has_focused_child(&self, id: WidgetId) -> bool;

    /// Focus a widget. Ignored unless the widget is in the tree, visible,
    /// and enabled. Returns `true` if focus changed.
    fn set_focus(&mut self, id: WidgetId) -> bool;

    /// Move focus to the root if the focused widget lies in the subtree
    /// rooted at `id`. Returns `true` if focus changed.
    fn blur(&mut self, id: WidgetId) -> bool;
}

impl FocusManager for App {
    fn focused(&self) -> WidgetId {
        self.tree.focus.unwrap_or_else(|| self.tree.root())
    }

    fn is_focused(&self, id: WidgetId) -> bool {
        self.focused() == id
    }

    fn is_focused_or_has_focused_child(&self, id: WidgetId) -> bool {
        assert!(
            self.phase != Phase::Build,
            "focus ancestry is undefined during build"
        );
        self.tree.is_ancestor_or_self(id, self.focused())
    }

    fn set_focus(&mut self, id: WidgetId) -> bool {
        if !self.tree.in_tree(id) || !self.is_visible(id) || !self.is_enabled(id) {
            return false;
        }
        if self.tree.focus == Some(id) {
            return false;
        }
        self.tree.focus = Some(id);
        self.full_redraw = true;
        true
    }

    fn blur(&mut self, id: WidgetId) -> bool {
        let Some(focus) = self.tree.focus else {
            return false;
        };
        if !self.tree.is_ancestor_or_self(id, focus) {
            return false;
        }
        self.tree.focus = None;
        self.full_redraw = true;
        true
    }
}
