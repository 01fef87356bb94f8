//! The widget pool and the per-frame tree over it.
//!
//! Widgets live in a slotmap keyed by [`WidgetId`]. Parent/child structure is
//! not persistent: it is reassembled every frame from
//! [`Widget::append_child_widgets`], and a node is "in the tree" only if the
//! current build stamped it. Everything else (position, visibility, focus)
//! survives across frames on the node record.

use std::any::Any;

use slotmap::SlotMap;

use crate::error::{Error, Result};
use crate::id::{TypedId, WidgetId};
use crate::node::Node;
use crate::widget::Widget;

/// Widget pool plus the frame-scoped structure over it.
pub(crate) struct Tree {
    /// All live widgets, in or out of the tree.
    pub nodes: SlotMap<WidgetId, Node>,
    /// The root widget. Always in the tree, never stamped.
    root: WidgetId,
    /// Monotonic build counter; comparing against a node's `built_at` stamp
    /// answers tree membership.
    build_count: u64,
    /// The focused widget, if an explicit focus has been set.
    pub focus: Option<WidgetId>,
}

impl Tree {
    /// A tree with `root` installed at the top.
    pub fn new(root: Box<dyn Widget>) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::new(root));
        Tree {
            nodes,
            root,
            build_count: 0,
            focus: None,
        }
    }

    /// Id of the root widget.
    pub fn root(&self) -> WidgetId {
        self.root
    }

    /// The current build count.
    pub fn build_count(&self) -> u64 {
        self.build_count
    }

    /// Start a new build: bump the counter and drop every node's frame-scoped
    /// state (children list and visible-bounds cache).
    pub fn begin_build(&mut self) {
        self.build_count += 1;
        for (_, node) in &mut self.nodes {
            node.children.clear();
            node.visible_bounds = None;
        }
    }

    /// Add a widget to the pool. It joins the tree once some widget appends
    /// it during a build.
    pub fn insert(&mut self, widget: Box<dyn Widget>) -> WidgetId {
        self.nodes.insert(Node::new(widget))
    }

    /// Add a widget to the pool, returning a typed handle.
    pub fn insert_typed<W: Widget>(&mut self, widget: W) -> TypedId<W> {
        TypedId::new(self.insert(Box::new(widget)))
    }

    /// Remove `id` and all its current children from the pool. Focus is
    /// cleared if it pointed into the removed subtree.
    pub fn remove(&mut self, id: WidgetId) -> Result<()> {
        if id == self.root {
            return Err(Error::Widget("the root widget cannot be removed".into()));
        }
        if !self.nodes.contains_key(id) {
            return Err(Error::UnknownWidget(id));
        }
        let doomed = self.preorder(id);
        if let Some(focus) = self.focus {
            if doomed.contains(&focus) {
                self.focus = None;
            }
        }
        if let Some(parent) = self.parent(id) {
            if let Some(node) = self.nodes.get_mut(parent) {
                node.children.retain(|c| *c != id);
            }
        }
        for victim in doomed {
            self.nodes.remove(victim);
        }
        Ok(())
    }

    /// Whether `id` refers to a live pool slot.
    pub fn contains(&self, id: WidgetId) -> bool {
        self.nodes.contains_key(id)
    }

    /// The node record for `id`.
    pub fn node(&self, id: WidgetId) -> Result<&Node> {
        self.nodes.get(id).ok_or(Error::UnknownWidget(id))
    }

    /// Mutable node record for `id`.
    pub fn node_mut(&mut self, id: WidgetId) -> Result<&mut Node> {
        self.nodes.get_mut(id).ok_or(Error::UnknownWidget(id))
    }

    /// Borrow the widget for `id` as its concrete type.
    pub fn get<W: Widget>(&self, id: TypedId<W>) -> Result<&W> {
        let wid = WidgetId::from(id);
        let slot = self.node(wid)?.widget.as_ref();
        let widget = slot.ok_or(Error::WidgetBusy(wid))?;
        (widget.as_ref() as &dyn Any)
            .downcast_ref::<W>()
            .ok_or_else(|| Error::Internal(format!("widget type mismatch for {wid:?}")))
    }

    /// Mutably borrow the widget for `id` as its concrete type.
    pub fn get_mut<W: Widget>(&mut self, id: TypedId<W>) -> Result<&mut W> {
        let wid = WidgetId::from(id);
        let slot = self.node_mut(wid)?.widget.as_mut();
        let widget = slot.ok_or(Error::WidgetBusy(wid))?;
        (widget.as_mut() as &mut dyn Any)
            .downcast_mut::<W>()
            .ok_or_else(|| Error::Internal(format!("widget type mismatch for {wid:?}")))
    }

    /// Take the widget out of its slot so its methods can run while the rest
    /// of the pool stays reachable. Fails with
    /// [`Error::WidgetBusy`] if the slot is already empty.
    pub fn take_widget(&mut self, id: WidgetId) -> Result<Box<dyn Widget>> {
        self.node_mut(id)?
            .widget
            .take()
            .ok_or(Error::WidgetBusy(id))
    }

    /// Put a taken widget back. Silently drops the widget if its node was
    /// removed while it was out.
    pub fn restore_widget(&mut self, id: WidgetId, widget: Box<dyn Widget>) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.widget = Some(widget);
        }
    }

    /// Parent of `id` for the current build, if any.
    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    /// Children of `id` for the current build, in declaration order.
    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.nodes.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Iterator over `id` and its ancestors, ending at the root.
    pub fn ancestors(&self, id: WidgetId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.contains(id).then_some(id),
        }
    }

    /// True when `ancestor` appears in `id`'s ancestor-or-self chain.
    pub fn is_ancestor_or_self(&self, ancestor: WidgetId, id: WidgetId) -> bool {
        self.ancestors(id).any(|a| a == ancestor)
    }

    /// Whether `id` participates in the current build. The root always does;
    /// any other widget must have been appended this frame.
    pub fn in_tree(&self, id: WidgetId) -> bool {
        if id == self.root {
            return true;
        }
        self.nodes
            .get(id)
            .is_some_and(|n| n.built_at == self.build_count)
    }

    /// Record the children `parent` appended this frame: stamp them into the
    /// build and set their parent links.
    pub fn attach_children(&mut self, parent: WidgetId, ids: Vec<WidgetId>) -> Result<()> {
        for id in ids {
            if id == self.root {
                return Err(Error::RootAppend);
            }
            let build_count = self.build_count;
            let node = self.node_mut(id)?;
            if node.built_at == build_count {
                return Err(Error::DuplicateChild(id));
            }
            node.built_at = build_count;
            node.parent = Some(parent);
            self.node_mut(parent)?.children.push(id);
        }
        Ok(())
    }

    /// Preorder walk from `from`: parents before children, children in
    /// declaration order.
    pub fn preorder(&self, from: WidgetId) -> Vec<WidgetId> {
        let mut order = Vec::new();
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            if !self.contains(id) {
                continue;
            }
            order.push(id);
            for child in self.children(id).iter().rev() {
                stack.push(*child);
            }
        }
        order
    }

    /// Debug rendering of the current tree: names, flags, and recorded
    /// geometry, indented by depth.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.dump_node(&mut out, self.root, 0);
        out
    }

    /// Append one node and its subtree to the dump.
    fn dump_node(&self, out: &mut String, id: WidgetId, level: usize) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        let indent = "    ".repeat(level);
        let name = node
            .widget
            .as_ref()
            .map_or_else(|| "<busy>".to_string(), |w| w.name());
        out.push_str(&indent);
        out.push_str(&name);
        if self.focus == Some(id) {
            out.push_str(" FOCUSED");
        }
        if node.hidden {
            out.push_str(" hidden");
        }
        if node.disabled {
            out.push_str(" disabled");
        }
        out.push_str(&format!(
            " pos=({}, {})",
            node.position.x, node.position.y
        ));
        out.push('\n');
        for child in &node.children {
            self.dump_node(out, *child, level + 1);
        }
    }
}

/// Iterator produced by [`Tree::ancestors`].
pub(crate) struct Ancestors<'a> {
    /// Tree being walked.
    tree: &'a Tree,
    /// Next id to yield.
    next: Option<WidgetId>,
}

impl Iterator for Ancestors<'_> {
    type Item = WidgetId;

    fn next(&mut self) -> Option<WidgetId> {
        let id = self.next?;
        self.next = self.tree.parent(id);
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Leaf;
    impl Widget for Leaf {}

    fn tree_with_children(n: usize) -> (Tree, Vec<WidgetId>) {
        let mut tree = Tree::new(Box::new(Leaf));
        let ids: Vec<WidgetId> = (0..n).map(|_| tree.insert(Box::new(Leaf))).collect();
        tree.begin_build();
        tree.attach_children(tree.root(), ids.clone()).unwrap();
        (tree, ids)
    }

    #[test]
    fn membership_follows_the_stamp() {
        let (mut tree, ids) = tree_with_children(2);
        assert!(tree.in_tree(tree.root()));
        assert!(tree.in_tree(ids[0]));
        assert!(tree.in_tree(ids[1]));

        // Skip ids[1] in the next build and it drops out of the tree while
        // staying in the pool.
        tree.begin_build();
        tree.attach_children(tree.root(), vec![ids[0]]).unwrap();
        assert!(tree.in_tree(ids[0]));
        assert!(!tree.in_tree(ids[1]));
        assert!(tree.contains(ids[1]));
    }

    #[test]
    fn duplicate_append_is_rejected() {
        let mut tree = Tree::new(Box::new(Leaf));
        let a = tree.insert(Box::new(Leaf));
        tree.begin_build();
        let err = tree
            .attach_children(tree.root(), vec![a, a])
            .unwrap_err();
        assert_eq!(err, Error::DuplicateChild(a));
    }

    #[test]
    fn root_cannot_be_appended() {
        let mut tree = Tree::new(Box::new(Leaf));
        let a = tree.insert(Box::new(Leaf));
        tree.begin_build();
        tree.attach_children(tree.root(), vec![a]).unwrap();
        let err = tree.attach_children(a, vec![tree.root()]).unwrap_err();
        assert_eq!(err, Error::RootAppend);
    }

    #[test]
    fn ancestors_start_at_self_and_end_at_root() {
        let (mut tree, ids) = tree_with_children(1);
        let grandchild = tree.insert(Box::new(Leaf));
        tree.attach_children(ids[0], vec![grandchild]).unwrap();
        let chain: Vec<WidgetId> = tree.ancestors(grandchild).collect();
        assert_eq!(chain, vec![grandchild, ids[0], tree.root()]);
        assert!(tree.is_ancestor_or_self(tree.root(), grandchild));
        assert!(tree.is_ancestor_or_self(grandchild, grandchild));
        assert!(!tree.is_ancestor_or_self(grandchild, ids[0]));
    }

    #[test]
    fn preorder_is_parent_first_in_declaration_order() {
        let (mut tree, ids) = tree_with_children(2);
        let grandchild = tree.insert(Box::new(Leaf));
        tree.attach_children(ids[0], vec![grandchild]).unwrap();
        let order = tree.preorder(tree.root());
        assert_eq!(order, vec![tree.root(), ids[0], grandchild, ids[1]]);
    }

    #[test]
    fn remove_takes_the_subtree_and_clears_focus() {
        let (mut tree, ids) = tree_with_children(2);
        let grandchild = tree.insert(Box::new(Leaf));
        tree.attach_children(ids[0], vec![grandchild]).unwrap();
        tree.focus = Some(grandchild);

        tree.remove(ids[0]).unwrap();
        assert!(!tree.contains(ids[0]));
        assert!(!tree.contains(grandchild));
        assert!(tree.contains(ids[1]));
        assert_eq!(tree.focus, None);
        assert_eq!(tree.children(tree.root()), &[ids[1]]);
    }

    #[test]
    fn removing_the_root_fails() {
        let mut tree = Tree::new(Box::new(Leaf));
        assert!(tree.remove(tree.root()).is_err());
    }

    #[test]
    fn taken_slot_reports_busy() {
        let (mut tree, ids) = tree_with_children(1);
        let w = tree.take_widget(ids[0]).unwrap();
        assert_eq!(
            tree.take_widget(ids[0]).err().unwrap(),
            Error::WidgetBusy(ids[0])
        );
        tree.restore_widget(ids[0], w);
        assert!(tree.take_widget(ids[0]).is_ok());
    }

    #[test]
    fn typed_access_downcasts() {
        struct Counter {
            hits: u32,
        }
        impl Widget for Counter {}

        let mut tree = Tree::new(Box::new(Leaf));
        let id = tree.insert_typed(Counter { hits: 3 });
        assert_eq!(tree.get(id).unwrap().hits, 3);
        tree.get_mut(id).unwrap().hits = 5;
        assert_eq!(tree.get(id).unwrap().hits, 5);
    }
}
