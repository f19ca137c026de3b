use std::mem;

use crate::{
    core::{id::NodeId, tree::Tree, windows::WindowManager},
    error::{Error, Result},
    widget::Kind,
};

/// Focus path management for a screen's tree.
pub trait FocusManager {
    /// The focus path, from the focused leaf up to the root.
    fn focus_path(&self) -> &[NodeId];

    /// The focused leaf, if any.
    fn focused_leaf(&self) -> Option<NodeId>;

    /// Is the node on the focus path?
    fn is_on_focus_path(&self, node: NodeId) -> bool;

    /// Make `node` the focused leaf. The node must be rooted in this tree's
    /// root; a node in a detached subtree yields `Error::Detached`.
    fn request_focus(&mut self, node: NodeId) -> Result<()>;

    /// Replace the focus path with the chain from `node` to the root, or
    /// clear it when `node` is `None`.
    ///
    /// Focused members of the old path are told they lost focus, members of
    /// the new path are told root first that they gained it, and the
    /// outermost window on the new path is raised.
    fn update_focus(&mut self, node: Option<NodeId>) -> Result<()>;
}

impl FocusManager for Tree {
    fn focus_path(&self) -> &[NodeId] {
        &self.focus_path
    }

    fn focused_leaf(&self) -> Option<NodeId> {
        self.focus_path.first().copied()
    }

    fn is_on_focus_path(&self, node: NodeId) -> bool {
        self.focus_path.contains(&node)
    }

    fn request_focus(&mut self, node: NodeId) -> Result<()> {
        self.update_focus(Some(node))
    }

    fn update_focus(&mut self, node: Option<NodeId>) -> Result<()> {
        let mut path = Vec::new();
        let mut window = None;
        if let Some(node) = node {
            for id in self.ancestors(node) {
                let kind = self.node(id)?.kind;
                if kind.is_window() {
                    window = Some(id);
                }
                path.push(id);
            }
            let top = path.last().copied().unwrap_or(node);
            if self.node(top)?.kind != Kind::Root {
                return Err(Error::Detached(node));
            }
        }

        for id in mem::take(&mut self.focus_path) {
            if self.nodes.get(id).is_some_and(|n| n.focused) {
                self.focus_event(id, false)?;
            }
        }
        self.focus_path = path.clone();
        for &id in path.iter().rev() {
            if self.is_live(id) {
                self.focus_event(id, true)?;
            }
        }
        tracing::debug!("focus path now {:?}", self.focus_path);

        if let Some(window) = window
            && self.is_live(window)
        {
            self.move_window_to_front(window)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{widget::Widget, widgets::Window};

    /// Plain widget.
    struct Leaf;

    impl Widget for Leaf {}

    #[test]
    fn path_is_leaf_to_root() -> Result<()> {
        let mut t = Tree::new();
        let root = t.root();
        let w = t.add(root, Window::new("w"))?;
        let a = t.add(w, Leaf)?;
        t.request_focus(a)?;
        assert_eq!(t.focus_path(), &[a, w, root]);
        assert_eq!(t.focused_leaf(), Some(a));
        assert!(t.node(a)?.focused());
        assert!(t.node(root)?.focused());
        Ok(())
    }

    #[test]
    fn refocus_clears_old_path() -> Result<()> {
        let mut t = Tree::new();
        let root = t.root();
        let w1 = t.add(root, Window::new("one"))?;
        let a = t.add(w1, Leaf)?;
        let w2 = t.add(root, Window::new("two"))?;
        let b = t.add(w2, Leaf)?;

        t.request_focus(a)?;
        // Focusing inside w1 raised it above w2.
        assert_eq!(t.children(root)?, &[w2, w1]);

        t.request_focus(b)?;
        assert!(!t.node(a)?.focused());
        assert!(!t.node(w1)?.focused());
        assert!(t.node(b)?.focused());
        assert!(t.node(root)?.focused());
        assert_eq!(t.children(root)?, &[w1, w2]);

        t.update_focus(None)?;
        assert!(t.focus_path().is_empty());
        assert!(!t.node(b)?.focused());
        Ok(())
    }

    #[test]
    fn detached_focus_fails() -> Result<()> {
        let mut t = Tree::new();
        let d = t.create_detached(Leaf);
        let e = t.add(d, Leaf)?;
        assert_eq!(t.request_focus(e), Err(Error::Detached(e)));
        assert!(t.focus_path().is_empty());
        Ok(())
    }

    #[test]
    fn removal_prunes_path() -> Result<()> {
        let mut t = Tree::new();
        let root = t.root();
        let w = t.add(root, Window::new("w"))?;
        let a = t.add(w, Leaf)?;
        t.request_focus(a)?;
        t.remove_child(w, a)?;
        assert_eq!(t.focus_path(), &[w, root]);
        assert!(!t.is_on_focus_path(a));
        Ok(())
    }
}
