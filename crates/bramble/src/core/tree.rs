use std::{any::Any, iter::successors, mem, rc::Rc};

use slotmap::SlotMap;

use crate::{
    backend::RenderContext,
    core::{
        context::{Cx, ViewCx},
        id::NodeId,
        node::Node,
        theme::Theme,
    },
    error::{Error, Result},
    event::{Buttons, Modifiers, MouseButton},
    geom::Vec2,
    widget::{Kind, Widget},
};

/// Widget held by the root node.
struct RootWidget;

impl Widget for RootWidget {
    fn kind(&self) -> Kind {
        Kind::Root
    }
}

/// The widget arena: node storage, structure, focus path and the entry
/// points of the widget protocol.
pub struct Tree {
    /// Node storage arena.
    pub(crate) nodes: SlotMap<NodeId, Node>,
    /// Root node ID.
    pub(crate) root: NodeId,
    /// Focus path, from the focused leaf up to the root.
    pub(crate) focus_path: Vec<NodeId>,
    /// Focus notifications waiting for a checked-out widget to return.
    pending_focus: Vec<(NodeId, bool)>,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// Create a tree with the default theme.
    pub fn new() -> Self {
        Self::with_theme(Rc::new(Theme::default()))
    }

    /// Create a tree whose root carries `theme`.
    pub fn with_theme(theme: Rc<Theme>) -> Self {
        let mut nodes = SlotMap::with_key();
        let mut root = Node::new(Box::new(RootWidget));
        root.theme = Some(theme);
        let root = nodes.insert(root);
        Self {
            nodes,
            root,
            focus_path: Vec::new(),
            pending_focus: Vec::new(),
        }
    }

    /// Root node ID.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Borrow a node.
    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id).ok_or(Error::NodeNotFound(id))
    }

    /// Borrow a node mutably.
    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(id).ok_or(Error::NodeNotFound(id))
    }

    /// Does the id refer to a live node?
    pub fn is_live(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of live nodes, the root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Borrow a node's widget as its concrete type.
    pub fn widget<W: Widget>(&self, id: NodeId) -> Option<&W> {
        let widget: &dyn Any = self.widget_dyn(id)?;
        widget.downcast_ref()
    }

    /// Borrow a node's widget mutably as its concrete type.
    pub fn widget_mut<W: Widget>(&mut self, id: NodeId) -> Option<&mut W> {
        let widget: &mut dyn Any = self.nodes.get_mut(id)?.widget.as_deref_mut()?;
        widget.downcast_mut()
    }

    /// Borrow a node's widget. `None` while its handler runs.
    pub fn widget_dyn(&self, id: NodeId) -> Option<&dyn Widget> {
        self.nodes.get(id)?.widget.as_deref()
    }

    /// Create a widget as the last child of `parent`.
    pub fn add<W>(&mut self, parent: NodeId, widget: W) -> Result<NodeId>
    where
        W: Widget + 'static,
    {
        self.add_boxed(parent, Box::new(widget))
    }

    /// Create a boxed widget as the last child of `parent`.
    pub fn add_boxed(&mut self, parent: NodeId, widget: Box<dyn Widget>) -> Result<NodeId> {
        self.node(parent)?;
        let child = self.create_detached_boxed(widget);
        self.add_child(parent, child)?;
        Ok(child)
    }

    /// Create a node in the arena detached from the tree.
    pub fn create_detached<W>(&mut self, widget: W) -> NodeId
    where
        W: Widget + 'static,
    {
        self.create_detached_boxed(Box::new(widget))
    }

    /// Create a node in the arena detached from the tree using a boxed widget.
    pub fn create_detached_boxed(&mut self, widget: Box<dyn Widget>) -> NodeId {
        let mut node = Node::new(widget);
        if node.kind == Kind::Root {
            node.kind = Kind::Widget;
        }
        let name = node.widget.as_deref().map_or("?", |w| w.name());
        let id = self.nodes.insert(node);
        tracing::trace!("created {name} {id:?}");
        id
    }

    /// Append a detached node to `parent`'s children.
    ///
    /// The child inherits the parent's theme unless it already has one.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.node(parent)?;
        if self.node(child)?.parent.is_some() || child == self.root {
            return Err(Error::AlreadyAttached(child));
        }
        if parent == child || self.is_ancestor(child, parent) {
            return Err(Error::Cycle { parent, child });
        }

        let theme = self.theme(parent);
        let node = self.node_mut(child)?;
        node.parent = Some(parent);
        if node.theme.is_none() {
            node.theme = Some(theme);
        }
        self.node_mut(parent)?.children.push(child);
        tracing::debug!("attached {child:?} to {parent:?}");
        Ok(())
    }

    /// Remove `child` from `parent` and free its subtree.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let index = self
            .node(parent)?
            .children
            .iter()
            .position(|c| *c == child)
            .ok_or(Error::NotAChild { parent, child })?;
        self.remove_child_at(parent, index)
    }

    /// Remove the child at `index` and free its subtree.
    pub fn remove_child_at(&mut self, parent: NodeId, index: usize) -> Result<()> {
        let node = self.node_mut(parent)?;
        let len = node.children.len();
        if index >= len {
            return Err(Error::ChildIndexOutOfRange { index, len });
        }
        let child = node.children.remove(index);
        self.free_subtree(child);
        tracing::debug!("removed {child:?} from {parent:?}");
        Ok(())
    }

    /// Unlink a node from its parent without freeing it. The node becomes a
    /// detached root that can be attached elsewhere. Members of the subtree
    /// leave the focus path and get `focus_event(false)`.
    pub fn detach(&mut self, child: NodeId) -> Result<()> {
        let Some(parent) = self.node(child)?.parent else {
            return Ok(());
        };
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.retain(|id| *id != child);
        }
        self.node_mut(child)?.parent = None;
        let subtree = self.subtree_pre_order(child);
        self.unfocus_members(&subtree)?;
        tracing::debug!("detached {child:?} from {parent:?}");
        Ok(())
    }

    /// Drop `members` from the focus path, telling the focused ones they
    /// lost focus.
    fn unfocus_members(&mut self, members: &[NodeId]) -> Result<()> {
        let (gone, kept): (Vec<_>, Vec<_>) = mem::take(&mut self.focus_path)
            .into_iter()
            .partition(|id| members.contains(id));
        self.focus_path = kept;
        for id in gone {
            if self.nodes.get(id).is_some_and(|n| n.focused) {
                self.focus_event(id, false)?;
            }
        }
        Ok(())
    }

    /// Free a node and all its descendants.
    fn free_subtree(&mut self, root: NodeId) {
        for id in self.subtree_post_order(root) {
            self.nodes.remove(id);
        }
        let nodes = &self.nodes;
        self.focus_path.retain(|id| nodes.contains_key(*id));
        self.pending_focus.retain(|(id, _)| nodes.contains_key(*id));
    }

    /// Is `ancestor` a strict ancestor of `node`?
    fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.ancestors(node).skip(1).any(|id| id == ancestor)
    }

    /// The node itself followed by its ancestors, nearest first.
    pub(crate) fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        successors(Some(id), |id| self.nodes.get(*id).and_then(|n| n.parent))
    }

    /// Collect a subtree in pre-order, including the root.
    pub(crate) fn subtree_pre_order(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            out.push(id);
            stack.extend(node.children.iter().rev());
        }
        out
    }

    /// Collect a subtree in post-order, including the root.
    fn subtree_post_order(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![(root, false)];
        while let Some((id, visited)) = stack.pop() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            if visited {
                out.push(id);
                continue;
            }
            stack.push((id, true));
            for child in node.children.iter().rev() {
                stack.push((*child, false));
            }
        }
        out
    }

    /// Parent of a node.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    /// Children of a node, back to front.
    pub fn children(&self, id: NodeId) -> Result<&[NodeId]> {
        Ok(&self.node(id)?.children)
    }

    /// Number of children.
    pub fn child_count(&self, id: NodeId) -> usize {
        self.nodes.get(id).map_or(0, |n| n.children.len())
    }

    /// Index of `child` among `parent`'s children.
    pub fn child_index(&self, parent: NodeId, child: NodeId) -> Option<usize> {
        self.nodes
            .get(parent)?
            .children
            .iter()
            .position(|c| *c == child)
    }

    /// Sum of positions along the parent chain.
    pub fn absolute_position(&self, id: NodeId) -> Vec2 {
        self.ancestors(id)
            .filter_map(|id| self.nodes.get(id))
            .fold(Vec2::zero(), |acc, n| acc + n.position)
    }

    /// True when the node and every ancestor are visible.
    pub fn visible_recursive(&self, id: NodeId) -> bool {
        self.ancestors(id)
            .all(|id| self.nodes.get(id).is_some_and(|n| n.visible))
    }

    /// Does the node cover `p`, given in its parent's coordinates?
    pub fn contains(&self, id: NodeId, p: Vec2) -> bool {
        self.nodes.get(id).is_some_and(|n| {
            let d = p - n.position;
            d.x >= 0 && d.y >= 0 && d.x < n.size.x && d.y < n.size.y
        })
    }

    /// Is the node live and its own visibility flag set?
    fn is_visible(&self, id: NodeId) -> bool {
        self.nodes.get(id).is_some_and(|n| n.visible)
    }

    /// The frontmost visible node under `p`, given in `id`'s parent's
    /// coordinates.
    pub fn find_widget(&self, id: NodeId, p: Vec2) -> Option<NodeId> {
        let node = self.nodes.get(id)?;
        let local = p - node.position;
        for &child in node.children.iter().rev() {
            if self.is_visible(child) && self.contains(child, local) {
                return self.find_widget(child, local);
            }
        }
        self.contains(id, p).then_some(id)
    }

    /// First node in pre-order whose id label is `label`.
    pub fn find_by_id(&self, label: &str) -> Option<NodeId> {
        self.subtree_pre_order(self.root)
            .into_iter()
            .find(|id| self.nodes.get(*id).is_some_and(|n| n.id == label))
    }

    /// Effective theme: the nearest theme on the ancestor chain, else the
    /// root's.
    pub fn theme(&self, id: NodeId) -> Rc<Theme> {
        self.ancestors(id)
            .chain([self.root])
            .find_map(|id| self.nodes.get(id).and_then(|n| n.theme.clone()))
            .unwrap_or_default()
    }

    /// Explicit font size if set, else the theme's standard size.
    pub fn font_size(&self, id: NodeId) -> i32 {
        self.nodes
            .get(id)
            .and_then(|n| n.font_size)
            .unwrap_or_else(|| self.theme(id).standard_font_size)
    }

    /// Borrow a widget that is not checked out.
    fn idle_widget(&self, id: NodeId) -> Result<&dyn Widget> {
        self.node(id)?
            .widget
            .as_deref()
            .ok_or(Error::ReentrantWidget(id))
    }

    /// Take a mutable reference to a widget for a single call.
    ///
    /// The widget leaves its slot for the duration of `f`. If `f` removed the
    /// node, the widget is dropped on return. Focus notifications queued
    /// while the widget was out are delivered before returning.
    pub(crate) fn with_widget_mut<R>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut dyn Widget, &mut Self) -> R,
    ) -> Result<R> {
        let node = self.node_mut(id)?;
        let mut widget = node.widget.take().ok_or(Error::ReentrantWidget(id))?;
        let out = f(widget.as_mut(), self);
        let Some(node) = self.nodes.get_mut(id) else {
            tracing::trace!("{} {id:?} freed by its own handler", widget.name());
            return Ok(out);
        };
        node.widget = Some(widget);
        self.deliver_pending_focus(id)?;
        Ok(out)
    }

    /// Deliver queued focus notifications to a widget that just returned.
    fn deliver_pending_focus(&mut self, id: NodeId) -> Result<()> {
        while let Some(i) = self.pending_focus.iter().position(|(n, _)| *n == id) {
            let (_, focused) = self.pending_focus.remove(i);
            self.focus_event(id, focused)?;
        }
        Ok(())
    }

    /// Preferred size of a node.
    pub fn preferred_size(&self, id: NodeId, ctx: &mut dyn RenderContext) -> Result<Vec2> {
        self.idle_widget(id)?
            .preferred_size(&ViewCx::new(self, id), ctx)
    }

    /// Lay out a node and, recursively, its children.
    pub fn perform_layout(&mut self, id: NodeId, ctx: &mut dyn RenderContext) -> Result<()> {
        tracing::trace!("layout {id:?}");
        self.with_widget_mut(id, |w, tree| w.perform_layout(&mut Cx::new(tree, id), ctx))?
    }

    /// Draw a node.
    pub fn draw(&self, id: NodeId, ctx: &mut dyn RenderContext) -> Result<()> {
        self.idle_widget(id)?.draw(&ViewCx::new(self, id), ctx)
    }

    /// Dispatch a button event to a node. `p` is in the node's parent's
    /// coordinates.
    pub fn mouse_button_event(
        &mut self,
        id: NodeId,
        p: Vec2,
        button: MouseButton,
        down: bool,
        modifiers: Modifiers,
    ) -> Result<bool> {
        self.with_widget_mut(id, |w, tree| {
            w.mouse_button_event(&mut Cx::new(tree, id), p, button, down, modifiers)
        })?
    }

    /// Dispatch a motion event to a node.
    pub fn mouse_motion_event(
        &mut self,
        id: NodeId,
        p: Vec2,
        rel: Vec2,
        buttons: Buttons,
        modifiers: Modifiers,
    ) -> Result<bool> {
        self.with_widget_mut(id, |w, tree| {
            w.mouse_motion_event(&mut Cx::new(tree, id), p, rel, buttons, modifiers)
        })?
    }

    /// Dispatch an enter or leave event to a node.
    pub fn mouse_enter_event(&mut self, id: NodeId, p: Vec2, enter: bool) -> Result<bool> {
        self.with_widget_mut(id, |w, tree| {
            w.mouse_enter_event(&mut Cx::new(tree, id), p, enter)
        })?
    }

    /// Dispatch a drag event to a node.
    pub fn mouse_drag_event(
        &mut self,
        id: NodeId,
        p: Vec2,
        rel: Vec2,
        buttons: Buttons,
        modifiers: Modifiers,
    ) -> Result<bool> {
        self.with_widget_mut(id, |w, tree| {
            w.mouse_drag_event(&mut Cx::new(tree, id), p, rel, buttons, modifiers)
        })?
    }

    /// Notify a node of a focus change.
    ///
    /// If the node's widget is checked out, the flag is set now and the
    /// widget is notified when its handler returns.
    pub fn focus_event(&mut self, id: NodeId, focused: bool) -> Result<bool> {
        let node = self.node_mut(id)?;
        if node.widget.is_none() {
            node.focused = focused;
            self.pending_focus.push((id, focused));
            return Ok(false);
        }
        self.with_widget_mut(id, |w, tree| w.focus_event(&mut Cx::new(tree, id), focused))?
    }

    /// Refresh one node's derived placement.
    pub fn refresh_relative_placement(&mut self, id: NodeId) -> Result<()> {
        self.with_widget_mut(id, |w, tree| {
            w.refresh_relative_placement(&mut Cx::new(tree, id))
        })?
    }

    /// Refresh derived placements for the whole tree, parents first.
    pub fn refresh_placements(&mut self) -> Result<()> {
        for id in self.subtree_pre_order(self.root) {
            if self.is_live(id) {
                self.refresh_relative_placement(id)?;
            }
        }
        Ok(())
    }
}
