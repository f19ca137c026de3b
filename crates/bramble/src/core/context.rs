use std::rc::Rc;

use crate::{
    backend::{RenderContext, with_translation},
    core::{
        focus::FocusManager,
        id::NodeId,
        node::Node,
        theme::Theme,
        tree::Tree,
        windows::WindowManager,
    },
    error::Result,
    event::{Buttons, Modifiers, MouseButton},
    geom::Vec2,
};

/// Read-only context handed to widgets while measuring and drawing.
pub struct ViewCx<'a> {
    /// Tree being traversed.
    tree: &'a Tree,
    /// Node currently being visited.
    id: NodeId,
}

impl<'a> ViewCx<'a> {
    /// Context for `id`. The node must be live.
    pub(crate) fn new(tree: &'a Tree, id: NodeId) -> Self {
        Self { tree, id }
    }

    /// The node being visited.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The whole tree.
    pub fn tree(&self) -> &'a Tree {
        self.tree
    }

    /// The node being visited.
    pub fn node(&self) -> &'a Node {
        &self.tree.nodes[self.id]
    }

    /// Effective theme.
    pub fn theme(&self) -> Rc<Theme> {
        self.tree.theme(self.id)
    }

    /// Effective font size.
    pub fn font_size(&self) -> i32 {
        self.tree.font_size(self.id)
    }

    /// Base preferred size: the layout's answer, else the current size.
    pub fn base_preferred_size(&self, ctx: &mut dyn RenderContext) -> Result<Vec2> {
        match self.node().layout.clone() {
            Some(layout) => layout.preferred_size(self, ctx),
            None => Ok(self.node().size),
        }
    }

    /// Base draw: translate to this node's position and draw the visible
    /// children back to front. The translation is undone even if a child
    /// fails.
    pub fn base_draw(&self, ctx: &mut dyn RenderContext) -> Result<()> {
        let node = self.node();
        if node.children.is_empty() {
            return Ok(());
        }
        with_translation(ctx, node.position.as_f32(), |ctx| {
            for &child in &node.children {
                if self.tree.nodes.get(child).is_some_and(|n| n.visible) {
                    self.tree.draw(child, ctx)?;
                }
            }
            Ok(())
        })
    }
}

/// Mutable context handed to widgets while handling input and laying out.
///
/// The node may be freed by the handler itself (a window disposing of
/// itself, say), so node accessors return `Result`.
pub struct Cx<'a> {
    /// Tree being mutated.
    tree: &'a mut Tree,
    /// Node whose handler is running.
    id: NodeId,
}

impl<'a> Cx<'a> {
    /// Context for `id`.
    pub(crate) fn new(tree: &'a mut Tree, id: NodeId) -> Self {
        Self { tree, id }
    }

    /// The node whose handler is running.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The whole tree.
    pub fn tree(&self) -> &Tree {
        self.tree
    }

    /// The whole tree, mutably.
    pub fn tree_mut(&mut self) -> &mut Tree {
        self.tree
    }

    /// The node whose handler is running.
    pub fn node(&self) -> Result<&Node> {
        self.tree.node(self.id)
    }

    /// The node whose handler is running, mutably.
    pub fn node_mut(&mut self) -> Result<&mut Node> {
        self.tree.node_mut(self.id)
    }

    /// A read-only view of the same node.
    pub fn view(&self) -> ViewCx<'_> {
        ViewCx::new(self.tree, self.id)
    }

    /// Effective theme.
    pub fn theme(&self) -> Rc<Theme> {
        self.tree.theme(self.id)
    }

    /// Make this node the focused leaf of its screen.
    pub fn request_focus(&mut self) -> Result<()> {
        self.tree.request_focus(self.id)
    }

    /// Nearest window at or above this node.
    pub fn window(&self) -> Result<NodeId> {
        self.tree.window(self.id)
    }

    /// Base layout: delegate to the layout if one is assigned. Otherwise size
    /// each child to its fixed size where nonzero, else its preferred size,
    /// and lay it out in turn.
    pub fn base_perform_layout(&mut self, ctx: &mut dyn RenderContext) -> Result<()> {
        let node = self.node()?;
        if let Some(layout) = node.layout.clone() {
            return layout.perform_layout(self, ctx);
        }
        for child in node.children.clone() {
            let pref = self.tree.preferred_size(child, ctx)?;
            let node = self.tree.node_mut(child)?;
            let fixed = node.fixed_size;
            node.size = Vec2::new(
                if fixed.x != 0 { fixed.x } else { pref.x },
                if fixed.y != 0 { fixed.y } else { pref.y },
            );
            self.tree.perform_layout(child, ctx)?;
        }
        Ok(())
    }

    /// Base button dispatch: offer the event to the visible children under
    /// the pointer, topmost first. If nobody consumes a primary press, focus
    /// this node. Never consumes by itself.
    pub fn base_mouse_button_event(
        &mut self,
        p: Vec2,
        button: MouseButton,
        down: bool,
        modifiers: Modifiers,
    ) -> Result<bool> {
        let node = self.node()?;
        let local = p - node.position;
        for &child in node.children.clone().iter().rev() {
            if self.is_visible(child)
                && self.tree.contains(child, local)
                && self
                    .tree
                    .mouse_button_event(child, local, button, down, modifiers)?
            {
                return Ok(true);
            }
        }
        if button == MouseButton::Left && down && !self.node()?.focused {
            self.request_focus()?;
        }
        Ok(false)
    }

    /// Base motion dispatch. Each visible child whose containment changed
    /// between the previous and current pointer position gets an enter or
    /// leave event; children that contain either position get the motion.
    pub fn base_mouse_motion_event(
        &mut self,
        p: Vec2,
        rel: Vec2,
        buttons: Buttons,
        modifiers: Modifiers,
    ) -> Result<bool> {
        let node = self.node()?;
        let local = p - node.position;
        for &child in node.children.clone().iter().rev() {
            if !self.is_visible(child) {
                continue;
            }
            let contained = self.tree.contains(child, local);
            let prev = self.tree.contains(child, local - rel);
            if contained != prev {
                self.tree.mouse_enter_event(child, local, contained)?;
            }
            if (contained || prev)
                && self
                    .tree
                    .mouse_motion_event(child, local, rel, buttons, modifiers)?
            {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Base enter handling: record the pointer-over flag.
    pub fn base_mouse_enter_event(&mut self, _p: Vec2, enter: bool) -> Result<bool> {
        self.node_mut()?.mouse_focus = enter;
        Ok(false)
    }

    /// Base focus handling: record the focus flag.
    pub fn base_focus_event(&mut self, focused: bool) -> Result<bool> {
        self.node_mut()?.focused = focused;
        Ok(false)
    }

    /// Is a child live and visible? Children freed by an earlier sibling's
    /// handler are skipped.
    fn is_visible(&self, id: NodeId) -> bool {
        self.tree.nodes.get(id).is_some_and(|n| n.visible)
    }
}
