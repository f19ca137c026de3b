use crate::{
    backend::RenderContext,
    core::{context::Cx, focus::FocusManager, id::NodeId, tree::Tree},
    error::{Error, Result},
    widget::{Kind, Widget},
};

/// Window stacking and lifecycle operations for a screen's tree.
pub trait WindowManager {
    /// The nearest window (or popup) at or above `node`.
    fn window(&self, node: NodeId) -> Result<NodeId>;

    /// Paint `window` above its siblings, then raise every popup anchored to
    /// it that is painted below it.
    fn move_window_to_front(&mut self, window: NodeId) -> Result<()>;

    /// Remove a window and its subtree, along with every popup anchored to
    /// it. If the window was on the focus path, the path is cleared and its
    /// members are told they lost focus.
    fn dispose_window(&mut self, window: NodeId) -> Result<()>;

    /// Center a window in its parent, sizing it to its preferred size first
    /// if it has no size yet.
    fn center_window(&mut self, window: NodeId, ctx: &mut dyn RenderContext) -> Result<()>;
}

impl WindowManager for Tree {
    fn window(&self, node: NodeId) -> Result<NodeId> {
        self.node(node)?;
        self.ancestors(node)
            .find(|id| self.nodes.get(*id).is_some_and(|n| n.kind.is_window()))
            .ok_or(Error::NoWindow(node))
    }

    fn move_window_to_front(&mut self, window: NodeId) -> Result<()> {
        let parent = self.node(window)?.parent.ok_or(Error::Detached(window))?;
        let children = &mut self.node_mut(parent)?.children;
        children.retain(|c| *c != window);
        children.push(window);

        loop {
            let children = self.children(parent)?;
            let base = children.iter().position(|c| *c == window).unwrap_or(0);
            let popup = children[..base].iter().copied().find(|c| {
                self.nodes.get(*c).is_some_and(
                    |n| matches!(n.kind, Kind::Popup { parent_window } if parent_window == window),
                )
            });
            match popup {
                Some(popup) => self.move_window_to_front(popup)?,
                None => break,
            }
        }
        tracing::trace!("raised window {window:?}");
        Ok(())
    }

    fn dispose_window(&mut self, window: NodeId) -> Result<()> {
        let node = self.node(window)?;
        if !node.kind.is_window() {
            return Err(Error::NotAWindow(window));
        }
        if node.parent.is_none() {
            return Err(Error::Detached(window));
        }

        let anchored: Vec<NodeId> = self
            .nodes
            .iter()
            .filter(|(_, n)| {
                n.parent.is_some()
                    && matches!(n.kind, Kind::Popup { parent_window } if parent_window == window)
            })
            .map(|(id, _)| id)
            .collect();
        for popup in anchored {
            if self.is_live(popup) {
                self.dispose_window(popup)?;
            }
        }

        if self.focus_path.contains(&window) {
            self.update_focus(None)?;
        }
        let parent = self.node(window)?.parent.ok_or(Error::Detached(window))?;
        self.remove_child(parent, window)?;
        tracing::debug!("disposed window {window:?}");
        Ok(())
    }

    fn center_window(&mut self, window: NodeId, ctx: &mut dyn RenderContext) -> Result<()> {
        if !self.node(window)?.kind.is_window() {
            return Err(Error::NotAWindow(window));
        }
        self.with_widget_mut(window, |w, tree| {
            center_widget(w, &mut Cx::new(tree, window), ctx)
        })?
    }
}

/// Center a widget whose handler is running in its parent.
pub(crate) fn center_widget(
    widget: &mut dyn Widget,
    cx: &mut Cx<'_>,
    ctx: &mut dyn RenderContext,
) -> Result<()> {
    if cx.node()?.size.is_zero() {
        let size = widget.preferred_size(&cx.view(), ctx)?;
        cx.node_mut()?.size = size;
        widget.perform_layout(cx, ctx)?;
    }
    let parent_size = match cx.node()?.parent {
        Some(parent) => cx.tree().node(parent)?.size,
        None => return Err(Error::Detached(cx.id())),
    };
    let node = cx.node_mut()?;
    node.position = (parent_size - node.size) / 2;
    Ok(())
}
