//! Widget trait and structural kinds.

use std::any::{Any, type_name};

use crate::{
    NodeId,
    backend::RenderContext,
    core::context::{Cx, ViewCx},
    error::Result,
    event::{Buttons, Modifiers, MouseButton},
    geom::Vec2,
    widgets::Window,
};

/// The structural role of a node, fixed when the node is created.
///
/// The tree consults the kind rather than the widget itself, because a
/// widget's behaviour object is checked out of the arena while its handler
/// runs and cannot be inspected by code further down the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// An ordinary widget.
    Widget,
    /// A window with chrome.
    Window,
    /// A popup window anchored to `parent_window`.
    Popup {
        /// The window the popup is anchored to.
        parent_window: NodeId,
    },
    /// The root of a screen. Only the tree creates nodes of this kind.
    Root,
}

impl Kind {
    /// Windows and popups.
    pub fn is_window(self) -> bool {
        matches!(self, Self::Window | Self::Popup { .. })
    }
}

/// Widgets are the behaviour attached to nodes in the tree arena.
///
/// Every method has a default that runs the base behaviour through the
/// context, so an override can still call `cx.base_*` to extend rather than
/// replace it. Points passed to input handlers are expressed in the
/// coordinate space of the widget's parent, the same space as the widget's
/// own position.
pub trait Widget: Any {
    /// Structural role of this widget.
    fn kind(&self) -> Kind {
        Kind::Widget
    }

    /// Preferred size: the layout's answer if one is assigned, else the
    /// current size.
    fn preferred_size(&self, cx: &ViewCx<'_>, ctx: &mut dyn RenderContext) -> Result<Vec2> {
        cx.base_preferred_size(ctx)
    }

    /// Size and place the children.
    fn perform_layout(&mut self, cx: &mut Cx<'_>, ctx: &mut dyn RenderContext) -> Result<()> {
        cx.base_perform_layout(ctx)
    }

    /// Draw the widget. The base draws the visible children back to front.
    fn draw(&self, cx: &ViewCx<'_>, ctx: &mut dyn RenderContext) -> Result<()> {
        cx.base_draw(ctx)
    }

    /// Handle a mouse button press or release.
    fn mouse_button_event(
        &mut self,
        cx: &mut Cx<'_>,
        p: Vec2,
        button: MouseButton,
        down: bool,
        modifiers: Modifiers,
    ) -> Result<bool> {
        cx.base_mouse_button_event(p, button, down, modifiers)
    }

    /// Handle pointer motion. `rel` is the motion since the previous event.
    fn mouse_motion_event(
        &mut self,
        cx: &mut Cx<'_>,
        p: Vec2,
        rel: Vec2,
        buttons: Buttons,
        modifiers: Modifiers,
    ) -> Result<bool> {
        cx.base_mouse_motion_event(p, rel, buttons, modifiers)
    }

    /// The pointer entered (`enter == true`) or left the widget. `p` is the
    /// pointer in the parent's coordinates, like the other input handlers.
    fn mouse_enter_event(&mut self, cx: &mut Cx<'_>, p: Vec2, enter: bool) -> Result<bool> {
        cx.base_mouse_enter_event(p, enter)
    }

    /// Pointer motion while this widget is the screen's drag target.
    fn mouse_drag_event(
        &mut self,
        _cx: &mut Cx<'_>,
        _p: Vec2,
        _rel: Vec2,
        _buttons: Buttons,
        _modifiers: Modifiers,
    ) -> Result<bool> {
        Ok(false)
    }

    /// The widget gained or lost focus.
    fn focus_event(&mut self, cx: &mut Cx<'_>, focused: bool) -> Result<bool> {
        cx.base_focus_event(focused)
    }

    /// Recompute a position derived from another node. Called before every
    /// draw and at the start of layout.
    fn refresh_relative_placement(&mut self, _cx: &mut Cx<'_>) -> Result<()> {
        Ok(())
    }

    /// Window chrome state, for windows and popups.
    fn as_window(&self) -> Option<&Window> {
        None
    }

    /// Mutable window chrome state, for windows and popups.
    fn as_window_mut(&mut self) -> Option<&mut Window> {
        None
    }

    /// Short type name used in logs.
    fn name(&self) -> &'static str {
        let name = type_name::<Self>();
        name.rsplit("::").next().unwrap_or(name)
    }
}

/// Convert widgets into boxed trait objects.
impl<W> From<W> for Box<dyn Widget>
where
    W: Widget + 'static,
{
    fn from(widget: W) -> Self {
        Box::new(widget)
    }
}
