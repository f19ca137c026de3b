use crate::{
    NodeId,
    backend::{RenderContext, with_saved_state},
    core::context::{Cx, ViewCx},
    error::Result,
    event::{Modifiers, MouseButton},
    geom::{Vec2, Vec2F},
    widget::{Kind, Widget},
    widgets::Window,
};

/// A window anchored to a point inside another window.
///
/// The popup's position is derived: it is recomputed from the parent
/// window's position and the anchor before every draw and layout, so moving
/// the parent window moves the popup.
#[derive(Debug, Clone)]
pub struct Popup {
    /// Window chrome state.
    window: Window,
    /// Window the popup is anchored to.
    parent_window: NodeId,
    /// Anchor in the parent window's coordinates.
    anchor_pos: Vec2,
    /// Vertical offset of the anchor arrow from the popup's top edge.
    anchor_height: i32,
}

impl Popup {
    /// Construct a popup anchored to `parent_window`.
    pub fn new(parent_window: NodeId) -> Self {
        Self {
            window: Window::new(""),
            parent_window,
            anchor_pos: Vec2::zero(),
            anchor_height: 30,
        }
    }

    /// The window this popup is anchored to.
    pub fn parent_window(&self) -> NodeId {
        self.parent_window
    }

    /// Anchor position in the parent window's coordinates.
    pub fn anchor_pos(&self) -> Vec2 {
        self.anchor_pos
    }

    /// Set the anchor position.
    pub fn set_anchor_pos(&mut self, anchor_pos: Vec2) {
        self.anchor_pos = anchor_pos;
    }

    /// Anchor height.
    pub fn anchor_height(&self) -> i32 {
        self.anchor_height
    }

    /// Set the anchor height.
    pub fn set_anchor_height(&mut self, anchor_height: i32) {
        self.anchor_height = anchor_height;
    }

    /// Builder form of the anchor setters.
    pub fn with_anchor(mut self, anchor_pos: Vec2, anchor_height: i32) -> Self {
        self.anchor_pos = anchor_pos;
        self.anchor_height = anchor_height;
        self
    }
}

impl Widget for Popup {
    fn kind(&self) -> Kind {
        Kind::Popup {
            parent_window: self.parent_window,
        }
    }

    fn as_window(&self) -> Option<&Window> {
        Some(&self.window)
    }

    fn as_window_mut(&mut self) -> Option<&mut Window> {
        Some(&mut self.window)
    }

    fn refresh_relative_placement(&mut self, cx: &mut Cx<'_>) -> Result<()> {
        let pw = self.parent_window;
        if !cx.tree().is_live(pw) {
            cx.node_mut()?.visible = false;
            return Ok(());
        }
        if matches!(cx.tree().node(pw)?.kind(), Kind::Popup { .. }) {
            cx.tree_mut().refresh_relative_placement(pw)?;
        }

        let tree = cx.tree();
        let visible = tree.visible_recursive(pw);
        let anchor = tree.absolute_position(pw) + self.anchor_pos - Vec2::new(0, self.anchor_height);
        let origin = match cx.node()?.parent() {
            Some(parent) => tree.absolute_position(parent),
            None => Vec2::zero(),
        };

        let node = cx.node_mut()?;
        node.visible &= visible;
        node.position = anchor - origin;
        Ok(())
    }

    fn preferred_size(&self, cx: &ViewCx<'_>, ctx: &mut dyn RenderContext) -> Result<Vec2> {
        self.window.preferred_size(cx, ctx)
    }

    fn perform_layout(&mut self, cx: &mut Cx<'_>, ctx: &mut dyn RenderContext) -> Result<()> {
        self.refresh_relative_placement(cx)?;
        let node = cx.node()?;
        if node.layout().is_some() || node.children().len() != 1 {
            return cx.base_perform_layout(ctx);
        }
        let child = node.children()[0];
        let size = node.size();
        let child_node = cx.tree_mut().node_mut(child)?;
        child_node.set_position(Vec2::zero());
        child_node.set_size(size);
        cx.tree_mut().perform_layout(child, ctx)
    }

    fn draw(&self, cx: &ViewCx<'_>, ctx: &mut dyn RenderContext) -> Result<()> {
        let node = cx.node();
        if !node.visible() {
            return Ok(());
        }
        let theme = cx.theme();
        let ds = theme.window_drop_shadow_size as f32;
        let cr = theme.window_corner_radius as f32;
        let pos = node.position().as_f32();
        let size = node.size().as_f32();

        with_saved_state(ctx, |ctx| {
            ctx.begin_path();
            ctx.rect(pos - Vec2F::new(ds, ds), size + Vec2F::new(2. * ds, 2. * ds));
            ctx.fill_color(theme.drop_shadow);
            ctx.fill();

            let base = pos + Vec2F::new(0., self.anchor_height as f32);
            ctx.begin_path();
            ctx.rounded_rect(pos, size, cr);
            ctx.move_to(base + Vec2F::new(-15., 0.));
            ctx.line_to(base + Vec2F::new(1., -15.));
            ctx.line_to(base + Vec2F::new(1., 15.));
            ctx.fill_color(theme.window_popup);
            ctx.fill();
        });

        cx.base_draw(ctx)
    }

    fn mouse_button_event(
        &mut self,
        cx: &mut Cx<'_>,
        p: Vec2,
        button: MouseButton,
        down: bool,
        modifiers: Modifiers,
    ) -> Result<bool> {
        self.window.mouse_button_event(cx, p, button, down, modifiers)
    }
}
