//! The top of a widget tree: platform input in, frames out.

use std::{
    rc::Rc,
    time::{Duration, Instant},
};

use crate::{
    NodeId,
    backend::{RenderContext, with_saved_state},
    core::{focus::FocusManager, theme::Theme, tree::Tree, windows::WindowManager},
    error::Result,
    event::{Action, Buttons, Modifiers, MouseButton},
    geom::{Color, Vec2, Vec2F},
};

/// Idle time before a tooltip starts to appear.
const TOOLTIP_DELAY: Duration = Duration::from_millis(500);
/// Final opacity of a tooltip.
const TOOLTIP_ALPHA: f32 = 0.8;

/// Called after the screen is resized. Returns whether the event was
/// consumed.
pub type ResizeHook = Box<dyn FnMut(&mut Tree, Vec2) -> bool>;

/// A screen owns a tree and a rendering context, and translates raw platform
/// callbacks into the widget protocol.
///
/// Drag and pointer state live here rather than in the tree, so independent
/// screens never share state.
pub struct Screen<R: RenderContext> {
    /// Widget tree.
    tree: Tree,
    /// Rendering context handed to every draw and layout call.
    ctx: R,
    /// Widget receiving drag events, if a drag is active.
    drag: Option<NodeId>,
    /// Held mouse buttons.
    mouse_state: Buttons,
    /// Active keyboard modifiers.
    modifiers: Modifiers,
    /// Last pointer position, in screen coordinates.
    mouse_pos: Vec2,
    /// Time of the last input event.
    last_interaction: Instant,
    /// Optional resize handler.
    resize_hook: Option<ResizeHook>,
}

impl<R: RenderContext> Screen<R> {
    /// Create a screen of the given size with the default theme.
    pub fn new(ctx: R, size: Vec2) -> Self {
        Self::with_theme(ctx, size, Rc::new(Theme::default()))
    }

    /// Create a screen of the given size with a theme.
    pub fn with_theme(ctx: R, size: Vec2, theme: Rc<Theme>) -> Self {
        let mut tree = Tree::with_theme(theme);
        let root = tree.root();
        if let Ok(node) = tree.node_mut(root) {
            node.set_size(size);
        }
        Self {
            tree,
            ctx,
            drag: None,
            mouse_state: Buttons::NONE,
            modifiers: Modifiers::NONE,
            mouse_pos: Vec2::zero(),
            last_interaction: Instant::now(),
            resize_hook: None,
        }
    }

    /// The widget tree.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// The widget tree, mutably.
    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    /// The rendering context.
    pub fn context(&self) -> &R {
        &self.ctx
    }

    /// The rendering context, mutably.
    pub fn context_mut(&mut self) -> &mut R {
        &mut self.ctx
    }

    /// The tree's root node.
    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    /// Screen size.
    pub fn size(&self) -> Vec2 {
        self.tree
            .node(self.tree.root())
            .map_or(Vec2::zero(), |n| n.size())
    }

    /// Last pointer position.
    pub fn mouse_pos(&self) -> Vec2 {
        self.mouse_pos
    }

    /// Held mouse buttons.
    pub fn mouse_state(&self) -> Buttons {
        self.mouse_state
    }

    /// Active keyboard modifiers.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Time of the last input event.
    pub fn last_interaction(&self) -> Instant {
        self.last_interaction
    }

    /// The current drag target, if it is still alive.
    pub fn drag_target(&self) -> Option<NodeId> {
        self.drag.filter(|id| self.tree.is_live(*id))
    }

    /// The focus path, from the focused leaf up to the root.
    pub fn focus_path(&self) -> &[NodeId] {
        self.tree.focus_path()
    }

    /// Install a resize handler.
    pub fn set_resize_hook(&mut self, hook: impl FnMut(&mut Tree, Vec2) -> bool + 'static) {
        self.resize_hook = Some(Box::new(hook));
    }

    /// Frontmost visible widget under a screen point.
    pub fn find_widget(&self, p: Vec2) -> Option<NodeId> {
        self.tree.find_widget(self.tree.root(), p)
    }

    /// Pointer moved to `(x, y)`.
    ///
    /// An active drag target gets a drag event first, with the point in its
    /// parent's coordinates; if it does not consume it, the motion is
    /// dispatched from the root.
    pub fn cursor_pos_callback_event(&mut self, x: f64, y: f64) -> Result<bool> {
        let p = Vec2::new(x as i32, y as i32);
        let rel = p - self.mouse_pos;
        self.last_interaction = Instant::now();

        let mut consumed = false;
        if let Some(drag) = self.drag_target() {
            let origin = self
                .tree
                .parent(drag)
                .map_or(Vec2::zero(), |parent| self.tree.absolute_position(parent));
            consumed =
                self.tree
                    .mouse_drag_event(drag, p - origin, rel, self.mouse_state, self.modifiers)?;
        }
        if !consumed {
            let root = self.tree.root();
            consumed =
                self.tree
                    .mouse_motion_event(root, p, rel, self.mouse_state, self.modifiers)?;
        }
        self.mouse_pos = p;
        Ok(consumed)
    }

    /// A mouse button changed state.
    pub fn mouse_button_callback_event(
        &mut self,
        button: MouseButton,
        action: Action,
        modifiers: Modifiers,
    ) -> Result<bool> {
        self.modifiers = modifiers;
        self.last_interaction = Instant::now();

        if self.blocked_by_modal() {
            return Ok(false);
        }

        if action == Action::Press {
            self.mouse_state.insert(button);
        } else {
            self.mouse_state.remove(button);
        }

        let root = self.tree.root();
        let target = self.find_widget(self.mouse_pos);
        if let Some(drag) = self.drag_target()
            && action == Action::Release
            && target != Some(drag)
        {
            let origin = self
                .tree
                .parent(drag)
                .map_or(Vec2::zero(), |parent| self.tree.absolute_position(parent));
            self.tree
                .mouse_button_event(drag, self.mouse_pos - origin, button, false, modifiers)?;
        }

        if action == Action::Press && matches!(button, MouseButton::Left | MouseButton::Right) {
            self.drag = target.filter(|id| *id != root);
            match self.drag {
                Some(drag) => tracing::debug!("drag started on {drag:?}"),
                None => self.tree.update_focus(None)?,
            }
        } else if let Some(drag) = self.drag.take() {
            tracing::debug!("drag ended on {drag:?}");
        }

        self.tree.mouse_button_event(
            root,
            self.mouse_pos,
            button,
            action == Action::Press,
            modifiers,
        )
    }

    /// Is a modal window focused while the pointer is outside it?
    fn blocked_by_modal(&self) -> bool {
        let path = self.tree.focus_path();
        let Some(&window) = path.len().checked_sub(2).and_then(|i| path.get(i)) else {
            return false;
        };
        self.tree
            .widget_dyn(window)
            .and_then(|w| w.as_window())
            .is_some_and(|w| w.modal())
            && !self.tree.contains(window, self.mouse_pos)
    }

    /// The platform window was resized.
    pub fn resize_callback_event(&mut self, width: i32, height: i32) -> Result<bool> {
        let size = Vec2::new(width, height);
        let root = self.tree.root();
        self.tree.node_mut(root)?.set_size(size);
        self.last_interaction = Instant::now();
        tracing::debug!("screen resized to {size:?}");
        Ok(match self.resize_hook.as_mut() {
            Some(hook) => hook(&mut self.tree, size),
            None => false,
        })
    }

    /// Lay out the whole tree.
    pub fn perform_layout(&mut self) -> Result<()> {
        let root = self.tree.root();
        self.tree.perform_layout(root, &mut self.ctx)
    }

    /// Draw a frame.
    pub fn draw_widgets(&mut self) -> Result<()> {
        self.draw_widgets_at(Instant::now())
    }

    /// Draw a frame as of `now`, which decides tooltip visibility.
    pub fn draw_widgets_at(&mut self, now: Instant) -> Result<()> {
        self.tree.refresh_placements()?;
        let size = self.size();
        self.ctx.begin_frame(size);
        let root = self.tree.root();
        let mut drawn = self.tree.draw(root, &mut self.ctx);
        if drawn.is_ok() {
            drawn = self.draw_tooltip(now);
        }
        self.ctx.end_frame();
        drawn
    }

    /// Draw the tooltip of the widget under an idle pointer.
    fn draw_tooltip(&mut self, now: Instant) -> Result<()> {
        let idle = now.saturating_duration_since(self.last_interaction);
        if idle <= TOOLTIP_DELAY {
            return Ok(());
        }
        let Some(id) = self.find_widget(self.mouse_pos) else {
            return Ok(());
        };
        let node = self.tree.node(id)?;
        if node.tooltip().is_empty() {
            return Ok(());
        }
        let pos = self.tree.absolute_position(id) + Vec2::new(node.width() / 2, node.height() + 10);
        let pos = pos.as_f32();
        let fade = ((idle - TOOLTIP_DELAY).as_secs_f32() * 2.).min(1.) * TOOLTIP_ALPHA;
        let text = node.tooltip();

        with_saved_state(&mut self.ctx, |ctx| {
            ctx.font_face("sans");
            ctx.font_size(15.);
            let b = ctx.text_bounds(pos, text);
            let h = b.width() / 2.;
            ctx.global_alpha(fade);

            ctx.begin_path();
            ctx.fill_color(Color::gray(0, 255));
            ctx.rounded_rect(
                Vec2F::new(b.min.x - 4. - h, b.min.y - 4.),
                Vec2F::new(b.width() + 8., b.height() + 8.),
                3.,
            );
            let px = b.center().x - h;
            ctx.move_to(Vec2F::new(px, b.min.y - 10.));
            ctx.line_to(Vec2F::new(px + 7., b.min.y + 1.));
            ctx.line_to(Vec2F::new(px - 7., b.min.y + 1.));
            ctx.fill();

            ctx.fill_color(Color::gray(255, 255));
            ctx.text(Vec2F::new(pos.x - h, pos.y), text);
        });
        Ok(())
    }

    /// Focus a widget, or clear focus.
    pub fn update_focus(&mut self, node: Option<NodeId>) -> Result<()> {
        self.tree.update_focus(node)
    }

    /// Raise a window and its popups.
    pub fn move_window_to_front(&mut self, window: NodeId) -> Result<()> {
        self.tree.move_window_to_front(window)
    }

    /// Remove a window, forgetting it as drag target.
    pub fn dispose_window(&mut self, window: NodeId) -> Result<()> {
        if self.drag == Some(window) {
            self.drag = None;
        }
        self.tree.dispose_window(window)
    }

    /// Center a window on the screen.
    pub fn center_window(&mut self, window: NodeId) -> Result<()> {
        self.tree.center_window(window, &mut self.ctx)
    }
}
