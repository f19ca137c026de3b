use crate::{
    backend::{RenderContext, with_saved_state},
    core::{
        context::{Cx, ViewCx},
        windows::{WindowManager, center_widget},
    },
    error::Result,
    event::{Buttons, Modifiers, MouseButton},
    geom::{Vec2, Vec2F},
    widget::{Kind, Widget},
};

/// Font used for window titles.
const TITLE_FACE: &str = "sans-bold";
/// Font size used for window titles.
const TITLE_SIZE: f32 = 18.;

/// A movable top-level window with a title bar.
#[derive(Debug, Clone, Default)]
pub struct Window {
    /// Title shown in the header. An empty title draws no header.
    title: String,
    /// Modal windows swallow clicks outside themselves.
    modal: bool,
    /// Is a header drag in progress?
    drag: bool,
}

impl Window {
    /// Construct a window with a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Window title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Set the window title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Is the window modal?
    pub fn modal(&self) -> bool {
        self.modal
    }

    /// Set the modal flag.
    pub fn set_modal(&mut self, modal: bool) {
        self.modal = modal;
    }

    /// Builder form of `set_modal`.
    pub fn with_modal(mut self, modal: bool) -> Self {
        self.modal = modal;
        self
    }

    /// Is a header drag in progress?
    pub fn dragging(&self) -> bool {
        self.drag
    }

    /// Remove this window from its screen. Call from the window's own
    /// handler; the widget is dropped when the handler returns.
    pub fn dispose(&self, cx: &mut Cx<'_>) -> Result<()> {
        let id = cx.id();
        cx.tree_mut().dispose_window(id)
    }

    /// Center this window in its parent from within its own handler.
    pub fn center(&mut self, cx: &mut Cx<'_>, ctx: &mut dyn RenderContext) -> Result<()> {
        center_widget(self, cx, ctx)
    }

    /// Measure the title with the header font.
    fn title_size(&self, ctx: &mut dyn RenderContext) -> Vec2F {
        with_saved_state(ctx, |ctx| {
            ctx.font_size(TITLE_SIZE);
            ctx.font_face(TITLE_FACE);
            let b = ctx.text_bounds(Vec2F::zero(), &self.title);
            Vec2F::new(b.width(), b.height())
        })
    }
}

impl Widget for Window {
    fn kind(&self) -> Kind {
        Kind::Window
    }

    fn as_window(&self) -> Option<&Window> {
        Some(self)
    }

    fn as_window_mut(&mut self) -> Option<&mut Window> {
        Some(self)
    }

    fn preferred_size(&self, cx: &ViewCx<'_>, ctx: &mut dyn RenderContext) -> Result<Vec2> {
        let base = cx.base_preferred_size(ctx)?;
        let title = self.title_size(ctx);
        Ok(base.max(Vec2::new(title.x as i32 + 20, title.y as i32)))
    }

    fn draw(&self, cx: &ViewCx<'_>, ctx: &mut dyn RenderContext) -> Result<()> {
        let node = cx.node();
        let theme = cx.theme();
        let ds = theme.window_drop_shadow_size as f32;
        let cr = theme.window_corner_radius as f32;
        let hh = theme.window_header_height as f32;
        let pos = node.position.as_f32();
        let size = node.size.as_f32();

        with_saved_state(ctx, |ctx| {
            ctx.begin_path();
            ctx.rect(pos - Vec2F::new(ds, ds), size + Vec2F::new(2. * ds, 2. * ds));
            ctx.fill_color(theme.drop_shadow);
            ctx.fill();

            ctx.begin_path();
            ctx.rounded_rect(pos, size, cr);
            ctx.fill_color(if node.mouse_focus {
                theme.window_fill_focused
            } else {
                theme.window_fill_unfocused
            });
            ctx.fill();

            if self.title.is_empty() {
                return;
            }
            ctx.begin_path();
            ctx.rounded_rect(pos, Vec2F::new(size.x, hh), cr);
            ctx.fill_color(theme.window_header_gradient_top);
            ctx.fill();
            ctx.stroke_color(theme.window_header_sep_top);
            ctx.stroke();

            ctx.begin_path();
            ctx.move_to(pos + Vec2F::new(0.5, hh - 1.5));
            ctx.line_to(pos + Vec2F::new(size.x - 0.5, hh - 1.5));
            ctx.stroke_color(theme.window_header_sep_bot);
            ctx.stroke();

            ctx.font_size(TITLE_SIZE);
            ctx.font_face(TITLE_FACE);
            let b = ctx.text_bounds(Vec2F::zero(), &self.title);
            let at = pos + Vec2F::new((size.x - b.width()) / 2., (hh - b.height()) / 2.);
            ctx.fill_color(theme.drop_shadow);
            ctx.text(at, &self.title);
            ctx.fill_color(if node.focused {
                theme.window_title_focused
            } else {
                theme.window_title_unfocused
            });
            ctx.text(at, &self.title);
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
        if cx.base_mouse_button_event(p, button, down, modifiers)? {
            return Ok(true);
        }
        if button != MouseButton::Left {
            return Ok(false);
        }
        let header = cx.theme().window_header_height;
        let pos = cx.node()?.position;
        self.drag = down && (p.y - pos.y) < header;
        if self.drag {
            tracing::debug!("header drag started on {:?}", cx.id());
        }
        Ok(true)
    }

    fn mouse_drag_event(
        &mut self,
        cx: &mut Cx<'_>,
        _p: Vec2,
        rel: Vec2,
        buttons: Buttons,
        _modifiers: Modifiers,
    ) -> Result<bool> {
        if !self.drag || !buttons.contains(MouseButton::Left) {
            return Ok(false);
        }
        let parent_size = match cx.node()?.parent {
            Some(parent) => cx.tree().node(parent)?.size,
            None => Vec2::zero(),
        };
        let node = cx.node_mut()?;
        node.position = (node.position + rel)
            .max(Vec2::zero())
            .min(parent_size - node.size);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{backend::record::Recorder, core::tree::Tree};

    /// Window of 200x100 at (50, 50) on an 800x600 root.
    fn setup() -> Result<(Tree, crate::NodeId)> {
        let mut t = Tree::new();
        let root = t.root();
        t.node_mut(root)?.set_size(Vec2::new(800, 600));
        let w = t.add(root, Window::new("Title"))?;
        let node = t.node_mut(w)?;
        node.set_position(Vec2::new(50, 50));
        node.set_size(Vec2::new(200, 100));
        Ok((t, w))
    }

    #[test]
    fn header_press_arms_drag() -> Result<()> {
        let (mut t, w) = setup()?;
        let m = Modifiers::NONE;
        // Header band is 30 px tall.
        assert!(t.mouse_button_event(w, Vec2::new(60, 60), MouseButton::Left, true, m)?);
        assert!(t.widget::<Window>(w).is_some_and(Window::dragging));

        assert!(t.mouse_drag_event(w, Vec2::zero(), Vec2::new(5, 7), MouseButton::Left.into(), m)?);
        assert_eq!(t.node(w)?.position(), Vec2::new(55, 57));

        assert!(t.mouse_button_event(w, Vec2::new(60, 60), MouseButton::Left, false, m)?);
        assert!(!t.widget::<Window>(w).is_some_and(Window::dragging));
        assert!(!t.mouse_drag_event(w, Vec2::zero(), Vec2::new(5, 7), MouseButton::Left.into(), m)?);
        Ok(())
    }

    #[test]
    fn body_press_does_not_drag() -> Result<()> {
        let (mut t, w) = setup()?;
        let m = Modifiers::NONE;
        assert!(t.mouse_button_event(w, Vec2::new(60, 120), MouseButton::Left, true, m)?);
        assert!(!t.widget::<Window>(w).is_some_and(Window::dragging));
        // Secondary buttons are not consumed.
        assert!(!t.mouse_button_event(w, Vec2::new(60, 60), MouseButton::Right, true, m)?);
        Ok(())
    }

    #[test]
    fn drag_is_clamped() -> Result<()> {
        let (mut t, w) = setup()?;
        let m = Modifiers::NONE;
        t.mouse_button_event(w, Vec2::new(60, 60), MouseButton::Left, true, m)?;
        t.mouse_drag_event(w, Vec2::zero(), Vec2::new(-500, -500), MouseButton::Left.into(), m)?;
        assert_eq!(t.node(w)?.position(), Vec2::zero());
        t.mouse_drag_event(w, Vec2::zero(), Vec2::new(5000, 5000), MouseButton::Left.into(), m)?;
        assert_eq!(t.node(w)?.position(), Vec2::new(600, 500));
        Ok(())
    }

    #[test]
    fn draws_title() -> Result<()> {
        let (t, w) = setup()?;
        let mut r = Recorder::new();
        t.draw(w, &mut r)?;
        assert_eq!(r.texts(), vec!["Title", "Title"]);
        assert_eq!(r.depth(), 0);
        Ok(())
    }
}
