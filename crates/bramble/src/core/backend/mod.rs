/// Headless recording backend.
pub mod record;

use scopeguard::guard;

use crate::geom::{Bounds, Color, Vec2, Vec2F};

/// The drawing context a tree renders into.
///
/// The tree never inspects the context: it passes the same handle through
/// every draw, measure and layout call. Any vector backend with a stateful
/// transform, text metrics, path fill/stroke and image blits can implement
/// it.
pub trait RenderContext {
    /// Begin a frame of the given size.
    fn begin_frame(&mut self, _size: Vec2) {}

    /// Finish the current frame.
    fn end_frame(&mut self) {}

    /// Push the current render state.
    fn save(&mut self);

    /// Pop the render state pushed by the matching `save`.
    fn restore(&mut self);

    /// Translate the coordinate origin.
    fn translate(&mut self, offset: Vec2F);

    /// Set the global alpha applied to subsequent drawing.
    fn global_alpha(&mut self, alpha: f32);

    /// Start a new path.
    fn begin_path(&mut self);

    /// Add a rectangle to the path.
    fn rect(&mut self, pos: Vec2F, size: Vec2F);

    /// Add a rounded rectangle to the path.
    fn rounded_rect(&mut self, pos: Vec2F, size: Vec2F, radius: f32);

    /// Start a new sub-path at `p`.
    fn move_to(&mut self, p: Vec2F);

    /// Add a line segment to `p`.
    fn line_to(&mut self, p: Vec2F);

    /// Set the fill colour.
    fn fill_color(&mut self, color: Color);

    /// Fill the current path.
    fn fill(&mut self);

    /// Set the stroke colour.
    fn stroke_color(&mut self, color: Color);

    /// Set the stroke width.
    fn stroke_width(&mut self, width: f32);

    /// Stroke the current path.
    fn stroke(&mut self);

    /// Set the font size for text calls.
    fn font_size(&mut self, size: f32);

    /// Set the font face for text calls.
    fn font_face(&mut self, face: &str);

    /// Draw text with its top-left corner at `pos`.
    fn text(&mut self, pos: Vec2F, text: &str);

    /// Measure text placed at `pos` with the current font settings.
    fn text_bounds(&mut self, pos: Vec2F, text: &str) -> Bounds;

    /// Pixel size of an image handle.
    fn image_size(&mut self, image: i32) -> Vec2;

    /// Blit an image scaled into the given box.
    fn image(&mut self, image: i32, pos: Vec2F, size: Vec2F, alpha: f32);
}

/// Run `f` with the origin translated by `offset`.
///
/// The inverse translation is applied when `f` returns, when it returns an
/// error, and when it unwinds.
pub fn with_translation<R>(
    ctx: &mut dyn RenderContext,
    offset: Vec2F,
    f: impl FnOnce(&mut dyn RenderContext) -> R,
) -> R {
    ctx.translate(offset);
    let mut ctx = guard(ctx, move |ctx| ctx.translate(-offset));
    f(&mut **ctx)
}

/// Run `f` between a `save` and its matching `restore`.
pub fn with_saved_state<R>(
    ctx: &mut dyn RenderContext,
    f: impl FnOnce(&mut dyn RenderContext) -> R,
) -> R {
    ctx.save();
    let mut ctx = guard(ctx, |ctx| ctx.restore());
    f(&mut **ctx)
}
