use crate::{
    backend::RenderContext,
    core::context::{Cx, ViewCx},
    error::Result,
    geom::Vec2,
};

/// A strategy that sizes and places a widget's children.
///
/// Layouts are shared between widgets through `Rc`, so they hold no per-widget
/// state: everything they need comes through the context.
pub trait Layout {
    /// The size the widget wants given its children.
    fn preferred_size(&self, cx: &ViewCx<'_>, ctx: &mut dyn RenderContext) -> Result<Vec2>;

    /// Assign positions and sizes to the widget's children.
    fn perform_layout(&self, cx: &mut Cx<'_>, ctx: &mut dyn RenderContext) -> Result<()>;
}
