use crate::{
    backend::RenderContext,
    core::context::ViewCx,
    error::Result,
    geom::Vec2,
    widget::Widget,
};

/// Shows a single image stretched over the widget's bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageView {
    /// Image handle.
    image: i32,
}

impl ImageView {
    /// Construct a view of an image handle.
    pub fn new(image: i32) -> Self {
        Self { image }
    }

    /// Image handle.
    pub fn image(&self) -> i32 {
        self.image
    }

    /// Replace the image handle.
    pub fn set_image(&mut self, image: i32) {
        self.image = image;
    }
}

impl Widget for ImageView {
    fn preferred_size(&self, _cx: &ViewCx<'_>, ctx: &mut dyn RenderContext) -> Result<Vec2> {
        Ok(ctx.image_size(self.image))
    }

    fn draw(&self, cx: &ViewCx<'_>, ctx: &mut dyn RenderContext) -> Result<()> {
        let node = cx.node();
        ctx.image(
            self.image,
            node.position().as_f32(),
            node.size().as_f32(),
            1.,
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        backend::record::{DrawOp, Recorder},
        core::tree::Tree,
        geom::Vec2F,
    };

    #[test]
    fn sized_by_image() -> Result<()> {
        let mut t = Tree::new();
        let root = t.root();
        let id = t.add(root, ImageView::new(4))?;
        let mut r = Recorder::new();
        r.register_image(4, Vec2::new(32, 24));
        t.perform_layout(root, &mut r)?;
        assert_eq!(t.node(id)?.size(), Vec2::new(32, 24));

        t.node_mut(id)?.set_position(Vec2::new(5, 6));
        t.draw(root, &mut r)?;
        assert_eq!(
            r.ops(),
            &[DrawOp::Image {
                image: 4,
                pos: Vec2F::new(5., 6.),
                size: Vec2F::new(32., 24.),
                alpha: 1.,
            }]
        );
        Ok(())
    }
}
