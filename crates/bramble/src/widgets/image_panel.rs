use crate::{
    backend::RenderContext,
    core::context::{Cx, ViewCx},
    error::Result,
    event::{Buttons, Modifiers, MouseButton},
    geom::{Color, Vec2, Vec2F},
    widget::Widget,
};

/// Selection callback, called with the index of the chosen image.
pub type ImageCallback = Box<dyn FnMut(usize)>;

/// A grid of image thumbnails.
pub struct ImagePanel {
    /// Image handles and captions.
    images: Vec<(i32, String)>,
    /// Called when an image is pressed.
    callback: Option<ImageCallback>,
    /// Edge length of a thumbnail.
    thumb_size: i32,
    /// Gap between thumbnails.
    spacing: i32,
    /// Border around the grid.
    margin: i32,
    /// Grid cell under the pointer.
    mouse_index: Option<usize>,
}

impl Default for ImagePanel {
    fn default() -> Self {
        Self {
            images: Vec::new(),
            callback: None,
            thumb_size: 64,
            spacing: 10,
            margin: 10,
            mouse_index: None,
        }
    }
}

impl ImagePanel {
    /// Construct an empty panel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the images.
    pub fn set_images(&mut self, images: Vec<(i32, String)>) {
        self.images = images;
    }

    /// Builder form of `set_images`.
    pub fn with_images(mut self, images: Vec<(i32, String)>) -> Self {
        self.images = images;
        self
    }

    /// Images shown by the panel.
    pub fn images(&self) -> &[(i32, String)] {
        &self.images
    }

    /// Set the selection callback.
    pub fn set_callback(&mut self, callback: impl FnMut(usize) + 'static) {
        self.callback = Some(Box::new(callback));
    }

    /// Grid cell under the pointer, if the pointer is over a thumbnail.
    pub fn mouse_index(&self) -> Option<usize> {
        self.mouse_index
    }

    /// Columns and rows of the grid for a panel of the given width.
    pub fn grid_size(&self, width: i32) -> Vec2 {
        let n = self.images.len() as i32;
        let cols = 1 + ((width - 2 * self.margin - self.thumb_size) / self.step()).max(0);
        let rows = (n + cols - 1) / cols;
        Vec2::new(cols, rows)
    }

    /// Grid cell under `local`, a point relative to the panel's corner.
    /// Points in the spacing between thumbnails hit nothing.
    pub fn index_for_position(&self, local: Vec2, width: i32) -> Option<usize> {
        let step = self.step() as f32;
        let px = (local.x - self.margin) as f32 / step;
        let py = (local.y - self.margin) as f32 / step;
        let region = self.thumb_size as f32 / step;
        if px - px.floor() >= region || py - py.floor() >= region {
            return None;
        }
        let cell = Vec2::new(px.floor() as i32, py.floor() as i32);
        let grid = self.grid_size(width);
        if cell.x < 0 || cell.y < 0 || cell.x >= grid.x || cell.y >= grid.y {
            return None;
        }
        usize::try_from(cell.x + cell.y * grid.x).ok()
    }

    /// Distance between the corners of adjacent thumbnails.
    fn step(&self) -> i32 {
        self.thumb_size + self.spacing
    }
}

impl Widget for ImagePanel {
    fn preferred_size(&self, cx: &ViewCx<'_>, _ctx: &mut dyn RenderContext) -> Result<Vec2> {
        let grid = self.grid_size(cx.node().width());
        let extent = |n: i32| n * self.thumb_size + (n - 1) * self.spacing + 2 * self.margin;
        Ok(Vec2::new(extent(grid.x), extent(grid.y)))
    }

    fn draw(&self, cx: &ViewCx<'_>, ctx: &mut dyn RenderContext) -> Result<()> {
        let node = cx.node();
        let cols = self.grid_size(node.width()).x;
        let thumb = self.thumb_size as f32;
        for (i, (image, _)) in self.images.iter().enumerate() {
            let cell = Vec2::new(i as i32 % cols, i as i32 / cols);
            let p = (node.position() + Vec2::splat(self.margin) + cell * self.step()).as_f32();

            let img = ctx.image_size(*image).as_f32();
            let (offset, extent) = if img.x <= 0. || img.y <= 0. {
                (Vec2F::zero(), Vec2F::new(thumb, thumb))
            } else if img.x < img.y {
                let h = thumb * img.y / img.x;
                (Vec2F::new(0., -(h - thumb) / 2.), Vec2F::new(thumb, h))
            } else {
                let w = thumb * img.x / img.y;
                (Vec2F::new(-(w - thumb) / 2., 0.), Vec2F::new(w, thumb))
            };
            let alpha = if self.mouse_index == Some(i) { 1. } else { 0.7 };
            ctx.image(*image, p + offset, extent, alpha);

            ctx.begin_path();
            ctx.rounded_rect(p + Vec2F::new(0.5, 0.5), Vec2F::new(thumb - 1., thumb - 1.), 3.5);
            ctx.stroke_width(1.);
            ctx.stroke_color(Color::gray(255, 80));
            ctx.stroke();
        }
        Ok(())
    }

    fn mouse_motion_event(
        &mut self,
        cx: &mut Cx<'_>,
        p: Vec2,
        _rel: Vec2,
        _buttons: Buttons,
        _modifiers: Modifiers,
    ) -> Result<bool> {
        let node = cx.node()?;
        self.mouse_index = self.index_for_position(p - node.position(), node.width());
        Ok(true)
    }

    fn mouse_button_event(
        &mut self,
        cx: &mut Cx<'_>,
        p: Vec2,
        _button: MouseButton,
        down: bool,
        _modifiers: Modifiers,
    ) -> Result<bool> {
        let node = cx.node()?;
        let index = self.index_for_position(p - node.position(), node.width());
        if let Some(index) = index
            && index < self.images.len()
            && down
            && let Some(callback) = self.callback.as_mut()
        {
            callback(index);
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        backend::record::{DrawOp, Recorder},
        core::tree::Tree,
    };

    /// Three images on a panel wide enough for two columns.
    fn panel() -> ImagePanel {
        ImagePanel::new().with_images(vec![
            (1, "a".into()),
            (2, "b".into()),
            (3, "c".into()),
        ])
    }

    #[test]
    fn grid() {
        let p = panel();
        // 10 + 64 + 10 + 64 + 10 = 158 fits two columns.
        assert_eq!(p.grid_size(158), Vec2::new(2, 2));
        assert_eq!(p.grid_size(157), Vec2::new(1, 3));
        assert_eq!(p.grid_size(0), Vec2::new(1, 3));
    }

    #[test]
    fn hit_cells() {
        let p = panel();
        assert_eq!(p.index_for_position(Vec2::new(10, 10), 158), Some(0));
        assert_eq!(p.index_for_position(Vec2::new(73, 73), 158), Some(0));
        // Spacing between thumbnails.
        assert_eq!(p.index_for_position(Vec2::new(80, 10), 158), None);
        assert_eq!(p.index_for_position(Vec2::new(84, 10), 158), Some(1));
        assert_eq!(p.index_for_position(Vec2::new(10, 84), 158), Some(2));
        // Cell (1, 1) exists in the grid but holds no image.
        assert_eq!(p.index_for_position(Vec2::new(84, 84), 158), Some(3));
        // Margin and outside the grid.
        assert_eq!(p.index_for_position(Vec2::new(5, 5), 158), None);
        assert_eq!(p.index_for_position(Vec2::new(10, 300), 158), None);
    }

    #[test]
    fn preferred() -> Result<()> {
        let mut t = Tree::new();
        let root = t.root();
        let id = t.add(root, panel())?;
        t.node_mut(id)?.set_width(158);
        let mut r = Recorder::new();
        assert_eq!(t.preferred_size(id, &mut r)?, Vec2::new(158, 158));
        Ok(())
    }

    #[test]
    fn selection() -> Result<()> {
        let picked = Rc::new(RefCell::new(Vec::new()));
        let mut p = panel();
        let sink = picked.clone();
        p.set_callback(move |i| sink.borrow_mut().push(i));

        let mut t = Tree::new();
        let root = t.root();
        let id = t.add(root, p)?;
        let node = t.node_mut(id)?;
        node.set_position(Vec2::new(100, 0));
        node.set_size(Vec2::new(158, 158));

        let m = Modifiers::NONE;
        assert!(t.mouse_button_event(id, Vec2::new(194, 20), MouseButton::Left, true, m)?);
        // Release and empty cells do not select.
        assert!(t.mouse_button_event(id, Vec2::new(194, 20), MouseButton::Left, false, m)?);
        assert!(t.mouse_button_event(id, Vec2::new(194, 94), MouseButton::Left, true, m)?);
        assert_eq!(*picked.borrow(), vec![1]);

        assert!(t.mouse_motion_event(id, Vec2::new(110, 94), Vec2::zero(), Buttons::NONE, m)?);
        assert_eq!(t.widget::<ImagePanel>(id).and_then(ImagePanel::mouse_index), Some(2));
        Ok(())
    }

    #[test]
    fn draw_fits_images() -> Result<()> {
        let mut t = Tree::new();
        let root = t.root();
        let id = t.add(root, ImagePanel::new().with_images(vec![(7, "wide".into())]))?;
        let mut r = Recorder::new();
        r.register_image(7, Vec2::new(128, 64));
        t.draw(id, &mut r)?;
        assert_eq!(
            r.ops().first(),
            Some(&DrawOp::Image {
                image: 7,
                pos: Vec2F::new(-22., 10.),
                size: Vec2F::new(128., 64.),
                alpha: 0.7,
            })
        );
        Ok(())
    }
}
