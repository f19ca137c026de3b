use std::{cell::Cell, rc::Rc};

use bramble::{
    NodeId, Result, Screen,
    backend::{RenderContext, record::Recorder},
    geom::Vec2,
    widgets::{ImagePanel, ImageView, Popup, Window},
};

use crate::stack::Stack;

/// An image known to the gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    /// Backend handle.
    pub handle: i32,
    /// Caption.
    pub name: String,
    /// Pixel size.
    pub size: Vec2,
}

/// A fixed set of images for headless runs.
pub fn sample_images() -> Vec<Image> {
    [
        ("dawn", 160, 120),
        ("harbour", 120, 160),
        ("lichen", 200, 200),
        ("orchard", 240, 135),
        ("quarry", 90, 160),
        ("saltmarsh", 180, 120),
        ("thicket", 128, 128),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (name, w, h))| Image {
        handle: i as i32 + 1,
        name: name.into(),
        size: Vec2::new(w, h),
    })
    .collect()
}

/// Register image sizes with a recorder so that metrics match the images.
pub fn register_images(recorder: &mut Recorder, images: &[Image]) {
    for image in images {
        recorder.register_image(image.handle, image.size);
    }
}

/// Thumbnail columns in the gallery panel.
const COLUMNS: i32 = 4;

/// Node ids of the gallery scene.
#[derive(Debug)]
pub struct Gallery {
    /// Window holding the thumbnail panel.
    pub images: NodeId,
    /// Thumbnail panel.
    pub panel: NodeId,
    /// Window showing the selected image.
    pub viewer: NodeId,
    /// Image view inside the viewer.
    pub view: NodeId,
    /// Preview popup anchored to the images window.
    pub preview: NodeId,
    /// Image view inside the preview.
    pub preview_view: NodeId,
    /// Image handles, by panel index.
    handles: Vec<i32>,
    /// Selection made by the panel since the last sync.
    selected: Rc<Cell<Option<usize>>>,
}

impl Gallery {
    /// Build the scene on a screen and lay it out.
    pub fn build<R: RenderContext>(screen: &mut Screen<R>, images: &[Image]) -> Result<Self> {
        let root = screen.root();
        let handles: Vec<i32> = images.iter().map(|i| i.handle).collect();
        let first = handles.first().copied().unwrap_or_default();
        let selected = Rc::new(Cell::new(None));

        let tree = screen.tree_mut();
        let stack = Rc::new(Stack::default());

        let images_win = tree.add(root, Window::new("Images"))?;
        let node = tree.node_mut(images_win)?;
        node.set_id("images");
        node.set_position(Vec2::new(15, 15));
        node.set_layout(Some(stack.clone()));

        let mut panel = ImagePanel::new().with_images(
            images
                .iter()
                .map(|i| (i.handle, i.name.clone()))
                .collect(),
        );
        let sink = selected.clone();
        panel.set_callback(move |index| sink.set(Some(index)));
        let panel = tree.add(images_win, panel)?;
        // Grid width for a fixed number of columns.
        let width = COLUMNS * 64 + (COLUMNS - 1) * 10 + 20;
        let node = tree.node_mut(panel)?;
        node.set_id("panel");
        node.set_width(width);
        node.set_fixed_width(width);
        node.set_tooltip("Click an image to view it");

        let viewer = tree.add(root, Window::new("Selected image"))?;
        let node = tree.node_mut(viewer)?;
        node.set_id("viewer");
        node.set_position(Vec2::new(400, 15));
        node.set_layout(Some(stack));
        let view = tree.add(viewer, ImageView::new(first))?;
        tree.node_mut(view)?.set_id("view");

        let preview = tree.add(root, Popup::new(images_win))?;
        let node = tree.node_mut(preview)?;
        node.set_id("preview");
        node.set_fixed_size(Vec2::new(96, 96));
        let preview_view = tree.add(preview, ImageView::new(first))?;

        screen.perform_layout()?;
        let right = screen.tree().node(images_win)?.width();
        if let Some(popup) = screen.tree_mut().widget_mut::<Popup>(preview) {
            popup.set_anchor_pos(Vec2::new(right + 15, 60));
        }
        tracing::debug!("gallery built with {} images", handles.len());

        Ok(Self {
            images: images_win,
            panel,
            viewer,
            view,
            preview,
            preview_view,
            handles,
            selected,
        })
    }

    /// Apply a pending panel selection to the image views. Returns whether
    /// anything changed.
    pub fn sync<R: RenderContext>(&self, screen: &mut Screen<R>) -> Result<bool> {
        let Some(index) = self.selected.take() else {
            return Ok(false);
        };
        let Some(&handle) = self.handles.get(index) else {
            return Ok(false);
        };
        for id in [self.view, self.preview_view] {
            if let Some(view) = screen.tree_mut().widget_mut::<ImageView>(id) {
                view.set_image(handle);
            }
        }
        tracing::debug!("selected image {index} (handle {handle})");
        screen.perform_layout()?;
        Ok(true)
    }

    /// Image shown in the viewer.
    pub fn shown<R: RenderContext>(&self, screen: &Screen<R>) -> Option<i32> {
        screen
            .tree()
            .widget::<ImageView>(self.view)
            .map(ImageView::image)
    }
}

#[cfg(test)]
mod tests {
    use bramble::{
        backend::record::DrawOp,
        event::{Action, Modifiers, MouseButton},
    };
    use pretty_assertions::assert_eq;

    use super::*;

    fn setup() -> Result<(Screen<Recorder>, Gallery)> {
        let images = sample_images();
        let mut r = Recorder::new();
        register_images(&mut r, &images);
        let mut s = Screen::new(r, Vec2::new(1024, 768));
        let g = Gallery::build(&mut s, &images)?;
        Ok((s, g))
    }

    #[test]
    fn layout() -> Result<()> {
        let (s, g) = setup()?;
        let t = s.tree();
        // Four columns, two rows of 64 px thumbnails.
        assert_eq!(t.node(g.panel)?.size(), Vec2::new(306, 158));
        assert_eq!(t.node(g.panel)?.position(), Vec2::new(10, 40));
        assert_eq!(t.node(g.images)?.size(), Vec2::new(326, 208));
        assert_eq!(t.node(g.view)?.size(), Vec2::new(160, 120));
        assert_eq!(t.node(g.preview_view)?.size(), Vec2::new(96, 96));
        assert_eq!(t.find_by_id("viewer"), Some(g.viewer));
        Ok(())
    }

    #[test]
    fn click_selects() -> Result<()> {
        let (mut s, g) = setup()?;
        // Second thumbnail: window (15, 15), panel (10, 40), margin 10, step 74.
        s.cursor_pos_callback_event(15. + 10. + 10. + 74. + 5., 15. + 40. + 10. + 5.)?;
        s.mouse_button_callback_event(MouseButton::Left, Action::Press, Modifiers::NONE)?;
        assert!(g.sync(&mut s)?);
        assert_eq!(g.shown(&s), Some(2));
        assert_eq!(s.tree().node(g.view)?.size(), Vec2::new(120, 160));
        assert!(!g.sync(&mut s)?);
        Ok(())
    }

    #[test]
    fn preview_sits_beside_images() -> Result<()> {
        let (mut s, g) = setup()?;
        s.draw_widgets()?;
        // Anchor (326 + 15, 60) less the anchor height, from the window at (15, 15).
        assert_eq!(s.tree().node(g.preview)?.position(), Vec2::new(356, 45));
        assert!(s.context().ops().iter().any(|op| matches!(
            op,
            DrawOp::Image { image: 1, size, .. } if size.x == 96.
        )));
        Ok(())
    }
}
