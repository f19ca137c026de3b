use std::collections::HashMap;

use super::RenderContext;
use crate::geom::{Bounds, Color, Vec2, Vec2F};

/// A single recorded drawing operation.
///
/// Geometry is recorded in absolute coordinates: the recorder applies the
/// current translation before storing points.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Frame start.
    BeginFrame(Vec2),
    /// Frame end.
    EndFrame,
    /// A filled rectangle or rounded rectangle.
    Fill {
        /// Top-left corner.
        pos: Vec2F,
        /// Extent.
        size: Vec2F,
        /// Fill colour.
        color: Color,
        /// Global alpha at the time of the fill.
        alpha: f32,
    },
    /// A stroked path, identified by its first point.
    Stroke {
        /// Start of the path.
        pos: Vec2F,
        /// Stroke colour.
        color: Color,
    },
    /// Drawn text.
    Text {
        /// Top-left corner.
        pos: Vec2F,
        /// Font size.
        size: f32,
        /// Content.
        text: String,
    },
    /// A blitted image.
    Image {
        /// Image handle.
        image: i32,
        /// Top-left corner.
        pos: Vec2F,
        /// Extent.
        size: Vec2F,
        /// Opacity.
        alpha: f32,
    },
}

/// Saved render state.
#[derive(Debug, Clone, Copy)]
struct State {
    /// Current translation.
    offset: Vec2F,
    /// Current global alpha.
    alpha: f32,
    /// Current font size.
    font_size: f32,
}

impl Default for State {
    fn default() -> Self {
        Self {
            offset: Vec2F::zero(),
            alpha: 1.,
            font_size: 16.,
        }
    }
}

/// A headless rendering context that records what it is asked to draw.
///
/// Metrics are deterministic: each character is half the font size wide and
/// a line is one font size tall. Images report the size they were registered
/// with, or zero.
#[derive(Debug, Default)]
pub struct Recorder {
    /// Recorded operations.
    ops: Vec<DrawOp>,
    /// Live state.
    state: State,
    /// Saved states.
    stack: Vec<State>,
    /// Bounding box of the current path.
    path: Option<(Vec2F, Vec2F)>,
    /// Fill colour.
    fill: Color,
    /// Stroke colour.
    stroke: Color,
    /// Registered image sizes.
    images: HashMap<i32, Vec2>,
}

impl Recorder {
    /// Construct an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the pixel size reported for an image handle.
    pub fn register_image(&mut self, image: i32, size: Vec2) {
        self.images.insert(image, size);
    }

    /// Operations recorded so far.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Drop all recorded operations.
    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// Current translation.
    pub fn offset(&self) -> Vec2F {
        self.state.offset
    }

    /// Number of unmatched `save` calls.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// All recorded text, in draw order.
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Extend the current path's bounding box.
    fn extend_path(&mut self, min: Vec2F, max: Vec2F) {
        let min = min + self.state.offset;
        let max = max + self.state.offset;
        self.path = Some(match self.path {
            None => (min, max),
            Some((a, b)) => (
                Vec2F::new(a.x.min(min.x), a.y.min(min.y)),
                Vec2F::new(b.x.max(max.x), b.y.max(max.y)),
            ),
        });
    }
}

impl RenderContext for Recorder {
    fn begin_frame(&mut self, size: Vec2) {
        self.state = State::default();
        self.stack.clear();
        self.ops.push(DrawOp::BeginFrame(size));
    }

    fn end_frame(&mut self) {
        self.ops.push(DrawOp::EndFrame);
    }

    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(s) = self.stack.pop() {
            self.state = s;
        }
    }

    fn translate(&mut self, offset: Vec2F) {
        self.state.offset = self.state.offset + offset;
    }

    fn global_alpha(&mut self, alpha: f32) {
        self.state.alpha = alpha;
    }

    fn begin_path(&mut self) {
        self.path = None;
    }

    fn rect(&mut self, pos: Vec2F, size: Vec2F) {
        self.extend_path(pos, pos + size);
    }

    fn rounded_rect(&mut self, pos: Vec2F, size: Vec2F, _radius: f32) {
        self.extend_path(pos, pos + size);
    }

    fn move_to(&mut self, p: Vec2F) {
        self.extend_path(p, p);
    }

    fn line_to(&mut self, p: Vec2F) {
        self.extend_path(p, p);
    }

    fn fill_color(&mut self, color: Color) {
        self.fill = color;
    }

    fn fill(&mut self) {
        if let Some((min, max)) = self.path {
            self.ops.push(DrawOp::Fill {
                pos: min,
                size: max - min,
                color: self.fill,
                alpha: self.state.alpha,
            });
        }
    }

    fn stroke_color(&mut self, color: Color) {
        self.stroke = color;
    }

    fn stroke_width(&mut self, _width: f32) {}

    fn stroke(&mut self) {
        if let Some((min, _)) = self.path {
            self.ops.push(DrawOp::Stroke {
                pos: min,
                color: self.stroke,
            });
        }
    }

    fn font_size(&mut self, size: f32) {
        self.state.font_size = size;
    }

    fn font_face(&mut self, _face: &str) {}

    fn text(&mut self, pos: Vec2F, text: &str) {
        self.ops.push(DrawOp::Text {
            pos: pos + self.state.offset,
            size: self.state.font_size,
            text: text.to_string(),
        });
    }

    fn text_bounds(&mut self, pos: Vec2F, text: &str) -> Bounds {
        let fs = self.state.font_size;
        let w = text.chars().count() as f32 * fs / 2.;
        Bounds::new(pos, pos + Vec2F::new(w, fs))
    }

    fn image_size(&mut self, image: i32) -> Vec2 {
        self.images.get(&image).copied().unwrap_or_default()
    }

    fn image(&mut self, image: i32, pos: Vec2F, size: Vec2F, alpha: f32) {
        self.ops.push(DrawOp::Image {
            image,
            pos: pos + self.state.offset,
            size,
            alpha,
        });
    }
}
