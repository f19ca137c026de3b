use super::Vec2F;

/// An axis-aligned box in float coordinates, as returned by text metrics.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    /// Minimum corner.
    pub min: Vec2F,
    /// Maximum corner.
    pub max: Vec2F,
}

impl Bounds {
    /// Construct bounds from two corners.
    pub fn new(min: Vec2F, max: Vec2F) -> Self {
        Self { min, max }
    }

    /// Extent along the x axis.
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Extent along the y axis.
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Midpoint of the box.
    pub fn center(&self) -> Vec2F {
        Vec2F::new(
            (self.min.x + self.max.x) / 2.,
            (self.min.y + self.max.y) / 2.,
        )
    }
}
