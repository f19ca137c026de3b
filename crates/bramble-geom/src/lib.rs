//! Geometry and colour value types used across bramble.

#![warn(missing_docs)]

/// Float bounding boxes.
mod bounds;
/// RGBA colours.
mod color;
/// Integer vectors.
mod vec2;
/// Float vectors.
mod vec2f;

pub use bounds::Bounds;
pub use color::Color;
pub use vec2::Vec2;
pub use vec2f::Vec2F;
