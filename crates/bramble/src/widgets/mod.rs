//! Concrete widgets.

/// Thumbnail grid.
mod image_panel;
/// Single image.
mod image_view;
/// Anchored popup windows.
mod popup;
/// Movable windows.
mod window;

pub use image_panel::{ImageCallback, ImagePanel};
pub use image_view::ImageView;
pub use popup::Popup;
pub use window::Window;
