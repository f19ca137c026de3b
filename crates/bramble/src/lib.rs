//! Bramble: a retained-mode widget tree.
//!
//! Widgets live in an arena owned by a [`Tree`]. Each node carries geometry,
//! flags and a boxed [`Widget`] that supplies behaviour; the tree hit-tests,
//! dispatches pointer input, manages the focus path and drives layout and
//! drawing through an opaque [`RenderContext`](backend::RenderContext).
//!
//! # Quick Start
//!
//! - [`Screen`] - a tree plus a rendering context, fed by platform callbacks
//! - [`Tree`] - the arena and the widget protocol entry points
//! - [`Widget`] - the trait implemented by all widgets
//! - [`Layout`] - pluggable child arrangement
//!
//! # Module Organization
//!
//! - [`geom`] - Geometry and colour value types
//! - [`widgets`] - Built-in windows, popups and image widgets
//! - [`icon`], [`text`] - Icon id and UTF-8 helpers

#![warn(missing_docs)]

// Internal core module - re-export specific items below
mod core;

pub mod icon;
pub mod screen;
pub mod text;
pub mod widget;
pub mod widgets;

pub use bramble_geom as geom;
pub use crate::core::{
    Cx, Node, NodeId, Tree, ViewCx, backend, error, event, focus, layout::Layout, theme,
    windows,
};

pub use error::{Error, Result};
pub use focus::FocusManager;
pub use screen::Screen;
pub use theme::Theme;
pub use widget::{Kind, Widget};
pub use windows::WindowManager;
