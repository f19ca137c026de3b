//! Demonstration scenes for bramble.

/// Image gallery scene.
pub mod gallery;
/// Scripted pointer sessions.
pub mod script;
/// A vertical stacking layout for windows.
pub mod stack;
