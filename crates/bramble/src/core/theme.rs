//! Shared appearance data.

use serde::Deserialize;

use crate::{error::Result, geom::Color};

/// Style values shared by every widget in a tree.
///
/// Themes are handed around as `Rc<Theme>` and are never mutated in place:
/// swapping a widget's theme replaces the pointer, so a traversal that
/// already holds the old value finishes with it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Default font size for widgets without an override.
    pub standard_font_size: i32,
    /// Font size for button labels.
    pub button_font_size: i32,
    /// Font size for text boxes.
    pub text_box_font_size: i32,
    /// Window corner radius.
    pub window_corner_radius: i32,
    /// Height of the window title bar.
    pub window_header_height: i32,
    /// Size of the drop shadow around windows.
    pub window_drop_shadow_size: i32,
    /// Button corner radius.
    pub button_corner_radius: i32,

    /// Drop shadow colour.
    pub drop_shadow: Color,
    /// Fully transparent colour.
    pub transparent: Color,
    /// Dark border.
    pub border_dark: Color,
    /// Light border.
    pub border_light: Color,
    /// Medium border.
    pub border_medium: Color,
    /// Text colour.
    pub text_color: Color,
    /// Disabled text colour.
    pub disabled_text_color: Color,
    /// Text shadow colour.
    pub text_color_shadow: Color,
    /// Icon colour.
    pub icon_color: Color,

    /// Window background without focus.
    pub window_fill_unfocused: Color,
    /// Window background with focus.
    pub window_fill_focused: Color,
    /// Window title without focus.
    pub window_title_unfocused: Color,
    /// Window title with focus.
    pub window_title_focused: Color,
    /// Header gradient top.
    pub window_header_gradient_top: Color,
    /// Header gradient bottom.
    pub window_header_gradient_bot: Color,
    /// Header separator top line.
    pub window_header_sep_top: Color,
    /// Header separator bottom line.
    pub window_header_sep_bot: Color,
    /// Popup background.
    pub window_popup: Color,
    /// Popup background, transparent variant.
    pub window_popup_transparent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        let text = Color::gray(255, 160);
        let border_dark = Color::gray(29, 255);
        let border_light = Color::gray(92, 255);
        Self {
            standard_font_size: 16,
            button_font_size: 20,
            text_box_font_size: 20,
            window_corner_radius: 2,
            window_header_height: 30,
            window_drop_shadow_size: 10,
            button_corner_radius: 2,

            drop_shadow: Color::gray(0, 128),
            transparent: Color::gray(0, 0),
            border_dark,
            border_light,
            border_medium: Color::gray(35, 255),
            text_color: text,
            disabled_text_color: Color::gray(255, 80),
            text_color_shadow: Color::gray(0, 160),
            icon_color: text,

            window_fill_unfocused: Color::gray(43, 230),
            window_fill_focused: Color::gray(45, 230),
            window_title_unfocused: Color::gray(220, 160),
            window_title_focused: Color::gray(255, 190),
            window_header_gradient_top: Color::gray(74, 255),
            window_header_gradient_bot: Color::gray(58, 255),
            window_header_sep_top: border_light,
            window_header_sep_bot: border_dark,
            window_popup: Color::gray(50, 255),
            window_popup_transparent: Color::gray(50, 0),
        }
    }
}

impl Theme {
    /// Load a theme from JSON. Missing fields keep their default values.
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}
