use std::rc::Rc;

use crate::{
    core::{id::NodeId, layout::Layout, theme::Theme},
    geom::Vec2,
    widget::{Kind, Widget},
};

/// Core node data stored in the arena.
pub struct Node {
    /// Widget behaviour and state. `None` while the widget's handler runs.
    pub(crate) widget: Option<Box<dyn Widget>>,
    /// Structural role captured from the widget at creation.
    pub(crate) kind: Kind,

    /// Parent in the arena tree.
    pub(crate) parent: Option<NodeId>,
    /// Children in the arena tree, back to front.
    pub(crate) children: Vec<NodeId>,

    /// Shared appearance. `None` until inherited from a parent.
    pub(crate) theme: Option<Rc<Theme>>,
    /// Shared layout strategy.
    pub(crate) layout: Option<Rc<dyn Layout>>,

    /// Top-left corner in the parent's coordinate space.
    pub(crate) position: Vec2,
    /// Current size.
    pub(crate) size: Vec2,
    /// Per-axis fixed size. Zero means unconstrained.
    pub(crate) fixed_size: Vec2,

    /// Visibility flag.
    pub(crate) visible: bool,
    /// Enabled flag.
    pub(crate) enabled: bool,
    /// Keyboard focus flag.
    pub(crate) focused: bool,
    /// Pointer-over flag.
    pub(crate) mouse_focus: bool,

    /// Free-form identifier used by `Tree::find_by_id`.
    pub(crate) id: String,
    /// Tooltip text. Empty means no tooltip.
    pub(crate) tooltip: String,
    /// Explicit font size.
    pub(crate) font_size: Option<i32>,
}

impl Node {
    /// Construct a detached node holding a widget.
    pub(crate) fn new(widget: Box<dyn Widget>) -> Self {
        Self {
            kind: widget.kind(),
            widget: Some(widget),
            parent: None,
            children: Vec::new(),
            theme: None,
            layout: None,
            position: Vec2::zero(),
            size: Vec2::zero(),
            fixed_size: Vec2::zero(),
            visible: true,
            enabled: true,
            focused: false,
            mouse_focus: false,
            id: String::new(),
            tooltip: String::new(),
            font_size: None,
        }
    }

    /// Return the node's structural kind.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Return the node's parent, if any.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Return the node's children, back to front.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Is the widget available, or checked out by a running handler?
    pub fn is_idle(&self) -> bool {
        self.widget.is_some()
    }

    /// The node's own theme, if one has been set or inherited.
    pub fn theme(&self) -> Option<&Rc<Theme>> {
        self.theme.as_ref()
    }

    /// Replace the node's theme.
    pub fn set_theme(&mut self, theme: Rc<Theme>) {
        self.theme = Some(theme);
    }

    /// The node's layout strategy.
    pub fn layout(&self) -> Option<&Rc<dyn Layout>> {
        self.layout.as_ref()
    }

    /// Replace or clear the node's layout strategy.
    pub fn set_layout(&mut self, layout: Option<Rc<dyn Layout>>) {
        self.layout = layout;
    }

    /// Position relative to the parent.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Set the position relative to the parent.
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Current size.
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Set the current size.
    pub fn set_size(&mut self, size: Vec2) {
        self.size = size;
    }

    /// Current width.
    pub fn width(&self) -> i32 {
        self.size.x
    }

    /// Set the current width.
    pub fn set_width(&mut self, width: i32) {
        self.size.x = width;
    }

    /// Current height.
    pub fn height(&self) -> i32 {
        self.size.y
    }

    /// Set the current height.
    pub fn set_height(&mut self, height: i32) {
        self.size.y = height;
    }

    /// Fixed size. A zero component leaves that axis to the layout.
    pub fn fixed_size(&self) -> Vec2 {
        self.fixed_size
    }

    /// Set the fixed size.
    pub fn set_fixed_size(&mut self, size: Vec2) {
        self.fixed_size = size;
    }

    /// Set the fixed width.
    pub fn set_fixed_width(&mut self, width: i32) {
        self.fixed_size.x = width;
    }

    /// Set the fixed height.
    pub fn set_fixed_height(&mut self, height: i32) {
        self.fixed_size.y = height;
    }

    /// Own visibility flag. See `Tree::visible_recursive` for the effective value.
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Set the visibility flag.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Enabled flag.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Set the enabled flag.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Keyboard focus flag.
    pub fn focused(&self) -> bool {
        self.focused
    }

    /// Set the focus flag directly, without a focus event.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Is the pointer over the widget?
    pub fn mouse_focus(&self) -> bool {
        self.mouse_focus
    }

    /// Identifier string.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Set the identifier string.
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// Tooltip text.
    pub fn tooltip(&self) -> &str {
        &self.tooltip
    }

    /// Set the tooltip text.
    pub fn set_tooltip(&mut self, tooltip: impl Into<String>) {
        self.tooltip = tooltip.into();
    }

    /// Explicit font size, if any.
    pub fn has_font_size(&self) -> bool {
        self.font_size.is_some()
    }

    /// Set or clear the explicit font size.
    pub fn set_font_size(&mut self, size: Option<i32>) {
        self.font_size = size;
    }
}
