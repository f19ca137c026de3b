//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::{cell::RefCell, rc::Rc};

use bramble::{
    Cx, NodeId, Result, Tree, ViewCx, Widget,
    backend::RenderContext,
    event::{Buttons, Modifiers, MouseButton},
    geom::Vec2,
};

/// An event observed by a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seen {
    /// Enter (`true`) or leave (`false`), with the point in parent coordinates.
    Enter(bool),
    /// Button press or release at a point in parent coordinates.
    Button {
        /// Point passed to the handler.
        p: Vec2,
        /// Press or release.
        down: bool,
    },
    /// Pointer motion.
    Motion(Vec2),
    /// Drag motion.
    Drag(Vec2),
    /// Focus gained or lost.
    Focus(bool),
}

/// Event log shared between probes.
pub type Log = Rc<RefCell<Vec<(&'static str, Seen)>>>;

/// Create an empty log.
pub fn log() -> Log {
    Rc::default()
}

/// Events seen by one probe, in order.
pub fn seen(log: &Log, name: &str) -> Vec<Seen> {
    log.borrow()
        .iter()
        .filter(|(n, _)| *n == name)
        .map(|(_, s)| *s)
        .collect()
}

/// A widget that records the events it receives.
pub struct Probe {
    /// Name used in the log.
    name: &'static str,
    /// Shared log.
    log: Log,
    /// Consume button events not consumed by children.
    consume: bool,
    /// Preferred size reported without a layout.
    preferred: Option<Vec2>,
}

impl Probe {
    /// A probe that never consumes.
    pub fn new(name: &'static str, log: &Log) -> Self {
        Self {
            name,
            log: log.clone(),
            consume: false,
            preferred: None,
        }
    }

    /// A probe that consumes button and drag events.
    pub fn consuming(mut self) -> Self {
        self.consume = true;
        self
    }

    /// A probe with a fixed preferred size.
    pub fn preferring(mut self, size: Vec2) -> Self {
        self.preferred = Some(size);
        self
    }

    /// Record an event.
    fn push(&self, seen: Seen) {
        self.log.borrow_mut().push((self.name, seen));
    }
}

impl Widget for Probe {
    fn preferred_size(&self, cx: &ViewCx<'_>, ctx: &mut dyn RenderContext) -> Result<Vec2> {
        match self.preferred {
            Some(size) => Ok(size),
            None => cx.base_preferred_size(ctx),
        }
    }

    fn mouse_button_event(
        &mut self,
        cx: &mut Cx<'_>,
        p: Vec2,
        button: MouseButton,
        down: bool,
        modifiers: Modifiers,
    ) -> Result<bool> {
        if cx.base_mouse_button_event(p, button, down, modifiers)? {
            return Ok(true);
        }
        self.push(Seen::Button { p, down });
        Ok(self.consume)
    }

    fn mouse_motion_event(
        &mut self,
        cx: &mut Cx<'_>,
        p: Vec2,
        rel: Vec2,
        buttons: Buttons,
        modifiers: Modifiers,
    ) -> Result<bool> {
        self.push(Seen::Motion(p));
        cx.base_mouse_motion_event(p, rel, buttons, modifiers)
    }

    fn mouse_enter_event(&mut self, cx: &mut Cx<'_>, p: Vec2, enter: bool) -> Result<bool> {
        self.push(Seen::Enter(enter));
        cx.base_mouse_enter_event(p, enter)
    }

    fn mouse_drag_event(
        &mut self,
        _cx: &mut Cx<'_>,
        _p: Vec2,
        rel: Vec2,
        _buttons: Buttons,
        _modifiers: Modifiers,
    ) -> Result<bool> {
        self.push(Seen::Drag(rel));
        Ok(self.consume)
    }

    fn focus_event(&mut self, cx: &mut Cx<'_>, focused: bool) -> Result<bool> {
        self.push(Seen::Focus(focused));
        cx.base_focus_event(focused)
    }
}

/// Add a widget with a position and size.
pub fn place(
    tree: &mut Tree,
    parent: NodeId,
    widget: impl Widget,
    pos: (i32, i32),
    size: (i32, i32),
) -> Result<NodeId> {
    let id = tree.add(parent, widget)?;
    let node = tree.node_mut(id)?;
    node.set_position(pos.into());
    node.set_size(size.into());
    Ok(id)
}
