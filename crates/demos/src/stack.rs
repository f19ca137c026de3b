use bramble::{
    Cx, Kind, Layout, NodeId, Result, Tree, ViewCx, backend::RenderContext, geom::Vec2,
};

/// Stacks visible children top to bottom. Inside a window the stack starts
/// below the title bar.
#[derive(Debug, Clone, Copy)]
pub struct Stack {
    /// Border around the stack.
    margin: i32,
    /// Gap between children.
    spacing: i32,
}

impl Default for Stack {
    fn default() -> Self {
        Self {
            margin: 10,
            spacing: 6,
        }
    }
}

impl Stack {
    /// Construct a stack with a margin and spacing.
    pub fn new(margin: i32, spacing: i32) -> Self {
        Self { margin, spacing }
    }

    /// Offset of the first child from the top of the node.
    fn top(&self, tree: &Tree, id: NodeId) -> Result<i32> {
        let header = match tree.node(id)?.kind() {
            Kind::Window => tree.theme(id).window_header_height,
            _ => 0,
        };
        Ok(header + self.margin)
    }

    /// Size a child gets: its fixed size where set, else its preferred size.
    fn child_size(tree: &Tree, child: NodeId, ctx: &mut dyn RenderContext) -> Result<Vec2> {
        let pref = tree.preferred_size(child, ctx)?;
        let fixed = tree.node(child)?.fixed_size();
        Ok(Vec2::new(
            if fixed.x != 0 { fixed.x } else { pref.x },
            if fixed.y != 0 { fixed.y } else { pref.y },
        ))
    }
}

impl Layout for Stack {
    fn preferred_size(&self, cx: &ViewCx<'_>, ctx: &mut dyn RenderContext) -> Result<Vec2> {
        let tree = cx.tree();
        let mut size = Vec2::new(0, self.top(tree, cx.id())?);
        let mut first = true;
        for &child in cx.node().children() {
            if !tree.node(child)?.visible() {
                continue;
            }
            let s = Self::child_size(tree, child, ctx)?;
            if !first {
                size.y += self.spacing;
            }
            first = false;
            size.x = size.x.max(s.x);
            size.y += s.y;
        }
        Ok(size + Vec2::new(2 * self.margin, self.margin))
    }

    fn perform_layout(&self, cx: &mut Cx<'_>, ctx: &mut dyn RenderContext) -> Result<()> {
        let id = cx.id();
        let mut y = self.top(cx.tree(), id)?;
        for child in cx.node()?.children().to_vec() {
            let tree = cx.tree_mut();
            if !tree.node(child)?.visible() {
                continue;
            }
            let size = Self::child_size(tree, child, ctx)?;
            let node = tree.node_mut(child)?;
            node.set_position(Vec2::new(self.margin, y));
            node.set_size(size);
            y += size.y + self.spacing;
            tree.perform_layout(child, ctx)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use bramble::{Widget, backend::record::Recorder, widgets::Window};
    use pretty_assertions::assert_eq;

    use super::*;

    /// Leaf with a fixed preferred size.
    struct Block(Vec2);

    impl Widget for Block {
        fn preferred_size(&self, _cx: &ViewCx<'_>, _ctx: &mut dyn RenderContext) -> Result<Vec2> {
            Ok(self.0)
        }
    }

    #[test]
    fn stacks_below_header() -> Result<()> {
        let mut t = Tree::new();
        let root = t.root();
        let w = t.add(root, Window::new("Stack"))?;
        t.node_mut(w)?.set_layout(Some(Rc::new(Stack::new(10, 5))));
        let a = t.add(w, Block(Vec2::new(100, 20)))?;
        let b = t.add(w, Block(Vec2::new(60, 40)))?;
        let hidden = t.add(w, Block(Vec2::new(500, 500)))?;
        t.node_mut(hidden)?.set_visible(false);

        let mut r = Recorder::new();
        // Header 30, margins 10, children 20 + 5 + 40.
        assert_eq!(t.preferred_size(w, &mut r)?, Vec2::new(120, 115));

        t.perform_layout(root, &mut r)?;
        assert_eq!(t.node(w)?.size(), Vec2::new(120, 115));
        assert_eq!(t.node(a)?.position(), Vec2::new(10, 40));
        assert_eq!(t.node(b)?.position(), Vec2::new(10, 65));
        assert_eq!(t.node(b)?.size(), Vec2::new(60, 40));
        Ok(())
    }

    #[test]
    fn fixed_sizes_win() -> Result<()> {
        let mut t = Tree::new();
        let root = t.root();
        let panel = t.add(root, Block(Vec2::zero()))?;
        t.node_mut(panel)?.set_layout(Some(Rc::new(Stack::new(0, 0))));
        let a = t.add(panel, Block(Vec2::new(100, 20)))?;
        t.node_mut(a)?.set_fixed_width(30);

        let mut r = Recorder::new();
        t.perform_layout(panel, &mut r)?;
        assert_eq!(t.node(a)?.size(), Vec2::new(30, 20));
        Ok(())
    }
}
