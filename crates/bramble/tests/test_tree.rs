//! Integration tests for tree structure, hit-testing and layout.

mod common;

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use bramble::{
        Cx, Error, Layout, Result, Tree, ViewCx, backend::RenderContext,
        backend::record::Recorder, geom::Vec2,
    };
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::common::{Probe, log, place};

    /// Stacks children vertically with a gap, sizing each to its preferred
    /// size.
    struct Column {
        /// Gap between children.
        gap: i32,
    }

    impl Layout for Column {
        fn preferred_size(&self, cx: &ViewCx<'_>, ctx: &mut dyn RenderContext) -> Result<Vec2> {
            let tree = cx.tree();
            let mut size = Vec2::zero();
            for (i, &child) in cx.node().children().iter().enumerate() {
                let pref = tree.preferred_size(child, ctx)?;
                size.x = size.x.max(pref.x);
                size.y += pref.y + if i > 0 { self.gap } else { 0 };
            }
            Ok(size)
        }

        fn perform_layout(&self, cx: &mut Cx<'_>, ctx: &mut dyn RenderContext) -> Result<()> {
            let mut y = 0;
            for child in cx.node()?.children().to_vec() {
                let tree = cx.tree_mut();
                let pref = tree.preferred_size(child, ctx)?;
                let node = tree.node_mut(child)?;
                node.set_position(Vec2::new(0, y));
                node.set_size(pref);
                y += pref.y + self.gap;
                tree.perform_layout(child, ctx)?;
            }
            Ok(())
        }
    }

    #[test]
    fn add_then_remove_by_value_and_index() -> Result<()> {
        let l = log();
        let mut t = Tree::new();
        let root = t.root();
        let ids = (0..5)
            .map(|_| t.add(root, Probe::new("p", &l)))
            .collect::<Result<Vec<_>>>()?;
        for id in &ids {
            assert_eq!(t.parent(*id), Some(root));
            assert_eq!(t.children(root)?.iter().filter(|c| *c == id).count(), 1);
        }

        t.remove_child(root, ids[1])?;
        t.remove_child_at(root, 0)?;
        assert_eq!(t.children(root)?, &ids[2..]);
        assert!(!t.is_live(ids[0]));
        assert!(!t.is_live(ids[1]));
        assert_eq!(
            t.remove_child_at(root, 3),
            Err(Error::ChildIndexOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(t.children(root)?, &ids[2..]);
        Ok(())
    }

    #[test]
    fn contains_edges() -> Result<()> {
        let l = log();
        let mut t = Tree::new();
        let root = t.root();
        let id = place(&mut t, root, Probe::new("p", &l), (0, 0), (10, 10))?;
        assert!(t.contains(id, Vec2::new(0, 0)));
        assert!(t.contains(id, Vec2::new(9, 9)));
        assert!(!t.contains(id, Vec2::new(10, 10)));
        assert!(!t.contains(id, Vec2::new(10, 0)));
        assert!(!t.contains(id, Vec2::new(-1, 5)));
        Ok(())
    }

    #[test]
    fn find_widget_prefers_topmost() -> Result<()> {
        let l = log();
        let mut t = Tree::new();
        let root = t.root();
        t.node_mut(root)?.set_size(Vec2::new(200, 200));
        let below = place(&mut t, root, Probe::new("below", &l), (0, 0), (50, 50))?;
        let above = place(&mut t, root, Probe::new("above", &l), (25, 25), (50, 50))?;

        assert_eq!(t.find_widget(root, Vec2::new(30, 30)), Some(above));
        assert_eq!(t.find_widget(root, Vec2::new(10, 10)), Some(below));
        assert_eq!(t.find_widget(root, Vec2::new(150, 150)), Some(root));
        assert_eq!(t.find_widget(root, Vec2::new(500, 500)), None);

        t.node_mut(above)?.set_visible(false);
        assert_eq!(t.find_widget(root, Vec2::new(30, 30)), Some(below));
        Ok(())
    }

    #[test]
    fn find_widget_nested_offsets() -> Result<()> {
        let l = log();
        let mut t = Tree::new();
        let root = t.root();
        t.node_mut(root)?.set_size(Vec2::new(400, 400));
        let outer = place(&mut t, root, Probe::new("outer", &l), (100, 100), (100, 100))?;
        let inner = place(&mut t, outer, Probe::new("inner", &l), (10, 10), (20, 20))?;

        assert_eq!(t.find_widget(root, Vec2::new(115, 115)), Some(inner));
        assert_eq!(t.find_widget(root, Vec2::new(105, 105)), Some(outer));
        // The inner bounds alone, without the outer offset, hit nothing inside.
        assert_eq!(t.find_widget(root, Vec2::new(15, 15)), Some(root));
        assert_eq!(t.absolute_position(inner), Vec2::new(110, 110));
        Ok(())
    }

    #[test]
    fn default_layout_uses_fixed_then_preferred() -> Result<()> {
        let l = log();
        let mut t = Tree::new();
        let root = t.root();
        let parent = t.add(root, Probe::new("parent", &l))?;
        let a = t.add(parent, Probe::new("a", &l).preferring(Vec2::new(30, 20)))?;
        let b = t.add(parent, Probe::new("b", &l).preferring(Vec2::new(40, 15)))?;
        t.node_mut(a)?.set_fixed_size(Vec2::new(50, 0));

        let mut r = Recorder::new();
        t.perform_layout(parent, &mut r)?;
        assert_eq!(t.node(a)?.size(), Vec2::new(50, 20));
        assert_eq!(t.node(b)?.size(), Vec2::new(40, 15));
        Ok(())
    }

    #[test]
    fn preferred_size_without_layout_is_current_size() -> Result<()> {
        let l = log();
        let mut t = Tree::new();
        let root = t.root();
        let id = place(&mut t, root, Probe::new("p", &l), (0, 0), (33, 44))?;
        let mut r = Recorder::new();
        assert_eq!(t.preferred_size(id, &mut r)?, Vec2::new(33, 44));
        Ok(())
    }

    #[test]
    fn layout_delegation() -> Result<()> {
        let l = log();
        let mut t = Tree::new();
        let root = t.root();
        let column: Rc<dyn Layout> = Rc::new(Column { gap: 5 });

        let panel = t.add(root, Probe::new("panel", &l))?;
        t.node_mut(panel)?.set_layout(Some(column.clone()));
        let a = t.add(panel, Probe::new("a", &l).preferring(Vec2::new(30, 10)))?;
        let b = t.add(panel, Probe::new("b", &l).preferring(Vec2::new(60, 20)))?;

        let other = t.add(root, Probe::new("other", &l))?;
        t.node_mut(other)?.set_layout(Some(column.clone()));
        assert_eq!(Rc::strong_count(&column), 3);

        let mut r = Recorder::new();
        assert_eq!(t.preferred_size(panel, &mut r)?, Vec2::new(60, 35));
        t.perform_layout(root, &mut r)?;
        assert_eq!(t.node(panel)?.size(), Vec2::new(60, 35));
        assert_eq!(t.node(a)?.position(), Vec2::new(0, 0));
        assert_eq!(t.node(b)?.position(), Vec2::new(0, 15));
        assert_eq!(t.node(b)?.size(), Vec2::new(60, 20));

        t.remove_child(root, other)?;
        assert_eq!(Rc::strong_count(&column), 2);
        Ok(())
    }

    proptest! {
        #[test]
        fn contains_matches_half_open_bounds(
            px in -50i32..50, py in -50i32..50,
            w in 0i32..40, h in 0i32..40,
            x in -100i32..100, y in -100i32..100,
        ) {
            let l = log();
            let mut t = Tree::new();
            let root = t.root();
            let id = place(&mut t, root, Probe::new("p", &l), (px, py), (w, h)).unwrap();
            let expected = px <= x && x < px + w && py <= y && y < py + h;
            prop_assert_eq!(t.contains(id, Vec2::new(x, y)), expected);
        }

        #[test]
        fn membership_survives_removals(n in 1usize..12, removals in prop::collection::vec(0usize..12, 0..12)) {
            let l = log();
            let mut t = Tree::new();
            let root = t.root();
            let mut expected = Vec::new();
            for _ in 0..n {
                expected.push(t.add(root, Probe::new("p", &l)).unwrap());
            }
            for index in removals {
                let res = t.remove_child_at(root, index);
                if index < expected.len() {
                    prop_assert!(res.is_ok());
                    let gone = expected.remove(index);
                    prop_assert!(!t.is_live(gone));
                } else {
                    prop_assert_eq!(
                        res,
                        Err(Error::ChildIndexOutOfRange { index, len: expected.len() })
                    );
                }
                prop_assert_eq!(t.children(root).unwrap(), expected.as_slice());
            }
            for id in &expected {
                prop_assert_eq!(t.parent(*id), Some(root));
            }
            prop_assert_eq!(t.node_count(), expected.len() + 1);
        }
    }
}
