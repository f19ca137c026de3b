use slotmap::new_key_type;

new_key_type! {
    /// Opaque identifier for a node stored in the tree arena.
    ///
    /// Ids are generational: once a node is removed, its id never resolves
    /// again, so holding an id behaves like holding a weak reference.
    pub struct NodeId;
}
