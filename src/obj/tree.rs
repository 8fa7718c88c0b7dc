//! Tree operations: insert, remove, reparent, walk.

use std::collections::VecDeque;

use slotmap::{SecondaryMap, SlotMap};

use super::node::{ObjData, ObjId};

/// Empty slice constant for returning when an object has no children.
const EMPTY_CHILDREN: &[ObjId] = &[];

/// The object arena, backed by a slotmap.
///
/// All objects live in a single `SlotMap`. Parent/child relationships are
/// stored in secondary maps so removal is O(subtree size) and lookup is O(1).
/// Parentless objects are screens; the display decides which one is active.
pub struct ObjTree {
    pub(crate) nodes: SlotMap<ObjId, ObjData>,
    children: SecondaryMap<ObjId, Vec<ObjId>>,
    parent: SecondaryMap<ObjId, ObjId>,
}

impl ObjTree {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            children: SecondaryMap::new(),
            parent: SecondaryMap::new(),
        }
    }

    /// Insert a parentless object (a screen).
    pub fn insert(&mut self, data: ObjData) -> ObjId {
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        id
    }

    /// Insert an object as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not exist: creating a child under a destroyed
    /// object is a caller bug, not a recoverable condition.
    pub fn insert_child(&mut self, parent: ObjId, data: ObjData) -> ObjId {
        assert!(
            self.nodes.contains_key(parent),
            "parent object has been destroyed"
        );
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        self.parent.insert(id, parent);
        self.children
            .get_mut(parent)
            .expect("parent must have children vec")
            .push(id);
        id
    }

    /// Collect `id` and all descendants in document (pre-)order without
    /// removing anything. Returns an empty vec for stale ids.
    pub fn collect_subtree(&self, id: ObjId) -> Vec<ObjId> {
        if !self.nodes.contains_key(id) {
            return Vec::new();
        }
        self.walk_depth_first(id)
    }

    /// Remove an object and all its descendants recursively.
    ///
    /// Returns the removed ids in document order (the target first), so the
    /// caller can tear down per-object side tables. Returns an empty vec if
    /// the id was already stale.
    pub fn remove(&mut self, id: ObjId) -> Vec<ObjId> {
        if !self.nodes.contains_key(id) {
            return Vec::new();
        }

        // Detach from the parent's children list.
        if let Some(parent_id) = self.parent.remove(id) {
            if let Some(siblings) = self.children.get_mut(parent_id) {
                siblings.retain(|&child| child != id);
            }
        }

        let removed = self.walk_depth_first(id);
        for &current in &removed {
            self.children.remove(current);
            self.parent.remove(current);
            self.nodes.remove(current);
        }
        removed
    }

    /// Move `obj` to become the last child of `new_parent`, keeping its
    /// subtree intact.
    ///
    /// # Panics
    ///
    /// Panics if either object does not exist, or if the move would make an
    /// object its own ancestor.
    pub fn reparent(&mut self, obj: ObjId, new_parent: ObjId) {
        assert!(self.nodes.contains_key(obj), "object has been destroyed");
        assert!(
            self.nodes.contains_key(new_parent),
            "new parent has been destroyed"
        );
        assert!(
            obj != new_parent && !self.ancestors(new_parent).contains(&obj),
            "cannot reparent an object under its own subtree"
        );

        if let Some(old_parent) = self.parent.remove(obj) {
            if let Some(siblings) = self.children.get_mut(old_parent) {
                siblings.retain(|&child| child != obj);
            }
        }

        self.parent.insert(obj, new_parent);
        self.children
            .get_mut(new_parent)
            .expect("new parent must have children vec")
            .push(obj);
    }

    /// The parent of an object, if it has one.
    pub fn parent(&self, id: ObjId) -> Option<ObjId> {
        self.parent.get(id).copied()
    }

    /// The children of an object. Empty for leaves and stale ids.
    pub fn children(&self, id: ObjId) -> &[ObjId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Ancestors from the immediate parent up to the screen.
    ///
    /// Does not include `id` itself.
    pub fn ancestors(&self, id: ObjId) -> Vec<ObjId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(p) = self.parent.get(current).copied() {
            result.push(p);
            current = p;
        }
        result
    }

    /// The screen (root ancestor) containing `id`, or `id` itself if it is
    /// parentless. `None` for stale ids.
    pub fn screen_of(&self, id: ObjId) -> Option<ObjId> {
        if !self.nodes.contains_key(id) {
            return None;
        }
        Some(self.ancestors(id).last().copied().unwrap_or(id))
    }

    /// Immutable access to an object's data.
    pub fn get(&self, id: ObjId) -> Option<&ObjData> {
        self.nodes.get(id)
    }

    /// Mutable access to an object's data.
    pub fn get_mut(&mut self, id: ObjId) -> Option<&mut ObjData> {
        self.nodes.get_mut(id)
    }

    /// Whether the arena contains an object with the given id.
    pub fn contains(&self, id: ObjId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of live objects.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Pre-order depth-first traversal starting from `start`.
    pub fn walk_depth_first(&self, start: ObjId) -> Vec<ObjId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            // Push children in reverse so the first child is visited first.
            for &child in self.children(current).iter().rev() {
                stack.push(child);
            }
        }
        result
    }

    /// Breadth-first traversal starting from `start`.
    pub fn walk_breadth_first(&self, start: ObjId) -> Vec<ObjId> {
        let mut result = Vec::new();
        let mut queue = VecDeque::new();
        queue.push_back(start);
        while let Some(current) = queue.pop_front() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            for &child in self.children(current) {
                queue.push_back(child);
            }
        }
        result
    }
}

impl Default for ObjTree {
    fn default() -> Self {
        Self::new()
    }
}
