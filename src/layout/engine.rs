//! TaffyTree wrapper for layout computation.
//!
//! [`LayoutEngine`] mirrors one screen's subtree into a taffy layout tree,
//! runs the flex/grid computation, and reports results back in screen
//! coordinates.

use std::collections::HashMap;

use taffy::prelude::*;

use crate::geometry::Rect;
use crate::obj::{ObjId, ObjTree};
use crate::style::sheet::StyleRegistry;

use super::resolve::{container_layout, resolve_node_style};

/// Wraps a [`TaffyTree`] and maintains a mapping from object ids to taffy
/// node ids. Provides methods to sync, compute, and query layout.
pub struct LayoutEngine {
    /// The taffy tree, parameterized with our ObjId as context data.
    tree: TaffyTree<ObjId>,
    /// Maps ObjId -> taffy NodeId for quick lookup.
    node_map: HashMap<ObjId, taffy::prelude::NodeId>,
    /// The taffy root node, if a layout has been synced.
    root: Option<taffy::prelude::NodeId>,
}

impl LayoutEngine {
    /// Create a new, empty layout engine.
    pub fn new() -> Self {
        Self {
            tree: TaffyTree::new(),
            node_map: HashMap::new(),
            root: None,
        }
    }

    /// Synchronize the taffy tree with one screen's subtree.
    ///
    /// Walks the subtree depth-first from `root`, creating or updating taffy
    /// nodes to match. Stale taffy nodes (objects that no longer exist or
    /// left the subtree) are removed, and taffy parent/child relationships
    /// are rebuilt to mirror the object tree. Every object's taffy style is
    /// re-resolved through the style table on each sync.
    pub fn sync_tree(&mut self, objs: &ObjTree, registry: &StyleRegistry, root: ObjId) {
        if !objs.contains(root) {
            self.clear();
            return;
        }

        let live_nodes = objs.walk_depth_first(root);
        let live_set: std::collections::HashSet<ObjId> = live_nodes.iter().copied().collect();

        // Remove stale taffy nodes.
        let stale_keys: Vec<ObjId> = self
            .node_map
            .keys()
            .filter(|k| !live_set.contains(k))
            .copied()
            .collect();
        for key in stale_keys {
            if let Some(taffy_id) = self.node_map.remove(&key) {
                let _ = self.tree.remove(taffy_id);
            }
        }

        // Create or update taffy nodes for all live objects.
        for &obj_id in &live_nodes {
            let Some(data) = objs.get(obj_id) else {
                continue;
            };
            let parent_layout = objs
                .parent(obj_id)
                .and_then(|p| objs.get(p))
                .map(|p| container_layout(p, registry));
            let taffy_style = resolve_node_style(data, registry, parent_layout);

            if let Some(&taffy_id) = self.node_map.get(&obj_id) {
                let _ = self.tree.set_style(taffy_id, taffy_style);
            } else {
                let taffy_id = self
                    .tree
                    .new_leaf_with_context(taffy_style, obj_id)
                    .expect("taffy node creation should not fail");
                self.node_map.insert(obj_id, taffy_id);
            }
        }

        // Rebuild parent-child relationships in taffy to match the tree.
        for &obj_id in &live_nodes {
            let taffy_children: Vec<taffy::prelude::NodeId> = objs
                .children(obj_id)
                .iter()
                .filter_map(|child| self.node_map.get(child).copied())
                .collect();
            if let Some(&taffy_id) = self.node_map.get(&obj_id) {
                let _ = self.tree.set_children(taffy_id, &taffy_children);
            }
        }

        self.root = self.node_map.get(&root).copied();
    }

    /// Run taffy layout computation on the root node.
    ///
    /// `available_width` and `available_height` define the available space,
    /// typically the display resolution in pixels.
    pub fn compute(&mut self, available_width: f32, available_height: f32) {
        if let Some(root) = self.root {
            let _ = self.tree.compute_layout(
                root,
                taffy::geometry::Size {
                    width: AvailableSpace::Definite(available_width),
                    height: AvailableSpace::Definite(available_height),
                },
            );
        }
    }

    /// The layout result of one object, relative to its parent.
    ///
    /// Returns `None` if the object is not in the layout tree. Taffy's f32
    /// coordinates are rounded to the nearest integer pixel.
    pub fn relative_rect(&self, id: ObjId) -> Option<Rect> {
        let taffy_id = self.node_map.get(&id)?;
        let layout = self.tree.layout(*taffy_id).ok()?;
        Some(Rect {
            x: layout.location.x.round() as i32,
            y: layout.location.y.round() as i32,
            width: layout.size.width.round() as i32,
            height: layout.size.height.round() as i32,
        })
    }

    /// Layout results for the whole subtree in screen coordinates.
    ///
    /// Each object's position is accumulated down from the root, so the
    /// returned rects are absolute within the screen.
    pub fn absolute_rects(&self, objs: &ObjTree, root: ObjId) -> HashMap<ObjId, Rect> {
        let mut result = HashMap::new();
        let mut stack: Vec<(ObjId, i32, i32)> = vec![(root, 0, 0)];
        while let Some((id, ox, oy)) = stack.pop() {
            let Some(rel) = self.relative_rect(id) else {
                continue;
            };
            let abs = rel.translated(ox, oy);
            for &child in objs.children(id) {
                stack.push((child, abs.x, abs.y));
            }
            result.insert(id, abs);
        }
        result
    }

    /// Clear all state, removing all taffy nodes and mappings.
    fn clear(&mut self) {
        let keys: Vec<_> = self.node_map.drain().map(|(_, v)| v).collect();
        for taffy_id in keys {
            let _ = self.tree.remove(taffy_id);
        }
        self.root = None;
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}
