//! Tree data structures for the search agents
//!
//! Nodes live in a contiguous arena and refer to each other by [`NodeId`].
//! A node's parent is an index, so re-rooting is a matter of clearing the
//! new root's parent and compacting the arena down to the reachable part.

use std::collections::{BTreeMap, VecDeque};
use std::fmt::Write;

use crate::game_state::Cell;

/// Index of a node inside a [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Represents a node in the search tree
///
/// Every variant shares this single node type. RAVE statistics stay at
/// zero for the variants that never update them.
#[derive(Debug, Clone, Default)]
pub struct Node {
    /// The move that led here from the parent (None for root)
    pub action: Option<Cell>,

    /// Parent node (None for root)
    pub parent: Option<NodeId>,

    /// Times this position was visited (N)
    pub visits: u32,

    /// Cumulative reward for the player who moved into this node (Q)
    pub reward: f64,

    /// Rollouts in which this node's move appeared for the mover (N_RAVE)
    pub rave_visits: u32,

    /// Cumulative AMAF reward (Q_RAVE)
    pub rave_reward: f64,

    /// Children keyed by move
    pub children: BTreeMap<Cell, NodeId>,
}

impl Node {
    /// Creates an unvisited node
    pub fn new(action: Option<Cell>, parent: Option<NodeId>) -> Self {
        Node {
            action,
            parent,
            ..Default::default()
        }
    }

    /// Returns the average reward of this node
    pub fn mean(&self) -> f64 {
        crate::utils::exploitation_term(self.reward, self.visits)
    }

    /// Returns the AMAF estimate, zero before any RAVE update
    pub fn amaf(&self) -> f64 {
        crate::utils::exploitation_term(self.rave_reward, self.rave_visits)
    }

    /// Returns true if this node has no children
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Arena-backed search tree
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// Creates a tree holding a single unvisited root
    pub fn new() -> Self {
        Tree {
            nodes: vec![Node::new(None, None)],
            root: NodeId(0),
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// Number of slots in the arena, which after re-rooting equals the
    /// number of reachable nodes.
    pub fn arena_len(&self) -> usize {
        self.nodes.len()
    }

    /// Child of `parent` reached by `action`
    pub fn child(&self, parent: NodeId, action: Cell) -> Option<NodeId> {
        self.get(parent).children.get(&action).copied()
    }

    /// Attaches one unvisited child per move
    pub fn add_children(&mut self, parent: NodeId, moves: &[Cell]) {
        for &action in moves {
            let id = NodeId(self.nodes.len() as u32);
            self.nodes.push(Node::new(Some(action), Some(parent)));
            self.get_mut(parent).children.insert(action, id);
        }
    }

    /// Makes `new_root` the root, keeping its subtree and dropping the rest.
    pub fn reroot(&mut self, new_root: NodeId) {
        let mut nodes = Vec::new();
        let mut queue = VecDeque::new();

        let mut root = self.get(new_root).clone();
        root.parent = None;
        queue.push_back((new_root, NodeId(0)));
        nodes.push(root);

        while let Some((old_id, new_id)) = queue.pop_front() {
            let children: Vec<(Cell, NodeId)> = self
                .get(old_id)
                .children
                .iter()
                .map(|(&c, &id)| (c, id))
                .collect();
            let mut remapped = BTreeMap::new();
            for (action, old_child) in children {
                let child_id = NodeId(nodes.len() as u32);
                let mut child = self.get(old_child).clone();
                child.parent = Some(new_id);
                nodes.push(child);
                remapped.insert(action, child_id);
                queue.push_back((old_child, child_id));
            }
            nodes[new_id.index()].children = remapped;
        }

        self.nodes = nodes;
        self.root = NodeId(0);
    }

    /// Counts the nodes reachable from the root, breadth first
    pub fn size(&self) -> usize {
        let mut count = 0;
        let mut queue = VecDeque::from([self.root]);
        while let Some(id) = queue.pop_front() {
            count += 1;
            queue.extend(self.get(id).children.values().copied());
        }
        count
    }

    /// Depth of `id` below the root
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.get(id).parent;
        while let Some(parent) = current {
            depth += 1;
            current = self.get(parent).parent;
        }
        depth
    }

    /// Renders visited nodes down to `max_depth` as an indented listing
    pub fn visualize(&self, max_depth: usize) -> String {
        let mut output = String::new();
        self.visualize_node(self.root, 0, max_depth, &mut output);
        output
    }

    fn visualize_node(&self, id: NodeId, depth: usize, max_depth: usize, output: &mut String) {
        let node = self.get(id);
        let action = match node.action {
            Some(cell) => cell.to_string(),
            None => "root".to_string(),
        };
        let _ = writeln!(
            output,
            "{}{} (N: {}, Q: {:.3}, N_RAVE: {}, Q_RAVE: {:.3})",
            "  ".repeat(depth),
            action,
            node.visits,
            node.reward,
            node.rave_visits,
            node.rave_reward
        );

        if depth >= max_depth {
            return;
        }
        for &child in node.children.values() {
            if self.get(child).visits > 0 {
                self.visualize_node(child, depth + 1, max_depth, output);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(n: usize) -> Vec<Cell> {
        (0..n).map(|i| Cell::new(0, i)).collect()
    }

    #[test]
    fn add_children_links_both_ways() {
        let mut tree = Tree::new();
        let root = tree.root();
        tree.add_children(root, &cells(3));
        assert_eq!(tree.size(), 4);
        let child = tree.child(root, Cell::new(0, 1)).unwrap();
        assert_eq!(tree.get(child).parent, Some(root));
        assert_eq!(tree.get(child).action, Some(Cell::new(0, 1)));
        assert_eq!(tree.depth(child), 1);
    }

    #[test]
    fn reroot_keeps_subtree_and_prunes_siblings() {
        let mut tree = Tree::new();
        let root = tree.root();
        tree.add_children(root, &cells(3));
        let keep = tree.child(root, Cell::new(0, 2)).unwrap();
        tree.add_children(keep, &[Cell::new(1, 0), Cell::new(1, 1)]);
        tree.get_mut(keep).visits = 9;
        tree.get_mut(keep).reward = 4.0;
        let grandchild = tree.child(keep, Cell::new(1, 1)).unwrap();
        tree.get_mut(grandchild).visits = 3;

        tree.reroot(keep);

        let new_root = tree.root();
        assert_eq!(tree.get(new_root).parent, None);
        assert_eq!(tree.get(new_root).visits, 9);
        assert_eq!(tree.get(new_root).reward, 4.0);
        assert_eq!(tree.size(), 3);
        assert_eq!(tree.arena_len(), 3);
        let moved = tree.child(new_root, Cell::new(1, 1)).unwrap();
        assert_eq!(tree.get(moved).visits, 3);
        assert_eq!(tree.get(moved).parent, Some(new_root));
    }

    #[test]
    fn visualize_lists_visited_nodes_only() {
        let mut tree = Tree::new();
        let root = tree.root();
        tree.add_children(root, &cells(2));
        let child = tree.child(root, Cell::new(0, 0)).unwrap();
        tree.get_mut(child).visits = 1;
        let text = tree.visualize(1);
        assert!(text.starts_with("root"));
        assert!(text.contains("a1 (N: 1"));
        assert!(!text.contains("b1"));
    }
}
