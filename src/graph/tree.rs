use serde::Serialize;

use crate::{math::compensated_sum, CostMatrix, Error, Result};

/// A rooted tree over the nodes `0..n`, stored as one parent pointer per node.
///
/// The root is its own parent. A node with no parent is unattached:
/// it was never reached by whatever grew the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParentMap {
    root: usize,
    parents: Vec<Option<usize>>,
}

impl ParentMap {
    /// Validate a parent map built elsewhere.
    ///
    /// Cycles that do not pass through the root are not detected here,
    /// their nodes simply stay out of reach of any walk from the root.
    pub fn new(root: usize, parents: Vec<Option<usize>>) -> Result<Self> {
        let len = parents.len();
        if root >= len {
            return Err(Error::RootOutOfRange { root, len });
        }
        if parents[root] != Some(root) {
            return Err(Error::InvalidParentMap(format!(
                "root {root} must be its own parent, found {:?}",
                parents[root]
            )));
        }
        for (node, parent) in parents.iter().enumerate() {
            match *parent {
                Some(parent) if parent >= len => {
                    return Err(Error::InvalidParentMap(format!(
                        "node {node} has parent {parent} outside of 0..{len}"
                    )))
                }
                Some(parent) if parent == node && node != root => {
                    return Err(Error::InvalidParentMap(format!(
                        "node {node} is its own parent but the root is {root}"
                    )))
                }
                _ => {}
            }
        }
        Ok(Self { root, parents })
    }

    /// Start a tree containing only `root` out of `len` nodes.
    pub(crate) fn seed(root: usize, len: usize) -> Self {
        let mut parents = vec![None; len];
        parents[root] = Some(root);
        Self { root, parents }
    }

    pub(crate) fn attach(&mut self, node: usize, parent: usize) {
        debug_assert!(self.parents[node].is_none(), "{node} attached twice");
        self.parents[node] = Some(parent);
    }

    /// Fail with [Error::Disconnected] unless every node is attached.
    pub(crate) fn into_spanning(self) -> Result<Self> {
        let unreached = self.unattached().collect::<Vec<_>>();
        if unreached.is_empty() {
            Ok(self)
        } else {
            Err(Error::Disconnected {
                root: self.root,
                unreached,
            })
        }
    }

    pub fn root(&self) -> usize {
        self.root
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    pub fn parent(&self, node: usize) -> Option<usize> {
        self.parents[node]
    }

    pub fn is_attached(&self, node: usize) -> bool {
        self.parents[node].is_some()
    }

    pub fn parents(&self) -> &[Option<usize>] {
        &self.parents
    }

    pub fn unattached(&self) -> impl Iterator<Item = usize> + '_ {
        self.parents
            .iter()
            .enumerate()
            .filter(|(_, parent)| parent.is_none())
            .map(|(node, _)| node)
    }

    pub fn is_spanning(&self) -> bool {
        self.parents.iter().all(Option::is_some)
    }

    /// Children of every node, each list in increasing index order.
    pub fn children(&self) -> Vec<Vec<usize>> {
        let mut children = vec![vec![]; self.len()];
        for (node, parent) in self.parents.iter().enumerate() {
            match parent {
                Some(parent) if node != self.root => children[*parent].push(node),
                _ => {}
            }
        }
        children
    }

    /// Edges as `(parent, child)` pairs, in child index order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.parents
            .iter()
            .enumerate()
            .filter(|(node, _)| *node != self.root)
            .filter_map(|(node, parent)| parent.map(|parent| (parent, node)))
    }

    /// Total cost of the tree edges
    pub fn weight(&self, matrix: &CostMatrix) -> f64 {
        compensated_sum(self.edges().map(|(parent, node)| matrix[(parent, node)]))
    }

    /// Cost of the tree path from the root down to `node`, or [None] if `node` is unattached.
    ///
    /// Walks parent pointers, so it assumes the map is acyclic.
    pub fn path_cost(&self, matrix: &CostMatrix, node: usize) -> Option<f64> {
        let mut costs = vec![];
        let mut current = node;
        while current != self.root {
            let parent = self.parents[current]?;
            costs.push(matrix[(parent, current)]);
            current = parent;
        }
        Some(compensated_sum(costs.into_iter().rev()))
    }
}
