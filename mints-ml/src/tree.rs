//! Regression tree
//!
//! A tree is checked once when it is loaded: every child index must point
//! forward to an existing node, and every split must name a real column.
//! That makes traversal a walk that always terminates, so prediction itself
//! only fails on bad input.

use serde::{Deserialize, Serialize};

use crate::{
    node::{Step, TreeNode},
    FeatureRow, MlError, MlResult, FEATURE_COUNT,
};

/// Flat array of nodes, root at index 0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegressionTree {
    nodes: Vec<TreeNode>,
}

impl RegressionTree {
    /// Build a tree, rejecting malformed node graphs
    ///
    /// `index` is only used to label errors.
    pub fn new(nodes: Vec<TreeNode>, index: usize) -> MlResult<Self> {
        let tree = Self { nodes };
        tree.validate(index)?;
        Ok(tree)
    }

    /// Check child references and split columns
    pub fn validate(&self, index: usize) -> MlResult<()> {
        if self.nodes.is_empty() {
            return Err(MlError::MalformedTree { tree: index, node: 0 });
        }

        for (i, node) in self.nodes.iter().enumerate() {
            if let TreeNode::Split { feature, threshold, left, right } = *node {
                let forward = |child: usize| child > i && child < self.nodes.len();
                if feature >= FEATURE_COUNT || threshold.is_nan() || !forward(left) || !forward(right) {
                    return Err(MlError::MalformedTree { tree: index, node: i });
                }
            }
        }
        Ok(())
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Leaf value for a row; `tree` is this tree's position in its ensemble
    pub fn predict(&self, tree: usize, row: &FeatureRow) -> MlResult<f64> {
        let mut node = 0;
        // Children always point forward, so this visits at most len() nodes
        for _ in 0..self.nodes.len() {
            let current = self
                .nodes
                .get(node)
                .ok_or(MlError::MalformedTree { tree, node })?;
            match current.step(row)? {
                Step::Next(next) => node = next,
                Step::Done(value) => return Ok(value),
            }
        }
        Err(MlError::MalformedTree { tree, node })
    }
}
