//! Regression tree node
//!
//! Nodes are stored flat in a vector and reference their children by index,
//! the same layout scikit-learn and XGBoost use internally.

use serde::{Deserialize, Serialize};

use crate::{FeatureRow, MlResult};

/// A split or a leaf
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeNode {
    /// Internal node with split condition
    Split {
        /// Column to test
        feature: usize,
        /// Rows with `row[feature] < threshold` go left
        threshold: f64,
        /// Left child index
        left: usize,
        /// Right child index
        right: usize,
    },
    /// Terminal node
    Leaf {
        /// Predicted value
        value: f64,
    },
}

/// Where a row goes from a node
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Continue at this node index
    Next(usize),
    /// Stop with this value
    Done(f64),
}

impl TreeNode {
    /// Evaluate this node for a row
    pub fn step(&self, row: &FeatureRow) -> MlResult<Step> {
        match *self {
            Self::Split { feature, threshold, left, right } => {
                let value = row.get(feature)?;
                Ok(Step::Next(if value < threshold { left } else { right }))
            }
            Self::Leaf { value } => Ok(Step::Done(value)),
        }
    }

    /// Check if node is a leaf
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MlError;

    fn row() -> FeatureRow {
        FeatureRow::from_values([10.0, 20.0, 1000.0, 60.0, 9.0, 11.0])
    }

    #[test]
    fn split_goes_left_below_threshold() {
        let node = TreeNode::Split { feature: 0, threshold: 10.5, left: 1, right: 2 };
        assert_eq!(node.step(&row()), Ok(Step::Next(1)));
    }

    #[test]
    fn split_goes_right_at_threshold() {
        let node = TreeNode::Split { feature: 0, threshold: 10.0, left: 1, right: 2 };
        assert_eq!(node.step(&row()), Ok(Step::Next(2)));
    }

    #[test]
    fn bad_feature_index() {
        let node = TreeNode::Split { feature: 6, threshold: 0.0, left: 1, right: 2 };
        assert_eq!(node.step(&row()), Err(MlError::InvalidFeature(6)));
    }

    #[test]
    fn parses_external_tagging() {
        let node: TreeNode = serde_json::from_str(r#"{"leaf": {"value": 3.5}}"#).unwrap();
        assert_eq!(node, TreeNode::Leaf { value: 3.5 });
        assert!(node.is_leaf());
    }
}
