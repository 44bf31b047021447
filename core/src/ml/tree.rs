use std::cmp::Ordering;

use ndarray::{ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// CART regression tree. Splits minimize the summed squared error of the two
/// children; leaves predict the mean target of their samples. Grown without a
/// depth limit, stopping when a node is pure or no valid split exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    nodes: Vec<Node>,
    root: usize,
}

impl RegressionTree {
    /// Fit on the rows of `x`/`y` selected by `indices` (duplicates allowed,
    /// which is what bootstrap sampling produces).
    pub fn fit(
        x: ArrayView2<f64>,
        y: ArrayView1<f64>,
        indices: &[usize],
        min_samples_leaf: usize,
    ) -> Self {
        let mut nodes = Vec::new();
        let root = grow(&mut nodes, x, y, indices, min_samples_leaf.max(1));
        Self { nodes, root }
    }

    pub fn predict(&self, row: ArrayView1<f64>) -> f64 {
        let mut node = self.root;
        loop {
            match self.nodes[node] {
                Node::Leaf { value } => return value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[feature] <= threshold { left } else { right };
                }
            }
        }
    }
}

struct BestSplit {
    feature: usize,
    threshold: f64,
    sse: f64,
}

fn grow(
    nodes: &mut Vec<Node>,
    x: ArrayView2<f64>,
    y: ArrayView1<f64>,
    indices: &[usize],
    min_samples_leaf: usize,
) -> usize {
    let value = mean(y, indices);

    if indices.len() < 2 * min_samples_leaf || is_pure(y, indices) {
        nodes.push(Node::Leaf { value });
        return nodes.len() - 1;
    }

    let Some(split) = best_split(x, y, indices, min_samples_leaf) else {
        nodes.push(Node::Leaf { value });
        return nodes.len() - 1;
    };

    let (left_indices, right_indices): (Vec<usize>, Vec<usize>) = indices
        .iter()
        .partition(|&&i| x[[i, split.feature]] <= split.threshold);

    let left = grow(nodes, x, y, &left_indices, min_samples_leaf);
    let right = grow(nodes, x, y, &right_indices, min_samples_leaf);
    nodes.push(Node::Split {
        feature: split.feature,
        threshold: split.threshold,
        left,
        right,
    });
    nodes.len() - 1
}

fn mean(y: ArrayView1<f64>, indices: &[usize]) -> f64 {
    if indices.is_empty() {
        return 0.0;
    }
    indices.iter().map(|&i| y[i]).sum::<f64>() / indices.len() as f64
}

fn is_pure(y: ArrayView1<f64>, indices: &[usize]) -> bool {
    let first = y[indices[0]];
    indices.iter().all(|&i| y[i] == first)
}

fn best_split(
    x: ArrayView2<f64>,
    y: ArrayView1<f64>,
    indices: &[usize],
    min_samples_leaf: usize,
) -> Option<BestSplit> {
    let n = indices.len();
    let mut best: Option<BestSplit> = None;
    let mut order = indices.to_vec();

    for feature in 0..x.ncols() {
        order.sort_by(|&a, &b| {
            x[[a, feature]]
                .partial_cmp(&x[[b, feature]])
                .unwrap_or(Ordering::Equal)
        });

        let total: f64 = order.iter().map(|&i| y[i]).sum();
        let total_sq: f64 = order.iter().map(|&i| y[i] * y[i]).sum();
        let mut sum_left = 0.0;
        let mut sq_left = 0.0;

        for k in 1..n {
            let prev = order[k - 1];
            sum_left += y[prev];
            sq_left += y[prev] * y[prev];

            let v_prev = x[[prev, feature]];
            let v_next = x[[order[k], feature]];
            // A boundary only exists between distinct feature values.
            if v_next <= v_prev {
                continue;
            }
            if k < min_samples_leaf || n - k < min_samples_leaf {
                continue;
            }

            let sum_right = total - sum_left;
            let sq_right = total_sq - sq_left;
            let sse = (sq_left - sum_left * sum_left / k as f64)
                + (sq_right - sum_right * sum_right / (n - k) as f64);

            if best.as_ref().is_none_or(|b| sse < b.sse) {
                best = Some(BestSplit {
                    feature,
                    threshold: (v_prev + v_next) / 2.0,
                    sse,
                });
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, Array2, array};

    #[test]
    fn splits_a_step_function_exactly() {
        let x = Array2::from_shape_vec((4, 1), vec![0.0, 1.0, 10.0, 11.0]).unwrap();
        let y = array![2.0, 2.0, 8.0, 8.0];
        let indices: Vec<usize> = (0..4).collect();

        let tree = RegressionTree::fit(x.view(), y.view(), &indices, 1);

        assert_eq!(tree.predict(array![0.5].view()), 2.0);
        assert_eq!(tree.predict(array![10.5].view()), 8.0);
    }

    #[test]
    fn constant_target_collapses_to_a_single_leaf() {
        let x = Array2::from_shape_vec((3, 2), vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        let y = Array1::from_elem(3, 7.0);
        let indices: Vec<usize> = (0..3).collect();

        let tree = RegressionTree::fit(x.view(), y.view(), &indices, 1);

        assert_eq!(tree.nodes.len(), 1);
        assert_eq!(tree.predict(array![100.0, -100.0].view()), 7.0);
    }

    #[test]
    fn constant_features_produce_a_leaf_even_with_mixed_targets() {
        let x = Array2::from_elem((4, 2), 1.0);
        let y = array![1.0, 2.0, 3.0, 4.0];
        let indices: Vec<usize> = (0..4).collect();

        let tree = RegressionTree::fit(x.view(), y.view(), &indices, 1);

        assert_eq!(tree.nodes.len(), 1);
        assert_eq!(tree.predict(array![1.0, 1.0].view()), 2.5);
    }

    #[test]
    fn min_samples_leaf_limits_split_positions() {
        let x = Array2::from_shape_vec((4, 1), vec![0.0, 1.0, 2.0, 3.0]).unwrap();
        let y = array![0.0, 0.0, 0.0, 10.0];
        let indices: Vec<usize> = (0..4).collect();

        let tree = RegressionTree::fit(x.view(), y.view(), &indices, 2);

        // With min_samples_leaf = 2 the only legal boundary is the middle, so
        // both leaves predict a two-sample mean.
        assert_eq!(tree.predict(array![0.0].view()), 0.0);
        assert_eq!(tree.predict(array![3.0].view()), 5.0);
    }
}
