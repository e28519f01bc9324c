//! Random forest in flat node-array form.
//!
//! Each tree is exported as parallel arrays indexed by node id. Node 0 is
//! the root; a node is a leaf when `children_left[node] == -1`. Internal
//! nodes send a sample left when `x[feature] <= threshold`. `value[node]`
//! holds the class weights `[w0, w1]` of the training samples that reached
//! the node.

use serde::Deserialize;

const LEAF: i64 = -1;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        positive: f64,
    },
}

#[derive(Debug, Deserialize)]
struct RawTree {
    children_left: Vec<i64>,
    children_right: Vec<i64>,
    feature: Vec<i64>,
    threshold: Vec<f64>,
    value: Vec<Vec<f64>>,
}

/// One validated decision tree.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawTree")]
pub struct DecisionTree {
    nodes: Vec<Node>,
    // Largest feature index referenced by any split.
    max_feature: Option<usize>,
}

impl TryFrom<RawTree> for DecisionTree {
    type Error = String;

    fn try_from(raw: RawTree) -> Result<Self, Self::Error> {
        let len = raw.children_left.len();
        if len == 0 {
            return Err("tree has no nodes".to_string());
        }
        if [
            raw.children_right.len(),
            raw.feature.len(),
            raw.threshold.len(),
            raw.value.len(),
        ]
        .iter()
        .any(|other| *other != len)
        {
            return Err("tree node arrays differ in length".to_string());
        }

        let mut nodes = Vec::with_capacity(len);
        let mut max_feature = None;
        for id in 0..len {
            let left = raw.children_left[id];
            let right = raw.children_right[id];
            if left == LEAF {
                nodes.push(Node::Leaf {
                    positive: leaf_probability(id, &raw.value[id])?,
                });
                continue;
            }

            // Children always come after their parent, so traversal terminates.
            let child = |index: i64| -> Result<usize, String> {
                usize::try_from(index)
                    .ok()
                    .filter(|child| *child > id && *child < len)
                    .ok_or_else(|| format!("node {id}: child index {index} out of order"))
            };
            let feature = usize::try_from(raw.feature[id])
                .map_err(|_| format!("node {id}: negative feature index on a split"))?;
            let threshold = raw.threshold[id];
            if !threshold.is_finite() {
                return Err(format!("node {id}: threshold is not finite"));
            }
            max_feature = max_feature.max(Some(feature));
            nodes.push(Node::Split {
                feature,
                threshold,
                left: child(left)?,
                right: child(right)?,
            });
        }

        Ok(Self { nodes, max_feature })
    }
}

impl DecisionTree {
    /// Class-1 probability at the leaf `features` falls into.
    #[must_use]
    pub(crate) fn positive_probability(&self, features: &[f64]) -> f64 {
        let mut id = 0;
        loop {
            match self.nodes[id] {
                Node::Leaf { positive } => return positive,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    id = if features[feature] <= threshold { left } else { right };
                }
            }
        }
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

fn leaf_probability(id: usize, value: &[f64]) -> Result<f64, String> {
    let [negative, positive] = value else {
        return Err(format!("leaf {id}: expected 2 class weights, got {}", value.len()));
    };
    if !(negative.is_finite() && positive.is_finite()) || *negative < 0.0 || *positive < 0.0 {
        return Err(format!("leaf {id}: class weights must be finite and non-negative"));
    }
    let total = negative + positive;
    if total <= 0.0 {
        return Err(format!("leaf {id}: class weights sum to zero"));
    }
    Ok(positive / total)
}

/// Averages the leaf class distribution of every tree.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RandomForest {
    pub trees: Vec<DecisionTree>,
}

impl RandomForest {
    pub(crate) fn check_width(&self, width: usize) -> Result<(), String> {
        if self.trees.is_empty() {
            return Err("random forest has no trees".to_string());
        }
        for (index, tree) in self.trees.iter().enumerate() {
            if let Some(feature) = tree.max_feature
                && feature >= width
            {
                return Err(format!(
                    "tree {index} splits on feature {feature} but {width} features are declared"
                ));
            }
        }
        Ok(())
    }

    /// `features` must already be checked against the declared width.
    #[must_use]
    pub(crate) fn positive_probability(&self, features: &[f64]) -> f64 {
        let sum: f64 = self
            .trees
            .iter()
            .map(|tree| tree.positive_probability(features))
            .sum();
        #[allow(clippy::cast_precision_loss)]
        let count = self.trees.len() as f64;
        sum / count
    }
}
