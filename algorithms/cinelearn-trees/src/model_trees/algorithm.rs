//! Piecewise linear model trees
//!
use std::fmt;
use std::sync::Arc;

use ndarray::Array1;

use super::{
    LeafModel, LeafSolver, LinearEquation, ModelTreeValidParams, NodeIter, OlsLeafSolver,
    PredictionRecord,
};
use crate::error::{ModelTreeError, Result};
use cinelearn::{
    dataset::{Dataset, Feature},
    traits::Fit,
    Float,
};

/// An internal node splitting on one discrete feature
///
/// Children are indexed by the value id of the split feature. A value that
/// was never observed while fitting has no child.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitNode<F> {
    feature_idx: usize,
    score: F,
    children: Vec<Option<TreeNode<F>>>,
}

impl<F: Float> SplitNode<F> {
    /// Index of the feature this node splits on
    pub fn feature_idx(&self) -> usize {
        self.feature_idx
    }

    /// The winning deviation score of the split
    pub fn score(&self) -> F {
        self.score
    }

    /// Children indexed by value id, `None` where the value was unobserved
    pub fn children(&self) -> &[Option<TreeNode<F>>] {
        &self.children
    }

    /// The child for one value id, if the value was observed while fitting
    pub fn child(&self, value: usize) -> Option<&TreeNode<F>> {
        self.children.get(value).and_then(Option::as_ref)
    }
}

/// A node in the model tree
///
/// Sibling leaves under one split may hold the same payload, which is why
/// the leaf variant carries an [`Arc`].
#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode<F> {
    /// An internal split on one discrete feature
    Split(SplitNode<F>),
    /// A fitted equation with its fallback average
    Leaf(Arc<LeafModel<F>>),
}

impl<F: Float> TreeNode<F> {
    /// Returns true if the node holds a fitted equation
    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf(_))
    }

    /// The split payload of an internal node
    pub fn as_split(&self) -> Option<&SplitNode<F>> {
        match self {
            TreeNode::Split(split) => Some(split),
            TreeNode::Leaf(_) => None,
        }
    }

    /// The shared payload of a leaf node
    pub fn as_leaf(&self) -> Option<&Arc<LeafModel<F>>> {
        match self {
            TreeNode::Split(_) => None,
            TreeNode::Leaf(leaf) => Some(leaf),
        }
    }
}

/// Partition rows into one subset per value of the feature. A row holding
/// k values for the feature lands in k subsets.
fn partition_by_value<F: Float>(
    data: &Dataset<F>,
    rows: &[usize],
    feature_idx: usize,
) -> Vec<Vec<usize>> {
    let mut subsets = vec![Vec::new(); data.feature(feature_idx).nvalues()];

    for &row in rows {
        for &value in data.discrete(feature_idx, row) {
            subsets[value].push(row);
        }
    }

    subsets
}

/// Sample standard deviation of the targets in one subset, n - 1 denominator
fn target_stddev<F: Float>(data: &Dataset<F>, rows: &[usize]) -> F {
    assert!(rows.len() > 1);

    let n = F::cast(rows.len());
    let mean = rows.iter().map(|&row| data.target(row)).sum::<F>() / n;
    let sum = rows
        .iter()
        .map(|&row| {
            let dev = data.target(row) - mean;
            dev * dev
        })
        .sum::<F>();

    (sum / (n - F::one())).sqrt()
}

/// Weighted deviation score of one partition, low scores mean the partition
/// separates the targets well.
///
/// Each subset holding more than one row contributes its target standard
/// deviation, damped by `sqrt(1 - size / total)` so that disproportionately
/// small subsets weigh less. The total counts membership slots, a row held
/// in several subsets counts once per subset.
fn deviation_score<F: Float>(data: &Dataset<F>, subsets: &[Vec<usize>]) -> F {
    let total = subsets.iter().map(|subset| subset.len()).sum::<usize>();

    subsets
        .iter()
        .filter(|subset| subset.len() > 1)
        .map(|subset| {
            let size_ratio = F::cast(subset.len()) / F::cast(total);
            target_stddev(data, subset) * (F::one() - size_ratio).sqrt()
        })
        .sum()
}

/// Fit one leaf payload over an example set
fn fit_leaf<F: Float, S: LeafSolver<F>>(
    data: &Dataset<F>,
    rows: &[usize],
    solver: &S,
) -> Result<LeafModel<F>> {
    let records = data.select_records(rows);
    let targets = data.select_targets(rows);

    let raw = solver.fit_coefficients(records.view(), targets.view())?;
    let equation = LinearEquation::from_coefficients(raw.view(), data.nattributes())?;
    // a leaf always covers at least one row
    let fallback_average = targets.mean().unwrap();

    Ok(LeafModel::new(equation, fallback_average))
}

/// Recursively fits a node over the given rows.
///
/// Every candidate feature is scored by partitioning the rows over its
/// values; the first strictly smallest score wins, so ties keep the earlier
/// feature. Each observed value of the winner then either becomes a leaf or
/// recurses with the winner removed from the candidate list. The first value
/// that becomes a leaf fits one payload over all rows of this call and every
/// later leaf value under the same split reuses it.
fn fit_node<F: Float, S: LeafSolver<F>>(
    data: &Dataset<F>,
    rows: &[usize],
    candidates: &[usize],
    hyperparameters: &ModelTreeValidParams<F>,
    solver: &S,
) -> Result<TreeNode<F>> {
    let mut best = None;

    for (candidate_pos, &feature_idx) in candidates.iter().enumerate() {
        let subsets = partition_by_value(data, rows, feature_idx);
        let score = deviation_score(data, &subsets);

        // override best when the score strictly improved
        best = match best.take() {
            None => Some((candidate_pos, score, subsets)),
            Some((_, best_score, _)) if score < best_score => {
                Some((candidate_pos, score, subsets))
            }
            x => x,
        };
    }

    // the candidate list is never empty
    let (chosen_pos, min_score, subsets) = best.unwrap();
    let feature_idx = candidates[chosen_pos];

    // candidate list for the subtrees, the chosen feature is consumed here
    let remaining = candidates
        .iter()
        .copied()
        .filter(|&candidate| candidate != feature_idx)
        .collect::<Vec<_>>();

    let mut shared_leaf: Option<Arc<LeafModel<F>>> = None;
    let mut children = Vec::with_capacity(subsets.len());

    for subset in &subsets {
        let child = if subset.is_empty() {
            // the value was never observed at this node
            None
        } else if subset.len() <= 2
            || subset.len() < hyperparameters.min_subset_size()
            || min_score < hyperparameters.min_deviation()
            || candidates.len() == 1
        {
            let leaf = match &shared_leaf {
                Some(leaf) => Arc::clone(leaf),
                None => {
                    // the first leaf is fitted over every row of this call
                    // and reused by the later leaf values of this split
                    let leaf = Arc::new(fit_leaf(data, rows, solver)?);
                    shared_leaf = Some(Arc::clone(&leaf));
                    leaf
                }
            };

            Some(TreeNode::Leaf(leaf))
        } else {
            Some(fit_node(data, subset, &remaining, hyperparameters, solver)?)
        };

        children.push(child);
    }

    Ok(TreeNode::Split(SplitNode {
        feature_idx,
        score: min_score,
        children,
    }))
}

/// A fitted model tree for rating regression.
///
/// ### Structure
///
/// A model tree is an n-ary tree where:
/// * Each internal node splits on one discrete feature and holds one child
///   per value of that feature observed while fitting. There is no child for
///   an unobserved value.
/// * Each leaf holds a linear equation over the continuous attributes,
///   together with the mean target of the examples it was fitted over.
///
/// ### Algorithm
///
/// Starting with the full training set and the full feature list, nodes are
/// fitted recursively by applying the following rule to every node:
///
/// * Partition the examples over the values of each candidate feature; an
///   example holding several values for a feature lands in several subsets.
/// * Score each partition by its damped target standard deviations and split
///   on the feature with the smallest score, resolving ties in favor of the
///   earlier feature.
/// * A branch value with a small subset, or any branch value when the split
///   score falls under the configured deviation threshold or no candidate
///   would remain, becomes a leaf; other branch values recurse with the
///   split feature removed from the candidate list.
/// * The first branch value that becomes a leaf fits its equation over the
///   whole example set of the node and the later leaf values of the same
///   split share that payload.
///
/// The thresholds are specified in the [parameters](crate::ModelTreeParams).
///
/// ### Predictions
///
/// To score an example the tree is walked from the root: at every split the
/// example descends into the child of every value it holds for the split
/// feature and the child results are averaged, at every leaf the equation is
/// solved over the continuous attributes. [`ModelTree::squared_error`]
/// returns the squared residual against the known target and
/// [`ModelTree::predict_row`] returns the bare prediction.
///
/// ### Example
///
/// Here is an example on how to train a model tree from its parameters:
///
/// ```rust
/// use cinelearn_trees::ModelTree;
/// use cinelearn::prelude::*;
///
/// // Load the dataset
/// let dataset = cinelearn_datasets::movies();
/// // Fit the tree
/// let tree = ModelTree::params().fit(&dataset).unwrap();
/// // Report the training error
/// let evaluation = tree.evaluate(&dataset).unwrap();
///
/// assert_eq!(evaluation.examples_scored(), dataset.nsamples());
/// println!("rms {:.3} over {} films", evaluation.rms(), evaluation.examples_scored());
/// ```
///
#[derive(Debug, Clone, PartialEq)]
pub struct ModelTree<F> {
    root: TreeNode<F>,
    features: Arc<[Feature]>,
    nattributes: usize,
}

impl<F: Float> Fit<Dataset<F>, ModelTreeError> for ModelTreeValidParams<F> {
    type Object = ModelTree<F>;

    /// Fit a model tree on a dataset with the default least squares leaf
    /// solver.
    fn fit(&self, dataset: &Dataset<F>) -> Result<Self::Object> {
        self.fit_with_solver(dataset, &OlsLeafSolver)
    }
}

impl<F: Float> ModelTreeValidParams<F> {
    /// Fit a model tree with a custom leaf solver.
    ///
    /// The solver failing on any leaf aborts the whole build, no partial
    /// tree is returned.
    pub fn fit_with_solver<S: LeafSolver<F>>(
        &self,
        dataset: &Dataset<F>,
        solver: &S,
    ) -> Result<ModelTree<F>> {
        if dataset.nsamples() == 0 {
            return Err(cinelearn::Error::NotEnoughSamples.into());
        }
        if dataset.nfeatures() == 0 {
            return Err(
                cinelearn::Error::Parameters("no discrete feature to split on".to_string()).into(),
            );
        }

        let rows = (0..dataset.nsamples()).collect::<Vec<_>>();
        let candidates = (0..dataset.nfeatures()).collect::<Vec<_>>();
        let root = fit_node(dataset, &rows, &candidates, self, solver)?;

        Ok(ModelTree {
            root,
            features: Arc::clone(dataset.features()),
            nattributes: dataset.nattributes(),
        })
    }
}

impl<F: Float> ModelTree<F> {
    /// Squared prediction error of the tree on one row of a dataset.
    ///
    /// At a leaf this is the squared residual of the equation. At a split
    /// the scores of the children matching the row's held values are
    /// averaged. A held value without a trained child fails the row with
    /// [`ModelTreeError::MissingChild`].
    pub fn squared_error(&self, data: &Dataset<F>, row: usize) -> Result<F> {
        self.check_compatible(data)?;
        score_node(&self.root, data, row, &mut None)
    }

    /// Prediction of the tree on one row, the inference only variant of
    /// [`ModelTree::squared_error`]: no residual is taken and the averaging
    /// runs over the child predictions.
    pub fn predict_row(&self, data: &Dataset<F>, row: usize) -> Result<F> {
        self.check_compatible(data)?;
        predict_node(&self.root, data, row)
    }

    /// Predictions for every row of the dataset.
    ///
    /// Fails on the first row holding a value the tree never observed; use
    /// a [`TreeEvaluator`](crate::TreeEvaluator) to score sets where single
    /// rows are allowed to fail.
    pub fn predict(&self, data: &Dataset<F>) -> Result<Array1<F>> {
        self.check_compatible(data)?;

        let predictions = (0..data.nsamples())
            .map(|row| predict_node(&self.root, data, row))
            .collect::<Result<Vec<_>>>()?;

        Ok(Array1::from(predictions))
    }

    /// Score one row, the walk was compatibility checked by the caller
    pub(crate) fn score_row(
        &self,
        data: &Dataset<F>,
        row: usize,
        trace: &mut Option<Vec<PredictionRecord<F>>>,
    ) -> Result<F> {
        score_node(&self.root, data, row, trace)
    }

    pub(crate) fn check_compatible(&self, data: &Dataset<F>) -> Result<()> {
        if data.nattributes() != self.nattributes {
            return Err(ModelTreeError::IncompatibleDataset(format!(
                "expected {} continuous attributes, got {}",
                self.nattributes,
                data.nattributes()
            )));
        }
        if data.features().as_ref() != self.features.as_ref() {
            return Err(ModelTreeError::IncompatibleDataset(
                "the feature catalogs differ".to_string(),
            ));
        }

        Ok(())
    }

    /// Score a whole dataset with the default evaluator.
    pub fn evaluate(&self, data: &Dataset<F>) -> Result<super::TreeEvaluation<F>> {
        super::TreeEvaluator::new().evaluate(self, data)
    }

    /// Create a node iterator in level-order (BFT), yielding nodes with
    /// their depth
    pub fn iter_nodes(&self) -> NodeIter<F> {
        NodeIter::new(&self.root)
    }

    /// Return root node of the tree
    pub fn root_node(&self) -> &TreeNode<F> {
        &self.root
    }

    /// The feature catalog the tree was fitted on
    pub fn features(&self) -> &Arc<[Feature]> {
        &self.features
    }

    /// Number of continuous attributes the leaf equations run over
    pub fn nattributes(&self) -> usize {
        self.nattributes
    }

    /// Return max depth of the tree
    pub fn max_depth(&self) -> usize {
        self.iter_nodes()
            .fold(0, |max, (depth, _)| usize::max(max, depth))
    }

    /// Return the number of leaf edges in this tree, a payload shared by
    /// sibling leaves is counted once per edge
    pub fn num_leaves(&self) -> usize {
        self.iter_nodes().filter(|(_, node)| node.is_leaf()).count()
    }

    /// Return the deviation score recorded at every split, in level order
    pub fn split_scores(&self) -> Vec<F> {
        self.iter_nodes()
            .filter_map(|(_, node)| node.as_split().map(|split| split.score()))
            .collect()
    }
}

/// Recursively compute the squared error of the row under `node`
fn score_node<F: Float>(
    node: &TreeNode<F>,
    data: &Dataset<F>,
    row: usize,
    trace: &mut Option<Vec<PredictionRecord<F>>>,
) -> Result<F> {
    match node {
        TreeNode::Leaf(leaf) => {
            let target = data.target(row);
            let prediction = leaf.solve(data.continuous_row(row));
            let residual = target - prediction;

            if let Some(records) = trace {
                records.push(PredictionRecord {
                    target,
                    prediction,
                    residual,
                });
            }

            Ok(residual * residual)
        }
        TreeNode::Split(split) => {
            let values = data.discrete(split.feature_idx, row);
            let mut sum = F::zero();

            for &value in values {
                let child = split
                    .child(value)
                    .ok_or_else(|| missing_child(data, split.feature_idx, value))?;
                sum += score_node(child, data, row, trace)?;
            }

            // ingestion guarantees at least one held value per feature
            Ok(sum / F::cast(values.len()))
        }
    }
}

/// Recursively predict the target of the row under `node`
fn predict_node<F: Float>(node: &TreeNode<F>, data: &Dataset<F>, row: usize) -> Result<F> {
    match node {
        TreeNode::Leaf(leaf) => Ok(leaf.solve(data.continuous_row(row))),
        TreeNode::Split(split) => {
            let values = data.discrete(split.feature_idx, row);
            let mut sum = F::zero();

            for &value in values {
                let child = split
                    .child(value)
                    .ok_or_else(|| missing_child(data, split.feature_idx, value))?;
                sum += predict_node(child, data, row)?;
            }

            Ok(sum / F::cast(values.len()))
        }
    }
}

fn missing_child<F: Float>(data: &Dataset<F>, feature_idx: usize, value: usize) -> ModelTreeError {
    let feature = data.feature(feature_idx);

    ModelTreeError::MissingChild {
        feature: feature.name().to_string(),
        value: feature.value(value).to_string(),
    }
}

impl<F: Float> fmt::Display for ModelTree<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_node(f, &self.root, &self.features, 0)
    }
}

fn fmt_node<F: Float>(
    f: &mut fmt::Formatter<'_>,
    node: &TreeNode<F>,
    features: &[Feature],
    indent: usize,
) -> fmt::Result {
    match node {
        TreeNode::Leaf(leaf) => {
            writeln!(f, "{:indent$}{}", "", leaf.equation(), indent = indent)
        }
        TreeNode::Split(split) => {
            let feature = &features[split.feature_idx()];

            for (value, child) in split.children().iter().enumerate() {
                if let Some(child) = child {
                    writeln!(
                        f,
                        "{:indent$}{} = {}",
                        "",
                        feature.name(),
                        feature.value(value),
                        indent = indent
                    )?;
                    fmt_node(f, child, features, indent + 2)?;
                }
            }

            Ok(())
        }
    }
}
