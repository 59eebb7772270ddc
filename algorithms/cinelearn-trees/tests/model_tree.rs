// cinelearn-trees/tests/model_tree.rs

use cinelearn::prelude::*;
use cinelearn_datasets::movies;
use cinelearn_trees::ModelTree;

#[test]
fn movies_model_tree_scores_every_training_film() {
    let dataset = movies();

    let tree = ModelTree::params()
        .min_subset_size(10)
        .min_deviation(0.05)
        .fit(&dataset)
        .expect("Training failed");

    // every training film routes through children fitted on its own values
    let evaluation = tree.evaluate(&dataset).expect("Evaluation failed");

    assert_eq!(evaluation.examples_scored(), dataset.nsamples());
    assert!(evaluation.failures().is_empty());
    assert!(
        evaluation.rms() > 0.0 && evaluation.rms().is_finite(),
        "Expected a positive finite rms, got {}",
        evaluation.rms()
    );
    assert!(evaluation.norm_rms() > 0.0 && evaluation.norm_rms().is_finite());

    // a split consumes its feature, so depth is capped by the catalog
    assert!(tree.max_depth() <= dataset.nfeatures());
    assert!(tree.num_leaves() >= 1);
}

#[test]
fn movies_model_tree_improves_on_the_constant_baseline() {
    let dataset = movies();

    let tree = ModelTree::params().fit(&dataset).expect("Training failed");
    let evaluation = tree.evaluate(&dataset).expect("Evaluation failed");

    // predicting the global average is the weakest sensible model
    let baseline = cinelearn::metrics::root_mean_square(dataset.targets().as_slice().unwrap());

    assert!(
        evaluation.rms() < baseline,
        "Expected the tree to beat rms {:.3}, got {:.3}",
        baseline,
        evaluation.rms()
    );
}

#[test]
fn movies_model_tree_fitting_is_deterministic() {
    let dataset = movies();
    let params = ModelTree::params().check().unwrap();

    let first = params.fit(&dataset).expect("Training failed");
    let second = params.fit(&dataset).expect("Training failed");

    assert_eq!(first, second);
    assert_eq!(
        first.evaluate(&dataset).unwrap().rms(),
        second.evaluate(&dataset).unwrap().rms()
    );
}
