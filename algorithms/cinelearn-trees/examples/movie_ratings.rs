// File: examples/movie_ratings.rs

use cinelearn::prelude::*;
use cinelearn_datasets::movies;
use cinelearn_trees::{ModelTree, TreeEvaluator};

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // 1. Load & split the movie catalog
    let (train, test) = movies().split_with_ratio(0.8);
    println!(
        "training on {} films, holding out {}",
        train.nsamples(),
        test.nsamples()
    );

    // 2. Fit a model tree
    let tree = ModelTree::params()
        .min_subset_size(10)
        .min_deviation(0.05)
        .fit(&train)?;
    println!(
        "fitted {} leaves, depth {}",
        tree.num_leaves(),
        tree.max_depth()
    );
    println!("{}", tree);

    // 3. Score the training films
    let on_train = tree.evaluate(&train)?;
    println!(
        "train rms {:.3}, normalized {:.3}",
        on_train.rms(),
        on_train.norm_rms()
    );

    // 4. Score the held out films, values never seen in training are
    //    reported per film instead of failing the whole run
    let on_test = TreeEvaluator::new()
        .collect_predictions(true)
        .evaluate(&tree, &test)?;
    println!(
        "test rms {:.3} over {} films, {} could not be scored",
        on_test.rms(),
        on_test.examples_scored(),
        on_test.failures().len()
    );
    for (row, err) in on_test.failures() {
        println!("  film {}: {}", row, err);
    }
    for record in on_test.predictions().iter().take(3) {
        println!(
            "  rated {:.1}, predicted {:.2}",
            record.target, record.prediction
        );
    }

    // 5. Compare with always predicting the average rating
    let baseline = cinelearn::metrics::root_mean_square(train.targets().as_slice().unwrap());
    println!("constant baseline rms {:.3}", baseline);

    Ok(())
}
