// File: examples/baseline_folds.rs

use cinelearn::metrics::{root_mean_square, split_list};
use cinelearn_datasets::movies;

fn main() {
    let dataset = movies();
    let ratings = dataset.targets().to_vec();

    // the weakest sensible model always predicts the average rating
    println!("catalog rms {:.3}", root_mean_square(&ratings));

    // test on each training set of the 10 folds
    let folds = split_list(&ratings, 10);
    for test in 0..folds.len() {
        let train = folds
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != test)
            .flat_map(|(_, fold)| fold.iter().copied())
            .collect::<Vec<_>>();

        println!("({})\t{:.3}", test, root_mean_square(&train));
    }
}
