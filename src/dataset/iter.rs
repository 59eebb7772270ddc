use super::{Dataset, Float};
use ndarray::ArrayView1;

/// A borrowed view of one example of a dataset
#[derive(Debug, Clone, PartialEq)]
pub struct ExampleView<'a, F> {
    pub continuous: ArrayView1<'a, F>,
    pub discrete: Vec<&'a [usize]>,
    pub target: F,
}

/// Iterator over the examples of a dataset in row order
pub struct ExampleIter<'a, F> {
    dataset: &'a Dataset<F>,
    idx: usize,
}

impl<'a, F: Float> ExampleIter<'a, F> {
    pub fn new(dataset: &'a Dataset<F>) -> ExampleIter<'a, F> {
        ExampleIter { dataset, idx: 0 }
    }
}

impl<'a, F: Float> Iterator for ExampleIter<'a, F> {
    type Item = ExampleView<'a, F>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.idx >= self.dataset.nsamples() {
            return None;
        }

        let row = self.idx;
        self.idx += 1;

        Some(ExampleView {
            continuous: self.dataset.continuous_row(row),
            discrete: (0..self.dataset.nfeatures())
                .map(|feature_idx| self.dataset.discrete(feature_idx, row))
                .collect(),
            target: self.dataset.target(row),
        })
    }
}
