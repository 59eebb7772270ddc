use ndarray::{s, Array1, Array2, ArrayView1, Axis};

use std::sync::Arc;

use super::{Dataset, Example, ExampleIter, Feature, Float};
use crate::error::{Error, Result};

impl<F: Float> Dataset<F> {
    /// Assembles a dataset from a feature catalog and a list of examples.
    ///
    /// Every example must carry the same number of continuous attributes (at
    /// least one), one value set per feature of the catalog, no empty value
    /// set and no value index outside the feature vocabulary. Value sets are
    /// canonicalized to sorted, duplicate-free form. The first offending
    /// example is reported in the error.
    pub fn from_examples(features: Vec<Feature>, examples: Vec<Example<F>>) -> Result<Dataset<F>> {
        if examples.is_empty() {
            return Err(Error::NotEnoughSamples);
        }
        let nsamples = examples.len();
        let nattributes = examples[0].continuous.len();
        if nattributes == 0 {
            return Err(Error::Parameters(
                "examples need at least one continuous attribute".to_string(),
            ));
        }

        let features: Arc<[Feature]> = features.into();
        let mut records = Array2::zeros((nsamples, nattributes));
        let mut targets = Array1::zeros(nsamples);
        let mut discrete: Vec<Vec<Vec<usize>>> =
            vec![Vec::with_capacity(nsamples); features.len()];

        for (idx, example) in examples.into_iter().enumerate() {
            if example.continuous.len() != nattributes {
                return Err(Error::MalformedExample {
                    example: idx,
                    reason: format!(
                        "expected {} continuous attributes, found {}",
                        nattributes,
                        example.continuous.len()
                    ),
                });
            }
            if example.discrete.len() != features.len() {
                return Err(Error::MalformedExample {
                    example: idx,
                    reason: format!(
                        "expected value sets for {} features, found {}",
                        features.len(),
                        example.discrete.len()
                    ),
                });
            }

            records.row_mut(idx).assign(&example.continuous);
            targets[idx] = example.target;

            for (feature_idx, mut values) in example.discrete.into_iter().enumerate() {
                let feature = &features[feature_idx];
                if values.is_empty() {
                    return Err(Error::MalformedExample {
                        example: idx,
                        reason: format!("no value for feature {:?}", feature.name()),
                    });
                }
                values.sort_unstable();
                values.dedup();
                if let Some(&outside) = values.iter().find(|&&v| v >= feature.nvalues()) {
                    return Err(Error::MalformedExample {
                        example: idx,
                        reason: format!(
                            "value index {} outside the {} values of feature {:?}",
                            outside,
                            feature.nvalues(),
                            feature.name()
                        ),
                    });
                }
                discrete[feature_idx].push(values);
            }
        }

        Ok(Dataset {
            records,
            discrete,
            targets,
            features,
        })
    }

    pub fn nsamples(&self) -> usize {
        self.records.nrows()
    }

    /// Arity of the continuous attribute block
    pub fn nattributes(&self) -> usize {
        self.records.ncols()
    }

    /// Number of categorical features in the catalog
    pub fn nfeatures(&self) -> usize {
        self.features.len()
    }

    /// The shared feature catalog
    pub fn features(&self) -> &Arc<[Feature]> {
        &self.features
    }

    pub fn feature(&self, feature_idx: usize) -> &Feature {
        &self.features[feature_idx]
    }

    /// The continuous attribute block, one row per example
    pub fn records(&self) -> &Array2<F> {
        &self.records
    }

    pub fn targets(&self) -> &Array1<F> {
        &self.targets
    }

    pub fn target(&self, row: usize) -> F {
        self.targets[row]
    }

    pub fn continuous_row(&self, row: usize) -> ArrayView1<'_, F> {
        self.records.row(row)
    }

    /// The sorted value indices an example holds for a feature
    pub fn discrete(&self, feature_idx: usize, row: usize) -> &[usize] {
        &self.discrete[feature_idx][row]
    }

    /// Copies the continuous rows of a subset of examples
    pub fn select_records(&self, rows: &[usize]) -> Array2<F> {
        self.records.select(Axis(0), rows)
    }

    /// Copies the targets of a subset of examples
    pub fn select_targets(&self, rows: &[usize]) -> Array1<F> {
        self.targets.select(Axis(0), rows)
    }

    /// Iterates over row views of the examples
    pub fn examples(&self) -> ExampleIter<'_, F> {
        ExampleIter::new(self)
    }

    /// Splits the dataset into two contiguous parts, the first holding
    /// `ratio` of the examples.
    ///
    /// No shuffling takes place; splitting the same dataset twice yields the
    /// same parts. Both parts share the feature catalog of the source.
    pub fn split_with_ratio(&self, ratio: f32) -> (Dataset<F>, Dataset<F>) {
        let n = (self.nsamples() as f32 * ratio).ceil() as usize;
        let n = usize::min(n, self.nsamples());

        (self.slice_rows(0, n), self.slice_rows(n, self.nsamples()))
    }

    fn slice_rows(&self, start: usize, end: usize) -> Dataset<F> {
        Dataset {
            records: self.records.slice(s![start..end, ..]).to_owned(),
            discrete: self
                .discrete
                .iter()
                .map(|column| column[start..end].to_vec())
                .collect(),
            targets: self.targets.slice(s![start..end]).to_owned(),
            features: Arc::clone(&self.features),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn feature(name: &str, values: &[&str]) -> Feature {
        Feature::new(
            name.to_string(),
            values.iter().map(|v| v.to_string()).collect(),
        )
        .unwrap()
    }

    fn catalog() -> Vec<Feature> {
        vec![
            feature("genre", &["comedy", "drama", "horror"]),
            feature("director", &["keller", "ortiz"]),
        ]
    }

    #[test]
    fn builds_columns_from_examples() {
        let examples = vec![
            Example::new(array![100., 7.1], vec![vec![1, 0], vec![0]], 6.4),
            Example::new(array![91., 5.2], vec![vec![2], vec![1]], 4.0),
            Example::new(array![124., 8.0], vec![vec![0], vec![0]], 7.9),
        ];

        let dataset = Dataset::from_examples(catalog(), examples).unwrap();

        assert_eq!(dataset.nsamples(), 3);
        assert_eq!(dataset.nattributes(), 2);
        assert_eq!(dataset.nfeatures(), 2);
        assert_eq!(dataset.discrete(0, 0), &[0, 1]);
        assert_eq!(dataset.discrete(0, 1), &[2]);
        assert_eq!(dataset.discrete(1, 2), &[0]);
        assert_eq!(dataset.target(1), 4.0);
        assert_eq!(dataset.continuous_row(2), array![124., 8.0]);
        assert_eq!(dataset.feature(0).value(2), "horror");
    }

    #[test]
    fn deduplicates_value_sets() {
        let examples = vec![Example::new(
            array![100.],
            vec![vec![1, 1, 0, 1], vec![0]],
            5.0,
        )];

        let dataset = Dataset::from_examples(catalog(), examples).unwrap();

        assert_eq!(dataset.discrete(0, 0), &[0, 1]);
    }

    #[test]
    fn rejects_empty_value_set() {
        let examples = vec![Example::new(array![100.], vec![vec![], vec![0]], 5.0)];

        let err = Dataset::from_examples(catalog(), examples).unwrap_err();
        assert!(matches!(err, Error::MalformedExample { example: 0, .. }));
    }

    #[test]
    fn rejects_value_outside_vocabulary() {
        let examples = vec![
            Example::new(array![100.], vec![vec![0], vec![0]], 5.0),
            Example::new(array![90.], vec![vec![3], vec![0]], 5.0),
        ];

        let err = Dataset::from_examples(catalog(), examples).unwrap_err();
        assert!(matches!(err, Error::MalformedExample { example: 1, .. }));
    }

    #[test]
    fn rejects_ragged_continuous_attributes() {
        let examples = vec![
            Example::new(array![100., 2.], vec![vec![0], vec![0]], 5.0),
            Example::new(array![90.], vec![vec![0], vec![0]], 5.0),
        ];

        let err = Dataset::from_examples(catalog(), examples).unwrap_err();
        assert!(matches!(err, Error::MalformedExample { example: 1, .. }));
    }

    #[test]
    fn rejects_missing_feature_assignment() {
        let examples = vec![Example::new(array![100.], vec![vec![0]], 5.0)];

        let err = Dataset::from_examples(catalog(), examples).unwrap_err();
        assert!(matches!(err, Error::MalformedExample { example: 0, .. }));
    }

    #[test]
    fn rejects_empty_example_list() {
        let err = Dataset::<f64>::from_examples(catalog(), Vec::new()).unwrap_err();
        assert!(matches!(err, Error::NotEnoughSamples));
    }

    #[test]
    fn rejects_duplicate_feature_values() {
        let err = Feature::new(
            "genre".to_string(),
            vec!["comedy".to_string(), "comedy".to_string()],
        )
        .unwrap_err();

        assert!(matches!(err, Error::Parameters(_)));
    }

    #[test]
    fn looks_up_value_indices() {
        let genre = feature("genre", &["comedy", "drama", "horror"]);

        assert_eq!(genre.value_index("drama"), Some(1));
        assert_eq!(genre.value_index("western"), None);
    }

    #[test]
    fn split_is_contiguous_and_shares_the_catalog() {
        let examples = (0..10)
            .map(|i| Example::new(array![i as f64], vec![vec![0], vec![0]], i as f64))
            .collect();
        let dataset = Dataset::from_examples(catalog(), examples).unwrap();

        let (train, valid) = dataset.split_with_ratio(0.8);

        assert_eq!(train.nsamples(), 8);
        assert_eq!(valid.nsamples(), 2);
        assert_eq!(train.target(0), 0.0);
        assert_eq!(valid.target(0), 8.0);
        assert!(Arc::ptr_eq(train.features(), valid.features()));
    }

    #[test]
    fn example_views_match_the_columns() {
        let examples = vec![
            Example::new(array![100., 7.1], vec![vec![1, 0], vec![0]], 6.4),
            Example::new(array![91., 5.2], vec![vec![2], vec![1]], 4.0),
        ];
        let dataset = Dataset::from_examples(catalog(), examples).unwrap();

        let views: Vec<_> = dataset.examples().collect();

        assert_eq!(views.len(), 2);
        assert_eq!(views[0].continuous, array![100., 7.1]);
        assert_eq!(views[0].discrete, vec![&[0, 1][..], &[0][..]]);
        assert_eq!(views[1].target, 4.0);
    }
}
