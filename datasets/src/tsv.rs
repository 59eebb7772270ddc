//! Tab separated catalog ingestion
//!
use std::collections::HashMap;
use std::io::Read;

use csv::{ReaderBuilder, StringRecord};
use ndarray::Array1;
use thiserror::Error;

use cinelearn::dataset::{Dataset, Example, Feature};

/// Everything that can go wrong while ingesting a catalog
#[derive(Error, Debug)]
pub enum ReadError {
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("line {line}: column {column} is not a float")]
    Float { line: usize, column: usize },
    #[error("line {line}: column {column} is missing")]
    MissingColumn { line: usize, column: usize },
    #[error("line {line}: feature {feature:?} has no values")]
    EmptyValues { line: usize, feature: String },
    #[error(transparent)]
    Base(#[from] cinelearn::Error),
}

/// Reads a tab separated catalog of rated films into a [`Dataset`].
///
/// Columns are declared up front: discrete columns carry one or several
/// values separated by a list separator, continuous columns and the target
/// column are parsed as floats, undeclared columns are ignored. The value
/// vocabulary of every feature is built in first seen order, so reading the
/// same input twice yields the same value indices.
///
/// Malformed records fail the whole read with the offending line and
/// column. Repairing missing fields is out of scope here, a `null` entry is
/// a malformed record like any other.
///
/// # Example
///
/// ```
/// use cinelearn_datasets::TsvReader;
///
/// let tsv = "title\tgenres\truntime\trating\n\
///            Alpha\tdrama,comedy\t104\t7.4\n\
///            Beta\tdrama\t88\t6.1\n";
///
/// let dataset = TsvReader::new(3)
///     .discrete_column("genres", 1)
///     .continuous_column(2)
///     .read(tsv.as_bytes())
///     .unwrap();
///
/// assert_eq!(dataset.nsamples(), 2);
/// assert_eq!(dataset.feature(0).values(), ["drama", "comedy"]);
/// ```
#[derive(Debug, Clone)]
pub struct TsvReader {
    target_column: usize,
    discrete_columns: Vec<(String, usize)>,
    continuous_columns: Vec<usize>,
    delimiter: u8,
    list_separator: char,
    has_headers: bool,
}

impl TsvReader {
    /// A reader taking the target rating from the given column, tab
    /// delimited with a header line and `,` separated value lists
    pub fn new(target_column: usize) -> Self {
        TsvReader {
            target_column,
            discrete_columns: Vec::new(),
            continuous_columns: Vec::new(),
            delimiter: b'\t',
            list_separator: ',',
            has_headers: true,
        }
    }

    /// Declare a discrete feature column, in catalog order
    pub fn discrete_column(mut self, name: &str, column: usize) -> Self {
        self.discrete_columns.push((name.to_string(), column));
        self
    }

    /// Declare a continuous attribute column, in attribute order
    pub fn continuous_column(mut self, column: usize) -> Self {
        self.continuous_columns.push(column);
        self
    }

    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// The separator between the values of one discrete field
    pub fn list_separator(mut self, separator: char) -> Self {
        self.list_separator = separator;
        self
    }

    pub fn has_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    /// Ingest a catalog from any reader.
    pub fn read<R: Read>(&self, reader: R) -> Result<Dataset<f64>, ReadError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(self.has_headers)
            .delimiter(self.delimiter)
            .from_reader(reader);

        let mut catalogs: Vec<Vec<String>> = vec![Vec::new(); self.discrete_columns.len()];
        let mut indices: Vec<HashMap<String, usize>> =
            vec![HashMap::new(); self.discrete_columns.len()];
        let mut examples = Vec::new();

        for (row, record) in reader.records().enumerate() {
            let record = record?;
            let line = row + if self.has_headers { 2 } else { 1 };

            let target = self.parse_float(&record, line, self.target_column)?;
            let continuous = self
                .continuous_columns
                .iter()
                .map(|&column| self.parse_float(&record, line, column))
                .collect::<Result<Vec<_>, _>>()?;

            let mut discrete = Vec::with_capacity(self.discrete_columns.len());
            for (feature_idx, (name, column)) in self.discrete_columns.iter().enumerate() {
                let field = record.get(*column).ok_or(ReadError::MissingColumn {
                    line,
                    column: *column,
                })?;

                let mut values = Vec::new();
                for raw in field.split(self.list_separator) {
                    let raw = raw.trim();
                    if raw.is_empty() {
                        continue;
                    }

                    let next = catalogs[feature_idx].len();
                    let id = *indices[feature_idx].entry(raw.to_string()).or_insert(next);
                    if id == next {
                        catalogs[feature_idx].push(raw.to_string());
                    }
                    values.push(id);
                }

                if values.is_empty() {
                    return Err(ReadError::EmptyValues {
                        line,
                        feature: name.clone(),
                    });
                }
                discrete.push(values);
            }

            examples.push(Example::new(Array1::from(continuous), discrete, target));
        }

        let features = self
            .discrete_columns
            .iter()
            .zip(catalogs)
            .map(|((name, _), values)| Feature::new(name.clone(), values))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Dataset::from_examples(features, examples)?)
    }

    fn parse_float(
        &self,
        record: &StringRecord,
        line: usize,
        column: usize,
    ) -> Result<f64, ReadError> {
        let field = record
            .get(column)
            .ok_or(ReadError::MissingColumn { line, column })?;

        field
            .trim()
            .parse::<f64>()
            .map_err(|_| ReadError::Float { line, column })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader() -> TsvReader {
        TsvReader::new(3)
            .discrete_column("genres", 1)
            .continuous_column(2)
    }

    #[test]
    fn first_seen_order_defines_the_vocabulary() {
        let tsv = "title\tgenres\truntime\trating\n\
                   Alpha\tdrama,comedy\t104\t7.4\n\
                   Beta\thorror,drama\t88\t6.1\n";

        let dataset = reader().read(tsv.as_bytes()).unwrap();

        assert_eq!(dataset.feature(0).values(), ["drama", "comedy", "horror"]);
        assert_eq!(dataset.discrete(0, 0), &[0, 1]);
        assert_eq!(dataset.discrete(0, 1), &[0, 2]);
    }

    #[test]
    fn fields_are_trimmed_around_the_separator() {
        let tsv = "title\tgenres\truntime\trating\n\
                   Alpha\tdrama , comedy\t104\t7.4\n\
                   Beta\t drama \t88\t6.1\n";

        let dataset = reader().read(tsv.as_bytes()).unwrap();

        assert_eq!(dataset.feature(0).values(), ["drama", "comedy"]);
        assert_eq!(dataset.discrete(0, 1), &[0]);
    }

    #[test]
    fn parses_continuous_columns_and_the_target() {
        let tsv = "title\tgenres\truntime\trating\n\
                   Alpha\tdrama\t104\t7.4\n\
                   Beta\tcomedy\t88\t6.1\n";

        let dataset = reader().read(tsv.as_bytes()).unwrap();

        assert_eq!(dataset.nattributes(), 1);
        assert_eq!(dataset.continuous_row(0)[0], 104.0);
        assert_eq!(dataset.target(1), 6.1);
    }

    #[test]
    fn malformed_floats_are_located() {
        let tsv = "title\tgenres\truntime\trating\n\
                   Alpha\tdrama\t104\t7.4\n\
                   Beta\tcomedy\tninety\t6.1\n";

        let err = reader().read(tsv.as_bytes()).unwrap_err();

        assert!(matches!(err, ReadError::Float { line: 3, column: 2 }));
    }

    #[test]
    fn missing_columns_are_located() {
        let tsv = "Alpha\tdrama\n\
                   Beta\tcomedy\n";

        let err = reader().has_headers(false).read(tsv.as_bytes()).unwrap_err();

        assert!(matches!(err, ReadError::MissingColumn { line: 1, column: 3 }));
    }

    #[test]
    fn empty_value_lists_are_rejected() {
        let tsv = "title\tgenres\truntime\trating\n\
                   Alpha\tdrama\t104\t7.4\n\
                   Beta\t , \t88\t6.1\n";

        let err = reader().read(tsv.as_bytes()).unwrap_err();

        match err {
            ReadError::EmptyValues { line, feature } => {
                assert_eq!(line, 3);
                assert_eq!(feature, "genres");
            }
            other => panic!("unexpected error {}", other),
        }
    }

    #[test]
    fn alternative_delimiters_are_supported() {
        let csv = "Alpha;drama|comedy;104;7.4\n\
                   Beta;drama;88;6.1\n";

        let dataset = reader()
            .delimiter(b';')
            .list_separator('|')
            .has_headers(false)
            .read(csv.as_bytes())
            .unwrap();

        assert_eq!(dataset.nsamples(), 2);
        assert_eq!(dataset.feature(0).values(), ["drama", "comedy"]);
    }

    #[test]
    fn inputs_without_records_are_rejected() {
        let tsv = "title\tgenres\truntime\trating\n";

        assert!(reader().read(tsv.as_bytes()).is_err());
    }
}
