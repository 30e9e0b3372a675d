//! Training-matrix generation
//!
//! Labeled name pairs come from an external dataset as CSV with the columns
//! `name1,name2,is_match`. Each row is featurized with the same
//! [`FeatureExtractor`] used at inference time, and row order is preserved
//! between the matrix and its labels.

use crate::error::{Error, Result};
use crate::features::{FeatureExtractor, FeatureVector, FEATURE_NAMES};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

/// One labeled training pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledPair {
    #[serde(default)]
    pub name1: String,
    #[serde(default)]
    pub name2: String,
    pub is_match: u8,
}

impl LabeledPair {
    pub fn new(name1: impl Into<String>, name2: impl Into<String>, is_match: bool) -> Self {
        Self {
            name1: name1.into(),
            name2: name2.into(),
            is_match: is_match as u8,
        }
    }
}

/// Feature rows and their labels, aligned by index
#[derive(Debug, Clone, Default)]
pub struct TrainingMatrix {
    pub rows: Vec<FeatureVector>,
    pub labels: Vec<u8>,
}

impl TrainingMatrix {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Fraction of positive labels, 0 for an empty matrix
    pub fn positive_rate(&self) -> f64 {
        if self.labels.is_empty() {
            return 0.0;
        }
        let positives = self.labels.iter().filter(|&&l| l == 1).count();
        positives as f64 / self.labels.len() as f64
    }
}

/// Read labeled pairs from CSV with a `name1,name2,is_match` header
///
/// Labels other than 0 or 1 are rejected with the offending row number
/// (1-based, header excluded).
pub fn read_pairs<R: Read>(reader: R) -> Result<Vec<LabeledPair>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut pairs = Vec::new();
    for (i, record) in rdr.deserialize::<LabeledPair>().enumerate() {
        let pair = record?;
        if pair.is_match > 1 {
            return Err(Error::InvalidInput(format!(
                "row {}: is_match must be 0 or 1, got {}",
                i + 1,
                pair.is_match
            )));
        }
        pairs.push(pair);
    }
    Ok(pairs)
}

/// Featurize pairs row by row, preserving order
pub fn featurize_pairs(pairs: &[LabeledPair]) -> TrainingMatrix {
    let extractor = FeatureExtractor::new();
    let mut matrix = TrainingMatrix {
        rows: Vec::with_capacity(pairs.len()),
        labels: Vec::with_capacity(pairs.len()),
    };
    for pair in pairs {
        matrix.rows.push(extractor.extract(&pair.name1, &pair.name2));
        matrix.labels.push(pair.is_match);
    }
    matrix
}

/// Write the matrix as CSV: the feature names in vector order, then `is_match`
pub fn write_matrix_csv<W: Write>(matrix: &TrainingMatrix, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header: Vec<&str> = FEATURE_NAMES.to_vec();
    header.push("is_match");
    wtr.write_record(&header)?;

    for (row, label) in matrix.rows.iter().zip(&matrix.labels) {
        let mut record: Vec<String> = row.as_slice().iter().map(|v| v.to_string()).collect();
        record.push(label.to_string());
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}
