//! Feature alignment for the classifier.
//!
//! The classifier only understands rows laid out exactly like its training
//! data. This module turns a patient's raw fields into such a row:
//!
//! 1. Supplied numeric fields pass through the imputer, which replaces a
//!    field supplied without a value by its fitted statistic
//! 2. The categorical sex field becomes dummy columns `Sex_<value>`
//! 3. Any training column absent from the input is zero
//! 4. Values are emitted in training-column order
//!
//! Supplied fields with no training column are dropped.

use crate::imputer::SimpleImputer;
use std::collections::HashMap;

/// Column holding the patient's age.
pub const AGE_COLUMN: &str = "Age";

/// Prefix of the one-hot columns derived from the sex field.
pub const SEX_PREFIX: &str = "Sex_";

/// Raw per-patient fields before alignment.
///
/// A `None` value marks a field the caller supplied without a measurement.
#[derive(Debug, Clone, Default)]
pub struct PatientFeatures {
    pub age: f64,
    pub sex: String,
    pub values: HashMap<String, Option<f64>>,
}

impl PatientFeatures {
    pub fn new(age: f64, sex: impl Into<String>) -> Self {
        Self {
            age,
            sex: sex.into(),
            values: HashMap::new(),
        }
    }

    pub fn with_value(mut self, column: impl Into<String>, value: f64) -> Self {
        self.values.insert(column.into(), Some(value));
        self
    }

    /// Mark a field as supplied but empty; alignment imputes it.
    pub fn with_missing(mut self, column: impl Into<String>) -> Self {
        self.values.insert(column.into(), None);
        self
    }

    /// `None` when the field was not supplied at all.
    fn supplied(&self, column: &str) -> Option<Option<f64>> {
        if column == AGE_COLUMN {
            Some(Some(self.age))
        } else {
            self.values.get(column).copied()
        }
    }

    fn dummy_column(&self) -> String {
        format!("{}{}", SEX_PREFIX, self.sex)
    }
}

/// A row in training-column order.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedRow<'a> {
    columns: &'a [String],
    values: Vec<f64>,
}

impl<'a> AlignedRow<'a> {
    pub fn columns(&self) -> &'a [String] {
        self.columns
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, column: &str) -> Option<f64> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|i| self.values[i])
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Aligns raw patient fields to a fixed training layout.
#[derive(Debug, Clone, Copy)]
pub struct FeatureAligner<'a> {
    training_columns: &'a [String],
    imputer: &'a SimpleImputer,
}

impl<'a> FeatureAligner<'a> {
    pub fn new(training_columns: &'a [String], imputer: &'a SimpleImputer) -> Self {
        Self {
            training_columns,
            imputer,
        }
    }

    /// Build the model input row.
    ///
    /// The returned row always has exactly the training columns, in order,
    /// whatever subset of fields `features` carries.
    pub fn align(&self, features: &PatientFeatures) -> AlignedRow<'a> {
        let dummy = features.dummy_column();

        let values = self
            .training_columns
            .iter()
            .map(|column| match features.supplied(column) {
                Some(observed) => self
                    .imputer
                    .fill(column, observed)
                    .or(observed)
                    .unwrap_or(0.0),
                None if column.starts_with(SEX_PREFIX) => {
                    if *column == dummy { 1.0 } else { 0.0 }
                }
                None => 0.0,
            })
            .collect();

        AlignedRow {
            columns: self.training_columns,
            values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imputer::ImputeStrategy;

    fn columns() -> Vec<String> {
        ["Age", "Hemoglobin", "WBC", "PLT", "Sex_female", "Sex_male"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn imputer() -> SimpleImputer {
        SimpleImputer::new(
            ImputeStrategy::Mean,
            vec!["Age".into(), "Hemoglobin".into(), "WBC".into()],
            vec![45.0, 14.0, 7.0],
        )
        .unwrap()
    }

    #[test]
    fn test_alignment_order_and_imputation() {
        let columns = columns();
        let imputer = imputer();
        let aligner = FeatureAligner::new(&columns, &imputer);

        let features = PatientFeatures::new(30.0, "male")
            .with_value("Hemoglobin", 10.0)
            .with_value("PLT", 250.0);
        let row = aligner.align(&features);

        assert_eq!(row.columns(), columns.as_slice());
        assert_eq!(row.values(), &[30.0, 10.0, 0.0, 250.0, 0.0, 1.0]);
    }

    #[test]
    fn test_only_supplied_empty_fields_are_imputed() {
        let columns = columns();
        let imputer = imputer();
        let aligner = FeatureAligner::new(&columns, &imputer);

        let row = aligner.align(&PatientFeatures::new(30.0, "male"));
        assert_eq!(row.get("Hemoglobin"), Some(0.0));
        assert_eq!(row.get("WBC"), Some(0.0));

        let row = aligner.align(
            &PatientFeatures::new(30.0, "male")
                .with_missing("WBC")
                .with_missing("PLT"),
        );
        assert_eq!(row.get("WBC"), Some(7.0));
        // PLT has no fitted statistic, so an empty PLT stays zero
        assert_eq!(row.get("PLT"), Some(0.0));
        assert_eq!(row.get("Hemoglobin"), Some(0.0));
    }

    #[test]
    fn test_unknown_fields_dropped_and_absent_zeroed() {
        let columns = columns();
        let imputer = imputer();
        let aligner = FeatureAligner::new(&columns, &imputer);

        let features = PatientFeatures::new(61.0, "other").with_value("ESR", 40.0);
        let row = aligner.align(&features);

        assert_eq!(row.len(), columns.len());
        assert_eq!(row.get("ESR"), None);
        assert_eq!(row.get("PLT"), Some(0.0));
        assert_eq!(row.get("Sex_female"), Some(0.0));
        assert_eq!(row.get("Sex_male"), Some(0.0));
    }

    #[test]
    fn test_female_dummy() {
        let columns = columns();
        let imputer = imputer();
        let row = FeatureAligner::new(&columns, &imputer).align(&PatientFeatures::new(25.0, "female"));
        assert_eq!(row.get("Sex_female"), Some(1.0));
        assert_eq!(row.get("Sex_male"), Some(0.0));
    }
}
