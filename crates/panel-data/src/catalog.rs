//! Lookup index over the static reference tables.

use crate::tables::{ABNORMALITIES, BLOOD_TESTS};
use crate::types::{Abnormality, TestDefinition};
use std::collections::HashMap;
use std::sync::LazyLock;

static STANDARD: LazyLock<ReferenceCatalog> =
    LazyLock::new(|| ReferenceCatalog::from_tables(BLOOD_TESTS, ABNORMALITIES));

/// Read-only index over test definitions and the abnormality catalog.
///
/// Lookups are by exact code / condition name, as submitted. Iteration
/// follows table order.
#[derive(Debug, Clone)]
pub struct ReferenceCatalog {
    tests: &'static [TestDefinition],
    abnormalities: &'static [Abnormality],
    test_index: HashMap<&'static str, usize>,
    abnormality_index: HashMap<&'static str, usize>,
}

impl ReferenceCatalog {
    /// The catalog compiled into this crate.
    pub fn standard() -> &'static ReferenceCatalog {
        &STANDARD
    }

    /// Build an index over arbitrary static tables.
    pub fn from_tables(
        tests: &'static [TestDefinition],
        abnormalities: &'static [Abnormality],
    ) -> Self {
        let test_index = tests
            .iter()
            .enumerate()
            .map(|(i, t)| (t.code, i))
            .collect();
        let abnormality_index = abnormalities
            .iter()
            .enumerate()
            .map(|(i, a)| (a.name, i))
            .collect();

        Self {
            tests,
            abnormalities,
            test_index,
            abnormality_index,
        }
    }

    pub fn get_test(&self, code: &str) -> Option<&'static TestDefinition> {
        let tests = self.tests;
        self.test_index.get(code).map(|&i| &tests[i])
    }

    pub fn get_abnormality(&self, name: &str) -> Option<&'static Abnormality> {
        let abnormalities = self.abnormalities;
        self.abnormality_index.get(name).map(|&i| &abnormalities[i])
    }

    /// Position of a test in table order, used to order reports.
    pub fn test_position(&self, code: &str) -> Option<usize> {
        self.test_index.get(code).copied()
    }

    pub fn tests(&self) -> impl Iterator<Item = &'static TestDefinition> {
        self.tests.iter()
    }

    pub fn abnormalities(&self) -> impl Iterator<Item = &'static Abnormality> {
        self.abnormalities.iter()
    }

    /// Returns (tests, abnormalities)
    pub fn counts(&self) -> (usize, usize) {
        (self.tests.len(), self.abnormalities.len())
    }
}
