//! Core domain types for blood panels.
//!
//! Reference data is immutable and lives in `'static` tables (see
//! [`crate::tables`]), so the definitions below borrow `&'static str`
//! instead of owning strings.

use serde::Serialize;
use std::fmt;

// =============================================================================
// Patient attributes
// =============================================================================

/// Gender as used for selecting reference ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Parse a lowercased gender label. Anything other than "male" or
    /// "female" has no gender-specific range.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

// =============================================================================
// Reference ranges
// =============================================================================

/// Outcome of comparing a value against its reference range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Low,
    Normal,
    High,
}

impl Status {
    pub fn is_abnormal(&self) -> bool {
        !matches!(self, Status::Normal)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Low => "low",
            Status::Normal => "normal",
            Status::High => "high",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed interval `[min, max]` considered normal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RangeBounds {
    pub min: f64,
    pub max: f64,
    /// Display text as written in the reference table, e.g. `12.0-15.5`
    #[serde(skip)]
    text: Option<&'static str>,
}

impl RangeBounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max, text: None }
    }

    /// Bounds that display exactly as `text` rather than in shortest form.
    pub const fn written(min: f64, max: f64, text: &'static str) -> Self {
        Self {
            min,
            max,
            text: Some(text),
        }
    }

    /// Strict comparison: values equal to a bound are normal.
    pub fn classify(&self, value: f64) -> Status {
        if value < self.min {
            Status::Low
        } else if value > self.max {
            Status::High
        } else {
            Status::Normal
        }
    }
}

impl fmt::Display for RangeBounds {
    /// Rendered as `min-max`: the table's own text when there is one,
    /// e.g. `12.0-15.5` or `0-20`, otherwise the shortest form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.text {
            Some(text) => f.write_str(text),
            None => write!(f, "{}-{}", self.min, self.max),
        }
    }
}

/// Either one range for everyone, or a male/female pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReferenceRanges {
    Default(RangeBounds),
    ByGender {
        male: RangeBounds,
        female: RangeBounds,
    },
}

impl ReferenceRanges {
    /// Select the applicable range.
    ///
    /// Default ranges apply regardless of gender. Gender-specific ranges
    /// need a recognised gender; otherwise there is no applicable range.
    pub fn for_gender(&self, gender: Option<Gender>) -> Option<RangeBounds> {
        match (self, gender) {
            (ReferenceRanges::Default(bounds), _) => Some(*bounds),
            (ReferenceRanges::ByGender { male, .. }, Some(Gender::Male)) => Some(*male),
            (ReferenceRanges::ByGender { female, .. }, Some(Gender::Female)) => Some(*female),
            (ReferenceRanges::ByGender { .. }, None) => None,
        }
    }

    pub fn is_gender_specific(&self) -> bool {
        matches!(self, ReferenceRanges::ByGender { .. })
    }
}

// =============================================================================
// Static reference records
// =============================================================================

/// Clinical text attached to an out-of-range state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateText {
    pub condition: &'static str,
    pub symptoms: &'static str,
}

/// Reference record for one analyte.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestDefinition {
    /// Key used in submitted panels and training columns (e.g. "NEU%")
    pub code: &'static str,
    pub name: &'static str,
    pub units: &'static str,
    pub ranges: ReferenceRanges,
    pub low: StateText,
    pub high: StateText,
}

impl TestDefinition {
    /// Text for the given state; `None` for normal values.
    pub fn state_text(&self, status: Status) -> Option<&StateText> {
        match status {
            Status::Low => Some(&self.low),
            Status::High => Some(&self.high),
            Status::Normal => None,
        }
    }
}

/// Named condition with a description and recommended actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Abnormality {
    pub name: &'static str,
    pub description: &'static str,
    pub recommendations: &'static [&'static str],
}
