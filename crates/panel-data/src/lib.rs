//! # Panel Data Crate
//!
//! Reference data and request types for blood panel analysis.
//!
//! ## Main Components
//!
//! - **types**: Domain types (Gender, Status, RangeBounds, TestDefinition, Abnormality)
//! - **tables**: The static analyte and abnormality tables
//! - **catalog**: Indexed lookups over those tables
//! - **parser**: Validate submitted panels into a `PanelRequest`
//! - **error**: Error types for request validation
//!
//! ## Example Usage
//!
//! ```ignore
//! use panel_data::{parse_panel_body, ReferenceCatalog};
//!
//! let request = parse_panel_body(br#"{"gender":"male","age":30,"testResults":{"Hemoglobin":10}}"#)?;
//! let hb = ReferenceCatalog::standard().get_test("Hemoglobin").unwrap();
//! let range = hb.ranges.for_gender(request.sex()).unwrap();
//! println!("{} {}", range, range.classify(10.0));
//! ```

pub mod catalog;
pub mod error;
pub mod parser;
pub mod tables;
pub mod types;

pub use catalog::ReferenceCatalog;
pub use error::{PanelError, Result};
pub use parser::{parse_panel_body, parse_panel_request, PanelRequest};
pub use types::{
    Abnormality,
    Gender,
    RangeBounds,
    ReferenceRanges,
    StateText,
    Status,
    TestDefinition,
};
