//! Computation core: pure functions over a borrowed [`SurveyDataset`].
//!
//! [`SurveyDataset`]: crate::data::model::SurveyDataset

pub mod projection;
pub mod relationship;
pub mod stats;

pub use projection::{project_salaries, projection_rows, ProjectionParams, ProjectionRow, SalaryProjection};
pub use relationship::{analyze_relationships, PairFrame, RelationshipPair, RelationshipReport, RelationshipSummary};
