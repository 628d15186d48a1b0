/// Data layer: survey types, coercion, and loading.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → SurveyDataset (cells coerced, never fail)
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ SurveyDataset │  Vec<SurveyRecord>, header, university index
///   └───────────────┘
///        │
///        ▼
///   analysis::{projection, relationship}
/// ```

pub mod loader;
pub mod model;
