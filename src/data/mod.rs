/// Data layer: core types, loading, and extraction.
///
/// Architecture:
/// ```text
///  .xls / .xlsx / .csv / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  positional columns → StationTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ StationTable │  Vec<StationRow>, exact-name matching
///   └──────────────┘
///        │   + StationSelection
///        ▼
///   ┌──────────┐
///   │ extract   │  matching rows → ExtractedSeries
///   └──────────┘
/// ```

pub mod extract;
pub mod loader;
pub mod model;
