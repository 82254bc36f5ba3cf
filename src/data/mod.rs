/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → PublicationTable (sorted by citations)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  inclusive year range → filtered PublicationTable
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  per-year counts, citation ranking, keyword frequency
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
