//! Data layer: season loading, row filtering, aggregation and the views
//! derived from the summary table.
//!
//! Architecture:
//! ```text
//!  data_{1,2,3}_{season}.parquet  (or .csv / .json)
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  read + concatenate partitions → PitchDataset
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  order pass / pitch type / multi-pass pitchers → QualifiedPitch
//!   └──────────┘
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ aggregate  │  usage, baselines, situations, merge → SummaryTable
//!   └───────────┘
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ selection  │  player → pitch type → pitch count → visible indices
//!   └───────────┘
//!        │
//!        ├──▶ table  (display schema)  ──▶ export (CSV)
//!        └──▶ chart  (usage series)
//! ```

pub mod aggregate;
pub mod chart;
pub mod error;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod selection;
pub mod table;
