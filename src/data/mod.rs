//! Data layer: core types, loading, aggregation, filtering and paging.
//!
//! Architecture:
//! ```text
//!  .json / .csv / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → rows of cells → Dataset
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ Dataset   │  Vec<Record>, immutable
//!   └──────────┘
//!      │      │
//!      ▼      ▼
//!   ┌───────────┐  ┌──────────┐
//!   │ aggregate  │  │  filter   │  FilterState → record indices
//!   └───────────┘  └──────────┘
//!    (once per            │
//!     dataset)            ▼
//!                   ┌──────────┐
//!                   │ paginate  │  indices + PageState → Page
//!                   └──────────┘
//! ```
pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
pub mod paginate;
pub mod tokens;
