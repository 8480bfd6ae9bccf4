//! Analytics core of the schema audit dashboard.
//!
//! [`data`] turns an immutable set of page records into summary statistics,
//! frequency tables, a recommendation priority matrix and a filtered,
//! paginated view. [`state::AppState`] owns the filter and page state and
//! keeps those views current.

pub mod data;
pub mod error;
pub mod state;

pub use error::LoadError;
