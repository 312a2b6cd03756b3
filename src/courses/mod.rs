//! Course aggregation and querying.
//!
//! Raw per-offering grade rows are folded into one summary per course,
//! held in a [`catalog::CourseCatalog`], and filtered per query into a
//! chart specification and a table.

pub mod aggregate;
pub mod catalog;
pub mod filter;
pub mod types;
pub mod utility;
