//! Data transformation layer for the e-commerce order analytics pipeline.
//!
//! Responsible for normalizing raw loader-supplied tables, extracting
//! calendar fields from purchase timestamps, joining orders to customers,
//! computing the aggregate tables and running the top-level analysis
//! pipeline.

pub mod aggregate;
pub mod analysis;
pub mod extract;
pub mod join;
pub mod normalize;

pub use insights_core as core;
