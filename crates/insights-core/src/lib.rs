//! Core domain layer for the e-commerce order analytics pipeline.
//!
//! Defines the cleaned record types, the aggregate table shapes handed to
//! the report layer, the error taxonomy, and purchase-timestamp parsing.

pub mod error;
pub mod models;
pub mod time_utils;
