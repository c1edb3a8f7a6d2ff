//! Data ingestion layer for the beep log.
//!
//! Reads the CSV log into a normalised [`Dataset`](beep_core::models::Dataset)
//! and aggregates it into cumulative counts per day and per observer.

pub mod aggregator;
pub mod reader;
