//! Domain types and normalization rules for the beep log.

pub mod dates;
pub mod error;
pub mod models;
pub mod observers;
pub mod settings;
pub mod time_utils;
