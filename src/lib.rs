//! Alliance Rules - rule listings sourced from a published Google Sheet.
//!
//! The sheet is fetched as CSV, its `Category` column normalized, and the rows
//! rendered per category in the selected language.

pub mod config;
pub mod data;
pub mod gui;
pub mod logging;
pub mod rules;
