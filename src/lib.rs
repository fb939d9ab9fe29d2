//! COVID-19 India Dashboard
//!
//! Loads the statewise case and vaccination reports, derives the dashboard
//! aggregates once, and presents them in a native window or a browser page.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod logging;
pub mod report;
pub mod stats;
