//! Row-level detection
//!
//! This module contains the per-row work done before any digit is decoded:
//! - Threshold estimation and the contrast gate
//! - Start guard location and module width estimation

/// Start guard search (bar-space-bar ratio checks)
pub mod guard;
/// Min/max threshold and contrast gate for one pixel row
pub mod threshold;

pub use guard::{Guard, GuardLocator};
pub use threshold::RowThreshold;
