//! # Rendering
//!
//! - [`console`] formats aggregate results as text for stdout.
//! - [`charts`] draws the hourly counts and tip correlation charts as PNG files.

pub mod charts;
pub mod console;
