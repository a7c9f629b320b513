//! ## Logging Configuration
//!
//! This module sets up logging automatically at program startup using the `ctor` crate.
//! Logging behavior is controlled by the `DEBUG_TAXI_REPORT` environment variable:
//!
//! - **Disabled** (default): If the variable is unset, empty, or explicitly set to `"0"` or
//!   `"false"`, no logging will be initialized.
//! - **Enabled**: Any other value enables logging with a maximum log level of `DEBUG`.
//!
//! The report itself is printed to stdout regardless of this setting.
//!
//! ### Usage Example
//!
//! ```sh
//! DEBUG_TAXI_REPORT=true taxi-report
//! ```

use ctor::ctor;
use tracing::Level;

/// Returns true when the given value of `DEBUG_TAXI_REPORT` turns logging on.
pub(crate) fn logging_enabled(value: Option<&str>) -> bool {
    !value.map_or(true, |v| v == "0" || v == "false" || v.is_empty())
}

#[ctor]
fn set_debug_level() {
    let value = std::env::var("DEBUG_TAXI_REPORT").ok();
    if logging_enabled(value.as_deref()) {
        tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .init();
    }
}
