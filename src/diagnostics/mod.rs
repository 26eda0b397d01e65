//! Build log reduction
//!
//! Turns the raw, repetitive toolchain log into a short, sorted, deduplicated
//! report of error lines.

mod reducer;

pub use reducer::{
    is_error_line, normalize_error_line, reduce_log_file, ErrorReport, NormalizedError,
    ERROR_LABEL,
};
