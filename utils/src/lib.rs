//! Shared infrastructure utilities for the AppCenter client.
//!
//! - **`time`**: loose timestamp parsing, timezone-aware display, coarse
//!   relative-time rendering
//! - **`fs`**: crash-safe persistence for small credential files

pub mod fs;
pub mod time;

pub use fs::atomic_write_sensitive;
pub use time::{
    MISSING_DISPLAY, format_instant, format_value, instant_from_value, parse_instant, relative,
    relative_from,
};
