//! Rendering module for turning parsed documents into text output.

mod json;
mod listing;
mod report;

pub use json::{to_json, JsonFormat};
pub use listing::{to_listing, write_listing};
pub use report::{to_report, write_report, BANNER_WIDTH};
