//! Display formatting shared by list screens

mod compact_number;
mod relative_time;

pub use compact_number::format_compact_number;
pub use relative_time::{default_text, format_relative_time, format_remaining_time};
