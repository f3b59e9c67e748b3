//! Common test infrastructure
//!
//! Fixtures shared by the integration tests. Tests should only import from
//! this module.

mod fixtures;

#[allow(unused_imports)]
pub use fixtures::{announcement_rows, feed_tool_bin, other_row, topic_titles, write_temp_file};
