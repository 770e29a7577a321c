//! Change set discovery from a git working tree.

pub mod git;
pub mod stats;

pub use git::{collect_change_set, collect_from_path};
pub use stats::compute_statistics;
