//! Request activity tracking.
//!
//! The log itself is a plain locked list; the exclusion set decides which
//! paths feed it, and the display helpers turn records into table rows.

pub mod display;
pub mod exclusion;
pub mod log;

pub use display::{humanize_page, ActivityRow};
pub use exclusion::ExclusionSet;
pub use log::{ActivityLog, ActivityRecord};
