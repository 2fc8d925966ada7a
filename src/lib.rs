//! Sunshade pointing planner.
//!
//! Checks whether a spacecraft pointing keeps the Sun behind the sunshade, on
//! the +X side, and inside the Y off-axis limit for a whole observation
//! sector. The workspace crates are re-exported here so the binaries and
//! downstream tools share one entry point.

pub mod planner;

pub use sunshade_attitude as attitude;
pub use sunshade_config as config;
pub use sunshade_core as geometry;
pub use sunshade_export as export;
pub use sunshade_survey as survey;
