//! Shared configuration, route constants and small helpers used by every
//! Chapterhouse crate.

pub mod config;
pub mod constants;
pub mod error;
pub mod util;
