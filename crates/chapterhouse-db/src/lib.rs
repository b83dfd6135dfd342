//! Postgres storage for members, word-of-the-day items and the rotation
//! schedule.

pub mod db;
pub mod error;
pub mod model;
