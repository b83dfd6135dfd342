//! Application logic: the lineage graph, the word-of-the-day rotator and the
//! CRUD services that feed them.

pub mod error;
pub mod lineage;
pub mod member;
pub mod rotation;
pub mod word;
