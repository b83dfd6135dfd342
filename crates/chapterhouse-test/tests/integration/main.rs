//! Integration tests against a real `PostgreSQL` server.
//!
//! Ignored by default; run with `cargo test -p chapterhouse-test -- --ignored`
//! once `TEST_DATABASE_URL` (or the compose container) is reachable.

mod family_tree;
mod helpers;
mod spiritual_parents;
mod words;
