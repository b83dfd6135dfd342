pub mod id;
pub mod pagination;
