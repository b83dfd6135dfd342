pub mod member;
pub mod rotation;
pub mod word;
