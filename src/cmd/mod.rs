pub mod search;
pub mod validate;
