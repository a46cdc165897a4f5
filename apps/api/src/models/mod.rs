pub mod blog;
pub mod cache;
pub mod contact;
