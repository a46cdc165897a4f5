pub mod github;
pub mod medium;
