//! User profile module.

pub mod types;

pub use types::User;
