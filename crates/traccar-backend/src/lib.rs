pub mod client;
mod convert;
pub mod error;
pub mod models;
mod trait_impl;


pub use client::TraccarClient;
pub use error::{Result, TraccarError};
pub use models::*;

// Re-export useradmin-core types for convenience
pub use useradmin_core::{AdminError, UserStore};
