mod auth;
pub mod client;
pub mod error;
mod functions;
mod resources;
pub mod types;

pub use client::*;
pub use error::*;
pub use resources::FILE_STORAGE_BUCKET;
pub use types::*;
