pub mod api;
pub mod client;
pub mod core;

pub use client::{build_client, MudrexClient};
pub use core::config::MudrexConfig;
pub use core::errors::{ErrorKind, MudrexError};
pub use core::types::Pagination;
