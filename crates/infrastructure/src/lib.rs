//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod http_user_directory;
mod in_memory_user_directory;

pub use http_user_directory::HttpUserDirectory;
pub use in_memory_user_directory::InMemoryUserDirectory;
