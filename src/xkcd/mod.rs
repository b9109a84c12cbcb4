pub mod client;
pub mod error;
pub mod types;

pub use client::XkcdClient;
pub use error::XkcdError;
