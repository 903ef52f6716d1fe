pub mod message;
pub mod suggestion;
pub mod session;
pub mod event;
pub mod config;
pub mod error;

#[cfg(test)]
mod tests;

pub use error::RelayError;
pub type Result<T> = std::result::Result<T, RelayError>;
