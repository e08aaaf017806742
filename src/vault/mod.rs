pub mod codec;
pub mod error;
pub mod memory;
pub mod models;
pub mod ports;
pub mod service;

pub use error::StoreError;
pub use service::PasswordStore;
