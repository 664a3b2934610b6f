pub mod dto;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod store;

pub use error::{Result, StorageError};
pub use store::Store;
