// Crate root library declaration and module exports.
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod model;
pub mod reconcile;
pub mod storage;

pub use error::FuseError;
