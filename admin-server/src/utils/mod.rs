//! Common utilities and shared infrastructure
//!
//! - Error handling ([`AppError`], [`AppResult`])
//! - Logging setup

pub mod error;
pub mod logger;
pub mod result;

pub use error::AppError;
pub use logger::{init_logger, init_logger_with_file};
pub use result::AppResult;
