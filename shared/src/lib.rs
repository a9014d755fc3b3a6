//! Shared types for the storefront admin service
//!
//! Pure domain types used by the server crate (and any future client):
//! catalog enums, monetary arithmetic, order timestamp normalization and
//! the unified API response envelope. No I/O in this crate.

pub mod catalog;
pub mod money;
pub mod response;
pub mod timestamp;

// Re-exports
pub use catalog::{Category, Size};
pub use money::{order_total, round_money};
pub use response::{ApiResponse, API_CODE_SUCCESS};
pub use timestamp::OrderTimestamp;
