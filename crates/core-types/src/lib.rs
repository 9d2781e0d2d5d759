//! # Cardledger Core Types
//!
//! Layer 0 value types shared by every other crate: calendar windows, query
//! intervals, raw transaction records and the categorized items built from them.
//! This crate has no knowledge of transports, formatting or documents.

pub mod enums;
pub mod error;
pub mod records;
pub mod window;

// Re-export the core types to provide a clean public API.
pub use enums::{Category, TransactionKind};
pub use error::CoreError;
pub use records::{CategorizedItem, RawPayload, RawRecord, index_width, item_key};
pub use window::{CalendarWindow, QueryInterval, trailing_month_windows};
