//! manasooth-core
//!
//! Pure domain types, storage key conventions, and the static helpline
//! directory. No I/O: this is the shared vocabulary of the Manasooth system.

pub mod error;
pub mod helplines;
pub mod models;
pub mod storage_keys;
