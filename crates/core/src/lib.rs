//! QueueMate Core - Shared types library.
//!
//! This crate provides the domain types used across the QueueMate client:
//! - `client` - Session store, navigation gate and REST client
//! - `cli` - Terminal front-end for shop owners
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no storage,
//! no HTTP clients. Wire types mirror the JSON the QueueMate backend returns.
//!
//! # Modules
//!
//! - [`types`] - Emails, passwords, IDs, statuses, shops, barbers and queue entries

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
