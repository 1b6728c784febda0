//! # dirlink-client
//!
//! Adapter layer of the dirlink directory client: turns the asynchronous
//! [`Connection`] capability into blocking calls with typed failures,
//! streaming search accumulation, and single-entry search resolution.
//!
//! The transport behind [`Connection`] — wire encoding, connection
//! establishment, security — is a separate concern and is consumed, not
//! implemented, here.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod accumulator;
mod client;
mod connection;
mod single_entry;

pub use accumulator::EntrySink;
pub use client::DirectoryClient;
pub use connection::{Connection, EntryHandler, IntermediateHandler};
pub use single_entry::{classify_single_result, TruncationPolicy};

/// Convenient result alias that reuses the core error type.
pub type Result<T> = dirlink_core::Result<T>;
