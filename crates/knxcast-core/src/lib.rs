//! KNX time/date broadcasting primitives in pure Rust.
//!
//! `knxcast-core` provides the bit-exact datapoint encoders (DPT 10.001
//! time-of-day, DPT 11.001 calendar date), KNX group/individual addressing,
//! and the daily send-time scheduler used by the knxcast crate family. It is
//! `no_std`-compatible and free of I/O: the current instant is always passed
//! in by the caller, never read from a clock here.
//!
//! # Feature flags
//!
//! - **`std`** (default) — enables `std::error::Error` implementations.
//! - **`serde`** — derives `Serialize`/`Deserialize` on configuration-facing types.
//! - **`defmt`** — derives `defmt::Format` for embedded logging.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

/// DPT 10.001 and DPT 11.001 datapoint encoders.
pub mod dpt;
/// Bounds-checked fixed-buffer frame writer.
pub mod encoding;
/// Error types for frame encoding and address parsing.
pub mod error;
/// Daily send-time scheduling.
pub mod schedule;
/// KNX addressing and wall-clock value types.
pub mod types;

pub use error::{AddressParseError, EncodeError};
pub use schedule::{next_fire_delay, DailyTarget, ScheduleDecision};
pub use types::{Date, GroupAddress, IndividualAddress, Time};
