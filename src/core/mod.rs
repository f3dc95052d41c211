//! Core module wiring the record store to its persistence.
//!
//! [`ClinicCore`] is the narrow boundary the CLI (or any other front end)
//! calls through: typed operations in, identifiers/blobs/stats out, with
//! snapshots written behind the scenes after every successful mutation.

mod clinic_core;

pub use clinic_core::ClinicCore;
