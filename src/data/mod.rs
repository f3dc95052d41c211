//! Record store and persistence layer for Wardbook
//!
//! This module holds the in-memory clinic registry, the flat wire codec its
//! collections serialize through, and the SQLite-backed snapshot store the
//! blobs persist in.

mod codec;
mod database;
mod ids;
mod migrations;
mod models;
mod registry;
mod snapshot;
mod stats;

pub use codec::{decode_blob, decode_record, encode_blob, encode_record, WireRecord, FIELD_SEPARATOR};
pub use database::{Database, DatabaseError};
pub use ids::IdAllocator;
pub use models::{Appointment, AppointmentStatus, Doctor, Patient, RecordKind};
pub use registry::{ClinicRegistry, RegistryError};
pub use snapshot::SnapshotStore;
pub use stats::ClinicStats;
