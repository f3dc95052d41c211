pub mod cli;
pub mod config;
pub mod core;
pub mod data;
pub mod util;

pub use config::Config;
pub use core::ClinicCore;
pub use data::{
    Appointment, AppointmentStatus, ClinicRegistry, ClinicStats, Database, DatabaseError, Doctor,
    IdAllocator, Patient, RecordKind, RegistryError, SnapshotStore,
};
