//! Core infrastructure tying the registry to the snapshot store.

use std::sync::Mutex;

use crate::config::Config;
use crate::data::{
    ClinicRegistry, ClinicStats, Database, RecordKind, RegistryError, SnapshotStore,
};

/// Owns the clinic registry and its persistence.
///
/// Every mutating operation locks the registry, applies the change, and — when
/// a database is attached — writes all three collection blobs back out, so the
/// persisted snapshots always mirror the last successful mutation. When the
/// database cannot be opened the core degrades to memory-only operation with a
/// logged warning rather than refusing to start.
pub struct ClinicCore {
    /// Record collections behind the single-writer lock
    registry: Mutex<ClinicRegistry>,
    /// Database connection (owned to keep the connection alive)
    _database: Option<Database>,
    /// Snapshot store for the persisted blobs
    snapshots: Option<SnapshotStore>,
}

impl ClinicCore {
    /// Open the core on a database, restoring any saved snapshots.
    ///
    /// Restore order is patients, doctors, appointments, so appointment
    /// references resolve against fully restored collections.
    pub fn open(database: Database) -> Self {
        let snapshots = SnapshotStore::new(database.connection());
        let mut registry = ClinicRegistry::new();

        if let Some(blob) = load_snapshot(&snapshots, RecordKind::Patient) {
            let restored = registry.restore_patients(&blob);
            tracing::info!(restored, "Restored patient records");
        }
        if let Some(blob) = load_snapshot(&snapshots, RecordKind::Doctor) {
            let restored = registry.restore_doctors(&blob);
            tracing::info!(restored, "Restored doctor records");
        }
        if let Some(blob) = load_snapshot(&snapshots, RecordKind::Appointment) {
            let restored = registry.restore_appointments(&blob);
            tracing::info!(restored, "Restored appointment records");
        }

        Self {
            registry: Mutex::new(registry),
            _database: Some(database),
            snapshots: Some(snapshots),
        }
    }

    /// Open against the configured database location, degrading to
    /// memory-only when it is unavailable.
    pub fn with_config(config: &Config) -> Self {
        let path = crate::util::data_dir().join(&config.database_file);
        match Database::open(path) {
            Ok(database) => Self::open(database),
            Err(error) => {
                tracing::warn!(%error, "Failed to open database, records will not persist");
                Self::in_memory()
            }
        }
    }

    /// A core with no persistence attached
    pub fn in_memory() -> Self {
        Self {
            registry: Mutex::new(ClinicRegistry::new()),
            _database: None,
            snapshots: None,
        }
    }

    // --- Patients ---

    pub fn create_patient(
        &self,
        name: &str,
        age: u32,
        gender: &str,
        address: &str,
        phone: &str,
    ) -> Result<u32, RegistryError> {
        let mut registry = self.registry.lock().unwrap();
        let id = registry.create_patient(name, age, gender, address, phone)?;
        self.persist(&registry);
        Ok(id)
    }

    pub fn delete_patient(&self, id: u32) -> Result<(), RegistryError> {
        let mut registry = self.registry.lock().unwrap();
        registry.delete_patient(id)?;
        self.persist(&registry);
        Ok(())
    }

    pub fn list_patients(&self) -> String {
        self.registry.lock().unwrap().list_patients()
    }

    pub fn search_patients(&self, term: &str) -> String {
        self.registry.lock().unwrap().search_patients(term)
    }

    // --- Doctors ---

    pub fn create_doctor(
        &self,
        name: &str,
        age: u32,
        gender: &str,
        specialty: &str,
    ) -> Result<u32, RegistryError> {
        let mut registry = self.registry.lock().unwrap();
        let id = registry.create_doctor(name, age, gender, specialty)?;
        self.persist(&registry);
        Ok(id)
    }

    pub fn delete_doctor(&self, id: u32) -> Result<(), RegistryError> {
        let mut registry = self.registry.lock().unwrap();
        registry.delete_doctor(id)?;
        self.persist(&registry);
        Ok(())
    }

    pub fn list_doctors(&self) -> String {
        self.registry.lock().unwrap().list_doctors()
    }

    pub fn search_doctors(&self, term: &str) -> String {
        self.registry.lock().unwrap().search_doctors(term)
    }

    // --- Appointments ---

    pub fn create_appointment(
        &self,
        patient_id: u32,
        doctor_id: u32,
        datetime: &str,
        reason: &str,
    ) -> Result<u32, RegistryError> {
        let mut registry = self.registry.lock().unwrap();
        let id = registry.create_appointment(patient_id, doctor_id, datetime, reason)?;
        self.persist(&registry);
        Ok(id)
    }

    pub fn cancel_appointment(&self, id: u32) -> Result<(), RegistryError> {
        let mut registry = self.registry.lock().unwrap();
        registry.cancel_appointment(id)?;
        self.persist(&registry);
        Ok(())
    }

    pub fn mark_appointment_done(&self, id: u32) -> Result<(), RegistryError> {
        let mut registry = self.registry.lock().unwrap();
        registry.mark_appointment_done(id)?;
        self.persist(&registry);
        Ok(())
    }

    pub fn list_appointments(&self) -> String {
        self.registry.lock().unwrap().list_appointments()
    }

    // --- Stats ---

    /// Fresh aggregate counts over the current collections
    pub fn stats(&self) -> ClinicStats {
        ClinicStats::collect(&self.registry.lock().unwrap())
    }

    /// Write all three blobs out. Failures are logged and the in-memory state
    /// stays authoritative.
    fn persist(&self, registry: &ClinicRegistry) {
        let Some(snapshots) = &self.snapshots else {
            return;
        };
        let saves = [
            (RecordKind::Patient, registry.list_patients()),
            (RecordKind::Doctor, registry.list_doctors()),
            (RecordKind::Appointment, registry.list_appointments()),
        ];
        for (kind, blob) in saves {
            if let Err(error) = snapshots.save(kind, &blob) {
                tracing::warn!(%kind, %error, "Failed to save snapshot");
            }
        }
    }
}

fn load_snapshot(snapshots: &SnapshotStore, kind: RecordKind) -> Option<String> {
    match snapshots.load(kind) {
        Ok(blob) => blob,
        Err(error) => {
            tracing::warn!(%kind, %error, "Failed to load snapshot");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::AppointmentStatus;
    use tempfile::tempdir;

    #[test]
    fn test_in_memory_core_round_trip() {
        let core = ClinicCore::in_memory();
        let pid = core.create_patient("Ada", 36, "F", "Crescent Rd", "555-0100").unwrap();
        let did = core.create_doctor("Grace", 58, "F", "Cardiology").unwrap();
        let aid = core.create_appointment(pid, did, "2025-03-01 09:30", "checkup").unwrap();

        core.mark_appointment_done(aid).unwrap();
        let stats = core.stats();
        assert_eq!(stats.patients, 1);
        assert_eq!(stats.done, 1);
    }

    #[test]
    fn test_state_survives_reopen() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("clinic.db");

        {
            let core = ClinicCore::open(Database::open(db_path.clone()).unwrap());
            let pid = core.create_patient("Ada", 36, "F", "Crescent Rd", "555-0100").unwrap();
            let did = core.create_doctor("Grace", 58, "F", "Cardiology").unwrap();
            let aid = core.create_appointment(pid, did, "2025-03-01 09:30", "checkup").unwrap();
            core.cancel_appointment(aid).unwrap();
        }

        let core = ClinicCore::open(Database::open(db_path).unwrap());
        assert!(core.list_patients().contains("Ada"));
        assert!(core.list_doctors().contains("Cardiology"));

        let stats = core.stats();
        assert_eq!(stats.appointments, 1);
        assert_eq!(stats.cancelled, 1);
    }

    #[test]
    fn test_reopen_reassigns_identifiers_after_gaps() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("clinic.db");

        {
            let core = ClinicCore::open(Database::open(db_path.clone()).unwrap());
            core.create_patient("Ada", 36, "F", "", "-").unwrap();
            core.create_patient("Bob", 40, "M", "", "-").unwrap();
            core.delete_patient(1).unwrap();
        }

        // Bob was saved with id 2 but comes back as 1
        let core = ClinicCore::open(Database::open(db_path).unwrap());
        let listed = core.list_patients();
        assert_eq!(listed.lines().count(), 1);
        assert!(listed.starts_with("1|Bob"));
    }

    #[test]
    fn test_corrupt_snapshot_degrades_to_partial_restore() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("clinic.db");

        {
            let db = Database::open(db_path.clone()).unwrap();
            let snapshots = SnapshotStore::new(db.connection());
            snapshots
                .save(RecordKind::Patient, "1|Ada|36|F|ok|555-0100\ngarbage line\n")
                .unwrap();
        }

        let core = ClinicCore::open(Database::open(db_path).unwrap());
        assert_eq!(core.stats().patients, 1);
    }

    #[test]
    fn test_restored_appointment_keeps_terminal_status() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("clinic.db");

        {
            let core = ClinicCore::open(Database::open(db_path.clone()).unwrap());
            core.create_patient("Ada", 36, "F", "", "-").unwrap();
            core.create_doctor("Grace", 58, "F", "Cardiology").unwrap();
            let aid = core.create_appointment(1, 1, "2025-03-01 09:30", "").unwrap();
            core.mark_appointment_done(aid).unwrap();
        }

        let core = ClinicCore::open(Database::open(db_path).unwrap());
        let listed = core.list_appointments();
        assert!(listed.contains(AppointmentStatus::Done.as_str()));
        // Terminal again after the round trip: a second transition still fails
        assert!(core.cancel_appointment(1).is_err());
    }
}
