//! In-memory record store for the clinic's three collections.
//!
//! The registry exclusively owns the patient, doctor and appointment
//! collections. Callers interact through typed operations and receive either
//! fresh identifiers, wire-format blobs or [`RegistryError`] failure values —
//! nothing here panics on bad input.

use thiserror::Error;

use crate::data::codec;
use crate::data::ids::IdAllocator;
use crate::data::models::{Appointment, AppointmentStatus, Doctor, Patient, RecordKind};

/// Failure signals returned across the store boundary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("required field is empty: {0}")]
    EmptyField(&'static str),
    #[error("no patient with id {0}")]
    UnknownPatient(u32),
    #[error("no doctor with id {0}")]
    UnknownDoctor(u32),
    #[error("no {kind} with id {id}")]
    NotFound { kind: RecordKind, id: u32 },
    #[error("appointment {id} is already {status}")]
    AlreadyClosed { id: u32, status: AppointmentStatus },
}

/// The clinic's record collections plus the allocator that numbers them.
///
/// Records are kept in insertion order, which is also identifier order within
/// a kind; deletions leave gaps but never reorder the survivors.
#[derive(Debug, Default)]
pub struct ClinicRegistry {
    patients: Vec<Patient>,
    doctors: Vec<Doctor>,
    appointments: Vec<Appointment>,
    ids: IdAllocator,
}

impl ClinicRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Patients ---

    /// Register a patient and return the assigned identifier
    pub fn create_patient(
        &mut self,
        name: &str,
        age: u32,
        gender: &str,
        address: &str,
        phone: &str,
    ) -> Result<u32, RegistryError> {
        if name.trim().is_empty() {
            return Err(RegistryError::EmptyField("name"));
        }
        let id = self.ids.next(RecordKind::Patient);
        self.patients
            .push(Patient::new(id, name, age, gender, address, phone));
        Ok(id)
    }

    /// Remove a patient. Appointments referencing the patient are left alone.
    pub fn delete_patient(&mut self, id: u32) -> Result<(), RegistryError> {
        let before = self.patients.len();
        self.patients.retain(|p| p.id != id);
        if self.patients.len() == before {
            return Err(RegistryError::NotFound {
                kind: RecordKind::Patient,
                id,
            });
        }
        Ok(())
    }

    /// All patients as a wire blob, in insertion order
    pub fn list_patients(&self) -> String {
        codec::encode_blob(&self.patients)
    }

    /// Patients with a case-sensitive substring match in any text field
    pub fn search_patients(&self, term: &str) -> String {
        codec::encode_blob(self.patients.iter().filter(|p| patient_matches(p, term)))
    }

    // --- Doctors ---

    /// Register a doctor and return the assigned identifier
    pub fn create_doctor(
        &mut self,
        name: &str,
        age: u32,
        gender: &str,
        specialty: &str,
    ) -> Result<u32, RegistryError> {
        if name.trim().is_empty() {
            return Err(RegistryError::EmptyField("name"));
        }
        let id = self.ids.next(RecordKind::Doctor);
        self.doctors
            .push(Doctor::new(id, name, age, gender, specialty));
        Ok(id)
    }

    /// Remove a doctor. Appointments referencing the doctor are left alone.
    pub fn delete_doctor(&mut self, id: u32) -> Result<(), RegistryError> {
        let before = self.doctors.len();
        self.doctors.retain(|d| d.id != id);
        if self.doctors.len() == before {
            return Err(RegistryError::NotFound {
                kind: RecordKind::Doctor,
                id,
            });
        }
        Ok(())
    }

    /// All doctors as a wire blob, in insertion order
    pub fn list_doctors(&self) -> String {
        codec::encode_blob(&self.doctors)
    }

    /// Doctors with a case-sensitive substring match in any text field
    pub fn search_doctors(&self, term: &str) -> String {
        codec::encode_blob(self.doctors.iter().filter(|d| doctor_matches(d, term)))
    }

    // --- Appointments ---

    /// Book an appointment.
    ///
    /// Both references must resolve against the current collections; the new
    /// appointment starts out `scheduled`. Nothing is allocated or stored
    /// when validation fails.
    pub fn create_appointment(
        &mut self,
        patient_id: u32,
        doctor_id: u32,
        datetime: &str,
        reason: &str,
    ) -> Result<u32, RegistryError> {
        if datetime.trim().is_empty() {
            return Err(RegistryError::EmptyField("datetime"));
        }
        if !self.patients.iter().any(|p| p.id == patient_id) {
            return Err(RegistryError::UnknownPatient(patient_id));
        }
        if !self.doctors.iter().any(|d| d.id == doctor_id) {
            return Err(RegistryError::UnknownDoctor(doctor_id));
        }
        let id = self.ids.next(RecordKind::Appointment);
        self.appointments
            .push(Appointment::new(id, patient_id, doctor_id, datetime, reason));
        Ok(id)
    }

    /// Move a scheduled appointment to `cancelled`
    pub fn cancel_appointment(&mut self, id: u32) -> Result<(), RegistryError> {
        self.transition(id, AppointmentStatus::Cancelled)
    }

    /// Move a scheduled appointment to `done`
    pub fn mark_appointment_done(&mut self, id: u32) -> Result<(), RegistryError> {
        self.transition(id, AppointmentStatus::Done)
    }

    fn transition(&mut self, id: u32, to: AppointmentStatus) -> Result<(), RegistryError> {
        let appt = self
            .appointments
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(RegistryError::NotFound {
                kind: RecordKind::Appointment,
                id,
            })?;
        if appt.status.is_terminal() {
            return Err(RegistryError::AlreadyClosed {
                id,
                status: appt.status,
            });
        }
        appt.status = to;
        Ok(())
    }

    /// All appointments as a wire blob, in insertion order
    pub fn list_appointments(&self) -> String {
        codec::encode_blob(&self.appointments)
    }

    /// Appointments with a case-sensitive substring match in any text field
    pub fn search_appointments(&self, term: &str) -> String {
        codec::encode_blob(
            self.appointments
                .iter()
                .filter(|a| appointment_matches(a, term)),
        )
    }

    // --- Restore ---

    /// Re-create patients from a saved blob, best effort.
    ///
    /// Identifiers stored in the blob are ignored; every record gets a fresh
    /// one from the allocator. Malformed or non-validating lines are skipped.
    /// Returns the number of records that made it in.
    pub fn restore_patients(&mut self, blob: &str) -> usize {
        let mut restored = 0;
        for record in codec::decode_blob::<Patient>(blob) {
            match self.create_patient(
                &record.name,
                record.age,
                &record.gender,
                &record.address,
                &record.phone,
            ) {
                Ok(_) => restored += 1,
                Err(error) => tracing::debug!(%error, "skipping patient on restore"),
            }
        }
        restored
    }

    /// Re-create doctors from a saved blob, best effort. See
    /// [`restore_patients`](Self::restore_patients) for the identifier caveat.
    pub fn restore_doctors(&mut self, blob: &str) -> usize {
        let mut restored = 0;
        for record in codec::decode_blob::<Doctor>(blob) {
            match self.create_doctor(&record.name, record.age, &record.gender, &record.specialty) {
                Ok(_) => restored += 1,
                Err(error) => tracing::debug!(%error, "skipping doctor on restore"),
            }
        }
        restored
    }

    /// Re-create appointments from a saved blob, best effort.
    ///
    /// Because restore reassigns identifiers, the patient/doctor references
    /// in the blob only stay accurate when the referenced records were
    /// restored with the same numbers they had at save time. Deletions before
    /// the save leave gaps that shift every later identifier, so references
    /// can land on the wrong record or on none at all; unresolvable lines are
    /// dropped. The saved status is carried over, so a `done` or `cancelled`
    /// appointment stays closed after the round trip.
    pub fn restore_appointments(&mut self, blob: &str) -> usize {
        let mut restored = 0;
        for record in codec::decode_blob::<Appointment>(blob) {
            match self.create_appointment(
                record.patient_id,
                record.doctor_id,
                &record.datetime,
                &record.reason,
            ) {
                Ok(id) => {
                    if record.status.is_terminal() {
                        if let Some(appt) = self.appointments.iter_mut().find(|a| a.id == id) {
                            appt.status = record.status;
                        }
                    }
                    restored += 1;
                }
                Err(error) => tracing::debug!(%error, "skipping appointment on restore"),
            }
        }
        restored
    }

    // --- Typed views ---

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }
}

fn patient_matches(p: &Patient, term: &str) -> bool {
    p.name.contains(term)
        || p.gender.contains(term)
        || p.address.contains(term)
        || p.phone.contains(term)
}

fn doctor_matches(d: &Doctor, term: &str) -> bool {
    d.name.contains(term) || d.gender.contains(term) || d.specialty.contains(term)
}

fn appointment_matches(a: &Appointment, term: &str) -> bool {
    a.datetime.contains(term) || a.reason.contains(term) || a.status.as_str().contains(term)
}
