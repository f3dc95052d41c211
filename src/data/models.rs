//! Data models for patients, doctors and appointments

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three record kinds the registry manages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Patient,
    Doctor,
    Appointment,
}

impl RecordKind {
    /// Snapshot key this kind is stored under
    pub fn storage_key(&self) -> &'static str {
        match self {
            RecordKind::Patient => "patients",
            RecordKind::Doctor => "doctors",
            RecordKind::Appointment => "appointments",
        }
    }

    /// Singular label for messages
    pub fn label(&self) -> &'static str {
        match self {
            RecordKind::Patient => "patient",
            RecordKind::Doctor => "doctor",
            RecordKind::Appointment => "appointment",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lifecycle state of an appointment.
///
/// Transitions only move forward: `Scheduled` can become `Done` or
/// `Cancelled`, and both of those are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Scheduled,
    Done,
    Cancelled,
}

impl AppointmentStatus {
    /// Wire representation of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Done => "done",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }

    /// Whether no further transition is permitted from this state
    pub fn is_terminal(&self) -> bool {
        !matches!(self, AppointmentStatus::Scheduled)
    }
}

impl FromStr for AppointmentStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(AppointmentStatus::Scheduled),
            "done" => Ok(AppointmentStatus::Done),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            _ => Err(()),
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered patient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    /// Unique identifier, assigned once at registration
    pub id: u32,
    /// Full name
    pub name: String,
    /// Age in years
    pub age: u32,
    pub gender: String,
    pub address: String,
    pub phone: String,
}

impl Patient {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        age: u32,
        gender: impl Into<String>,
        address: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            age,
            gender: gender.into(),
            address: address.into(),
            phone: phone.into(),
        }
    }
}

/// A member of the clinic's medical staff
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    /// Unique identifier, assigned once at registration
    pub id: u32,
    /// Full name
    pub name: String,
    /// Age in years
    pub age: u32,
    pub gender: String,
    /// Medical specialty (free text)
    pub specialty: String,
}

impl Doctor {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        age: u32,
        gender: impl Into<String>,
        specialty: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            age,
            gender: gender.into(),
            specialty: specialty.into(),
        }
    }
}

/// A booked appointment between a patient and a doctor.
///
/// `patient_id` and `doctor_id` hold the identifiers that resolved at booking
/// time. Deleting the referenced patient or doctor later does not touch the
/// appointment, so these references can dangle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    /// Unique identifier, assigned once at booking
    pub id: u32,
    pub patient_id: u32,
    pub doctor_id: u32,
    /// Caller-supplied date/time text, stored verbatim
    pub datetime: String,
    /// Reason for the visit, may be empty
    pub reason: String,
    pub status: AppointmentStatus,
}

impl Appointment {
    /// Create a new appointment in the initial `Scheduled` state
    pub fn new(
        id: u32,
        patient_id: u32,
        doctor_id: u32,
        datetime: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            id,
            patient_id,
            doctor_id,
            datetime: datetime.into(),
            reason: reason.into(),
            status: AppointmentStatus::Scheduled,
        }
    }
}
