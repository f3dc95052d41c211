//! Aggregate counts over the registry's current state

use serde::{Deserialize, Serialize};

use crate::data::models::AppointmentStatus;
use crate::data::registry::ClinicRegistry;

/// Snapshot of collection sizes and appointment status counts.
///
/// Always computed fresh from the registry; nothing here is cached, since the
/// collaborator asks again after every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicStats {
    pub patients: usize,
    pub doctors: usize,
    pub appointments: usize,
    pub scheduled: usize,
    pub done: usize,
    pub cancelled: usize,
}

impl ClinicStats {
    /// Count the registry's collections and appointment states
    pub fn collect(registry: &ClinicRegistry) -> Self {
        let mut scheduled = 0;
        let mut done = 0;
        let mut cancelled = 0;
        for appt in registry.appointments() {
            match appt.status {
                AppointmentStatus::Scheduled => scheduled += 1,
                AppointmentStatus::Done => done += 1,
                AppointmentStatus::Cancelled => cancelled += 1,
            }
        }
        Self {
            patients: registry.patients().len(),
            doctors: registry.doctors().len(),
            appointments: registry.appointments().len(),
            scheduled,
            done,
            cancelled,
        }
    }

    /// Render as a JSON object
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_match_collections_and_statuses() {
        let mut reg = ClinicRegistry::new();
        for name in ["Ada", "Bob", "Cara"] {
            reg.create_patient(name, 30, "", "", "").unwrap();
        }
        reg.create_doctor("Grace", 58, "F", "Cardiology").unwrap();
        reg.create_doctor("John", 40, "M", "General").unwrap();
        for day in 1..=4 {
            reg.create_appointment(1, 1, &format!("2025-03-0{day} 09:00"), "")
                .unwrap();
        }
        reg.mark_appointment_done(1).unwrap();
        reg.cancel_appointment(2).unwrap();

        let stats = ClinicStats::collect(&reg);
        assert_eq!(
            stats,
            ClinicStats {
                patients: 3,
                doctors: 2,
                appointments: 4,
                scheduled: 2,
                done: 1,
                cancelled: 1,
            }
        );
    }

    #[test]
    fn test_stats_reflect_mutations_immediately() {
        let mut reg = ClinicRegistry::new();
        reg.create_patient("Ada", 36, "F", "", "").unwrap();
        assert_eq!(ClinicStats::collect(&reg).patients, 1);
        reg.delete_patient(1).unwrap();
        assert_eq!(ClinicStats::collect(&reg).patients, 0);
    }

    #[test]
    fn test_json_shape() {
        let reg = ClinicRegistry::new();
        let json = ClinicStats::collect(&reg).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["patients"], 0);
        assert_eq!(value["scheduled"], 0);
    }
}
