//! Command-line interface onto the clinic record store.
//!
//! Each subcommand maps 1:1 onto a store operation. List and search output is
//! the raw wire format (one `|`-delimited record per line); `stats` prints a
//! JSON object.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Config;
use crate::core::ClinicCore;

#[derive(Debug, Parser)]
#[command(name = "wardbook", about = "Clinic record keeping from the terminal", version)]
pub struct Cli {
    /// Override the data directory (default: ~/.wardbook)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Register a patient and print the assigned id
    AddPatient {
        name: String,
        #[arg(long, default_value_t = 0)]
        age: u32,
        #[arg(long, default_value = "")]
        gender: String,
        #[arg(long, default_value = "")]
        address: String,
        #[arg(long, default_value = "")]
        phone: String,
    },
    /// Remove a patient by id (their appointments are kept)
    DeletePatient { id: u32 },
    /// Print all patients
    ListPatients,
    /// Print patients whose text fields contain the term
    SearchPatients { term: String },

    /// Register a doctor and print the assigned id
    AddDoctor {
        name: String,
        #[arg(long, default_value_t = 0)]
        age: u32,
        #[arg(long, default_value = "")]
        gender: String,
        #[arg(long, default_value = "")]
        specialty: String,
    },
    /// Remove a doctor by id (their appointments are kept)
    DeleteDoctor { id: u32 },
    /// Print all doctors
    ListDoctors,
    /// Print doctors whose text fields contain the term
    SearchDoctors { term: String },

    /// Book an appointment and print the assigned id
    AddAppointment {
        patient_id: u32,
        doctor_id: u32,
        datetime: String,
        #[arg(long, default_value = "")]
        reason: String,
    },
    /// Cancel a scheduled appointment
    CancelAppointment { id: u32 },
    /// Mark a scheduled appointment as done
    CompleteAppointment { id: u32 },
    /// Print all appointments
    ListAppointments,

    /// Print aggregate counts as JSON
    Stats,
}

/// Execute one subcommand against the persistent store
pub fn run(command: Command, config: &Config) -> anyhow::Result<()> {
    let core = ClinicCore::with_config(config);

    match command {
        Command::AddPatient {
            name,
            age,
            gender,
            address,
            phone,
        } => {
            let id = core.create_patient(&name, age, &gender, &address, &phone)?;
            println!("{id}");
        }
        Command::DeletePatient { id } => {
            core.delete_patient(id)?;
        }
        Command::ListPatients => print!("{}", core.list_patients()),
        Command::SearchPatients { term } => print!("{}", core.search_patients(&term)),

        Command::AddDoctor {
            name,
            age,
            gender,
            specialty,
        } => {
            let id = core.create_doctor(&name, age, &gender, &specialty)?;
            println!("{id}");
        }
        Command::DeleteDoctor { id } => {
            core.delete_doctor(id)?;
        }
        Command::ListDoctors => print!("{}", core.list_doctors()),
        Command::SearchDoctors { term } => print!("{}", core.search_doctors(&term)),

        Command::AddAppointment {
            patient_id,
            doctor_id,
            datetime,
            reason,
        } => {
            let id = core.create_appointment(patient_id, doctor_id, &datetime, &reason)?;
            println!("{id}");
        }
        Command::CancelAppointment { id } => {
            core.cancel_appointment(id)?;
        }
        Command::CompleteAppointment { id } => {
            core.mark_appointment_done(id)?;
        }
        Command::ListAppointments => print!("{}", core.list_appointments()),

        Command::Stats => println!("{}", core.stats().to_json()?),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_declaration_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_add_patient_parses_flags() {
        let cli = Cli::parse_from([
            "wardbook",
            "add-patient",
            "Ada Byron",
            "--age",
            "36",
            "--phone",
            "555-0100",
        ]);
        match cli.command {
            Command::AddPatient {
                name, age, phone, ..
            } => {
                assert_eq!(name, "Ada Byron");
                assert_eq!(age, 36);
                assert_eq!(phone, "555-0100");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
