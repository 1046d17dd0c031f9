use clap::{Parser, Subcommand};
use std::sync::Arc;
use wardview_core::{
    PatientId,
    addons::{AddressHierarchyAbsent, address_hierarchy_field_names},
    dashboard::DashboardService,
    memory::{MemoryAddressHierarchy, MemoryHis},
    model::{SessionContext, UserContext},
    page::PageDirective,
    services::PatientDirectory,
};

#[derive(Parser)]
#[command(name = "wardview")]
#[command(about = "wardview patient dashboard CLI (runs against the demo data set)")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the demo patients
    List,
    /// Build and print a patient's dashboard model
    Model {
        /// Patient identifier
        patient_id: String,
        /// Dashboard tab to preselect
        #[arg(long)]
        tab: Option<String>,
    },
    /// Print the address hierarchy field names in display order
    Levels {
        /// Pretend the address-hierarchy add-on is not installed
        #[arg(long)]
        absent: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::List) => {
            let his = MemoryHis::demo();
            let patients = his.all_patients()?;
            if patients.is_empty() {
                println!("No patients found.");
            } else {
                for patient in patients {
                    println!(
                        "ID: {}, Name: {} {}, Identifier: {}{}",
                        patient.id,
                        patient.given_name,
                        patient.family_name,
                        patient.identifier,
                        if patient.voided || patient.person_voided {
                            " (voided)"
                        } else {
                            ""
                        }
                    );
                }
            }
        }
        Some(Commands::Model { patient_id, tab }) => {
            let patient_id = PatientId::parse(&patient_id)?;
            let his = Arc::new(MemoryHis::demo());
            let Some(patient) = his.find_patient(&patient_id)? else {
                eprintln!("No patient with id {patient_id}");
                return Ok(());
            };

            let session = SessionContext {
                user: UserContext::new("cli"),
                location: his.location("ward-2"),
            };
            let dashboard = DashboardService::new(
                his.clone(),
                his.clone(),
                his.clone(),
                Arc::new(MemoryAddressHierarchy::demo()),
            );
            match dashboard.patient_page(patient, tab.as_deref(), &session)? {
                PageDirective::Render(model) => {
                    println!("{}", serde_json::to_string_pretty(&model)?);
                }
                PageDirective::Redirect(redirect) => {
                    println!("Redirect to {}?{}", redirect.page, redirect.query_string());
                }
            }
        }
        Some(Commands::Levels { absent }) => {
            let names = if absent {
                address_hierarchy_field_names(&AddressHierarchyAbsent)?
            } else {
                address_hierarchy_field_names(&MemoryAddressHierarchy::demo())?
            };
            if names.is_empty() {
                println!("No address hierarchy levels configured.");
            } else {
                for name in names {
                    println!("{name}");
                }
            }
        }
        None => {
            println!("Use 'wardview --help' for commands");
        }
    }

    Ok(())
}
