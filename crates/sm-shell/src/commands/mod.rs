//! Console commands.
//!
//! Each input line is split into words and parsed with clap. Handlers
//! return the text to print, or the user-facing error message.

pub mod care;
pub mod contact;
pub mod error;
pub mod login;
pub mod registration;

use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand, ValueEnum};
use sm_core::care::{CareProvider, PrescriptionDraft, PrescriptionStatus};
use sm_core::ports::{NavigationPort, Screen};
use uuid::Uuid;

use crate::bootstrap::AppRuntime;

#[derive(Debug, Parser)]
#[command(name = "suivi-medical", no_binary_name = true, disable_version_flag = true)]
pub struct ConsoleLine {
    #[command(subcommand)]
    pub command: ConsoleCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConsoleCommand {
    /// Registration wizard
    #[command(subcommand)]
    Register(RegisterCommand),
    /// Sign in with an existing account
    Login { email: String, password: String },
    /// Open a screen
    Go { screen: ScreenArg },
    /// Treatment journal
    #[command(subcommand)]
    Journal(JournalCommand),
    /// Prescriptions from the doctor
    #[command(subcommand)]
    Prescription(PrescriptionCommand),
    /// Write to the doctor or the nutritionist
    Message {
        provider: ProviderArg,
        /// Message text; the remaining words are joined
        #[arg(num_args = 0.., trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Leave the application
    #[command(alias = "exit")]
    Quit,
}

#[derive(Debug, Subcommand)]
pub enum RegisterCommand {
    /// Open the registration screen
    Open,
    /// Set a form field, e.g. `register set email jeanne@example.fr`
    Set {
        field: String,
        /// Omit to clear the field
        #[arg(default_value = "")]
        value: String,
    },
    /// Validate the current step and move on, or submit on the review step
    Next,
    /// Go back one step
    Back,
    /// Abandon the registration
    Cancel,
    /// Show every field as on the review step
    Review,
    /// Show the current step and missing fields
    State,
}

#[derive(Debug, Subcommand)]
pub enum JournalCommand {
    /// Show medical info, treatments and totals
    Show,
    /// Add a treatment
    Add { description: Option<String> },
    /// Change a treatment description
    Describe { id: Uuid, description: String },
    /// Toggle a treatment's edit mode
    Edit { id: Uuid },
    /// Remove a treatment
    Remove {
        id: Uuid,
        #[arg(long)]
        yes: bool,
    },
    /// Add a medication to a treatment
    AddMed { treatment: Uuid, name: String },
    /// Check or uncheck Matin, Midi or Soir for a medication
    Moment {
        treatment: Uuid,
        medication: Uuid,
        moment: String,
    },
    /// Remove a medication
    RemoveMed { treatment: Uuid, medication: Uuid },
    /// Toggle the medical info card's edit mode
    InfoEdit,
    /// Update the medical info card
    Info {
        /// Switch between Type 1 and Type 2
        #[arg(long)]
        toggle_type: bool,
        #[arg(long)]
        insulin: Option<bool>,
    },
}

#[derive(Debug, Subcommand)]
pub enum PrescriptionCommand {
    /// List prescriptions
    List,
    /// Create a prescription, or update one with --id
    Save {
        name: String,
        dosage: String,
        frequency: String,
        #[arg(long)]
        start: Option<NaiveDate>,
        #[arg(long)]
        end: Option<NaiveDate>,
        #[arg(long, default_value = "")]
        notes: String,
        /// Next intake, e.g. "2024-03-20 20:00"
        #[arg(long, value_parser = parse_date_time)]
        next_dose: Option<NaiveDateTime>,
        #[arg(long)]
        id: Option<Uuid>,
    },
    /// Pause an active prescription
    Pause { id: Uuid },
    /// Resume a paused prescription
    Resume { id: Uuid },
    /// Mark a prescription as completed
    Complete { id: Uuid },
    /// Delete a prescription
    Remove { id: Uuid },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ScreenArg {
    Login,
    Register,
    Home,
    Treatments,
    Doctor,
    Nutritionist,
}

impl From<ScreenArg> for Screen {
    fn from(arg: ScreenArg) -> Self {
        match arg {
            ScreenArg::Login => Screen::Login,
            ScreenArg::Register => Screen::Register,
            ScreenArg::Home => Screen::Home,
            ScreenArg::Treatments => Screen::Treatments,
            ScreenArg::Doctor => Screen::Doctor,
            ScreenArg::Nutritionist => Screen::Nutritionist,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProviderArg {
    #[value(alias = "medecin")]
    Doctor,
    #[value(alias = "nutritionniste")]
    Nutritionist,
}

impl From<ProviderArg> for CareProvider {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Doctor => CareProvider::Doctor,
            ProviderArg::Nutritionist => CareProvider::Nutritionist,
        }
    }
}

/// Accepts `YYYY-MM-DD HH:MM` or `YYYY-MM-DDTHH:MM`, seconds optional.
fn parse_date_time(value: &str) -> Result<NaiveDateTime, String> {
    ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .ok_or_else(|| format!("Date invalide : \"{}\" (AAAA-MM-JJ HH:MM).", value))
}

/// Result of one console line.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Output(String),
    Quit,
}

/// Split a line into words. Double or single quotes group words and may
/// be empty (`""`).
pub fn split_words(line: &str) -> Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }
    if quote.is_some() {
        return Err("Guillemet non fermé.".to_string());
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

/// Parse one line. `Ok(None)` for blank lines; clap's rendered message
/// (including `help`) as the error.
pub fn parse_line(line: &str) -> Result<Option<ConsoleCommand>, String> {
    let words = split_words(line)?;
    if words.is_empty() {
        return Ok(None);
    }
    ConsoleLine::try_parse_from(words)
        .map(|parsed| Some(parsed.command))
        .map_err(|err| err.render().to_string())
}

pub async fn execute(runtime: &AppRuntime, command: ConsoleCommand) -> Result<Outcome, String> {
    let output = match command {
        ConsoleCommand::Quit => return Ok(Outcome::Quit),
        ConsoleCommand::Register(command) => match command {
            RegisterCommand::Open => registration::open(runtime).await,
            RegisterCommand::Set { field, value } => {
                registration::set_field(runtime, &field, &value).await
            }
            RegisterCommand::Next => registration::next(runtime).await,
            RegisterCommand::Back => registration::back(runtime).await,
            RegisterCommand::Cancel => registration::cancel(runtime).await,
            RegisterCommand::Review => registration::review(runtime).await,
            RegisterCommand::State => registration::state(runtime).await,
        },
        ConsoleCommand::Login { email, password } => login::login(runtime, email, password).await,
        ConsoleCommand::Go { screen } => {
            let screen = Screen::from(screen);
            runtime.navigator().navigate_to(screen);
            Ok(format!("Écran {}", screen.route()))
        }
        ConsoleCommand::Journal(command) => match command {
            JournalCommand::Show => care::show_journal(runtime).await,
            JournalCommand::Add { description } => care::add_treatment(runtime, description).await,
            JournalCommand::Describe { id, description } => {
                care::describe_treatment(runtime, id, &description).await
            }
            JournalCommand::Edit { id } => care::toggle_treatment_editing(runtime, id).await,
            JournalCommand::Remove { id, yes } => care::remove_treatment(runtime, id, yes).await,
            JournalCommand::AddMed { treatment, name } => {
                care::add_medication(runtime, treatment, &name).await
            }
            JournalCommand::Moment {
                treatment,
                medication,
                moment,
            } => care::toggle_moment(runtime, treatment, medication, &moment).await,
            JournalCommand::RemoveMed {
                treatment,
                medication,
            } => care::remove_medication(runtime, treatment, medication).await,
            JournalCommand::InfoEdit => care::toggle_info_editing(runtime).await,
            JournalCommand::Info {
                toggle_type,
                insulin,
            } => care::update_info(runtime, toggle_type, insulin).await,
        },
        ConsoleCommand::Prescription(command) => match command {
            PrescriptionCommand::List => care::list_prescriptions(runtime).await,
            PrescriptionCommand::Save {
                name,
                dosage,
                frequency,
                start,
                end,
                notes,
                next_dose,
                id,
            } => {
                let draft = PrescriptionDraft {
                    name,
                    dosage,
                    frequency,
                    start_date: start,
                    end_date: end,
                    notes,
                    next_dose,
                };
                care::save_prescription(runtime, draft, id).await
            }
            PrescriptionCommand::Pause { id } => {
                care::set_prescription_status(runtime, id, PrescriptionStatus::Paused).await
            }
            PrescriptionCommand::Resume { id } => {
                care::set_prescription_status(runtime, id, PrescriptionStatus::Active).await
            }
            PrescriptionCommand::Complete { id } => {
                care::set_prescription_status(runtime, id, PrescriptionStatus::Completed).await
            }
            PrescriptionCommand::Remove { id } => care::remove_prescription(runtime, id).await,
        },
        ConsoleCommand::Message { provider, text } => {
            contact::send_message(runtime, provider.into(), &text.join(" ")).await
        }
    }?;
    Ok(Outcome::Output(output))
}
