//! Care records kept by the patient after sign-in.

pub mod journal;
pub mod message;
pub mod prescription;

pub use journal::{
    DiabetesKind, DoseMoment, JournalError, MedicalInfo, Medication, Treatment, TreatmentJournal,
};
pub use message::{CareProvider, MessageError, ProviderMessage};
pub use prescription::{
    Prescription, PrescriptionBook, PrescriptionDraft, PrescriptionError, PrescriptionStatus,
};
