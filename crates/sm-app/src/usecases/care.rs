//! Care records use case.
//!
//! Owns the patient's treatment journal and prescriptions for the session
//! and serializes access to them.

use chrono::NaiveDate;
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use sm_core::care::{
    DoseMoment, JournalError, Prescription, PrescriptionBook, PrescriptionDraft,
    PrescriptionError, PrescriptionStatus, TreatmentJournal,
};

/// Prompt shown before a journal treatment is removed.
pub const REMOVE_TREATMENT_PROMPT: &str = "Êtes-vous sûr de vouloir supprimer ce traitement ?";

#[derive(Default)]
pub struct ManageCareRecords {
    journal: Mutex<TreatmentJournal>,
    prescriptions: Mutex<PrescriptionBook>,
}

impl ManageCareRecords {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn journal(&self) -> TreatmentJournal {
        self.journal.lock().await.clone()
    }

    pub async fn prescriptions(&self) -> Vec<Prescription> {
        self.prescriptions.lock().await.prescriptions().to_vec()
    }

    pub async fn add_treatment(&self) -> Uuid {
        let id = self.journal.lock().await.add_treatment();
        info!(treatment_id = %id, "treatment added");
        id
    }

    pub async fn describe_treatment(&self, id: Uuid, description: &str) -> Result<(), JournalError> {
        self.journal.lock().await.set_description(id, description)
    }

    pub async fn toggle_treatment_editing(&self, id: Uuid) -> Result<bool, JournalError> {
        self.journal.lock().await.toggle_editing(id)
    }

    pub async fn remove_treatment(&self, id: Uuid) -> Result<(), JournalError> {
        let removed = self.journal.lock().await.remove_treatment(id)?;
        info!(
            treatment_id = %id,
            medications = removed.medications.len(),
            "treatment removed"
        );
        Ok(())
    }

    pub async fn add_medication(&self, treatment_id: Uuid, name: &str) -> Result<Uuid, JournalError> {
        let mut journal = self.journal.lock().await;
        let id = journal.add_medication(treatment_id)?;
        journal.rename_medication(treatment_id, id, name)?;
        debug!(%treatment_id, medication_id = %id, "medication added");
        Ok(id)
    }

    pub async fn toggle_moment(
        &self,
        treatment_id: Uuid,
        medication_id: Uuid,
        moment: DoseMoment,
    ) -> Result<bool, JournalError> {
        self.journal
            .lock()
            .await
            .toggle_moment(treatment_id, medication_id, moment)
    }

    pub async fn remove_medication(
        &self,
        treatment_id: Uuid,
        medication_id: Uuid,
    ) -> Result<(), JournalError> {
        self.journal
            .lock()
            .await
            .remove_medication(treatment_id, medication_id)
            .map(|_| ())
    }

    /// Flip the diabetes type and insulin flag while the info card is open.
    pub async fn update_medical_info(
        &self,
        toggle_diabetes_kind: bool,
        uses_insulin: Option<bool>,
    ) -> Result<(), JournalError> {
        let mut journal = self.journal.lock().await;
        if toggle_diabetes_kind {
            journal.toggle_diabetes_kind()?;
        }
        if let Some(uses_insulin) = uses_insulin {
            journal.set_uses_insulin(uses_insulin)?;
        }
        Ok(())
    }

    pub async fn toggle_medical_info_editing(&self) -> bool {
        self.journal.lock().await.toggle_info_editing()
    }

    pub async fn save_prescription(
        &self,
        draft: PrescriptionDraft,
        editing: Option<Uuid>,
        today: NaiveDate,
    ) -> Result<Uuid, PrescriptionError> {
        let id = self.prescriptions.lock().await.save(draft, editing, today)?;
        info!(prescription_id = %id, updated = editing.is_some(), "prescription saved");
        Ok(id)
    }

    pub async fn set_prescription_status(
        &self,
        id: Uuid,
        status: PrescriptionStatus,
    ) -> Result<(), PrescriptionError> {
        self.prescriptions.lock().await.set_status(id, status)?;
        info!(prescription_id = %id, status = %status, "prescription status changed");
        Ok(())
    }

    pub async fn remove_prescription(&self, id: Uuid) -> Result<(), PrescriptionError> {
        self.prescriptions.lock().await.remove(id)?;
        info!(prescription_id = %id, "prescription removed");
        Ok(())
    }
}
