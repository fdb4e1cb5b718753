//! Treatment journal ("Mes traitements").
//!
//! Patient-maintained list of treatments, each with the medications it
//! involves and the moments of the day they are taken.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Moment of the day a medication is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DoseMoment {
    Matin,
    Midi,
    Soir,
}

impl DoseMoment {
    pub const ALL: [DoseMoment; 3] = [DoseMoment::Matin, DoseMoment::Midi, DoseMoment::Soir];

    pub fn label(&self) -> &'static str {
        match self {
            DoseMoment::Matin => "Matin",
            DoseMoment::Midi => "Midi",
            DoseMoment::Soir => "Soir",
        }
    }
}

impl std::str::FromStr for DoseMoment {
    type Err = JournalError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        DoseMoment::ALL
            .into_iter()
            .find(|moment| moment.label().eq_ignore_ascii_case(value))
            .ok_or_else(|| JournalError::UnknownMoment(value.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiabetesKind {
    #[default]
    Type1,
    Type2,
}

impl DiabetesKind {
    pub fn label(&self) -> &'static str {
        match self {
            DiabetesKind::Type1 => "Type 1",
            DiabetesKind::Type2 => "Type 2",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            DiabetesKind::Type1 => DiabetesKind::Type2,
            DiabetesKind::Type2 => DiabetesKind::Type1,
        }
    }
}

impl fmt::Display for DiabetesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// General medical information card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalInfo {
    pub diabetes_kind: DiabetesKind,
    pub uses_insulin: bool,
    pub editing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medication {
    pub id: Uuid,
    pub name: String,
    pub moments: BTreeSet<DoseMoment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Treatment {
    pub id: Uuid,
    pub description: String,
    pub medications: Vec<Medication>,
    pub editing: bool,
}

impl Treatment {
    /// Description shown when the card is read-only.
    pub fn display_description(&self) -> &str {
        if self.description.is_empty() {
            "Aucune description"
        } else {
            &self.description
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JournalError {
    #[error("Traitement introuvable : {0}")]
    TreatmentNotFound(Uuid),
    #[error("Médicament introuvable : {0}")]
    MedicationNotFound(Uuid),
    #[error("Moment inconnu : \"{0}\" (Matin, Midi ou Soir).")]
    UnknownMoment(String),
    #[error("Les informations médicales ne sont pas en cours de modification.")]
    InfoLocked,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreatmentJournal {
    pub info: MedicalInfo,
    treatments: Vec<Treatment>,
}

impl TreatmentJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn treatments(&self) -> &[Treatment] {
        &self.treatments
    }

    pub fn treatment(&self, id: Uuid) -> Result<&Treatment, JournalError> {
        self.treatments
            .iter()
            .find(|t| t.id == id)
            .ok_or(JournalError::TreatmentNotFound(id))
    }

    pub fn total_treatments(&self) -> usize {
        self.treatments.len()
    }

    pub fn total_medications(&self) -> usize {
        self.treatments.iter().map(|t| t.medications.len()).sum()
    }

    /// Toggle edit mode of the medical info card; returns the new mode.
    pub fn toggle_info_editing(&mut self) -> bool {
        self.info.editing = !self.info.editing;
        self.info.editing
    }

    pub fn toggle_diabetes_kind(&mut self) -> Result<DiabetesKind, JournalError> {
        self.ensure_info_editing()?;
        self.info.diabetes_kind = self.info.diabetes_kind.toggled();
        Ok(self.info.diabetes_kind)
    }

    pub fn set_uses_insulin(&mut self, uses_insulin: bool) -> Result<(), JournalError> {
        self.ensure_info_editing()?;
        self.info.uses_insulin = uses_insulin;
        Ok(())
    }

    /// New treatments open in edit mode.
    pub fn add_treatment(&mut self) -> Uuid {
        let id = Uuid::new_v4();
        self.treatments.push(Treatment {
            id,
            description: String::new(),
            medications: Vec::new(),
            editing: true,
        });
        id
    }

    pub fn toggle_editing(&mut self, id: Uuid) -> Result<bool, JournalError> {
        let treatment = self.treatment_mut(id)?;
        treatment.editing = !treatment.editing;
        Ok(treatment.editing)
    }

    pub fn set_description(&mut self, id: Uuid, description: &str) -> Result<(), JournalError> {
        self.treatment_mut(id)?.description = description.to_string();
        Ok(())
    }

    pub fn remove_treatment(&mut self, id: Uuid) -> Result<Treatment, JournalError> {
        let index = self
            .treatments
            .iter()
            .position(|t| t.id == id)
            .ok_or(JournalError::TreatmentNotFound(id))?;
        Ok(self.treatments.remove(index))
    }

    pub fn add_medication(&mut self, treatment_id: Uuid) -> Result<Uuid, JournalError> {
        let id = Uuid::new_v4();
        self.treatment_mut(treatment_id)?.medications.push(Medication {
            id,
            name: String::new(),
            moments: BTreeSet::new(),
        });
        Ok(id)
    }

    pub fn rename_medication(
        &mut self,
        treatment_id: Uuid,
        medication_id: Uuid,
        name: &str,
    ) -> Result<(), JournalError> {
        self.medication_mut(treatment_id, medication_id)?.name = name.to_string();
        Ok(())
    }

    /// Check or uncheck a moment; returns whether it is now checked.
    pub fn toggle_moment(
        &mut self,
        treatment_id: Uuid,
        medication_id: Uuid,
        moment: DoseMoment,
    ) -> Result<bool, JournalError> {
        let medication = self.medication_mut(treatment_id, medication_id)?;
        if medication.moments.remove(&moment) {
            Ok(false)
        } else {
            medication.moments.insert(moment);
            Ok(true)
        }
    }

    pub fn remove_medication(
        &mut self,
        treatment_id: Uuid,
        medication_id: Uuid,
    ) -> Result<Medication, JournalError> {
        let treatment = self.treatment_mut(treatment_id)?;
        let index = treatment
            .medications
            .iter()
            .position(|m| m.id == medication_id)
            .ok_or(JournalError::MedicationNotFound(medication_id))?;
        Ok(treatment.medications.remove(index))
    }

    fn ensure_info_editing(&self) -> Result<(), JournalError> {
        if self.info.editing {
            Ok(())
        } else {
            Err(JournalError::InfoLocked)
        }
    }

    fn treatment_mut(&mut self, id: Uuid) -> Result<&mut Treatment, JournalError> {
        self.treatments
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(JournalError::TreatmentNotFound(id))
    }

    fn medication_mut(
        &mut self,
        treatment_id: Uuid,
        medication_id: Uuid,
    ) -> Result<&mut Medication, JournalError> {
        self.treatment_mut(treatment_id)?
            .medications
            .iter_mut()
            .find(|m| m.id == medication_id)
            .ok_or(JournalError::MedicationNotFound(medication_id))
    }
}
