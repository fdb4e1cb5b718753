//! Prescriptions recorded from the doctor ("Suivi médecin").

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrescriptionStatus {
    #[default]
    Active,
    Paused,
    Completed,
}

impl PrescriptionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PrescriptionStatus::Active => "En cours",
            PrescriptionStatus::Paused => "En pause",
            PrescriptionStatus::Completed => "Terminé",
        }
    }
}

impl fmt::Display for PrescriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for PrescriptionStatus {
    type Err = PrescriptionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "active" => Ok(PrescriptionStatus::Active),
            "paused" => Ok(PrescriptionStatus::Paused),
            "completed" => Ok(PrescriptionStatus::Completed),
            other => Err(PrescriptionError::UnknownStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    pub id: Uuid,
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub status: PrescriptionStatus,
    pub next_dose: Option<NaiveDateTime>,
}

/// Editable copy of a prescription, as filled in the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrescriptionDraft {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub notes: String,
    pub next_dose: Option<NaiveDateTime>,
}

impl PrescriptionDraft {
    pub fn from_prescription(prescription: &Prescription) -> Self {
        Self {
            name: prescription.name.clone(),
            dosage: prescription.dosage.clone(),
            frequency: prescription.frequency.clone(),
            start_date: Some(prescription.start_date),
            end_date: prescription.end_date,
            notes: prescription.notes.clone().unwrap_or_default(),
            next_dose: prescription.next_dose,
        }
    }

    fn validate(&self) -> Result<(), PrescriptionError> {
        if self.name.is_empty() || self.dosage.is_empty() || self.frequency.is_empty() {
            return Err(PrescriptionError::MissingFields);
        }
        Ok(())
    }

    fn notes(&self) -> Option<String> {
        (!self.notes.is_empty()).then(|| self.notes.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PrescriptionError {
    #[error("Veuillez remplir tous les champs obligatoires")]
    MissingFields,
    #[error("Prescription introuvable : {0}")]
    NotFound(Uuid),
    #[error("Statut inconnu : \"{0}\" (active, paused ou completed).")]
    UnknownStatus(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrescriptionBook {
    prescriptions: Vec<Prescription>,
}

impl PrescriptionBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prescriptions(&self) -> &[Prescription] {
        &self.prescriptions
    }

    pub fn get(&self, id: Uuid) -> Result<&Prescription, PrescriptionError> {
        self.prescriptions
            .iter()
            .find(|p| p.id == id)
            .ok_or(PrescriptionError::NotFound(id))
    }

    /// Save a draft, either as a new active prescription or over an
    /// existing one. Editing keeps the id and status; every other field
    /// comes from the draft.
    ///
    /// `today` fills a missing start date.
    pub fn save(
        &mut self,
        draft: PrescriptionDraft,
        editing: Option<Uuid>,
        today: NaiveDate,
    ) -> Result<Uuid, PrescriptionError> {
        draft.validate()?;
        let notes = draft.notes();

        match editing {
            Some(id) => {
                let existing = self
                    .prescriptions
                    .iter_mut()
                    .find(|p| p.id == id)
                    .ok_or(PrescriptionError::NotFound(id))?;
                existing.start_date = draft.start_date.unwrap_or(existing.start_date);
                existing.name = draft.name;
                existing.dosage = draft.dosage;
                existing.frequency = draft.frequency;
                existing.end_date = draft.end_date;
                existing.notes = notes;
                existing.next_dose = draft.next_dose;
                Ok(id)
            }
            None => {
                let id = Uuid::new_v4();
                self.prescriptions.push(Prescription {
                    id,
                    name: draft.name,
                    dosage: draft.dosage,
                    frequency: draft.frequency,
                    start_date: draft.start_date.unwrap_or(today),
                    end_date: draft.end_date,
                    notes,
                    status: PrescriptionStatus::Active,
                    next_dose: draft.next_dose,
                });
                Ok(id)
            }
        }
    }

    pub fn set_status(
        &mut self,
        id: Uuid,
        status: PrescriptionStatus,
    ) -> Result<(), PrescriptionError> {
        let prescription = self
            .prescriptions
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(PrescriptionError::NotFound(id))?;
        prescription.status = status;
        if status == PrescriptionStatus::Completed {
            prescription.next_dose = None;
        }
        Ok(())
    }

    pub fn pause(&mut self, id: Uuid) -> Result<(), PrescriptionError> {
        self.set_status(id, PrescriptionStatus::Paused)
    }

    pub fn complete(&mut self, id: Uuid) -> Result<(), PrescriptionError> {
        self.set_status(id, PrescriptionStatus::Completed)
    }

    pub fn remove(&mut self, id: Uuid) -> Result<Prescription, PrescriptionError> {
        let index = self
            .prescriptions
            .iter()
            .position(|p| p.id == id)
            .ok_or(PrescriptionError::NotFound(id))?;
        Ok(self.prescriptions.remove(index))
    }

    pub fn active_count(&self) -> usize {
        self.prescriptions
            .iter()
            .filter(|p| p.status == PrescriptionStatus::Active)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn draft(name: &str) -> PrescriptionDraft {
        PrescriptionDraft {
            name: name.to_string(),
            dosage: "500mg".to_string(),
            frequency: "2 fois par jour".to_string(),
            ..PrescriptionDraft::default()
        }
    }

    #[test]
    fn save_requires_name_dosage_and_frequency() {
        let mut book = PrescriptionBook::new();
        let mut incomplete = draft("Metformine");
        incomplete.frequency.clear();

        let err = book.save(incomplete, None, date(2024, 1, 1)).unwrap_err();
        assert_eq!(err, PrescriptionError::MissingFields);
        assert_eq!(err.to_string(), "Veuillez remplir tous les champs obligatoires");
        assert!(book.prescriptions().is_empty());
    }

    #[test]
    fn new_prescription_is_active_and_dated_today() {
        let mut book = PrescriptionBook::new();
        let id = book.save(draft("Metformine"), None, date(2024, 3, 5)).unwrap();

        let saved = book.get(id).unwrap();
        assert_eq!(saved.status, PrescriptionStatus::Active);
        assert_eq!(saved.start_date, date(2024, 3, 5));
        assert_eq!(saved.notes, None);
        assert_eq!(book.active_count(), 1);
    }

    #[test]
    fn editing_keeps_id_and_status() {
        let mut book = PrescriptionBook::new();
        let id = book.save(draft("Metformine"), None, date(2024, 1, 1)).unwrap();
        book.pause(id).unwrap();

        let mut edit = PrescriptionDraft::from_prescription(book.get(id).unwrap());
        edit.dosage = "850mg".to_string();
        edit.notes = "Pendant le repas".to_string();
        let saved_id = book.save(edit, Some(id), date(2024, 2, 1)).unwrap();

        assert_eq!(saved_id, id);
        let saved = book.get(id).unwrap();
        assert_eq!(saved.dosage, "850mg");
        assert_eq!(saved.status, PrescriptionStatus::Paused);
        assert_eq!(saved.start_date, date(2024, 1, 1));
        assert_eq!(saved.notes.as_deref(), Some("Pendant le repas"));
        assert_eq!(book.prescriptions().len(), 1);
    }

    #[test]
    fn next_dose_is_saved_edited_and_cleared_on_completion() {
        let mut book = PrescriptionBook::new();
        let evening = date(2024, 3, 20).and_hms_opt(20, 0, 0).unwrap();
        let mut with_dose = draft("Metformine");
        with_dose.next_dose = Some(evening);
        let id = book.save(with_dose, None, date(2024, 3, 1)).unwrap();
        assert_eq!(book.get(id).unwrap().next_dose, Some(evening));

        let noon = date(2024, 3, 21).and_hms_opt(12, 0, 0).unwrap();
        let mut edit = PrescriptionDraft::from_prescription(book.get(id).unwrap());
        assert_eq!(edit.next_dose, Some(evening));
        edit.next_dose = Some(noon);
        book.save(edit, Some(id), date(2024, 3, 2)).unwrap();
        assert_eq!(book.get(id).unwrap().next_dose, Some(noon));

        book.pause(id).unwrap();
        assert_eq!(book.get(id).unwrap().next_dose, Some(noon));
        book.complete(id).unwrap();
        assert_eq!(book.get(id).unwrap().next_dose, None);
    }

    #[test]
    fn editing_unknown_prescription_fails() {
        let mut book = PrescriptionBook::new();
        let missing = Uuid::new_v4();
        assert_eq!(
            book.save(draft("Insuline"), Some(missing), date(2024, 1, 1)),
            Err(PrescriptionError::NotFound(missing))
        );
    }

    #[test]
    fn status_labels_and_removal() {
        let mut book = PrescriptionBook::new();
        let id = book.save(draft("Insuline"), None, date(2024, 1, 1)).unwrap();
        assert_eq!(book.get(id).unwrap().status.label(), "En cours");

        book.complete(id).unwrap();
        assert_eq!(book.get(id).unwrap().status.to_string(), "Terminé");
        assert_eq!(book.active_count(), 0);

        book.remove(id).unwrap();
        assert_eq!(book.get(id), Err(PrescriptionError::NotFound(id)));
    }
}
