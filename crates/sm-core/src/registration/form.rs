//! Registration form record.
//!
//! The form is a plain data bag edited field by field. Editing never
//! validates; the per-step validators in [`crate::registration::validation`]
//! decide whether the wizard may move on.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A yes/no question that may still be unanswered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Answer {
    #[default]
    #[serde(rename = "")]
    Unset,
    #[serde(rename = "oui")]
    Yes,
    #[serde(rename = "non")]
    No,
}

impl Answer {
    pub fn as_str(&self) -> &'static str {
        match self {
            Answer::Unset => "",
            Answer::Yes => "oui",
            Answer::No => "non",
        }
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, Answer::Unset)
    }
}

impl FromStr for Answer {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "" => Ok(Answer::Unset),
            "oui" | "yes" => Ok(Answer::Yes),
            "non" | "no" => Ok(Answer::No),
            _ => Err(()),
        }
    }
}

/// Kind of medicine the patient takes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MedicineType {
    #[default]
    #[serde(rename = "")]
    Unset,
    #[serde(rename = "comprimés")]
    Tablets,
    #[serde(rename = "insuline")]
    Insulin,
}

impl MedicineType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MedicineType::Unset => "",
            MedicineType::Tablets => "comprimés",
            MedicineType::Insulin => "insuline",
        }
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, MedicineType::Unset)
    }
}

impl FromStr for MedicineType {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "" => Ok(MedicineType::Unset),
            "comprimés" | "comprimes" | "tablets" => Ok(MedicineType::Tablets),
            "insuline" | "insulin" => Ok(MedicineType::Insulin),
            _ => Err(()),
        }
    }
}

/// Names of the editable form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    Name,
    Email,
    Phone,
    Password,
    ConfirmPassword,
    BloodType,
    HasDiabetes,
    DiabetesType,
    TakesMedicine,
    MedicineType,
}

impl FormField {
    /// Every field, in review order.
    pub const ALL: [FormField; 10] = [
        FormField::Name,
        FormField::Email,
        FormField::Phone,
        FormField::Password,
        FormField::ConfirmPassword,
        FormField::BloodType,
        FormField::HasDiabetes,
        FormField::DiabetesType,
        FormField::TakesMedicine,
        FormField::MedicineType,
    ];

    /// Key shown to the user in messages and in the review summary.
    pub fn key(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Phone => "phone",
            FormField::Password => "password",
            FormField::ConfirmPassword => "confirmPassword",
            FormField::BloodType => "bloodType",
            FormField::HasDiabetes => "hasDiabetes",
            FormField::DiabetesType => "diabetesType",
            FormField::TakesMedicine => "takesMedicine",
            FormField::MedicineType => "medicineType",
        }
    }

    pub fn is_secret(&self) -> bool {
        matches!(self, FormField::Password | FormField::ConfirmPassword)
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FormField {
    type Err = FieldError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        FormField::ALL
            .into_iter()
            .find(|field| {
                field.key() == value || field.key().eq_ignore_ascii_case(&value.replace('_', ""))
            })
            .ok_or_else(|| FieldError::UnknownField(value.to_string()))
    }
}

/// Errors raised while editing a field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("Champ inconnu : \"{0}\".")]
    UnknownField(String),
    #[error("Valeur \"{value}\" invalide pour le champ \"{field}\".")]
    UnknownChoice { field: FormField, value: String },
}

/// Data collected by the registration wizard.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing)]
    pub password: String,
    #[serde(skip_serializing)]
    pub confirm_password: String,
    pub blood_type: String,
    pub has_diabetes: Answer,
    pub diabetes_type: String,
    pub takes_medicine: Answer,
    pub medicine_type: MedicineType,
}

impl RegistrationForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one field from its raw text value.
    ///
    /// Choice fields only accept their known spellings; the empty string
    /// clears them back to unset.
    pub fn set(&mut self, field: FormField, value: &str) -> Result<(), FieldError> {
        let unknown_choice = || FieldError::UnknownChoice {
            field,
            value: value.to_string(),
        };
        match field {
            FormField::Name => self.name = value.to_string(),
            FormField::Email => self.email = value.to_string(),
            FormField::Phone => self.phone = value.to_string(),
            FormField::Password => self.password = value.to_string(),
            FormField::ConfirmPassword => self.confirm_password = value.to_string(),
            FormField::BloodType => self.blood_type = value.to_string(),
            FormField::HasDiabetes => {
                self.has_diabetes = value.parse().map_err(|_| unknown_choice())?
            }
            FormField::DiabetesType => self.diabetes_type = value.to_string(),
            FormField::TakesMedicine => {
                self.takes_medicine = value.parse().map_err(|_| unknown_choice())?
            }
            FormField::MedicineType => {
                self.medicine_type = value.parse().map_err(|_| unknown_choice())?
            }
        }
        Ok(())
    }

    /// Raw text value of a field; empty when unset.
    pub fn value_of(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Phone => &self.phone,
            FormField::Password => &self.password,
            FormField::ConfirmPassword => &self.confirm_password,
            FormField::BloodType => &self.blood_type,
            FormField::HasDiabetes => self.has_diabetes.as_str(),
            FormField::DiabetesType => &self.diabetes_type,
            FormField::TakesMedicine => self.takes_medicine.as_str(),
            FormField::MedicineType => self.medicine_type.as_str(),
        }
    }

    pub fn is_filled(&self, field: FormField) -> bool {
        !self.value_of(field).is_empty()
    }
}

impl fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("password", &"[REDACTED]")
            .field("confirm_password", &"[REDACTED]")
            .field("blood_type", &self.blood_type)
            .field("has_diabetes", &self.has_diabetes)
            .field("diabetes_type", &self.diabetes_type)
            .field("takes_medicine", &self.takes_medicine)
            .field("medicine_type", &self.medicine_type)
            .finish()
    }
}
