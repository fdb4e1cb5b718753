//! Per-step validators for the registration wizard.
//!
//! Checks run in a fixed order and stop at the first failure, so the user
//! always sees exactly one reason.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::registration::form::{Answer, FormField, RegistrationForm};
use crate::registration::step::RegistrationStep;

lazy_static! {
    /// `local@domain.tld`, no whitespace and a single `@`-free local part.
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid");

    /// French landline/mobile number, national (`0`) or international (`+33`) prefix,
    /// pairs optionally separated by `-`, `.` or whitespace.
    static ref PHONE_REGEX: Regex =
        Regex::new(r"^(0|\+33)[1-9]([-.\s]?[0-9]{2}){4}$").expect("phone pattern is valid");
}

/// Reasons a step is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum RegistrationError {
    #[error("Le champ \"{0}\" est requis.")]
    MissingField(FormField),
    #[error("Format d'email invalide.")]
    InvalidEmail,
    #[error("Numéro de téléphone invalide.")]
    InvalidPhone,
    #[error("Les mots de passe ne correspondent pas.")]
    PasswordMismatch,
    #[error("Veuillez spécifier le type de diabète.")]
    DiabetesTypeRequired,
    #[error("Veuillez spécifier le type de médicament.")]
    MedicineTypeRequired,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

pub fn is_valid_phone_number(phone: &str) -> bool {
    PHONE_REGEX.is_match(phone)
}

/// Validate the fields owned by `step`.
pub fn validate_step(
    step: RegistrationStep,
    form: &RegistrationForm,
) -> Result<(), RegistrationError> {
    if let Some(missing) = step
        .required_fields()
        .iter()
        .find(|field| !form.is_filled(**field))
    {
        return Err(RegistrationError::MissingField(*missing));
    }

    match step {
        RegistrationStep::Identity => {
            if !is_valid_email(&form.email) {
                return Err(RegistrationError::InvalidEmail);
            }
            if !is_valid_phone_number(&form.phone) {
                return Err(RegistrationError::InvalidPhone);
            }
            if form.password != form.confirm_password {
                return Err(RegistrationError::PasswordMismatch);
            }
        }
        RegistrationStep::Health => {
            if form.has_diabetes == Answer::Yes && form.diabetes_type.is_empty() {
                return Err(RegistrationError::DiabetesTypeRequired);
            }
        }
        RegistrationStep::Medication => {
            if form.takes_medicine == Answer::Yes && !form.medicine_type.is_set() {
                return Err(RegistrationError::MedicineTypeRequired);
            }
        }
        RegistrationStep::Review => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity_form() -> RegistrationForm {
        RegistrationForm {
            name: "Jeanne Martin".to_string(),
            email: "jeanne@example.fr".to_string(),
            phone: "06 12 34 56 78".to_string(),
            password: "abc123".to_string(),
            confirm_password: "abc123".to_string(),
            ..RegistrationForm::default()
        }
    }

    #[test]
    fn every_identity_field_is_required() {
        for field in RegistrationStep::Identity.required_fields() {
            let mut form = identity_form();
            form.set(*field, "").unwrap();

            assert_eq!(
                validate_step(RegistrationStep::Identity, &form),
                Err(RegistrationError::MissingField(*field))
            );
        }
    }

    #[test]
    fn missing_fields_are_reported_in_declaration_order() {
        let form = RegistrationForm::default();
        assert_eq!(
            validate_step(RegistrationStep::Identity, &form),
            Err(RegistrationError::MissingField(FormField::Name))
        );
    }

    #[test]
    fn rejects_malformed_emails() {
        for email in ["foo@bar", "foo.com", "foo @bar.com", "foo@@bar.com", "@bar.com"] {
            let mut form = identity_form();
            form.email = email.to_string();
            assert_eq!(
                validate_step(RegistrationStep::Identity, &form),
                Err(RegistrationError::InvalidEmail),
                "email {email:?} should be rejected"
            );
        }
    }

    #[test]
    fn email_check_runs_before_phone_check() {
        let mut form = identity_form();
        form.email = "foo@bar".to_string();
        form.phone = "12345".to_string();

        assert_eq!(
            validate_step(RegistrationStep::Identity, &form),
            Err(RegistrationError::InvalidEmail)
        );
    }

    #[test]
    fn rejects_malformed_phone_numbers() {
        for phone in ["12345", "0012345678", "06123456", "+3306123456", "06-12-34-56-7a"] {
            let mut form = identity_form();
            form.phone = phone.to_string();
            assert_eq!(
                validate_step(RegistrationStep::Identity, &form),
                Err(RegistrationError::InvalidPhone),
                "phone {phone:?} should be rejected"
            );
        }
    }

    #[test]
    fn accepts_french_phone_number_spellings() {
        for phone in ["0612345678", "06 12 34 56 78", "06.12.34.56.78", "+33612345678", "01-23-45-67-89"] {
            assert!(is_valid_phone_number(phone), "phone {phone:?} should pass");
        }
    }

    #[test]
    fn password_confirmation_must_match() {
        let mut form = identity_form();
        form.password = "abc123".to_string();
        form.confirm_password = "abc124".to_string();
        assert_eq!(
            validate_step(RegistrationStep::Identity, &form),
            Err(RegistrationError::PasswordMismatch)
        );

        form.confirm_password = "abc123".to_string();
        assert_eq!(validate_step(RegistrationStep::Identity, &form), Ok(()));
    }

    #[test]
    fn diabetes_type_required_only_when_diabetic() {
        let mut form = RegistrationForm {
            blood_type: "O+".to_string(),
            has_diabetes: Answer::Yes,
            ..RegistrationForm::default()
        };
        assert_eq!(
            validate_step(RegistrationStep::Health, &form),
            Err(RegistrationError::DiabetesTypeRequired)
        );

        form.has_diabetes = Answer::No;
        assert_eq!(validate_step(RegistrationStep::Health, &form), Ok(()));
    }

    #[test]
    fn health_step_requires_blood_type_then_answer() {
        let mut form = RegistrationForm::default();
        assert_eq!(
            validate_step(RegistrationStep::Health, &form),
            Err(RegistrationError::MissingField(FormField::BloodType))
        );

        form.blood_type = "A+".to_string();
        assert_eq!(
            validate_step(RegistrationStep::Health, &form),
            Err(RegistrationError::MissingField(FormField::HasDiabetes))
        );
    }

    #[test]
    fn medicine_type_required_only_when_taking_medicine() {
        let mut form = RegistrationForm {
            takes_medicine: Answer::Yes,
            ..RegistrationForm::default()
        };
        assert_eq!(
            validate_step(RegistrationStep::Medication, &form),
            Err(RegistrationError::MedicineTypeRequired)
        );

        form.set(FormField::MedicineType, "comprimés").unwrap();
        assert_eq!(validate_step(RegistrationStep::Medication, &form), Ok(()));
    }

    #[test]
    fn review_step_always_passes() {
        assert_eq!(
            validate_step(RegistrationStep::Review, &RegistrationForm::default()),
            Ok(())
        );
    }

    #[test]
    fn error_messages_are_user_facing() {
        assert_eq!(
            RegistrationError::MissingField(FormField::ConfirmPassword).to_string(),
            "Le champ \"confirmPassword\" est requis."
        );
        assert_eq!(
            RegistrationError::InvalidEmail.to_string(),
            "Format d'email invalide."
        );
    }
}
