use serde::{Deserialize, Serialize};

use crate::registration::form::{Answer, MedicineType, RegistrationForm};
use crate::security::SecretString;

/// Medical data collected across the health and medication steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalProfile {
    pub blood_type: String,
    pub has_diabetes: bool,
    pub diabetes_type: Option<String>,
    pub takes_medicine: bool,
    pub medicine_type: Option<MedicineType>,
}

impl MedicalProfile {
    /// Conditional sub-fields are only kept when their question was answered "yes".
    pub fn from_form(form: &RegistrationForm) -> Self {
        let has_diabetes = form.has_diabetes == Answer::Yes;
        let takes_medicine = form.takes_medicine == Answer::Yes;
        Self {
            blood_type: form.blood_type.clone(),
            has_diabetes,
            diabetes_type: has_diabetes.then(|| form.diabetes_type.clone()),
            takes_medicine,
            medicine_type: takes_medicine.then_some(form.medicine_type),
        }
    }
}

/// Everything the identity provider needs to create an account.
#[derive(Debug)]
pub struct AccountRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: SecretString,
    pub profile: MedicalProfile,
}

impl AccountRequest {
    pub fn from_form(form: &RegistrationForm) -> Self {
        Self {
            name: form.name.clone(),
            email: form.email.clone(),
            phone: form.phone.clone(),
            password: SecretString::new(form.password.clone()),
            profile: MedicalProfile::from_form(form),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_drops_stale_conditional_answers() {
        let form = RegistrationForm {
            blood_type: "B-".to_string(),
            has_diabetes: Answer::No,
            diabetes_type: "Type 1".to_string(),
            takes_medicine: Answer::Yes,
            medicine_type: MedicineType::Insulin,
            ..RegistrationForm::default()
        };

        let profile = MedicalProfile::from_form(&form);

        assert!(!profile.has_diabetes);
        assert_eq!(profile.diabetes_type, None);
        assert_eq!(profile.medicine_type, Some(MedicineType::Insulin));
    }

    #[test]
    fn account_request_carries_password_as_secret() {
        let form = RegistrationForm {
            email: "jeanne@example.fr".to_string(),
            password: "abc123".to_string(),
            ..RegistrationForm::default()
        };

        let request = AccountRequest::from_form(&form);

        assert_eq!(request.password.expose(), "abc123");
        assert!(!format!("{request:?}").contains("abc123"));
    }
}
