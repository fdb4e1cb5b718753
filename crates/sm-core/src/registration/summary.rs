//! Review step summary.

use serde::Serialize;

use crate::registration::form::{FormField, RegistrationForm};

const EMPTY_PLACEHOLDER: &str = "-";
const MASK: &str = "********";

/// One `key: value` row of the review screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewLine {
    pub key: &'static str,
    pub value: String,
}

impl std::fmt::Display for ReviewLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.key, self.value)
    }
}

/// Every field of the form, in entry order. Empty values show as `-`, passwords are masked.
pub fn review_lines(form: &RegistrationForm) -> Vec<ReviewLine> {
    FormField::ALL
        .into_iter()
        .map(|field| {
            let raw = form.value_of(field);
            let value = if raw.is_empty() {
                EMPTY_PLACEHOLDER.to_string()
            } else if field.is_secret() {
                MASK.to_string()
            } else {
                raw.to_string()
            };
            ReviewLine {
                key: field.key(),
                value,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registration::form::Answer;

    #[test]
    fn review_lists_all_fields_with_placeholders() {
        let form = RegistrationForm {
            name: "Jeanne".to_string(),
            password: "abc123".to_string(),
            has_diabetes: Answer::No,
            ..RegistrationForm::default()
        };

        let lines: Vec<String> = review_lines(&form).iter().map(ToString::to_string).collect();

        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "name: Jeanne");
        assert_eq!(lines[1], "email: -");
        assert_eq!(lines[3], "password: ********");
        assert_eq!(lines[4], "confirmPassword: -");
        assert_eq!(lines[6], "hasDiabetes: non");
        assert_eq!(lines[9], "medicineType: -");
    }
}
