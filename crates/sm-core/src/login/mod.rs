//! Login form.

use std::fmt;

use crate::security::SecretString;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginError {
    #[error("Veuillez remplir tous les champs.")]
    MissingFields,
}

/// Credentials typed on the login screen.
#[derive(Default)]
pub struct LoginForm {
    pub email: String,
    pub password: SecretString,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: SecretString) -> Self {
        Self {
            email: email.into(),
            password,
        }
    }

    /// Both fields must be non-empty.
    pub fn validate(&self) -> Result<(), LoginError> {
        if self.email.is_empty() || self.password.is_empty() {
            return Err(LoginError::MissingFields);
        }
        Ok(())
    }
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &self.password)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_fields_are_required() {
        let missing_password = LoginForm::new("jeanne@example.fr", SecretString::default());
        assert_eq!(missing_password.validate(), Err(LoginError::MissingFields));

        let missing_email = LoginForm::new("", SecretString::from("abc123"));
        assert_eq!(missing_email.validate(), Err(LoginError::MissingFields));

        let complete = LoginForm::new("jeanne@example.fr", SecretString::from("abc123"));
        assert_eq!(complete.validate(), Ok(()));
    }

    #[test]
    fn message_matches_login_screen() {
        assert_eq!(
            LoginError::MissingFields.to_string(),
            "Veuillez remplir tous les champs."
        );
    }
}
