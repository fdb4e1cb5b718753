//! Messages written to the doctor or the nutritionist from their screens.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CareProvider {
    Doctor,
    Nutritionist,
}

impl CareProvider {
    pub fn label(&self) -> &'static str {
        match self {
            CareProvider::Doctor => "Médecin",
            CareProvider::Nutritionist => "Nutritionniste",
        }
    }
}

impl fmt::Display for CareProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MessageError {
    #[error("Veuillez entrer un message")]
    Empty,
}

/// A message accepted for sending. Blank text is refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderMessage {
    pub provider: CareProvider,
    pub text: String,
}

impl ProviderMessage {
    pub fn new(provider: CareProvider, text: impl Into<String>) -> Result<Self, MessageError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(MessageError::Empty);
        }
        Ok(Self { provider, text })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_messages_are_refused() {
        for text in ["", "   ", "\n\t"] {
            assert_eq!(
                ProviderMessage::new(CareProvider::Doctor, text),
                Err(MessageError::Empty)
            );
        }
        assert_eq!(MessageError::Empty.to_string(), "Veuillez entrer un message");
    }

    #[test]
    fn text_is_kept_as_written() {
        let message =
            ProviderMessage::new(CareProvider::Nutritionist, " Quels féculents le soir ? ").unwrap();
        assert_eq!(message.provider, CareProvider::Nutritionist);
        assert_eq!(message.text, " Quels féculents le soir ? ");
    }
}
