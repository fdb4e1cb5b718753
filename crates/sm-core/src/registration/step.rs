use serde::{Deserialize, Serialize};

use crate::registration::form::FormField;

/// The four ordered stages of the registration wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RegistrationStep {
    /// Identity and credentials.
    Identity = 1,
    /// Blood type and diabetes status.
    Health = 2,
    /// Medication status.
    Medication = 3,
    /// Review and submit.
    Review = 4,
}

impl RegistrationStep {
    pub const FIRST: RegistrationStep = RegistrationStep::Identity;
    pub const LAST: RegistrationStep = RegistrationStep::Review;

    pub fn number(&self) -> u8 {
        *self as u8
    }

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(RegistrationStep::Identity),
            2 => Some(RegistrationStep::Health),
            3 => Some(RegistrationStep::Medication),
            4 => Some(RegistrationStep::Review),
            _ => None,
        }
    }

    pub fn next(&self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn previous(&self) -> Option<Self> {
        Self::from_number(self.number().checked_sub(1)?)
    }

    /// Fields that must be non-empty before leaving this step.
    pub fn required_fields(&self) -> &'static [FormField] {
        match self {
            RegistrationStep::Identity => &[
                FormField::Name,
                FormField::Email,
                FormField::Phone,
                FormField::Password,
                FormField::ConfirmPassword,
            ],
            RegistrationStep::Health => &[FormField::BloodType, FormField::HasDiabetes],
            RegistrationStep::Medication => &[FormField::TakesMedicine],
            RegistrationStep::Review => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RegistrationStep;

    #[test]
    fn steps_are_bounded() {
        assert_eq!(RegistrationStep::FIRST.previous(), None);
        assert_eq!(RegistrationStep::LAST.next(), None);
        assert_eq!(
            RegistrationStep::Health.next(),
            Some(RegistrationStep::Medication)
        );
        assert_eq!(
            RegistrationStep::Medication.previous(),
            Some(RegistrationStep::Health)
        );
        assert_eq!(RegistrationStep::from_number(0), None);
        assert_eq!(RegistrationStep::from_number(5), None);
    }
}
