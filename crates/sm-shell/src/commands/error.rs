/// Centralized error mapping for commands.
///
/// Every use-case error reaches the console as its user-facing message.
pub fn map_err<E: std::fmt::Display>(err: E) -> String {
    err.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sm_core::registration::RegistrationError;

    #[test]
    fn map_err_keeps_user_message() {
        assert_eq!(
            map_err(RegistrationError::PasswordMismatch),
            "Les mots de passe ne correspondent pas."
        );
    }
}
