pub fn validate_credentials(email: &str, password: &str) -> Result<(), String> {
    if email.trim().is_empty() || password.is_empty() {
        return Err("Email and password are required.".to_string());
    }
    if !email.contains('@') {
        return Err("Please enter a valid email address.".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_fields() {
        assert!(validate_credentials("", "pw").is_err());
        assert!(validate_credentials("a@x.edu", "").is_err());
        assert!(validate_credentials("  ", "pw").is_err());
    }

    #[test]
    fn rejects_address_without_at_sign() {
        assert!(validate_credentials("not-an-email", "pw").is_err());
    }

    #[test]
    fn accepts_plausible_credentials() {
        assert!(validate_credentials("jane.doe@x.edu", "pw").is_ok());
    }
}
