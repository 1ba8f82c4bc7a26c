use crate::pages::register::utils::MIN_PASSWORD_LEN;

/// Client-side mirror of the passwordUpdate function's rules; the
/// function re-validates before any lookup.
pub fn validate_password_reset(email: &str, new_password: &str) -> Result<(), String> {
    if email.trim().is_empty() || !email.contains('@') {
        return Err("Please enter the user's email address.".to_string());
    }
    if new_password.len() < MIN_PASSWORD_LEN {
        return Err("New password must be at least 6 characters.".to_string());
    }
    Ok(())
}
