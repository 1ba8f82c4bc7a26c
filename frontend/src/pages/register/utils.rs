/// Mirrors the provider's 6-character password minimum for immediate
/// feedback; the provider remains the authority.
pub const MIN_PASSWORD_LEN: usize = 6;

pub fn validate_registration(
    name: &str,
    email: &str,
    password: &str,
    confirm: &str,
) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Name is required.".to_string());
    }
    if email.trim().is_empty() || !email.contains('@') {
        return Err("Please enter a valid email address.".to_string());
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 6 characters.".to_string());
    }
    if password != confirm {
        return Err("Passwords do not match.".to_string());
    }
    Ok(())
}
