use crate::api::{ApiClient, ProfileRow, SessionUser};

/// The view-model the whole UI reads. Exists iff a valid session does.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalUser {
    pub id: String,
    pub email: Option<String>,
    pub display_name: String,
    pub avatar_url: String,
    pub is_admin: bool,
}

/// Merge the identity subject with its optional profile row.
/// Precedence per field: profile > provider metadata > computed
/// fallback.
pub fn merge_local_user(subject: &SessionUser, profile: Option<&ProfileRow>) -> LocalUser {
    let display_name = profile
        .and_then(|p| p.display_name())
        .map(|n| n.to_string())
        .or_else(|| {
            subject
                .user_metadata
                .name
                .as_deref()
                .filter(|n| !n.trim().is_empty())
                .map(|n| n.to_string())
        })
        .or_else(|| email_local_part(subject.email.as_deref()))
        .unwrap_or_else(|| "User".to_string());

    let avatar_url = profile
        .and_then(|p| p.avatar_url.clone())
        .filter(|url| !url.trim().is_empty())
        .or_else(|| {
            subject
                .user_metadata
                .avatar_url
                .clone()
                .filter(|url| !url.trim().is_empty())
        })
        .unwrap_or_else(|| placeholder_avatar(&display_name));

    LocalUser {
        id: subject.id.clone(),
        email: subject.email.clone(),
        display_name,
        avatar_url,
        is_admin: profile.map(|p| p.is_admin).unwrap_or(false),
    }
}

/// Best-effort derivation: a failed profile lookup is logged and the
/// merge proceeds with the fallback chain. Sign-in is never blocked on
/// profile availability.
pub async fn derive_local_user(client: &ApiClient, subject: &SessionUser) -> LocalUser {
    let profile = match client.fetch_profile(&subject.id).await {
        Ok(profile) => profile,
        Err(error) => {
            log::error!("Profile lookup failed for {}: {}", subject.id, error);
            None
        }
    };
    merge_local_user(subject, profile.as_ref())
}

fn email_local_part(email: Option<&str>) -> Option<String> {
    let email = email?;
    let local = email.split('@').next()?.trim();
    if local.is_empty() {
        return None;
    }
    Some(local.to_string())
}

/// 1-2 character label: first letters of the first two words, or the
/// first two characters of a single word, uppercased.
pub fn initials(name: &str) -> String {
    let mut words = name.split_whitespace();
    match (words.next(), words.next()) {
        (Some(first), Some(second)) => first
            .chars()
            .take(1)
            .chain(second.chars().take(1))
            .flat_map(char::to_uppercase)
            .collect(),
        (Some(only), None) => only.chars().take(2).flat_map(char::to_uppercase).collect(),
        _ => "U".to_string(),
    }
}

pub fn placeholder_avatar(display_name: &str) -> String {
    format!(
        "https://placehold.co/100x100.png?text={}",
        initials(display_name)
    )
}
