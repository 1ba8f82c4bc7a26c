use leptos::*;

use crate::api::{ApiClient, ApiError, AuthEvent, Session, UserMetadata};
use crate::state::profile::{derive_local_user, placeholder_avatar, LocalUser};

type AuthContext = (ReadSignal<AuthState>, WriteSignal<AuthState>);

/// Two-state machine reconciling provider events with local UI state.
/// `Initializing` is entered exactly once, while the first session
/// check is in flight; every event after that lands in `Resolved`.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionPhase {
    Initializing,
    Resolved(Option<LocalUser>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub phase: SessionPhase,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            phase: SessionPhase::Initializing,
        }
    }
}

impl AuthState {
    pub fn user(&self) -> Option<&LocalUser> {
        match &self.phase {
            SessionPhase::Resolved(user) => user.as_ref(),
            SessionPhase::Initializing => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user().is_some()
    }

    /// True only during the initial session check. Steady-state events
    /// are applied silently.
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, SessionPhase::Initializing)
    }

    pub fn is_admin(&self) -> bool {
        self.user().map(|u| u.is_admin).unwrap_or(false)
    }
}

/// A provider event after its asynchronous user derivation.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionEvent {
    pub kind: AuthEvent,
    pub user: Option<LocalUser>,
}

/// The single reducer. Every resolved event replaces the state
/// atomically; nothing ever transitions back to `Initializing`.
pub fn reduce(_state: &AuthState, event: SessionEvent) -> AuthState {
    AuthState {
        phase: SessionPhase::Resolved(event.user),
    }
}

async fn resolve_event_user(client: &ApiClient, session: Option<&Session>) -> Option<LocalUser> {
    match session {
        Some(session) => Some(derive_local_user(client, &session.user).await),
        None => None,
    }
}

fn create_auth_context(client: ApiClient) -> AuthContext {
    let (auth_state, set_auth_state) = create_signal(AuthState::default());

    // Steady-state listener: re-derive the user on every provider
    // event, in emission order, one profile refetch per event.
    let listener_client = client.clone();
    client.on_auth_state_change(move |event, session| {
        let client = listener_client.clone();
        spawn_local(async move {
            let user = resolve_event_user(&client, session.as_ref()).await;
            set_auth_state
                .update(|state| *state = reduce(state, SessionEvent { kind: event, user }));
        });
    });

    // Initial blocking resolution. Failure resolves to signed-out; an
    // unrecoverably invalid token also forces a local sign-out so no
    // stale identity survives.
    let initial_client = client;
    spawn_local(async move {
        let user = match initial_client.current_session().await {
            Ok(session) => resolve_event_user(&initial_client, session.as_ref()).await,
            Err(error) => {
                log::warn!("Initial session check failed: {}", error);
                if error.is_invalid_session() {
                    initial_client.sign_out_local();
                }
                None
            }
        };
        set_auth_state.update(|state| {
            *state = reduce(
                state,
                SessionEvent {
                    kind: AuthEvent::InitialSession,
                    user,
                },
            )
        });
    });

    (auth_state, set_auth_state)
}

#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let client = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    provide_context(client.clone());
    let ctx = create_auth_context(client);
    provide_context::<AuthContext>(ctx);
    view! { <>{children()}</> }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(|| create_signal(AuthState::default()))
}

pub fn use_api_client() -> ApiClient {
    use_context::<ApiClient>().unwrap_or_else(ApiClient::new)
}

/// Delegates to the provider; the listener propagates the resulting
/// state, so nothing is written here on success.
pub async fn login(client: &ApiClient, email: &str, password: &str) -> Result<(), ApiError> {
    client
        .sign_in_with_password(email, password)
        .await
        .map(|_| ())
}

/// Returns true when a live session was issued immediately; false when
/// the provider left the account pending email confirmation.
pub async fn register(
    client: &ApiClient,
    email: &str,
    password: &str,
    name: &str,
) -> Result<bool, ApiError> {
    let metadata = UserMetadata {
        name: Some(name.to_string()),
        avatar_url: Some(placeholder_avatar(name)),
    };
    client
        .sign_up(email, password, &metadata)
        .await
        .map(|session| session.is_some())
}

/// Steady-state escape hatch: an operation that failed because the
/// session token is unrecoverable forces a local sign-out, so stale
/// admin/user state is never served. Any other failure is left to the
/// caller to surface.
pub fn handle_auth_failure(client: &ApiClient, error: &ApiError) {
    if error.is_invalid_session() {
        log::warn!("Invalid session detected, signing out locally: {}", error);
        client.sign_out_local();
    }
}

/// Optimistically clears the local user for responsiveness; the
/// SignedOut emission then settles the same state through the reducer.
pub async fn logout(
    client: &ApiClient,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<(), ApiError> {
    set_auth_state.update(|state| {
        *state = reduce(
            state,
            SessionEvent {
                kind: AuthEvent::SignedOut,
                user: None,
            },
        )
    });
    client.sign_out().await
}

pub fn use_login_action() -> Action<(String, String), Result<(), ApiError>> {
    let client = use_api_client();
    create_action(move |(email, password): &(String, String)| {
        let client = client.clone();
        let email = email.clone();
        let password = password.clone();
        async move { login(&client, &email, &password).await }
    })
}

pub fn use_register_action() -> Action<(String, String, String), Result<bool, ApiError>> {
    let client = use_api_client();
    create_action(move |(email, password, name): &(String, String, String)| {
        let client = client.clone();
        let email = email.clone();
        let password = password.clone();
        let name = name.clone();
        async move { register(&client, &email, &password, &name).await }
    })
}

pub fn use_logout_action() -> Action<(), Result<(), ApiError>> {
    let (_auth, set_auth) = use_auth();
    let client = use_api_client();
    create_action(move |_: &()| {
        let client = client.clone();
        async move { logout(&client, set_auth).await }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str) -> LocalUser {
        LocalUser {
            id: "u1".into(),
            email: Some("jane.doe@x.edu".into()),
            display_name: name.into(),
            avatar_url: "https://placehold.co/100x100.png?text=JD".into(),
            is_admin: false,
        }
    }

    #[test]
    fn default_state_is_initializing() {
        let state = AuthState::default();
        assert!(state.is_loading());
        assert!(!state.is_authenticated());
        assert!(state.user().is_none());
    }

    #[test]
    fn loading_never_returns_after_first_resolution() {
        let sequences: Vec<Vec<SessionEvent>> = vec![
            vec![
                SessionEvent {
                    kind: AuthEvent::InitialSession,
                    user: None,
                },
                SessionEvent {
                    kind: AuthEvent::SignedIn,
                    user: Some(user("Jane")),
                },
                SessionEvent {
                    kind: AuthEvent::TokenRefreshed,
                    user: Some(user("Jane")),
                },
                SessionEvent {
                    kind: AuthEvent::SignedOut,
                    user: None,
                },
            ],
            vec![
                SessionEvent {
                    kind: AuthEvent::InitialSession,
                    user: Some(user("Jane")),
                },
                SessionEvent {
                    kind: AuthEvent::UserUpdated,
                    user: Some(user("Jane D.")),
                },
            ],
        ];
        for events in sequences {
            let mut state = AuthState::default();
            assert!(state.is_loading());
            for event in events {
                state = reduce(&state, event);
                assert!(!state.is_loading());
            }
        }
    }

    #[test]
    fn null_session_means_unauthenticated() {
        let state = reduce(
            &AuthState::default(),
            SessionEvent {
                kind: AuthEvent::InitialSession,
                user: None,
            },
        );
        assert!(!state.is_authenticated());
        assert!(state.user().is_none());
        assert!(!state.is_admin());
    }

    #[test]
    fn steady_state_events_replace_the_user_atomically() {
        let signed_in = reduce(
            &AuthState::default(),
            SessionEvent {
                kind: AuthEvent::SignedIn,
                user: Some(user("Jane")),
            },
        );
        assert!(signed_in.is_authenticated());

        let updated = reduce(
            &signed_in,
            SessionEvent {
                kind: AuthEvent::UserUpdated,
                user: Some(user("Jane Doe")),
            },
        );
        assert_eq!(
            updated.user().map(|u| u.display_name.as_str()),
            Some("Jane Doe")
        );

        let signed_out = reduce(
            &updated,
            SessionEvent {
                kind: AuthEvent::SignedOut,
                user: None,
            },
        );
        assert!(!signed_out.is_authenticated());
        assert!(!signed_out.is_loading());
    }

    #[test]
    fn auth_failure_handler_only_reacts_to_invalid_sessions() {
        use crate::api::error::AuthError;

        let client = ApiClient::new_with_base_url("http://localhost:9");
        client.set_session(
            serde_json::from_value(serde_json::json!({
                "access_token": "at", "refresh_token": "rt",
                "user": { "id": "u1", "user_metadata": {} }
            }))
            .expect("session"),
        );

        let benign = ApiError::Auth(AuthError::new("Invalid login credentials", Some(403)));
        handle_auth_failure(&client, &benign);
        assert!(client.session_snapshot().is_some());

        let fatal = ApiError::Auth(AuthError::new("Invalid Refresh Token: Already Used", Some(400)));
        handle_auth_failure(&client, &fatal);
        assert!(client.session_snapshot().is_none());
    }

    #[test]
    fn use_auth_returns_default_without_context() {
        let runtime = create_runtime();
        let (state, _set_state) = use_auth();
        let snapshot = state.get();
        assert!(!snapshot.is_authenticated());
        assert!(snapshot.user().is_none());
        runtime.dispose();
    }
}
