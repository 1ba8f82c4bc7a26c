use std::cell::RefCell;
use std::rc::Rc;

use reqwest::Client;

use crate::api::types::{AuthEvent, Session};
use crate::config;

pub const SESSION_STORAGE_KEY: &str = "resource-hub-session";

type AuthListener = Rc<dyn Fn(AuthEvent, Option<Session>)>;

struct ClientInner {
    http: Client,
    override_provider_url: Option<String>,
    override_functions_url: Option<String>,
    override_anon_key: Option<String>,
    session: RefCell<Option<Session>>,
    listeners: RefCell<Vec<AuthListener>>,
}

/// Handle to the managed provider's auth, data, storage and functions
/// APIs. Clones share session state and auth listeners; the app
/// provides one instance through context.
#[derive(Clone)]
pub struct ApiClient {
    inner: Rc<ClientInner>,
}

impl ApiClient {
    pub fn new() -> Self {
        let client = Self::with_overrides(None, None, None);
        if let Some(session) = load_persisted_session() {
            *client.inner.session.borrow_mut() = Some(session);
        }
        client
    }

    /// Test constructor: fixed endpoints, no persisted session.
    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        let base: String = base_url.into();
        let base = base.trim_end_matches('/').to_string();
        Self::with_overrides(Some(base.clone()), Some(base), Some("test-anon-key".into()))
    }

    fn with_overrides(
        provider_url: Option<String>,
        functions_url: Option<String>,
        anon_key: Option<String>,
    ) -> Self {
        Self {
            inner: Rc::new(ClientInner {
                http: Client::new(),
                override_provider_url: provider_url,
                override_functions_url: functions_url,
                override_anon_key: anon_key,
                session: RefCell::new(None),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    pub(crate) fn http(&self) -> &Client {
        &self.inner.http
    }

    pub(crate) async fn provider_url(&self) -> String {
        if let Some(url) = &self.inner.override_provider_url {
            return url.clone();
        }
        config::await_settings().await.provider_url
    }

    pub(crate) async fn functions_url(&self) -> String {
        if let Some(url) = &self.inner.override_functions_url {
            return url.clone();
        }
        config::await_settings().await.functions_url
    }

    pub(crate) async fn anon_key(&self) -> String {
        if let Some(key) = &self.inner.override_anon_key {
            return key.clone();
        }
        config::await_settings().await.anon_key
    }

    /// Current session without liveness checks. `current_session` on the
    /// auth surface refreshes an expired one.
    pub fn session_snapshot(&self) -> Option<Session> {
        self.inner.session.borrow().clone()
    }

    pub(crate) fn access_token(&self) -> Option<String> {
        self.inner
            .session
            .borrow()
            .as_ref()
            .map(|s| s.access_token.clone())
    }

    /// Bearer value for data/storage calls: the session token when one
    /// exists, the anon key otherwise.
    pub(crate) async fn request_token(&self) -> String {
        match self.access_token() {
            Some(token) => token,
            None => self.anon_key().await,
        }
    }

    pub(crate) fn set_session(&self, session: Session) {
        persist_session(&session);
        *self.inner.session.borrow_mut() = Some(session);
    }

    pub(crate) fn clear_session(&self) {
        clear_persisted_session();
        *self.inner.session.borrow_mut() = None;
    }

    /// Register a persistent listener for provider auth events. The
    /// callback fires for every emission, in order, for the lifetime of
    /// the client.
    pub fn on_auth_state_change(&self, listener: impl Fn(AuthEvent, Option<Session>) + 'static) {
        self.inner.listeners.borrow_mut().push(Rc::new(listener));
    }

    pub(crate) fn emit(&self, event: AuthEvent, session: Option<Session>) {
        // Callbacks may re-enter the client, so call outside the borrow.
        let listeners: Vec<AuthListener> = self.inner.listeners.borrow().iter().cloned().collect();
        for listener in listeners {
            listener(event, session.clone());
        }
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
fn load_persisted_session() -> Option<Session> {
    let storage = crate::utils::storage::local_storage().ok()?;
    let raw = storage.get_item(SESSION_STORAGE_KEY).ok()??;
    serde_json::from_str(&raw).ok()
}

#[cfg(not(target_arch = "wasm32"))]
fn load_persisted_session() -> Option<Session> {
    None
}

#[cfg(target_arch = "wasm32")]
fn persist_session(session: &Session) {
    if let (Ok(storage), Ok(raw)) = (
        crate::utils::storage::local_storage(),
        serde_json::to_string(session),
    ) {
        let _ = storage.set_item(SESSION_STORAGE_KEY, &raw);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn persist_session(_session: &Session) {}

#[cfg(target_arch = "wasm32")]
fn clear_persisted_session() {
    if let Ok(storage) = crate::utils::storage::local_storage() {
        let _ = storage.remove_item(SESSION_STORAGE_KEY);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn clear_persisted_session() {}
