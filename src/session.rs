use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{ACCESS_TOKEN_HEADER, ApiError, ClientConfig, ProfileApi, RegistrationForm};

/// Key-value capability the bearer token lives in. The backing medium is the
/// caller's business.
pub trait TokenStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    entries: HashMap<String, String>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_owned(), value.to_owned());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub username: String,
}

/// Login body. Exactly one of `email`/`username` is filled, the other is `""`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    /// An identifier containing `@` is treated as an email address.
    pub fn from_identifier(identifier: &str, password: &str) -> Self {
        let identifier = identifier.trim();
        let (email, username) = if identifier.contains('@') {
            (identifier.to_owned(), String::new())
        } else {
            (String::new(), identifier.to_owned())
        };
        Self {
            email,
            username,
            password: password.to_owned(),
        }
    }

    /// Whether the identifier went into the `email` field.
    pub fn is_email(&self) -> bool {
        !self.email.is_empty()
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Registration body, built by [`RegistrationForm::validate`].
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn new(email: &str, username: &str, password: &str) -> Self {
        Self {
            email: email.trim().to_owned(),
            username: username.trim().to_owned(),
            password: password.to_owned(),
        }
    }
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

/// Bearer-token session over an injected [`TokenStore`].
///
/// A session is authenticated exactly when a token is stored, so a session
/// rebuilt over a populated store picks up where the last one left off.
#[derive(Debug)]
pub struct Session<S> {
    store: S,
    token_key: String,
    user: Option<User>,
}

impl<S: TokenStore> Session<S> {
    pub fn new(store: S, config: &ClientConfig) -> Self {
        Self {
            store,
            token_key: config.token_key.clone(),
            user: None,
        }
    }

    /// Returns the stored token, treating an empty one as absent
    pub fn token(&self) -> Option<String> {
        self.store
            .get(&self.token_key)
            .filter(|token| !token.is_empty())
    }

    /// Returns true if a token is stored
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Returns the user from the last successful login or registration
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// # Errors
    /// `ApiError::MissingToken` when no token is stored.
    pub fn require_token(&self) -> Result<String, ApiError> {
        self.token().ok_or(ApiError::MissingToken)
    }

    /// Records a successful login/register response. A missing or empty
    /// token leaves any stored token untouched.
    pub fn accept(&mut self, response: AuthResponse) -> Option<&User> {
        match response.access_token.as_deref() {
            Some(token) if !token.is_empty() => {
                self.store.set(&self.token_key, token);
                tracing::debug!("access token stored");
            }
            _ => tracing::debug!("auth response carried no access token"),
        }
        if response.user.is_some() {
            self.user = response.user;
        }
        self.user.as_ref()
    }

    /// Blank fields are refused before anything is sent.
    ///
    /// # Errors
    /// `ApiError::Invalid` for a blank field, otherwise whatever the API
    /// reports; the session is unchanged on failure.
    pub fn login<A: ProfileApi>(
        &mut self,
        api: &A,
        identifier: &str,
        password: &str,
    ) -> Result<Option<&User>, ApiError> {
        crate::check_login(identifier, password)?;
        let request = LoginRequest::from_identifier(identifier, password);
        tracing::info!(is_email = request.is_email(), "attempting login");
        let response = api.login(&request).inspect_err(|err| {
            tracing::warn!(%err, "login failed");
        })?;
        Ok(self.accept(response))
    }

    /// The form is validated first and nothing is sent when a check fails.
    ///
    /// # Errors
    /// `ApiError::Invalid` for the first failed check, otherwise whatever the
    /// API reports; the session is unchanged on failure.
    pub fn register<A: ProfileApi>(
        &mut self,
        api: &A,
        form: &RegistrationForm,
    ) -> Result<Option<&User>, ApiError> {
        let request = form.validate().inspect_err(|err| {
            tracing::debug!(%err, "registration form rejected");
        })?;
        tracing::info!(
            email = %request.email,
            username = %request.username,
            "attempting registration"
        );
        let response = api.register(&request).inspect_err(|err| {
            tracing::warn!(%err, "registration failed");
        })?;
        Ok(self.accept(response))
    }

    pub fn logout(&mut self) {
        self.store.remove(&self.token_key);
        self.user = None;
        tracing::info!("logged out");
    }

    /// Headers for an authenticated request. The token header is left out
    /// when no token is stored.
    pub fn auth_headers(&self) -> Vec<(&'static str, String)> {
        let mut headers = vec![("Content-Type", "application/json".to_owned())];
        if let Some(token) = self.token() {
            headers.push((ACCESS_TOKEN_HEADER, token));
        }
        headers
    }

    /// Returns the underlying token store
    pub const fn store(&self) -> &S {
        &self.store
    }
}
