use serde_json::Value;

use crate::{
    AuthResponse, CalendarDate, HeightUnit, LoginRequest, ProfileRecord, ProfileSummary,
    RegisterRequest, Session, TokenStore, ValidationError, consts::field, normalize, prelude::*,
};

/// Operations of the external account/profile API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Endpoint {
    #[display(fmt = "POST /api/login")]
    Login,
    #[display(fmt = "POST /api/register")]
    Register,
    #[display(fmt = "GET /api/getProfile")]
    GetProfile,
    #[display(fmt = "POST /api/createProfile")]
    CreateProfile,
    #[display(fmt = "PUT /api/updateProfile")]
    UpdateProfile,
}

impl Endpoint {
    /// Returns the HTTP method
    pub const fn method(self) -> &'static str {
        match self {
            Self::GetProfile => "GET",
            Self::UpdateProfile => "PUT",
            Self::Login | Self::Register | Self::CreateProfile => "POST",
        }
    }

    /// Returns the path relative to the API base URL
    pub const fn path(self) -> &'static str {
        match self {
            Self::Login => "/api/login",
            Self::Register => "/api/register",
            Self::GetProfile => "/api/getProfile",
            Self::CreateProfile => "/api/createProfile",
            Self::UpdateProfile => "/api/updateProfile",
        }
    }

    /// Message used when the API rejects a call without saying why.
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::Login => "Login failed",
            Self::Register => "Registration failed",
            Self::GetProfile => "Failed to fetch profile",
            Self::CreateProfile => "Failed to create profile",
            Self::UpdateProfile => "Failed to update profile",
        }
    }

    /// Text to show the user when this endpoint rejected a call with
    /// `api_message`. Login and registration map known causes to their own
    /// wording; other endpoints use [`Endpoint::failure_message`].
    pub fn user_message(self, api_message: &str) -> &'static str {
        match self {
            Self::Login => login_message(api_message),
            Self::Register => register_message(api_message),
            Self::GetProfile | Self::CreateProfile | Self::UpdateProfile => self.failure_message(),
        }
    }
}

const LOGIN_NOT_FOUND: &str =
    "Account not found. Please check your email/username or register a new account.";
const LOGIN_BAD_PASSWORD: &str = "Incorrect password. Please try again.";
const LOGIN_NOT_REGISTERED: &str =
    "This email is not registered. Please register first or check your email address.";
const LOGIN_FAILED: &str = "Login failed. Please check your credentials and try again.";
const REGISTER_EMAIL_TAKEN: &str =
    "This email is already registered. Please use a different email or try logging in.";
const REGISTER_USERNAME_TAKEN: &str =
    "This username is already taken. Please choose a different username.";
const REGISTER_INVALID: &str = "Please check your information and try again.";
const REGISTER_FAILED: &str = "Registration failed. Please check your information and try again.";

fn login_message(api_message: &str) -> &'static str {
    let mentions = |needle: &str| api_message.contains(needle);
    if mentions("not found") {
        LOGIN_NOT_FOUND
    } else if mentions("password") || mentions("Invalid") {
        LOGIN_BAD_PASSWORD
    } else if mentions("email") && mentions("not registered") {
        LOGIN_NOT_REGISTERED
    } else {
        LOGIN_FAILED
    }
}

fn register_message(api_message: &str) -> &'static str {
    let mentions = |needle: &str| api_message.contains(needle);
    if mentions("email") || mentions("Email") {
        REGISTER_EMAIL_TAKEN
    } else if mentions("username") || mentions("Username") {
        REGISTER_USERNAME_TAKEN
    } else if mentions("validation") || mentions("invalid") {
        REGISTER_INVALID
    } else {
        REGISTER_FAILED
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Access token required")]
    MissingToken,

    #[error("{message} (status {status})")]
    Rejected {
        endpoint: Endpoint,
        status: u16,
        message: String,
    },

    /// A form check failed; nothing was sent.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ApiError {
    /// A non-success response. A blank or missing message falls back to the
    /// endpoint's generic failure message.
    pub fn rejected(endpoint: Endpoint, status: u16, message: Option<String>) -> Self {
        let message = message
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| endpoint.failure_message().to_owned());
        Self::Rejected {
            endpoint,
            status,
            message,
        }
    }

    /// HTTP status of the failure. `None` when no response was received.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::MissingToken => Some(401),
            Self::Rejected { status, .. } => Some(*status),
            Self::Invalid(_) | Self::Transport(_) | Self::Json(_) => None,
        }
    }

    /// Text to show the user in place of the raw error.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::MissingToken => "Please log in to continue.",
            Self::Rejected {
                endpoint,
                message,
                ..
            } => endpoint.user_message(message),
            Self::Invalid(err) => err.message(),
            Self::Transport(_) | Self::Json(_) => "Something went wrong. Please try again.",
        }
    }
}

/// The external account/profile service. Implementations own transport,
/// retries and timeouts; tokens are passed in as the `x-access-token` value.
pub trait ProfileApi {
    /// # Errors
    /// Rejected credentials or transport failure.
    fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError>;

    /// # Errors
    /// Rejected registration (e.g. taken username) or transport failure.
    fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError>;

    /// Raw profile response, possibly wrapped in a `{"data": ...}` envelope.
    ///
    /// # Errors
    /// Missing profile, bad token or transport failure.
    fn get_profile(&self, token: &str) -> Result<Value, ApiError>;

    /// # Errors
    /// Rejected payload or transport failure.
    fn create_profile(&self, token: &str, payload: &Value) -> Result<Value, ApiError>;

    /// # Errors
    /// Rejected payload or transport failure.
    fn update_profile(&self, token: &str, payload: &Value) -> Result<Value, ApiError>;
}

/// Returns the object under `"data"` when the response is wrapped in one,
/// otherwise the response itself.
pub fn unwrap_envelope(response: &Value) -> &Value {
    match response.get(field::DATA) {
        Some(inner) if inner.is_object() => inner,
        _ => response,
    }
}

/// Which call a save goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SaveMode {
    #[display(fmt = "create")]
    Create,
    #[display(fmt = "update")]
    Update,
}

impl SaveMode {
    /// Returns the endpoint a save in this mode calls
    pub const fn endpoint(self) -> Endpoint {
        match self {
            Self::Create => Endpoint::CreateProfile,
            Self::Update => Endpoint::UpdateProfile,
        }
    }
}

/// Holds the last saved profile and the draft being edited.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileEditor {
    saved: ProfileRecord,
    draft: ProfileRecord,
}

impl ProfileEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts editing from an already-known profile.
    pub fn from_saved(saved: ProfileRecord) -> Self {
        Self {
            draft: saved.clone(),
            saved,
        }
    }

    /// Fetches and normalizes the profile. On failure both saved and draft
    /// reset to the empty profile, so a first-time user can still edit, and
    /// the error is returned for the caller to surface or ignore.
    ///
    /// # Errors
    /// `MissingToken` when the session has no token, or the API's error.
    pub fn load<A: ProfileApi, S: TokenStore>(
        &mut self,
        api: &A,
        session: &Session<S>,
    ) -> Result<&ProfileRecord, ApiError> {
        let fetched = session
            .require_token()
            .and_then(|token| api.get_profile(&token));

        match fetched {
            Ok(response) => {
                *self = Self::from_saved(normalize(unwrap_envelope(&response)));
                tracing::debug!(has_name = self.saved.has_name(), "profile loaded");
                Ok(&self.saved)
            }
            Err(err) => {
                tracing::warn!(%err, "failed to fetch profile, starting from an empty one");
                *self = Self::new();
                Err(err)
            }
        }
    }

    /// Returns the profile as last loaded or saved
    pub const fn saved(&self) -> &ProfileRecord {
        &self.saved
    }

    /// Returns the profile being edited
    pub const fn draft(&self) -> &ProfileRecord {
        &self.draft
    }

    /// Returns the draft for direct field edits
    pub const fn draft_mut(&mut self) -> &mut ProfileRecord {
        &mut self.draft
    }

    /// Returns true if the draft differs from the saved profile
    pub fn is_dirty(&self) -> bool {
        self.saved != self.draft
    }

    /// A profile counts as existing once it was saved with a name.
    pub fn save_mode(&self) -> SaveMode {
        if self.saved.has_name() {
            SaveMode::Update
        } else {
            SaveMode::Create
        }
    }

    /// Switches which height fields of the draft are displayed and saved
    pub const fn set_height_unit(&mut self, unit: HeightUnit) {
        self.draft.height_unit = unit;
    }

    /// See [`crate::Interests::add`]
    pub fn add_interest(&mut self, candidate: &str) -> bool {
        self.draft.interests.add(candidate)
    }

    /// See [`crate::Interests::remove`]
    pub fn remove_interest(&mut self, value: &str) -> bool {
        self.draft.interests.remove(value)
    }

    /// Throws away unsaved edits.
    pub fn discard(&mut self) {
        self.draft = self.saved.clone();
    }

    /// Submits the whole draft. On success the draft becomes the saved
    /// profile; on failure nothing changes.
    ///
    /// # Errors
    /// `MissingToken` when the session has no token, or the API's error.
    pub fn save<A: ProfileApi, S: TokenStore>(
        &mut self,
        api: &A,
        session: &Session<S>,
    ) -> Result<SaveMode, ApiError> {
        let token = session.require_token()?;
        let mode = self.save_mode();
        let payload = self.draft.to_payload();
        tracing::info!(%mode, payload = %self.draft.to_log_payload(), "saving profile");

        let result = match mode {
            SaveMode::Create => api.create_profile(&token, &payload),
            SaveMode::Update => api.update_profile(&token, &payload),
        };

        match result {
            Ok(_) => {
                self.saved = self.draft.clone();
                Ok(mode)
            }
            Err(err) => {
                tracing::warn!(%err, endpoint = %mode.endpoint(), "failed to save profile");
                Err(err)
            }
        }
    }

    /// Display values for the saved profile.
    pub fn summary(&self, today: CalendarDate) -> ProfileSummary {
        ProfileSummary::of(&self.saved, today)
    }

    /// Display values for the draft, for live previews while editing.
    pub fn draft_summary(&self, today: CalendarDate) -> ProfileSummary {
        ProfileSummary::of(&self.draft, today)
    }
}
