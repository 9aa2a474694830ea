//! Form checks run before credentials are sent to the API.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::{
    MAX_PASSWORD_LEN, MIN_PASSWORD_LEN, MIN_USERNAME_LEN, PASSWORD_SYMBOLS, RegisterRequest,
    prelude::*,
};

/// Something, `@`, something, `.`, something, with no whitespace and no
/// second `@`.
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

fn email_pattern() -> Option<&'static Regex> {
    static COMPILED: OnceLock<Option<Regex>> = OnceLock::new();
    COMPILED
        .get_or_init(|| Regex::new(EMAIL_PATTERN).ok())
        .as_ref()
}

pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_some_and(|pattern| pattern.is_match(email))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum PasswordStrength {
    Weak,
    Medium,
    Strong,
}

/// Which of the four password rules a candidate satisfies.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PasswordChecks {
    /// `MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN` characters.
    pub length: bool,
    pub uppercase: bool,
    pub digit: bool,
    /// At least one of [`PASSWORD_SYMBOLS`].
    pub symbol: bool,
}

impl PasswordChecks {
    pub fn of(password: &str) -> Self {
        let length = password.chars().count();
        Self {
            length: (MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN).contains(&length),
            uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
            digit: password.chars().any(|c| c.is_ascii_digit()),
            symbol: password.chars().any(|c| PASSWORD_SYMBOLS.contains(c)),
        }
    }

    /// Number of rules satisfied, 0 to 4.
    pub fn passed(&self) -> usize {
        [self.length, self.uppercase, self.digit, self.symbol]
            .into_iter()
            .filter(|passed| *passed)
            .count()
    }

    pub const fn all_pass(&self) -> bool {
        self.length && self.uppercase && self.digit && self.symbol
    }

    /// Strong with every rule met, Medium with two or three, Weak otherwise.
    pub fn strength(&self) -> PasswordStrength {
        match self.passed() {
            4 => PasswordStrength::Strong,
            2 | 3 => PasswordStrength::Medium,
            _ => PasswordStrength::Weak,
        }
    }
}

/// First failed check of a login or registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    MissingIdentifier,
    MissingPassword,
    InvalidEmail,
    UsernameTooShort,
    WeakPassword(PasswordChecks),
    PasswordMismatch,
}

impl ValidationError {
    /// Text shown next to the form.
    pub const fn message(&self) -> &'static str {
        match self {
            Self::MissingIdentifier => "Please enter your email or username",
            Self::MissingPassword => "Please enter your password",
            Self::InvalidEmail => "Please enter a valid email address",
            Self::UsernameTooShort => "Username must be at least 3 characters long",
            Self::WeakPassword(_) => "Password does not meet the requirements",
            Self::PasswordMismatch => "Passwords do not match",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ValidationError {}

/// Both login fields must be non-blank. The identifier is checked first.
///
/// # Errors
/// `MissingIdentifier` or `MissingPassword`.
pub fn check_login(identifier: &str, password: &str) -> Result<(), ValidationError> {
    if identifier.trim().is_empty() {
        return Err(ValidationError::MissingIdentifier);
    }
    if password.trim().is_empty() {
        return Err(ValidationError::MissingPassword);
    }
    Ok(())
}

/// Registration form as typed, before any check.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub email: String,
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationForm {
    pub fn new(email: &str, username: &str, password: &str, confirm_password: &str) -> Self {
        Self {
            email: email.to_owned(),
            username: username.to_owned(),
            password: password.to_owned(),
            confirm_password: confirm_password.to_owned(),
        }
    }

    /// Rule results for the live strength meter.
    pub fn password_checks(&self) -> PasswordChecks {
        PasswordChecks::of(&self.password)
    }

    /// Runs the checks in form order (email, username, password rules,
    /// confirmation) and builds the request from the trimmed fields.
    ///
    /// # Errors
    /// The first check that fails.
    pub fn validate(&self) -> Result<RegisterRequest, ValidationError> {
        let request = RegisterRequest::new(&self.email, &self.username, &self.password);
        if !is_valid_email(&request.email) {
            return Err(ValidationError::InvalidEmail);
        }
        if request.username.chars().count() < MIN_USERNAME_LEN {
            return Err(ValidationError::UsernameTooShort);
        }
        let checks = self.password_checks();
        if !checks.all_pass() {
            return Err(ValidationError::WeakPassword(checks));
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(request)
    }
}

impl fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("email", &self.email)
            .field("username", &self.username)
            .field("password", &"***")
            .field("confirm_password", &"***")
            .finish()
    }
}
