//! Account model shared by candidates, recruiters and administrators.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{CompanyId, CvProfile, Identity, Role, UserId};

/// Validation errors raised while building a [`User`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// The e-mail address is not of the form `local@domain.tld`.
    #[error("email address is invalid")]
    InvalidEmail,
    /// The display name was blank.
    #[error("display name must not be empty")]
    EmptyDisplayName,
    /// The display name exceeds [`DISPLAY_NAME_MAX`].
    #[error("display name must be at most {max} characters")]
    DisplayNameTooLong {
        /// Upper bound in characters.
        max: usize,
    },
    /// A candidate account was given an employer.
    #[error("candidates cannot belong to a company")]
    CandidateWithCompany,
}

/// Maximum display name length in characters.
pub const DISPLAY_NAME_MAX: usize = 100;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Lower-cased, syntactically valid e-mail address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and normalise an address.
    ///
    /// # Examples
    /// ```
    /// use hiring_backend::domain::Email;
    ///
    /// let email = Email::new(" Moussa@ComoresTelecom.km ").unwrap();
    /// assert_eq!(email.as_ref(), "moussa@comorestelecom.km");
    /// ```
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let normalised = raw.as_ref().trim().to_lowercase();
        if !email_regex().is_match(&normalised) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(normalised))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Human readable name, accents allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

impl DisplayName {
    /// Validate and construct a display name.
    pub fn new(raw: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyDisplayName);
        }
        if trimmed.chars().count() > DISPLAY_NAME_MAX {
            return Err(UserValidationError::DisplayNameTooLong {
                max: DISPLAY_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Up to two upper-case initials, used on board cards.
    ///
    /// # Examples
    /// ```
    /// use hiring_backend::domain::DisplayName;
    ///
    /// let name = DisplayName::new("Ali Soilihi").unwrap();
    /// assert_eq!(name.initials(), "AS");
    /// ```
    #[must_use]
    pub fn initials(&self) -> String {
        self.0
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Platform account.
///
/// ## Invariants
/// - a [`Role::Candidate`] never has a `company_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    email: Email,
    display_name: DisplayName,
    role: Role,
    company_id: Option<CompanyId>,
    cv: CvProfile,
    phone: Option<String>,
    phone_verified: bool,
}

impl User {
    /// Build an account, enforcing the candidate/company invariant.
    pub fn new(
        id: UserId,
        email: Email,
        display_name: DisplayName,
        role: Role,
        company_id: Option<CompanyId>,
    ) -> Result<Self, UserValidationError> {
        if role == Role::Candidate && company_id.is_some() {
            return Err(UserValidationError::CandidateWithCompany);
        }
        Ok(Self {
            id,
            email,
            display_name,
            role,
            company_id,
            cv: CvProfile::default(),
            phone: None,
            phone_verified: false,
        })
    }

    /// Attach a CV profile.
    #[must_use]
    pub fn with_cv(mut self, cv: CvProfile) -> Self {
        self.cv = cv;
        self
    }

    /// Attach a phone number and its verification flag.
    #[must_use]
    pub fn with_phone(mut self, phone: Option<String>, verified: bool) -> Self {
        self.phone = phone;
        self.phone_verified = verified;
        self
    }

    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    #[must_use]
    pub const fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub const fn company_id(&self) -> Option<CompanyId> {
        self.company_id
    }

    #[must_use]
    pub const fn cv(&self) -> &CvProfile {
        &self.cv
    }

    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    #[must_use]
    pub const fn phone_verified(&self) -> bool {
        self.phone_verified
    }

    /// Identity used by the authorization guard.
    #[must_use]
    pub const fn identity(&self) -> Identity {
        Identity::from_parts(self.id, self.role, self.company_id)
    }
}
