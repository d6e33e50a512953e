//! Login credentials accepted by the development sign-in flow.

use zeroize::Zeroizing;

use super::{Email, UserValidationError};

/// Raised when a login payload is malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    #[error("email is invalid")]
    InvalidEmail,
    #[error("password must not be empty")]
    EmptyPassword,
}

impl From<UserValidationError> for LoginValidationError {
    fn from(_: UserValidationError) -> Self {
        Self::InvalidEmail
    }
}

/// Validated credentials. The password buffer is wiped on drop.
///
/// # Examples
/// ```
/// use hiring_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("Ali@Example.km", "secret").unwrap();
/// assert_eq!(creds.email().as_ref(), "ali@example.km");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: Email,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Validate raw inputs. Password whitespace is kept as typed.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let email = Email::new(email)?;
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}
