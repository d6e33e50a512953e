//! Session cookie settings read from `SESSION_*` environment variables.
//!
//! Debug builds fall back to permissive defaults with a warning; release
//! builds require every toggle to be present and valid. The signing key is
//! read from `SESSION_KEY_FILE` and its raw bytes are zeroised once the
//! [`Key`] has been derived.

pub mod fingerprint;

use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use mockable::Env;
use tracing::warn;
use zeroize::Zeroize;

pub use fingerprint::key_fingerprint;

const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";
const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
const SAMESITE_ENV: &str = "SESSION_SAMESITE";
const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";
const DEFAULT_KEY_PATH: &str = "/var/run/secrets/session_key";
/// Minimum key file length accepted by release builds.
pub const MIN_KEY_BYTES: usize = 64;
const DERIVE_MIN_BYTES: usize = 32;

/// Whether configuration problems are fatal.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Warn and fall back to defaults.
    Debug,
    /// Refuse to start.
    Release,
}

impl BuildMode {
    /// Mode matching `cfg!(debug_assertions)`.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    const fn is_release(self) -> bool {
        matches!(self, Self::Release)
    }
}

/// Validated cookie settings handed to the session middleware.
pub struct SessionSettings {
    pub key: Key,
    pub cookie_secure: bool,
    pub same_site: SameSite,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionConfigError {
    #[error("{name} must be set")]
    Missing { name: &'static str },
    #[error("{name}='{value}' is invalid; expected {expected}")]
    Invalid {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("cannot read session key {path}: {source}")]
    KeyUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key {path} holds {length} bytes; at least {MIN_KEY_BYTES} are required")]
    KeyTooShort { path: PathBuf, length: usize },
    #[error("SESSION_SAMESITE=None needs SESSION_COOKIE_SECURE=1")]
    InsecureSameSiteNone,
    #[error("SESSION_ALLOW_EPHEMERAL cannot be enabled in release builds")]
    EphemeralKeyInRelease,
}

/// A `SESSION_*` variable with its parser and debug fallback.
struct Toggle<T> {
    name: &'static str,
    expected: &'static str,
    fallback: T,
    parse: fn(&str) -> Option<T>,
}

const COOKIE_SECURE: Toggle<bool> = Toggle {
    name: COOKIE_SECURE_ENV,
    expected: "1|0|true|false|yes|no",
    fallback: true,
    parse: parse_flag,
};

const ALLOW_EPHEMERAL: Toggle<bool> = Toggle {
    name: ALLOW_EPHEMERAL_ENV,
    expected: "1|0|true|false|yes|no",
    fallback: false,
    parse: parse_flag,
};

const SAME_SITE: Toggle<SameSite> = Toggle {
    name: SAMESITE_ENV,
    expected: "Strict|Lax|None",
    fallback: SameSite::Lax,
    parse: parse_same_site,
};

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

fn parse_same_site(raw: &str) -> Option<SameSite> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "strict" => Some(SameSite::Strict),
        "lax" => Some(SameSite::Lax),
        "none" => Some(SameSite::None),
        _ => None,
    }
}

fn read_toggle<E: Env, T: Copy + std::fmt::Debug>(
    env: &E,
    mode: BuildMode,
    toggle: &Toggle<T>,
) -> Result<T, SessionConfigError> {
    let Some(raw) = env.string(toggle.name) else {
        if mode.is_release() {
            return Err(SessionConfigError::Missing { name: toggle.name });
        }
        warn!(variable = toggle.name, fallback = ?toggle.fallback, "session toggle unset");
        return Ok(toggle.fallback);
    };
    match (toggle.parse)(&raw) {
        Some(value) => Ok(value),
        None if mode.is_release() => Err(SessionConfigError::Invalid {
            name: toggle.name,
            value: raw,
            expected: toggle.expected,
        }),
        None => {
            warn!(
                variable = toggle.name,
                value = %raw,
                fallback = ?toggle.fallback,
                "session toggle invalid"
            );
            Ok(toggle.fallback)
        }
    }
}

/// Read and validate every session setting.
///
/// # Examples
/// ```
/// use hiring_backend::inbound::http::session_config::{BuildMode, session_settings_from_env};
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|_| None);
/// let settings = session_settings_from_env(&env, BuildMode::Debug).expect("debug defaults");
/// assert!(settings.cookie_secure);
/// ```
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let cookie_secure = read_toggle(env, mode, &COOKIE_SECURE)?;
    let same_site = read_toggle(env, mode, &SAME_SITE)?;
    if same_site == SameSite::None && !cookie_secure {
        if mode.is_release() {
            return Err(SessionConfigError::InsecureSameSiteNone);
        }
        warn!("SameSite=None without Secure; browsers will drop the cookie");
    }
    let allow_ephemeral = read_toggle(env, mode, &ALLOW_EPHEMERAL)?;
    if allow_ephemeral && mode.is_release() {
        return Err(SessionConfigError::EphemeralKeyInRelease);
    }
    let key = load_key(env, mode, allow_ephemeral)?;
    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
    })
}

fn load_key<E: Env>(
    env: &E,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Key, SessionConfigError> {
    let path = PathBuf::from(
        env.string(KEY_FILE_ENV)
            .unwrap_or_else(|| DEFAULT_KEY_PATH.to_owned()),
    );
    let mut bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(source) if mode.is_release() && !allow_ephemeral => {
            return Err(SessionConfigError::KeyUnreadable { path, source });
        }
        Err(source) => {
            warn!(path = %path.display(), error = %source, "generating ephemeral session key");
            return Ok(Key::generate());
        }
    };
    let length = bytes.len();
    if mode.is_release() && length < MIN_KEY_BYTES {
        bytes.zeroize();
        return Err(SessionConfigError::KeyTooShort { path, length });
    }
    // `Key::derive_from` panics below 32 bytes.
    if length < DERIVE_MIN_BYTES {
        bytes.zeroize();
        warn!(path = %path.display(), length, "session key too short; generating ephemeral key");
        return Ok(Key::generate());
    }
    let key = Key::derive_from(&bytes);
    bytes.zeroize();
    Ok(key)
}
