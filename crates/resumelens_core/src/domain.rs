//! crates/resumelens_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any storage or serialization format;
//! the adapters and the web layer define their own wire shapes and convert.

use std::fmt;
use std::str::FromStr;

/// The identity held by the session store while a user is logged in.
///
/// `email` doubles as the account identifier in this mock; there is no
/// uniqueness enforcement and no validation beyond what callers supply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub name: String,
    pub email: String,
}

/// The closed set of supported social-login providers.
///
/// Anything outside this enum is rejected at the parse boundary with
/// [`UnknownProvider`] instead of silently falling through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Google,
    Linkedin,
}

impl Provider {
    /// Lowercase wire name, also the local part of the synthetic email.
    pub fn as_str(self) -> &'static str {
        match self {
            Provider::Google => "google",
            Provider::Linkedin => "linkedin",
        }
    }

    /// Display label used to build the identity name ("Google User").
    /// Only the first letter is capitalized, so Linkedin, not LinkedIn.
    pub fn label(self) -> &'static str {
        match self {
            Provider::Google => "Google",
            Provider::Linkedin => "Linkedin",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for provider strings outside the supported enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized social provider: {0}")]
pub struct UnknownProvider(pub String);

impl FromStr for Provider {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "google" => Ok(Provider::Google),
            "linkedin" => Ok(Provider::Linkedin),
            _ => Err(UnknownProvider(s.to_string())),
        }
    }
}

/// An uploaded resume as the workflow sees it: an opaque handle carrying
/// nothing but the original file name. Contents are never parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeUpload {
    pub file_name: String,
}

impl ResumeUpload {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }
}

/// One completed mock analysis result shown in the dashboard.
///
/// Records are immutable once created and are never removed from the
/// workflow's collection within a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeRecord {
    /// Unique within the collection; assigned from wall-clock milliseconds,
    /// bumped past the current maximum so it stays monotonic.
    pub id: i64,
    /// Original file name as supplied by the user.
    pub name: String,
    /// Overall score, 0..=100 (generated scores fall in 65..=95).
    pub score: u8,
    /// Distinct entries from the keyword vocabulary, in draw order.
    pub keywords_found: Vec<String>,
    /// One entry from the improvement-tip vocabulary.
    pub improvement_tips: String,
    /// Human-readable relative time, frozen at creation.
    pub last_updated: String,
}
