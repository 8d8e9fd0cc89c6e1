//! Domain Value Objects
//!
//! Immutable, already-validated values carried by a submission.

use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::domain::validation::{Violation, ViolationKind};

/// Maximum email length (per RFC 5321)
const EMAIL_MAX_LENGTH: usize = 254;
const EMAIL_LOCAL_MAX_LENGTH: usize = 64;

/// Respondent email, trimmed and lower-cased
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Normalize and validate an address
    pub fn new(raw: &str) -> Result<Self, Violation> {
        let email = normalize_email(raw);

        if email.is_empty() {
            return Err(Violation::new(
                ViolationKind::ValueError,
                "Email cannot be empty",
            ));
        }

        if email.len() > EMAIL_MAX_LENGTH {
            return Err(Violation::new(
                ViolationKind::ValueError,
                format!("Email must be at most {} characters", EMAIL_MAX_LENGTH),
            ));
        }

        if !Self::is_valid_format(&email) {
            return Err(Violation::new(
                ViolationKind::ValueError,
                "value is not a valid email address",
            ));
        }

        Ok(Self(email))
    }

    /// Validate a JSON value that should hold an address
    pub fn from_json(value: &Value) -> Result<Self, Violation> {
        match value {
            Value::String(raw) => Self::new(raw),
            _ => Err(Violation::string_type()),
        }
    }

    fn is_valid_format(email: &str) -> bool {
        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };
        if domain.contains('@') {
            return false;
        }

        if local.is_empty() || local.len() > EMAIL_LOCAL_MAX_LENGTH {
            return false;
        }

        if domain.is_empty() || !domain.contains('.') {
            return false;
        }

        if !domain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        {
            return false;
        }

        let edge = |c: char| c == '.' || c == '-';
        !(domain.starts_with(edge) || domain.ends_with(edge))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Lower-case and strip surrounding whitespace
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Respondent age in whole years
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Age(u8);

impl Age {
    pub const MIN: u8 = 13;
    pub const MAX: u8 = 120;

    pub fn new(years: i64) -> Result<Self, Violation> {
        if years < i64::from(Self::MIN) {
            return Err(Violation::new(
                ViolationKind::GreaterThanEqual,
                format!("Input should be greater than or equal to {}", Self::MIN),
            ));
        }
        if years > i64::from(Self::MAX) {
            return Err(Violation::new(
                ViolationKind::LessThanEqual,
                format!("Input should be less than or equal to {}", Self::MAX),
            ));
        }
        // Range checked above
        Ok(Self(years as u8))
    }

    /// Only JSON integers are accepted; floats and numeric strings are not
    pub fn from_json(value: &Value) -> Result<Self, Violation> {
        let int_type = || Violation::new(ViolationKind::IntType, "Input should be a valid integer");
        match value {
            Value::Number(n) => match (n.as_i64(), n.as_u64()) {
                (Some(years), _) => Self::new(years),
                // Larger than i64::MAX
                (None, Some(_)) => Self::new(i64::MAX),
                (None, None) => Err(int_type()),
            },
            _ => Err(int_type()),
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How the persisted `submission_id` is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionIdPolicy {
    /// `sha256(email digest + local YYYYMMDDHH)`. The client value is ignored.
    #[default]
    Legacy,
    /// Client value when non-empty, else `sha256(normalized email + UTC YYYYMMDDHH)`
    TrustClient,
    /// Always `sha256(normalized email + UTC YYYYMMDDHH)`
    AlwaysDerive,
}

impl SubmissionIdPolicy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            SubmissionIdPolicy::Legacy => "legacy",
            SubmissionIdPolicy::TrustClient => "trust-client",
            SubmissionIdPolicy::AlwaysDerive => "derive",
        }
    }
}

impl fmt::Display for SubmissionIdPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized policy name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown submission id policy `{0}` (expected legacy, trust-client or derive)")]
pub struct UnknownPolicy(pub String);

impl FromStr for SubmissionIdPolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(SubmissionIdPolicy::Legacy),
            "trust-client" | "trust_client" => Ok(SubmissionIdPolicy::TrustClient),
            "derive" | "always-derive" => Ok(SubmissionIdPolicy::AlwaysDerive),
            _ => Err(UnknownPolicy(s.to_string())),
        }
    }
}
