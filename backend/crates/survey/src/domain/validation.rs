//! Payload Validation
//!
//! Turns an untyped JSON body into a [`SurveySubmission`]. Every problem in
//! the payload is reported, not just the first one.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::entities::SurveySubmission;
use crate::domain::value_objects::{Age, Email};

pub const FIELD_EMAIL: &str = "email";
pub const FIELD_AGE: &str = "age";
pub const FIELD_SUBMISSION_ID: &str = "submission_id";
/// Pseudo-field used when the payload itself has the wrong shape
pub const FIELD_BODY: &str = "body";

const KNOWN_FIELDS: [&str; 3] = [FIELD_EMAIL, FIELD_AGE, FIELD_SUBMISSION_ID];

/// Machine-readable reason a field was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    Missing,
    StringType,
    IntType,
    ValueError,
    GreaterThanEqual,
    LessThanEqual,
    ExtraForbidden,
    ModelType,
}

/// A rule broken by a single value, before it is tied to a field name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub kind: ViolationKind,
    pub message: String,
}

impl Violation {
    pub fn new(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn string_type() -> Self {
        Self::new(ViolationKind::StringType, "Input should be a valid string")
    }

    pub fn at(self, field: impl Into<String>) -> FieldError {
        FieldError {
            field: field.into(),
            message: self.message,
            kind: self.kind,
        }
    }
}

/// One entry of a `validation_error` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: ViolationKind,
}

impl FieldError {
    fn missing(field: &str) -> Self {
        Violation::new(ViolationKind::Missing, "Field required").at(field)
    }
}

/// Validate a raw payload into a [`SurveySubmission`]
///
/// Errors come back in a stable order: `email`, `age`, `submission_id`, then
/// unrecognized keys sorted by name.
pub fn validate_submission(payload: &Value) -> Result<SurveySubmission, Vec<FieldError>> {
    let Some(object) = payload.as_object() else {
        return Err(vec![
            Violation::new(
                ViolationKind::ModelType,
                "Input should be a valid JSON object",
            )
            .at(FIELD_BODY),
        ]);
    };

    let mut errors = Vec::new();

    let email = required(object, FIELD_EMAIL, &mut errors, Email::from_json);
    let age = required(object, FIELD_AGE, &mut errors, Age::from_json);
    let submission_id = match object.get(FIELD_SUBMISSION_ID) {
        None | Some(Value::Null) => None,
        Some(Value::String(id)) if id.is_empty() => None,
        Some(Value::String(id)) => Some(id.clone()),
        Some(_) => {
            errors.push(Violation::string_type().at(FIELD_SUBMISSION_ID));
            None
        }
    };

    // serde_json::Map iterates in key order
    errors.extend(
        object
            .keys()
            .filter(|key| !KNOWN_FIELDS.contains(&key.as_str()))
            .map(|key| {
                Violation::new(ViolationKind::ExtraForbidden, "Extra inputs are not permitted")
                    .at(key.as_str())
            }),
    );

    match (email, age) {
        (Some(email), Some(age)) if errors.is_empty() => Ok(SurveySubmission {
            email,
            age,
            submission_id,
        }),
        _ => Err(errors),
    }
}

fn required<T>(
    object: &Map<String, Value>,
    field: &str,
    errors: &mut Vec<FieldError>,
    parse: impl FnOnce(&Value) -> Result<T, Violation>,
) -> Option<T> {
    let Some(value) = object.get(field) else {
        errors.push(FieldError::missing(field));
        return None;
    };
    parse(value)
        .map_err(|violation| errors.push(violation.at(field)))
        .ok()
}
