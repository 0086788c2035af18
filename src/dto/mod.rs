//! Wire types exchanged with HTTP clients, with their field constraints.

mod announcement;
mod author;
mod heading;
mod role;
mod suitable_ad;

pub use announcement::AnnouncementDto;
pub use author::{AddressDto, AuthorDto, EmailDto, PhoneDto};
pub use heading::HeadingDto;
pub use role::RoleDto;
pub use suitable_ad::SuitableAdDto;

use heck::ToLowerCamelCase;
use poem_openapi::Object;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::error::{AppError, Result};

#[derive(Debug, Clone, Object)]
pub struct SavedId {
    pub id: i32,
}

#[derive(Debug, Clone, Object)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "camelCase")]
pub struct TokenResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
}

pub(crate) fn active_by_default() -> bool {
    true
}

/// Runs the derived constraints and folds every violation into one message.
pub fn validate<T: Validate>(dto: &T) -> Result<()> {
    dto.validate()
        .map_err(|errors| AppError::validation(describe(&errors)))
}

/// Renders `field: message` pairs sorted by field path, joined with `; `.
/// Paths use the camelCase names clients send.
pub fn describe(errors: &ValidationErrors) -> String {
    let mut lines = Vec::new();
    collect(errors, "", &mut lines);
    lines.sort();
    lines.join("; ")
}

fn collect(errors: &ValidationErrors, prefix: &str, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        // Struct-level checks report under `__all__`; attribute them to the parent.
        let path = match field.as_ref() {
            "__all__" => prefix.to_string(),
            name if prefix.is_empty() => name.to_lower_camel_case(),
            name => format!("{prefix}.{}", name.to_lower_camel_case()),
        };
        match kind {
            ValidationErrorsKind::Field(violations) => {
                for violation in violations {
                    let message = violation
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| violation.code.to_string());
                    if path.is_empty() {
                        out.push(message);
                    } else {
                        out.push(format!("{path}: {message}"));
                    }
                }
            }
            ValidationErrorsKind::Struct(nested) => collect(nested, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect(nested, &format!("{path}[{index}]"), out);
                }
            }
        }
    }
}
