//! Business operations. Each service owns its collaborators and wraps every
//! write in an explicit transaction.

mod announcement;
mod auth;
mod author;
mod heading;
mod role;
mod suitable_ad;

pub use announcement::AnnouncementService;
pub use auth::AuthService;
pub use author::AuthorService;
pub use heading::HeadingService;
pub use role::RoleService;
pub use suitable_ad::SuitableAdService;

use crate::error::{AppError, Result};

/// The id an update targets; updates without one are rejected.
fn require_id(id: Option<i32>) -> Result<i32> {
    id.ok_or_else(|| AppError::validation("id: must be provided for update"))
}

/// Version written by an update that expects `expected`. A version that cannot
/// be incremented can never match a stored row.
fn next_version(expected: i32, entity: &'static str, id: i32) -> Result<i32> {
    expected
        .checked_add(1)
        .ok_or(AppError::StaleVersion { entity, id })
}

/// Turns the row count of a versioned update into the outcome the caller sees.
fn check_updated(rows: u64, entity: &'static str, id: i32) -> Result<()> {
    if rows == 0 {
        return Err(AppError::StaleVersion { entity, id });
    }
    Ok(())
}
