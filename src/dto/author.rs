use poem_openapi::Object;
use validator::Validate;

use crate::entities::RoleName;

#[derive(Debug, Clone, PartialEq, Eq, Object, Validate)]
#[oai(rename_all = "camelCase")]
pub struct AuthorDto {
    pub id: Option<i32>,
    /// Unique; used as the login name.
    #[validate(length(min = 3, max = 30, message = "must be between 3 and 30 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 50, message = "must be between 1 and 50 characters"))]
    pub last_name: String,
    #[oai(write_only)]
    #[validate(length(min = 6, max = 100, message = "must be between 6 and 100 characters"))]
    pub password: String,
    #[oai(default = "super::active_by_default")]
    pub active: bool,
    #[oai(default)]
    #[validate(nested)]
    pub emails: Vec<EmailDto>,
    #[oai(default)]
    #[validate(nested)]
    pub phones: Vec<PhoneDto>,
    #[oai(default)]
    #[validate(nested)]
    pub addresses: Vec<AddressDto>,
    /// Defaults to `USER` when empty.
    #[oai(default)]
    pub roles: Vec<RoleName>,
    pub version: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Object, Validate)]
#[oai(rename_all = "camelCase")]
pub struct EmailDto {
    pub id: Option<i32>,
    #[validate(email(message = "must be a valid e-mail address"))]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Object, Validate)]
#[oai(rename_all = "camelCase")]
pub struct PhoneDto {
    pub id: Option<i32>,
    #[validate(length(min = 5, max = 20, message = "must be between 5 and 20 characters"))]
    pub number: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Object, Validate)]
#[oai(rename_all = "camelCase")]
pub struct AddressDto {
    pub id: Option<i32>,
    #[validate(length(min = 1, max = 60, message = "must be between 1 and 60 characters"))]
    pub city: String,
    #[validate(length(min = 1, max = 100, message = "must be between 1 and 100 characters"))]
    pub street: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::validate;
    use crate::error::AppError;

    #[test]
    fn reports_nested_violations_with_index() {
        let dto = AuthorDto {
            id: None,
            name: "alice".into(),
            last_name: "Smith".into(),
            password: "secret-password".into(),
            active: true,
            emails: vec![
                EmailDto { id: None, email: "alice@example.com".into() },
                EmailDto { id: None, email: "not-an-address".into() },
            ],
            phones: vec![],
            addresses: vec![],
            roles: vec![],
            version: None,
        };
        let Err(AppError::Validation(message)) = validate(&dto) else {
            panic!("expected validation error");
        };
        assert_eq!(message, "emails[1].email: must be a valid e-mail address");
    }
}
