use chrono::NaiveDate;
use poem_openapi::Object;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Object, Validate)]
#[oai(rename_all = "camelCase")]
pub struct AnnouncementDto {
    pub id: Option<i32>,
    #[validate(length(min = 3, max = 100, message = "must be between 3 and 100 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 2000, message = "must be between 1 and 2000 characters"))]
    pub text: String,
    /// Defaults to the day the announcement is saved.
    pub creation_date: Option<NaiveDate>,
    #[oai(default = "super::active_by_default")]
    pub active: bool,
    #[validate(range(
        min = 0.0,
        max = 1_000_000_000.0,
        message = "must be between 0 and 1000000000"
    ))]
    pub cost: f64,
    #[validate(range(min = 1, message = "must reference an existing heading"))]
    pub heading_id: i32,
    /// Set from the authenticated author on save.
    #[oai(read_only)]
    pub author_id: Option<i32>,
    pub version: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::validate;
    use crate::error::AppError;

    fn valid() -> AnnouncementDto {
        AnnouncementDto {
            id: None,
            name: "Bicycle".into(),
            text: "Red city bike".into(),
            creation_date: None,
            active: true,
            cost: 120.0,
            heading_id: 1,
            author_id: None,
            version: None,
        }
    }

    #[test]
    fn accepts_valid_announcement() {
        assert!(validate(&valid()).is_ok());
    }

    #[test]
    fn lists_every_violated_field() {
        let dto = AnnouncementDto {
            name: "ab".into(),
            cost: -1.0,
            ..valid()
        };
        let Err(AppError::Validation(message)) = validate(&dto) else {
            panic!("expected validation error");
        };
        assert_eq!(
            message,
            "cost: must be between 0 and 1000000000; name: must be between 3 and 100 characters"
        );
    }
}
