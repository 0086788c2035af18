use poem_openapi::Object;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Object, Validate)]
#[oai(rename_all = "camelCase")]
pub struct HeadingDto {
    pub id: Option<i32>,
    #[validate(length(min = 2, max = 50, message = "must be between 2 and 50 characters"))]
    pub name: String,
    pub version: Option<i32>,
}
