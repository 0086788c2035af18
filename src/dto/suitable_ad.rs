use poem_openapi::Object;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, PartialEq, Object, Validate)]
#[oai(rename_all = "camelCase")]
#[validate(schema(function = "price_range_is_ordered", skip_on_field_errors = true))]
pub struct SuitableAdDto {
    pub id: Option<i32>,
    /// Matched against the heading name of new announcements.
    #[validate(length(min = 2, max = 50, message = "must be between 2 and 50 characters"))]
    pub category: String,
    /// Matched against the text of new announcements.
    #[validate(length(min = 1, max = 2000, message = "must be between 1 and 2000 characters"))]
    pub title: String,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub price_from: f64,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub price_to: f64,
    #[oai(read_only)]
    pub author_id: Option<i32>,
    pub version: Option<i32>,
}

fn price_range_is_ordered(dto: &SuitableAdDto) -> Result<(), ValidationError> {
    if dto.price_from > dto.price_to {
        return Err(ValidationError::new("price_range")
            .with_message("priceFrom must not exceed priceTo".into()));
    }
    Ok(())
}
