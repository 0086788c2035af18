use poem_openapi::Object;

use crate::entities::RoleName;

#[derive(Debug, Clone, PartialEq, Eq, Object)]
#[oai(rename_all = "camelCase")]
pub struct RoleDto {
    pub id: Option<i32>,
    pub name: RoleName,
    pub version: Option<i32>,
}
