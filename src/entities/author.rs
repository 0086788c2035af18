use sea_orm::entity::prelude::*;

/// A registered author. `name` doubles as the login name.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "authors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub last_name: String,
    /// Argon2 PHC string, never the plain password.
    pub password: String,
    pub active: bool,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::announcement::Entity")]
    Announcement,
    #[sea_orm(has_many = "super::suitable_ad::Entity")]
    SuitableAd,
    #[sea_orm(has_many = "super::email::Entity")]
    Email,
    #[sea_orm(has_many = "super::phone::Entity")]
    Phone,
    #[sea_orm(has_many = "super::address::Entity")]
    Address,
    #[sea_orm(has_many = "super::author_role::Entity")]
    AuthorRole,
}

impl Related<super::announcement::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Announcement.def()
    }
}

impl Related<super::suitable_ad::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SuitableAd.def()
    }
}

impl Related<super::email::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Email.def()
    }
}

impl Related<super::phone::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Phone.def()
    }
}

impl Related<super::address::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Address.def()
    }
}

impl Related<super::role::Entity> for Entity {
    fn to() -> RelationDef {
        super::author_role::Relation::Role.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::author_role::Relation::Author.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
