//! Conversions between wire DTOs and sea-orm models.
//!
//! Reads go `Model -> Dto`; writes go `Dto -> ActiveModel`. Primary keys are
//! left `NotSet` on write models so inserts use generated ids and
//! versioned updates only touch data columns.

use chrono::NaiveDate;
use sea_orm::ActiveValue::{NotSet, Set};

use crate::dto::{
    AddressDto, AnnouncementDto, AuthorDto, EmailDto, HeadingDto, PhoneDto, RoleDto, SuitableAdDto,
};
use crate::entities::{
    address, announcement, author, email, heading, phone, role, suitable_ad, RoleName,
};

impl From<announcement::Model> for AnnouncementDto {
    fn from(model: announcement::Model) -> Self {
        Self {
            id: Some(model.id),
            name: model.name,
            text: model.text,
            creation_date: Some(model.creation_date),
            active: model.active,
            cost: model.cost,
            heading_id: model.heading_id,
            author_id: Some(model.author_id),
            version: Some(model.version),
        }
    }
}

impl AnnouncementDto {
    pub fn to_active_model(
        &self,
        author_id: i32,
        creation_date: NaiveDate,
        version: i32,
    ) -> announcement::ActiveModel {
        announcement::ActiveModel {
            id: NotSet,
            name: Set(self.name.clone()),
            text: Set(self.text.clone()),
            creation_date: Set(self.creation_date.unwrap_or(creation_date)),
            active: Set(self.active),
            cost: Set(self.cost),
            heading_id: Set(self.heading_id),
            author_id: Set(author_id),
            version: Set(version),
        }
    }

    /// Write model for an update of `current`: the owner and the creation
    /// date always come from the stored row.
    pub fn to_update_model(
        &self,
        current: &announcement::Model,
        version: i32,
    ) -> announcement::ActiveModel {
        announcement::ActiveModel {
            creation_date: Set(current.creation_date),
            ..self.to_active_model(current.author_id, current.creation_date, version)
        }
    }
}

impl From<heading::Model> for HeadingDto {
    fn from(model: heading::Model) -> Self {
        Self {
            id: Some(model.id),
            name: model.name,
            version: Some(model.version),
        }
    }
}

impl HeadingDto {
    pub fn to_active_model(&self, version: i32) -> heading::ActiveModel {
        heading::ActiveModel {
            id: NotSet,
            name: Set(self.name.clone()),
            version: Set(version),
        }
    }
}

impl From<role::Model> for RoleDto {
    fn from(model: role::Model) -> Self {
        Self {
            id: Some(model.id),
            name: model.name,
            version: Some(model.version),
        }
    }
}

impl RoleDto {
    pub fn to_active_model(&self, version: i32) -> role::ActiveModel {
        role::ActiveModel {
            id: NotSet,
            name: Set(self.name),
            version: Set(version),
        }
    }
}

impl From<suitable_ad::Model> for SuitableAdDto {
    fn from(model: suitable_ad::Model) -> Self {
        Self {
            id: Some(model.id),
            category: model.category,
            title: model.title,
            price_from: model.price_from,
            price_to: model.price_to,
            author_id: Some(model.author_id),
            version: Some(model.version),
        }
    }
}

impl SuitableAdDto {
    pub fn to_active_model(&self, author_id: i32, version: i32) -> suitable_ad::ActiveModel {
        suitable_ad::ActiveModel {
            id: NotSet,
            category: Set(self.category.clone()),
            title: Set(self.title.clone()),
            price_from: Set(self.price_from),
            price_to: Set(self.price_to),
            author_id: Set(author_id),
            version: Set(version),
        }
    }
}

/// Everything loaded for one author, ready to map into an [`AuthorDto`].
pub struct AuthorGraph {
    pub author: author::Model,
    pub emails: Vec<email::Model>,
    pub phones: Vec<phone::Model>,
    pub addresses: Vec<address::Model>,
    pub roles: Vec<role::Model>,
}

impl From<AuthorGraph> for AuthorDto {
    fn from(graph: AuthorGraph) -> Self {
        let AuthorGraph {
            author,
            emails,
            phones,
            addresses,
            roles,
        } = graph;

        Self {
            id: Some(author.id),
            name: author.name,
            last_name: author.last_name,
            // write-only on the wire
            password: String::new(),
            active: author.active,
            emails: emails
                .into_iter()
                .map(|e| EmailDto {
                    id: Some(e.id),
                    email: e.email,
                })
                .collect(),
            phones: phones
                .into_iter()
                .map(|p| PhoneDto {
                    id: Some(p.id),
                    number: p.number,
                })
                .collect(),
            addresses: addresses
                .into_iter()
                .map(|a| AddressDto {
                    id: Some(a.id),
                    city: a.city,
                    street: a.street,
                })
                .collect(),
            roles: roles.into_iter().map(|r| r.name).collect(),
            version: Some(author.version),
        }
    }
}

impl AuthorDto {
    pub fn to_active_model(&self, password_hash: String, version: i32) -> author::ActiveModel {
        author::ActiveModel {
            id: NotSet,
            name: Set(self.name.clone()),
            last_name: Set(self.last_name.clone()),
            password: Set(password_hash),
            active: Set(self.active),
            version: Set(version),
        }
    }

    pub fn email_models(&self, author_id: i32) -> Vec<email::ActiveModel> {
        self.emails
            .iter()
            .map(|e| email::ActiveModel {
                id: NotSet,
                author_id: Set(author_id),
                email: Set(e.email.clone()),
                version: Set(0),
            })
            .collect()
    }

    pub fn phone_models(&self, author_id: i32) -> Vec<phone::ActiveModel> {
        self.phones
            .iter()
            .map(|p| phone::ActiveModel {
                id: NotSet,
                author_id: Set(author_id),
                number: Set(p.number.clone()),
                version: Set(0),
            })
            .collect()
    }

    pub fn address_models(&self, author_id: i32) -> Vec<address::ActiveModel> {
        self.addresses
            .iter()
            .map(|a| address::ActiveModel {
                id: NotSet,
                author_id: Set(author_id),
                city: Set(a.city.clone()),
                street: Set(a.street.clone()),
                version: Set(0),
            })
            .collect()
    }

    /// Requested roles, falling back to `USER`, without duplicates.
    pub fn role_names(&self) -> Vec<RoleName> {
        let mut names = if self.roles.is_empty() {
            vec![RoleName::User]
        } else {
            self.roles.clone()
        };
        let mut seen = Vec::with_capacity(names.len());
        names.retain(|name| {
            if seen.contains(name) {
                false
            } else {
                seen.push(*name);
                true
            }
        });
        names
    }
}
