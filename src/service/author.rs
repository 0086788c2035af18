use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use tracing::info;

use crate::dto::{self, AuthorDto};
use crate::entities::RoleName;
use crate::error::{AppError, Result};
use crate::repository::{author as repo, role as role_repo};
use crate::security::password;

#[derive(Clone)]
pub struct AuthorService {
    db: DatabaseConnection,
}

impl AuthorService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers an author with a hashed password, contacts and roles.
    pub async fn save(&self, dto: AuthorDto) -> Result<i32> {
        dto::validate(&dto)?;
        let hash = password::hash_password(&dto.password)?;

        let txn = self.db.begin().await?;
        if repo::find_by_name(&txn, &dto.name).await?.is_some() {
            return Err(duplicate_name(&dto.name));
        }
        let saved = repo::insert(&txn, dto.to_active_model(hash, 0)).await?;
        write_children(&txn, saved.id, &dto).await?;
        txn.commit().await?;

        info!(id = saved.id, name = %saved.name, "author saved");
        Ok(saved.id)
    }

    pub async fn find(&self, id: i32) -> Result<Option<AuthorDto>> {
        Ok(repo::find_graph(&self.db, id).await?.map(Into::into))
    }

    /// Whole-object replace, including contacts, roles and password.
    pub async fn update(&self, dto: AuthorDto) -> Result<()> {
        let id = super::require_id(dto.id)?;
        dto::validate(&dto)?;
        let hash = password::hash_password(&dto.password)?;

        let txn = self.db.begin().await?;
        let current = repo::find_by_id(&txn, id)
            .await?
            .ok_or_else(|| AppError::not_found("Author", id))?;
        if let Some(other) = repo::find_by_name(&txn, &dto.name).await? {
            if other.id != id {
                return Err(duplicate_name(&dto.name));
            }
        }
        let expected = dto.version.unwrap_or(current.version);
        let next = super::next_version(expected, "Author", id)?;
        let model = dto.to_active_model(hash, next);
        let rows = repo::update(&txn, id, expected, model).await?;
        super::check_updated(rows, "Author", id)?;
        write_children(&txn, id, &dto).await?;
        txn.commit().await?;

        info!(id, version = next, "author updated");
        Ok(())
    }

    /// Deletes the author; announcements, subscriptions and contacts go with it.
    pub async fn delete(&self, id: i32) -> Result<()> {
        let txn = self.db.begin().await?;
        let rows = repo::delete_by_id(&txn, id).await?;
        if rows == 0 {
            return Err(AppError::not_found("Author", id));
        }
        txn.commit().await?;

        info!(id, "author deleted");
        Ok(())
    }
}

fn duplicate_name(name: &str) -> AppError {
    AppError::duplicate(format!("Author with name {name} already exists"))
}

async fn write_children<C: ConnectionTrait>(
    conn: &C,
    author_id: i32,
    dto: &AuthorDto,
) -> Result<()> {
    repo::replace_contacts(
        conn,
        author_id,
        dto.email_models(author_id),
        dto.phone_models(author_id),
        dto.address_models(author_id),
    )
    .await?;

    let names = dto.role_names();
    let roles = role_repo::find_by_names(conn, &names).await?;
    if let Some(missing) = names
        .iter()
        .find(|name| !roles.iter().any(|role| role.name == **name))
    {
        return Err(missing_role(*missing));
    }
    let role_ids: Vec<i32> = roles.iter().map(|role| role.id).collect();
    repo::replace_roles(conn, author_id, &role_ids).await?;
    Ok(())
}

fn missing_role(name: RoleName) -> AppError {
    AppError::NotFound(format!("Role {name:?} does not exist"))
}
