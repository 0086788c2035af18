use sea_orm::DatabaseConnection;
use tracing::{info, warn};

use crate::dto::TokenResponse;
use crate::error::{AppError, Result};
use crate::repository::author as author_repo;
use crate::security::{password, Identity, TokenProvider};

#[derive(Clone)]
pub struct AuthService {
    db: DatabaseConnection,
    tokens: TokenProvider,
}

impl AuthService {
    pub fn new(db: DatabaseConnection, tokens: TokenProvider) -> Self {
        Self { db, tokens }
    }

    /// Exchanges credentials of an active author for a bearer token.
    pub async fn login(&self, username: &str, plain_password: &str) -> Result<TokenResponse> {
        let author = author_repo::find_by_name(&self.db, username).await?;
        let Some(author) = author.filter(|a| a.active) else {
            warn!(username, "login for unknown or inactive author");
            return Err(AppError::Unauthorized);
        };
        if !password::verify_password(plain_password, &author.password) {
            warn!(username, "login with wrong password");
            return Err(AppError::Unauthorized);
        }

        let token = self.tokens.issue(&author.name)?;
        info!(author_id = author.id, "token issued");
        Ok(TokenResponse {
            token,
            token_type: "Bearer".to_string(),
            expires_in: self.tokens.ttl().num_seconds(),
        })
    }

    /// Resolves a bearer token to the identity of an active author. Any
    /// failure, including a database error, yields `None`.
    pub async fn authenticate(&self, token: &str) -> Option<Identity> {
        let claims = self.tokens.decode(token).ok()?;
        let author = match author_repo::find_by_name(&self.db, &claims.sub).await {
            Ok(author) => author?,
            Err(e) => {
                warn!(error = %e, "author lookup failed during authentication");
                return None;
            }
        };
        if !author.active || !self.tokens.validate(token, &author.name) {
            return None;
        }

        let roles = author_repo::find_roles(&self.db, &author)
            .await
            .ok()?
            .into_iter()
            .map(|role| role.name)
            .collect();

        Some(Identity {
            author_id: author.id,
            username: author.name,
            roles,
        })
    }
}
