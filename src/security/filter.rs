//! Per-request bearer token check.
//!
//! [`AuthFilter`] runs once for every request. A valid token leaves an
//! [`Identity`] in the request extensions; anything else leaves the request
//! anonymous. Protected operations take a [`BearerAuth`] argument, whose
//! checker only reads that identity, so they answer 401 when it is absent.

use poem::{http::header::AUTHORIZATION, Endpoint, Middleware, Request};
use poem_openapi::{auth::Bearer, SecurityScheme};
use tracing::debug;

use crate::entities::RoleName;
use crate::service::AuthService;

/// The authenticated author for the rest of the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub author_id: i32,
    pub username: String,
    pub roles: Vec<RoleName>,
}

#[derive(SecurityScheme)]
#[oai(ty = "bearer", bearer_format = "JWT", checker = "identity_checker")]
pub struct BearerAuth(pub Identity);

async fn identity_checker(req: &Request, _bearer: Bearer) -> Option<Identity> {
    req.extensions().get::<Identity>().cloned()
}

pub struct AuthFilter {
    auth: AuthService,
}

impl AuthFilter {
    pub fn new(auth: AuthService) -> Self {
        Self { auth }
    }
}

impl<E: Endpoint> Middleware<E> for AuthFilter {
    type Output = AuthFilterEndpoint<E>;

    fn transform(&self, ep: E) -> Self::Output {
        AuthFilterEndpoint {
            inner: ep,
            auth: self.auth.clone(),
        }
    }
}

pub struct AuthFilterEndpoint<E> {
    inner: E,
    auth: AuthService,
}

impl<E: Endpoint> Endpoint for AuthFilterEndpoint<E> {
    type Output = E::Output;

    async fn call(&self, mut req: Request) -> poem::Result<Self::Output> {
        if let Some(token) = bearer_token(&req) {
            match self.auth.authenticate(&token).await {
                Some(identity) => {
                    debug!(author_id = identity.author_id, "request authenticated");
                    req.extensions_mut().insert(identity);
                }
                None => debug!("bearer token rejected"),
            }
        }
        self.inner.call(req).await
    }
}

fn bearer_token(req: &Request) -> Option<String> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then(|| token.to_string())
}
