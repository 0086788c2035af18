//! Shared fixture: the full application over an in-memory SQLite database.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::Duration;
use poem::{
    endpoint::BoxEndpoint,
    http::StatusCode,
    test::{TestClient, TestResponse},
    EndpointExt,
};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use serde_json::{json, Value};
use tokio::sync::mpsc;

use classifieds::{
    api,
    migration::Migrator,
    notification::{MemoryMailer, NotificationQueue, Notifier},
    security::TokenProvider,
    state::AppState,
};

pub const PASSWORD: &str = "secret-password";

pub struct TestApp {
    pub db: DatabaseConnection,
    pub client: TestClient<BoxEndpoint<'static>>,
    pub state: Arc<AppState>,
    pub mailer: MemoryMailer,
    pub notifier: Notifier,
    pub queue: mpsc::Receiver<i32>,
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with_ttl(Duration::minutes(60)).await
}

/// Same as [`spawn_app`] with tokens living for `ttl`.
pub async fn spawn_app_with_ttl(ttl: Duration) -> TestApp {
    let mut options = ConnectOptions::new("sqlite::memory:");
    // One connection keeps every query on the same in-memory database.
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options).await.expect("connect sqlite");
    Migrator::up(&db, None).await.expect("run migrations");

    let mailer = MemoryMailer::new();
    let notifier = Notifier::new(db.clone(), Arc::new(mailer.clone()));
    let (queue_tx, queue) = NotificationQueue::channel(64);
    let tokens = TokenProvider::new(b"integration-secret", ttl);
    let state = Arc::new(AppState::new(db.clone(), tokens, queue_tx));
    let client = TestClient::new(api::app(state.clone()).map_to_response().boxed());

    TestApp {
        db,
        client,
        state,
        mailer,
        notifier,
        queue,
    }
}

pub async fn body(resp: TestResponse) -> Value {
    resp.0.into_body().into_json().await.expect("json body")
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

impl TestApp {
    /// Runs the notifier for every queued announcement; returns total deliveries.
    pub async fn drain_notifications(&mut self) -> usize {
        let mut delivered = 0;
        while let Ok(id) = self.queue.try_recv() {
            delivered += self.notifier.notify(id).await.expect("notify");
        }
        delivered
    }

    pub async fn register(&self, name: &str, emails: &[&str]) -> i32 {
        let emails: Vec<Value> = emails.iter().map(|e| json!({ "email": e })).collect();
        let resp = self
            .client
            .post("/api/author/authors")
            .body_json(&json!({
                "name": name,
                "lastName": "Tester",
                "password": PASSWORD,
                "emails": emails,
            }))
            .send()
            .await;
        resp.assert_status_is_ok();
        body(resp).await["id"].as_i64().expect("author id") as i32
    }

    pub async fn login(&self, name: &str) -> String {
        let resp = self
            .client
            .post("/api/auth/login")
            .body_json(&json!({ "username": name, "password": PASSWORD }))
            .send()
            .await;
        resp.assert_status_is_ok();
        body(resp).await["token"]
            .as_str()
            .expect("token")
            .to_string()
    }

    /// Registers and logs in; returns the author id and token.
    pub async fn author(&self, name: &str, emails: &[&str]) -> (i32, String) {
        let id = self.register(name, emails).await;
        (id, self.login(name).await)
    }

    pub async fn heading(&self, token: &str, name: &str) -> i32 {
        self.save(token, "/api/heading/headings", json!({ "name": name }))
            .await
    }

    pub async fn announcement(&self, token: &str, heading_id: i32, text: &str, cost: f64) -> i32 {
        self.save(
            token,
            "/api/announcement/announcements",
            json!({
                "name": "Bicycle",
                "text": text,
                "cost": cost,
                "headingId": heading_id,
            }),
        )
        .await
    }

    pub async fn suitable_ad(
        &self,
        token: &str,
        category: &str,
        title: &str,
        price_from: f64,
        price_to: f64,
    ) -> i32 {
        self.save(
            token,
            "/api/suitableAd/suitable-ads",
            json!({
                "category": category,
                "title": title,
                "priceFrom": price_from,
                "priceTo": price_to,
            }),
        )
        .await
    }

    pub async fn save(&self, token: &str, path: &str, payload: Value) -> i32 {
        let resp = self
            .client
            .post(path)
            .header("Authorization", bearer(token))
            .body_json(&payload)
            .send()
            .await;
        resp.assert_status_is_ok();
        body(resp).await["id"].as_i64().expect("saved id") as i32
    }

    pub async fn get(&self, token: &str, path: &str) -> TestResponse {
        self.client
            .get(path)
            .header("Authorization", bearer(token))
            .send()
            .await
    }

    pub async fn delete(&self, token: &str, path: &str) -> TestResponse {
        self.client
            .delete(path)
            .header("Authorization", bearer(token))
            .send()
            .await
    }

    pub async fn put(&self, token: &str, path: &str, payload: Value) -> TestResponse {
        self.client
            .put(path)
            .header("Authorization", bearer(token))
            .body_json(&payload)
            .send()
            .await
    }

    /// GET that must answer 302 Found; returns the JSON body.
    pub async fn found(&self, token: &str, path: &str) -> Value {
        let resp = self.get(token, path).await;
        resp.assert_status(StatusCode::FOUND);
        body(resp).await
    }
}
