mod common;

use poem::http::StatusCode;
use serde_json::json;

use common::{body, spawn_app, PASSWORD};

#[tokio::test]
async fn registered_author_is_found_without_password() {
    let app = spawn_app().await;
    let (id, token) = app
        .author("alice", &["alice@example.com", "alice@work.example"])
        .await;

    let found = app.found(&token, &format!("/api/author/authors/{id}")).await;

    assert_eq!(found["id"], json!(id));
    assert_eq!(found["name"], json!("alice"));
    assert_eq!(found["lastName"], json!("Tester"));
    assert_eq!(found["active"], json!(true));
    assert_eq!(found["roles"], json!(["USER"]));
    assert_eq!(found["version"], json!(0));
    assert!(found.get("password").is_none());
    let emails: Vec<&str> = found["emails"]
        .as_array()
        .expect("emails")
        .iter()
        .filter_map(|e| e["email"].as_str())
        .collect();
    assert_eq!(emails, vec!["alice@example.com", "alice@work.example"]);
}

#[tokio::test]
async fn duplicate_name_conflicts() {
    let app = spawn_app().await;
    app.register("alice", &[]).await;

    let resp = app
        .client
        .post("/api/author/authors")
        .body_json(&json!({
            "name": "alice",
            "lastName": "Other",
            "password": PASSWORD,
        }))
        .send()
        .await;

    resp.assert_status(StatusCode::CONFLICT);
    resp.assert_text("Author with name alice already exists").await;
}

#[tokio::test]
async fn invalid_contact_is_reported_with_its_position() {
    let app = spawn_app().await;

    let resp = app
        .client
        .post("/api/author/authors")
        .body_json(&json!({
            "name": "alice",
            "lastName": "Tester",
            "password": PASSWORD,
            "emails": [{ "email": "alice@example.com" }, { "email": "nope" }],
        }))
        .send()
        .await;

    resp.assert_status(StatusCode::NOT_ACCEPTABLE);
    resp.assert_text("emails[1].email: must be a valid e-mail address")
        .await;
}

#[tokio::test]
async fn explicit_roles_are_linked() {
    let app = spawn_app().await;
    let resp = app
        .client
        .post("/api/author/authors")
        .body_json(&json!({
            "name": "moderator",
            "lastName": "Tester",
            "password": PASSWORD,
            "roles": ["ADMIN", "MODERATOR"],
        }))
        .send()
        .await;
    resp.assert_status_is_ok();
    let id = body(resp).await["id"].as_i64().expect("id");
    let token = app.login("moderator").await;

    let found = app.found(&token, &format!("/api/author/authors/{id}")).await;

    assert_eq!(found["roles"], json!(["ADMIN", "MODERATOR"]));
}

#[tokio::test]
async fn update_replaces_contacts_and_bumps_version() {
    let app = spawn_app().await;
    let (id, token) = app.author("alice", &["old@example.com"]).await;

    let resp = app
        .put(
            &token,
            "/api/author/authors",
            json!({
                "id": id,
                "name": "alice",
                "lastName": "Renamed",
                "password": PASSWORD,
                "emails": [{ "email": "new@example.com" }],
                "phones": [{ "number": "+100200300" }],
                "version": 0,
            }),
        )
        .await;
    resp.assert_status_is_ok();

    let found = app.found(&token, &format!("/api/author/authors/{id}")).await;
    assert_eq!(found["lastName"], json!("Renamed"));
    assert_eq!(found["version"], json!(1));
    assert_eq!(found["emails"].as_array().map(Vec::len), Some(1));
    assert_eq!(found["emails"][0]["email"], json!("new@example.com"));
    assert_eq!(found["phones"][0]["number"], json!("+100200300"));
}

#[tokio::test]
async fn update_without_id_is_rejected() {
    let app = spawn_app().await;
    let (_, token) = app.author("alice", &[]).await;

    let resp = app
        .put(
            &token,
            "/api/author/authors",
            json!({ "name": "alice", "lastName": "Tester", "password": PASSWORD }),
        )
        .await;

    resp.assert_status(StatusCode::NOT_ACCEPTABLE);
}

#[tokio::test]
async fn deleting_author_removes_their_announcements() {
    let app = spawn_app().await;
    let (alice, alice_token) = app.author("alice", &[]).await;
    let (_, bob_token) = app.author("bob", &[]).await;
    let heading_id = app.heading(&bob_token, "Bikes").await;
    let mut owned = Vec::new();
    for text in ["First bike", "Second bike", "Third bike"] {
        owned.push(app.announcement(&alice_token, heading_id, text, 10.0).await);
    }
    let kept = app
        .announcement(&bob_token, heading_id, "Bob's bike", 10.0)
        .await;
    app.suitable_ad(&alice_token, "Bikes", "Any bike", 0.0, 100.0)
        .await;

    app.delete(&bob_token, &format!("/api/author/authors/{alice}"))
        .await
        .assert_status_is_ok();

    for id in owned {
        app.get(&bob_token, &format!("/api/announcement/announcements/{id}"))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
    app.get(&bob_token, &format!("/api/suitableAd/suitable-ads/author/{alice}"))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    app.found(&bob_token, &format!("/api/announcement/announcements/{kept}"))
        .await;
    app.get(&bob_token, &format!("/api/author/authors/{alice}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_missing_author_is_not_found() {
    let app = spawn_app().await;
    let (_, token) = app.author("alice", &[]).await;

    app.delete(&token, "/api/author/authors/4040")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn seeded_roles_are_listed() {
    let app = spawn_app().await;
    let (_, token) = app.author("alice", &[]).await;

    let roles = app.found(&token, "/api/role/roles").await;

    let names: Vec<&str> = roles
        .as_array()
        .expect("roles")
        .iter()
        .filter_map(|r| r["name"].as_str())
        .collect();
    assert_eq!(names, vec!["USER", "ADMIN", "MODERATOR"]);
}

#[tokio::test]
async fn duplicate_role_conflicts() {
    let app = spawn_app().await;
    let (_, token) = app.author("alice", &[]).await;

    let resp = app
        .client
        .post("/api/role/roles")
        .header("Authorization", common::bearer(&token))
        .body_json(&json!({ "name": "ADMIN" }))
        .send()
        .await;

    resp.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn role_links_resolve_from_both_sides() {
    use classifieds::entities::{author, author_role, role, RoleName};
    use sea_orm::EntityTrait;

    let app = spawn_app().await;
    let id = app.register("alice", &[]).await;

    let with_roles = author_role::Entity::find()
        .find_also_related(role::Entity)
        .all(&app.db)
        .await
        .unwrap();
    let with_authors = author_role::Entity::find()
        .find_also_related(author::Entity)
        .all(&app.db)
        .await
        .unwrap();

    assert_eq!(with_roles.len(), 1);
    assert_eq!(with_roles[0].1.as_ref().map(|r| r.name), Some(RoleName::User));
    assert_eq!(with_authors[0].1.as_ref().map(|a| a.id), Some(id));
}
