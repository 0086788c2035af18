mod common;

use std::time::Duration;

use classifieds::notification::NotificationQueue;

use common::spawn_app;

#[tokio::test]
async fn matching_subscription_mails_every_address() {
    let mut app = spawn_app().await;
    let (_, seller) = app.author("seller", &[]).await;
    let (_, buyer) = app
        .author("buyer", &["buyer@example.com", "buyer@home.example"])
        .await;
    let heading_id = app.heading(&seller, "Bikes").await;
    app.suitable_ad(&buyer, "Bikes", "Red city bike", 100.0, 150.0)
        .await;
    app.drain_notifications().await;

    app.announcement(&seller, heading_id, "Red city bike", 120.0)
        .await;
    let delivered = app.drain_notifications().await;

    assert_eq!(delivered, 2);
    let sent = app.mailer.sent();
    let recipients: Vec<&str> = sent.iter().map(|m| m.to.as_str()).collect();
    assert_eq!(recipients, vec!["buyer@example.com", "buyer@home.example"]);
    for mail in &sent {
        assert_eq!(mail.subject, "New suitable announcement: Bicycle");
        assert!(mail.html.contains("Red city bike"));
        assert!(mail.html.contains("Cost: 120.00"));
    }
}

#[tokio::test]
async fn price_bounds_are_inclusive() {
    let mut app = spawn_app().await;
    let (_, seller) = app.author("seller", &[]).await;
    let (_, buyer) = app.author("buyer", &["buyer@example.com"]).await;
    let heading_id = app.heading(&seller, "Bikes").await;
    app.suitable_ad(&buyer, "Bikes", "Red city bike", 100.0, 150.0)
        .await;

    app.announcement(&seller, heading_id, "Red city bike", 100.0)
        .await;
    app.announcement(&seller, heading_id, "Red city bike", 150.0)
        .await;

    assert_eq!(app.drain_notifications().await, 2);
}

#[tokio::test]
async fn mismatches_send_nothing() {
    let mut app = spawn_app().await;
    let (_, seller) = app.author("seller", &[]).await;
    let (_, buyer) = app.author("buyer", &["buyer@example.com"]).await;
    let bikes = app.heading(&seller, "Bikes").await;
    let cars = app.heading(&seller, "Cars").await;
    app.suitable_ad(&buyer, "Bikes", "Red city bike", 100.0, 150.0)
        .await;

    // Too expensive, different text, different heading.
    app.announcement(&seller, bikes, "Red city bike", 150.01)
        .await;
    app.announcement(&seller, bikes, "Red city bike, barely used", 120.0)
        .await;
    app.announcement(&seller, cars, "Red city bike", 120.0)
        .await;

    assert_eq!(app.drain_notifications().await, 0);
    assert!(app.mailer.sent().is_empty());
}

#[tokio::test]
async fn author_with_several_matches_is_mailed_once() {
    let mut app = spawn_app().await;
    let (_, seller) = app.author("seller", &[]).await;
    let (_, buyer) = app.author("buyer", &["buyer@example.com"]).await;
    let heading_id = app.heading(&seller, "Bikes").await;
    app.suitable_ad(&buyer, "Bikes", "Red city bike", 100.0, 150.0)
        .await;
    app.suitable_ad(&buyer, "Bikes", "Red city bike", 0.0, 500.0)
        .await;

    app.announcement(&seller, heading_id, "Red city bike", 120.0)
        .await;

    assert_eq!(app.drain_notifications().await, 1);
}

#[tokio::test]
async fn rejected_recipient_does_not_block_others() {
    let mut app = spawn_app().await;
    let (_, seller) = app.author("seller", &[]).await;
    let (_, first) = app.author("first", &["first@example.com"]).await;
    let (_, second) = app.author("second", &["second@example.com"]).await;
    let heading_id = app.heading(&seller, "Bikes").await;
    app.suitable_ad(&first, "Bikes", "Red city bike", 0.0, 500.0)
        .await;
    app.suitable_ad(&second, "Bikes", "Red city bike", 0.0, 500.0)
        .await;
    app.mailer.reject("first@example.com");

    app.announcement(&seller, heading_id, "Red city bike", 120.0)
        .await;

    assert_eq!(app.drain_notifications().await, 1);
    let sent = app.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "second@example.com");
}

#[tokio::test]
async fn background_worker_delivers_queued_notifications() {
    let mut app = spawn_app().await;
    let (_, placeholder) = NotificationQueue::channel(1);
    let queue = std::mem::replace(&mut app.queue, placeholder);
    let worker = app.notifier.clone().spawn(queue);

    let (_, seller) = app.author("seller", &[]).await;
    let (_, buyer) = app.author("buyer", &["buyer@example.com"]).await;
    let heading_id = app.heading(&seller, "Bikes").await;
    app.suitable_ad(&buyer, "Bikes", "Red city bike", 0.0, 500.0)
        .await;
    app.announcement(&seller, heading_id, "Red city bike", 120.0)
        .await;

    let mut sent = Vec::new();
    for _ in 0..100 {
        sent = app.mailer.sent();
        if !sent.is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    worker.abort();

    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "buyer@example.com");
}
