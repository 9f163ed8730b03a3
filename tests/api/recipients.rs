use reqwest::StatusCode;
use uuid::Uuid;

use crate::helpers::{spawn_app, valid_recipient};

#[tokio::test]
async fn create_recipient_returns_a_201_with_the_persisted_record() {
    // Arrange
    let app = spawn_app().await;
    let user_id = Uuid::new_v4();

    // Act
    let response = app.post_recipient(user_id, &valid_recipient()).await;

    // Assert
    assert_eq!(response.status(), StatusCode::CREATED);
    let saved: serde_json::Value = response.json().await.unwrap();
    assert_eq!(saved["recipient_id"], 1);
    assert_eq!(saved["user_id"], user_id.to_string());
    assert_eq!(saved["first_names"], "Ursula");
    assert_eq!(saved["bank_routing_number"], "110000000");
    assert!(saved["created_at"].is_string());
    assert!(saved["updated_at"].is_string());
}

#[tokio::test]
async fn create_recipient_persists_the_new_recipient() {
    // Arrange
    let app = spawn_app().await;
    let user_id = Uuid::new_v4();

    // Act
    app.create_recipient(user_id, &valid_recipient()).await;

    // Assert
    let response = app.get_recipients(user_id).await;
    assert_eq!(response.status(), StatusCode::OK);
    let saved: Vec<serde_json::Value> = response.json().await.unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0]["last_names"], "Le Guin");
    assert_eq!(saved[0]["email_address"], "ursula_le_guin@gmail.com");
}

#[tokio::test]
async fn create_recipient_returns_a_422_with_field_errors_for_invalid_data() {
    // Arrange
    let app = spawn_app().await;
    let test_cases = vec![
        (
            serde_json::json!({
                "first_names": "",
                "last_names": "Lee",
                "email_address": "x@y.com"
            }),
            "first_names",
            "First name is required",
        ),
        (
            serde_json::json!({ "first_names": "Ada", "last_names": "  " }),
            "last_names",
            "Last name is required",
        ),
        (
            serde_json::json!({
                "first_names": "Ada",
                "last_names": "Lee",
                "email_address": "not-an-email"
            }),
            "email_address",
            "Please enter a valid email address",
        ),
        (
            serde_json::json!({
                "first_names": "A",
                "last_names": "B",
                "bank_account_number": "123",
                "country_iso3": "USA"
            }),
            "bank_routing_number",
            "Routing number is required when account number is provided",
        ),
        (
            serde_json::json!({
                "first_names": "A",
                "last_names": "B",
                "country_iso3": "GBR",
                "bank_account_number": "12345678",
                "bank_routing_number": "400515"
            }),
            "swift_bic",
            "SWIFT/BIC code is required for international transfers",
        ),
    ];

    for (invalid_body, field, message) in test_cases {
        // Act
        let response = app.post_recipient(Uuid::new_v4(), &invalid_body).await;

        // Assert
        assert_eq!(
            response.status(),
            StatusCode::UNPROCESSABLE_ENTITY,
            "The API did not fail with 422 when {} was invalid.",
            field
        );
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["errors"][field], message);
    }
}

#[tokio::test]
async fn create_recipient_without_a_country_defaults_to_usa() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let saved = app
        .create_recipient(
            Uuid::new_v4(),
            &serde_json::json!({ "first_names": "Ada", "last_names": "Lovelace" }),
        )
        .await;

    // Assert
    assert_eq!(saved["country_iso3"], "USA");
}

#[tokio::test]
async fn create_recipient_rejects_a_body_that_is_not_json() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app
        .api_client
        .post(format!("{}/users/{}/recipients", app.address, Uuid::new_v4()))
        .body("first_names=Ada")
        .send()
        .await
        .expect("Failed to execute request.");

    // Assert
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn create_recipient_passes_store_rejections_through() {
    // Arrange
    let app = spawn_app().await;
    app.store.reject_writes_with("duplicate email");

    // Act
    let response = app
        .post_recipient(
            Uuid::new_v4(),
            &serde_json::json!({ "first_names": "A", "last_names": "B" }),
        )
        .await;

    // Assert
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "duplicate email");
}

#[tokio::test]
async fn list_recipients_only_returns_the_users_own_recipients_in_order() {
    // Arrange
    let app = spawn_app().await;
    let owner = Uuid::new_v4();
    let stranger = Uuid::new_v4();
    let jane = serde_json::json!({ "first_names": "Jane", "last_names": "Doe" });
    app.create_recipient(owner, &jane).await;
    app.create_recipient(stranger, &valid_recipient()).await;
    let john = serde_json::json!({ "first_names": "John", "last_names": "Doe" });
    app.create_recipient(owner, &john).await;

    // Act
    let saved: Vec<serde_json::Value> = app.get_recipients(owner).await.json().await.unwrap();

    // Assert
    let names: Vec<_> = saved.iter().map(|r| r["first_names"].clone()).collect();
    assert_eq!(names, vec!["Jane", "John"]);
}

#[tokio::test]
async fn list_recipients_returns_a_400_for_a_malformed_user_id() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app
        .api_client
        .get(format!("{}/users/not-a-uuid/recipients", app.address))
        .send()
        .await
        .expect("Failed to execute request.");

    // Assert
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_recipient_returns_the_updated_record_with_the_same_id() {
    // Arrange
    let app = spawn_app().await;
    let user_id = Uuid::new_v4();
    let created = app.create_recipient(user_id, &valid_recipient()).await;
    let recipient_id = created["recipient_id"].as_i64().unwrap();
    let mut changes = valid_recipient();
    changes["city"] = "Portland".into();

    // Act
    let response = app.put_recipient(user_id, recipient_id, &changes).await;

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    let updated: serde_json::Value = response.json().await.unwrap();
    assert_eq!(updated["recipient_id"], recipient_id);
    assert_eq!(updated["city"], "Portland");
    assert_eq!(updated["created_at"], created["created_at"]);
}

#[tokio::test]
async fn update_recipient_validates_the_new_details() {
    // Arrange
    let app = spawn_app().await;
    let user_id = Uuid::new_v4();
    let created = app.create_recipient(user_id, &valid_recipient()).await;
    let recipient_id = created["recipient_id"].as_i64().unwrap();
    let mut changes = valid_recipient();
    changes["first_names"] = "".into();

    // Act
    let response = app.put_recipient(user_id, recipient_id, &changes).await;

    // Assert
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let saved: Vec<serde_json::Value> = app.get_recipients(user_id).await.json().await.unwrap();
    assert_eq!(saved[0]["first_names"], "Ursula");
}

#[tokio::test]
async fn update_recipient_accepts_a_partial_body() {
    // Arrange
    let app = spawn_app().await;
    let user_id = Uuid::new_v4();
    let created = app.create_recipient(user_id, &valid_recipient()).await;
    let recipient_id = created["recipient_id"].as_i64().unwrap();

    // Act
    let response = app
        .put_recipient(user_id, recipient_id, &serde_json::json!({ "city": "Leeds" }))
        .await;

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    let updated: serde_json::Value = response.json().await.unwrap();
    assert_eq!(updated["city"], "Leeds");
    assert_eq!(updated["first_names"], "Ursula");
    assert_eq!(updated["bank_routing_number"], "110000000");
}

#[tokio::test]
async fn update_recipient_cannot_clear_bank_details_the_stored_account_needs() {
    // Arrange
    let app = spawn_app().await;
    let user_id = Uuid::new_v4();
    let created = app
        .create_recipient(
            user_id,
            &serde_json::json!({
                "first_names": "Alan",
                "last_names": "Turing",
                "country_iso3": "GBR",
                "bank_account_number": "000123456789",
                "bank_routing_number": "400515",
                "swift_bic": "BARCGB22"
            }),
        )
        .await;
    let recipient_id = created["recipient_id"].as_i64().unwrap();

    // Act
    let response = app
        .put_recipient(
            user_id,
            recipient_id,
            &serde_json::json!({ "swift_bic": "", "bank_routing_number": "" }),
        )
        .await;

    // Assert
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body["errors"]["bank_routing_number"],
        "Routing number is required when account number is provided"
    );
    assert_eq!(
        body["errors"]["swift_bic"],
        "SWIFT/BIC code is required for international transfers"
    );
    let saved: Vec<serde_json::Value> = app.get_recipients(user_id).await.json().await.unwrap();
    assert_eq!(saved[0]["bank_routing_number"], "400515");
    assert_eq!(saved[0]["swift_bic"], "BARCGB22");
}

#[tokio::test]
async fn update_recipient_returns_a_404_for_another_users_recipient() {
    // Arrange
    let app = spawn_app().await;
    let owner = Uuid::new_v4();
    let created = app.create_recipient(owner, &valid_recipient()).await;
    let recipient_id = created["recipient_id"].as_i64().unwrap();

    // Act
    let response = app
        .put_recipient(Uuid::new_v4(), recipient_id, &serde_json::json!({ "city": "Leeds" }))
        .await;

    // Assert
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let saved: Vec<serde_json::Value> = app.get_recipients(owner).await.json().await.unwrap();
    assert_eq!(saved[0]["city"], serde_json::Value::Null);
}

#[tokio::test]
async fn update_recipient_returns_a_404_for_an_unknown_recipient() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app
        .put_recipient(Uuid::new_v4(), 999, &valid_recipient())
        .await;

    // Assert
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "recipient 999 was not found");
}

#[tokio::test]
async fn delete_recipient_returns_a_204_and_removes_it() {
    // Arrange
    let app = spawn_app().await;
    let user_id = Uuid::new_v4();
    let created = app.create_recipient(user_id, &valid_recipient()).await;
    let recipient_id = created["recipient_id"].as_i64().unwrap();

    // Act
    let response = app.delete_recipient(user_id, recipient_id).await;

    // Assert
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let saved: Vec<serde_json::Value> = app.get_recipients(user_id).await.json().await.unwrap();
    assert!(saved.is_empty());
    let response = app.delete_recipient(user_id, recipient_id).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_recipient_does_not_touch_another_users_recipient() {
    // Arrange
    let app = spawn_app().await;
    let owner = Uuid::new_v4();
    let created = app.create_recipient(owner, &valid_recipient()).await;
    let recipient_id = created["recipient_id"].as_i64().unwrap();

    // Act
    let response = app.delete_recipient(Uuid::new_v4(), recipient_id).await;

    // Assert
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let saved: Vec<serde_json::Value> = app.get_recipients(owner).await.json().await.unwrap();
    assert_eq!(saved.len(), 1);
}
