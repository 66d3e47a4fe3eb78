//! API integration tests
//!
//! These run against a live server on localhost:8080 with its database up.

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde_json::{json, Value};
use std::time::{SystemTime, UNIX_EPOCH};

const BASE_URL: &str = "http://localhost:8080";

/// Per-call unique digits, so reruns against the same database don't collide
fn unique_suffix() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos();
    format!("{:013}", nanos % 10_000_000_000_000)
}

/// 13-character ISBN unique to this call
fn unique_isbn() -> String {
    unique_suffix()
}

/// Helper to get a token for the given username, signing the user up on
/// first use and signing in on later runs
async fn get_auth_token(client: &Client, username: &str) -> String {
    let signin = client
        .post(format!("{}/auth/signin", BASE_URL))
        .json(&json!({"username": username, "password": "password"}))
        .send()
        .await
        .expect("Failed to send signin request");

    let response = if signin.status().is_success() {
        signin
    } else {
        let signup = client
            .post(format!("{}/auth/signup", BASE_URL))
            .json(&json!({
                "username": username,
                "password": "password",
                "role": "LIBRARIAN"
            }))
            .send()
            .await
            .expect("Failed to send signup request");
        assert_eq!(signup.status(), 201);
        signup
    };

    let body: Value = response.json().await.expect("Failed to parse token response");
    body["token"].as_str().expect("No token in response").to_string()
}

/// Helper to create a book and return its ID
async fn create_book(client: &Client, token: &str, isbn: &str) -> i64 {
    let response = client
        .post(format!("{}/api/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "title": "Test Book",
            "author": "Test Author",
            "publication_date": "2020-01-01",
            "isbn": isbn,
            "status": "AVAILABLE"
        }))
        .send()
        .await
        .expect("Failed to send create book request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse book response");
    body["id"].as_i64().expect("No book ID")
}

/// Helper to create a patron linked to a fresh credential, returning its ID
async fn create_patron(client: &Client, token: &str, email: &str) -> i64 {
    // Sign up a fresh credential for the patron and resolve its ID
    let signup = client
        .post(format!("{}/auth/signup", BASE_URL))
        .json(&json!({
            "username": format!("patron-{}", email),
            "password": "password",
            "role": "PATRON"
        }))
        .send()
        .await
        .expect("Failed to send signup request");
    assert_eq!(signup.status(), 201);

    let body: Value = signup.json().await.expect("Failed to parse signup response");
    let patron_token = body["token"].as_str().expect("No token in response");

    let me = client
        .get(format!("{}/auth/me", BASE_URL))
        .header("Authorization", format!("Bearer {}", patron_token))
        .send()
        .await
        .expect("Failed to send request");
    let identity: Value = me.json().await.expect("Failed to parse identity response");
    let user_id = identity["id"].as_i64().expect("No user ID");

    let response = client
        .post(format!("{}/api/patrons", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "name": "Test Patron",
            "email": email,
            "user_id": user_id
        }))
        .send()
        .await
        .expect("Failed to send create patron request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse patron response");
    body["id"].as_i64().expect("No patron ID")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_signup_and_signin_issue_tokens() {
    let client = Client::new();
    let username = format!("alice-{}", unique_suffix());

    let response = client
        .post(format!("{}/auth/signup", BASE_URL))
        .json(&json!({
            "username": username,
            "password": "pw1234",
            "role": "PATRON"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["token"].is_string());

    let response = client
        .post(format!("{}/auth/signin", BASE_URL))
        .json(&json!({
            "username": username,
            "password": "pw1234"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["token"].is_string());
}

#[tokio::test]
#[ignore]
async fn test_duplicate_signup_conflicts() {
    let client = Client::new();

    let payload = json!({
        "username": format!("dup-{}", unique_suffix()),
        "password": "pw1234",
        "role": "PATRON"
    });

    let first = client
        .post(format!("{}/auth/signup", BASE_URL))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(first.status(), 201);

    let second = client
        .post(format!("{}/auth/signup", BASE_URL))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(second.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_signin_errors_are_indistinguishable() {
    let client = Client::new();

    get_auth_token(&client, "bob-signin").await;

    let wrong_password = client
        .post(format!("{}/auth/signin", BASE_URL))
        .json(&json!({"username": "bob-signin", "password": "wrong"}))
        .send()
        .await
        .expect("Failed to send request");

    let unknown_user = client
        .post(format!("{}/auth/signin", BASE_URL))
        .json(&json!({"username": "no-such-user", "password": "wrong"}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(wrong_password.status(), 401);
    assert_eq!(unknown_user.status(), 401);

    let a: Value = wrong_password.json().await.expect("Failed to parse response");
    let b: Value = unknown_user.json().await.expect("Failed to parse response");
    assert_eq!(a, b);
}

#[tokio::test]
#[ignore]
async fn test_get_current_identity() {
    let client = Client::new();
    let token = get_auth_token(&client, "dora-me").await;

    let response = client
        .get(format!("{}/auth/me", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["username"], "dora-me");
    assert_eq!(body["role"], "LIBRARIAN");
}

#[tokio::test]
#[ignore]
async fn test_invalid_role_rejected() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/signup", BASE_URL))
        .json(&json!({
            "username": format!("carol-{}", unique_suffix()),
            "password": "pw1234",
            "role": "SUPERUSER"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_unauthorized_access() {
    let client = Client::new();

    let response = client
        .get(format!("{}/api/books/1", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_borrow_and_return_lifecycle() {
    let client = Client::new();
    let token = get_auth_token(&client, "librarian-tests").await;

    let book_id = create_book(&client, &token, &unique_isbn()).await;
    let email = format!("lifecycle-{}@example.org", unique_suffix());
    let patron_id = create_patron(&client, &token, &email).await;

    // Borrow
    let response = client
        .post(format!("{}/api/borrow/{}/patron/{}", BASE_URL, book_id, patron_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let record: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(record["book_id"].as_i64(), Some(book_id));
    assert_eq!(record["patron_id"].as_i64(), Some(patron_id));
    assert!(record["return_date"].is_null());

    // Due date is exactly fourteen days after the borrow date
    let borrow_date: DateTime<Utc> = record["borrow_date"]
        .as_str()
        .and_then(|s| s.parse().ok())
        .expect("No borrow date");
    let due_date: DateTime<Utc> = record["due_date"]
        .as_str()
        .and_then(|s| s.parse().ok())
        .expect("No due date");
    assert_eq!(due_date - borrow_date, chrono::Duration::days(14));

    // Book is now BORROWED
    let response = client
        .get(format!("{}/api/books/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    let book: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(book["status"], "BORROWED");

    // A second borrow of the same book fails
    let response = client
        .post(format!("{}/api/borrow/{}/patron/{}", BASE_URL, book_id, patron_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    // Return
    let response = client
        .put(format!("{}/api/return/{}/patron/{}", BASE_URL, book_id, patron_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
    let record: Value = response.json().await.expect("Failed to parse response");
    assert!(record["return_date"].is_string());

    // Book is AVAILABLE again
    let response = client
        .get(format!("{}/api/books/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    let book: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(book["status"], "AVAILABLE");
}

#[tokio::test]
#[ignore]
async fn test_return_without_borrow_not_found() {
    let client = Client::new();
    let token = get_auth_token(&client, "librarian-tests").await;

    let book_id = create_book(&client, &token, &unique_isbn()).await;
    let email = format!("noloan-{}@example.org", unique_suffix());
    let patron_id = create_patron(&client, &token, &email).await;

    let response = client
        .put(format!("{}/api/return/{}/patron/{}", BASE_URL, book_id, patron_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_borrow_missing_book_not_found() {
    let client = Client::new();
    let token = get_auth_token(&client, "librarian-tests").await;

    let response = client
        .post(format!("{}/api/borrow/999999999/patron/1", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_isbn_conflicts() {
    let client = Client::new();
    let token = get_auth_token(&client, "librarian-tests").await;

    let isbn = unique_isbn();
    create_book(&client, &token, &isbn).await;

    let response = client
        .post(format!("{}/api/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "title": "Another Book",
            "author": "Another Author",
            "publication_date": "2021-01-01",
            "isbn": isbn,
            "status": "AVAILABLE"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_concurrent_borrows_only_one_succeeds() {
    let client = Client::new();
    let token = get_auth_token(&client, "librarian-tests").await;

    let book_id = create_book(&client, &token, &unique_isbn()).await;
    let patron_a = create_patron(
        &client,
        &token,
        &format!("race-a-{}@example.org", unique_suffix()),
    )
    .await;
    let patron_b = create_patron(
        &client,
        &token,
        &format!("race-b-{}@example.org", unique_suffix()),
    )
    .await;

    let borrow = |patron_id: i64| {
        let client = client.clone();
        let token = token.clone();
        async move {
            client
                .post(format!("{}/api/borrow/{}/patron/{}", BASE_URL, book_id, patron_id))
                .header("Authorization", format!("Bearer {}", token))
                .send()
                .await
                .expect("Failed to send request")
                .status()
        }
    };

    let (a, b) = tokio::join!(borrow(patron_a), borrow(patron_b));

    let successes = [a, b].iter().filter(|s| s.as_u16() == 201).count();
    assert_eq!(successes, 1, "exactly one concurrent borrow must succeed");
}

#[tokio::test]
#[ignore]
async fn test_patron_update_and_delete() {
    let client = Client::new();
    let token = get_auth_token(&client, "librarian-tests").await;

    let email = format!("update-{}@example.org", unique_suffix());
    let patron_id = create_patron(&client, &token, &email).await;

    // Update
    let response = client
        .put(format!("{}/api/patrons/{}", BASE_URL, patron_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "name": "Renamed Patron",
            "email": email,
            "phone_number": "555-0100"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
    let patron: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(patron["name"], "Renamed Patron");
    assert_eq!(patron["phone_number"], "555-0100");

    // Delete
    let response = client
        .delete(format!("{}/api/patrons/{}", BASE_URL, patron_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    // Gone
    let response = client
        .get(format!("{}/api/patrons/{}", BASE_URL, patron_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_patron_with_open_loan_cannot_be_deleted() {
    let client = Client::new();
    let token = get_auth_token(&client, "librarian-tests").await;

    let book_id = create_book(&client, &token, &unique_isbn()).await;
    let email = format!("blocked-{}@example.org", unique_suffix());
    let patron_id = create_patron(&client, &token, &email).await;

    let response = client
        .post(format!("{}/api/borrow/{}/patron/{}", BASE_URL, book_id, patron_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let response = client
        .delete(format!("{}/api/patrons/{}", BASE_URL, patron_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);
}
