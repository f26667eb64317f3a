//! End-to-end access control tests against a live Postgres instance.
//!
//! These tests run only when `POSTGRES_URL` is set; without it they
//! return immediately so the rest of the suite stays database-free.

use axum::http::StatusCode;
use axum_test::TestServer;
use parcelo_postgres::query::UserRepository;
use parcelo_postgres::types::UserRole;
use parcelo_server::handler::routes;
use parcelo_server::service::{ServiceConfig, ServiceState};
use serde_json::{Value, json};
use uuid::Uuid;

const TEST_PASSWORD: &str = "correct-horse-battery";

/// Connects to the database named by `POSTGRES_URL`.
///
/// Returns `None` when the variable is unset.
async fn create_test_server() -> anyhow::Result<Option<(TestServer, ServiceState)>> {
    let Ok(endpoint) = std::env::var("POSTGRES_URL") else {
        return Ok(None);
    };

    let config = ServiceConfig::builder()
        .with_postgres_endpoint(endpoint)
        .build()?;
    let state = ServiceState::from_config(&config).await?;
    let server = TestServer::new(routes(state.clone()))?;
    Ok(Some((server, state)))
}

/// Registers a fresh account with a unique name.
///
/// Returns the new account id and its email address.
async fn register_account(server: &TestServer, label: &str) -> anyhow::Result<(Uuid, String)> {
    let suffix = Uuid::new_v4().simple().to_string();
    let email = format!("{label}-{suffix}@example.com");

    let response = server
        .post("/auth/register")
        .json(&json!({
            "username": format!("{label}-{suffix}"),
            "emailAddress": email,
            "password": TEST_PASSWORD,
        }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let body = response.json::<Value>();
    let user_id = body["userId"].as_str().unwrap().parse()?;
    Ok((user_id, email))
}

/// Signs in and returns a bearer token for the given account.
async fn login(server: &TestServer, email: &str) -> anyhow::Result<String> {
    let response = server
        .post("/auth/login")
        .json(&json!({
            "emailAddress": email,
            "password": TEST_PASSWORD,
        }))
        .await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    Ok(body["accessToken"].as_str().unwrap().to_owned())
}

/// Changes an account role directly in the database.
async fn assign_role(state: &ServiceState, user_id: Uuid, role: UserRole) -> anyhow::Result<()> {
    let mut conn = state.postgres.get_connection().await?;
    UserRepository::assign_role(&mut conn, user_id, role).await?;
    Ok(())
}

async fn create_parcel(server: &TestServer, token: &str) -> anyhow::Result<Value> {
    let response = server
        .post("/parcels")
        .authorization_bearer(token)
        .json(&json!({
            "description": "Ceramic tea set",
            "weightKg": 1.8,
            "pickupAddress": "3 Dock Lane",
            "destinationAddress": "41 Summit Ave",
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    Ok(response.json::<Value>())
}

#[tokio::test]
async fn admin_gate_follows_current_role_not_token() -> anyhow::Result<()> {
    let Some((server, state)) = create_test_server().await? else {
        return Ok(());
    };

    let (user_id, email) = register_account(&server, "gate").await?;
    assign_role(&state, user_id, UserRole::Admin).await?;
    let token = login(&server, &email).await?;

    let response = server.get("/users").authorization_bearer(&token).await;
    response.assert_status_ok();

    // Demoting the account must lock out the still-valid token.
    assign_role(&state, user_id, UserRole::User).await?;

    let response = server.get("/users").authorization_bearer(&token).await;
    response.assert_status(StatusCode::FORBIDDEN);

    Ok(())
}

#[tokio::test]
async fn parcels_are_hidden_from_other_accounts() -> anyhow::Result<()> {
    let Some((server, _state)) = create_test_server().await? else {
        return Ok(());
    };

    let (_, owner_email) = register_account(&server, "owner").await?;
    let (_, stranger_email) = register_account(&server, "stranger").await?;
    let owner_token = login(&server, &owner_email).await?;
    let stranger_token = login(&server, &stranger_email).await?;

    let parcel = create_parcel(&server, &owner_token).await?;
    let parcel_id = parcel["parcelId"].as_str().unwrap();
    let parcel_path = format!("/parcels/{parcel_id}");

    let response = server
        .get(&parcel_path)
        .authorization_bearer(&stranger_token)
        .await;
    response.assert_status(StatusCode::FORBIDDEN);

    let response = server
        .patch(&parcel_path)
        .authorization_bearer(&stranger_token)
        .json(&json!({ "description": "hijacked" }))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);

    let response = server
        .delete(&parcel_path)
        .authorization_bearer(&stranger_token)
        .await;
    response.assert_status(StatusCode::FORBIDDEN);

    let response = server
        .get(&parcel_path)
        .authorization_bearer(&owner_token)
        .await;
    response.assert_status_ok();

    Ok(())
}

#[tokio::test]
async fn soft_deleted_parcels_disappear_from_reads() -> anyhow::Result<()> {
    let Some((server, _state)) = create_test_server().await? else {
        return Ok(());
    };

    let (_, email) = register_account(&server, "archiver").await?;
    let token = login(&server, &email).await?;

    let parcel = create_parcel(&server, &token).await?;
    let parcel_id = parcel["parcelId"].as_str().unwrap().to_owned();
    let parcel_path = format!("/parcels/{parcel_id}");

    let response = server
        .delete(&parcel_path)
        .authorization_bearer(&token)
        .await;
    response.assert_status_ok();

    let response = server
        .get(&parcel_path)
        .authorization_bearer(&token)
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let response = server.get("/parcels").authorization_bearer(&token).await;
    response.assert_status_ok();
    let listed = response.json::<Vec<Value>>();
    assert!(
        listed
            .iter()
            .all(|entry| entry["parcelId"].as_str() != Some(parcel_id.as_str())),
        "deleted parcel still listed"
    );

    Ok(())
}

#[tokio::test]
async fn edits_advance_the_update_timestamp() -> anyhow::Result<()> {
    let Some((server, _state)) = create_test_server().await? else {
        return Ok(());
    };

    let (_, email) = register_account(&server, "editor").await?;
    let token = login(&server, &email).await?;

    let parcel = create_parcel(&server, &token).await?;
    let parcel_id = parcel["parcelId"].as_str().unwrap();
    let created: jiff::Timestamp = parcel["updatedAt"].as_str().unwrap().parse()?;

    let response = server
        .patch(&format!("/parcels/{parcel_id}"))
        .authorization_bearer(&token)
        .json(&json!({ "description": "Ceramic tea set, bubble-wrapped" }))
        .await;
    response.assert_status_ok();

    let updated: jiff::Timestamp = response.json::<Value>()["updatedAt"]
        .as_str()
        .unwrap()
        .parse()?;
    assert!(updated > created, "updated_at did not advance");

    Ok(())
}
