use actix_web::{rt, test, web, App, HttpServer};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::net::TcpListener;
use std::sync::Arc;
use uuid::Uuid;

use tasktrack::auth::{Claims, TokenService, TOKEN_HEADER};
use tasktrack::error;
use tasktrack::models::Task;
use tasktrack::routes;
use tasktrack::state::AppState;
use tasktrack::store::{MemoryStore, TaskStore, UserStore};

const SUITE_SECRET: &str = "tasks-suite-secret";

fn test_state() -> web::Data<AppState> {
    let store = Arc::new(MemoryStore::new());
    web::Data::new(AppState::new(
        store.clone() as Arc<dyn UserStore>,
        store as Arc<dyn TaskStore>,
        TokenService::new(SUITE_SECRET, 3600),
    ))
}

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data($state.clone())
                .app_data(error::json_config())
                .service(routes::health::health)
                .configure(routes::config),
        )
        .await
    };
}

// Helper struct to hold auth details
struct TestUser {
    id: Uuid,
    token: String,
}

async fn register_and_login_user(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
    >,
    name: &str,
    email: &str,
    password: &str,
) -> TestUser {
    let req = test::TestRequest::post()
        .uri("/users/")
        .set_json(json!({ "name": name, "email": email, "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert!(resp.status().is_success(), "Failed to register {}", email);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let id = Uuid::parse_str(body["id"].as_str().expect("register must return an id"))
        .expect("registered id must be a uuid");

    let req = test::TestRequest::post()
        .uri("/users/login")
        .set_json(json!({ "email": email, "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert!(resp.status().is_success(), "Failed to login {}", email);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let token = body["token"]
        .as_str()
        .expect("login must return a token")
        .to_string();

    TestUser { id, token }
}

#[actix_rt::test]
async fn test_create_task_without_token_is_unauthorized() {
    let state = test_state();

    // Find an available port, then run a real server around the same state.
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let server_state = state.clone();
    let server_handle = rt::spawn(async move {
        HttpServer::new(move || {
            App::new()
                .app_data(server_state.clone())
                .app_data(error::json_config())
                .service(routes::health::health)
                .configure(routes::config)
        })
        .bind(("127.0.0.1", port))
        .unwrap_or_else(|_| panic!("Failed to bind to port {}", port))
        .run()
        .await
    });

    // Give the server a moment to start
    tokio::time::sleep(tokio::time::Duration::from_millis(200)).await;

    let client = reqwest::Client::new();
    let resp = client
        .post(format!("http://127.0.0.1:{}/tasks/", port))
        .json(&json!({ "description": "orphan", "assignedToUid": Uuid::new_v4() }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), reqwest::StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = resp.json().await.expect("error body must be JSON");
    assert!(body["error"].as_str().is_some());

    server_handle.abort();
}

#[test_log::test(actix_rt::test)]
async fn test_task_lifecycle_with_ownership_rules() {
    let state = test_state();
    let app = test_app!(state);

    let ana = register_and_login_user(&app, "Ana", "ana@example.com", "PasswordAna123").await;
    let ben = register_and_login_user(&app, "Ben", "ben@example.com", "PasswordBen123").await;

    // Ana creates a task assigned to Ben.
    let req = test::TestRequest::post()
        .uri("/tasks/")
        .insert_header((TOKEN_HEADER, ana.token.clone()))
        .set_json(json!({ "description": "write spec", "assignedToUid": ben.id }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let task_id = Uuid::parse_str(body["id"].as_str().unwrap()).unwrap();

    // Ana sees it among her created tasks, with denormalized names.
    let req = test::TestRequest::get()
        .uri("/tasks/createdby/")
        .insert_header((TOKEN_HEADER, ana.token.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let created: Vec<Task> = test::read_body_json(resp).await;
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].id, task_id);
    assert_eq!(created[0].created_by_uid, ana.id);
    assert_eq!(created[0].created_by_name, "Ana");
    assert_eq!(created[0].assigned_to_uid, ben.id);
    assert_eq!(created[0].assigned_to_name, "Ben");
    assert!(!created[0].done);

    // Ben sees it among his assigned tasks.
    let req = test::TestRequest::get()
        .uri("/tasks/assignedto/")
        .insert_header((TOKEN_HEADER, ben.token.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let assigned = body["tasks"].as_array().unwrap();
    assert_eq!(assigned.len(), 1);
    assert_eq!(assigned[0]["id"], json!(task_id));

    // Ben closes the task; repeating the call is a no-op with the same
    // response shape.
    for _ in 0..2 {
        let req = test::TestRequest::patch()
            .uri(&format!("/tasks/{}", task_id))
            .insert_header((TOKEN_HEADER, ben.token.clone()))
            .set_json(json!({ "done": true }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["taskUid"], json!(task_id));
    }

    // Ana is the creator but not the assignee: she may not toggle done.
    let req = test::TestRequest::patch()
        .uri(&format!("/tasks/{}", task_id))
        .insert_header((TOKEN_HEADER, ana.token.clone()))
        .set_json(json!({ "done": false }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 403);

    // Ben is the assignee but not the creator: he may not delete.
    let req = test::TestRequest::delete()
        .uri(&format!("/tasks/{}", task_id))
        .insert_header((TOKEN_HEADER, ben.token.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 403);

    // Ana deletes her task; exactly one record is affected.
    let req = test::TestRequest::delete()
        .uri(&format!("/tasks/{}", task_id))
        .insert_header((TOKEN_HEADER, ana.token.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["tasksAffected"], json!(1));

    // The id is gone: further mutation attempts miss.
    let req = test::TestRequest::delete()
        .uri(&format!("/tasks/{}", task_id))
        .insert_header((TOKEN_HEADER, ana.token.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    let req = test::TestRequest::patch()
        .uri(&format!("/tasks/{}", task_id))
        .insert_header((TOKEN_HEADER, ben.token.clone()))
        .set_json(json!({ "done": true }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_rt::test]
async fn test_create_task_with_unknown_assignee_is_rejected() {
    let state = test_state();
    let app = test_app!(state);
    let ana = register_and_login_user(&app, "Ana", "ana@example.com", "PasswordAna123").await;

    let req = test::TestRequest::post()
        .uri("/tasks/")
        .insert_header((TOKEN_HEADER, ana.token.clone()))
        .set_json(json!({ "description": "to nobody", "assignedToUid": Uuid::new_v4() }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    // Nothing was persisted.
    let req = test::TestRequest::get()
        .uri("/tasks/createdby/")
        .insert_header((TOKEN_HEADER, ana.token))
        .to_request();
    let created: Vec<Task> = test::read_body_json(test::call_service(&app, req).await).await;
    assert!(created.is_empty());
}

#[actix_rt::test]
async fn test_create_task_validation_failures() {
    let state = test_state();
    let app = test_app!(state);
    let ana = register_and_login_user(&app, "Ana", "ana@example.com", "PasswordAna123").await;

    // Empty description.
    let req = test::TestRequest::post()
        .uri("/tasks/")
        .insert_header((TOKEN_HEADER, ana.token.clone()))
        .set_json(json!({ "description": "", "assignedToUid": ana.id }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    // Missing assignedToUid.
    let req = test::TestRequest::post()
        .uri("/tasks/")
        .insert_header((TOKEN_HEADER, ana.token.clone()))
        .set_json(json!({ "description": "floating" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
async fn test_update_task_with_missing_done_field_is_rejected() {
    let state = test_state();
    let app = test_app!(state);
    let ana = register_and_login_user(&app, "Ana", "ana@example.com", "PasswordAna123").await;

    let req = test::TestRequest::post()
        .uri("/tasks/")
        .insert_header((TOKEN_HEADER, ana.token.clone()))
        .set_json(json!({ "description": "self task", "assignedToUid": ana.id }))
        .to_request();
    let body: serde_json::Value = test::read_body_json(test::call_service(&app, req).await).await;
    let task_id = body["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::patch()
        .uri(&format!("/tasks/{}", task_id))
        .insert_header((TOKEN_HEADER, ana.token.clone()))
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("done"));
}

#[actix_rt::test]
async fn test_expired_token_is_rejected_before_any_mutation() {
    let state = test_state();
    let app = test_app!(state);
    let ana = register_and_login_user(&app, "Ana", "ana@example.com", "PasswordAna123").await;

    // A well-signed token whose expiry is firmly in the past.
    let expired_claims = Claims {
        id: ana.id,
        email: "ana@example.com".to_string(),
        exp: (Utc::now() - Duration::hours(2)).timestamp() as usize,
    };
    let expired_token = encode(
        &Header::default(),
        &expired_claims,
        &EncodingKey::from_secret(SUITE_SECRET.as_bytes()),
    )
    .unwrap();

    let req = test::TestRequest::post()
        .uri("/tasks/")
        .insert_header((TOKEN_HEADER, expired_token))
        .set_json(json!({ "description": "too late", "assignedToUid": ana.id }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 403);

    // The rejected request reached no store: nothing was created.
    let req = test::TestRequest::get()
        .uri("/tasks/createdby/")
        .insert_header((TOKEN_HEADER, ana.token))
        .to_request();
    let created: Vec<Task> = test::read_body_json(test::call_service(&app, req).await).await;
    assert!(created.is_empty());
}
