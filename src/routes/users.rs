use crate::{
    auth::{AuthenticatedUser, LoginRequest, LoginResponse, RegisterRequest},
    error::AppError,
    state::AppState,
};
use actix_web::{get, post, web, HttpResponse, Responder};
use serde_json::json;

/// Register a new user.
///
/// Open endpoint; responds with the store-assigned id of the new account.
#[post("/")]
pub async fn register(
    state: web::Data<AppState>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    let user = state.users.register(register_data.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({ "id": user.id })))
}

/// Login with email and password.
///
/// Responds with the session token, its lifetime in seconds, and the
/// identity it was issued for.
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let user = state.users.authenticate(&login_data).await?;
    let token = state.tokens.issue(user.id, &user.email)?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        token,
        expiration: state.tokens.ttl_secs(),
        logged_user: user.public(),
    }))
}

/// List all users (id, email, name), echoing the caller's decoded claim.
#[get("/")]
pub async fn list_users(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let users = state.users.list_all().await?;

    Ok(HttpResponse::Ok().json(json!({
        "users": users,
        "request_made_by": caller.0,
    })))
}
