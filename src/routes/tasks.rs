use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::TaskInput,
    state::AppState,
};
use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

/// Create a task assigned to another (or the same) user.
///
/// The creator is taken from the validated token, never from the payload.
/// Responds with the store-assigned id of the new task.
#[post("/")]
pub async fn create_task(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    let task = state
        .tasks
        .create_task(&caller, task_data.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "id": task.id })))
}

/// List the tasks created by the caller.
#[get("/createdby/")]
pub async fn created_by(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let tasks = state.tasks.list_created_by(caller.id).await?;

    Ok(HttpResponse::Ok().json(tasks))
}

/// List the tasks assigned to the caller.
#[get("/assignedto/")]
pub async fn assigned_to(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let tasks = state.tasks.list_assigned_to(caller.id).await?;

    Ok(HttpResponse::Ok().json(json!({ "tasks": tasks })))
}

#[derive(Debug, Deserialize)]
pub struct SetDoneRequest {
    pub done: bool,
}

/// Set or clear a task's `done` flag. Assignee only.
#[patch("/{task_uid}")]
pub async fn update_task(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
    task_uid: web::Path<Uuid>,
    update: web::Json<SetDoneRequest>,
) -> Result<impl Responder, AppError> {
    let task_uid = task_uid.into_inner();
    state.tasks.set_done(&caller, task_uid, update.done).await?;

    Ok(HttpResponse::Ok().json(json!({ "taskUid": task_uid })))
}

/// Delete a task. Creator only. Responds with the number of removed
/// records.
#[delete("/{task_uid}")]
pub async fn delete_task(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
    task_uid: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let affected = state
        .tasks
        .delete_task(&caller, task_uid.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "tasksAffected": affected })))
}
