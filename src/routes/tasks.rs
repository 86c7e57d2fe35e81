use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{TaskInput, TaskListQuery},
    services::TaskService,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};

/// Retrieves a paginated list of tasks for the authenticated user.
///
/// ## Query Parameters:
/// - `ordering` (optional): Field to order by, e.g. `title` or `-created_at`.
///   Defaults to `id` ascending.
/// - `search` (optional): Case-insensitive substring matched against task
///   titles and descriptions.
/// - `page` (optional): 1-based page number.
/// - `page_size` (optional): Items per page, default 7, capped at 10.
///
/// ## Responses:
/// - `200 OK`: `{count, next, previous, results}`.
/// - `400 Bad Request`: Unknown ordering field.
/// - `401 Unauthorized`: Missing or invalid access token.
/// - `404 Not Found`: Page number past the end of the result set.
#[get("/tasks")]
pub async fn list_tasks(
    service: web::Data<TaskService>,
    query_params: web::Query<TaskListQuery>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let page = service.list(user.id, &query_params).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// Creates a new task owned by the authenticated user.
///
/// ## Request Body:
/// - `title`: 1 to 200 characters.
/// - `description`: Non-empty.
/// - `status`: `"Pending"` or `"Completed"`.
///
/// ## Responses:
/// - `201 Created`: The stored task.
/// - `400 Bad Request`: Missing or invalid fields.
/// - `401 Unauthorized`: Missing or invalid access token.
#[post("/tasks")]
pub async fn create_task(
    service: web::Data<TaskService>,
    task_data: web::Json<TaskInput>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let task = service.create(user.id, &task_data).await?;
    Ok(HttpResponse::Created().json(task))
}

/// Retrieves one task by id.
///
/// A task owned by someone else is indistinguishable from a missing one:
/// both are a 404.
#[get("/tasks/{id}")]
pub async fn get_task(
    service: web::Data<TaskService>,
    task_id: web::Path<i64>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let task = service.get(user.id, task_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Replaces a task's title, description, and status.
#[put("/tasks/{id}")]
pub async fn update_task(
    service: web::Data<TaskService>,
    task_id: web::Path<i64>,
    task_data: web::Json<TaskInput>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let task = service
        .update(user.id, task_id.into_inner(), &task_data)
        .await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Deletes a task. Irreversible; returns no body.
#[delete("/tasks/{id}")]
pub async fn delete_task(
    service: web::Data<TaskService>,
    task_id: web::Path<i64>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    service.delete(user.id, task_id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
