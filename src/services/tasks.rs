use std::sync::Arc;

use validator::Validate;

use crate::error::AppError;
use crate::models::task::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::models::{Task, TaskInput, TaskListQuery, TaskOrdering, TaskPage};
use crate::store::{TaskFilter, TaskStore};

fn task_not_found() -> AppError {
    AppError::NotFound("Task not found or not yours".into())
}

/// Owner-scoped task CRUD with search, ordering, and pagination, built on
/// the injected [`TaskStore`] capability.
#[derive(Clone)]
pub struct TaskService {
    tasks: Arc<dyn TaskStore>,
}

impl TaskService {
    pub fn new(tasks: Arc<dyn TaskStore>) -> Self {
        Self { tasks }
    }

    /// Returns one page of the user's tasks.
    ///
    /// Ordering defaults to id ascending; unknown fields are rejected.
    /// The page size defaults to 7 and is capped at 10 rather than rejected.
    /// A page number past the end of the result set is a not-found, matching
    /// page-number paginator conventions.
    pub async fn list(&self, user_id: i32, query: &TaskListQuery) -> Result<TaskPage, AppError> {
        let ordering = match query.ordering.as_deref() {
            Some(expr) => TaskOrdering::parse(expr)
                .ok_or_else(|| AppError::Validation(format!("Cannot order by field: {}", expr)))?,
            None => TaskOrdering::default(),
        };

        let page = query.page.unwrap_or(1);
        if page == 0 {
            return Err(AppError::NotFound("Invalid page".into()));
        }
        let page_size = query
            .page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        let offset = i64::from(page - 1) * i64::from(page_size);

        let filter = TaskFilter {
            search: query.search.clone().filter(|s| !s.is_empty()),
            ordering,
            limit: i64::from(page_size),
            offset,
        };
        let (results, count) = self.tasks.query(user_id, &filter).await?;

        if page > 1 && offset >= count {
            return Err(AppError::NotFound("Invalid page".into()));
        }

        let next = if offset + results.len() as i64 < count {
            Some(page + 1)
        } else {
            None
        };
        let previous = if page > 1 { Some(page - 1) } else { None };

        Ok(TaskPage {
            count,
            next,
            previous,
            results,
        })
    }

    pub async fn create(&self, user_id: i32, input: &TaskInput) -> Result<Task, AppError> {
        input.validate()?;
        self.tasks.create(user_id, input).await
    }

    pub async fn get(&self, user_id: i32, id: i64) -> Result<Task, AppError> {
        self.tasks
            .get(user_id, id)
            .await?
            .ok_or_else(task_not_found)
    }

    /// Full replace of title, description, and status.
    pub async fn update(
        &self,
        user_id: i32,
        id: i64,
        input: &TaskInput,
    ) -> Result<Task, AppError> {
        input.validate()?;
        self.tasks
            .update(user_id, id, input)
            .await?
            .ok_or_else(task_not_found)
    }

    pub async fn delete(&self, user_id: i32, id: i64) -> Result<(), AppError> {
        if self.tasks.delete(user_id, id).await? {
            Ok(())
        } else {
            Err(task_not_found())
        }
    }
}
