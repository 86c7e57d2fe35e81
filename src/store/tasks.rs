use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::AppError;
use crate::models::task::OrderField;
use crate::models::{Task, TaskInput, TaskOrdering};

/// Filtering, ordering, and pagination options for a task query.
/// Every query is additionally scoped to one owner.
#[derive(Debug)]
pub struct TaskFilter {
    pub search: Option<String>,
    pub ordering: TaskOrdering,
    pub limit: i64,
    pub offset: i64,
}

/// Persistence capability for task records. All operations are scoped to the
/// owning user; a task that belongs to someone else behaves exactly like a
/// task that does not exist.
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn create(&self, owner: i32, input: &TaskInput) -> Result<Task, AppError>;
    async fn get(&self, owner: i32, id: i64) -> Result<Option<Task>, AppError>;
    async fn update(&self, owner: i32, id: i64, input: &TaskInput)
        -> Result<Option<Task>, AppError>;
    async fn delete(&self, owner: i32, id: i64) -> Result<bool, AppError>;
    /// Returns one page of matching tasks plus the total match count.
    async fn query(&self, owner: i32, filter: &TaskFilter) -> Result<(Vec<Task>, i64), AppError>;
}

const TASK_COLUMNS: &str = "id, title, description, status, created_at, updated_at, user_id";

pub struct PgTaskStore {
    pool: PgPool,
}

impl PgTaskStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskStore for PgTaskStore {
    async fn create(&self, owner: i32, input: &TaskInput) -> Result<Task, AppError> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "INSERT INTO tasks (title, description, status, user_id) \
             VALUES ($1, $2, $3, $4) RETURNING {}",
            TASK_COLUMNS
        ))
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.status)
        .bind(owner)
        .fetch_one(&self.pool)
        .await?;
        Ok(task)
    }

    async fn get(&self, owner: i32, id: i64) -> Result<Option<Task>, AppError> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "SELECT {} FROM tasks WHERE id = $1 AND user_id = $2",
            TASK_COLUMNS
        ))
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;
        Ok(task)
    }

    async fn update(
        &self,
        owner: i32,
        id: i64,
        input: &TaskInput,
    ) -> Result<Option<Task>, AppError> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "UPDATE tasks SET title = $1, description = $2, status = $3, updated_at = now() \
             WHERE id = $4 AND user_id = $5 RETURNING {}",
            TASK_COLUMNS
        ))
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.status)
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;
        Ok(task)
    }

    async fn delete(&self, owner: i32, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn query(&self, owner: i32, filter: &TaskFilter) -> Result<(Vec<Task>, i64), AppError> {
        // Base query scoped to the owner; the search condition is appended to
        // both the page query and the count query so they always agree.
        let mut sql = format!("SELECT {} FROM tasks WHERE user_id = $1", TASK_COLUMNS);
        let mut count_sql = String::from("SELECT COUNT(*) FROM tasks WHERE user_id = $1");

        if filter.search.is_some() {
            let clause = " AND (title ILIKE $2 OR description ILIKE $2)";
            sql.push_str(clause);
            count_sql.push_str(clause);
        }

        // The ordering column comes from the OrderField whitelist, never from
        // client input.
        sql.push_str(&format!(
            " ORDER BY {} {}",
            filter.ordering.field.column(),
            filter.ordering.direction()
        ));
        if filter.ordering.field != OrderField::Id {
            // Secondary key keeps page boundaries stable for non-unique columns.
            sql.push_str(", id ASC");
        }
        sql.push_str(&format!(" LIMIT {} OFFSET {}", filter.limit, filter.offset));

        let pattern = filter.search.as_ref().map(|s| format!("%{}%", s));

        let mut rows_query = sqlx::query_as::<_, Task>(&sql).bind(owner);
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql).bind(owner);
        if let Some(pattern) = &pattern {
            rows_query = rows_query.bind(pattern.clone());
            count_query = count_query.bind(pattern.clone());
        }

        let rows = rows_query.fetch_all(&self.pool).await?;
        let count = count_query.fetch_one(&self.pool).await?;
        Ok((rows, count))
    }
}
