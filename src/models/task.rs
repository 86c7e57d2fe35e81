use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the completion state of a task.
/// Corresponds to the `task_status` SQL enum.
#[derive(
    Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, sqlx::Type,
)]
#[sqlx(type_name = "task_status")]
pub enum TaskStatus {
    /// Task is yet to be completed.
    Pending,
    /// Task is done.
    Completed,
}

/// Input structure for creating or replacing a task.
/// Contains validation rules for its fields.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    /// The title of the task.
    /// Must be between 1 and 200 characters.
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    /// A description for the task.
    #[validate(length(min = 1, max = 1000))]
    pub description: String,

    /// The completion state of the task.
    pub status: TaskStatus,
}

/// Represents a task entity as stored in the database and returned by the API.
///
/// The owner is tracked internally for scoping but never serialized in
/// responses.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing, default)]
    pub user_id: i32,
}

/// Query parameters accepted by the task list endpoint.
#[derive(Debug, Deserialize)]
pub struct TaskListQuery {
    /// Field to order by, with an optional leading `-` for descending.
    pub ordering: Option<String>,
    /// Case-insensitive substring to match against title or description.
    pub search: Option<String>,
    /// 1-based page number.
    pub page: Option<u32>,
    /// Items per page, capped at [`MAX_PAGE_SIZE`].
    pub page_size: Option<u32>,
}

/// Default number of tasks per page.
pub const DEFAULT_PAGE_SIZE: u32 = 7;
/// Upper bound on the page size a client may request. Larger requests are
/// capped, not rejected.
pub const MAX_PAGE_SIZE: u32 = 10;

/// Columns the list endpoint may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderField {
    Id,
    Title,
    Status,
    CreatedAt,
    UpdatedAt,
}

impl OrderField {
    pub fn column(self) -> &'static str {
        match self {
            OrderField::Id => "id",
            OrderField::Title => "title",
            OrderField::Status => "status",
            OrderField::CreatedAt => "created_at",
            OrderField::UpdatedAt => "updated_at",
        }
    }
}

/// A validated ordering clause: a whitelisted column plus direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskOrdering {
    pub field: OrderField,
    pub descending: bool,
}

impl Default for TaskOrdering {
    fn default() -> Self {
        Self {
            field: OrderField::Id,
            descending: false,
        }
    }
}

impl TaskOrdering {
    /// Parses an ordering expression such as `created_at` or `-title`.
    /// Returns `None` for fields that are not whitelisted.
    pub fn parse(expr: &str) -> Option<Self> {
        let (descending, name) = match expr.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, expr),
        };
        let field = match name {
            "id" => OrderField::Id,
            "title" => OrderField::Title,
            "status" => OrderField::Status,
            "created_at" => OrderField::CreatedAt,
            "updated_at" => OrderField::UpdatedAt,
            _ => return None,
        };
        Some(Self { field, descending })
    }

    pub fn direction(&self) -> &'static str {
        if self.descending {
            "DESC"
        } else {
            "ASC"
        }
    }
}

/// One page of task results, with the total count across all pages and
/// markers for the neighbouring pages.
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskPage {
    pub count: i64,
    pub next: Option<u32>,
    pub previous: Option<u32>,
    pub results: Vec<Task>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_task_input_validation() {
        let valid_input = TaskInput {
            title: "Buy milk".to_string(),
            description: "2%".to_string(),
            status: TaskStatus::Pending,
        };
        assert!(valid_input.validate().is_ok());

        let empty_title = TaskInput {
            title: "".to_string(),
            description: "2%".to_string(),
            status: TaskStatus::Pending,
        };
        assert!(empty_title.validate().is_err());

        let empty_description = TaskInput {
            title: "Buy milk".to_string(),
            description: "".to_string(),
            status: TaskStatus::Completed,
        };
        assert!(empty_description.validate().is_err());

        let long_title = TaskInput {
            title: "a".repeat(201),
            description: "ok".to_string(),
            status: TaskStatus::Pending,
        };
        assert!(long_title.validate().is_err());
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::Pending).unwrap(),
            "\"Pending\""
        );
        assert_eq!(
            serde_json::to_string(&TaskStatus::Completed).unwrap(),
            "\"Completed\""
        );
        assert!(serde_json::from_str::<TaskStatus>("\"Started\"").is_err());
    }

    #[test]
    fn test_ordering_parse() {
        let ordering = TaskOrdering::parse("id").unwrap();
        assert_eq!(ordering.field, OrderField::Id);
        assert!(!ordering.descending);
        assert_eq!(ordering.direction(), "ASC");

        let ordering = TaskOrdering::parse("-created_at").unwrap();
        assert_eq!(ordering.field, OrderField::CreatedAt);
        assert!(ordering.descending);
        assert_eq!(ordering.direction(), "DESC");

        assert!(TaskOrdering::parse("owner").is_none());
        assert!(TaskOrdering::parse("id; DROP TABLE tasks").is_none());
    }
}
