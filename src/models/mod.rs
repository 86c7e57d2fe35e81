pub mod task;
pub mod user;

pub use task::{Task, TaskInput, TaskListQuery, TaskOrdering, TaskPage, TaskStatus};
pub use user::{NewUser, User};
