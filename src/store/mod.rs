pub mod tasks;
pub mod users;

#[cfg(test)]
pub mod memory;

pub use tasks::{PgTaskStore, TaskFilter, TaskStore};
pub use users::{PgUserStore, UserStore};
