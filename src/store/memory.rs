//! In-memory store implementations used by the service-layer tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::error::AppError;
use crate::models::task::OrderField;
use crate::models::{NewUser, Task, TaskInput, User};
use crate::store::{TaskFilter, TaskStore, UserStore};

#[derive(Default)]
pub struct MemoryUserStore {
    inner: Mutex<UserStoreInner>,
}

#[derive(Default)]
struct UserStoreInner {
    users: Vec<User>,
    next_id: i32,
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.users.iter().any(|u| u.username == new_user.username) {
            return Err(AppError::Conflict("Username is already taken".into()));
        }
        inner.next_id += 1;
        let user = User {
            id: inner.next_id,
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            created_at: Utc::now(),
        };
        inner.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.iter().find(|u| u.email == email).cloned())
    }

    async fn update_password(&self, id: i32, password_hash: &str) -> Result<(), AppError> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(user) = inner.users.iter_mut().find(|u| u.id == id) {
            user.password_hash = password_hash.to_string();
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryTaskStore {
    inner: Mutex<TaskStoreInner>,
}

#[derive(Default)]
struct TaskStoreInner {
    tasks: Vec<Task>,
    next_id: i64,
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn create(&self, owner: i32, input: &TaskInput) -> Result<Task, AppError> {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let now = Utc::now();
        let task = Task {
            id: inner.next_id,
            title: input.title.clone(),
            description: input.description.clone(),
            status: input.status,
            created_at: now,
            updated_at: now,
            user_id: owner,
        };
        inner.tasks.push(task.clone());
        Ok(task)
    }

    async fn get(&self, owner: i32, id: i64) -> Result<Option<Task>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .tasks
            .iter()
            .find(|t| t.id == id && t.user_id == owner)
            .cloned())
    }

    async fn update(
        &self,
        owner: i32,
        id: i64,
        input: &TaskInput,
    ) -> Result<Option<Task>, AppError> {
        let mut inner = self.inner.lock().unwrap();
        match inner
            .tasks
            .iter_mut()
            .find(|t| t.id == id && t.user_id == owner)
        {
            Some(task) => {
                task.title = input.title.clone();
                task.description = input.description.clone();
                task.status = input.status;
                task.updated_at = Utc::now();
                Ok(Some(task.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, owner: i32, id: i64) -> Result<bool, AppError> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.tasks.len();
        inner.tasks.retain(|t| !(t.id == id && t.user_id == owner));
        Ok(inner.tasks.len() < before)
    }

    async fn query(&self, owner: i32, filter: &TaskFilter) -> Result<(Vec<Task>, i64), AppError> {
        let inner = self.inner.lock().unwrap();
        let needle = filter.search.as_ref().map(|s| s.to_lowercase());
        let mut matches: Vec<Task> = inner
            .tasks
            .iter()
            .filter(|t| t.user_id == owner)
            .filter(|t| match &needle {
                Some(needle) => {
                    t.title.to_lowercase().contains(needle)
                        || t.description.to_lowercase().contains(needle)
                }
                None => true,
            })
            .cloned()
            .collect();

        matches.sort_by(|a, b| {
            let ord = match filter.ordering.field {
                OrderField::Id => a.id.cmp(&b.id),
                OrderField::Title => a.title.cmp(&b.title),
                OrderField::Status => a.status.cmp(&b.status),
                OrderField::CreatedAt => a.created_at.cmp(&b.created_at),
                OrderField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
            };
            let ord = ord.then(a.id.cmp(&b.id));
            if filter.ordering.descending {
                ord.reverse()
            } else {
                ord
            }
        });

        let count = matches.len() as i64;
        let rows = matches
            .into_iter()
            .skip(filter.offset.max(0) as usize)
            .take(filter.limit.max(0) as usize)
            .collect();
        Ok((rows, count))
    }
}
