//! Shared fixtures for the integration tests: an in-memory user store so the
//! authentication core can be driven end-to-end without PostgreSQL.

// Each test binary uses a different subset of these fixtures.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use taskhub::auth::hash_password;
use taskhub::error::AppError;
use taskhub::models::{NewUser, User, UserRole};
use taskhub::store::UserStore;

/// The signing secret every integration test runs under. All tests set the
/// same value, so parallel test threads cannot disagree about it.
pub const TEST_JWT_SECRET: &str = "integration-test-secret";

pub fn set_test_secret() {
    std::env::set_var("JWT_SECRET", TEST_JWT_SECRET);
}

/// In-memory [`UserStore`] with the same observable behavior as the
/// PostgreSQL-backed one: emails are unique, ids are assigned sequentially.
#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deletes an account, for simulating a token whose subject no longer
    /// exists.
    pub fn remove(&self, email: &str) {
        self.users.lock().unwrap().retain(|u| u.email != email);
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_role(&self, role: UserRole) -> Result<Option<User>, AppError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.role == role).cloned())
    }

    async fn list_by_role(&self, role: UserRole) -> Result<Vec<User>, AppError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().filter(|u| u.role == role).cloned().collect())
    }

    async fn insert(&self, user: NewUser) -> Result<User, AppError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(AppError::DatabaseError("duplicate email".into()));
        }
        let user = User {
            id: users.len() as i32 + 1,
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
        };
        users.push(user.clone());
        Ok(user)
    }
}

/// Seeds an account with a bcrypt-hashed password and returns the stored row.
pub async fn seed_user(
    store: &MemoryUserStore,
    name: &str,
    email: &str,
    password: &str,
    role: UserRole,
) -> User {
    store
        .insert(NewUser {
            name: name.to_string(),
            email: email.to_string(),
            password_hash: hash_password(password).unwrap(),
            role,
        })
        .await
        .unwrap()
}
