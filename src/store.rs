//!
//! # User Store
//!
//! The narrow persistence contract the authentication core depends on.
//! The token gate and the login handler only ever need to resolve a principal
//! by email or by role and to create one; everything else the application
//! stores (tasks, comments) is business glue that talks to the pool directly
//! in its route module.
//!
//! Keeping this seam as a trait lets the gate and the auth flows run against
//! an in-memory store in tests, with `PgUserStore` as the production
//! implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::AppError;
use crate::models::{NewUser, User, UserRole};

/// Lookup and creation of user accounts.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Resolves a principal by its login identifier (email).
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Returns any one principal carrying the given role, if one exists.
    /// Used by the startup bootstrap to decide whether an admin must be created.
    async fn find_by_role(&self, role: UserRole) -> Result<Option<User>, AppError>;

    /// Lists all principals with the given role, ordered by id.
    async fn list_by_role(&self, role: UserRole) -> Result<Vec<User>, AppError>;

    /// Inserts a new account and returns the stored row.
    async fn insert(&self, user: NewUser) -> Result<User, AppError>;
}

/// PostgreSQL-backed [`UserStore`].
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_hash, role FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_role(&self, role: UserRole) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_hash, role FROM users WHERE role = $1 LIMIT 1",
        )
        .bind(role)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn list_by_role(&self, role: UserRole) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_hash, role FROM users WHERE role = $1 ORDER BY id",
        )
        .bind(role)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn insert(&self, user: NewUser) -> Result<User, AppError> {
        let created = sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email, password_hash, role)
             VALUES ($1, $2, $3, $4)
             RETURNING id, name, email, password_hash, role",
        )
        .bind(user.name)
        .bind(user.email)
        .bind(user.password_hash)
        .bind(user.role)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }
}
