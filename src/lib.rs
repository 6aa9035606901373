#![doc = "The `taskhub` library crate."]
#![doc = ""]
#![doc = "This crate contains the authentication core (token codec, request gate,"]
#![doc = "access policy), the domain models, routing configuration, and error"]
#![doc = "handling for the TaskHub application. It is used by the main binary"]
#![doc = "(`main.rs`) to construct and run the application."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;


// Re-export key types if desired for easier use of the library crate.
// Example:
// pub use crate::error::AppError;
// pub use crate::models::user::{User, UserRole};
