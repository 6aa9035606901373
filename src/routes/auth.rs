use crate::{
    auth::{hash_password, issue_token, verify_password, AuthResponse, LoginRequest, SignupRequest},
    error::AppError,
    models::{NewUser, UserResponse, UserRole},
    store::UserStore,
};
use actix_web::{post, web, HttpResponse, Responder};
use log::{info, warn};
use validator::Validate;

/// Login
///
/// Verifies the presented credentials and returns a signed token together
/// with the account's id and role.
#[post("/login")]
pub async fn login(
    store: web::Data<dyn UserStore>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    login_data.validate()?;

    info!("login attempt for {}", login_data.email);

    let user = store.find_by_email(&login_data.email).await?;

    match user {
        Some(user) => {
            if verify_password(&login_data.password, &user.password_hash)? {
                let token = issue_token(&user.email)?;
                info!("login successful for user id {}", user.id);
                Ok(HttpResponse::Ok().json(AuthResponse {
                    token,
                    user_id: user.id,
                    role: user.role,
                }))
            } else {
                // Same outcome as an unknown email: the caller must not be
                // able to probe which addresses have accounts.
                warn!("login failed for {}", login_data.email);
                Err(AppError::Unauthorized("Invalid credentials".into()))
            }
        }
        None => {
            warn!("login failed for {}", login_data.email);
            Err(AppError::Unauthorized("Invalid credentials".into()))
        }
    }
}

/// Signup
///
/// Creates a new employee account. Signup never grants the admin role; the
/// only admin-producing path is the startup bootstrap.
#[post("/signup")]
pub async fn signup(
    store: web::Data<dyn UserStore>,
    signup_data: web::Json<SignupRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    signup_data.validate()?;

    info!("signup request for {}", signup_data.email);

    // Check if email already exists
    if store.find_by_email(&signup_data.email).await?.is_some() {
        return Err(AppError::BadRequest("Email already registered".into()));
    }

    let password_hash = hash_password(&signup_data.password)?;
    let signup_data = signup_data.into_inner();

    let user = store
        .insert(NewUser {
            name: signup_data.name,
            email: signup_data.email,
            password_hash,
            role: UserRole::Employee,
        })
        .await?;

    info!("user {} created", user.id);
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}
